//! Image descriptor.

use oxigif_core::error::{OxiGifError, Result};
use std::io::{Read, Write};

/// Image separator introducing an image descriptor (`,`).
pub const IMAGE_SEPARATOR: u8 = 0x2C;

/// Size of the image descriptor, separator included.
pub const IMAGE_DESCRIPTOR_SIZE: usize = 10;

/// Image descriptor packed field.
pub mod flags {
    /// Local color table present.
    pub const LOCAL_COLOR_TABLE: u8 = 0x80;
    /// Rows stored in interlaced order.
    pub const INTERLACED: u8 = 0x40;
    /// Local color table sorted by importance.
    pub const SORTED: u8 = 0x20;
    /// Local color table size field.
    pub const TABLE_SIZE_MASK: u8 = 0x07;
}

/// Position, size and local table flags of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Left edge on the canvas.
    pub left: u16,
    /// Top edge on the canvas.
    pub top: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Whether a local color table follows.
    pub has_local_color_table: bool,
    /// Whether rows are stored in interlaced order.
    ///
    /// Kept as a flag only; rows are never reordered.
    pub interlaced: bool,
    /// Whether the local color table is sorted by importance.
    pub sorted: bool,
    /// Local color table size field N (2^(N+1) entries).
    pub color_table_size: u8,
}

impl ImageDescriptor {
    /// Create a descriptor for a frame at the canvas origin.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Read a descriptor, separator included.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut separator = [0u8; 1];
        reader.read_exact(&mut separator)?;
        if separator[0] != IMAGE_SEPARATOR {
            return Err(OxiGifError::invalid_header(format!(
                "expected image separator 0x2c, found {:#04x}",
                separator[0]
            )));
        }
        Self::read_body(reader)
    }

    /// Read the nine bytes following an already consumed separator.
    pub fn read_body<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; IMAGE_DESCRIPTOR_SIZE - 1];
        reader.read_exact(&mut buf)?;

        let packed = buf[8];
        Ok(Self {
            left: u16::from_le_bytes([buf[0], buf[1]]),
            top: u16::from_le_bytes([buf[2], buf[3]]),
            width: u16::from_le_bytes([buf[4], buf[5]]),
            height: u16::from_le_bytes([buf[6], buf[7]]),
            has_local_color_table: packed & flags::LOCAL_COLOR_TABLE != 0,
            interlaced: packed & flags::INTERLACED != 0,
            sorted: packed & flags::SORTED != 0,
            color_table_size: packed & flags::TABLE_SIZE_MASK,
        })
    }

    /// Write the descriptor, separator included.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buf = [0u8; IMAGE_DESCRIPTOR_SIZE];
        buf[0] = IMAGE_SEPARATOR;
        buf[1..3].copy_from_slice(&self.left.to_le_bytes());
        buf[3..5].copy_from_slice(&self.top.to_le_bytes());
        buf[5..7].copy_from_slice(&self.width.to_le_bytes());
        buf[7..9].copy_from_slice(&self.height.to_le_bytes());

        let mut packed = self.color_table_size & flags::TABLE_SIZE_MASK;
        if self.has_local_color_table {
            packed |= flags::LOCAL_COLOR_TABLE;
        }
        if self.interlaced {
            packed |= flags::INTERLACED;
        }
        if self.sorted {
            packed |= flags::SORTED;
        }
        buf[9] = packed;

        writer.write_all(&buf)?;
        Ok(())
    }

    /// Number of pixels the frame covers.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of local color table entries announced, or 0 without one.
    pub fn local_color_table_len(&self) -> usize {
        if self.has_local_color_table {
            2 << self.color_table_size
        } else {
            0
        }
    }
}
