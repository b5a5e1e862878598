//! GIF header and logical screen descriptor.

use oxigif_core::error::{OxiGifError, Result};
use std::fmt;
use std::io::{Read, Write};

/// GIF signature bytes.
pub const GIF_SIGNATURE: [u8; 3] = *b"GIF";

/// Size of the header (signature + version).
pub const HEADER_SIZE: usize = 6;

/// Size of the logical screen descriptor.
pub const SCREEN_DESCRIPTOR_SIZE: usize = 7;

/// Logical screen descriptor packed field.
pub mod flags {
    /// Global color table present.
    pub const GLOBAL_COLOR_TABLE: u8 = 0x80;
    /// Color resolution (bits per primary minus one).
    pub const COLOR_RESOLUTION_MASK: u8 = 0x70;
    /// Global color table sorted by importance.
    pub const SORTED: u8 = 0x08;
    /// Global color table size field.
    pub const TABLE_SIZE_MASK: u8 = 0x07;
}

/// GIF format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GifVersion {
    /// Original 1987 format.
    Gif87a,
    /// 1989 revision with extensions.
    #[default]
    Gif89a,
}

impl GifVersion {
    /// Version characters as written after the signature.
    pub fn as_bytes(&self) -> &'static [u8; 3] {
        match self {
            GifVersion::Gif87a => b"87a",
            GifVersion::Gif89a => b"89a",
        }
    }

    /// Detect the version from the first bytes of a file.
    ///
    /// Returns `None` unless `data` starts with a complete, known header.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data.get(..HEADER_SIZE)? {
            b"GIF87a" => Some(GifVersion::Gif87a),
            b"GIF89a" => Some(GifVersion::Gif89a),
            _ => None,
        }
    }

    /// Read and check the 6-byte header.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;

        if header[..3] != GIF_SIGNATURE {
            return Err(OxiGifError::invalid_magic(GIF_SIGNATURE, &header[..3]));
        }

        Self::detect(&header).ok_or_else(|| {
            OxiGifError::unsupported_version(String::from_utf8_lossy(&header[3..]))
        })
    }

    /// Write the 6-byte header.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&GIF_SIGNATURE)?;
        writer.write_all(self.as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for GifVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GifVersion::Gif87a => write!(f, "GIF87a"),
            GifVersion::Gif89a => write!(f, "GIF89a"),
        }
    }
}

/// Logical screen descriptor: canvas geometry and global table flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicalScreenDescriptor {
    /// Canvas width in pixels.
    pub width: u16,
    /// Canvas height in pixels.
    pub height: u16,
    /// Whether a global color table follows.
    pub has_global_color_table: bool,
    /// Bits per primary color of the source image, minus one (0-7).
    pub color_resolution: u8,
    /// Whether the global color table is sorted by importance.
    pub sorted: bool,
    /// Global color table size field N (2^(N+1) entries).
    pub color_table_size: u8,
    /// Global color table index of the background color.
    pub background_color_index: u8,
    /// Raw pixel aspect ratio byte (0 = not given).
    pub pixel_aspect_ratio: u8,
}

impl LogicalScreenDescriptor {
    /// Create a descriptor for a canvas without a global color table.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Read the 7-byte descriptor.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; SCREEN_DESCRIPTOR_SIZE];
        reader.read_exact(&mut buf)?;

        let packed = buf[4];
        Ok(Self {
            width: u16::from_le_bytes([buf[0], buf[1]]),
            height: u16::from_le_bytes([buf[2], buf[3]]),
            has_global_color_table: packed & flags::GLOBAL_COLOR_TABLE != 0,
            color_resolution: (packed & flags::COLOR_RESOLUTION_MASK) >> 4,
            sorted: packed & flags::SORTED != 0,
            color_table_size: packed & flags::TABLE_SIZE_MASK,
            background_color_index: buf[5],
            pixel_aspect_ratio: buf[6],
        })
    }

    /// Write the 7-byte descriptor.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buf = [0u8; SCREEN_DESCRIPTOR_SIZE];
        buf[0..2].copy_from_slice(&self.width.to_le_bytes());
        buf[2..4].copy_from_slice(&self.height.to_le_bytes());
        buf[4] = self.packed();
        buf[5] = self.background_color_index;
        buf[6] = self.pixel_aspect_ratio;
        writer.write_all(&buf)?;
        Ok(())
    }

    fn packed(&self) -> u8 {
        let mut packed = (self.color_resolution << 4) & flags::COLOR_RESOLUTION_MASK;
        packed |= self.color_table_size & flags::TABLE_SIZE_MASK;
        if self.has_global_color_table {
            packed |= flags::GLOBAL_COLOR_TABLE;
        }
        if self.sorted {
            packed |= flags::SORTED;
        }
        packed
    }

    /// Number of global color table entries announced, or 0 without one.
    pub fn global_color_table_len(&self) -> usize {
        if self.has_global_color_table {
            2 << self.color_table_size
        } else {
            0
        }
    }

    /// Pixel aspect ratio as width / height, if given.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match self.pixel_aspect_ratio {
            0 => None,
            n => Some((n as f32 + 15.0) / 64.0),
        }
    }
}
