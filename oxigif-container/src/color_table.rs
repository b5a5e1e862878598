//! Color tables.

use oxigif_core::error::{OxiGifError, Result};
use std::io::{Read, Write};

/// Maximum number of entries in a color table.
pub const MAX_COLORS: usize = 256;

/// Largest color table size field (2^(7+1) = 256 entries).
pub const MAX_SIZE_FIELD: u8 = 7;

/// One color table entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A global or local color table.
///
/// On disk a table always holds `2^(N+1)` entries for its size field `N`.
/// Tables built in memory may hold any count from 1 to 256 and are padded
/// with black when written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<Rgb>,
}

impl ColorTable {
    /// Create a table from colors.
    ///
    /// Fails with a range error for an empty table or more than 256 colors.
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() || colors.len() > MAX_COLORS {
            return Err(OxiGifError::palette_size_out_of_range(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Number of entries a size field announces.
    pub fn len_for_size_field(size_field: u8) -> usize {
        2 << (size_field & MAX_SIZE_FIELD)
    }

    /// Smallest size field whose table holds `len` entries.
    pub fn size_field_for_len(len: usize) -> u8 {
        let mut field = 0;
        while field < MAX_SIZE_FIELD && Self::len_for_size_field(field) < len {
            field += 1;
        }
        field
    }

    /// Read `2^(size_field+1)` entries.
    pub fn read<R: Read>(reader: &mut R, size_field: u8) -> Result<Self> {
        let len = Self::len_for_size_field(size_field);
        let mut raw = vec![0u8; len * 3];
        reader.read_exact(&mut raw)?;

        let colors = raw.chunks_exact(3).map(|c| Rgb::new(c[0], c[1], c[2])).collect();
        Ok(Self { colors })
    }

    /// Write the table, padded to the length its size field announces.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let padded_len = Self::len_for_size_field(self.size_field());
        let mut raw = Vec::with_capacity(padded_len * 3);
        for color in &self.colors {
            raw.extend_from_slice(&[color.r, color.g, color.b]);
        }
        raw.resize(padded_len * 3, 0);
        writer.write_all(&raw)?;
        Ok(())
    }

    /// Size field N describing this table.
    pub fn size_field(&self) -> u8 {
        Self::size_field_for_len(self.colors.len())
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of entries once written, which is what pixel indices may use.
    pub fn padded_len(&self) -> usize {
        Self::len_for_size_field(self.size_field())
    }

    /// Look up a color by index.
    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    /// All colors in order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}
