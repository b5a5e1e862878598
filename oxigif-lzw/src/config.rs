//! LZW configuration for GIF image data.

use oxigif_core::error::{OxiGifError, Result};

/// Smallest minimum code size GIF allows.
pub const MIN_CODE_SIZE: u8 = 2;

/// Largest minimum code size GIF allows (256-color palettes).
pub const MAX_CODE_SIZE: u8 = 8;

/// Widest code a GIF stream may contain.
pub const MAX_BITS: u8 = 12;

/// Number of codes addressable with [`MAX_BITS`].
pub const MAX_TABLE_SIZE: usize = 1 << MAX_BITS;

/// Behavioural switches that do not depend on the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Widen codes one entry earlier than standard GIF.
    ///
    /// Some third-party encoders use this convention. Both the encoder and
    /// decoder honour it, so data produced with it set must be decoded with
    /// it set.
    pub early_change: bool,
    /// Fail when the code stream runs out before an End of Information code.
    ///
    /// When false, a truncated stream ends the block with what has been
    /// decoded so far.
    pub require_end_code: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            early_change: false,
            require_end_code: true,
        }
    }
}

impl CodecOptions {
    /// Options accepting truncated streams, as most viewers do.
    pub const LENIENT: Self = Self {
        early_change: false,
        require_end_code: false,
    };
}

/// LZW configuration parameters for one image data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Minimum code size: the number of bits a pixel index occupies (2-8).
    pub code_size: u8,
    /// Maximum code width in bits.
    pub max_bits: u8,
    /// Whether code width grows one entry early.
    pub early_change: bool,
    /// Whether a missing End of Information code is an error.
    pub require_end_code: bool,
}

impl LzwConfig {
    /// Standard GIF configuration for 256-color images.
    ///
    /// - 8-bit pixel indices, codes start at 9 bits
    /// - 12-bit maximum code width
    /// - Standard code change
    pub const GIF: Self = Self {
        code_size: MAX_CODE_SIZE,
        max_bits: MAX_BITS,
        early_change: false,
        require_end_code: true,
    };

    /// Create a configuration for the given minimum code size.
    ///
    /// Fails with [`OxiGifError::InvalidCodeSize`] outside 2-8.
    pub fn new(code_size: u8) -> Result<Self> {
        if !(MIN_CODE_SIZE..=MAX_CODE_SIZE).contains(&code_size) {
            return Err(OxiGifError::invalid_code_size(code_size));
        }

        Ok(Self {
            code_size,
            ..Self::GIF
        })
    }

    /// Create a configuration able to carry indices of a palette with
    /// `palette_size` entries.
    ///
    /// Fails with [`OxiGifError::PaletteSizeOutOfRange`] for 0 or more than
    /// 256 entries.
    pub fn for_palette(palette_size: usize) -> Result<Self> {
        Self::new(code_size_for_palette(palette_size)?)
    }

    /// Set whether code width grows one entry early.
    pub fn with_early_change(mut self, early_change: bool) -> Self {
        self.early_change = early_change;
        self
    }

    /// Set whether a missing End of Information code is an error.
    pub fn with_require_end_code(mut self, require_end_code: bool) -> Self {
        self.require_end_code = require_end_code;
        self
    }

    /// Apply all switches from `options`.
    pub fn with_options(self, options: CodecOptions) -> Self {
        self.with_early_change(options.early_change)
            .with_require_end_code(options.require_end_code)
    }

    /// Number of single-index entries at the bottom of the table.
    pub fn literal_count(&self) -> usize {
        1 << self.code_size
    }

    /// Get the clear code value (4 for 2-bit code size, 256 for 8-bit).
    pub fn clear_code(&self) -> u16 {
        1 << self.code_size
    }

    /// Get the end-of-information code value (clear_code + 1).
    pub fn eoi_code(&self) -> u16 {
        self.clear_code() + 1
    }

    /// Get the first available code for dictionary entries.
    pub fn first_code(&self) -> u16 {
        self.eoi_code() + 1
    }

    /// Code width at the start of every epoch.
    pub fn initial_bits(&self) -> u8 {
        self.code_size + 1
    }

    /// Get the maximum number of table entries.
    pub fn max_table_size(&self) -> usize {
        1 << self.max_bits
    }
}

/// Minimum code size for a palette of `palette_size` entries.
///
/// This is `ceil(log2(palette_size))`, raised to at least 2 because GIF
/// needs room for the two control codes even for bilevel images.
pub fn code_size_for_palette(palette_size: usize) -> Result<u8> {
    if palette_size == 0 {
        return Err(OxiGifError::palette_size_out_of_range(palette_size));
    }

    let bits = (usize::BITS - (palette_size - 1).leading_zeros()) as u8;
    if bits > MAX_CODE_SIZE {
        return Err(OxiGifError::palette_size_out_of_range(palette_size));
    }

    Ok(bits.max(MIN_CODE_SIZE))
}
