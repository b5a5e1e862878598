//! Error types for OxiGif operations.
//!
//! A single error type covers the bitstream, the LZW codec and the container
//! layer. Every variant falls into one of three categories (see
//! [`ErrorCategory`]): malformed data, values outside a format limit, or a
//! failure of the underlying stream.

use std::io;
use thiserror::Error;

/// The main error type for OxiGif operations.
#[derive(Debug, Error)]
pub enum OxiGifError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The code stream ended before the requested bits were available.
    #[error("Unexpected end of code stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where the data ran out.
        bit_position: u64,
    },

    /// LZW minimum code size outside the range allowed by GIF.
    #[error("Invalid LZW code size: {code_size} (must be 2-8)")]
    InvalidCodeSize {
        /// The code size byte that was read or requested.
        code_size: u8,
    },

    /// A code referenced an entry the dictionary does not have yet.
    #[error("Invalid LZW code {code} at bit position {bit_position} (table size {table_size})")]
    InvalidCode {
        /// The offending code.
        code: u16,
        /// Dictionary size when the code was read.
        table_size: usize,
        /// Bit position just after the code.
        bit_position: u64,
    },

    /// Palette size cannot be represented by a GIF code size.
    #[error("Palette size {palette_size} out of range (must be 1-256)")]
    PaletteSizeOutOfRange {
        /// Requested palette size.
        palette_size: usize,
    },

    /// A pixel index does not fit the code size in use.
    #[error("Pixel index {index} at position {position} does not fit code size {code_size}")]
    IndexOutOfRange {
        /// The offending index.
        index: u8,
        /// Position of the index in the pixel stream.
        position: usize,
        /// Minimum code size of the block.
        code_size: u8,
    },

    /// Invalid magic number at the start of a file.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Signature is correct but the version is unknown.
    #[error("Unsupported GIF version: {version}")]
    UnsupportedVersion {
        /// The three version characters as found.
        version: String,
    },

    /// Invalid header or descriptor layout.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// A block introducer that is neither image, extension nor trailer.
    #[error("Unknown block introducer {introducer:#04x} at offset {offset}")]
    UnknownBlock {
        /// The introducer byte.
        introducer: u8,
        /// Byte offset of the introducer.
        offset: u64,
    },

    /// Extension payload too short or otherwise unparseable.
    #[error("Invalid extension {label:#04x}: {message}")]
    InvalidExtension {
        /// Extension label.
        label: u8,
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for OxiGif operations.
pub type Result<T> = std::result::Result<T, OxiGifError>;

/// Coarse classification of an [`OxiGifError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or desynchronized data.
    Format,
    /// A value exceeds a limit of the format.
    Range,
    /// The underlying stream failed.
    Io,
}

impl OxiGifError {
    /// Create an invalid code size error.
    pub fn invalid_code_size(code_size: u8) -> Self {
        Self::InvalidCodeSize { code_size }
    }

    /// Create an invalid code error.
    pub fn invalid_code(code: u16, table_size: usize, bit_position: u64) -> Self {
        Self::InvalidCode {
            code,
            table_size,
            bit_position,
        }
    }

    /// Create an unexpected end of code stream error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create a palette size error.
    pub fn palette_size_out_of_range(palette_size: usize) -> Self {
        Self::PaletteSizeOutOfRange { palette_size }
    }

    /// Create an index out of range error.
    pub fn index_out_of_range(index: u8, position: usize, code_size: u8) -> Self {
        Self::IndexOutOfRange {
            index,
            position,
            code_size,
        }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unknown block error.
    pub fn unknown_block(introducer: u8, offset: u64) -> Self {
        Self::UnknownBlock { introducer, offset }
    }

    /// Create an invalid extension error.
    pub fn invalid_extension(label: u8, message: impl Into<String>) -> Self {
        Self::InvalidExtension {
            label,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Io,
            Self::PaletteSizeOutOfRange { .. } | Self::IndexOutOfRange { .. } => {
                ErrorCategory::Range
            }
            Self::UnexpectedEof { .. }
            | Self::InvalidCodeSize { .. }
            | Self::InvalidCode { .. }
            | Self::InvalidMagic { .. }
            | Self::UnsupportedVersion { .. }
            | Self::InvalidHeader { .. }
            | Self::UnknownBlock { .. }
            | Self::InvalidExtension { .. } => ErrorCategory::Format,
        }
    }

    /// Whether this is a format (malformed data) error.
    pub fn is_format_error(&self) -> bool {
        self.category() == ErrorCategory::Format
    }

    /// Whether this is a range (format limit exceeded) error.
    pub fn is_range_error(&self) -> bool {
        self.category() == ErrorCategory::Range
    }
}
