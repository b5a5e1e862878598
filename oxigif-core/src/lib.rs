//! # OxiGif Core
//!
//! Core components for the OxiGif image data codec.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and container layers:
//!
//! - [`bitstream`]: LSB-first bit-level I/O for variable-width LZW codes
//! - [`subblock`]: length-prefixed sub-block framing of payloads
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiGif is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     info, extract, compress, test, recompress           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     header, screen, color tables, extensions, frames    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     GIF LZW dictionary, encoder, decoder                │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, sub-block framing              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxigif_core::bitstream::{BitReader, BitWriter};
//! use oxigif_core::subblock::{read_sub_blocks, write_sub_blocks};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0x104, 9).unwrap();
//! let codes = writer.into_inner().unwrap();
//!
//! let mut framed = Vec::new();
//! write_sub_blocks(&mut framed, &codes).unwrap();
//! assert_eq!(framed, [2, 0x04, 0x01, 0]);
//!
//! let payload = read_sub_blocks(&mut &framed[..]).unwrap();
//! let mut reader = BitReader::new(&payload[..]);
//! assert_eq!(reader.read_bits(9).unwrap(), 0x104);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod subblock;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{ErrorCategory, OxiGifError, Result};
pub use subblock::{read_sub_blocks, skip_sub_blocks, write_sub_blocks};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{ErrorCategory, OxiGifError, Result};
    pub use crate::subblock::{read_sub_blocks, write_sub_blocks};
}
