//! # OxiGif-LZW: Pure Rust GIF LZW Compression
//!
//! This crate provides the variable-width LZW codec used for GIF image data,
//! from raw code streams up to complete image data blocks.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **GIF LZW**: LSB-first bit order, codes from `code_size + 1` to 12 bits
//! - **Byte-exact**: Output matches what mainstream GIF encoders produce
//! - **Tolerant decoding**: Deferred clear, missing leading Clear, trailing
//!   garbage after End of Information
//!
//! ## GIF LZW Specification
//!
//! - **Minimum code size**: 2-8 bits, derived from the palette size
//! - **Control codes**: Clear = `2^code_size`, End of Information = Clear + 1
//! - **Code width**: grows by one bit whenever the table outgrows it, up to 12
//! - **Table full**: the encoder emits Clear at 12 bits and starts over
//!
//! ## Example
//!
//! ```rust
//! use oxigif_lzw::{decode_image_data, encode_image_data};
//!
//! // 10x10 image, 4-color palette
//! let indices: Vec<u8> = (0..100).map(|i| ((i / 10 + i % 10) % 4) as u8).collect();
//!
//! let mut block = Vec::new();
//! encode_image_data(&mut block, &indices, 4).unwrap();
//! assert_eq!(block[0], 2);
//!
//! let decoded = decode_image_data(&mut &block[..]).unwrap();
//! assert_eq!(decoded, indices);
//! ```
//!
//! Raw code streams without framing are handled by [`LzwEncoder`] and
//! [`LzwDecoder`]:
//!
//! ```rust
//! use oxigif_lzw::{compress, decompress, LzwConfig};
//!
//! let config = LzwConfig::for_palette(4).unwrap();
//! let codes = compress(&[0, 0, 1, 3], config).unwrap();
//! assert_eq!(codes, [0x04, 0x32, 0x05]);
//! assert_eq!(decompress(&codes, config).unwrap(), [0, 0, 1, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod stats;

pub use codec::{
    ImageDataInfo, decode_image_data, encode_image_data, min_code_size, read_image_data,
    write_image_data, write_image_data_with_code_size,
};
pub use config::{CodecOptions, LzwConfig};
pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;
pub use oxigif_core::error::{OxiGifError, Result};
pub use stats::CodeStats;

/// Decompress an unframed GIF code stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::{compress, decompress, LzwConfig};
///
/// let config = LzwConfig::GIF;
/// let compressed = compress(b"TOBEORNOTTOBEORTOBEORNOT", config).unwrap();
/// let decompressed = decompress(&compressed, config).unwrap();
/// assert_eq!(decompressed, b"TOBEORNOTTOBEORTOBEORNOT");
/// ```
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(config).decode(data)
}

/// Compress pixel indices to an unframed GIF code stream.
///
/// Every index must be below `2^config.code_size`.
pub fn compress(indices: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwEncoder::new(config).encode(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress() {
        let data = b"This is a test of compression! ".repeat(10);
        let compressed = compress(&data, LzwConfig::GIF).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed, LzwConfig::GIF).unwrap(), data);
    }
}
