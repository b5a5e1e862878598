//! Image data blocks.
//!
//! An image data block is the minimum code size byte followed by the LZW
//! code stream split into sub-blocks:
//!
//! ```text
//! ┌───────────┬──────────────────────────────┐
//! │ code size │ sub-blocks (code stream) … 0 │
//! └───────────┴──────────────────────────────┘
//! ```

use crate::config::{CodecOptions, LzwConfig, code_size_for_palette};
use crate::decoder::LzwDecoder;
use crate::encoder::LzwEncoder;
use crate::stats::CodeStats;
use log::debug;
use oxigif_core::error::Result;
use oxigif_core::subblock::{read_sub_blocks, write_sub_blocks};
use std::io::{Read, Write};

/// Summary of one image data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDataInfo {
    /// Minimum code size byte of the block.
    pub code_size: u8,
    /// Length of the unframed code stream in bytes.
    pub payload_len: usize,
    /// Code stream statistics.
    pub stats: CodeStats,
}

impl ImageDataInfo {
    /// Ratio of pixel indices to code stream bytes.
    pub fn compression_ratio(&self) -> f64 {
        if self.payload_len == 0 {
            0.0
        } else {
            self.stats.indices as f64 / self.payload_len as f64
        }
    }
}

/// Minimum code size for a palette of `palette_size` colors.
///
/// Fails with a range error for an empty palette or more than 256 colors.
pub fn min_code_size(palette_size: usize) -> Result<u8> {
    code_size_for_palette(palette_size)
}

/// Read one image data block and decode it to pixel indices.
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::decode_image_data;
///
/// let block = [0x02, 0x03, 0x04, 0x32, 0x05, 0x00];
/// let indices = decode_image_data(&mut &block[..]).unwrap();
/// assert_eq!(indices, [0, 0, 1, 3]);
/// ```
pub fn decode_image_data<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    read_image_data(reader, CodecOptions::default()).map(|(indices, _)| indices)
}

/// Read one image data block with explicit options.
///
/// The whole sub-block chain is consumed, terminator included, even when the
/// code stream ends early, so the reader is left at the next block.
pub fn read_image_data<R: Read>(
    reader: &mut R,
    options: CodecOptions,
) -> Result<(Vec<u8>, ImageDataInfo)> {
    let mut code_size = [0u8; 1];
    reader.read_exact(&mut code_size)?;
    let config = LzwConfig::new(code_size[0])?.with_options(options);

    let payload = read_sub_blocks(reader)?;
    let (indices, stats) = LzwDecoder::new(config).decode_with_stats(&payload)?;

    debug!(
        "decoded image data: code size {}, {} bytes -> {} indices, {} codes, {} clears",
        config.code_size,
        payload.len(),
        indices.len(),
        stats.codes,
        stats.clears
    );

    let info = ImageDataInfo {
        code_size: config.code_size,
        payload_len: payload.len(),
        stats,
    };
    Ok((indices, info))
}

/// Encode pixel indices as one image data block.
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::encode_image_data;
///
/// let mut block = Vec::new();
/// encode_image_data(&mut block, &[0, 0, 1, 3], 4).unwrap();
/// assert_eq!(block, [0x02, 0x03, 0x04, 0x32, 0x05, 0x00]);
/// ```
pub fn encode_image_data<W: Write>(
    writer: &mut W,
    indices: &[u8],
    palette_size: usize,
) -> Result<()> {
    write_image_data(writer, indices, palette_size, CodecOptions::default()).map(|_| ())
}

/// Encode pixel indices with explicit options.
pub fn write_image_data<W: Write>(
    writer: &mut W,
    indices: &[u8],
    palette_size: usize,
    options: CodecOptions,
) -> Result<ImageDataInfo> {
    let code_size = min_code_size(palette_size)?;
    write_image_data_with_code_size(writer, indices, code_size, options)
}

/// Encode pixel indices using a given minimum code size.
///
/// Useful to keep the code size of an existing image, which may be larger
/// than its palette needs.
pub fn write_image_data_with_code_size<W: Write>(
    writer: &mut W,
    indices: &[u8],
    code_size: u8,
    options: CodecOptions,
) -> Result<ImageDataInfo> {
    let config = LzwConfig::new(code_size)?.with_options(options);
    let (payload, stats) = LzwEncoder::new(config).encode_with_stats(indices)?;

    writer.write_all(&[config.code_size])?;
    write_sub_blocks(writer, &payload)?;

    debug!(
        "encoded image data: code size {}, {} indices -> {} bytes, {} clears",
        config.code_size,
        indices.len(),
        payload.len(),
        stats.clears
    );

    Ok(ImageDataInfo {
        code_size: config.code_size,
        payload_len: payload.len(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigif_core::error::OxiGifError;

    #[test]
    fn test_empty_block() {
        let mut block = Vec::new();
        encode_image_data(&mut block, &[], 2).unwrap();
        assert_eq!(block, [0x02, 0x01, 0x2C, 0x00]);

        let mut block4 = Vec::new();
        encode_image_data(&mut block4, &[], 4).unwrap();
        assert_eq!(block4, block);

        assert!(decode_image_data(&mut &block[..]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_code_size_byte() {
        for bad in [0u8, 1, 9, 12, 255] {
            let block = [bad, 0x01, 0x2C, 0x00];
            let err = decode_image_data(&mut &block[..]).unwrap_err();
            assert!(matches!(err, OxiGifError::InvalidCodeSize { code_size } if code_size == bad));
        }
    }

    #[test]
    fn test_palette_too_large() {
        let mut out = Vec::new();
        let err = encode_image_data(&mut out, &[0], 300).unwrap_err();
        assert!(err.is_range_error());
        assert!(out.is_empty(), "nothing written on a rejected palette");
    }

    #[test]
    fn test_reader_left_at_next_block() {
        let block = [0x02, 0x03, 0x04, 0x32, 0x05, 0x00, 0x3B];
        let mut reader = &block[..];
        let (indices, info) = read_image_data(&mut reader, CodecOptions::default()).unwrap();
        assert_eq!(indices, [0, 0, 1, 3]);
        assert_eq!(info.code_size, 2);
        assert_eq!(info.payload_len, 3);
        assert_eq!(reader, [0x3B]);
    }

    #[test]
    fn test_keep_larger_code_size() {
        let mut block = Vec::new();
        let options = CodecOptions::default();
        let info = write_image_data_with_code_size(&mut block, &[1, 2, 3], 8, options).unwrap();
        assert_eq!(block[0], 8);
        assert_eq!(info.stats.max_bits_used, 9);
        assert_eq!(decode_image_data(&mut &block[..]).unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_truncated_chain_is_io() {
        let block = [0x02, 0x05, 0x04, 0x32];
        let err = decode_image_data(&mut &block[..]).unwrap_err();
        assert!(matches!(err, OxiGifError::Io(_)));
    }
}
