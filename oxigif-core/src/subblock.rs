//! Sub-block framing.
//!
//! GIF carries variable-length payloads (compressed image data, extension
//! bodies) as a chain of sub-blocks: a length byte (1-255) followed by that
//! many bytes, repeated, and terminated by a zero length byte.
//!
//! ```text
//! ┌─────┬───────────┬─────┬───────────┬─────┐
//! │ 255 │ 255 bytes │  n  │  n bytes  │  0  │
//! └─────┴───────────┴─────┴───────────┴─────┘
//! ```

use crate::error::Result;
use std::io::{Read, Write};

/// Largest payload a single sub-block can carry.
pub const MAX_SUB_BLOCK_LEN: usize = 255;

/// Sub-block chain terminator.
pub const BLOCK_TERMINATOR: u8 = 0x00;

/// Write `data` as a chain of sub-blocks followed by the terminator.
///
/// An empty payload produces only the terminator byte.
pub fn write_sub_blocks<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    for chunk in data.chunks(MAX_SUB_BLOCK_LEN) {
        writer.write_all(&[chunk.len() as u8])?;
        writer.write_all(chunk)?;
    }
    writer.write_all(&[BLOCK_TERMINATOR])?;
    Ok(())
}

/// Read a chain of sub-blocks up to and including the terminator.
///
/// Returns the concatenated payload. A stream that ends before the
/// terminator fails with the underlying I/O error.
pub fn read_sub_blocks<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    read_sub_blocks_into(reader, &mut data)?;
    Ok(data)
}

/// Read a chain of sub-blocks, appending the payload to `data`.
///
/// Returns the number of payload bytes appended.
pub fn read_sub_blocks_into<R: Read>(reader: &mut R, data: &mut Vec<u8>) -> Result<usize> {
    let start = data.len();
    let mut len = [0u8; 1];

    loop {
        reader.read_exact(&mut len)?;
        if len[0] == BLOCK_TERMINATOR {
            break;
        }

        let offset = data.len();
        data.resize(offset + len[0] as usize, 0);
        reader.read_exact(&mut data[offset..])?;
    }

    Ok(data.len() - start)
}

/// Skip over a chain of sub-blocks without keeping the payload.
///
/// Returns the number of payload bytes skipped.
pub fn skip_sub_blocks<R: Read>(reader: &mut R) -> Result<usize> {
    let mut skipped = 0;
    let mut len = [0u8; 1];
    let mut scratch = [0u8; MAX_SUB_BLOCK_LEN];

    loop {
        reader.read_exact(&mut len)?;
        if len[0] == BLOCK_TERMINATOR {
            return Ok(skipped);
        }
        reader.read_exact(&mut scratch[..len[0] as usize])?;
        skipped += len[0] as usize;
    }
}

/// Size in bytes of `payload_len` bytes once framed, terminator included.
pub fn framed_len(payload_len: usize) -> usize {
    payload_len + payload_len.div_ceil(MAX_SUB_BLOCK_LEN) + 1
}
