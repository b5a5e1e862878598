//! LZW decoder.

use crate::config::LzwConfig;
use crate::dictionary::{Entry, LzwDictionary, Role};
use crate::stats::CodeStats;
use log::{debug, warn};
use oxigif_core::bitstream::BitReader;
use oxigif_core::error::{OxiGifError, Result};

/// LZW decoder for GIF code streams.
///
/// Accepts streams with or without a leading Clear code and tolerates
/// encoders that keep emitting 12-bit codes after the table is full
/// (deferred clear). Anything after End of Information is ignored.
#[derive(Debug, Clone)]
pub struct LzwDecoder {
    /// Dictionary.
    dict: LzwDictionary,
}

impl LzwDecoder {
    /// Create a new decoder.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            dict: LzwDictionary::new(config, Role::Decoder),
        }
    }

    /// Decode an unframed code stream to pixel indices.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 2);
        self.decode_into(input, &mut output)?;
        Ok(output)
    }

    /// Decode and report code stream statistics.
    pub fn decode_with_stats(&mut self, input: &[u8]) -> Result<(Vec<u8>, CodeStats)> {
        let mut output = Vec::with_capacity(input.len() * 2);
        let stats = self.decode_into(input, &mut output)?;
        Ok((output, stats))
    }

    /// Decode, appending pixel indices to `output`.
    pub fn decode_into(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<CodeStats> {
        self.dict.reset();

        let require_end_code = self.dict.config().require_end_code;
        let start = output.len();
        let mut reader = BitReader::new(input);
        let mut stats = CodeStats::default();
        // None right after a Clear: the next code starts a fresh epoch.
        let mut prev: Option<u16> = None;

        loop {
            let bits = self.dict.current_bits();
            let code = match reader.read_bits(bits) {
                Ok(code) => code as u16,
                Err(OxiGifError::UnexpectedEof { bit_position }) if !require_end_code => {
                    warn!(
                        "code stream ended without end code at bit {}, keeping {} indices",
                        bit_position,
                        output.len() - start
                    );
                    break;
                }
                Err(e) => return Err(e),
            };
            stats.record(bits);

            let table_size = self.dict.len();
            match self.dict.entry(code).copied() {
                Some(Entry::Clear) => {
                    self.dict.reset();
                    stats.clears += 1;
                    prev = None;
                    continue;
                }
                Some(Entry::EndOfInformation) => {
                    let consumed = reader.bits_read().div_ceil(8) as usize;
                    if consumed < input.len() {
                        debug!("ignoring {} bytes after end code", input.len() - consumed);
                    }
                    break;
                }
                Some(Entry::Sequence { .. }) => {
                    let first = self.dict.write_sequence(code, output).ok_or_else(|| {
                        OxiGifError::invalid_code(code, table_size, reader.bits_read())
                    })?;
                    if let Some(prev) = prev {
                        // No-op once the table is full (deferred clear).
                        self.dict.add(prev, first);
                    }
                }
                None if code as usize == table_size => {
                    // The encoder used the entry it just created: prev + first(prev).
                    let new_code = prev
                        .and_then(|p| self.dict.first_index(p).map(|first| (p, first)))
                        .and_then(|(p, first)| self.dict.add(p, first))
                        .ok_or_else(|| {
                            OxiGifError::invalid_code(code, table_size, reader.bits_read())
                        })?;
                    self.dict.write_sequence(new_code, output);
                }
                None => {
                    return Err(OxiGifError::invalid_code(code, table_size, reader.bits_read()));
                }
            }

            prev = Some(code);
        }

        stats.table_size = self.dict.len();
        stats.indices = output.len() - start;
        Ok(stats)
    }

    /// Get the dictionary as left by the last decode.
    pub fn dictionary(&self) -> &LzwDictionary {
        &self.dict
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        self.dict.config()
    }

    /// Reset the decoder state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigif_core::bitstream::BitWriter;

    fn pack(codes: &[(u32, u8)]) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        for &(code, bits) in codes {
            writer.write_bits(code, bits).unwrap();
        }
        writer.into_inner().unwrap()
    }

    fn decoder(code_size: u8) -> LzwDecoder {
        LzwDecoder::new(LzwConfig::new(code_size).unwrap())
    }

    #[test]
    fn test_decode_known_sequence() {
        let decoded = decoder(2).decode(&[0x04, 0x32, 0x05]).unwrap();
        assert_eq!(decoded, [0, 0, 1, 3]);
    }

    #[test]
    fn test_decode_empty_stream() {
        let (decoded, stats) = decoder(2).decode_with_stats(&[0x2C]).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(stats.codes, 2);
        assert_eq!(stats.clears, 1);
    }

    #[test]
    fn test_decode_kwkwk() {
        // 1, then code 6 before it is known: 1,1,1
        let stream = pack(&[(4, 3), (1, 3), (6, 3), (5, 3)]);
        assert_eq!(decoder(2).decode(&stream).unwrap(), [1, 1, 1]);
    }

    #[test]
    fn test_kwkwk_after_clear_is_invalid() {
        let stream = pack(&[(4, 3), (6, 3), (5, 3)]);
        let err = decoder(2).decode(&stream).unwrap_err();
        assert!(matches!(err, OxiGifError::InvalidCode { code: 6, .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_code_beyond_table() {
        let stream = pack(&[(4, 3), (1, 3), (7, 3), (5, 3)]);
        let err = decoder(2).decode(&stream).unwrap_err();
        assert!(matches!(
            err,
            OxiGifError::InvalidCode {
                code: 7,
                table_size: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_no_leading_clear() {
        let stream = pack(&[(2, 3), (2, 3), (5, 3)]);
        assert_eq!(decoder(2).decode(&stream).unwrap(), [2, 2]);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut stream = vec![0x04, 0x32, 0x05];
        stream.extend_from_slice(&[0xFF, 0xFF, 0x12]);
        assert_eq!(decoder(2).decode(&stream).unwrap(), [0, 0, 1, 3]);
    }

    #[test]
    fn test_missing_end_code() {
        // 8-bit codes leave no padding that could be read as another code.
        let stream = pack(&[(128, 8), (1, 8), (1, 8)]);
        let err = decoder(7).decode(&stream).unwrap_err();
        assert!(matches!(err, OxiGifError::UnexpectedEof { bit_position: 24 }));

        let lenient = LzwConfig::new(7).unwrap().with_require_end_code(false);
        let decoded = LzwDecoder::new(lenient).decode(&stream).unwrap();
        assert_eq!(decoded, [1, 1]);
    }

    #[test]
    fn test_mid_stream_clear() {
        let stream = pack(&[(4, 3), (0, 3), (0, 3), (4, 3), (3, 3), (6, 3), (5, 3)]);
        // Code 6 is rebuilt in the new epoch as 3,3.
        let decoded = decoder(2).decode(&stream).unwrap();
        assert_eq!(decoded, [0, 0, 3, 3, 3]);
    }

    #[test]
    fn test_decode_into_appends() {
        let mut out = vec![9, 9];
        let stats = decoder(2).decode_into(&[0x04, 0x32, 0x05], &mut out).unwrap();
        assert_eq!(out, [9, 9, 0, 0, 1, 3]);
        assert_eq!(stats.indices, 4);
    }
}
