//! LZW encoder.

use crate::config::LzwConfig;
use crate::dictionary::{LzwDictionary, Role};
use crate::stats::CodeStats;
use log::trace;
use oxigif_core::bitstream::BitWriter;
use oxigif_core::error::{OxiGifError, Result};
use std::io::Write;

/// LZW encoder producing a GIF code stream.
///
/// The stream opens with a Clear code and ends with End of Information.
/// When the table fills up, a Clear code is emitted at 12 bits and a new
/// epoch starts.
///
/// End of Information goes out at the width the decoder uses after
/// learning the entry for the final candidate.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    /// Dictionary.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new encoder.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            dict: LzwDictionary::new(config, Role::Encoder),
        }
    }

    /// Encode pixel indices to an unframed code stream.
    pub fn encode(&mut self, indices: &[u8]) -> Result<Vec<u8>> {
        self.encode_with_stats(indices).map(|(codes, _)| codes)
    }

    /// Encode pixel indices and report code stream statistics.
    pub fn encode_with_stats(&mut self, indices: &[u8]) -> Result<(Vec<u8>, CodeStats)> {
        let mut writer = BitWriter::new(Vec::with_capacity(indices.len() / 2 + 8));
        let stats = self.encode_to(indices, &mut writer)?;
        Ok((writer.into_inner()?, stats))
    }

    /// Encode pixel indices into `writer`.
    ///
    /// The final partial byte is left in the writer; call
    /// [`BitWriter::flush`] or [`BitWriter::into_inner`] afterwards.
    pub fn encode_to<W: Write>(
        &mut self,
        indices: &[u8],
        writer: &mut BitWriter<W>,
    ) -> Result<CodeStats> {
        self.dict.reset();

        let config = *self.dict.config();
        let clear_code = config.clear_code();
        let mut stats = CodeStats {
            indices: indices.len(),
            ..CodeStats::default()
        };

        self.emit(writer, clear_code, &mut stats)?;
        stats.clears += 1;

        let Some((&head, rest)) = indices.split_first() else {
            self.emit(writer, config.eoi_code(), &mut stats)?;
            stats.table_size = self.dict.len();
            return Ok(stats);
        };

        check_index(&config, head, 0)?;
        let mut current = head as u16;

        for (offset, &index) in rest.iter().enumerate() {
            check_index(&config, index, offset + 1)?;

            if let Some(code) = self.dict.find(current, index) {
                current = code;
                continue;
            }

            self.emit(writer, current, &mut stats)?;

            if self.dict.add(current, index).is_none() {
                // Table full: the Clear goes out at the current (maximum) width.
                trace!("table full at index {}, emitting clear", offset + 1);
                self.emit(writer, clear_code, &mut stats)?;
                stats.clears += 1;
                self.dict.reset();
            }

            current = index as u16;
        }

        self.emit(writer, current, &mut stats)?;
        self.dict.widen_for_end();
        self.emit(writer, config.eoi_code(), &mut stats)?;
        stats.table_size = self.dict.len();

        Ok(stats)
    }

    fn emit<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        code: u16,
        stats: &mut CodeStats,
    ) -> Result<()> {
        let bits = self.dict.current_bits();
        writer.write_bits(code as u32, bits)?;
        stats.record(bits);
        Ok(())
    }

    /// Get the dictionary as left by the last encode.
    pub fn dictionary(&self) -> &LzwDictionary {
        &self.dict
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        self.dict.config()
    }

    /// Reset the encoder state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

fn check_index(config: &LzwConfig, index: u8, position: usize) -> Result<()> {
    if (index as usize) < config.literal_count() {
        Ok(())
    } else {
        Err(OxiGifError::index_out_of_range(index, position, config.code_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigif_core::bitstream::BitReader;

    fn read_codes(stream: &[u8], widths: &[u8]) -> Vec<u32> {
        let mut reader = BitReader::new(stream);
        widths.iter().map(|&w| reader.read_bits(w).unwrap()).collect()
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = LzwEncoder::new(LzwConfig::new(2).unwrap());
        let (codes, stats) = encoder.encode_with_stats(&[]).unwrap();

        // Clear (4) then EOI (5) at 3 bits: 100 101 -> 0b00101100
        assert_eq!(codes, [0x2C]);
        assert_eq!(stats.codes, 2);
        assert_eq!(stats.clears, 1);
        assert_eq!(stats.indices, 0);
    }

    #[test]
    fn test_encode_single() {
        let mut encoder = LzwEncoder::new(LzwConfig::new(2).unwrap());
        let codes = encoder.encode(&[3]).unwrap();
        assert_eq!(read_codes(&codes, &[3, 3, 3]), [4, 3, 5]);
        assert_eq!(encoder.dictionary().len(), 6);
    }

    #[test]
    fn test_encode_known_sequence() {
        // Indices 0,0,1,3 with a 2-bit code size.
        let mut encoder = LzwEncoder::new(LzwConfig::new(2).unwrap());
        let codes = encoder.encode(&[0, 0, 1, 3]).unwrap();
        assert_eq!(codes, [0x04, 0x32, 0x05]);
        assert_eq!(read_codes(&codes, &[3, 3, 3, 3, 4, 4]), [4, 0, 0, 1, 3, 5]);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut encoder = LzwEncoder::new(LzwConfig::new(2).unwrap());
        let err = encoder.encode(&[0, 1, 4]).unwrap_err();
        assert!(err.is_range_error());
        assert!(matches!(
            err,
            OxiGifError::IndexOutOfRange {
                index: 4,
                position: 2,
                code_size: 2
            }
        ));

        let mut encoder = LzwEncoder::new(LzwConfig::new(3).unwrap());
        assert!(encoder.encode(&[7, 7, 8]).is_err());
        assert!(encoder.encode(&[7, 7, 7]).is_ok());
    }

    #[test]
    fn test_table_full_emits_clear() {
        let mut encoder = LzwEncoder::new(LzwConfig::new(8).unwrap());
        // Pairs of distinct bytes keep adding entries.
        let data: Vec<u8> = (0..20_000u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 13) as u8)
            .collect();
        let (_, stats) = encoder.encode_with_stats(&data).unwrap();

        assert!(stats.clears >= 2, "clears: {}", stats.clears);
        assert_eq!(stats.max_bits_used, 12);
    }

    #[test]
    fn test_encoder_reusable() {
        let mut encoder = LzwEncoder::new(LzwConfig::GIF);
        let first = encoder.encode(b"abcabcabc").unwrap();
        let second = encoder.encode(b"abcabcabc").unwrap();
        assert_eq!(first, second);
    }
}
