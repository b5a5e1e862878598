//! Code stream statistics.

/// Counters collected while encoding or decoding one code stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeStats {
    /// Codes written or read, control codes included.
    pub codes: usize,
    /// Clear codes written or read, including the leading one.
    pub clears: usize,
    /// Widest code seen.
    pub max_bits_used: u8,
    /// Dictionary size when the stream ended.
    pub table_size: usize,
    /// Pixel indices produced or consumed.
    pub indices: usize,
}

impl CodeStats {
    pub(crate) fn record(&mut self, bits: u8) {
        self.codes += 1;
        self.max_bits_used = self.max_bits_used.max(bits);
    }

    /// Average number of bits spent per pixel index.
    pub fn bits_per_index(&self, payload_len: usize) -> f64 {
        if self.indices == 0 {
            0.0
        } else {
            (payload_len * 8) as f64 / self.indices as f64
        }
    }
}
