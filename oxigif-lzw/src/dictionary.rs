//! LZW dictionary (string table) management.
//!
//! The table is append-only within an epoch. Code `c` always lives at index
//! `c`, and every multi-index entry is stored as a link to its prefix plus
//! one trailing index, so adding an entry is O(1) and never copies a
//! sequence.
//!
//! ```text
//! code:   0   1   2   3   4      5    6        7
//! entry:  0   1   2   3   Clear  EOI  (1)+1    (6)+2   = 1,1,2
//! ```

use crate::config::LzwConfig;
use std::collections::HashMap;

/// One slot of the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// A run of pixel indices: the sequence of `prefix` followed by `last`.
    Sequence {
        /// Code of the sequence minus its last index, `None` for literals.
        prefix: Option<u16>,
        /// Final index of the sequence.
        last: u8,
        /// First index of the sequence.
        first: u8,
        /// Number of indices in the sequence.
        len: u16,
    },
    /// The Clear control code.
    Clear,
    /// The End of Information control code.
    EndOfInformation,
}

impl Entry {
    fn literal(index: u8) -> Self {
        Entry::Sequence {
            prefix: None,
            last: index,
            first: index,
            len: 1,
        }
    }
}

/// Which side of the codec owns a dictionary.
///
/// The decoder learns each entry one code after the encoder created it, so
/// the two sides apply the width threshold to different table sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Builds entries from input indices and looks them up.
    Encoder,
    /// Builds entries from received codes.
    Decoder,
}

/// LZW dictionary for one image data block.
#[derive(Debug, Clone)]
pub struct LzwDictionary {
    /// Code table, indexed by code.
    entries: Vec<Entry>,
    /// (prefix code, next index) to code, populated for the encoder only.
    lookup: HashMap<(u16, u8), u16>,
    /// Configuration.
    config: LzwConfig,
    /// Which threshold to apply when growing.
    role: Role,
    /// Current code width in bits.
    current_bits: u8,
}

impl LzwDictionary {
    /// Create a new dictionary holding the literal and control entries.
    pub fn new(config: LzwConfig, role: Role) -> Self {
        let mut dict = Self {
            entries: Vec::with_capacity(config.max_table_size()),
            lookup: HashMap::new(),
            config,
            role,
            current_bits: config.initial_bits(),
        };
        dict.reset();
        dict
    }

    /// Reset to the start of a new epoch.
    ///
    /// Keeps the literals and control codes, drops every learned entry and
    /// returns the code width to `code_size + 1`.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.lookup.clear();

        let literal_count = self.config.literal_count();
        self.entries.extend((0..literal_count).map(|i| Entry::literal(i as u8)));
        self.entries.push(Entry::Clear);
        self.entries.push(Entry::EndOfInformation);

        self.current_bits = self.config.initial_bits();
    }

    /// Look up the entry for `code`.
    pub fn entry(&self, code: u16) -> Option<&Entry> {
        self.entries.get(code as usize)
    }

    /// Find the code for `prefix` extended by `index`.
    pub fn find(&self, prefix: u16, index: u8) -> Option<u16> {
        self.lookup.get(&(prefix, index)).copied()
    }

    /// Append the sequence of `prefix` followed by `index`.
    ///
    /// Returns the new code, or `None` when the table is full or `prefix` is
    /// not a sequence. The code width is updated after every addition.
    pub fn add(&mut self, prefix: u16, index: u8) -> Option<u16> {
        if self.is_full() {
            return None;
        }

        let (first, len) = match self.entry(prefix)? {
            Entry::Sequence { first, len, .. } => (*first, *len),
            Entry::Clear | Entry::EndOfInformation => return None,
        };

        let code = self.entries.len() as u16;
        self.entries.push(Entry::Sequence {
            prefix: Some(prefix),
            last: index,
            first,
            len: len + 1,
        });

        if self.role == Role::Encoder {
            self.lookup.insert((prefix, index), code);
        }

        self.update_bit_width();
        Some(code)
    }

    /// Widen codes once the table outgrows the current width.
    ///
    /// The width must be able to address the next code the other side may
    /// see. The encoder checks its last assigned code; the decoder, one
    /// entry behind, checks the code the encoder may already have assigned.
    fn update_bit_width(&mut self) {
        let size = self.entries.len();
        match self.role {
            Role::Encoder => self.widen_at(size - 1),
            Role::Decoder => self.widen_at(size),
        }
    }

    /// Widen before the End of Information code.
    ///
    /// The encoder never adds an entry after its final candidate, but the
    /// decoder learns one when it reads that candidate. Both tables then
    /// hold the same number of entries, so the end code must go out at the
    /// width the decoder threshold gives for this size.
    pub fn widen_for_end(&mut self) {
        if self.role == Role::Encoder {
            self.widen_at(self.entries.len());
        }
    }

    fn widen_at(&mut self, mut next: usize) {
        if self.config.early_change {
            next += 1;
        }

        if self.current_bits < self.config.max_bits && next >= (1usize << self.current_bits) {
            self.current_bits += 1;
        }
    }

    /// First index of the sequence behind `code`.
    pub fn first_index(&self, code: u16) -> Option<u8> {
        match self.entry(code)? {
            Entry::Sequence { first, .. } => Some(*first),
            Entry::Clear | Entry::EndOfInformation => None,
        }
    }

    /// Append the sequence behind `code` to `output`.
    ///
    /// Returns the first index of the sequence, or `None` if `code` is not a
    /// sequence (output is then untouched).
    pub fn write_sequence(&self, code: u16, output: &mut Vec<u8>) -> Option<u8> {
        let (first, len) = match self.entry(code)? {
            Entry::Sequence { first, len, .. } => (*first, *len as usize),
            Entry::Clear | Entry::EndOfInformation => return None,
        };

        let start = output.len();
        output.resize(start + len, 0);

        // Walk the prefix chain back to the literal, filling from the end.
        let mut pos = start + len;
        let mut current = Some(code);
        while let Some(c) = current {
            let Entry::Sequence { prefix, last, .. } = self.entries[c as usize] else {
                break;
            };
            pos -= 1;
            output[pos] = last;
            current = prefix;
        }
        debug_assert_eq!(pos, start);

        Some(first)
    }

    /// Get the sequence behind `code` as a new vector.
    pub fn sequence(&self, code: u16) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.write_sequence(code, &mut out)?;
        Some(out)
    }

    /// Number of entries, literals and control codes included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: literals and control codes are never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if no more entries can be added.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.config.max_table_size()
    }

    /// Get the current code width in bits.
    pub fn current_bits(&self) -> u8 {
        self.current_bits
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Get the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Entries learned in the current epoch, in code order.
    pub fn learned(&self) -> &[Entry] {
        &self.entries[self.config.first_code() as usize..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(code_size: u8) -> LzwConfig {
        LzwConfig::new(code_size).unwrap()
    }

    #[test]
    fn test_dictionary_init() {
        let dict = LzwDictionary::new(config(2), Role::Decoder);
        assert_eq!(dict.len(), 6);
        assert!(!dict.is_empty());
        assert_eq!(dict.current_bits(), 3);
        assert_eq!(dict.entry(4), Some(&Entry::Clear));
        assert_eq!(dict.entry(5), Some(&Entry::EndOfInformation));
        assert_eq!(dict.sequence(3), Some(vec![3]));
        assert_eq!(dict.sequence(4), None);
        assert!(dict.entry(6).is_none());
        assert!(dict.learned().is_empty());
    }

    #[test]
    fn test_add_and_reconstruct() {
        let mut dict = LzwDictionary::new(config(2), Role::Encoder);
        assert_eq!(dict.add(1, 1), Some(6));
        assert_eq!(dict.add(6, 2), Some(7));
        assert_eq!(dict.add(7, 0), Some(8));

        assert_eq!(dict.sequence(8), Some(vec![1, 1, 2, 0]));
        assert_eq!(dict.first_index(8), Some(1));
        assert_eq!(dict.find(6, 2), Some(7));
        assert_eq!(dict.find(6, 3), None);

        let mut out = vec![9];
        assert_eq!(dict.write_sequence(7, &mut out), Some(1));
        assert_eq!(out, [9, 1, 1, 2]);
    }

    #[test]
    fn test_cannot_extend_control_codes() {
        let mut dict = LzwDictionary::new(config(2), Role::Encoder);
        assert_eq!(dict.add(4, 0), None);
        assert_eq!(dict.add(5, 0), None);
        assert_eq!(dict.add(100, 0), None);
        assert_eq!(dict.len(), 6);
    }

    #[test]
    fn test_decoder_lookup_unused() {
        let mut dict = LzwDictionary::new(config(2), Role::Decoder);
        dict.add(0, 0);
        assert_eq!(dict.find(0, 0), None);
        assert_eq!(dict.sequence(6), Some(vec![0, 0]));
    }

    #[test]
    fn test_encoder_width_growth() {
        // Base 2: codes 0..5 fixed, width 3 addresses up to 7.
        let mut dict = LzwDictionary::new(config(2), Role::Encoder);
        dict.add(0, 0); // 6
        dict.add(0, 1); // 7
        assert_eq!(dict.current_bits(), 3);
        dict.add(0, 2); // 8 needs 4 bits
        assert_eq!(dict.current_bits(), 4);
    }

    #[test]
    fn test_decoder_width_growth() {
        let mut dict = LzwDictionary::new(config(2), Role::Decoder);
        dict.add(0, 0); // 6
        assert_eq!(dict.current_bits(), 3);
        dict.add(0, 1); // 7, encoder may already hold 8
        assert_eq!(dict.current_bits(), 4);
    }

    #[test]
    fn test_widen_for_end() {
        let mut encoder = LzwDictionary::new(config(2), Role::Encoder);
        encoder.widen_for_end();
        assert_eq!(encoder.current_bits(), 3);

        encoder.add(0, 0); // 6
        encoder.add(0, 1); // 7, the decoder reaches 8 entries on the last code
        assert_eq!(encoder.current_bits(), 3);
        encoder.widen_for_end();
        assert_eq!(encoder.current_bits(), 4);

        let mut decoder = LzwDictionary::new(config(2), Role::Decoder);
        decoder.add(0, 0);
        decoder.widen_for_end();
        assert_eq!(decoder.current_bits(), 3);
    }

    #[test]
    fn test_early_change() {
        let mut dict = LzwDictionary::new(config(2).with_early_change(true), Role::Encoder);
        dict.add(0, 0);
        assert_eq!(dict.current_bits(), 3);
        dict.add(0, 1);
        assert_eq!(dict.current_bits(), 4);
    }

    #[test]
    fn test_full_and_reset() {
        let mut dict = LzwDictionary::new(config(8), Role::Encoder);
        let mut added = 0;
        while dict.add(0, (added % 256) as u8).is_some() {
            added += 1;
        }

        assert!(dict.is_full());
        assert_eq!(dict.len(), 4096);
        assert_eq!(added, 4096 - 258);
        assert_eq!(dict.current_bits(), 12);

        dict.reset();
        assert_eq!(dict.len(), 258);
        assert_eq!(dict.current_bits(), 9);
        assert_eq!(dict.find(0, 0), None);
    }
}
