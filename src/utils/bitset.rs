//! Fixed-capacity bit set used to track which words of a table have been written.
//!
//! Storage is one `u64` per 64 indices. Table builders keep one bit per 16-bit word, so a
//! four-slot record owns four bits. The set never grows after construction.

/// A fixed-capacity set of small indices.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Creates an empty set able to hold indices `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
            len: capacity,
        }
    }

    /// Sets the bit at `index`, returning `true` if it was previously clear.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the capacity.
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < self.len, "index out of bounds");
        let mask = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        let was_clear = *word & mask == 0;
        *word |= mask;
        was_clear
    }

    /// Returns `true` if the bit at `index` is set; out-of-range indices are never set.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Number of bits set
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// `true` if every index below the capacity is set
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count() == self.len
    }

    /// Lowest index whose bit is clear, if any.
    #[must_use]
    pub fn first_unset(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, &word)| word != u64::MAX)
            .map(|(i, &word)| i * 64 + (!word).trailing_zeros() as usize)
            .filter(|&index| index < self.len)
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitSet({}/{})", self.count(), self.len)
    }
}
