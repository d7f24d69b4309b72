/// A fixed-length bit vector holding the armed/unarmed state of every
/// optimized cell. `Clone` is a deep copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    len: usize,
    words: Vec<u64>,
}

impl BitSet {
    /// Creates a bit vector of `len` bits, all cleared.
    pub fn new(len: usize) -> Self {
        BitSet {
            len,
            words: vec![0; len.div_ceil(64)],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads bit `pos`.
    ///
    /// Panics if `pos` is outside the vector; indices are handed out by the
    /// adjacency index, so an out-of-range read is a logic error.
    #[inline]
    pub fn at(&self, pos: usize) -> bool {
        self.check(pos);
        (self.words[pos >> 6] >> (pos & 63)) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, pos: usize, value: bool) {
        self.check(pos);
        let mask = 1u64 << (pos & 63);
        if value {
            self.words[pos >> 6] |= mask;
        } else {
            self.words[pos >> 6] &= !mask;
        }
    }

    #[inline]
    pub fn toggle(&mut self, pos: usize) {
        self.check(pos);
        self.words[pos >> 6] ^= 1u64 << (pos & 63);
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    fn check(&self, pos: usize) {
        if pos >= self.len {
            panic!("bit index {} out of range for bit set of length {}", pos, self.len);
        }
    }
}
