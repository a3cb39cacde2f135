use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Files 1..=6. Clears the left and right edge files so horizontal and
/// diagonal shifts cannot wrap onto the neighbouring rank.
pub const HORIZONTAL_MASK: Bitboard = Bitboard(0x7e7e_7e7e_7e7e_7e7e);

/// Ranks 1..=6.
pub const VERTICAL_MASK: Bitboard = Bitboard(0x00ff_ffff_ffff_ff00);

/// The four corner squares.
pub const CORNER_MASK: Bitboard = Bitboard(0x8100_0000_0000_0081);

/// The outer ring without its corners (24 squares).
pub const EDGE_MASK: Bitboard = Bitboard(!(VERTICAL_MASK.0 & HORIZONTAL_MASK.0) & !CORNER_MASK.0);

/// One bit per square of the 8×8 board, bit `i = col + 8 * row`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// All bits zero.
    #[inline]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// Single bit set at `index`.
    #[inline]
    pub const fn single(index: usize) -> Self {
        debug_assert!(index < 64);
        Bitboard(1u64 << index)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Test whether bit `index` is set.
    #[inline]
    pub const fn get(self, index: usize) -> bool {
        debug_assert!(index < 64);
        (self.0 >> index) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < 64);
        self.0 |= 1u64 << index;
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < 64);
        self.0 &= !(1u64 << index);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonzero(self) -> bool {
        self.0 != 0
    }

    /// True if exactly one bit is set.
    #[inline]
    pub const fn is_single(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /// Population count.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the highest set bit, or `None` if empty.
    #[inline]
    pub const fn highest_bit_index(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros() as usize)
        }
    }

    /// Signed shift: positive `d` moves bits toward higher indices, negative
    /// toward lower ones. Bits pushed past either end are lost.
    #[inline]
    pub const fn shift(self, d: i32) -> Self {
        if d >= 0 {
            Bitboard(self.0 << d)
        } else {
            Bitboard(self.0 >> -d)
        }
    }

    /// Iterate over set bits as single-bit boards, highest index first.
    #[inline]
    pub fn iter_squares(self) -> SquareIterator {
        SquareIterator { remaining: self.0 }
    }

    /// Iterate over indices of set bits, highest index first.
    #[inline]
    pub fn iter_ones(self) -> impl Iterator<Item = usize> {
        self.iter_squares().map(|sq| 63 - sq.0.leading_zeros() as usize)
    }
}

impl From<u64> for Bitboard {
    fn from(bits: u64) -> Self {
        Bitboard(bits)
    }
}

impl From<Bitboard> for u64 {
    fn from(bb: Bitboard) -> Self {
        bb.0
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Yields each set bit of a `Bitboard` as its own single-bit board,
/// highest index first.
pub struct SquareIterator {
    remaining: u64,
}

impl Iterator for SquareIterator {
    type Item = Bitboard;
    #[inline]
    fn next(&mut self) -> Option<Bitboard> {
        if self.remaining == 0 {
            return None;
        }
        let bit = 1u64 << (63 - self.remaining.leading_zeros());
        self.remaining ^= bit;
        Some(Bitboard(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let bb = Bitboard::empty();
        assert!(bb.is_empty());
        assert_eq!(bb.count(), 0);
        assert!(bb.highest_bit_index().is_none());
    }

    #[test]
    fn test_single() {
        let bb = Bitboard::single(0);
        assert!(bb.get(0));
        assert!(!bb.get(1));
        assert!(bb.is_single());
        assert_eq!(bb.highest_bit_index(), Some(0));

        let bb2 = Bitboard::single(63);
        assert!(bb2.get(63));
        assert_eq!(bb2.highest_bit_index(), Some(63));
        assert!(!(bb | Bitboard::single(5)).is_single());
        assert!(!Bitboard::empty().is_single());
    }

    #[test]
    fn test_set_clear() {
        let mut bb = Bitboard::empty();
        bb.set(42);
        assert!(bb.get(42));
        bb.clear(42);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_signed_shift() {
        let bb = Bitboard::single(27);
        assert_eq!(bb.shift(1), Bitboard::single(28));
        assert_eq!(bb.shift(-1), Bitboard::single(26));
        assert_eq!(bb.shift(8), Bitboard::single(35));
        assert_eq!(bb.shift(-9), Bitboard::single(18));

        // Falls off the ends instead of wrapping around the word
        assert!(Bitboard::single(63).shift(1).is_empty());
        assert!(Bitboard::single(0).shift(-1).is_empty());
    }

    #[test]
    fn test_iter_highest_first() {
        let bb = Bitboard::single(3) | Bitboard::single(40) | Bitboard::single(63);
        let indices: Vec<usize> = bb.iter_ones().collect();
        assert_eq!(indices, vec![63, 40, 3]);

        let squares: Vec<Bitboard> = bb.iter_squares().collect();
        assert_eq!(squares[0], Bitboard::single(63));
        assert_eq!(bb.iter_squares().len(), 3);
    }

    #[test]
    fn test_masks() {
        assert_eq!(HORIZONTAL_MASK.count(), 48);
        assert_eq!(VERTICAL_MASK.count(), 48);
        assert_eq!(CORNER_MASK.count(), 4);
        assert_eq!(EDGE_MASK.count(), 24);
        assert!((EDGE_MASK & CORNER_MASK).is_empty());

        for index in [0, 7, 56, 63] {
            assert!(CORNER_MASK.get(index));
        }
        // a1 neighbours on the ring are edges, the diagonal x-square is not
        assert!(EDGE_MASK.get(1));
        assert!(EDGE_MASK.get(8));
        assert!(!EDGE_MASK.get(9));
        assert!(EDGE_MASK.get(39));
        assert!(EDGE_MASK.get(60));
    }

    #[test]
    fn test_bitwise_ops() {
        let a = Bitboard::single(5) | Bitboard::single(10);
        let b = Bitboard::single(10) | Bitboard::single(20);
        assert_eq!(a & b, Bitboard::single(10));
        assert_eq!((a ^ b).count(), 2);
        assert!(!(!a).get(5));
        assert!((!a).get(6));

        let mut c = a;
        c ^= Bitboard::single(5);
        assert_eq!(c, Bitboard::single(10));
        c |= Bitboard::single(1);
        c &= Bitboard::single(1);
        assert_eq!(c, Bitboard::single(1));
    }
}
