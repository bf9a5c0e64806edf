//! 64-bit square sets.

use std::fmt;

use crate::game_state::chess_types::Square;
use crate::utils::algebraic::square_at;

/// One bit per square, bit `i` for square `i`.
///
/// Indices are not checked; callers keep them in `0..=63`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitBoard(u64);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);
    pub const ALL: BitBoard = BitBoard(u64::MAX);

    #[inline]
    pub const fn new(bits: u64) -> Self {
        BitBoard(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn set_bits(&mut self, bits: u64) {
        self.0 = bits;
    }

    #[inline]
    pub fn set(&mut self, square: Square) {
        self.0 |= 1u64 << square;
    }

    #[inline]
    pub fn clear(&mut self, square: Square) {
        self.0 &= !(1u64 << square);
    }

    #[inline]
    pub fn clear_all(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub const fn test(self, file: u8, rank: u8) -> bool {
        (self.0 >> square_at(file, rank)) & 1 == 1
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Rank 8 on top, `#` for a set bit and `.` for a clear one.
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                f.write_str(if self.test(file, rank) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
