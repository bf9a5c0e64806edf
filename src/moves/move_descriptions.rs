//! Bit-packed move descriptions.
//!
//! Layout of the packed `u32`:
//!
//! | bits  | field                                  |
//! |-------|----------------------------------------|
//! | 0-2   | moved piece code                       |
//! | 3-5   | promoted piece code (0 = none)         |
//! | 6-11  | source square (file 6-8, rank 9-11)    |
//! | 12-17 | destination square (file 12-14, rank 15-17) |
//! | 18    | capture flag                           |
//! | 19    | en-passant flag                        |
//!
//! Move generation builds moves two ways: from square indices, or from
//! `(file, rank)` coordinates. Since a square index is `rank * 8 + file`, the
//! coordinate fields land on exactly the bits of the square fields, so both
//! constructors produce the same integer for the same logical move and
//! equality holds across them.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::file_delta;
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

const PROMOTED_SHIFT: u32 = 3;
const FROM_SHIFT: u32 = 6;
const FROM_RANK_SHIFT: u32 = 9;
const TO_SHIFT: u32 = 12;
const TO_RANK_SHIFT: u32 = 15;

const PIECE_MASK: u32 = 0x7;
const SQUARE_MASK: u32 = 0x3F;
const COORD_MASK: u32 = 0x7;

/// Low bits fixed per source square: piece, promotion and source.
const PARTIAL_MASK: u32 = (1 << TO_SHIFT) - 1;

pub const FLAG_CAPTURE: u32 = 1 << 18;
pub const FLAG_EN_PASSANT: u32 = 1 << 19;
pub const NO_FLAGS: u32 = 0;

#[inline]
fn promoted_bits(promoted: Option<PieceKind>) -> u32 {
    promoted.map_or(0, |piece| (piece.code() as u32) << PROMOTED_SHIFT)
}

/// A packed move. Equality compares the packed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Build from square indices.
    #[inline]
    pub fn new(
        piece: PieceKind,
        promoted: Option<PieceKind>,
        from: Square,
        to: Square,
        flags: u32,
    ) -> Self {
        PartialMove::new(piece, from).complete_with(promoted, to, flags)
    }

    /// Build from `(file, rank)` coordinates.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn from_coords(
        piece: PieceKind,
        promoted: Option<PieceKind>,
        from_file: u8,
        from_rank: u8,
        to_file: u8,
        to_rank: u8,
        flags: u32,
    ) -> Self {
        PartialMove::from_coords(piece, from_file, from_rank).complete_coords_with(
            promoted, to_file, to_rank, flags,
        )
    }

    /// Wrap an already packed value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn piece_code(self) -> u8 {
        (self.0 & PIECE_MASK) as u8
    }

    #[inline]
    pub const fn piece(self) -> Option<PieceKind> {
        PieceKind::from_code(self.piece_code())
    }

    #[inline]
    pub const fn promoted_code(self) -> u8 {
        ((self.0 >> PROMOTED_SHIFT) & PIECE_MASK) as u8
    }

    #[inline]
    pub const fn promoted(self) -> Option<PieceKind> {
        PieceKind::from_code(self.promoted_code())
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn from_file(self) -> u8 {
        ((self.0 >> FROM_SHIFT) & COORD_MASK) as u8
    }

    #[inline]
    pub const fn from_rank(self) -> u8 {
        ((self.0 >> FROM_RANK_SHIFT) & COORD_MASK) as u8
    }

    #[inline]
    pub const fn to_file(self) -> u8 {
        ((self.0 >> TO_SHIFT) & COORD_MASK) as u8
    }

    #[inline]
    pub const fn to_rank(self) -> u8 {
        ((self.0 >> TO_RANK_SHIFT) & COORD_MASK) as u8
    }

    #[inline]
    pub const fn has_flag(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.has_flag(FLAG_CAPTURE)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.has_flag(FLAG_EN_PASSANT)
    }

    /// Signed file distance travelled by the moved piece.
    #[inline]
    pub const fn file_delta(self) -> i8 {
        file_delta(self.from(), self.to())
    }

    /// A king move spanning more than one file.
    #[inline]
    pub const fn is_castling(self) -> bool {
        self.piece_code() == PieceKind::King.code() && self.file_delta().abs() > 1
    }

    /// The shared piece/promotion/source prefix.
    #[inline]
    pub const fn partial(self) -> PartialMove {
        PartialMove(self.0 & PARTIAL_MASK)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_long_algebraic(*self))
    }
}

impl FromStr for Move {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        long_algebraic_to_move(s)
    }
}

/// A move with piece and source fixed, destination and flags still open.
///
/// Generators build one per source square and complete it once per
/// destination candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialMove(u32);

impl PartialMove {
    #[inline]
    pub fn new(piece: PieceKind, from: Square) -> Self {
        PartialMove(piece.code() as u32 | (from as u32) << FROM_SHIFT)
    }

    #[inline]
    pub fn from_coords(piece: PieceKind, from_file: u8, from_rank: u8) -> Self {
        PartialMove(
            piece.code() as u32
                | (from_file as u32) << FROM_SHIFT
                | (from_rank as u32) << FROM_RANK_SHIFT,
        )
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn complete(self, to: Square, flags: u32) -> Move {
        self.complete_with(None, to, flags)
    }

    #[inline]
    pub fn complete_with(self, promoted: Option<PieceKind>, to: Square, flags: u32) -> Move {
        Move(self.0 | promoted_bits(promoted) | (to as u32) << TO_SHIFT | flags)
    }

    #[inline]
    pub fn complete_coords(self, to_file: u8, to_rank: u8, flags: u32) -> Move {
        self.complete_coords_with(None, to_file, to_rank, flags)
    }

    #[inline]
    pub fn complete_coords_with(
        self,
        promoted: Option<PieceKind>,
        to_file: u8,
        to_rank: u8,
        flags: u32,
    ) -> Move {
        Move(
            self.0
                | promoted_bits(promoted)
                | (to_file as u32) << TO_SHIFT
                | (to_rank as u32) << TO_RANK_SHIFT
                | flags,
        )
    }

    /// Take destination and flags from `other`, keeping this prefix.
    #[inline]
    pub const fn complete_from(self, other: Move) -> Move {
        Move(self.0 | (other.0 & !PARTIAL_MASK))
    }
}
