//! Piece catalog and the cell-byte layout shared by the board and the move codec.
//!
//! A board cell is one byte: `0` is empty, the low three bits hold a
//! [`PieceKind`] code (`1..=6`) and bit 6 holds the color (`0` = light/white).

pub use crate::game_state::bitboard::BitBoard;
pub use crate::game_state::board_state::{BoardState, UndoToken};

/// Board square index (`0..=63`, `a1 == 0`, `h8 == 63`).
pub type Square = u8;

/// Raw contents of one board cell.
pub type CellValue = u8;

pub const EMPTY_CELL: CellValue = 0;
pub const PIECE_BIT_MASK: CellValue = 0x07;
pub const COLOR_BIT_SHIFT: u8 = 6;
pub const COLOR_MASK: CellValue = 1 << COLOR_BIT_SHIFT;

/// Side owning a piece. `Light` is white and is encoded as a clear color bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    #[inline]
    pub const fn is_light(self) -> bool {
        matches!(self, Color::Light)
    }

    #[inline]
    pub const fn from_is_light(light: bool) -> Self {
        if light {
            Color::Light
        } else {
            Color::Dark
        }
    }
}

/// Piece kind. The discriminant is the three-bit code stored in cells and moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its bit code. `0` (empty) and `7` have no kind.
    #[inline]
    pub const fn from_code(code: u8) -> Option<PieceKind> {
        match code {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Notation letter, always upper case.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Look up a kind by notation letter, in either case.
    #[inline]
    pub fn from_symbol(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub const fn glyph(self, color: Color) -> char {
        match (color, self) {
            (Color::Light, PieceKind::Pawn) => '♙',
            (Color::Light, PieceKind::Knight) => '♘',
            (Color::Light, PieceKind::Bishop) => '♗',
            (Color::Light, PieceKind::Rook) => '♖',
            (Color::Light, PieceKind::Queen) => '♕',
            (Color::Light, PieceKind::King) => '♔',
            (Color::Dark, PieceKind::Pawn) => '♟',
            (Color::Dark, PieceKind::Knight) => '♞',
            (Color::Dark, PieceKind::Bishop) => '♝',
            (Color::Dark, PieceKind::Rook) => '♜',
            (Color::Dark, PieceKind::Queen) => '♛',
            (Color::Dark, PieceKind::King) => '♚',
        }
    }
}

#[inline]
pub const fn cell_value(piece: PieceKind, color: Color) -> CellValue {
    match color {
        Color::Light => piece.code(),
        Color::Dark => piece.code() | COLOR_MASK,
    }
}

#[inline]
pub const fn cell_piece(raw: CellValue) -> Option<PieceKind> {
    PieceKind::from_code(raw & PIECE_BIT_MASK)
}

/// Color bit of a raw cell. An empty cell reads as light.
#[inline]
pub const fn cell_is_light(raw: CellValue) -> bool {
    raw & COLOR_MASK == 0
}
