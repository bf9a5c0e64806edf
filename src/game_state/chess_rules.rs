//! Canonical chess-rule constants.
//!
//! Castling geometry and the standard starting placement. Castling color is
//! derived from the rank the king stands on: rank 0 belongs to light, any
//! other rank to dark.

/// Standard starting position, piece-placement field of FEN.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

pub const KING_HOME_FILE: u8 = 4;
pub const LIGHT_HOME_RANK: u8 = 0;

/// File delta of a queen-side castling king move.
pub const QUEEN_SIDE_DELTA: i8 = -2;

/// Files touched by one castling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingFiles {
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
}

pub const KING_SIDE: CastlingFiles = CastlingFiles {
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
};

pub const QUEEN_SIDE: CastlingFiles = CastlingFiles {
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
};

#[inline]
pub const fn castling_files(file_delta: i8) -> CastlingFiles {
    if file_delta == QUEEN_SIDE_DELTA {
        QUEEN_SIDE
    } else {
        KING_SIDE
    }
}
