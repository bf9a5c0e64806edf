//! Square coordinate conversions.
//!
//! Converts between square indices, `(file, rank)` pairs and two-character
//! algebraic coordinates (for example `e4`). Index-based helpers trust their
//! input; only the text parser validates.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Square;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    (rank << 3) | file
}

/// True when both coordinates lie on the board.
#[inline]
pub fn is_on_board(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

/// Signed file distance from `from` to `to`.
#[inline]
pub const fn file_delta(from: Square, to: Square) -> i8 {
    file_of(to) as i8 - file_of(from) as i8
}

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessErrors::InvalidAlgebraicChar(file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicChar(rank as char));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Convert a `(file, rank)` pair to algebraic notation.
pub fn coords_to_algebraic(file: u8, rank: u8) -> String {
    let mut out = String::with_capacity(2);
    out.push(char::from(b'a' + file));
    out.push(char::from(b'1' + rank));
    out
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    coords_to_algebraic(file_of(square), rank_of(square))
}
