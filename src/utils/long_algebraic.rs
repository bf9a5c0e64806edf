//! Long notation for packed moves.
//!
//! Accepted input: an optional piece letter (absent means pawn), the source
//! square, an optional `x`, the destination square, then optionally a
//! promotion letter or the en-passant suffix `ep` / `e.p.`. There is no
//! disambiguation, check or mate syntax.
//!
//! Rendering writes `<piece><from>[x]<to>[promotion][e.p.]`, omitting the
//! piece letter for pawns. Castling renders as a plain king move (`Ke1g1`).

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::PieceKind;
use crate::moves::move_descriptions::{Move, FLAG_CAPTURE, FLAG_EN_PASSANT, NO_FLAGS};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

const EN_PASSANT_SUFFIXES: [&str; 2] = ["ep", "e.p."];

pub fn move_to_long_algebraic(mv: Move) -> String {
    let mut out = String::with_capacity(10);

    if let Some(piece) = mv.piece() {
        if piece != PieceKind::Pawn {
            out.push(piece.symbol());
        }
    }
    out.push_str(&square_to_algebraic(mv.from()));
    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(mv.to()));
    if let Some(promoted) = mv.promoted() {
        out.push(promoted.symbol());
    }
    if mv.is_en_passant() {
        out.push_str("e.p.");
    }

    out
}

pub fn long_algebraic_to_move(notation: &str) -> ChessResult<Move> {
    parse(notation).inspect_err(|err| debug!(notation, %err, "rejected move notation"))
}

fn parse(notation: &str) -> ChessResult<Move> {
    if !notation.is_ascii() {
        return Err(ChessErrors::notation(notation, "non-ASCII character"));
    }
    let bytes = notation.as_bytes();
    if bytes.len() < 4 {
        return Err(ChessErrors::notation(notation, "too short"));
    }

    let (piece, mut cursor) = if bytes[1].is_ascii_digit() {
        (PieceKind::Pawn, 0)
    } else {
        let letter = bytes[0] as char;
        let piece = PieceKind::from_symbol(letter).ok_or_else(|| {
            ChessErrors::notation(notation, format!("unknown piece letter {letter:?}"))
        })?;
        (piece, 1)
    };

    let from = square_token(notation, cursor)?;
    cursor += 2;

    let mut flags = NO_FLAGS;
    if bytes.get(cursor) == Some(&b'x') {
        flags |= FLAG_CAPTURE;
        cursor += 1;
    }

    let to = square_token(notation, cursor)?;
    cursor += 2;

    let suffix = &notation[cursor..];
    let mut promoted = None;
    if EN_PASSANT_SUFFIXES.contains(&suffix) {
        flags |= FLAG_EN_PASSANT;
    } else if !suffix.is_empty() {
        promoted = Some(promotion_suffix(notation, suffix)?);
    }

    Ok(Move::new(piece, promoted, from, to, flags))
}

fn square_token(notation: &str, start: usize) -> ChessResult<u8> {
    let token = notation
        .get(start..start + 2)
        .ok_or_else(|| ChessErrors::notation(notation, "missing square"))?;
    algebraic_to_square(token).map_err(|err| ChessErrors::notation(notation, err.to_string()))
}

fn promotion_suffix(notation: &str, suffix: &str) -> ChessResult<PieceKind> {
    let mut chars = suffix.chars();
    let piece = match (chars.next(), chars.next()) {
        (Some(letter), None) => PieceKind::from_symbol(letter),
        _ => None,
    };
    match piece {
        Some(
            piece @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen),
        ) => Ok(piece),
        _ => Err(ChessErrors::notation(
            notation,
            format!("unexpected suffix {suffix:?}"),
        )),
    }
}
