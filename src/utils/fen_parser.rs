//! Piece-placement parser.
//!
//! Reads the first field of a FEN string (`rnbqkbnr/pppppppp/8/...`) into a
//! [`BoardState`]. Any further FEN fields are ignored; side to move, castling
//! rights and clocks are not tracked by the board.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_at;

pub fn parse_placement(fen: &str) -> ChessResult<BoardState> {
    let board_part = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| ChessErrors::InvalidPlacementForm(fen.to_owned()))?;

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidPlacementForm(board_part.to_owned()));
    }

    let mut board = BoardState::new();

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidPlacementToken(ch));
                }
                file += empty_count as usize;
                if file > 8 {
                    return Err(ChessErrors::InvalidPlacementForm(board_part.to_owned()));
                }
                continue;
            }

            let piece =
                PieceKind::from_symbol(ch).ok_or(ChessErrors::InvalidPlacementToken(ch))?;
            if file >= 8 {
                return Err(ChessErrors::InvalidPlacementForm(board_part.to_owned()));
            }

            let color = Color::from_is_light(ch.is_ascii_uppercase());
            board.set(square_at(file as u8, rank), cell_value(piece, color));
            file += 1;
        }

        if file != 8 {
            return Err(ChessErrors::InvalidPlacementForm(board_part.to_owned()));
        }
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::parse_placement;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_PLACEMENT;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_placement_fills_back_ranks() {
        let board = parse_placement(STARTING_PLACEMENT).expect("placement should parse");
        assert_eq!(board.piece_at(4, 0), Some(PieceKind::King));
        assert!(board.is_white_at(4, 0));
        assert_eq!(board.piece_at(3, 7), Some(PieceKind::Queen));
        assert!(!board.is_white_at(3, 7));
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn long_runs_of_empty_counts_are_rejected() {
        for repeats in [2, 32, 33, 300] {
            let placement = format!("{}/8/8/8/8/8/8/8", "8".repeat(repeats));
            assert!(
                matches!(
                    parse_placement(&placement),
                    Err(ChessErrors::InvalidPlacementForm(_))
                ),
                "{repeats} empty-count digits in one rank"
            );
        }
    }

    #[test]
    fn trailing_fen_fields_are_ignored() {
        let board =
            parse_placement("8/8/8/3pP3/8/8/8/8 w - d6 0 1").expect("placement should parse");
        assert_eq!(board.piece_at(3, 4), Some(PieceKind::Pawn));
        assert_eq!(board.piece_at(4, 4), Some(PieceKind::Pawn));
        assert_eq!(board.pieces().count(), 2);
    }

    #[test]
    fn rejects_bad_tokens_and_shapes() {
        assert_eq!(
            parse_placement("8/8/8/8/8/8/8/7X"),
            Err(ChessErrors::InvalidPlacementToken('X'))
        );
        assert_eq!(
            parse_placement("8/8/8/8/8/8/8/9"),
            Err(ChessErrors::InvalidPlacementToken('9'))
        );
        assert!(matches!(
            parse_placement("8/8/8/8/8/8/8"),
            Err(ChessErrors::InvalidPlacementForm(_))
        ));
        assert!(matches!(
            parse_placement("8/8/8/8/8/8/8/ppppppppp"),
            Err(ChessErrors::InvalidPlacementForm(_))
        ));
        assert!(matches!(
            parse_placement("45/8/8/8/8/8/8/8"),
            Err(ChessErrors::InvalidPlacementForm(_))
        ));
        assert!(matches!(
            parse_placement("   "),
            Err(ChessErrors::InvalidPlacementForm(_))
        ));
    }
}
