//! Terminal-oriented Unicode board renderer.

use crate::game_state::chess_types::*;

/// Render the board as eight newline-terminated lines, rank 8 first.
///
/// Occupied squares show the piece glyph in its color, empty squares `·`.
pub fn render_board(board: &BoardState) -> String {
    let mut out = String::with_capacity(8 * 8 * 3 + 8);

    for rank in (0..8).rev() {
        for file in 0..8 {
            let raw = board.raw_at(file, rank);
            match cell_piece(raw) {
                Some(piece) => out.push(piece.glyph(Color::from_is_light(cell_is_light(raw)))),
                None => out.push('·'),
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::chess_types::*;

    #[test]
    fn standard_board_renders_dark_on_top() {
        let rendered = render_board(&BoardState::standard());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "♜♞♝♛♚♝♞♜");
        assert_eq!(lines[1], "♟♟♟♟♟♟♟♟");
        assert_eq!(lines[4], "········");
        assert_eq!(lines[7], "♖♘♗♕♔♗♘♖");
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn empty_board_is_all_dots() {
        let rendered = render_board(&BoardState::new());
        assert_eq!(rendered, "········\n".repeat(8));
    }
}
