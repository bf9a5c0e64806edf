//! Mutable 64-cell board with in-place move application.
//!
//! `BoardState` is what a search walks: `apply` a move, recurse, then
//! `revert` the same move with the token `apply` handed back. The only state
//! saved per move is the byte that used to sit on the destination square.
//! Castling saves nothing because it is fully described by the king's
//! squares and can never capture.
//!
//! Nothing here validates legality. Applying a move that does not fit the
//! board, or reverting out of order, silently corrupts the grid.

use std::fmt;

use tracing::trace;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{castling_files, KING_HOME_FILE, LIGHT_HOME_RANK};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{file_of, is_on_board, rank_of, square_at};
use crate::utils::fen_parser::parse_placement;
use crate::utils::render_game_state::render_board;

/// What `apply` needs handed back to `revert` the same move.
///
/// Holds the destination cell as it was before the move, `0` when it was
/// empty or the move was a castling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UndoToken(CellValue);

impl UndoToken {
    pub const NONE: UndoToken = UndoToken(EMPTY_CELL);

    #[inline]
    pub const fn from_raw(raw: CellValue) -> Self {
        UndoToken(raw)
    }

    /// Raw byte of the overwritten destination cell.
    #[inline]
    pub const fn raw(self) -> CellValue {
        self.0
    }

    #[inline]
    pub const fn captured(self) -> Option<PieceKind> {
        cell_piece(self.0)
    }
}

/// An occupied cell seen during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub piece: PieceKind,
    pub color: Color,
    pub file: u8,
    pub rank: u8,
}

/// The board grid, `a1 == 0` through `h8 == 63`.
///
/// Square-indexed accessors do not check their index beyond the array bound.
/// Coordinate queries taking signed `(file, rank)` return `false` off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [CellValue; 64],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Empty board.
    #[inline]
    pub const fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; 64],
        }
    }

    /// Standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::new();
        for (file, piece) in [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ]
        .into_iter()
        .enumerate()
        {
            let file = file as u8;
            board.set_piece(piece, file, 0, Color::Light);
            board.set_piece(PieceKind::Pawn, file, 1, Color::Light);
            board.set_piece(PieceKind::Pawn, file, 6, Color::Dark);
            board.set_piece(piece, file, 7, Color::Dark);
        }
        board
    }

    /// Build from the piece-placement field of a FEN string.
    pub fn from_placement(fen: &str) -> ChessResult<Self> {
        parse_placement(fen)
    }

    /// Overwrite this grid with `other`'s.
    #[inline]
    pub fn copy_from(&mut self, other: &BoardState) {
        self.cells = other.cells;
    }

    #[inline]
    pub fn clear_all(&mut self) {
        self.cells = [EMPTY_CELL; 64];
    }

    // --- Raw cell access ---

    #[inline]
    pub fn get(&self, square: Square) -> CellValue {
        self.cells[square as usize]
    }

    /// Write a raw cell, returning what was there.
    #[inline]
    pub fn set(&mut self, square: Square, raw: CellValue) -> CellValue {
        std::mem::replace(&mut self.cells[square as usize], raw)
    }

    #[inline]
    pub fn raw_at(&self, file: u8, rank: u8) -> CellValue {
        self.get(square_at(file, rank))
    }

    #[inline]
    pub fn set_at(&mut self, file: u8, rank: u8, raw: CellValue) -> CellValue {
        self.set(square_at(file, rank), raw)
    }

    /// Place `piece` of `color`, returning the previous raw cell.
    #[inline]
    pub fn set_piece(&mut self, piece: PieceKind, file: u8, rank: u8, color: Color) -> CellValue {
        self.set_at(file, rank, cell_value(piece, color))
    }

    #[inline]
    pub fn clear_square(&mut self, square: Square) {
        self.cells[square as usize] = EMPTY_CELL;
    }

    #[inline]
    pub fn clear_at(&mut self, file: u8, rank: u8) {
        self.clear_square(square_at(file, rank));
    }

    #[inline]
    fn set_color(&mut self, square: Square, color: Color) {
        let cell = &mut self.cells[square as usize];
        match color {
            Color::Light => *cell &= !COLOR_MASK,
            Color::Dark => *cell |= COLOR_MASK,
        }
    }

    // --- Piece queries ---

    #[inline]
    pub fn piece(&self, square: Square) -> Option<PieceKind> {
        cell_piece(self.get(square))
    }

    #[inline]
    pub fn piece_at(&self, file: u8, rank: u8) -> Option<PieceKind> {
        cell_piece(self.raw_at(file, rank))
    }

    #[inline]
    pub fn piece_bits(&self, square: Square) -> u8 {
        self.get(square) & PIECE_BIT_MASK
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square) == EMPTY_CELL
    }

    #[inline]
    pub fn is_empty_at(&self, file: u8, rank: u8) -> bool {
        self.raw_at(file, rank) == EMPTY_CELL
    }

    /// Color bit of the square. Empty squares read as white.
    #[inline]
    pub fn is_white(&self, square: Square) -> bool {
        Self::raw_is_white(self.get(square))
    }

    #[inline]
    pub fn is_white_at(&self, file: u8, rank: u8) -> bool {
        Self::raw_is_white(self.raw_at(file, rank))
    }

    #[inline]
    pub const fn raw_is_white(raw: CellValue) -> bool {
        cell_is_light(raw)
    }

    /// Color of the occupant, `None` when empty.
    #[inline]
    pub fn color(&self, square: Square) -> Option<Color> {
        let raw = self.get(square);
        (raw != EMPTY_CELL).then(|| Color::from_is_light(cell_is_light(raw)))
    }

    #[inline]
    pub fn is_piece_in_color(&self, square: Square, color: Color) -> bool {
        self.color(square) == Some(color)
    }

    #[inline]
    pub fn is_piece_in_color_at(&self, file: u8, rank: u8, color: Color) -> bool {
        self.is_piece_in_color(square_at(file, rank), color)
    }

    // --- Range-checked targets for move generation ---

    /// On the board and empty.
    #[inline]
    pub fn can_move(&self, file: i8, rank: i8) -> bool {
        is_on_board(file, rank) && self.is_empty_at(file as u8, rank as u8)
    }

    /// On the board and held by the opponent of `color`.
    #[inline]
    pub fn can_take(&self, color: Color, file: i8, rank: i8) -> bool {
        is_on_board(file, rank)
            && self.is_piece_in_color_at(file as u8, rank as u8, color.opposite())
    }

    #[inline]
    pub fn can_move_or_take(&self, color: Color, file: i8, rank: i8) -> bool {
        if !is_on_board(file, rank) {
            return false;
        }
        let raw = self.raw_at(file as u8, rank as u8);
        raw == EMPTY_CELL || cell_is_light(raw) != color.is_light()
    }

    // --- Whole-board views ---

    /// Occupied cells in square order: rank by rank from rank 1, a-file first.
    #[inline]
    pub fn pieces(&self) -> PieceIter<'_> {
        PieceIter {
            board: self,
            next: 0,
        }
    }

    /// Every square held by `color`.
    pub fn player_mask(&self, color: Color) -> BitBoard {
        let mut mask = BitBoard::EMPTY;
        for placed in self.pieces().filter(|placed| placed.color == color) {
            mask.set(square_at(placed.file, placed.rank));
        }
        mask
    }

    // --- Make / unmake ---

    /// Play `mv` on the board and return the token that reverts it.
    pub fn apply(&mut self, mv: Move) -> UndoToken {
        if mv.is_castling() {
            self.apply_castling(mv);
            return UndoToken::NONE;
        }

        let from = mv.from();
        let to = mv.to();
        let token = UndoToken(self.get(to));

        match mv.promoted().filter(|_| mv.piece() == Some(PieceKind::Pawn)) {
            Some(promoted) => {
                let color = Color::from_is_light(self.is_white(from));
                self.set(to, promoted.code());
                self.set_color(to, color);
            }
            None => {
                self.set(to, self.get(from));
            }
        }

        if mv.is_en_passant() {
            self.clear_at(mv.to_file(), mv.from_rank());
        }

        self.clear_square(from);
        token
    }

    /// Undo `mv`, given the token its `apply` returned.
    pub fn revert(&mut self, mv: Move, token: UndoToken) {
        if mv.is_castling() {
            self.revert_castling(mv);
            return;
        }

        let from = mv.from();
        let to = mv.to();
        let light = self.is_white(to);

        self.set(from, mv.piece_code());
        self.set_color(from, Color::from_is_light(light));
        self.set(to, token.raw());

        if mv.is_en_passant() {
            self.set_piece(
                PieceKind::Pawn,
                mv.to_file(),
                mv.from_rank(),
                Color::from_is_light(!light),
            );
        }
    }

    fn apply_castling(&mut self, mv: Move) {
        let rank = mv.from_rank();
        let color = castling_color(rank);
        let files = castling_files(mv.file_delta());
        trace!(?color, rank, king_to = files.king_to, "apply castling");

        self.clear_at(KING_HOME_FILE, rank);
        self.clear_at(files.rook_from, rank);
        self.set_piece(PieceKind::King, files.king_to, rank, color);
        self.set_piece(PieceKind::Rook, files.rook_to, rank, color);
    }

    fn revert_castling(&mut self, mv: Move) {
        let rank = mv.from_rank();
        let color = castling_color(rank);
        let files = castling_files(mv.file_delta());
        trace!(?color, rank, king_to = files.king_to, "revert castling");

        self.clear_at(files.king_to, rank);
        self.clear_at(files.rook_to, rank);
        self.set_piece(PieceKind::King, KING_HOME_FILE, rank, color);
        self.set_piece(PieceKind::Rook, files.rook_from, rank, color);
    }
}

#[inline]
fn castling_color(rank: u8) -> Color {
    Color::from_is_light(rank == LIGHT_HOME_RANK)
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

/// Lazy walk over the occupied cells of a board.
///
/// Borrowing the board for the walk rules out mutation while it runs; call
/// [`BoardState::pieces`] again to restart.
#[derive(Debug, Clone)]
pub struct PieceIter<'a> {
    board: &'a BoardState,
    next: u8,
}

impl Iterator for PieceIter<'_> {
    type Item = PlacedPiece;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < 64 {
            let square = self.next;
            self.next += 1;
            let raw = self.board.get(square);
            if let Some(piece) = cell_piece(raw) {
                return Some(PlacedPiece {
                    piece,
                    color: Color::from_is_light(cell_is_light(raw)),
                    file: file_of(square),
                    rank: rank_of(square),
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(64 - self.next as usize))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::moves::move_descriptions::{FLAG_CAPTURE, FLAG_EN_PASSANT, NO_FLAGS};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn placed(placement: &str) -> BoardState {
        BoardState::from_placement(placement).expect("placement should parse")
    }

    fn mv(text: &str) -> Move {
        text.parse().expect("test move should parse")
    }

    fn assert_holds(board: &BoardState, square: &str, piece: PieceKind, color: Color) {
        let s = sq(square);
        assert_eq!(board.piece(s), Some(piece), "piece on {square}");
        assert_eq!(board.color(s), Some(color), "color on {square}");
    }

    fn assert_empty(board: &BoardState, square: &str) {
        assert!(board.is_empty(sq(square)), "{square} should be empty");
    }

    fn assert_round_trip(board: &BoardState, mv: Move) {
        let mut working = *board;
        let token = working.apply(mv);
        working.revert(mv, token);
        assert_eq!(&working, board, "revert should restore the board after {mv}");
    }

    #[test]
    fn en_passant_removes_the_bypassed_pawn() {
        let start = placed("8/8/8/3pP3/8/8/8/8");
        let mut board = start;
        let ep = mv("e5xd6ep");

        let token = board.apply(ep);
        assert_eq!(token, UndoToken::NONE);
        assert_empty(&board, "e5");
        assert_empty(&board, "d5");
        assert_holds(&board, "d6", PieceKind::Pawn, Color::Light);

        board.revert(ep, token);
        assert_holds(&board, "e5", PieceKind::Pawn, Color::Light);
        assert_holds(&board, "d5", PieceKind::Pawn, Color::Dark);
        assert_empty(&board, "d6");
        assert_eq!(board, start);
    }

    #[test]
    fn dark_en_passant_restores_a_light_pawn() {
        let start = placed("8/8/8/8/3Pp3/8/8/8");
        let mut board = start;
        let ep = mv("e4xd3ep");

        let token = board.apply(ep);
        assert_holds(&board, "d3", PieceKind::Pawn, Color::Dark);
        assert_empty(&board, "d4");

        board.revert(ep, token);
        assert_eq!(board, start);
    }

    #[test]
    fn promotion_keeps_the_pawn_color() {
        let start = placed("8/P7/8/8/8/8/8/8");
        let mut board = start;
        let promo = mv("a7a8Q");

        let token = board.apply(promo);
        assert_holds(&board, "a8", PieceKind::Queen, Color::Light);
        assert_empty(&board, "a7");

        board.revert(promo, token);
        assert_holds(&board, "a7", PieceKind::Pawn, Color::Light);
        assert_empty(&board, "a8");
        assert_eq!(board, start);
    }

    #[test]
    fn dark_capture_promotion_restores_the_victim() {
        let start = placed("8/8/8/8/8/8/1p6/R7");
        let mut board = start;
        let promo = mv("b2xa1N");

        let token = board.apply(promo);
        assert_eq!(token.captured(), Some(PieceKind::Rook));
        assert_holds(&board, "a1", PieceKind::Knight, Color::Dark);
        assert_empty(&board, "b2");

        board.revert(promo, token);
        assert_holds(&board, "b2", PieceKind::Pawn, Color::Dark);
        assert_holds(&board, "a1", PieceKind::Rook, Color::Light);
        assert_eq!(board, start);
    }

    #[test]
    fn light_king_side_castling() {
        let start = placed("8/8/8/8/8/8/8/4K2R");
        let mut board = start;
        let castle = mv("Ke1g1");
        assert!(castle.is_castling());

        let token = board.apply(castle);
        assert_eq!(token, UndoToken::NONE);
        assert_empty(&board, "e1");
        assert_empty(&board, "h1");
        assert_holds(&board, "g1", PieceKind::King, Color::Light);
        assert_holds(&board, "f1", PieceKind::Rook, Color::Light);

        board.revert(castle, token);
        assert_holds(&board, "e1", PieceKind::King, Color::Light);
        assert_holds(&board, "h1", PieceKind::Rook, Color::Light);
        assert_empty(&board, "f1");
        assert_empty(&board, "g1");
        assert_eq!(board, start);
    }

    #[test]
    fn dark_queen_side_castling() {
        let start = placed("r3k3/8/8/8/8/8/8/8");
        let mut board = start;
        let castle = mv("Ke8c8");

        let token = board.apply(castle);
        assert_holds(&board, "c8", PieceKind::King, Color::Dark);
        assert_holds(&board, "d8", PieceKind::Rook, Color::Dark);
        assert_empty(&board, "a8");
        assert_empty(&board, "e8");

        board.revert(castle, token);
        assert_eq!(board, start);
    }

    #[test]
    fn plain_capture_hands_back_the_victim() {
        let start = BoardState::standard();
        let mut board = start;
        board.apply(mv("e2e4"));
        board.apply(mv("d7d5"));
        let before_capture = board;

        let capture = mv("e4xd5");
        let token = board.apply(capture);
        assert_eq!(token, UndoToken::from_raw(cell_value(PieceKind::Pawn, Color::Dark)));
        assert_eq!(token.captured(), Some(PieceKind::Pawn));
        assert!(!BoardState::raw_is_white(token.raw()));
        assert_holds(&board, "d5", PieceKind::Pawn, Color::Light);

        board.revert(capture, token);
        assert_eq!(board, before_capture);
    }

    #[test]
    fn nested_apply_revert_unwinds_in_stack_order() {
        let start = BoardState::standard();
        let line = ["e2e4", "e7e5", "Ng1f3", "Nb8c6", "Bf1c4", "Ng8f6", "Ke1g1"].map(mv);

        let mut board = start;
        let tokens: Vec<UndoToken> = line.iter().map(|&m| board.apply(m)).collect();
        assert_holds(&board, "g1", PieceKind::King, Color::Light);
        assert_holds(&board, "f1", PieceKind::Rook, Color::Light);

        for (&m, &token) in line.iter().zip(tokens.iter()).rev() {
            board.revert(m, token);
        }
        assert_eq!(board, start);
    }

    #[test]
    fn random_moves_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let non_king = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ];

        for _ in 0..500 {
            let mut board = BoardState::new();
            for square in 0..64u8 {
                if rng.random_bool(0.4) {
                    let piece = PieceKind::ALL[rng.random_range(0..6)];
                    let color = Color::from_is_light(rng.random_bool(0.5));
                    board.set(square, cell_value(piece, color));
                }
            }

            let from: Square = rng.random_range(0..64);
            let to: Square = loop {
                let candidate = rng.random_range(0..64);
                if candidate != from {
                    break candidate;
                }
            };
            let piece = non_king[rng.random_range(0..non_king.len())];
            let color = Color::from_is_light(rng.random_bool(0.5));
            board.set(from, cell_value(piece, color));

            let flags = if board.is_empty(to) { NO_FLAGS } else { FLAG_CAPTURE };
            assert_round_trip(&board, Move::new(piece, None, from, to, flags));
        }
    }

    #[test]
    fn en_passant_round_trips_on_every_file_pair() {
        for file in 0..8u8 {
            for side in [-1i8, 1] {
                let target = file as i8 + side;
                if !is_on_board(target, 0) {
                    continue;
                }
                let target = target as u8;

                let mut light = BoardState::new();
                light.set_piece(PieceKind::Pawn, file, 4, Color::Light);
                light.set_piece(PieceKind::Pawn, target, 4, Color::Dark);
                let ep =
                    Move::from_coords(PieceKind::Pawn, None, file, 4, target, 5, FLAG_EN_PASSANT);
                assert_round_trip(&light, ep);

                let mut dark = BoardState::new();
                dark.set_piece(PieceKind::Pawn, file, 3, Color::Dark);
                dark.set_piece(PieceKind::Pawn, target, 3, Color::Light);
                let ep =
                    Move::from_coords(PieceKind::Pawn, None, file, 3, target, 2, FLAG_EN_PASSANT);
                assert_round_trip(&dark, ep);
            }
        }
    }

    #[test]
    fn queries_respect_board_edges_and_colors() {
        let board = placed("8/8/8/8/8/2p5/1N6/8");

        assert!(board.can_move(0, 0));
        assert!(!board.can_move(1, 1));
        assert!(!board.can_move(-1, 0));
        assert!(!board.can_move(0, 8));

        assert!(board.can_take(Color::Light, 2, 2));
        assert!(!board.can_take(Color::Dark, 2, 2));
        assert!(!board.can_take(Color::Light, 3, 3));
        assert!(!board.can_take(Color::Light, 8, 2));

        assert!(board.can_move_or_take(Color::Light, 2, 2));
        assert!(board.can_move_or_take(Color::Light, 3, 3));
        assert!(!board.can_move_or_take(Color::Dark, 2, 2));
        assert!(!board.can_move_or_take(Color::Light, 1, 1));
        assert!(!board.can_move_or_take(Color::Light, 7, -1));

        assert!(board.is_piece_in_color_at(1, 1, Color::Light));
        assert!(!board.is_piece_in_color_at(1, 1, Color::Dark));
        assert!(!board.is_piece_in_color_at(0, 0, Color::Light));
    }

    #[test]
    fn pieces_walk_rank_by_rank_and_restart() {
        let board = placed("7k/8/8/8/8/8/8/R3K3");
        let walked: Vec<(PieceKind, Color, u8, u8)> = board
            .pieces()
            .map(|p| (p.piece, p.color, p.file, p.rank))
            .collect();
        assert_eq!(
            walked,
            vec![
                (PieceKind::Rook, Color::Light, 0, 0),
                (PieceKind::King, Color::Light, 4, 0),
                (PieceKind::King, Color::Dark, 7, 7),
            ]
        );
        assert_eq!(board.pieces().count(), 3);
    }

    #[test]
    fn player_masks_split_the_standard_board() {
        let board = BoardState::standard();
        let light = board.player_mask(Color::Light);
        let dark = board.player_mask(Color::Dark);

        assert_eq!(light.bits(), 0x0000_0000_0000_FFFF);
        assert_eq!(dark.bits(), 0xFFFF_0000_0000_0000);
        assert_eq!(light.bits() & dark.bits(), 0);
    }

    #[test]
    fn raw_setters_report_previous_cell() {
        let mut board = BoardState::new();
        assert_eq!(board.set_piece(PieceKind::Bishop, 2, 0, Color::Dark), EMPTY_CELL);
        let previous = board.set_piece(PieceKind::Queen, 2, 0, Color::Light);
        assert_eq!(cell_piece(previous), Some(PieceKind::Bishop));
        assert!(!BoardState::raw_is_white(previous));
        assert_eq!(board.piece_bits(2), PieceKind::Queen.code());

        board.clear_at(2, 0);
        assert!(board.is_empty_at(2, 0));

        let mut copy = BoardState::new();
        copy.copy_from(&BoardState::standard());
        assert_eq!(copy, BoardState::standard());
        copy.clear_all();
        assert_eq!(copy, BoardState::new());
    }
}
