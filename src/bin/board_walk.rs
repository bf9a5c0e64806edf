//! Play a line of moves on a board, then unwind it.
//!
//! Usage:
//! `cargo run --bin board_walk -- e2e4 e7e5 Ng1f3`
//! `cargo run --bin board_walk -- --placement "8/8/8/3pP3/8/8/8/8" e5xd6ep`
//!
//! Each move is applied in order and the board printed after it. The moves
//! are then reverted in reverse order and the result compared against the
//! starting board. Set `RUST_LOG=trace` to see castling transitions.

use chessbot_core::game_state::chess_types::{BoardState, Color, UndoToken};
use chessbot_core::moves::move_descriptions::Move;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

struct WalkArgs {
    placement: Option<String>,
    moves: Vec<String>,
}

fn parse_args() -> Result<WalkArgs, String> {
    let mut placement = None;
    let mut moves = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--placement" {
            placement = Some(args.next().ok_or("--placement needs a value")?);
        } else {
            moves.push(arg);
        }
    }

    Ok(WalkArgs { placement, moves })
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let start = match &args.placement {
        Some(fen) => BoardState::from_placement(fen).map_err(|e| e.to_string())?,
        None => BoardState::standard(),
    };

    let moves = args
        .moves
        .iter()
        .map(|text| text.parse::<Move>())
        .collect::<Result<Vec<Move>, _>>()
        .map_err(|e| e.to_string())?;

    println!("{start}");

    let mut board = start;
    let mut tokens: Vec<UndoToken> = Vec::with_capacity(moves.len());
    for mv in &moves {
        let token = board.apply(*mv);
        info!(%mv, captured = ?token.captured(), "applied");
        tokens.push(token);
        println!("{mv}\n{board}");
    }

    println!(
        "light {} / dark {} pieces",
        board.player_mask(Color::Light).count(),
        board.player_mask(Color::Dark).count()
    );

    for (mv, token) in moves.iter().zip(tokens).rev() {
        board.revert(*mv, token);
    }

    if board != start {
        return Err(format!("board differs after unwinding:\n{board}"));
    }
    info!(plies = moves.len(), "unwound to the starting board");
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run() {
        error!("{message}");
        std::process::exit(1);
    }
}
