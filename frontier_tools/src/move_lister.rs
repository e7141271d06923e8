use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use mailbox::{generate_moves, is_capture, split_perft, Board};

/// Lists the pseudo-legal moves of a position, optionally with the node count below each one.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Position to list moves for, as a FEN placement optionally followed by the side to move
    fen: String,

    /// Count the positions this many plies deep below each move
    #[arg(short, long, default_value_t = 1)]
    depth: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let board = Board::from_fen(&args.fen).context(format!("Invalid FEN {:?}", args.fen))?;

    println!("{board:?}\n");

    if args.depth > 1 {
        let split = split_perft(&board, args.depth);
        for &(mv, nodes) in &split {
            let mv_str = if is_capture(&board, mv) {
                mv.to_string().red().bold()
            } else {
                mv.to_string().normal()
            };
            println!("{mv_str}: {nodes}");
        }

        let total = split.iter().map(|&(_, nodes)| nodes).sum::<u64>();
        println!("\n{total}");
    } else {
        let moves = generate_moves(&board, board.turn());
        for &mv in &moves {
            let mv_str = if is_capture(&board, mv) {
                mv.to_string().red().bold()
            } else {
                mv.to_string().normal()
            };
            println!("{mv_str}");
        }

        println!("\n{}", moves.len());
    }

    Ok(())
}
