use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use frontier::{Args, ExpanderConfig, FrontierExpander, Reporter};
use log::warn;
use mailbox::{Board, Color};

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // A bad position must fail before anything is printed
    let board = Board::from_fen(&args.fen).context(format!("Invalid FEN {:?}", args.fen))?;
    if let Some(turn) = args.fen.split_ascii_whitespace().nth(1) {
        if turn.parse::<Color>().is_err() {
            warn!("Unrecognised side to move {turn:?}, White is to move");
        }
    }

    if args.show {
        println!("{board}\n");
    }

    let start = Instant::now();
    let expander = FrontierExpander::new(ExpanderConfig::from(&args));
    let mut reporter = Reporter::stdout();
    let mut write_result = Ok(());

    expander.run(board, args.depth, |report| {
        if write_result.is_ok() {
            write_result = reporter.round(report);
        }
    })?;
    write_result.context("Failed to write round report")?;

    reporter
        .finish(start.elapsed())
        .context("Failed to write run summary")
}
