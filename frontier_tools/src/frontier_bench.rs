use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use frontier::{ExpanderConfig, FrontierExpander};
use mailbox::Board;

/// Golden counts shipped with the `frontier` crate, found regardless of the working directory.
const DEFAULT_EPD: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../frontier/tests/frontier.epd");

/// Expands every position of an EPD file and checks each round against the expected counts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File of `<fen> ;D1 <count> ;D2 <count> ...` lines [default: the `frontier` crate's tests/frontier.epd]
    #[arg(default_value = DEFAULT_EPD, hide_default_value = true)]
    path: String,

    /// Number of worker threads [default: number of CPUs]
    #[arg(short, long)]
    threads: Option<usize>,
}

/// Parses one `D<depth> <count>` entry of an EPD line.
fn parse_expected(entry: &str) -> Result<(usize, usize)> {
    let entry = entry.trim();
    let (depth, count) = entry
        .strip_prefix('D')
        .and_then(|rest| rest.split_once(' '))
        .context(format!("Expected `D<depth> <count>`, got {entry:?}"))?;

    let depth = depth
        .trim()
        .parse()
        .context(format!("Invalid depth in {entry:?}"))?;
    let count = count
        .trim()
        .parse()
        .context(format!("Invalid count in {entry:?}"))?;

    Ok((depth, count))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let contents =
        std::fs::read_to_string(&args.path).context(format!("Failed to read {:?}", args.path))?;

    let mut config = ExpanderConfig::default();
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    let expander = FrontierExpander::new(config);

    let lines = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    let len = lines.len();

    let mut total_nodes = 0;

    let now = Instant::now();
    for (i, entry) in lines.into_iter().enumerate() {
        let mut parts = entry.split(';');

        let fen = parts.next().unwrap_or_default().trim();
        let board = Board::from_fen(fen).context(format!("Line {i}: invalid FEN {fen:?}"))?;

        let expected = parts.map(parse_expected).collect::<Result<Vec<_>>>()?;
        let depth = expected.iter().map(|&(depth, _)| depth).max().unwrap_or(0);

        let reports = expander.run(board, depth, |_| {})?;

        for (depth, expected) in expected {
            let Some(report) = reports.iter().find(|r| r.ply == depth) else {
                bail!("{i} Frontier({depth}, {fen:?}) was never reached");
            };
            let nodes = report.frontier_size;
            total_nodes += nodes;

            if nodes != expected {
                bail!("\n{i} Frontier({depth}, {fen:?}) failed\nExpected: {expected}\nGot     : {nodes}");
            }
        }

        let elapsed = now.elapsed();
        let nps = total_nodes as f32 / elapsed.as_secs_f32();
        let m_nps = nps / 1_000_000.0;
        let percentage = ((1.0 + i as f32) / len as f32) * 100.0;
        println!("{percentage:>5.1}% complete - NPS: {nps:.0}, mNPS {m_nps:.1}",);
    }
    let elapsed = now.elapsed();

    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!();
    println!("Elapsed Time:          {elapsed:.1?}");
    println!("Total Nodes:           {total_nodes}");
    println!("Nodes / Sec:           {nps:.0}");
    println!("M Nodes / Sec:         {m_nps:.1}");

    Ok(())
}
