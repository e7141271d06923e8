use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mailbox::FEN_STARTPOS;

/// Number of plies expanded when no depth is given.
pub const DEFAULT_DEPTH: usize = 5;

/// Number of successors that may sit in the result channel before producers block.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 4096;

/// Tunables of a [`FrontierExpander`](crate::FrontierExpander).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpanderConfig {
    /// Number of worker threads in the pool.
    pub threads: usize,

    /// Bound of the channel that carries successors back to the collector.
    pub channel_capacity: usize,

    /// Wall-clock budget for a run, checked only between rounds.
    pub time_limit: Option<Duration>,

    /// Largest frontier a round will accept as input.
    pub max_frontier: Option<usize>,

    /// Expand on the calling thread instead of the pool.
    pub sequential: bool,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            time_limit: None,
            max_frontier: None,
            sequential: false,
        }
    }
}

/// Counts the positions reachable from a chess position, one ply at a time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of plies to expand
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Starting position, as a FEN placement optionally followed by the side to move
    #[arg(short, long, default_value = FEN_STARTPOS)]
    pub fen: String,

    /// Number of worker threads [default: number of CPUs]
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Capacity of the channel carrying results back from the workers
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    /// Stop before starting a new round once this many seconds have passed
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub time_limit: Option<Duration>,

    /// Refuse to expand a frontier with more positions than this
    #[arg(long)]
    pub max_frontier: Option<usize>,

    /// Expand on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Print the starting board before expanding
    #[arg(long)]
    pub show: bool,
}

impl From<&Args> for ExpanderConfig {
    fn from(args: &Args) -> Self {
        let default = Self::default();
        Self {
            threads: args.threads.unwrap_or(default.threads),
            channel_capacity: args.channel_capacity,
            time_limit: args.time_limit,
            max_frontier: args.max_frontier,
            sequential: args.sequential,
        }
    }
}

/// Parses a (possibly fractional) number of seconds into a [`Duration`].
fn parse_seconds(arg: &str) -> Result<Duration> {
    let secs = arg
        .parse::<f64>()
        .context(format!("Invalid number of seconds {arg:?}"))?;

    if !secs.is_finite() || secs < 0.0 {
        bail!("Time limit must be a non-negative number of seconds. Got {arg:?}");
    }

    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_constants() {
        let args = Args::parse_from(["frontier"]);
        assert_eq!(args.depth, DEFAULT_DEPTH);
        assert_eq!(args.fen, FEN_STARTPOS);

        let config = ExpanderConfig::from(&args);
        assert_eq!(config, ExpanderConfig::default());
        assert!(config.threads >= 1);
    }

    #[test]
    fn flags_override_the_defaults() {
        let args = Args::parse_from([
            "frontier",
            "-d",
            "3",
            "-t",
            "2",
            "--channel-capacity",
            "16",
            "--time-limit",
            "1.5",
            "--max-frontier",
            "1000",
            "--sequential",
        ]);
        assert_eq!(args.depth, 3);

        let config = ExpanderConfig::from(&args);
        assert_eq!(config.threads, 2);
        assert_eq!(config.channel_capacity, 16);
        assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(config.max_frontier, Some(1000));
        assert!(config.sequential);
    }

    #[test]
    fn bad_time_limits_are_rejected() {
        assert!(parse_seconds("abc").is_err());
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("inf").is_err());
        assert_eq!(parse_seconds("0").unwrap(), Duration::ZERO);
        assert!(Args::try_parse_from(["frontier", "--time-limit", "soon"]).is_err());
    }
}
