use std::{
    io::{self, Write},
    time::Duration,
};

use super::PlyReport;

/// Writes the per-round counts and the run's total time to some output, usually `stdout`.
///
/// # Example
/// ```
/// # use std::time::Duration;
/// # use frontier::{PlyReport, Reporter};
/// let mut reporter = Reporter::new(Vec::new());
/// let report = PlyReport { ply: 1, frontier_size: 20, elapsed: Duration::ZERO };
/// reporter.round(&report).unwrap();
/// assert_eq!(reporter.into_inner(), b"Round 1 - Possible moves: 20\n");
/// ```
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    /// Creates a [`Reporter`] that prints to `stdout`.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    /// Creates a [`Reporter`] that writes to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Reports the size of the frontier after one round.
    pub fn round(&mut self, report: &PlyReport) -> io::Result<()> {
        writeln!(
            self.out,
            "Round {} - Possible moves: {}",
            report.ply, report.frontier_size
        )
    }

    /// Reports the total time taken by a run.
    pub fn finish(&mut self, elapsed: Duration) -> io::Result<()> {
        writeln!(self.out, "Time since start: {elapsed:?}")?;
        self.out.flush()
    }

    /// Consumes this [`Reporter`], returning the output it was writing to.
    pub fn into_inner(self) -> W {
        self.out
    }
}
