use std::{
    sync::mpsc,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use log::{debug, error, info, trace, warn};
use mailbox::{generate_moves, Board, MoveList};
use threadpool::ThreadPool;

use super::ExpanderConfig;

/// What a completed round looked like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlyReport {
    /// Number of plies played from the root, starting at `1`.
    pub ply: usize,

    /// Number of positions in the frontier after this round.
    pub frontier_size: usize,

    /// Time since the run started.
    pub elapsed: Duration,
}

/// Messages sent from a job back to the collector.
enum JobMessage {
    /// One successor of the job's board.
    Successor(Board),

    /// The job is finished, having sent this many successors before it.
    Done { successors: usize },
}

/// Expands a frontier of positions into the frontier one ply deeper, fanning the work out over a thread pool.
///
/// # Example
/// ```
/// # use frontier::{ExpanderConfig, FrontierExpander};
/// # use mailbox::Board;
/// let expander = FrontierExpander::new(ExpanderConfig::default());
/// let reports = expander.run(Board::default(), 2, |_| {}).unwrap();
/// assert_eq!(reports[0].frontier_size, 20);
/// assert_eq!(reports[1].frontier_size, 400);
/// ```
pub struct FrontierExpander {
    config: ExpanderConfig,
    pool: ThreadPool,
}

impl FrontierExpander {
    /// Creates a new [`FrontierExpander`], spawning `config.threads` workers (at least one).
    pub fn new(config: ExpanderConfig) -> Self {
        let pool = ThreadPool::new(config.threads.max(1));
        Self { config, pool }
    }

    /// Performs one round: every pseudo-legal successor of every board in `frontier`.
    ///
    /// Each board is handed to its own pool job as a copy. Jobs send their
    /// successors over a bounded channel and finish with a completion message;
    /// the calling thread drains the channel until it has seen one completion
    /// per job. Results come back in no particular order, and identical
    /// positions reached by different lines are all kept.
    ///
    /// Fails, discarding whatever was collected, if a job dies before completing
    /// or if `frontier` is larger than the configured `max_frontier`.
    pub fn expand(&self, frontier: &[Board]) -> Result<Vec<Board>> {
        self.expand_with(frontier, |board| generate_moves(board, board.turn()))
    }

    /// Performs one round, listing each board's moves with `moves_of`.
    fn expand_with(
        &self,
        frontier: &[Board],
        moves_of: fn(&Board) -> MoveList,
    ) -> Result<Vec<Board>> {
        self.check_bound(frontier)?;

        let jobs = frontier.len();
        let (sender, receiver) = mpsc::sync_channel(self.config.channel_capacity);
        debug!(
            "Dispatching {jobs} jobs to {} workers (channel capacity {})",
            self.pool.max_count(),
            self.config.channel_capacity
        );

        for (job, &board) in frontier.iter().enumerate() {
            let sender = sender.clone();

            self.pool.execute(move || {
                let moves = moves_of(&board);

                for &mv in &moves {
                    // The collector only hangs up once the round has failed
                    if sender.send(JobMessage::Successor(board.successor(mv))).is_err() {
                        return;
                    }
                }

                trace!("Job {job} produced {} successors", moves.len());
                _ = sender.send(JobMessage::Done {
                    successors: moves.len(),
                });
            });
        }
        // Only the jobs hold senders now, so the channel disconnects once they are all gone
        drop(sender);

        let mut next = Vec::with_capacity(jobs);
        let mut completed = 0;
        let mut announced = 0;

        while completed < jobs {
            match receiver.recv() {
                Ok(JobMessage::Successor(board)) => next.push(board),
                Ok(JobMessage::Done { successors }) => {
                    completed += 1;
                    announced += successors;
                }
                Err(_) => {
                    error!("Result channel closed after {completed} of {jobs} jobs completed");
                    bail!(
                        "{} of {jobs} expansion jobs died before completing",
                        jobs - completed
                    );
                }
            }
        }

        if next.len() != announced {
            error!(
                "Collected {} successors but jobs reported {announced}",
                next.len()
            );
            bail!(
                "Lost successors during expansion: expected {announced}, got {}",
                next.len()
            );
        }

        Ok(next)
    }

    /// Expands `plies` rounds starting from `root`, calling `on_ply` after each one.
    ///
    /// A configured `time_limit` is only looked at between rounds: a round
    /// that has started always runs to completion. When the limit is reached
    /// the run stops early and returns the reports gathered so far.
    pub fn run(
        &self,
        root: Board,
        plies: usize,
        mut on_ply: impl FnMut(&PlyReport),
    ) -> Result<Vec<PlyReport>> {
        let start = Instant::now();
        let mut frontier = vec![root];
        let mut reports = Vec::with_capacity(plies);

        info!(
            "Expanding {plies} plies from {:?} ({})",
            root.to_fen(),
            if self.config.sequential {
                String::from("sequential")
            } else {
                format!("{} threads", self.pool.max_count())
            }
        );

        for ply in 1..=plies {
            if let Some(limit) = self.config.time_limit {
                if start.elapsed() >= limit {
                    warn!(
                        "Time limit of {limit:?} reached after {} of {plies} rounds",
                        ply - 1
                    );
                    break;
                }
            }

            frontier = if self.config.sequential {
                self.check_bound(&frontier)?;
                expand_sequential(&frontier)
            } else {
                self.expand(&frontier)
                    .context(format!("Failed to expand round {ply}"))?
            };

            let report = PlyReport {
                ply,
                frontier_size: frontier.len(),
                elapsed: start.elapsed(),
            };
            info!(
                "Round {ply} produced {} positions in {:.1?}",
                report.frontier_size, report.elapsed
            );

            on_ply(&report);
            reports.push(report);
        }

        Ok(reports)
    }

    /// Refuses a frontier that is larger than the configured `max_frontier`.
    fn check_bound(&self, frontier: &[Board]) -> Result<()> {
        if let Some(max) = self.config.max_frontier {
            if frontier.len() > max {
                bail!(
                    "Frontier of {} positions exceeds the limit of {max}",
                    frontier.len()
                );
            }
        }

        Ok(())
    }
}

impl Default for FrontierExpander {
    fn default() -> Self {
        Self::new(ExpanderConfig::default())
    }
}

/// Performs one round on the calling thread.
///
/// Successors are listed board by board, each board's in generation order.
/// Apart from that ordering, the result is the same multiset of positions
/// [`FrontierExpander::expand`] produces.
pub fn expand_sequential(frontier: &[Board]) -> Vec<Board> {
    frontier
        .iter()
        .flat_map(|board| {
            generate_moves(board, board.turn())
                .into_iter()
                .map(move |mv| board.successor(mv))
        })
        .collect()
}

/// Returns the size of each frontier from ply `1` to `plies`, expanding sequentially.
///
/// # Example
/// ```
/// # use frontier::count_frontier_sizes;
/// # use mailbox::Board;
/// assert_eq!(count_frontier_sizes(Board::default(), 3), [20, 400, 8902]);
/// ```
pub fn count_frontier_sizes(root: Board, plies: usize) -> Vec<u64> {
    let mut frontier = vec![root];

    (0..plies)
        .map(|_| {
            frontier = expand_sequential(&frontier);
            frontier.len() as u64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander(threads: usize, channel_capacity: usize) -> FrontierExpander {
        FrontierExpander::new(ExpanderConfig {
            threads,
            channel_capacity,
            ..Default::default()
        })
    }

    #[test]
    fn empty_frontier_expands_to_nothing() {
        let expander = expander(2, 4);
        assert!(expander.expand(&[]).unwrap().is_empty());
        assert!(expand_sequential(&[]).is_empty());
    }

    #[test]
    fn rendezvous_channel_still_completes() {
        let expander = expander(4, 0);
        assert_eq!(expander.expand(&[Board::default()]).unwrap().len(), 20);
    }

    #[test]
    fn zero_threads_still_gets_a_worker() {
        let expander = expander(0, 8);
        assert_eq!(expander.expand(&[Board::default()]).unwrap().len(), 20);
    }

    #[test]
    fn successors_pass_the_turn() {
        let next = expand_sequential(&[Board::default()]);
        assert!(next.iter().all(|board| board.turn().is_black()));

        let after = expand_sequential(&next);
        assert!(after.iter().all(|board| board.turn().is_white()));
    }

    #[test]
    fn dead_job_fails_the_round() {
        // Black to move panics; White's jobs succeed
        fn white_only(board: &Board) -> MoveList {
            assert!(board.turn().is_white(), "job for {} failed", board.to_fen());
            generate_moves(board, board.turn())
        }

        let white = Board::default();
        let black = white.successor(generate_moves(&white, white.turn())[0]);
        let frontier = [white, white, black, white];

        for (threads, capacity) in [(1, 0), (2, 1), (4, 64)] {
            let expander = expander(threads, capacity);
            let err = expander.expand_with(&frontier, white_only).unwrap_err();
            assert!(err.to_string().contains("1 of 4 expansion jobs died"), "{err}");

            // The pool replaces the dead worker, and later rounds are unaffected
            assert_eq!(expander.expand(&frontier).unwrap().len(), 80);
        }
    }

    #[test]
    fn zero_plies_reports_nothing() {
        let reports = expander(1, 1).run(Board::default(), 0, |_| {}).unwrap();
        assert!(reports.is_empty());
        assert!(count_frontier_sizes(Board::default(), 0).is_empty());
    }
}
