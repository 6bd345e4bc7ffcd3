//! Simulation launcher: spawn, watch, join.
//!
//! [`Simulation`] is the user-facing API for running a full population.
//! [`run()`](Simulation::run) spawns one thread per process, each
//! owning its coordinator and mailbox, then watches the events channel
//! until every process reports completion (or one fails), broadcasts
//! shutdown to release the drain-serving runners, and joins every
//! thread before returning the finished grid.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;

use turnstile_core::ProcessId;
use turnstile_grid::TokenGrid;

use crate::config::{ConfigError, SimConfig};
use crate::coordinator::Coordinator;
use crate::registry::PeerRegistry;
use crate::report::{ProcessStats, RowReport};
use crate::runner::{ProcessRunner, RunnerError, RunnerEvent};
use crate::shared::SharedGrid;

// ── Run results and errors ──────────────────────────────────────

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// The grid after every process walked every row.
    pub grid: TokenGrid,
    /// Row reports in critical-section order.
    pub reports: Vec<RowReport>,
    /// Per-process protocol counters, indexed by [`ProcessId::index`].
    pub stats: Vec<ProcessStats>,
}

/// Errors surfaced by [`Simulation::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The configuration or grid failed validation.
    Config(ConfigError),
    /// A process stopped on an error; the run was torn down.
    Process {
        /// The process that failed first.
        id: ProcessId,
        /// What stopped it.
        error: RunnerError,
    },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Process { id, error } => write!(f, "process {id}: {error}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Process { error, .. } => Some(error),
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// A validated, ready-to-run simulation.
pub struct Simulation {
    config: SimConfig,
}

impl Simulation {
    /// Validate `config` eagerly; grid consistency is checked at
    /// [`run()`](Self::run), when the grid is supplied.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full population over `grid`.
    ///
    /// Every process walks rows `0..rows` in order, entering the
    /// critical section once per row, so a clean run performs exactly
    /// `processes × rows` serialized task executions.
    ///
    /// # Errors
    ///
    /// A grid that disagrees with the configured dimensions fails fast
    /// before any thread starts. A protocol violation or task failure
    /// in any process tears the whole run down and surfaces as
    /// [`SimError::Process`] naming the first process that failed.
    pub fn run(self, grid: TokenGrid) -> Result<RunOutcome, SimError> {
        self.config.check_grid(&grid)?;
        let total = self.config.processes;

        let (registry, receivers) = PeerRegistry::build(total);
        let shared = SharedGrid::new(grid);
        let (events_tx, events_rx) = unbounded();

        let mut handles = Vec::with_capacity(total as usize);
        for (index, mailbox) in receivers.into_iter().enumerate() {
            let id = ProcessId(index as u32 + 1);
            let runner = ProcessRunner::new(
                Coordinator::new(id, registry.clone(), mailbox),
                shared.clone(),
                Arc::clone(&self.config.task),
                events_tx.clone(),
                self.config.rows,
            );
            let events = events_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("turnstile-p{id}"))
                .spawn(move || {
                    panic::catch_unwind(AssertUnwindSafe(|| runner.run())).unwrap_or_else(|_| {
                        let _ = events.send(RunnerEvent::Failed {
                            id,
                            error: RunnerError::Panicked,
                        });
                        Err(RunnerError::Panicked)
                    })
                })
                .expect("failed to spawn process thread");
            handles.push(handle);
        }
        drop(events_tx);

        // Watch events until every process reports completion or one
        // fails.
        let mut reports = Vec::new();
        let mut stats = vec![ProcessStats::default(); total as usize];
        let mut finished = 0u32;
        let mut failure: Option<SimError> = None;
        while finished < total {
            match events_rx.recv() {
                Ok(RunnerEvent::Row(report)) => reports.push(report),
                Ok(RunnerEvent::Finished { id, stats: s }) => {
                    stats[id.index()] = s;
                    finished += 1;
                }
                Ok(RunnerEvent::Failed { id, error }) => {
                    failure = Some(SimError::Process { id, error });
                    break;
                }
                // Every runner is gone without reporting; the joins
                // below say why.
                Err(_) => break,
            }
        }

        // Release the drain-serving runners (clean path), or unblock
        // whatever is still waiting mid-cycle (failure path).
        registry.shutdown_all();

        for (index, handle) in handles.into_iter().enumerate() {
            let id = ProcessId(index as u32 + 1);
            let result = handle.join().unwrap_or(Err(RunnerError::Panicked));
            if let Err(error) = result {
                if failure.is_none() {
                    failure = Some(SimError::Process { id, error });
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(RunOutcome {
                grid: shared.snapshot(),
                reports,
                stats,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{PalindromeMarker, RowOutcome, RowTask};
    use turnstile_grid::GridError;

    fn marker_config(processes: u32, rows: usize, cols: usize) -> SimConfig {
        SimConfig {
            processes,
            rows,
            cols,
            task: Arc::new(PalindromeMarker),
        }
    }

    #[test]
    fn mismatched_grid_fails_before_spawning() {
        let grid = TokenGrid::from_text("a b\n", 1, 2).unwrap();
        let sim = Simulation::new(marker_config(2, 3, 2)).unwrap();
        assert_eq!(
            sim.run(grid).unwrap_err(),
            SimError::Config(ConfigError::GridRowsMismatch {
                configured: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn zero_rows_run_returns_the_grid_untouched() {
        let grid = TokenGrid::from_text("", 0, 3).unwrap();
        let sim = Simulation::new(marker_config(3, 0, 3)).unwrap();
        let outcome = sim.run(grid).unwrap();
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.grid.render(), "");
        assert!(outcome.stats.iter().all(|s| s.cycles == 0));
    }

    #[test]
    fn failing_task_tears_the_run_down() {
        struct BadRow;
        impl RowTask for BadRow {
            fn name(&self) -> &str {
                "bad-row"
            }
            fn execute(
                &self,
                _process: ProcessId,
                row: usize,
                grid: &mut TokenGrid,
            ) -> Result<RowOutcome, GridError> {
                // Address one row past the end.
                grid.joined_row(row + 1)?;
                Ok(RowOutcome::default())
            }
        }
        let grid = TokenGrid::from_text("a b\n", 1, 2).unwrap();
        let sim = Simulation::new(SimConfig {
            processes: 2,
            rows: 1,
            cols: 2,
            task: Arc::new(BadRow),
        })
        .unwrap();
        match sim.run(grid) {
            Err(SimError::Process {
                error: RunnerError::Grid(GridError::RowOutOfBounds { .. }),
                ..
            }) => {}
            other => panic!("expected a grid failure, got {other:?}"),
        }
    }

    #[test]
    fn panicking_task_surfaces_instead_of_hanging() {
        struct Explodes;
        impl RowTask for Explodes {
            fn name(&self) -> &str {
                "explodes"
            }
            fn execute(
                &self,
                _process: ProcessId,
                _row: usize,
                _grid: &mut TokenGrid,
            ) -> Result<RowOutcome, GridError> {
                panic!("boom");
            }
        }
        let grid = TokenGrid::from_text("a b\n", 1, 2).unwrap();
        let sim = Simulation::new(SimConfig {
            processes: 2,
            rows: 1,
            cols: 2,
            task: Arc::new(Explodes),
        })
        .unwrap();
        match sim.run(grid) {
            Err(SimError::Process {
                error: RunnerError::Panicked,
                ..
            }) => {}
            other => panic!("expected a panic report, got {other:?}"),
        }
    }
}
