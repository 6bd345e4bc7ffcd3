//! Per-process driver loop.
//!
//! A [`ProcessRunner`] owns one coordinator and drives it through all
//! assigned rows: request, execute the row task, release. It reports
//! rows and completion over the launcher's events channel, then keeps
//! serving peers until the shutdown broadcast, because a finished
//! process must still acknowledge unfinished peers or they would
//! starve.

use std::sync::Arc;

use crossbeam_channel::Sender;
use tracing::info;

use turnstile_core::{ProcessId, ProtocolError};
use turnstile_grid::GridError;

use crate::coordinator::Coordinator;
use crate::report::{ProcessStats, RowReport};
use crate::shared::SharedGrid;
use crate::task::RowTask;

/// Why a process runner stopped before completing the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunnerError {
    /// The request/reply protocol was violated.
    Protocol(ProtocolError),
    /// The row task failed against the grid.
    Grid(GridError),
    /// The runner thread panicked.
    Panicked,
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "protocol: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Panicked => write!(f, "runner thread panicked"),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Panicked => None,
        }
    }
}

impl From<ProtocolError> for RunnerError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<GridError> for RunnerError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Events a runner sends to the launcher.
pub(crate) enum RunnerEvent {
    /// One row was processed while holding the critical section.
    Row(RowReport),
    /// The runner finished all its rows and entered serve mode.
    Finished {
        id: ProcessId,
        stats: ProcessStats,
    },
    /// The runner stopped on an error.
    Failed {
        id: ProcessId,
        error: RunnerError,
    },
}

/// Drives one process through all assigned rows sequentially.
pub(crate) struct ProcessRunner {
    coordinator: Coordinator,
    grid: SharedGrid,
    task: Arc<dyn RowTask>,
    events: Sender<RunnerEvent>,
    rows: usize,
}

impl ProcessRunner {
    pub(crate) fn new(
        coordinator: Coordinator,
        grid: SharedGrid,
        task: Arc<dyn RowTask>,
        events: Sender<RunnerEvent>,
        rows: usize,
    ) -> Self {
        Self {
            coordinator,
            grid,
            task,
            events,
            rows,
        }
    }

    /// Run to completion, reporting failure over the events channel
    /// before returning it.
    ///
    /// Event sends are best-effort; the launcher may already be
    /// tearing the run down.
    pub(crate) fn run(mut self) -> Result<(), RunnerError> {
        match self.drive() {
            Ok(()) => Ok(()),
            Err(error) => {
                let _ = self.events.send(RunnerEvent::Failed {
                    id: self.coordinator.id(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    fn drive(&mut self) -> Result<(), RunnerError> {
        let id = self.coordinator.id();
        for row in 0..self.rows {
            self.coordinator.request()?;
            let outcome = self
                .grid
                .with_mut(|grid| self.task.execute(id, row, grid))?;
            // Report inside the exclusive window so the launcher's
            // event order matches the critical-section order.
            info!(
                process = %id,
                row,
                task = self.task.name(),
                findings = outcome.findings.len(),
                "row processed"
            );
            let _ = self.events.send(RunnerEvent::Row(RowReport {
                process: id,
                row,
                findings: outcome.findings,
            }));
            self.coordinator.release()?;
        }
        let _ = self.events.send(RunnerEvent::Finished {
            id,
            stats: *self.coordinator.stats(),
        });
        self.coordinator.serve_until_shutdown()?;
        Ok(())
    }
}
