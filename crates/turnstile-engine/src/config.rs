//! Run configuration, validation, and error types.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use turnstile_grid::TokenGrid;

use crate::task::RowTask;

/// Configuration for one simulated run.
///
/// Row and column counts arrive out-of-band rather than being inferred
/// from the grid source, and [`Simulation::run`](crate::Simulation::run)
/// rejects a grid that disagrees with them before any thread starts.
pub struct SimConfig {
    /// Number of simulated processes, N ≥ 1.
    pub processes: u32,
    /// Rows each process walks in order. May be zero.
    pub rows: usize,
    /// Token columns per row.
    pub cols: usize,
    /// The critical-section body, run once per (process, row) pair.
    pub task: Arc<dyn RowTask>,
}

impl fmt::Debug for SimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimConfig")
            .field("processes", &self.processes)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("task", &self.task.name())
            .finish()
    }
}

/// Errors detected before a run starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Process count is zero.
    NoProcesses,
    /// Grid row count differs from the configured rows.
    GridRowsMismatch {
        /// The configured row count.
        configured: usize,
        /// Rows actually present in the grid.
        actual: usize,
    },
    /// Grid column count differs from the configured cols.
    GridColsMismatch {
        /// The configured column count.
        configured: usize,
        /// Columns actually present in the grid.
        actual: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProcesses => write!(f, "process count must be at least 1"),
            Self::GridRowsMismatch { configured, actual } => {
                write!(f, "configured {configured} rows, grid has {actual}")
            }
            Self::GridColsMismatch { configured, actual } => {
                write!(f, "configured {configured} cols, grid has {actual}")
            }
        }
    }
}

impl Error for ConfigError {}

impl SimConfig {
    /// Check the structural invariants that do not need the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processes == 0 {
            return Err(ConfigError::NoProcesses);
        }
        Ok(())
    }

    /// Check that `grid` matches the configured dimensions.
    pub fn check_grid(&self, grid: &TokenGrid) -> Result<(), ConfigError> {
        if grid.rows() != self.rows {
            return Err(ConfigError::GridRowsMismatch {
                configured: self.rows,
                actual: grid.rows(),
            });
        }
        if grid.cols() != self.cols {
            return Err(ConfigError::GridColsMismatch {
                configured: self.cols,
                actual: grid.cols(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::PalindromeMarker;

    fn config(processes: u32, rows: usize, cols: usize) -> SimConfig {
        SimConfig {
            processes,
            rows,
            cols,
            task: Arc::new(PalindromeMarker),
        }
    }

    #[test]
    fn zero_processes_is_rejected() {
        assert_eq!(config(0, 1, 1).validate(), Err(ConfigError::NoProcesses));
        assert!(config(1, 0, 0).validate().is_ok());
    }

    #[test]
    fn grid_dimensions_must_match() {
        let grid = TokenGrid::from_text("a b\nc d\n", 2, 2).unwrap();
        assert!(config(2, 2, 2).check_grid(&grid).is_ok());
        assert_eq!(
            config(2, 3, 2).check_grid(&grid),
            Err(ConfigError::GridRowsMismatch {
                configured: 3,
                actual: 2
            })
        );
        assert_eq!(
            config(2, 2, 4).check_grid(&grid),
            Err(ConfigError::GridColsMismatch {
                configured: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn debug_names_the_task() {
        let rendered = format!("{:?}", config(2, 1, 1));
        assert!(rendered.contains("palindrome-marker"));
    }
}
