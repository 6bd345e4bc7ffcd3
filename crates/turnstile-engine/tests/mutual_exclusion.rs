//! Integration test: no two critical-section executions overlap.
//!
//! Wraps the stock task in a probe that tracks how many processes are
//! inside the exclusive window at once. The protocol, not a lock,
//! is what keeps that number at one, so the probe deliberately leaves
//! a scheduling gap inside the window to give overlaps a chance to
//! show up if the coordinator were broken.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use turnstile_core::ProcessId;
use turnstile_engine::{PalindromeMarker, RowOutcome, RowTask, SimConfig, Simulation};
use turnstile_grid::{GridError, TokenGrid};

/// Counts concurrent holders around an inner task.
struct OverlapProbe {
    inner: PalindromeMarker,
    inside: AtomicUsize,
    max_seen: Arc<AtomicUsize>,
}

impl OverlapProbe {
    fn new(max_seen: Arc<AtomicUsize>) -> Self {
        Self {
            inner: PalindromeMarker,
            inside: AtomicUsize::new(0),
            max_seen,
        }
    }
}

impl RowTask for OverlapProbe {
    fn name(&self) -> &str {
        "overlap-probe"
    }

    fn execute(
        &self,
        process: ProcessId,
        row: usize,
        grid: &mut TokenGrid,
    ) -> Result<RowOutcome, GridError> {
        let now = self.inside.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_seen.fetch_max(now, Ordering::SeqCst);
        // Widen the window so a broken coordinator would actually
        // produce an observable overlap.
        thread::sleep(Duration::from_millis(1));
        let outcome = self.inner.execute(process, row, grid);
        self.inside.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

fn run_population(processes: u32) -> usize {
    let text = "ana bob x\naa bb cc\nab cd ef\nkayak civic z\n";
    let grid = TokenGrid::from_text(text, 4, 3).unwrap();
    let max_seen = Arc::new(AtomicUsize::new(0));
    let config = SimConfig {
        processes,
        rows: 4,
        cols: 3,
        task: Arc::new(OverlapProbe::new(Arc::clone(&max_seen))),
    };
    let outcome = Simulation::new(config).unwrap().run(grid).unwrap();
    assert_eq!(outcome.reports.len(), processes as usize * 4);
    max_seen.load(Ordering::SeqCst)
}

#[test]
fn single_process_never_overlaps_itself() {
    assert_eq!(run_population(1), 1);
}

#[test]
fn contending_processes_hold_one_at_a_time() {
    assert_eq!(run_population(4), 1);
}

#[test]
fn wider_population_still_serializes() {
    assert_eq!(run_population(8), 1);
}
