//! Critical-section row tasks.
//!
//! A [`RowTask`] is the unit of work a process performs while holding
//! the critical section. The runner invokes it strictly between
//! `request()` and `release()`. The protocol, not the grid, is what
//! makes the access exclusive.

use turnstile_core::ProcessId;
use turnstile_grid::{GridError, TokenGrid};

/// What a task produced in one row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowOutcome {
    /// Reportable findings, in discovery order.
    pub findings: Vec<String>,
}

/// Unit of work executed while a process holds the critical section.
///
/// Implementations must be cheap to share across process threads
/// (`Send + Sync`); all per-invocation state arrives through the
/// `execute` arguments.
pub trait RowTask: Send + Sync {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Act on `row` of `grid` on behalf of `process`.
    fn execute(
        &self,
        process: ProcessId,
        row: usize,
        grid: &mut TokenGrid,
    ) -> Result<RowOutcome, GridError>;
}

/// Stock task: find every palindromic substring of the row's joined
/// text and overwrite each token starting with one by the acting
/// process's id.
#[derive(Clone, Copy, Debug, Default)]
pub struct PalindromeMarker;

impl RowTask for PalindromeMarker {
    fn name(&self) -> &str {
        "palindrome-marker"
    }

    fn execute(
        &self,
        process: ProcessId,
        row: usize,
        grid: &mut TokenGrid,
    ) -> Result<RowOutcome, GridError> {
        let text = grid.joined_row(row)?;
        let palindromes = turnstile_scan::find_palindromes(&text);
        if !palindromes.is_empty() {
            let marker = process.to_string();
            turnstile_scan::mark_tokens(grid.row_mut(row)?, &palindromes, &marker);
        }
        Ok(RowOutcome {
            findings: palindromes.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_rewrites_palindrome_prefixed_tokens() {
        let mut grid = TokenGrid::from_text("ana bob x\n", 1, 3).unwrap();
        let outcome = PalindromeMarker
            .execute(ProcessId(7), 0, &mut grid)
            .unwrap();
        assert_eq!(outcome.findings, ["ana", "bob"]);
        assert_eq!(grid.row(0).unwrap(), ["7", "7", "x"]);
    }

    #[test]
    fn marker_leaves_plain_rows_alone() {
        let mut grid = TokenGrid::from_text("ab cd ef\n", 1, 3).unwrap();
        let outcome = PalindromeMarker
            .execute(ProcessId(2), 0, &mut grid)
            .unwrap();
        assert!(outcome.findings.is_empty());
        assert_eq!(grid.row(0).unwrap(), ["ab", "cd", "ef"]);
    }

    #[test]
    fn marker_propagates_bad_row_indices() {
        let mut grid = TokenGrid::from_text("a b\n", 1, 2).unwrap();
        assert!(matches!(
            PalindromeMarker.execute(ProcessId(1), 5, &mut grid),
            Err(GridError::RowOutOfBounds { row: 5, .. })
        ));
    }
}
