//! Shared ownership wrapper for the token grid.

use std::sync::{Arc, Mutex};

use turnstile_grid::TokenGrid;

/// Cloneable owner handle to the one grid a run shares.
///
/// The mutex inside only satisfies the compiler's aliasing rules; the
/// serialization that actually keeps critical sections from
/// overlapping is the coordinator's grant, and a holder locks only for
/// the duration of one row task. Callers of
/// [`with_mut`](SharedGrid::with_mut) must hold that grant.
///
/// A poisoned lock (a task panicked mid-row) yields the grid as-is:
/// the launcher reports the panic separately, and the grid is plain
/// data that is never structurally invalid.
#[derive(Clone, Debug)]
pub struct SharedGrid {
    inner: Arc<Mutex<TokenGrid>>,
}

impl SharedGrid {
    /// Take ownership of `grid` for the duration of a run.
    pub fn new(grid: TokenGrid) -> Self {
        Self {
            inner: Arc::new(Mutex::new(grid)),
        }
    }

    /// Run `f` over the grid read-only.
    pub fn with<R>(&self, f: impl FnOnce(&TokenGrid) -> R) -> R {
        match self.inner.lock() {
            Ok(grid) => f(&grid),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Run `f` over the grid mutably.
    ///
    /// The caller must hold the coordinator's grant for the row it
    /// touches.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut TokenGrid) -> R) -> R {
        match self.inner.lock() {
            Ok(mut grid) => f(&mut grid),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// Clone the current grid out of the handle.
    pub fn snapshot(&self) -> TokenGrid {
        self.with(TokenGrid::clone)
    }
}
