//! Turnstile: a Ricart–Agrawala mutual-exclusion simulator over a
//! shared token matrix.
//!
//! N logical processes run as threads inside one runtime and
//! coordinate exclusive access to a shared grid with timestamped
//! request/reply messages. No lock serializes the critical sections;
//! the protocol does. While holding the section, a process scans one
//! row for palindromic substrings and marks matching tokens with its
//! id.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Turnstile sub-crates. For most users, adding `turnstile`
//! as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use turnstile::prelude::*;
//!
//! // Two processes walking one row of a 1×3 grid.
//! let grid = TokenGrid::from_text("ana bob x\n", 1, 3).unwrap();
//! let config = SimConfig {
//!     processes: 2,
//!     rows: 1,
//!     cols: 3,
//!     task: Arc::new(PalindromeMarker),
//! };
//! let outcome = Simulation::new(config).unwrap().run(grid).unwrap();
//!
//! // Every process visited the row once, in some serialized order.
//! assert_eq!(outcome.reports.len(), 2);
//! // The first visitor saw the pristine row.
//! assert_eq!(outcome.reports[0].findings, ["ana", "bob"]);
//! // Palindrome-prefixed tokens now carry a process id; "x" survives.
//! assert_eq!(outcome.grid.row(0).unwrap()[2], "x");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `turnstile-core` | Process ids, Lamport clock, messages, protocol errors |
//! | [`grid`] | `turnstile-grid` | The shared token matrix |
//! | [`scan`] | `turnstile-scan` | Palindrome detection and token marking |
//! | [`engine`] | `turnstile-engine` | Coordinator, registry, runner, and the `Simulation` launcher |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and protocol vocabulary (`turnstile-core`).
///
/// Contains [`types::ProcessId`], [`types::Stamp`],
/// [`types::LamportClock`], the [`types::PeerMessage`] enum, the
/// [`types::RequestPriority`] tie-break key, and
/// [`types::ProtocolError`].
pub use turnstile_core as types;

/// The shared token matrix (`turnstile-grid`).
///
/// [`grid::TokenGrid`] parses whitespace-delimited text with
/// out-of-band dimensions and renders back to space-joined lines.
pub use turnstile_grid as grid;

/// Palindrome detection and token marking (`turnstile-scan`).
///
/// [`scan::find_palindromes`] is the pure half of the stock
/// critical-section body; [`scan::mark_tokens`] is the mutating half.
pub use turnstile_scan as scan;

/// The mutual-exclusion engine (`turnstile-engine`).
///
/// [`engine::Coordinator`] for driving the protocol by hand,
/// [`engine::Simulation`] for running a full population.
pub use turnstile_engine as engine;

/// Common imports for typical Turnstile usage.
///
/// ```rust
/// use turnstile::prelude::*;
/// ```
pub mod prelude {
    // Core ids and errors
    pub use turnstile_core::{ProcessId, ProtocolError, Stamp};

    // Grid
    pub use turnstile_grid::{GridError, TokenGrid};

    // Engine
    pub use turnstile_engine::{
        ConfigError, PalindromeMarker, ProcessStats, RowReport, RowTask, RunOutcome, RunnerError,
        SimConfig, SimError, Simulation,
    };
}
