//! Mutual-exclusion engine for the Turnstile simulator.
//!
//! Provides the per-process Ricart–Agrawala [`Coordinator`], the
//! [`RowTask`] seam executed while a process holds the critical
//! section, and the top-level [`Simulation`] launcher that spawns one
//! thread per process, streams row reports, and joins the run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod coordinator;
mod mailbox;
pub mod registry;
pub mod report;
pub mod runner;
pub mod shared;
pub mod sim;
pub mod task;

pub use config::{ConfigError, SimConfig};
pub use coordinator::Coordinator;
pub use registry::PeerRegistry;
pub use report::{ProcessStats, RowReport};
pub use runner::RunnerError;
pub use shared::SharedGrid;
pub use sim::{RunOutcome, SimError, Simulation};
pub use task::{PalindromeMarker, RowOutcome, RowTask};
