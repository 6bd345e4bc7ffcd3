//! Shared token matrix for the Turnstile simulator.
//!
//! [`TokenGrid`] is the one shared mutable resource of a run: a
//! `rows × cols` matrix of string tokens that every process reads and
//! the current critical-section holder mutates. The grid itself has no
//! concurrency control; serialization is the coordinator's guarantee,
//! and the engine wraps the grid in an owner handle whose mutation
//! window is the held critical section.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;

pub use grid::{GridError, TokenGrid};
