//! Core types for the Turnstile mutual-exclusion simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! process identity, the Lamport clock, the peer message vocabulary,
//! and the protocol error types shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod id;
pub mod message;

pub use clock::LamportClock;
pub use error::ProtocolError;
pub use id::{ProcessId, Stamp};
pub use message::{PeerMessage, RequestPriority};
