//! Peer message vocabulary and the request-ordering key.

use crate::id::{ProcessId, Stamp};

/// A message delivered to a process's mailbox.
///
/// `Request` and `Reply` are the two protocol messages of the
/// Ricart–Agrawala exchange. `Shutdown` is the launcher's end-of-run
/// signal, broadcast only after every process has reported completion,
/// so a process still inside a request cycle treats it as a protocol
/// violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerMessage {
    /// Another process asks for the critical section.
    Request {
        /// The requesting process.
        from: ProcessId,
        /// Lamport stamp the request was issued with.
        stamp: Stamp,
    },
    /// One acknowledgment toward the receiver's open request cycle.
    ///
    /// Each peer sends exactly one per request it observes; a request
    /// cycle completes after collecting one from every other process.
    Reply {
        /// The acknowledging process.
        from: ProcessId,
    },
    /// End-of-run: stop serving peers and exit.
    Shutdown,
}

/// Total order on outstanding requests: stamp first, process id as the
/// tie-break. The smaller priority wins contention.
///
/// Field order matters: the derived `Ord` is lexicographic over
/// `(stamp, id)`, which is exactly the classical Ricart–Agrawala
/// comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestPriority {
    /// Lamport stamp the request was issued with.
    pub stamp: Stamp,
    /// The requesting process.
    pub id: ProcessId,
}

impl RequestPriority {
    /// Priority of a request issued by `id` at `stamp`.
    pub fn new(stamp: Stamp, id: ProcessId) -> Self {
        Self { stamp, id }
    }
}
