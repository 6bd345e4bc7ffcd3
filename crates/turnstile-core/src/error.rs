//! Protocol error types.
//!
//! Every variant here indicates a broken mutual-exclusion exchange, not
//! a recoverable runtime condition: the closed population always
//! replies exactly once per observed request, so violations are fatal
//! and surface to the launcher, which tears the run down.

use std::error::Error;
use std::fmt;

use crate::id::ProcessId;

/// A violation of the request/reply protocol observed by one process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    /// A reply arrived while no request cycle was open.
    UnexpectedReply {
        /// The peer that sent the stray reply.
        from: ProcessId,
    },
    /// The same peer replied twice within one request cycle.
    ///
    /// A cycle consumes exactly one reply per peer; a duplicate means a
    /// peer answered a single request more than once.
    DuplicateReply {
        /// The peer that replied twice.
        from: ProcessId,
    },
    /// Shutdown arrived while a request cycle was still open.
    ///
    /// The launcher broadcasts shutdown only after every process has
    /// reported completion, so this means completion accounting broke.
    ShutdownMidCycle,
    /// A peer's mailbox disconnected (its thread is gone).
    ///
    /// Surfacing this instead of retrying is what keeps a request cycle
    /// from spinning forever against a dead peer.
    PeerDisconnected,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedReply { from } => {
                write!(f, "reply from process {from} outside a request cycle")
            }
            Self::DuplicateReply { from } => {
                write!(f, "duplicate reply from process {from} in one request cycle")
            }
            Self::ShutdownMidCycle => write!(f, "shutdown received mid request cycle"),
            Self::PeerDisconnected => write!(f, "peer mailbox disconnected"),
        }
    }
}

impl Error for ProtocolError {}
