//! Bounded per-process mailboxes.

use crossbeam_channel::{bounded, Receiver, Sender};
use turnstile_core::PeerMessage;

/// Worst-case occupancy of one mailbox in a population of `total`.
///
/// Per peer: at most one unanswered `Request` (a requester blocks until
/// its cycle completes, and it cannot issue the next request before
/// this process consumed the previous one) plus at most one `Reply`
/// toward this process's open cycle, plus the launcher's final
/// `Shutdown`. Senders therefore never block on a live receiver.
pub(crate) fn capacity_for(total: u32) -> usize {
    let peers = total.saturating_sub(1) as usize;
    2 * peers + 1
}

/// A bounded mailbox sized for a population of `total` processes.
pub(crate) fn channel_for(total: u32) -> (Sender<PeerMessage>, Receiver<PeerMessage>) {
    bounded(capacity_for(total))
}
