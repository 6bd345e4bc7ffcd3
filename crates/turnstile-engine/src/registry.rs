//! Fixed-size registry of peer mailbox senders.

use crossbeam_channel::{Receiver, Sender};

use turnstile_core::{PeerMessage, ProcessId, ProtocolError, Stamp};

use crate::mailbox;

/// Startup-built registry holding one mailbox sender per process.
///
/// Every process thread owns a clone, so it can signal any peer but
/// never touch peer state. The registry is built once, before any
/// thread starts, and its size never changes during a run.
#[derive(Clone)]
pub struct PeerRegistry {
    senders: Vec<Sender<PeerMessage>>,
}

impl PeerRegistry {
    /// Build the registry and the matching mailbox receivers for a
    /// population of `total` processes.
    ///
    /// Receiver `i` belongs to `ProcessId(i + 1)`; each is moved into
    /// its process's coordinator while the senders stay shared here.
    pub fn build(total: u32) -> (Self, Vec<Receiver<PeerMessage>>) {
        let mut senders = Vec::with_capacity(total as usize);
        let mut receivers = Vec::with_capacity(total as usize);
        for _ in 0..total {
            let (tx, rx) = mailbox::channel_for(total);
            senders.push(tx);
            receivers.push(rx);
        }
        (Self { senders }, receivers)
    }

    #[cfg(test)]
    pub(crate) fn from_senders(senders: Vec<Sender<PeerMessage>>) -> Self {
        Self { senders }
    }

    /// Number of registered processes.
    pub fn total(&self) -> u32 {
        self.senders.len() as u32
    }

    /// Deliver a request from `from` to every other process.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not a registered id.
    pub(crate) fn broadcast_request(
        &self,
        from: ProcessId,
        stamp: Stamp,
    ) -> Result<(), ProtocolError> {
        assert!(from.index() < self.senders.len(), "unregistered sender id");
        for (index, sender) in self.senders.iter().enumerate() {
            if index == from.index() {
                continue;
            }
            sender
                .send(PeerMessage::Request { from, stamp })
                .map_err(|_| ProtocolError::PeerDisconnected)?;
        }
        Ok(())
    }

    /// Deliver one reply from `from` to `to`'s mailbox.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not a registered id.
    pub(crate) fn reply_to(&self, to: ProcessId, from: ProcessId) -> Result<(), ProtocolError> {
        self.senders[to.index()]
            .send(PeerMessage::Reply { from })
            .map_err(|_| ProtocolError::PeerDisconnected)
    }

    /// Best-effort shutdown broadcast to every mailbox.
    ///
    /// Mailboxes of processes that already exited are skipped silently;
    /// the launcher calls this during teardown on both the clean and the
    /// failure path.
    pub(crate) fn shutdown_all(&self) {
        for sender in &self.senders {
            let _ = sender.send(PeerMessage::Shutdown);
        }
    }
}
