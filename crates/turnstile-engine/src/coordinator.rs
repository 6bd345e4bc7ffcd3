//! Per-process Ricart–Agrawala coordinator.
//!
//! Each [`Coordinator`] is owned exclusively by its process's thread
//! (moved in via `thread::spawn`). No locks on the protocol path:
//! requests and replies arrive via the process's bounded mailbox, and
//! outgoing messages go through the shared [`PeerRegistry`].
//!
//! A request cycle consumes exactly N−1 replies, one per peer. While
//! waiting, the coordinator keeps servicing incoming requests with the
//! classical decision rule: reply immediately unless this process wants
//! the section and its own `(stamp, id)` priority orders strictly
//! before the incoming one, in which case the reply is withheld until
//! [`release()`](Coordinator::release).

use smallvec::SmallVec;

use crossbeam_channel::Receiver;
use turnstile_core::{
    LamportClock, PeerMessage, ProcessId, ProtocolError, RequestPriority, Stamp,
};

use crate::registry::PeerRegistry;
use crate::report::ProcessStats;

/// State machine granting one process serialized access to the shared
/// grid.
///
/// # Example
///
/// ```ignore
/// let mut coordinator = Coordinator::new(id, registry, mailbox);
/// coordinator.request()?;   // blocks until all peers acknowledged
/// // ... mutate the shared resource ...
/// coordinator.release()?;   // flush replies deferred while holding
/// ```
pub struct Coordinator {
    id: ProcessId,
    registry: PeerRegistry,
    mailbox: Receiver<PeerMessage>,
    clock: LamportClock,
    wants: bool,
    /// Priority of the open request, `None` outside a cycle.
    own: Option<RequestPriority>,
    /// Peers whose replies are withheld until release.
    deferred: SmallVec<[ProcessId; 4]>,
    stats: ProcessStats,
}

impl Coordinator {
    /// A coordinator for `id`, receiving on its own `mailbox` and
    /// signaling peers through `registry`.
    pub fn new(id: ProcessId, registry: PeerRegistry, mailbox: Receiver<PeerMessage>) -> Self {
        Self {
            id,
            registry,
            mailbox,
            clock: LamportClock::new(),
            wants: false,
            own: None,
            deferred: SmallVec::new(),
            stats: ProcessStats::default(),
        }
    }

    /// This coordinator's process id.
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Protocol counters accumulated so far.
    pub fn stats(&self) -> &ProcessStats {
        &self.stats
    }

    /// Acquire the critical section.
    ///
    /// Ticks the clock, broadcasts the stamped request, then services
    /// the mailbox until exactly N−1 distinct replies have arrived.
    /// With N = 1 the grant is immediate. Returns once the caller may
    /// safely mutate the shared resource.
    ///
    /// # Errors
    ///
    /// Protocol violations (duplicate reply, shutdown mid-cycle) and
    /// disconnected peers are fatal; the caller must tear the run down
    /// rather than retry.
    pub fn request(&mut self) -> Result<(), ProtocolError> {
        let stamp = self.clock.tick();
        self.wants = true;
        self.own = Some(RequestPriority::new(stamp, self.id));
        self.registry.broadcast_request(self.id, stamp)?;

        let needed = self.registry.total() as usize - 1;
        let mut replied: SmallVec<[ProcessId; 8]> = SmallVec::new();
        while replied.len() < needed {
            match self.recv()? {
                PeerMessage::Request { from, stamp } => self.on_request(from, stamp)?,
                PeerMessage::Reply { from } => {
                    if replied.contains(&from) {
                        return Err(ProtocolError::DuplicateReply { from });
                    }
                    replied.push(from);
                    self.stats.replies_received += 1;
                }
                PeerMessage::Shutdown => return Err(ProtocolError::ShutdownMidCycle),
            }
        }
        self.stats.cycles += 1;
        Ok(())
    }

    /// Leave the critical section.
    ///
    /// Clears the want flag, ticks the clock, and sends every reply
    /// deferred while this process held the section.
    pub fn release(&mut self) -> Result<(), ProtocolError> {
        self.wants = false;
        self.own = None;
        self.clock.tick();
        for to in std::mem::take(&mut self.deferred) {
            self.registry.reply_to(to, self.id)?;
        }
        Ok(())
    }

    /// Serve peers after this process finished its rows.
    ///
    /// A finished process no longer contends, so every incoming request
    /// gets an immediate reply; unfinished peers never starve waiting
    /// on it. Returns on the launcher's `Shutdown` broadcast. A reply
    /// in this mode has no open cycle to count against and is fatal.
    pub fn serve_until_shutdown(&mut self) -> Result<(), ProtocolError> {
        loop {
            match self.recv()? {
                PeerMessage::Request { from, stamp } => self.on_request(from, stamp)?,
                PeerMessage::Reply { from } => {
                    return Err(ProtocolError::UnexpectedReply { from })
                }
                PeerMessage::Shutdown => return Ok(()),
            }
        }
    }

    /// Decide one incoming request: immediate reply, or defer.
    ///
    /// The incoming stamp is witnessed into the clock first, so this
    /// process's next request always orders after everything it has
    /// seen.
    fn on_request(&mut self, from: ProcessId, stamp: Stamp) -> Result<(), ProtocolError> {
        self.clock.witness(stamp);
        self.stats.requests_served += 1;
        let theirs = RequestPriority::new(stamp, from);
        let ours_first = self.wants && self.own.is_some_and(|own| own < theirs);
        if ours_first {
            self.deferred.push(from);
            self.stats.replies_deferred += 1;
            Ok(())
        } else {
            self.registry.reply_to(from, self.id)
        }
    }

    fn recv(&mut self) -> Result<PeerMessage, ProtocolError> {
        self.mailbox
            .recv()
            .map_err(|_| ProtocolError::PeerDisconnected)
    }
}
