//=========================================================================
// Transition Lock
//=========================================================================
//
// Single gate serializing camera-state transitions.
//
// try_acquire() hands out a LockTicket; only release(ticket) opens the
// gate again. The ticket is neither Clone nor Copy, so whoever holds it
// is provably the one allowed to release. Conflicting requests are
// refused, never queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== LockTicket ==========================================================

/// Proof of holding the TransitionLock.
#[derive(Debug)]
#[must_use = "a dropped ticket leaves the transition lock held"]
pub struct LockTicket {
    reason: &'static str,
    epoch: u64,
}

impl LockTicket {
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

//=== TransitionLock ======================================================

pub struct TransitionLock {
    holder: Option<&'static str>,
    epoch: u64,
}

impl TransitionLock {
    pub fn new() -> Self {
        Self {
            holder: None,
            epoch: 0,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holder.is_some()
    }

    /// What the current holder is doing, if anyone holds the lock.
    pub fn holder(&self) -> Option<&'static str> {
        self.holder
    }

    pub fn try_acquire(&mut self, reason: &'static str) -> Option<LockTicket> {
        if let Some(holder) = self.holder {
            debug!(target: "interaction::lock", "{} refused: lock held by {}", reason, holder);
            return None;
        }

        self.epoch += 1;
        self.holder = Some(reason);
        debug!(target: "interaction::lock", "Acquired for {}", reason);
        Some(LockTicket {
            reason,
            epoch: self.epoch,
        })
    }

    pub fn release(&mut self, ticket: LockTicket) {
        if ticket.epoch != self.epoch || self.holder.is_none() {
            warn!(
                target: "interaction::lock",
                "Stale ticket for {} ignored",
                ticket.reason
            );
            return;
        }
        self.holder = None;
        debug!(target: "interaction::lock", "Released by {}", ticket.reason);
    }
}

impl Default for TransitionLock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused() {
        let mut lock = TransitionLock::new();
        let ticket = lock.try_acquire("pinch").unwrap();
        assert!(lock.is_locked());
        assert_eq!(lock.holder(), Some("pinch"));
        assert!(lock.try_acquire("double tap").is_none());

        lock.release(ticket);
        assert!(!lock.is_locked());
        let again = lock.try_acquire("double tap").unwrap();
        assert_eq!(again.reason(), "double tap");
        lock.release(again);
    }

    #[test]
    fn stale_ticket_does_not_open_lock() {
        let mut lock = TransitionLock::new();
        let held = lock.try_acquire("pinch").unwrap();

        lock.release(LockTicket { reason: "stale", epoch: 0 });
        assert!(lock.is_locked());

        lock.release(held);
        assert!(!lock.is_locked());
    }
}
