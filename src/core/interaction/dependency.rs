//=========================================================================
// Dependency Slot
//=========================================================================
//
// Late-bound collaborator with bounded re-acquisition.
//
// A scene's camera may appear a few frames after the scene itself. The
// slot polls its source once per frame until the value arrives or the
// attempt budget runs out; then it logs once and stays empty, and every
// caller treats the missing value as a no-op.
//
//   Waiting ──acquired──> Ready ──detach()──> Waiting
//      └──budget spent──> GaveUp
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::{debug, error, trace};

//=== DependencySource ====================================================

/// Where a late-bound value comes from.
pub trait DependencySource<T>: Send {
    fn acquire(&mut self) -> Option<T>;
}

/// A value that is available immediately.
impl<T: Send> DependencySource<T> for Option<T> {
    fn acquire(&mut self) -> Option<T> {
        self.take()
    }
}

/// A value delivered later by another thread.
impl<T: Send> DependencySource<T> for Receiver<T> {
    fn acquire(&mut self) -> Option<T> {
        self.try_recv().ok()
    }
}

//=== SlotStatus ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Waiting { attempts: u32 },
    Ready,
    GaveUp,
}

//=== DependencySlot ======================================================

pub struct DependencySlot<T> {
    name: &'static str,
    value: Option<T>,
    source: Box<dyn DependencySource<T>>,
    status: SlotStatus,
    max_attempts: u32,
}

impl<T> DependencySlot<T> {
    pub fn new(name: &'static str, source: Box<dyn DependencySource<T>>, max_attempts: u32) -> Self {
        Self {
            name,
            value: None,
            source,
            status: SlotStatus::Waiting { attempts: 0 },
            max_attempts,
        }
    }

    /// One acquisition attempt; call once per frame.
    pub fn poll(&mut self) -> SlotStatus {
        let SlotStatus::Waiting { attempts } = self.status else {
            return self.status;
        };

        if let Some(value) = self.source.acquire() {
            debug!(target: "interaction", "{} acquired after {} attempt(s)", self.name, attempts + 1);
            self.value = Some(value);
            self.status = SlotStatus::Ready;
            return self.status;
        }

        let attempts = attempts + 1;
        if attempts >= self.max_attempts {
            error!(
                target: "interaction",
                "{} unavailable after {} attempts, interactions disabled",
                self.name,
                attempts
            );
            self.status = SlotStatus::GaveUp;
        } else {
            trace!(target: "interaction", "{} not ready ({}/{})", self.name, attempts, self.max_attempts);
            self.status = SlotStatus::Waiting { attempts };
        }
        self.status
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Removes the value and starts re-acquiring from the source.
    pub fn detach(&mut self) -> Option<T> {
        self.status = SlotStatus::Waiting { attempts: 0 };
        self.value.take()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
