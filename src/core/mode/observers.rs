//=========================================================================
// Mode Observers
//=========================================================================
//
// Subscriber registry for mode-change notifications.
//
// Architecture:
//   GameModeManager ──notify()──> Sender ─┬─> Receiver (subscriber A)
//                                         └─> Receiver (subscriber B)
//
// Each subscriber owns the receiving end of its own unbounded channel.
// Dropping the receiver is enough to stop notifications; the dead sender
// is pruned on the next notify().
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use super::InteractionMode;

//=== ModeChanged =========================================================

/// Emitted after every successful mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChanged {
    pub previous: InteractionMode,
    pub current: InteractionMode,
}

//=== ModeSubscription ====================================================

/// Handle returned by `subscribe()`.
///
/// Keep `id` to unsubscribe explicitly; drain `receiver` each frame.
pub struct ModeSubscription {
    pub id: SubscriberId,
    pub receiver: Receiver<ModeChanged>,
}

impl ModeSubscription {
    /// Drains every pending notification.
    pub fn drain(&self) -> impl Iterator<Item = ModeChanged> + '_ {
        self.receiver.try_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

//=== ModeObservers =======================================================

pub(super) struct ModeObservers {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Sender<ModeChanged>)>,
}

impl ModeObservers {
    pub(super) fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub(super) fn subscribe(&mut self) -> ModeSubscription {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = unbounded();
        self.subscribers.push((id, sender));
        ModeSubscription { id, receiver }
    }

    pub(super) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        before != self.subscribers.len()
    }

    /// Delivers `change` to every live subscriber, dropping dead ones.
    pub(super) fn notify(&mut self, change: ModeChanged) {
        self.subscribers.retain(|(id, sender)| {
            let alive = sender.send(change).is_ok();
            if !alive {
                trace!(target: "mode", "Pruned dropped subscriber {:?}", id);
            }
            alive
        });
    }

    pub(super) fn len(&self) -> usize {
        self.subscribers.len()
    }
}
