//=========================================================================
// Game Mode Manager
//=========================================================================
//
// Guarded three-mode interaction state machine.
//
// Transition table:
//
//   Initial ──start_exploration──> Exploration ──enter_zoom──> Zoom
//      ^                                ^                        │
//      │                                └──return_to_exploration─┘
//      └────────────── exit_to_initial (from any mode) ──────────────
//
//   force_enter_zoom: any mode → Zoom (focus restoration only)
//
// A rejected transition leaves the mode untouched, logs a warning and
// returns ModeError. The manager never touches the camera; observers
// react to ModeChanged notifications.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};
use thiserror::Error;

//=== Module Declarations =================================================

mod observers;

//=== Public API ==========================================================

pub use observers::{ModeChanged, ModeSubscription, SubscriberId};

use observers::ModeObservers;

//=== InteractionMode =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    /// Attract screen; gestures are ignored.
    #[default]
    Initial,
    /// Browsing the exhibit from the overview vantage.
    Exploration,
    /// Close-up on one artefact.
    Zoom,
}

//=== ModeError ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("cannot {requested} while in {current:?} mode")]
    InvalidTransition {
        current: InteractionMode,
        requested: &'static str,
    },
}

//=== GameModeManager =====================================================

pub struct GameModeManager {
    current: InteractionMode,
    observers: ModeObservers,
}

impl GameModeManager {
    pub fn new() -> Self {
        Self {
            current: InteractionMode::Initial,
            observers: ModeObservers::new(),
        }
    }

    pub fn current_mode(&self) -> InteractionMode {
        self.current
    }

    //--- Guarded Transitions ----------------------------------------------

    /// Initial → Exploration.
    pub fn start_exploration_mode(&mut self) -> Result<(), ModeError> {
        self.guarded(InteractionMode::Initial, InteractionMode::Exploration, "start exploration")
    }

    /// Exploration → Zoom.
    pub fn enter_zoom_mode(&mut self) -> Result<(), ModeError> {
        self.guarded(InteractionMode::Exploration, InteractionMode::Zoom, "enter zoom")
    }

    /// Zoom → Exploration.
    pub fn return_to_exploration_mode(&mut self) -> Result<(), ModeError> {
        self.guarded(InteractionMode::Zoom, InteractionMode::Exploration, "return to exploration")
    }

    //--- Unconditional Transitions ----------------------------------------

    /// Enters Zoom from any mode.
    ///
    /// Reserved for focus restoration after a scene reload, where the
    /// previous mode is whatever the freshly loaded scene started in.
    pub fn force_enter_zoom_mode(&mut self) {
        if self.current != InteractionMode::Zoom {
            info!(target: "mode", "Forcing Zoom from {:?}", self.current);
        }
        self.set(InteractionMode::Zoom);
    }

    /// Returns to Initial from any mode.
    pub fn exit_to_initial_mode(&mut self) {
        self.set(InteractionMode::Initial);
    }

    //--- Observers --------------------------------------------------------

    pub fn subscribe(&mut self) -> ModeSubscription {
        self.observers.subscribe()
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn guarded(
        &mut self,
        from: InteractionMode,
        to: InteractionMode,
        requested: &'static str,
    ) -> Result<(), ModeError> {
        if self.current != from {
            let error = ModeError::InvalidTransition {
                current: self.current,
                requested,
            };
            warn!(target: "mode", "Rejected: {}", error);
            return Err(error);
        }
        self.set(to);
        Ok(())
    }

    fn set(&mut self, next: InteractionMode) {
        let previous = self.current;
        if previous == next {
            return;
        }
        self.current = next;
        info!(target: "mode", "{:?} → {:?}", previous, next);
        self.observers.notify(ModeChanged {
            previous,
            current: next,
        });
    }
}

impl Default for GameModeManager {
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
    use InteractionMode::*;

    fn manager_in(mode: InteractionMode) -> GameModeManager {
        let mut manager = GameModeManager::new();
        match mode {
            Initial => {}
            Exploration => manager.start_exploration_mode().unwrap(),
            Zoom => {
                manager.start_exploration_mode().unwrap();
                manager.enter_zoom_mode().unwrap();
            }
        }
        manager
    }

    //=====================================================================
    // Transition Table
    //=====================================================================

    #[test]
    fn starts_in_initial() {
        assert_eq!(GameModeManager::new().current_mode(), Initial);
    }

    #[test]
    fn guarded_transitions_follow_table() {
        type Op = fn(&mut GameModeManager) -> Result<(), ModeError>;
        let ops: [(Op, InteractionMode, InteractionMode); 3] = [
            (GameModeManager::start_exploration_mode, Initial, Exploration),
            (GameModeManager::enter_zoom_mode, Exploration, Zoom),
            (GameModeManager::return_to_exploration_mode, Zoom, Exploration),
        ];

        for (op, from, to) in ops {
            for start in [Initial, Exploration, Zoom] {
                let mut manager = manager_in(start);
                let result = op(&mut manager);
                if start == from {
                    assert!(result.is_ok(), "{:?} should allow transition", start);
                    assert_eq!(manager.current_mode(), to);
                } else {
                    assert!(result.is_err(), "{:?} should reject transition", start);
                    assert_eq!(manager.current_mode(), start, "rejection must not mutate");
                }
            }
        }
    }

    #[test]
    fn unconditional_transitions_always_succeed() {
        for start in [Initial, Exploration, Zoom] {
            let mut manager = manager_in(start);
            manager.exit_to_initial_mode();
            assert_eq!(manager.current_mode(), Initial);

            let mut manager = manager_in(start);
            manager.force_enter_zoom_mode();
            assert_eq!(manager.current_mode(), Zoom);
        }
    }

    #[test]
    fn error_names_current_mode() {
        let mut manager = GameModeManager::new();
        let err = manager.enter_zoom_mode().unwrap_err();
        assert_eq!(
            err,
            ModeError::InvalidTransition {
                current: Initial,
                requested: "enter zoom"
            }
        );
    }

    //=====================================================================
    // Observer Tests
    //=====================================================================

    #[test]
    fn subscribers_receive_changes() {
        let mut manager = GameModeManager::new();
        let sub = manager.subscribe();

        manager.start_exploration_mode().unwrap();
        manager.enter_zoom_mode().unwrap();
        let _ = manager.start_exploration_mode();

        let changes: Vec<_> = sub.drain().collect();
        assert_eq!(
            changes,
            vec![
                ModeChanged { previous: Initial, current: Exploration },
                ModeChanged { previous: Exploration, current: Zoom },
            ]
        );
    }

    #[test]
    fn unchanged_mode_is_not_announced() {
        let mut manager = manager_in(Zoom);
        let sub = manager.subscribe();
        manager.force_enter_zoom_mode();
        assert_eq!(sub.drain().count(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut manager = GameModeManager::new();
        let sub = manager.subscribe();
        assert!(manager.unsubscribe(sub.id));
        assert!(!manager.unsubscribe(sub.id));

        manager.start_exploration_mode().unwrap();
        assert_eq!(sub.drain().count(), 0);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let mut manager = GameModeManager::new();
        let keep = manager.subscribe();
        drop(manager.subscribe());
        assert_eq!(manager.subscriber_count(), 2);

        manager.start_exploration_mode().unwrap();
        assert_eq!(manager.subscriber_count(), 1);
        assert_eq!(keep.drain().count(), 1);
    }
}
