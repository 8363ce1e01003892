//=========================================================================
// Camera Transitions
//=========================================================================
//
// Paired mode + camera changes, started under a TransitionLock ticket.
//
// Every entry point takes the ticket by value. On success the camera's
// running transition holds it until tick() reports completion; on any
// validation failure it is released before returning. The mode and the
// camera state change together, before the first tween tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::lock::{LockTicket, TransitionLock};
use crate::core::camera::{CameraController, CameraState};
use crate::core::mode::{GameModeManager, InteractionMode};
use crate::core::scene::{FocusTarget, SceneEntity};

//=== TransitionOutcome ===================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Mode and camera state changed; the tween is running.
    Started,
    /// Not applicable in the current mode.
    Ignored,
    /// The TransitionLock was already held.
    Refused,
    /// Validation failed; nothing changed and the lock was released.
    Aborted,
}

impl TransitionOutcome {
    pub fn is_started(self) -> bool {
        self == Self::Started
    }
}

//=== TransitionContext ===================================================

/// Borrowed view of everything a transition touches.
pub struct TransitionContext<'a> {
    pub modes: &'a mut GameModeManager,
    pub lock: &'a mut TransitionLock,
    pub camera: Option<&'a mut CameraController>,
    pub entities: &'a [SceneEntity],
}

impl<'a> TransitionContext<'a> {
    /// Focuses `target`: Exploration → Zoom, or a refocus within Zoom.
    ///
    /// `duration` overrides the camera's default for this transition.
    pub fn zoom_into(
        &mut self,
        target: FocusTarget,
        ticket: LockTicket,
        duration: Option<f32>,
    ) -> TransitionOutcome {
        let Some(camera) = self.camera.as_deref_mut() else {
            warn!(target: "interaction", "Zoom aborted: no camera");
            self.lock.release(ticket);
            return TransitionOutcome::Aborted;
        };

        match self.modes.current_mode() {
            InteractionMode::Exploration => {
                if self.modes.enter_zoom_mode().is_err() {
                    self.lock.release(ticket);
                    return TransitionOutcome::Aborted;
                }
            }
            InteractionMode::Zoom => {
                debug!(target: "interaction", "Refocusing on {}", target.name);
            }
            InteractionMode::Initial => {
                warn!(target: "interaction", "Zoom aborted: still in Initial mode");
                self.lock.release(ticket);
                return TransitionOutcome::Aborted;
            }
        }

        camera.set_focus_target(target);
        start_camera_state(camera, self.lock, CameraState::Focus, ticket, duration)
    }

    /// Leaves Zoom for Exploration and animates back to Overview.
    pub fn zoom_out(&mut self, ticket: LockTicket, duration: Option<f32>) -> TransitionOutcome {
        let Some(camera) = self.camera.as_deref_mut() else {
            warn!(target: "interaction", "Zoom-out aborted: no camera");
            self.lock.release(ticket);
            return TransitionOutcome::Aborted;
        };

        if self.modes.return_to_exploration_mode().is_err() {
            self.lock.release(ticket);
            return TransitionOutcome::Aborted;
        }

        start_camera_state(camera, self.lock, CameraState::Overview, ticket, duration)
    }

    /// Forces Zoom on a restored target, whatever the current mode.
    pub fn force_focus(&mut self, target: FocusTarget, ticket: LockTicket) -> TransitionOutcome {
        let Some(camera) = self.camera.as_deref_mut() else {
            self.lock.release(ticket);
            return TransitionOutcome::Aborted;
        };

        self.modes.force_enter_zoom_mode();
        camera.set_focus_target(target);
        start_camera_state(camera, self.lock, CameraState::Focus, ticket, None)
    }

    /// Returns the camera to Overview, leaving Zoom if needed.
    pub fn fall_back_to_overview(&mut self, ticket: LockTicket) -> TransitionOutcome {
        let Some(camera) = self.camera.as_deref_mut() else {
            self.lock.release(ticket);
            return TransitionOutcome::Aborted;
        };

        if self.modes.current_mode() == InteractionMode::Zoom {
            // Cannot fail: the mode was just checked.
            let _ = self.modes.return_to_exploration_mode();
        }
        start_camera_state(camera, self.lock, CameraState::Overview, ticket, None)
    }
}

//=== Helpers =============================================================

fn start_camera_state(
    camera: &mut CameraController,
    lock: &mut TransitionLock,
    state: CameraState,
    ticket: LockTicket,
    duration: Option<f32>,
) -> TransitionOutcome {
    if let Some(seconds) = duration {
        camera.set_transition_duration(seconds);
    }
    let switched = camera.switch_state(state);
    camera.reset_transition_duration();

    if switched.is_err() {
        lock.release(ticket);
        return TransitionOutcome::Aborted;
    }
    if let Err(ticket) = camera.hold_lock_until_complete(ticket) {
        lock.release(ticket);
    }
    TransitionOutcome::Started
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::CameraConfig;
    use crate::core::scene::ObjectType;
    use glam::Vec3;

    struct Fixture {
        modes: GameModeManager,
        lock: TransitionLock,
        camera: CameraController,
    }

    impl Fixture {
        fn new(mode: InteractionMode) -> Self {
            let mut modes = GameModeManager::new();
            if mode != InteractionMode::Initial {
                modes.start_exploration_mode().unwrap();
            }
            if mode == InteractionMode::Zoom {
                modes.enter_zoom_mode().unwrap();
            }
            Self {
                modes,
                lock: TransitionLock::new(),
                camera: CameraController::new(CameraConfig::default()),
            }
        }

        fn ctx(&mut self) -> TransitionContext<'_> {
            TransitionContext {
                modes: &mut self.modes,
                lock: &mut self.lock,
                camera: Some(&mut self.camera),
                entities: &[],
            }
        }
    }

    fn vase() -> FocusTarget {
        FocusTarget {
            name: "vase".into(),
            position: Vec3::new(0.0, 1.0, 0.0),
            object_type: ObjectType::new("amphora"),
        }
    }

    #[test]
    fn zoom_into_changes_mode_and_camera_together() {
        let mut fx = Fixture::new(InteractionMode::Exploration);
        let ticket = fx.lock.try_acquire("test").unwrap();
        assert_eq!(fx.ctx().zoom_into(vase(), ticket, None), TransitionOutcome::Started);

        assert_eq!(fx.modes.current_mode(), InteractionMode::Zoom);
        assert_eq!(fx.camera.state(), CameraState::Focus);
        assert!(fx.lock.is_locked(), "held until the tween completes");
    }

    #[test]
    fn zoom_into_from_initial_releases_lock() {
        let mut fx = Fixture::new(InteractionMode::Initial);
        let ticket = fx.lock.try_acquire("test").unwrap();
        assert_eq!(fx.ctx().zoom_into(vase(), ticket, None), TransitionOutcome::Aborted);
        assert!(!fx.lock.is_locked());
        assert_eq!(fx.camera.state(), CameraState::Overview);
    }

    #[test]
    fn zoom_out_requires_zoom_mode() {
        let mut fx = Fixture::new(InteractionMode::Exploration);
        let ticket = fx.lock.try_acquire("test").unwrap();
        assert_eq!(fx.ctx().zoom_out(ticket, None), TransitionOutcome::Aborted);
        assert!(!fx.lock.is_locked());
    }

    #[test]
    fn missing_camera_aborts() {
        let mut modes = GameModeManager::new();
        modes.start_exploration_mode().unwrap();
        let mut lock = TransitionLock::new();
        let ticket = lock.try_acquire("test").unwrap();

        let mut ctx = TransitionContext {
            modes: &mut modes,
            lock: &mut lock,
            camera: None,
            entities: &[],
        };
        assert_eq!(ctx.zoom_into(vase(), ticket, None), TransitionOutcome::Aborted);
        assert!(!lock.is_locked());
        assert_eq!(modes.current_mode(), InteractionMode::Exploration);
    }

    #[test]
    fn completion_hands_ticket_back() {
        let mut fx = Fixture::new(InteractionMode::Zoom);
        let ticket = fx.lock.try_acquire("test").unwrap();
        fx.ctx().zoom_out(ticket, Some(0.2));

        let finished = fx.camera.tick(0.2).expect("fast transition finished");
        fx.lock.release(finished.ticket.unwrap());
        assert!(!fx.lock.is_locked());
        assert_eq!(fx.modes.current_mode(), InteractionMode::Exploration);
    }
}
