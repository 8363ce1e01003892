//=========================================================================
// Double-Tap Detection
//=========================================================================
//
// Two-tap state machine with a time/distance window and a cooldown.
//
// States:
//   Idle ──tap──> Pending{time,pos} ──tap in window──> Detected → Idle
//                     │
//                     └──stale/too far──> Pending{new tap}
//
// Cooldown: after a detection, further detections are blocked for
// `cooldown` seconds. Exiting Zoom may bypass it once
// `zoom_exit_bypass` seconds have passed, so backing out of a close-up
// stays responsive while re-entering is throttled.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, info, warn};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::interaction::{TransitionContext, TransitionOutcome};
use crate::core::mode::InteractionMode;

//=== DoubleTapConfig =====================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DoubleTapConfig {
    /// Maximum seconds between the two taps.
    pub time_window: f64,
    /// Maximum pixels between the two taps.
    pub distance_threshold: f32,
    /// Seconds after a detection during which new detections are refused.
    pub cooldown: f64,
    /// Seconds after which a zoom-exit double tap ignores the cooldown.
    pub zoom_exit_bypass: f64,
}

impl Default for DoubleTapConfig {
    fn default() -> Self {
        Self {
            time_window: 0.3,
            distance_threshold: 50.0,
            cooldown: 0.8,
            zoom_exit_bypass: 0.2,
        }
    }
}

//=== PendingTap ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTap {
    time: f64,
    position: Vec2,
}

//=== DoubleTapDetector ===================================================

pub struct DoubleTapDetector {
    config: DoubleTapConfig,
    pending: Option<PendingTap>,
    last_detection: Option<f64>,
}

impl DoubleTapDetector {
    pub fn new(config: DoubleTapConfig) -> Self {
        Self {
            config,
            pending: None,
            last_detection: None,
        }
    }

    //--- Detection --------------------------------------------------------

    /// Feeds one tap; returns `true` when it completes a double tap.
    ///
    /// `mode` selects the cooldown rule: in Zoom the shorter bypass window
    /// applies.
    pub fn check_for_double_tap(&mut self, position: Vec2, now: f64, mode: InteractionMode) -> bool {
        if self.in_cooldown(now, mode) {
            debug!(target: "gesture::double_tap", "Tap ignored during cooldown");
            return false;
        }

        if let Some(pending) = self.pending {
            let elapsed = now - pending.time;
            let distance = pending.position.distance(position);

            if elapsed <= self.config.time_window && distance <= self.config.distance_threshold {
                self.pending = None;
                self.last_detection = Some(now);
                info!(
                    target: "gesture::double_tap",
                    "Double tap detected ({:.2}s, {:.0}px)",
                    elapsed,
                    distance
                );
                return true;
            }

            debug!(
                target: "gesture::double_tap",
                "Pending tap discarded ({:.2}s, {:.0}px)",
                elapsed,
                distance
            );
        }

        self.pending = Some(PendingTap { time: now, position });
        false
    }

    fn in_cooldown(&self, now: f64, mode: InteractionMode) -> bool {
        let Some(last) = self.last_detection else {
            return false;
        };
        let since = now - last;
        if since >= self.config.cooldown {
            return false;
        }
        !(mode == InteractionMode::Zoom && since >= self.config.zoom_exit_bypass)
    }

    /// Forgets any half-finished double tap.
    ///
    /// Called on mode changes so a tap from before a transition never
    /// pairs with one after it.
    pub fn reset_pending(&mut self) {
        self.pending = None;
    }

    pub fn has_pending_tap(&self) -> bool {
        self.pending.is_some()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes a detected double tap by interaction mode.
    ///
    /// - Exploration: zoom onto the object nearest the tap.
    /// - Zoom: return to Exploration with the fast transition profile.
    /// - Initial: ignored.
    ///
    /// The TransitionLock is acquired before either path; every early exit
    /// releases it here. A started transition releases it on completion.
    pub fn handle_double_tap(&self, position: Vec2, ctx: &mut TransitionContext<'_>) -> TransitionOutcome {
        let mode = ctx.modes.current_mode();
        if mode == InteractionMode::Initial {
            debug!(target: "gesture::double_tap", "Double tap ignored in Initial mode");
            return TransitionOutcome::Ignored;
        }

        let Some(ticket) = ctx.lock.try_acquire("double tap") else {
            return TransitionOutcome::Refused;
        };

        let Some(camera) = ctx.camera.as_deref() else {
            warn!(target: "gesture::double_tap", "Double tap without camera controller");
            ctx.lock.release(ticket);
            return TransitionOutcome::Aborted;
        };

        if mode == InteractionMode::Zoom {
            let fast = camera.config().fast_duration;
            return ctx.zoom_out(ticket, Some(fast));
        }

        match camera.find_closest_object_to_screen_point(position, ctx.entities) {
            Some(target) => ctx.zoom_into(target, ticket, None),
            None => {
                debug!(target: "gesture::double_tap", "No object near double tap");
                ctx.lock.release(ticket);
                TransitionOutcome::Aborted
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
