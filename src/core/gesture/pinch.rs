//=========================================================================
// Pinch Detection
//=========================================================================
//
// Two-finger pinch recognizer.
//
// Session lifecycle:
//   start_pinch() / force_start_pinch() → update_pinch()* → end_pinch()
//                                        ↘ check_auto_trigger()
//                                        ↘ cancel_pinch()
//
// Two rules can resolve a pinch before the fingers lift:
// - early detection: |Δdistance| ≥ priority_threshold after grace_period.
//   Tells the arbitrator the gesture is definitely a pinch.
// - auto trigger: contact held ≥ auto_trigger_hold with
//   |Δdistance| ≥ auto_trigger_min_change. Produces a result directly.
// Both are tunable through PinchConfig; neither subsumes the other.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, info, trace};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::input::TouchPhase;

//=== PinchConfig =========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Minimum |Δdistance| (pixels) for a pinch to be valid on release.
    pub min_distance_change: f32,
    /// |Δdistance| that marks the gesture as a pinch for arbitration.
    pub priority_threshold: f32,
    /// Seconds after start before early detection may fire.
    pub grace_period: f64,
    /// Seconds a two-finger contact must be held before auto trigger.
    pub auto_trigger_hold: f64,
    /// Minimum |Δdistance| for auto trigger.
    pub auto_trigger_min_change: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            min_distance_change: 5.0,
            priority_threshold: 10.0,
            grace_period: 0.05,
            auto_trigger_hold: 0.6,
            auto_trigger_min_change: 2.0,
        }
    }
}

//=== Result Types ========================================================

/// Pinch-out: fingers separating. Pinch-in: fingers approaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinchDirection {
    In,
    Out,
}

/// Per-frame pinch measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchUpdate {
    /// `true` only on the frame the priority threshold is first crossed.
    pub has_early_detection: bool,
    pub current_distance: f32,
    pub distance_change: f32,
}

/// Outcome of a pinch session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchResult {
    pub is_valid: bool,
    pub direction: PinchDirection,
    pub distance_change: f32,
    pub pinch_center: Vec2,
}

impl PinchResult {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            direction: PinchDirection::In,
            distance_change: 0.0,
            pinch_center: Vec2::ZERO,
        }
    }

    fn direction_of(change: f32) -> PinchDirection {
        if change > 0.0 {
            PinchDirection::Out
        } else {
            PinchDirection::In
        }
    }
}

//=== PinchSession ========================================================

#[derive(Debug, Clone, Copy)]
struct PinchSession {
    start_distance: f32,
    start_time: f64,
    current_distance: f32,
    center: Vec2,
    early_detected: bool,
    resolved: bool,
}

impl PinchSession {
    fn change(&self) -> f32 {
        self.current_distance - self.start_distance
    }
}

//=== PinchDetectionSystem ================================================

pub struct PinchDetectionSystem {
    config: PinchConfig,
    session: Option<PinchSession>,
}

impl PinchDetectionSystem {
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    //--- Session Control --------------------------------------------------

    /// Phase-gated start: only opens a session when the second contact
    /// is in its `Began` phase. Returns whether a session was opened.
    pub fn start_pinch(&mut self, a: Vec2, b: Vec2, second_phase: TouchPhase, now: f64) -> bool {
        if second_phase != TouchPhase::Began || self.session.is_some() {
            return false;
        }
        self.open(a, b, now);
        true
    }

    /// Opens a session regardless of touch phases.
    ///
    /// Used the instant a second finger is seen, even if the platform
    /// reported it mid-frame with a phase other than `Began`.
    pub fn force_start_pinch(&mut self, a: Vec2, b: Vec2, now: f64) {
        debug!(target: "gesture::pinch", "Pinch force-started");
        self.open(a, b, now);
    }

    fn open(&mut self, a: Vec2, b: Vec2, now: f64) {
        let distance = a.distance(b);
        self.session = Some(PinchSession {
            start_distance: distance,
            start_time: now,
            current_distance: distance,
            center: (a + b) * 0.5,
            early_detected: false,
            resolved: false,
        });
    }

    /// Measures the current finger spread.
    pub fn update_pinch(&mut self, a: Vec2, b: Vec2, now: f64) -> PinchUpdate {
        let Some(session) = &mut self.session else {
            return PinchUpdate {
                has_early_detection: false,
                current_distance: a.distance(b),
                distance_change: 0.0,
            };
        };

        session.current_distance = a.distance(b);
        session.center = (a + b) * 0.5;
        let change = session.change();

        let mut has_early_detection = false;
        if !session.early_detected
            && now - session.start_time >= self.config.grace_period
            && change.abs() >= self.config.priority_threshold
        {
            session.early_detected = true;
            has_early_detection = true;
            info!(target: "gesture::pinch", "Pinch priority: Δ={:.1}px", change);
        }

        trace!(target: "gesture::pinch", "Pinch distance {:.1} (Δ {:.1})", session.current_distance, change);

        PinchUpdate {
            has_early_detection,
            current_distance: session.current_distance,
            distance_change: change,
        }
    }

    /// Converts a held, nearly static two-finger contact into a result.
    ///
    /// Fires at most once per session. After firing, `end_pinch` reports
    /// an invalid result so the gesture is not dispatched twice.
    pub fn check_auto_trigger(&mut self, now: f64) -> Option<PinchResult> {
        let session = self.session.as_mut()?;
        if session.resolved {
            return None;
        }

        let change = session.change();
        let held = now - session.start_time;
        if held < self.config.auto_trigger_hold || change.abs() < self.config.auto_trigger_min_change {
            return None;
        }

        session.resolved = true;
        debug!(target: "gesture::pinch", "Pinch auto-triggered after {:.2}s (Δ {:.1})", held, change);
        Some(PinchResult {
            is_valid: true,
            direction: PinchResult::direction_of(change),
            distance_change: change,
            pinch_center: session.center,
        })
    }

    /// Closes the session and evaluates it.
    pub fn end_pinch(&mut self) -> PinchResult {
        let Some(session) = self.session.take() else {
            return PinchResult::invalid();
        };
        if session.resolved {
            return PinchResult::invalid();
        }

        let change = session.change();
        let result = PinchResult {
            is_valid: change.abs() >= self.config.min_distance_change,
            direction: PinchResult::direction_of(change),
            distance_change: change,
            pinch_center: session.center,
        };
        debug!(target: "gesture::pinch", "Pinch ended: {:?}", result);
        result
    }

    /// Drops the session without producing a result.
    pub fn cancel_pinch(&mut self) {
        if self.session.take().is_some() {
            debug!(target: "gesture::pinch", "Pinch cancelled");
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PinchDetectionSystem {
        PinchDetectionSystem::new(PinchConfig::default())
    }

    fn pair(spread: f32) -> (Vec2, Vec2) {
        (Vec2::new(200.0 - spread / 2.0, 300.0), Vec2::new(200.0 + spread / 2.0, 300.0))
    }

    //=====================================================================
    // Start Rules
    //=====================================================================

    #[test]
    fn phase_gated_start_requires_began() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        assert!(!pinch.start_pinch(a, b, TouchPhase::Moved, 0.0));
        assert!(!pinch.is_tracking());
        assert!(pinch.start_pinch(a, b, TouchPhase::Began, 0.0));
        assert!(pinch.is_tracking());
    }

    #[test]
    fn force_start_ignores_phase() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);
        assert!(pinch.is_tracking());
    }

    //=====================================================================
    // Early Detection
    //=====================================================================

    #[test]
    fn early_detection_waits_for_grace_period() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);

        let (a, b) = pair(130.0);
        assert!(!pinch.update_pinch(a, b, 0.01).has_early_detection);
        assert!(pinch.update_pinch(a, b, 0.1).has_early_detection);
    }

    #[test]
    fn early_detection_fires_once() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);

        let (a, b) = pair(140.0);
        assert!(pinch.update_pinch(a, b, 0.1).has_early_detection);
        assert!(!pinch.update_pinch(a, b, 0.2).has_early_detection);
    }

    //=====================================================================
    // Results
    //=====================================================================

    #[test]
    fn spreading_fingers_is_pinch_out() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);
        let (a, b) = pair(130.0);
        pinch.update_pinch(a, b, 0.1);

        let result = pinch.end_pinch();
        assert!(result.is_valid);
        assert_eq!(result.direction, PinchDirection::Out);
        assert!((result.distance_change - 30.0).abs() < 1e-3);
        assert_eq!(result.pinch_center, Vec2::new(200.0, 300.0));
    }

    #[test]
    fn closing_fingers_is_pinch_in() {
        let mut pinch = detector();
        let (a, b) = pair(200.0);
        pinch.force_start_pinch(a, b, 0.0);
        let (a, b) = pair(120.0);
        pinch.update_pinch(a, b, 0.1);

        let result = pinch.end_pinch();
        assert!(result.is_valid);
        assert_eq!(result.direction, PinchDirection::In);
    }

    #[test]
    fn tiny_change_is_invalid() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);
        let (a, b) = pair(103.0);
        pinch.update_pinch(a, b, 0.1);
        assert!(!pinch.end_pinch().is_valid);
    }

    #[test]
    fn auto_trigger_resolves_held_contact() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);
        let (a, b) = pair(103.0);
        pinch.update_pinch(a, b, 0.3);

        assert!(pinch.check_auto_trigger(0.3).is_none(), "not held long enough");

        let result = pinch.check_auto_trigger(0.7).expect("auto trigger");
        assert!(result.is_valid);
        assert_eq!(result.direction, PinchDirection::Out);

        assert!(pinch.check_auto_trigger(0.9).is_none(), "fires once");
        assert!(!pinch.end_pinch().is_valid, "already dispatched");
    }

    #[test]
    fn auto_trigger_needs_minimal_change() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);
        let (a, b) = pair(101.0);
        pinch.update_pinch(a, b, 0.8);
        assert!(pinch.check_auto_trigger(0.8).is_none());
    }

    #[test]
    fn cancel_discards_session() {
        let mut pinch = detector();
        let (a, b) = pair(100.0);
        pinch.force_start_pinch(a, b, 0.0);
        pinch.cancel_pinch();
        assert!(!pinch.is_tracking());
        assert!(!pinch.end_pinch().is_valid);
    }
}
