//=========================================================================
// Swipe Detection
//=========================================================================
//
// Single-finger swipe recognizer.
//
// Session lifecycle: start_swipe() → update_swipe()* → end_swipe()
//                                                   ↘ cancel_swipe()
//
// A cancelled session produces no result; arbitration cancels a swipe as
// soon as a second finger proves the gesture is a pinch.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, trace};
use serde::Deserialize;

//=== SwipeConfig =========================================================

/// Thresholds for swipe validity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Minimum travel in pixels for a valid swipe.
    pub min_distance: f32,
    /// Maximum gesture duration in seconds.
    pub max_duration: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_distance: 50.0,
            max_duration: 1.0,
        }
    }
}

//=== SwipeDirection ======================================================

/// Dominant axis and sign of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Direction of the axis with the larger absolute delta.
    ///
    /// Ties resolve to the horizontal axis. Screen space is y-down, so a
    /// negative y delta is `Up`.
    pub fn from_delta(delta: Vec2) -> Self {
        if delta.x.abs() >= delta.y.abs() {
            if delta.x >= 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if delta.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

//=== SwipeResult =========================================================

/// Outcome of a finished swipe session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeResult {
    pub is_valid: bool,
    pub direction: SwipeDirection,
    pub distance: f32,
    pub duration: f64,
}

impl SwipeResult {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            direction: SwipeDirection::Right,
            distance: 0.0,
            duration: 0.0,
        }
    }
}

//=== SwipeSession ========================================================

#[derive(Debug, Clone, Copy)]
struct SwipeSession {
    start_position: Vec2,
    start_time: f64,
    current_position: Vec2,
}

//=== SwipeDetectionSystem ================================================

/// Tracks at most one swipe session at a time.
pub struct SwipeDetectionSystem {
    config: SwipeConfig,
    session: Option<SwipeSession>,
}

impl SwipeDetectionSystem {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    //--- Session Control --------------------------------------------------

    /// Opens a new session, discarding any previous one.
    pub fn start_swipe(&mut self, position: Vec2, now: f64) {
        trace!(target: "gesture::swipe", "Swipe started at {:?}", position);
        self.session = Some(SwipeSession {
            start_position: position,
            start_time: now,
            current_position: position,
        });
    }

    /// Records the latest finger position.
    pub fn update_swipe(&mut self, position: Vec2) {
        if let Some(session) = &mut self.session {
            session.current_position = position;
        }
    }

    /// Drops the session without producing a result.
    pub fn cancel_swipe(&mut self) {
        if self.session.take().is_some() {
            debug!(target: "gesture::swipe", "Swipe cancelled");
        }
    }

    /// Closes the session and evaluates it.
    ///
    /// Returns an invalid result when no session was open (e.g. after a
    /// cancellation).
    pub fn end_swipe(&mut self, now: f64) -> SwipeResult {
        let Some(session) = self.session.take() else {
            return SwipeResult::invalid();
        };

        let delta = session.current_position - session.start_position;
        let distance = delta.length();
        let duration = (now - session.start_time).max(0.0);
        let is_valid =
            distance >= self.config.min_distance && duration <= self.config.max_duration;

        let result = SwipeResult {
            is_valid,
            direction: SwipeDirection::from_delta(delta),
            distance,
            duration,
        };
        debug!(target: "gesture::swipe", "Swipe ended: {:?}", result);
        result
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SwipeDetectionSystem {
        SwipeDetectionSystem::new(SwipeConfig::default())
    }

    #[test]
    fn long_fast_swipe_is_valid() {
        let mut swipe = detector();
        swipe.start_swipe(Vec2::new(100.0, 100.0), 0.0);
        swipe.update_swipe(Vec2::new(200.0, 110.0));
        let result = swipe.end_swipe(0.2);

        assert!(result.is_valid);
        assert_eq!(result.direction, SwipeDirection::Right);
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn short_swipe_is_invalid() {
        let mut swipe = detector();
        swipe.start_swipe(Vec2::ZERO, 0.0);
        swipe.update_swipe(Vec2::new(-20.0, 0.0));
        let result = swipe.end_swipe(0.1);

        assert!(!result.is_valid);
        assert_eq!(result.direction, SwipeDirection::Left);
    }

    #[test]
    fn slow_swipe_is_invalid() {
        let mut swipe = detector();
        swipe.start_swipe(Vec2::ZERO, 0.0);
        swipe.update_swipe(Vec2::new(300.0, 0.0));
        assert!(!swipe.end_swipe(1.5).is_valid);
    }

    #[test]
    fn tie_resolves_horizontal() {
        assert_eq!(SwipeDirection::from_delta(Vec2::new(60.0, 60.0)), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_delta(Vec2::new(-60.0, 60.0)), SwipeDirection::Left);
    }

    #[test]
    fn vertical_directions_are_screen_space() {
        assert_eq!(SwipeDirection::from_delta(Vec2::new(0.0, -80.0)), SwipeDirection::Up);
        assert_eq!(SwipeDirection::from_delta(Vec2::new(5.0, 80.0)), SwipeDirection::Down);
    }

    #[test]
    fn cancelled_swipe_never_reports_valid() {
        let mut swipe = detector();
        swipe.start_swipe(Vec2::ZERO, 0.0);
        swipe.update_swipe(Vec2::new(200.0, 0.0));
        swipe.cancel_swipe();

        // Late updates after cancellation must not resurrect the session.
        swipe.update_swipe(Vec2::new(400.0, 0.0));
        assert!(!swipe.end_swipe(0.1).is_valid);
    }

    #[test]
    fn end_without_session_is_invalid() {
        let mut swipe = detector();
        assert!(!swipe.end_swipe(1.0).is_valid);
    }
}
