//=========================================================================
// Camera Drag
//=========================================================================
//
// Single-finger drag tracker used to pan the camera in Zoom mode.
//
// Emits per-frame deltas (pixels) and a smoothed velocity; the arbitrator
// decides what the delta moves (pan, or orbit while navigating).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::trace;
use serde::Deserialize;

//=== DragConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Movement (pixels) below which a frame produces no drag sample.
    pub min_frame_movement: f32,
    /// Weight of the newest velocity sample in the exponential average.
    pub velocity_smoothing: f32,
    /// Seconds a still contact must be held to count as a tap-hold.
    pub hold_time: f64,
    /// Travel (pixels) a held contact may drift and still count as still.
    pub hold_slop: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_frame_movement: 0.5,
            velocity_smoothing: 0.35,
            hold_time: 0.5,
            hold_slop: 12.0,
        }
    }
}

//=== Result Types ========================================================

/// One frame of drag movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub delta: Vec2,
    /// Pixels per second, smoothed.
    pub velocity: Vec2,
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragResult {
    pub velocity: Vec2,
    pub total_distance: f32,
}

//=== DragSession =========================================================

#[derive(Debug, Clone, Copy)]
struct DragSession {
    start_position: Vec2,
    start_time: f64,
    last_position: Vec2,
    last_time: f64,
    velocity: Vec2,
    travelled: f32,
}

//=== CameraDragSystem ====================================================

pub struct CameraDragSystem {
    config: DragConfig,
    session: Option<DragSession>,
}

impl CameraDragSystem {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    //--- Session Control --------------------------------------------------

    pub fn start_drag(&mut self, position: Vec2, now: f64) {
        self.session = Some(DragSession {
            start_position: position,
            start_time: now,
            last_position: position,
            last_time: now,
            velocity: Vec2::ZERO,
            travelled: 0.0,
        });
    }

    /// Advances the drag to `position`.
    ///
    /// Returns `None` when no session is open or the finger moved less
    /// than `min_frame_movement`.
    pub fn update_drag(&mut self, position: Vec2, now: f64) -> Option<DragSample> {
        let config = &self.config;
        let session = self.session.as_mut()?;

        let delta = position - session.last_position;
        if delta.length() < config.min_frame_movement {
            return None;
        }

        let dt = (now - session.last_time).max(1e-4) as f32;
        let instant = delta / dt;
        let k = config.velocity_smoothing.clamp(0.0, 1.0);
        session.velocity = session.velocity * (1.0 - k) + instant * k;
        session.last_position = position;
        session.last_time = now;
        session.travelled += delta.length();

        trace!(target: "gesture::drag", "Drag Δ{:?} v{:?}", delta, session.velocity);
        Some(DragSample {
            delta,
            velocity: session.velocity,
        })
    }

    pub fn end_drag(&mut self) -> Option<DragResult> {
        self.session.take().map(|session| DragResult {
            velocity: session.velocity,
            total_distance: session.travelled,
        })
    }

    pub fn cancel_drag(&mut self) {
        self.session = None;
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// `true` once the contact has stayed within `hold_slop` of its start
    /// for at least `hold_time`.
    pub fn is_held_still(&self, now: f64) -> bool {
        self.session.map_or(false, |s| {
            now - s.start_time >= self.config.hold_time
                && s.start_position.distance(s.last_position) <= self.config.hold_slop
                && s.travelled <= self.config.hold_slop
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn drag() -> CameraDragSystem {
        CameraDragSystem::new(DragConfig::default())
    }

    #[test]
    fn update_without_session_is_none() {
        let mut d = drag();
        assert!(d.update_drag(Vec2::new(10.0, 0.0), 0.1).is_none());
    }

    #[test]
    fn reports_frame_delta() {
        let mut d = drag();
        d.start_drag(Vec2::ZERO, 0.0);
        let sample = d.update_drag(Vec2::new(10.0, 5.0), 0.1).unwrap();
        assert_eq!(sample.delta, Vec2::new(10.0, 5.0));
        assert!(sample.velocity.x > 0.0);

        let sample = d.update_drag(Vec2::new(12.0, 5.0), 0.2).unwrap();
        assert_eq!(sample.delta, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn jitter_below_threshold_is_ignored() {
        let mut d = drag();
        d.start_drag(Vec2::ZERO, 0.0);
        assert!(d.update_drag(Vec2::new(0.1, 0.1), 0.1).is_none());
    }

    #[test]
    fn end_reports_total_distance() {
        let mut d = drag();
        d.start_drag(Vec2::ZERO, 0.0);
        d.update_drag(Vec2::new(3.0, 4.0), 0.1);
        d.update_drag(Vec2::new(6.0, 8.0), 0.2);
        let result = d.end_drag().unwrap();
        assert!((result.total_distance - 10.0).abs() < 1e-4);
        assert!(!d.is_tracking());
    }

    #[test]
    fn hold_detection() {
        let mut d = drag();
        d.start_drag(Vec2::ZERO, 0.0);
        assert!(!d.is_held_still(0.2));
        assert!(d.is_held_still(0.6));

        d.update_drag(Vec2::new(40.0, 0.0), 0.7);
        assert!(!d.is_held_still(0.8));
    }

    #[test]
    fn cancel_clears_session() {
        let mut d = drag();
        d.start_drag(Vec2::ZERO, 0.0);
        d.cancel_drag();
        assert!(d.end_drag().is_none());
    }
}
