//=========================================================================
// Camera
//=========================================================================
//
// Three-state camera machine with tick-driven transitions.
//
// States:
//   Overview ──focus──> Focus ──hold──> Navigation
//      ^                 │  ^               │
//      └─────────────────┘  └───release─────┘
//
// switch_state() runs the exit hook of the old state, then the enter
// hook of the new one. Enter hooks start the tween towards the state's
// pose; tick(dt) advances it. The state itself changes immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

//=== Module Declarations =================================================

mod controller;
mod pose;
mod tween;

//=== Public API ==========================================================

pub use controller::{CameraController, TransitionFinished, TransitionKind};
pub use pose::CameraPose;
pub use tween::{Easing, Interpolate, Tween};

//=== CameraState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraState {
    /// Resting vantage over the exhibit.
    #[default]
    Overview,
    /// Close-up on the focus target.
    Focus,
    /// Focus with look-around orbit enabled.
    Navigation,
}

//=== CameraError =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("navigation can only be entered from Focus (camera is in {current:?})")]
    NavigationRequiresFocus { current: CameraState },
}

//=== CameraConfig ========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Overview eye position at carousel offset 0.
    pub overview_position: Vec3,
    /// Overview look-at point at carousel offset 0.
    pub overview_look_at: Vec3,
    /// Eye offset from the focus target.
    pub focus_offset: Vec3,

    /// Seconds for state transitions.
    pub default_duration: f32,
    /// Seconds for the quick zoom-out after a double tap.
    pub fast_duration: f32,
    /// Seconds for one carousel step.
    pub carousel_duration: f32,
    pub easing: Easing,

    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Screen radius (pixels) within which an object counts as near a point.
    pub pick_radius: f32,

    /// World units per dragged pixel.
    pub pan_speed: f32,
    /// Maximum pan distance from the focus pose.
    pub pan_limit: f32,
    /// Radians per dragged pixel while navigating.
    pub orbit_speed: f32,
    pub max_orbit_yaw: f32,
    pub max_orbit_pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            overview_position: Vec3::new(0.0, 1.6, 6.0),
            overview_look_at: Vec3::new(0.0, 1.0, 0.0),
            focus_offset: Vec3::new(0.0, 0.4, 1.6),
            default_duration: 1.0,
            fast_duration: 0.35,
            carousel_duration: 0.5,
            easing: Easing::SmoothStep,
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            pick_radius: 240.0,
            pan_speed: 0.004,
            pan_limit: 0.8,
            orbit_speed: 0.005,
            max_orbit_yaw: 1.2,
            max_orbit_pitch: 0.6,
        }
    }
}
