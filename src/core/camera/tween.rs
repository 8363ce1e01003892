//=========================================================================
// Tween
//=========================================================================
//
// Tick-driven interpolation between two values.
//
// A Tween is plain data: {start, target, elapsed, duration, easing}.
// advance(dt) moves it forward and returns the new sample, so the owner
// always holds a fully-formed value even when a tween is replaced
// mid-flight.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::pose::CameraPose;

//=== Easing ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress in [0, 1] to eased progress in [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

//=== Interpolate =========================================================

pub trait Interpolate: Copy {
    fn interpolate(self, target: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Interpolate for Vec3 {
    fn interpolate(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

impl Interpolate for CameraPose {
    fn interpolate(self, target: Self, t: f32) -> Self {
        CameraPose {
            position: self.position.lerp(target.position, t),
            rotation: self.rotation.slerp(target.rotation, t),
        }
    }
}

//=== Tween ===============================================================

#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    start: T,
    target: T,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Negative durations are treated as zero; a zero-length tween
    /// finishes on its first advance.
    pub fn new(start: T, target: T, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.sample()
    }

    pub fn sample(&self) -> T {
        if self.is_finished() {
            return self.target;
        }
        self.start.interpolate(self.target, self.easing.apply(self.progress()))
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> T {
        self.target
    }

    /// Redirects the tween without restarting its clock.
    pub fn retarget(&mut self, target: T) {
        self.target = target;
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
