//=========================================================================
// Touch Event Types
//
// Defines the internal representation of low-level pointer/touch input.
//
// This module abstracts away platform-specific input (e.g. Winit touch,
// emulated mouse touches) into a unified, engine-friendly format used by
// the touch tracker and gesture recognizers.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent::Touch (this module)
//         ↓
//    TouchTracker (per-frame touch state)
//         ↓
//    Gesture recognizers → InputArbitrator
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== TouchPhase ==========================================================

/// Lifecycle phase of a single touch contact.
///
/// Mirrors the phases reported by mobile platforms. `Stationary` is never
/// produced by Winit directly but is synthesized by the tracker for held
/// contacts that did not move during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger touched the screen this frame.
    Began,

    /// Finger moved since the last sample.
    Moved,

    /// Finger is held without movement.
    Stationary,

    /// Finger lifted.
    Ended,

    /// Platform cancelled the contact (incoming call, palm rejection...).
    Cancelled,
}

impl TouchPhase {
    /// Returns `true` for phases that terminate the contact.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

//=== TouchId =============================================================

/// Platform identifier of a touch contact.
///
/// Stable for the lifetime of one contact. Mouse emulation always uses
/// [`TouchId::MOUSE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

impl TouchId {
    /// Identifier used when the left mouse button emulates a finger.
    pub const MOUSE: Self = Self(u64::MAX);
}

//=== TouchSample =========================================================

/// One pointer sample: which contact, where (screen pixels, top-left
/// origin), and in which phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub id: TouchId,
    pub position: Vec2,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub fn new(id: TouchId, position: Vec2, phase: TouchPhase) -> Self {
        Self { id, position, phase }
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Event Types
///
/// - **Touch**: A touch (or emulated touch) sample
/// - **ViewportResized**: Surface size changed, needed for screen projection
/// - **Unidentified**: Unknown/unsupported events (ignored by the core)
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch sample.
    Touch(TouchSample),

    /// Drawable surface changed size (physical pixels).
    ViewportResized { width: u32, height: u32 },

    /// Unrecognized or unsupported event.
    Unidentified,
}

impl InputEvent {
    /// Convenience constructor for touch events.
    pub fn touch(id: u64, x: f32, y: f32, phase: TouchPhase) -> Self {
        Self::Touch(TouchSample::new(TouchId(id), Vec2::new(x, y), phase))
    }

    /// Returns `true` when two events can be coalesced into one.
    ///
    /// Only consecutive `Moved` samples of the same contact coalesce; the
    /// last position wins. Phase changes are never merged because the
    /// arbitrator depends on seeing every begin/end.
    pub fn coalesces_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Touch(a), Self::Touch(b)) => {
                a.id == b.id && a.phase == TouchPhase::Moved && b.phase == TouchPhase::Moved
            }
            (Self::ViewportResized { .. }, Self::ViewportResized { .. }) => true,
            _ => false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
