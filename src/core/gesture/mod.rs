//=========================================================================
// Gesture Recognizers
//=========================================================================
//
// Independent recognizers fed by the arbitrator each frame.
//
// Architecture:
//   TouchTracker → InputArbitrator → { swipe, pinch, drag, double_tap }
//
// Each recognizer holds at most one session of its own type. Several may
// be tracking at once; the arbitrator cancels the losers.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod double_tap;
pub mod drag;
pub mod pinch;
pub mod swipe;

//=== Public API ==========================================================

pub use double_tap::{DoubleTapConfig, DoubleTapDetector};
pub use drag::{CameraDragSystem, DragConfig, DragResult, DragSample};
pub use pinch::{PinchConfig, PinchDetectionSystem, PinchDirection, PinchResult, PinchUpdate};
pub use swipe::{SwipeConfig, SwipeDetectionSystem, SwipeDirection, SwipeResult};
