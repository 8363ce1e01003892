//=========================================================================
// Input System
//=========================================================================
//
// Touch input representation and per-frame tracking.
//
// Architecture:
//   Platform → InputEvent batches → TouchTracker → gesture recognizers
//
// The tracker is the single place raw pointer state is read each frame;
// recognizers and the arbitrator only query it.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod touch_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, TouchId, TouchPhase, TouchSample};
pub use touch_tracker::{TouchPoint, TouchTracker};
