//=========================================================================
// Interaction
//=========================================================================
//
// Gesture arbitration and the transitions it triggers.
//
// Architecture:
//   InteractionController (per scene)
//     ├─ TouchTracker
//     ├─ InputArbitrator ──> recognizers, Carousel
//     └─ DependencySlot<CameraController>
//
//   TransitionContext borrows { modes, lock, camera, entities } for one
//   frame; every camera-state change goes through it under a LockTicket.
//
//=========================================================================

//=== Module Declarations =================================================

mod arbiter;
mod carousel;
mod controller;
mod dependency;
mod lock;
mod transitions;

//=== Public API ==========================================================

pub use arbiter::{ArbiterConfig, InputArbitrator};
pub use carousel::Carousel;
pub use controller::{InteractionController, SceneBindings};
pub use dependency::{DependencySlot, DependencySource, SlotStatus};
pub use lock::{LockTicket, TransitionLock};
pub use transitions::{TransitionContext, TransitionOutcome};
