//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use exhibit_interaction::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::{InteractionConfig, SceneLoader, Session};

// Modes
pub use crate::core::mode::{GameModeManager, InteractionMode, ModeChanged};

// Camera
pub use crate::core::camera::{CameraConfig, CameraController, CameraState};

// Interaction
pub use crate::core::interaction::{InteractionController, SceneBindings, TransitionLock};

// Scenes and host services
pub use crate::core::scene::{
    AudioCue, AudioCues, EntityDirectory, ObjectType, ProgressQuery, SceneEntity, SceneKind,
    SceneRequest, SceneTransitions,
};

// Input
pub use crate::core::input::{InputEvent, TouchPhase};
