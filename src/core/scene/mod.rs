//=========================================================================
// Scene Integration
//=========================================================================
//
// What the interaction core knows about scenes.
//
// Architecture:
//   SceneRegistry   name → SceneKind (Menu / Minigame)
//   EntityDirectory snapshot of interactable objects
//   Services        outbound requests (scene change, progress, audio)
//
// Scene kind is always a tag supplied at registration; nothing is
// inferred from a scene's name.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Module Declarations =================================================

mod entity;
mod request_queue;
mod services;

//=== Public API ==========================================================

pub use entity::{FocusTarget, ObjectType, SceneEntity};
pub use request_queue::{QueuedSceneTransitions, SceneRequest, SceneRequestQueue};
pub use services::{
    AudioCue, AudioCues, EntityDirectory, ProgressQuery, SceneTransitions, Services, SilentAudio,
};

//=== SceneKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    /// The explorable exhibit. Focus is restored when it loads.
    Menu,
    /// A per-artefact activity opened from Zoom.
    Minigame,
}

//=== SceneRegistry =======================================================

pub struct SceneRegistry {
    kinds: HashMap<String, SceneKind>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, kind: SceneKind) {
        let name = name.into();
        if let Some(previous) = self.kinds.insert(name.clone(), kind) {
            if previous != kind {
                warn!(target: "scene", "Scene {} re-registered as {:?} (was {:?})", name, kind, previous);
            }
        }
    }

    pub fn kind_of(&self, name: &str) -> Option<SceneKind> {
        self.kinds.get(name).copied()
    }

    /// First registered Menu scene, used for exit-to-menu.
    pub fn menu_scene(&self) -> Option<&str> {
        let mut menus: Vec<&str> = self
            .kinds
            .iter()
            .filter(|(_, kind)| **kind == SceneKind::Menu)
            .map(|(name, _)| name.as_str())
            .collect();
        menus.sort_unstable();
        menus.first().copied()
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
