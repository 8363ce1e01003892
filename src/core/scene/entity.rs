//=========================================================================
// Scene Entities
//=========================================================================
//
// Read-only snapshots of the interactable objects in a loaded scene.
//
// The interaction core never owns scene objects. It sees them through
// EntityDirectory snapshots and refers to them by value (FocusTarget),
// so a target outliving its entity is harmless.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

//=== ObjectType ==========================================================

/// Category tag of an artefact (e.g. "amphora", "coin").
///
/// Used as the last-resort match when restoring focus and forwarded to
/// the scene loader so a minigame knows what it was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectType(pub String);

impl ObjectType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=== SceneEntity =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    /// Unique within a scene.
    pub name: String,
    pub position: Vec3,
    pub object_type: ObjectType,
    /// Only interactable entities can be picked or focused.
    pub interactable: bool,
    /// Scene opened when the focused entity is tapped again.
    #[serde(default)]
    pub minigame: Option<String>,
}

impl SceneEntity {
    pub fn new(name: impl Into<String>, position: Vec3, object_type: ObjectType) -> Self {
        Self {
            name: name.into(),
            position,
            object_type,
            interactable: true,
            minigame: None,
        }
    }

    pub fn with_minigame(mut self, scene: impl Into<String>) -> Self {
        self.minigame = Some(scene.into());
        self
    }

    pub fn decorative(mut self) -> Self {
        self.interactable = false;
        self
    }
}

//=== FocusTarget =========================================================

/// By-value reference to the entity the camera is focused on.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTarget {
    pub name: String,
    /// Last known world position.
    pub position: Vec3,
    pub object_type: ObjectType,
}

impl From<&SceneEntity> for FocusTarget {
    fn from(entity: &SceneEntity) -> Self {
        Self {
            name: entity.name.clone(),
            position: entity.position,
            object_type: entity.object_type.clone(),
        }
    }
}
