//=========================================================================
// Focus Memory
//=========================================================================
//
// Remembers what the camera was focused on across a scene change.
//
// Flow:
//   Zoom → open minigame → save_current_focus() → scene unloads
//   Menu scene loads → begin_restore() → restore_focus() each frame
//
// Matching, in order of trust:
//   1. exact entity name
//   2. nearest entity within proximity_radius of the saved position
//   3. same ObjectType (unreliable: logged)
//
// No match: Overview, and Exploration if the mode was Zoom. The record is
// cleared once a restore succeeds or conclusively fails. Restoring waits
// for the camera and the TransitionLock for a bounded number of frames.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, error, info, warn};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::camera::CameraController;
use crate::core::interaction::TransitionContext;
use crate::core::scene::{FocusTarget, ObjectType, SceneEntity};

//=== FocusMemoryConfig ===================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FocusMemoryConfig {
    /// World distance within which an entity matches the saved position.
    pub proximity_radius: f32,
    /// Frames a restore may wait for the camera or the lock.
    pub max_restore_attempts: u32,
}

impl Default for FocusMemoryConfig {
    fn default() -> Self {
        Self {
            proximity_radius: 0.5,
            max_restore_attempts: 30,
        }
    }
}

//=== SavedFocusRecord ====================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SavedFocusRecord {
    pub entity_name: String,
    pub position: Vec3,
    pub object_type: ObjectType,
}

//=== Restore Results =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreMatch {
    Name,
    Proximity,
    ObjectType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// Focus re-established on `entity`.
    Restored { entity: String, matched: RestoreMatch },
    /// No matching entity; camera sent to Overview.
    FellBack,
    /// Camera or lock not available yet; try again next frame.
    Deferred,
    /// Waited too long; record dropped.
    GaveUp,
    NothingSaved,
}

//=== FocusMemory =========================================================

pub struct FocusMemory {
    config: FocusMemoryConfig,
    record: Option<SavedFocusRecord>,
    pending_attempts: Option<u32>,
}

impl FocusMemory {
    pub fn new(config: FocusMemoryConfig) -> Self {
        Self {
            config,
            record: None,
            pending_attempts: None,
        }
    }

    //--- Saving -----------------------------------------------------------

    /// Captures the camera's focus target, if any.
    ///
    /// Without a target the previous record is kept, so leaving a
    /// minigame for the menu does not erase the artefact it came from.
    pub fn save_current_focus(&mut self, camera: &CameraController) -> bool {
        let Some(target) = camera.focus_target() else {
            debug!(target: "focus_memory", "No focus target to save");
            return false;
        };

        info!(target: "focus_memory", "Saved focus on {}", target.name);
        self.record = Some(SavedFocusRecord {
            entity_name: target.name.clone(),
            position: target.position,
            object_type: target.object_type.clone(),
        });
        true
    }

    pub fn record(&self) -> Option<&SavedFocusRecord> {
        self.record.as_ref()
    }

    pub fn has_saved_focus(&self) -> bool {
        self.record.is_some()
    }

    pub fn clear(&mut self) {
        self.record = None;
        self.pending_attempts = None;
    }

    //--- Restoring --------------------------------------------------------

    /// Arms a restore for the scene that just loaded.
    pub fn begin_restore(&mut self) {
        if self.record.is_some() {
            self.pending_attempts = Some(0);
        }
    }

    pub fn is_restore_pending(&self) -> bool {
        self.pending_attempts.is_some()
    }

    /// Attempts to restore the saved focus into the current scene.
    pub fn restore_focus(&mut self, ctx: &mut TransitionContext<'_>) -> RestoreOutcome {
        let Some(record) = self.record.clone() else {
            self.pending_attempts = None;
            return RestoreOutcome::NothingSaved;
        };

        if ctx.camera.is_none() {
            return self.defer("camera not attached");
        }
        let Some(ticket) = ctx.lock.try_acquire("focus restore") else {
            return self.defer("transition lock held");
        };

        self.record = None;
        self.pending_attempts = None;

        match find_match(&record, ctx.entities, self.config.proximity_radius) {
            Some((entity, matched)) => {
                let name = entity.name.clone();
                info!(
                    target: "focus_memory",
                    "Restoring focus on {} (matched by {:?})",
                    name,
                    matched
                );
                ctx.force_focus(FocusTarget::from(entity), ticket);
                RestoreOutcome::Restored {
                    entity: name,
                    matched,
                }
            }
            None => {
                warn!(
                    target: "focus_memory",
                    "{} not found in scene, returning to Overview",
                    record.entity_name
                );
                ctx.fall_back_to_overview(ticket);
                RestoreOutcome::FellBack
            }
        }
    }

    fn defer(&mut self, reason: &str) -> RestoreOutcome {
        let attempts = self.pending_attempts.unwrap_or(0) + 1;
        if attempts >= self.config.max_restore_attempts {
            error!(
                target: "focus_memory",
                "Focus restore abandoned after {} attempts: {}",
                attempts,
                reason
            );
            self.clear();
            return RestoreOutcome::GaveUp;
        }

        debug!(target: "focus_memory", "Focus restore deferred: {}", reason);
        self.pending_attempts = Some(attempts);
        RestoreOutcome::Deferred
    }
}

impl Default for FocusMemory {
    fn default() -> Self {
        Self::new(FocusMemoryConfig::default())
    }
}

//=== Matching ============================================================

fn find_match<'a>(
    record: &SavedFocusRecord,
    entities: &'a [SceneEntity],
    proximity_radius: f32,
) -> Option<(&'a SceneEntity, RestoreMatch)> {
    let candidates = || entities.iter().filter(|e| e.interactable);

    if let Some(entity) = candidates().find(|e| e.name == record.entity_name) {
        return Some((entity, RestoreMatch::Name));
    }

    let nearest = candidates()
        .map(|e| (e.position.distance(record.position), e))
        .filter(|(distance, _)| *distance <= proximity_radius)
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, entity)) = nearest {
        return Some((entity, RestoreMatch::Proximity));
    }

    let by_type = candidates().find(|e| e.object_type == record.object_type)?;
    warn!(
        target: "focus_memory",
        "Matched {} by object type {} only",
        by_type.name,
        record.object_type
    );
    Some((by_type, RestoreMatch::ObjectType))
}

//=========================================================================
// Unit Tests
//=========================================================================
