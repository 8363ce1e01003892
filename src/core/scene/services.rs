//=========================================================================
// Scene Services
//=========================================================================
//
// Outbound collaborators of the interaction core.
//
// The core only issues requests and queries through these traits. Scene
// loading, save data and audio playback live behind them, in the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::entity::{ObjectType, SceneEntity};

//=== Collaborator Traits =================================================

/// Fire-and-forget scene change requests.
pub trait SceneTransitions: Send {
    fn request_scene(&mut self, target: &str, object_type: Option<&ObjectType>);
}

/// Answers whether an artefact's minigame may be opened.
pub trait ProgressQuery: Send {
    fn is_unlocked(&self, entity: &str, object_type: &ObjectType) -> bool;
}

/// Plays short interface sounds.
pub trait AudioCues: Send {
    fn play(&mut self, cue: AudioCue);
}

/// Snapshot query over the interactable objects of the active scene.
pub trait EntityDirectory: Send {
    fn entities(&self) -> Vec<SceneEntity>;
}

//=== AudioCue ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Tap,
    ZoomIn,
    ZoomOut,
    CarouselStep,
    OpenArtefact,
    Locked,
}

//=== Default Implementations =============================================

impl EntityDirectory for Vec<SceneEntity> {
    fn entities(&self) -> Vec<SceneEntity> {
        self.clone()
    }
}

/// Audio sink that only traces cues.
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play(&mut self, cue: AudioCue) {
        trace!(target: "audio", "Cue {:?} (silent)", cue);
    }
}

//=== Services ============================================================

/// Application-level collaborators, shared by every scene.
pub struct Services {
    pub scenes: Box<dyn SceneTransitions>,
    /// `None` until a save/progress service is attached. Without one,
    /// every artefact is treated as locked.
    pub progress: Option<Box<dyn ProgressQuery>>,
    pub audio: Box<dyn AudioCues>,
}

impl Services {
    pub fn new(scenes: impl SceneTransitions + 'static) -> Self {
        Self {
            scenes: Box::new(scenes),
            progress: None,
            audio: Box::new(SilentAudio),
        }
    }

    pub fn with_progress(mut self, progress: impl ProgressQuery + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioCues + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn is_unlocked(&self, entity: &str, object_type: &ObjectType) -> bool {
        self.progress
            .as_ref()
            .map_or(false, |progress| progress.is_unlocked(entity, object_type))
    }
}
