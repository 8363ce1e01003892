//=========================================================================
// Scene Request Queue
//=========================================================================
//
// Queue for scene change requests.
//
// Interaction code requests scenes through a QueuedSceneTransitions
// handle during a tick. The core loop takes the queue at the tick
// boundary and hands each request to the host's scene loader.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::entity::ObjectType;
use super::services::SceneTransitions;

//=== SceneRequest ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    pub target: String,
    pub object_type: Option<ObjectType>,
}

//=== SceneRequestQueue ===================================================

/// Receiving end, owned by whoever loads scenes.
pub struct SceneRequestQueue {
    sender: Sender<SceneRequest>,
    receiver: Receiver<SceneRequest>,
}

impl SceneRequestQueue {
    /// Creates a new empty request queue.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Returns a handle that queues requests into this queue.
    pub fn handle(&self) -> QueuedSceneTransitions {
        QueuedSceneTransitions {
            sender: self.sender.clone(),
        }
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Returns the number of queued requests.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Takes all requests from the queue, leaving it empty.
    pub fn take(&self) -> Vec<SceneRequest> {
        self.receiver.try_iter().collect()
    }
}

impl Default for SceneRequestQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=== QueuedSceneTransitions ==============================================

/// SceneTransitions implementation backed by a SceneRequestQueue.
#[derive(Clone)]
pub struct QueuedSceneTransitions {
    sender: Sender<SceneRequest>,
}

impl SceneTransitions for QueuedSceneTransitions {
    fn request_scene(&mut self, target: &str, object_type: Option<&ObjectType>) {
        debug!(target: "scene", "Scene requested: {} ({:?})", target, object_type);
        let request = SceneRequest {
            target: target.to_owned(),
            object_type: object_type.cloned(),
        };
        if self.sender.send(request).is_err() {
            warn!(target: "scene", "Scene request for {} dropped: queue closed", target);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
