//=========================================================================
// Interaction Controller
//=========================================================================
//
// Per-scene owner of the touch pipeline.
//
// Frame flow (tick):
//   1. TouchTracker      ← this frame's InputEvent batch
//   2. ModeSubscription  → arbitrator resets stale gestures
//   3. DependencySlot    ← one camera acquisition attempt, if still waiting
//   4. FocusMemory       → restore into this scene, if armed
//   5. InputArbitrator   → gestures, mode + camera transitions
//   6. CameraController  → tween step; completion releases the lock and
//                          blocks input briefly
//
// Everything that outlives the scene (modes, lock, focus memory,
// services) is borrowed from the Session for the duration of a tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::arbiter::InputArbitrator;
use super::dependency::{DependencySlot, DependencySource, SlotStatus};
use super::transitions::TransitionContext;
use crate::core::camera::CameraController;
use crate::core::input::{InputEvent, TouchTracker};
use crate::core::mode::ModeSubscription;
use crate::core::scene::EntityDirectory;
use crate::core::session::Session;

//=== SceneBindings =======================================================

/// What a freshly loaded scene hands to the interaction core.
pub struct SceneBindings {
    pub entities: Box<dyn EntityDirectory>,
    /// The scene camera; may arrive a few frames after the scene.
    pub camera: Box<dyn DependencySource<CameraController>>,
}

impl SceneBindings {
    pub fn new(
        entities: impl EntityDirectory + 'static,
        camera: impl DependencySource<CameraController> + 'static,
    ) -> Self {
        Self {
            entities: Box::new(entities),
            camera: Box::new(camera),
        }
    }
}

//=== InteractionController ===============================================

pub struct InteractionController {
    tracker: TouchTracker,
    arbiter: InputArbitrator,
    camera: DependencySlot<CameraController>,
    directory: Box<dyn EntityDirectory>,
    subscription: ModeSubscription,
    clock: f64,
    post_transition_block: f64,
}

impl InteractionController {
    pub fn new(bindings: SceneBindings, session: &mut Session) -> Self {
        let config = session.config();
        let arbiter = InputArbitrator::new(config);
        let camera = DependencySlot::new(
            "camera controller",
            bindings.camera,
            config.arbiter.camera_max_attempts,
        );
        let post_transition_block = config.arbiter.post_transition_block;

        Self {
            tracker: TouchTracker::new(),
            arbiter,
            camera,
            directory: bindings.entities,
            subscription: session.modes.subscribe(),
            clock: 0.0,
            post_transition_block,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn camera(&self) -> Option<&CameraController> {
        self.camera.get()
    }

    pub fn camera_mut(&mut self) -> Option<&mut CameraController> {
        self.camera.get_mut()
    }

    pub fn camera_status(&self) -> SlotStatus {
        self.camera.status()
    }

    pub fn arbiter(&self) -> &InputArbitrator {
        &self.arbiter
    }

    pub fn touches(&self) -> &TouchTracker {
        &self.tracker
    }

    /// Seconds of scene time accumulated by `tick()`.
    pub fn now(&self) -> f64 {
        self.clock
    }

    //=====================================================================
    // Frame
    //=====================================================================

    pub fn tick(&mut self, session: &mut Session, events: &[InputEvent], dt: f32) {
        let dt = dt.max(0.0);
        self.clock += f64::from(dt);

        self.tracker.clear();
        self.tracker.process_events(events);
        self.tracker.finalize_frame();

        for change in self.subscription.drain() {
            self.arbiter.on_mode_changed(change);
        }

        if let SlotStatus::Waiting { .. } = self.camera.status() {
            if self.camera.poll() == SlotStatus::Ready {
                self.on_camera_ready();
            }
        }
        if let (Some(camera), Some((width, height))) = (self.camera.get_mut(), self.tracker.viewport()) {
            camera.set_viewport(width, height);
        }

        let entities = self.directory.entities();
        let Session {
            modes,
            lock,
            focus_memory,
            services,
            ..
        } = session;

        let mut ctx = TransitionContext {
            modes: &mut *modes,
            lock: &mut *lock,
            camera: self.camera.get_mut(),
            entities: &entities,
        };

        if focus_memory.is_restore_pending() {
            let outcome = focus_memory.restore_focus(&mut ctx);
            debug!(target: "interaction", "Focus restore: {:?}", outcome);
        }

        self.arbiter
            .process_frame(&self.tracker, self.clock, &mut ctx, focus_memory, services);

        let Some(camera) = self.camera.get_mut() else {
            return;
        };
        if let Some(finished) = camera.tick(dt) {
            if let Some(ticket) = finished.ticket {
                lock.release(ticket);
                self.arbiter.block_input_for(self.post_transition_block);
            }
        }
    }

    /// Puts a newly acquired camera at the carousel's current position.
    fn on_camera_ready(&mut self) {
        let offset = self.arbiter.carousel().current_offset();
        if let Some(camera) = self.camera.get_mut() {
            camera.snap_overview_to(offset);
        }
    }

    //--- Teardown ---------------------------------------------------------

    /// Detaches from the session before the scene unloads.
    ///
    /// A transition cut short by the unload still holds the lock; its
    /// ticket is released here so the next scene starts unlocked.
    pub fn detach(mut self, session: &mut Session) {
        session.modes.unsubscribe(self.subscription.id);

        let Some(mut camera) = self.camera.detach() else {
            return;
        };
        if let Some(ticket) = camera.abandon_transition() {
            info!(target: "interaction", "Releasing lock held by interrupted {}", ticket.reason());
            session.lock.release(ticket);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
