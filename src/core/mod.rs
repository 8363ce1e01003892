//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Fixed-rate logic thread driving the interaction core.
//
// Architecture:
//   Platform ──PlatformEvent──> EventCollector
//                                   │ touch batch
//                                   v
//   SceneRequestQueue ──> SceneLoader ──> Session::on_scene_loaded
//                                   │
//                                   v
//                      InteractionController::tick(session, events, dt)
//
// Each tick:
//   1. Drain platform events (exit on WindowClosed / disconnect)
//   2. Serve scene requests queued during the previous tick
//   3. Tick the active scene's controller with a fixed dt
//   4. Sleep out the remainder of the frame
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod config;
pub mod focus_memory;
pub mod gesture;
pub mod input;
pub mod interaction;
pub mod mode;
pub mod scene;
pub mod session;

pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use config::{ConfigError, InteractionConfig};
pub use session::Session;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use input::InputEvent;
use interaction::{InteractionController, SceneBindings};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::{SceneRequest, SceneRequestQueue, Services};

//=== SceneLoader =========================================================

/// Host hook that turns a scene request into a loaded scene.
pub trait SceneLoader: Send {
    /// Loads `request.target`, returning its bindings, or `None` if the
    /// scene could not be loaded.
    fn load(&mut self, request: &SceneRequest) -> Option<SceneBindings>;
}

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    session: Session,
    requests: SceneRequestQueue,
    loader: Option<Box<dyn SceneLoader>>,
    controller: Option<InteractionController>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Builds the session with scene requests routed to the internal queue.
    pub fn new(config: InteractionConfig) -> Self {
        let requests = SceneRequestQueue::new();
        let services = Services::new(requests.handle());
        Self {
            session: Session::new(config, services),
            requests,
            loader: None,
            controller: None,
        }
    }

    pub fn set_scene_loader(&mut self, loader: Box<dyn SceneLoader>) {
        self.loader = Some(loader);
    }

    /// Gives the host one-time access to the session before the thread starts.
    pub fn init_session<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut Session),
    {
        init_fn(&mut self.session);
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn controller(&self) -> Option<&InteractionController> {
        self.controller.as_ref()
    }

    //--- spawn_core_thread() ---------------------------------------------

    pub fn spawn_core_thread(mut self, receiver: Receiver<PlatformEvent>, tps: f64) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting");
                    break;
                }
                let events = collector.take_events();

                //--- Step 2: Scenes and interaction ------------------------
                self.step(&events, dt);

                //--- Step 3: Maintain fixed pacing ------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            self.shutdown();
        })
    }

    //--- Tick -------------------------------------------------------------

    pub(crate) fn step(&mut self, events: &[InputEvent], dt: f32) {
        self.serve_scene_requests();
        if let Some(controller) = &mut self.controller {
            controller.tick(&mut self.session, events, dt);
        }
    }

    /// Loads the most recent request; earlier ones in the same tick are
    /// superseded.
    fn serve_scene_requests(&mut self) {
        let mut requests = self.requests.take();
        let Some(request) = requests.pop() else {
            return;
        };
        if !requests.is_empty() {
            warn!(target: "scene", "{} scene request(s) superseded by {}", requests.len(), request.target);
        }

        let Some(loader) = self.loader.as_mut() else {
            warn!(target: "scene", "No scene loader installed, dropping request for {}", request.target);
            return;
        };

        let Some(bindings) = loader.load(&request) else {
            error!(target: "scene", "Scene {} failed to load", request.target);
            return;
        };

        self.session.on_scene_unloading(self.controller.take());
        self.controller = self.session.on_scene_loaded(&request.target, bindings);
    }

    fn shutdown(&mut self) {
        self.session.on_scene_unloading(self.controller.take());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
