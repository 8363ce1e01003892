//=========================================================================
// Exhibit Engine
//
// Main entry point: wires the window, the core thread and the host's
// scene loader together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(|session| ..)
//         ├─ with_channel_capacity() └─ run(): spawns core thread,
//         ├─ with_config()              runs platform, blocks until exit
//         └─ with_scene_loader()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformEvent;
use crate::core::{CoreSystemsOrchestrator, InteractionConfig, SceneLoader, Session};
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Config**: [`InteractionConfig::default()`]
/// - **Scene loader**: none (scene requests are logged and dropped)
///
/// # Examples
///
/// ```no_run
/// use exhibit_interaction::EngineBuilder;
/// use exhibit_interaction::core::scene::SceneKind;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .build()
///     .init(|session| {
///         session.register_scene("Gallery", SceneKind::Menu);
///         session.register_scene("Pottery", SceneKind::Minigame);
///     })
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: InteractionConfig,
    loader: Option<Box<dyn SceneLoader>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: InteractionConfig::default(),
            loader: None,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Gesture timing and camera tweens advance by `1 / tps` per tick.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Replaces the tuning values (thresholds, durations, carousel layout).
    pub fn with_config(mut self, config: InteractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs the hook that loads scenes requested by the core.
    pub fn with_scene_loader(mut self, loader: impl SceneLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let mut orchestrator = CoreSystemsOrchestrator::new(self.config);
        if let Some(loader) = self.loader {
            orchestrator.set_scene_loader(loader);
        }

        Engine {
            orchestrator,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Exhibit runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► Session, InteractionController
///   │
///   └─► Platform (Event Loop)
///         └─► Window, touch + mouse input
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the session (scene registry, first scene request,
    /// services) before the engine starts running.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use exhibit_interaction::EngineBuilder;
    /// # use exhibit_interaction::core::scene::SceneKind;
    /// EngineBuilder::new()
    ///     .build()
    ///     .init(|session| {
    ///         session.register_scene("Gallery", SceneKind::Menu);
    ///         let _ = session.start_exploration();
    ///         session.exit_to_menu();
    ///     })
    ///     .run();
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Session),
    {
        info!("Initializing session");

        self.orchestrator.init_session(init_fn);

        info!("Session initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates a bounded channel for platform → core communication
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → logic thread terminates
    ///
    /// If the logic thread panics the error is logged on join; the
    /// platform keeps running so the window can still be closed.
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, "Exhibit");
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
