//=========================================================================
// Session
//=========================================================================
//
// Application-lifetime state shared by every scene.
//
// Architecture:
//   Session ──owns──> GameModeManager, TransitionLock, FocusMemory,
//                     SceneRegistry, Services, InteractionConfig
//   Scene   ──owns──> InteractionController (Menu scenes only)
//
// Scene lifecycle:
//   on_scene_loaded(name)   Menu → arm focus restore, build controller
//                           Minigame → no controller
//   on_scene_unloading(c)   detach controller, release orphaned lock
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::InteractionConfig;
use crate::core::focus_memory::FocusMemory;
use crate::core::interaction::{InteractionController, SceneBindings, TransitionLock};
use crate::core::mode::{GameModeManager, ModeError};
use crate::core::scene::{SceneKind, SceneRegistry, Services};

//=== Session =============================================================

pub struct Session {
    pub(crate) modes: GameModeManager,
    pub(crate) lock: TransitionLock,
    pub(crate) focus_memory: FocusMemory,
    pub(crate) scenes: SceneRegistry,
    pub(crate) services: Services,
    config: InteractionConfig,
    active_scene: Option<String>,
}

impl Session {
    pub fn new(config: InteractionConfig, services: Services) -> Self {
        Self {
            modes: GameModeManager::new(),
            lock: TransitionLock::new(),
            focus_memory: FocusMemory::new(config.focus_memory.clone()),
            scenes: SceneRegistry::new(),
            services,
            config,
            active_scene: None,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn modes(&self) -> &GameModeManager {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut GameModeManager {
        &mut self.modes
    }

    pub fn lock(&self) -> &TransitionLock {
        &self.lock
    }

    pub fn focus_memory(&self) -> &FocusMemory {
        &self.focus_memory
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active_scene.as_deref()
    }

    //--- Scenes -----------------------------------------------------------

    pub fn register_scene(&mut self, name: impl Into<String>, kind: SceneKind) {
        self.scenes.register(name, kind);
    }

    /// Leaves the attract screen.
    pub fn start_exploration(&mut self) -> Result<(), ModeError> {
        self.modes.start_exploration_mode()
    }

    /// Hooks a freshly loaded scene into the session.
    ///
    /// Menu scenes get an InteractionController and replay any saved
    /// focus. Minigames run their own input and get none. An unregistered
    /// scene is treated as a minigame.
    pub fn on_scene_loaded(&mut self, name: &str, bindings: SceneBindings) -> Option<InteractionController> {
        self.active_scene = Some(name.to_string());

        let kind = self.scenes.kind_of(name).unwrap_or_else(|| {
            warn!(target: "scene", "Scene {} is not registered, treating as minigame", name);
            SceneKind::Minigame
        });
        info!(target: "scene", "Loaded {} ({:?})", name, kind);

        match kind {
            SceneKind::Menu => {
                self.focus_memory.begin_restore();
                Some(InteractionController::new(bindings, self))
            }
            SceneKind::Minigame => None,
        }
    }

    /// Tears down the active scene's hooks. `controller` is `None` for
    /// scenes that were given none.
    pub fn on_scene_unloading(&mut self, controller: Option<InteractionController>) {
        if let Some(name) = self.active_scene.take() {
            info!(target: "scene", "Unloading {}", name);
        }
        if let Some(controller) = controller {
            controller.detach(self);
        }
    }

    /// Requests the menu scene, e.g. from a minigame's back button.
    ///
    /// Returns `false` if no Menu scene is registered.
    pub fn exit_to_menu(&mut self) -> bool {
        let Some(menu) = self.scenes.menu_scene().map(str::to_string) else {
            warn!(target: "scene", "Exit to menu requested with no menu registered");
            return false;
        };
        self.services.scenes.request_scene(&menu, None);
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
