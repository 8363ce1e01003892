//=========================================================================
// Input Arbitrator
//=========================================================================
//
// Per-frame, mode-aware dispatch of touch input to the recognizers.
//
// Frame flow (by peak touch count):
//
//   blocked / lock held ──> cancel sessions, drop input
//   2+ touches ──> cancel swipe + drag, swipe blocked, pinch start/update
//   <2 touches ──> pinch tracking? end_pinch() → dispatch result
//   1 touch    ──> press / hold / move, by mode
//   releases   ──> swipe result, drag end, navigation exit
//   0 touches  ──> clear flags
//
// Press routing:
//   Initial      ignored
//   Exploration  object click → focus | double tap | swipe
//   Zoom         object click → open / refocus | double tap | drag
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, info, trace, warn};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::carousel::Carousel;
use super::transitions::TransitionContext;
use crate::core::camera::CameraState;
use crate::core::config::InteractionConfig;
use crate::core::focus_memory::FocusMemory;
use crate::core::gesture::{
    CameraDragSystem, DoubleTapDetector, PinchDetectionSystem, PinchDirection, PinchResult,
    SwipeDetectionSystem, SwipeResult,
};
use crate::core::input::{TouchId, TouchPhase, TouchPoint, TouchTracker};
use crate::core::mode::{InteractionMode, ModeChanged};
use crate::core::scene::{AudioCue, FocusTarget, SceneEntity, Services};

//=== ArbiterConfig =======================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Screen radius (pixels) of a direct tap on an object.
    pub click_radius: f32,
    /// Seconds of ignored input after a locked transition completes.
    pub post_transition_block: f64,
    /// Overview X offsets paged by horizontal swipes.
    pub carousel_offsets: Vec<f32>,
    pub carousel_start_index: usize,
    /// Frames to wait for the scene camera before giving up.
    pub camera_max_attempts: u32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            click_radius: 60.0,
            post_transition_block: 0.15,
            carousel_offsets: vec![-6.0, -3.0, 0.0, 3.0, 6.0],
            carousel_start_index: 2,
            camera_max_attempts: 30,
        }
    }
}

//=== Press ===============================================================

/// What the current single-finger press turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressClaim {
    Swipe,
    Drag,
    Consumed,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    id: TouchId,
    claim: PressClaim,
}

//=== InputArbitrator =====================================================

pub struct InputArbitrator {
    config: ArbiterConfig,

    swipe: SwipeDetectionSystem,
    pinch: PinchDetectionSystem,
    drag: CameraDragSystem,
    double_tap: DoubleTapDetector,
    carousel: Carousel,

    press: Option<Press>,
    swipe_blocked: bool,
    navigating: bool,

    now: f64,
    blocked_until: f64,
}

impl InputArbitrator {
    pub fn new(config: &InteractionConfig) -> Self {
        let arbiter = config.arbiter.clone();
        let carousel = Carousel::new(arbiter.carousel_offsets.clone(), arbiter.carousel_start_index);
        Self {
            swipe: SwipeDetectionSystem::new(config.swipe.clone()),
            pinch: PinchDetectionSystem::new(config.pinch.clone()),
            drag: CameraDragSystem::new(config.drag.clone()),
            double_tap: DoubleTapDetector::new(config.double_tap.clone()),
            carousel,
            config: arbiter,
            press: None,
            swipe_blocked: false,
            navigating: false,
            now: 0.0,
            blocked_until: 0.0,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn is_input_blocked(&self) -> bool {
        self.now < self.blocked_until
    }

    pub fn is_swipe_blocked(&self) -> bool {
        self.swipe_blocked
    }

    pub fn is_pinch_tracking(&self) -> bool {
        self.pinch.is_tracking()
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    //--- Control ----------------------------------------------------------

    /// Ignores all input for `seconds` from the latest frame.
    pub fn block_input_for(&mut self, seconds: f64) {
        let until = self.now + seconds.max(0.0);
        if until > self.blocked_until {
            debug!(target: "interaction", "Input blocked for {:.2}s", seconds);
            self.blocked_until = until;
        }
    }

    /// Drops half-finished gestures that a mode change made stale.
    pub fn on_mode_changed(&mut self, change: ModeChanged) {
        trace!(target: "interaction", "Mode {:?} → {:?}, resetting gestures", change.previous, change.current);
        self.double_tap.reset_pending();
        self.swipe.cancel_swipe();
        self.drag.cancel_drag();
        self.navigating = false;
        self.press = None;
    }

    //=====================================================================
    // Frame Processing
    //=====================================================================

    pub fn process_frame(
        &mut self,
        touches: &TouchTracker,
        now: f64,
        ctx: &mut TransitionContext<'_>,
        focus_memory: &mut FocusMemory,
        services: &mut Services,
    ) {
        self.now = now;
        let has_input = touches.peak_touch_count() > 0 || !touches.ended_this_frame().is_empty();

        if self.is_input_blocked() {
            if has_input {
                trace!(target: "interaction", "Input blocked ({:.2}s left)", self.blocked_until - now);
            }
            self.cancel_all(ctx);
            return;
        }

        if let Some(holder) = ctx.lock.holder() {
            if has_input {
                debug!(target: "interaction", "Gesture dropped: {} in progress", holder);
            }
            self.cancel_all(ctx);
            return;
        }

        let count = touches.touch_count();

        //--- Two or more fingers: pinch wins ----------------------------
        if touches.peak_touch_count() >= 2 {
            self.claim_for_pinch(ctx);
        }

        if count >= 2 {
            self.track_pinch(touches.touches(), ctx, services);
            return;
        }

        if self.pinch.is_tracking() {
            let lost_to_cancel = touches
                .ended_this_frame()
                .iter()
                .any(|point| point.phase == TouchPhase::Cancelled);
            if lost_to_cancel {
                debug!(target: "interaction", "Pinch contact cancelled, no result");
                self.pinch.cancel_pinch();
            } else {
                let result = self.pinch.end_pinch();
                if result.is_valid {
                    self.dispatch_pinch(result, ctx, services);
                }
            }
        }

        //--- One finger --------------------------------------------------
        if count == 1 && !self.swipe_blocked {
            if let Some(primary) = touches.primary().copied() {
                if touches.began(primary.id) {
                    self.on_press(primary.id, primary.position, ctx, focus_memory, services);
                } else if self.press.map_or(false, |p| p.id == primary.id) {
                    self.on_hold(&primary, touches.moved(primary.id), ctx);
                }
            }
        }

        //--- Releases ----------------------------------------------------
        for ended in touches.ended_this_frame() {
            if ended.phase == TouchPhase::Cancelled {
                self.on_cancel(ended.id, ctx);
                continue;
            }
            let tapped_within_frame = self.press.is_none()
                && touches.began(ended.id)
                && touches.peak_touch_count() == 1
                && !self.swipe_blocked;
            if tapped_within_frame {
                self.on_press(ended.id, ended.position, ctx, focus_memory, services);
            }
            if self.press.map_or(false, |p| p.id == ended.id) {
                self.on_release(ended, ctx, services);
            }
        }

        //--- No fingers --------------------------------------------------
        if count == 0 {
            self.swipe_blocked = false;
        }
    }

    fn cancel_all(&mut self, ctx: &mut TransitionContext<'_>) {
        self.swipe.cancel_swipe();
        self.pinch.cancel_pinch();
        self.drag.cancel_drag();
        self.press = None;
        if !ctx.lock.is_locked() {
            self.end_navigation(ctx);
        }
    }

    //=====================================================================
    // Pinch
    //=====================================================================

    fn claim_for_pinch(&mut self, ctx: &mut TransitionContext<'_>) {
        if !self.swipe_blocked {
            debug!(target: "interaction", "Second finger down, swipe blocked");
        }
        self.swipe.cancel_swipe();
        self.swipe_blocked = true;
        self.drag.cancel_drag();
        self.double_tap.reset_pending();
        self.press = None;
        self.end_navigation(ctx);
    }

    fn track_pinch(
        &mut self,
        points: &[TouchPoint],
        ctx: &mut TransitionContext<'_>,
        services: &mut Services,
    ) {
        let (a, b) = (points[0].position, points[1].position);

        if !self.pinch.is_tracking() {
            if !self.pinch.start_pinch(a, b, points[1].phase, self.now) {
                self.pinch.force_start_pinch(a, b, self.now);
            }
        } else {
            let update = self.pinch.update_pinch(a, b, self.now);
            if update.has_early_detection {
                info!(
                    target: "interaction",
                    "Pinch takes priority (Δ {:.1}px)",
                    update.distance_change
                );
            }
        }

        if let Some(result) = self.pinch.check_auto_trigger(self.now) {
            self.dispatch_pinch(result, ctx, services);
        }
    }

    fn dispatch_pinch(
        &mut self,
        result: PinchResult,
        ctx: &mut TransitionContext<'_>,
        services: &mut Services,
    ) {
        match (ctx.modes.current_mode(), result.direction) {
            (InteractionMode::Exploration, PinchDirection::Out) => {
                let Some(target) = pinch_target(result.pinch_center, ctx) else {
                    debug!(target: "interaction", "Pinch-out found nothing to focus");
                    return;
                };
                let Some(ticket) = ctx.lock.try_acquire("pinch zoom-in") else {
                    return;
                };
                if ctx.zoom_into(target, ticket, None).is_started() {
                    services.audio.play(AudioCue::ZoomIn);
                }
            }
            (InteractionMode::Zoom, PinchDirection::In) => {
                let Some(ticket) = ctx.lock.try_acquire("pinch zoom-out") else {
                    return;
                };
                if ctx.zoom_out(ticket, None).is_started() {
                    services.audio.play(AudioCue::ZoomOut);
                }
            }
            (mode, direction) => {
                debug!(target: "interaction", "Pinch {:?} ignored in {:?}", direction, mode);
            }
        }
    }

    //=====================================================================
    // Single Touch
    //=====================================================================

    fn on_press(
        &mut self,
        id: TouchId,
        position: Vec2,
        ctx: &mut TransitionContext<'_>,
        focus_memory: &mut FocusMemory,
        services: &mut Services,
    ) {
        let mode = ctx.modes.current_mode();
        let claim = match mode {
            InteractionMode::Initial => {
                trace!(target: "interaction", "Touch ignored in Initial mode");
                PressClaim::Consumed
            }

            InteractionMode::Exploration => {
                if let Some(entity) = self.clicked_entity(position, ctx) {
                    services.audio.play(AudioCue::Tap);
                    self.focus_entity(&entity, ctx, services);
                    PressClaim::Consumed
                } else if self.double_tap.check_for_double_tap(position, self.now, mode) {
                    if self.double_tap.handle_double_tap(position, ctx).is_started() {
                        services.audio.play(AudioCue::ZoomIn);
                    }
                    PressClaim::Consumed
                } else {
                    self.swipe.start_swipe(position, self.now);
                    PressClaim::Swipe
                }
            }

            InteractionMode::Zoom => {
                if let Some(entity) = self.clicked_entity(position, ctx) {
                    if is_focused(&entity, ctx) {
                        self.open_artefact(&entity, ctx, focus_memory, services);
                    } else {
                        services.audio.play(AudioCue::Tap);
                        self.focus_entity(&entity, ctx, services);
                    }
                    PressClaim::Consumed
                } else if self.double_tap.check_for_double_tap(position, self.now, mode) {
                    if self.double_tap.handle_double_tap(position, ctx).is_started() {
                        services.audio.play(AudioCue::ZoomOut);
                    }
                    PressClaim::Consumed
                } else {
                    self.swipe.cancel_swipe();
                    self.pinch.cancel_pinch();
                    self.drag.start_drag(position, self.now);
                    PressClaim::Drag
                }
            }
        };

        self.press = Some(Press { id, claim });
    }

    fn on_hold(&mut self, point: &TouchPoint, moved: bool, ctx: &mut TransitionContext<'_>) {
        let Some(press) = self.press else {
            return;
        };

        match press.claim {
            PressClaim::Swipe => {
                if moved {
                    self.swipe.update_swipe(point.position);
                }
            }
            PressClaim::Drag => {
                if !self.navigating && self.drag.is_held_still(self.now) {
                    self.begin_navigation(ctx);
                }
                if !moved {
                    return;
                }
                let Some(sample) = self.drag.update_drag(point.position, self.now) else {
                    return;
                };
                if let Some(camera) = ctx.camera.as_deref_mut() {
                    if self.navigating {
                        camera.orbit(sample.delta);
                    } else {
                        camera.pan(sample.delta);
                    }
                }
            }
            PressClaim::Consumed => {}
        }
    }

    fn on_release(&mut self, point: &TouchPoint, ctx: &mut TransitionContext<'_>, services: &mut Services) {
        let Some(press) = self.press.take() else {
            return;
        };

        match press.claim {
            PressClaim::Swipe => {
                self.swipe.update_swipe(point.position);
                let result = self.swipe.end_swipe(self.now);
                if result.is_valid && !self.swipe_blocked {
                    self.dispatch_swipe(result, ctx, services);
                }
            }
            PressClaim::Drag => {
                if let Some(result) = self.drag.end_drag() {
                    trace!(target: "interaction", "Drag ended after {:.0}px", result.total_distance);
                }
                self.end_navigation(ctx);
            }
            PressClaim::Consumed => {}
        }
    }

    /// A contact the platform cancelled ends its gesture without a result.
    fn on_cancel(&mut self, id: TouchId, ctx: &mut TransitionContext<'_>) {
        if !self.press.map_or(false, |p| p.id == id) {
            return;
        }
        trace!(target: "interaction", "Touch {:?} cancelled", id);
        self.press = None;
        self.swipe.cancel_swipe();
        self.drag.cancel_drag();
        self.end_navigation(ctx);
    }

    fn dispatch_swipe(&mut self, result: SwipeResult, ctx: &mut TransitionContext<'_>, services: &mut Services) {
        if ctx.modes.current_mode() != InteractionMode::Exploration || !result.direction.is_horizontal() {
            trace!(target: "interaction", "Swipe {:?} ignored", result.direction);
            return;
        }
        let Some(camera) = ctx.camera.as_deref_mut() else {
            return;
        };
        if let Some(offset) = self.carousel.step(result.direction) {
            camera.move_overview_to(offset);
            services.audio.play(AudioCue::CarouselStep);
        }
    }

    //=====================================================================
    // Objects
    //=====================================================================

    fn clicked_entity(&self, position: Vec2, ctx: &TransitionContext<'_>) -> Option<SceneEntity> {
        ctx.camera
            .as_deref()?
            .pick_entity(position, ctx.entities, self.config.click_radius)
            .cloned()
    }

    fn focus_entity(&mut self, entity: &SceneEntity, ctx: &mut TransitionContext<'_>, services: &mut Services) {
        let Some(ticket) = ctx.lock.try_acquire("object focus") else {
            return;
        };
        if ctx.zoom_into(FocusTarget::from(entity), ticket, None).is_started() {
            self.double_tap.reset_pending();
            services.audio.play(AudioCue::ZoomIn);
        }
    }

    /// Opens the focused artefact's minigame if progress allows it.
    fn open_artefact(
        &mut self,
        entity: &SceneEntity,
        ctx: &TransitionContext<'_>,
        focus_memory: &mut FocusMemory,
        services: &mut Services,
    ) {
        let Some(scene) = entity.minigame.as_deref() else {
            debug!(target: "interaction", "{} has no activity", entity.name);
            return;
        };

        if !services.is_unlocked(&entity.name, &entity.object_type) {
            info!(target: "interaction", "{} is locked", entity.name);
            services.audio.play(AudioCue::Locked);
            return;
        }

        match ctx.camera.as_deref() {
            Some(camera) => {
                focus_memory.save_current_focus(camera);
            }
            None => warn!(target: "interaction", "Opening {} without camera, focus not saved", scene),
        }

        info!(target: "interaction", "Opening {} for {}", scene, entity.name);
        services.audio.play(AudioCue::OpenArtefact);
        services.scenes.request_scene(scene, Some(&entity.object_type));
        self.block_input_for(self.config.post_transition_block);
    }

    //=====================================================================
    // Navigation
    //=====================================================================

    fn begin_navigation(&mut self, ctx: &mut TransitionContext<'_>) {
        let Some(camera) = ctx.camera.as_deref_mut() else {
            return;
        };
        if camera.switch_state(CameraState::Navigation).is_ok() {
            debug!(target: "interaction", "Hold detected, navigating");
            self.navigating = true;
        }
    }

    fn end_navigation(&mut self, ctx: &mut TransitionContext<'_>) {
        if !self.navigating {
            return;
        }
        self.navigating = false;
        if let Some(camera) = ctx.camera.as_deref_mut() {
            if camera.state() == CameraState::Navigation {
                // Cannot fail: Focus has no entry precondition beyond a target,
                // which Navigation implies.
                let _ = camera.switch_state(CameraState::Focus);
            }
        }
    }
}

//=== Helpers =============================================================

/// Object nearest the pinch center, else nearest the screen center.
fn pinch_target(center: Vec2, ctx: &TransitionContext<'_>) -> Option<FocusTarget> {
    let camera = ctx.camera.as_deref()?;
    camera
        .find_closest_object_to_screen_point(center, ctx.entities)
        .or_else(|| camera.find_closest_object_to_screen_point(camera.screen_center(), ctx.entities))
}

fn is_focused(entity: &SceneEntity, ctx: &TransitionContext<'_>) -> bool {
    ctx.camera
        .as_deref()
        .and_then(|camera| camera.focus_target())
        .map_or(false, |target| target.name == entity.name)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::CameraController;
    use crate::core::focus_memory::FocusMemoryConfig;
    use crate::core::input::InputEvent;
    use crate::core::interaction::TransitionLock;
    use crate::core::mode::{GameModeManager, ModeSubscription};
    use crate::core::scene::{AudioCues, ObjectType, ProgressQuery, SceneRequestQueue};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use glam::Vec3;

    //--- Test Helpers -----------------------------------------------------

    struct RecordingAudio(Sender<AudioCue>);

    impl AudioCues for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            let _ = self.0.send(cue);
        }
    }

    struct Unlocked;

    impl ProgressQuery for Unlocked {
        fn is_unlocked(&self, _entity: &str, _object_type: &ObjectType) -> bool {
            true
        }
    }

    /// Projects to the screen center from the overview pose.
    fn vase() -> SceneEntity {
        SceneEntity::new("vase", Vec3::new(0.0, 1.0, 0.0), ObjectType::new("amphora"))
            .with_minigame("PotteryRestoration")
    }

    const CENTER: Vec2 = Vec2::new(540.0, 960.0);
    const EMPTY: Vec2 = Vec2::new(100.0, 300.0);

    fn down(id: u64, at: Vec2) -> InputEvent {
        InputEvent::touch(id, at.x, at.y, TouchPhase::Began)
    }

    fn moved(id: u64, at: Vec2) -> InputEvent {
        InputEvent::touch(id, at.x, at.y, TouchPhase::Moved)
    }

    fn up(id: u64, at: Vec2) -> InputEvent {
        InputEvent::touch(id, at.x, at.y, TouchPhase::Ended)
    }

    fn cancelled(id: u64, at: Vec2) -> InputEvent {
        InputEvent::touch(id, at.x, at.y, TouchPhase::Cancelled)
    }

    struct Rig {
        arbiter: InputArbitrator,
        tracker: TouchTracker,
        modes: GameModeManager,
        subscription: ModeSubscription,
        lock: TransitionLock,
        camera: CameraController,
        entities: Vec<SceneEntity>,
        memory: FocusMemory,
        services: Services,
        requests: SceneRequestQueue,
        cues: Receiver<AudioCue>,
    }

    impl Rig {
        fn exploring(entities: Vec<SceneEntity>) -> Self {
            let config = InteractionConfig::default();
            let mut modes = GameModeManager::new();
            let subscription = modes.subscribe();
            modes.start_exploration_mode().unwrap();

            let requests = SceneRequestQueue::new();
            let (sender, cues) = unbounded();
            let services = Services::new(requests.handle()).with_audio(RecordingAudio(sender));

            let mut rig = Self {
                arbiter: InputArbitrator::new(&config),
                tracker: TouchTracker::new(),
                modes,
                subscription,
                lock: TransitionLock::new(),
                camera: CameraController::new(config.camera.clone()),
                entities,
                memory: FocusMemory::new(FocusMemoryConfig::default()),
                services,
                requests,
                cues,
            };
            rig.drain_mode_changes();
            rig
        }

        fn zoomed_on_vase() -> Self {
            let mut rig = Self::exploring(vec![vase()]);
            let ticket = rig.lock.try_acquire("setup").unwrap();
            let mut ctx = TransitionContext {
                modes: &mut rig.modes,
                lock: &mut rig.lock,
                camera: Some(&mut rig.camera),
                entities: &rig.entities,
            };
            assert!(ctx.zoom_into(FocusTarget::from(&vase()), ticket, None).is_started());
            rig.settle();
            rig.drain_mode_changes();
            rig
        }

        fn drain_mode_changes(&mut self) {
            for change in self.subscription.drain() {
                self.arbiter.on_mode_changed(change);
            }
        }

        fn frame(&mut self, now: f64, events: &[InputEvent]) {
            self.tracker.clear();
            self.tracker.process_events(events);
            self.tracker.finalize_frame();
            self.drain_mode_changes();

            let mut ctx = TransitionContext {
                modes: &mut self.modes,
                lock: &mut self.lock,
                camera: Some(&mut self.camera),
                entities: &self.entities,
            };
            self.arbiter
                .process_frame(&self.tracker, now, &mut ctx, &mut self.memory, &mut self.services);
        }

        /// Runs the camera to rest, releasing any lock it held.
        fn settle(&mut self) {
            for _ in 0..100 {
                if let Some(finished) = self.camera.tick(0.1) {
                    if let Some(ticket) = finished.ticket {
                        self.lock.release(ticket);
                    }
                    return;
                }
            }
            panic!("camera never settled");
        }

        fn swipe(&mut self, start: f64, from: Vec2, to: Vec2) {
            self.frame(start, &[down(1, from)]);
            self.frame(start + 0.1, &[moved(1, to)]);
            self.frame(start + 0.2, &[up(1, to)]);
        }

        fn tap(&mut self, start: f64, at: Vec2) {
            self.frame(start, &[down(1, at)]);
            self.frame(start + 0.05, &[up(1, at)]);
        }

        fn cues(&self) -> Vec<AudioCue> {
            self.cues.try_iter().collect()
        }
    }

    //=====================================================================
    // Pinch Priority
    //=====================================================================

    #[test]
    fn second_finger_cancels_swipe() {
        let mut rig = Rig::exploring(vec![]);
        let a = Vec2::new(100.0, 1500.0);
        let b = Vec2::new(400.0, 1500.0);

        rig.frame(0.0, &[down(1, a)]);
        rig.frame(0.05, &[moved(1, a + Vec2::X * 20.0)]);
        assert!(rig.arbiter.swipe.is_tracking(), "one finger moving is a swipe");

        rig.frame(0.1, &[down(2, b)]);
        assert!(rig.arbiter.is_swipe_blocked());
        assert!(rig.arbiter.is_pinch_tracking());
        assert!(!rig.arbiter.swipe.is_tracking(), "swipe session dropped, no result");
        let a = a + Vec2::X * 20.0;

        // Fingers drift right together: would be a swipe on its own.
        rig.frame(0.2, &[moved(1, a + Vec2::X * 150.0), moved(2, b + Vec2::X * 150.0)]);
        rig.frame(0.3, &[up(1, a + Vec2::X * 150.0)]);
        assert!(rig.arbiter.is_swipe_blocked(), "stays blocked while a finger is down");
        rig.frame(0.4, &[up(2, b + Vec2::X * 150.0)]);

        assert!(!rig.arbiter.is_swipe_blocked());
        assert!(!rig.arbiter.swipe.is_tracking());
        assert_eq!(rig.arbiter.carousel().index(), 2, "no carousel step");
        assert!(rig.cues().is_empty());
        assert_eq!(rig.modes.current_mode(), InteractionMode::Exploration);
    }

    #[test]
    fn pinch_in_during_exploration_is_ignored() {
        let mut rig = Rig::exploring(vec![vase()]);
        rig.frame(0.0, &[down(1, Vec2::new(300.0, 960.0)), down(2, Vec2::new(780.0, 960.0))]);
        rig.frame(0.1, &[moved(1, Vec2::new(450.0, 960.0)), moved(2, Vec2::new(630.0, 960.0))]);
        rig.frame(0.2, &[up(1, Vec2::new(450.0, 960.0)), up(2, Vec2::new(630.0, 960.0))]);

        assert_eq!(rig.modes.current_mode(), InteractionMode::Exploration);
        assert!(!rig.lock.is_locked());
    }

    //=====================================================================
    // Scenarios
    //=====================================================================

    #[test]
    fn pinch_out_zooms_onto_nearest_object() {
        let mut rig = Rig::exploring(vec![vase()]);
        rig.frame(0.0, &[down(1, Vec2::new(500.0, 960.0)), down(2, Vec2::new(580.0, 960.0))]);
        rig.frame(0.1, &[moved(1, Vec2::new(400.0, 960.0)), moved(2, Vec2::new(680.0, 960.0))]);
        rig.frame(0.2, &[up(1, Vec2::new(400.0, 960.0)), up(2, Vec2::new(680.0, 960.0))]);

        assert_eq!(rig.modes.current_mode(), InteractionMode::Zoom);
        assert_eq!(rig.camera.state(), CameraState::Focus);
        assert_eq!(rig.camera.focus_target().map(|t| t.name.as_str()), Some("vase"));
        assert!(rig.lock.is_locked(), "held until the camera arrives");
        assert_eq!(rig.cues(), vec![AudioCue::ZoomIn]);

        rig.settle();
        assert!(!rig.lock.is_locked());
    }

    #[test]
    fn cancelled_pinch_does_not_zoom() {
        let mut rig = Rig::exploring(vec![vase()]);
        let (a, b) = (Vec2::new(500.0, 960.0), Vec2::new(580.0, 960.0));
        let (a2, b2) = (Vec2::new(400.0, 960.0), Vec2::new(680.0, 960.0));
        rig.frame(0.0, &[down(1, a), down(2, b)]);
        rig.frame(0.1, &[moved(1, a2), moved(2, b2)]);
        rig.frame(0.2, &[cancelled(1, a2), cancelled(2, b2)]);

        assert!(!rig.arbiter.is_pinch_tracking());
        assert_eq!(rig.modes.current_mode(), InteractionMode::Exploration);
        assert_eq!(rig.camera.state(), CameraState::Overview);
        assert!(!rig.lock.is_locked());
        assert!(rig.cues().is_empty());
    }

    #[test]
    fn one_cancelled_finger_drops_pinch() {
        let mut rig = Rig::exploring(vec![vase()]);
        let (a, b) = (Vec2::new(500.0, 960.0), Vec2::new(580.0, 960.0));
        let (a2, b2) = (Vec2::new(400.0, 960.0), Vec2::new(680.0, 960.0));
        rig.frame(0.0, &[down(1, a), down(2, b)]);
        rig.frame(0.1, &[moved(1, a2), moved(2, b2)]);
        rig.frame(0.2, &[cancelled(2, b2)]);
        rig.frame(0.3, &[up(1, a2)]);

        assert_eq!(rig.modes.current_mode(), InteractionMode::Exploration);
        assert!(!rig.lock.is_locked());
    }

    #[test]
    fn pinch_out_falls_back_to_screen_center() {
        let mut rig = Rig::exploring(vec![vase()]);
        let (a, b) = (Vec2::new(80.0, 1700.0), Vec2::new(160.0, 1700.0));
        rig.frame(0.0, &[down(1, a), down(2, b)]);
        rig.frame(0.1, &[moved(1, a - Vec2::X * 60.0), moved(2, b + Vec2::X * 60.0)]);
        rig.frame(0.2, &[up(1, a - Vec2::X * 60.0), up(2, b + Vec2::X * 60.0)]);

        assert_eq!(rig.modes.current_mode(), InteractionMode::Zoom);
        assert_eq!(rig.camera.focus_target().map(|t| t.name.as_str()), Some("vase"));
    }

    #[test]
    fn double_tap_in_zoom_returns_fast() {
        let mut rig = Rig::zoomed_on_vase();
        rig.tap(10.0, EMPTY);
        rig.frame(10.15, &[down(1, EMPTY)]);

        assert_eq!(rig.modes.current_mode(), InteractionMode::Exploration);
        assert_eq!(rig.camera.state(), CameraState::Overview);
        assert!(rig.camera.focus_target().is_none());

        let fast = rig.camera.config().fast_duration;
        let finished = rig.camera.tick(fast).expect("fast profile completes");
        rig.lock.release(finished.ticket.unwrap());
        assert!(!rig.lock.is_locked());
    }

    #[test]
    fn held_lock_refuses_competing_gestures() {
        let mut rig = Rig::exploring(vec![vase()]);
        rig.tap(0.0, CENTER);
        assert_eq!(rig.modes.current_mode(), InteractionMode::Zoom);
        assert_eq!(rig.lock.holder(), Some("object focus"));

        // Mid-transition: a double tap and a pinch-in are both dropped.
        rig.tap(0.2, EMPTY);
        rig.tap(0.3, EMPTY);
        rig.frame(0.4, &[down(1, Vec2::new(300.0, 960.0)), down(2, Vec2::new(780.0, 960.0))]);
        rig.frame(0.5, &[moved(1, Vec2::new(500.0, 960.0)), moved(2, Vec2::new(580.0, 960.0))]);
        rig.frame(0.6, &[up(1, Vec2::new(500.0, 960.0)), up(2, Vec2::new(580.0, 960.0))]);

        assert_eq!(rig.modes.current_mode(), InteractionMode::Zoom);
        assert_eq!(rig.lock.holder(), Some("object focus"));
    }

    //=====================================================================
    // Carousel
    //=====================================================================

    #[test]
    fn swipes_page_carousel_and_clamp() {
        let mut rig = Rig::exploring(vec![]);
        let (left, right) = (Vec2::new(200.0, 1500.0), Vec2::new(600.0, 1500.0));

        rig.swipe(0.0, left, right);
        assert_eq!(rig.arbiter.carousel().index(), 3);
        assert_eq!(rig.camera.overview_offset(), 3.0);

        rig.swipe(1.0, left, right);
        rig.swipe(2.0, left, right);
        assert_eq!(rig.arbiter.carousel().index(), 4, "no wraparound");
        assert_eq!(rig.cues(), vec![AudioCue::CarouselStep, AudioCue::CarouselStep]);

        rig.swipe(3.0, right, left);
        assert_eq!(rig.arbiter.carousel().index(), 3);
    }

    #[test]
    fn cancelled_touch_does_not_page() {
        let mut rig = Rig::exploring(vec![]);
        let (left, right) = (Vec2::new(200.0, 1500.0), Vec2::new(600.0, 1500.0));

        rig.frame(0.0, &[down(1, left)]);
        rig.frame(0.1, &[moved(1, right)]);
        rig.frame(0.2, &[cancelled(1, right)]);

        assert_eq!(rig.arbiter.carousel().index(), 2);
        assert!(!rig.arbiter.swipe.is_tracking());
        assert!(rig.cues().is_empty());

        // The next touch starts from a clean slate.
        rig.swipe(1.0, left, right);
        assert_eq!(rig.arbiter.carousel().index(), 3);
    }

    #[test]
    fn cancelled_tap_does_not_focus() {
        let mut rig = Rig::exploring(vec![vase()]);
        rig.frame(0.0, &[down(1, CENTER), cancelled(1, CENTER)]);
        rig.frame(0.1, &[down(1, EMPTY), cancelled(1, EMPTY)]);
        assert!(!rig.arbiter.double_tap.has_pending_tap());
        assert_eq!(rig.modes.current_mode(), InteractionMode::Exploration);
        assert!(!rig.lock.is_locked());
        assert!(rig.cues().is_empty());
    }

    #[test]
    fn vertical_swipe_does_not_page() {
        let mut rig = Rig::exploring(vec![]);
        rig.swipe(0.0, Vec2::new(300.0, 1600.0), Vec2::new(300.0, 1100.0));
        assert_eq!(rig.arbiter.carousel().index(), 2);
    }

    //=====================================================================
    // Blocking
    //=====================================================================

    #[test]
    fn blocked_input_is_dropped_until_expiry() {
        let mut rig = Rig::exploring(vec![]);
        let (left, right) = (Vec2::new(200.0, 1500.0), Vec2::new(600.0, 1500.0));
        rig.frame(1.0, &[]);
        rig.arbiter.block_input_for(0.5);
        assert!(rig.arbiter.is_input_blocked());

        rig.swipe(1.1, left, right);
        assert_eq!(rig.arbiter.carousel().index(), 2);

        rig.swipe(2.0, left, right);
        assert!(!rig.arbiter.is_input_blocked());
        assert_eq!(rig.arbiter.carousel().index(), 3);
    }

    #[test]
    fn initial_mode_ignores_touches() {
        let mut rig = Rig::exploring(vec![vase()]);
        rig.modes.exit_to_initial_mode();
        rig.tap(0.0, CENTER);
        rig.tap(0.1, CENTER);
        assert_eq!(rig.modes.current_mode(), InteractionMode::Initial);
        assert!(!rig.lock.is_locked());
    }

    //=====================================================================
    // Zoom Interactions
    //=====================================================================

    #[test]
    fn tapping_focused_object_opens_activity() {
        let mut rig = Rig::zoomed_on_vase();
        rig.services.progress = Some(Box::new(Unlocked));
        rig.cues();

        rig.tap(5.0, CENTER);

        let requests = rig.requests.take();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, "PotteryRestoration");
        assert_eq!(rig.memory.record().map(|r| r.entity_name.as_str()), Some("vase"));
        assert_eq!(rig.cues(), vec![AudioCue::OpenArtefact]);
        assert!(rig.arbiter.is_input_blocked());
    }

    #[test]
    fn locked_object_plays_cue_only() {
        let mut rig = Rig::zoomed_on_vase();
        rig.cues();

        rig.tap(5.0, CENTER);

        assert!(rig.requests.is_empty());
        assert!(!rig.memory.has_saved_focus());
        assert_eq!(rig.cues(), vec![AudioCue::Locked]);
    }

    #[test]
    fn hold_enters_navigation_and_release_returns_to_focus() {
        let mut rig = Rig::zoomed_on_vase();
        rig.frame(5.0, &[down(1, EMPTY)]);
        rig.frame(5.6, &[]);
        assert!(rig.arbiter.is_navigating());
        assert_eq!(rig.camera.state(), CameraState::Navigation);

        rig.frame(5.7, &[moved(1, EMPTY + Vec2::new(80.0, 0.0))]);
        rig.frame(5.8, &[up(1, EMPTY + Vec2::new(80.0, 0.0))]);
        assert!(!rig.arbiter.is_navigating());
        assert_eq!(rig.camera.state(), CameraState::Focus);
        assert!(!rig.lock.is_locked(), "look-around never takes the lock");
    }

    #[test]
    fn drag_pans_focus_camera() {
        let mut rig = Rig::zoomed_on_vase();
        let before = rig.camera.pose().position;
        rig.frame(5.0, &[down(1, EMPTY)]);
        rig.frame(5.05, &[moved(1, EMPTY + Vec2::new(60.0, 0.0))]);
        rig.frame(5.1, &[up(1, EMPTY + Vec2::new(60.0, 0.0))]);

        assert!(rig.camera.pose().position.distance(before) > 1e-4);
        assert_eq!(rig.camera.state(), CameraState::Focus);
    }
}
