//=========================================================================
// Camera Controller
//=========================================================================
//
// Owns the camera state, the focus target and the in-flight transition.
//
// Frame flow:
//   switch_state() / move_overview_to()  → start_transition()
//   pan() / orbit()                      → follow_desired_pose()
//   tick(dt)                             → pose sample, completion
//
// Only one transition runs at a time. Starting another replaces it from
// the current sampled pose, and any lock ticket it carried moves to the
// replacement so the lock is released exactly once.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Quat, Vec2, Vec3};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::pose::CameraPose;
use super::tween::Tween;
use super::{CameraConfig, CameraError, CameraState};
use crate::core::interaction::LockTicket;
use crate::core::scene::{FocusTarget, SceneEntity};

//=== TransitionKind ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Overview,
    Focus,
    Navigation,
    Carousel,
}

/// Reported by `tick()` on the frame a transition reaches its target.
#[derive(Debug)]
pub struct TransitionFinished {
    pub kind: TransitionKind,
    /// Lock ticket the transition was holding, to be released by the caller.
    pub ticket: Option<LockTicket>,
}

//=== Internal State ======================================================

struct ActiveTransition {
    kind: TransitionKind,
    tween: Tween<CameraPose>,
    ticket: Option<LockTicket>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Orbit {
    yaw: f32,
    pitch: f32,
}

//=== CameraController ====================================================

pub struct CameraController {
    config: CameraConfig,
    state: CameraState,
    pose: CameraPose,
    focus_target: Option<FocusTarget>,
    transition: Option<ActiveTransition>,
    duration_override: Option<f32>,

    overview_offset_x: f32,
    pan: Vec2,
    orbit: Orbit,
    viewport: Vec2,
}

impl CameraController {
    //--- Construction -----------------------------------------------------

    /// Creates a camera resting at the overview pose.
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            config,
            state: CameraState::Overview,
            pose: CameraPose::new(Vec3::ZERO, Quat::IDENTITY),
            focus_target: None,
            transition: None,
            duration_override: None,
            overview_offset_x: 0.0,
            pan: Vec2::ZERO,
            orbit: Orbit::default(),
            viewport: Vec2::new(1080.0, 1920.0),
        };
        camera.pose = camera.overview_pose();
        camera
    }

    /// Starts at a carousel position without animating there.
    pub fn with_overview_offset(mut self, x: f32) -> Self {
        self.snap_overview_to(x);
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn focus_target(&self) -> Option<&FocusTarget> {
        self.focus_target.as_ref()
    }

    pub fn overview_offset(&self) -> f32 {
        self.overview_offset_x
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn active_transition(&self) -> Option<TransitionKind> {
        self.transition.as_ref().map(|t| t.kind)
    }

    pub fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    //--- Configuration ----------------------------------------------------

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    /// Overrides the duration of state transitions until reset.
    pub fn set_transition_duration(&mut self, seconds: f32) {
        self.duration_override = Some(seconds.max(0.0));
    }

    pub fn reset_transition_duration(&mut self) {
        self.duration_override = None;
    }

    //=====================================================================
    // State Machine
    //=====================================================================

    /// Binds a focus target without moving the camera.
    pub fn set_focus_target(&mut self, target: FocusTarget) {
        debug!(target: "camera", "Focus target set: {}", target.name);
        self.focus_target = Some(target);
        self.pan = Vec2::ZERO;
    }

    /// Runs the exit hook of the current state and the enter hook of
    /// `next`, returning the state actually entered.
    ///
    /// Entering Focus without a target lands in Overview instead.
    pub fn switch_state(&mut self, next: CameraState) -> Result<CameraState, CameraError> {
        if next == CameraState::Navigation && self.state != CameraState::Focus {
            let error = CameraError::NavigationRequiresFocus { current: self.state };
            warn!(target: "camera", "Rejected: {}", error);
            return Err(error);
        }

        let previous = self.state;
        self.exit_state(previous);
        let entered = self.enter_state(next);
        info!(target: "camera", "{:?} → {:?}", previous, entered);
        Ok(entered)
    }

    fn exit_state(&mut self, state: CameraState) {
        if state == CameraState::Navigation {
            self.orbit = Orbit::default();
        }
    }

    fn enter_state(&mut self, next: CameraState) -> CameraState {
        match next {
            CameraState::Overview => {
                self.focus_target = None;
                self.pan = Vec2::ZERO;
                self.state = CameraState::Overview;
                self.transition_to_overview();
            }
            CameraState::Focus => {
                if self.focus_target.is_none() {
                    warn!(target: "camera", "Focus entered without a target, using Overview");
                    self.state = CameraState::Overview;
                    self.transition_to_overview();
                } else {
                    self.state = CameraState::Focus;
                    self.transition_to_focus();
                }
            }
            CameraState::Navigation => {
                self.state = CameraState::Navigation;
                self.transition_to_navigation();
            }
        }
        self.state
    }

    //=====================================================================
    // Transitions
    //=====================================================================

    pub fn transition_to_overview(&mut self) {
        let target = self.overview_pose();
        let duration = self.state_duration();
        self.start_transition(TransitionKind::Overview, target, duration);
    }

    pub fn transition_to_focus(&mut self) {
        match self.focus_pose() {
            Some(target) => {
                let duration = self.state_duration();
                self.start_transition(TransitionKind::Focus, target, duration);
            }
            None => {
                warn!(target: "camera", "No focus target, moving to Overview pose");
                self.transition_to_overview();
            }
        }
    }

    /// Settles on the focus pose with look-around active.
    pub fn transition_to_navigation(&mut self) {
        match self.focus_pose() {
            Some(target) => {
                let duration = self.config.fast_duration;
                self.start_transition(TransitionKind::Navigation, target, duration);
            }
            None => {
                warn!(target: "camera", "No focus target, moving to Overview pose");
                self.transition_to_overview();
            }
        }
    }

    /// Moves the overview vantage to carousel position `x`.
    ///
    /// Animates only while in Overview; otherwise the new offset applies
    /// the next time Overview is entered.
    /// Sets the carousel position without animating. The pose only jumps
    /// while the camera rests at the overview.
    pub fn snap_overview_to(&mut self, x: f32) {
        self.overview_offset_x = x;
        if self.state == CameraState::Overview && self.transition.is_none() {
            self.pose = self.overview_pose();
        }
    }

    pub fn move_overview_to(&mut self, x: f32) {
        self.overview_offset_x = x;
        if self.state == CameraState::Overview {
            let target = self.overview_pose();
            let duration = self.config.carousel_duration;
            self.start_transition(TransitionKind::Carousel, target, duration);
        }
    }

    /// Attaches the lock ticket to the running transition, to be handed
    /// back by `tick()` on completion.
    ///
    /// Returns the ticket unchanged if there is no transition to hold it
    /// or the transition already holds one.
    pub fn hold_lock_until_complete(&mut self, ticket: LockTicket) -> Result<(), LockTicket> {
        match &mut self.transition {
            Some(transition) if transition.ticket.is_none() => {
                transition.ticket = Some(ticket);
                Ok(())
            }
            _ => Err(ticket),
        }
    }

    /// Advances the running transition.
    pub fn tick(&mut self, dt: f32) -> Option<TransitionFinished> {
        let transition = self.transition.as_mut()?;
        self.pose = transition.tween.advance(dt);
        if !transition.tween.is_finished() {
            return None;
        }

        let finished = self.transition.take()?;
        self.pose = finished.tween.target();
        debug!(target: "camera", "{:?} transition complete", finished.kind);
        Some(TransitionFinished {
            kind: finished.kind,
            ticket: finished.ticket,
        })
    }

    /// Stops the running transition where it is.
    ///
    /// Used on scene teardown; returns the lock ticket it was holding.
    pub fn abandon_transition(&mut self) -> Option<LockTicket> {
        let transition = self.transition.take()?;
        info!(
            target: "camera",
            "{:?} transition abandoned at {:.0}%",
            transition.kind,
            transition.tween.progress() * 100.0
        );
        transition.ticket
    }

    fn start_transition(&mut self, kind: TransitionKind, target: CameraPose, duration: f32) {
        let ticket = match self.transition.take() {
            Some(previous) => {
                debug!(
                    target: "camera",
                    "{:?} transition interrupted by {:?}",
                    previous.kind,
                    kind
                );
                previous.ticket
            }
            None => None,
        };

        trace!(target: "camera", "{:?} transition over {:.2}s", kind, duration);
        self.transition = Some(ActiveTransition {
            kind,
            tween: Tween::new(self.pose, target, duration, self.config.easing),
            ticket,
        });
    }

    fn state_duration(&self) -> f32 {
        self.duration_override.unwrap_or(self.config.default_duration)
    }

    //=====================================================================
    // Direct Manipulation
    //=====================================================================

    /// Pans the close-up by a screen-space drag delta. Focus only.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if self.state != CameraState::Focus {
            return false;
        }
        let next = self.pan + Vec2::new(-delta.x, delta.y) * self.config.pan_speed;
        self.pan = next.clamp_length_max(self.config.pan_limit);
        self.follow_desired_pose();
        true
    }

    /// Orbits around the focus target by a screen-space drag delta.
    /// Navigation only.
    pub fn orbit(&mut self, delta: Vec2) -> bool {
        if self.state != CameraState::Navigation {
            return false;
        }
        let max_yaw = self.config.max_orbit_yaw;
        let max_pitch = self.config.max_orbit_pitch;
        self.orbit.yaw = (self.orbit.yaw - delta.x * self.config.orbit_speed).clamp(-max_yaw, max_yaw);
        self.orbit.pitch = (self.orbit.pitch - delta.y * self.config.orbit_speed).clamp(-max_pitch, max_pitch);
        self.follow_desired_pose();
        true
    }

    fn follow_desired_pose(&mut self) {
        let Some(desired) = self.focus_pose() else {
            return;
        };
        match &mut self.transition {
            Some(t) if matches!(t.kind, TransitionKind::Focus | TransitionKind::Navigation) => {
                t.tween.retarget(desired);
            }
            Some(_) => {}
            None => self.pose = desired,
        }
    }

    //=====================================================================
    // Poses
    //=====================================================================

    fn overview_pose(&self) -> CameraPose {
        let shift = Vec3::X * self.overview_offset_x;
        CameraPose::looking_at(
            self.config.overview_position + shift,
            self.config.overview_look_at + shift,
        )
    }

    fn focus_pose(&self) -> Option<CameraPose> {
        let target = self.focus_target.as_ref()?.position;
        let offset = self.config.focus_offset;

        let basis = CameraPose::looking_at(target + offset, target);
        let shift = basis.right() * self.pan.x + basis.up() * self.pan.y;
        let orbit = Quat::from_rotation_y(self.orbit.yaw) * Quat::from_rotation_x(self.orbit.pitch);

        Some(CameraPose::looking_at(target + orbit * offset + shift, target + shift))
    }

    //=====================================================================
    // Screen Space
    //=====================================================================

    fn view_projection(&self) -> Mat4 {
        let aspect = self.viewport.x / self.viewport.y;
        let projection = Mat4::perspective_rh(
            self.config.fov_y_degrees.to_radians(),
            aspect,
            self.config.near,
            self.config.far,
        );
        projection * self.pose.view_matrix()
    }

    /// Projects a world point to pixels (origin top-left, y down).
    ///
    /// Returns `None` for points behind the camera.
    pub fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Nearest interactable entity whose projection lies within `radius`
    /// pixels of `point`.
    pub fn pick_entity<'a>(
        &self,
        point: Vec2,
        entities: &'a [SceneEntity],
        radius: f32,
    ) -> Option<&'a SceneEntity> {
        entities
            .iter()
            .filter(|entity| entity.interactable)
            .filter_map(|entity| {
                self.world_to_screen(entity.position)
                    .map(|screen| (screen.distance(point), entity))
            })
            .filter(|(distance, _)| *distance <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, entity)| entity)
    }

    /// Nearest focusable object to a screen point, within the pick radius.
    pub fn find_closest_object_to_screen_point(
        &self,
        point: Vec2,
        entities: &[SceneEntity],
    ) -> Option<FocusTarget> {
        self.pick_entity(point, entities, self.config.pick_radius)
            .map(FocusTarget::from)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
