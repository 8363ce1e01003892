//=========================================================================
// Touch Tracker
//=========================================================================
//
// Low-level touch state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → active contacts (ordered) → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, TouchId, TouchPhase, TouchSample};

//=== TouchPoint ==========================================================

/// A contact currently on (or just lifted from) the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    /// Where the contact began.
    pub start_position: Vec2,
    /// Latest known position.
    pub position: Vec2,
    /// Position at the end of the previous frame.
    pub previous_position: Vec2,
    /// Phase as of the latest sample this frame.
    pub phase: TouchPhase,
}

impl TouchPoint {
    fn began(sample: &TouchSample) -> Self {
        Self {
            id: sample.id,
            start_position: sample.position,
            position: sample.position,
            previous_position: sample.position,
            phase: TouchPhase::Began,
        }
    }

    /// Movement since the previous frame.
    pub fn frame_delta(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Distance from where the contact began.
    pub fn travelled(&self) -> f32 {
        self.start_position.distance(self.position)
    }
}

//=== TouchTracker ========================================================

/// Tracks persistent state (contacts held) and per-frame deltas
/// (contacts began/ended this frame).
/// Frame lifecycle: clear() → process_events() → finalize_frame() → query.
pub struct TouchTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    active: Vec<TouchPoint>,
    viewport: Option<(u32, u32)>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    began_this_frame: Vec<TouchId>,
    ended_this_frame: Vec<TouchPoint>,
    moved_this_frame: Vec<TouchId>,
    peak_count_this_frame: usize,
}

impl TouchTracker {
    /// Creates a new tracker with no contacts.
    pub fn new() -> Self {
        Self {
            active: Vec::with_capacity(4),
            viewport: None,
            began_this_frame: Vec::with_capacity(4),
            ended_this_frame: Vec::with_capacity(4),
            moved_this_frame: Vec::with_capacity(4),
            peak_count_this_frame: 0,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub fn clear(&mut self) {
        self.began_this_frame.clear();
        self.ended_this_frame.clear();
        self.moved_this_frame.clear();
        for point in &mut self.active {
            point.previous_position = point.position;
            point.phase = TouchPhase::Stationary;
        }
        self.peak_count_this_frame = self.active.len();
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Finalizes frame bookkeeping.
    pub fn finalize_frame(&mut self) {
        self.peak_count_this_frame = self.peak_count_this_frame.max(self.active.len());
        if !self.began_this_frame.is_empty() || !self.ended_this_frame.is_empty() {
            trace!(
                target: "input::touch",
                "Frame touches: {} active (peak {}), {} began, {} ended",
                self.active.len(),
                self.peak_count_this_frame,
                self.began_this_frame.len(),
                self.ended_this_frame.len()
            );
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Touch(sample) => self.process_sample(sample),
            InputEvent::ViewportResized { width, height } => {
                self.viewport = Some((*width, *height));
            }
            InputEvent::Unidentified => {
                // Ignore unrecognized events
            }
        }
    }

    fn process_sample(&mut self, sample: &TouchSample) {
        match sample.phase {
            TouchPhase::Began => {
                // A repeated Began for a live id means the platform lost the
                // end event; treat the old contact as replaced.
                self.active.retain(|p| p.id != sample.id);
                self.active.push(TouchPoint::began(sample));
                self.began_this_frame.push(sample.id);
                self.peak_count_this_frame = self.peak_count_this_frame.max(self.active.len());
            }

            TouchPhase::Moved | TouchPhase::Stationary => {
                if let Some(point) = self.active.iter_mut().find(|p| p.id == sample.id) {
                    if point.position != sample.position {
                        point.position = sample.position;
                        if point.phase != TouchPhase::Began {
                            point.phase = TouchPhase::Moved;
                        }
                        if !self.moved_this_frame.contains(&sample.id) {
                            self.moved_this_frame.push(sample.id);
                        }
                    }
                }
            }

            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(index) = self.active.iter().position(|p| p.id == sample.id) {
                    let mut point = self.active.remove(index);
                    point.position = sample.position;
                    point.phase = sample.phase;
                    self.ended_this_frame.push(point);
                }
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Number of contacts currently held.
    pub fn touch_count(&self) -> usize {
        self.active.len()
    }

    /// Highest number of simultaneous contacts seen during this frame.
    ///
    /// A second finger that lands and lifts within one frame still counts.
    pub fn peak_touch_count(&self) -> usize {
        self.peak_count_this_frame
    }

    /// Contacts currently held, in order of arrival.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.active
    }

    /// The oldest contact still held.
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.active.first()
    }

    /// Returns `true` if the given contact began this frame.
    pub fn began(&self, id: TouchId) -> bool {
        self.began_this_frame.contains(&id)
    }

    /// Returns `true` if the given contact moved this frame.
    pub fn moved(&self, id: TouchId) -> bool {
        self.moved_this_frame.contains(&id)
    }

    /// Contacts that began this frame.
    pub fn began_this_frame(&self) -> &[TouchId] {
        &self.began_this_frame
    }

    /// Contacts lifted or cancelled this frame, with their final position.
    pub fn ended_this_frame(&self) -> &[TouchPoint] {
        &self.ended_this_frame
    }

    /// Last reported surface size, if any.
    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
