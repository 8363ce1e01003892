//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit pointer events into engine touch events.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Native touches map one-to-one. The left mouse button emulates a single
// finger (TouchId::MOUSE): press → Began, cursor motion while pressed →
// Moved, release → Ended, cursor leaving the window → Cancelled. Other
// buttons and hover motion are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase as WinitTouchPhase};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, TouchId, TouchPhase, TouchSample};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents with stateful mouse
/// emulation.
pub(crate) struct InputProcessor {
    cursor: Vec2,
    mouse_down: bool,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: Vec2::ZERO,
            mouse_down: false,
        }
    }

    pub(crate) fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    //--- Native Touch -----------------------------------------------------

    pub(crate) fn process_touch(&self, id: u64, phase: WinitTouchPhase, x: f64, y: f64) -> InputEvent {
        InputEvent::Touch(TouchSample::new(
            TouchId(id),
            Vec2::new(x as f32, y as f32),
            TouchPhase::from(phase),
        ))
    }

    //--- Mouse Emulation --------------------------------------------------

    /// Tracks the cursor; emits a move only while the button is held.
    pub(crate) fn process_cursor_moved(&mut self, x: f64, y: f64) -> Option<InputEvent> {
        self.cursor = Vec2::new(x as f32, y as f32);
        self.mouse_down.then(|| self.mouse_sample(TouchPhase::Moved))
    }

    pub(crate) fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match (state, self.mouse_down) {
            (ElementState::Pressed, false) => {
                self.mouse_down = true;
                Some(self.mouse_sample(TouchPhase::Began))
            }
            (ElementState::Released, true) => {
                self.mouse_down = false;
                Some(self.mouse_sample(TouchPhase::Ended))
            }
            _ => None,
        }
    }

    /// Cancels an emulated touch whose cursor left the window.
    pub(crate) fn process_cursor_left(&mut self) -> Option<InputEvent> {
        if !self.mouse_down {
            return None;
        }
        self.mouse_down = false;
        Some(self.mouse_sample(TouchPhase::Cancelled))
    }

    //--- Surface ----------------------------------------------------------

    pub(crate) fn process_resize(&self, width: u32, height: u32) -> InputEvent {
        InputEvent::ViewportResized { width, height }
    }

    //--- Internal Helpers -------------------------------------------------

    fn mouse_sample(&self, phase: TouchPhase) -> InputEvent {
        InputEvent::Touch(TouchSample::new(TouchId::MOUSE, self.cursor, phase))
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => Self::Began,
            WinitTouchPhase::Moved => Self::Moved,
            WinitTouchPhase::Ended => Self::Ended,
            WinitTouchPhase::Cancelled => Self::Cancelled,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_of(event: Option<InputEvent>) -> Option<TouchPhase> {
        match event {
            Some(InputEvent::Touch(sample)) => {
                assert_eq!(sample.id, TouchId::MOUSE);
                Some(sample.phase)
            }
            _ => None,
        }
    }

    //=====================================================================
    // Native Touch
    //=====================================================================

    #[test]
    fn touch_phases_map_one_to_one() {
        assert_eq!(TouchPhase::from(WinitTouchPhase::Started), TouchPhase::Began);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Moved), TouchPhase::Moved);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Ended), TouchPhase::Ended);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Cancelled), TouchPhase::Cancelled);
    }

    #[test]
    fn touch_keeps_id_and_position() {
        let processor = InputProcessor::new();
        let event = processor.process_touch(7, WinitTouchPhase::Started, 12.5, 40.0);
        assert_eq!(event, InputEvent::touch(7, 12.5, 40.0, TouchPhase::Began));
    }

    //=====================================================================
    // Mouse Emulation
    //=====================================================================

    #[test]
    fn hover_produces_nothing() {
        let mut processor = InputProcessor::new();
        assert!(processor.process_cursor_moved(10.0, 10.0).is_none());
    }

    #[test]
    fn left_button_drag_emulates_touch() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(10.0, 20.0);

        let began = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(began, Some(InputEvent::Touch(TouchSample::new(
            TouchId::MOUSE,
            Vec2::new(10.0, 20.0),
            TouchPhase::Began,
        ))));
        assert_eq!(phase_of(processor.process_cursor_moved(30.0, 20.0)), Some(TouchPhase::Moved));
        assert_eq!(
            phase_of(processor.process_mouse_button(MouseButton::Left, ElementState::Released)),
            Some(TouchPhase::Ended)
        );
        assert!(!processor.is_mouse_down());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut processor = InputProcessor::new();
        assert!(processor.process_mouse_button(MouseButton::Right, ElementState::Pressed).is_none());
        assert!(!processor.is_mouse_down());
    }

    #[test]
    fn repeated_press_is_not_a_second_touch() {
        let mut processor = InputProcessor::new();
        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(processor.process_mouse_button(MouseButton::Left, ElementState::Pressed).is_none());
    }

    #[test]
    fn leaving_window_cancels_press() {
        let mut processor = InputProcessor::new();
        assert!(processor.process_cursor_left().is_none());

        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(phase_of(processor.process_cursor_left()), Some(TouchPhase::Cancelled));
        assert!(processor
            .process_mouse_button(MouseButton::Left, ElementState::Released)
            .is_none());
    }
}
