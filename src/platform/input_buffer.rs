//=========================================================================
// Input Buffer
//
// Collects touch input between two redraws and hands it to the core
// thread as one ordered batch.
//
// Responsibilities:
// - Preserve arrival order (a contact's Began precedes its Ended)
// - Coalesce consecutive moves of the same contact (last position wins)
// - Coalesce consecutive viewport resizes
// - Provide the batch via `drain()`
//
// Notes:
// Only the most recent event is a coalescing candidate. Interleaved
// moves of two fingers are kept as-is, so a pinch never loses the
// relative ordering of its samples.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a typical frame of multi-touch input.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Push -------------------------------------------------------------
    //
    // Appends an event, replacing the previous one when the two coalesce.
    //
    pub fn push(&mut self, event: InputEvent) {
        if let Some(last) = self.events.last_mut() {
            if last.coalesces_with(&event) {
                *last = event;
                return;
            }
        }
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's batch, or `None` if nothing was buffered.
    //
    pub fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        let mut batch = Vec::with_capacity(self.events.capacity());
        std::mem::swap(&mut batch, &mut self.events);
        Some(batch)
    }

    //--- Utilities --------------------------------------------------------
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
