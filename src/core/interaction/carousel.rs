//=========================================================================
// Carousel
//=========================================================================
//
// Fixed set of overview X offsets paged by horizontal swipes.
// One step per valid swipe, clamped at both ends, no wraparound.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::gesture::SwipeDirection;

//=== Carousel ============================================================

pub struct Carousel {
    offsets: Vec<f32>,
    index: usize,
}

impl Carousel {
    /// An empty offset list behaves as a single position at 0.
    pub fn new(offsets: Vec<f32>, start_index: usize) -> Self {
        let offsets = if offsets.is_empty() { vec![0.0] } else { offsets };
        let index = start_index.min(offsets.len() - 1);
        Self { offsets, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn current_offset(&self) -> f32 {
        self.offsets[self.index]
    }

    /// Pages one step: Right → next, Left → previous.
    ///
    /// Returns the new offset, or `None` for vertical swipes and steps
    /// past either end.
    pub fn step(&mut self, direction: SwipeDirection) -> Option<f32> {
        let next = match direction {
            SwipeDirection::Right if self.index + 1 < self.offsets.len() => self.index + 1,
            SwipeDirection::Left if self.index > 0 => self.index - 1,
            SwipeDirection::Left | SwipeDirection::Right => {
                debug!(target: "interaction::carousel", "At end ({}), {:?} ignored", self.index, direction);
                return None;
            }
            SwipeDirection::Up | SwipeDirection::Down => return None,
        };

        self.index = next;
        debug!(target: "interaction::carousel", "Carousel → {} ({:+.1})", next, self.offsets[next]);
        Some(self.offsets[next])
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
