//! Caller-owned playback position.
//!
//! The projector holds no notion of a current frame. A renderer keeps a
//! [`Playback`] next to it and asks the projector for whatever frame the
//! cursor points at.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happens when playback reaches the last frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EndBehavior {
    /// Stay on the last frame.
    #[default]
    Stop,
    /// Wrap to the first frame.
    Loop,
}

/// A frame index over a fixed number of frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Playback {
    index: usize,
    len: usize,
    end: EndBehavior,
}

impl Playback {
    /// Creates a cursor at frame 0 over `len` frames.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            end: EndBehavior::Stop,
        }
    }

    /// Builder method to set the end behaviour.
    #[must_use]
    pub fn with_end(mut self, end: EndBehavior) -> Self {
        self.end = end;
        self
    }

    /// Returns the current frame index, or `None` when there are no frames.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        (self.index < self.len).then_some(self.index)
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether the cursor is on the last frame.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.len == 0 || self.index + 1 >= self.len
    }

    /// Moves one frame forward.
    ///
    /// Returns the new index. At the last frame a stopping cursor stays put
    /// and returns `None`; a looping cursor wraps to 0.
    pub fn advance(&mut self) -> Option<usize> {
        self.advance_by(1)
    }

    /// Moves `steps` frames forward, wrapping or stopping at the end.
    pub fn advance_by(&mut self, steps: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let last = self.len - 1;
        if steps == 0 {
            return Some(self.index);
        }
        match self.end {
            EndBehavior::Loop => {
                self.index = (self.index + steps % self.len) % self.len;
                Some(self.index)
            }
            EndBehavior::Stop if self.index == last => None,
            EndBehavior::Stop => {
                self.index = self.index.saturating_add(steps).min(last);
                Some(self.index)
            }
        }
    }

    /// Jumps to `index`, clamped to the last frame. Returns the new index.
    pub fn seek(&mut self, index: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = index.min(self.len - 1);
        Some(self.index)
    }

    /// Returns to frame 0.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
