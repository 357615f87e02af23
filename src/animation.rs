//! The frame buffer and the rising color-trail animation that fills it.
//!
//! Every frame, the next palette color is faded into the two middle cells of the bottom row,
//! spreads sideways to the bottom corners, and then every row fades toward the row below it.
//! The result is a slowly cycling wave that climbs the keypad and dims as it goes.

use core::ops::{Deref, DerefMut};

use crate::Result;
use crate::color::{RGB8, blend, palette_color};
use crate::error::Error::IndexOutOfBounds;
use crate::matrix::{COLUMN_COUNT, ROW_COUNT};

// ============================================================================
// FrameBuffer
// ============================================================================

/// Colors for every LED, indexed `[row][column]`. Row 0 is the top row.
///
/// Frames deref to `[[RGB8; COLUMN_COUNT]; ROW_COUNT]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameBuffer(pub [[RGB8; COLUMN_COUNT]; ROW_COUNT]);

impl FrameBuffer {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); COLUMN_COUNT]; ROW_COUNT])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; COLUMN_COUNT]; ROW_COUNT])
    }

    /// Color at (`row_index`, `column_index`).
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBounds`](crate::Error::IndexOutOfBounds) outside the 5×4 grid.
    pub fn cell(&self, row_index: usize, column_index: usize) -> Result<RGB8> {
        self.0
            .get(row_index)
            .and_then(|row| row.get(column_index))
            .copied()
            .ok_or(IndexOutOfBounds)
    }
}

impl Deref for FrameBuffer {
    type Target = [[RGB8; COLUMN_COUNT]; ROW_COUNT];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FrameBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<[[RGB8; COLUMN_COUNT]; ROW_COUNT]> for FrameBuffer {
    fn from(array: [[RGB8; COLUMN_COUNT]; ROW_COUNT]) -> Self {
        Self(array)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Animation
// ============================================================================

/// Animation state: the frame buffer plus the phase counter that picks palette colors.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    frame: FrameBuffer,
    phase: u16,
}

impl Animation {
    /// Starts with a black frame at phase 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: FrameBuffer::new(),
            phase: 0,
        }
    }

    /// The colors to render.
    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Number of frames advanced so far, wrapping at `u16::MAX`.
    #[must_use]
    pub const fn phase(&self) -> u16 {
        self.phase
    }

    /// Advances the animation by one frame.
    pub fn advance(&mut self) {
        self.phase = self.phase.wrapping_add(1);
        let color = palette_color(self.phase);

        // Inject at the middle of the bottom row, then spread to its corners.
        if let Some([outer_left, inner_left, inner_right, outer_right]) = self.frame.last_mut() {
            *inner_left = blend(color, *inner_left);
            *inner_right = blend(color, *inner_right);
            *outer_left = blend(*inner_left, *outer_left);
            *outer_right = blend(*inner_right, *outer_right);
        }

        // Bottom-up, so each row takes from a row that has already moved this frame.
        let mut rows = self.frame.iter_mut().rev();
        if let Some(mut below) = rows.next() {
            for row in rows {
                for (cell, &source) in row.iter_mut().zip(below.iter()) {
                    *cell = blend(source, *cell);
                }
                below = row;
            }
        }
    }
}
