//! Idle blanking: the LEDs go dark after a stretch of frames without key activity.

// ============================================================================
// Constants
// ============================================================================

/// Rendered frames without a key press before the LEDs blank.
pub const IDLE_BLANK_FRAMES: u16 = 1 << 11;

// ============================================================================
// IdleTimer
// ============================================================================

/// Frames rendered since the last key press, stopping at [`IDLE_BLANK_FRAMES`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub struct IdleTimer {
    frames: u16,
}

impl IdleTimer {
    /// A timer that has seen no frames.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: 0 }
    }

    /// Frames counted since the last reset.
    #[must_use]
    pub const fn frames(self) -> u16 {
        self.frames
    }

    /// Whether the threshold has been reached and rendering should be skipped.
    #[must_use]
    pub const fn is_blanked(self) -> bool {
        self.frames >= IDLE_BLANK_FRAMES
    }

    /// Counts one rendered frame. Returns `true` when this tick reached the threshold.
    pub fn tick(&mut self) -> bool {
        if self.is_blanked() {
            return false;
        }
        self.frames = self.frames.saturating_add(1);
        self.is_blanked()
    }

    /// Key activity: start counting again from zero.
    pub const fn reset(&mut self) {
        self.frames = 0;
    }
}
