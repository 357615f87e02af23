//! The keypad driver: one object that owns the matrix lines and all render/scan state.
//!
//! Each cycle renders a full LED frame and then scans the keys on the same rows:
//!
//! 1. **Render.** If the idle timer has run out, blank every column and stop. Otherwise count
//!    the frame, advance the [`Animation`], and for each row select it and run
//!    [`bam::render_row`].
//! 2. **Scan.** [`key_scan::scan`] every row; any press resets the idle timer; the report goes
//!    to the [`KeyboardHost`].
//!
//! Rendering and scanning never overlap: a row's BAM sequence always finishes, with columns
//! blanked, before the row lines are used for scanning.
//!
//! # Example
//!
//! ```rust,no_run
//! use cake_keypad::keypad::{KeyboardHost, Keypad};
//! use cake_keypad::matrix::MatrixLines;
//!
//! async fn example(lines: impl MatrixLines, host: &mut impl KeyboardHost) -> ! {
//!     let mut keypad = Keypad::new(lines);
//!     keypad.run(host).await
//! }
//! ```

use embassy_futures::yield_now;

use crate::animation::{Animation, FrameBuffer};
use crate::bam;
use crate::idle::IdleTimer;
use crate::key_scan::{self, KEY_TABLE, KeyReport, KeyTable};
use crate::matrix::MatrixLines;

#[cfg(not(feature = "host"))]
use defmt::info;

// ============================================================================
// KeyboardHost
// ============================================================================

/// The USB side of the keypad, as seen by the render/scan loop.
pub trait KeyboardHost {
    /// Whether the host has configured the device. The loop does not start before this.
    fn is_configured(&self) -> bool;

    /// Hands a report over for transmission. Fire-and-forget: nothing is reported back.
    fn send_report(&mut self, report: &KeyReport);
}

// ============================================================================
// Keypad
// ============================================================================

/// Owns the matrix lines, frame buffer, animation phase, and idle timer.
pub struct Keypad<L: MatrixLines> {
    lines: L,
    key_table: KeyTable,
    animation: Animation,
    idle: IdleTimer,
}

impl<L: MatrixLines> Keypad<L> {
    /// Creates a keypad with the standard numeric layout, a black frame, and a fresh idle
    /// timer.
    #[must_use]
    pub const fn new(lines: L) -> Self {
        Self::with_key_table(lines, KEY_TABLE)
    }

    /// Creates a keypad with a custom key layout.
    #[must_use]
    pub const fn with_key_table(lines: L, key_table: KeyTable) -> Self {
        Self {
            lines,
            key_table,
            animation: Animation::new(),
            idle: IdleTimer::new(),
        }
    }

    /// Renders one LED frame, or blanks the LEDs if the keypad has been idle too long.
    pub fn render_frame(&mut self) {
        if self.idle.is_blanked() {
            bam::blank(&mut self.lines);
            return;
        }

        if self.idle.tick() {
            #[cfg(not(feature = "host"))]
            info!("No key activity for {} frames, blanking LEDs", self.idle.frames());
        }
        self.animation.advance();

        for (row_index, row) in self.animation.frame().iter().enumerate() {
            self.lines.select_row(row_index);
            bam::render_row(&mut self.lines, row);
        }
    }

    /// Scans the keys and returns the report. Any press restarts the idle timer.
    pub fn scan_keys(&mut self) -> KeyReport {
        let outcome = key_scan::scan(&mut self.lines, &self.key_table);
        if outcome.any_pressed {
            if self.idle.is_blanked() {
                #[cfg(not(feature = "host"))]
                info!("Key activity, LEDs back on");
            }
            self.idle.reset();
        }

        #[cfg(all(feature = "keypad-trace", not(feature = "host")))]
        defmt::debug!("{}", outcome.report);

        outcome.report
    }

    /// One full cycle: render a frame, scan the keys, send the report.
    pub fn run_cycle<H: KeyboardHost>(&mut self, host: &mut H) {
        self.render_frame();
        let report = self.scan_keys();
        host.send_report(&report);
    }

    /// Waits until `host` is configured, then cycles forever.
    ///
    /// Yields to the executor once per cycle (and while waiting) so other tasks, such as the
    /// USB stack, can run. A cycle itself is never interrupted.
    pub async fn run<H: KeyboardHost>(&mut self, host: &mut H) -> ! {
        while !host.is_configured() {
            yield_now().await;
        }

        #[cfg(not(feature = "host"))]
        info!("Keypad running");

        loop {
            self.run_cycle(host);
            yield_now().await;
        }
    }

    /// The current LED colors.
    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer {
        self.animation.frame()
    }

    /// The animation state.
    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// The idle timer.
    #[must_use]
    pub const fn idle(&self) -> IdleTimer {
        self.idle
    }

    /// The matrix lines.
    #[must_use]
    pub const fn lines(&self) -> &L {
        &self.lines
    }

    /// The matrix lines, mutably.
    pub const fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }
}
