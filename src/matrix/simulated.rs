//! A host-side stand-in for the keypad's matrix wiring, used by tests.
//!
//! [`SimulatedMatrix`] records every line operation and delay in order, keeps the current
//! line state, and answers sense reads from a grid of "physically pressed" switches.

use embedded_hal::delay::DelayNs;

use super::{COLUMN_COUNT, ColumnSample, MatrixLines, ROW_COUNT, RgbMask};

/// One recorded interaction with the matrix lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineEvent {
    /// A row was pulled low and the others released.
    SelectRow(usize),
    /// A column's color lines were driven.
    ColumnMask {
        /// Column that was driven.
        column_index: usize,
        /// Mask that was applied.
        mask: RgbMask,
    },
    /// A busy-wait delay.
    Delay {
        /// Requested duration in nanoseconds.
        nanos: u32,
    },
    /// The sense inputs were read.
    ReadColumns {
        /// Row selected at read time.
        row_index: Option<usize>,
        /// Value returned.
        sample: ColumnSample,
    },
}

/// Simulated matrix lines with pressable switches.
#[derive(Clone, Debug)]
pub struct SimulatedMatrix {
    events: Vec<LineEvent>,
    selected_row: Option<usize>,
    column_masks: [RgbMask; COLUMN_COUNT],
    pressed: [[bool; COLUMN_COUNT]; ROW_COUNT],
    glitches: [[bool; COLUMN_COUNT]; ROW_COUNT],
}

impl SimulatedMatrix {
    /// Creates a matrix with no row selected, every LED dark and every switch open.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            selected_row: None,
            column_masks: [RgbMask::ALL_OFF; COLUMN_COUNT],
            pressed: [[false; COLUMN_COUNT]; ROW_COUNT],
            glitches: [[false; COLUMN_COUNT]; ROW_COUNT],
        }
    }

    /// Closes the switch at (`row_index`, `column_index`) until released.
    pub fn press(&mut self, row_index: usize, column_index: usize) {
        if let Some(cell) = self
            .pressed
            .get_mut(row_index)
            .and_then(|row| row.get_mut(column_index))
        {
            *cell = true;
        }
    }

    /// Opens the switch at (`row_index`, `column_index`).
    pub fn release(&mut self, row_index: usize, column_index: usize) {
        if let Some(cell) = self
            .pressed
            .get_mut(row_index)
            .and_then(|row| row.get_mut(column_index))
        {
            *cell = false;
        }
    }

    /// Opens every switch.
    pub fn release_all(&mut self) {
        self.pressed = [[false; COLUMN_COUNT]; ROW_COUNT];
    }

    /// Makes the next single read of `row_index` report the switch at `column_index` closed,
    /// like contact bounce.
    pub fn glitch_once(&mut self, row_index: usize, column_index: usize) {
        if let Some(cell) = self
            .glitches
            .get_mut(row_index)
            .and_then(|row| row.get_mut(column_index))
        {
            *cell = true;
        }
    }

    /// Every event recorded so far.
    #[must_use]
    pub fn events(&self) -> &[LineEvent] {
        &self.events
    }

    /// Returns and clears the recorded events.
    pub fn take_events(&mut self) -> Vec<LineEvent> {
        core::mem::take(&mut self.events)
    }

    /// The row currently pulled low, if any.
    #[must_use]
    pub const fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// The mask each column is currently driven to.
    #[must_use]
    pub const fn column_masks(&self) -> [RgbMask; COLUMN_COUNT] {
        self.column_masks
    }
}

impl Default for SimulatedMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixLines for SimulatedMatrix {
    fn select_row(&mut self, row_index: usize) {
        self.selected_row = (row_index < ROW_COUNT).then_some(row_index);
        self.events.push(LineEvent::SelectRow(row_index));
    }

    fn set_column_mask(&mut self, column_index: usize, mask: RgbMask) {
        if let Some(column_mask) = self.column_masks.get_mut(column_index) {
            *column_mask = mask;
        }
        self.events.push(LineEvent::ColumnMask { column_index, mask });
    }

    fn read_columns(&mut self) -> ColumnSample {
        let mut bits = ColumnSample::RELEASED.bits();
        if let Some(row_index) = self.selected_row {
            let pressed = self.pressed.get(row_index);
            let glitches = self.glitches.get_mut(row_index);
            if let (Some(pressed), Some(glitches)) = (pressed, glitches) {
                for (column_index, (&is_pressed, glitch)) in
                    pressed.iter().zip(glitches.iter_mut()).enumerate()
                {
                    if is_pressed || core::mem::take(glitch) {
                        bits &= !(1 << column_index);
                    }
                }
            }
        }
        let sample = ColumnSample::from_bits(bits);
        self.events.push(LineEvent::ReadColumns {
            row_index: self.selected_row,
            sample,
        });
        sample
    }
}

impl DelayNs for SimulatedMatrix {
    fn delay_ns(&mut self, ns: u32) {
        self.events.push(LineEvent::Delay { nanos: ns });
    }
}
