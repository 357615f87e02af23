//! The row/column lines shared by the LED matrix and the key matrix.
//!
//! Five row lines are shared by both matrices. Each of the four columns has three LED color
//! lines (red, green, blue) and one key-sense input. Every line is active-low. All of that
//! polarity and grouping stays behind [`MatrixLines`]; the rest of the crate speaks only in
//! row indexes, column indexes and [`RgbMask`]s.

use core::ops::BitOr;

use embedded_hal::delay::DelayNs;

#[cfg(not(feature = "host"))]
mod pins;
#[cfg(not(feature = "host"))]
pub use pins::MatrixPins;

#[cfg(feature = "host")]
pub mod simulated;

// ============================================================================
// Constants
// ============================================================================

/// Number of row lines. Row 0 is the far (top) row, row 4 the near (bottom) row.
pub const ROW_COUNT: usize = 5;

/// Number of columns. Each column has an RGB LED triple and a key-sense input.
pub const COLUMN_COUNT: usize = 4;

// ============================================================================
// RgbMask
// ============================================================================

/// Active-low red/green/blue line states for one LED column.
///
/// Bit 0 drives red, bit 1 green, bit 2 blue. A cleared bit lights that color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub struct RgbMask(u8);

impl RgbMask {
    /// Every color line high: the LED is dark.
    pub const ALL_OFF: Self = Self(0b111);
    /// Every color line low: red, green and blue all lit.
    pub const ALL_ON: Self = Self(0b000);

    /// Red line bit.
    pub const RED_BIT: u8 = 0b001;
    /// Green line bit.
    pub const GREEN_BIT: u8 = 0b010;
    /// Blue line bit.
    pub const BLUE_BIT: u8 = 0b100;

    /// Creates a mask from raw line bits. Bits above bit 2 are dropped.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL_OFF.0)
    }

    /// Raw line bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the line selected by `bit` (one of the `*_BIT` constants) is driven low.
    #[must_use]
    pub const fn is_lit(self, bit: u8) -> bool {
        self.0 & bit == 0
    }
}

// ============================================================================
// ColumnSample
// ============================================================================

/// One raw read of the four key-sense inputs. Bit `n` is column `n`; a cleared bit is a
/// closed switch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub struct ColumnSample(u8);

impl ColumnSample {
    /// Every input high: no switch closed.
    pub const RELEASED: Self = Self(0b1111);

    /// Creates a sample from raw input bits. Bits above `COLUMN_COUNT` are dropped.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::RELEASED.0)
    }

    /// Raw input bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the switch in `column_index` reads closed (low).
    #[must_use]
    pub const fn is_low(self, column_index: usize) -> bool {
        column_index < COLUMN_COUNT && (self.0 >> column_index) & 1 == 0
    }
}

/// ORs two active-low samples: a column stays low only when it was low in both.
impl BitOr for ColumnSample {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

// ============================================================================
// MatrixLines
// ============================================================================

/// Line-level access to the shared matrix, plus the busy-wait delay used between steps.
///
/// Implementations own every electrical detail: which port bit a line lives on and that
/// rows, colors and sense inputs are all active-low.
pub trait MatrixLines: DelayNs {
    /// Pulls row `row_index` low and releases every other row.
    ///
    /// Used the same way whether the row is about to be rendered or scanned.
    fn select_row(&mut self, row_index: usize);

    /// Drives the three color lines of column `column_index` to `mask`.
    fn set_column_mask(&mut self, column_index: usize, mask: RgbMask);

    /// Drives every column to the same `mask`.
    fn set_all_columns_mask(&mut self, mask: RgbMask) {
        for column_index in 0..COLUMN_COUNT {
            self.set_column_mask(column_index, mask);
        }
    }

    /// Reads the four key-sense inputs for the currently selected row.
    fn read_columns(&mut self) -> ColumnSample;
}
