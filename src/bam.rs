//! Bit-angle modulation (BAM) for one LED row.
//!
//! The LED lines are plain on/off GPIO, so brightness comes from timing: for each of the
//! top four bits of every channel, the row shows that bit-plane for a hold proportional to
//! the bit's weight. Bit 4 is held one base unit, bit 7 eight. The low four bits are
//! dropped, which leaves 16 levels per channel.
//!
//! See [`render_row`].

use crate::color::RGB8;
use crate::matrix::{COLUMN_COUNT, MatrixLines, RgbMask};

// ============================================================================
// Constants
// ============================================================================

/// Least significant channel bit that is rendered.
pub const FIRST_BIT_PLANE: u8 = 4;

/// Most significant channel bit.
pub const LAST_BIT_PLANE: u8 = 7;

/// Hold time for [`FIRST_BIT_PLANE`]. Each following plane doubles it.
pub const BASE_EXPOSURE_US: u32 = 16;

/// Dark hold after the last plane so nothing stays lit across a row change.
pub const BLANK_HOLD_US: u32 = 50;

// ============================================================================
// Masks and timing
// ============================================================================

/// Active-low mask that shows `bit_plane` of `color`.
///
/// A channel whose bit is set gets its line pulled low (lit); a clear bit leaves it high.
///
/// # Example
///
/// ```rust
/// use cake_keypad::bam::bit_plane_mask;
/// use cake_keypad::color::RGB8;
/// use cake_keypad::matrix::RgbMask;
///
/// assert_eq!(bit_plane_mask(RGB8::new(0, 0, 0), 7), RgbMask::ALL_OFF);
/// assert_eq!(bit_plane_mask(RGB8::new(255, 255, 255), 4), RgbMask::ALL_ON);
/// assert_eq!(bit_plane_mask(RGB8::new(0x80, 0, 0), 7).bits(), 0b110);
/// ```
#[must_use]
pub const fn bit_plane_mask(color: RGB8, bit_plane: u8) -> RgbMask {
    let lit = ((color.r >> bit_plane) & 1)
        | (((color.g >> bit_plane) & 1) << 1)
        | (((color.b >> bit_plane) & 1) << 2);
    RgbMask::from_bits(!lit)
}

/// How long `bit_plane` is held: `BASE_EXPOSURE_US << (bit_plane - FIRST_BIT_PLANE)`.
///
/// Planes outside [`FIRST_BIT_PLANE`]..=[`LAST_BIT_PLANE`] get no exposure.
#[must_use]
pub const fn exposure_us(bit_plane: u8) -> u32 {
    match bit_plane.checked_sub(FIRST_BIT_PLANE) {
        Some(weight) if bit_plane <= LAST_BIT_PLANE => BASE_EXPOSURE_US << weight,
        _ => 0,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders one row's colors on a row that the caller has already selected.
///
/// Runs the four bit-planes, each held for [`exposure_us`], then blanks every column and
/// holds [`BLANK_HOLD_US`] so the next row select starts dark.
pub fn render_row<L: MatrixLines>(lines: &mut L, cells: &[RGB8; COLUMN_COUNT]) {
    for bit_plane in FIRST_BIT_PLANE..=LAST_BIT_PLANE {
        for (column_index, &color) in cells.iter().enumerate() {
            lines.set_column_mask(column_index, bit_plane_mask(color, bit_plane));
        }
        lines.delay_us(exposure_us(bit_plane));
    }
    blank(lines);
}

/// Turns every column off and holds [`BLANK_HOLD_US`].
pub fn blank<L: MatrixLines>(lines: &mut L) {
    lines.set_all_columns_mask(RgbMask::ALL_OFF);
    lines.delay_us(BLANK_HOLD_US);
}
