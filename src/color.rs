//! RGB colors, the slow-fade blend, and the animation palette.
//!
//! Colors are [`RGB8`] from the `smart_leds` crate, three 8-bit channels with no alpha.

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used by the frame buffer and palette.
pub use smart_leds::RGB8;

// ============================================================================
// Constants
// ============================================================================

/// Number of entries in [`PALETTE`].
pub const PALETTE_LEN: usize = 8;

/// Colors the animation cycles through, injected one after another at the bottom row.
///
/// Orange and yellow share the value `(255, 255, 0)`.
pub const PALETTE: [RGB8; PALETTE_LEN] = [
    RGB8::new(0, 255, 0),   // green
    RGB8::new(255, 255, 0), // yellow
    RGB8::new(255, 255, 0), // orange
    RGB8::new(255, 0, 0),   // red
    RGB8::new(128, 0, 64),  // purple
    RGB8::new(0, 255, 255), // cyan
    RGB8::new(0, 0, 255),   // blue
    RGB8::new(0, 0, 0),     // black
];

/// Weight kept from the old value on each blend step, out of `1 << BLEND_SHIFT`.
const BLEND_KEEP: u16 = 7;
const BLEND_SHIFT: u32 = 3;

// ============================================================================
// Blending
// ============================================================================

/// Moves `dest` one eighth of the way toward `source`, channel by channel.
///
/// Each channel becomes `(dest * 7 + source) >> 3`, truncated. Applied repeatedly this decays
/// geometrically toward `source` and never overshoots it.
///
/// # Example
///
/// ```rust
/// use cake_keypad::color::{RGB8, blend};
///
/// let faded = blend(RGB8::new(255, 0, 8), RGB8::new(0, 255, 8));
/// assert_eq!(faded, RGB8::new(31, 223, 8));
/// ```
#[must_use]
pub const fn blend(source: RGB8, dest: RGB8) -> RGB8 {
    RGB8::new(
        blend_channel(source.r, dest.r),
        blend_channel(source.g, dest.g),
        blend_channel(source.b, dest.b),
    )
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "255 * 7 + 255 fits in u16 and the shift brings it back under 256"
)]
#[expect(clippy::cast_possible_truncation, reason = "Result is at most 255")]
const fn blend_channel(source: u8, dest: u8) -> u8 {
    ((dest as u16 * BLEND_KEEP + source as u16) >> BLEND_SHIFT) as u8
}

/// Palette entry for an animation phase counter.
///
/// Only bits 8 and up select the entry, so the palette advances once every 256 frames.
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "Masked to the palette length, a power of two"
)]
pub const fn palette_color(phase: u16) -> RGB8 {
    PALETTE[(phase >> 8) as usize & (PALETTE_LEN - 1)]
}
