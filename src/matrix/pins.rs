use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;

use super::{COLUMN_COUNT, ColumnSample, MatrixLines, ROW_COUNT, RgbMask};

/// Number of color lines per LED column (red, green, blue).
const COLOR_LINE_COUNT: usize = 3;

/// [`MatrixLines`] on RP2040/RP2350 GPIO pins.
///
/// Rows and color lines are push-pull outputs that idle high (row released, LED dark).
/// Sense inputs need pull-ups so an open switch reads high.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use cake_keypad::matrix::MatrixPins;
/// use embassy_rp::gpio::{Input, Level, Output, Pull};
///
/// fn example(p: embassy_rp::Peripherals) -> MatrixPins<'static> {
///     MatrixPins::new(
///         [
///             Output::new(p.PIN_0, Level::High),
///             Output::new(p.PIN_1, Level::High),
///             Output::new(p.PIN_2, Level::High),
///             Output::new(p.PIN_3, Level::High),
///             Output::new(p.PIN_4, Level::High),
///         ],
///         [
///             [Output::new(p.PIN_5, Level::High), Output::new(p.PIN_6, Level::High), Output::new(p.PIN_7, Level::High)],
///             [Output::new(p.PIN_8, Level::High), Output::new(p.PIN_9, Level::High), Output::new(p.PIN_10, Level::High)],
///             [Output::new(p.PIN_11, Level::High), Output::new(p.PIN_12, Level::High), Output::new(p.PIN_13, Level::High)],
///             [Output::new(p.PIN_14, Level::High), Output::new(p.PIN_15, Level::High), Output::new(p.PIN_16, Level::High)],
///         ],
///         [
///             Input::new(p.PIN_17, Pull::Up),
///             Input::new(p.PIN_18, Pull::Up),
///             Input::new(p.PIN_19, Pull::Up),
///             Input::new(p.PIN_20, Pull::Up),
///         ],
///     )
/// }
/// ```
pub struct MatrixPins<'a> {
    rows: [Output<'a>; ROW_COUNT],
    color_lines: [[Output<'a>; COLOR_LINE_COUNT]; COLUMN_COUNT],
    sense_inputs: [Input<'a>; COLUMN_COUNT],
}

impl<'a> MatrixPins<'a> {
    /// Takes ownership of the matrix pins and releases every row and color line.
    #[must_use]
    pub fn new(
        rows: [Output<'a>; ROW_COUNT],
        color_lines: [[Output<'a>; COLOR_LINE_COUNT]; COLUMN_COUNT],
        sense_inputs: [Input<'a>; COLUMN_COUNT],
    ) -> Self {
        let mut matrix_pins = Self {
            rows,
            color_lines,
            sense_inputs,
        };
        for row in &mut matrix_pins.rows {
            row.set_high();
        }
        matrix_pins.set_all_columns_mask(RgbMask::ALL_OFF);
        matrix_pins
    }
}

impl MatrixLines for MatrixPins<'_> {
    fn select_row(&mut self, row_index: usize) {
        for row in &mut self.rows {
            row.set_high();
        }
        if let Some(row) = self.rows.get_mut(row_index) {
            row.set_low();
        }
    }

    #[expect(clippy::shadow_reuse, reason = "Shifting the mask one line at a time")]
    fn set_column_mask(&mut self, column_index: usize, mask: RgbMask) {
        let Some(lines) = self.color_lines.get_mut(column_index) else {
            return;
        };
        let mut bits = mask.bits();
        for line in lines {
            let level: Level = ((bits & 1) == 1).into();
            line.set_level(level);
            bits >>= 1;
        }
    }

    fn read_columns(&mut self) -> ColumnSample {
        let bits = self
            .sense_inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| input.is_high())
            .fold(0_u8, |bits, (column_index, _)| bits | (1 << column_index));
        ColumnSample::from_bits(bits)
    }
}

/// Busy-waits on the embassy time driver; the render and scan timings must not yield.
impl DelayNs for MatrixPins<'_> {
    fn delay_ns(&mut self, ns: u32) {
        Delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        Delay.delay_us(us);
    }
}
