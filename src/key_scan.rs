//! Key matrix scanning, two-sample debounce, and keyboard report assembly.
//!
//! Scanning reuses the LED row lines: each row is selected exactly as for rendering, and the
//! four sense inputs are read twice. A switch counts as pressed only when it reads low in
//! both samples. Pressed positions are looked up in a [`KeyTable`] and collected into a
//! [`KeyReport`].
//!
//! See [`scan`].

use heapless::Vec;

use crate::Result;
use crate::error::Error::IndexOutOfBounds;
use crate::matrix::{COLUMN_COUNT, MatrixLines, ROW_COUNT};

pub mod key_codes;

use key_codes::{
    KEY_NUM_LOCK, KEYPAD_0, KEYPAD_1, KEYPAD_2, KEYPAD_3, KEYPAD_4, KEYPAD_5, KEYPAD_6, KEYPAD_7,
    KEYPAD_8, KEYPAD_9, KEYPAD_ASTERISK, KEYPAD_ENTER, KEYPAD_MINUS, KEYPAD_PERIOD, KEYPAD_PLUS,
    KEYPAD_SLASH, NO_KEY,
};

// ============================================================================
// Constants
// ============================================================================

/// Non-modifier keys one report can carry.
pub const MAX_KEYCODES: usize = 6;

/// Codes above this value are modifiers; their low byte is the modifier bit.
pub const MODIFIER_THRESHOLD: u16 = 0x100;

/// Wait after selecting a row before the first sample.
pub const SETTLE_US: u32 = 10;

/// Wait between the first and second sample.
pub const DEBOUNCE_GAP_US: u32 = 50;

/// Size of [`KeyReport::to_bytes`]: modifier, reserved, six keycodes.
pub const REPORT_LEN: usize = 8;

// ============================================================================
// KeyTable
// ============================================================================

/// A 16-bit key code: 0 for no key, a HID usage ID, or a modifier above
/// [`MODIFIER_THRESHOLD`].
pub type KeyCode = u16;

/// Key codes for every matrix position, indexed `[row][column]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyTable(pub [[KeyCode; COLUMN_COUNT]; ROW_COUNT]);

/// The numeric keypad layout. Three corners of the grid have no switch.
pub const KEY_TABLE: KeyTable = KeyTable([
    [KEY_NUM_LOCK, KEYPAD_SLASH, KEYPAD_ASTERISK, KEYPAD_MINUS],
    [KEYPAD_7, KEYPAD_8, KEYPAD_9, KEYPAD_PLUS],
    [KEYPAD_4, KEYPAD_5, KEYPAD_6, NO_KEY],
    [KEYPAD_1, KEYPAD_2, KEYPAD_3, KEYPAD_ENTER],
    [KEYPAD_0, NO_KEY, KEYPAD_PERIOD, NO_KEY],
]);

impl KeyTable {
    /// Code at (`row_index`, `column_index`).
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBounds`](crate::Error::IndexOutOfBounds) outside the 5×4 grid.
    pub fn code(&self, row_index: usize, column_index: usize) -> Result<KeyCode> {
        self.0
            .get(row_index)
            .and_then(|row| row.get(column_index))
            .copied()
            .ok_or(IndexOutOfBounds)
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        KEY_TABLE
    }
}

/// What a [`KeyCode`] contributes to a report.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum KeyKind {
    /// No switch here.
    Unmapped,
    /// A modifier bit for the report's modifier byte.
    Modifier(u8),
    /// A keycode for one of the report's slots.
    Key(u8),
}

impl KeyKind {
    /// Classifies `code`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "Only the low byte is reported")]
    pub const fn of(code: KeyCode) -> Self {
        if code == NO_KEY {
            Self::Unmapped
        } else if code > MODIFIER_THRESHOLD {
            Self::Modifier((code & 0xFF) as u8)
        } else {
            Self::Key(code as u8)
        }
    }
}

// ============================================================================
// KeyReport
// ============================================================================

/// One keyboard report: a modifier bitmask and up to [`MAX_KEYCODES`] keycodes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyReport {
    modifier: u8,
    keycodes: Vec<u8, MAX_KEYCODES>,
}

impl KeyReport {
    /// A report with nothing pressed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modifier: 0,
            keycodes: Vec::new(),
        }
    }

    /// Modifier bitmask.
    #[must_use]
    pub const fn modifier(&self) -> u8 {
        self.modifier
    }

    /// Keycodes in scan order.
    #[must_use]
    pub fn keycodes(&self) -> &[u8] {
        &self.keycodes
    }

    /// Whether every keycode slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.keycodes.is_full()
    }

    /// Adds `code` to the report. Unmapped codes are ignored, and so are keys once the report
    /// is full.
    pub fn add(&mut self, code: KeyCode) {
        match KeyKind::of(code) {
            KeyKind::Unmapped => {}
            KeyKind::Modifier(bit) => self.modifier |= bit,
            KeyKind::Key(keycode) => {
                // Full means later keys are dropped for this report.
                self.keycodes.push(keycode).ok();
            }
        }
    }

    /// Boot-keyboard wire format: modifier, reserved, then six zero-padded keycodes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let mut bytes = [0; REPORT_LEN];
        let (header, slots) = bytes.split_at_mut(2);
        if let Some(modifier) = header.first_mut() {
            *modifier = self.modifier;
        }
        for (slot, &keycode) in slots.iter_mut().zip(self.keycodes.iter()) {
            *slot = keycode;
        }
        bytes
    }
}

impl defmt::Format for KeyReport {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(
            fmt,
            "KeyReport {{ modifier: {=u8:#04x}, keycodes: {=[u8]} }}",
            self.modifier,
            self.keycodes.as_slice()
        );
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Result of one pass over the key matrix.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanOutcome {
    /// The assembled report.
    pub report: KeyReport,
    /// Whether any switch read as pressed, mapped or not.
    pub any_pressed: bool,
}

/// Scans every row and builds a report from `key_table`.
///
/// Rows are scanned top to bottom and columns left to right. Once the report holds
/// [`MAX_KEYCODES`] keycodes the scan stops right there: the remaining positions of that row
/// and every later row are not read, so any further keys or modifiers are left out of this
/// report. The row selected last stays selected.
pub fn scan<L: MatrixLines>(lines: &mut L, key_table: &KeyTable) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for (row_index, row_codes) in key_table.0.iter().enumerate() {
        lines.select_row(row_index);
        lines.delay_us(SETTLE_US);
        let first = lines.read_columns();
        lines.delay_us(DEBOUNCE_GAP_US);
        let sample = first | lines.read_columns();

        for (column_index, &code) in row_codes.iter().enumerate() {
            if !sample.is_low(column_index) {
                continue;
            }
            outcome.any_pressed = true;
            outcome.report.add(code);
            if outcome.report.is_full() {
                return outcome;
            }
        }
    }
    outcome
}
