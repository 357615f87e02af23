//! 16-bit key codes for the [`KeyTable`](super::KeyTable).
//!
//! Plain keys are USB HID keyboard usage IDs (page 0x07). Modifiers carry their report bit in
//! the low byte and `0xE0` in the high byte, which puts them above
//! [`MODIFIER_THRESHOLD`](super::MODIFIER_THRESHOLD).
#![expect(missing_docs, reason = "Each constant is named after its key.")]

use super::KeyCode;

/// No switch at this matrix position.
pub const NO_KEY: KeyCode = 0;

pub const KEY_NUM_LOCK: KeyCode = 0x53;
pub const KEYPAD_SLASH: KeyCode = 0x54;
pub const KEYPAD_ASTERISK: KeyCode = 0x55;
pub const KEYPAD_MINUS: KeyCode = 0x56;
pub const KEYPAD_PLUS: KeyCode = 0x57;
pub const KEYPAD_ENTER: KeyCode = 0x58;
pub const KEYPAD_1: KeyCode = 0x59;
pub const KEYPAD_2: KeyCode = 0x5A;
pub const KEYPAD_3: KeyCode = 0x5B;
pub const KEYPAD_4: KeyCode = 0x5C;
pub const KEYPAD_5: KeyCode = 0x5D;
pub const KEYPAD_6: KeyCode = 0x5E;
pub const KEYPAD_7: KeyCode = 0x5F;
pub const KEYPAD_8: KeyCode = 0x60;
pub const KEYPAD_9: KeyCode = 0x61;
pub const KEYPAD_0: KeyCode = 0x62;
pub const KEYPAD_PERIOD: KeyCode = 0x63;

pub const MODIFIER_LEFT_CTRL: KeyCode = 0xE001;
pub const MODIFIER_LEFT_SHIFT: KeyCode = 0xE002;
pub const MODIFIER_LEFT_ALT: KeyCode = 0xE004;
pub const MODIFIER_LEFT_GUI: KeyCode = 0xE008;
pub const MODIFIER_RIGHT_CTRL: KeyCode = 0xE010;
pub const MODIFIER_RIGHT_SHIFT: KeyCode = 0xE020;
pub const MODIFIER_RIGHT_ALT: KeyCode = 0xE040;
pub const MODIFIER_RIGHT_GUI: KeyCode = 0xE080;
