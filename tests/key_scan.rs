#![allow(missing_docs)]
//! Host-level tests for key scanning, debounce, and report assembly.

use cake_keypad::Error;
use cake_keypad::key_scan::key_codes::{
    KEY_NUM_LOCK, KEYPAD_0, KEYPAD_1, KEYPAD_7, KEYPAD_8, KEYPAD_ASTERISK, KEYPAD_ENTER,
    KEYPAD_MINUS, KEYPAD_SLASH, MODIFIER_LEFT_CTRL, MODIFIER_LEFT_SHIFT, NO_KEY,
};
use cake_keypad::key_scan::{
    DEBOUNCE_GAP_US, KEY_TABLE, KeyKind, KeyReport, KeyTable, MAX_KEYCODES, SETTLE_US, scan,
};
use cake_keypad::matrix::ColumnSample;
use cake_keypad::matrix::simulated::{LineEvent, SimulatedMatrix};

const NANOS_PER_MICRO: u32 = 1_000;

fn byte(code: u16) -> u8 {
    u8::try_from(code & 0xFF).unwrap_or_default()
}

#[test]
fn nothing_pressed_gives_empty_report() {
    let mut matrix = SimulatedMatrix::new();
    let outcome = scan(&mut matrix, &KEY_TABLE);

    assert!(!outcome.any_pressed);
    assert_eq!(outcome.report, KeyReport::new());
    assert_eq!(outcome.report.to_bytes(), [0; 8]);
}

#[test]
fn single_key_is_reported() {
    let mut matrix = SimulatedMatrix::new();
    matrix.press(3, 3);
    let outcome = scan(&mut matrix, &KEY_TABLE);

    assert!(outcome.any_pressed);
    assert_eq!(outcome.report.modifier(), 0);
    assert_eq!(outcome.report.keycodes(), &[byte(KEYPAD_ENTER)]);
    assert_eq!(
        outcome.report.to_bytes(),
        [0, 0, byte(KEYPAD_ENTER), 0, 0, 0, 0, 0]
    );
}

#[test]
fn keys_come_out_in_scan_order() {
    let mut matrix = SimulatedMatrix::new();
    matrix.press(4, 0);
    matrix.press(0, 1);
    matrix.press(3, 0);
    let outcome = scan(&mut matrix, &KEY_TABLE);

    assert_eq!(
        outcome.report.keycodes(),
        &[byte(KEYPAD_SLASH), byte(KEYPAD_1), byte(KEYPAD_0)]
    );
}

#[test]
fn each_row_is_sampled_twice_with_settle_and_gap() {
    let mut matrix = SimulatedMatrix::new();
    scan(&mut matrix, &KEY_TABLE);
    let events = matrix.take_events();

    assert_eq!(events.len(), 5 * 5);
    for (row_index, chunk) in events.chunks(5).enumerate() {
        assert_eq!(
            chunk,
            [
                LineEvent::SelectRow(row_index),
                LineEvent::Delay {
                    nanos: SETTLE_US * NANOS_PER_MICRO
                },
                LineEvent::ReadColumns {
                    row_index: Some(row_index),
                    sample: ColumnSample::RELEASED
                },
                LineEvent::Delay {
                    nanos: DEBOUNCE_GAP_US * NANOS_PER_MICRO
                },
                LineEvent::ReadColumns {
                    row_index: Some(row_index),
                    sample: ColumnSample::RELEASED
                },
            ]
        );
    }
}

#[test]
fn single_sample_glitch_is_rejected() {
    let mut matrix = SimulatedMatrix::new();
    matrix.glitch_once(1, 0);
    let outcome = scan(&mut matrix, &KEY_TABLE);

    assert!(!outcome.any_pressed);
    assert!(outcome.report.keycodes().is_empty());

    // The glitch did show up on the first read of row 1.
    let low_reads = matrix
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                LineEvent::ReadColumns {
                    row_index: Some(1),
                    sample,
                } if sample.is_low(0)
            )
        })
        .count();
    assert_eq!(low_reads, 1);
}

#[test]
fn unmapped_position_counts_as_activity_only() {
    let mut matrix = SimulatedMatrix::new();
    matrix.press(2, 3);
    let outcome = scan(&mut matrix, &KEY_TABLE);

    assert!(outcome.any_pressed);
    assert_eq!(outcome.report, KeyReport::new());
}

#[test]
fn modifiers_go_to_the_modifier_byte() {
    let mut key_table = KEY_TABLE;
    key_table.0[0][0] = MODIFIER_LEFT_SHIFT;
    key_table.0[4][1] = MODIFIER_LEFT_CTRL;

    let mut matrix = SimulatedMatrix::new();
    matrix.press(0, 0);
    matrix.press(1, 0);
    matrix.press(4, 1);
    let outcome = scan(&mut matrix, &key_table);

    assert_eq!(outcome.report.modifier(), 0x03);
    assert_eq!(outcome.report.keycodes(), &[byte(KEYPAD_7)]);
    assert_eq!(
        outcome.report.to_bytes(),
        [0x03, 0, byte(KEYPAD_7), 0, 0, 0, 0, 0]
    );
}

#[test]
fn seventh_key_is_dropped_and_scan_stops() {
    let mut matrix = SimulatedMatrix::new();
    for column_index in 0..4 {
        matrix.press(0, column_index);
    }
    for column_index in 0..3 {
        matrix.press(1, column_index);
    }
    matrix.press(3, 3);
    let outcome = scan(&mut matrix, &KEY_TABLE);

    assert!(outcome.report.is_full());
    assert_eq!(outcome.report.keycodes().len(), MAX_KEYCODES);
    assert_eq!(
        outcome.report.keycodes(),
        &[
            byte(KEY_NUM_LOCK),
            byte(KEYPAD_SLASH),
            byte(KEYPAD_ASTERISK),
            byte(KEYPAD_MINUS),
            byte(KEYPAD_7),
            byte(KEYPAD_8),
        ]
    );

    // Rows after the one that filled the report are never selected.
    assert!(
        !matrix
            .events()
            .iter()
            .any(|event| matches!(event, LineEvent::SelectRow(2..)))
    );
}

#[test]
fn modifier_after_early_stop_is_lost() {
    let mut key_table = KEY_TABLE;
    key_table.0[4][1] = MODIFIER_LEFT_SHIFT;

    let mut matrix = SimulatedMatrix::new();
    for column_index in 0..4 {
        matrix.press(0, column_index);
        matrix.press(1, column_index);
    }
    matrix.press(4, 1);
    let outcome = scan(&mut matrix, &key_table);

    assert!(outcome.report.is_full());
    assert_eq!(outcome.report.modifier(), 0);
}

#[test]
fn report_adds_ignore_overflow() {
    let mut report = KeyReport::new();
    for code in [KEYPAD_1; 8] {
        report.add(code);
    }
    report.add(NO_KEY);
    report.add(MODIFIER_LEFT_SHIFT);

    assert_eq!(report.keycodes().len(), MAX_KEYCODES);
    assert_eq!(report.modifier(), 0x02);
    let key = byte(KEYPAD_1);
    assert_eq!(report.to_bytes(), [0x02, 0, key, key, key, key, key, key]);
}

#[test]
fn key_kinds_split_at_modifier_threshold() {
    assert_eq!(KeyKind::of(NO_KEY), KeyKind::Unmapped);
    assert_eq!(KeyKind::of(KEYPAD_ENTER), KeyKind::Key(0x58));
    assert_eq!(KeyKind::of(MODIFIER_LEFT_SHIFT), KeyKind::Modifier(0x02));
    assert_eq!(KeyKind::of(0x101), KeyKind::Modifier(0x01));
}

#[test]
fn key_table_layout_has_three_holes() {
    let holes = KEY_TABLE
        .0
        .iter()
        .flatten()
        .filter(|&&code| code == NO_KEY)
        .count();
    assert_eq!(holes, 3);
    assert_eq!(KEY_TABLE.code(2, 3).ok(), Some(NO_KEY));
    assert_eq!(KEY_TABLE.code(4, 1).ok(), Some(NO_KEY));
    assert_eq!(KEY_TABLE.code(4, 3).ok(), Some(NO_KEY));
    assert_eq!(KEY_TABLE.code(0, 0).ok(), Some(KEY_NUM_LOCK));
    assert!(matches!(KEY_TABLE.code(5, 0), Err(Error::IndexOutOfBounds)));
    assert_eq!(KeyTable::default(), KEY_TABLE);
}
