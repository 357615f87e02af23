#![allow(missing_docs)]
//! Host-level tests for bit-angle modulation of one row.

use cake_keypad::bam::{self, BLANK_HOLD_US, bit_plane_mask, exposure_us};
use cake_keypad::color::{RGB8, colors};
use cake_keypad::matrix::simulated::{LineEvent, SimulatedMatrix};
use cake_keypad::matrix::{MatrixLines, RgbMask};

const NANOS_PER_MICRO: u32 = 1_000;

fn delays(events: &[LineEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            LineEvent::Delay { nanos } => Some(*nanos),
            _ => None,
        })
        .collect()
}

#[test]
fn exposures_double_per_bit_plane() {
    assert_eq!(exposure_us(4), 16);
    assert_eq!(exposure_us(5), 32);
    assert_eq!(exposure_us(6), 64);
    assert_eq!(exposure_us(7), 128);
}

#[test]
fn low_bit_planes_get_no_exposure() {
    for bit_plane in 0..4 {
        assert_eq!(exposure_us(bit_plane), 0);
    }
    assert_eq!(exposure_us(8), 0);
}

#[test]
fn masks_are_active_low_per_channel() {
    let color = RGB8::new(0x10, 0x20, 0x40);
    assert_eq!(bit_plane_mask(color, 4).bits(), 0b110);
    assert_eq!(bit_plane_mask(color, 5).bits(), 0b101);
    assert_eq!(bit_plane_mask(color, 6).bits(), 0b011);
    assert_eq!(bit_plane_mask(color, 7), RgbMask::ALL_OFF);

    let red = bit_plane_mask(RGB8::new(0x80, 0, 0), 7);
    assert!(red.is_lit(RgbMask::RED_BIT));
    assert!(!red.is_lit(RgbMask::GREEN_BIT));
    assert!(!red.is_lit(RgbMask::BLUE_BIT));
}

#[test]
fn low_nibble_is_not_rendered() {
    let dim = RGB8::new(0x0F, 0x0F, 0x0F);
    for bit_plane in 4..=7 {
        assert_eq!(bit_plane_mask(dim, bit_plane), RgbMask::ALL_OFF);
    }
}

#[test]
fn render_row_timing_is_binary_weighted_then_blank() {
    let mut matrix = SimulatedMatrix::new();
    bam::render_row(&mut matrix, &[colors::WHITE; 4]);

    assert_eq!(
        delays(matrix.events()),
        [16, 32, 64, 128, BLANK_HOLD_US].map(|us| us * NANOS_PER_MICRO)
    );
}

#[test]
fn render_row_drives_every_column_before_each_hold() {
    let cells = [
        colors::WHITE,
        colors::BLACK,
        RGB8::new(0x80, 0, 0),
        RGB8::new(0x10, 0x20, 0x40),
    ];
    let mut matrix = SimulatedMatrix::new();
    bam::render_row(&mut matrix, &cells);
    let events = matrix.take_events();

    // Four planes plus the blank, each: four column masks then one delay.
    assert_eq!(events.len(), 5 * 5);
    let mut chunks = events.chunks(5);
    for bit_plane in 4..=7 {
        let Some(chunk) = chunks.next() else {
            panic!("missing bit-plane {bit_plane}");
        };
        for (column_index, color) in cells.iter().enumerate() {
            assert_eq!(
                chunk[column_index],
                LineEvent::ColumnMask {
                    column_index,
                    mask: bit_plane_mask(*color, bit_plane),
                }
            );
        }
        assert_eq!(
            chunk[4],
            LineEvent::Delay {
                nanos: exposure_us(bit_plane) * NANOS_PER_MICRO
            }
        );
    }
}

#[test]
fn render_row_leaves_columns_dark() {
    let mut matrix = SimulatedMatrix::new();
    bam::render_row(&mut matrix, &[colors::WHITE; 4]);
    assert_eq!(matrix.column_masks(), [RgbMask::ALL_OFF; 4]);
}

#[test]
fn white_lights_every_line_on_every_plane() {
    let mut matrix = SimulatedMatrix::new();
    bam::render_row(&mut matrix, &[colors::WHITE; 4]);
    let lit_masks = matrix
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                LineEvent::ColumnMask {
                    mask: RgbMask::ALL_ON,
                    ..
                }
            )
        })
        .count();
    assert_eq!(lit_masks, 4 * 4);
}

#[test]
fn blank_turns_all_columns_off_and_holds() {
    let mut matrix = SimulatedMatrix::new();
    matrix.set_all_columns_mask(RgbMask::ALL_ON);
    matrix.take_events();

    bam::blank(&mut matrix);

    let events = matrix.take_events();
    assert_eq!(
        events,
        vec![
            LineEvent::ColumnMask {
                column_index: 0,
                mask: RgbMask::ALL_OFF
            },
            LineEvent::ColumnMask {
                column_index: 1,
                mask: RgbMask::ALL_OFF
            },
            LineEvent::ColumnMask {
                column_index: 2,
                mask: RgbMask::ALL_OFF
            },
            LineEvent::ColumnMask {
                column_index: 3,
                mask: RgbMask::ALL_OFF
            },
            LineEvent::Delay {
                nanos: BLANK_HOLD_US * NANOS_PER_MICRO
            },
        ]
    );
}
