//! Firmware building blocks for a 5×4 RGB-lit numeric keypad ("birthday cake" board).
//!
//! The keypad's LEDs and key switches share the same five row lines. Each frame the
//! [`Keypad`](crate::keypad::Keypad) driver renders the LED matrix with bit-angle modulation,
//! then reuses the rows to scan the switches and hands a USB keyboard report to the host.
//!
//! # Glossary
//!
//! - **BAM (Bit-Angle Modulation):** multi-level brightness from on/off lines by holding each
//!   color bit for a time proportional to its weight (1:2:4:8 for bits 4–7).
//! - **Active-low:** a line driven (or read) low means "on" (LED lit, row selected, key pressed).
//! - **Idle blank:** LEDs switched off after a stretch of frames with no key activity.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: an architecture must be selected (unless testing with host feature)
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the architecture feature 'arm'");

pub mod animation;
pub mod bam;
#[cfg(not(feature = "host"))]
pub mod bootloader;
pub mod color;
mod error;
pub mod idle;
pub mod key_scan;
pub mod keypad;
pub mod matrix;
#[cfg(not(feature = "host"))]
pub mod usb_keyboard;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
