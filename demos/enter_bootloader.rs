#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use cake_keypad::bootloader::enter_bootloader;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

// Flash this image to get back to the UF2 drive without touching the BOOTSEL button.
#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let _p = embassy_rp::init(Default::default());
    enter_bootloader()
}
