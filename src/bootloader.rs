//! Maintenance escape hatch: reboot into the ROM USB bootloader.
//!
//! Not part of the render/scan loop. Flash a new image after calling
//! [`enter_bootloader`] by copying a UF2 file to the mass-storage drive that appears.

use defmt::info;

/// Resets into the ROM USB bootloader. Does not return.
pub fn enter_bootloader() -> ! {
    info!("Entering USB bootloader");

    #[cfg(feature = "pico1")]
    embassy_rp::rom_data::reset_to_usb_boot(0, 0);

    #[cfg(feature = "pico2")]
    embassy_rp::rom_data::reboot(REBOOT_TYPE_BOOTSEL, REBOOT_DELAY_MS, 0, 0);

    loop {
        core::hint::spin_loop();
    }
}

/// `reboot` flag selecting BOOTSEL mode on the RP2350 boot ROM.
#[cfg(feature = "pico2")]
const REBOOT_TYPE_BOOTSEL: u32 = 0x0002;

#[cfg(feature = "pico2")]
const REBOOT_DELAY_MS: u32 = 10;
