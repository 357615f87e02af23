#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};
use cake_keypad::{
    Result,
    keypad::Keypad,
    matrix::MatrixPins,
    usb_keyboard::{UsbKeyboard, UsbKeyboardStatic},
};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    static USB_KEYBOARD_STATIC: UsbKeyboardStatic = UsbKeyboard::new_static();
    let mut usb_keyboard = UsbKeyboard::new(p.USB, &USB_KEYBOARD_STATIC, spawner)?;

    // Rows on GPIO 0-4, then red/green/blue for each column, then the four sense inputs.
    // Every line idles high: rows released, LEDs dark, open switches pulled up.
    let matrix_pins = MatrixPins::new(
        [
            Output::new(p.PIN_0, Level::High),
            Output::new(p.PIN_1, Level::High),
            Output::new(p.PIN_2, Level::High),
            Output::new(p.PIN_3, Level::High),
            Output::new(p.PIN_4, Level::High),
        ],
        [
            [
                Output::new(p.PIN_5, Level::High),
                Output::new(p.PIN_6, Level::High),
                Output::new(p.PIN_7, Level::High),
            ],
            [
                Output::new(p.PIN_8, Level::High),
                Output::new(p.PIN_9, Level::High),
                Output::new(p.PIN_10, Level::High),
            ],
            [
                Output::new(p.PIN_11, Level::High),
                Output::new(p.PIN_12, Level::High),
                Output::new(p.PIN_13, Level::High),
            ],
            [
                Output::new(p.PIN_14, Level::High),
                Output::new(p.PIN_15, Level::High),
                Output::new(p.PIN_16, Level::High),
            ],
        ],
        [
            Input::new(p.PIN_17, Pull::Up),
            Input::new(p.PIN_18, Pull::Up),
            Input::new(p.PIN_19, Pull::Up),
            Input::new(p.PIN_20, Pull::Up),
        ],
    );

    // Renders and scans forever once the host has configured the keyboard.
    Keypad::new(matrix_pins).run(&mut usb_keyboard).await
}
