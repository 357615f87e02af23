//! A device abstraction for the keypad's USB HID keyboard interface.
//!
//! See [`UsbKeyboard`] for usage.

use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{self, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use portable_atomic::{AtomicBool, Ordering};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use defmt::{info, warn};

use crate::Result;
use crate::key_scan::{KeyReport, REPORT_LEN};
use crate::keypad::KeyboardHost;

// ============================================================================
// Constants
// ============================================================================

/// USB vendor ID (pid.codes test VID).
const USB_VID: u16 = 0x1209;

/// USB product ID.
const USB_PID: u16 = 0x0001;

/// Host polling interval for the keyboard endpoint.
const POLL_MS: u8 = 10;

const DESCRIPTOR_BUFFER_LEN: usize = 256;
const CONTROL_BUFFER_LEN: usize = 64;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

type UsbDriver = Driver<'static, USB>;

// ============================================================================
// UsbKeyboardStatic - Static resources for the USB keyboard
// ============================================================================

/// Static resources for [`UsbKeyboard`]: USB descriptor buffers, HID state, the outgoing
/// report signal, and the "configured" flag.
///
/// Create with [`UsbKeyboard::new_static`].
pub struct UsbKeyboardStatic {
    config_descriptor: StaticCell<[u8; DESCRIPTOR_BUFFER_LEN]>,
    bos_descriptor: StaticCell<[u8; DESCRIPTOR_BUFFER_LEN]>,
    msos_descriptor: StaticCell<[u8; DESCRIPTOR_BUFFER_LEN]>,
    control_buffer: StaticCell<[u8; CONTROL_BUFFER_LEN]>,
    hid_state: StaticCell<State<'static>>,
    report: Signal<CriticalSectionRawMutex, KeyReport>,
    configured: AtomicBool,
}

impl UsbKeyboardStatic {
    const fn new() -> Self {
        Self {
            config_descriptor: StaticCell::new(),
            bos_descriptor: StaticCell::new(),
            msos_descriptor: StaticCell::new(),
            control_buffer: StaticCell::new(),
            hid_state: StaticCell::new(),
            report: Signal::new(),
            configured: AtomicBool::new(false),
        }
    }
}

// ============================================================================
// UsbKeyboard Virtual Device
// ============================================================================

/// A USB boot-protocol keyboard fed by the keypad's render/scan loop.
///
/// Behind the scenes, two tasks are spawned: one runs the USB device stack, the other waits
/// for reports and writes them to the HID endpoint. [`send_report`](KeyboardHost::send_report)
/// only signals the writer task, so the render/scan loop never waits on USB. If the loop
/// produces reports faster than the host polls, the newest report replaces any unsent one.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use cake_keypad::{Result, usb_keyboard::{UsbKeyboard, UsbKeyboardStatic}};
/// use embassy_executor::Spawner;
///
/// async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> Result<()> {
///     static USB_KEYBOARD_STATIC: UsbKeyboardStatic = UsbKeyboard::new_static();
///     let usb_keyboard = UsbKeyboard::new(p.USB, &USB_KEYBOARD_STATIC, spawner)?;
///     // Hand `usb_keyboard` to `Keypad::run`.
///     Ok(())
/// }
/// ```
pub struct UsbKeyboard {
    usb_keyboard_static: &'static UsbKeyboardStatic,
}

impl UsbKeyboard {
    /// Creates static resources for the keyboard.
    #[must_use]
    pub const fn new_static() -> UsbKeyboardStatic {
        UsbKeyboardStatic::new()
    }

    /// Builds the USB device with one HID keyboard interface and spawns its tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if either background task cannot be spawned.
    ///
    /// # Panics
    ///
    /// Panics if called twice with the same `usb_keyboard_static`.
    pub fn new(
        usb: Peri<'static, USB>,
        usb_keyboard_static: &'static UsbKeyboardStatic,
        spawner: Spawner,
    ) -> Result<Self> {
        let driver = Driver::new(usb, Irqs);

        let mut config = Config::new(USB_VID, USB_PID);
        config.manufacturer = Some("Birthday Cake");
        config.product = Some("Cake Keypad");
        config.max_power = 100;
        config.max_packet_size_0 = 64;

        let mut builder = Builder::new(
            driver,
            config,
            usb_keyboard_static
                .config_descriptor
                .init([0; DESCRIPTOR_BUFFER_LEN]),
            usb_keyboard_static
                .bos_descriptor
                .init([0; DESCRIPTOR_BUFFER_LEN]),
            usb_keyboard_static
                .msos_descriptor
                .init([0; DESCRIPTOR_BUFFER_LEN]),
            usb_keyboard_static
                .control_buffer
                .init([0; CONTROL_BUFFER_LEN]),
        );

        let hid_config = hid::Config {
            report_descriptor: KeyboardReport::desc(),
            request_handler: None,
            poll_ms: POLL_MS,
            max_packet_size: 8,
            hid_subclass: HidSubclass::Boot,
            hid_boot_protocol: HidBootProtocol::Keyboard,
        };
        let writer = HidWriter::<_, REPORT_LEN>::new(
            &mut builder,
            usb_keyboard_static.hid_state.init(State::new()),
            hid_config,
        );
        let usb_device = builder.build();

        let token = usb_device_loop(usb_device)?;
        spawner.spawn(token);
        let token = hid_writer_loop(writer, usb_keyboard_static)?;
        spawner.spawn(token);

        Ok(Self {
            usb_keyboard_static,
        })
    }
}

impl KeyboardHost for UsbKeyboard {
    fn is_configured(&self) -> bool {
        self.usb_keyboard_static.configured.load(Ordering::Acquire)
    }

    fn send_report(&mut self, report: &KeyReport) {
        self.usb_keyboard_static.report.signal(report.clone());
    }
}

// ============================================================================
// Background tasks
// ============================================================================

#[embassy_executor::task]
async fn usb_device_loop(mut usb_device: UsbDevice<'static, UsbDriver>) -> ! {
    usb_device.run().await
}

#[embassy_executor::task]
async fn hid_writer_loop(
    mut writer: HidWriter<'static, UsbDriver, REPORT_LEN>,
    usb_keyboard_static: &'static UsbKeyboardStatic,
) -> ! {
    writer.ready().await;
    info!("USB keyboard configured");
    usb_keyboard_static
        .configured
        .store(true, Ordering::Release);

    loop {
        let report = usb_keyboard_static.report.wait().await;
        if let Err(err) = writer.write(&report.to_bytes()).await {
            warn!("USB keyboard report dropped: {:?}", err);
        }
    }
}
