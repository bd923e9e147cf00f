#![no_std]
#![no_main]

use arduino_hal::prelude::*;
use mindlink::{LedDriver, Sketch};
use mindlink_firmware::{config, console, devices::Uart};
use panic_halt as _;

/// Switches an LED on pin D7 from the control flag sent by the host.
///
/// Each `"R;G;B"` line with `R == 1` lights the LED. Any other `R` turns it
/// off.
#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let serial = arduino_hal::default_serial!(dp, pins, config::BAUD_RATE);
    let mut uart = Uart::new(serial);

    let led = LedDriver::new(pins.d7.into_output()).unwrap_infallible();
    let mut sketch: Sketch<_, { config::LINE_CAPACITY }> = Sketch::new(led);

    console::banner(&mut uart, "MIND LED");
    loop {
        let event = console::settle(sketch.poll(&mut uart));
        console::report(&mut uart, event);
    }
}
