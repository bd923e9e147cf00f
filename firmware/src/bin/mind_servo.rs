#![no_std]
#![no_main]

use mindlink::{PulseRange, ServoDriver, Sketch};
use mindlink_firmware::{
    config, console,
    devices::{Servo, Uart},
};
use panic_halt as _;

/// Points a servo according to the attention level sent by the host.
///
/// Each `"R;G;B"` line with `R == 1` moves the servo to `G` percent of its
/// travel. Any other `R` leaves it where it is.
#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let serial = arduino_hal::default_serial!(dp, pins, config::BAUD_RATE);
    let mut uart = Uart::new(serial);

    let servo =
        Servo::attach(dp.TC1, pins.d9.into_output(), PulseRange::STANDARD);
    let mut sketch: Sketch<_, { config::LINE_CAPACITY }> =
        Sketch::new(ServoDriver::new(servo));

    console::banner(&mut uart, "MIND SERVO");
    loop {
        let event = console::settle(sketch.poll(&mut uart));
        console::report(&mut uart, event);
    }
}
