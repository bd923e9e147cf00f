//! Diagnostic output on the serial port.
//!
//! Everything here is silent unless the `diagnostics` feature is enabled.
//! The host only expects the echo, so extra lines would confuse it.

use core::convert::Infallible;

use arduino_hal::prelude::*;
use mindlink::{sketch, Event, Response};
use ufmt::uwriteln;

use crate::devices::Uart;

/// Whether diagnostics are written to the serial port.
const ENABLED: bool = cfg!(feature = "diagnostics");

/// Announces the program.
///
/// # Parameters
///
/// - `uart`: Port to write to.
/// - `name`: Name of the program.
pub fn banner(uart: &mut Uart, name: &str) {
    if ENABLED {
        arduino_hal::delay_ms(100);
        uwriteln!(uart, "{}", name).unwrap_infallible();
    }
}

/// Reports the outcome of one loop iteration.
pub fn report(uart: &mut Uart, event: Event) {
    if !ENABLED {
        return;
    }
    match event {
        Event::Idle => {}
        Event::Overflow => {
            uwriteln!(uart, "ERROR: UART buffer overflow.").unwrap_infallible()
        }
        Event::Malformed => {
            uwriteln!(uart, "ERROR: Parse error.").unwrap_infallible()
        }
        Event::Actuated(Response::Moved(angle)) => {
            uwriteln!(uart, "INFO: Moved to {} degrees.", angle)
                .unwrap_infallible()
        }
        Event::Actuated(Response::Held(angle)) => {
            uwriteln!(uart, "INFO: Holding at {} degrees.", angle)
                .unwrap_infallible()
        }
        Event::Actuated(Response::Switched(level)) => {
            uwriteln!(uart, "INFO: LED {:?}.", level).unwrap_infallible()
        }
    }
}

/// Extracts the event from a loop iteration on the board.
///
/// Neither the serial port nor the actuators can fail here, so there is no
/// error to handle.
pub fn settle(
    result: Result<Event, sketch::Error<Infallible, Infallible>>,
) -> Event {
    match result {
        Ok(event) => event,
        Err(sketch::Error::Write(never))
        | Err(sketch::Error::Actuator(never)) => match never {},
    }
}
