use core::convert::Infallible;

use arduino_hal::{
    hal::port::{PD0, PD1},
    pac::USART0,
    port::{
        mode::{Input, Output},
        Pin,
    },
    prelude::*,
    Usart,
};
use mindlink::SerialInput;
use ufmt::uWrite;

/// The hardware serial port of the Uno.
pub type UnoSerial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

/// Serial port shared by packet input, the echo, and diagnostics.
pub struct Uart {
    serial: UnoSerial,
}
impl Uart {
    /// Creates a new `Uart`.
    ///
    /// # Parameters
    ///
    /// - `serial`: The configured hardware serial port.
    pub fn new(serial: UnoSerial) -> Self {
        Self { serial }
    }
}

/// Reading never blocks: a byte is only returned if the receiver already
/// holds one.
impl SerialInput for Uart {
    fn try_read_byte(&mut self) -> Option<u8> {
        match self.serial.read() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(never)) => match never {},
        }
    }
}

impl uWrite for Uart {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        uWrite::write_str(&mut self.serial, s)
    }
}
