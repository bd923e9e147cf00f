use embedded_hal::digital::OutputPin;
#[cfg(test)]
use embedded_hal::digital::{ErrorKind, ErrorType};

use crate::{Actuator, Level, Packet, Response};

/// Switches an LED on or off from the control flag of each packet.
///
/// Every packet fully decides the output: the LED is lit when the packet is
/// engaged (see [Packet::is_engaged]) and dark otherwise.
///
/// # Type Parameters
///
/// - `P`: output pin the LED is wired to.
pub struct LedDriver<P> {
    pin: P,
}
impl<P: OutputPin> LedDriver<P> {
    /// Creates a new `LedDriver`.
    ///
    /// The pin is driven low before returning.
    ///
    /// # Parameters
    ///
    /// - `pin`: Output pin that drives the LED.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin })
    }

    /// Drives the pin according to a packet.
    pub fn drive(&mut self, packet: &Packet) -> Result<Response, P::Error> {
        let level = if packet.is_engaged() {
            self.pin.set_high()?;
            Level::High
        } else {
            self.pin.set_low()?;
            Level::Low
        };
        Ok(Response::Switched(level))
    }
}

impl<P: OutputPin> Actuator for LedDriver<P> {
    type Error = P::Error;

    fn actuate(&mut self, packet: &Packet) -> Result<Response, P::Error> {
        self.drive(packet)
    }
}

/// Output pin to use for testing purposes.
///
/// Clones share the recorded levels and the broken flag. A broken pin fails
/// every write and records nothing.
#[cfg(test)]
#[derive(Clone)]
pub struct TestPin {
    levels: std::sync::Arc<std::sync::Mutex<std::vec::Vec<Level>>>,
    broken: std::sync::Arc<std::sync::atomic::AtomicBool>,
}
#[cfg(test)]
impl TestPin {
    /// Creates a new test pin with nothing recorded.
    pub fn new() -> Self {
        Self {
            levels: Default::default(),
            broken: Default::default(),
        }
    }

    /// Makes every following write fail, or succeed again.
    pub fn set_broken(&self, broken: bool) {
        self.broken
            .store(broken, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns every level driven so far, oldest first.
    pub fn levels(&self) -> std::vec::Vec<Level> {
        self.levels.lock().unwrap().clone()
    }

    fn record(&mut self, level: Level) -> Result<(), ErrorKind> {
        if self.broken.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ErrorKind::Other);
        }
        self.levels.lock().unwrap().push(level);
        Ok(())
    }
}
#[cfg(test)]
impl ErrorType for TestPin {
    type Error = ErrorKind;
}
#[cfg(test)]
impl OutputPin for TestPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        self.record(Level::Low)
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        self.record(Level::High)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_drives_low() {
        let pin = TestPin::new();
        let _driver = LedDriver::new(pin.clone()).unwrap();
        assert_eq!(vec![Level::Low], pin.levels());
    }

    #[test]
    fn test_engaged_packet_lights() {
        let pin = TestPin::new();
        let mut driver = LedDriver::new(pin.clone()).unwrap();
        assert_eq!(
            Ok(Response::Switched(Level::High)),
            driver.drive(&Packet::new(1, 50, 0))
        );
        assert_eq!(vec![Level::Low, Level::High], pin.levels());
    }

    #[test]
    fn test_attention_is_ignored() {
        let pin = TestPin::new();
        let mut driver = LedDriver::new(pin.clone()).unwrap();
        driver.drive(&Packet::new(1, 0, 0)).unwrap();
        driver.drive(&Packet::new(1, -999, 7)).unwrap();
        assert_eq!(vec![Level::Low, Level::High, Level::High], pin.levels());
    }

    #[test]
    fn test_disengaged_packet_darkens() {
        let pin = TestPin::new();
        let mut driver = LedDriver::new(pin.clone()).unwrap();
        driver.drive(&Packet::new(1, 0, 0)).unwrap();
        assert_eq!(
            Ok(Response::Switched(Level::Low)),
            driver.actuate(&Packet::new(0, 80, 0))
        );
        assert_eq!(
            Ok(Response::Switched(Level::Low)),
            driver.actuate(&Packet::new(2, 80, 0))
        );
        assert_eq!(
            vec![Level::Low, Level::High, Level::Low, Level::Low],
            pin.levels()
        );
    }

    #[test]
    fn test_pin_errors_propagate() {
        let pin = TestPin::new();
        pin.set_broken(true);
        assert!(LedDriver::new(pin.clone()).is_err());

        pin.set_broken(false);
        let mut driver = LedDriver::new(pin.clone()).unwrap();
        pin.set_broken(true);
        assert_eq!(
            Err(ErrorKind::Other),
            driver.drive(&Packet::new(1, 50, 0))
        );
        assert_eq!(vec![Level::Low], pin.levels());
    }
}
