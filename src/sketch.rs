use ufmt::{uWrite, uwrite};
use ufmt_macros::uDebug;

use crate::line_reader::{self, LineReader, SerialInput};
use crate::{packet, Actuator, Packet, Response};

/// The main loop of a packet-driven program.
///
/// Each call to [Sketch::poll] runs one iteration: read whatever serial input
/// is waiting, and if that completes a line, echo it, parse it, and hand the
/// packet to the actuator.
///
/// # Type Parameters
///
/// - `A`: the [Actuator] driven by packets.
/// - `N`: capacity of the line buffer, in bytes.
pub struct Sketch<A, const N: usize> {
    reader: LineReader<N>,
    actuator: A,
}
impl<A: Actuator, const N: usize> Sketch<A, N> {
    /// Creates a new `Sketch`.
    ///
    /// # Parameters
    ///
    /// - `actuator`: The actuator to drive. It should already be in its
    ///   startup state.
    pub fn new(actuator: A) -> Self {
        Self {
            reader: LineReader::new(),
            actuator,
        }
    }

    /// Returns the actuator.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Runs one iteration of the loop.
    ///
    /// This never blocks waiting for input.
    ///
    /// # Parameters
    ///
    /// - `port`: Serial port to read lines from and echo them back to.
    ///
    /// # Returns
    ///
    /// - `Ok(event)`: what happened during the iteration.
    /// - `Err(error)`: if writing the echo or driving the actuator failed.
    pub fn poll<P>(
        &mut self,
        port: &mut P,
    ) -> Result<Event, Error<P::Error, A::Error>>
    where
        P: SerialInput + uWrite,
    {
        let line = match self.reader.poll(port) {
            Ok(None) => return Ok(Event::Idle),
            Ok(Some(line)) => line,
            Err(line_reader::Error::BufferOverflow) => {
                return Ok(Event::Overflow)
            }
        };

        uwrite!(port, "{}\r\n", line).map_err(Error::Write)?;

        match Packet::from_bytes(line.as_bytes()) {
            Err(packet::Error::MalformedPacket) => Ok(Event::Malformed),
            Ok(packet) => self
                .actuator
                .actuate(&packet)
                .map(Event::Actuated)
                .map_err(Error::Actuator),
        }
    }
}

/// Outcome of one iteration of a [Sketch].
#[derive(Debug, PartialEq, Eq, Copy, Clone, uDebug)]
pub enum Event {
    /// No complete line was available.
    Idle,
    /// A line was too long for the buffer and was dropped without an echo.
    Overflow,
    /// A line was echoed but did not contain a valid packet.
    Malformed,
    /// A line was echoed and its packet was acted on.
    Actuated(Response),
}

/// Errors that might occur while running a [Sketch].
///
/// # Type Parameters
///
/// - `W`: error writing to the serial port.
/// - `A`: error driving the actuator.
#[derive(Debug, PartialEq)]
pub enum Error<W, A> {
    /// Writing the echo failed.
    Write(W),
    /// The actuator failed.
    Actuator(A),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        Degrees, LedDriver, Level, ServoDriver, TestPin, TestPort, TestServo,
    };

    #[test]
    fn test_idle_without_input() {
        let mut port = TestPort::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(ServoDriver::new(TestServo::new()));
        assert_eq!(Ok(Event::Idle), sketch.poll(&mut port));
        assert_eq!("", port.output());
    }

    #[test]
    fn test_servo_half_attention() {
        let mut port = TestPort::new();
        let servo = TestServo::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(ServoDriver::new(servo.clone()));

        port.feed(b"1;50;0\n");
        assert_eq!(
            Ok(Event::Actuated(Response::Moved(Degrees::new(90)))),
            sketch.poll(&mut port)
        );
        assert_eq!("1;50;0\r\n", port.output());
        assert_eq!(vec![Degrees::CENTER, Degrees::new(90)], servo.writes());
    }

    #[test]
    fn test_servo_holds_when_disengaged() {
        let mut port = TestPort::new();
        let servo = TestServo::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(ServoDriver::new(servo.clone()));

        port.feed(b"1;100;0\r\n0;80;0\r\n");
        sketch.poll(&mut port).unwrap();
        assert_eq!(
            Ok(Event::Actuated(Response::Held(Degrees::new(180)))),
            sketch.poll(&mut port)
        );
        assert_eq!("1;100;0\r\n0;80;0\r\n", port.output());
        assert_eq!(vec![Degrees::CENTER, Degrees::MAX], servo.writes());
        assert_eq!(Degrees::MAX, sketch.actuator().angle());
    }

    #[test]
    fn test_servo_non_numeric_attention() {
        let mut port = TestPort::new();
        let servo = TestServo::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(ServoDriver::new(servo.clone()));

        port.feed(b"1;abc;0\n");
        assert_eq!(
            Ok(Event::Actuated(Response::Moved(Degrees::MIN))),
            sketch.poll(&mut port)
        );
        assert_eq!(vec![Degrees::CENTER, Degrees::MIN], servo.writes());
    }

    #[test]
    fn test_malformed_lines_are_echoed_and_ignored() {
        let mut port = TestPort::new();
        let servo = TestServo::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(ServoDriver::new(servo.clone()));

        port.feed(b"abc\n1;2\n;5;6\n\n");
        for _ in 0..4 {
            assert_eq!(Ok(Event::Malformed), sketch.poll(&mut port));
        }
        assert_eq!("abc\r\n1;2\r\n;5;6\r\n\r\n", port.output());
        assert_eq!(vec![Degrees::CENTER], servo.writes());
    }

    #[test]
    fn test_overflow_is_not_echoed() {
        let mut port = TestPort::new();
        let servo = TestServo::new();
        let mut sketch: Sketch<_, 8> =
            Sketch::new(ServoDriver::new(servo.clone()));

        port.feed(b"1;50;000000000\n1;0;0\n");
        assert_eq!(Ok(Event::Overflow), sketch.poll(&mut port));
        assert_eq!("", port.output());
        assert_eq!(
            Ok(Event::Actuated(Response::Moved(Degrees::MIN))),
            sketch.poll(&mut port)
        );
        assert_eq!("1;0;0\r\n", port.output());
    }

    #[test]
    fn test_high_bytes_count_once_toward_capacity() {
        let mut port = TestPort::new();
        let mut sketch: Sketch<_, 8> =
            Sketch::new(ServoDriver::new(TestServo::new()));

        port.feed(&[b'1', b';', 0xE9, 0xE9, b';', 0xE9, 0xE9, b'5', b'\n']);
        assert_eq!(
            Ok(Event::Actuated(Response::Moved(Degrees::MIN))),
            sketch.poll(&mut port)
        );
        assert_eq!("1;\u{e9}\u{e9};\u{e9}\u{e9}5\r\n", port.output());
    }

    #[test]
    fn test_led_follows_control_flag() {
        let mut port = TestPort::new();
        let pin = TestPin::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(LedDriver::new(pin.clone()).unwrap());

        port.feed(b"1;50;0\n0;80;0\n1;abc;0\nabc\n");
        assert_eq!(
            Ok(Event::Actuated(Response::Switched(Level::High))),
            sketch.poll(&mut port)
        );
        assert_eq!(
            Ok(Event::Actuated(Response::Switched(Level::Low))),
            sketch.poll(&mut port)
        );
        assert_eq!(
            Ok(Event::Actuated(Response::Switched(Level::High))),
            sketch.poll(&mut port)
        );
        assert_eq!(Ok(Event::Malformed), sketch.poll(&mut port));
        assert_eq!(
            vec![Level::Low, Level::High, Level::Low, Level::High],
            pin.levels()
        );
    }

    #[test]
    fn test_actuator_errors_propagate() {
        let mut port = TestPort::new();
        let pin = TestPin::new();
        let mut sketch: Sketch<_, 64> =
            Sketch::new(LedDriver::new(pin.clone()).unwrap());
        pin.set_broken(true);

        port.feed(b"1;50;0\n");
        assert!(matches!(sketch.poll(&mut port), Err(Error::Actuator(_))));
        assert_eq!("1;50;0\r\n", port.output());
    }
}
