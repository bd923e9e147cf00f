use core::convert::Infallible;

use crate::{map_range, Actuator, Attention, Degrees, Packet, Response};

/// Hobby servo motor.
pub trait ServoMotor {
    /// Commands the servo to move to an angle.
    ///
    /// # Parameters
    ///
    /// - `angle`: Angle to move to.
    fn write_angle(&mut self, angle: Degrees);
}

/// Range of control pulse widths accepted by a servo.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct PulseRange {
    /// Pulse width for 0 degrees, in microseconds.
    min_us: u16,
    /// Pulse width for 180 degrees, in microseconds.
    max_us: u16,
}
impl PulseRange {
    /// The range most hobby servos are driven with.
    pub const STANDARD: PulseRange = PulseRange {
        min_us: 544,
        max_us: 2400,
    };

    /// Creates a new `PulseRange`.
    ///
    /// # Parameters
    ///
    /// - `min_us`: Pulse width for 0 degrees, in microseconds.
    /// - `max_us`: Pulse width for 180 degrees, in microseconds.
    pub fn new(min_us: u16, max_us: u16) -> Self {
        Self { min_us, max_us }
    }

    /// Returns the pulse width for an angle, in microseconds.
    pub fn pulse_us(&self, angle: Degrees) -> u16 {
        map_range(
            angle.get_value() as i32,
            Degrees::MIN.get_value() as i32,
            Degrees::MAX.get_value() as i32,
            self.min_us as i32,
            self.max_us as i32,
        ) as u16
    }
}

/// Drives a servo from the attention level of each packet.
///
/// The servo only moves when a packet is engaged (see
/// [Packet::is_engaged]). Otherwise it stays wherever it was last sent.
///
/// # Type Parameters
///
/// - `S`: type of the [ServoMotor].
pub struct ServoDriver<S> {
    servo: S,
    angle: Degrees,
}
impl<S: ServoMotor> ServoDriver<S> {
    /// Creates a new `ServoDriver`.
    ///
    /// This immediately centers the servo.
    ///
    /// # Parameters
    ///
    /// - `servo`: The servo to drive.
    pub fn new(mut servo: S) -> Self {
        let angle = Degrees::CENTER;
        servo.write_angle(angle);
        Self { servo, angle }
    }

    /// Returns the angle the servo was last commanded to.
    pub fn angle(&self) -> Degrees {
        self.angle
    }

    /// Moves or holds the servo according to a packet.
    pub fn drive(&mut self, packet: &Packet) -> Response {
        if !packet.is_engaged() {
            return Response::Held(self.angle);
        }

        let angle = Attention::from_raw(packet.attention).to_degrees();
        self.servo.write_angle(angle);
        self.angle = angle;
        Response::Moved(angle)
    }
}

impl<S: ServoMotor> Actuator for ServoDriver<S> {
    type Error = Infallible;

    fn actuate(&mut self, packet: &Packet) -> Result<Response, Infallible> {
        Ok(self.drive(packet))
    }
}

/// Servo to use for testing purposes.
///
/// This records every angle written to it. If the `TestServo` is cloned then
/// the record is shared, so a clone can be kept to inspect a servo that has
/// been moved into a driver.
#[cfg(test)]
#[derive(Clone)]
pub struct TestServo {
    writes: std::sync::Arc<std::sync::Mutex<std::vec::Vec<Degrees>>>,
}
#[cfg(test)]
impl TestServo {
    /// Creates a new test servo that has never been written to.
    pub fn new() -> Self {
        Self {
            writes: Default::default(),
        }
    }

    /// Returns every angle written so far, oldest first.
    pub fn writes(&self) -> std::vec::Vec<Degrees> {
        self.writes.lock().unwrap().clone()
    }
}
#[cfg(test)]
impl ServoMotor for TestServo {
    fn write_angle(&mut self, angle: Degrees) {
        self.writes.lock().unwrap().push(angle);
    }
}
