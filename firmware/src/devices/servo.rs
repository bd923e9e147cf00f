use arduino_hal::{
    pac::TC1,
    port::{mode::Output, Pin, D9},
};
use mindlink::{Degrees, PulseRange, ServoMotor};

/// Hobby servo on pin D9.
///
/// The control pulse is generated in hardware by Timer1 (output compare
/// `OC1A`), so the pulse train keeps running between writes.
pub struct Servo {
    timer: TC1,
    _pin: Pin<Output, D9>,
    range: PulseRange,
}
impl Servo {
    /// Timer1 tick with a 16 MHz clock and a /64 prescaler, in microseconds.
    const TICK_US: u16 = 4;
    /// Timer1 TOP value giving a 20 ms (50 Hz) period.
    const TOP: u16 = 4999;

    /// Attaches a servo and starts the pulse train.
    ///
    /// The pulse width is left at zero until the first call to
    /// [ServoMotor::write_angle], so most servos stay limp until then.
    ///
    /// # Parameters
    ///
    /// - `timer`: Timer1, which is taken over completely.
    /// - `pin`: Pin D9, which carries the control signal.
    /// - `range`: Pulse widths corresponding to 0 and 180 degrees.
    pub fn attach(
        timer: TC1,
        pin: Pin<Output, D9>,
        range: PulseRange,
    ) -> Self {
        // Fast PWM with ICR1 as TOP, clearing OC1A on compare match.
        timer.icr1.write(|w| unsafe { w.bits(Self::TOP) });
        timer
            .tccr1a
            .write(|w| w.wgm1().bits(0b10).com1a().match_clear());
        timer
            .tccr1b
            .write(|w| w.wgm1().bits(0b11).cs1().prescale_64());

        Self {
            timer,
            _pin: pin,
            range,
        }
    }

    /// Sets the width of the control pulse.
    ///
    /// # Parameters
    ///
    /// - `pulse_us`: Pulse width in microseconds.
    fn set_pulse_us(&mut self, pulse_us: u16) {
        let ticks = (pulse_us / Self::TICK_US).min(Self::TOP);
        self.timer.ocr1a.write(|w| unsafe { w.bits(ticks) });
    }
}

/// The `Servo` interface that allows the servo to be driven by
/// [mindlink::ServoDriver].
impl ServoMotor for Servo {
    fn write_angle(&mut self, angle: Degrees) {
        let pulse_us = self.range.pulse_us(angle);
        self.set_pulse_us(pulse_us);
    }
}
