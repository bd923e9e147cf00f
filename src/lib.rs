#![cfg_attr(not(test), no_std)]

mod actuator;
mod attention;
mod led;
pub mod line_reader;
pub mod packet;
mod servo;
pub mod sketch;

pub use actuator::Actuator;
pub use actuator::Level;
pub use actuator::Response;
pub use attention::map_range;
pub use attention::Attention;
pub use attention::Degrees;
pub use led::LedDriver;
pub use line_reader::Line;
pub use line_reader::LineReader;
pub use line_reader::SerialInput;
pub use packet::Packet;
pub use servo::PulseRange;
pub use servo::ServoDriver;
pub use servo::ServoMotor;
pub use sketch::Event;
pub use sketch::Sketch;

#[cfg(test)]
pub use led::TestPin;
#[cfg(test)]
pub use line_reader::TestPort;
#[cfg(test)]
pub use servo::TestServo;
