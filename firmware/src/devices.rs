mod servo;
mod uart;

pub use servo::Servo;
pub use uart::Uart;
