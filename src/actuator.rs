use ufmt_macros::uDebug;

use crate::{Degrees, Packet};

/// An output device driven by [Packet]s.
pub trait Actuator {
    /// Error raised by the underlying hardware.
    type Error;

    /// Acts on a single valid packet.
    ///
    /// # Parameters
    ///
    /// - `packet`: The packet to act on.
    ///
    /// # Returns
    ///
    /// What the actuator did in response to the packet.
    fn actuate(&mut self, packet: &Packet) -> Result<Response, Self::Error>;
}

/// What an [Actuator] did with a packet.
#[derive(Debug, PartialEq, Eq, Copy, Clone, uDebug)]
pub enum Response {
    /// The servo was commanded to a new angle.
    Moved(Degrees),
    /// The servo was left at its previous angle.
    Held(Degrees),
    /// The output pin was driven to a level.
    Switched(Level),
}

/// Logic level of a digital output.
#[derive(Debug, PartialEq, Eq, Copy, Clone, uDebug)]
pub enum Level {
    Low,
    High,
}
