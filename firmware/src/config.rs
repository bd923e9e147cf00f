/// Serial baud rate. The host sending packets must use the same rate.
pub const BAUD_RATE: u32 = 115_200;

/// Longest line accepted from the host, in bytes, not counting the newline.
///
/// Packets are three short integers, so anything longer than this is noise.
pub const LINE_CAPACITY: usize = 64;
