use ufmt_macros::uDebug;
use winnow::ascii::digit0;
use winnow::combinator::opt;
use winnow::token::{literal, one_of, rest, take_till, take_while};
use winnow::{Parser, Result};

/// One parsed line of the serial protocol.
///
/// The wire form is `"R;G;B"`, three decimal integers separated by
/// semicolons.
#[derive(Debug, PartialEq, Eq, Copy, Clone, uDebug)]
pub struct Packet {
    /// `R`: the control flag. Actuators only engage when this is `1`.
    pub control: i32,
    /// `G`: the attention level, nominally a percentage.
    pub attention: i32,
    /// `B`: carried on the wire but unused by either actuator.
    pub extra: i32,
}
impl Packet {
    /// Creates a new `Packet`.
    pub fn new(control: i32, attention: i32, extra: i32) -> Self {
        Self {
            control,
            attention,
            extra,
        }
    }

    /// Parses a `Packet` from a single (already trimmed) line.
    ///
    /// The line must contain a non-empty field before the first `;`, and a
    /// second `;` somewhere after it. Everything after the second `;` is the
    /// third field, so `"1;2;3;4"` has a third field of `"3;4"`.
    ///
    /// Each field is converted with [leading_int], so fields that are not
    /// numbers become `0` instead of failing the parse.
    ///
    /// # Returns
    ///
    /// - `Ok(packet)`: if both delimiters were found in order.
    /// - `Err(Error::MalformedPacket)`: otherwise.
    pub fn parse(line: &str) -> core::result::Result<Packet, Error> {
        Self::from_bytes(line.as_bytes())
    }

    /// Parses a `Packet` from the raw bytes of a line.
    ///
    /// This behaves exactly like [Packet::parse]. Delimiters, signs and
    /// digits are all ASCII, so bytes outside ASCII only ever land inside a
    /// field.
    pub fn from_bytes(line: &[u8]) -> core::result::Result<Packet, Error> {
        let mut input = line;
        let (control, attention, extra) = parse_fields
            .parse_next(&mut input)
            .map_err(|_| Error::MalformedPacket)?;

        Ok(Packet::new(
            leading_int_bytes(control),
            leading_int_bytes(attention),
            leading_int_bytes(extra),
        ))
    }

    /// Returns `true` if the control flag is set.
    pub fn is_engaged(&self) -> bool {
        self.control == 1
    }
}

/// Errors that might occur when parsing a packet.
#[derive(Debug, PartialEq, Copy, Clone, uDebug)]
pub enum Error {
    /// The delimiters were missing or in the wrong place.
    MalformedPacket,
}

/// Split a line into its three raw fields.
fn parse_fields<'s>(
    input: &mut &'s [u8],
) -> Result<(&'s [u8], &'s [u8], &'s [u8])> {
    let first = take_till(1.., b';').parse_next(input)?;
    parse_delimiter.parse_next(input)?;
    let second = take_till(0.., b';').parse_next(input)?;
    parse_delimiter.parse_next(input)?;
    let third = rest.parse_next(input)?;
    Ok((first, second, third))
}

/// Parse and discard a field delimiter (`;`).
fn parse_delimiter<'s>(input: &mut &'s [u8]) -> Result<()> {
    literal(b";").map(|_| ()).parse_next(input)
}

/// Converts the leading integer of a field.
///
/// Leading whitespace is skipped and an optional sign is accepted. Digits are
/// consumed until the first non-digit, and anything after that is ignored. A
/// field without any digits converts to `0`. Values outside the `i32` range
/// saturate.
///
/// Values never wrap, unlike a conversion into a 16-bit `int`: `"65537"` is
/// 65537 here, not 1.
///
/// eg.
///   - `"42"`    -> 42
///   - `" -7"`   -> -7
///   - `"12abc"` -> 12
///   - `"abc"`   -> 0
pub fn leading_int(field: &str) -> i32 {
    leading_int_bytes(field.as_bytes())
}

/// Converts the leading integer of a raw field. See [leading_int].
fn leading_int_bytes(field: &[u8]) -> i32 {
    let mut input = field;
    parse_leading_int.parse_next(&mut input).unwrap_or(0)
}

/// Parse the leading integer of a field, ignoring trailing content.
fn parse_leading_int<'s>(input: &mut &'s [u8]) -> Result<i32> {
    skip_ws.parse_next(input)?;
    let sign = match opt(one_of([b'+', b'-'])).parse_next(input)? {
        Some(b'-') => -1,
        _ => 1,
    };
    let digits: &[u8] = digit0.parse_next(input)?;

    let value = digits.iter().fold(0i32, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(sign * i32::from(digit - b'0'))
    });
    Ok(value)
}

/// Skip whitespace when parsing.
fn skip_ws<'s>(input: &mut &'s [u8]) -> Result<()> {
    take_while(0.., |b: u8| b.is_ascii_whitespace() || b == 0x0b)
        .parse_next(input)
        .map(|_| ())
}
