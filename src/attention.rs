use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Underlying type representing an attention level.
type AttentionRepr = u8;

/// Attention level, as a percentage.
///
/// An `Attention` is always in the range `[0, 100]`.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct Attention(AttentionRepr);
impl Attention {
    /// No attention at all.
    pub const MIN: Attention = Attention(0);
    /// Full attention.
    pub const MAX: Attention = Attention(100);

    /// Creates a new `Attention` from a raw packet field.
    ///
    /// Values outside `[0, 100]` are clamped into range.
    pub fn from_raw(raw: i32) -> Self {
        let lo = Self::MIN.get_value() as i32;
        let hi = Self::MAX.get_value() as i32;
        Self(raw.clamp(lo, hi) as AttentionRepr)
    }

    /// Returns the value as a `u8`.
    pub fn get_value(&self) -> AttentionRepr {
        self.0
    }

    /// Maps the attention level linearly onto a servo angle.
    ///
    /// 0% is 0 degrees and 100% is 180 degrees. Values in between are
    /// truncated, so 33% is 59 degrees.
    pub fn to_degrees(&self) -> Degrees {
        let angle = map_range(
            self.0 as i32,
            Self::MIN.get_value() as i32,
            Self::MAX.get_value() as i32,
            Degrees::MIN.get_value() as i32,
            Degrees::MAX.get_value() as i32,
        );
        Degrees::new(angle as DegreesRepr)
    }
}

/// Underlying type representing a servo angle.
type DegreesRepr = u8;

/// Servo angle in whole degrees.
///
/// A `Degrees` is always in the range `[0, 180]`.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct Degrees(DegreesRepr);
impl Degrees {
    /// Lowest servo angle.
    pub const MIN: Degrees = Degrees(0);
    /// Servo center.
    pub const CENTER: Degrees = Degrees(90);
    /// Highest servo angle.
    pub const MAX: Degrees = Degrees(180);

    /// Creates a new `Degrees`, saturating at 180.
    pub fn new(value: DegreesRepr) -> Self {
        Self(value.min(Self::MAX.0))
    }

    /// Returns the value as a `u8`.
    pub fn get_value(&self) -> DegreesRepr {
        self.0
    }
}

impl uDisplay for Degrees {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uDisplay::fmt(&self.0, f)
    }
}

/// Re-maps a number from one range to another.
///
/// This is a straight linear interpolation using integer arithmetic, with
/// the division truncating toward zero. `value` is NOT clamped to the input
/// range, so values outside it map outside the output range. Results that do
/// not fit in an `i32` saturate.
///
/// # Parameters
///
/// - `value`: Number to map.
/// - `in_min`, `in_max`: Input range. These must not be equal.
/// - `out_min`, `out_max`: Output range.
pub fn map_range(
    value: i32,
    in_min: i32,
    in_max: i32,
    out_min: i32,
    out_max: i32,
) -> i32 {
    let value = i64::from(value);
    let (in_min, in_max) = (i64::from(in_min), i64::from(in_max));
    let (out_min, out_max) = (i64::from(out_min), i64::from(out_max));

    let mapped = (value - in_min)
        .saturating_mul(out_max - out_min)
        .saturating_div(in_max - in_min)
        .saturating_add(out_min);
    mapped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
