//! This module implements `Duration` along with its methods and components.

use crate::{
    iso::normalize_duration_fields, parsers::FormattableDuration, utils, CivilError,
    CivilResult, MAX_DELTA_DAYS, SECONDS_PER_DAY, US_PER_DAY, US_PER_SECOND,
};
use alloc::string::String;
use core::{
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
};
use writeable::Writeable;

#[cfg(test)]
mod tests;

/// A `PartialDuration` is a Duration that may have fields not set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialDuration {
    /// A potentially existent `weeks` field.
    pub weeks: Option<i64>,
    /// A potentially existent `days` field.
    pub days: Option<i64>,
    /// A potentially existent `hours` field.
    pub hours: Option<i64>,
    /// A potentially existent `minutes` field.
    pub minutes: Option<i64>,
    /// A potentially existent `seconds` field.
    pub seconds: Option<i64>,
    /// A potentially existent `milliseconds` field.
    pub milliseconds: Option<i64>,
    /// A potentially existent `microseconds` field.
    pub microseconds: Option<i64>,
}

impl PartialDuration {
    /// Returns whether the `PartialDuration` is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns the sum of all set fields in microseconds.
    fn total_microseconds(&self) -> i128 {
        const US_PER_MILLISECOND: i128 = 1_000;
        const US_PER_MINUTE: i128 = 60 * US_PER_SECOND as i128;
        const US_PER_HOUR: i128 = 60 * US_PER_MINUTE;
        const US_PER_WEEK: i128 = 7 * US_PER_DAY as i128;

        [
            (self.weeks, US_PER_WEEK),
            (self.days, i128::from(US_PER_DAY)),
            (self.hours, US_PER_HOUR),
            (self.minutes, US_PER_MINUTE),
            (self.seconds, i128::from(US_PER_SECOND)),
            (self.milliseconds, US_PER_MILLISECOND),
            (self.microseconds, 1),
        ]
        .iter()
        .map(|(value, factor)| i128::from(value.unwrap_or_default()) * factor)
        .sum()
    }
}

/// Convenience methods for building a `PartialDuration`
impl PartialDuration {
    pub const fn new() -> Self {
        Self {
            weeks: None,
            days: None,
            hours: None,
            minutes: None,
            seconds: None,
            milliseconds: None,
            microseconds: None,
        }
    }

    pub const fn with_weeks(mut self, weeks: i64) -> Self {
        self.weeks = Some(weeks);
        self
    }

    pub const fn with_days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    pub const fn with_hours(mut self, hours: i64) -> Self {
        self.hours = Some(hours);
        self
    }

    pub const fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub const fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub const fn with_milliseconds(mut self, milliseconds: i64) -> Self {
        self.milliseconds = Some(milliseconds);
        self
    }

    pub const fn with_microseconds(mut self, microseconds: i64) -> Self {
        self.microseconds = Some(microseconds);
        self
    }
}

/// A signed span of time with microsecond resolution.
///
/// A `Duration` is stored as a normalized days, seconds, and microseconds
/// triple. The seconds are always within `0..86_400` and the microseconds
/// within `0..1_000_000`, so the sign lives entirely in the days field. The
/// days field is bounded to `-999_999_999..=999_999_999`.
///
/// ```rust
/// use civil_rs::Duration;
///
/// let duration = Duration::new(0, 0, -1).unwrap();
/// assert_eq!(duration.days(), -1);
/// assert_eq!(duration.seconds(), 86_399);
/// assert_eq!(duration.microseconds(), 999_999);
/// assert_eq!(duration.to_string(), "-1 day, 23:59:59.999999");
/// ```
///
/// The arithmetic operators panic when the result is out of range, the
/// `checked_*` methods return an error instead.
#[non_exhaustive]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    days: i32,
    seconds: i32,
    microseconds: i32,
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_formattable().write_to(f)
    }
}

impl fmt::Debug for Duration {
    /// Writes the constructor form of this duration, eliding trailing zero
    /// microseconds and then seconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}", self.days)?;
        if self.seconds != 0 || self.microseconds != 0 {
            write!(f, ", {}", self.seconds)?;
        }
        if self.microseconds != 0 {
            write!(f, ", {}", self.microseconds)?;
        }
        f.write_str(")")
    }
}

// ==== Private Creation methods ====

impl Duration {
    /// Creates a new `Duration` from already normalized fields.
    #[inline]
    pub(crate) const fn new_unchecked(days: i32, seconds: i32, microseconds: i32) -> Self {
        debug_assert!(-MAX_DELTA_DAYS <= days && days <= MAX_DELTA_DAYS);
        debug_assert!(0 <= seconds && seconds < SECONDS_PER_DAY as i32);
        debug_assert!(0 <= microseconds && microseconds < US_PER_SECOND as i32);
        Self {
            days,
            seconds,
            microseconds,
        }
    }

    /// Creates a `Duration` from normalized fields, validating the days range.
    #[inline]
    fn from_normalized_fields(days: i64, seconds: i64, microseconds: i64) -> CivilResult<Self> {
        if !(-i64::from(MAX_DELTA_DAYS)..=i64::from(MAX_DELTA_DAYS)).contains(&days) {
            return Err(CivilError::range().with_message(alloc::format!(
                "days={days}; must have magnitude <= {MAX_DELTA_DAYS}"
            )));
        }
        // NOTE: seconds and microseconds are normalized into their i32 ranges.
        Ok(Self::new_unchecked(
            days as i32,
            seconds as i32,
            microseconds as i32,
        ))
    }

    /// Creates a `Duration` from a total count of microseconds.
    pub(crate) fn from_total_microseconds(total: i128) -> CivilResult<Self> {
        let (days, rest) = utils::div_mod_floor(total, i128::from(US_PER_DAY));
        let days = i64::try_from(days).map_err(|_| {
            CivilError::range().with_message("Duration exceeds the supported range of days.")
        })?;
        // NOTE: rest is within 0..US_PER_DAY.
        let rest = rest as i64;
        Self::from_normalized_fields(days, rest / US_PER_SECOND, rest % US_PER_SECOND)
    }

    /// Returns the total microseconds of this duration.
    #[inline]
    pub(crate) fn as_total_microseconds(&self) -> i128 {
        (i128::from(self.days) * i128::from(SECONDS_PER_DAY) + i128::from(self.seconds))
            * i128::from(US_PER_SECOND)
            + i128::from(self.microseconds)
    }

    /// Returns the negated fields, normalized.
    fn negated_fields(&self) -> (i64, i64, i64) {
        let days = -i64::from(self.days);
        match (self.seconds, self.microseconds) {
            (0, 0) => (days, 0, 0),
            (seconds, 0) => (days - 1, SECONDS_PER_DAY - i64::from(seconds), 0),
            (seconds, microseconds) => (
                days - 1,
                SECONDS_PER_DAY - 1 - i64::from(seconds),
                US_PER_SECOND - i64::from(microseconds),
            ),
        }
    }

    #[inline]
    pub(crate) fn to_formattable(self) -> FormattableDuration {
        FormattableDuration {
            days: self.days,
            seconds: self.seconds,
            microseconds: self.microseconds,
        }
    }
}

// ==== Public Duration API ====

impl Duration {
    /// The most negative `Duration`: `-999_999_999` days.
    pub const MIN: Self = Self::new_unchecked(-MAX_DELTA_DAYS, 0, 0);
    /// The most positive `Duration`: `999_999_999` days, 23:59:59.999999.
    pub const MAX: Self = Self::new_unchecked(
        MAX_DELTA_DAYS,
        SECONDS_PER_DAY as i32 - 1,
        US_PER_SECOND as i32 - 1,
    );
    /// The smallest positive difference between unequal `Duration`s: one microsecond.
    pub const RESOLUTION: Self = Self::new_unchecked(0, 0, 1);

    /// Creates a new validated `Duration` from days, seconds, and microseconds.
    ///
    /// The fields may be out of their normal ranges and are normalized.
    pub fn new(days: i64, seconds: i64, microseconds: i64) -> CivilResult<Self> {
        let (days, seconds, microseconds) = normalize_duration_fields(days, seconds, microseconds)?;
        Self::from_normalized_fields(days, seconds, microseconds)
    }

    /// Creates a `Duration` from a partial record of units.
    ///
    /// All set fields are summed as microseconds and then normalized.
    pub fn from_partial_duration(partial: PartialDuration) -> CivilResult<Self> {
        if partial.is_empty() {
            return Err(CivilError::general("PartialDuration cannot have all empty fields."));
        }
        Self::from_total_microseconds(partial.total_microseconds())
    }

    /// Creates a `Duration` of whole weeks.
    pub fn from_weeks(weeks: i64) -> CivilResult<Self> {
        Self::from_partial_duration(PartialDuration::new().with_weeks(weeks))
    }

    /// Creates a `Duration` of whole days.
    pub fn from_days(days: i64) -> CivilResult<Self> {
        Self::from_partial_duration(PartialDuration::new().with_days(days))
    }

    /// Creates a `Duration` of whole hours.
    pub fn from_hours(hours: i64) -> CivilResult<Self> {
        Self::from_partial_duration(PartialDuration::new().with_hours(hours))
    }

    /// Creates a `Duration` of whole minutes.
    pub fn from_minutes(minutes: i64) -> CivilResult<Self> {
        Self::from_partial_duration(PartialDuration::new().with_minutes(minutes))
    }

    /// Creates a `Duration` of whole seconds.
    pub fn from_seconds(seconds: i64) -> CivilResult<Self> {
        Self::from_partial_duration(PartialDuration::new().with_seconds(seconds))
    }

    /// Creates a `Duration` of whole milliseconds.
    pub fn from_milliseconds(milliseconds: i64) -> CivilResult<Self> {
        Self::from_partial_duration(PartialDuration::new().with_milliseconds(milliseconds))
    }

    /// Creates a `Duration` of whole microseconds.
    pub fn from_microseconds(microseconds: i64) -> CivilResult<Self> {
        Self::from_total_microseconds(i128::from(microseconds))
    }
}

// ==== Public `Duration` Getters ====

impl Duration {
    /// Returns the days field, which carries the sign of the duration.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Returns the seconds field, within `0..86_400`.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.seconds
    }

    /// Returns the microseconds field, within `0..1_000_000`.
    #[inline]
    #[must_use]
    pub const fn microseconds(&self) -> i32 {
        self.microseconds
    }

    /// Returns whether this duration is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.seconds == 0 && self.microseconds == 0
    }

    /// Returns whether this duration is less than zero.
    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.days < 0
    }

    /// Returns the whole seconds of this duration, rounded towards negative infinity.
    #[inline]
    #[must_use]
    pub fn total_seconds(&self) -> i64 {
        i64::from(self.days) * SECONDS_PER_DAY + i64::from(self.seconds)
    }

    /// Returns the whole milliseconds of this duration, rounded towards negative infinity.
    #[inline]
    #[must_use]
    pub fn total_milliseconds(&self) -> i64 {
        self.total_seconds() * 1_000 + i64::from(self.microseconds) / 1_000
    }

    /// Returns the total microseconds of this duration.
    #[inline]
    #[must_use]
    pub fn total_microseconds(&self) -> i128 {
        self.as_total_microseconds()
    }
}

// ==== Public Duration methods ====

impl Duration {
    /// Returns the absolute value of this duration.
    #[must_use]
    pub fn abs(&self) -> Self {
        if !self.is_negative() {
            return *self;
        }
        let (days, seconds, microseconds) = self.negated_fields();
        // NOTE: negating a negative in-range duration cannot exceed the maximum.
        Self::new_unchecked(days as i32, seconds as i32, microseconds as i32)
    }

    /// Returns the negation of this duration.
    ///
    /// Fails for `Duration::MAX` whose negation is below `Duration::MIN`.
    pub fn checked_neg(&self) -> CivilResult<Self> {
        let (days, seconds, microseconds) = self.negated_fields();
        Self::from_normalized_fields(days, seconds, microseconds)
    }

    /// Adds two durations.
    pub fn checked_add(&self, other: &Self) -> CivilResult<Self> {
        Self::new(
            i64::from(self.days) + i64::from(other.days),
            i64::from(self.seconds) + i64::from(other.seconds),
            i64::from(self.microseconds) + i64::from(other.microseconds),
        )
    }

    /// Subtracts `other` from this duration.
    pub fn checked_sub(&self, other: &Self) -> CivilResult<Self> {
        Self::new(
            i64::from(self.days) - i64::from(other.days),
            i64::from(self.seconds) - i64::from(other.seconds),
            i64::from(self.microseconds) - i64::from(other.microseconds),
        )
    }

    /// Multiplies this duration by an integer.
    pub fn checked_mul(&self, rhs: i64) -> CivilResult<Self> {
        let total = self
            .as_total_microseconds()
            .checked_mul(i128::from(rhs))
            .ok_or(CivilError::range().with_message("Duration multiplication overflowed."))?;
        Self::from_total_microseconds(total)
    }

    /// Divides this duration by an integer, rounding towards negative infinity.
    pub fn checked_div(&self, rhs: i64) -> CivilResult<Self> {
        if rhs == 0 {
            return Err(CivilError::domain().with_message("Duration division by zero."));
        }
        let (quotient, _) = utils::div_mod_floor(self.as_total_microseconds(), i128::from(rhs));
        Self::from_total_microseconds(quotient)
    }

    /// Returns how many whole times `other` fits into this duration,
    /// rounding towards negative infinity.
    ///
    /// The quotient is a count rather than a `Duration`, so there is no
    /// `Duration / Duration` operator.
    pub fn checked_div_duration(&self, other: &Self) -> CivilResult<i64> {
        self.checked_div_rem(other).map(|(quotient, _)| quotient)
    }

    /// Returns the remainder of dividing this duration by `other`.
    ///
    /// The remainder has the sign of `other`.
    pub fn checked_rem(&self, other: &Self) -> CivilResult<Self> {
        self.checked_div_rem(other).map(|(_, rem)| rem)
    }

    /// Returns both the floored quotient and remainder of dividing this
    /// duration by `other`.
    pub fn checked_div_rem(&self, other: &Self) -> CivilResult<(i64, Self)> {
        if other.is_zero() {
            return Err(CivilError::domain().with_message("Duration division or modulo by zero."));
        }
        let (quotient, rem) =
            utils::div_mod_floor(self.as_total_microseconds(), other.as_total_microseconds());
        let quotient = i64::try_from(quotient).map_err(|_| {
            CivilError::overflow().with_message("Duration quotient exceeds the i64 range.")
        })?;
        Ok((quotient, Self::from_total_microseconds(rem)?))
    }

    /// Returns the text form of this duration, e.g. `1 day, 2:03:04.000005`.
    #[inline]
    #[must_use]
    pub fn to_string_form(&self) -> String {
        self.to_formattable().write_to_string().into_owned()
    }

    /// Returns the constructor form of this duration, e.g. `Duration(1, 2, 3)`.
    #[inline]
    #[must_use]
    pub fn repr(&self) -> String {
        alloc::format!("{self:?}")
    }
}

// ==== Trait impls ====

impl TryFrom<core::time::Duration> for Duration {
    type Error = CivilError;

    /// Converts a `core::time::Duration`, truncating sub-microsecond precision.
    fn try_from(value: core::time::Duration) -> Result<Self, Self::Error> {
        Self::from_total_microseconds(i128::try_from(value.as_micros()).map_err(|_| {
            CivilError::range().with_message("Duration exceeds the supported range of days.")
        })?)
    }
}

impl Neg for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when negating `Duration::MAX`.
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("Duration negation overflowed")
    }
}

impl Add for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the sum is out of range.
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs).expect("Duration addition overflowed")
    }
}

impl Sub for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the difference is out of range.
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs).expect("Duration subtraction overflowed")
    }
}

impl Mul<i32> for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the product is out of range.
    fn mul(self, rhs: i32) -> Self::Output {
        self.checked_mul(rhs.into())
            .expect("Duration multiplication overflowed")
    }
}

impl Mul<Duration> for i32 {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics when the product is out of range.
    fn mul(self, rhs: Duration) -> Self::Output {
        rhs * self
    }
}

impl Div<i32> for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when dividing by zero.
    fn div(self, rhs: i32) -> Self::Output {
        self.checked_div(rhs.into()).expect("Duration division by zero")
    }
}

impl Rem for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the divisor is a zero duration.
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(&rhs).expect("Duration modulo by zero")
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<i32> for Duration {
    fn mul_assign(&mut self, rhs: i32) {
        *self = *self * rhs;
    }
}

impl DivAssign<i32> for Duration {
    fn div_assign(&mut self, rhs: i32) {
        *self = *self / rhs;
    }
}

impl RemAssign for Duration {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}
