//! This module implements `PlainTime` and any directly related algorithms.

use alloc::string::String;
use core::{fmt, str::FromStr};
use writeable::Writeable;

use crate::{
    iso::{IsoDate, IsoDateTime, IsoTime},
    parsers::{self, FormattableTime},
    CivilError, CivilResult,
};

use super::Duration;

/// A wall-clock time of day with microsecond resolution, without a date or
/// time zone.
///
/// ```rust
/// use civil_rs::PlainTime;
///
/// let time = PlainTime::try_new(15, 59, 55, 123_456).unwrap();
/// assert_eq!(time.to_string(), "15:59:55.123456");
///
/// let parsed: PlainTime = "15:59:55.123456+05:30".parse().unwrap();
/// assert_eq!(parsed, time);
/// ```
#[non_exhaustive]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainTime {
    pub(crate) iso: IsoTime,
}

impl fmt::Debug for PlainTime {
    /// Writes the constructor form, eliding a trailing zero microsecond and
    /// then second.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlainTime({}, {}", self.iso.hour, self.iso.minute)?;
        if self.iso.second != 0 || self.iso.microsecond != 0 {
            write!(f, ", {}", self.iso.second)?;
        }
        if self.iso.microsecond != 0 {
            write!(f, ", {}", self.iso.microsecond)?;
        }
        f.write_str(")")
    }
}

// ==== Private API ====

impl PlainTime {
    /// Creates a new unvalidated `PlainTime`.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoTime) -> Self {
        Self { iso }
    }

    /// `strftime` renders times on 1900-01-01.
    fn as_formattable_datetime(&self) -> IsoDateTime {
        IsoDateTime::new_unchecked(IsoDate::new_unchecked(1900, 1, 1), self.iso)
    }
}

// ==== Public API ====

impl PlainTime {
    /// The earliest time, midnight.
    pub const MIN: Self = Self::new_unchecked(IsoTime::new_unchecked(0, 0, 0, 0));
    /// The latest time, 23:59:59.999999.
    pub const MAX: Self = Self::new_unchecked(IsoTime::new_unchecked(23, 59, 59, 999_999));
    /// The smallest difference between unequal times, one microsecond.
    pub const RESOLUTION: Duration = Duration::RESOLUTION;

    /// Creates a new validated `PlainTime`.
    #[inline]
    pub fn try_new(hour: i32, minute: i32, second: i32, microsecond: i32) -> CivilResult<Self> {
        IsoTime::new(hour, minute, second, microsecond).map(Self::new_unchecked)
    }

    /// Parses a `HH[:MM[:SS]][.fff|.ffffff]` string. A trailing UTC offset is
    /// accepted and ignored.
    pub fn from_iso_format(source: &str) -> CivilResult<Self> {
        parsers::parse_time(source).map(|parsed| Self::new_unchecked(parsed.time))
    }

    /// Returns the hour, 0..=23.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.hour
    }

    /// Returns the minute, 0..=59.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.minute
    }

    /// Returns the second, 0..=59.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.second
    }

    /// Returns the microsecond, 0..=999_999.
    #[inline]
    #[must_use]
    pub const fn microsecond(&self) -> u32 {
        self.iso.microsecond
    }

    /// Returns whether this time is midnight.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.iso.is_zero()
    }

    /// Returns the `HH:MM:SS[.ffffff]` string of this time.
    #[inline]
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        FormattableTime::from(self.iso)
            .write_to_string()
            .into_owned()
    }

    /// Formats this time with a `strftime` format string. Date fields are
    /// those of 1900-01-01.
    pub fn strftime(&self, format: &str) -> CivilResult<String> {
        parsers::strftime(&self.as_formattable_datetime(), format)
    }

    /// Returns the constructor form of this time, e.g. `PlainTime(12, 30)`.
    #[inline]
    #[must_use]
    pub fn repr(&self) -> String {
        alloc::format!("{self:?}")
    }
}

// ==== Trait impls ====

impl fmt::Display for PlainTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FormattableTime::from(self.iso).write_to(f)
    }
}

impl FromStr for PlainTime {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso_format(s)
    }
}
