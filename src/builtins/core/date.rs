//! This module implements `PlainDate` and any directly related algorithms.

use alloc::string::String;
use core::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};
use writeable::Writeable;

use crate::{
    host::HostTimeZone,
    iso::{IsoCalendarDate, IsoDate, IsoDateTime, IsoTime},
    parsers::{self, FormattableCtime, FormattableDate},
    utils, CivilError, CivilResult, MAX_ORDINAL, MAX_YEAR, MIN_YEAR,
};

use super::Duration;

/// A calendar date on the proleptic Gregorian calendar.
///
/// ```rust
/// use civil_rs::{Duration, PlainDate};
///
/// let date = PlainDate::try_new(2024, 2, 29).unwrap();
/// assert_eq!(date.to_ordinal(), 738_945);
/// assert_eq!(date.to_string(), "2024-02-29");
///
/// let next = date + Duration::from_days(1).unwrap();
/// assert_eq!(next, PlainDate::try_new(2024, 3, 1).unwrap());
///
/// assert!(PlainDate::try_new(2023, 2, 29).is_err());
/// ```
#[non_exhaustive]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDate {
    pub(crate) iso: IsoDate,
}

impl fmt::Debug for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlainDate({}, {}, {})",
            self.iso.year, self.iso.month, self.iso.day
        )
    }
}

// ==== Private API ====

impl PlainDate {
    /// Creates a new unvalidated `PlainDate`.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDate) -> Self {
        Self { iso }
    }
}

// ==== Public API ====

impl PlainDate {
    /// The earliest supported date, 0001-01-01.
    pub const MIN: Self = Self::new_unchecked(IsoDate::new_unchecked(MIN_YEAR, 1, 1));
    /// The latest supported date, 9999-12-31.
    pub const MAX: Self = Self::new_unchecked(IsoDate::new_unchecked(MAX_YEAR, 12, 31));
    /// The smallest difference between unequal dates, one day.
    pub const RESOLUTION: Duration = Duration::new_unchecked(1, 0, 0);

    /// Creates a new validated `PlainDate`.
    #[inline]
    pub fn try_new(year: i32, month: i32, day: i32) -> CivilResult<Self> {
        IsoDate::new(year, month, day).map(Self::new_unchecked)
    }

    /// Creates a `PlainDate` from a day ordinal, where 0001-01-01 is day 1.
    pub fn from_ordinal(ordinal: i32) -> CivilResult<Self> {
        IsoDate::from_ordinal(ordinal).map(Self::new_unchecked)
    }

    /// Creates a `PlainDate` from an ISO year, week, and weekday.
    pub fn from_iso_calendar(iso_calendar: IsoCalendarDate) -> CivilResult<Self> {
        IsoDate::from_iso_calendar(iso_calendar).map(Self::new_unchecked)
    }

    /// Creates the `PlainDate` for a POSIX timestamp in seconds, in the local
    /// time of `tz`.
    pub fn from_timestamp_with_provider(
        seconds: i64,
        tz: &(impl HostTimeZone + ?Sized),
    ) -> CivilResult<Self> {
        let fields = tz.get_wall_clock_fields(seconds)?;
        Self::try_new(fields.year, fields.month.into(), fields.day.into())
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn from_iso_format(source: &str) -> CivilResult<Self> {
        parsers::parse_date(source).map(Self::new_unchecked)
    }

    /// Returns the year.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.year
    }

    /// Returns the month, 1..=12.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.iso.month
    }

    /// Returns the day of the month.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.iso.day
    }

    /// Returns the number of days in this date's month.
    #[inline]
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        utils::days_in_month(self.iso.year, self.iso.month)
    }

    /// Returns whether this date's year is a leap year.
    #[inline]
    #[must_use]
    pub fn in_leap_year(&self) -> bool {
        utils::is_leap_year(self.iso.year)
    }

    /// Returns the day ordinal, where 0001-01-01 is day 1.
    #[inline]
    #[must_use]
    pub fn to_ordinal(&self) -> i32 {
        self.iso.to_ordinal()
    }

    /// Returns the day of the week, where Monday is 0 and Sunday is 6.
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> u8 {
        self.iso.weekday()
    }

    /// Returns the ISO day of the week, where Monday is 1 and Sunday is 7.
    #[inline]
    #[must_use]
    pub fn iso_weekday(&self) -> u8 {
        self.iso.weekday() + 1
    }

    /// Returns the day of the year, where January 1st is 1.
    #[inline]
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        self.iso.day_of_year()
    }

    /// Returns the ISO year, week, and weekday of this date.
    #[inline]
    #[must_use]
    pub fn iso_calendar(&self) -> IsoCalendarDate {
        self.iso.iso_calendar()
    }

    /// Adds the days of `duration` to this date. Its seconds and
    /// microseconds are ignored.
    pub fn checked_add(&self, duration: &Duration) -> CivilResult<Self> {
        self.iso
            .add_days(duration.days().into())
            .map(Self::new_unchecked)
    }

    /// Subtracts the days of `duration` from this date. Its seconds and
    /// microseconds are ignored.
    pub fn checked_sub(&self, duration: &Duration) -> CivilResult<Self> {
        self.iso
            .add_days(-i64::from(duration.days()))
            .map(Self::new_unchecked)
    }

    /// Returns the whole days from `other` to this date.
    #[must_use]
    pub fn since(&self, other: &Self) -> Duration {
        let days = self.to_ordinal() - other.to_ordinal();
        // NOTE: the difference of two ordinals is within `-MAX_ORDINAL..=MAX_ORDINAL`.
        debug_assert!(days.abs() < MAX_ORDINAL);
        Duration::new_unchecked(days, 0, 0)
    }

    /// Returns the `YYYY-MM-DD` string of this date.
    #[inline]
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        FormattableDate::from(self.iso)
            .write_to_string()
            .into_owned()
    }

    /// Returns the `ctime` string of this date, with a zero time.
    #[inline]
    #[must_use]
    pub fn ctime(&self) -> String {
        FormattableCtime::from(IsoDateTime::new_unchecked(self.iso, IsoTime::default()))
            .write_to_string()
            .into_owned()
    }

    /// Formats this date with a `strftime` format string. Time fields are zero.
    pub fn strftime(&self, format: &str) -> CivilResult<String> {
        parsers::strftime(
            &IsoDateTime::new_unchecked(self.iso, IsoTime::default()),
            format,
        )
    }

    /// Returns the constructor form of this date, e.g. `PlainDate(2021, 8, 31)`.
    #[inline]
    #[must_use]
    pub fn repr(&self) -> String {
        alloc::format!("{self:?}")
    }
}

// ==== Trait impls ====

impl fmt::Display for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FormattableDate::from(self.iso).write_to(f)
    }
}

impl FromStr for PlainDate {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso_format(s)
    }
}

impl Add<Duration> for PlainDate {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the result is outside of the supported years.
    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(&rhs).expect("date value out of range")
    }
}

impl Sub<Duration> for PlainDate {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the result is outside of the supported years.
    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(&rhs).expect("date value out of range")
    }
}

impl Sub for PlainDate {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        self.since(&rhs)
    }
}

impl AddAssign<Duration> for PlainDate {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign<Duration> for PlainDate {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::PlainDate;
    use crate::{
        builtins::core::timezone::tests::{MockNewYork, FALL_BACK},
        error::ErrorKind,
        Duration, IsoCalendarDate, MAX_ORDINAL,
    };
    use alloc::string::ToString;

    #[test]
    fn construction() {
        assert!(PlainDate::try_new(2024, 2, 29).is_ok());
        let err = PlainDate::try_new(2023, 2, 29).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(PlainDate::try_new(0, 1, 1).is_err());
        assert!(PlainDate::try_new(10_000, 1, 1).is_err());
        assert!(PlainDate::try_new(2021, 13, 1).is_err());
        assert!(PlainDate::try_new(2021, 4, 31).is_err());
        assert!(PlainDate::try_new(2021, 1, 0).is_err());
    }

    #[test]
    fn ordinals() {
        assert_eq!(PlainDate::MIN.to_ordinal(), 1);
        assert_eq!(PlainDate::MAX.to_ordinal(), MAX_ORDINAL);
        assert_eq!(
            PlainDate::from_ordinal(738_945).unwrap(),
            PlainDate::try_new(2024, 2, 29).unwrap()
        );
        assert!(PlainDate::from_ordinal(0).is_err());
        assert!(PlainDate::from_ordinal(MAX_ORDINAL + 1).is_err());
    }

    #[test]
    fn date_difference() {
        let start = PlainDate::try_new(2021, 8, 1).unwrap();
        let end = PlainDate::try_new(2021, 8, 31).unwrap();
        assert_eq!(end - start, Duration::from_days(30).unwrap());
        assert_eq!(start - end, Duration::from_days(-30).unwrap());
        assert_eq!(
            PlainDate::MAX - PlainDate::MIN,
            Duration::from_days(i64::from(MAX_ORDINAL) - 1).unwrap()
        );
    }

    #[test]
    fn duration_arithmetic() {
        let date = PlainDate::try_new(2021, 12, 31).unwrap();
        // Seconds and microseconds are ignored.
        let duration = Duration::new(1, 86_399, 999_999).unwrap();
        assert_eq!(date + duration, PlainDate::try_new(2022, 1, 1).unwrap());
        assert_eq!(date - duration, PlainDate::try_new(2021, 12, 30).unwrap());

        let mut date = PlainDate::try_new(2024, 3, 1).unwrap();
        date -= Duration::from_days(1).unwrap();
        assert_eq!(date, PlainDate::try_new(2024, 2, 29).unwrap());
        date += Duration::from_weeks(52).unwrap();
        assert_eq!(date, PlainDate::try_new(2025, 2, 27).unwrap());

        let err = PlainDate::MAX
            .checked_add(&Duration::from_days(1).unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(PlainDate::MIN.checked_sub(&PlainDate::RESOLUTION).is_err());
        assert!(PlainDate::MIN.checked_add(&Duration::MAX).is_err());
    }

    #[test]
    fn weekdays() {
        let date = PlainDate::try_new(2021, 8, 31).unwrap();
        assert_eq!(date.weekday(), 1);
        assert_eq!(date.iso_weekday(), 2);
        assert_eq!(date.day_of_year(), 243);
        assert_eq!(PlainDate::try_new(2024, 12, 31).unwrap().day_of_year(), 366);
    }

    #[test]
    fn iso_calendar() {
        let date = PlainDate::from_iso_calendar(IsoCalendarDate::new(2021, 1, 1)).unwrap();
        assert_eq!(date, PlainDate::try_new(2021, 1, 4).unwrap());
        assert_eq!(date.iso_calendar(), IsoCalendarDate::new(2021, 1, 1));
        assert_eq!(
            PlainDate::MAX.iso_calendar(),
            IsoCalendarDate::new(9999, 52, 5)
        );
    }

    #[test]
    fn iso_calendar_round_trip() {
        for ordinal in 1..=MAX_ORDINAL {
            let date = PlainDate::from_ordinal(ordinal).unwrap();
            let iso_calendar = date.iso_calendar();
            assert_eq!(PlainDate::from_iso_calendar(iso_calendar).unwrap(), date);
        }
    }

    #[test]
    fn iso_format_round_trip() {
        for date in [
            PlainDate::MIN,
            PlainDate::MAX,
            PlainDate::try_new(2024, 2, 29).unwrap(),
            PlainDate::try_new(987, 6, 5).unwrap(),
        ] {
            assert_eq!(PlainDate::from_iso_format(&date.to_iso_string()).unwrap(), date);
        }
        assert_eq!(PlainDate::MIN.to_string(), "0001-01-01");
        assert!("2021-08-31x".parse::<PlainDate>().is_err());
    }

    #[test]
    fn text_forms() {
        let date = PlainDate::try_new(2021, 8, 1).unwrap();
        assert_eq!(date.ctime(), "Sun Aug  1 00:00:00 2021");
        assert_eq!(date.repr(), "PlainDate(2021, 8, 1)");
        assert_eq!(date.strftime("%d/%m/%Y %H:%M").unwrap(), "01/08/2021 00:00");
    }

    #[test]
    fn from_timestamp() {
        assert_eq!(
            PlainDate::from_timestamp_with_provider(0, &()).unwrap(),
            PlainDate::try_new(1970, 1, 1).unwrap()
        );
        assert_eq!(
            PlainDate::from_timestamp_with_provider(-1, &()).unwrap(),
            PlainDate::try_new(1969, 12, 31).unwrap()
        );
        // 2021-11-07T06:00:00Z is still November 7th in New York.
        assert_eq!(
            PlainDate::from_timestamp_with_provider(FALL_BACK, &MockNewYork).unwrap(),
            PlainDate::try_new(2021, 11, 7).unwrap()
        );
    }
}
