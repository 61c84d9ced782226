//! This module implements `PlainDateTime` and any directly related algorithms.

use alloc::string::String;
use core::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};
use num_traits::ToPrimitive;
use writeable::Writeable;

use crate::{
    host::HostTimeZone,
    iso::{IsoCalendarDate, IsoDate, IsoDateTime, IsoTime},
    options::Fold,
    parsers::{self, FormattableCtime, FormattableDateTime},
    utils, CivilError, CivilResult, CivilUnwrap, US_PER_SECOND,
};

use super::{timezone, Duration, PlainDate, PlainTime};

/// A naive civil datetime: a `PlainDate` and a `PlainTime` without a time zone.
///
/// ```rust
/// use civil_rs::{Duration, PlainDateTime};
///
/// let datetime = PlainDateTime::try_new(2021, 12, 31, 23, 59, 59, 999_999).unwrap();
/// let next = datetime + Duration::RESOLUTION;
/// assert_eq!(next.to_string(), "2022-01-01T00:00:00");
/// assert_eq!(next - datetime, Duration::RESOLUTION);
/// ```
#[non_exhaustive]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDateTime {
    pub(crate) iso: IsoDateTime,
}

impl fmt::Debug for PlainDateTime {
    /// Writes the constructor form, eliding a trailing zero microsecond and
    /// then second.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let IsoDateTime { date, time } = self.iso;
        write!(
            f,
            "PlainDateTime({}, {}, {}, {}, {}",
            date.year, date.month, date.day, time.hour, time.minute
        )?;
        if time.second != 0 || time.microsecond != 0 {
            write!(f, ", {}", time.second)?;
        }
        if time.microsecond != 0 {
            write!(f, ", {}", time.microsecond)?;
        }
        f.write_str(")")
    }
}

// ==== Private API ====

impl PlainDateTime {
    /// Creates a new unchecked `PlainDateTime`.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDateTime) -> Self {
        Self { iso }
    }

    /// Adds days, seconds, and microseconds and validates the result.
    fn add_duration_fields(&self, days: i64, seconds: i64, microseconds: i64) -> CivilResult<Self> {
        self.iso
            .add_duration_fields(days, seconds, microseconds)
            .map(Self::new_unchecked)
    }
}

// ==== Public API ====

impl PlainDateTime {
    /// The earliest supported datetime, 0001-01-01T00:00:00.
    pub const MIN: Self = Self::new_unchecked(IsoDateTime::new_unchecked(
        PlainDate::MIN.iso,
        PlainTime::MIN.iso,
    ));
    /// The latest supported datetime, 9999-12-31T23:59:59.999999.
    pub const MAX: Self = Self::new_unchecked(IsoDateTime::new_unchecked(
        PlainDate::MAX.iso,
        PlainTime::MAX.iso,
    ));
    /// The smallest difference between unequal datetimes, one microsecond.
    pub const RESOLUTION: Duration = Duration::RESOLUTION;

    /// Creates a new validated `PlainDateTime`.
    ///
    /// Fields are validated from year down to microsecond, and the first
    /// invalid field is reported.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        microsecond: i32,
    ) -> CivilResult<Self> {
        IsoDateTime::new(year, month, day, hour, minute, second, microsecond)
            .map(Self::new_unchecked)
    }

    /// Combines a `PlainDate` and a `PlainTime`.
    #[inline]
    #[must_use]
    pub const fn from_date_and_time(date: PlainDate, time: PlainTime) -> Self {
        Self::new_unchecked(IsoDateTime::new_unchecked(date.iso, time.iso))
    }

    /// Creates the midnight `PlainDateTime` of a day ordinal.
    pub fn from_ordinal(ordinal: i32) -> CivilResult<Self> {
        PlainDate::from_ordinal(ordinal).map(|date| Self::from_date_and_time(date, PlainTime::MIN))
    }

    /// Creates the midnight `PlainDateTime` of an ISO year, week, and weekday.
    pub fn from_iso_calendar(iso_calendar: IsoCalendarDate) -> CivilResult<Self> {
        PlainDate::from_iso_calendar(iso_calendar)
            .map(|date| Self::from_date_and_time(date, PlainTime::MIN))
    }

    /// Creates the `PlainDateTime` for microseconds since the Unix epoch, in
    /// the local time of `tz`.
    ///
    /// A leap second reported by `tz` is clamped to second 59.
    pub fn from_timestamp_with_provider(
        epoch_microseconds: i64,
        tz: &(impl HostTimeZone + ?Sized),
    ) -> CivilResult<Self> {
        let (seconds, microsecond) = utils::div_mod_floor(epoch_microseconds, US_PER_SECOND);
        let fields = tz.get_wall_clock_fields(seconds)?;
        Self::try_new(
            fields.year,
            fields.month.into(),
            fields.day.into(),
            fields.hour.into(),
            fields.minute.into(),
            fields.second.min(59).into(),
            microsecond.to_i32().civil_unwrap()?,
        )
    }

    /// Parses a `strptime` formatted string.
    ///
    /// Supported directives are `%Y %m %d %H %M %S %f %%`.
    ///
    /// ```rust
    /// use civil_rs::PlainDateTime;
    ///
    /// let datetime = PlainDateTime::strptime(
    ///     "2021/08/31 15:59:55.123456",
    ///     "%Y/%m/%d %H:%M:%S.%f",
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     datetime,
    ///     PlainDateTime::try_new(2021, 8, 31, 15, 59, 55, 123_456).unwrap()
    /// );
    /// ```
    pub fn strptime(source: &str, format: &str) -> CivilResult<Self> {
        parsers::strptime(source, format).map(Self::new_unchecked)
    }

    /// Parses an ISO string: `YYYY-MM-DD`, optionally followed by `T` or a
    /// space and a time. A trailing UTC offset is parsed and ignored.
    pub fn from_iso_format(source: &str) -> CivilResult<Self> {
        parsers::parse_date_time(source).map(|(iso, _)| Self::new_unchecked(iso))
    }

    /// Returns the date of this datetime.
    #[inline]
    #[must_use]
    pub const fn date(&self) -> PlainDate {
        PlainDate::new_unchecked(self.iso.date)
    }

    /// Returns the time of this datetime.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> PlainTime {
        PlainTime::new_unchecked(self.iso.time)
    }

    /// Returns the year.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.date.year
    }

    /// Returns the month, 1..=12.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.iso.date.month
    }

    /// Returns the day of the month.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.iso.date.day
    }

    /// Returns the hour, 0..=23.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    /// Returns the minute, 0..=59.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    /// Returns the second, 0..=59.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.time.second
    }

    /// Returns the microsecond, 0..=999_999.
    #[inline]
    #[must_use]
    pub const fn microsecond(&self) -> u32 {
        self.iso.time.microsecond
    }

    /// Returns the day ordinal of this datetime's date.
    #[inline]
    #[must_use]
    pub fn to_ordinal(&self) -> i32 {
        self.iso.date.to_ordinal()
    }

    /// Returns the day of the week, where Monday is 0 and Sunday is 6.
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> u8 {
        self.iso.date.weekday()
    }

    /// Returns the ISO day of the week, where Monday is 1 and Sunday is 7.
    #[inline]
    #[must_use]
    pub fn iso_weekday(&self) -> u8 {
        self.iso.date.weekday() + 1
    }

    /// Returns the day of the year, 1..=366.
    #[inline]
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        self.iso.date.day_of_year()
    }

    /// Returns the ISO year, week, and weekday of this datetime's date.
    #[inline]
    #[must_use]
    pub fn iso_calendar(&self) -> IsoCalendarDate {
        self.iso.date.iso_calendar()
    }

    /// Adds `duration` to this datetime.
    pub fn checked_add(&self, duration: &Duration) -> CivilResult<Self> {
        self.add_duration_fields(
            duration.days().into(),
            duration.seconds().into(),
            duration.microseconds().into(),
        )
    }

    /// Subtracts `duration` from this datetime.
    pub fn checked_sub(&self, duration: &Duration) -> CivilResult<Self> {
        self.add_duration_fields(
            -i64::from(duration.days()),
            -i64::from(duration.seconds()),
            -i64::from(duration.microseconds()),
        )
    }

    /// Returns the `Duration` from `other` to this datetime.
    pub fn since(&self, other: &Self) -> CivilResult<Duration> {
        let (days, seconds, microseconds) = self.iso.diff(&other.iso);
        Duration::new(days, seconds, microseconds)
    }

    /// Returns the microseconds since the Unix epoch at which the local time
    /// of `tz` reads this datetime.
    ///
    /// `fold` selects the instant when the local time is ambiguous or skipped
    /// (see [`Fold`]). Within a day of either end of the calendar only the
    /// offset in effect at this datetime is considered.
    pub fn timestamp_with_provider(
        &self,
        tz: &(impl HostTimeZone + ?Sized),
        fold: Fold,
    ) -> CivilResult<i64> {
        let seconds = timezone::local_to_epoch_seconds(tz, &self.iso, fold)?;
        seconds
            .checked_mul(US_PER_SECOND)
            .and_then(|us| us.checked_add(self.iso.time.microsecond.into()))
            .ok_or(CivilError::overflow().with_message("timestamp out of range for platform time."))
    }

    /// Returns the ISO string of this datetime, with `T` as separator.
    #[inline]
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.to_iso_string_with_separator('T')
    }

    /// Returns the ISO string of this datetime with a custom date and time
    /// separator.
    #[inline]
    #[must_use]
    pub fn to_iso_string_with_separator(&self, separator: char) -> String {
        FormattableDateTime::new(self.iso, separator)
            .write_to_string()
            .into_owned()
    }

    /// Returns the `ctime` string of this datetime, e.g. `Tue Aug 31 15:59:55 2021`.
    #[inline]
    #[must_use]
    pub fn ctime(&self) -> String {
        FormattableCtime::from(self.iso)
            .write_to_string()
            .into_owned()
    }

    /// Formats this datetime with a `strftime` format string.
    pub fn strftime(&self, format: &str) -> CivilResult<String> {
        parsers::strftime(&self.iso, format)
    }

    /// Returns the constructor form of this datetime, e.g.
    /// `PlainDateTime(2021, 8, 31, 15, 59)`.
    #[inline]
    #[must_use]
    pub fn repr(&self) -> String {
        alloc::format!("{self:?}")
    }
}

// ==== Trait impls ====

impl fmt::Display for PlainDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FormattableDateTime::new(self.iso, 'T').write_to(f)
    }
}

impl FromStr for PlainDateTime {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso_format(s)
    }
}

impl From<PlainDate> for PlainDateTime {
    fn from(value: PlainDate) -> Self {
        Self::from_date_and_time(value, PlainTime::MIN)
    }
}

impl From<IsoDateTime> for PlainDateTime {
    fn from(value: IsoDateTime) -> Self {
        Self::new_unchecked(value)
    }
}

impl From<PlainDateTime> for IsoDate {
    fn from(value: PlainDateTime) -> Self {
        value.iso.date
    }
}

impl From<PlainDateTime> for IsoTime {
    fn from(value: PlainDateTime) -> Self {
        value.iso.time
    }
}

impl Add<Duration> for PlainDateTime {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the result is outside of the supported years.
    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(&rhs).expect("datetime value out of range")
    }
}

impl Sub<Duration> for PlainDateTime {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the result is outside of the supported years.
    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(&rhs).expect("datetime value out of range")
    }
}

impl Sub for PlainDateTime {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        self.since(&rhs)
            .expect("datetime difference is within the Duration range")
    }
}

impl AddAssign<Duration> for PlainDateTime {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign<Duration> for PlainDateTime {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::PlainDateTime;
    use crate::{
        builtins::core::timezone::tests::{MockNewYork, FALL_BACK, SPRING_FORWARD},
        error::ErrorKind,
        Duration, Fold, IsoCalendarDate, PlainDate, PlainTime, UtcOffset,
    };
    use alloc::string::ToString;

    #[test]
    fn validation_order() {
        let err = PlainDateTime::try_new(2021, 2, 29, 24, 0, 0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(err.message().starts_with("day"));
        let err = PlainDateTime::try_new(2021, 2, 28, 23, 59, 59, 1_000_000).unwrap_err();
        assert!(err.message().starts_with("microsecond"));
    }

    #[test]
    fn combine_and_project() {
        let date = PlainDate::try_new(2021, 8, 31).unwrap();
        let time = PlainTime::try_new(15, 59, 55, 123_456).unwrap();
        let datetime = PlainDateTime::from_date_and_time(date, time);
        assert_eq!(datetime.date(), date);
        assert_eq!(datetime.time(), time);
        assert_eq!(datetime.to_ordinal(), date.to_ordinal());
        assert_eq!(PlainDateTime::from(date).time(), PlainTime::MIN);
        assert_eq!(
            PlainDateTime::from_ordinal(1).unwrap(),
            PlainDateTime::MIN
        );
        assert_eq!(
            PlainDateTime::from_iso_calendar(IsoCalendarDate::new(2021, 35, 2)).unwrap(),
            PlainDateTime::from(date)
        );
    }

    #[test]
    fn duration_arithmetic() {
        let datetime = PlainDateTime::try_new(2021, 12, 31, 23, 59, 59, 999_999).unwrap();
        let next = datetime + Duration::RESOLUTION;
        assert_eq!(next, PlainDateTime::try_new(2022, 1, 1, 0, 0, 0, 0).unwrap());
        assert_eq!(next - Duration::RESOLUTION, datetime);

        let datetime = PlainDateTime::try_new(2024, 2, 28, 12, 0, 0, 0).unwrap();
        let later = datetime + Duration::new(1, 43_200, 0).unwrap();
        assert_eq!(later, PlainDateTime::try_new(2024, 3, 1, 0, 0, 0, 0).unwrap());

        let mut datetime = datetime;
        datetime -= Duration::from_hours(36).unwrap();
        assert_eq!(datetime, PlainDateTime::try_new(2024, 2, 27, 0, 0, 0, 0).unwrap());
        datetime += Duration::from_minutes(90).unwrap();
        assert_eq!(datetime, PlainDateTime::try_new(2024, 2, 27, 1, 30, 0, 0).unwrap());

        let err = PlainDateTime::MAX
            .checked_add(&Duration::RESOLUTION)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(PlainDateTime::MIN.checked_sub(&Duration::RESOLUTION).is_err());
    }

    #[test]
    fn datetime_difference() {
        let start = PlainDateTime::try_new(2021, 8, 1, 12, 0, 0, 500_000).unwrap();
        let end = PlainDateTime::try_new(2021, 8, 31, 6, 0, 0, 0).unwrap();
        assert_eq!(end - start, Duration::new(29, 64_799, 500_000).unwrap());
        assert_eq!(start - end, -(end - start));
        assert_eq!(start + (end - start), end);
        assert_eq!(
            PlainDateTime::MAX - PlainDateTime::MIN,
            Duration::new(3_652_058, 86_399, 999_999).unwrap()
        );
    }

    #[test]
    fn ordering_and_hashing() {
        use core::hash::{Hash, Hasher};

        #[derive(Default)]
        struct Fnv(u64);
        impl Hasher for Fnv {
            fn finish(&self) -> u64 {
                self.0
            }
            fn write(&mut self, bytes: &[u8]) {
                for byte in bytes {
                    self.0 = (self.0 ^ u64::from(*byte)).wrapping_mul(0x100_0000_01b3);
                }
            }
        }
        let hash = |dt: &PlainDateTime| {
            let mut hasher = Fnv::default();
            dt.hash(&mut hasher);
            hasher.finish()
        };

        let a = PlainDateTime::try_new(2021, 8, 31, 0, 0, 0, 1).unwrap();
        let b = PlainDateTime::try_new(2021, 8, 31, 0, 0, 0, 0).unwrap() + Duration::RESOLUTION;
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
        assert!(PlainDateTime::try_new(2021, 8, 30, 23, 59, 59, 999_999).unwrap() < a);
        assert!(PlainDateTime::MIN < PlainDateTime::MAX);
    }

    #[test]
    fn strptime_and_iso_format() {
        let datetime =
            PlainDateTime::strptime("2021/08/31 15:59:55.123456", "%Y/%m/%d %H:%M:%S.%f").unwrap();
        assert_eq!(
            datetime,
            PlainDateTime::try_new(2021, 8, 31, 15, 59, 55, 123_456).unwrap()
        );
        assert_eq!(datetime.to_string(), "2021-08-31T15:59:55.123456");
        assert_eq!(
            datetime.to_iso_string_with_separator(' '),
            "2021-08-31 15:59:55.123456"
        );
        assert_eq!(PlainDateTime::MIN.to_iso_string(), "0001-01-01T00:00:00");
        assert_eq!(
            PlainDateTime::from_iso_format(&datetime.to_iso_string()).unwrap(),
            datetime
        );
        assert_eq!(
            "2021-08-31T15:59:55.123456+05:30".parse::<PlainDateTime>().unwrap(),
            datetime
        );
    }

    #[test]
    fn text_forms() {
        let datetime = PlainDateTime::try_new(2021, 8, 31, 15, 59, 0, 0).unwrap();
        assert_eq!(datetime.ctime(), "Tue Aug 31 15:59:00 2021");
        assert_eq!(datetime.repr(), "PlainDateTime(2021, 8, 31, 15, 59)");
        assert_eq!(
            PlainDateTime::MAX.repr(),
            "PlainDateTime(9999, 12, 31, 23, 59, 59, 999999)"
        );
        assert_eq!(datetime.strftime("%c").unwrap(), datetime.ctime());
    }

    #[test]
    fn timestamps_with_fixed_offset() {
        let epoch = PlainDateTime::try_new(1970, 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(epoch.timestamp_with_provider(&(), Fold::Earlier).unwrap(), 0);

        let offset = UtcOffset::from_seconds(3_600).unwrap();
        let datetime = PlainDateTime::try_new(1970, 1, 1, 1, 0, 0, 250).unwrap();
        assert_eq!(
            datetime.timestamp_with_provider(&offset, Fold::Earlier).unwrap(),
            250
        );
        assert_eq!(
            PlainDateTime::from_timestamp_with_provider(250, &offset).unwrap(),
            datetime
        );

        // Negative timestamps floor towards the previous second.
        assert_eq!(
            PlainDateTime::from_timestamp_with_provider(-1, &()).unwrap(),
            PlainDateTime::try_new(1969, 12, 31, 23, 59, 59, 999_999).unwrap()
        );

        // Either fold resolves at the ends of the calendar.
        for fold in [Fold::Earlier, Fold::Later] {
            let max = PlainDateTime::MAX.timestamp_with_provider(&(), fold).unwrap();
            assert_eq!(max, 253_402_300_799_999_999);
            assert_eq!(
                PlainDateTime::from_timestamp_with_provider(max, &()).unwrap(),
                PlainDateTime::MAX
            );
            let min = PlainDateTime::MIN.timestamp_with_provider(&(), fold).unwrap();
            assert_eq!(min, -62_135_596_800_000_000);
        }
    }

    #[test]
    fn timestamps_around_transitions() {
        let fold = PlainDateTime::try_new(2021, 11, 7, 1, 30, 0, 0).unwrap();
        let earlier = fold.timestamp_with_provider(&MockNewYork, Fold::Earlier).unwrap();
        let later = fold.timestamp_with_provider(&MockNewYork, Fold::Later).unwrap();
        assert_eq!(earlier, (FALL_BACK - 1_800) * 1_000_000);
        assert_eq!(later, (FALL_BACK + 1_800) * 1_000_000);
        // Both instants render as the same local time.
        assert_eq!(
            PlainDateTime::from_timestamp_with_provider(earlier, &MockNewYork).unwrap(),
            fold
        );
        assert_eq!(
            PlainDateTime::from_timestamp_with_provider(later, &MockNewYork).unwrap(),
            fold
        );

        let gap = PlainDateTime::try_new(2021, 3, 14, 2, 30, 0, 0).unwrap();
        let earlier = gap.timestamp_with_provider(&MockNewYork, Fold::Earlier).unwrap();
        assert_eq!(earlier, (SPRING_FORWARD + 1_800) * 1_000_000);
        assert_eq!(
            PlainDateTime::from_timestamp_with_provider(earlier, &MockNewYork).unwrap(),
            PlainDateTime::try_new(2021, 3, 14, 3, 30, 0, 0).unwrap()
        );
    }
}
