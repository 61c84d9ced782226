//! This module implements the internal ISO field records.
//!
//! The three main types of records are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` holds a year, month, and day on the proleptic Gregorian
//! calendar. An `IsoTime` holds an hour, minute, second, and microsecond.
//! An `IsoDateTime` has the fields of both an `IsoDate` and `IsoTime`.
//!
//! The records also own the normalization routines that carry out of range
//! field values into canonical ones.

use alloc::format;
use num_traits::FromPrimitive;

use crate::{
    utils, CivilError, CivilResult, MAX_ORDINAL, MAX_YEAR, MIN_YEAR, SECONDS_PER_DAY,
    US_PER_SECOND,
};

// ==== Normalization ====

/// One step of a mixed-radix carry.
///
/// A `hi` unit is equivalent to `factor` `lo` units. Returns the `(hi, lo)`
/// pair with `lo` in the range `0..factor`, borrowing from `hi` when `lo` is
/// negative.
#[inline]
pub(crate) fn normalize_pair(hi: i64, lo: i64, factor: i64) -> CivilResult<(i64, i64)> {
    debug_assert!(factor > 0);
    if (0..factor).contains(&lo) {
        return Ok((hi, lo));
    }
    let (carry, lo) = utils::div_mod_floor(lo, factor);
    let hi = hi
        .checked_add(carry)
        .ok_or(CivilError::range().with_message("field carry overflowed."))?;
    Ok((hi, lo))
}

/// Normalizes days, seconds, and microseconds so that
/// `0 <= seconds < 86400` and `0 <= microseconds < 1_000_000`.
///
/// The sign of the result lives entirely in the days field.
#[inline]
pub(crate) fn normalize_duration_fields(
    days: i64,
    seconds: i64,
    microseconds: i64,
) -> CivilResult<(i64, i64, i64)> {
    let (seconds, microseconds) = normalize_pair(seconds, microseconds, US_PER_SECOND)?;
    let (days, seconds) = normalize_pair(days, seconds, SECONDS_PER_DAY)?;
    Ok((days, seconds, microseconds))
}

/// Normalizes an out of range day into a valid `IsoDate`.
///
/// `month` is expected to already be in the range 1..=12.
pub(crate) fn normalize_date_fields(year: i32, month: u8, day: i64) -> CivilResult<IsoDate> {
    debug_assert!((1..=12).contains(&month));
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CivilError::range().with_message(format!("year {year} is out of range.")));
    }
    let days_in_month = i64::from(utils::days_in_month(year, month));

    let (year, month, day) = if (1..=days_in_month).contains(&day) {
        (year, month, day as u8)
    } else if day == 0 {
        // Roll back to the last day of the previous month.
        if month > 1 {
            (year, month - 1, utils::days_in_month(year, month - 1))
        } else {
            (year - 1, 12, 31)
        }
    } else if day == days_in_month + 1 {
        // Roll forward to the first day of the next month.
        if month < 12 {
            (year, month + 1, 1)
        } else {
            (year + 1, 1, 1)
        }
    } else {
        let ordinal = i64::from(utils::ymd_to_ordinal(year, month, 1)) + day - 1;
        let ordinal = i32::from_i64(ordinal)
            .filter(|o| (1..=MAX_ORDINAL).contains(o))
            .ok_or(CivilError::range().with_message("date is out of range after normalization."))?;
        utils::ordinal_to_ymd(ordinal)
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CivilError::range().with_message("date is out of range after normalization."));
    }
    Ok(IsoDate::new_unchecked(year, month, day))
}

/// Normalizes all date and time fields into a valid `IsoDateTime`.
///
/// Carries microsecond into second, second into minute, minute into hour,
/// and hour into day before normalizing the date.
#[allow(clippy::too_many_arguments)]
pub(crate) fn normalize_datetime_fields(
    year: i32,
    month: u8,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    microsecond: i64,
) -> CivilResult<IsoDateTime> {
    let (second, microsecond) = normalize_pair(second, microsecond, US_PER_SECOND)?;
    let (minute, second) = normalize_pair(minute, second, 60)?;
    let (hour, minute) = normalize_pair(hour, minute, 60)?;
    let (day, hour) = normalize_pair(day, hour, 24)?;
    let date = normalize_date_fields(year, month, day)?;
    // NOTE: Values have been normalized into their u8 and u32 ranges.
    let time = IsoTime::new_unchecked(hour as u8, minute as u8, second as u8, microsecond as u32);
    Ok(IsoDateTime::new_unchecked(date, time))
}

// ==== `IsoDateTime` section ====

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` fields.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl Default for IsoDateTime {
    fn default() -> Self {
        Self::new_unchecked(IsoDate::default(), IsoTime::default())
    }
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates a new validated `IsoDateTime`.
    ///
    /// Fields are validated in order from year down to microsecond.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        microsecond: i32,
    ) -> CivilResult<Self> {
        let date = IsoDate::new(year, month, day)?;
        let time = IsoTime::new(hour, minute, second, microsecond)?;
        Ok(Self::new_unchecked(date, time))
    }

    /// Creates an `IsoDateTime` from seconds counted from the start of
    /// ordinal day 0 and a microsecond value.
    pub(crate) fn from_ordinal_seconds(seconds: i64, microsecond: u32) -> CivilResult<Self> {
        let (ordinal, seconds) = utils::div_mod_floor(seconds, SECONDS_PER_DAY);
        let ordinal = i32::from_i64(ordinal)
            .ok_or(CivilError::range().with_message("ordinal is out of range."))?;
        let date = IsoDate::from_ordinal(ordinal)?;
        // NOTE: seconds is within 0..86_400.
        let time = IsoTime::new_unchecked(
            (seconds / 3_600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
            microsecond,
        );
        Ok(Self::new_unchecked(date, time))
    }

    /// Returns the seconds from the start of ordinal day 0, ignoring microseconds.
    #[inline]
    pub(crate) fn to_ordinal_seconds(self) -> i64 {
        i64::from(self.date.to_ordinal()) * SECONDS_PER_DAY + self.time.seconds_of_day()
    }

    /// Adds a days, seconds, and microseconds triple to this `IsoDateTime`.
    pub(crate) fn add_duration_fields(
        self,
        days: i64,
        seconds: i64,
        microseconds: i64,
    ) -> CivilResult<Self> {
        normalize_datetime_fields(
            self.date.year,
            self.date.month,
            i64::from(self.date.day) + days,
            self.time.hour.into(),
            self.time.minute.into(),
            i64::from(self.time.second) + seconds,
            i64::from(self.time.microsecond) + microseconds,
        )
    }

    /// Returns the unnormalized `(days, seconds, microseconds)` difference of
    /// `self - other`.
    pub(crate) fn diff(&self, other: &Self) -> (i64, i64, i64) {
        let days = i64::from(self.date.to_ordinal()) - i64::from(other.date.to_ordinal());
        let seconds = self.time.seconds_of_day() - other.time.seconds_of_day();
        let microseconds = i64::from(self.time.microsecond) - i64::from(other.time.microsecond);
        (days, seconds, microseconds)
    }
}

// ==== `IsoDate` section ====

/// `IsoDate` serves as a record for the year, month, and day fields.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Default for IsoDate {
    fn default() -> Self {
        Self::new_unchecked(MIN_YEAR, 1, 1)
    }
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    pub fn new(year: i32, month: i32, day: i32) -> CivilResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CivilError::range().with_message(format!("year {year} is out of range.")));
        }
        let month = u8::from_i32(month)
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| {
                CivilError::range().with_message(format!("month {month} is out of range."))
            })?;
        let day = u8::from_i32(day)
            .filter(|d| (1..=utils::days_in_month(year, month)).contains(d))
            .ok_or_else(|| {
                CivilError::range().with_message(format!("day {day} is out of range."))
            })?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates an `IsoDate` from a day ordinal.
    pub(crate) fn from_ordinal(ordinal: i32) -> CivilResult<Self> {
        if !(1..=MAX_ORDINAL).contains(&ordinal) {
            return Err(
                CivilError::range().with_message(format!("ordinal {ordinal} is out of range."))
            );
        }
        let (year, month, day) = utils::ordinal_to_ymd(ordinal);
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates an `IsoDate` from an ISO year, week, and weekday.
    pub(crate) fn from_iso_calendar(iso: IsoCalendarDate) -> CivilResult<Self> {
        let IsoCalendarDate {
            year,
            week,
            weekday,
        } = iso;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(
                CivilError::range().with_message(format!("ISO year {year} is out of range."))
            );
        }
        if week == 0 || week > 53 || (week == 53 && !utils::iso_year_has_53_weeks(year)) {
            return Err(
                CivilError::range().with_message(format!("ISO week {week} is out of range."))
            );
        }
        if !(1..=7).contains(&weekday) {
            return Err(CivilError::range()
                .with_message(format!("ISO weekday {weekday} is out of range (1..=7).")));
        }

        let offset = (i32::from(week) - 1) * 7 + i32::from(weekday) - 1;
        Self::from_ordinal(utils::iso_week1_monday(year) + offset)
    }

    /// Returns this date's day ordinal.
    #[inline]
    pub(crate) fn to_ordinal(self) -> i32 {
        utils::ymd_to_ordinal(self.year, self.month, self.day)
    }

    /// Returns the day of the week, where Monday is 0.
    #[inline]
    pub(crate) fn weekday(self) -> u8 {
        utils::weekday(self.year, self.month, self.day)
    }

    /// Returns the day of the year, where January 1st is 1.
    #[inline]
    pub(crate) fn day_of_year(self) -> u16 {
        utils::day_of_year(self.year, self.month, self.day)
    }

    /// Returns the ISO year, week, and weekday of this date.
    pub(crate) fn iso_calendar(self) -> IsoCalendarDate {
        let mut year = self.year;
        let mut week1_monday = utils::iso_week1_monday(year);
        let today = self.to_ordinal();

        let (mut week, mut day) = utils::div_mod_floor(today - week1_monday, 7);
        if week < 0 {
            // The date belongs to the last week of the previous ISO year.
            year -= 1;
            week1_monday = utils::iso_week1_monday(year);
            (week, day) = utils::div_mod_floor(today - week1_monday, 7);
        } else if week >= 52 && today >= utils::iso_week1_monday(year + 1) {
            // The date belongs to the first week of the next ISO year.
            year += 1;
            week = 0;
        }

        // NOTE: week is within 0..53 and day within 0..7.
        IsoCalendarDate::new(year, (week + 1) as u8, (day + 1) as u8)
    }

    /// Adds a signed count of days to this date.
    #[inline]
    pub(crate) fn add_days(self, days: i64) -> CivilResult<Self> {
        normalize_date_fields(self.year, self.month, i64::from(self.day) + days)
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record that contains the hour, minute, second, and
/// microsecond fields.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,         // 0..=23
    pub minute: u8,       // 0..=59
    pub second: u8,       // 0..=59
    pub microsecond: u32, // 0..=999_999
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, microsecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            microsecond,
        }
    }

    /// Creates a new validated `IsoTime`.
    pub fn new(hour: i32, minute: i32, second: i32, microsecond: i32) -> CivilResult<Self> {
        let hour = u8::from_i32(hour).filter(|h| *h <= 23).ok_or_else(|| {
            CivilError::range().with_message(format!("hour {hour} is out of range."))
        })?;
        let minute = u8::from_i32(minute).filter(|m| *m <= 59).ok_or_else(|| {
            CivilError::range().with_message(format!("minute {minute} is out of range."))
        })?;
        let second = u8::from_i32(second).filter(|s| *s <= 59).ok_or_else(|| {
            CivilError::range().with_message(format!("second {second} is out of range."))
        })?;
        let microsecond = u32::from_i32(microsecond)
            .filter(|us| *us <= 999_999)
            .ok_or_else(|| {
                CivilError::range()
                    .with_message(format!("microsecond {microsecond} is out of range."))
            })?;
        Ok(Self::new_unchecked(hour, minute, second, microsecond))
    }

    /// Returns whether every field is zero, i.e. midnight.
    #[inline]
    pub(crate) fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the seconds elapsed since midnight, ignoring microseconds.
    #[inline]
    pub(crate) fn seconds_of_day(self) -> i64 {
        (i64::from(self.hour) * 60 + i64::from(self.minute)) * 60 + i64::from(self.second)
    }
}

// ==== `IsoCalendarDate` section ====

/// An ISO 8601 week date: an ISO year, a week of that year, and a weekday.
///
/// Week 53 only exists for years starting on a Thursday, and leap years
/// starting on a Wednesday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoCalendarDate {
    /// The ISO year, which may differ from the calendar year near January 1st.
    pub year: i32,
    /// The ISO week, 1..=53.
    pub week: u8,
    /// The ISO weekday, Monday is 1 and Sunday is 7.
    pub weekday: u8,
}

impl IsoCalendarDate {
    /// Creates a new `IsoCalendarDate` record.
    #[inline]
    #[must_use]
    pub const fn new(year: i32, week: u8, weekday: u8) -> Self {
        Self {
            year,
            week,
            weekday,
        }
    }
}
