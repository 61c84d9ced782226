//! Utility date and time equations for the proleptic Gregorian calendar.
//!
//! Day ordinals count from 0001-01-01, which is ordinal 1. All equations
//! below assume their inputs were validated by the caller.

use num_traits::{PrimInt, Signed};

// ==== Begin Date Equations ====

/// Days in each month of a common year. Index 0 is unused.
const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in a common year preceding the first day of each month. Index 0 is unused.
const DAYS_BEFORE_MONTH: [u16; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Days in a 4 year cycle: `days_before_year(5)`.
const DAYS_IN_4_YEARS: i32 = 1_461;
/// Days in a 100 year cycle: `days_before_year(101)`.
const DAYS_IN_100_YEARS: i32 = 36_524;
/// Days in a 400 year cycle: `days_before_year(401)`.
const DAYS_IN_400_YEARS: i32 = 146_097;

/// Returns whether `year` is a leap year.
#[inline]
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `month` of `year`.
///
/// `month` must be in the range 1..=12.
#[inline]
#[must_use]
pub fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[usize::from(month)]
    }
}

/// Returns the number of days in `year` preceding the first day of `month`.
#[inline]
pub(crate) fn days_before_month(year: i32, month: u8) -> i32 {
    debug_assert!((1..=12).contains(&month));
    let days = i32::from(DAYS_BEFORE_MONTH[usize::from(month)]);
    if month > 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Returns the number of days before January 1st of `year`.
///
/// NOTE: Truncating division is only correct for `year >= 1`.
#[inline]
pub(crate) fn days_before_year(year: i32) -> i32 {
    debug_assert!(year >= 1);
    let y = year - 1;
    y * 365 + y / 4 - y / 100 + y / 400
}

/// Converts a year, month, and day into a day ordinal.
#[inline]
pub(crate) fn ymd_to_ordinal(year: i32, month: u8, day: u8) -> i32 {
    days_before_year(year) + days_before_month(year, month) + i32::from(day)
}

/// Converts a day ordinal into a year, month, and day.
pub(crate) fn ordinal_to_ymd(ordinal: i32) -> (i32, u8, u8) {
    debug_assert!(ordinal >= 1);
    // Shift to a zero based offset so that 400 year boundaries are
    // exactly the multiples of `DAYS_IN_400_YEARS`.
    let n = ordinal - 1;
    let n400 = n / DAYS_IN_400_YEARS;
    let n = n % DAYS_IN_400_YEARS;

    // n100 may be 4, meaning the day is December 31st at the end of a
    // 400 year cycle.
    let n100 = n / DAYS_IN_100_YEARS;
    let n = n % DAYS_IN_100_YEARS;

    let n4 = n / DAYS_IN_4_YEARS;
    let n = n % DAYS_IN_4_YEARS;

    // n1 may be 4, meaning the day is December 31st at the end of a
    // 4 year cycle.
    let n1 = n / 365;
    let n = n % 365;

    let year = n400 * 400 + 1 + n100 * 100 + n4 * 4 + n1;
    if n1 == 4 || n100 == 4 {
        debug_assert_eq!(n, 0);
        return (year - 1, 12, 31);
    }

    let leap_year = n1 == 3 && (n4 != 24 || n100 == 3);
    debug_assert_eq!(leap_year, is_leap_year(year));

    // The estimate is either exact or one month too large.
    let mut month = ((n + 50) >> 5) as u8;
    let mut preceding = days_before_month(year, month);
    if preceding > n {
        month -= 1;
        preceding -= i32::from(days_in_month(year, month));
    }
    let day = n - preceding;
    debug_assert!(0 <= day && day < i32::from(days_in_month(year, month)));

    (year, month, (day + 1) as u8)
}

/// Returns the day of the week, where Monday is 0 and Sunday is 6.
#[inline]
pub(crate) fn weekday(year: i32, month: u8, day: u8) -> u8 {
    // 0001-01-01 was a Monday.
    ((ymd_to_ordinal(year, month, day) + 6) % 7) as u8
}

/// Returns the day of the year, where January 1st is 1.
#[inline]
pub(crate) fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    (days_before_month(year, month) + i32::from(day)) as u16
}

/// Returns the ordinal of the Monday starting week 1 of the ISO year.
///
/// Week 1 is the first week containing a Thursday.
pub(crate) fn iso_week1_monday(year: i32) -> i32 {
    let first_day = ymd_to_ordinal(year, 1, 1);
    // 0 if January 1st is a Monday, 1 if a Tuesday, etc.
    let first_weekday = (first_day + 6) % 7;
    let week1_monday = first_day - first_weekday;
    // January 1st was a Friday, Saturday, or Sunday.
    if first_weekday > 3 {
        week1_monday + 7
    } else {
        week1_monday
    }
}

/// Returns whether the ISO year has 53 weeks.
///
/// That is the case for years starting on a Thursday and for leap years
/// starting on a Wednesday.
#[inline]
pub(crate) fn iso_year_has_53_weeks(year: i32) -> bool {
    let first_weekday = weekday(year, 1, 1);
    first_weekday == 3 || (first_weekday == 2 && is_leap_year(year))
}

// ==== End Date Equations ====

// ==== Begin Integer Equations ====

/// Floored division returning the quotient and remainder.
///
/// The remainder carries the sign of `divisor`. `divisor` must not be zero.
#[inline]
pub(crate) fn div_mod_floor<T: PrimInt + Signed>(dividend: T, divisor: T) -> (T, T) {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if !remainder.is_zero() && remainder.is_negative() != divisor.is_negative() {
        (quotient - T::one(), remainder + divisor)
    } else {
        (quotient, remainder)
    }
}

// ==== End Integer Equations ====
