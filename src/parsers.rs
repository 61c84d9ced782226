//! This module implements `civil_rs` text formatting and parsing functionality.
//!
//! Formatting is built on [`Writeable`] records. Parsing is strict: every
//! field has a fixed width and every separator must match exactly.

use crate::{
    iso::{IsoDate, IsoDateTime, IsoTime},
    CivilError, CivilResult,
};
use core::{iter::Peekable, str::Chars};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

mod strftime;
mod strptime;

pub(crate) use strftime::strftime;
pub(crate) use strptime::strptime;

/// English weekday names, starting on Monday.
pub(crate) const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Abbreviated English weekday names, starting on Monday.
pub(crate) const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// English month names, starting on January.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Abbreviated English month names, starting on January.
pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ==== Formatting ====

/// The time components written by [`FormattableTime`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    /// Seconds are always written, the fraction only when it is not zero.
    #[default]
    Auto,
    /// Only hours and minutes are written.
    Minute,
    /// Seconds are written, the fraction never is.
    Second,
    /// All six fractional digits are always written.
    Microsecond,
}

#[derive(Debug)]
pub struct FormattableTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
    pub precision: Precision,
}

impl From<IsoTime> for FormattableTime {
    fn from(value: IsoTime) -> Self {
        Self {
            hour: value.hour,
            minute: value.minute,
            second: value.second,
            microsecond: value.microsecond,
            precision: Precision::Auto,
        }
    }
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if self.precision == Precision::Minute {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if (self.microsecond == 0 && self.precision == Precision::Auto)
            || self.precision == Precision::Second
        {
            return Ok(());
        }
        sink.write_char('.')?;
        write_padded(self.microsecond, 6, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self.precision {
            Precision::Minute => LengthHint::exact(5),
            Precision::Second => LengthHint::exact(8),
            Precision::Auto if self.microsecond == 0 => LengthHint::exact(8),
            _ => LengthHint::exact(15),
        }
    }
}

#[derive(Debug)]
pub struct FormattableDate(pub i32, pub u8, pub u8);

impl From<IsoDate> for FormattableDate {
    fn from(value: IsoDate) -> Self {
        Self(value.year, value.month, value.day)
    }
}

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_four_digit_year(self.0, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(10)
    }
}

#[derive(Debug)]
pub struct FormattableDateTime {
    pub date: FormattableDate,
    pub time: FormattableTime,
    pub separator: char,
}

impl FormattableDateTime {
    pub(crate) fn new(iso: IsoDateTime, separator: char) -> Self {
        Self {
            date: iso.date.into(),
            time: iso.time.into(),
            separator,
        }
    }
}

impl Writeable for FormattableDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char(self.separator)?;
        self.time.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint()
            + self.separator.len_utf8()
            + self.time.writeable_length_hint()
    }
}

/// The text form of a normalized duration: `[D day[s], ]H:MM:SS[.ffffff]`.
#[derive(Debug)]
pub struct FormattableDuration {
    pub days: i32,
    pub seconds: i32,
    pub microseconds: i32,
}

impl Writeable for FormattableDuration {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.days != 0 {
            self.days.write_to(sink)?;
            sink.write_str(" day")?;
            if self.days.unsigned_abs() != 1 {
                sink.write_char('s')?;
            }
            sink.write_str(", ")?;
        }
        let (hours, rest) = (self.seconds / 3_600, self.seconds % 3_600);
        hours.write_to(sink)?;
        sink.write_char(':')?;
        write_padded_u8((rest / 60) as u8, sink)?;
        sink.write_char(':')?;
        write_padded_u8((rest % 60) as u8, sink)?;
        if self.microseconds != 0 {
            sink.write_char('.')?;
            write_padded(self.microseconds as u32, 6, sink)?;
        }
        Ok(())
    }
}

/// A UTC offset written as `±HH:MM[:SS[.ffffff]]`.
#[derive(Debug)]
pub struct FormattableOffset {
    pub negative: bool,
    pub time: FormattableTime,
}

impl FormattableOffset {
    /// Creates a `FormattableOffset` from a signed offset in seconds and
    /// microseconds, which share one sign.
    pub(crate) fn from_seconds(seconds: i32, microseconds: i32) -> Self {
        let negative = seconds < 0 || microseconds < 0;
        let (seconds, microsecond) = (seconds.unsigned_abs(), microseconds.unsigned_abs());
        let precision = if seconds % 60 == 0 && microsecond == 0 {
            Precision::Minute
        } else {
            Precision::Auto
        };
        Self {
            negative,
            time: FormattableTime {
                hour: (seconds / 3_600) as u8,
                minute: (seconds / 60 % 60) as u8,
                second: (seconds % 60) as u8,
                microsecond,
                precision,
            },
        }
    }
}

impl Writeable for FormattableOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char(if self.negative { '-' } else { '+' })?;
        self.time.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.time.writeable_length_hint() + 1
    }
}

/// The `ctime` form, e.g. `Tue Aug 31 15:59:55 2021`.
#[derive(Debug)]
pub struct FormattableCtime {
    pub weekday: u8,
    pub date: FormattableDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl From<IsoDateTime> for FormattableCtime {
    fn from(value: IsoDateTime) -> Self {
        Self {
            weekday: value.date.weekday(),
            date: value.date.into(),
            hour: value.time.hour,
            minute: value.time.minute,
            second: value.time.second,
        }
    }
}

impl Writeable for FormattableCtime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let FormattableDate(year, month, day) = self.date;
        sink.write_str(WEEKDAY_ABBREVIATIONS[usize::from(self.weekday)])?;
        sink.write_char(' ')?;
        sink.write_str(MONTH_ABBREVIATIONS[usize::from(month - 1)])?;
        sink.write_char(' ')?;
        if day < 10 {
            sink.write_char(' ')?;
        }
        day.write_to(sink)?;
        sink.write_char(' ')?;
        FormattableTime {
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            microsecond: 0,
            precision: Precision::Second,
        }
        .write_to(sink)?;
        sink.write_char(' ')?;
        write_four_digit_year(year, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(24)
    }
}

impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableDateTime);
impl_display_with_writeable!(FormattableDuration);
impl_display_with_writeable!(FormattableOffset);
impl_display_with_writeable!(FormattableCtime);

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Writes `num` left padded with zeros to at least `width` digits.
fn write_padded<W: core::fmt::Write + ?Sized>(
    num: u32,
    width: usize,
    sink: &mut W,
) -> core::fmt::Result {
    let mut digits = 1;
    let mut rest = num / 10;
    while rest != 0 {
        digits += 1;
        rest /= 10;
    }
    for _ in digits..width {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_four_digit_year<W: core::fmt::Write + ?Sized>(
    mut y: i32,
    sink: &mut W,
) -> core::fmt::Result {
    debug_assert!((0..=9999).contains(&y));
    (y / 1_000).write_to(sink)?;
    y %= 1_000;
    (y / 100).write_to(sink)?;
    y %= 100;
    (y / 10).write_to(sink)?;
    y %= 10;
    y.write_to(sink)
}

// ==== Parsing ====

/// A UTC offset parsed from a time string.
///
/// Both fields carry the sign of the offset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOffset {
    pub seconds: i32,
    pub microseconds: i32,
}

/// The result of parsing an ISO time string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub time: IsoTime,
    /// The trailing UTC offset, if present. It is never applied to the time.
    pub offset: Option<ParsedOffset>,
}

#[inline]
fn abrupt_end() -> CivilError {
    CivilError::syntax().with_message("Abrupt end of source text.")
}

#[inline]
fn non_ascii_digit() -> CivilError {
    CivilError::syntax().with_message("Expected an ASCII digit.")
}

#[inline]
fn unexpected_char(expected: char) -> CivilError {
    CivilError::syntax().with_message(alloc::format!("Expected '{expected}'."))
}

/// Parses exactly `count` ASCII digits.
pub(crate) fn parse_digits(chars: &mut Peekable<Chars<'_>>, count: usize) -> CivilResult<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .ok_or_else(abrupt_end)?
            .to_digit(10)
            .ok_or_else(non_ascii_digit)?;
        value = value * 10 + digit;
    }
    Ok(value)
}

/// Consumes `expected` from the source text.
pub(crate) fn parse_char(chars: &mut Peekable<Chars<'_>>, expected: char) -> CivilResult<()> {
    match chars.next() {
        Some(ch) if ch == expected => Ok(()),
        Some(_) => Err(unexpected_char(expected)),
        None => Err(abrupt_end()),
    }
}

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(source: &str) -> CivilResult<IsoDate> {
    let mut chars = source.chars().peekable();
    let date = parse_date_fields(&mut chars)?;
    if chars.next().is_some() {
        return Err(CivilError::syntax().with_message("Unexpected trailing characters."));
    }
    Ok(date)
}

fn parse_date_fields(chars: &mut Peekable<Chars<'_>>) -> CivilResult<IsoDate> {
    let year = parse_digits(chars, 4)?;
    parse_char(chars, '-')?;
    let month = parse_digits(chars, 2)?;
    parse_char(chars, '-')?;
    let day = parse_digits(chars, 2)?;
    // NOTE: at most four digits were parsed for any field.
    IsoDate::new(year as i32, month as i32, day as i32)
}

/// Parses `HH[:MM[:SS]][.fff|.ffffff]` into its fields.
///
/// The fraction may follow the last present component. Missing fields are zero.
fn parse_time_fields(chars: &mut Peekable<Chars<'_>>) -> CivilResult<[u32; 4]> {
    let mut fields = [0u32; 4];
    for index in 0..3 {
        fields[index] = parse_digits(chars, 2)?;
        match chars.peek() {
            Some(':') if index < 2 => {
                chars.next();
            }
            Some('.') => {
                chars.next();
                fields[3] = parse_fraction(chars)?;
                break;
            }
            _ => break,
        }
    }
    Ok(fields)
}

/// Parses a fraction of exactly 3 or 6 digits into microseconds.
fn parse_fraction(chars: &mut Peekable<Chars<'_>>) -> CivilResult<u32> {
    let millis = parse_digits(chars, 3)?;
    if !chars.peek().is_some_and(char::is_ascii_digit) {
        return Ok(millis * 1_000);
    }
    let rest = parse_digits(chars, 3)?;
    Ok(millis * 1_000 + rest)
}

fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> CivilResult<ParsedOffset> {
    let sign = match chars.next() {
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return Err(CivilError::syntax().with_message("Expected an offset sign.")),
        None => return Err(abrupt_end()),
    };
    let offset_text: alloc::string::String = chars.collect();
    // `HH:MM`, `HH:MM:SS`, or `HH:MM:SS.ffffff` after the sign.
    if !matches!(offset_text.len(), 5 | 8 | 15) {
        return Err(CivilError::syntax().with_message("Invalid UTC offset length."));
    }
    let mut offset_chars = offset_text.chars().peekable();
    let [hour, minute, second, microsecond] = parse_time_fields(&mut offset_chars)?;
    if offset_chars.next().is_some() {
        return Err(CivilError::syntax().with_message("Invalid UTC offset."));
    }
    let time = IsoTime::new(hour as i32, minute as i32, second as i32, microsecond as i32)?;
    Ok(ParsedOffset {
        seconds: sign * time.seconds_of_day() as i32,
        microseconds: sign * time.microsecond as i32,
    })
}

/// Parses a time string with an optional trailing UTC offset.
///
/// The accepted grammar is `HH[:MM[:SS]][.fff|.ffffff][±HH:MM[:SS[.ffffff]]]`.
pub fn parse_time(source: &str) -> CivilResult<ParsedTime> {
    let (time_text, offset_text) = source
        .find(['+', '-'])
        .map_or((source, None), |index| {
            (&source[..index], Some(&source[index..]))
        });

    let mut chars = time_text.chars().peekable();
    let [hour, minute, second, microsecond] = parse_time_fields(&mut chars)?;
    if chars.next().is_some() {
        return Err(CivilError::syntax().with_message("Unexpected trailing characters."));
    }
    let time = IsoTime::new(hour as i32, minute as i32, second as i32, microsecond as i32)?;

    let offset = offset_text
        .map(|text| parse_offset(&mut text.chars().peekable()))
        .transpose()?;
    Ok(ParsedTime { time, offset })
}

/// Parses a `YYYY-MM-DD` date string followed by `T` or a space and a
/// [`parse_time`] string.
pub fn parse_date_time(source: &str) -> CivilResult<(IsoDateTime, Option<ParsedOffset>)> {
    let mut chars = source.chars().peekable();
    let date = parse_date_fields(&mut chars)?;
    match chars.next() {
        Some('T' | ' ') => {}
        Some(_) => {
            return Err(
                CivilError::syntax().with_message("Expected 'T' or ' ' as date time separator.")
            )
        }
        None => return Ok((IsoDateTime::new_unchecked(date, IsoTime::default()), None)),
    }
    let time_text: alloc::string::String = chars.collect();
    let ParsedTime { time, offset } = parse_time(&time_text)?;
    Ok((IsoDateTime::new_unchecked(date, time), offset))
}
