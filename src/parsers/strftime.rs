//! `strftime` style formatting.

use alloc::string::String;
use core::fmt::Write;
use writeable::Writeable;

use super::{
    write_four_digit_year, write_padded, write_padded_u8, FormattableCtime, FormattableTime,
    Precision, MONTH_ABBREVIATIONS, MONTH_NAMES, WEEKDAY_ABBREVIATIONS, WEEKDAY_NAMES,
};
use crate::{iso::IsoDateTime, utils, CivilError, CivilResult};

/// Formats `iso` according to a `strftime` format string.
///
/// Supported directives are `%a %A %w %d %b %B %m %y %Y %H %I %p %M %S %f
/// %j %U %W %c %x %X %%`. `%z` and `%Z` are accepted and write nothing.
pub(crate) fn strftime(iso: &IsoDateTime, format: &str) -> CivilResult<String> {
    let mut output = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            output.push(ch);
            continue;
        }
        let directive = chars.next().ok_or(
            CivilError::syntax().with_message("Incomplete directive at the end of the format."),
        )?;
        match write_directive(iso, directive, &mut output) {
            Some(result) => result.map_err(|_| CivilError::general("Failed to write directive."))?,
            None => {
                return Err(CivilError::syntax()
                    .with_message(alloc::format!("Unsupported format directive '%{directive}'.")))
            }
        }
    }
    Ok(output)
}

/// Writes a single directive, returning `None` if the directive is unsupported.
fn write_directive<W: Write + ?Sized>(
    iso: &IsoDateTime,
    directive: char,
    sink: &mut W,
) -> Option<core::fmt::Result> {
    let IsoDateTime { date, time } = *iso;
    let weekday = usize::from(date.weekday());
    let result = match directive {
        'a' => sink.write_str(WEEKDAY_ABBREVIATIONS[weekday]),
        'A' => sink.write_str(WEEKDAY_NAMES[weekday]),
        // Sunday is 0.
        'w' => ((weekday + 1) % 7).write_to(sink),
        'd' => write_padded_u8(date.day, sink),
        'b' => sink.write_str(MONTH_ABBREVIATIONS[usize::from(date.month - 1)]),
        'B' => sink.write_str(MONTH_NAMES[usize::from(date.month - 1)]),
        'm' => write_padded_u8(date.month, sink),
        'y' => write_padded_u8((date.year % 100) as u8, sink),
        'Y' => write_four_digit_year(date.year, sink),
        'H' => write_padded_u8(time.hour, sink),
        'I' => write_padded_u8(twelve_hour(time.hour), sink),
        'p' => sink.write_str(if time.hour < 12 { "AM" } else { "PM" }),
        'M' => write_padded_u8(time.minute, sink),
        'S' => write_padded_u8(time.second, sink),
        'f' => write_padded(time.microsecond, 6, sink),
        'j' => write_padded(u32::from(date.day_of_year()), 3, sink),
        // Sunday is 6 counting from Monday.
        'U' => write_padded_u8(week_of_year(iso, 6), sink),
        'W' => write_padded_u8(week_of_year(iso, 0), sink),
        'c' => FormattableCtime::from(*iso).write_to(sink),
        'x' => write_padded_u8(date.month, sink)
            .and_then(|()| sink.write_char('/'))
            .and_then(|()| write_padded_u8(date.day, sink))
            .and_then(|()| sink.write_char('/'))
            .and_then(|()| write_padded_u8((date.year % 100) as u8, sink)),
        'X' => FormattableTime {
            precision: Precision::Second,
            ..FormattableTime::from(time)
        }
        .write_to(sink),
        'z' | 'Z' => Ok(()),
        '%' => sink.write_char('%'),
        _ => return None,
    };
    Some(result)
}

#[inline]
fn twelve_hour(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Returns the week of the year where weeks start on `first_weekday`
/// (Monday is 0). Days before the first such weekday are in week 0.
fn week_of_year(iso: &IsoDateTime, first_weekday: u8) -> u8 {
    let year = iso.date.year;
    let january_first = utils::weekday(year, 1, 1);
    let first_day = 1 + u16::from((7 + first_weekday - january_first) % 7);
    let day_of_year = iso.date.day_of_year();
    if day_of_year < first_day {
        0
    } else {
        ((day_of_year - first_day) / 7 + 1) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::strftime;
    use crate::{error::ErrorKind, iso::IsoDateTime};

    fn iso(h: i32, us: i32) -> IsoDateTime {
        IsoDateTime::new(2021, 8, 31, h, 59, 55, us).unwrap()
    }

    #[test]
    fn date_directives() {
        let result = strftime(&iso(15, 123_456), "%a %A %w %d %b %B %m %y %Y").unwrap();
        assert_eq!(result, "Tue Tuesday 2 31 Aug August 08 21 2021");
    }

    #[test]
    fn time_directives() {
        let result = strftime(&iso(15, 123_456), "%H %I %p %M %S %f %j").unwrap();
        assert_eq!(result, "15 03 PM 59 55 123456 243");
        assert_eq!(strftime(&iso(0, 0), "%I %p").unwrap(), "12 AM");
        assert_eq!(strftime(&iso(12, 0), "%I %p").unwrap(), "12 PM");
        assert_eq!(strftime(&iso(15, 7), "%f").unwrap(), "000007");
    }

    #[test]
    fn composite_directives() {
        let dt = iso(15, 123_456);
        assert_eq!(strftime(&dt, "%c").unwrap(), "Tue Aug 31 15:59:55 2021");
        assert_eq!(strftime(&dt, "%x").unwrap(), "08/31/21");
        assert_eq!(strftime(&dt, "%X").unwrap(), "15:59:55");
        assert_eq!(strftime(&dt, "%z%Z|100%%").unwrap(), "|100%");
    }

    #[test]
    fn week_numbers() {
        let dt = iso(15, 0);
        assert_eq!(strftime(&dt, "%U %W").unwrap(), "35 35");

        // 2021-01-01 was a Friday.
        let new_year = IsoDateTime::new(2021, 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(strftime(&new_year, "%U %W").unwrap(), "00 00");
        // 2021-01-03 was the first Sunday, 2021-01-04 the first Monday.
        let sunday = IsoDateTime::new(2021, 1, 3, 0, 0, 0, 0).unwrap();
        assert_eq!(strftime(&sunday, "%U %W").unwrap(), "01 00");
        let monday = IsoDateTime::new(2021, 1, 4, 0, 0, 0, 0).unwrap();
        assert_eq!(strftime(&monday, "%U %W").unwrap(), "01 01");
        // 0001-01-01 was a Monday.
        let first = IsoDateTime::new(1, 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(strftime(&first, "%U %W %Y").unwrap(), "00 01 0001");
    }

    #[test]
    fn invalid_directives() {
        let dt = iso(15, 0);
        assert_eq!(strftime(&dt, "%Q").unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(strftime(&dt, "%Y%").unwrap_err().kind(), ErrorKind::Syntax);
    }
}
