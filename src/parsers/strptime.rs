//! `strptime` style parsing.

use super::{parse_char, parse_digits};
use crate::{iso::IsoDateTime, CivilError, CivilResult};

// Field slots, in validation order.
const YEAR: usize = 0;
const MONTH: usize = 1;
const DAY: usize = 2;
const HOUR: usize = 3;
const MINUTE: usize = 4;
const SECOND: usize = 5;
const MICROSECOND: usize = 6;

/// Parses `source` according to a `strptime` format string.
///
/// Supported directives are `%Y` (4 digits), `%m %d %H %M %S` (2 digits),
/// `%f` (6 digits), and `%%`. Every other format character must match the
/// source exactly. Fields not named by the format are zero, so a format
/// without `%Y`, `%m`, and `%d` never yields a valid datetime.
pub(crate) fn strptime(source: &str, format: &str) -> CivilResult<IsoDateTime> {
    let mut fields = [0u32; 7];
    let mut chars = source.chars().peekable();
    let mut format_chars = format.chars();

    while let Some(ch) = format_chars.next() {
        if ch != '%' {
            parse_char(&mut chars, ch)?;
            continue;
        }
        let directive = format_chars.next().ok_or(
            CivilError::syntax().with_message("Incomplete directive at the end of the format."),
        )?;
        let (slot, width) = match directive {
            'Y' => (YEAR, 4),
            'm' => (MONTH, 2),
            'd' => (DAY, 2),
            'H' => (HOUR, 2),
            'M' => (MINUTE, 2),
            'S' => (SECOND, 2),
            'f' => (MICROSECOND, 6),
            '%' => {
                parse_char(&mut chars, '%')?;
                continue;
            }
            _ => {
                return Err(CivilError::syntax()
                    .with_message(alloc::format!("Unsupported parse directive '%{directive}'.")))
            }
        };
        fields[slot] = parse_digits(&mut chars, width)?;
    }

    if chars.next().is_some() {
        return Err(CivilError::syntax().with_message("Unconverted data remains in the source."));
    }

    // NOTE: every field holds at most six digits.
    IsoDateTime::new(
        fields[YEAR] as i32,
        fields[MONTH] as i32,
        fields[DAY] as i32,
        fields[HOUR] as i32,
        fields[MINUTE] as i32,
        fields[SECOND] as i32,
        fields[MICROSECOND] as i32,
    )
}
