//! Local offset resolution from TZif data.
//!
//! The host's zone is read from the system zoneinfo directory. The
//! `jiff-tzdb` bundled database is used when no zone file is found.
//!
//! NOTE: Only offsets are resolved here. Folds and gaps are left to the
//! inversion in `builtins::core::timezone`, as for any other host.

use alloc::string::ToString;
use std::path::Path;
#[cfg(not(target_os = "windows"))]
use std::path::PathBuf;

use combine::Parser;

use tzif::data::{
    posix::{PosixTzString, TransitionDay},
    time::Seconds,
    tzif::{DataBlock, TzifData},
};

use crate::{
    host::{HostTimeZone, WallClockFields},
    utils, CivilError, CivilResult, SECONDS_PER_DAY,
};

#[cfg(not(target_os = "windows"))]
const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

/// The day ordinal of 1970-01-01.
const EPOCH_ORDINAL: i64 = 719_163;

/// A time zone read from a TZif file.
///
/// Offsets are taken from the version 2+ data block when present. Instants
/// past the last transition follow the POSIX TZ string footer.
#[derive(Debug, Clone)]
pub(crate) struct ZoneInfo {
    data_block: DataBlock,
    footer: Option<PosixTzString>,
}

impl From<TzifData> for ZoneInfo {
    fn from(value: TzifData) -> Self {
        let TzifData {
            data_block1,
            data_block2,
            footer,
            ..
        } = value;

        Self {
            data_block: data_block2.unwrap_or(data_block1),
            footer,
        }
    }
}

impl ZoneInfo {
    pub(crate) fn from_bytes(data: &[u8]) -> CivilResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(CivilError::general("Illformed TZif data."));
        };
        Ok(Self::from(parse_result))
    }

    pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> CivilResult<Self> {
        tzif::parse_tzif_file(path.as_ref())
            .map(Into::into)
            .map_err(|e| CivilError::general(e.to_string()))
    }

    /// Loads the zone named by an IANA identifier, e.g. `America/New_York`.
    pub(crate) fn try_from_identifier(identifier: &str) -> CivilResult<Self> {
        #[cfg(not(target_os = "windows"))]
        if let Ok(zone) = Self::from_path(PathBuf::from(ZONEINFO_DIR).join(identifier)) {
            return Ok(zone);
        }

        let Some((_, data)) = jiff_tzdb::get(identifier) else {
            return Err(CivilError::range().with_message("Time zone identifier does not exist."));
        };
        Self::from_bytes(data)
    }

    /// Returns the offset from UTC in seconds in effect at `epoch_seconds`.
    pub(crate) fn offset_seconds(&self, epoch_seconds: i64) -> CivilResult<i64> {
        let transitions = &self.data_block.transition_times;
        let idx = match transitions.binary_search(&Seconds(epoch_seconds)) {
            Ok(idx) => idx,
            // Instants before the first transition use time type 0.
            Err(0) if !transitions.is_empty() => return self.local_time_type_offset(0),
            Err(idx) if idx < transitions.len() => idx - 1,
            Err(idx) => {
                if let Some(footer) = &self.footer {
                    return posix_offset_seconds(footer, epoch_seconds);
                }
                match idx.checked_sub(1) {
                    Some(last) => last,
                    None => return self.local_time_type_offset(0),
                }
            }
        };
        // NOTE: Transition types can be empty, in which case type 0 applies.
        let local_time_type = self
            .data_block
            .transition_types
            .get(idx)
            .copied()
            .unwrap_or(0);
        self.local_time_type_offset(local_time_type)
    }

    fn local_time_type_offset(&self, idx: usize) -> CivilResult<i64> {
        self.data_block
            .local_time_type_records
            .get(idx)
            .map(|record| record.utoff.0)
            .ok_or(CivilError::general("TZif data is missing a local time type."))
    }
}

impl HostTimeZone for ZoneInfo {
    fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
        let local = epoch_seconds
            .checked_add(self.offset_seconds(epoch_seconds)?)
            .ok_or(CivilError::overflow().with_message("timestamp out of range for platform time."))?;
        WallClockFields::from_utc_seconds(local)
    }
}

/// Resolves the offset of a POSIX TZ string at `epoch_seconds`.
fn posix_offset_seconds(posix: &PosixTzString, epoch_seconds: i64) -> CivilResult<i64> {
    // POSIX offsets count seconds west of UTC.
    let std_offset = -posix.std_info.offset.0;
    let Some(dst) = &posix.dst_info else {
        return Ok(std_offset);
    };
    let dst_offset = -dst.variant_info.offset.0;

    let year = WallClockFields::from_utc_seconds(epoch_seconds.saturating_add(std_offset))?.year;
    // The start is read in standard time and the end in daylight time.
    let start = transition_epoch_seconds(
        year,
        &dst.start_date.day,
        dst.start_date.time.0,
        std_offset,
    )?;
    let end =
        transition_epoch_seconds(year, &dst.end_date.day, dst.end_date.time.0, dst_offset)?;

    // Southern hemisphere rules end daylight time before they start it.
    let is_dst = if start < end {
        (start..end).contains(&epoch_seconds)
    } else {
        !(end..start).contains(&epoch_seconds)
    };
    Ok(if is_dst { dst_offset } else { std_offset })
}

/// Returns the epoch seconds of a rule transition in `year` whose local
/// `time` is read with `offset`.
fn transition_epoch_seconds(
    year: i32,
    day: &TransitionDay,
    time: i64,
    offset: i64,
) -> CivilResult<i64> {
    let ordinal = transition_ordinal(year, day)?;
    Ok((i64::from(ordinal) - EPOCH_ORDINAL) * SECONDS_PER_DAY + time - offset)
}

/// Returns the day ordinal of a rule transition in `year`.
fn transition_ordinal(year: i32, day: &TransitionDay) -> CivilResult<i32> {
    let jan_first = utils::days_before_year(year) + 1;
    let ordinal = match *day {
        // `Jn` counts 1 through 365 and never February 29th.
        TransitionDay::NoLeap(n) => {
            let n = i32::from(n);
            jan_first + n - 1 + i32::from(n > 59 && utils::is_leap_year(year))
        }
        // `n` counts 0 through 365.
        TransitionDay::WithLeap(n) => jan_first + i32::from(n),
        // `Mm.w.d` is weekday `d` (Sunday is 0) of week `w`, where week 5
        // is the last such weekday of the month.
        TransitionDay::Mwd(month, week, weekday) => {
            let month = u8::try_from(month)
                .ok()
                .filter(|month| (1..=12).contains(month))
                .ok_or(CivilError::range().with_message("TZ string month is out of range."))?;
            let first = utils::ymd_to_ordinal(year, month, 1);
            // Ordinal 7 is a Sunday.
            let first_weekday = first % 7;
            let mut offset = (i32::from(weekday) - first_weekday).rem_euclid(7)
                + (i32::from(week.max(1)) - 1) * 7;
            let days_in_month = i32::from(utils::days_in_month(year, month));
            while offset >= days_in_month {
                offset -= 7;
            }
            first + offset
        }
    };
    Ok(ordinal)
}

#[cfg(test)]
mod tests {
    use super::ZoneInfo;
    use crate::{
        builtins::core::timezone::tests::{FALL_BACK, SPRING_FORWARD},
        host::HostTimeZone,
        options::Fold,
        PlainDateTime,
    };

    fn bundled(identifier: &str) -> ZoneInfo {
        let (_, data) = jiff_tzdb::get(identifier).unwrap();
        ZoneInfo::from_bytes(data).unwrap()
    }

    fn utc_seconds(year: i32, month: i32, day: i32, hour: i32) -> i64 {
        let datetime = PlainDateTime::try_new(year, month, day, hour, 0, 0, 0).unwrap();
        datetime.timestamp_with_provider(&(), Fold::Earlier).unwrap() / 1_000_000
    }

    #[test]
    fn new_york_offsets() {
        let new_york = bundled("America/New_York");
        assert_eq!(new_york.offset_seconds(SPRING_FORWARD - 1).unwrap(), -18_000);
        assert_eq!(new_york.offset_seconds(SPRING_FORWARD).unwrap(), -14_400);
        assert_eq!(new_york.offset_seconds(FALL_BACK - 1).unwrap(), -14_400);
        assert_eq!(new_york.offset_seconds(FALL_BACK).unwrap(), -18_000);

        // Far past the last listed transition the footer rule applies.
        assert_eq!(new_york.offset_seconds(utc_seconds(2400, 1, 15, 12)).unwrap(), -18_000);
        assert_eq!(new_york.offset_seconds(utc_seconds(2400, 7, 15, 12)).unwrap(), -14_400);
    }

    #[test]
    fn sydney_offsets() {
        let sydney = bundled("Australia/Sydney");
        // 2021-04-04T03:00+11:00 fell back to 02:00+10:00.
        let fall_back = utc_seconds(2021, 4, 3, 16);
        assert_eq!(sydney.offset_seconds(fall_back - 1).unwrap(), 39_600);
        assert_eq!(sydney.offset_seconds(fall_back).unwrap(), 36_000);
        // 2021-10-03T02:00+10:00 sprang forward to 03:00+11:00.
        let spring_forward = utc_seconds(2021, 10, 2, 16);
        assert_eq!(sydney.offset_seconds(spring_forward - 1).unwrap(), 36_000);
        assert_eq!(sydney.offset_seconds(spring_forward).unwrap(), 39_600);

        assert_eq!(sydney.offset_seconds(utc_seconds(2400, 1, 15, 0)).unwrap(), 39_600);
        assert_eq!(sydney.offset_seconds(utc_seconds(2400, 7, 15, 0)).unwrap(), 36_000);
    }

    #[test]
    fn fixed_zone() {
        let utc = bundled("UTC");
        assert_eq!(utc.offset_seconds(0).unwrap(), 0);
        assert_eq!(utc.offset_seconds(utc_seconds(9999, 12, 31, 0)).unwrap(), 0);

        let kolkata = bundled("Asia/Kolkata");
        assert_eq!(kolkata.offset_seconds(utc_seconds(2021, 8, 31, 0)).unwrap(), 19_800);
    }

    #[test]
    fn wall_clock_across_fold() {
        let new_york = bundled("America/New_York");
        let fields = new_york.get_wall_clock_fields(FALL_BACK - 1).unwrap();
        assert_eq!((fields.hour, fields.minute, fields.second), (1, 59, 59));
        let fields = new_york.get_wall_clock_fields(FALL_BACK).unwrap();
        assert_eq!((fields.hour, fields.minute, fields.second), (1, 0, 0));

        let fold = PlainDateTime::try_new(2021, 11, 7, 1, 30, 0, 0).unwrap();
        assert_eq!(
            fold.timestamp_with_provider(&new_york, Fold::Earlier).unwrap(),
            (FALL_BACK - 1_800) * 1_000_000
        );
        assert_eq!(
            fold.timestamp_with_provider(&new_york, Fold::Later).unwrap(),
            (FALL_BACK + 1_800) * 1_000_000
        );

        let gap = PlainDateTime::try_new(2021, 3, 14, 2, 30, 0, 0).unwrap();
        assert_eq!(
            gap.timestamp_with_provider(&new_york, Fold::Earlier).unwrap(),
            (SPRING_FORWARD + 1_800) * 1_000_000
        );
    }

    #[test]
    fn unknown_identifier() {
        assert!(ZoneInfo::try_from_identifier("Mars/Olympus_Mons").is_err());
        assert!(ZoneInfo::from_bytes(b"not a zone file").is_err());
    }
}
