use crate::builtins::{Now, PlainDate, PlainDateTime};
use crate::host::{HostClock, HostHooks, HostTimeZone, WallClockFields};
use crate::tzdb::ZoneInfo;
use crate::CivilError;
use crate::CivilResult;

use web_time::{SystemTime, UNIX_EPOCH};

impl Now<LocalHostSystem> {
    /// Get a `Now` object with a [`LocalHostSystem`], which
    /// will resolve local time with the host's time zone.
    pub fn local() -> Self {
        Now::new(LocalHostSystem::new())
    }
}

impl Now<UtcHostSystem> {
    /// Get a `Now` object with a [`UtcHostSystem`], which
    /// will resolve local time as UTC.
    pub fn utc() -> Self {
        Now::new(UtcHostSystem)
    }
}

impl PlainDate {
    /// Returns the current local date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn today() -> CivilResult<Self> {
        Now::local().plain_date()
    }
}

impl PlainDateTime {
    /// Returns the current local datetime.
    ///
    /// Enable with the `sys` feature flag.
    pub fn now() -> CivilResult<Self> {
        Now::local().plain_date_time()
    }
}

/// A UTC host system implementation that will return the current time
/// with UTC as the local offset.
///
/// This implementation is backed by [`std::time::SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcHostSystem;

impl HostHooks for UtcHostSystem {}

impl HostClock for UtcHostSystem {
    fn get_host_epoch_microseconds(&self) -> CivilResult<i64> {
        get_system_microseconds()
    }
}

impl HostTimeZone for UtcHostSystem {
    fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
        WallClockFields::from_utc_seconds(epoch_seconds)
    }
}

/// A local host system implementation that will return the current time
/// with the host's time zone as the local offset.
///
/// The zone is read once, when the host is created. A zone named by the
/// `TZ` environment variable takes precedence over the one reported by
/// [`iana_time_zone`]. When no zone can be loaded, local time is UTC.
///
/// This implementation is backed by [`std::time::SystemTime`] and [`iana_time_zone`]
#[derive(Debug, Clone)]
pub struct LocalHostSystem {
    zone: Option<ZoneInfo>,
}

impl LocalHostSystem {
    /// Creates a `LocalHostSystem` for the host's current time zone.
    pub fn new() -> Self {
        let zone = match get_system_zone() {
            Ok(zone) => Some(zone),
            Err(_e) => {
                #[cfg(feature = "log")]
                log::warn!("falling back to UTC as local time: {_e}");
                None
            }
        };
        Self { zone }
    }
}

impl Default for LocalHostSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl HostHooks for LocalHostSystem {}

impl HostClock for LocalHostSystem {
    fn get_host_epoch_microseconds(&self) -> CivilResult<i64> {
        get_system_microseconds()
    }
}

impl HostTimeZone for LocalHostSystem {
    fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
        match &self.zone {
            Some(zone) => zone.get_wall_clock_fields(epoch_seconds),
            None => WallClockFields::from_utc_seconds(epoch_seconds),
        }
    }
}

/// Loads the host's time zone.
pub(crate) fn get_system_zone() -> CivilResult<ZoneInfo> {
    if let Ok(tz) = std::env::var("TZ") {
        return zone_from_tz_variable(&tz);
    }
    iana_time_zone::get_timezone()
        .map_err(|_| CivilError::general("Error fetching system time zone"))
        .and_then(|identifier| ZoneInfo::try_from_identifier(&identifier))
}

/// Loads the zone named by a `TZ` value, either `:`-prefixed or not, as a
/// zone file path or an IANA identifier.
fn zone_from_tz_variable(tz: &str) -> CivilResult<ZoneInfo> {
    let tz = tz.strip_prefix(':').unwrap_or(tz);
    if tz.is_empty() {
        return Err(CivilError::range().with_message("TZ names no time zone."));
    }
    if std::path::Path::new(tz).is_absolute() {
        return ZoneInfo::from_path(tz);
    }
    ZoneInfo::try_from_identifier(tz)
}

/// Returns the system time in microseconds.
pub(crate) fn get_system_microseconds() -> CivilResult<i64> {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| CivilError::general("Error fetching system time"))?
        .as_micros();
    i64::try_from(micros)
        .map_err(|_| CivilError::overflow().with_message("system time exceeds the i64 range."))
}

#[cfg(test)]
mod tests {
    use super::{get_system_microseconds, zone_from_tz_variable, LocalHostSystem};
    use crate::builtins::core::timezone::tests::FALL_BACK;
    use crate::host::HostTimeZone;
    use crate::{Now, PlainDate, PlainDateTime};

    #[test]
    fn system_time_is_after_epoch() {
        // 2020-01-01T00:00:00Z
        assert!(get_system_microseconds().unwrap() > 1_577_836_800_000_000);
    }

    #[test]
    fn today_matches_now() {
        let now = PlainDateTime::now().unwrap();
        let today = PlainDate::today().unwrap();
        // Allow the clock to cross midnight between the two reads.
        assert!(today == now.date() || today.to_ordinal() == now.to_ordinal() + 1);
    }

    #[test]
    fn local_time_is_within_a_day_of_utc() {
        let local = Now::local().plain_date_time().unwrap();
        let utc = Now::utc().plain_date_time().unwrap();
        let difference = local.since(&utc).unwrap().abs();
        // Offsets stay under 26 hours, with slack for the two clock reads.
        assert!(difference.total_seconds() < 26 * 3_600);
    }

    #[test]
    fn local_host_uses_zone() {
        let new_york = LocalHostSystem {
            zone: Some(zone_from_tz_variable(":America/New_York").unwrap()),
        };
        let fields = new_york.get_wall_clock_fields(FALL_BACK).unwrap();
        assert_eq!((fields.day, fields.hour), (7, 1));

        let utc = LocalHostSystem { zone: None };
        let fields = utc.get_wall_clock_fields(FALL_BACK).unwrap();
        assert_eq!((fields.day, fields.hour), (7, 6));
    }

    #[test]
    fn tz_variable_forms() {
        assert!(zone_from_tz_variable("America/New_York").is_ok());
        assert!(zone_from_tz_variable("").is_err());
        assert!(zone_from_tz_variable(":").is_err());
        assert!(zone_from_tz_variable("Not/A_Zone").is_err());
    }
}
