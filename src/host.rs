//! Trait definitions for accessing values from the host environment.
//!
//! NOTE: This is a power user API.
//!
//! The value types never read a clock or a time zone on their own. The
//! current time and the local offset are provided by implementors of these
//! traits. `()` implements all of them as a host that is always at the Unix
//! epoch in UTC, and the `sys` feature adds `UtcHostSystem` and
//! `LocalHostSystem`.

use crate::{iso::IsoDateTime, CivilError, CivilResult, EPOCH_SECONDS};

/// Broken-down local wall-clock fields for an instant.
///
/// `second` may be 60 when the host reports a leap second.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WallClockFields {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClockFields {
    /// Returns the UTC wall-clock fields for seconds since the Unix epoch.
    pub fn from_utc_seconds(epoch_seconds: i64) -> CivilResult<Self> {
        let seconds = epoch_seconds
            .checked_add(EPOCH_SECONDS)
            .ok_or(CivilError::overflow().with_message("timestamp out of range for platform time."))?;
        let iso = IsoDateTime::from_ordinal_seconds(seconds, 0)?;
        Ok(Self::from(iso))
    }

    /// Returns the seconds from the start of ordinal day 0 for these fields.
    pub(crate) fn to_ordinal_seconds(self) -> CivilResult<i64> {
        // A leap second is validated as 59 and counted afterwards.
        let iso = IsoDateTime::new(
            self.year,
            self.month.into(),
            self.day.into(),
            self.hour.into(),
            self.minute.into(),
            self.second.min(59).into(),
            0,
        )
        .map_err(|e| {
            CivilError::range()
                .with_message(alloc::format!("host returned invalid wall-clock fields: {}", e.message()))
        })?;
        if self.second > 60 {
            return Err(CivilError::range().with_message("host returned an invalid second."));
        }
        Ok(iso.to_ordinal_seconds() + i64::from(self.second.saturating_sub(59)))
    }
}

impl From<IsoDateTime> for WallClockFields {
    fn from(value: IsoDateTime) -> Self {
        Self {
            year: value.date.year,
            month: value.date.month,
            day: value.date.day,
            hour: value.time.hour,
            minute: value.time.minute,
            second: value.time.second,
        }
    }
}

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    /// Returns the microseconds since the Unix epoch.
    fn get_host_epoch_microseconds(&self) -> CivilResult<i64>;
}

/// The `HostTimeZone` trait defines the host's local offset resolver.
pub trait HostTimeZone {
    /// Returns the local wall-clock fields for seconds since the Unix epoch.
    fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_epoch_microseconds(&self) -> CivilResult<i64> {
        self.get_host_epoch_microseconds()
    }

    fn get_system_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
        self.get_wall_clock_fields(epoch_seconds)
    }
}

// Implement empty providers

impl HostClock for () {
    fn get_host_epoch_microseconds(&self) -> CivilResult<i64> {
        Ok(0)
    }
}

impl HostTimeZone for () {
    fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
        WallClockFields::from_utc_seconds(epoch_seconds)
    }
}

impl HostHooks for () {}
