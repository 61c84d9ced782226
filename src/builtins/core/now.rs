//! The `Now` component for reading the host's current date and time.

use crate::host::HostHooks;
use crate::CivilResult;

use super::{PlainDate, PlainDateTime, PlainTime};

/// Reads the current local date and time through a set of host hooks.
///
/// ```rust
/// use civil_rs::{host::{HostClock, HostHooks, HostTimeZone, WallClockFields}, CivilResult, Now, PlainDateTime};
///
/// struct FixedHost;
///
/// impl HostClock for FixedHost {
///     fn get_host_epoch_microseconds(&self) -> CivilResult<i64> {
///         // 2021-08-31T15:59:55.123456Z
///         Ok(1_630_425_595_123_456)
///     }
/// }
///
/// impl HostTimeZone for FixedHost {
///     fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
///         WallClockFields::from_utc_seconds(epoch_seconds)
///     }
/// }
///
/// impl HostHooks for FixedHost {}
///
/// let now = Now::new(FixedHost).plain_date_time().unwrap();
/// assert_eq!(now, PlainDateTime::try_new(2021, 8, 31, 15, 59, 55, 123_456).unwrap());
/// ```
pub struct Now<H: HostHooks> {
    host_hooks: H,
}

impl<H: HostHooks> Now<H> {
    /// Creates a `Now` reading from `host_hooks`.
    pub const fn new(host_hooks: H) -> Self {
        Self { host_hooks }
    }

    /// Returns the microseconds since the Unix epoch reported by the host clock.
    pub fn epoch_microseconds(&self) -> CivilResult<i64> {
        self.host_hooks.get_system_epoch_microseconds()
    }

    /// Returns the current local `PlainDateTime`.
    pub fn plain_date_time(&self) -> CivilResult<PlainDateTime> {
        let epoch_microseconds = self.epoch_microseconds()?;
        PlainDateTime::from_timestamp_with_provider(epoch_microseconds, &self.host_hooks)
    }

    /// Returns the current local `PlainDate`.
    pub fn plain_date(&self) -> CivilResult<PlainDate> {
        self.plain_date_time().map(|datetime| datetime.date())
    }

    /// Returns the current local `PlainTime`.
    pub fn plain_time(&self) -> CivilResult<PlainTime> {
        self.plain_date_time().map(|datetime| datetime.time())
    }
}

#[cfg(test)]
mod tests {
    use super::Now;
    use crate::{
        builtins::core::timezone::tests::{MockNewYork, FALL_BACK},
        host::{HostClock, HostHooks, HostTimeZone, WallClockFields},
        CivilResult, PlainDate, PlainDateTime, PlainTime,
    };

    struct FallBackHost;

    impl HostClock for FallBackHost {
        fn get_host_epoch_microseconds(&self) -> CivilResult<i64> {
            Ok(FALL_BACK * 1_000_000 + 1)
        }
    }

    impl HostTimeZone for FallBackHost {
        fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
            MockNewYork.get_wall_clock_fields(epoch_seconds)
        }
    }

    impl HostHooks for FallBackHost {}

    #[test]
    fn empty_host_reads_epoch() {
        let now = Now::new(());
        assert_eq!(now.epoch_microseconds().unwrap(), 0);
        assert_eq!(now.plain_date().unwrap(), PlainDate::try_new(1970, 1, 1).unwrap());
        assert_eq!(now.plain_time().unwrap(), PlainTime::MIN);
    }

    #[test]
    fn host_time_zone_is_applied() {
        let now = Now::new(FallBackHost);
        assert_eq!(
            now.plain_date_time().unwrap(),
            PlainDateTime::try_new(2021, 11, 7, 1, 0, 0, 1).unwrap()
        );
    }

    #[cfg(feature = "sys")]
    #[test]
    fn utc_host_is_after_2020() {
        let today = Now::utc().plain_date().unwrap();
        assert!(today >= PlainDate::try_new(2020, 1, 1).unwrap());
    }
}
