//! This module implements `UtcOffset` and the inversion of a host's local
//! offset resolver.

use core::fmt;

use writeable::Writeable;

use crate::{
    civil_assert,
    error::ErrorKind,
    host::{HostTimeZone, WallClockFields},
    iso::IsoDateTime,
    options::Fold,
    parsers::FormattableOffset,
    CivilError, CivilResult, EPOCH_SECONDS, SECONDS_PER_DAY,
};

/// The widest span a local offset change is assumed to cover.
const MAX_FOLD_SECONDS: i64 = SECONDS_PER_DAY;

/// A fixed offset from UTC in seconds.
///
/// `UtcOffset` is the simplest local offset resolver: every instant has the
/// same offset, so there are no folds or gaps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Creates a `UtcOffset` from seconds east of UTC.
    ///
    /// The offset must be strictly within one day.
    pub fn from_seconds(seconds: i32) -> CivilResult<Self> {
        if i64::from(seconds).abs() >= SECONDS_PER_DAY {
            return Err(CivilError::range()
                .with_message("UtcOffset must be strictly between -24 and 24 hours."));
        }
        Ok(Self(seconds))
    }

    /// Returns the offset in seconds east of UTC.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.0
    }
}

impl HostTimeZone for UtcOffset {
    fn get_wall_clock_fields(&self, epoch_seconds: i64) -> CivilResult<WallClockFields> {
        let local = epoch_seconds.checked_add(self.0.into()).ok_or(
            CivilError::overflow().with_message("timestamp out of range for platform time."),
        )?;
        WallClockFields::from_utc_seconds(local)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FormattableOffset::from_seconds(self.0, 0).write_to(f)
    }
}

/// Returns the local wall-clock time of `ordinal_seconds`, which is a UTC
/// instant counted from ordinal day 0.
fn local_ordinal_seconds(
    tz: &(impl HostTimeZone + ?Sized),
    ordinal_seconds: i64,
) -> CivilResult<i64> {
    tz.get_wall_clock_fields(ordinal_seconds - EPOCH_SECONDS)?
        .to_ordinal_seconds()
}

/// Returns the seconds since the Unix epoch at which the host's local
/// wall-clock reads `local`.
///
/// The local offset of the host is only observable by converting instants
/// to wall-clock time, so this searches for an instant `u` with
/// `local(u) == local`. The offset at `local` read as UTC is the first
/// guess. A second offset is looked for one day before (for
/// `Fold::Earlier`) or after (for `Fold::Later`) that guess.
///
/// - When both offsets give a solution, `local` is in a fold and `fold`
///   selects between them.
/// - When neither gives a solution, `local` is in a gap. `Fold::Earlier`
///   interprets `local` with the offset before the transition, which is the
///   later of the two instants, and `Fold::Later` the reverse.
///
/// Within a day of 0001-01-01 or 9999-12-31 the neighbouring offset may lie
/// outside the calendar. The first solution is then returned as is.
pub(crate) fn local_to_epoch_seconds(
    tz: &(impl HostTimeZone + ?Sized),
    local: &IsoDateTime,
    fold: Fold,
) -> CivilResult<i64> {
    let t = local.to_ordinal_seconds();

    let a = local_ordinal_seconds(tz, t)? - t;
    let u1 = t - a;
    let t1 = local_ordinal_seconds(tz, u1)?;

    let b = if t1 == t {
        // Found one solution. Check whether another offset applies nearby.
        let neighbor = match fold {
            Fold::Earlier => u1 - MAX_FOLD_SECONDS,
            Fold::Later => u1 + MAX_FOLD_SECONDS,
        };
        let b = match local_ordinal_seconds(tz, neighbor) {
            Ok(neighbor_local) => neighbor_local - neighbor,
            // Past either end of the calendar there is no other offset to observe.
            Err(e) if e.kind() == ErrorKind::Range => return Ok(u1 - EPOCH_SECONDS),
            Err(e) => return Err(e),
        };
        if a == b {
            return Ok(u1 - EPOCH_SECONDS);
        }
        b
    } else {
        let b = t1 - u1;
        civil_assert!(a != b, "the local offset must change between two distinct local times");
        b
    };

    let u2 = t - b;
    let t2 = local_ordinal_seconds(tz, u2)?;
    if t2 == t {
        #[cfg(feature = "log")]
        log::debug!("{local:?} is in a fold, resolved with {fold}");
        return Ok(u2 - EPOCH_SECONDS);
    }
    if t1 == t {
        return Ok(u1 - EPOCH_SECONDS);
    }

    #[cfg(feature = "log")]
    log::debug!("{local:?} is in a gap, resolved with {fold}");
    let u = match fold {
        Fold::Earlier => u1.max(u2),
        Fold::Later => u1.min(u2),
    };
    Ok(u - EPOCH_SECONDS)
}
