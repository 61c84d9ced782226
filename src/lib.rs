//! The `civil_rs` crate implements naive civil dates, times, and durations
//! over the proleptic Gregorian calendar in Rust.
//!
//! ```rust
//! use civil_rs::{Duration, PlainDate, PlainDateTime};
//!
//! let start = PlainDate::try_new(2021, 8, 1).unwrap();
//! let end = PlainDate::try_new(2021, 8, 31).unwrap();
//! assert_eq!(end - start, Duration::from_days(30).unwrap());
//!
//! let datetime = PlainDateTime::strptime(
//!     "2021/08/31 15:59:55.123456",
//!     "%Y/%m/%d %H:%M:%S.%f",
//! )
//! .unwrap();
//! assert_eq!(datetime.to_string(), "2021-08-31T15:59:55.123456");
//! ```
//!
//! All value types cover the years 1 through 9999 with microsecond
//! resolution. There are no time zones: the only notion of local time is a
//! host provided offset resolver that is used when converting to and from
//! POSIX timestamps (see [`host`]).
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,

    // Narrowing casts occur after values have been normalized into range.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod host;
pub mod iso;
pub mod options;
pub mod parsers;

#[cfg(feature = "sys")]
pub(crate) mod sys;
#[cfg(feature = "sys")]
pub(crate) mod tzdb;

mod builtins;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::CivilError;

/// The `civil_rs` result type
pub type CivilResult<T> = Result<T, CivilError>;

pub mod partial {
    //! Partial component records.
    pub use crate::builtins::core::PartialDuration;
}

pub use crate::builtins::core::{
    timezone::UtcOffset, Duration, Now, PlainDate, PlainDateTime, PlainTime,
};
pub use crate::iso::IsoCalendarDate;
pub use crate::options::Fold;
pub use crate::utils::{days_in_month, is_leap_year};

#[cfg(feature = "sys")]
pub use crate::sys::{LocalHostSystem, UtcHostSystem};

/// A library specific trait for unwrapping assertions.
pub(crate) trait CivilUnwrap {
    type Output;

    /// `civil_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn civil_unwrap(self) -> CivilResult<Self::Output>;
}

impl<T> CivilUnwrap for Option<T> {
    type Output = T;

    fn civil_unwrap(self) -> CivilResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(CivilError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! civil_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::CivilError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::CivilError::assert());
        }
    };
}

// Relevant numeric constants
/// The earliest supported year.
pub const MIN_YEAR: i32 = 1;
/// The latest supported year.
pub const MAX_YEAR: i32 = 9999;
/// The day ordinal of 9999-12-31.
pub const MAX_ORDINAL: i32 = 3_652_059;
/// The largest magnitude of a `Duration`'s day field.
pub const MAX_DELTA_DAYS: i32 = 999_999_999;

/// Seconds per day constant: 86,400
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
/// Microseconds per second constant: 1e+6
pub const US_PER_SECOND: i64 = 1_000_000;
/// Microseconds per day constant: 8.64e+10
pub const US_PER_DAY: i64 = SECONDS_PER_DAY * US_PER_SECOND;
/// Seconds from 0001-01-01T00:00:00 to the Unix epoch, counted from ordinal day 0.
#[doc(hidden)]
pub(crate) const EPOCH_SECONDS: i64 = 719_163 * SECONDS_PER_DAY;
