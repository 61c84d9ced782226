//! The primary date and time components provided by `civil_rs`.

pub(crate) mod duration;
pub(crate) mod timezone;

mod date;
mod datetime;
mod now;
mod time;

#[doc(inline)]
pub use date::PlainDate;
#[doc(inline)]
pub use datetime::PlainDateTime;
#[doc(inline)]
pub use duration::{Duration, PartialDuration};
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use time::PlainTime;
