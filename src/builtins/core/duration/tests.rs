use alloc::string::ToString;

use crate::{error::ErrorKind, partial::PartialDuration};

use super::Duration;

#[test]
fn partial_duration_empty() {
    let err = Duration::from_partial_duration(PartialDuration::default());
    assert!(err.is_err())
}

#[test]
fn partial_duration_values() {
    let partial = PartialDuration::new()
        .with_weeks(1)
        .with_days(-1)
        .with_hours(25)
        .with_minutes(1)
        .with_seconds(1)
        .with_milliseconds(1)
        .with_microseconds(1);
    let result = Duration::from_partial_duration(partial).unwrap();
    assert_eq!(result.days(), 7);
    assert_eq!(result.seconds(), 3_661);
    assert_eq!(result.microseconds(), 1_001);
}

#[test]
fn normalization() {
    let duration = Duration::new(0, 0, -1).unwrap();
    assert_eq!(
        (duration.days(), duration.seconds(), duration.microseconds()),
        (-1, 86_399, 999_999)
    );

    let duration = Duration::new(1, 86_400, 1_000_000).unwrap();
    assert_eq!(
        (duration.days(), duration.seconds(), duration.microseconds()),
        (2, 1, 0)
    );

    // Normalizing a normalized duration is a no-op.
    let again = Duration::new(
        duration.days().into(),
        duration.seconds().into(),
        duration.microseconds().into(),
    )
    .unwrap();
    assert_eq!(again, duration);
}

#[test]
fn day_range() {
    assert!(Duration::new(999_999_999, 86_399, 999_999).is_ok());
    let err = Duration::new(999_999_999, 86_400, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(Duration::new(-999_999_999, 0, 0).is_ok());
    assert!(Duration::new(-999_999_999, 0, -1).is_err());
    assert!(Duration::from_weeks(i64::MAX).is_err());
    assert_eq!(Duration::from_days(-999_999_999).unwrap(), Duration::MIN);
}

#[test]
fn single_unit_constructors() {
    assert_eq!(Duration::from_weeks(2).unwrap(), Duration::new(14, 0, 0).unwrap());
    assert_eq!(Duration::from_hours(-1).unwrap(), Duration::new(0, -3_600, 0).unwrap());
    assert_eq!(Duration::from_minutes(90).unwrap(), Duration::new(0, 5_400, 0).unwrap());
    assert_eq!(
        Duration::from_milliseconds(1_500).unwrap(),
        Duration::new(0, 1, 500_000).unwrap()
    );
    assert_eq!(Duration::from_microseconds(1).unwrap(), Duration::RESOLUTION);
}

#[test]
fn addition_and_subtraction() {
    let one_day = Duration::from_days(1).unwrap();
    let seconds = Duration::from_seconds(86_400).unwrap();
    assert_eq!(one_day + seconds, Duration::from_days(2).unwrap());
    assert_eq!(one_day - seconds, Duration::default());
    assert!(Duration::MAX.checked_add(&Duration::RESOLUTION).is_err());
    assert!(Duration::MIN.checked_sub(&Duration::RESOLUTION).is_err());

    let mut duration = one_day;
    duration += seconds;
    duration -= Duration::from_hours(1).unwrap();
    assert_eq!(duration, Duration::new(1, 82_800, 0).unwrap());
}

#[test]
fn negation() {
    let duration = Duration::new(0, 1, 1).unwrap();
    let negated = -duration;
    assert_eq!(
        (negated.days(), negated.seconds(), negated.microseconds()),
        (-1, 86_398, 999_999)
    );
    assert_eq!(-negated, duration);
    assert_eq!(-Duration::from_seconds(10).unwrap(), Duration::from_seconds(-10).unwrap());
    assert_eq!(-Duration::MIN, Duration::from_days(999_999_999).unwrap());
    assert!(Duration::MAX.checked_neg().is_err());
}

#[test]
fn absolute_value() {
    let duration = Duration::new(-2, 3_600, 0).unwrap();
    assert_eq!(duration.abs(), Duration::new(1, 82_800, 0).unwrap());
    assert_eq!(duration.abs().abs(), duration.abs());
    assert_eq!(Duration::MIN.abs(), Duration::from_days(999_999_999).unwrap());
}

#[test]
fn multiplication_and_division() {
    let duration = Duration::new(0, 10, 500_000).unwrap();
    assert_eq!(duration * 2, Duration::new(0, 21, 0).unwrap());
    assert_eq!(3 * duration, Duration::new(0, 31, 500_000).unwrap());
    assert_eq!(duration * -1, -duration);
    assert!(Duration::MAX.checked_mul(2).is_err());

    assert_eq!(duration / 2, Duration::new(0, 5, 250_000).unwrap());
    // Division floors towards negative infinity.
    assert_eq!(
        Duration::from_microseconds(-1).unwrap() / 2,
        Duration::from_microseconds(-1).unwrap()
    );
    assert_eq!(
        Duration::from_microseconds(7).unwrap() / 2,
        Duration::from_microseconds(3).unwrap()
    );

    let err = duration.checked_div(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);

    let mut duration = duration;
    duration *= 2;
    duration /= 3;
    assert_eq!(duration, Duration::new(0, 7, 0).unwrap());
}

#[test]
fn duration_division_and_modulo() {
    let ten = Duration::from_seconds(10).unwrap();
    let three = Duration::from_seconds(3).unwrap();
    assert_eq!(ten % three, Duration::from_seconds(1).unwrap());
    assert_eq!(ten.checked_div_duration(&three).unwrap(), 3);
    assert_eq!((-ten).checked_div_duration(&three).unwrap(), -4);
    assert_eq!(ten.checked_div_duration(&-three).unwrap(), -4);
    // The remainder carries the divisor's sign.
    assert_eq!(-ten % three, Duration::from_seconds(2).unwrap());
    assert_eq!(ten % -three, Duration::from_seconds(-2).unwrap());
    assert_eq!(
        ten.checked_div_rem(&three).unwrap(),
        (3, Duration::from_seconds(1).unwrap())
    );

    let zero = Duration::default();
    assert_eq!(ten.checked_rem(&zero).unwrap_err().kind(), ErrorKind::Domain);
    assert_eq!(
        ten.checked_div_duration(&zero).unwrap_err().kind(),
        ErrorKind::Domain
    );
    assert_eq!(
        Duration::MAX.checked_div_duration(&Duration::RESOLUTION).unwrap_err().kind(),
        ErrorKind::Overflow
    );

    let mut rem = ten;
    rem %= three;
    assert_eq!(rem, Duration::from_seconds(1).unwrap());
}

#[test]
fn ordering() {
    let negative = Duration::from_days(-1).unwrap();
    let zero = Duration::default();
    let positive = Duration::from_days(1).unwrap();
    assert!(negative < zero && zero < positive);
    assert!(Duration::from_microseconds(-1).unwrap() < zero);
    assert!(Duration::MIN < Duration::MAX);
    assert!(Duration::new(0, 1, 0).unwrap() > Duration::new(0, 0, 999_999).unwrap());
}

#[test]
fn truthiness_and_totals() {
    assert!(Duration::default().is_zero());
    assert!(!Duration::RESOLUTION.is_zero());

    let duration = Duration::new(-1, 86_399, 999_999).unwrap();
    assert_eq!(duration.total_microseconds(), -1);
    assert_eq!(duration.total_milliseconds(), -1);
    assert_eq!(duration.total_seconds(), -1);

    let duration = Duration::new(1, 1, 1_500).unwrap();
    assert_eq!(duration.total_seconds(), 86_401);
    assert_eq!(duration.total_milliseconds(), 86_401_001);
    assert_eq!(duration.total_microseconds(), 86_401_001_500);
}

#[test]
fn string_forms() {
    assert_eq!(Duration::default().to_string(), "0:00:00");
    assert_eq!(
        Duration::new(1, 3_600, 0).unwrap().to_string(),
        "1 day, 1:00:00"
    );
    assert_eq!(
        Duration::new(-2, 0, 10).unwrap().to_string_form(),
        "-2 days, 0:00:00.000010"
    );
    assert_eq!(Duration::MAX.to_string(), "999999999 days, 23:59:59.999999");
}

#[test]
fn repr_forms() {
    assert_eq!(Duration::default().repr(), "Duration(0)");
    assert_eq!(Duration::new(1, 0, 0).unwrap().repr(), "Duration(1)");
    assert_eq!(Duration::new(0, 2, 0).unwrap().repr(), "Duration(0, 2)");
    assert_eq!(Duration::new(1, 0, 3).unwrap().repr(), "Duration(1, 0, 3)");
    assert_eq!(alloc::format!("{:?}", Duration::new(0, 0, -1).unwrap()), "Duration(-1, 86399, 999999)");
}

#[test]
fn from_core_duration() {
    let duration = Duration::try_from(core::time::Duration::new(86_401, 1_999)).unwrap();
    assert_eq!(duration, Duration::new(1, 1, 1).unwrap());
    assert!(Duration::try_from(core::time::Duration::from_secs(u64::MAX)).is_err());
}
