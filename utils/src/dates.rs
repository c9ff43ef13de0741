//! Date conversions and the client-side minimum-age policy.
//!
//! Dates travel to the contracts as epoch seconds at midnight UTC and are
//! entered by users as `YYYY-MM-DD`. All arithmetic here is in UTC so that a
//! date survives a round trip through its epoch value unchanged.
//!
//! The 18-year bound mirrors, but does not replace, whatever the contracts
//! enforce; the contract stays authoritative.

use chrono::{DateTime, Datelike, Months, NaiveDate};
use thiserror::Error;

use crate::clock::Clock;

/// Format used for every user-facing date string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum age, in whole years, to register as a voter or candidate.
pub const MINIMUM_VOTING_AGE: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidFormat(String),

    #[error("date {0} precedes the Unix epoch")]
    BeforeEpoch(String),

    #[error("epoch {0} is outside the supported date range")]
    OutOfRange(u64),
}

/// Parse a strict `YYYY-MM-DD` string. `None` for anything else, including
/// well-shaped but impossible dates such as `2023-02-30`.
pub fn string_to_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

pub fn is_valid_date_string(input: &str) -> bool {
    string_to_date(input).is_some()
}

/// Epoch seconds of midnight UTC on the given `YYYY-MM-DD` date.
pub fn date_to_epoch(input: &str) -> Result<u64, DateError> {
    let date = string_to_date(input).ok_or_else(|| DateError::InvalidFormat(input.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DateError::InvalidFormat(input.to_string()))?;
    u64::try_from(midnight.and_utc().timestamp())
        .map_err(|_| DateError::BeforeEpoch(input.to_string()))
}

/// Calendar date (UTC) of an epoch value.
pub fn epoch_to_date(epoch: u64) -> Result<NaiveDate, DateError> {
    let secs = i64::try_from(epoch).map_err(|_| DateError::OutOfRange(epoch))?;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive())
        .ok_or(DateError::OutOfRange(epoch))
}

/// `YYYY-MM-DD` rendering of an epoch value.
pub fn epoch_to_date_string(epoch: u64) -> Result<String, DateError> {
    Ok(epoch_to_date(epoch)?.format(DATE_FORMAT).to_string())
}

/// Whole years between `dob` and `today`, one less if this year's birthday
/// has not happened yet.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Age in whole years of someone born at `dob_epoch`, as of `today`.
pub fn calculate_age(dob_epoch: u64, today: NaiveDate) -> Result<i32, DateError> {
    Ok(age_on(epoch_to_date(dob_epoch)?, today))
}

/// Whether a `YYYY-MM-DD` date of birth makes the person at least
/// [`MINIMUM_VOTING_AGE`] on `today`. Malformed input is never old enough.
pub fn is_at_least_18(input: &str, today: NaiveDate) -> bool {
    string_to_date(input)
        .map(|dob| age_on(dob, today) >= MINIMUM_VOTING_AGE as i32)
        .unwrap_or(false)
}

/// Latest date of birth that is still old enough on `today`.
///
/// On 29 February the result clamps to 28 February eighteen years earlier.
pub fn max_date_of_birth(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(MINIMUM_VOTING_AGE * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// `YYYY-MM-DD` upper bound for a date-of-birth picker.
pub fn get_max_date_of_birth(clock: &dyn Clock) -> String {
    max_date_of_birth(clock.today()).format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        string_to_date(s).unwrap()
    }

    #[test]
    fn age_before_and_after_birthday() {
        let dob = date_to_epoch("2000-06-15").unwrap();
        assert_eq!(calculate_age(dob, day("2024-06-14")).unwrap(), 23);
        assert_eq!(calculate_age(dob, day("2024-06-15")).unwrap(), 24);
        assert_eq!(calculate_age(dob, day("2024-12-31")).unwrap(), 24);
    }

    #[test]
    fn epoch_round_trip() {
        let epoch = date_to_epoch("2000-01-01").unwrap();
        assert_eq!(epoch, 946_684_800);
        assert_eq!(epoch_to_date_string(epoch).unwrap(), "2000-01-01");
    }

    #[test]
    fn epoch_zero_is_1970() {
        assert_eq!(date_to_epoch("1970-01-01").unwrap(), 0);
        assert_eq!(epoch_to_date_string(0).unwrap(), "1970-01-01");
    }

    #[test]
    fn pre_epoch_dates_are_rejected() {
        assert_eq!(
            date_to_epoch("1969-12-31"),
            Err(DateError::BeforeEpoch("1969-12-31".into()))
        );
    }

    #[test]
    fn strict_format() {
        assert!(is_valid_date_string("2024-02-29"));
        assert!(!is_valid_date_string("2023-02-29"));
        assert!(!is_valid_date_string("2024-2-9"));
        assert!(!is_valid_date_string("24-02-09"));
        assert!(!is_valid_date_string("2024/02/09"));
        assert!(!is_valid_date_string(""));
        assert!(matches!(
            date_to_epoch("tomorrow"),
            Err(DateError::InvalidFormat(_))
        ));
    }

    #[test]
    fn max_date_of_birth_is_eighteen_years_back() {
        assert_eq!(max_date_of_birth(day("2024-06-15")), day("2006-06-15"));
        assert_eq!(max_date_of_birth(day("2024-02-29")), day("2006-02-28"));
    }

    #[test]
    fn eighteenth_birthday_boundary() {
        let today = day("2024-06-15");
        assert!(is_at_least_18("2006-06-15", today));
        assert!(!is_at_least_18("2006-06-16", today));
        assert!(!is_at_least_18("not a date", today));
    }
}
