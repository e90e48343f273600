//! Human-readable case numbers.
//!
//! Format: `ADV-<unix millis>-<disambiguator 0..999>`. The millisecond stamp
//! comes from the record's creation time; the disambiguator is random and
//! supplied by the caller (the store draws it in SQL and retries on a UNIQUE
//! collision).

use chrono::{DateTime, Utc};

pub const CASE_NUMBER_PREFIX: &str = "ADV";

/// Exclusive upper bound of the random disambiguator.
pub const DISAMBIGUATOR_RANGE: u32 = 1000;

#[must_use]
pub fn format_case_number(created_at: DateTime<Utc>, disambiguator: u32) -> String {
    format!(
        "{CASE_NUMBER_PREFIX}-{}-{}",
        created_at.timestamp_millis(),
        disambiguator % DISAMBIGUATOR_RANGE
    )
}

/// Check that `s` has the `ADV-<millis>-<n>` shape.
#[must_use]
pub fn is_case_number(s: &str) -> bool {
    let mut parts = s.splitn(3, '-');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == CASE_NUMBER_PREFIX
        && !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && suffix
            .parse::<u32>()
            .is_ok_and(|n| n < DISAMBIGUATOR_RANGE && !suffix.starts_with('+'))
}
