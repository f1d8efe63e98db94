use std::borrow::Cow;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::MAX_TRIP_DAYS;

lazy_static! {
    /// Two-letter region or country code, e.g. "IL", "gb"
    pub static ref TWO_LETTER_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z]{2}$").unwrap();
}

/// Reject strings that are empty after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }
    Ok(())
}

/// Trip dates must be ordered and the trip not absurdly long
pub fn validate_trip_dates(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::new("date_range")
            .with_message(Cow::Borrowed("End date must be on or after the start date.")));
    }
    if (end - start).num_days() + 1 > MAX_TRIP_DAYS {
        return Err(ValidationError::new("date_range").with_message(Cow::Owned(format!(
            "Trips longer than {} days are not supported.",
            MAX_TRIP_DAYS
        ))));
    }
    Ok(())
}

/// Whether `value` is exactly two ASCII letters
pub fn is_two_letter_code(value: &str) -> bool {
    TWO_LETTER_CODE_REGEX.is_match(value)
}
