use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::model::Event;
use crate::features::destinations::DestinationSegment;
use crate::shared::constants::MAX_DESTINATION_LENGTH;
use crate::shared::validation::{validate_not_blank, validate_trip_dates};

/// Ad-hoc events lookup for trip text that is not saved yet
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_search_dates"))]
pub struct EventSearchDto {
    #[validate(
        length(max = MAX_DESTINATION_LENGTH, message = "Destination is too long"),
        custom(function = "validate_not_blank")
    )]
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_search_dates(dto: &EventSearchDto) -> Result<(), ValidationError> {
    validate_trip_dates(dto.start_date, dto.end_date)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventSearchResponseDto {
    pub segments: Vec<DestinationSegment>,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(destination: &str, start: &str, end: &str) -> EventSearchDto {
        serde_json::from_value(serde_json::json!({
            "destination": destination,
            "start_date": start,
            "end_date": end,
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_search() {
        assert!(dto("Austin, TX, USA", "2025-03-10", "2025-03-12")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_blank_destination_and_reversed_dates_are_rejected() {
        assert!(dto("  ", "2025-03-10", "2025-03-12").validate().is_err());
        assert!(dto("Austin", "2025-03-12", "2025-03-10").validate().is_err());
    }
}
