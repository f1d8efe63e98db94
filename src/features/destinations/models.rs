use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One city stay within a trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DestinationSegment {
    pub city: String,
    /// Two-letter region code, US only
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2
    pub country: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Shape requested from the model for each array item
#[allow(dead_code)]
#[derive(Debug, JsonSchema)]
pub struct SegmentItem {
    pub city: String,
    /// Two-letter state or province code, or null
    pub state_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
}
