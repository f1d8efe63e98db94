use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An event happening during one destination segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub name: Option<String>,
    pub url: Option<String>,
    /// Provider start string, `dateTime` or `localDate`
    pub start: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// City of the segment the event was looked up for
    pub requested_city: String,
}
