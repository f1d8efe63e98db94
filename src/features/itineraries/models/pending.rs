use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::itinerary::NewItinerary;
use super::trip::TripDetails;

/// A generated itinerary held in the caller's session until saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItinerary {
    pub trip: TripDetails,
    pub prompt: String,
    pub generated_plan: String,
    pub generated_at: DateTime<Utc>,
}

impl PendingItinerary {
    pub fn into_new(self, user_id: String) -> NewItinerary {
        NewItinerary {
            user_id,
            trip: self.trip,
            prompt: self.prompt,
            generated_plan: self.generated_plan,
        }
    }
}
