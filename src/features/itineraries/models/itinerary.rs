use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::trip::{TravelStyle, TripDetails};

/// Database model for a saved itinerary
#[derive(Debug, Clone, FromRow)]
pub struct Itinerary {
    pub id: Uuid,
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: String,
    pub activities: String,
    pub food_preferences: String,
    pub style: TravelStyle,
    pub prompt: String,
    pub generated_plan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload
#[derive(Debug, Clone)]
pub struct NewItinerary {
    pub user_id: String,
    pub trip: TripDetails,
    pub prompt: String,
    pub generated_plan: String,
}

/// Full replacement of the editable columns
#[derive(Debug, Clone)]
pub struct ItineraryUpdate {
    pub trip: TripDetails,
    pub prompt: String,
    pub generated_plan: String,
}
