use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::events::model::Event;
use crate::features::itineraries::models::{Itinerary, PendingItinerary, TravelStyle, TripDetails};
use crate::shared::constants::{MAX_DESTINATION_LENGTH, MAX_PLAN_LENGTH, MAX_PREFERENCE_LENGTH};
use crate::shared::validation::{validate_not_blank, validate_trip_dates};

/// What to do with a freshly generated itinerary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CreateAction {
    /// Keep it in the session for review
    #[default]
    Preview,
    /// Persist it to the caller's account (requires sign-in)
    Save,
}

// Create request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateItineraryDto {
    /// Cities in order, one per line, e.g. "Chicago, IL, USA for 3 days"
    #[validate(
        length(max = MAX_DESTINATION_LENGTH, message = "Destination is too long"),
        custom(function = "validate_not_blank")
    )]
    pub destination: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    #[validate(length(max = MAX_PREFERENCE_LENGTH))]
    pub interests: String,

    #[serde(default)]
    #[validate(length(max = MAX_PREFERENCE_LENGTH))]
    pub activities: String,

    #[serde(default)]
    #[validate(length(max = MAX_PREFERENCE_LENGTH))]
    pub food_preferences: String,

    #[serde(default)]
    pub style: TravelStyle,

    #[serde(default)]
    pub action: CreateAction,
}

fn validate_create_dates(dto: &CreateItineraryDto) -> Result<(), ValidationError> {
    validate_trip_dates(dto.start_date, dto.end_date)
}

impl CreateItineraryDto {
    pub fn trip(&self) -> TripDetails {
        TripDetails {
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            interests: self.interests.clone(),
            activities: self.activities.clone(),
            food_preferences: self.food_preferences.clone(),
            style: self.style,
        }
    }
}

// Update request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update"))]
pub struct UpdateItineraryDto {
    #[validate(
        length(max = MAX_DESTINATION_LENGTH, message = "Destination is too long"),
        custom(function = "validate_not_blank")
    )]
    pub destination: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    #[validate(length(max = MAX_PREFERENCE_LENGTH))]
    pub interests: String,

    #[serde(default)]
    #[validate(length(max = MAX_PREFERENCE_LENGTH))]
    pub activities: String,

    #[serde(default)]
    #[validate(length(max = MAX_PREFERENCE_LENGTH))]
    pub food_preferences: String,

    #[serde(default)]
    pub style: TravelStyle,

    /// Stored as-is unless `regenerate_plan` is set; required otherwise
    #[serde(default)]
    #[validate(length(max = MAX_PLAN_LENGTH))]
    pub generated_plan: String,

    /// Replace prompt and plan with a fresh generation from the updated fields
    #[serde(default)]
    pub regenerate_plan: bool,
}

fn validate_update(dto: &UpdateItineraryDto) -> Result<(), ValidationError> {
    validate_trip_dates(dto.start_date, dto.end_date)?;
    if !dto.regenerate_plan && dto.generated_plan.trim().is_empty() {
        return Err(ValidationError::new("generated_plan").with_message(Cow::Borrowed(
            "Generated plan may not be blank unless the plan is regenerated.",
        )));
    }
    Ok(())
}

impl UpdateItineraryDto {
    pub fn trip(&self) -> TripDetails {
        TripDetails {
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            interests: self.interests.clone(),
            activities: self.activities.clone(),
            food_preferences: self.food_preferences.clone(),
            style: self.style,
        }
    }
}

// Response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItineraryResponseDto {
    pub id: Uuid,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: String,
    pub activities: String,
    pub food_preferences: String,
    pub style: TravelStyle,
    pub style_label: String,
    pub prompt: String,
    pub generated_plan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Itinerary> for ItineraryResponseDto {
    fn from(i: Itinerary) -> Self {
        Self {
            id: i.id,
            destination: i.destination,
            start_date: i.start_date,
            end_date: i.end_date,
            interests: i.interests,
            activities: i.activities,
            food_preferences: i.food_preferences,
            style: i.style,
            style_label: i.style.label().to_string(),
            prompt: i.prompt,
            generated_plan: i.generated_plan,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

/// Generated but unsaved itinerary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingItineraryDto {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: String,
    pub activities: String,
    pub food_preferences: String,
    pub style: TravelStyle,
    pub style_label: String,
    pub prompt: String,
    pub generated_plan: String,
    pub generated_at: DateTime<Utc>,
}

impl From<PendingItinerary> for PendingItineraryDto {
    fn from(p: PendingItinerary) -> Self {
        Self {
            style_label: p.trip.style.label().to_string(),
            destination: p.trip.destination,
            start_date: p.trip.start_date,
            end_date: p.trip.end_date,
            interests: p.trip.interests,
            activities: p.trip.activities,
            food_preferences: p.trip.food_preferences,
            style: p.trip.style,
            prompt: p.prompt,
            generated_plan: p.generated_plan,
            generated_at: p.generated_at,
        }
    }
}

/// Events found for a saved itinerary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItineraryEventsDto {
    pub itinerary_id: Uuid,
    pub events: Vec<Event>,
}

/// One selectable travel style
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TravelStyleDto {
    pub value: TravelStyle,
    pub label: String,
}

impl From<TravelStyle> for TravelStyleDto {
    fn from(style: TravelStyle) -> Self {
        Self {
            value: style,
            label: style.label().to_string(),
        }
    }
}
