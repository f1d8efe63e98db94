use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Flavour of the generated plan; selects the prompt template
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "travel_style", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    #[default]
    General,
    CultureHistory,
    CityShopping,
    Adventure,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 4] = [
        TravelStyle::General,
        TravelStyle::CultureHistory,
        TravelStyle::CityShopping,
        TravelStyle::Adventure,
    ];

    /// Stable identifier, also the prompt template name
    pub fn key(&self) -> &'static str {
        match self {
            TravelStyle::General => "general",
            TravelStyle::CultureHistory => "culture_history",
            TravelStyle::CityShopping => "city_shopping",
            TravelStyle::Adventure => "adventure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelStyle::General => "No preference / Balanced",
            TravelStyle::CultureHistory => "Culture & History",
            TravelStyle::CityShopping => "City Life & Shopping",
            TravelStyle::Adventure => "Adventure & Outdoors",
        }
    }
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The user-supplied parameters of a trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetails {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: String,
    pub activities: String,
    pub food_preferences: String,
    pub style: TravelStyle,
}
