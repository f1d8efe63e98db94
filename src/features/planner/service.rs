use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::itineraries::models::TripDetails;
use crate::modules::openai::{CompletionRequest, LlmError, TextGenerator};
use crate::shared::prompts::{render_itinerary_prompt, ItineraryPromptVars};

const SYSTEM_MESSAGE: &str = "You are an expert travel planner.";
const DEFAULT_INTERESTS: &str = "general sightseeing, dining, and culture";
const MISSING_KEY_MESSAGE: &str = "OPENAI_API_KEY is not configured.";

/// Prompt sent to the model and the plan it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlan {
    pub prompt: String,
    pub plan: String,
}

pub struct PlannerService {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
}

impl PlannerService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, model: String) -> Self {
        Self { generator, model }
    }

    /// Render the style template for a trip
    pub fn build_prompt(&self, trip: &TripDetails) -> Result<String> {
        let interests = trip.interests.trim();
        let vars = ItineraryPromptVars {
            destination: trip.destination.trim(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            interests: if interests.is_empty() {
                DEFAULT_INTERESTS
            } else {
                interests
            },
            activities: trip.activities.trim(),
            food_preferences: trip.food_preferences.trim(),
            style_label: trip.style.label(),
        };

        render_itinerary_prompt(trip.style.key(), &vars).map_err(|e| {
            tracing::error!("Failed to render itinerary prompt: {}", e);
            AppError::Internal(format!("Failed to render itinerary prompt: {}", e))
        })
    }

    /// Build the prompt and ask the model for a plan
    pub async fn generate(&self, trip: &TripDetails) -> Result<GeneratedPlan> {
        let Some(generator) = &self.generator else {
            return Err(AppError::Configuration(MISSING_KEY_MESSAGE.to_string()));
        };

        let prompt = self.build_prompt(trip)?;

        tracing::info!(
            "Generating {} itinerary for {} ({} to {})",
            trip.style,
            trip.destination.lines().next().unwrap_or_default(),
            trip.start_date,
            trip.end_date
        );

        let request = CompletionRequest {
            model: self.model.clone(),
            system: SYSTEM_MESSAGE.to_string(),
            user: prompt.clone(),
            temperature: None,
            timeout: None,
        };

        let plan = generator.complete(request).await.map_err(|e| {
            tracing::warn!("Itinerary generation failed: {}", e);
            AppError::ExternalServiceError(e.to_string())
        })?;

        let plan = plan.trim().to_string();
        if plan.is_empty() {
            return Err(AppError::ExternalServiceError(
                LlmError::EmptyResponse.to_string(),
            ));
        }

        Ok(GeneratedPlan { prompt, plan })
    }
}
