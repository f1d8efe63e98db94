use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::heuristics::{heuristic_destinations, segments_from_llm};
use super::models::{DestinationSegment, SegmentItem};
use crate::modules::openai::{CompletionRequest, TextGenerator};
use crate::shared::llm::{json_schema_string, parse_json};
use crate::shared::prompts::render_destination_prompts;

const NORMALIZATION_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DestinationService {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
}

impl DestinationService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, model: String) -> Self {
        Self { generator, model }
    }

    /// Segment destination text, preferring the model when available
    ///
    /// Any model failure (request error, unparseable output, no usable items)
    /// falls back to the heuristic split.
    pub async fn normalize(
        &self,
        text: &str,
        trip_start: NaiveDate,
        trip_end: NaiveDate,
    ) -> Vec<DestinationSegment> {
        let Some(generator) = &self.generator else {
            tracing::info!("No text generator configured; using heuristic destination parsing");
            return heuristic_destinations(text, trip_start, trip_end);
        };

        let schema = json_schema_string::<SegmentItem>();
        let (system, user) =
            match render_destination_prompts(text, trip_start, trip_end, Some(&schema)) {
                Ok(prompts) => prompts,
                Err(e) => {
                    tracing::warn!("Failed to render destination prompts: {}", e);
                    return heuristic_destinations(text, trip_start, trip_end);
                }
            };

        tracing::info!("Normalizing destinations with model {}", self.model);

        let request = CompletionRequest {
            model: self.model.clone(),
            system,
            user,
            temperature: Some(0.0),
            timeout: Some(NORMALIZATION_TIMEOUT),
        };

        let raw = match generator.complete(request).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "Destination normalization request failed: {}. Using heuristic parsing.",
                    e
                );
                return heuristic_destinations(text, trip_start, trip_end);
            }
        };

        let items = match parse_json::<Vec<Value>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    "Unable to parse destination normalization output: {}. Using heuristic parsing.",
                    e
                );
                return heuristic_destinations(text, trip_start, trip_end);
            }
        };

        let segments = segments_from_llm(&items, trip_start, trip_end);
        if segments.is_empty() {
            tracing::warn!(
                "Destination normalization returned no valid destinations; using heuristic parsing."
            );
            return heuristic_destinations(text, trip_start, trip_end);
        }

        tracing::debug!("Normalized destinations: {:?}", segments);
        segments
    }
}
