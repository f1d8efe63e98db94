use chrono::NaiveDate;
use std::sync::Arc;

use super::model::Event;
use crate::features::destinations::{DestinationService, DestinationSegment};
use crate::modules::ticketmaster::{EventQuery, TicketmasterClient, TmEvent};

const DESCRIPTION_LIMIT: usize = 160;
const MIN_PAGE_SIZE: usize = 15;

/// Segments a trip was split into and the events found for them
#[derive(Debug, Clone)]
pub struct EventLookup {
    pub segments: Vec<DestinationSegment>,
    pub events: Vec<Event>,
}

pub struct EventsService {
    client: Option<TicketmasterClient>,
    destinations: Arc<DestinationService>,
    max_results: usize,
}

impl EventsService {
    pub fn new(
        client: Option<TicketmasterClient>,
        destinations: Arc<DestinationService>,
        max_results: usize,
    ) -> Self {
        Self {
            client,
            destinations,
            max_results,
        }
    }

    /// Events for every destination in the trip text, segment by segment
    ///
    /// Returns nothing when no events API key is configured.
    pub async fn fetch_events(&self, text: &str, start: NaiveDate, end: NaiveDate) -> Vec<Event> {
        let Some(client) = &self.client else {
            return Vec::new();
        };

        let segments = self.destinations.normalize(text, start, end).await;
        self.events_for_segments(client, &segments).await
    }

    /// Like [`fetch_events`](Self::fetch_events) but also returns the segments
    pub async fn search(&self, text: &str, start: NaiveDate, end: NaiveDate) -> EventLookup {
        let segments = self.destinations.normalize(text, start, end).await;
        let events = match &self.client {
            Some(client) => self.events_for_segments(client, &segments).await,
            None => Vec::new(),
        };

        EventLookup { segments, events }
    }

    async fn events_for_segments(
        &self,
        client: &TicketmasterClient,
        segments: &[DestinationSegment],
    ) -> Vec<Event> {
        tracing::info!(
            "Fetching events for {} destination segments",
            segments.len()
        );

        let mut events = Vec::new();
        for segment in segments {
            let query = EventQuery {
                city: &segment.city,
                state_code: segment.state.as_deref(),
                country_code: &segment.country,
                start: segment.start_date,
                end: segment.end_date,
                size: (self.max_results * 3).max(MIN_PAGE_SIZE),
            };

            match client.search(&query).await {
                Ok(raw) => {
                    let found = filter_events(raw, segment, self.max_results);
                    tracing::info!(
                        "Collected {} events for {} spanning {} to {}",
                        found.len(),
                        segment.city,
                        segment.start_date,
                        segment.end_date
                    );
                    events.extend(found);
                }
                Err(e) => {
                    tracing::warn!("Events lookup failed for {}: {}", segment.city, e);
                }
            }
        }

        events
    }
}

/// Keep events dated within the segment, in provider order, up to `max_results`
///
/// Venue location falls back to the segment's when the provider omits it.
pub fn filter_events(
    raw: Vec<TmEvent>,
    segment: &DestinationSegment,
    max_results: usize,
) -> Vec<Event> {
    let mut events = Vec::new();

    for event in raw {
        if events.len() >= max_results {
            break;
        }

        let Some(start) = event.start() else {
            continue;
        };
        let Some(day) = start
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        else {
            continue;
        };
        if day < segment.start_date || day > segment.end_date {
            continue;
        }

        let venue = event.first_venue();
        let city = venue
            .and_then(|v| v.city_name())
            .unwrap_or(&segment.city)
            .to_string();
        let state = venue
            .and_then(|v| v.state_code())
            .or(segment.state.as_deref())
            .unwrap_or_default()
            .to_string();
        let country = venue
            .and_then(|v| v.country_code())
            .unwrap_or(&segment.country)
            .to_string();

        let description = event
            .info
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(event.please_note.as_deref())
            .unwrap_or_default()
            .chars()
            .take(DESCRIPTION_LIMIT)
            .collect();

        events.push(Event {
            start: start.to_string(),
            name: event.name.clone(),
            url: event.url.clone(),
            description,
            city,
            state,
            country,
            requested_city: segment.city.clone(),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EventsConfig;
    use crate::modules::ticketmaster::EventSearchResponse;
    use crate::shared::test_helpers::spawn_stub;
    use axum::{
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    // Chicago fails, Toronto has events, anything else gets a garbled body
    async fn discovery(Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("apikey").map(String::as_str) != Some("test-key") {
            return StatusCode::UNAUTHORIZED.into_response();
        }

        match params.get("city").map(String::as_str) {
            Some("Chicago") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            Some("Toronto") => Json(json!({"_embedded": {"events": [
                {"name": "Jazz Night", "dates": {"start": {"localDate": "2025-05-03"}}},
                {"name": "Next week", "dates": {"start": {"localDate": "2025-05-10"}}}
            ]}}))
            .into_response(),
            _ => "{\"_embedded\": [".into_response(),
        }
    }

    async fn live_service() -> EventsService {
        let config = EventsConfig {
            api_key: Some("test-key".to_string()),
            base_url: spawn_stub(Router::new().route("/discovery/v2/events.json", get(discovery)))
                .await,
            timeout: Duration::from_secs(5),
            max_results: 5,
        };

        EventsService::new(
            TicketmasterClient::from_config(&config).unwrap(),
            Arc::new(DestinationService::new(None, "gpt-4o-mini".to_string())),
            5,
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn segment() -> DestinationSegment {
        DestinationSegment {
            city: "Chicago".to_string(),
            state: Some("IL".to_string()),
            country: "US".to_string(),
            start_date: date("2025-05-01"),
            end_date: date("2025-05-03"),
        }
    }

    fn events(items: serde_json::Value) -> Vec<TmEvent> {
        serde_json::from_value::<EventSearchResponse>(json!({"_embedded": {"events": items}}))
            .unwrap()
            .into_events()
    }

    fn dated(name: &str, local_date: &str) -> serde_json::Value {
        json!({"name": name, "dates": {"start": {"localDate": local_date}}})
    }

    #[test]
    fn test_keeps_only_events_inside_window() {
        let raw = events(json!([
            dated("Before", "2025-04-30"),
            dated("First day", "2025-05-01"),
            dated("Last day", "2025-05-03"),
            dated("After", "2025-05-04"),
        ]));

        let names: Vec<String> = filter_events(raw, &segment(), 5)
            .into_iter()
            .filter_map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["First day", "Last day"]);
    }

    #[test]
    fn test_stops_at_limit_in_provider_order() {
        let raw = events(json!([
            dated("A", "2025-05-02"),
            dated("B", "2025-05-01"),
            dated("C", "2025-05-02"),
        ]));

        let filtered = filter_events(raw, &segment(), 2);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name.as_deref(), Some("A"));
        assert_eq!(filtered[1].name.as_deref(), Some("B"));
    }

    #[test]
    fn test_skips_missing_or_malformed_dates() {
        let raw = events(json!([
            {"name": "No dates"},
            {"name": "Empty start", "dates": {"start": {}}},
            dated("Garbled", "May 2nd"),
            {"name": "Timed", "dates": {"start": {"dateTime": "2025-05-02T19:30:00Z"}}},
        ]));

        let filtered = filter_events(raw, &segment(), 5);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.as_deref(), Some("Timed"));
        assert_eq!(filtered[0].start, "2025-05-02T19:30:00Z");
    }

    #[test]
    fn test_venue_falls_back_to_segment() {
        let raw = events(json!([
            {
                "name": "Venue known",
                "dates": {"start": {"localDate": "2025-05-02"}},
                "info": "x".repeat(200),
                "_embedded": {"venues": [{
                    "city": {"name": "Evanston"},
                    "state": {"stateCode": "IL"},
                    "country": {"countryCode": "US"}
                }]}
            },
            {
                "name": "Venue unknown",
                "url": "https://tm.example/2",
                "dates": {"start": {"localDate": "2025-05-02"}},
                "pleaseNote": "Bring ID",
                "_embedded": {"venues": [{"city": {"name": "  "}}]}
            }
        ]));

        let filtered = filter_events(raw, &segment(), 5);

        assert_eq!(filtered[0].city, "Evanston");
        assert_eq!(filtered[0].description.chars().count(), 160);
        assert_eq!(filtered[0].requested_city, "Chicago");

        assert_eq!(filtered[1].city, "Chicago");
        assert_eq!(filtered[1].state, "IL");
        assert_eq!(filtered[1].country, "US");
        assert_eq!(filtered[1].description, "Bring ID");
        assert_eq!(filtered[1].url.as_deref(), Some("https://tm.example/2"));
    }

    #[tokio::test]
    async fn test_failed_segment_does_not_stop_later_segments() {
        let service = live_service().await;

        let found = service
            .fetch_events(
                "Chicago, IL, USA for 2 days\nToronto, Canada",
                date("2025-05-01"),
                date("2025-05-04"),
            )
            .await;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_deref(), Some("Jazz Night"));
        assert_eq!(found[0].requested_city, "Toronto");
        assert_eq!(found[0].country, "CA");
    }

    #[tokio::test]
    async fn test_undecodable_response_yields_no_events() {
        let service = live_service().await;

        let lookup = service
            .search("Lisbon, Portugal", date("2025-05-01"), date("2025-05-04"))
            .await;

        assert_eq!(lookup.segments.len(), 1);
        assert_eq!(lookup.segments[0].city, "Lisbon");
        assert!(lookup.events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_events_without_key_is_empty() {
        let service = EventsService::new(
            None,
            Arc::new(DestinationService::new(None, "gpt-4o-mini".to_string())),
            5,
        );

        let found = service
            .fetch_events("Chicago, IL, USA", date("2025-05-01"), date("2025-05-03"))
            .await;
        assert!(found.is_empty());

        let lookup = service
            .search("Chicago, IL, USA", date("2025-05-01"), date("2025-05-03"))
            .await;
        assert_eq!(lookup.segments.len(), 1);
        assert!(lookup.events.is_empty());
    }
}
