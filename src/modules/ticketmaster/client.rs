use chrono::NaiveDate;
use thiserror::Error;

use super::models::{EventSearchResponse, TmEvent};
use crate::core::config::EventsConfig;

#[derive(Error, Debug)]
pub enum EventsError {
    #[error("Failed to build Ticketmaster HTTP client: {0}")]
    Client(String),

    #[error("Ticketmaster request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Ticketmaster returned status {0}")]
    Status(u16),
}

/// One city/date-window lookup
#[derive(Debug, Clone)]
pub struct EventQuery<'a> {
    pub city: &'a str,
    pub state_code: Option<&'a str>,
    pub country_code: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub size: usize,
}

impl EventQuery<'_> {
    pub fn params(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", api_key.to_string()),
            ("countryCode", self.country_code.to_string()),
            ("city", self.city.to_string()),
            ("size", self.size.to_string()),
            ("sort", "date,asc".to_string()),
            ("startDateTime", format!("{}T00:00:00Z", self.start.format("%Y-%m-%d"))),
            ("endDateTime", format!("{}T23:59:59Z", self.end.format("%Y-%m-%d"))),
        ];

        if self.country_code == "US" {
            if let Some(state) = self.state_code {
                params.push(("stateCode", state.to_string()));
            }
        }

        params
    }
}

/// Client for `GET {base_url}/discovery/v2/events.json`
pub struct TicketmasterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TicketmasterClient {
    /// Build a client, or `None` when no API key is configured
    pub fn from_config(config: &EventsConfig) -> Result<Option<Self>, EventsError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EventsError::Client(e.to_string()))?;

        Ok(Some(Self {
            http,
            api_key,
            base_url: config.base_url.clone(),
        }))
    }

    /// Raw events for a query, in provider order
    pub async fn search(&self, query: &EventQuery<'_>) -> Result<Vec<TmEvent>, EventsError> {
        let url = format!("{}/discovery/v2/events.json", self.base_url);

        tracing::debug!(
            "Ticketmaster request: city={} state={:?} country={} {}..{}",
            query.city,
            query.state_code,
            query.country_code,
            query.start,
            query.end
        );

        let response = self
            .http
            .get(&url)
            .query(&query.params(&self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventsError::Status(status.as_u16()));
        }

        let body: EventSearchResponse = response.json().await?;
        let events = body.into_events();

        tracing::debug!(
            "Ticketmaster returned {} events for {}",
            events.len(),
            query.city
        );

        Ok(events)
    }
}
