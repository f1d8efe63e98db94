use serde::Deserialize;

/// Top-level body of `GET /discovery/v2/events.json`
#[derive(Debug, Default, Deserialize)]
pub struct EventSearchResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedEvents>,
}

impl EventSearchResponse {
    pub fn into_events(self) -> Vec<TmEvent> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmbeddedEvents {
    #[serde(default)]
    pub events: Vec<TmEvent>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmEvent {
    pub name: Option<String>,
    pub url: Option<String>,
    pub dates: Option<EventDates>,
    pub info: Option<String>,
    pub please_note: Option<String>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EventEmbedded>,
}

impl TmEvent {
    /// `dates.start.dateTime`, else `dates.start.localDate`
    pub fn start(&self) -> Option<&str> {
        let start = self.dates.as_ref()?.start.as_ref()?;
        start
            .date_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| start.local_date.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn first_venue(&self) -> Option<&Venue> {
        self.embedded.as_ref()?.venues.first()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventDates {
    pub start: Option<EventStart>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStart {
    pub date_time: Option<String>,
    pub local_date: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventEmbedded {
    #[serde(default)]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Venue {
    pub city: Option<VenueCity>,
    pub state: Option<VenueState>,
    pub country: Option<VenueCountry>,
}

impl Venue {
    pub fn city_name(&self) -> Option<&str> {
        non_blank(self.city.as_ref()?.name.as_deref())
    }

    pub fn state_code(&self) -> Option<&str> {
        non_blank(self.state.as_ref()?.state_code.as_deref())
    }

    pub fn country_code(&self) -> Option<&str> {
        non_blank(self.country.as_ref()?.country_code.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct VenueCity {
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueState {
    pub state_code: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueCountry {
    pub country_code: Option<String>,
}
