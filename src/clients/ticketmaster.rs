use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::clients::{
    entities::Concert,
    errors::{Result, require_env},
    sources::ConcertSource,
};

const BASE_URL: &str = "https://app.ticketmaster.com";
const EVENTS_PATH: &str = "/discovery/v2/events.json";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of concerts shown for one search
pub const MAX_RESULTS: u32 = 9;

#[derive(Deserialize, Debug)]
struct EventsResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
}

#[derive(Deserialize, Debug)]
struct EmbeddedEvents {
    #[serde(default)]
    events: Vec<TicketmasterEvent>,
}

#[derive(Deserialize, Debug)]
struct TicketmasterEvent {
    url: Option<String>,
    dates: Option<Dates>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedVenues>,
}

#[derive(Deserialize, Debug)]
struct Dates {
    start: Option<Start>,
}

#[derive(Deserialize, Debug)]
struct Start {
    #[serde(rename = "localDate")]
    local_date: Option<String>,
}

#[derive(Deserialize, Debug)]
struct EmbeddedVenues {
    #[serde(default)]
    venues: Vec<Venue>,
}

#[derive(Deserialize, Debug)]
struct Venue {
    name: Option<String>,
    city: Option<City>,
}

#[derive(Deserialize, Debug)]
struct City {
    name: Option<String>,
}

impl From<TicketmasterEvent> for Concert {
    fn from(f: TicketmasterEvent) -> Concert {
        // Only the first venue is shown
        let venue = f
            .embedded
            .and_then(|e| e.venues.into_iter().next());
        let (venue, city) = match venue {
            Some(v) => (v.name, v.city.and_then(|c| c.name)),
            None => (None, None),
        };
        Concert {
            url: f.url,
            local_date: f.dates.and_then(|d| d.start).and_then(|s| s.local_date),
            venue,
            city,
        }
    }
}

impl From<EventsResponse> for Vec<Concert> {
    fn from(f: EventsResponse) -> Vec<Concert> {
        f.embedded
            .map(|e| e.events.into_iter().map(Concert::from).collect())
            .unwrap_or_default()
    }
}

pub struct TicketmasterClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TicketmasterClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        Ok(TicketmasterClient {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Points the client at another host, e.g. a proxy or a local stub
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn try_default() -> Result<Self> {
        Self::new(require_env("TICKETMASTER_API_KEY")?)
    }
}

#[async_trait]
impl ConcertSource for TicketmasterClient {
    async fn events(&self, artist_name: &str) -> Result<Vec<Concert>> {
        let size = MAX_RESULTS.to_string();
        let body = self
            .client
            .get(format!("{}{EVENTS_PATH}", self.base_url))
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("keyword", artist_name),
                ("size", size.as_str()),
                ("classificationName", "Music"),
                ("sort", "date,asc"),
            ])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: EventsResponse = serde_json::from_slice(&body)?;
        let concerts: Vec<Concert> = response.into();
        debug!("Ticketmaster returned {} events for {artist_name:?}", concerts.len());
        Ok(concerts)
    }
}
