use futures::stream::{StreamExt, iter};
use log::{debug, error, info, warn};
use rand::seq::IndexedRandom;
use std::sync::Arc;

use crate::clients::{
    ArtistCatalog, ConcertSource, Geocoder, GoogleGeocoder, OpenWeatherClient, SpotifyClient,
    TicketmasterClient, WeatherSource,
    entities::{ArtistInfo, Concert, Event, Location, Track},
    errors::Result,
    weather::{self, UNKNOWN_CITY},
};
use crate::page::PageContext;

pub const EMPTY_ARTIST_ERROR: &str = "Please write an artist";
const UNKNOWN_DATE: &str = "Date not available";
const UNKNOWN_VENUE: &str = "Venue not available";
const NO_TICKETS_URL: &str = "#";

/// Default number of concerts enriched at the same time
pub const DEFAULT_CONCURRENCY: usize = 10;

// Configuration for the Mashup struct
pub struct Config {
    pub catalog: Arc<dyn ArtistCatalog>,
    pub concerts: Arc<dyn ConcertSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub geocoder: Arc<dyn Geocoder>,
    pub concurrency: usize,
}

#[derive(Default)]
pub struct ConfigBuilder {
    catalog: Option<Arc<dyn ArtistCatalog>>,
    concerts: Option<Arc<dyn ConcertSource>>,
    weather: Option<Arc<dyn WeatherSource>>,
    geocoder: Option<Arc<dyn Geocoder>>,
    concurrency: Option<usize>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Arc<dyn ArtistCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn concerts(mut self, concerts: Arc<dyn ConcertSource>) -> Self {
        self.concerts = Some(concerts);
        self
    }

    #[must_use]
    pub fn weather(mut self, weather: Arc<dyn WeatherSource>) -> Self {
        self.weather = Some(weather);
        self
    }

    #[must_use]
    pub fn geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    // Missing clients are built from environment variables
    pub fn build(self) -> Result<Config> {
        let catalog = match self.catalog {
            Some(c) => c,
            None => Arc::new(SpotifyClient::try_default()?),
        };
        let concerts = match self.concerts {
            Some(c) => c,
            None => Arc::new(TicketmasterClient::try_default()?),
        };
        let weather = match self.weather {
            Some(w) => w,
            None => Arc::new(OpenWeatherClient::try_default()?),
        };
        let geocoder = match self.geocoder {
            Some(g) => g,
            None => Arc::new(GoogleGeocoder::try_default()?),
        };
        Ok(Config {
            catalog,
            concerts,
            weather,
            geocoder,
            concurrency: self.concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1),
        })
    }
}

// Combines every upstream source into the search page for one artist
pub struct Mashup {
    config: Config,
}

impl Mashup {
    pub fn new(config: Config) -> Self {
        Mashup { config }
    }

    /// Runs a search for the artist typed in the form.
    ///
    /// Never fails: upstream errors are logged and the affected part of the
    /// page is left out.
    pub async fn search(&self, raw_artist_name: &str) -> PageContext {
        let artist_name = raw_artist_name.trim().to_string();
        if artist_name.is_empty() {
            return PageContext::with_error(EMPTY_ARTIST_ERROR);
        }
        info!("Searching concerts for {artist_name:?} ...");

        let mut artist_info = self.artist_info(&artist_name).await;
        let mut top_tracks = Vec::new();
        if let Some(artist) = artist_info.as_mut() {
            top_tracks = self.top_tracks(artist).await;
            self.attach_playlist(artist).await;
        }

        let concerts = match self.config.concerts.events(&artist_name).await {
            Ok(concerts) => concerts,
            Err(e) => {
                error!("Error Ticketmaster: {e}");
                Vec::new()
            }
        };

        if concerts.is_empty() {
            info!("No concerts found for {artist_name:?}");
            return PageContext {
                error: Some(format!("No concert found for {artist_name}")),
                artist_name,
                artist_info,
                events: None,
                top_tracks: Some(top_tracks),
            };
        }

        // Results keep Ticketmaster's date order
        let events = iter(concerts)
            .map(|c| self.enrich(c))
            .buffered(self.config.concurrency)
            .collect::<Vec<Event>>()
            .await;

        info!(
            "Search for {artist_name:?} completed: {} events, {} top tracks",
            events.len(),
            top_tracks.len()
        );
        PageContext {
            error: None,
            artist_name,
            artist_info,
            events: Some(events),
            top_tracks: Some(top_tracks),
        }
    }

    async fn artist_info(&self, artist_name: &str) -> Option<ArtistInfo> {
        match self.config.catalog.find_artist(artist_name).await {
            Ok(artist) => artist,
            Err(e) => {
                error!("Error Spotify: {e}");
                None
            }
        }
    }

    async fn top_tracks(&self, artist: &ArtistInfo) -> Vec<Track> {
        match self.config.catalog.top_tracks(&artist.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                error!("Error Spotify obtaining top tracks: {e}");
                Vec::new()
            }
        }
    }

    // Recommends a random playlist of the artist's first genre
    async fn attach_playlist(&self, artist: &mut ArtistInfo) {
        let Some(genre) = artist.genres.first() else {
            debug!("{} has no genres, skipping playlist recommendation", artist.name);
            return;
        };
        let playlists = match self.config.catalog.playlists_by_genre(genre).await {
            Ok(playlists) => playlists,
            Err(e) => {
                error!("Error Spotify obtaining recommended playlists: {e}");
                return;
            }
        };
        artist.playlist = playlists.choose(&mut rand::rng()).cloned();
    }

    async fn enrich(&self, concert: Concert) -> Event {
        let city = concert
            .city
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        let (location, weather) = tokio::join!(
            self.locate(&city),
            weather::describe(self.config.weather.as_ref(), &city)
        );

        Event {
            venue: concert.venue.unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
            date: concert.local_date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            tickets_url: concert.url.unwrap_or_else(|| NO_TICKETS_URL.to_string()),
            city,
            weather,
            location,
        }
    }

    async fn locate(&self, city: &str) -> Location {
        if city == UNKNOWN_CITY {
            return Location::default();
        }
        match self.config.geocoder.locate(city).await {
            Ok(location) => location,
            Err(e) => {
                warn!("Error geocoding {city:?}: {e}");
                Location::default()
            }
        }
    }
}
