//! In-memory upstream sources shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use concert_mashup::clients::{
    ArtistCatalog, ConcertSource, Geocoder, WeatherSource,
    entities::{Album, ArtistInfo, Concert, Image, Location, Playlist, Track, Weather},
    errors::{Error, Result},
};
use concert_mashup::mashup::{ConfigBuilder, Mashup};

fn upstream_error(service: &'static str) -> Error {
    Error::UnexpectedResponse {
        service,
        message: "503 Service Unavailable".into(),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub artist: Option<ArtistInfo>,
    pub tracks: Vec<Track>,
    pub playlists: Vec<Playlist>,
    pub failing: bool,
    pub playlist_calls: AtomicUsize,
}

#[async_trait]
impl ArtistCatalog for FakeCatalog {
    async fn find_artist(&self, _name: &str) -> Result<Option<ArtistInfo>> {
        if self.failing {
            return Err(upstream_error("Spotify"));
        }
        Ok(self.artist.clone())
    }

    async fn top_tracks(&self, _artist_id: &str) -> Result<Vec<Track>> {
        Ok(self.tracks.clone())
    }

    async fn playlists_by_genre(&self, _genre: &str) -> Result<Vec<Playlist>> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.playlists.clone())
    }
}

#[derive(Default)]
pub struct FakeConcerts {
    pub concerts: Vec<Concert>,
    pub failing: bool,
}

#[async_trait]
impl ConcertSource for FakeConcerts {
    async fn events(&self, _artist_name: &str) -> Result<Vec<Concert>> {
        if self.failing {
            return Err(upstream_error("Ticketmaster"));
        }
        Ok(self.concerts.clone())
    }
}

/// Weather per city, with an optional latency per city
#[derive(Default)]
pub struct FakeWeather {
    pub by_city: HashMap<String, Weather>,
    pub delays: HashMap<String, Duration>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn current(&self, city: &str) -> Result<Weather> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(city) {
            tokio::time::sleep(*delay).await;
        }
        self.by_city
            .get(city)
            .cloned()
            .ok_or_else(|| upstream_error("OpenWeather"))
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    pub by_address: HashMap<String, Location>,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn locate(&self, address: &str) -> Result<Location> {
        Ok(self.by_address.get(address).copied().unwrap_or_default())
    }
}

pub fn radiohead(genres: &[&str]) -> ArtistInfo {
    ArtistInfo {
        id: "4Z8W4fKeB5YxbusRsdQVPb".into(),
        name: "Radiohead".into(),
        images: vec![Image {
            url: "https://i.scdn.co/image/radiohead".into(),
        }],
        spotify_url: Some("https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb".into()),
        genres: genres.iter().map(ToString::to_string).collect(),
        playlist: None,
    }
}

pub fn track(name: &str) -> Track {
    Track {
        name: name.into(),
        album: Album {
            name: "OK Computer".into(),
            images: vec![],
        },
        spotify_url: Some(format!("https://open.spotify.com/track/{name}")),
    }
}

pub fn concert(venue: &str, city: &str, date: &str) -> Concert {
    Concert {
        url: Some(format!("https://www.ticketmaster.com/{venue}")),
        local_date: Some(date.into()),
        venue: Some(venue.into()),
        city: Some(city.into()),
    }
}

pub fn sunny(temperature: f64) -> Weather {
    Weather {
        description: "Clear sky".into(),
        temperature: Some(temperature),
    }
}

pub fn mashup(
    catalog: Arc<FakeCatalog>,
    concerts: Arc<FakeConcerts>,
    weather: Arc<FakeWeather>,
    geocoder: Arc<FakeGeocoder>,
) -> Mashup {
    let config = ConfigBuilder::new()
        .catalog(catalog)
        .concerts(concerts)
        .weather(weather)
        .geocoder(geocoder)
        .concurrency(4)
        .build()
        .expect("all sources are provided");
    Mashup::new(config)
}
