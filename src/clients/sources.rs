use async_trait::async_trait;

use crate::clients::{
    entities::{ArtistInfo, Concert, Location, Playlist, Track, Weather},
    errors::Result,
};

/// Music catalog lookups (artist metadata, top tracks, genre playlists)
#[async_trait]
pub trait ArtistCatalog: Send + Sync {
    /// Best match for `name`, or `None` when the catalog has no such artist
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistInfo>>;

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>>;

    async fn playlists_by_genre(&self, genre: &str) -> Result<Vec<Playlist>>;
}

/// Upcoming concerts for an artist, soonest first
#[async_trait]
pub trait ConcertSource: Send + Sync {
    async fn events(&self, artist_name: &str) -> Result<Vec<Concert>>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions in `city`, already formatted for display
    async fn current(&self, city: &str) -> Result<Weather>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Coordinates of the first match for `address`; an empty `Location` when nothing matched
    async fn locate(&self, address: &str) -> Result<Location>;
}
