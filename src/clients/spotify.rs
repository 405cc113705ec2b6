use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use rspotify::{
    ClientCredsSpotify, Credentials,
    model::{
        ArtistId, Country, FullArtist, FullTrack, Image as SpotifyImage, Market, SearchResult,
        SearchType, SimplifiedPlaylist,
    },
    prelude::*,
};

use crate::clients::{
    entities::{Album, ArtistInfo, Image, Playlist, Track},
    errors::{Error, Result, require_env},
    sources::ArtistCatalog,
};

const PLAYLIST_SEARCH_LIMIT: u32 = 10;

fn spotify_url(external_urls: &HashMap<String, String>) -> Option<String> {
    external_urls.get("spotify").cloned()
}

fn images(images: Vec<SpotifyImage>) -> Vec<Image> {
    images.into_iter().map(|i| Image { url: i.url }).collect()
}

impl From<FullArtist> for ArtistInfo {
    fn from(f: FullArtist) -> ArtistInfo {
        ArtistInfo {
            id: f.id.id().to_string(),
            spotify_url: spotify_url(&f.external_urls),
            name: f.name,
            images: images(f.images),
            genres: f.genres,
            playlist: None,
        }
    }
}

impl From<FullTrack> for Track {
    fn from(f: FullTrack) -> Track {
        Track {
            spotify_url: spotify_url(&f.external_urls),
            name: f.name,
            album: Album {
                name: f.album.name,
                images: images(f.album.images),
            },
        }
    }
}

impl From<SimplifiedPlaylist> for Playlist {
    fn from(f: SimplifiedPlaylist) -> Playlist {
        Playlist {
            spotify_url: spotify_url(&f.external_urls),
            name: f.name,
        }
    }
}

pub struct SpotifyClient {
    pub spotify: ClientCredsSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: ClientCredsSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let id = require_env("SPOTIFY_CLIENT_ID")?;
        let secret = require_env("SPOTIFY_CLIENT_SECRET")?;
        Ok(Self::new(ClientCredsSpotify::new(Credentials::new(&id, &secret))))
    }

    // Client credentials flow. Called once per artist search, the follow-up
    // calls of the same search reuse the token.
    async fn authorize_client(&self) -> Result<()> {
        debug!("Requesting Spotify client credentials token ...");
        self.spotify.request_token().await?;
        Ok(())
    }
}

#[async_trait]
impl ArtistCatalog for SpotifyClient {
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistInfo>> {
        self.authorize_client().await?;
        let result = self
            .spotify
            .search(name, SearchType::Artist, None, None, Some(1), None)
            .await?;
        match result {
            SearchResult::Artists(page) => {
                let artist = page.items.into_iter().next().map(ArtistInfo::from);
                debug!("Spotify artist search for {name:?}: {:?}", artist.as_ref().map(|a| &a.name));
                Ok(artist)
            }
            _ => Err(Error::UnexpectedResponse {
                service: "Spotify",
                message: "artist search returned another result type".into(),
            }),
        }
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        let id = ArtistId::from_id(artist_id).map_err(|e| Error::ParseError(e.to_string()))?;
        let tracks = self
            .spotify
            .artist_top_tracks(id, Some(Market::Country(Country::UnitedStates)))
            .await?;
        debug!("Fetched {} top tracks from Spotify", tracks.len());
        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn playlists_by_genre(&self, genre: &str) -> Result<Vec<Playlist>> {
        let result = self
            .spotify
            .search(
                genre,
                SearchType::Playlist,
                None,
                None,
                Some(PLAYLIST_SEARCH_LIMIT),
                None,
            )
            .await?;
        match result {
            SearchResult::Playlists(page) => {
                Ok(page.items.into_iter().map(Playlist::from).collect())
            }
            _ => Err(Error::UnexpectedResponse {
                service: "Spotify",
                message: "playlist search returned another result type".into(),
            }),
        }
    }
}
