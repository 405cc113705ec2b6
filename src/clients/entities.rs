// View models shared by every upstream client and the page renderer.
// All of them are built once per search and never mutated after rendering starts.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub spotify_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInfo {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>, // largest first, as Spotify returns them
    pub spotify_url: Option<String>,
    pub genres: Vec<String>,
    pub playlist: Option<Playlist>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub name: String,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub album: Album,
    pub spotify_url: Option<String>,
}

/// Raw concert listing, before weather and coordinates are attached
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Concert {
    pub url: Option<String>,
    pub local_date: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Location {
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    /// Both coordinates, or nothing if either one is missing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub description: String,
    pub temperature: Option<f64>, // Celsius, one decimal
}

/// A concert enriched for display
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub venue: String,
    pub city: String,
    pub date: String,
    pub tickets_url: String,
    pub weather: Weather,
    pub location: Location,
}
