/// View models for artists, tracks and concerts
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Google Geocoding API client
pub mod geocoding;
/// Traits every upstream client implements
pub mod sources;
/// Spotify Web API client
pub mod spotify;
#[cfg(test)]
mod stub;
/// Ticketmaster Discovery API client
pub mod ticketmaster;
/// OpenWeather API client
pub mod weather;

pub use geocoding::GoogleGeocoder;
pub use sources::{ArtistCatalog, ConcertSource, Geocoder, WeatherSource};
pub use spotify::SpotifyClient;
pub use ticketmaster::TicketmasterClient;
pub use weather::OpenWeatherClient;
