//! Concert mashup - upcoming concerts, local weather and top tracks for an artist
//!
//! This library searches an artist on Spotify, lists its upcoming concerts from
//! Ticketmaster, annotates every concert with the weather and coordinates of its
//! city, and renders everything as a single HTML page.

/// Client modules for interacting with external services
pub mod clients;
/// Search flow combining every upstream client
pub mod mashup;
/// HTML rendering of the search page
pub mod page;
/// HTTP routes and server loop
pub mod server;
