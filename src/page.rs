//! Search page renderer.
//!
//! Binds a [`PageContext`] into a complete HTML document. Every optional
//! piece of data is guarded: a missing value omits its element instead of
//! rendering an empty placeholder.

use crate::clients::entities::{ArtistInfo, Event, Track};

/// Everything the search page can show for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContext {
    /// Shown in a danger alert when present
    pub error: Option<String>,
    /// Pre-fills the search box
    pub artist_name: String,
    pub artist_info: Option<ArtistInfo>,
    pub events: Option<Vec<Event>>,
    pub top_tracks: Option<Vec<Track>>,
}

impl PageContext {
    /// Context for a failed search that only carries an error message
    pub fn with_error(error: impl Into<String>) -> Self {
        PageContext {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

const STATIC_PREFIX: &str = "/static";
const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";

/// Public URL of a file in the static directory
pub fn static_url(name: &str) -> String {
    format!("{STATIC_PREFIX}/{}", name.trim_start_matches('/'))
}

/// Escapes text for use in element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn maps_url(lat: f64, lng: f64) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={lat},{lng}")
}

fn temperature(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{t:.1} °C"),
        None => "N/A".to_string(),
    }
}

/// Renders the whole page
pub fn render(ctx: &PageContext) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Concert Mashup</title>
    <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
    <link rel="stylesheet" href="{css}">
</head>
<body>
<div class="container py-4">
    <header class="d-flex align-items-center mb-4">
        <img src="{logo}" alt="Concert Mashup" class="logo me-3">
        <h1 class="h3 mb-0">Concert Mashup</h1>
    </header>
    <form method="post" action="/" class="search-form mb-4">
        <div class="input-group">
            <input type="text" name="artista" class="form-control" placeholder="Search an artist" value="{artist_name}" required>
            <button type="submit" class="btn btn-primary">Search</button>
        </div>
    </form>
"#,
        css = static_url("style.css"),
        logo = static_url("logo.svg"),
        artist_name = escape(&ctx.artist_name),
    ));

    if let Some(error) = &ctx.error {
        html.push_str(&render_error(error));
    }
    if let Some(artist) = &ctx.artist_info {
        html.push_str(&render_artist(artist));
    }
    if let Some(events) = ctx.events.as_deref().filter(|e| !e.is_empty()) {
        html.push_str(&render_events(events));
    }
    if let Some(tracks) = ctx.top_tracks.as_deref().filter(|t| !t.is_empty()) {
        html.push_str(&render_tracks(tracks));
    }

    html.push_str(&format!(
        r#"</div>
<script src="{BOOTSTRAP_JS}"></script>
</body>
</html>
"#
    ));
    html
}

fn render_error(error: &str) -> String {
    format!(
        r#"    <div class="alert alert-danger alert-dismissible fade show" role="alert">
        {}
        <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
    </div>
"#,
        escape(error)
    )
}

fn render_artist(artist: &ArtistInfo) -> String {
    let mut html = String::from("    <section class=\"artist-info card mb-4\">\n        <div class=\"card-body d-flex align-items-center\">\n");
    if let Some(image) = artist.images.first() {
        html.push_str(&format!(
            "            <img src=\"{}\" alt=\"{}\" class=\"artist-image rounded me-4\">\n",
            escape(&image.url),
            escape(&artist.name)
        ));
    }
    html.push_str(&format!(
        "            <div>\n                <h2 class=\"artist-name\">{}</h2>\n",
        escape(&artist.name)
    ));
    if let Some(url) = &artist.spotify_url {
        html.push_str(&format!(
            "                <a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"btn btn-success me-2\">Open in Spotify</a>\n",
            escape(url)
        ));
    }
    if let Some(playlist) = &artist.playlist
        && let Some(url) = &playlist.spotify_url
    {
        html.push_str(&format!(
            "                <a href=\"{}\" title=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"btn btn-outline-success playlist-button\">Recommended Playlist</a>\n",
            escape(url),
            escape(&playlist.name)
        ));
    }
    html.push_str("            </div>\n        </div>\n    </section>\n");
    html
}

fn render_events(events: &[Event]) -> String {
    let mut html = String::from(
        "    <section class=\"concerts mb-4\">\n        <h2 class=\"h4\">Upcoming concerts</h2>\n        <div class=\"row g-3\">\n",
    );
    for event in events {
        html.push_str(&format!(
            r#"            <div class="col-md-4">
                <div class="card concert-card h-100">
                    <div class="card-body">
                        <h3 class="h5 card-title">{venue}</h3>
                        <p class="card-text mb-1">{city}</p>
                        <p class="card-text mb-1">{date}</p>
                        <p class="card-text weather">{description}, {temperature}</p>
                        <a href="{tickets}" target="_blank" rel="noopener" class="btn btn-primary btn-sm">Buy tickets</a>
"#,
            venue = escape(&event.venue),
            city = escape(&event.city),
            date = escape(&event.date),
            description = escape(&event.weather.description),
            temperature = temperature(event.weather.temperature),
            tickets = escape(&event.tickets_url),
        ));
        if let Some((lat, lng)) = event.location.coordinates() {
            html.push_str(&format!(
                "                        <a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"btn btn-outline-secondary btn-sm maps-button\">Maps</a>\n",
                escape(&maps_url(lat, lng))
            ));
        }
        html.push_str("                    </div>\n                </div>\n            </div>\n");
    }
    html.push_str("        </div>\n    </section>\n");
    html
}

fn render_tracks(tracks: &[Track]) -> String {
    let mut html = String::from(
        "    <section class=\"top-tracks mb-4\">\n        <h2 class=\"h4\">Top tracks</h2>\n        <div class=\"row g-3\">\n",
    );
    for track in tracks {
        html.push_str("            <div class=\"col-md-4\">\n                <div class=\"card track-card h-100\">\n");
        if let Some(image) = track.album.images.first() {
            html.push_str(&format!(
                "                    <img src=\"{}\" alt=\"{}\" class=\"card-img-top album-art\">\n",
                escape(&image.url),
                escape(&track.album.name)
            ));
        }
        html.push_str(&format!(
            "                    <div class=\"card-body\">\n                        <h3 class=\"h6 card-title\">{}</h3>\n                        <p class=\"card-text\">{}</p>\n",
            escape(&track.name),
            escape(&track.album.name)
        ));
        if let Some(url) = &track.spotify_url {
            html.push_str(&format!(
                "                        <a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"btn btn-success btn-sm\">Listen on Spotify</a>\n",
                escape(url)
            ));
        }
        html.push_str("                    </div>\n                </div>\n            </div>\n");
    }
    html.push_str("        </div>\n    </section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::entities::{Album, Image, Location, Playlist, Weather};

    fn artist(playlist: Option<Playlist>) -> ArtistInfo {
        ArtistInfo {
            id: "4Z8W4fKeB5YxbusRsdQVPb".into(),
            name: "Radiohead".into(),
            images: vec![Image {
                url: "https://i.scdn.co/image/radiohead".into(),
            }],
            spotify_url: Some("https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb".into()),
            genres: vec!["art rock".into()],
            playlist,
        }
    }

    fn event(venue: &str, location: Location) -> Event {
        Event {
            venue: venue.into(),
            city: "Barcelona".into(),
            date: "2026-11-02".into(),
            tickets_url: "https://www.ticketmaster.com/event/1".into(),
            weather: Weather {
                description: "Clear sky".into(),
                temperature: Some(18.5),
            },
            location,
        }
    }

    fn track(name: &str, images: Vec<Image>) -> Track {
        Track {
            name: name.into(),
            album: Album {
                name: "OK Computer".into(),
                images,
            },
            spotify_url: Some("https://open.spotify.com/track/1".into()),
        }
    }

    #[test]
    fn error_only_renders_one_alert_and_no_sections() {
        let html = render(&PageContext::with_error("Artist not found"));
        assert_eq!(html.matches("alert-danger").count(), 1);
        assert!(html.contains("Artist not found"));
        assert!(!html.contains("class=\"concerts"));
        assert!(!html.contains("class=\"top-tracks"));
        assert!(!html.contains("class=\"artist-info"));
    }

    #[test]
    fn no_error_means_no_alert() {
        let html = render(&PageContext::default());
        assert!(!html.contains("alert-danger"));
        assert!(html.contains("name=\"artista\""));
    }

    #[test]
    fn artist_without_playlist_omits_recommendation() {
        let html = render(&PageContext {
            artist_name: "Radiohead".into(),
            artist_info: Some(artist(None)),
            ..Default::default()
        });
        assert!(html.contains("<h2 class=\"artist-name\">Radiohead</h2>"));
        assert!(html.contains("https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb"));
        assert!(!html.contains("Recommended Playlist"));
    }

    #[test]
    fn artist_with_playlist_links_it() {
        let html = render(&PageContext {
            artist_info: Some(artist(Some(Playlist {
                name: "Art Rock Essentials".into(),
                spotify_url: Some("https://open.spotify.com/playlist/9".into()),
            }))),
            ..Default::default()
        });
        assert!(html.contains("Recommended Playlist"));
        assert!(html.contains("https://open.spotify.com/playlist/9"));
        assert!(html.contains("title=\"Art Rock Essentials\""));
    }

    #[test]
    fn one_card_per_event_and_maps_only_with_both_coordinates() {
        let events = vec![
            event("Palau Sant Jordi", Location::new(41.36, 2.15)),
            event("Sala Apolo", Location::default()),
            event(
                "Razzmatazz",
                Location {
                    lat: Some(41.39),
                    lng: None,
                },
            ),
        ];
        let html = render(&PageContext {
            events: Some(events),
            ..Default::default()
        });
        assert_eq!(html.matches("concert-card").count(), 3);
        assert_eq!(html.matches("maps-button").count(), 1);
        assert!(html.contains("query=41.36,2.15"));
        for venue in ["Palau Sant Jordi", "Sala Apolo", "Razzmatazz"] {
            assert!(html.contains(venue));
        }
        assert!(html.contains("Clear sky, 18.5 °C"));
    }

    #[test]
    fn missing_temperature_shows_na() {
        let mut e = event("Sala Apolo", Location::default());
        e.weather = Weather {
            description: "Data not available".into(),
            temperature: None,
        };
        let html = render(&PageContext {
            events: Some(vec![e]),
            ..Default::default()
        });
        assert!(html.contains("Data not available, N/A"));
    }

    #[test]
    fn one_card_per_track_and_album_art_only_when_present() {
        let tracks = vec![
            track(
                "Paranoid Android",
                vec![Image {
                    url: "https://i.scdn.co/image/okc".into(),
                }],
            ),
            track("Airbag", vec![]),
        ];
        let html = render(&PageContext {
            top_tracks: Some(tracks),
            ..Default::default()
        });
        assert_eq!(html.matches("track-card").count(), 2);
        assert_eq!(html.matches("album-art").count(), 1);
    }

    #[test]
    fn empty_sequences_render_no_sections() {
        let html = render(&PageContext {
            events: Some(vec![]),
            top_tracks: Some(vec![]),
            ..Default::default()
        });
        assert!(!html.contains("class=\"concerts"));
        assert!(!html.contains("class=\"top-tracks"));
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let html = render(&PageContext {
            artist_name: "\"><script>alert(1)</script>".into(),
            error: Some("No concert found for <b>".into()),
            ..Default::default()
        });
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn static_url_joins_prefix() {
        assert_eq!(static_url("style.css"), "/static/style.css");
        assert_eq!(static_url("/logo.svg"), "/static/logo.svg");
    }
}
