use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::clients::{
    entities::Location,
    errors::{Error, Result, require_env},
    sources::Geocoder,
};

const BASE_URL: &str = "https://maps.googleapis.com";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize, Debug)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize, Debug)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl TryFrom<GeocodeResponse> for Location {
    type Error = Error;

    fn try_from(f: GeocodeResponse) -> Result<Location> {
        match f.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(f
                .results
                .into_iter()
                .next()
                .map(|r| Location::new(r.geometry.location.lat, r.geometry.location.lng))
                .unwrap_or_default()),
            status => Err(Error::UnexpectedResponse {
                service: "Google Geocoding",
                message: match f.error_message {
                    Some(detail) if !detail.is_empty() => format!("{status}: {detail}"),
                    _ => status.to_string(),
                },
            }),
        }
    }
}

pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        Ok(GoogleGeocoder {
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
        Self::new(require_env("GOOGLE_MAPS_API_KEY")?)
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn locate(&self, address: &str) -> Result<Location> {
        let body = self
            .client
            .get(format!("{}{GEOCODE_PATH}", self.base_url))
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: GeocodeResponse = serde_json::from_slice(&body)?;
        let location = Location::try_from(response)?;
        debug!("Geocoded {address:?} to {location:?}");
        Ok(location)
    }
}
