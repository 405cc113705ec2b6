use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use serde::Deserialize;

use crate::clients::{
    entities::Weather,
    errors::{Error, Result, require_env},
    sources::WeatherSource,
};

const BASE_URL: &str = "https://api.openweathermap.org";
const WEATHER_PATH: &str = "/data/2.5/weather";
const TIMEOUT: Duration = Duration::from_secs(5);

/// City placeholder used when a concert has no city
pub const UNKNOWN_CITY: &str = "Unknown city";
pub const CITY_NOT_SPECIFIED: &str = "City not specified";
pub const DATA_NOT_AVAILABLE: &str = "Data not available";

#[derive(Deserialize, Debug)]
struct WeatherResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Main,
}

#[derive(Deserialize, Debug)]
struct Condition {
    description: String,
}

#[derive(Deserialize, Debug)]
struct Main {
    temp: f64,
}

impl TryFrom<WeatherResponse> for Weather {
    type Error = Error;

    fn try_from(f: WeatherResponse) -> Result<Weather> {
        let condition = f.weather.into_iter().next().ok_or(Error::UnexpectedResponse {
            service: "OpenWeather",
            message: "no weather conditions in response".into(),
        })?;
        Ok(Weather {
            description: capitalize(&condition.description),
            temperature: Some(round_one_decimal(f.main.temp)),
        })
    }
}

// First character upper case, the rest lower case
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weather to show for a concert city.
///
/// Never fails: a missing city skips the lookup and upstream errors are
/// logged and replaced by a placeholder description.
pub async fn describe(source: &dyn WeatherSource, city: &str) -> Weather {
    if city.trim().is_empty() || city == UNKNOWN_CITY {
        return Weather {
            description: CITY_NOT_SPECIFIED.to_string(),
            temperature: None,
        };
    }
    match source.current(city).await {
        Ok(weather) => weather,
        Err(e) => {
            error!("Error OpenWeather: {e}");
            Weather {
                description: DATA_NOT_AVAILABLE.to_string(),
                temperature: None,
            }
        }
    }
}

pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    lang: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, lang: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        Ok(OpenWeatherClient {
            client,
            api_key,
            lang,
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
        let api_key = require_env("OPENWEATHER_API_KEY")?;
        let lang = std::env::var("OPENWEATHER_LANG").unwrap_or_else(|_| "en".to_string());
        Self::new(api_key, lang)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<Weather> {
        let body = self
            .client
            .get(format!("{}{WEATHER_PATH}", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: WeatherResponse = serde_json::from_slice(&body)?;
        debug!("OpenWeather response for {city:?}: {response:?}");
        Weather::try_from(response)
    }
}
