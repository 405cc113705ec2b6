use rspotify::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse upstream data, error: {0}")]
    ParseError(String),

    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{service} API unexpected response: {message}")]
    UnexpectedResponse {
        service: &'static str,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// Socket errors only come from binding and serving the HTTP listener
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ServerError(err.to_string())
    }
}

// Reads a required environment variable, naming it in the error
pub(crate) fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|e| Error::ConfigurationError(format!("{name}: {e}. Check README.md for details.")))
}
