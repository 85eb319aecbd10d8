use thiserror::Error;

/// Why a forecast request produced no payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL carries the API key, so it is stripped first.
    #[error("Failed to send request to WeatherAPI.com: {0}")]
    Transport(reqwest::Error),

    #[error("WeatherAPI forecast request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse WeatherAPI forecast JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}
