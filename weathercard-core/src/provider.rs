use crate::{
    Config, WeatherRecord,
    error::FetchError,
    provider::weatherapi::{ForecastPayload, WeatherApiProvider, normalize},
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

pub mod weatherapi;

/// Days requested per forecast, current day inclusive. The free
/// WeatherAPI.com tier caps forecasts at three days.
pub const FORECAST_DAYS: u8 = 3;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn request_forecast(&self, location: &str) -> Result<ForecastPayload, FetchError>;
}

/// Fetch a forecast, logging and discarding any failure.
///
/// `None` is the only failure signal; nothing is retried.
pub async fn fetch_forecast(
    provider: &dyn WeatherProvider,
    location: &str,
) -> Option<ForecastPayload> {
    match provider.request_forecast(location).await {
        Ok(payload) => {
            debug!(location, "forecast payload received");
            Some(payload)
        }
        Err(err) => {
            warn!(location, error = %err, "Error fetching forecast");
            None
        }
    }
}

/// Fetch and normalize in one step.
pub async fn load_record(provider: &dyn WeatherProvider, location: &str) -> Option<WeatherRecord> {
    fetch_forecast(provider, location).await.map(|payload| normalize(&payload))
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    Ok(Box::new(WeatherApiProvider::new(api_key, config.base_url())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::weatherapi::{WaCurrent, WaLocation};

    #[derive(Debug)]
    struct StaticProvider(Option<ForecastPayload>);

    #[async_trait]
    impl WeatherProvider for StaticProvider {
        async fn request_forecast(&self, _location: &str) -> Result<ForecastPayload, FetchError> {
            match &self.0 {
                Some(payload) => Ok(payload.clone()),
                None => Err(FetchError::Parse(
                    serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
                )),
            }
        }
    }

    fn payload() -> ForecastPayload {
        ForecastPayload {
            location: Some(WaLocation { name: Some("San Jose".into()), ..Default::default() }),
            current: Some(WaCurrent {
                temp_c: Some(15.0),
                temp_f: Some(59.0),
                ..Default::default()
            }),
            forecast: None,
        }
    }

    #[tokio::test]
    async fn fetch_failure_yields_none() {
        let provider = StaticProvider(None);
        assert!(fetch_forecast(&provider, "san jose").await.is_none());
        assert!(load_record(&provider, "san jose").await.is_none());
    }

    #[tokio::test]
    async fn load_record_normalizes_payload() {
        let provider = StaticProvider(Some(payload()));
        let record = load_record(&provider, "san jose").await.expect("record");
        assert_eq!(record.location.as_deref(), Some("San Jose"));
        assert_eq!(record.temperature.imperial, Some(59.0));
        assert!(record.forecast.is_empty());
    }

    #[test]
    fn missing_api_key_without_env_override_is_an_error() {
        let cfg = Config::default();
        let err = cfg.api_key_with_override(None).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_with_key() {
        let cfg = Config { api_key: Some("KEY".into()), ..Default::default() };
        assert!(provider_from_config(&cfg).is_ok());
    }
}
