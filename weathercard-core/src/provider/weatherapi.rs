use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{Condition, ForecastDay, ForecastHour, UnitPair, WeatherRecord},
    provider::FORECAST_DAYS,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn request_forecast(&self, location: &str) -> Result<ForecastPayload, FetchError> {
        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", &FORECAST_DAYS.to_string()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        debug!(bytes = body.len(), "parsing forecast body");
        Ok(serde_json::from_str(&body)?)
    }
}

/// Raw `forecast.json` body. Every key is optional so a payload with
/// missing fields still parses; only non-JSON or mistyped values fail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    pub location: Option<WaLocation>,
    pub current: Option<WaCurrent>,
    pub forecast: Option<WaForecast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaCurrent {
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
    pub condition: Option<WaCondition>,
    pub wind_mph: Option<f64>,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
    pub is_day: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaForecast {
    #[serde(default)]
    pub forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaForecastDay {
    pub date: Option<String>,
    pub day: Option<WaDay>,
    #[serde(default)]
    pub hour: Vec<WaForecastHour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaDay {
    pub avgtemp_c: Option<f64>,
    pub avgtemp_f: Option<f64>,
    pub maxtemp_c: Option<f64>,
    pub maxtemp_f: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub mintemp_f: Option<f64>,
    pub daily_chance_of_rain: Option<f64>,
    pub condition: Option<WaCondition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaForecastHour {
    pub time: Option<String>,
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub chance_of_rain: Option<f64>,
    pub condition: Option<WaCondition>,
}

/// Map a raw payload onto [`WeatherRecord`]. Performs no validation.
pub fn normalize(payload: &ForecastPayload) -> WeatherRecord {
    let location = payload.location.clone().unwrap_or_default();
    let current = payload.current.clone().unwrap_or_default();

    let forecast = payload
        .forecast
        .as_ref()
        .map(|f| f.forecastday.iter().map(normalize_day).collect())
        .unwrap_or_default();

    WeatherRecord {
        location: location.name,
        region: location.region,
        country: location.country,
        local_time: location.localtime,
        temperature: UnitPair::new(current.temp_f, current.temp_c),
        feels_like: UnitPair::new(current.feelslike_f, current.feelslike_c),
        condition: normalize_condition(current.condition.as_ref()),
        wind_speed: UnitPair::new(current.wind_mph, current.wind_kph),
        humidity_pct: current.humidity,
        is_day: current.is_day.map(|flag| flag == 1),
        forecast,
    }
}

fn normalize_condition(condition: Option<&WaCondition>) -> Condition {
    condition
        .map(|c| Condition { text: c.text.clone(), icon: c.icon.clone() })
        .unwrap_or_default()
}

fn normalize_day(raw: &WaForecastDay) -> ForecastDay {
    let day = raw.day.clone().unwrap_or_default();

    ForecastDay {
        date: raw.date.clone(),
        avg_temp: UnitPair::new(day.avgtemp_f, day.avgtemp_c),
        max_temp: UnitPair::new(day.maxtemp_f, day.maxtemp_c),
        min_temp: UnitPair::new(day.mintemp_f, day.mintemp_c),
        condition: normalize_condition(day.condition.as_ref()),
        chance_of_rain_pct: day.daily_chance_of_rain,
        hours: raw.hour.iter().map(normalize_hour).collect(),
    }
}

fn normalize_hour(raw: &WaForecastHour) -> ForecastHour {
    ForecastHour {
        time: raw.time.clone(),
        temperature: UnitPair::new(raw.temp_f, raw.temp_c),
        condition: normalize_condition(raw.condition.as_ref()),
        chance_of_rain_pct: raw.chance_of_rain,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> ForecastPayload {
        let value = json!({
            "location": {
                "name": "San Jose",
                "region": "California",
                "country": "United States of America",
                "localtime": "2024-03-05 14:30"
            },
            "current": {
                "temp_c": 15.0,
                "temp_f": 59.0,
                "is_day": 1,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png"
                },
                "wind_mph": 6.9,
                "wind_kph": 11.2,
                "humidity": 67,
                "feelslike_c": 14.2,
                "feelslike_f": 57.6
            },
            "forecast": {
                "forecastday": [{
                    "date": "2024-03-05",
                    "day": {
                        "maxtemp_c": 17.8, "maxtemp_f": 64.0,
                        "avgtemp_c": 13.0, "avgtemp_f": 55.4,
                        "mintemp_c": 8.3, "mintemp_f": 46.9,
                        "daily_chance_of_rain": 40,
                        "condition": { "text": "Patchy rain possible", "icon": "//cdn/176.png" }
                    },
                    "hour": [
                        {
                            "time": "2024-03-05 00:00",
                            "temp_c": 9.1,
                            "temp_f": 48.4,
                            "chance_of_rain": 0,
                            "condition": { "text": "Clear", "icon": "//cdn/113.png" }
                        }
                    ]
                }]
            }
        });
        serde_json::from_value(value).expect("sample payload parses")
    }

    #[test]
    fn normalize_maps_location_and_current() {
        let record = normalize(&sample_payload());

        assert_eq!(record.location.as_deref(), Some("San Jose"));
        assert_eq!(record.region.as_deref(), Some("California"));
        assert_eq!(record.local_time.as_deref(), Some("2024-03-05 14:30"));
        assert_eq!(record.temperature, UnitPair::new(Some(59.0), Some(15.0)));
        assert_eq!(record.wind_speed, UnitPair::new(Some(6.9), Some(11.2)));
        assert_eq!(record.humidity_pct, Some(67.0));
        assert_eq!(record.is_day, Some(true));
        assert_eq!(record.condition.text.as_deref(), Some("Partly cloudy"));
    }

    #[test]
    fn normalized_temperatures_agree_across_units() {
        let record = normalize(&sample_payload());

        for pair in [record.temperature, record.feels_like] {
            let (f, c) = (pair.imperial.unwrap(), pair.metric.unwrap());
            assert!((c * 9.0 / 5.0 + 32.0 - f).abs() <= 0.1, "{c}C vs {f}F");
        }
    }

    #[test]
    fn normalize_maps_forecast_days_and_hours() {
        let record = normalize(&sample_payload());

        assert_eq!(record.forecast.len(), 1);
        let day = &record.forecast[0];
        assert_eq!(day.date.as_deref(), Some("2024-03-05"));
        assert_eq!(day.avg_temp, UnitPair::new(Some(55.4), Some(13.0)));
        assert_eq!(day.max_temp, UnitPair::new(Some(64.0), Some(17.8)));
        assert_eq!(day.min_temp, UnitPair::new(Some(46.9), Some(8.3)));
        assert_eq!(record.chance_of_rain(), Some(40.0));
        assert_eq!(day.hours.len(), 1);
        assert_eq!(day.hours[0].time.as_deref(), Some("2024-03-05 00:00"));
        assert_eq!(day.hours[0].temperature.metric, Some(9.1));
    }

    #[test]
    fn missing_keys_stay_absent() {
        let payload: ForecastPayload =
            serde_json::from_value(json!({ "current": { "temp_c": 3.0 } })).unwrap();
        let record = normalize(&payload);

        assert_eq!(record.location, None);
        assert_eq!(record.temperature, UnitPair::new(None, Some(3.0)));
        assert_eq!(record.is_day, None);
        assert!(record.forecast.is_empty());
    }

    #[test]
    fn mistyped_field_is_a_parse_error() {
        let result =
            serde_json::from_value::<ForecastPayload>(json!({ "current": { "temp_c": "warm" } }));
        assert!(result.is_err());
    }

    #[test]
    fn forecast_url_ignores_trailing_slash() {
        let provider = WeatherApiProvider::new("KEY".into(), "http://localhost:8080/");
        assert_eq!(provider.forecast_url(), "http://localhost:8080/v1/forecast.json");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
