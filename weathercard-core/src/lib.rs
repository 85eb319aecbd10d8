//! Core library for the `weathercard` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Forecast acquisition from WeatherAPI.com and normalization
//! - Weather card variants with imperial/metric toggling
//! - An abstract rendering sink plus an in-memory element tree
//!
//! It is used by `weathercard-cli`, but the cards only depend on
//! [`RenderSink`], so other front ends can reuse them.

pub mod card;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

pub use card::{Card, CurrentConditionsCard, ForecastDayCard, HourlyForecastCard, WeatherCard};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::FetchError;
pub use model::{ForecastDay, ForecastHour, UnitPair, UnitSystem, WeatherRecord};
pub use provider::{
    WeatherProvider, fetch_forecast, load_record, provider_from_config,
    weatherapi::{ForecastPayload, WeatherApiProvider, normalize},
};
pub use render::{ElementId, ElementKind, ElementTree, RenderSink};
