use serde::{Deserialize, Serialize};

/// Which half of a [`UnitPair`] a card displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    pub fn is_imperial(self) -> bool {
        self == UnitSystem::Imperial
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Imperial => UnitSystem::Metric,
            UnitSystem::Metric => UnitSystem::Imperial,
        }
    }
}

/// A measurement held in both unit systems at once.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitPair {
    pub imperial: Option<f64>,
    pub metric: Option<f64>,
}

impl UnitPair {
    pub fn new(imperial: Option<f64>, metric: Option<f64>) -> Self {
        Self { imperial, metric }
    }

    pub fn select(&self, units: UnitSystem) -> Option<f64> {
        match units {
            UnitSystem::Imperial => self.imperial,
            UnitSystem::Metric => self.metric,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

/// Normalized forecast for one location.
///
/// Every scalar is optional: absent upstream fields stay absent here and
/// are dropped at render time rather than being mistaken for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    /// Local time at the location, `YYYY-MM-DD HH:MM`.
    pub local_time: Option<String>,
    /// Fahrenheit / Celsius.
    pub temperature: UnitPair,
    pub feels_like: UnitPair,
    pub condition: Condition,
    /// mph / kph.
    pub wind_speed: UnitPair,
    pub humidity_pct: Option<f64>,
    pub is_day: Option<bool>,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherRecord {
    /// Today's chance of rain, taken from the first forecast day.
    pub fn chance_of_rain(&self) -> Option<f64> {
        self.forecast.first().and_then(|day| day.chance_of_rain_pct)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    pub avg_temp: UnitPair,
    pub max_temp: UnitPair,
    pub min_temp: UnitPair,
    pub condition: Condition,
    pub chance_of_rain_pct: Option<f64>,
    pub hours: Vec<ForecastHour>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastHour {
    /// `YYYY-MM-DD HH:MM`.
    pub time: Option<String>,
    pub temperature: UnitPair,
    pub condition: Condition,
    pub chance_of_rain_pct: Option<f64>,
}
