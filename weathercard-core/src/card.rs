//! Weather cards: one time-scoped snapshot each, toggling between
//! imperial and metric display.
//!
//! A card owns only its data and its [`UnitSystem`]. Rendering projects
//! that state into a [`RenderSink`]; toggling flips the unit system and
//! re-projects every paired measurement into the already-rendered fields.

use tracing::debug;

use crate::{
    model::{UnitPair, UnitSystem},
    render::{ElementId, ElementKind, RenderSink},
};

pub mod current;
pub mod forecast_day;
pub mod hourly;

pub use current::CurrentConditionsCard;
pub use forecast_day::ForecastDayCard;
pub use hourly::HourlyForecastCard;

/// Class names shared between rendering and label updates.
pub mod class {
    pub const CURRENT_CARD: &str = "current-weather-card";
    pub const DAY_CARD: &str = "day-weather-card";
    pub const HOURLY_CARD: &str = "hourly-weather-card";

    pub const MAIN_INFO: &str = "main-info";
    pub const WEATHER_CONDITIONS: &str = "weather-conditions";

    pub const TEMP: &str = "temp";
    pub const FEELS_LIKE: &str = "feels-like";
    pub const HUMIDITY: &str = "humidity";
    pub const CHANCE_OF_RAIN: &str = "chance-of-rain";
    pub const WIND_SPEED: &str = "wind-speed";
    pub const MIN_TEMP: &str = "min-temp";
    pub const MAX_TEMP: &str = "max-temp";
    pub const LOCATION: &str = "location";
    pub const CONDITIONS: &str = "conditions";

    pub const UNIT_TOGGLE: &str = "unit-toggle";
    pub const DISPLAY_HOURLY: &str = "display-hourly-forecast";
}

/// Selector for a class name.
pub fn selector(class: &str) -> String {
    format!(".{class}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Fahrenheit,
    Celsius,
    Percent,
    Miles,
    Kilometers,
}

impl Unit {
    /// Temperature unit for a unit system.
    pub fn temperature(units: UnitSystem) -> Self {
        match units {
            UnitSystem::Imperial => Unit::Fahrenheit,
            UnitSystem::Metric => Unit::Celsius,
        }
    }

    /// Speed unit for a unit system.
    pub fn speed(units: UnitSystem) -> Self {
        match units {
            UnitSystem::Imperial => Unit::Miles,
            UnitSystem::Metric => Unit::Kilometers,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Fahrenheit => "°F",
            Unit::Celsius => "°C",
            Unit::Percent => "%",
            Unit::Miles => " mi",
            Unit::Kilometers => " km",
        }
    }
}

/// `value + suffix`, or `None` when there is nothing to show.
pub fn format_measurement(value: Option<f64>, unit: Unit) -> Option<String> {
    value.map(|v| format!("{v}{}", unit.suffix()))
}

/// State every card variant shares.
#[derive(Debug, Clone, PartialEq)]
pub struct CardBase {
    time_measurement: String,
    temperature: UnitPair,
    icon: Option<String>,
    units: UnitSystem,
}

/// Elements produced by [`CardBase::build_elements`], not yet attached.
#[derive(Debug, Clone, Copy)]
pub struct BaseElements {
    pub time: ElementId,
    pub temp: Option<ElementId>,
    pub icon: ElementId,
}

impl CardBase {
    pub fn new(
        time_measurement: impl Into<String>,
        temperature: UnitPair,
        icon: Option<String>,
    ) -> Self {
        Self {
            time_measurement: time_measurement.into(),
            temperature,
            icon,
            units: UnitSystem::default(),
        }
    }

    pub fn time_measurement(&self) -> &str {
        &self.time_measurement
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn is_imperial(&self) -> bool {
        self.units.is_imperial()
    }

    /// Text for a paired measurement in the current unit system.
    pub fn measurement_text(&self, pair: UnitPair, unit: Unit) -> Option<String> {
        format_measurement(pair.select(self.units), unit)
    }

    /// Create the time label, primary temperature and icon elements.
    /// The temperature is skipped when its value is absent.
    pub fn build_elements(&self, sink: &mut dyn RenderSink, time_label: &str) -> BaseElements {
        let time = sink.create_element(ElementKind::Paragraph, Some(time_label), None);

        let temp = self
            .measurement_text(self.temperature, Unit::temperature(self.units))
            .map(|text| {
                sink.create_element(ElementKind::Paragraph, Some(&text), Some(class::TEMP))
            });
        if temp.is_none() {
            debug!(time = %self.time_measurement, "no primary temperature, omitting field");
        }

        let icon = sink.create_element(ElementKind::Image, None, None);
        if let Some(src) = &self.icon {
            sink.set_attribute(icon, "src", src);
        }

        BaseElements { time, temp, icon }
    }

    /// Shared skeleton: a `div.<card_class>` holding time, temperature and
    /// icon, appended to `container`.
    pub fn render(
        &self,
        sink: &mut dyn RenderSink,
        container: ElementId,
        card_class: &str,
        time_label: &str,
    ) -> ElementId {
        let card = sink.create_element(ElementKind::Div, None, Some(card_class));
        sink.append(container, card);

        let elements = self.build_elements(sink, time_label);
        sink.append(card, elements.time);
        if let Some(temp) = elements.temp {
            sink.append(card, temp);
        }
        sink.append(card, elements.icon);

        card
    }

    /// Flip the unit system and rewrite the primary temperature.
    pub fn toggle_units(&mut self, sink: &mut dyn RenderSink, card: ElementId) {
        self.units = self.units.toggled();
        self.update_measurement_label(
            sink,
            card,
            &selector(class::TEMP),
            self.temperature,
            Unit::temperature(self.units),
        );
    }

    /// Rewrite the field under `card` matching `selector` with the value for
    /// the current unit system. Cards without that field are left alone; an
    /// absent value clears the text.
    pub fn update_measurement_label(
        &self,
        sink: &mut dyn RenderSink,
        card: ElementId,
        selector: &str,
        pair: UnitPair,
        unit: Unit,
    ) {
        if let Some(element) = sink.find(card, selector) {
            let text = self.measurement_text(pair, unit).unwrap_or_default();
            sink.set_text(element, &text);
        }
    }
}

/// Operations every card variant supports.
pub trait WeatherCard {
    fn base(&self) -> &CardBase;

    /// Human-readable time label. Falls back to the raw value.
    fn formatted_time_measurement(&self) -> String {
        self.base().time_measurement().to_string()
    }

    /// Build the card under `container` and return its root element.
    fn render(&self, sink: &mut dyn RenderSink, container: ElementId) -> ElementId;

    /// Switch units and rewrite every paired measurement under `card`.
    fn toggle_units(&mut self, sink: &mut dyn RenderSink, card: ElementId);

    /// See [`CardBase::update_measurement_label`].
    fn update_measurement_label(
        &self,
        sink: &mut dyn RenderSink,
        card: ElementId,
        selector: &str,
        pair: UnitPair,
        unit: Unit,
    ) {
        self.base().update_measurement_label(sink, card, selector, pair, unit);
    }

    fn units(&self) -> UnitSystem {
        self.base().units()
    }

    fn is_imperial(&self) -> bool {
        self.base().is_imperial()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Current(CurrentConditionsCard),
    ForecastDay(ForecastDayCard),
    Hourly(HourlyForecastCard),
}

impl WeatherCard for Card {
    fn base(&self) -> &CardBase {
        match self {
            Card::Current(card) => card.base(),
            Card::ForecastDay(card) => card.base(),
            Card::Hourly(card) => card.base(),
        }
    }

    fn formatted_time_measurement(&self) -> String {
        match self {
            Card::Current(card) => card.formatted_time_measurement(),
            Card::ForecastDay(card) => card.formatted_time_measurement(),
            Card::Hourly(card) => card.formatted_time_measurement(),
        }
    }

    fn render(&self, sink: &mut dyn RenderSink, container: ElementId) -> ElementId {
        match self {
            Card::Current(card) => card.render(sink, container),
            Card::ForecastDay(card) => card.render(sink, container),
            Card::Hourly(card) => card.render(sink, container),
        }
    }

    fn toggle_units(&mut self, sink: &mut dyn RenderSink, card: ElementId) {
        match self {
            Card::Current(c) => c.toggle_units(sink, card),
            Card::ForecastDay(c) => c.toggle_units(sink, card),
            Card::Hourly(c) => c.toggle_units(sink, card),
        }
    }
}

impl From<CurrentConditionsCard> for Card {
    fn from(card: CurrentConditionsCard) -> Self {
        Card::Current(card)
    }
}

impl From<ForecastDayCard> for Card {
    fn from(card: ForecastDayCard) -> Self {
        Card::ForecastDay(card)
    }
}

impl From<HourlyForecastCard> for Card {
    fn from(card: HourlyForecastCard) -> Self {
        Card::Hourly(card)
    }
}
