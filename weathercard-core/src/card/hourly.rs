use chrono::NaiveDateTime;

use crate::{
    model::ForecastHour,
    render::{ElementId, RenderSink},
};

use super::{CardBase, WeatherCard, class};

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastCard {
    base: CardBase,
}

impl HourlyForecastCard {
    pub fn new(hour: &ForecastHour) -> Self {
        Self {
            base: CardBase::new(
                hour.time.clone().unwrap_or_default(),
                hour.temperature,
                hour.condition.icon.clone(),
            ),
        }
    }
}

impl WeatherCard for HourlyForecastCard {
    fn base(&self) -> &CardBase {
        &self.base
    }

    /// `2:30 PM`, no date.
    fn formatted_time_measurement(&self) -> String {
        let raw = self.base.time_measurement();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
            .map(|dt| dt.format("%-I:%M %p").to_string())
            .unwrap_or_else(|_| raw.to_string())
    }

    fn render(&self, sink: &mut dyn RenderSink, container: ElementId) -> ElementId {
        self.base
            .render(sink, container, class::HOURLY_CARD, &self.formatted_time_measurement())
    }

    fn toggle_units(&mut self, sink: &mut dyn RenderSink, card: ElementId) {
        self.base.toggle_units(sink, card);
    }
}
