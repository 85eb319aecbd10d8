use chrono::NaiveDate;

use crate::{
    model::{ForecastDay, UnitPair},
    render::{ElementId, ElementKind, RenderSink},
};

use super::{CardBase, Unit, WeatherCard, class, selector};

/// One day of the forecast, with min/max temperatures and a control for
/// expanding into that day's hourly cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDayCard {
    base: CardBase,
    min_temp: UnitPair,
    max_temp: UnitPair,
    slot: usize,
}

impl ForecastDayCard {
    /// `index` wraps modulo `forecast_len`; an empty forecast maps to slot 0.
    pub fn new(day: &ForecastDay, index: usize, forecast_len: usize) -> Self {
        Self {
            base: CardBase::new(
                day.date.clone().unwrap_or_default(),
                day.avg_temp,
                day.condition.icon.clone(),
            ),
            min_temp: day.min_temp,
            max_temp: day.max_temp,
            slot: slot_index(index, forecast_len),
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

pub fn slot_index(index: usize, forecast_len: usize) -> usize {
    index.checked_rem(forecast_len).unwrap_or(0)
}

impl WeatherCard for ForecastDayCard {
    fn base(&self) -> &CardBase {
        &self.base
    }

    /// Weekday name of the date, read at local midnight.
    fn formatted_time_measurement(&self) -> String {
        let raw = self.base.time_measurement();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.format("%A").to_string())
            .unwrap_or_else(|_| raw.to_string())
    }

    fn render(&self, sink: &mut dyn RenderSink, container: ElementId) -> ElementId {
        let card = self
            .base
            .render(sink, container, class::DAY_CARD, &self.formatted_time_measurement());
        sink.set_attribute(card, "data-index", &self.slot.to_string());

        let expand = sink.create_element(
            ElementKind::Button,
            Some("Display hourly forecast"),
            Some(class::DISPLAY_HOURLY),
        );
        sink.append(card, expand);

        let unit = Unit::temperature(self.base.units());
        let fields = [(self.min_temp, class::MIN_TEMP), (self.max_temp, class::MAX_TEMP)];
        for (pair, field_class) in fields {
            if let Some(text) = self.base.measurement_text(pair, unit) {
                let field =
                    sink.create_element(ElementKind::Paragraph, Some(&text), Some(field_class));
                sink.append(card, field);
            }
        }

        card
    }

    fn toggle_units(&mut self, sink: &mut dyn RenderSink, card: ElementId) {
        self.base.toggle_units(sink, card);
        let unit = Unit::temperature(self.base.units());

        self.update_measurement_label(sink, card, &selector(class::MIN_TEMP), self.min_temp, unit);
        self.update_measurement_label(sink, card, &selector(class::MAX_TEMP), self.max_temp, unit);
    }
}
