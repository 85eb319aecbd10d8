//! Lays out every card for one [`WeatherRecord`] and keeps them on the
//! same unit system.

use tracing::debug;

use crate::{
    card::{
        Card, CurrentConditionsCard, ForecastDayCard, HourlyForecastCard, WeatherCard,
        forecast_day::slot_index, selector,
    },
    model::{UnitSystem, WeatherRecord},
    render::{ElementId, ElementKind, RenderSink},
};

pub const CURRENT_CONTAINER: &str = "current-weather-container";
pub const FORECAST_CONTAINER: &str = "forecast-cards-container";

/// A card together with the root element it was rendered into.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard {
    pub card: Card,
    pub root: ElementId,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    cards: Vec<RenderedCard>,
    forecast_container: ElementId,
    units: UnitSystem,
}

impl Dashboard {
    /// Render the current-conditions card and one card per forecast day.
    pub fn render(record: &WeatherRecord, sink: &mut dyn RenderSink) -> Self {
        let current_container = container(sink, CURRENT_CONTAINER);
        let forecast_container = container(sink, FORECAST_CONTAINER);

        let mut dashboard = Self {
            cards: Vec::new(),
            forecast_container,
            units: UnitSystem::default(),
        };

        dashboard.push(sink, current_container, CurrentConditionsCard::from_record(record).into());

        let len = record.forecast.len();
        for (index, day) in record.forecast.iter().enumerate() {
            dashboard.push(sink, forecast_container, ForecastDayCard::new(day, index, len).into());
        }

        debug!(cards = dashboard.cards.len(), "dashboard rendered");
        dashboard
    }

    fn push(&mut self, sink: &mut dyn RenderSink, container: ElementId, mut card: Card) {
        let root = card.render(sink, container);
        if card.units() != self.units {
            card.toggle_units(sink, root);
        }
        self.cards.push(RenderedCard { card, root });
    }

    pub fn cards(&self) -> &[RenderedCard] {
        &self.cards
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Toggle every rendered card.
    pub fn toggle_units(&mut self, sink: &mut dyn RenderSink) {
        self.units = self.units.toggled();
        for rendered in &mut self.cards {
            rendered.card.toggle_units(sink, rendered.root);
        }
        debug!(units = ?self.units, "units toggled");
    }

    /// Append the hourly cards of the forecast day at `slot` (wrapping) to
    /// the forecast container. Returns how many cards were added.
    pub fn expand_hourly(
        &mut self,
        record: &WeatherRecord,
        slot: usize,
        sink: &mut dyn RenderSink,
    ) -> usize {
        let Some(day) = record.forecast.get(slot_index(slot, record.forecast.len())) else {
            return 0;
        };

        for hour in &day.hours {
            self.push(sink, self.forecast_container, HourlyForecastCard::new(hour).into());
        }

        debug!(slot, hours = day.hours.len(), "hourly forecast expanded");
        day.hours.len()
    }
}

fn container(sink: &mut dyn RenderSink, class: &str) -> ElementId {
    let body = sink.body();
    if let Some(existing) = sink.find(body, &selector(class)) {
        return existing;
    }
    let created = sink.create_element(ElementKind::Div, None, Some(class));
    sink.append(body, created);
    created
}
