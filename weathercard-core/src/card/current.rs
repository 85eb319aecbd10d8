use chrono::NaiveDateTime;

use crate::{
    model::{UnitPair, UnitSystem, WeatherRecord},
    render::{ElementId, ElementKind, RenderSink},
};

use super::{CardBase, Unit, WeatherCard, class, format_measurement, selector};

/// Today's conditions: location, condition text, feels-like, humidity,
/// chance of rain and wind speed on top of the shared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditionsCard {
    base: CardBase,
    location: Option<String>,
    condition_text: Option<String>,
    feels_like: UnitPair,
    humidity_pct: Option<f64>,
    chance_of_rain_pct: Option<f64>,
    wind_speed: UnitPair,
}

impl CurrentConditionsCard {
    pub fn from_record(record: &WeatherRecord) -> Self {
        Self {
            base: CardBase::new(
                record.local_time.clone().unwrap_or_default(),
                record.temperature,
                record.condition.icon.clone(),
            ),
            location: record.location.clone(),
            condition_text: record.condition.text.clone(),
            feels_like: record.feels_like,
            humidity_pct: record.humidity_pct,
            chance_of_rain_pct: record.chance_of_rain(),
            wind_speed: record.wind_speed,
        }
    }

    fn main_info(&self, sink: &mut dyn RenderSink) -> ElementId {
        let main_info = sink.create_element(ElementKind::Div, None, Some(class::MAIN_INFO));
        let base = self.base.build_elements(sink, &self.formatted_time_measurement());

        let location = sink.create_element(
            ElementKind::Paragraph,
            Some(self.location.as_deref().unwrap_or_default()),
            Some(class::LOCATION),
        );
        let toggle = sink.create_element(
            ElementKind::Button,
            Some(&toggle_label(self.base.units())),
            Some(class::UNIT_TOGGLE),
        );
        let condition = sink.create_element(
            ElementKind::Paragraph,
            Some(self.condition_text.as_deref().unwrap_or_default()),
            Some(class::CONDITIONS),
        );

        sink.append(main_info, base.time);
        sink.append(main_info, location);
        sink.append(main_info, toggle);
        sink.append(main_info, condition);
        if let Some(temp) = base.temp {
            sink.append(main_info, temp);
        }
        sink.append(main_info, base.icon);

        main_info
    }

    fn weather_conditions(&self, sink: &mut dyn RenderSink) -> ElementId {
        let units = self.base.units();
        let conditions =
            sink.create_element(ElementKind::Div, None, Some(class::WEATHER_CONDITIONS));

        let fields = [
            (
                self.base.measurement_text(self.feels_like, Unit::temperature(units)),
                class::FEELS_LIKE,
            ),
            (format_measurement(self.humidity_pct, Unit::Percent), class::HUMIDITY),
            (format_measurement(self.chance_of_rain_pct, Unit::Percent), class::CHANCE_OF_RAIN),
            (self.base.measurement_text(self.wind_speed, Unit::speed(units)), class::WIND_SPEED),
        ];

        for (text, field_class) in fields {
            if let Some(text) = text {
                let field =
                    sink.create_element(ElementKind::Paragraph, Some(&text), Some(field_class));
                sink.append(conditions, field);
            }
        }

        conditions
    }
}

/// The toggle advertises the unit it would switch to.
pub fn toggle_label(units: UnitSystem) -> String {
    let target = Unit::temperature(units.toggled());
    format!("Display {}", target.suffix())
}

impl WeatherCard for CurrentConditionsCard {
    fn base(&self) -> &CardBase {
        &self.base
    }

    /// `March 5, 2024 2:30 PM`.
    fn formatted_time_measurement(&self) -> String {
        let raw = self.base.time_measurement();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
            .map(|dt| dt.format("%B %-d, %Y %-I:%M %p").to_string())
            .unwrap_or_else(|_| raw.to_string())
    }

    fn render(&self, sink: &mut dyn RenderSink, container: ElementId) -> ElementId {
        let card = sink.create_element(ElementKind::Div, None, Some(class::CURRENT_CARD));
        sink.append(container, card);

        let main_info = self.main_info(sink);
        let conditions = self.weather_conditions(sink);
        sink.append(card, main_info);
        sink.append(card, conditions);

        card
    }

    fn toggle_units(&mut self, sink: &mut dyn RenderSink, card: ElementId) {
        self.base.toggle_units(sink, card);
        let units = self.base.units();

        self.update_measurement_label(
            sink,
            card,
            &selector(class::FEELS_LIKE),
            self.feels_like,
            Unit::temperature(units),
        );
        self.update_measurement_label(
            sink,
            card,
            &selector(class::WIND_SPEED),
            self.wind_speed,
            Unit::speed(units),
        );

        if let Some(toggle) = sink.find(card, &selector(class::UNIT_TOGGLE)) {
            sink.set_text(toggle, &toggle_label(units));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ForecastDay};
    use crate::render::ElementTree;

    fn record() -> WeatherRecord {
        WeatherRecord {
            location: Some("San Jose".into()),
            local_time: Some("2024-03-05 14:30".into()),
            temperature: UnitPair::new(Some(59.0), Some(15.0)),
            feels_like: UnitPair::new(Some(57.6), Some(14.2)),
            condition: Condition {
                text: Some("Partly cloudy".into()),
                icon: Some("//cdn/116.png".into()),
            },
            wind_speed: UnitPair::new(Some(6.9), Some(11.2)),
            humidity_pct: Some(67.0),
            forecast: vec![ForecastDay { chance_of_rain_pct: Some(40.0), ..Default::default() }],
            ..Default::default()
        }
    }

    fn text_of(tree: &ElementTree, card: ElementId, class: &str) -> String {
        let el = tree.find(card, &selector(class)).expect("field rendered");
        tree.text(el).to_string()
    }

    #[test]
    fn formats_full_timestamp_on_twelve_hour_clock() {
        let card = CurrentConditionsCard::from_record(&record());
        assert_eq!(card.formatted_time_measurement(), "March 5, 2024 2:30 PM");
    }

    #[test]
    fn accepts_unpadded_hour() {
        let mut rec = record();
        rec.local_time = Some("2024-01-15 9:05".into());
        let card = CurrentConditionsCard::from_record(&rec);
        assert_eq!(card.formatted_time_measurement(), "January 15, 2024 9:05 AM");
    }

    #[test]
    fn unparseable_timestamp_is_returned_raw() {
        let mut rec = record();
        rec.local_time = Some("yesterday".into());
        let card = CurrentConditionsCard::from_record(&rec);
        assert_eq!(card.formatted_time_measurement(), "yesterday");
    }

    #[test]
    fn render_splits_main_info_and_conditions() {
        let mut tree = ElementTree::new();
        let body = tree.body();
        let card = CurrentConditionsCard::from_record(&record());
        let root = card.render(&mut tree, body);

        assert!(tree.has_class(root, class::CURRENT_CARD));
        let sections = tree.children(root);
        assert_eq!(sections.len(), 2);
        assert!(tree.has_class(sections[0], class::MAIN_INFO));
        assert!(tree.has_class(sections[1], class::WEATHER_CONDITIONS));

        let main: Vec<String> =
            tree.children(sections[0]).iter().map(|&id| tree.text(id).to_string()).collect();
        assert_eq!(
            main,
            vec!["March 5, 2024 2:30 PM", "San Jose", "Display °C", "Partly cloudy", "59°F", ""]
        );

        assert_eq!(text_of(&tree, root, class::FEELS_LIKE), "57.6°F");
        assert_eq!(text_of(&tree, root, class::HUMIDITY), "67%");
        assert_eq!(text_of(&tree, root, class::CHANCE_OF_RAIN), "40%");
        assert_eq!(text_of(&tree, root, class::WIND_SPEED), "6.9 mi");
    }

    #[test]
    fn toggle_switches_every_paired_field_and_button() {
        let mut tree = ElementTree::new();
        let body = tree.body();
        let mut card = CurrentConditionsCard::from_record(&record());
        let root = card.render(&mut tree, body);

        assert_eq!(text_of(&tree, root, class::UNIT_TOGGLE), "Display °C");

        card.toggle_units(&mut tree, root);

        assert!(!card.is_imperial());
        assert_eq!(text_of(&tree, root, class::UNIT_TOGGLE), "Display °F");
        assert_eq!(text_of(&tree, root, class::TEMP), "15°C");
        assert_eq!(text_of(&tree, root, class::FEELS_LIKE), "14.2°C");
        assert_eq!(text_of(&tree, root, class::WIND_SPEED), "11.2 km");
        assert_eq!(text_of(&tree, root, class::HUMIDITY), "67%");
    }

    #[test]
    fn double_toggle_restores_original_text() {
        let mut tree = ElementTree::new();
        let body = tree.body();
        let mut card = CurrentConditionsCard::from_record(&record());
        let root = card.render(&mut tree, body);
        let before = tree.to_html();

        card.toggle_units(&mut tree, root);
        assert_ne!(tree.to_html(), before);
        card.toggle_units(&mut tree, root);

        assert_eq!(tree.to_html(), before);
        assert!(card.is_imperial());
    }

    #[test]
    fn absent_conditions_are_omitted() {
        let mut rec = record();
        rec.feels_like = UnitPair::default();
        rec.humidity_pct = None;
        rec.forecast.clear();

        let mut tree = ElementTree::new();
        let body = tree.body();
        let card = CurrentConditionsCard::from_record(&rec);
        let root = card.render(&mut tree, body);

        assert_eq!(tree.find(root, ".feels-like"), None);
        assert_eq!(tree.find(root, ".humidity"), None);
        assert_eq!(tree.find(root, ".chance-of-rain"), None);
        assert_eq!(text_of(&tree, root, class::WIND_SPEED), "6.9 mi");
    }
}
