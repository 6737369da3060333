//! Born/Died field parsing
//!
//! Both columns read `<date> in <place>`, e.g.
//! `4 April 1949 in Boulogne-Billancourt, Hauts-de-Seine (FRA)`. Either half
//! may be missing.

use super::date::{DateParser, HistoricalDate};
use super::place::{Place, PlaceParser};
use super::rules::Parsed;
use crate::config::DatesConfig;

/// A birth or death split into date and place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifeEvent {
    pub date: HistoricalDate,
    pub place: Place,
    /// Date text no rule accepted
    pub unparsed_date: Option<String>,
    /// Place text no rule accepted
    pub unparsed_place: Option<String>,
}

/// Parses Born/Died strings into a date and a place
#[derive(Debug, Clone, Default)]
pub struct LifeEventParser {
    dates: DateParser,
    places: PlaceParser,
}

impl LifeEventParser {
    pub fn new(config: &DatesConfig) -> Self {
        Self {
            dates: DateParser::new(&config.formats),
            places: PlaceParser::new(),
        }
    }

    pub fn parse(&self, raw: &str) -> LifeEvent {
        let (date_text, place_text) = split_date_and_place(raw);
        let mut event = LifeEvent::default();

        match self.dates.parse(date_text) {
            Parsed::Value(date) => event.date = date,
            Parsed::Unparseable => event.unparsed_date = Some(date_text.trim().to_string()),
        }

        match self.places.parse(place_text) {
            Parsed::Value(place) => event.place = place,
            Parsed::Unparseable => event.unparsed_place = Some(place_text.trim().to_string()),
        }

        event
    }
}

/// Split at the first ` in `; text starting with `in ` has no date part
fn split_date_and_place(raw: &str) -> (&str, &str) {
    let raw = raw.trim();
    if let Some(place) = raw.strip_prefix("in ") {
        return ("", place);
    }
    match raw.split_once(" in ") {
        Some((date, place)) => (date, place),
        None => (raw, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_full_born_string() {
        let event = LifeEventParser::default()
            .parse("4 April 1949 in Boulogne-Billancourt, Hauts-de-Seine (FRA)");
        assert_eq!(
            event.date,
            HistoricalDate::Full(NaiveDate::from_ymd_opt(1949, 4, 4).unwrap())
        );
        assert_eq!(event.place.city.as_deref(), Some("Boulogne-Billancourt"));
        assert_eq!(event.place.region.as_deref(), Some("Hauts-de-Seine"));
        assert_eq!(event.place.country.as_deref(), Some("FRA"));
        assert_eq!(event.unparsed_date, None);
        assert_eq!(event.unparsed_place, None);
    }

    #[test]
    fn test_unknown_city() {
        let event = LifeEventParser::default().parse("7 May 1983 in ? (KOR)");
        assert_eq!(event.place.city, None);
        assert_eq!(event.place.country.as_deref(), Some("KOR"));
    }

    #[test]
    fn test_date_only_and_place_only() {
        let parser = LifeEventParser::default();

        let date_only = parser.parse("c. 1929");
        assert_eq!(date_only.date, HistoricalDate::Circa(1929));
        assert!(date_only.place.is_empty());

        let place_only = parser.parse("in Paris (FRA)");
        assert_eq!(place_only.date, HistoricalDate::Unknown);
        assert_eq!(place_only.unparsed_date, None);
        assert_eq!(place_only.place.city.as_deref(), Some("Paris"));
    }

    #[test]
    fn test_unparseable_date_keeps_place() {
        let event = LifeEventParser::default().parse("1900 or 1901 in Berlin (GER)");
        assert_eq!(event.date, HistoricalDate::Unknown);
        assert_eq!(event.unparsed_date.as_deref(), Some("1900 or 1901"));
        assert_eq!(event.place.country.as_deref(), Some("GER"));
    }

    #[test]
    fn test_empty() {
        let event = LifeEventParser::default().parse("");
        assert_eq!(event, LifeEvent::default());
    }
}
