//! Height and weight extraction
//!
//! The source column reads `183 cm / 76 kg`, `183 cm`, `76 kg`, and
//! occasionally carries scraping artifacts such as `74,` or ranges such as
//! `63-66 kg`. Only complete numbers inside the configured plausible range
//! are kept.

use super::rules::{Parsed, Rule, RuleSet};
use crate::config::{MeasurementsConfig, Range};
use crate::error::FieldKind;
use serde::Serialize;

/// Parsed height and weight, each absent when missing or unusable
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Measurements {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Result of parsing one measurements string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementReading {
    pub measurements: Measurements,
    /// Components that were present but could not be used
    pub unparsed: Vec<(FieldKind, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Centimetres,
    Kilograms,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Component {
    unit: Option<Unit>,
    value: Parsed<f64>,
}

/// Parses measurements against plausible ranges
///
/// # Example
/// ```
/// use olympics_cleaner::config::MeasurementsConfig;
/// use olympics_cleaner::transform::MeasurementParser;
///
/// let parser = MeasurementParser::new(&MeasurementsConfig::default());
/// let reading = parser.parse("310 cm / 75 kg");
/// assert_eq!(reading.measurements.height_cm, None);
/// assert_eq!(reading.measurements.weight_kg, Some(75.0));
/// ```
#[derive(Debug, Clone)]
pub struct MeasurementParser {
    height: Range,
    weight: Range,
    components: RuleSet<Component>,
}

impl MeasurementParser {
    pub fn new(config: &MeasurementsConfig) -> Self {
        Self {
            height: config.height_cm,
            weight: config.weight_kg,
            components: RuleSet::new(vec![
                Rule::new("centimetres", centimetres),
                Rule::new("kilograms", kilograms),
                Rule::new("bare", bare),
            ]),
        }
    }

    pub fn parse(&self, raw: &str) -> MeasurementReading {
        let mut reading = MeasurementReading::default();

        for (position, text) in raw.split('/').map(str::trim).enumerate() {
            if text.is_empty() {
                continue;
            }
            let Parsed::Value(component) = self.components.apply(text) else {
                continue;
            };

            let kind = match component.unit {
                Some(Unit::Centimetres) => FieldKind::Height,
                Some(Unit::Kilograms) => FieldKind::Weight,
                None if position == 0 => FieldKind::Height,
                None if position == 1 => FieldKind::Weight,
                None => {
                    reading.unparsed.push((FieldKind::Weight, text.to_string()));
                    continue;
                }
            };
            let range = match kind {
                FieldKind::Height => self.height,
                _ => self.weight,
            };

            match component.value {
                Parsed::Value(value) if range.contains(value) => match kind {
                    FieldKind::Height => reading.measurements.height_cm = Some(value),
                    _ => reading.measurements.weight_kg = Some(value),
                },
                _ => reading.unparsed.push((kind, text.to_string())),
            }
        }

        reading
    }
}

impl Default for MeasurementParser {
    fn default() -> Self {
        Self::new(&MeasurementsConfig::default())
    }
}

fn number(token: &str) -> Parsed<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .into()
}

fn with_unit(text: &str, suffix: &str, unit: Unit) -> Parsed<Component> {
    let lower = text.to_lowercase();
    match lower.strip_suffix(suffix) {
        Some(number_text) => Parsed::Value(Component {
            unit: Some(unit),
            value: number(number_text.trim()),
        }),
        None => Parsed::Unparseable,
    }
}

fn centimetres(text: &str) -> Parsed<Component> {
    with_unit(text, "cm", Unit::Centimetres)
}

fn kilograms(text: &str) -> Parsed<Component> {
    with_unit(text, "kg", Unit::Kilograms)
}

fn bare(text: &str) -> Parsed<Component> {
    Parsed::Value(Component {
        unit: None,
        value: number(text),
    })
}
