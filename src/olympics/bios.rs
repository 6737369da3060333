//! Athlete biographies table

use super::clean_text;
use crate::config::CleaningConfig;
use crate::error::{FieldKind, FieldParseError};
use crate::etl::Transformer;
use crate::storage::{CsvRecord, SourceRow};
use crate::transform::{
    HistoricalDate, LifeEvent, LifeEventParser, MeasurementParser, Measurements, NameParser,
    Parsed, Place, RoleFilter,
};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// One row of `bios.csv` as scraped
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawBiography {
    #[serde(rename = "Roles", default)]
    pub roles: Option<String>,
    #[serde(rename = "Sex", default)]
    pub sex: Option<String>,
    #[serde(rename = "Full name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Used name", default)]
    pub used_name: Option<String>,
    #[serde(rename = "Born", default)]
    pub born: Option<String>,
    #[serde(rename = "Died", default)]
    pub died: Option<String>,
    #[serde(rename = "NOC", default)]
    pub noc: Option<String>,
    pub athlete_id: u64,
    #[serde(rename = "Measurements", default)]
    pub measurements: Option<String>,
    #[serde(rename = "Affiliations", default)]
    pub affiliations: Option<String>,
    #[serde(rename = "Nick/petnames", default)]
    pub nicknames: Option<String>,
    #[serde(rename = "Title(s)", default)]
    pub titles: Option<String>,
    #[serde(rename = "Other names", default)]
    pub other_names: Option<String>,
    #[serde(rename = "Nationality", default)]
    pub nationality: Option<String>,
    #[serde(rename = "Original name", default)]
    pub original_name: Option<String>,
    #[serde(rename = "Name order", default)]
    pub name_order: Option<String>,
}

impl SourceRow for RawBiography {
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "athlete_id",
        "Roles",
        "Used name",
        "Born",
        "Died",
        "Measurements",
    ];
    const UNIQUE_IDS: bool = true;

    fn athlete_id(&self) -> u64 {
        self.athlete_id
    }
}

/// A biography with its derived columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiographyRecord {
    pub athlete_id: u64,
    pub raw: RawBiography,
    pub name: Option<String>,
    pub alternate_names: Vec<String>,
    pub has_title: bool,
    pub title: Option<String>,
    pub born: LifeEvent,
    pub died: LifeEvent,
    pub measurements: Measurements,
    pub additional_roles: Option<String>,
    /// Fields that were present but could not be parsed
    pub issues: Vec<FieldParseError>,
}

impl BiographyRecord {
    pub fn roles(&self) -> Option<&str> {
        self.raw.roles.as_deref()
    }

    pub fn sex(&self) -> Option<&str> {
        self.raw.sex.as_deref().map(str::trim)
    }

    pub fn is_female(&self) -> bool {
        self.sex().is_some_and(|s| s.eq_ignore_ascii_case("female"))
    }

    pub fn born_date(&self) -> HistoricalDate {
        self.born.date
    }

    pub fn born_place(&self) -> &Place {
        &self.born.place
    }

    pub fn birth_country(&self) -> Option<&str> {
        self.born.place.country.as_deref()
    }
}

/// Field extractor turning raw biographies into cleaned records
///
/// Never fails on field content: unparseable fields are left missing and
/// recorded in [`BiographyRecord::issues`].
#[derive(Debug, Clone)]
pub struct BiographyCleaner {
    names: NameParser,
    life_events: LifeEventParser,
    measurements: MeasurementParser,
    roles: RoleFilter,
}

impl BiographyCleaner {
    pub fn new(config: &CleaningConfig) -> Self {
        Self {
            names: NameParser::new(),
            life_events: LifeEventParser::new(&config.dates),
            measurements: MeasurementParser::new(&config.measurements),
            roles: RoleFilter::new(&config.roles),
        }
    }

    fn life_event(
        &self,
        raw: Option<&str>,
        date_kind: FieldKind,
        place_kind: FieldKind,
        issues: &mut Vec<FieldParseError>,
    ) -> LifeEvent {
        let event = self.life_events.parse(raw.unwrap_or_default());
        if let Some(text) = &event.unparsed_date {
            issues.push(FieldParseError::new(date_kind, text.as_str()));
        }
        if let Some(text) = &event.unparsed_place {
            issues.push(FieldParseError::new(place_kind, text.as_str()));
        }
        event
    }
}

impl Default for BiographyCleaner {
    fn default() -> Self {
        Self::new(&CleaningConfig::default())
    }
}

impl Transformer for BiographyCleaner {
    type Input = RawBiography;
    type Output = BiographyRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let mut issues = Vec::new();

        let raw_name = input.used_name.as_deref().unwrap_or_default();
        let name = match self.names.parse(raw_name) {
            Parsed::Value(parts) => Some(parts),
            Parsed::Unparseable => {
                if !raw_name.trim().is_empty() {
                    issues.push(FieldParseError::new(FieldKind::Name, raw_name));
                }
                None
            }
        };

        let source_title = clean_text(input.titles.as_deref());
        let annotated_title = name.as_ref().and_then(|n| n.title.clone());
        let has_title = source_title.is_some() || name.as_ref().is_some_and(|n| n.has_title);

        let born = self.life_event(
            input.born.as_deref(),
            FieldKind::BornDate,
            FieldKind::BornPlace,
            &mut issues,
        );
        let died = self.life_event(
            input.died.as_deref(),
            FieldKind::DiedDate,
            FieldKind::DiedPlace,
            &mut issues,
        );

        let reading = self
            .measurements
            .parse(input.measurements.as_deref().unwrap_or_default());
        issues.extend(
            reading
                .unparsed
                .into_iter()
                .map(|(kind, text)| FieldParseError::new(kind, text)),
        );

        let additional_roles = input
            .roles
            .as_deref()
            .and_then(|roles| self.roles.additional_roles(roles));

        for issue in &issues {
            log::debug!("athlete {}: {}", input.athlete_id, issue);
        }

        Ok(BiographyRecord {
            athlete_id: input.athlete_id,
            alternate_names: name
                .as_ref()
                .map(|n| n.alternate_names.clone())
                .unwrap_or_default(),
            name: name.map(|n| n.display),
            has_title,
            title: source_title.or(annotated_title),
            born,
            died,
            measurements: reading.measurements,
            additional_roles,
            issues,
            raw: input,
        })
    }
}

/// Output row of `bios_new.csv`
#[derive(Debug, Serialize)]
pub struct BiographyRow<'a> {
    pub athlete_id: u64,
    pub sex: Option<&'a str>,
    pub name: Option<&'a str>,
    pub has_title: bool,
    pub title: Option<&'a str>,
    pub born_date: Option<String>,
    pub born_city: Option<&'a str>,
    pub born_region: Option<&'a str>,
    pub born_country: Option<&'a str>,
    pub noc: Option<&'a str>,
    pub nationality: Option<&'a str>,
    pub died_date: Option<String>,
    pub died_city: Option<&'a str>,
    pub died_region: Option<&'a str>,
    pub died_country: Option<&'a str>,
    pub height_cm: Option<String>,
    pub weight_kg: Option<String>,
    pub additional_roles: Option<&'a str>,
    pub affiliations: Option<&'a str>,
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CsvRecord for BiographyRecord {
    type Row<'a> = BiographyRow<'a>;

    const HEADER: &'static [&'static str] = &[
        "athlete_id",
        "sex",
        "name",
        "has_title",
        "title",
        "born_date",
        "born_city",
        "born_region",
        "born_country",
        "noc",
        "nationality",
        "died_date",
        "died_city",
        "died_region",
        "died_country",
        "height_cm",
        "weight_kg",
        "additional_roles",
        "affiliations",
    ];

    fn to_row(&self) -> BiographyRow<'_> {
        BiographyRow {
            athlete_id: self.athlete_id,
            sex: trimmed(&self.raw.sex),
            name: self.name.as_deref(),
            has_title: self.has_title,
            title: self.title.as_deref(),
            born_date: self.born.date.canonical(),
            born_city: self.born.place.city.as_deref(),
            born_region: self.born.place.region.as_deref(),
            born_country: self.born.place.country.as_deref(),
            noc: trimmed(&self.raw.noc),
            nationality: trimmed(&self.raw.nationality),
            died_date: self.died.date.canonical(),
            died_city: self.died.place.city.as_deref(),
            died_region: self.died.place.region.as_deref(),
            died_country: self.died.place.country.as_deref(),
            height_cm: self.measurements.height_cm.map(|v| v.to_string()),
            weight_kg: self.measurements.weight_kg.map(|v| v.to_string()),
            additional_roles: self.additional_roles.as_deref(),
            affiliations: trimmed(&self.raw.affiliations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(id: u64) -> RawBiography {
        RawBiography {
            athlete_id: id,
            roles: Some("Competed in Olympic Games • Referee".to_string()),
            sex: Some("Male".to_string()),
            used_name: Some("Jean-François•Blanchy".to_string()),
            born: Some("12 December 1886 in Bordeaux, Gironde (FRA)".to_string()),
            died: Some("2 October 1960 in Saint-Sébastien-de-Morsent, Eure (FRA)".to_string()),
            noc: Some("France".to_string()),
            measurements: Some("180 cm / 75 kg".to_string()),
            ..RawBiography::default()
        }
    }

    #[test]
    fn test_clean_full_record() {
        let record = BiographyCleaner::default().transform(raw(1)).unwrap();

        assert_eq!(record.name.as_deref(), Some("Jean-François Blanchy"));
        assert!(!record.has_title);
        assert_eq!(
            record.born_date(),
            HistoricalDate::Full(NaiveDate::from_ymd_opt(1886, 12, 12).unwrap())
        );
        assert_eq!(record.born_place().city.as_deref(), Some("Bordeaux"));
        assert_eq!(record.birth_country(), Some("FRA"));
        assert_eq!(record.died.place.region.as_deref(), Some("Eure"));
        assert_eq!(record.measurements.height_cm, Some(180.0));
        assert_eq!(record.measurements.weight_kg, Some(75.0));
        assert_eq!(record.additional_roles.as_deref(), Some("Referee"));
        assert!(record.issues.is_empty());
        assert_eq!(record.roles(), Some("Competed in Olympic Games • Referee"));
    }

    #[test]
    fn test_title_from_column_or_annotation() {
        let cleaner = BiographyCleaner::default();

        let mut annotated = raw(2);
        annotated.used_name = Some("John Smith [Sir]".to_string());
        let record = cleaner.transform(annotated).unwrap();
        assert_eq!(record.name.as_deref(), Some("John Smith"));
        assert!(record.has_title);
        assert_eq!(record.title.as_deref(), Some("Sir"));

        let mut titled = raw(3);
        titled.titles = Some("Olympic Order".to_string());
        let record = cleaner.transform(titled).unwrap();
        assert!(record.has_title);
        assert_eq!(record.title.as_deref(), Some("Olympic Order"));
    }

    #[test]
    fn test_bad_fields_do_not_abort_record() {
        let mut messy = raw(4);
        messy.born = Some("1900 or 1901 in ?".to_string());
        messy.measurements = Some("74,".to_string());
        messy.used_name = None;

        let record = BiographyCleaner::default().transform(messy).unwrap();
        assert_eq!(record.born_date(), HistoricalDate::Unknown);
        assert!(record.born_place().is_empty());
        assert_eq!(record.measurements, Measurements::default());
        assert_eq!(record.name, None);

        let kinds: Vec<FieldKind> = record.issues.iter().map(|i| i.field).collect();
        assert_eq!(
            kinds,
            vec![FieldKind::BornDate, FieldKind::BornPlace, FieldKind::Height]
        );
    }

    #[test]
    fn test_row_fields_follow_header_order() {
        let record = BiographyCleaner::default().transform(raw(5)).unwrap();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(record.to_row()).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), BiographyRecord::HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "5,Male,Jean-François Blanchy,false,,1886-12-12,Bordeaux,Gironde,FRA,France,,\
             1960-10-02,Saint-Sébastien-de-Morsent,Eure,FRA,180,75,Referee,"
        );
    }

    #[test]
    fn test_is_female() {
        let mut record = BiographyRecord::default();
        assert!(!record.is_female());
        record.raw.sex = Some(" Female ".to_string());
        assert!(record.is_female());
    }
}
