//! Competition results table

use super::clean_text;
use crate::etl::Transformer;
use crate::storage::{CsvRecord, SourceRow};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// One row of `results.csv` as scraped
///
/// `As`, `Nationality` and the trailing unnamed column are read but not
/// carried into the cleaned table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawResult {
    #[serde(rename = "Games", default)]
    pub games: Option<String>,
    #[serde(rename = "Event", default)]
    pub event: Option<String>,
    #[serde(rename = "Team", default)]
    pub team: Option<String>,
    #[serde(rename = "Pos", default)]
    pub position: Option<String>,
    #[serde(rename = "Medal", default)]
    pub medal: Option<String>,
    #[serde(rename = "As", default)]
    pub competed_as: Option<String>,
    pub athlete_id: u64,
    #[serde(rename = "NOC", default)]
    pub noc: Option<String>,
    #[serde(rename = "Discipline", default)]
    pub discipline: Option<String>,
    #[serde(rename = "Nationality", default)]
    pub nationality: Option<String>,
}

impl SourceRow for RawResult {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["athlete_id", "NOC", "Games", "Event"];

    fn athlete_id(&self) -> u64 {
        self.athlete_id
    }
}

/// One athlete-event participation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRecord {
    pub athlete_id: u64,
    /// Country the athlete competed for
    pub noc: Option<String>,
    pub games: Option<String>,
    pub event: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub medal: Option<String>,
    pub discipline: Option<String>,
}

impl ResultRecord {
    pub fn has_medal(&self) -> bool {
        self.medal.is_some()
    }
}

/// Column selection and trimming for results
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultCleaner;

impl Transformer for ResultCleaner {
    type Input = RawResult;
    type Output = ResultRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(ResultRecord {
            athlete_id: input.athlete_id,
            noc: clean_text(input.noc.as_deref()),
            games: clean_text(input.games.as_deref()),
            event: clean_text(input.event.as_deref()),
            team: clean_text(input.team.as_deref()),
            position: clean_text(input.position.as_deref()),
            medal: clean_text(input.medal.as_deref()),
            discipline: clean_text(input.discipline.as_deref()),
        })
    }
}

/// Output row of `results_new.csv`
#[derive(Debug, Serialize)]
pub struct ResultRow<'a> {
    pub athlete_id: u64,
    pub noc: Option<&'a str>,
    pub games: Option<&'a str>,
    pub event: Option<&'a str>,
    pub team: Option<&'a str>,
    pub position: Option<&'a str>,
    pub medal: Option<&'a str>,
    pub discipline: Option<&'a str>,
}

impl CsvRecord for ResultRecord {
    type Row<'a> = ResultRow<'a>;

    const HEADER: &'static [&'static str] = &[
        "athlete_id",
        "noc",
        "games",
        "event",
        "team",
        "position",
        "medal",
        "discipline",
    ];

    fn to_row(&self) -> ResultRow<'_> {
        ResultRow {
            athlete_id: self.athlete_id,
            noc: self.noc.as_deref(),
            games: self.games.as_deref(),
            event: self.event.as_deref(),
            team: self.team.as_deref(),
            position: self.position.as_deref(),
            medal: self.medal.as_deref(),
            discipline: self.discipline.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_result() {
        let raw = RawResult {
            games: Some("1912 Summer Olympics".to_string()),
            event: Some("Singles, Men (Olympic)".to_string()),
            team: Some(" ".to_string()),
            position: Some("=3".to_string()),
            medal: Some("Bronze".to_string()),
            competed_as: Some("Jean Blanchy".to_string()),
            athlete_id: 64,
            noc: Some(" FRA ".to_string()),
            discipline: Some("Tennis".to_string()),
            nationality: Some("France".to_string()),
        };

        let record = ResultCleaner.transform(raw).unwrap();
        assert_eq!(record.athlete_id, 64);
        assert_eq!(record.noc.as_deref(), Some("FRA"));
        assert_eq!(record.team, None);
        assert_eq!(record.position.as_deref(), Some("=3"));
        assert!(record.has_medal());
    }

    #[test]
    fn test_row_fields_follow_header_order() {
        let record = ResultRecord {
            athlete_id: 1,
            ..ResultRecord::default()
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(record.to_row()).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let header = output.lines().next().unwrap();
        assert_eq!(header, ResultRecord::HEADER.join(","));
    }
}
