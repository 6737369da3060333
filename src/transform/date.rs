//! Historical date parsing
//!
//! Olympedia dates come in several textual shapes: `4 April 1949`,
//! `April 1949`, `c. 1929`, `1949`, sometimes wrapped in parentheses. Each
//! shape is a named rule; anything no rule accepts becomes
//! [`HistoricalDate::Unknown`].

use super::rules::{Parsed, Rule, RuleSet, squash_whitespace};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static DAY_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\.?\s+(\d{3,4})$").unwrap());
static MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\.?\s+(\d{3,4})$").unwrap());
static CIRCA_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:c\.|ca\.|circa)\s*(\d{3,4})$").unwrap());
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})$").unwrap());
static ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})(?:-(\d{2}))?$").unwrap());

/// A date as precise as the source allows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoricalDate {
    Full(NaiveDate),
    MonthYear { year: i32, month: u32 },
    Year(i32),
    Circa(i32),
    #[default]
    Unknown,
}

impl HistoricalDate {
    pub fn is_known(&self) -> bool {
        !matches!(self, HistoricalDate::Unknown)
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            HistoricalDate::Full(date) => Some(date.year()),
            HistoricalDate::MonthYear { year, .. }
            | HistoricalDate::Year(year)
            | HistoricalDate::Circa(year) => Some(*year),
            HistoricalDate::Unknown => None,
        }
    }

    /// How much of the date is known
    pub fn precision(&self) -> &'static str {
        match self {
            HistoricalDate::Full(_) => "day",
            HistoricalDate::MonthYear { .. } => "month",
            HistoricalDate::Year(_) => "year",
            HistoricalDate::Circa(_) => "circa",
            HistoricalDate::Unknown => "unknown",
        }
    }

    /// Canonical text form, `None` for unknown dates
    pub fn canonical(&self) -> Option<String> {
        self.is_known().then(|| self.to_string())
    }
}

impl fmt::Display for HistoricalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoricalDate::Full(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            HistoricalDate::MonthYear { year, month } => write!(f, "{:04}-{:02}", year, month),
            HistoricalDate::Year(year) => write!(f, "{:04}", year),
            HistoricalDate::Circa(year) => write!(f, "c. {}", year),
            HistoricalDate::Unknown => Ok(()),
        }
    }
}

/// The recognized textual date formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `4 April 1949`
    DayMonthYear,
    /// `April 1949`
    MonthYear,
    /// `c. 1929`
    CircaYear,
    /// `1949`
    Year,
    /// `1949-04-04` or `1949-04`, also the canonical output form
    Iso,
}

impl DateFormat {
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::DayMonthYear,
            DateFormat::MonthYear,
            DateFormat::CircaYear,
            DateFormat::Year,
            DateFormat::Iso,
        ]
    }

    pub fn rule(&self) -> Rule<HistoricalDate> {
        match self {
            DateFormat::DayMonthYear => Rule::new("day_month_year", parse_day_month_year),
            DateFormat::MonthYear => Rule::new("month_year", parse_month_year),
            DateFormat::CircaYear => Rule::new("circa_year", parse_circa_year),
            DateFormat::Year => Rule::new("year", parse_year),
            DateFormat::Iso => Rule::new("iso", parse_iso),
        }
    }
}

/// Parses date text using the configured formats
///
/// The ISO rule is always tried last, so canonical output parses back to the
/// same value regardless of configuration.
///
/// # Example
/// ```
/// use olympics_cleaner::transform::{DateFormat, DateParser, HistoricalDate, Parsed};
///
/// let parser = DateParser::new(DateFormat::all());
/// let parsed = parser.parse("(c. 1929)");
/// assert_eq!(parsed, Parsed::Value(HistoricalDate::Circa(1929)));
/// ```
#[derive(Debug, Clone)]
pub struct DateParser {
    rules: RuleSet<HistoricalDate>,
}

impl DateParser {
    pub fn new(formats: &[DateFormat]) -> Self {
        let mut rules = RuleSet::new(formats.iter().map(DateFormat::rule).collect());
        rules.ensure(DateFormat::Iso.rule());
        Self { rules }
    }

    /// Parse date text; empty input is [`HistoricalDate::Unknown`] rather
    /// than unparseable
    pub fn parse(&self, raw: &str) -> Parsed<HistoricalDate> {
        let text = normalize(raw);
        if text.is_empty() {
            return Parsed::Value(HistoricalDate::Unknown);
        }
        self.rules.apply(&text)
    }

    /// Parse date text, collapsing failures into [`HistoricalDate::Unknown`]
    pub fn parse_or_unknown(&self, raw: &str) -> HistoricalDate {
        self.parse(raw).value().unwrap_or(HistoricalDate::Unknown)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.names()
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(DateFormat::all())
    }
}

fn normalize(raw: &str) -> String {
    let mut text = raw.trim();
    while let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        text = inner.trim();
    }
    squash_whitespace(text)
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let name = name.to_lowercase();
    if name.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == name || (name.len() == 3 && m.starts_with(&name)))
        .map(|i| i as u32 + 1)
}

fn parse_day_month_year(text: &str) -> Parsed<HistoricalDate> {
    DAY_MONTH_YEAR
        .captures(text)
        .and_then(|caps| {
            let day: u32 = caps[1].parse().ok()?;
            let month = month_number(&caps[2])?;
            let year: i32 = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .map(HistoricalDate::Full)
        .into()
}

fn parse_month_year(text: &str) -> Parsed<HistoricalDate> {
    MONTH_YEAR
        .captures(text)
        .and_then(|caps| {
            let month = month_number(&caps[1])?;
            let year: i32 = caps[2].parse().ok()?;
            Some(HistoricalDate::MonthYear { year, month })
        })
        .into()
}

fn parse_circa_year(text: &str) -> Parsed<HistoricalDate> {
    CIRCA_YEAR
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .map(HistoricalDate::Circa)
        .into()
}

fn parse_year(text: &str) -> Parsed<HistoricalDate> {
    YEAR.captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .map(HistoricalDate::Year)
        .into()
}

fn parse_iso(text: &str) -> Parsed<HistoricalDate> {
    ISO.captures(text)
        .and_then(|caps| {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            match caps.get(3) {
                Some(day) => {
                    let day: u32 = day.as_str().parse().ok()?;
                    NaiveDate::from_ymd_opt(year, month, day).map(HistoricalDate::Full)
                }
                None => (1..=12)
                    .contains(&month)
                    .then_some(HistoricalDate::MonthYear { year, month }),
            }
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> HistoricalDate {
        HistoricalDate::Full(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_recognized_formats() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("4 April 1949"), Parsed::Value(ymd(1949, 4, 4)));
        assert_eq!(parser.parse("12 Sep 1901"), Parsed::Value(ymd(1901, 9, 12)));
        assert_eq!(
            parser.parse("April 1949"),
            Parsed::Value(HistoricalDate::MonthYear {
                year: 1949,
                month: 4
            })
        );
        assert_eq!(parser.parse("c. 1929"), Parsed::Value(HistoricalDate::Circa(1929)));
        assert_eq!(parser.parse("1949"), Parsed::Value(HistoricalDate::Year(1949)));
        assert_eq!(parser.parse("1949-04-04"), Parsed::Value(ymd(1949, 4, 4)));
    }

    #[test]
    fn test_round_trip_through_canonical() {
        let parser = DateParser::default();
        for raw in [
            "4 April 1949",
            "29 February 1896",
            "April 1949",
            "c. 1929",
            "(c. 1929)",
            "1949",
            "1949-04-04",
            "1949-04",
        ] {
            let first = parser.parse(raw).value().unwrap();
            let canonical = first.canonical().unwrap();
            let second = parser.parse(&canonical).value().unwrap();
            assert_eq!(first, second, "round trip of {raw:?} via {canonical:?}");
            assert_eq!(second.canonical().unwrap(), canonical);
        }
    }

    #[test]
    fn test_unknown_is_explicit() {
        let parser = DateParser::default();
        assert_eq!(parser.parse(""), Parsed::Value(HistoricalDate::Unknown));
        assert_eq!(parser.parse("   "), Parsed::Value(HistoricalDate::Unknown));
        assert_eq!(parser.parse("1900 or 1901"), Parsed::Unparseable);
        assert_eq!(parser.parse("31 February 1950"), Parsed::Unparseable);
        assert_eq!(parser.parse("4 Aprl 1949"), Parsed::Unparseable);
        assert_eq!(parser.parse_or_unknown("sometime"), HistoricalDate::Unknown);
        assert_eq!(HistoricalDate::Unknown.canonical(), None);
    }

    #[test]
    fn test_configured_formats_limit_rules() {
        let parser = DateParser::new(&[DateFormat::Year]);
        assert_eq!(parser.rule_names(), vec!["year", "iso"]);
        assert_eq!(parser.parse("c. 1929"), Parsed::Unparseable);
        assert_eq!(parser.parse("1929"), Parsed::Value(HistoricalDate::Year(1929)));
    }

    #[test]
    fn test_year_accessor() {
        assert_eq!(ymd(1949, 4, 4).year(), Some(1949));
        assert_eq!(HistoricalDate::Circa(1929).year(), Some(1929));
        assert_eq!(HistoricalDate::Unknown.year(), None);
        assert_eq!(HistoricalDate::Circa(1929).precision(), "circa");
    }
}
