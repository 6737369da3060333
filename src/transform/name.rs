//! Name cleaning
//!
//! Olympedia "used names" separate given and family names with a bullet
//! (`Jean-François•Blanchy`). Titles appear in square brackets and alternate
//! names in parentheses.

use super::rules::{Parsed, Rule, RuleSet, squash_whitespace};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());
static ALTERNATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

const NAME_SEPARATOR: char = '•';

/// A display name with its annotations split out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameParts {
    pub display: String,
    pub has_title: bool,
    pub title: Option<String>,
    pub alternate_names: Vec<String>,
}

impl NameParts {
    fn plain(display: String) -> Parsed<NameParts> {
        if display.is_empty() {
            return Parsed::Unparseable;
        }
        Parsed::Value(NameParts {
            display,
            ..NameParts::default()
        })
    }
}

/// Parses names with the annotated rule first, then the separated and plain
/// fallbacks
///
/// Returns [`Parsed::Unparseable`] only when nothing is left of the name
/// once its annotations are removed.
#[derive(Debug, Clone)]
pub struct NameParser {
    rules: RuleSet<NameParts>,
}

impl Default for NameParser {
    fn default() -> Self {
        Self {
            rules: RuleSet::new(vec![
                Rule::new("annotated", parse_annotated),
                Rule::new("separated", parse_separated),
                Rule::new("plain", parse_plain),
            ]),
        }
    }
}

impl NameParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, raw: &str) -> Parsed<NameParts> {
        self.rules.apply(raw)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.names()
    }
}

/// Clean a raw name string with the default rules
///
/// # Example
/// ```
/// use olympics_cleaner::transform::parse_name;
///
/// let parts = parse_name("John Smith [Sir]").value().unwrap();
/// assert_eq!(parts.display, "John Smith");
/// assert!(parts.has_title);
/// assert_eq!(parts.title.as_deref(), Some("Sir"));
/// ```
pub fn parse_name(raw: &str) -> Parsed<NameParts> {
    NameParser::default().parse(raw)
}

fn is_annotated(raw: &str) -> bool {
    TITLE.is_match(raw) || ALTERNATE.is_match(raw)
}

fn join_parts(raw: &str) -> String {
    squash_whitespace(&raw.replace(NAME_SEPARATOR, " "))
}

/// `Mary•Smith (Mary•Jones) [Dame]`
fn parse_annotated(raw: &str) -> Parsed<NameParts> {
    if !is_annotated(raw) {
        return Parsed::Unparseable;
    }

    let titles: Vec<String> = TITLE
        .captures_iter(raw)
        .map(|c| squash_whitespace(&c[1]))
        .filter(|t| !t.is_empty())
        .collect();
    let alternate_names: Vec<String> = ALTERNATE
        .captures_iter(raw)
        .map(|c| join_parts(&c[1]))
        .filter(|a| !a.is_empty())
        .collect();

    let stripped = TITLE.replace_all(raw, " ");
    let stripped = ALTERNATE.replace_all(&stripped, " ");

    NameParts::plain(join_parts(&stripped)).map(|parts| NameParts {
        has_title: !titles.is_empty(),
        title: (!titles.is_empty()).then(|| titles.join(", ")),
        alternate_names,
        ..parts
    })
}

/// `Jean-François•Blanchy`
fn parse_separated(raw: &str) -> Parsed<NameParts> {
    if is_annotated(raw) || !raw.contains(NAME_SEPARATOR) {
        return Parsed::Unparseable;
    }
    NameParts::plain(join_parts(raw))
}

fn parse_plain(raw: &str) -> Parsed<NameParts> {
    if is_annotated(raw) || raw.contains(NAME_SEPARATOR) {
        return Parsed::Unparseable;
    }
    NameParts::plain(squash_whitespace(raw))
}
