//! Place parsing for birth and death locations
//!
//! Places look like `Boulogne-Billancourt, Hauts-de-Seine (FRA)`: a city, an
//! optional region and a country code in parentheses. When no parenthesized
//! country is present the last comma-separated token is taken as the country.

use super::rules::{Parsed, Rule, RuleSet, squash_whitespace};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static PAREN_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

/// A location split into its parts; every part may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Place {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Place {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.region.is_none() && self.country.is_none()
    }
}

/// Parses place text with the parenthesized-country rule first, then the
/// comma-separated fallback
#[derive(Debug, Clone)]
pub struct PlaceParser {
    rules: RuleSet<Place>,
}

impl Default for PlaceParser {
    fn default() -> Self {
        Self {
            rules: RuleSet::new(vec![
                Rule::new("parenthesized_country", parse_parenthesized_country),
                Rule::new("comma_separated", parse_comma_separated),
            ]),
        }
    }
}

impl PlaceParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse place text; empty input is an empty place rather than unparseable
    pub fn parse(&self, raw: &str) -> Parsed<Place> {
        let text = squash_whitespace(raw);
        if text.is_empty() {
            return Parsed::Value(Place::default());
        }
        self.rules.apply(&text)
    }
}

fn part(token: &str) -> Option<String> {
    let token = token.trim().trim_end_matches(',').trim();
    match token {
        "" | "?" | "–" | "—" => None,
        _ => Some(token.to_string()),
    }
}

/// Split `city, region, more region` into city and joined region
fn city_and_region(tokens: &[&str]) -> (Option<String>, Option<String>) {
    let city = tokens.first().and_then(|t| part(t));
    let region_parts: Vec<String> = tokens.iter().skip(1).filter_map(|t| part(t)).collect();
    let region = (!region_parts.is_empty()).then(|| region_parts.join(", "));
    (city, region)
}

fn parse_parenthesized_country(text: &str) -> Parsed<Place> {
    let Some(country) = PAREN_GROUP.captures_iter(text).last().map(|c| c[1].to_string()) else {
        return Parsed::Unparseable;
    };

    let remainder = PAREN_GROUP.replace_all(text, " ");
    let tokens: Vec<&str> = remainder.split(',').collect();
    let (city, region) = city_and_region(&tokens);

    let place = Place {
        city,
        region,
        country: part(&country),
    };
    if place.is_empty() {
        Parsed::Unparseable
    } else {
        Parsed::Value(place)
    }
}

fn parse_comma_separated(text: &str) -> Parsed<Place> {
    if text.contains('(') || text.contains(')') {
        return Parsed::Unparseable;
    }

    let tokens: Vec<&str> = text.split(',').collect();
    let place = match tokens.as_slice() {
        [] => Place::default(),
        [only] => Place {
            city: part(only),
            ..Place::default()
        },
        [head @ .., last] => {
            let (city, region) = city_and_region(head);
            Place {
                city,
                region,
                country: part(last),
            }
        }
    };

    if place.is_empty() {
        Parsed::Unparseable
    } else {
        Parsed::Value(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(city: Option<&str>, region: Option<&str>, country: Option<&str>) -> Place {
        Place {
            city: city.map(str::to_string),
            region: region.map(str::to_string),
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn test_city_region_country() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.parse("Boulogne-Billancourt, Hauts-de-Seine (FRA)"),
            Parsed::Value(place(
                Some("Boulogne-Billancourt"),
                Some("Hauts-de-Seine"),
                Some("FRA")
            ))
        );
    }

    #[test]
    fn test_unknown_city() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.parse("? (KOR)"),
            Parsed::Value(place(None, None, Some("KOR")))
        );
    }

    #[test]
    fn test_last_parenthesized_group_is_country() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.parse("Lwów (Lviv), Lviv (UKR)"),
            Parsed::Value(place(Some("Lwów"), Some("Lviv"), Some("UKR")))
        );
    }

    #[test]
    fn test_last_comma_token_is_country_without_parentheses() {
        let parser = PlaceParser::new();
        assert_eq!(
            parser.parse("Paris, Île-de-France, France"),
            Parsed::Value(place(Some("Paris"), Some("Île-de-France"), Some("France")))
        );
        assert_eq!(
            parser.parse("Paris, France"),
            Parsed::Value(place(Some("Paris"), None, Some("France")))
        );
        assert_eq!(
            parser.parse("Paris"),
            Parsed::Value(place(Some("Paris"), None, None))
        );
    }

    #[test]
    fn test_empty_and_unparseable() {
        let parser = PlaceParser::new();
        assert_eq!(parser.parse("  "), Parsed::Value(Place::default()));
        assert_eq!(parser.parse("?"), Parsed::Unparseable);
        assert_eq!(parser.parse("Paris (FRA"), Parsed::Unparseable);
    }
}
