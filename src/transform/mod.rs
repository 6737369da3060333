//! Field extraction for raw Olympedia text
//!
//! Each parser is a set of named rules tried in priority order; a field that
//! no rule accepts is reported as [`Parsed::Unparseable`] and left missing by
//! the caller.

mod date;
mod life_event;
mod measurements;
mod name;
mod place;
mod roles;
mod rules;

pub use date::{DateFormat, DateParser, HistoricalDate};
pub use life_event::{LifeEvent, LifeEventParser};
pub use measurements::{MeasurementParser, MeasurementReading, Measurements};
pub use name::{NameParser, NameParts, parse_name};
pub use place::{Place, PlaceParser};
pub use roles::RoleFilter;
pub use rules::{Parsed, Rule, RuleSet, squash_whitespace};
