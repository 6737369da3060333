//! Competitor role classification
//!
//! The `Roles` column is a `•`-separated list such as
//! `Competed in Olympic Games • Referee`. A person is a competitor when any
//! segment matches the allow-list.

use crate::config::RolesConfig;
use crate::etl::Filter;
use crate::olympics::BiographyRecord;

const ROLE_SEPARATOR: char = '•';

/// Order-preserving filter keeping allow-listed competitor roles
///
/// # Example
/// ```
/// use olympics_cleaner::config::RolesConfig;
/// use olympics_cleaner::transform::RoleFilter;
///
/// let filter = RoleFilter::new(&RolesConfig::default());
/// assert!(filter.is_competitor("competed in olympic games • Coach"));
/// assert!(!filter.is_competitor("Coach"));
/// assert_eq!(
///     filter.additional_roles("Competed in Olympic Games • Coach").as_deref(),
///     Some("Coach")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RoleFilter {
    allow: Vec<String>,
}

impl RoleFilter {
    pub fn new(config: &RolesConfig) -> Self {
        Self {
            allow: config
                .allow
                .iter()
                .map(|role| role.trim().to_lowercase())
                .filter(|role| !role.is_empty())
                .collect(),
        }
    }

    fn is_allowed(&self, segment: &str) -> bool {
        let segment = segment.to_lowercase();
        self.allow.iter().any(|role| *role == segment)
    }

    /// Whether any role segment is an allow-listed competitor role
    pub fn is_competitor(&self, roles: &str) -> bool {
        segments(roles).any(|segment| self.is_allowed(segment))
    }

    /// The role segments that are not competitor roles, re-joined
    pub fn additional_roles(&self, roles: &str) -> Option<String> {
        let rest: Vec<&str> = segments(roles)
            .filter(|segment| !self.is_allowed(segment))
            .collect();
        (!rest.is_empty()).then(|| rest.join(" • "))
    }
}

impl Default for RoleFilter {
    fn default() -> Self {
        Self::new(&RolesConfig::default())
    }
}

fn segments(roles: &str) -> impl Iterator<Item = &str> {
    roles
        .split(ROLE_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

impl Filter for RoleFilter {
    type Item = BiographyRecord;

    fn keep(&self, item: &Self::Item) -> bool {
        item.roles().is_some_and(|roles| self.is_competitor(roles))
    }
}
