//! Named parsing rules tried in priority order
//!
//! Each rule inspects a raw string and either produces a structured value or
//! reports that it does not apply. A [`RuleSet`] tries its rules in order and
//! stops at the first match.

/// Outcome of applying a parsing rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    Value(T),
    Unparseable,
}

impl<T> Parsed<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Parsed::Value(_))
    }

    /// Convert into an `Option`, dropping the unparseable marker
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Value(v) => Some(v),
            Parsed::Unparseable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        match self {
            Parsed::Value(v) => Parsed::Value(f(v)),
            Parsed::Unparseable => Parsed::Unparseable,
        }
    }
}

impl<T> From<Option<T>> for Parsed<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Parsed::Value(v),
            None => Parsed::Unparseable,
        }
    }
}

/// A single named parsing rule
pub struct Rule<T> {
    pub name: &'static str,
    apply: fn(&str) -> Parsed<T>,
}

// Manual impls: a derive would require `T: Clone`
impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Rule<T> {}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

impl<T> Rule<T> {
    pub const fn new(name: &'static str, apply: fn(&str) -> Parsed<T>) -> Self {
        Self { name, apply }
    }

    pub fn apply(&self, input: &str) -> Parsed<T> {
        (self.apply)(input)
    }
}

/// Ordered collection of rules for one kind of value
#[derive(Debug, Clone)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    /// Append a rule unless one with the same name is already present
    pub fn ensure(&mut self, rule: Rule<T>) {
        if !self.rules.iter().any(|r| r.name == rule.name) {
            self.rules.push(rule);
        }
    }

    /// Try each rule in priority order, returning the first match
    pub fn apply(&self, input: &str) -> Parsed<T> {
        self.apply_named(input)
            .map(|(_, value)| value)
            .into()
    }

    /// Like [`RuleSet::apply`], also reporting which rule matched
    pub fn apply_named(&self, input: &str) -> Option<(&'static str, T)> {
        self.rules.iter().find_map(|rule| match rule.apply(input) {
            Parsed::Value(value) => Some((rule.name, value)),
            Parsed::Unparseable => None,
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}

/// Trim and collapse internal runs of whitespace to single spaces
pub fn squash_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(input: &str) -> Parsed<u32> {
        input.parse().ok().into()
    }

    fn yes(input: &str) -> Parsed<u32> {
        if input == "yes" {
            Parsed::Value(1)
        } else {
            Parsed::Unparseable
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = RuleSet::new(vec![Rule::new("yes", yes), Rule::new("digits", digits)]);

        assert_eq!(rules.apply("42"), Parsed::Value(42));
        assert_eq!(rules.apply_named("yes"), Some(("yes", 1)));
        assert_eq!(rules.apply("nope"), Parsed::Unparseable);
    }

    #[test]
    fn test_ensure_skips_duplicates() {
        let mut rules = RuleSet::new(vec![Rule::new("digits", digits)]);
        rules.ensure(Rule::new("digits", digits));
        rules.ensure(Rule::new("yes", yes));
        assert_eq!(rules.names(), vec!["digits", "yes"]);
    }

    #[test]
    fn test_squash_whitespace() {
        assert_eq!(squash_whitespace("  John \t  Smith "), "John Smith");
        assert_eq!(squash_whitespace("   "), "");
    }
}
