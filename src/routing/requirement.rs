//! Parameter requirements.

use serde::{Deserialize, Serialize};

/// A pattern constraint for a single route parameter.
///
/// Either a raw pattern, or an ordered list of alternatives that is
/// turned into the alternation `(alt1|alt2|...)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Requirement {
    Pattern(String),
    Alternatives(Vec<String>),
}

impl Requirement {
    /// The pattern handed to the compiler. Alternatives keep their order.
    pub fn into_pattern(self) -> String {
        match self {
            Requirement::Pattern(pattern) => pattern,
            Requirement::Alternatives(alternatives) => format!("({})", alternatives.join("|")),
        }
    }
}

impl From<&str> for Requirement {
    fn from(pattern: &str) -> Self {
        Requirement::Pattern(pattern.to_string())
    }
}

impl From<String> for Requirement {
    fn from(pattern: String) -> Self {
        Requirement::Pattern(pattern)
    }
}

impl From<Vec<String>> for Requirement {
    fn from(alternatives: Vec<String>) -> Self {
        Requirement::Alternatives(alternatives)
    }
}

impl From<Vec<&str>> for Requirement {
    fn from(alternatives: Vec<&str>) -> Self {
        Requirement::Alternatives(alternatives.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Requirement {
    fn from(alternatives: [&str; N]) -> Self {
        Requirement::Alternatives(alternatives.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternatives_keep_order() {
        assert_eq!(Requirement::from(["bar", "baz"]).into_pattern(), "(bar|baz)");
        assert_eq!(Requirement::from(vec!["b", "a", "c"]).into_pattern(), "(b|a|c)");
    }

    #[test]
    fn test_plain_pattern_untouched() {
        assert_eq!(Requirement::from("[0-9]+").into_pattern(), "[0-9]+");
    }
}
