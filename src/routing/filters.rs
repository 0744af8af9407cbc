//! Ordered, duplicate-free filter name sets.
//!
//! # Responsibilities
//! - Keep filter names in first-seen order
//! - Drop duplicates on insert
//! - Accept pipe-delimited names (`"auth|csrf"`)
//!
//! # Design Decisions
//! - Monotonic: nothing ever removes a filter once added
//! - Merging another set appends only the names not already present

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// An insertion-ordered set of filter names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(IndexSet<String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add filter names, splitting each on `|`.
    ///
    /// Blank names are ignored. Names already present keep their position.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name: String = name.into();
            for part in name.split('|').map(str::trim).filter(|p| !p.is_empty()) {
                if !self.0.contains(part) {
                    self.0.insert(part.to_string());
                }
            }
        }
    }

    /// Append the names of `other` that are not already in this set.
    pub fn merge(&mut self, other: &FilterSet) {
        for name in &other.0 {
            if !self.0.contains(name) {
                self.0.insert(name.clone());
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Owned copy of the names, in order.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        set.extend(iter);
        set
    }
}

impl std::fmt::Display for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        write!(f, "]")
    }
}
