//! Core types used throughout the SCC library.
//!
//! This module contains the fundamental data structures:
//! - [`ParsedRule`] - One rule as emitted by the stylesheet parser
//! - [`SelectorParts`] - Structural decomposition of a selector
//! - [`Specificity`] - `(ids, classes, types)` score

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single style rule produced by the stylesheet parser.
///
/// `selector` holds exactly one selector; comma lists are split upstream.
/// Duplicate rules with identical selectors are kept as separate values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRule {
    pub selector: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, alias = "line", skip_serializing_if = "Option::is_none")]
    pub source_line: Option<u32>,
}

impl ParsedRule {
    pub fn new<I, K, V>(selector: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            selector: selector.into(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source_line: None,
        }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.source_line = Some(line);
        self
    }
}

/// Structural parts of one selector string.
///
/// Pseudo-elements are parsed but never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorParts {
    pub types: BTreeSet<String>,
    pub classes: BTreeSet<String>,
    pub ids: BTreeSet<String>,
    pub pseudos: BTreeSet<String>,
    pub attributes: BTreeSet<String>,
}

impl SelectorParts {
    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|set| set.is_empty())
    }

    /// The five component sets in a fixed order, for category-wise comparison.
    pub fn categories(&self) -> [&BTreeSet<String>; 5] {
        [
            &self.types,
            &self.classes,
            &self.ids,
            &self.pseudos,
            &self.attributes,
        ]
    }
}

/// Selector specificity as `(ids, classes, types)`.
///
/// Ordering is lexicographic: ids first, then classes, then types.
/// Serializes as a three-element array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 3]", into = "[u32; 3]")]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }

    /// Coarse score used for severity buckets.
    pub const fn sum(&self) -> u32 {
        self.ids + self.classes + self.types
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ids
            .cmp(&other.ids)
            .then(self.classes.cmp(&other.classes))
            .then(self.types.cmp(&other.types))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<[u32; 3]> for Specificity {
    fn from([ids, classes, types]: [u32; 3]) -> Self {
        Self::new(ids, classes, types)
    }
}

impl From<Specificity> for [u32; 3] {
    fn from(value: Specificity) -> Self {
        [value.ids, value.classes, value.types]
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.ids, self.classes, self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_orders_lexicographically() {
        assert!(Specificity::new(1, 0, 0) > Specificity::new(0, 9, 9));
        assert!(Specificity::new(0, 2, 0) > Specificity::new(0, 1, 5));
        assert!(Specificity::new(0, 1, 2) > Specificity::new(0, 1, 1));
        assert_eq!(Specificity::new(1, 2, 3).sum(), 6);
    }

    #[test]
    fn specificity_serializes_as_array() {
        let json = serde_json::to_string(&Specificity::new(1, 3, 1)).expect("serialize");
        assert_eq!(json, "[1,3,1]");
        let parsed: Specificity = serde_json::from_str("[0,2,1]").expect("deserialize");
        assert_eq!(parsed, Specificity::new(0, 2, 1));
    }

    #[test]
    fn parsed_rule_accepts_line_alias() {
        let rule: ParsedRule =
            serde_json::from_str(r#"{"selector":"Button","properties":{"color":"red"},"line":4}"#)
                .expect("deserialize rule");
        assert_eq!(rule.source_line, Some(4));
        assert_eq!(rule.properties.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn empty_parts_report_empty() {
        let mut parts = SelectorParts::default();
        assert!(parts.is_empty());
        parts.pseudos.insert("hover".to_string());
        assert!(!parts.is_empty());
    }
}
