//! Result types for conflict analysis output.
//!
//! Field names here are the wire contract consumed by editors and CI checks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::core::Specificity;

/// How two selectors relate structurally.
///
/// Variants are declared weakest first so `Ord` ranks `Exact` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapType {
    /// Selectors share a type, an id, or at least two classes.
    Partial,
    /// One selector's parts are a strict subset of the other's.
    Subset,
    /// Selector strings are character-identical.
    Exact,
}

impl fmt::Display for OverlapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverlapType::Exact => "exact",
            OverlapType::Subset => "subset",
            OverlapType::Partial => "partial",
        })
    }
}

/// Two rules on overlapping selectors that set the same property differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConflict {
    pub selector_1: String,
    pub selector_2: String,
    /// Never empty.
    pub conflicting_properties: BTreeSet<String>,
    pub specificity_1: Specificity,
    pub specificity_2: Specificity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_1: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_2: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_suggestion: Option<String>,
}

/// A group of selectors that overlap with the group's first member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOverlap {
    /// May repeat a selector when it comes from several rule occurrences.
    pub selectors: Vec<String>,
    pub overlap_type: OverlapType,
    /// Aligned positionally with `selectors`.
    pub specificity_scores: Vec<Specificity>,
}

impl SelectorOverlap {
    pub fn contains(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }
}

/// Semantic bucket for a property name in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Positioning,
    Sizing,
    Spacing,
    Colors,
    Borders,
    Layout,
    Text,
    Scrolling,
    Other,
    /// Carries upstream parse error messages instead of property names.
    ParsingErrors,
}

impl PropertyCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Positioning => "positioning",
            PropertyCategory::Sizing => "sizing",
            PropertyCategory::Spacing => "spacing",
            PropertyCategory::Colors => "colors",
            PropertyCategory::Borders => "borders",
            PropertyCategory::Layout => "layout",
            PropertyCategory::Text => "text",
            PropertyCategory::Scrolling => "scrolling",
            PropertyCategory::Other => "other",
            PropertyCategory::ParsingErrors => "parsing_errors",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selector whose specificity is worth a second look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificityIssue {
    pub selector: String,
    pub specificity: Specificity,
    pub score: u32,
    pub issue: String,
}

/// Aggregate output of one analysis call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictAnalysisResult {
    #[serde(default)]
    pub conflicts: Vec<StyleConflict>,
    #[serde(default)]
    pub overlapping_selectors: Vec<SelectorOverlap>,
    #[serde(default)]
    pub resolution_suggestions: Vec<String>,
    #[serde(default)]
    pub property_conflicts: BTreeMap<PropertyCategory, Vec<String>>,
    #[serde(default)]
    pub specificity_issues: Vec<SpecificityIssue>,
}

impl ConflictAnalysisResult {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_conflicts: self.conflicts.len(),
            total_overlaps: self.overlapping_selectors.len(),
            has_issues: !self.conflicts.is_empty() || !self.overlapping_selectors.is_empty(),
            total_specificity_issues: self.specificity_issues.len(),
        }
    }

    /// True when the upstream parser rejected the input.
    pub fn has_parse_errors(&self) -> bool {
        self.property_conflicts
            .contains_key(&PropertyCategory::ParsingErrors)
    }
}

/// Counts derived from a [`ConflictAnalysisResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_conflicts: usize,
    pub total_overlaps: usize,
    pub has_issues: bool,
    pub total_specificity_issues: usize,
}
