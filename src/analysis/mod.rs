//! Selector overlap and style conflict analysis.
//!
//! This module provides the conflict detection engine:
//! - Selector decomposition and classification
//! - Specificity scoring
//! - Overlap classification and grouping
//! - Property conflict detection with shorthand expansion
//! - Rule-based resolution suggestions
//! - The [`ConflictDetector`] that drives them over a rule list

// Submodules
mod complexity;
mod detector;
mod overlap;
mod properties;
mod selector;
mod specificity;
mod suggestions;

#[cfg(test)]
mod tests;

// Re-exports
pub use complexity::{
    analyze_selector_complexity, specificity_report, SelectorComplexity, SpecificityReport,
};
pub use detector::{analyze_rules, parse_error_result, AnalysisStage, ConflictDetector};
pub use overlap::{find_overlapping_groups, pairwise_overlap};
pub use properties::{
    categorize_properties, categorize_property, expand_properties, longhands, property_conflicts,
};
pub use selector::{parse_selector, SelectorKind};
pub use specificity::{selector_specificity, specificity};
pub use suggestions::{
    suggest_for_conflict, suggest_for_overlap, HIGH_SPECIFICITY_SCORE, MODERATE_SPECIFICITY_SCORE,
};
