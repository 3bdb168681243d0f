//! Rule-based remediation hints for conflicts and overlap groups.

use crate::types::{OverlapType, SelectorOverlap, StyleConflict};

use super::selector::parse_selector;

/// Specificity score above which a selector is called out as high.
pub const HIGH_SPECIFICITY_SCORE: u32 = 10;
/// Specificity score from which a selector in an overlap group is flagged.
pub const MODERATE_SPECIFICITY_SCORE: u32 = 4;
/// Score gap between two conflicting selectors worth mentioning.
const SPECIFICITY_GAP: u32 = 2;
/// More conflicting properties than this suggests shared styling.
const MANY_PROPERTIES: usize = 3;

const FALLBACK_SUGGESTION: &str =
    "Consider using more specific selectors or reorganizing your CSS structure.";

fn is_id_selector(selector: &str) -> bool {
    !parse_selector(selector).ids.is_empty()
}

/// Build one space-joined suggestion for a conflict.
pub fn suggest_for_conflict(conflict: &StyleConflict) -> String {
    let spec_1 = conflict.specificity_1.sum();
    let spec_2 = conflict.specificity_2.sum();
    let mut suggestions: Vec<String> = Vec::new();

    if spec_1 == spec_2 {
        suggestions.push(format!(
            "Selectors '{}' and '{}' have equal specificity. \
             Consider using more specific selectors or reordering rules.",
            conflict.selector_1, conflict.selector_2
        ));
    } else if spec_1.abs_diff(spec_2) >= SPECIFICITY_GAP {
        let (higher, lower) = if spec_1 > spec_2 {
            (&conflict.selector_1, &conflict.selector_2)
        } else {
            (&conflict.selector_2, &conflict.selector_1)
        };
        suggestions.push(format!(
            "Selector '{higher}' has higher specificity than '{lower}'. \
             Consider simplifying it to improve maintainability."
        ));
    }

    let properties = &conflict.conflicting_properties;
    if properties.contains("margin") && properties.contains("padding") {
        suggestions.push(
            "Both margin and padding are conflicting. Consider using a consistent spacing system."
                .to_string(),
        );
    }

    if properties.len() > MANY_PROPERTIES {
        suggestions.push(
            "Multiple properties are conflicting. Consider creating a shared base class \
             or using CSS variables for consistent styling."
                .to_string(),
        );
    }

    if is_id_selector(&conflict.selector_1) && is_id_selector(&conflict.selector_2) {
        suggestions.push(
            "Both selectors use IDs. IDs should be unique - consider using classes instead."
                .to_string(),
        );
    }

    if suggestions.is_empty() {
        FALLBACK_SUGGESTION.to_string()
    } else {
        suggestions.join(" ")
    }
}

/// Suggestions for an overlap group, one string per finding.
pub fn suggest_for_overlap(overlap: &SelectorOverlap) -> Vec<String> {
    let mut suggestions = Vec::new();
    let listed = overlap.selectors.join(", ");

    match overlap.overlap_type {
        OverlapType::Exact => suggestions.push(format!(
            "Duplicate selectors found: {listed}. Merge these rules to avoid confusion."
        )),
        OverlapType::Subset => suggestions.push(format!(
            "Selector subset relationship detected in: {listed}. \
             Ensure the more specific selector comes after the general one."
        )),
        OverlapType::Partial => {}
    }

    for (selector, specificity) in overlap.selectors.iter().zip(&overlap.specificity_scores) {
        let score = specificity.sum();
        if score > HIGH_SPECIFICITY_SCORE {
            suggestions.push(format!(
                "Selector '{selector}' has high specificity {specificity}. \
                 Consider simplifying or using utility classes."
            ));
        } else if score >= MODERATE_SPECIFICITY_SCORE {
            suggestions.push(format!(
                "Selector '{selector}' has high specificity (score: {score}). Consider simplifying."
            ));
        }
    }

    suggestions
}
