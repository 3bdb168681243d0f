//! Per-selector specificity report.

use serde::{Deserialize, Serialize};

use crate::types::Specificity;

use super::selector::SelectorKind;
use super::specificity::selector_specificity;
use super::suggestions::HIGH_SPECIFICITY_SCORE;

const ELEVATED_SCORE: u32 = 5;
const MAX_COMPOUNDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorComplexity {
    pub selector: String,
    pub kind: SelectorKind,
    pub specificity: Specificity,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificityReport {
    pub selectors: Vec<SelectorComplexity>,
    pub average_score: f64,
    pub max_specificity: Specificity,
    pub min_specificity: Specificity,
}

pub fn analyze_selector_complexity(selector: &str) -> SelectorComplexity {
    let specificity = selector_specificity(selector);
    let score = specificity.sum();
    let mut recommendations = Vec::new();

    if specificity.ids > 1 {
        recommendations.push("Avoid using multiple IDs in a single selector".to_string());
    }
    if score > HIGH_SPECIFICITY_SCORE {
        recommendations.push("Selector is very specific, consider simplifying".to_string());
    } else if score > ELEVATED_SCORE {
        recommendations
            .push("Selector has high specificity, consider using classes instead".to_string());
    }
    if selector.split_whitespace().count() > MAX_COMPOUNDS {
        recommendations
            .push("Selector is quite long, consider using more specific classes".to_string());
    }
    if selector.contains('*') {
        recommendations.push("Universal selector (*) can impact performance".to_string());
    }

    SelectorComplexity {
        selector: selector.to_string(),
        kind: SelectorKind::of(selector),
        specificity,
        score,
        recommendations,
    }
}

pub fn specificity_report<S: AsRef<str>>(selectors: &[S]) -> SpecificityReport {
    let entries: Vec<SelectorComplexity> = selectors
        .iter()
        .map(|s| analyze_selector_complexity(s.as_ref()))
        .collect();

    let average_score = if entries.is_empty() {
        0.0
    } else {
        entries.iter().map(|e| f64::from(e.score)).sum::<f64>() / entries.len() as f64
    };
    let max_specificity = entries
        .iter()
        .map(|e| e.specificity)
        .max()
        .unwrap_or_default();
    let min_specificity = entries
        .iter()
        .map(|e| e.specificity)
        .min()
        .unwrap_or_default();

    SpecificityReport {
        selectors: entries,
        average_score,
        max_specificity,
        min_specificity,
    }
}
