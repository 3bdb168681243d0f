//! Conflict analysis entry point.
//!
//! An analysis runs through fixed stages; each stage produces a value that
//! the next one consumes, and the result is assembled once at the end:
//!
//! `Start -> RulesIndexed -> OverlapsFound -> ConflictsCollected -> Categorized -> Suggested -> Done`
//!
//! A parser failure jumps straight to `Done` with a parse-error result.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use tracing::{debug, trace, warn};

use crate::source::{StylesheetError, StylesheetParser, Variables};
use crate::types::{
    ConflictAnalysisResult, OverlapType, ParsedRule, PropertyCategory, SelectorOverlap,
    Specificity, SpecificityIssue, StyleConflict,
};

use super::overlap::find_overlapping_groups;
use super::properties::{categorize_properties, property_conflicts};
use super::specificity::selector_specificity;
use super::suggestions::{suggest_for_conflict, suggest_for_overlap, HIGH_SPECIFICITY_SCORE};

/// Pipeline stage, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Start,
    RulesIndexed,
    OverlapsFound,
    ConflictsCollected,
    Categorized,
    Suggested,
    Done,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisStage::Start => "start",
            AnalysisStage::RulesIndexed => "rules-indexed",
            AnalysisStage::OverlapsFound => "overlaps-found",
            AnalysisStage::ConflictsCollected => "conflicts-collected",
            AnalysisStage::Categorized => "categorized",
            AnalysisStage::Suggested => "suggested",
            AnalysisStage::Done => "done",
        })
    }
}

/// Rules grouped by selector, in order of first appearance.
#[derive(Debug, Default)]
struct SelectorIndex<'a> {
    selectors: Vec<&'a str>,
    rules: HashMap<&'a str, Vec<&'a ParsedRule>>,
}

impl<'a> SelectorIndex<'a> {
    /// Rules without properties are skipped.
    fn build(rules: &'a [ParsedRule]) -> Self {
        let mut index = SelectorIndex::default();
        for rule in rules.iter().filter(|r| !r.properties.is_empty()) {
            let selector = rule.selector.as_str();
            let bucket = index.rules.entry(selector).or_default();
            if bucket.is_empty() {
                index.selectors.push(selector);
            }
            bucket.push(rule);
        }
        index
    }

    fn rules_for(&self, selector: &str) -> &[&'a ParsedRule] {
        self.rules.get(selector).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Output of the conflict-collection stage.
struct CollectedConflicts {
    conflicts: Vec<StyleConflict>,
    /// Exact overlaps for repeated selectors that no group already covers.
    duplicate_overlaps: Vec<SelectorOverlap>,
}

/// Detects overlapping selectors and colliding declarations.
///
/// Stateless: every call builds a fresh result from its own input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn new() -> Self {
        Self
    }

    /// Parse `source` with `parser` and analyze the resulting rules.
    ///
    /// Parser errors are reported inside the result, never returned.
    pub fn analyze_source<P>(
        &self,
        parser: &P,
        source: &str,
        variables: &Variables,
    ) -> ConflictAnalysisResult
    where
        P: StylesheetParser + ?Sized,
    {
        match parser.parse(source, variables) {
            Ok(rules) => self.analyze_rules(&rules),
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "stylesheet parsing failed");
                debug!(stage = %AnalysisStage::Done, "analysis aborted");
                parse_error_result(&err)
            }
        }
    }

    pub fn analyze_rules(&self, rules: &[ParsedRule]) -> ConflictAnalysisResult {
        debug!(stage = %AnalysisStage::Start, rules = rules.len(), "starting conflict analysis");

        let index = SelectorIndex::build(rules);
        debug!(
            stage = %AnalysisStage::RulesIndexed,
            selectors = index.selectors.len(),
            "indexed rules by selector"
        );

        let groups = find_overlapping_groups(&index.selectors);
        debug!(stage = %AnalysisStage::OverlapsFound, groups = groups.len(), "found overlap groups");

        let collected = collect_conflicts(&index, &groups);
        debug!(
            stage = %AnalysisStage::ConflictsCollected,
            conflicts = collected.conflicts.len(),
            duplicates = collected.duplicate_overlaps.len(),
            "collected property conflicts"
        );

        let overlapping_selectors: Vec<SelectorOverlap> = groups
            .into_iter()
            .chain(collected.duplicate_overlaps)
            .collect();

        let property_conflicts = categorize_conflicts(&collected.conflicts);
        debug!(
            stage = %AnalysisStage::Categorized,
            categories = property_conflicts.len(),
            "categorized conflicting properties"
        );

        let resolution_suggestions: Vec<String> = overlapping_selectors
            .iter()
            .flat_map(suggest_for_overlap)
            .collect();
        let conflicts: Vec<StyleConflict> = collected
            .conflicts
            .into_iter()
            .map(|conflict| StyleConflict {
                resolution_suggestion: Some(suggest_for_conflict(&conflict)),
                ..conflict
            })
            .collect();
        debug!(
            stage = %AnalysisStage::Suggested,
            suggestions = resolution_suggestions.len(),
            "generated resolution suggestions"
        );

        let specificity_issues = index
            .selectors
            .iter()
            .filter_map(|selector| specificity_issue(selector))
            .collect();

        let result = ConflictAnalysisResult {
            conflicts,
            overlapping_selectors,
            resolution_suggestions,
            property_conflicts,
            specificity_issues,
        };
        debug!(stage = %AnalysisStage::Done, summary = ?result.summary(), "analysis complete");
        result
    }
}

/// Convenience wrapper around [`ConflictDetector::analyze_rules`].
pub fn analyze_rules(rules: &[ParsedRule]) -> ConflictAnalysisResult {
    ConflictDetector::new().analyze_rules(rules)
}

/// Result for an input the parser rejected. Carries no conflict data.
pub fn parse_error_result(err: &StylesheetError) -> ConflictAnalysisResult {
    let message = err.to_string();
    ConflictAnalysisResult {
        resolution_suggestions: vec![format!("CSS parsing error: {message}")],
        property_conflicts: BTreeMap::from([(PropertyCategory::ParsingErrors, vec![message])]),
        ..ConflictAnalysisResult::default()
    }
}

fn collect_conflicts(index: &SelectorIndex<'_>, groups: &[SelectorOverlap]) -> CollectedConflicts {
    let mut conflicts = Vec::new();

    for group in groups {
        let members = group.selectors.iter().zip(&group.specificity_scores);
        for (i, (selector_1, specificity_1)) in members.clone().enumerate() {
            for (selector_2, specificity_2) in members.clone().skip(i + 1) {
                for rule_1 in index.rules_for(selector_1) {
                    for rule_2 in index.rules_for(selector_2) {
                        conflicts.extend(conflict_between(
                            (*rule_1, *specificity_1),
                            (*rule_2, *specificity_2),
                        ));
                    }
                }
            }
        }
    }

    let mut duplicate_overlaps = Vec::new();
    for selector in &index.selectors {
        let rules = index.rules_for(selector);
        if rules.len() < 2 {
            continue;
        }

        let specificity = selector_specificity(selector);
        for (i, rule_1) in rules.iter().enumerate() {
            for rule_2 in &rules[i + 1..] {
                conflicts.extend(conflict_between(
                    (*rule_1, specificity),
                    (*rule_2, specificity),
                ));
            }
        }

        if !groups.iter().any(|g| g.contains(selector)) {
            duplicate_overlaps.push(SelectorOverlap {
                selectors: vec![selector.to_string(); rules.len()],
                overlap_type: OverlapType::Exact,
                specificity_scores: vec![specificity; rules.len()],
            });
        }
    }

    CollectedConflicts {
        conflicts,
        duplicate_overlaps,
    }
}

fn conflict_between(
    (rule_1, specificity_1): (&ParsedRule, Specificity),
    (rule_2, specificity_2): (&ParsedRule, Specificity),
) -> Option<StyleConflict> {
    let conflicting_properties = property_conflicts(&rule_1.properties, &rule_2.properties);
    if conflicting_properties.is_empty() {
        return None;
    }

    trace!(
        selector_1 = %rule_1.selector,
        selector_2 = %rule_2.selector,
        properties = ?conflicting_properties,
        "property conflict"
    );
    Some(StyleConflict {
        selector_1: rule_1.selector.clone(),
        selector_2: rule_2.selector.clone(),
        conflicting_properties,
        specificity_1,
        specificity_2,
        line_1: rule_1.source_line,
        line_2: rule_2.source_line,
        resolution_suggestion: None,
    })
}

fn categorize_conflicts(conflicts: &[StyleConflict]) -> BTreeMap<PropertyCategory, Vec<String>> {
    let names: BTreeSet<&str> = conflicts
        .iter()
        .flat_map(|c| c.conflicting_properties.iter().map(String::as_str))
        .collect();
    categorize_properties(names)
}

/// First matching issue wins, checked from most to least severe.
fn specificity_issue(selector: &str) -> Option<SpecificityIssue> {
    let specificity = selector_specificity(selector);
    let score = specificity.sum();

    let issue = if score > HIGH_SPECIFICITY_SCORE {
        "High specificity - consider simplifying"
    } else if specificity.ids > 1 {
        "Multiple IDs in selector - avoid if possible"
    } else if specificity.ids >= 1 && score >= 3 {
        "ID with additional selectors raises specificity - consider simplifying"
    } else if score >= 5 {
        "Moderately high specificity - review if needed"
    } else {
        return None;
    };

    Some(SpecificityIssue {
        selector: selector.to_string(),
        specificity,
        score,
        issue: issue.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_render_in_kebab_case() {
        assert_eq!(AnalysisStage::RulesIndexed.to_string(), "rules-indexed");
        assert_eq!(AnalysisStage::Done.to_string(), "done");
    }

    #[test]
    fn index_skips_empty_rules_and_keeps_first_seen_order() {
        let rules = vec![
            ParsedRule::new("Label", [("color", "red")]),
            ParsedRule::new("Button", Vec::<(String, String)>::new()),
            ParsedRule::new("Button", [("color", "blue")]),
            ParsedRule::new("Label", [("color", "green")]),
        ];
        let index = SelectorIndex::build(&rules);

        assert_eq!(index.selectors, vec!["Label", "Button"]);
        assert_eq!(index.rules_for("Label").len(), 2);
        assert_eq!(index.rules_for("Button").len(), 1);
        assert!(index.rules_for("Missing").is_empty());
    }

    #[test]
    fn specificity_issue_priority_order() {
        let issue = |s: &str| specificity_issue(s).map(|i| i.issue);

        assert_eq!(issue("Button"), None);
        assert_eq!(issue("#main"), None);
        assert!(issue("#a .b .c .d .e .f .g .h .i .j Button").is_some_and(|i| i.starts_with("High")));
        assert!(issue("#a #b").is_some_and(|i| i.starts_with("Multiple IDs")));
        assert!(issue("#main.active").is_some_and(|i| i.starts_with("ID with")));
        assert!(issue("Button.a.b.c:hover").is_some_and(|i| i.starts_with("Moderately")));
    }

    #[test]
    fn parse_error_result_has_no_conflict_data() {
        let err = StylesheetError::declaration(
            "invalid value for color",
            crate::source::ErrorLocation::at(2, 5),
        );
        let result = parse_error_result(&err);

        assert!(result.conflicts.is_empty());
        assert!(result.overlapping_selectors.is_empty());
        assert!(result.specificity_issues.is_empty());
        assert_eq!(result.resolution_suggestions.len(), 1);
        assert!(result.resolution_suggestions[0].starts_with("CSS parsing error: "));
        assert!(result.resolution_suggestions[0].contains("invalid value for color"));
        assert_eq!(
            result.property_conflicts[&PropertyCategory::ParsingErrors],
            vec![err.to_string()]
        );
    }
}
