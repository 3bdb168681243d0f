use super::*;
use crate::source::{
    ErrorLocation, RuleFileParser, RuleFormat, StylesheetError, StylesheetParser, Variables,
};
use crate::types::{OverlapType, ParsedRule, PropertyCategory, Specificity};
use std::cell::Cell;

fn rule(selector: &str, properties: &[(&str, &str)]) -> ParsedRule {
    ParsedRule::new(selector, properties.iter().copied())
}

#[test]
fn duplicate_selector_with_different_color_conflicts_once() {
    let rules = vec![
        rule("Button", &[("color", "red"), ("background", "blue")]).at_line(1),
        rule("Button", &[("color", "green")]).at_line(6),
    ];

    let result = analyze_rules(&rules);

    assert_eq!(result.conflicts.len(), 1);
    let conflict = &result.conflicts[0];
    assert_eq!(conflict.selector_1, "Button");
    assert_eq!(conflict.selector_2, "Button");
    assert_eq!(
        conflict.conflicting_properties.iter().collect::<Vec<_>>(),
        vec!["color"]
    );
    assert_eq!(conflict.line_1, Some(1));
    assert_eq!(conflict.line_2, Some(6));
    assert_eq!(conflict.specificity_1, Specificity::new(0, 0, 1));
    assert!(conflict
        .resolution_suggestion
        .as_deref()
        .is_some_and(|s| s.contains("equal specificity")));

    assert_eq!(result.overlapping_selectors.len(), 1);
    let overlap = &result.overlapping_selectors[0];
    assert_eq!(overlap.overlap_type, OverlapType::Exact);
    assert_eq!(overlap.selectors, vec!["Button", "Button"]);
    assert_eq!(overlap.specificity_scores.len(), 2);
    assert!(result
        .resolution_suggestions
        .iter()
        .any(|s| s.starts_with("Duplicate selectors found: Button, Button")));
    assert_eq!(
        result.property_conflicts[&PropertyCategory::Colors],
        vec!["color"]
    );
}

#[test]
fn subset_selectors_with_disjoint_properties_do_not_conflict() {
    let rules = vec![
        rule("Button", &[("color", "red")]),
        rule("Button.active", &[("background", "blue")]),
    ];

    let result = analyze_rules(&rules);

    assert!(result.conflicts.is_empty());
    assert_eq!(result.overlapping_selectors.len(), 1);
    assert_eq!(
        result.overlapping_selectors[0].overlap_type,
        OverlapType::Subset
    );
    assert!(result.property_conflicts.is_empty());
    assert!(result.summary().has_issues);
}

#[test]
fn shorthand_rule_conflicts_with_longhand_rule() {
    let rules = vec![
        rule("Button", &[("margin", "1 2 3 4")]),
        rule("Button", &[("margin-top", "5")]),
    ];

    let result = analyze_rules(&rules);

    assert_eq!(result.conflicts.len(), 1);
    assert!(result.conflicts[0]
        .conflicting_properties
        .contains("margin-top"));
    assert_eq!(
        result.property_conflicts[&PropertyCategory::Spacing],
        vec!["margin-top"]
    );
}

#[test]
fn empty_input_has_no_issues() {
    let result = analyze_rules(&[]);
    let summary = result.summary();

    assert_eq!(summary.total_conflicts, 0);
    assert_eq!(summary.total_overlaps, 0);
    assert_eq!(summary.total_specificity_issues, 0);
    assert!(!summary.has_issues);
    assert!(result.resolution_suggestions.is_empty());
}

#[test]
fn lone_id_selector_with_classes_is_a_specificity_issue() {
    let rules = vec![rule("#id1.class1.class2.class3", &[("color", "red")])];

    let result = analyze_rules(&rules);

    assert!(result.conflicts.is_empty());
    assert!(result.overlapping_selectors.is_empty());
    assert_eq!(result.specificity_issues.len(), 1);
    let issue = &result.specificity_issues[0];
    assert_eq!(issue.selector, "#id1.class1.class2.class3");
    assert_eq!(issue.specificity, Specificity::new(1, 3, 1));
    assert_eq!(issue.score, 5);
    assert!(issue.issue.to_lowercase().contains("specificity"));
}

#[test]
fn rules_without_properties_are_ignored() {
    let rules = vec![
        rule("Button", &[]),
        rule("Button", &[]),
        rule("#a #b", &[]),
    ];

    let result = analyze_rules(&rules);

    assert!(result.overlapping_selectors.is_empty());
    assert!(result.specificity_issues.is_empty());
}

#[test]
fn mixed_stylesheet_reports_every_kind_of_finding() {
    let rules = vec![
        rule(
            "Button",
            &[
                ("color", "$text"),
                ("background", "$primary"),
                ("margin", "1 2"),
                ("padding", "1"),
            ],
        )
        .at_line(2),
        rule(
            "Button.primary",
            &[("color", "white"), ("background", "blue"), ("margin-top", "2")],
        )
        .at_line(10),
        rule("Button", &[("padding", "2 3"), ("border", "solid red")]).at_line(17),
        rule("#main Button.primary", &[("color", "black"), ("margin", "0")]).at_line(23),
    ];

    let result = analyze_rules(&rules);

    assert_eq!(result.overlapping_selectors.len(), 1);
    let group = &result.overlapping_selectors[0];
    assert_eq!(
        group.selectors,
        vec!["Button", "Button.primary", "#main Button.primary"]
    );
    assert_eq!(group.overlap_type, OverlapType::Subset);

    // Button x Button.primary, Button x #main..., Button.primary x #main...,
    // and the two Button rules against each other.
    assert_eq!(result.conflicts.len(), 4);

    let duplicate = result
        .conflicts
        .iter()
        .find(|c| c.selector_1 == c.selector_2)
        .expect("duplicate Button conflict");
    assert_eq!(duplicate.line_1, Some(2));
    assert_eq!(duplicate.line_2, Some(17));
    assert!(duplicate.conflicting_properties.contains("padding"));
    assert!(duplicate.conflicting_properties.contains("padding-left"));

    let heavy = result
        .conflicts
        .iter()
        .find(|c| c.selector_1 == "Button" && c.selector_2 == "#main Button.primary")
        .expect("Button vs #main Button.primary conflict");
    assert_eq!(heavy.specificity_2, Specificity::new(1, 1, 1));
    assert!(heavy.conflicting_properties.contains("margin"));
    assert!(heavy
        .resolution_suggestion
        .as_deref()
        .is_some_and(|s| s.contains("higher specificity")));

    assert!(result
        .property_conflicts
        .contains_key(&PropertyCategory::Spacing));
    assert!(result
        .property_conflicts
        .contains_key(&PropertyCategory::Colors));
    assert!(result
        .resolution_suggestions
        .iter()
        .any(|s| s.contains("subset relationship")));

    assert_eq!(result.specificity_issues.len(), 1);
    assert_eq!(result.specificity_issues[0].selector, "#main Button.primary");
}

#[test]
fn every_emitted_conflict_has_properties() {
    let rules = vec![
        rule("Button", &[("color", "red")]),
        rule("Button", &[("color", "red")]),
        rule("Button.primary", &[("color", "red")]),
    ];

    let result = analyze_rules(&rules);

    assert!(result.conflicts.is_empty());
    assert!(result
        .conflicts
        .iter()
        .all(|c| !c.conflicting_properties.is_empty()));
}

#[test]
fn analyze_source_runs_bundled_parser() {
    let parser = RuleFileParser::new(RuleFormat::Json);
    let variables: Variables = [("accent".to_string(), "orange".to_string())].into();
    let source = r#"[
        {"selector": "Button, Label", "properties": {"color": "$accent"}, "line": 1},
        {"selector": "Button", "properties": {"color": "red"}, "line": 4}
    ]"#;

    let result = ConflictDetector::new().analyze_source(&parser, source, &variables);

    assert_eq!(result.conflicts.len(), 1);
    assert!(!result.has_parse_errors());
}

struct FailingParser {
    calls: Cell<usize>,
}

impl StylesheetParser for FailingParser {
    fn parse(
        &self,
        _source: &str,
        _variables: &Variables,
    ) -> Result<Vec<ParsedRule>, StylesheetError> {
        self.calls.set(self.calls.get() + 1);
        Err(StylesheetError::unresolved_variable(
            "reference to undefined variable '$primary'",
            ErrorLocation::at(3, 12),
        ))
    }
}

#[test]
fn parser_failure_short_circuits_to_parse_error_result() {
    let parser = FailingParser {
        calls: Cell::new(0),
    };

    let result = ConflictDetector::new().analyze_source(
        &parser,
        "Button { color: $primary; }",
        &Variables::new(),
    );

    assert_eq!(parser.calls.get(), 1);
    assert!(result.has_parse_errors());
    assert!(result.conflicts.is_empty());
    assert!(result.overlapping_selectors.is_empty());
    assert!(result.specificity_issues.is_empty());
    assert_eq!(result.resolution_suggestions.len(), 1);
    assert!(result.resolution_suggestions[0].contains("$primary"));
    assert!(result.resolution_suggestions[0].contains("line 3, column 12"));
    assert!(!result.summary().has_issues);
}

#[test]
fn analyze_source_accepts_trait_objects() {
    let parser: Box<dyn StylesheetParser> = Box::new(RuleFileParser::new(RuleFormat::Yaml));
    let result = ConflictDetector::new().analyze_source(
        parser.as_ref(),
        "- selector: Button\n  properties:\n    color: red\n",
        &Variables::new(),
    );
    assert!(result.conflicts.is_empty());
    assert!(!result.has_parse_errors());
}
