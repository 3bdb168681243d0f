//! Structural overlap between selectors.
//!
//! Overlap is a heuristic for "these selectors might match the same widgets";
//! no widget tree is simulated.

use crate::types::{OverlapType, SelectorOverlap, SelectorParts};

use super::selector::parse_selector;
use super::specificity::selector_specificity;

/// Classify how `a` and `b` relate, or `None` if they look unrelated.
///
/// The relation is symmetric: `pairwise_overlap(a, b) == pairwise_overlap(b, a)`.
pub fn pairwise_overlap(a: &str, b: &str) -> Option<OverlapType> {
    if a == b {
        return Some(OverlapType::Exact);
    }

    let a_parts = parse_selector(a);
    let b_parts = parse_selector(b);

    if is_subset(&a_parts, &b_parts) || is_subset(&b_parts, &a_parts) {
        return Some(OverlapType::Subset);
    }
    if has_partial_overlap(&a_parts, &b_parts) {
        return Some(OverlapType::Partial);
    }
    None
}

/// `narrow` is a strict structural subset of `broad`: every non-empty set in
/// `narrow` is contained in the matching set of `broad`, and `broad` has more
/// components in at least one category.
fn is_subset(narrow: &SelectorParts, broad: &SelectorParts) -> bool {
    if narrow.is_empty() {
        return false;
    }

    let pairs = narrow.categories().into_iter().zip(broad.categories());
    let mut broad_has_more = false;

    for (n, b) in pairs {
        if !n.is_subset(b) {
            return false;
        }
        if b.len() > n.len() {
            broad_has_more = true;
        }
    }

    broad_has_more
}

fn has_partial_overlap(a: &SelectorParts, b: &SelectorParts) -> bool {
    if !a.types.is_disjoint(&b.types) || !a.ids.is_disjoint(&b.ids) {
        return true;
    }
    a.classes.intersection(&b.classes).nth(1).is_some()
}

/// Greedy single-pass clustering of overlapping selectors.
///
/// Each not-yet-grouped selector starts a group and pulls in every later
/// ungrouped selector that overlaps with it. A selector joins at most one
/// group; overlap is not closed transitively. The group's type is the
/// strongest relation seen (`exact` > `subset` > `partial`).
pub fn find_overlapping_groups<S: AsRef<str>>(selectors: &[S]) -> Vec<SelectorOverlap> {
    let mut grouped = vec![false; selectors.len()];
    let mut overlaps = Vec::new();

    for (i, first) in selectors.iter().enumerate() {
        if grouped[i] {
            continue;
        }
        grouped[i] = true;

        let first = first.as_ref();
        let mut members = vec![first];
        let mut strongest: Option<OverlapType> = None;

        for (j, candidate) in selectors.iter().enumerate().skip(i + 1) {
            if grouped[j] {
                continue;
            }
            let candidate = candidate.as_ref();
            if let Some(kind) = pairwise_overlap(first, candidate) {
                members.push(candidate);
                grouped[j] = true;
                strongest = strongest.max(Some(kind));
            }
        }

        if let Some(overlap_type) = strongest {
            overlaps.push(SelectorOverlap {
                specificity_scores: members.iter().map(|s| selector_specificity(s)).collect(),
                selectors: members.into_iter().map(str::to_string).collect(),
                overlap_type,
            });
        }
    }

    overlaps
}
