//! Property-level collisions between two rules.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::PropertyCategory;

/// Shorthand property to the longhands it sets, in declaration order.
const SHORTHAND_EXPANSIONS: &[(&str, &[&str])] = &[
    (
        "margin",
        &["margin-top", "margin-right", "margin-bottom", "margin-left"],
    ),
    (
        "padding",
        &["padding-top", "padding-right", "padding-bottom", "padding-left"],
    ),
    ("border", &["border-width", "border-style", "border-color"]),
    ("offset", &["offset-x", "offset-y"]),
];

/// Reporting buckets. First match wins, so `border-color` is a color.
const PROPERTY_CATEGORIES: &[(PropertyCategory, &[&str])] = &[
    (
        PropertyCategory::Positioning,
        &["position", "top", "right", "bottom", "left", "dock", "offset"],
    ),
    (
        PropertyCategory::Sizing,
        &["width", "height", "min-width", "max-width", "min-height", "max-height"],
    ),
    (
        PropertyCategory::Spacing,
        &[
            "margin",
            "margin-top",
            "margin-right",
            "margin-bottom",
            "margin-left",
            "padding",
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ],
    ),
    (
        PropertyCategory::Colors,
        &["color", "background", "background-color", "border-color", "tint"],
    ),
    (
        PropertyCategory::Borders,
        &[
            "border",
            "border-top",
            "border-right",
            "border-bottom",
            "border-left",
            "border-width",
            "border-style",
            "border-color",
        ],
    ),
    (
        PropertyCategory::Layout,
        &["display", "layer", "layout", "align", "content-align"],
    ),
    (
        PropertyCategory::Text,
        &["text-align", "text-style", "text-opacity"],
    ),
    (
        PropertyCategory::Scrolling,
        &["scrollbar-color", "scrollbar-size", "overflow", "overflow-x", "overflow-y"],
    ),
];

/// Longhands set by `property`, if it is a known shorthand.
pub fn longhands(property: &str) -> Option<&'static [&'static str]> {
    SHORTHAND_EXPANSIONS
        .iter()
        .find(|(shorthand, _)| *shorthand == property)
        .map(|(_, longhands)| *longhands)
}

/// Add an entry for every longhand of each declared shorthand, unless the
/// longhand is declared explicitly. The shorthand's raw value is used as-is.
pub fn expand_properties(properties: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut expanded = properties.clone();

    for (name, value) in properties {
        if let Some(children) = longhands(name) {
            for child in children {
                if !properties.contains_key(*child) {
                    expanded.insert((*child).to_string(), value.clone());
                }
            }
        }
    }

    expanded
}

/// Property names on which two rules collide.
///
/// A name collides when both expanded rules set it to different values, or
/// when one rule declares a shorthand and the other declares one of its
/// longhands, unless both rules declare that longhand explicitly with the
/// same value.
pub fn property_conflicts(
    a: &BTreeMap<String, String>,
    b: &BTreeMap<String, String>,
) -> BTreeSet<String> {
    let expanded_a = expand_properties(a);
    let expanded_b = expand_properties(b);

    let mut conflicts: BTreeSet<String> = expanded_a
        .iter()
        .filter(|(name, value)| {
            expanded_b
                .get(name.as_str())
                .is_some_and(|other| other != *value)
        })
        .map(|(name, _)| name.clone())
        .collect();

    conflicts.extend(shorthand_conflicts(a, b));
    conflicts.extend(shorthand_conflicts(b, a));
    conflicts
}

fn shorthand_conflicts<'a>(
    shorthand_side: &'a BTreeMap<String, String>,
    longhand_side: &'a BTreeMap<String, String>,
) -> impl Iterator<Item = String> + 'a {
    SHORTHAND_EXPANSIONS
        .iter()
        .filter(|(shorthand, _)| shorthand_side.contains_key(*shorthand))
        .flat_map(|(_, children)| children.iter())
        .filter(|child| {
            longhand_side
                .get(**child)
                .is_some_and(|value| shorthand_side.get(**child) != Some(value))
        })
        .map(|child| (*child).to_string())
}

pub fn categorize_property(property: &str) -> PropertyCategory {
    PROPERTY_CATEGORIES
        .iter()
        .find(|(_, names)| names.contains(&property))
        .map_or(PropertyCategory::Other, |(category, _)| *category)
}

/// Group property names by semantic category; unknown names land in `other`.
pub fn categorize_properties<I, S>(properties: I) -> BTreeMap<PropertyCategory, Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut categorized: BTreeMap<PropertyCategory, Vec<String>> = BTreeMap::new();
    for property in properties {
        let property = property.as_ref();
        categorized
            .entry(categorize_property(property))
            .or_default()
            .push(property.to_string());
    }
    categorized
}
