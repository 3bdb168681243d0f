//! Best-effort structural decomposition of selector strings.
//!
//! This is a hinting parser, not a validator: it never fails, and malformed
//! input simply yields fewer parts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::types::SelectorParts;

/// Characters that end an id, class, or pseudo name inside a compound.
const NAME_TERMINATORS: [char; 4] = ['.', '#', ':', '['];

/// Decompose `selector` into its type, class, id, pseudo-class, and
/// attribute components.
///
/// Combinators (`>`, `+`, `~`, whitespace) are all treated as compound
/// boundaries. Pseudo-elements (`::name`) are skipped.
pub fn parse_selector(selector: &str) -> SelectorParts {
    let mut parts = SelectorParts::default();
    let normalized: String = selector
        .chars()
        .map(|c| if matches!(c, '>' | '+' | '~') { ' ' } else { c })
        .collect();

    for compound in normalized.split_whitespace() {
        parse_compound(compound, &mut parts);
    }

    parts
}

fn parse_compound(compound: &str, parts: &mut SelectorParts) {
    let chars: Vec<char> = compound.chars().collect();
    let mut pending_type = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '#' => {
                flush_type(&mut pending_type, parts);
                let (name, next) = take_name(&chars, i + 1);
                insert_named(&mut parts.ids, name);
                i = next;
            }
            '.' => {
                flush_type(&mut pending_type, parts);
                let (name, next) = take_name(&chars, i + 1);
                insert_named(&mut parts.classes, name);
                i = next;
            }
            ':' => {
                flush_type(&mut pending_type, parts);
                if chars.get(i + 1) == Some(&':') {
                    let (_, next) = take_name(&chars, i + 2);
                    i = next;
                } else {
                    let (name, next) = take_name(&chars, i + 1);
                    insert_named(&mut parts.pseudos, name);
                    i = next;
                }
            }
            '[' => {
                flush_type(&mut pending_type, parts);
                match chars[i..].iter().position(|&c| c == ']') {
                    Some(offset) => {
                        let end = i + offset;
                        parts.attributes.insert(chars[i..=end].iter().collect());
                        i = end + 1;
                    }
                    // Unterminated: drop the bracket and keep scanning.
                    None => i += 1,
                }
            }
            c => {
                pending_type.push(c);
                i += 1;
            }
        }
    }

    flush_type(&mut pending_type, parts);
}

fn take_name(chars: &[char], start: usize) -> (String, usize) {
    let start = start.min(chars.len());
    let end = chars[start..]
        .iter()
        .position(|c| NAME_TERMINATORS.contains(c))
        .map_or(chars.len(), |offset| start + offset);
    (chars[start..end].iter().collect(), end)
}

fn insert_named(set: &mut BTreeSet<String>, name: String) {
    if !name.is_empty() {
        set.insert(name);
    }
}

fn flush_type(pending: &mut String, parts: &mut SelectorParts) {
    if !pending.is_empty() {
        parts.types.insert(std::mem::take(pending));
    }
}

/// Coarse shape of a selector, used in selector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorKind {
    Combinator,
    Descendant,
    PseudoElement,
    PseudoClass,
    Id,
    Class,
    Attribute,
    Type,
}

impl SelectorKind {
    pub fn of(selector: &str) -> Self {
        let selector = selector.trim();
        if selector.contains(&['>', '+', '~'][..]) {
            SelectorKind::Combinator
        } else if selector.contains(char::is_whitespace) {
            SelectorKind::Descendant
        } else if selector.contains("::") {
            SelectorKind::PseudoElement
        } else if selector.contains(':') {
            SelectorKind::PseudoClass
        } else if selector.starts_with('#') {
            SelectorKind::Id
        } else if selector.starts_with('.') {
            SelectorKind::Class
        } else if selector.starts_with('[') {
            SelectorKind::Attribute
        } else {
            SelectorKind::Type
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectorKind::Combinator => "combinator",
            SelectorKind::Descendant => "descendant",
            SelectorKind::PseudoElement => "pseudo-element",
            SelectorKind::PseudoClass => "pseudo-class",
            SelectorKind::Id => "id",
            SelectorKind::Class => "class",
            SelectorKind::Attribute => "attribute",
            SelectorKind::Type => "type",
        })
    }
}
