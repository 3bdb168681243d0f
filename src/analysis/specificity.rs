use crate::types::{SelectorParts, Specificity};

use super::selector::parse_selector;

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Reduce selector parts to `(ids, classes, types)`.
///
/// Attributes and pseudo-classes count as classes. Any non-empty selector
/// scores at least one type point, since every selector resolves against a
/// concrete widget type.
pub fn specificity(parts: &SelectorParts) -> Specificity {
    let ids = count(parts.ids.len());
    let classes = count(parts.classes.len() + parts.attributes.len() + parts.pseudos.len());
    let mut types = count(parts.types.len());

    if ids > 0 || classes > 0 || types > 0 {
        types = types.max(1);
    }

    Specificity::new(ids, classes, types)
}

pub fn selector_specificity(selector: &str) -> Specificity {
    specificity(&parse_selector(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_component_kind() {
        assert_eq!(selector_specificity("#id"), Specificity::new(1, 0, 1));
        assert_eq!(selector_specificity(".class"), Specificity::new(0, 1, 1));
        assert_eq!(selector_specificity("Button"), Specificity::new(0, 0, 1));
        assert_eq!(selector_specificity("Button.class"), Specificity::new(0, 1, 1));
        assert_eq!(selector_specificity("Button#id.class"), Specificity::new(1, 1, 1));
        assert_eq!(selector_specificity("Button:hover:focus"), Specificity::new(0, 2, 1));
        assert_eq!(selector_specificity("Input[disabled]"), Specificity::new(0, 1, 1));
    }

    #[test]
    fn type_count_is_not_floored_above_actual_types() {
        assert_eq!(
            selector_specificity("Screen Container Button"),
            Specificity::new(0, 0, 3)
        );
    }

    #[test]
    fn pseudo_elements_do_not_count() {
        assert_eq!(
            selector_specificity("Input::placeholder"),
            Specificity::new(0, 0, 1)
        );
    }

    #[test]
    fn empty_selector_scores_zero() {
        assert_eq!(selector_specificity(""), Specificity::default());
        assert_eq!(selector_specificity("[broken"), Specificity::new(0, 0, 1));
    }
}
