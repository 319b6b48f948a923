//! Rule merging.
//!
//! Combines rule lists of one tier coming from several style sources.
//! Rules are keyed by `(selector, property)`: a later rule replaces the value
//! of an earlier one but keeps the earlier position in the output.

use indexmap::IndexMap;

use crate::rule::AtomicRule;

/// Merge same-tier rule lists, left to right. `None` inputs are skipped.
pub fn merge_rules<'a, I>(rule_sets: I) -> Vec<AtomicRule>
where
    I: IntoIterator<Item = Option<&'a [AtomicRule]>>,
{
    let mut merged: IndexMap<(&'a str, &'a str), &'a AtomicRule> = IndexMap::new();
    for rule in rule_sets.into_iter().flatten().flatten() {
        merged.insert((rule.selector.as_str(), rule.property.as_str()), rule);
    }
    merged.into_values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(property: &str, value: &str, selector: &str) -> AtomicRule {
        AtomicRule::new(property, value, selector)
    }

    #[test]
    fn test_merge_nothing() {
        assert!(merge_rules(Vec::<Option<&[AtomicRule]>>::new()).is_empty());
        assert!(merge_rules([None, None]).is_empty());
    }

    #[test]
    fn test_single_input_collapses_duplicates() {
        let a = vec![
            rule("color", "red", ""),
            rule("margin", "0", ""),
            rule("color", "blue", ""),
        ];
        assert_eq!(
            merge_rules([Some(a.as_slice())]),
            vec![rule("color", "blue", ""), rule("margin", "0", "")]
        );
    }

    #[test]
    fn test_later_input_wins() {
        let a = vec![rule("color", "red", ""), rule("padding", "4px", "")];
        let b = vec![rule("color", "green", "")];
        assert_eq!(
            merge_rules([Some(a.as_slice()), Some(b.as_slice())]),
            vec![rule("color", "green", ""), rule("padding", "4px", "")]
        );
    }

    #[test]
    fn test_selector_is_part_of_key() {
        let a = vec![rule("color", "red", "")];
        let b = vec![rule("color", "blue", ":hover")];
        assert_eq!(
            merge_rules([Some(a.as_slice()), Some(b.as_slice())]),
            vec![rule("color", "red", ""), rule("color", "blue", ":hover")]
        );
    }

    #[test]
    fn test_absent_inputs_skipped() {
        let a = vec![rule("color", "red", "")];
        let c = vec![rule("display", "flex", "")];
        assert_eq!(
            merge_rules([None, Some(a.as_slice()), None, Some(c.as_slice())]),
            vec![rule("color", "red", ""), rule("display", "flex", "")]
        );
    }
}
