//! Rule transformers.
//!
//! A transformer rewrites one atomic rule into zero or more rules. An empty
//! result means "not mine"; the first transformer with a non-empty result
//! wins and the remaining ones are not consulted.

use log::trace;
use stcss_rules::AtomicRule;

/// Error raised by a transformer. Aborts the `st` call that triggered it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Transformer error on `{property}`: {message}")]
pub struct TransformError {
    pub property: String,
    pub message: String,
}

/// Rewrites a rule at a given tier.
pub trait Transformer {
    fn transform(
        &self,
        rule: &AtomicRule,
        breakpoint: usize,
    ) -> Result<Vec<AtomicRule>, TransformError>;
}

impl<F> Transformer for F
where
    F: Fn(&AtomicRule, usize) -> Vec<AtomicRule>,
{
    fn transform(
        &self,
        rule: &AtomicRule,
        breakpoint: usize,
    ) -> Result<Vec<AtomicRule>, TransformError> {
        Ok(self(rule, breakpoint))
    }
}

/// Run `rule` through `transformers` in order.
///
/// Returns the first non-empty result, or the rule itself when none fires.
pub fn apply_transformers(
    transformers: &[Box<dyn Transformer>],
    rule: &AtomicRule,
    breakpoint: usize,
) -> Result<Vec<AtomicRule>, TransformError> {
    for transformer in transformers {
        let rules = transformer.transform(rule, breakpoint)?;
        if !rules.is_empty() {
            trace!(
                "transformed {}{} into {} rule(s)",
                rule.selector,
                rule.property,
                rules.len()
            );
            return Ok(rules);
        }
    }
    Ok(vec![rule.clone()])
}

/// Expands axis shorthands into their longhands.
///
/// `marginX`, `marginY`, `paddingX`, `paddingY` map to the two sides of
/// their axis, `size` maps to `width` and `height`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shorthand;

impl Shorthand {
    fn longhands(property: &str) -> Option<[&'static str; 2]> {
        match property {
            "marginX" => Some(["marginLeft", "marginRight"]),
            "marginY" => Some(["marginTop", "marginBottom"]),
            "paddingX" => Some(["paddingLeft", "paddingRight"]),
            "paddingY" => Some(["paddingTop", "paddingBottom"]),
            "size" => Some(["width", "height"]),
            _ => None,
        }
    }
}

impl Transformer for Shorthand {
    fn transform(
        &self,
        rule: &AtomicRule,
        _breakpoint: usize,
    ) -> Result<Vec<AtomicRule>, TransformError> {
        let Some(longhands) = Self::longhands(&rule.property) else {
            return Ok(Vec::new());
        };
        Ok(longhands
            .iter()
            .map(|property| AtomicRule::new(*property, rule.value.as_str(), rule.selector.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(property: &str, value: &str) -> AtomicRule {
        AtomicRule::new(property, value, "")
    }

    #[test]
    fn test_no_transformers_passes_through() {
        let r = rule("color", "red");
        assert_eq!(apply_transformers(&[], &r, 0).unwrap(), vec![r]);
    }

    #[test]
    fn test_empty_result_passes_through() {
        let none: Box<dyn Transformer> = Box::new(|_: &AtomicRule, _: usize| -> Vec<AtomicRule> { Vec::new() });
        let r = rule("color", "red");
        assert_eq!(apply_transformers(&[none], &r, 0).unwrap(), vec![r]);
    }

    #[test]
    fn test_first_non_empty_wins() {
        let skip: Box<dyn Transformer> = Box::new(|_: &AtomicRule, _: usize| -> Vec<AtomicRule> { Vec::new() });
        let first: Box<dyn Transformer> =
            Box::new(|r: &AtomicRule, _: usize| vec![AtomicRule::new("first", r.value.as_str(), "")]);
        let second: Box<dyn Transformer> =
            Box::new(|r: &AtomicRule, _: usize| vec![AtomicRule::new("second", r.value.as_str(), "")]);
        let out = apply_transformers(&[skip, first, second], &rule("color", "red"), 0).unwrap();
        assert_eq!(out, vec![rule("first", "red")]);
    }

    #[test]
    fn test_breakpoint_is_passed() {
        let only_base: Box<dyn Transformer> = Box::new(|r: &AtomicRule, bp: usize| {
            if bp == 0 {
                vec![AtomicRule::new(r.property.as_str(), "base", "")]
            } else {
                Vec::new()
            }
        });
        let transformers = [only_base];
        let r = rule("color", "red");
        assert_eq!(apply_transformers(&transformers, &r, 0).unwrap(), vec![rule("color", "base")]);
        assert_eq!(apply_transformers(&transformers, &r, 1).unwrap(), vec![r]);
    }

    #[test]
    fn test_error_propagates() {
        struct Failing;
        impl Transformer for Failing {
            fn transform(&self, rule: &AtomicRule, _: usize) -> Result<Vec<AtomicRule>, TransformError> {
                Err(TransformError {
                    property: rule.property.clone(),
                    message: "unsupported".into(),
                })
            }
        }
        let transformers: [Box<dyn Transformer>; 1] = [Box::new(Failing)];
        let err = apply_transformers(&transformers, &rule("color", "red"), 0).unwrap_err();
        assert_eq!(err.to_string(), "Transformer error on `color`: unsupported");
    }

    // =========================================================================
    // Shorthand
    // =========================================================================

    #[test]
    fn test_shorthand_expands_axis() {
        let out = Shorthand
            .transform(&AtomicRule::new("paddingX", "4px", ":hover"), 0)
            .unwrap();
        assert_eq!(
            out,
            vec![
                AtomicRule::new("paddingLeft", "4px", ":hover"),
                AtomicRule::new("paddingRight", "4px", ":hover"),
            ]
        );
    }

    #[test]
    fn test_shorthand_size() {
        let out = Shorthand.transform(&rule("size", "10px"), 2).unwrap();
        assert_eq!(out, vec![rule("width", "10px"), rule("height", "10px")]);
    }

    #[test]
    fn test_shorthand_ignores_other_properties() {
        assert!(Shorthand.transform(&rule("margin", "0"), 0).unwrap().is_empty());
    }
}
