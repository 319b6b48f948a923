//! Rule extraction.
//!
//! Flattens a nested style descriptor into per-tier lists of atomic rules.
//! Keys are visited in descriptor order; nested descriptors extend the
//! selector suffix, sequences spread across tiers, scalars land in tier 0.

use crate::rule::{AtomicRule, BreakpointRules};
use crate::style::{StyleDescriptor, StyleValue};
use crate::RuleError;

/// Extract the rules of `style` for an engine with `breakpoints` breakpoints.
///
/// The result always has `breakpoints + 1` tiers.
pub fn extract_rules(
    style: &StyleDescriptor,
    breakpoints: usize,
) -> Result<BreakpointRules, RuleError> {
    let mut rules = BreakpointRules::new(breakpoints + 1);
    extract_into(style, "", &mut rules)?;
    Ok(rules)
}

/// Extract `style` under selector `prefix`, appending to `acc`.
pub fn extract_into(
    style: &StyleDescriptor,
    prefix: &str,
    acc: &mut BreakpointRules,
) -> Result<(), RuleError> {
    for (key, value) in style.iter() {
        match value {
            StyleValue::Scalar(v) => acc.push(0, AtomicRule::new(key, v.as_str(), prefix)),
            StyleValue::Nested(inner) => {
                let selector = format!("{prefix}{key}");
                extract_into(inner, &selector, acc)?;
            }
            StyleValue::PerBreakpoint(values) => {
                if values.len() > acc.tiers() {
                    return Err(RuleError::TooManyValues {
                        property: key.to_string(),
                        len: values.len(),
                        max: acc.tiers(),
                    });
                }
                for (tier, v) in values.iter().enumerate() {
                    if let Some(v) = v {
                        acc.push(tier, AtomicRule::new(key, v.as_str(), prefix));
                    }
                }
            }
        }
    }
    Ok(())
}
