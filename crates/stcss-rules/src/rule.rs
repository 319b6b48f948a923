//! Atomic rules and per-breakpoint rule lists.

use serde::{Deserialize, Serialize};

/// One CSS declaration scoped to a selector suffix.
///
/// Serializes as a `[property, value, selector]` triple so extracted
/// rules can round-trip through JavaScript unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct AtomicRule {
    /// Camel-case property name, e.g. `backgroundColor`.
    pub property: String,
    pub value: String,
    /// Suffix appended to the class selector, e.g. `:hover` or ` > li`.
    pub selector: String,
}

impl AtomicRule {
    pub fn new(
        property: impl Into<String>,
        value: impl Into<String>,
        selector: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            selector: selector.into(),
        }
    }

    /// The property in CSS spelling (`backgroundColor` → `background-color`).
    pub fn css_property(&self) -> String {
        kebab_case(&self.property)
    }
}

impl From<(String, String, String)> for AtomicRule {
    fn from((property, value, selector): (String, String, String)) -> Self {
        Self {
            property,
            value,
            selector,
        }
    }
}

impl From<AtomicRule> for (String, String, String) {
    fn from(rule: AtomicRule) -> Self {
        (rule.property, rule.value, rule.selector)
    }
}

/// Convert a camel-case identifier to kebab-case.
///
/// Every uppercase letter becomes `-` plus its lowercase form, so vendor
/// prefixes written as `WebkitBoxShadow` come out as `-webkit-box-shadow`.
pub fn kebab_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for c in ident.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rules grouped by tier: index 0 is the base, index `i` is breakpoint `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointRules(Vec<Vec<AtomicRule>>);

impl BreakpointRules {
    /// Empty rule lists for `tiers` tiers.
    pub fn new(tiers: usize) -> Self {
        Self(vec![Vec::new(); tiers])
    }

    pub fn tiers(&self) -> usize {
        self.0.len()
    }

    /// Rules of one tier, `None` when the tier is absent.
    pub fn get(&self, tier: usize) -> Option<&[AtomicRule]> {
        self.0.get(tier).map(Vec::as_slice)
    }

    /// Append to an existing tier. Callers check the tier against [`tiers`](Self::tiers).
    pub(crate) fn push(&mut self, tier: usize, rule: AtomicRule) {
        self.0[tier].push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &[AtomicRule]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// True when every tier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }
}

impl From<Vec<Vec<AtomicRule>>> for BreakpointRules {
    fn from(tiers: Vec<Vec<AtomicRule>>) -> Self {
        Self(tiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("color"), "color");
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(kebab_case("WebkitTransition"), "-webkit-transition");
        assert_eq!(kebab_case("--brand"), "--brand");
    }

    #[test]
    fn test_css_property() {
        let rule = AtomicRule::new("fontSize", "12px", "");
        assert_eq!(rule.css_property(), "font-size");
    }

    #[test]
    fn test_serialize_as_triple() {
        let rule = AtomicRule::new("color", "red", ":hover");
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"["color","red",":hover"]"#);
    }

    #[test]
    fn test_breakpoint_rules_from_json() {
        let rules: BreakpointRules =
            serde_json::from_str(r#"[[["color","red",""]],[]]"#).unwrap();
        assert_eq!(rules.tiers(), 2);
        assert_eq!(rules.get(0), Some(&[AtomicRule::new("color", "red", "")][..]));
        assert_eq!(rules.get(1).map(<[_]>::len), Some(0));
        assert_eq!(rules.get(2), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(BreakpointRules::new(3).is_empty());
        let rules = BreakpointRules::from(vec![vec![], vec![AtomicRule::new("a", "b", "")]]);
        assert!(!rules.is_empty());
    }
}
