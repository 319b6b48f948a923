//! Class-name cache.
//!
//! Every distinct `(rule, tier)` pair gets one class name, `st-<n>`, where
//! `n` is the base-36 position at which the pair was first seen. Entries are
//! never evicted, so a name stays valid for the lifetime of its engine.

use std::collections::HashMap;

use log::{debug, trace};
use stcss_rules::AtomicRule;

use crate::sink::{render_rule, StylesheetSink};
use crate::StCssError;

/// Cache identity of a rule at a tier: `property,value,selector` followed
/// directly by the tier index.
pub fn canonical_key(rule: &AtomicRule, breakpoint: usize) -> String {
    format!(
        "{},{},{}{}",
        rule.property, rule.value, rule.selector, breakpoint
    )
}

/// Lowercase base-36 representation of `n`.
pub fn to_base36(mut n: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".into();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[n % 36]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// Append-only map from canonical key to class name.
#[derive(Debug, Default)]
pub struct ClassCache {
    names: HashMap<String, String>,
}

impl ClassCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// The name the next new rule will receive.
    pub fn next_name(&self) -> String {
        format!("st-{}", to_base36(self.names.len()))
    }

    /// Return the class name of `rule` at `breakpoint`, registering it with
    /// `sink` the first time it is seen.
    ///
    /// The rule enters the cache only after the sink accepted it, so a
    /// failed registration leaves both unchanged.
    pub fn resolve<S: StylesheetSink + ?Sized>(
        &mut self,
        rule: &AtomicRule,
        breakpoint: usize,
        sink: &mut S,
    ) -> Result<String, StCssError> {
        let key = canonical_key(rule, breakpoint);
        if let Some(name) = self.names.get(&key) {
            trace!("cache hit {key} -> {name}");
            return Ok(name.clone());
        }

        let name = self.next_name();
        let css = render_rule(rule, &name);
        debug!("registering {name} at breakpoint {breakpoint}: {css}");
        sink.register(css, breakpoint)?;
        self.names.insert(key, name.clone());
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key(&AtomicRule::new("color", "red", ""), 0), "color,red,0");
        assert_eq!(
            canonical_key(&AtomicRule::new("color", "red", ":hover"), 2),
            "color,red,:hover2"
        );
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "a");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn test_resolve_assigns_sequential_names() {
        let mut cache = ClassCache::new();
        let mut sink = MemorySink::new(1);
        let red = AtomicRule::new("color", "red", "");
        let blue = AtomicRule::new("color", "blue", "");

        assert_eq!(cache.resolve(&red, 0, &mut sink).unwrap(), "st-0");
        assert_eq!(cache.resolve(&blue, 0, &mut sink).unwrap(), "st-1");
        assert_eq!(cache.resolve(&red, 1, &mut sink).unwrap(), "st-2");
        assert_eq!(cache.len(), 3);
        assert_eq!(sink.buckets().get(0), &[".st-0{color:red}", ".st-1{color:blue}"]);
        assert_eq!(sink.buckets().get(1), &[".st-2{color:red}"]);
    }

    #[test]
    fn test_resolve_hit_does_not_register() {
        let mut cache = ClassCache::new();
        let mut sink = MemorySink::new(0);
        let rule = AtomicRule::new("margin", "0", "");

        let first = cache.resolve(&rule, 0, &mut sink).unwrap();
        let second = cache.resolve(&rule, 0, &mut sink).unwrap();
        assert_eq!(first, second);
        assert_eq!(sink.buckets().len(), 1);
        assert_eq!(cache.get("margin,0,0"), Some("st-0"));
    }

    #[test]
    fn test_names_past_ten_use_letters() {
        let mut cache = ClassCache::new();
        let mut sink = MemorySink::new(0);
        for i in 0..10 {
            cache
                .resolve(&AtomicRule::new("zIndex", i.to_string(), ""), 0, &mut sink)
                .unwrap();
        }
        assert_eq!(cache.next_name(), "st-a");
    }
}
