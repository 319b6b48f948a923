//! stcss rules
//!
//! The data side of the atomic CSS pipeline: nested style descriptors,
//! the atomic rules they flatten into, and the two pure passes over them.
//!
//! ```text
//! StyleDescriptor → extract_rules() → BreakpointRules → merge_rules() → Vec<AtomicRule>
//! ```
//!
//! # Example
//!
//! ```
//! use stcss_rules::{extract_rules, StyleDescriptor};
//!
//! let style = StyleDescriptor::new().with("color", "red");
//! let rules = extract_rules(&style, 0).unwrap();
//! assert_eq!(rules.tiers(), 1);
//! assert_eq!(rules.get(0).unwrap().len(), 1);
//! ```

pub mod extract;
pub mod merge;
pub mod rule;
pub mod style;

pub use extract::{extract_into, extract_rules};
pub use merge::merge_rules;
pub use rule::{kebab_case, AtomicRule, BreakpointRules};
pub use style::{format_number, StyleDescriptor, StyleValue};

/// Error raised while flattening a style descriptor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    /// A per-breakpoint sequence has more entries than there are tiers.
    #[error("`{property}` has {len} breakpoint values but at most {max} are allowed")]
    TooManyValues {
        property: String,
        len: usize,
        max: usize,
    },
}
