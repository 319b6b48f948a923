//! stcss engine
//!
//! Turns style descriptors into space-separated atomic class names and
//! keeps the matching stylesheet, either only in memory or mirrored into a
//! live CSSOM stylesheet.
//!
//! ```text
//! st(styles) → extract → merge per tier → transform → ClassCache → StylesheetSink
//! ```
//!
//! An engine instance owns all of its state and is not synchronized;
//! drive it from one thread.
//!
//! # Example
//!
//! ```
//! use stcss_engine::{StCss, StCssConfig, StyleDescriptor};
//!
//! let mut stcss = StCss::new(StCssConfig::new(["40em"]));
//! let style = StyleDescriptor::new().with("color", ["red", "blue"]);
//! assert_eq!(stcss.st([&style]).unwrap(), "st-0 st-1");
//! assert_eq!(
//!     stcss.to_string(),
//!     ".st-0{color:red}@media screen and (min-width: 40em) { .st-1{color:blue} }"
//! );
//! ```

pub mod cache;
pub mod engine;
pub mod sink;
pub mod transform;

pub use cache::{canonical_key, to_base36, ClassCache};
pub use engine::{StCss, StCssConfig, StyleInput};
pub use sink::{
    media_query, render_rule, CssomSheet, LiveSink, MemorySink, RuleBuckets, SheetError,
    StylesheetSink,
};
pub use transform::{apply_transformers, Shorthand, TransformError, Transformer};

pub use stcss_rules::{
    extract_rules, merge_rules, AtomicRule, BreakpointRules, RuleError, StyleDescriptor,
    StyleValue,
};

/// Error from an engine operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StCssError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// A rule was registered at a tier the sink has no bucket for.
    #[error("tier {tier} is out of range for a sink with {tiers} tier(s)")]
    UnknownTier { tier: usize, tiers: usize },
}
