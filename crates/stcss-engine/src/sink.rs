//! Stylesheet sinks.
//!
//! A sink receives every newly registered rule. All sinks keep the rendered
//! rules in per-tier buckets; [`LiveSink`] also writes them into a CSSOM
//! stylesheet. The sheet layout it maintains is:
//!
//! ```text
//! base rules ... | @media (bp 1) { ... } | ... | @media (bp B) { ... }
//! ```
//!
//! Base rules are always inserted before the first media block.

use log::debug;
use stcss_rules::AtomicRule;

use crate::StCssError;

/// Render `rule` as a single CSS rule for class `class_name`.
pub fn render_rule(rule: &AtomicRule, class_name: &str) -> String {
    format!(
        ".{class_name}{}{{{}:{}}}",
        rule.selector,
        rule.css_property(),
        rule.value
    )
}

/// The media-query prelude of a breakpoint, e.g. `@media screen and (min-width: 40em)`.
pub fn media_query(breakpoint: &str) -> String {
    format!("@media screen and (min-width: {breakpoint})")
}

/// Rendered rules per tier, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBuckets(Vec<Vec<String>>);

impl RuleBuckets {
    pub fn new(tiers: usize) -> Self {
        Self(vec![Vec::new(); tiers])
    }

    pub fn tiers(&self) -> usize {
        self.0.len()
    }

    /// Rules of one tier; empty for unknown tiers.
    pub fn get(&self, tier: usize) -> &[String] {
        self.0.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of rules across all tiers.
    pub fn len(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail unless `tier` has a bucket.
    fn check(&self, tier: usize) -> Result<(), StCssError> {
        if tier < self.tiers() {
            Ok(())
        } else {
            Err(StCssError::UnknownTier {
                tier,
                tiers: self.tiers(),
            })
        }
    }

    fn push(&mut self, tier: usize, css: String) -> Result<(), StCssError> {
        self.check(tier)?;
        self.0[tier].push(css);
        Ok(())
    }

    /// Rules of one tier, sorted and concatenated.
    pub fn sorted(&self, tier: usize) -> String {
        let mut rules = self.get(tier).to_vec();
        rules.sort();
        rules.concat()
    }
}

/// Destination for newly registered rules.
pub trait StylesheetSink {
    /// Store a rendered rule at `breakpoint`. Called once per class name.
    fn register(&mut self, css: String, breakpoint: usize) -> Result<(), StCssError>;

    fn buckets(&self) -> &RuleBuckets;
}

impl<S: StylesheetSink + ?Sized> StylesheetSink for Box<S> {
    fn register(&mut self, css: String, breakpoint: usize) -> Result<(), StCssError> {
        (**self).register(css, breakpoint)
    }

    fn buckets(&self) -> &RuleBuckets {
        (**self).buckets()
    }
}

/// Accumulates rules in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buckets: RuleBuckets,
}

impl MemorySink {
    /// A sink for an engine with `breakpoints` breakpoints.
    pub fn new(breakpoints: usize) -> Self {
        Self {
            buckets: RuleBuckets::new(breakpoints + 1),
        }
    }
}

impl StylesheetSink for MemorySink {
    fn register(&mut self, css: String, breakpoint: usize) -> Result<(), StCssError> {
        self.buckets.push(breakpoint, css)
    }

    fn buckets(&self) -> &RuleBuckets {
        &self.buckets
    }
}

/// A stylesheet rejected an insertion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Stylesheet error: {message}")]
pub struct SheetError {
    pub message: String,
}

/// The subset of the CSSOM `CSSStyleSheet` interface the live sink needs.
pub trait CssomSheet {
    /// Number of top-level rules.
    fn rule_count(&self) -> usize;

    /// Insert a top-level rule at `index`.
    fn insert_rule(&mut self, css: &str, index: usize) -> Result<(), SheetError>;

    /// Append a rule at the end of the grouping rule (a media block) at `index`.
    fn append_to_group(&mut self, index: usize, css: &str) -> Result<(), SheetError>;
}

impl<S: CssomSheet + ?Sized> CssomSheet for &mut S {
    fn rule_count(&self) -> usize {
        (**self).rule_count()
    }

    fn insert_rule(&mut self, css: &str, index: usize) -> Result<(), SheetError> {
        (**self).insert_rule(css, index)
    }

    fn append_to_group(&mut self, index: usize, css: &str) -> Result<(), SheetError> {
        (**self).append_to_group(index, css)
    }
}

/// Accumulates rules in memory and mirrors them into a live stylesheet.
#[derive(Debug)]
pub struct LiveSink<S> {
    sheet: S,
    media_blocks: usize,
    buckets: RuleBuckets,
}

impl<S: CssomSheet> LiveSink<S> {
    /// Wrap `sheet`, appending one empty media block per breakpoint in order.
    ///
    /// If the sheet rejects a block, the blocks inserted before it are left
    /// in the sheet; discard the sheet rather than reusing it.
    pub fn new<B: AsRef<str>>(mut sheet: S, breakpoints: &[B]) -> Result<Self, StCssError> {
        for bp in breakpoints {
            let css = format!("{} {{}}", media_query(bp.as_ref()));
            let at = sheet.rule_count();
            sheet.insert_rule(&css, at)?;
            debug!("created media block {css} at {at}");
        }
        Ok(Self {
            sheet,
            media_blocks: breakpoints.len(),
            buckets: RuleBuckets::new(breakpoints.len() + 1),
        })
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }
}

impl<S: CssomSheet> StylesheetSink for LiveSink<S> {
    fn register(&mut self, css: String, breakpoint: usize) -> Result<(), StCssError> {
        self.buckets.check(breakpoint)?;
        let first_media = self.sheet.rule_count().saturating_sub(self.media_blocks);
        if breakpoint == 0 {
            self.sheet.insert_rule(&css, first_media)?;
        } else {
            self.sheet.append_to_group(first_media + breakpoint - 1, &css)?;
        }
        self.buckets.push(breakpoint, css)
    }

    fn buckets(&self) -> &RuleBuckets {
        &self.buckets
    }
}
