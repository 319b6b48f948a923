//! The `st` entry point.
//!
//! [`StCss`] owns the class cache and a stylesheet sink and wires the
//! pipeline together: every input is extracted into per-tier rule lists,
//! each tier is merged across inputs, and every merged rule is transformed
//! and resolved to class names.

use std::borrow::Cow;
use std::fmt;

use stcss_rules::{extract_rules, merge_rules, AtomicRule, BreakpointRules, StyleDescriptor};

use crate::cache::ClassCache;
use crate::sink::{media_query, CssomSheet, LiveSink, MemorySink, StylesheetSink};
use crate::transform::{apply_transformers, Transformer};
use crate::StCssError;

/// Engine configuration.
pub struct StCssConfig {
    /// Breakpoint widths in ascending order, as CSS lengths (`40em`, `768px`).
    pub breakpoints: Vec<String>,
    /// Consulted in order for every rule; the first non-empty result wins.
    pub transformers: Vec<Box<dyn Transformer>>,
}

impl StCssConfig {
    pub fn new<I, B>(breakpoints: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        Self {
            breakpoints: breakpoints.into_iter().map(Into::into).collect(),
            transformers: Vec::new(),
        }
    }

    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }
}

impl fmt::Debug for StCssConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StCssConfig")
            .field("breakpoints", &self.breakpoints)
            .field("transformers", &self.transformers.len())
            .finish()
    }
}

/// One argument of [`StCss::st`]: a descriptor, or rules extracted earlier.
#[derive(Debug, Clone, Copy)]
pub enum StyleInput<'a> {
    Descriptor(&'a StyleDescriptor),
    Rules(&'a BreakpointRules),
}

impl<'a> From<&'a StyleDescriptor> for StyleInput<'a> {
    fn from(style: &'a StyleDescriptor) -> Self {
        StyleInput::Descriptor(style)
    }
}

impl<'a> From<&'a BreakpointRules> for StyleInput<'a> {
    fn from(rules: &'a BreakpointRules) -> Self {
        StyleInput::Rules(rules)
    }
}

/// Atomic CSS engine.
///
/// Class names are assigned in first-seen order and never change for the
/// lifetime of the instance. The engine is single-threaded: callers must
/// not share one instance between threads without external locking.
pub struct StCss<S = MemorySink> {
    config: StCssConfig,
    cache: ClassCache,
    sink: S,
}

impl StCss<MemorySink> {
    /// An engine that only accumulates rules in memory.
    pub fn new(config: StCssConfig) -> Self {
        let sink = MemorySink::new(config.breakpoints.len());
        Self::with_sink(config, sink)
    }
}

impl<S: CssomSheet> StCss<LiveSink<S>> {
    /// An engine that also writes every new rule into `sheet`.
    ///
    /// One empty media block per breakpoint is appended to `sheet` up front.
    pub fn live(config: StCssConfig, sheet: S) -> Result<Self, StCssError> {
        let sink = LiveSink::new(sheet, &config.breakpoints)?;
        Ok(Self::with_sink(config, sink))
    }
}

impl<S: StylesheetSink> StCss<S> {
    /// An engine writing to `sink`, which should have one bucket per tier.
    /// Rules for a tier the sink lacks fail with [`StCssError::UnknownTier`].
    pub fn with_sink(config: StCssConfig, sink: S) -> Self {
        Self {
            config,
            cache: ClassCache::new(),
            sink,
        }
    }

    pub fn breakpoints(&self) -> &[String] {
        &self.config.breakpoints
    }

    /// Number of tiers: the base plus one per breakpoint.
    pub fn tiers(&self) -> usize {
        self.config.breakpoints.len() + 1
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Rendered rules of one tier, in registration order.
    pub fn bucket(&self, tier: usize) -> &[String] {
        self.sink.buckets().get(tier)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Flatten `style` into one rule list per tier.
    pub fn extract(&self, style: &StyleDescriptor) -> Result<BreakpointRules, StCssError> {
        Ok(extract_rules(style, self.config.breakpoints.len())?)
    }

    /// Resolve `styles` to a space-separated list of class names.
    ///
    /// Later inputs override earlier ones per selector and property. Calling
    /// this again with the same inputs returns the same string and registers
    /// nothing new. On error, rules registered before the failure stay
    /// registered.
    pub fn st<'a, I>(&mut self, styles: I) -> Result<String, StCssError>
    where
        I: IntoIterator,
        I::Item: Into<StyleInput<'a>>,
    {
        let rule_sets = styles
            .into_iter()
            .map(|style| {
                let input: StyleInput<'a> = style.into();
                match input {
                    StyleInput::Descriptor(d) => self.extract(d).map(Cow::Owned),
                    StyleInput::Rules(r) => Ok(Cow::Borrowed(r)),
                }
            })
            .collect::<Result<Vec<Cow<'a, BreakpointRules>>, StCssError>>()?;

        let mut classes = Vec::new();
        for tier in 0..self.tiers() {
            let merged = merge_rules(rule_sets.iter().map(|rules| rules.get(tier)));
            for rule in &merged {
                classes.push(self.class_name(rule, tier)?);
            }
        }
        Ok(classes.join(" ").trim().to_string())
    }

    /// Class name(s) of one rule at `breakpoint`, after transformers ran.
    pub fn class_name(
        &mut self,
        rule: &AtomicRule,
        breakpoint: usize,
    ) -> Result<String, StCssError> {
        let rules = apply_transformers(&self.config.transformers, rule, breakpoint)?;
        let mut names = Vec::with_capacity(rules.len());
        for rule in &rules {
            names.push(self.cache.resolve(rule, breakpoint, &mut self.sink)?);
        }
        Ok(names.join(" "))
    }
}

/// The full stylesheet: sorted base rules, then one media block per
/// breakpoint with its sorted rules.
impl<S: StylesheetSink> fmt::Display for StCss<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buckets = self.sink.buckets();
        f.write_str(&buckets.sorted(0))?;
        for (i, bp) in self.config.breakpoints.iter().enumerate() {
            write!(f, "{} {{ {} }}", media_query(bp), buckets.sorted(i + 1))?;
        }
        Ok(())
    }
}
