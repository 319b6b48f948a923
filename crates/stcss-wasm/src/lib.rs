//! WASM bindings for stcss.
//!
//! Exposes the engine to JavaScript as a `StCss` class. When a `document`
//! is available at construction, the instance appends one `<style>` element
//! to `document.head` and writes every new rule into it; otherwise it only
//! accumulates rules and `toString()` is the way to get the CSS out.

pub mod dom;

use log::debug;
use serde::Deserialize;
use stcss_engine::{
    merge_rules, AtomicRule, BreakpointRules, LiveSink, MemorySink, StCss, StCssConfig,
    StCssError, StyleDescriptor, StyleInput, StylesheetSink,
};
use wasm_bindgen::prelude::*;

use crate::dom::DomSheet;

type Engine = StCss<Box<dyn StylesheetSink>>;

/// One argument of `st()`: a style object, or the array `extract()` returned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DecodedStyle {
    Rules(BreakpointRules),
    Descriptor(StyleDescriptor),
}

impl DecodedStyle {
    pub fn as_input(&self) -> StyleInput<'_> {
        match self {
            DecodedStyle::Rules(rules) => StyleInput::Rules(rules),
            DecodedStyle::Descriptor(style) => StyleInput::Descriptor(style),
        }
    }
}

/// Run decoded `st()` arguments through `engine`.
pub fn resolve<S: StylesheetSink>(
    engine: &mut StCss<S>,
    styles: &[DecodedStyle],
) -> Result<String, StCssError> {
    engine.st(styles.iter().map(DecodedStyle::as_input))
}

#[cfg(target_arch = "wasm32")]
fn detect_document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

#[cfg(not(target_arch = "wasm32"))]
fn detect_document() -> Option<web_sys::Document> {
    None
}

/// Build an engine, live when a document is present.
fn build_engine(config: StCssConfig) -> Result<(Engine, bool), StCssError> {
    match detect_document() {
        Some(document) => {
            let sheet = DomSheet::attach(&document)?;
            let sink: Box<dyn StylesheetSink> =
                Box::new(LiveSink::new(sheet, &config.breakpoints)?);
            debug!(
                "attached live stylesheet with {} breakpoint(s)",
                config.breakpoints.len()
            );
            Ok((StCss::with_sink(config, sink), true))
        }
        None => {
            let sink: Box<dyn StylesheetSink> =
                Box::new(MemorySink::new(config.breakpoints.len()));
            Ok((StCss::with_sink(config, sink), false))
        }
    }
}

/// Atomic CSS engine instance.
#[wasm_bindgen(js_name = StCss)]
pub struct JsStCss {
    engine: Engine,
    live: bool,
}

#[wasm_bindgen(js_class = StCss)]
impl JsStCss {
    /// Create an engine for the given ascending breakpoint widths.
    #[wasm_bindgen(constructor)]
    pub fn new(breakpoints: Vec<String>) -> Result<JsStCss, JsError> {
        let (engine, live) =
            build_engine(StCssConfig::new(breakpoints)).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { engine, live })
    }

    /// Resolve an array of style objects (or extracted rule arrays) to class names.
    pub fn st(&mut self, styles: js_sys::Array) -> Result<String, JsError> {
        let decoded = styles
            .iter()
            .map(|value| {
                serde_wasm_bindgen::from_value::<DecodedStyle>(value)
                    .map_err(|e| JsError::new(&e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolve(&mut self.engine, &decoded).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Flatten a style object into `[property, value, selector]` triples per tier.
    pub fn extract(&self, style: JsValue) -> Result<JsValue, JsError> {
        let style: StyleDescriptor =
            serde_wasm_bindgen::from_value(style).map_err(|e| JsError::new(&e.to_string()))?;
        let rules = self
            .engine
            .extract(&style)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&rules).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Merge same-tier rule arrays; `null` and `undefined` entries are skipped.
    #[wasm_bindgen(js_name = mergeRules)]
    pub fn merge_rules(&self, rule_sets: js_sys::Array) -> Result<JsValue, JsError> {
        let sets = rule_sets
            .iter()
            .map(|value| {
                serde_wasm_bindgen::from_value::<Option<Vec<AtomicRule>>>(value)
                    .map_err(|e| JsError::new(&e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let merged = merge_rules(sets.iter().map(Option::as_deref));
        serde_wasm_bindgen::to_value(&merged).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The full stylesheet text.
    #[wasm_bindgen(js_name = toString)]
    pub fn to_css(&self) -> String {
        self.engine.to_string()
    }

    /// Number of registered classes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.engine.len()
    }

    /// Whether rules are written into a live stylesheet.
    #[wasm_bindgen(getter)]
    pub fn live(&self) -> bool {
        self.live
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
