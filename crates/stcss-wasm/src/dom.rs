//! Live stylesheet backed by the browser CSSOM.

use stcss_engine::{CssomSheet, SheetError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssGroupingRule, CssStyleSheet, Document, HtmlStyleElement};

/// A `CSSStyleSheet` owned by a `<style>` element the engine created.
pub struct DomSheet {
    sheet: CssStyleSheet,
}

impl DomSheet {
    /// Append a fresh `<style>` element to `document.head` and wrap its sheet.
    pub fn attach(document: &Document) -> Result<Self, SheetError> {
        let head = document
            .head()
            .ok_or_else(|| sheet_error("document has no <head>"))?;
        let element = document.create_element("style").map_err(js_error)?;
        head.append_child(&element).map_err(js_error)?;

        let sheet = element
            .dyn_into::<HtmlStyleElement>()
            .map_err(|_| sheet_error("created element is not a <style>"))?
            .sheet()
            .ok_or_else(|| sheet_error("<style> element has no sheet"))?
            .dyn_into::<CssStyleSheet>()
            .map_err(|_| sheet_error("sheet is not a CSSStyleSheet"))?;
        Ok(Self { sheet })
    }
}

impl CssomSheet for DomSheet {
    fn rule_count(&self) -> usize {
        self.sheet
            .css_rules()
            .map(|rules| rules.length() as usize)
            .unwrap_or(0)
    }

    fn insert_rule(&mut self, css: &str, index: usize) -> Result<(), SheetError> {
        self.sheet
            .insert_rule_with_index(css, index as u32)
            .map(|_| ())
            .map_err(js_error)
    }

    fn append_to_group(&mut self, index: usize, css: &str) -> Result<(), SheetError> {
        let group = self
            .sheet
            .css_rules()
            .map_err(js_error)?
            .item(index as u32)
            .ok_or_else(|| sheet_error(&format!("no rule at index {index}")))?
            .dyn_into::<CssGroupingRule>()
            .map_err(|_| sheet_error(&format!("rule at index {index} is not a media block")))?;
        let end = group.css_rules().length();
        group
            .insert_rule_with_index(css, end)
            .map(|_| ())
            .map_err(js_error)
    }
}

fn sheet_error(message: &str) -> SheetError {
    SheetError {
        message: message.to_string(),
    }
}

fn js_error(err: JsValue) -> SheetError {
    SheetError {
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
