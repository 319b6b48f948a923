//! Style descriptors.
//!
//! A descriptor maps property names (or selector suffixes) to values.
//! Keys keep their insertion order, which is the order rules are extracted in.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// A value inside a style descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A plain CSS value, applied at the base tier.
    Scalar(String),

    /// A nested descriptor. Its key is appended to the selector suffix.
    Nested(StyleDescriptor),

    /// One value per tier: index 0 is the base, index `i` is breakpoint `i`.
    /// `None` leaves that tier unstyled.
    PerBreakpoint(Vec<Option<String>>),
}

/// An ordered mapping from keys to style values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDescriptor {
    entries: IndexMap<String, StyleValue>,
}

impl StyleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StyleDescriptor::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, keeping its original position if it was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleDescriptor {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = StyleDescriptor::new();
        for (key, value) in iter {
            style.insert(key, value);
        }
        style
    }
}

/// Format a number the way it reads in CSS: integers lose their `.0`.
///
/// Integral values beyond 1e15 keep the float formatting so they are never
/// clamped to the `i64` range.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Scalar(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Scalar(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Scalar(value.to_string())
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Scalar(value.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Scalar(format_number(value))
    }
}

impl From<StyleDescriptor> for StyleValue {
    fn from(value: StyleDescriptor) -> Self {
        StyleValue::Nested(value)
    }
}

impl<const N: usize> From<[&str; N]> for StyleValue {
    fn from(values: [&str; N]) -> Self {
        StyleValue::PerBreakpoint(values.iter().map(|v| Some(v.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for StyleValue {
    fn from(values: Vec<Option<&str>>) -> Self {
        StyleValue::PerBreakpoint(values.into_iter().map(|v| v.map(str::to_string)).collect())
    }
}

// =========================================================================
// Deserialization
// =========================================================================

impl<'de> Deserialize<'de> for StyleDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DescriptorVisitor)
    }
}

struct DescriptorVisitor;

impl<'de> Visitor<'de> for DescriptorVisitor {
    type Value = StyleDescriptor;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a style object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, StyleValue>()? {
            entries.insert(key, value);
        }
        Ok(StyleDescriptor { entries })
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = StyleValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, array of values or nested style object")
    }

    // A missing value contributes no rules, like an empty nested object.
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StyleValue::Nested(StyleDescriptor::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StyleValue::Nested(StyleDescriptor::new()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(StyleValue::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(StyleValue::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(StyleValue::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(StyleValue::Scalar(format_number(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StyleValue::Scalar(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(StyleValue::Scalar(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Slot(value)) = seq.next_element::<Slot>()? {
            values.push(value);
        }
        Ok(StyleValue::PerBreakpoint(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        DescriptorVisitor.visit_map(map).map(StyleValue::Nested)
    }
}

/// One entry of a per-breakpoint sequence: a scalar or a null gap.
struct Slot(Option<String>);

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SlotVisitor)
    }
}

struct SlotVisitor;

impl<'de> Visitor<'de> for SlotVisitor {
    type Value = Slot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Slot(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Slot(None))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Slot(Some(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Slot(Some(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Slot(Some(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Slot(Some(format_number(v))))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Slot(Some(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Slot(Some(v)))
    }
}
