//! Typed property registry.
//!
//! A processing unit declares named, typed configuration slots up front;
//! the loader then populates them from `UserConfig` items found in the
//! document. The registry owns the slot storage outright: after a load the
//! owner reads its values back through the typed accessors. Declaring a
//! name twice overwrites the earlier binding, last write wins.

use crate::diagnostics::Diagnostics;
use std::collections::BTreeMap;
use std::fmt;

/// The six supported property kinds, as a tagged value. A slot's tag is
/// fixed at declaration time; `apply` dispatches on it.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
    Double(f64),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    DoubleList(Vec<f64>),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Str(_) => PropertyKind::Str,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Double(_) => PropertyKind::Double,
            PropertyValue::StrList(_) => PropertyKind::StrList,
            PropertyValue::IntList(_) => PropertyKind::IntList,
            PropertyValue::DoubleList(_) => PropertyKind::DoubleList,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Str,
    Int,
    Double,
    StrList,
    IntList,
    DoubleList,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Str => "string",
            PropertyKind::Int => "int",
            PropertyKind::Double => "double",
            PropertyKind::StrList => "string list",
            PropertyKind::IntList => "int list",
            PropertyKind::DoubleList => "double list",
        };
        write!(f, "{}", name)
    }
}

/// Name-to-slot map for one processing unit.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    slots: BTreeMap<String, PropertyValue>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slot under `name` with its initial value. The value's tag
    /// becomes the slot's fixed kind. No validation on `name`; redeclaring
    /// overwrites.
    pub fn declare(&mut self, name: impl Into<String>, initial: PropertyValue) {
        self.slots.insert(name.into(), initial);
    }

    pub fn declare_str(&mut self, name: impl Into<String>, initial: impl Into<String>) {
        self.declare(name, PropertyValue::Str(initial.into()));
    }

    pub fn declare_int(&mut self, name: impl Into<String>, initial: i64) {
        self.declare(name, PropertyValue::Int(initial));
    }

    pub fn declare_double(&mut self, name: impl Into<String>, initial: f64) {
        self.declare(name, PropertyValue::Double(initial));
    }

    pub fn declare_str_list(&mut self, name: impl Into<String>, initial: Vec<String>) {
        self.declare(name, PropertyValue::StrList(initial));
    }

    pub fn declare_int_list(&mut self, name: impl Into<String>, initial: Vec<i64>) {
        self.declare(name, PropertyValue::IntList(initial));
    }

    pub fn declare_double_list(&mut self, name: impl Into<String>, initial: Vec<f64>) {
        self.declare(name, PropertyValue::DoubleList(initial));
    }

    /// Populate the slot named `name` from a raw string value.
    ///
    /// Scalars parse with locale-independent `str::parse`; a failed numeric
    /// parse records a warning and stores zero. Lists split the raw value on
    /// whitespace and replace the slot's prior contents wholesale, so
    /// re-applying the same configuration is idempotent. An unknown name
    /// records exactly one warning and drops the value; it usually means a
    /// typo in the document.
    pub fn apply(&mut self, name: &str, raw: &str, diagnostics: &mut Diagnostics) {
        let Some(slot) = self.slots.get_mut(name) else {
            diagnostics.warning(format!(
                "user property not found: \"{}\", value not set",
                name
            ));
            return;
        };

        match slot {
            PropertyValue::Str(value) => {
                *value = raw.to_string();
            }
            PropertyValue::Int(value) => {
                *value = parse_int_lenient(raw, name, diagnostics);
            }
            PropertyValue::Double(value) => {
                *value = parse_double_lenient(raw, name, diagnostics);
            }
            PropertyValue::StrList(values) => {
                values.clear();
                values.extend(raw.split_whitespace().map(str::to_string));
            }
            PropertyValue::IntList(values) => {
                values.clear();
                for word in raw.split_whitespace() {
                    values.push(parse_int_lenient(word, name, diagnostics));
                }
            }
            PropertyValue::DoubleList(values) => {
                values.clear();
                for word in raw.split_whitespace() {
                    values.push(parse_double_lenient(word, name, diagnostics));
                }
            }
        }
    }

    pub fn kind(&self, name: &str) -> Option<PropertyKind> {
        self.slots.get(name).map(PropertyValue::kind)
    }

    pub fn str_value(&self, name: &str) -> Option<&str> {
        match self.slots.get(name) {
            Some(PropertyValue::Str(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int_value(&self, name: &str) -> Option<i64> {
        match self.slots.get(name) {
            Some(PropertyValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn double_value(&self, name: &str) -> Option<f64> {
        match self.slots.get(name) {
            Some(PropertyValue::Double(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn str_list(&self, name: &str) -> Option<&[String]> {
        match self.slots.get(name) {
            Some(PropertyValue::StrList(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int_list(&self, name: &str) -> Option<&[i64]> {
        match self.slots.get(name) {
            Some(PropertyValue::IntList(v)) => Some(v),
            _ => None,
        }
    }

    pub fn double_list(&self, name: &str) -> Option<&[f64]> {
        match self.slots.get(name) {
            Some(PropertyValue::DoubleList(v)) => Some(v),
            _ => None,
        }
    }
}

/// Permissive integer parse: non-numeric text yields zero, with a recorded
/// warning. The zero fallback matches what documents written against the
/// legacy loader expect.
pub(crate) fn parse_int_lenient(raw: &str, what: &str, diagnostics: &mut Diagnostics) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            diagnostics.warning(format!(
                "cannot parse \"{}\" as an integer for \"{}\", using 0",
                raw, what
            ));
            0
        }
    }
}

/// Permissive floating-point parse, same fallback rule as the integer one.
pub(crate) fn parse_double_lenient(raw: &str, what: &str, diagnostics: &mut Diagnostics) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            diagnostics.warning(format!(
                "cannot parse \"{}\" as a number for \"{}\", using 0",
                raw, what
            ));
            0.0
        }
    }
}
