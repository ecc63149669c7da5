use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Represents a configuration value of any of the types found in
/// JSON, YAML or properties files.
///
/// This enum is the core building block for dynamic configuration
/// structures. It supports recursive types (Arrays inside Objects, etc.)
/// and uses `IndexMap` to preserve key order, which is crucial for
/// configuration predictability.
///
/// # Example
///
/// ```
/// use stratum_core::PropertyValue;
///
/// // Scalars render to the string form a property lookup returns.
/// let port = PropertyValue::from(8080);
/// assert_eq!(port.render(), Some("8080".to_string()));
///
/// // Profile lists bind from comma-separated strings and from arrays
/// // alike; blank entries disappear.
/// let profiles = PropertyValue::from("dev, db,");
/// assert_eq!(profiles.as_string_array(), vec!["dev", "db"]);
/// assert_eq!(
///     PropertyValue::from(vec!["dev", "db"]).as_string_array(),
///     vec!["dev", "db"],
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (signed 64-bit)
    Integer(i64),
    /// Floating point value (wrapped in OrderedFloat for Eq support)
    Float(OrderedFloat<f64>),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<PropertyValue>),
    /// Object (Map) of values
    Object(IndexMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Returns true if the value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Returns the value as a bool if it matches.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an i64 if it matches.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an f64 if it matches (Integer or Float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(f.into_inner()),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as a str if it matches.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an array slice if it matches.
    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the value as an object (IndexMap) if it matches.
    pub fn as_object(&self) -> Option<&IndexMap<String, PropertyValue>> {
        match self {
            PropertyValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Renders a scalar value as a string.
    ///
    /// Arrays and objects have no single string rendition and return
    /// `None`. Null renders as the empty string, matching how an empty
    /// property value reads in a properties file.
    pub fn render(&self) -> Option<String> {
        match self {
            PropertyValue::Null => Some(String::new()),
            PropertyValue::Bool(b) => Some(b.to_string()),
            PropertyValue::Integer(i) => Some(i.to_string()),
            PropertyValue::Float(f) => Some(f.to_string()),
            PropertyValue::String(s) => Some(s.clone()),
            PropertyValue::Array(_) | PropertyValue::Object(_) => None,
        }
    }

    /// Binds this value to a list of strings.
    ///
    /// A string value is split on commas; an array contributes one entry
    /// per scalar element. Entries are trimmed and empty entries are
    /// dropped, so a value can never produce an anonymous name.
    pub fn as_string_array(&self) -> Vec<String> {
        fn push_trimmed(target: &mut Vec<String>, raw: &str) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                target.push(trimmed.to_string());
            }
        }

        let mut entries = Vec::new();
        match self {
            PropertyValue::String(s) => {
                for part in s.split(',') {
                    push_trimmed(&mut entries, part);
                }
            }
            PropertyValue::Array(items) => {
                for item in items {
                    if let Some(rendered) = item.render() {
                        push_trimmed(&mut entries, &rendered);
                    }
                }
            }
            other => {
                if let Some(rendered) = other.render() {
                    push_trimmed(&mut entries, &rendered);
                }
            }
        }
        entries
    }
}

// ==========================================
// From Conversions for Ergonomics
// ==========================================

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Integer(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Integer(v as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(OrderedFloat(v))
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(v: Vec<T>) -> Self {
        PropertyValue::Array(v.into_iter().map(Into::into).collect())
    }
}
