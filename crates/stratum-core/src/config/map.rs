use crate::config::value::PropertyValue;
use crate::error::{Result, StratumError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A configuration map that holds key-value pairs with support for
/// nested structures.
///
/// This struct wraps an `IndexMap<String, PropertyValue>` to provide
/// specialized methods for configuration handling, such as dot-notation
/// access and parsing from JSON or YAML.
///
/// We use `IndexMap` to ensure iteration order is deterministic
/// (insertion order), which is important for predictable precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PropertyMap {
    #[serde(flatten)]
    inner: IndexMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Creates a new empty property map.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Creates a PropertyMap from an existing IndexMap.
    pub fn from_inner(inner: IndexMap<String, PropertyValue>) -> Self {
        Self { inner }
    }

    /// Returns a reference to the internal map.
    pub fn as_inner(&self) -> &IndexMap<String, PropertyValue> {
        &self.inner
    }

    /// Returns a mutable reference to the internal map.
    pub fn as_inner_mut(&mut self) -> &mut IndexMap<String, PropertyValue> {
        &mut self.inner
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Inserts a key-value pair into the map.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Retrieves a value by key.
    ///
    /// Flat keys are checked first, so a properties-style entry stored
    /// literally as `"server.port"` wins over a nested object. When no
    /// flat key matches, the path is resolved with dot notation through
    /// nested objects, which covers YAML and JSON structures.
    ///
    /// # Example
    /// ```
    /// # use stratum_core::PropertyMap;
    /// let map = PropertyMap::from_json(r#"{"server": {"port": 8080}}"#).unwrap();
    /// assert_eq!(map.get("server.port").unwrap().as_i64(), Some(8080));
    /// ```
    pub fn get(&self, path: &str) -> Option<&PropertyValue> {
        if path.is_empty() {
            return None;
        }

        if let Some(value) = self.inner.get(path) {
            return Some(value);
        }
        if !path.contains('.') {
            return None;
        }

        let parts: Vec<&str> = path.split('.').collect();
        let mut current_value = self.inner.get(parts[0])?;

        for part in &parts[1..] {
            match current_value {
                PropertyValue::Object(map) => {
                    current_value = map.get(*part)?;
                }
                _ => return None,
            }
        }

        Some(current_value)
    }

    /// Returns true if the map contains a value for the given path.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Binds the value at `path` to a list of strings.
    ///
    /// Returns `None` when the path has no value at all. See
    /// [`PropertyValue::as_string_array`] for the binding rules.
    pub fn get_string_array(&self, path: &str) -> Option<Vec<String>> {
        self.get(path).map(PropertyValue::as_string_array)
    }

    /// Parses a JSON string into a PropertyMap.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| StratumError::parse_error("json_source", e.to_string()))
    }

    /// Parses a YAML string into a PropertyMap.
    ///
    /// Only single-document input is accepted here; multi-document files
    /// go through [`crate::format::yaml::parse_documents`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| StratumError::parse_error("yaml_source", e.to_string()))
    }
}

impl From<IndexMap<String, PropertyValue>> for PropertyMap {
    fn from(map: IndexMap<String, PropertyValue>) -> Self {
        PropertyMap { inner: map }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_access() {
        let json = r#"
        {
            "server": {
                "port": 8080,
                "host": "localhost",
                "admin": {
                    "enabled": true
                }
            }
        }
        "#;
        let config = PropertyMap::from_json(json).unwrap();

        assert_eq!(config.get("server.port").unwrap().as_i64(), Some(8080));
        assert_eq!(
            config.get("server.host").unwrap().as_str(),
            Some("localhost")
        );
        assert_eq!(
            config.get("server.admin.enabled").unwrap().as_bool(),
            Some(true)
        );

        // Non-existent
        assert_eq!(config.get("server.ssl"), None);
        assert_eq!(config.get("server.port.sub"), None); // port is integer, not object
    }

    #[test]
    fn test_flat_key_wins_over_nested() {
        let mut map = PropertyMap::new();
        map.insert("spring.profiles", "dev");

        let mut nested = IndexMap::new();
        nested.insert("profiles".to_string(), PropertyValue::from("other"));
        map.insert("spring", PropertyValue::Object(nested));

        assert_eq!(map.get("spring.profiles").unwrap().as_str(), Some("dev"));
    }

    #[test]
    fn test_get_string_array() {
        let mut map = PropertyMap::new();
        map.insert("spring.profiles.include", "db, cache");

        assert_eq!(
            map.get_string_array("spring.profiles.include"),
            Some(vec!["db".to_string(), "cache".to_string()])
        );
        assert_eq!(map.get_string_array("spring.profiles.active"), None);
    }

    #[test]
    fn test_yaml_parse() {
        let map = PropertyMap::from_yaml("server:\n  port: 8080\n").unwrap();
        assert_eq!(map.get("server.port").unwrap().as_i64(), Some(8080));
    }
}
