#![allow(dead_code)]
use stratum_core::{PropertyMap, PropertySource};

/// Helper to create a PropertyMap from a JSON string slice.
/// Panics if the JSON is invalid (intended for tests).
pub fn map_from_json(json: &str) -> PropertyMap {
    PropertyMap::from_json(json).expect("Failed to create test map from JSON")
}

/// Helper to create a named PropertySource from JSON content.
pub fn source(name: &str, json_content: &str) -> PropertySource {
    PropertySource::new(name, map_from_json(json_content))
}
