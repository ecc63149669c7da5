//! Property source loaders.
//!
//! A [`PropertySourceLoader`] turns one resource into zero or more
//! property sources. Formats that support multiple documents per file
//! (YAML) return one source per document, named
//! `"<name> (document #<i>)"` so each document keeps its own identity
//! through publication. Empty files and empty documents produce
//! nothing, letting the search expansion probe candidates cheaply.

use crate::error::{ConfigLoadError, Result};
use crate::resource::Resource;
use stratum_core::format::properties::PropertiesFormat;
use stratum_core::format::{json::JsonFormat, yaml, FormatParser};
use stratum_core::{PropertyMap, PropertySource};

/// Parses resources of the file extensions it claims.
pub trait PropertySourceLoader {
    /// The file extensions (without dot) this loader understands.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Loads all property sources from the resource.
    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<PropertySource>>;
}

/// Builds the default registry: properties, YAML, JSON, scanned in that
/// order.
pub fn default_loaders() -> Vec<Box<dyn PropertySourceLoader>> {
    vec![
        Box::new(PropertiesSourceLoader),
        Box::new(YamlSourceLoader),
        Box::new(JsonSourceLoader),
    ]
}

fn read(resource: &Resource) -> Result<String> {
    resource.read_to_string().map_err(ConfigLoadError::Io)
}

fn single_source(name: &str, map: PropertyMap) -> Vec<PropertySource> {
    if map.is_empty() {
        return Vec::new();
    }
    vec![PropertySource::new(name, map)]
}

/// Loader for `.properties` files.
pub struct PropertiesSourceLoader;

impl PropertySourceLoader for PropertiesSourceLoader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["properties"]
    }

    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<PropertySource>> {
        let map = PropertiesFormat.parse(&read(resource)?)?;
        Ok(single_source(name, map))
    }
}

/// Loader for `.yml` / `.yaml` files, including multi-document files.
pub struct YamlSourceLoader;

impl PropertySourceLoader for YamlSourceLoader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["yml", "yaml"]
    }

    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<PropertySource>> {
        let documents = yaml::parse_documents(&read(resource)?)?;
        let non_empty: Vec<PropertyMap> =
            documents.into_iter().filter(|map| !map.is_empty()).collect();

        if non_empty.len() == 1 {
            let mut maps = non_empty;
            return Ok(vec![PropertySource::new(name, maps.remove(0))]);
        }
        Ok(non_empty
            .into_iter()
            .enumerate()
            .map(|(index, map)| {
                PropertySource::new(format!("{} (document #{})", name, index), map)
            })
            .collect())
    }
}

/// Loader for `.json` files.
pub struct JsonSourceLoader;

impl PropertySourceLoader for JsonSourceLoader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<PropertySource>> {
        let map = JsonFormat.parse(&read(resource)?)?;
        Ok(single_source(name, map))
    }
}
