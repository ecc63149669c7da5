use crate::config::map::PropertyMap;
use serde::{Deserialize, Serialize};

/// Represents a source of configuration properties.
///
/// A property source acts as a named container for a set of
/// configuration properties (represented by `PropertyMap`). It usually
/// corresponds to one parsed document of a configuration file, e.g.
/// `applicationConfig: [classpath:/application.yml]`.
///
/// The name is the only identity that matters once a source reaches the
/// environment; publication deduplicates by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySource {
    /// The name of the property source.
    pub name: String,

    /// The actual configuration properties.
    pub properties: PropertyMap,
}

impl PropertySource {
    /// Creates a new PropertySource.
    pub fn new(name: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Creates a PropertySource from flat key/value pairs.
    ///
    /// Handy for tests and for seeding an environment with override
    /// properties before loading.
    pub fn from_pairs<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut properties = PropertyMap::new();
        for (key, value) in pairs {
            properties.insert(key.into(), value.into());
        }
        Self::new(name, properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let source = PropertySource::from_pairs("testProperties", [("a", "1"), ("b", "2")]);
        assert_eq!(source.name, "testProperties");
        assert_eq!(source.properties.get("a").unwrap().as_str(), Some("1"));
        assert_eq!(source.properties.len(), 2);
    }
}
