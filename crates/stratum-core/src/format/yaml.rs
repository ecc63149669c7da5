use crate::config::PropertyMap;
use crate::error::{Result, StratumError};
use crate::format::FormatParser;
use serde::Deserialize;

pub struct YamlFormat;

impl FormatParser for YamlFormat {
    fn parse(&self, input: &str) -> Result<PropertyMap> {
        PropertyMap::from_yaml(input)
    }
}

/// Parses a YAML string that may contain several `---` separated
/// documents into one PropertyMap per document.
///
/// Empty documents are skipped. A document whose root is not a mapping
/// is a parse error.
pub fn parse_documents(input: &str) -> Result<Vec<PropertyMap>> {
    let mut documents = Vec::new();

    for (index, deserializer) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value = serde_yaml::Value::deserialize(deserializer)
            .map_err(|e| StratumError::parse_error("yaml_source", e.to_string()))?;

        match value {
            serde_yaml::Value::Null => continue,
            serde_yaml::Value::Mapping(_) => {
                let map: PropertyMap = serde_yaml::from_value(value)
                    .map_err(|e| StratumError::parse_error("yaml_source", e.to_string()))?;
                documents.push(map);
            }
            _ => {
                return Err(StratumError::parse_error(
                    "yaml_source",
                    format!("document #{} must be a mapping", index),
                ));
            }
        }
    }

    Ok(documents)
}
