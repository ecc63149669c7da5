use crate::config::{PropertyMap, PropertyValue};
use crate::error::{Result, StratumError};
use crate::format::FormatParser;
use indexmap::IndexMap;

/// Parser for Java-style `.properties` content.
///
/// Keys are kept flat exactly as written (`server.port=8080` stores the
/// literal key `server.port`), which is how properties files behave in
/// the systems this format comes from. Dot-notation lookup on
/// `PropertyMap` resolves flat keys before descending into nested
/// objects, so flat and nested sources read the same way.
pub struct PropertiesFormat;

impl FormatParser for PropertiesFormat {
    fn parse(&self, input: &str) -> Result<PropertyMap> {
        let mut root = IndexMap::new();

        for (line_num, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            if let Some((key, value)) = split_property_line(line) {
                root.insert(
                    key.trim().to_string(),
                    PropertyValue::String(value.trim().to_string()),
                );
            } else {
                return Err(StratumError::parse_error(
                    "properties",
                    format!("Invalid syntax at line {}: missing separator", line_num + 1),
                ));
            }
        }

        Ok(PropertyMap::from_inner(root))
    }
}

fn split_property_line(line: &str) -> Option<(&str, &str)> {
    // Split on first '=' or ':'
    line.split_once(['=', ':'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties() {
        let input = "
        # Server config
        server.port=8080
        server.host: localhost
        app.name = Test App
        ";

        let parser = PropertiesFormat;
        let config = parser.parse(input).unwrap();

        assert_eq!(config.get("server.port").unwrap().as_str(), Some("8080"));
        assert_eq!(
            config.get("server.host").unwrap().as_str(),
            Some("localhost")
        );
        assert_eq!(config.get("app.name").unwrap().as_str(), Some("Test App"));
    }

    #[test]
    fn test_keys_stay_flat() {
        let parser = PropertiesFormat;
        let config = parser.parse("spring.profiles=dev\n").unwrap();

        assert!(config.as_inner().contains_key("spring.profiles"));
        assert_eq!(config.get("spring.profiles").unwrap().as_str(), Some("dev"));
    }

    #[test]
    fn test_bang_comments_and_blank_lines() {
        let parser = PropertiesFormat;
        let config = parser.parse("! legacy comment\n\nkey=value\n").unwrap();

        assert_eq!(config.len(), 1);
        assert_eq!(config.get("key").unwrap().as_str(), Some("value"));
    }

    #[test]
    fn test_missing_separator_is_an_error() {
        let parser = PropertiesFormat;
        let result = parser.parse("not a property line\n");

        assert!(result.unwrap_err().is_parse_error());
    }

    #[test]
    fn test_empty_value() {
        let parser = PropertiesFormat;
        let config = parser.parse("key=\n").unwrap();

        assert_eq!(config.get("key").unwrap().as_str(), Some(""));
    }
}
