use crate::config::PropertyMap;
use crate::error::Result;

pub mod json;
pub mod properties;
pub mod yaml;

/// A trait for parsing configuration from a string.
pub trait FormatParser: Send + Sync {
    /// Parses the input string into a PropertyMap.
    fn parse(&self, input: &str) -> Result<PropertyMap>;
}
