use crate::config::PropertyMap;
use crate::error::Result;
use crate::format::FormatParser;

pub struct JsonFormat;

impl FormatParser for JsonFormat {
    fn parse(&self, input: &str) -> Result<PropertyMap> {
        PropertyMap::from_json(input)
    }
}
