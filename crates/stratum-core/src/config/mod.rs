pub mod map;
pub mod source;
pub mod value;

pub use map::PropertyMap;
pub use source::PropertySource;
pub use value::PropertyValue;
