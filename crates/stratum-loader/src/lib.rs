//! # Stratum Loader
//!
//! Profile-aware configuration file loading for the Stratum resolver.
//!
//! Given a set of search locations, base file names and profile
//! selectors, this crate discovers configuration files, parses them
//! (several documents per file where the format allows it), decides
//! which documents apply under the declared profiles, and publishes
//! the resulting layers into an [`Environment`] as an ordered list of
//! property sources.
//!
//! Profiles are discovered inside the very files being loaded:
//! documents may declare `spring.profiles`, activate profiles via
//! `spring.profiles.active` or pull others in via
//! `spring.profiles.include`, and the loader's work queue grows
//! accordingly while it is drained.
//!
//! ## Example
//!
//! ```no_run
//! use stratum_core::Environment;
//! use stratum_loader::{ConfigFileProcessor, DefaultResourceLoader};
//!
//! # fn main() -> Result<(), stratum_loader::ConfigLoadError> {
//! let mut environment = Environment::new();
//! let resource_loader = DefaultResourceLoader::new().add_resource_root("./resources");
//!
//! let mut processor = ConfigFileProcessor::new();
//! processor.post_process_environment(&mut environment, &resource_loader)?;
//! processor.replay_logs();
//!
//! let port = environment.property("server.port");
//! # let _ = port;
//! # Ok(())
//! # }
//! ```
//!
//! [`Environment`]: stratum_core::Environment

pub mod deferred;
mod document;
pub mod error;
mod loader;
pub mod loaders;
mod locations;
pub mod processor;
pub mod profile;
pub mod publisher;
pub mod resource;

// Re-exports
pub use deferred::DeferredLog;
pub use error::{ConfigLoadError, Result};
pub use loaders::{
    default_loaders, JsonSourceLoader, PropertiesSourceLoader, PropertySourceLoader,
    YamlSourceLoader,
};
pub use processor::ConfigFileProcessor;
pub use profile::Profile;
pub use publisher::{move_default_properties_to_end, DEFAULT_PROPERTIES};
pub use resource::{DefaultResourceLoader, Resource, ResourceLoader};

// Re-export stratum_core for consumers
pub use stratum_core;
