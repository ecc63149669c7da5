//! The public entry point for configuration loading.
//!
//! A [`ConfigFileProcessor`] runs one load against an environment:
//! resolve search locations and names, discover and parse candidate
//! files, work through the profile queue, and publish the resulting
//! property sources. The processor itself only carries the programmatic
//! overrides and the deferred log; all per-load state lives in the
//! one-shot internal loader.

use crate::deferred::DeferredLog;
use crate::error::{ConfigLoadError, Result};
use crate::loader::Loader;
use crate::loaders::{default_loaders, PropertySourceLoader};
use crate::resource::ResourceLoader;
use stratum_core::Environment;

/// The "active profiles" property name.
pub const ACTIVE_PROFILES_PROPERTY: &str = "spring.profiles.active";

/// The "include profiles" property name.
pub const INCLUDE_PROFILES_PROPERTY: &str = "spring.profiles.include";

/// The per-document profile declaration property name.
pub const PROFILES_PROPERTY: &str = "spring.profiles";

/// The "config name" property name.
pub const CONFIG_NAME_PROPERTY: &str = "spring.config.name";

/// The "config location" property name.
pub const CONFIG_LOCATION_PROPERTY: &str = "spring.config.location";

/// The "config additional location" property name.
pub const CONFIG_ADDITIONAL_LOCATION_PROPERTY: &str = "spring.config.additional-location";

/// Loads configuration files into an [`Environment`].
pub struct ConfigFileProcessor {
    loaders: Vec<Box<dyn PropertySourceLoader>>,
    search_locations: Option<String>,
    search_names: Option<String>,
    logger: DeferredLog,
}

impl ConfigFileProcessor {
    /// Creates a processor with the default loader registry
    /// (properties, YAML, JSON).
    pub fn new() -> Self {
        Self::with_loaders(default_loaders())
    }

    /// Creates a processor with a custom loader registry.
    pub fn with_loaders(loaders: Vec<Box<dyn PropertySourceLoader>>) -> Self {
        Self {
            loaders,
            search_locations: None,
            search_names: None,
            logger: DeferredLog::new(),
        }
    }

    /// Overrides the built-in search locations with a comma-separated
    /// list. Entries are searched last-to-first, like a map merge:
    /// later entries take precedence.
    pub fn set_search_locations(&mut self, locations: impl Into<String>) -> Result<()> {
        let locations = locations.into();
        if locations.trim().is_empty() {
            return Err(ConfigLoadError::EmptyLocations);
        }
        self.search_locations = Some(locations);
        Ok(())
    }

    /// Overrides the base file names (excluding extension) as a
    /// comma-separated list.
    pub fn set_search_names(&mut self, names: impl Into<String>) -> Result<()> {
        let names = names.into();
        if names.trim().is_empty() {
            return Err(ConfigLoadError::EmptyNames);
        }
        self.search_names = Some(names);
        Ok(())
    }

    /// Runs one load against the environment.
    ///
    /// On success the environment holds the published property sources
    /// and its active profile set reflects everything processed. On
    /// failure the environment keeps whatever profile state had already
    /// been applied; it should be considered unusable.
    pub fn post_process_environment(
        &mut self,
        environment: &mut Environment,
        resource_loader: &dyn ResourceLoader,
    ) -> Result<()> {
        Loader::new(
            environment,
            resource_loader,
            &self.loaders,
            self.search_locations.as_deref(),
            self.search_names.as_deref(),
            &mut self.logger,
        )
        .load()
    }

    /// Replays buffered load-time log records through `tracing`.
    ///
    /// Call once a subscriber is installed.
    pub fn replay_logs(&mut self) {
        self.logger.replay();
    }

    /// Number of buffered log records awaiting replay.
    pub fn buffered_log_records(&self) -> usize {
        self.logger.len()
    }
}

impl Default for ConfigFileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
