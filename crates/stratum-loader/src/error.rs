//! Error types for configuration loading.

use stratum_core::StratumError;

/// Errors that can occur while loading configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// A found resource could not be read or parsed. This aborts the
    /// whole load; candidates that simply do not exist are skipped
    /// silently instead.
    #[error("failed to load property source from location '{location}'")]
    PropertySource {
        /// The location that was being loaded.
        location: String,
        /// The underlying read or parse failure.
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured search locations resolved to an empty set.
    #[error("search locations must not be empty")]
    EmptyLocations,

    /// The configured search names resolved to an empty set.
    #[error("search names must not be empty")]
    EmptyNames,

    /// An I/O error outside of a specific property source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error raised by the core domain types.
    #[error(transparent)]
    Core(#[from] StratumError),
}

impl ConfigLoadError {
    /// Creates a PropertySource error for the given location.
    pub fn property_source<E>(location: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::PropertySource {
            location: location.into(),
            cause: Box::new(cause),
        }
    }

    /// Returns true if this error names a specific config location.
    pub fn is_property_source_error(&self) -> bool {
        matches!(self, Self::PropertySource { .. })
    }
}

/// Type alias for Results with ConfigLoadError.
pub type Result<T> = std::result::Result<T, ConfigLoadError>;
