use std::fmt;
use std::hash::{Hash, Hasher};

/// A named configuration profile.
///
/// Default profiles are the ones injected when nothing was activated
/// explicitly; the flag lets the loader drop them from its work queue
/// as soon as a real profile shows up. Identity is the name alone, the
/// flag never participates in equality or hashing.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    default_profile: bool,
}

impl Profile {
    /// Creates a regular profile. The name must be non-empty; callers
    /// bind names through [`PropertyValue::as_string_array`], which
    /// never yields empty entries.
    ///
    /// [`PropertyValue::as_string_array`]: stratum_core::PropertyValue::as_string_array
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.trim().is_empty(), "profile name must not be empty");
        Self {
            name,
            default_profile: false,
        }
    }

    /// Creates a profile flagged as a default profile.
    pub fn new_default(name: impl Into<String>) -> Self {
        Self {
            default_profile: true,
            ..Self::new(name)
        }
    }

    /// Returns the profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this profile was injected as a default.
    pub fn is_default_profile(&self) -> bool {
        self.default_profile
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Profile {}

impl Hash for Profile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
