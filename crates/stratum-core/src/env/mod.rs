//! The process-wide configuration environment.
//!
//! An [`Environment`] is an ordered, named collection of property
//! sources plus the active and default profile sets. Downstream
//! subsystems read configuration through it; the loading phase is the
//! only writer.

pub mod placeholder;
pub mod profiles;
pub mod sources;

pub use sources::MutableSources;

use crate::config::PropertyValue;

/// Profiles that apply when nothing was activated explicitly.
const RESERVED_DEFAULT_PROFILE: &str = "default";

/// The configuration facade consulted by the rest of the process.
///
/// Property lookup walks the source list in precedence order and
/// returns the first match. Profile state lives here as well because
/// document selection during loading depends on it.
#[derive(Debug, Clone)]
pub struct Environment {
    sources: MutableSources,
    active_profiles: Vec<String>,
    default_profiles: Vec<String>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an empty environment with the reserved `default` profile
    /// as its only default profile.
    pub fn new() -> Self {
        Self {
            sources: MutableSources::new(),
            active_profiles: Vec::new(),
            default_profiles: vec![RESERVED_DEFAULT_PROFILE.to_string()],
        }
    }

    /// Returns the property source list.
    pub fn sources(&self) -> &MutableSources {
        &self.sources
    }

    /// Returns the property source list for mutation.
    pub fn sources_mut(&mut self) -> &mut MutableSources {
        &mut self.sources
    }

    /// Returns the raw value for `key` from the highest-precedence
    /// source that contains it.
    pub fn property_value(&self, key: &str) -> Option<&PropertyValue> {
        self.sources
            .iter()
            .find_map(|source| source.properties.get(key))
    }

    /// Returns the value for `key` rendered as a string.
    ///
    /// Composite values (arrays, objects) have no string rendition and
    /// behave like a missing property here.
    pub fn property(&self, key: &str) -> Option<String> {
        self.property_value(key).and_then(PropertyValue::render)
    }

    /// Returns true if any source contains `key`.
    pub fn contains_property(&self, key: &str) -> bool {
        self.property_value(key).is_some()
    }

    /// Binds the value for `key` to a list of strings.
    pub fn string_array_property(&self, key: &str) -> Option<Vec<String>> {
        self.property_value(key)
            .map(PropertyValue::as_string_array)
    }

    /// Resolves `${...}` placeholders in `text` against this
    /// environment's properties.
    pub fn resolve_placeholders(&self, text: &str) -> String {
        placeholder::resolve(text, &|key| self.property(key))
    }

    /// Returns the active profiles in declaration order.
    pub fn active_profiles(&self) -> &[String] {
        &self.active_profiles
    }

    /// Returns the default profiles.
    pub fn default_profiles(&self) -> &[String] {
        &self.default_profiles
    }

    /// Appends a profile to the active set if not already present.
    pub fn add_active_profile(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.active_profiles.contains(&name) {
            self.active_profiles.push(name);
        }
    }

    /// Replaces the active profile set.
    pub fn set_active_profiles(&mut self, names: impl IntoIterator<Item = String>) {
        self.active_profiles = names.into_iter().collect();
    }

    /// Replaces the default profile set.
    pub fn set_default_profiles(&mut self, names: impl IntoIterator<Item = String>) {
        self.default_profiles = names.into_iter().collect();
    }

    /// Returns true if any of the given profile expressions matches the
    /// current profile state.
    ///
    /// A bare name matches when it is active, or, while no profile is
    /// active at all, when it is one of the default profiles.
    pub fn accepts_profiles(&self, expressions: &[String]) -> bool {
        profiles::matches_any(expressions, |name| self.is_profile_active(name))
    }

    fn is_profile_active(&self, name: &str) -> bool {
        if self.active_profiles.iter().any(|p| p == name) {
            return true;
        }
        self.active_profiles.is_empty() && self.default_profiles.iter().any(|p| p == name)
    }
}
