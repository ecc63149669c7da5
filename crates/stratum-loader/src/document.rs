//! Documents and document filters.
//!
//! One physical file can contain several documents (multi-document
//! YAML). Each parsed property source becomes a [`Document`] carrying
//! the profile metadata declared inside it; filters then decide which
//! documents apply under the profile currently being processed.

use crate::processor::{ACTIVE_PROFILES_PROPERTY, INCLUDE_PROFILES_PROPERTY, PROFILES_PROPERTY};
use crate::profile::Profile;
use stratum_core::{Environment, PropertySource};

/// One parsed configuration document.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    /// The document's key/value payload.
    pub property_source: PropertySource,
    /// Profile expressions from the document's own `spring.profiles`.
    /// Empty for an unprofiled document.
    pub profiles: Vec<String>,
    /// Profiles the document activates via `spring.profiles.active`.
    pub active_profiles: Vec<Profile>,
    /// Profiles the document pulls in via `spring.profiles.include`.
    pub include_profiles: Vec<Profile>,
}

impl Document {
    /// Binds profile metadata out of a parsed property source.
    pub fn from_source(property_source: PropertySource) -> Self {
        let profiles = property_source
            .properties
            .get_string_array(PROFILES_PROPERTY)
            .unwrap_or_default();
        let active_profiles = bind_profiles(&property_source, ACTIVE_PROFILES_PROPERTY);
        let include_profiles = bind_profiles(&property_source, INCLUDE_PROFILES_PROPERTY);

        Self {
            property_source,
            profiles,
            active_profiles,
            include_profiles,
        }
    }

    /// Returns true if the document declares no profile restriction.
    pub fn is_unprofiled(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn bind_profiles(source: &PropertySource, key: &str) -> Vec<Profile> {
    source
        .properties
        .get_string_array(key)
        .unwrap_or_default()
        .into_iter()
        .map(Profile::new)
        .collect()
}

/// The two filter shapes used by the loading algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterKind {
    /// Selects the documents owned by a specific profile, or unprofiled
    /// documents when the filter has no profile.
    Positive,
    /// Selects profiled documents that apply to the final active set;
    /// used only by the trailing no-profile pass.
    Negative,
}

/// Factory side of a filter: the pass decides the kind, the expansion
/// step decides the profile.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentFilterFactory {
    kind: FilterKind,
}

impl DocumentFilterFactory {
    pub fn positive() -> Self {
        Self {
            kind: FilterKind::Positive,
        }
    }

    pub fn negative() -> Self {
        Self {
            kind: FilterKind::Negative,
        }
    }

    pub fn filter(&self, profile: Option<Profile>) -> DocumentFilter {
        DocumentFilter {
            kind: self.kind,
            profile,
        }
    }
}

/// Predicate over documents, evaluated against the environment's
/// current profile state.
#[derive(Debug, Clone)]
pub(crate) struct DocumentFilter {
    kind: FilterKind,
    profile: Option<Profile>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document, environment: &Environment) -> bool {
        match self.kind {
            FilterKind::Positive => match &self.profile {
                None => document.is_unprofiled(),
                Some(profile) => {
                    document.profiles.iter().any(|p| p == profile.name())
                        && environment.accepts_profiles(&document.profiles)
                }
            },
            FilterKind::Negative => {
                self.profile.is_none()
                    && !document.is_unprofiled()
                    && environment.accepts_profiles(&document.profiles)
            }
        }
    }
}
