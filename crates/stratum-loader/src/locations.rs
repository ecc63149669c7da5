//! Search location and search name resolution.
//!
//! Locations and names come from environment overrides with built-in
//! fallbacks. Comma-separated values are split, trimmed,
//! placeholder-resolved and then reversed before deduplication, so the
//! last entry the user wrote is the first one searched and therefore
//! the one with the highest precedence after publication.

use crate::error::{ConfigLoadError, Result};
use crate::processor::{
    CONFIG_ADDITIONAL_LOCATION_PROPERTY, CONFIG_LOCATION_PROPERTY, CONFIG_NAME_PROPERTY,
};
use crate::resource::{CLASSPATH_URL_PREFIX, FILE_URL_PREFIX};
use indexmap::IndexSet;
use stratum_core::Environment;

// Note the order is from least to most specific (last one wins).
const DEFAULT_SEARCH_LOCATIONS: &str = "classpath:/,classpath:/config/,file:./,file:./config/";

const DEFAULT_NAMES: &str = "application";

/// Resolves the ordered search locations and base file names for one
/// load pass.
pub(crate) struct LocationResolver<'a> {
    environment: &'a Environment,
    search_locations: Option<&'a str>,
    search_names: Option<&'a str>,
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        environment: &'a Environment,
        search_locations: Option<&'a str>,
        search_names: Option<&'a str>,
    ) -> Self {
        Self {
            environment,
            search_locations,
            search_names,
        }
    }

    /// The ordered set of locations to search, most specific first.
    pub fn search_locations(&self) -> Result<IndexSet<String>> {
        let locations = if self.environment.contains_property(CONFIG_LOCATION_PROPERTY) {
            self.locations_from_property(CONFIG_LOCATION_PROPERTY)
        } else {
            let mut locations =
                self.locations_from_property(CONFIG_ADDITIONAL_LOCATION_PROPERTY);
            locations.extend(
                self.resolved_set(self.search_locations.unwrap_or(DEFAULT_SEARCH_LOCATIONS)),
            );
            locations
        };

        if locations.is_empty() {
            return Err(ConfigLoadError::EmptyLocations);
        }
        Ok(locations)
    }

    /// The ordered set of base file names to search under folder
    /// locations.
    pub fn search_names(&self) -> Result<IndexSet<String>> {
        let names = if self.environment.contains_property(CONFIG_NAME_PROPERTY) {
            let property = self.environment.property(CONFIG_NAME_PROPERTY).unwrap_or_default();
            self.resolved_set(&property)
        } else {
            self.resolved_set(self.search_names.unwrap_or(DEFAULT_NAMES))
        };

        if names.is_empty() {
            return Err(ConfigLoadError::EmptyNames);
        }
        Ok(names)
    }

    fn locations_from_property(&self, property_name: &str) -> IndexSet<String> {
        let mut locations = IndexSet::new();
        if let Some(value) = self.environment.property(property_name) {
            for path in self.resolved_set(&value) {
                // Paths still carrying a placeholder are kept verbatim.
                if !path.contains('$') {
                    let cleaned = clean_path(&path);
                    if is_url(&cleaned) {
                        locations.insert(cleaned);
                    } else {
                        locations.insert(format!("{}{}", FILE_URL_PREFIX, cleaned));
                    }
                } else {
                    locations.insert(path);
                }
            }
        }
        locations
    }

    /// Comma-split, trim, resolve placeholders, then reverse into an
    /// insertion-ordered set.
    fn resolved_set(&self, value: &str) -> IndexSet<String> {
        let resolved = self.environment.resolve_placeholders(value);
        let mut entries: Vec<String> = resolved
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();
        entries.reverse();
        entries.into_iter().collect()
    }
}

/// Normalizes `.` and `..` segments and backslashes in a path while
/// keeping any URL prefix and a trailing slash intact.
pub(crate) fn clean_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let (prefix, rest) = match normalized.find(':') {
        Some(index) if is_url(&normalized) => normalized.split_at(index + 1),
        _ => ("", normalized.as_str()),
    };

    let absolute = rest.starts_with('/');
    let trailing_slash = rest.ends_with('/') && rest.len() > 1;

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&last) if last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut result = String::from(prefix);
    if absolute {
        result.push('/');
    } else if rest.starts_with("./") || rest == "." {
        // Keep the explicit current-dir marker; `file:./config/` is the
        // conventional spelling for working-directory locations.
        result.push_str("./");
    }
    result.push_str(&segments.join("/"));
    if trailing_slash && !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// Returns true if the value already carries a URL scheme.
pub(crate) fn is_url(path: &str) -> bool {
    if path.starts_with(CLASSPATH_URL_PREFIX) {
        return true;
    }
    match path.find(':') {
        Some(index) if index >= 2 => path[..index].chars().all(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}
