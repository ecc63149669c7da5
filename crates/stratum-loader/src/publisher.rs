//! Publication of loaded buckets into the environment.
//!
//! Buckets are walked in reverse insertion order so that the profile
//! processed last contributes the sources with the highest precedence.
//! The first published source respects an existing `defaultProperties`
//! source (developer-supplied defaults stay below everything loaded
//! from files); every further source chains after the previous one.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::Result;
use crate::profile::Profile;
use stratum_core::{Environment, PropertySource};

/// Name of the developer-supplied defaults source.
pub const DEFAULT_PROPERTIES: &str = "defaultProperties";

pub(crate) fn publish(
    environment: &mut Environment,
    loaded: IndexMap<Option<Profile>, Vec<PropertySource>>,
) -> Result<()> {
    let mut buckets: Vec<Vec<PropertySource>> = loaded.into_values().collect();
    buckets.reverse();

    let mut last_added: Option<String> = None;
    let mut added: HashSet<String> = HashSet::new();

    for bucket in buckets {
        for source in bucket {
            if !added.insert(source.name.clone()) {
                continue;
            }
            let name = source.name.clone();
            match &last_added {
                None => {
                    if environment.sources().contains(DEFAULT_PROPERTIES) {
                        environment
                            .sources_mut()
                            .add_before(DEFAULT_PROPERTIES, source)?;
                    } else {
                        environment.sources_mut().add_last(source);
                    }
                }
                Some(previous) => {
                    environment.sources_mut().add_after(previous, source)?;
                }
            }
            last_added = Some(name);
        }
    }
    Ok(())
}

/// Moves a `defaultProperties` source to the very end of the list.
///
/// The container applies this once loading is complete, so that
/// developer-supplied defaults end up with the lowest precedence no
/// matter where they were inserted originally.
pub fn move_default_properties_to_end(environment: &mut Environment) {
    if let Some(defaults) = environment.sources_mut().remove(DEFAULT_PROPERTIES) {
        environment.sources_mut().add_last(defaults);
    }
}
