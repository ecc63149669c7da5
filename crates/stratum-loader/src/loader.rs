//! The profile-aware loading algorithm.
//!
//! One [`Loader`] drives a single load pass: it seeds a work queue of
//! profiles, expands (location, name, profile, extension) tuples into
//! candidate resources, parses them through a per-pass document cache,
//! filters the documents, and collects the survivors into per-profile
//! buckets. Profile discovery is self-expanding: accepted documents may
//! activate or include further profiles, which are appended to the
//! queue while it is being drained. A final no-profile pass picks up
//! profiled documents that match the finished active set, at lowest
//! precedence, before everything is published into the environment.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};

use crate::deferred::DeferredLog;
use crate::document::{Document, DocumentFilter, DocumentFilterFactory};
use crate::error::{ConfigLoadError, Result};
use crate::loaders::PropertySourceLoader;
use crate::locations::LocationResolver;
use crate::processor::{ACTIVE_PROFILES_PROPERTY, INCLUDE_PROFILES_PROPERTY};
use crate::profile::Profile;
use crate::publisher;
use crate::resource::{Resource, ResourceLoader};
use stratum_core::Environment;

/// How an accepted document lands in its bucket.
#[derive(Debug, Clone, Copy)]
enum DocumentConsumer {
    /// Append to the pass profile's bucket.
    Append,
    /// Prepend to the bucket unless a source with the same name exists
    /// in any bucket already.
    PrependIfNew,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentsCacheKey {
    loader: usize,
    location: String,
}

pub(crate) struct Loader<'a> {
    environment: &'a mut Environment,
    resource_loader: &'a dyn ResourceLoader,
    loaders: &'a [Box<dyn PropertySourceLoader>],
    search_locations: Option<&'a str>,
    search_names: Option<&'a str>,
    logger: &'a mut DeferredLog,

    pending_profiles: VecDeque<Option<Profile>>,
    processed_profiles: Vec<Option<Profile>>,
    activated_profiles: bool,
    loaded: IndexMap<Option<Profile>, Vec<stratum_core::PropertySource>>,
    document_cache: HashMap<DocumentsCacheKey, Vec<Document>>,
}

impl<'a> Loader<'a> {
    pub fn new(
        environment: &'a mut Environment,
        resource_loader: &'a dyn ResourceLoader,
        loaders: &'a [Box<dyn PropertySourceLoader>],
        search_locations: Option<&'a str>,
        search_names: Option<&'a str>,
        logger: &'a mut DeferredLog,
    ) -> Self {
        Self {
            environment,
            resource_loader,
            loaders,
            search_locations,
            search_names,
            logger,
            pending_profiles: VecDeque::new(),
            processed_profiles: Vec::new(),
            activated_profiles: false,
            loaded: IndexMap::new(),
            document_cache: HashMap::new(),
        }
    }

    /// Runs the whole load and publishes the result.
    pub fn load(mut self) -> Result<()> {
        self.initialize_profiles();

        while let Some(profile) = self.pending_profiles.pop_front() {
            if let Some(p) = &profile {
                if !p.is_default_profile() {
                    self.environment.add_active_profile(p.name().to_string());
                }
            }
            self.load_pass(
                profile.clone(),
                DocumentFilterFactory::positive(),
                DocumentConsumer::Append,
            )?;
            self.processed_profiles.push(profile);
        }

        self.reset_environment_profiles();
        self.load_pass(
            None,
            DocumentFilterFactory::negative(),
            DocumentConsumer::PrependIfNew,
        )?;

        publisher::publish(self.environment, self.loaded)?;
        Ok(())
    }

    /// Seeds the work queue: the no-profile sentinel first, then the
    /// profiles already known to the environment, falling back to its
    /// default profiles when nothing at all was activated.
    fn initialize_profiles(&mut self) {
        self.pending_profiles.push_back(None);

        let activated_via_property = self.profiles_activated_via_property();
        for profile in self.other_active_profiles(&activated_via_property) {
            self.pending_profiles.push_back(Some(profile));
        }
        self.add_active_profiles(activated_via_property.into_iter().collect());

        if self.pending_profiles.len() == 1 {
            for name in self.environment.default_profiles().to_vec() {
                self.pending_profiles
                    .push_back(Some(Profile::new_default(name)));
            }
        }
    }

    fn profiles_activated_via_property(&self) -> IndexSet<Profile> {
        if !self.environment.contains_property(ACTIVE_PROFILES_PROPERTY)
            && !self.environment.contains_property(INCLUDE_PROFILES_PROPERTY)
        {
            return IndexSet::new();
        }
        let mut profiles = IndexSet::new();
        profiles.extend(self.profiles_from_property(INCLUDE_PROFILES_PROPERTY));
        profiles.extend(self.profiles_from_property(ACTIVE_PROFILES_PROPERTY));
        profiles
    }

    fn profiles_from_property(&self, property_name: &str) -> Vec<Profile> {
        self.environment
            .string_array_property(property_name)
            .unwrap_or_default()
            .into_iter()
            .map(Profile::new)
            .collect()
    }

    fn other_active_profiles(&self, activated_via_property: &IndexSet<Profile>) -> Vec<Profile> {
        self.environment
            .active_profiles()
            .iter()
            .map(|name| Profile::new(name.as_str()))
            .filter(|profile| !activated_via_property.contains(profile))
            .collect()
    }

    /// Queues newly activated profiles. Only the first non-empty set
    /// wins; once profiles have been activated, later documents cannot
    /// change the selection anymore.
    fn add_active_profiles(&mut self, profiles: Vec<Profile>) {
        if profiles.is_empty() {
            return;
        }
        if self.activated_profiles {
            self.logger.debug(format!(
                "Profiles already activated, '{}' will not be applied",
                join_profiles(&profiles)
            ));
            return;
        }
        self.logger
            .debug(format!("Activated profiles {}", join_profiles(&profiles)));
        for profile in profiles {
            self.pending_profiles.push_back(Some(profile));
        }
        self.activated_profiles = true;
        self.remove_unprocessed_default_profiles();
    }

    fn remove_unprocessed_default_profiles(&mut self) {
        self.pending_profiles
            .retain(|entry| !matches!(entry, Some(profile) if profile.is_default_profile()));
    }

    /// Queues included profiles ahead of everything still pending,
    /// skipping the ones that were already processed.
    fn add_included_profiles(&mut self, include_profiles: &[Profile]) {
        if include_profiles.is_empty() {
            return;
        }
        let existing: Vec<Option<Profile>> = self.pending_profiles.drain(..).collect();
        for profile in include_profiles {
            let entry = Some(profile.clone());
            if !self.processed_profiles.contains(&entry) {
                self.pending_profiles.push_back(entry);
            }
        }
        self.pending_profiles.extend(existing);
    }

    /// Expands every (location, name) pair for one pass of the queue.
    fn load_pass(
        &mut self,
        profile: Option<Profile>,
        filter_factory: DocumentFilterFactory,
        consumer: DocumentConsumer,
    ) -> Result<()> {
        let resolver = LocationResolver::new(
            self.environment,
            self.search_locations,
            self.search_names,
        );
        let locations = resolver.search_locations()?;
        let names = resolver.search_names()?;

        for location in &locations {
            let is_folder = location.ends_with('/');
            if is_folder {
                for name in &names {
                    self.load_location_name(location, name, &profile, filter_factory, consumer)?;
                }
            } else {
                self.load_concrete_file(location, &profile, filter_factory, consumer)?;
            }
        }
        Ok(())
    }

    /// A location that names a file directly: the first loader claiming
    /// its extension handles it, without any name or profile suffixing.
    /// A location no loader claims is skipped like any other candidate
    /// that cannot be loaded.
    fn load_concrete_file(
        &mut self,
        location: &str,
        profile: &Option<Profile>,
        filter_factory: DocumentFilterFactory,
        consumer: DocumentConsumer,
    ) -> Result<()> {
        for index in 0..self.loaders.len() {
            if can_load_file_extension(self.loaders[index].file_extensions(), location) {
                let filter = filter_factory.filter(profile.clone());
                return self.load_resource(index, location, profile, &filter, consumer);
            }
        }
        self.logger.trace(format!(
            "Skipped config file with unknown extension '{}'",
            location
        ));
        Ok(())
    }

    /// A folder location: expand `location + name` against every
    /// loader-supported extension, deduplicating extensions claimed by
    /// more than one loader.
    fn load_location_name(
        &mut self,
        location: &str,
        name: &str,
        profile: &Option<Profile>,
        filter_factory: DocumentFilterFactory,
        consumer: DocumentConsumer,
    ) -> Result<()> {
        let prefix = format!("{}{}", location, name);
        let mut seen_extensions: HashSet<&'static str> = HashSet::new();

        for index in 0..self.loaders.len() {
            for &extension in self.loaders[index].file_extensions() {
                if seen_extensions.insert(extension) {
                    self.load_for_file_extension(
                        index,
                        &prefix,
                        &format!(".{}", extension),
                        profile,
                        filter_factory,
                        consumer,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn load_for_file_extension(
        &mut self,
        loader_index: usize,
        prefix: &str,
        file_extension: &str,
        profile: &Option<Profile>,
        filter_factory: DocumentFilterFactory,
        consumer: DocumentConsumer,
    ) -> Result<()> {
        let default_filter = filter_factory.filter(None);
        let profile_filter = filter_factory.filter(profile.clone());

        if let Some(p) = profile {
            // Profile-specific file, considered both for unprofiled
            // documents and documents declaring the profile.
            let profile_specific = format!("{}-{}{}", prefix, p, file_extension);
            self.load_resource(loader_index, &profile_specific, profile, &default_filter, consumer)?;
            self.load_resource(loader_index, &profile_specific, profile, &profile_filter, consumer)?;

            // Files of already-processed profiles may hold documents
            // that only apply under the current profile.
            let previously_processed = self.processed_profiles.clone();
            for processed in previously_processed.into_iter().flatten() {
                let previously_loaded =
                    format!("{}-{}{}", prefix, processed, file_extension);
                self.load_resource(
                    loader_index,
                    &previously_loaded,
                    profile,
                    &profile_filter,
                    consumer,
                )?;
            }
        }

        // The plain, non-suffixed file.
        let plain = format!("{}{}", prefix, file_extension);
        self.load_resource(loader_index, &plain, profile, &profile_filter, consumer)
    }

    /// Parses one candidate resource and feeds the filtered documents
    /// to the consumer. Missing or extensionless candidates are skipped
    /// with a trace record; real read or parse failures abort the load.
    fn load_resource(
        &mut self,
        loader_index: usize,
        location: &str,
        profile: &Option<Profile>,
        filter: &DocumentFilter,
        consumer: DocumentConsumer,
    ) -> Result<()> {
        let resource = self.resource_loader.get_resource(location);
        if !resource.exists() {
            let description = describe("Skipped missing config ", location, &resource, profile);
            self.logger.trace(description);
            return Ok(());
        }
        if resource.extension().map_or(true, str::is_empty) {
            let description =
                describe("Skipped empty config extension ", location, &resource, profile);
            self.logger.trace(description);
            return Ok(());
        }

        let name = format!("applicationConfig: [{}]", location);
        let documents = self
            .load_documents(loader_index, &name, &resource)
            .map_err(|cause| ConfigLoadError::property_source(location, cause))?;
        if documents.is_empty() {
            let description = describe("Skipped unloaded config ", location, &resource, profile);
            self.logger.trace(description);
            return Ok(());
        }

        let mut accepted = Vec::new();
        for document in documents {
            if filter.matches(&document, self.environment) {
                self.add_active_profiles(document.active_profiles.clone());
                self.add_included_profiles(&document.include_profiles);
                accepted.push(document);
            }
        }
        // Within one file, later documents override earlier ones, so
        // they must reach the bucket first.
        accepted.reverse();

        if !accepted.is_empty() {
            for document in accepted {
                self.consume(consumer, profile, document);
            }
            let description = describe("Loaded config file ", location, &resource, profile);
            self.logger.debug(description);
        }
        Ok(())
    }

    fn load_documents(
        &mut self,
        loader_index: usize,
        name: &str,
        resource: &Resource,
    ) -> Result<Vec<Document>> {
        let key = DocumentsCacheKey {
            loader: loader_index,
            location: resource.location().to_string(),
        };
        if let Some(documents) = self.document_cache.get(&key) {
            return Ok(documents.clone());
        }
        let sources = self.loaders[loader_index].load(name, resource)?;
        let documents: Vec<Document> = sources.into_iter().map(Document::from_source).collect();
        self.document_cache.insert(key, documents.clone());
        Ok(documents)
    }

    fn consume(&mut self, consumer: DocumentConsumer, profile: &Option<Profile>, document: Document) {
        match consumer {
            DocumentConsumer::Append => {
                self.loaded
                    .entry(profile.clone())
                    .or_default()
                    .push(document.property_source);
            }
            DocumentConsumer::PrependIfNew => {
                let name = &document.property_source.name;
                let already_present = self
                    .loaded
                    .values()
                    .any(|bucket| bucket.iter().any(|source| &source.name == name));
                if !already_present {
                    self.loaded
                        .entry(profile.clone())
                        .or_default()
                        .insert(0, document.property_source);
                }
            }
        }
    }

    /// Replaces the environment's active set with the processed
    /// profiles, dropping the sentinel and the default-flagged ones.
    fn reset_environment_profiles(&mut self) {
        let names: Vec<String> = self
            .processed_profiles
            .iter()
            .flatten()
            .filter(|profile| !profile.is_default_profile())
            .map(|profile| profile.name().to_string())
            .collect();
        self.environment.set_active_profiles(names);
    }
}

fn can_load_file_extension(extensions: &[&str], location: &str) -> bool {
    let lowered = location.to_ascii_lowercase();
    extensions
        .iter()
        .any(|extension| lowered.ends_with(&format!(".{}", extension)))
}

fn join_profiles(profiles: &[Profile]) -> String {
    profiles
        .iter()
        .map(Profile::name)
        .collect::<Vec<_>>()
        .join(",")
}

fn describe(
    prefix: &str,
    location: &str,
    resource: &Resource,
    profile: &Option<Profile>,
) -> String {
    let mut result = format!("{}'{}' ({})", prefix, resource.path().display(), location);
    if let Some(profile) = profile {
        result.push_str(" for profile ");
        result.push_str(profile.name());
    }
    result
}
