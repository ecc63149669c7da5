#![allow(dead_code)]

use std::fs;
use std::path::Path;

use stratum_core::{Environment, PropertySource};
use stratum_loader::{ConfigFileProcessor, DefaultResourceLoader};
use tempfile::TempDir;

/// A throwaway filesystem layout for one load test.
///
/// Files written under `classpath/` resolve through `classpath:`
/// locations; everything else resolves through `file:` locations
/// relative to the harness root.
pub struct Harness {
    temp: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp.path().join("classpath")).expect("Failed to create classpath dir");
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Writes a file, creating parent directories as needed.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    pub fn resource_loader(&self) -> DefaultResourceLoader {
        DefaultResourceLoader::with_base_dir(self.temp.path())
            .add_resource_root(self.temp.path().join("classpath"))
    }

    /// Runs a default-configured load against the environment.
    pub fn load(&self, environment: &mut Environment) -> stratum_loader::Result<()> {
        let mut processor = ConfigFileProcessor::new();
        processor.post_process_environment(environment, &self.resource_loader())
    }
}

/// An environment seeded with override properties, the way a command
/// line or system property source would provide them.
pub fn environment_with(pairs: &[(&str, &str)]) -> Environment {
    let mut environment = Environment::new();
    environment
        .sources_mut()
        .add_first(PropertySource::from_pairs("testProperties", pairs.to_vec()));
    environment
}

/// The names of the property sources added by loading, ignoring any
/// seeded override source.
pub fn loaded_source_names(environment: &Environment) -> Vec<String> {
    environment
        .sources()
        .iter()
        .map(|source| source.name.clone())
        .filter(|name| name != "testProperties")
        .collect()
}

pub fn config_source_name(location: &str) -> String {
    format!("applicationConfig: [{}]", location)
}
