//! Resource handles and location resolution.
//!
//! A location string such as `classpath:/application.yml` or
//! `file:./config/application.yml` is turned into a [`Resource`] by a
//! [`ResourceLoader`]. Resolution never touches the filesystem beyond
//! existence checks; reading happens when a property source loader asks
//! for the content.

use std::io;
use std::path::{Path, PathBuf};

/// Prefix for resources resolved against the resource roots.
pub const CLASSPATH_URL_PREFIX: &str = "classpath:";

/// Prefix for filesystem resources.
pub const FILE_URL_PREFIX: &str = "file:";

/// A handle to a (possibly missing) configuration resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    location: String,
    path: PathBuf,
}

impl Resource {
    /// Creates a resource for the given location and resolved path.
    pub fn new(location: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            path: path.into(),
        }
    }

    /// The location string this resource was resolved from.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The resolved filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the resource exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// The file name, if the path has one.
    pub fn filename(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// The file extension of the resource, if any.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// Reads the full content of the resource.
    pub fn read_to_string(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Resolves location strings into [`Resource`] handles.
pub trait ResourceLoader {
    /// Resolves a location. The returned resource may not exist.
    fn get_resource(&self, location: &str) -> Resource;
}

/// Default resolver for `classpath:` and `file:` locations.
///
/// `classpath:` locations are looked up in an ordered list of resource
/// roots, the first root containing the file wins. `file:` locations
/// and bare paths resolve against a base directory, which defaults to
/// the process working directory.
#[derive(Debug, Clone)]
pub struct DefaultResourceLoader {
    base_dir: PathBuf,
    resource_roots: Vec<PathBuf>,
}

impl DefaultResourceLoader {
    /// Creates a loader that resolves relative file locations against
    /// the process working directory.
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            resource_roots: Vec::new(),
        }
    }

    /// Creates a loader with an explicit base directory for relative
    /// file locations.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            resource_roots: Vec::new(),
        }
    }

    /// Adds a root directory for `classpath:` resolution.
    pub fn add_resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.resource_roots.push(root.into());
        self
    }

    fn resolve_classpath(&self, location: &str, relative: &str) -> Resource {
        let relative = relative.trim_start_matches('/');
        for root in &self.resource_roots {
            let candidate = root.join(relative);
            if candidate.is_file() {
                return Resource::new(location, candidate);
            }
        }
        // Not found in any root; keep a deterministic path anyway so the
        // resource still has a filename and extension.
        let fallback = self
            .resource_roots
            .first()
            .map(|root| root.join(relative))
            .unwrap_or_else(|| PathBuf::from(relative));
        Resource::new(location, fallback)
    }

    fn resolve_file(&self, location: &str, raw: &str) -> Resource {
        let path = PathBuf::from(raw);
        let resolved = if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        };
        Resource::new(location, resolved)
    }
}

impl Default for DefaultResourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLoader for DefaultResourceLoader {
    fn get_resource(&self, location: &str) -> Resource {
        if let Some(relative) = location.strip_prefix(CLASSPATH_URL_PREFIX) {
            self.resolve_classpath(location, relative)
        } else if let Some(raw) = location.strip_prefix(FILE_URL_PREFIX) {
            self.resolve_file(location, raw)
        } else {
            self.resolve_file(location, location)
        }
    }
}
