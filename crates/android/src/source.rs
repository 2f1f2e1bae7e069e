//! Property source discovery and loading
//!
//! A property source is an optional layer: a missing file is reported as
//! `Ok(None)`, never as an error. Files are re-read on every call.

use crate::error::{BuildConfigError, Result};
use crate::properties::PropertySet;
use market_core::config::SourcesConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Well-known property sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceName {
    /// Signing credentials (`key.properties`)
    Keystore,
    /// Machine-local Flutter properties (`local.properties`)
    Local,
}

impl SourceName {
    /// All sources in load order
    pub const ALL: [SourceName; 2] = [SourceName::Local, SourceName::Keystore];

    /// Conventional file name
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Keystore => "key.properties",
            Self::Local => "local.properties",
        }
    }

    /// Short name used in logs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keystore => "keystore",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loads property sources from a root directory
#[derive(Debug, Clone)]
pub struct PropertySourceLoader {
    keystore_file: String,
    local_file: String,
}

impl Default for PropertySourceLoader {
    fn default() -> Self {
        Self {
            keystore_file: SourceName::Keystore.default_file_name().to_string(),
            local_file: SourceName::Local.default_file_name().to_string(),
        }
    }
}

impl PropertySourceLoader {
    /// Loader using the conventional file names
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the file names from the project configuration
    pub fn from_config(config: &SourcesConfig) -> Self {
        Self {
            keystore_file: config.keystore.clone(),
            local_file: config.local.clone(),
        }
    }

    /// File name a source resolves to
    pub fn file_name(&self, name: SourceName) -> &str {
        match name {
            SourceName::Keystore => &self.keystore_file,
            SourceName::Local => &self.local_file,
        }
    }

    /// Path a source resolves to under `root`
    pub fn path_for(&self, root: &Path, name: SourceName) -> PathBuf {
        root.join(self.file_name(name))
    }

    /// Load one source. `Ok(None)` means the file does not exist.
    pub fn load(&self, root: &Path, name: SourceName) -> Result<Option<PropertySet>> {
        if !root.is_dir() {
            return Err(BuildConfigError::RootNotDirectory {
                path: root.to_path_buf(),
            });
        }

        let path = self.path_for(root, name);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(source = %name, path = %path.display(), "Property source absent");
                return Ok(None);
            }
            Err(source) => return Err(BuildConfigError::Io { path, source }),
        };

        let set = PropertySet::from_bytes(path, bytes)?;
        debug!(
            source = %name,
            path = %set.path().display(),
            keys = set.len(),
            "Loaded property source"
        );
        Ok(Some(set))
    }

    /// Load every well-known source
    pub fn load_all(&self, root: &Path) -> Result<LoadedSources> {
        Ok(LoadedSources {
            local: self.load(root, SourceName::Local)?,
            keystore: self.load(root, SourceName::Keystore)?,
        })
    }
}

/// The property layers found for one build invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSources {
    /// `local.properties`, if present
    pub local: Option<PropertySet>,
    /// `key.properties`, if present
    pub keystore: Option<PropertySet>,
}

impl LoadedSources {
    /// The layer for a source, if present
    pub fn get(&self, name: SourceName) -> Option<&PropertySet> {
        match name {
            SourceName::Keystore => self.keystore.as_ref(),
            SourceName::Local => self.local.as_ref(),
        }
    }
}
