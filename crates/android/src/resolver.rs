//! Build configuration resolution
//!
//! Single-pass and stateless: the `local` layer supplies the version, the
//! `keystore` layer supplies release signing, and the project supplies the
//! platform constants. Any error aborts with no partial result.

use crate::build_config::{BuildConfig, PlatformConstants};
use crate::error::Result;
use crate::signing::Signing;
use crate::source::{LoadedSources, PropertySourceLoader};
use crate::version::{resolve_version_code, resolve_version_name};
use market_core::config::ConfigSchema;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Android project layout derived from the Flutter project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Gradle root project; property sources live here
    pub android_root: PathBuf,
    /// App module; relative keystore paths resolve against it
    pub module_dir: PathBuf,
}

impl ProjectLayout {
    /// Derive the layout from the configured directory names
    pub fn from_schema(flutter_root: &Path, schema: &ConfigSchema) -> Self {
        let android_root = flutter_root.join(&schema.android.project_dir);
        let module_dir = android_root.join(&schema.android.app_module);
        Self {
            android_root,
            module_dir,
        }
    }
}

/// Merges loaded property layers with the platform constants
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    constants: PlatformConstants,
    module_dir: PathBuf,
}

impl ConfigResolver {
    /// Create a resolver; `module_dir` anchors relative keystore paths
    pub fn new(constants: PlatformConstants, module_dir: impl Into<PathBuf>) -> Self {
        Self {
            constants,
            module_dir: module_dir.into(),
        }
    }

    /// Merge the loaded layers into a [`BuildConfig`]
    pub fn resolve(&self, sources: &LoadedSources) -> Result<BuildConfig> {
        let local = sources.local.as_ref();

        let version_code = resolve_version_code(local)?;
        let version_name = resolve_version_name(local);
        let signing = Signing::from_source(sources.keystore.as_ref(), &self.module_dir);

        info!(
            application_id = %self.constants.application_id,
            version_code,
            version_name = %version_name,
            signing = signing.kind(),
            "Resolved build configuration"
        );

        Ok(BuildConfig::new(
            self.constants.clone(),
            version_code,
            version_name,
            signing,
        ))
    }
}

/// Load both property sources for a Flutter project and resolve them
pub fn resolve_project(flutter_root: &Path, schema: &ConfigSchema) -> Result<BuildConfig> {
    let layout = ProjectLayout::from_schema(flutter_root, schema);
    debug!(android_root = %layout.android_root.display(), "Resolving build configuration");

    let sources =
        PropertySourceLoader::from_config(&schema.sources).load_all(&layout.android_root)?;

    ConfigResolver::new(PlatformConstants::from_schema(schema), layout.module_dir)
        .resolve(&sources)
}
