//! The resolved, immutable build configuration handed to packaging

use crate::signing::{Signing, SigningConfig};
use market_core::config::ConfigSchema;
use serde::Serialize;
use std::fmt;

/// Gradle build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// Signed with the toolchain debug key
    Debug,
    /// Signed with the "release" signing configuration
    Release,
}

impl std::str::FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(format!("unknown build type '{}': use debug or release", other)),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => f.write_str("debug"),
            Self::Release => f.write_str("release"),
        }
    }
}

/// Android SDK levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SdkVersions {
    /// `compileSdk`
    pub compile: u32,
    /// `minSdk`
    pub min: u32,
    /// `targetSdk`
    pub target: u32,
}

/// Whether the dependency metadata block is embedded in artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyMetadata {
    /// Embed in APKs
    pub include_in_apk: bool,
    /// Embed in app bundles
    pub include_in_bundle: bool,
}

impl Default for DependencyMetadata {
    fn default() -> Self {
        Self {
            include_in_apk: true,
            include_in_bundle: true,
        }
    }
}

/// Values supplied by the project rather than by property files.
/// They are passed through to [`BuildConfig`] without inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConstants {
    /// Application ID
    pub application_id: String,
    /// Kotlin/Java namespace
    pub namespace: String,
    /// SDK levels
    pub sdk: SdkVersions,
    /// NDK version
    pub ndk_version: String,
    /// Java source and target compatibility
    pub java_target: u32,
    /// Dependency metadata toggle
    pub dependency_metadata: DependencyMetadata,
}

impl PlatformConstants {
    /// Take the constants from the project configuration
    pub fn from_schema(schema: &ConfigSchema) -> Self {
        let android = &schema.android;
        Self {
            application_id: android.application_id.clone(),
            namespace: android.namespace.clone(),
            sdk: SdkVersions {
                compile: android.compile_sdk,
                min: android.min_sdk,
                target: android.target_sdk,
            },
            ndk_version: android.ndk_version.clone(),
            java_target: android.java_target,
            dependency_metadata: DependencyMetadata {
                include_in_apk: schema.packaging.include_dependency_metadata_in_apk,
                include_in_bundle: schema.packaging.include_dependency_metadata_in_bundle,
            },
        }
    }
}

impl Default for PlatformConstants {
    fn default() -> Self {
        Self::from_schema(&ConfigSchema::default())
    }
}

/// Fully resolved configuration. Only [`crate::resolver::ConfigResolver`]
/// constructs it; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    application_id: String,
    namespace: String,
    version_code: i32,
    version_name: String,
    sdk: SdkVersions,
    ndk_version: String,
    java_target: u32,
    dependency_metadata: DependencyMetadata,
    signing: Signing,
}

impl BuildConfig {
    pub(crate) fn new(
        constants: PlatformConstants,
        version_code: i32,
        version_name: String,
        signing: Signing,
    ) -> Self {
        Self {
            application_id: constants.application_id,
            namespace: constants.namespace,
            version_code,
            version_name,
            sdk: constants.sdk,
            ndk_version: constants.ndk_version,
            java_target: constants.java_target,
            dependency_metadata: constants.dependency_metadata,
            signing,
        }
    }

    /// Application ID
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Kotlin/Java namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolved `flutter.versionCode`
    pub fn version_code(&self) -> i32 {
        self.version_code
    }

    /// Resolved `flutter.versionName`
    pub fn version_name(&self) -> &str {
        &self.version_name
    }

    /// SDK levels
    pub fn sdk(&self) -> SdkVersions {
        self.sdk
    }

    /// NDK version
    pub fn ndk_version(&self) -> &str {
        &self.ndk_version
    }

    /// Java target
    pub fn java_target(&self) -> u32 {
        self.java_target
    }

    /// Dependency metadata toggle
    pub fn dependency_metadata(&self) -> DependencyMetadata {
        self.dependency_metadata
    }

    /// The "release" signing configuration as resolved
    pub fn signing(&self) -> &Signing {
        &self.signing
    }

    /// Signing configuration a build type is packaged with.
    ///
    /// Debug builds always use the toolchain's debug key, so `None`.
    /// Release builds get the resolved release configuration, which is
    /// `None` only when no keystore source exists.
    pub fn signing_config_for(&self, build_type: BuildType) -> Option<&SigningConfig> {
        match build_type {
            BuildType::Debug => None,
            BuildType::Release => self.signing.config(),
        }
    }

    /// View of this configuration as packaged for one build type
    pub fn variant(&self, build_type: BuildType) -> BuildVariant<'_> {
        BuildVariant {
            build_type,
            application_id: &self.application_id,
            namespace: &self.namespace,
            version_code: self.version_code,
            version_name: &self.version_name,
            sdk: self.sdk,
            ndk_version: &self.ndk_version,
            java_target: self.java_target,
            dependency_metadata: self.dependency_metadata,
            signing: match build_type {
                BuildType::Debug => None,
                BuildType::Release => Some(&self.signing),
            },
        }
    }
}

/// A [`BuildConfig`] rendered for one build type. `signing` is `null` for
/// debug builds, which use the toolchain debug key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildVariant<'a> {
    build_type: BuildType,
    application_id: &'a str,
    namespace: &'a str,
    version_code: i32,
    version_name: &'a str,
    sdk: SdkVersions,
    ndk_version: &'a str,
    java_target: u32,
    dependency_metadata: DependencyMetadata,
    signing: Option<&'a Signing>,
}
