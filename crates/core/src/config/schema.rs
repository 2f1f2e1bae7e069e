//! Configuration schema definitions
//!
//! Values here are constants handed to the build as-is; they are never
//! read from property files.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[android]`
    #[serde(default)]
    pub android: AndroidConfig,

    /// `[sources]`
    #[serde(default)]
    pub sources: SourcesConfig,

    /// `[packaging]`
    #[serde(default)]
    pub packaging: PackagingConfig,
}

/// Android platform constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Application identifier published to the store
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Kotlin/Java namespace of the app module
    #[serde(default = "default_application_id")]
    pub namespace: String,

    /// Compile SDK version
    #[serde(default = "default_compile_sdk")]
    pub compile_sdk: u32,

    /// Minimum supported SDK version
    #[serde(default = "default_min_sdk")]
    pub min_sdk: u32,

    /// Target SDK version
    #[serde(default = "default_target_sdk")]
    pub target_sdk: u32,

    /// NDK version string
    #[serde(default = "default_ndk_version")]
    pub ndk_version: String,

    /// JVM bytecode target
    #[serde(default = "default_java_target")]
    pub java_target: u32,

    /// Android project directory, relative to the Flutter root
    #[serde(default = "default_project_dir")]
    pub project_dir: String,

    /// App module directory, relative to the Android project directory
    #[serde(default = "default_app_module")]
    pub app_module: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            application_id: default_application_id(),
            namespace: default_application_id(),
            compile_sdk: default_compile_sdk(),
            min_sdk: default_min_sdk(),
            target_sdk: default_target_sdk(),
            ndk_version: default_ndk_version(),
            java_target: default_java_target(),
            project_dir: default_project_dir(),
            app_module: default_app_module(),
        }
    }
}

fn default_application_id() -> String {
    "com.susse.market".to_string()
}

fn default_compile_sdk() -> u32 {
    35
}

fn default_min_sdk() -> u32 {
    21
}

fn default_target_sdk() -> u32 {
    35
}

fn default_ndk_version() -> String {
    "27.0.12077973".to_string()
}

fn default_java_target() -> u32 {
    17
}

fn default_project_dir() -> String {
    "android".to_string()
}

fn default_app_module() -> String {
    "app".to_string()
}

/// Property source file names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Signing credentials file
    #[serde(default = "default_keystore_file")]
    pub keystore: String,

    /// Local machine properties written by the Flutter tool
    #[serde(default = "default_local_file")]
    pub local: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            keystore: default_keystore_file(),
            local: default_local_file(),
        }
    }
}

fn default_keystore_file() -> String {
    "key.properties".to_string()
}

fn default_local_file() -> String {
    "local.properties".to_string()
}

/// Packaging toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingConfig {
    /// Embed the dependency metadata block in APKs
    #[serde(default = "default_true")]
    pub include_dependency_metadata_in_apk: bool,

    /// Embed the dependency metadata block in app bundles
    #[serde(default = "default_true")]
    pub include_dependency_metadata_in_bundle: bool,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            include_dependency_metadata_in_apk: true,
            include_dependency_metadata_in_bundle: true,
        }
    }
}

fn default_true() -> bool {
    true
}
