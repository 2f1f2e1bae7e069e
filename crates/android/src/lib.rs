//! Android build configuration for the market app
//!
//! This crate resolves the configuration the Gradle build consumes:
//! - `.properties` parsing
//! - Optional property sources (`key.properties`, `local.properties`)
//! - Version code/name resolution with defaults
//! - Release signing credentials, copied only where present

#![warn(missing_docs)]

pub mod build_config;
pub mod error;
pub mod properties;
pub mod resolver;
pub mod signing;
pub mod source;
pub mod version;

pub use build_config::{BuildConfig, BuildType, BuildVariant, PlatformConstants};
pub use error::{BuildConfigError, Result};
pub use properties::PropertySet;
pub use resolver::{resolve_project, ConfigResolver, ProjectLayout};
pub use signing::{Secret, Signing, SigningConfig};
pub use source::{LoadedSources, PropertySourceLoader, SourceName};
