//! Release signing configuration
//!
//! Fields are copied from the keystore source only when present. No field
//! is ever defaulted, and completeness is left to the packaging step.

use crate::properties::PropertySet;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Key alias inside the keystore
pub const KEY_ALIAS: &str = "keyAlias";
/// Password of the key entry
pub const KEY_PASSWORD: &str = "keyPassword";
/// Keystore path, relative to the app module unless absolute
pub const STORE_FILE: &str = "storeFile";
/// Password of the keystore itself
pub const STORE_PASSWORD: &str = "storePassword";

/// A credential that never appears in logs or rendered output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw credential
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw credential, for handing to the signing tool
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(********)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("********")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("********")
    }
}

/// Credentials for the "release" signing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningConfig {
    /// `keyAlias`
    pub key_alias: Option<String>,
    /// `keyPassword`
    pub key_password: Option<Secret>,
    /// `storeFile`, resolved against the app module
    pub store_file: Option<PathBuf>,
    /// `storePassword`
    pub store_password: Option<Secret>,
}

impl SigningConfig {
    /// Copy each present key. A relative `storeFile` is resolved against
    /// `module_dir`, the way Gradle's `file()` does inside the app module.
    pub fn from_properties(props: &PropertySet, module_dir: &Path) -> Self {
        Self {
            key_alias: props.get(KEY_ALIAS).map(String::from),
            key_password: props.get(KEY_PASSWORD).map(Secret::new),
            store_file: props.get(STORE_FILE).map(|p| module_dir.join(p)),
            store_password: props.get(STORE_PASSWORD).map(Secret::new),
        }
    }

    /// Property keys that were not supplied
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.key_alias.is_none() {
            missing.push(KEY_ALIAS);
        }
        if self.key_password.is_none() {
            missing.push(KEY_PASSWORD);
        }
        if self.store_file.is_none() {
            missing.push(STORE_FILE);
        }
        if self.store_password.is_none() {
            missing.push(STORE_PASSWORD);
        }
        missing
    }

    /// Whether all four fields were supplied
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Whether a signing configuration was supplied at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Signing {
    /// No keystore source: unsigned/debug-key build
    #[default]
    Unsigned,
    /// Keystore source present; fields may be partial
    Configured(SigningConfig),
}

impl Signing {
    /// Build from the keystore layer, if it exists
    pub fn from_source(keystore: Option<&PropertySet>, module_dir: &Path) -> Self {
        match keystore {
            Some(props) => Self::Configured(SigningConfig::from_properties(props, module_dir)),
            None => Self::Unsigned,
        }
    }

    /// The configuration, unless unsigned
    pub fn config(&self) -> Option<&SigningConfig> {
        match self {
            Self::Configured(config) => Some(config),
            Self::Unsigned => None,
        }
    }

    /// `unsigned`, `partial` or `configured`, for logs and JSON
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Configured(config) if config.is_complete() => "configured",
            Self::Configured(_) => "partial",
        }
    }
}

/// JSON shape of [`Signing`]: the [`Signing::kind`] label as `status`,
/// followed by the configured fields
#[derive(Serialize)]
struct SigningRepr<'a> {
    status: &'static str,
    #[serde(flatten)]
    config: Option<&'a SigningConfig>,
}

impl Serialize for Signing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SigningRepr {
            status: self.kind(),
            config: self.config(),
        }
        .serialize(serializer)
    }
}
