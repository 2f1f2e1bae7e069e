//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed settings, defaults filled in
    pub schema: ConfigSchema,
    /// File the settings came from, `None` when defaulted
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched relative to `base_dir` and defaults apply if none is found.
    pub fn load(path: Option<&Path>, base_dir: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(base_dir),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file(base_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        ".market-build.toml",
        "market-build.toml",
        ".config/market-build.toml",
    ];

    candidates
        .iter()
        .map(|candidate| base_dir.join(candidate))
        .find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::config_parse(path, format!("Failed to parse config file: {}", e))
            .with_suggestion("Check the [android], [sources] and [packaging] tables")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.android.compile_sdk, 35);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert!(config.path.is_none());
        assert_eq!(config.schema, ConfigSchema::default());
    }

    #[test]
    fn test_config_discovers_dotfile() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".market-build.toml"),
            "[android]\napplication_id = \"com.example.shop\"\n",
        )
        .unwrap();

        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.schema.android.application_id, "com.example.shop");
        assert_eq!(config.path, Some(dir.path().join(".market-build.toml")));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_unparseable_config_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market-build.toml");
        std::fs::write(&path, "[android\nmin_sdk = ").unwrap();

        let err = Config::load(Some(&path), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.unwrap().contains("market-build.toml"));
    }
}
