//! App version resolution from the `local` property source

use crate::error::{BuildConfigError, Result};
use crate::properties::PropertySet;

/// Key holding the integer version code
pub const VERSION_CODE_KEY: &str = "flutter.versionCode";
/// Key holding the user-visible version name
pub const VERSION_NAME_KEY: &str = "flutter.versionName";

/// Version code when the `local` source or its key is absent
pub const DEFAULT_VERSION_CODE: i32 = 1;
/// Version name when the `local` source or its key is absent
pub const DEFAULT_VERSION_NAME: &str = "1.0.0";

/// `flutter.versionCode`, or the default when the source or key is absent.
///
/// Any value that fits a Gradle `Int` is accepted. Range rules such as
/// positivity belong to the packaging step.
pub fn resolve_version_code(local: Option<&PropertySet>) -> Result<i32> {
    let Some((props, raw)) = local.and_then(|p| p.get(VERSION_CODE_KEY).map(|v| (p, v))) else {
        return Ok(DEFAULT_VERSION_CODE);
    };

    raw.trim()
        .parse::<i32>()
        .map_err(|_| BuildConfigError::InvalidVersionFormat {
            key: VERSION_CODE_KEY.to_string(),
            value: raw.to_string(),
            path: props.path().to_path_buf(),
        })
}

/// `flutter.versionName` verbatim, or the default
pub fn resolve_version_name(local: Option<&PropertySet>) -> String {
    local
        .and_then(|p| p.get(VERSION_NAME_KEY))
        .unwrap_or(DEFAULT_VERSION_NAME)
        .to_string()
}
