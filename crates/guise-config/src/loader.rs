//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `/etc/guise/config.toml` (system)
//! 3. Merge `~/.guise/config.toml` (user)
//! 4. Merge the caller's explicit file, if any
//! 5. Apply env var fallbacks for fields no file set
//! 6. Deserialize merged tree → `Config`
//! 7. Validate
//! 8. Return `ResolvedConfig`

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_leaves};
use crate::show::ResolvedConfig;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// System-wide config location.
const SYSTEM_CONFIG_PATH: &str = "/etc/guise/config.toml";

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Config file locations, lowest precedence first.
///
/// A path that does not exist is skipped at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadPaths {
    /// System-wide file.
    pub system: Option<PathBuf>,
    /// Per-user file.
    pub user: Option<PathBuf>,
    /// File named by the caller.
    pub explicit: Option<PathBuf>,
}

impl LoadPaths {
    /// Standard locations: `/etc/guise/config.toml` and
    /// `~/.guise/config.toml`.
    ///
    /// With `home_override`, the override is treated as the `.guise`
    /// directory itself and its `config.toml` is the user file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if no override is given and the
    /// home directory cannot be determined.
    pub fn discover(home_override: Option<&Path>) -> ConfigResult<Self> {
        let user = match home_override {
            Some(home) => home.join("config.toml"),
            None => home_directory()?.join(".guise").join("config.toml"),
        };

        Ok(Self {
            system: Some(PathBuf::from(SYSTEM_CONFIG_PATH)),
            user: Some(user),
            explicit: None,
        })
    }

    /// Add the caller's explicit file as the highest-precedence file layer.
    #[must_use]
    pub fn with_explicit(mut self, path: Option<&Path>) -> Self {
        self.explicit = path.map(Path::to_path_buf);
        self
    }

    fn layers(&self) -> impl Iterator<Item = (&Path, ConfigLayer)> {
        [
            (self.system.as_deref(), ConfigLayer::System),
            (self.user.as_deref(), ConfigLayer::User),
            (self.explicit.as_deref(), ConfigLayer::Explicit),
        ]
        .into_iter()
        .filter_map(|(path, layer)| path.map(|path| (path, layer)))
    }
}

/// Load the configuration from the standard locations plus an optional
/// explicit file, reading env var fallbacks from the process environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, or if the
/// final merged configuration fails validation.
pub fn load(explicit: Option<&Path>, home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let paths = LoadPaths::discover(home_override)?.with_explicit(explicit);
    load_from(&paths, &collect_env_vars())
}

/// Load the configuration from the given locations and environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, or if the
/// final merged configuration fails validation.
pub fn load_from<S: BuildHasher>(
    paths: &LoadPaths,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();

    record_leaves(&merged, "", &ConfigLayer::Defaults, &mut field_sources);

    // 2-4. File layers, lowest precedence first.
    for (path, layer) in paths.layers() {
        if let Some(overlay) = try_load_file(path)? {
            deep_merge_tracking(&mut merged, &overlay, "", &layer, &mut field_sources);
            loaded_files.push(path.display().to_string());
            info!(path = %path.display(), layer = %layer, "loaded config");
        }
    }

    // 5. Apply env var fallbacks for unset fields.
    let env_count = apply_env_fallbacks(&mut merged, &mut field_sources, env_vars);
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    // 6. Deserialize.
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 7. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Load a config from a specific file path (no layering, no defaults).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let metadata = std::fs::metadata(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    check_size(path, metadata.len())?;

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Reads once, then checks the size, to avoid racing a separate stat.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    check_size(path, content.len() as u64)?;

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

fn check_size(path: &Path, len: u64) -> ConfigResult<()> {
    if len > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {len} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
            ),
        });
    }
    Ok(())
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_parse() {
        let val: toml::Value = toml::from_str(DEFAULTS_TOML).unwrap();
        let table = val.as_table().unwrap();
        assert!(table.contains_key("permissions"));
        assert!(table.contains_key("catalog"));
        assert!(table.contains_key("logging"));
    }

    #[test]
    fn test_defaults_deserialize_to_config() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config.permissions, crate::PermissionsSection::default());
        assert_eq!(config.logging, crate::LoggingSection::default());
        assert!(config.catalog.kinds.iter().any(|kind| kind.name == "player"));
        assert!(validate::validate(&config).is_ok());
    }

    #[test]
    fn test_load_from_defaults_only() {
        let resolved = load_from(&LoadPaths::default(), &no_env()).unwrap();
        assert!(resolved.loaded_files.is_empty());
        assert_eq!(resolved.config.permissions.namespace, "libsdisguises");
        assert_eq!(
            resolved.field_sources.get("permissions.namespace"),
            Some(&ConfigLayer::Defaults)
        );
    }

    #[test]
    fn test_layer_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LoadPaths {
            system: Some(write(
                dir.path(),
                "system.toml",
                "[logging]\nlevel = \"warn\"\nformat = \"json\"",
            )),
            user: Some(write(dir.path(), "user.toml", "[logging]\nlevel = \"debug\"")),
            explicit: Some(write(
                dir.path(),
                "explicit.toml",
                "[permissions]\nexplicit_options = true",
            )),
        };

        let resolved = load_from(&paths, &no_env()).unwrap();
        assert_eq!(resolved.config.logging.level, "debug");
        assert_eq!(resolved.config.logging.format, "json");
        assert!(resolved.config.permissions.explicit_options);
        assert_eq!(resolved.loaded_files.len(), 3);
        assert_eq!(
            resolved.field_sources.get("logging.format"),
            Some(&ConfigLayer::System)
        );
        assert_eq!(
            resolved.field_sources.get("permissions.explicit_options"),
            Some(&ConfigLayer::Explicit)
        );
    }

    #[test]
    fn test_missing_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LoadPaths::discover(Some(dir.path()))
            .unwrap()
            .with_explicit(Some(&dir.path().join("absent.toml")));
        let resolved = load_from(
            &LoadPaths {
                system: None,
                ..paths
            },
            &no_env(),
        )
        .unwrap();
        assert!(resolved.loaded_files.is_empty());
    }

    #[test]
    fn test_env_fallback_only_for_unset_fields() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LoadPaths {
            user: Some(write(dir.path(), "user.toml", "[logging]\nlevel = \"warn\"")),
            ..LoadPaths::default()
        };
        let env: HashMap<String, String> = [
            ("GUISE_LOG_LEVEL", "trace"),
            ("GUISE_NAMESPACE", "lib"),
            ("GUISE_EXPLICIT_OPTIONS", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let resolved = load_from(&paths, &env).unwrap();
        assert_eq!(resolved.config.logging.level, "warn");
        assert_eq!(resolved.config.permissions.namespace, "lib");
        assert!(resolved.config.permissions.explicit_options);
        assert_eq!(
            resolved.field_sources.get("permissions.namespace"),
            Some(&ConfigLayer::Environment)
        );
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LoadPaths {
            explicit: Some(write(
                dir.path(),
                "bad.toml",
                "[permissions]\nnamespace = \"a.b\"",
            )),
            ..LoadPaths::default()
        };
        assert!(matches!(
            load_from(&paths, &no_env()),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LoadPaths {
            user: Some(write(dir.path(), "broken.toml", "[logging\nlevel = ")),
            ..LoadPaths::default()
        };
        assert!(matches!(
            load_from(&paths, &no_env()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file_without_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "single.toml", "[logging]\nformat = \"compact\"");
        let config = load_file(&path).unwrap();
        assert_eq!(config.logging.format, "compact");
        assert!(config.catalog.kinds.is_empty());
    }

    #[test]
    fn test_try_load_file_missing() {
        let result = try_load_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        let file_path = write(dir.path(), "huge.toml", &data);

        let result = try_load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }
}
