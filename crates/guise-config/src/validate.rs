//! Post-merge configuration validation.
//!
//! Names are checked here with the same rules the engine applies, so a bad
//! file fails at load time instead of when the first resolution runs.

use std::collections::HashSet;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Category names a catalog kind may declare.
const CATEGORIES: &[&str] = &["ageable", "monster", "animal", "mob", "misc"];

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Formats accepted by `logging.format`.
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json", "full"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_permissions(config)?;
    validate_catalog(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

/// A name usable as one segment of a permission string.
fn check_segment(field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if value.contains('.') {
        return Err(invalid(field, format!("'{value}' must not contain '.'")));
    }
    Ok(())
}

fn validate_permissions(config: &Config) -> ConfigResult<()> {
    let p = &config.permissions;

    check_segment("permissions.namespace", &p.namespace)?;

    for option in &p.forced_forbidden_options {
        check_segment("permissions.forced_forbidden_options", option)?;
    }

    Ok(())
}

fn validate_catalog(config: &Config) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for kind in &config.catalog.kinds {
        check_segment("catalog.kinds.name", &kind.name)?;
        if kind.name.trim() == "*" {
            return Err(invalid("catalog.kinds.name", "'*' is reserved"));
        }

        if !seen.insert(kind.name.trim().to_lowercase()) {
            return Err(invalid(
                "catalog.kinds.name",
                format!("duplicate kind '{}'", kind.name),
            ));
        }

        for category in &kind.categories {
            if !CATEGORIES.contains(&category.trim().to_lowercase().as_str()) {
                return Err(invalid(
                    "catalog.kinds.categories",
                    format!(
                        "unknown category '{category}' on kind '{}'; expected one of: {}",
                        kind.name,
                        CATEGORIES.join(", ")
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KindSection;

    fn kind(name: &str, categories: &[&str]) -> KindSection {
        KindSection {
            name: name.to_owned(),
            display_name: None,
            categories: categories.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_namespace_with_dot() {
        let mut config = Config::default();
        config.permissions.namespace = "lib.disguises".to_owned();
        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { field, .. } if field == "permissions.namespace"
        ));
    }

    #[test]
    fn test_empty_namespace() {
        let mut config = Config::default();
        config.permissions.namespace = "  ".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_forced_option() {
        let mut config = Config::default();
        config.permissions.forced_forbidden_options = vec![String::new()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_kind() {
        let mut config = Config::default();
        config.catalog.kinds = vec![kind("cow", &["animal"]), kind("COW", &["mob"])];
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate kind"));
    }

    #[test]
    fn test_reserved_kind_name() {
        let mut config = Config::default();
        config.catalog.kinds = vec![kind("*", &[])];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_category() {
        let mut config = Config::default();
        config.catalog.kinds = vec![kind("cow", &["cattle"])];
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("unknown category 'cattle'"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert!(validate(&config).is_err());
    }
}
