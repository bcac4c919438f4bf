//! Deep merge of TOML values with per-field source tracking.
//!
//! The merge operates on raw [`toml::Value`] trees rather than deserialized
//! structs, so a key missing from a layer never overrides the layer below.

use std::collections::HashMap;
use std::fmt;

/// Which configuration layer a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults (`defaults.toml`).
    Defaults,
    /// System-wide configuration (`/etc/guise/config.toml`).
    System,
    /// User-level configuration (`~/.guise/config.toml`).
    User,
    /// A file named by the caller.
    Explicit,
    /// Environment variable fallback.
    Environment,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::System => write!(f, "system (/etc/guise/config.toml)"),
            Self::User => write!(f, "user (~/.guise/config.toml)"),
            Self::Explicit => write!(f, "explicit file"),
            Self::Environment => write!(f, "environment variable"),
        }
    }
}

/// Tracks which layer set each field's value.
pub type FieldSources = HashMap<String, ConfigLayer>;

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Deep-merge `overlay` into `base`, recording which layer set each leaf
/// field. `prefix` is the dotted path prefix (e.g. `"logging"`).
pub fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join_path(prefix, key);

                if let Some(base_val) = base_table.get_mut(key) {
                    if overlay_val.is_table() {
                        deep_merge_tracking(base_val, overlay_val, &path, layer, sources);
                    } else {
                        *base_val = overlay_val.clone();
                        sources.insert(path, layer.clone());
                    }
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                    record_leaves(overlay_val, &path, layer, sources);
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            sources.insert(prefix.to_owned(), layer.clone());
        },
    }
}

/// Walk a value tree and record all leaf paths with their source layer.
/// Arrays count as leaves.
pub fn record_leaves(
    val: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &join_path(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer.clone());
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_merge_scalars() {
        let mut base: toml::Value = toml::from_str(
            r#"
            [permissions]
            namespace = "libsdisguises"
            explicit_options = false
        "#,
        )
        .unwrap();

        let overlay: toml::Value = toml::from_str(
            r"
            [permissions]
            explicit_options = true
        ",
        )
        .unwrap();

        deep_merge(&mut base, &overlay);

        let permissions = base["permissions"].as_table().unwrap();
        assert_eq!(permissions["namespace"].as_str().unwrap(), "libsdisguises");
        assert!(permissions["explicit_options"].as_bool().unwrap());
    }

    #[test]
    fn test_deep_merge_replaces_arrays() {
        let mut base: toml::Value = toml::from_str(
            r#"
            [[catalog.kinds]]
            name = "cow"
            [[catalog.kinds]]
            name = "pig"
        "#,
        )
        .unwrap();

        let overlay: toml::Value = toml::from_str(
            r#"
            [[catalog.kinds]]
            name = "sheep"
        "#,
        )
        .unwrap();

        deep_merge(&mut base, &overlay);

        let kinds = base["catalog"]["kinds"].as_array().unwrap();
        assert_eq!(kinds.len(), 1);
        assert_eq!(kinds[0]["name"].as_str().unwrap(), "sheep");
    }

    #[test]
    fn test_deep_merge_tracking() {
        let mut base: toml::Value = toml::from_str(
            r#"
            [logging]
            level = "info"
            format = "pretty"
        "#,
        )
        .unwrap();

        let overlay: toml::Value = toml::from_str(
            r#"
            [logging]
            level = "debug"
            [permissions]
            namespace = "lib"
        "#,
        )
        .unwrap();

        let mut sources = FieldSources::new();
        deep_merge_tracking(&mut base, &overlay, "", &ConfigLayer::User, &mut sources);

        assert_eq!(sources.get("logging.level"), Some(&ConfigLayer::User));
        assert_eq!(sources.get("permissions.namespace"), Some(&ConfigLayer::User));
        assert!(!sources.contains_key("logging.format"));
    }

    #[test]
    fn test_record_leaves() {
        let val: toml::Value = toml::from_str(
            r#"
            [logging]
            level = "info"
            directives = ["guise_perms=trace"]
        "#,
        )
        .unwrap();

        let mut sources = FieldSources::new();
        record_leaves(&val, "", &ConfigLayer::Defaults, &mut sources);

        assert_eq!(sources.len(), 2);
        assert_eq!(
            sources.get("logging.directives"),
            Some(&ConfigLayer::Defaults)
        );
    }

    #[test]
    fn test_layer_display() {
        assert_eq!(ConfigLayer::Environment.to_string(), "environment variable");
    }
}
