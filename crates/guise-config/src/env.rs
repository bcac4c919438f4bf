//! Environment variable fallbacks.
//!
//! Environment variables are **fallbacks**, not overrides: they only apply to
//! fields that no config file set. A field still carrying its embedded
//! default counts as unset.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// All supported `GUISE_*` env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "GUISE_NAMESPACE",
        field_path: "permissions.namespace",
    },
    EnvMapping {
        var_name: "GUISE_EXPLICIT_OPTIONS",
        field_path: "permissions.explicit_options",
    },
    EnvMapping {
        var_name: "GUISE_FORCED_FORBIDDEN_OPTIONS",
        field_path: "permissions.forced_forbidden_options",
    },
    EnvMapping {
        var_name: "GUISE_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "GUISE_LOG_FORMAT",
        field_path: "logging.format",
    },
    EnvMapping {
        var_name: "GUISE_LOG_DIRECTIVES",
        field_path: "logging.directives",
    },
];

/// Apply environment variable fallbacks to fields that were **not** set by
/// any config file layer.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let set_by_file = sources
            .get(mapping.field_path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults);
        if set_by_file {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );

            set_field_from_string(merged, mapping.field_path, val);
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        }
    }

    count
}

/// Set a field in the TOML tree from a string value, creating intermediate
/// tables as needed.
fn set_field_from_string(root: &mut toml::Value, path: &str, val: &str) {
    let toml_val = coerce_to_toml_value(path, val);

    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment.to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), toml_val);
    }
}

/// Coerce a string env var value to the TOML type of the field it feeds.
fn coerce_to_toml_value(path: &str, val: &str) -> toml::Value {
    if matches!(path, "permissions.explicit_options")
        && let Ok(b) = val.trim().parse::<bool>()
    {
        return toml::Value::Boolean(b);
    }

    // Comma-separated lists.
    if matches!(
        path,
        "permissions.forced_forbidden_options" | "logging.directives"
    ) {
        return toml::Value::Array(
            val.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| toml::Value::String(item.to_owned()))
                .collect(),
        );
    }

    toml::Value::String(val.to_owned())
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
