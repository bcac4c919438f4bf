//! Source-annotated display of a resolved configuration.

use std::fmt::Write as _;

use crate::error::ConfigResult;
use crate::merge::{ConfigLayer, FieldSources};
use crate::types::Config;

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final merged configuration.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// Config file paths that were loaded (in precedence order).
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// The layer that set a dotted field path, e.g. `"logging.level"`.
    #[must_use]
    pub fn source_of(&self, field: &str) -> Option<&ConfigLayer> {
        self.field_sources.get(field)
    }

    /// Render the configuration as TOML, preceded by a header listing the
    /// loaded files and with each scalar line annotated with its source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn show(&self) -> ConfigResult<String> {
        let body = toml::to_string_pretty(&self.config)?;

        let mut output = String::new();
        output.push_str("# Resolved guise configuration\n");
        if !self.loaded_files.is_empty() {
            output.push_str("#\n# Loaded files (in precedence order):\n");
            for (i, path) in self.loaded_files.iter().enumerate() {
                let _ = writeln!(output, "#   {}. {path}", i.saturating_add(1));
            }
        }
        output.push('\n');

        let mut section = String::new();
        for line in body.lines() {
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                section = header.trim_matches(['[', ']']).to_owned();
            }

            let annotation = trimmed
                .split_once(" = ")
                .map(|(key, _)| format!("{section}.{}", key.trim()))
                .and_then(|field| self.source_of(&field));

            match annotation {
                Some(layer) => {
                    let _ = writeln!(output, "{line}  # {layer}");
                },
                None => {
                    output.push_str(line);
                    output.push('\n');
                },
            }
        }

        Ok(output)
    }
}
