//! Configuration types for the guise permission engine.
//!
//! These types mirror the engine's settings without depending on it; the
//! engine converts them at its own boundary. Every struct implements
//! [`Default`] so that a bare `[section]` header in TOML is a working
//! configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace and policy flags applied to every resolution.
    pub permissions: PermissionsSection,
    /// Resource kinds permission strings can address.
    pub catalog: CatalogSection,
    /// Logging level, format and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// PermissionsSection
// ---------------------------------------------------------------------------

/// Permission namespace and resolution policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsSection {
    /// First segment every permission string must carry.
    pub namespace: String,
    /// When `true`, a grant without options no longer implies every option.
    pub explicit_options: bool,
    /// Options forbidden on every kind whatever the grants say
    /// (e.g. `["setinvisible"]`).
    pub forced_forbidden_options: Vec<String>,
}

impl Default for PermissionsSection {
    fn default() -> Self {
        Self {
            namespace: "libsdisguises".to_owned(),
            explicit_options: false,
            forced_forbidden_options: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogSection
// ---------------------------------------------------------------------------

/// The resource kinds known to the host.
///
/// Empty by default; the embedded defaults ship a standard catalog. A file
/// that sets `catalog.kinds` replaces the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Kind definitions.
    pub kinds: Vec<KindSection>,
}

/// One resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSection {
    /// Kind name as it appears in permission strings.
    pub name: String,
    /// Human-readable name. Derived from `name` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Category names: `ageable`, `monster`, `animal`, `mob`, `misc`.
    pub categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["guise_perms=trace"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
            directives: Vec::new(),
        }
    }
}
