//! Global policy flags applied to every resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::option::OptionName;

/// Host-wide switches that shape resolution independently of any grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionPolicy {
    /// When set, a grant without options no longer implies every option.
    pub explicit_options: bool,
    /// Options forbidden on every kind after folding, whatever the grants say.
    pub forced_forbidden: BTreeSet<OptionName>,
}

impl ResolutionPolicy {
    /// Create the default policy: implicit wildcard options, nothing forced.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require grants to list their options explicitly.
    #[must_use]
    pub fn require_explicit_options(mut self) -> Self {
        self.explicit_options = true;
        self
    }

    /// Forbid an option everywhere.
    #[must_use]
    pub fn force_forbid(mut self, option: impl AsRef<str>) -> Self {
        self.forced_forbidden.insert(OptionName::new(option));
        self
    }
}
