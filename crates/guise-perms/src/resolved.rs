//! Read-only results of a resolution.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::ResourceKind;
use crate::option::OptionName;

/// Final permissions for one enabled kind.
///
/// `permitted_options` and `forbidden_options` never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindPermissions {
    kind: ResourceKind,
    wildcard_allow: bool,
    permitted_options: BTreeSet<OptionName>,
    forbidden_options: BTreeSet<OptionName>,
}

impl KindPermissions {
    pub(crate) fn new(
        kind: ResourceKind,
        wildcard_allow: bool,
        permitted_options: BTreeSet<OptionName>,
        forbidden_options: BTreeSet<OptionName>,
    ) -> Self {
        Self {
            kind,
            wildcard_allow,
            permitted_options,
            forbidden_options,
        }
    }

    /// The kind these permissions apply to.
    #[must_use]
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    /// Whether options not explicitly forbidden are usable.
    #[must_use]
    pub fn wildcard_allow(&self) -> bool {
        self.wildcard_allow
    }

    /// Options explicitly permitted. When non-empty and `wildcard_allow` is
    /// off, this is an allow-list.
    #[must_use]
    pub fn permitted_options(&self) -> &BTreeSet<OptionName> {
        &self.permitted_options
    }

    /// Options that may never be used.
    #[must_use]
    pub fn forbidden_options(&self) -> &BTreeSet<OptionName> {
        &self.forbidden_options
    }

    /// Check whether every requested option may be used with this kind.
    #[must_use]
    pub fn allows_options<I, S>(&self, options: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<OptionName> = options.into_iter().map(OptionName::from_query).collect();

        let restricted = !self.wildcard_allow && !self.permitted_options.is_empty();
        if restricted
            && !requested
                .iter()
                .all(|option| self.permitted_options.contains(option))
        {
            return false;
        }

        !requested
            .iter()
            .any(|option| self.forbidden_options.contains(option))
    }
}

/// Everything a principal may use for one action scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedPermissions {
    records: BTreeMap<String, KindPermissions>,
}

impl ResolvedPermissions {
    pub(crate) fn from_records(records: impl IntoIterator<Item = KindPermissions>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.kind.name().to_string(), record))
                .collect(),
        }
    }

    /// Whether any kind can be used at all.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.records.is_empty()
    }

    /// Number of enabled kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no kind is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Enabled kinds, ordered by display name ignoring case.
    #[must_use]
    pub fn list_enabled(&self) -> Vec<&ResourceKind> {
        let mut kinds: Vec<&ResourceKind> =
            self.records.values().map(KindPermissions::kind).collect();
        kinds.sort_by(|a, b| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
                .then_with(|| a.name().cmp(b.name()))
        });
        kinds
    }

    /// Whether a kind can be used.
    #[must_use]
    pub fn is_allowed(&self, kind_name: &str) -> bool {
        self.record(kind_name).is_some()
    }

    /// Whether a kind can be used together with every requested option.
    #[must_use]
    pub fn is_allowed_with_options<I, S>(&self, kind_name: &str, options: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.record(kind_name)
            .is_some_and(|record| record.allows_options(options))
    }

    /// The permissions of an enabled kind.
    #[must_use]
    pub fn record(&self, kind_name: &str) -> Option<&KindPermissions> {
        self.records.get(&kind_name.to_lowercase())
    }

    /// Iterate enabled kinds' permissions in kind-name order.
    pub fn iter(&self) -> impl Iterator<Item = &KindPermissions> {
        self.records.values()
    }

    /// Render the resolution as pretty JSON, for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
