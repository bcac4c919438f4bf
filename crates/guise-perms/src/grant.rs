//! Capability grants supplied by the permission holder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One `(pattern, granted)` statement from a permission holder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    /// Dotted permission string, e.g. `libsdisguises.disguise.cow.setbaby`.
    pub pattern: String,
    /// `false` when the permission is explicitly negated.
    pub granted: bool,
}

impl Grant {
    /// A granted permission.
    #[must_use]
    pub fn allow(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            granted: true,
        }
    }

    /// A negated permission.
    #[must_use]
    pub fn deny(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            granted: false,
        }
    }
}

/// A snapshot of grants, keyed by lower-cased pattern.
///
/// Duplicates resolve first-true-wins: once a pattern is granted, later
/// occurrences of the same pattern are ignored; otherwise the later value
/// replaces the earlier one. Iteration is in pattern order, so two snapshots
/// holding the same grants iterate identically whatever order they were
/// built in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantSet {
    entries: BTreeMap<String, bool>,
}

impl GrantSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grant. Returns `true` if the stored value changed.
    pub fn insert(&mut self, pattern: impl AsRef<str>, granted: bool) -> bool {
        let key = pattern.as_ref().trim().to_lowercase();
        if key.is_empty() {
            return false;
        }

        match self.entries.get(&key) {
            Some(&true) => false,
            Some(&existing) if existing == granted => false,
            _ => {
                self.entries.insert(key, granted);
                true
            },
        }
    }

    /// Look up the effective value of a pattern.
    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<bool> {
        self.entries
            .get(&pattern.trim().to_lowercase())
            .copied()
    }

    /// Number of distinct patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(pattern, granted)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(pattern, &granted)| (pattern.as_str(), granted))
    }
}

impl<S: AsRef<str>> Extend<(S, bool)> for GrantSet {
    fn extend<I: IntoIterator<Item = (S, bool)>>(&mut self, iter: I) {
        for (pattern, granted) in iter {
            self.insert(pattern, granted);
        }
    }
}

impl Extend<Grant> for GrantSet {
    fn extend<I: IntoIterator<Item = Grant>>(&mut self, iter: I) {
        for grant in iter {
            self.insert(&grant.pattern, grant.granted);
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, bool)> for GrantSet {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl FromIterator<Grant> for GrantSet {
    fn from_iter<I: IntoIterator<Item = Grant>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// The principal whose permissions are being resolved.
pub trait PermissionHolder {
    /// Every permission the holder effectively has, granted or negated.
    fn effective_grants(&self) -> Vec<Grant>;

    /// Whether the holder has a specific permission node.
    ///
    /// Hosts with their own inheritance rules (operators, wildcard nodes)
    /// should override this.
    fn has_permission(&self, node: &str) -> bool {
        self.effective_grants()
            .iter()
            .any(|grant| grant.granted && grant.pattern.trim().eq_ignore_ascii_case(node))
    }
}

impl PermissionHolder for GrantSet {
    fn effective_grants(&self) -> Vec<Grant> {
        self.iter()
            .map(|(pattern, granted)| Grant {
                pattern: pattern.to_string(),
                granted,
            })
            .collect()
    }

    fn has_permission(&self, node: &str) -> bool {
        self.get(node).unwrap_or(false)
    }
}
