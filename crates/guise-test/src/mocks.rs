//! Mock implementations for testing.

use std::sync::{Arc, Mutex};

use guise_perms::{Grant, GrantSet, PermissionHolder};

/// Mock implementation of [`PermissionHolder`].
///
/// Grants are returned in the order they were added, duplicates included, so
/// tests can exercise how the engine collapses them. Every
/// `has_permission` query is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockPermissionHolder {
    grants: Vec<Grant>,
    operator: bool,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockPermissionHolder {
    /// Create a holder with no permissions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a granted permission.
    #[must_use]
    pub fn grant(mut self, pattern: impl Into<String>) -> Self {
        self.grants.push(Grant::allow(pattern));
        self
    }

    /// Add a negated permission.
    #[must_use]
    pub fn deny(mut self, pattern: impl Into<String>) -> Self {
        self.grants.push(Grant::deny(pattern));
        self
    }

    /// Make the host treat this holder as an operator: every
    /// `has_permission` query succeeds, without the nodes being listed in
    /// `effective_grants`.
    #[must_use]
    pub fn operator(mut self) -> Self {
        self.operator = true;
        self
    }

    /// Nodes passed to `has_permission`, in call order.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// The listed grants collapsed into a snapshot.
    #[must_use]
    pub fn to_grant_set(&self) -> GrantSet {
        self.grants.iter().cloned().collect()
    }
}

impl PermissionHolder for MockPermissionHolder {
    fn effective_grants(&self) -> Vec<Grant> {
        self.grants.clone()
    }

    fn has_permission(&self, node: &str) -> bool {
        if let Ok(mut guard) = self.queries.lock() {
            guard.push(node.to_string());
        }

        self.operator
            || self
                .grants
                .iter()
                .any(|grant| grant.granted && grant.pattern.eq_ignore_ascii_case(node))
    }
}
