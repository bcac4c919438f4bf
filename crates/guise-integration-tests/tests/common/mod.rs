//! Shared helpers for integration tests.

use guise_perms::{GrantSet, ResolutionPolicy, ResolvedPermissions, Resolver};
use guise_test::{grants, setup_test_logging, test_catalog, test_scope};

/// Resolve `pairs` for the `disguise` scope against the test catalog.
#[allow(dead_code)]
pub fn resolve(pairs: &[(&str, bool)]) -> ResolvedPermissions {
    resolve_with(pairs, ResolutionPolicy::default())
}

/// Resolve `pairs` under a specific policy.
#[allow(dead_code)]
pub fn resolve_with(pairs: &[(&str, bool)], policy: ResolutionPolicy) -> ResolvedPermissions {
    resolve_set(&grants(pairs), policy)
}

/// Resolve an existing snapshot under a specific policy.
#[allow(dead_code)]
pub fn resolve_set(snapshot: &GrantSet, policy: ResolutionPolicy) -> ResolvedPermissions {
    setup_test_logging("guise_perms=debug");
    let catalog = test_catalog();
    Resolver::new(&catalog)
        .with_policy(policy)
        .resolve(snapshot, &test_scope())
}

/// Names of the enabled kinds in `list_enabled` order.
#[allow(dead_code)]
pub fn enabled_names(resolved: &ResolvedPermissions) -> Vec<String> {
    resolved
        .list_enabled()
        .iter()
        .map(|kind| kind.name().to_string())
        .collect()
}
