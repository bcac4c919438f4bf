//! Resolution of a grant snapshot into per-kind permissions.

use tracing::{debug, debug_span, trace};

use crate::catalog::ResourceCatalog;
use crate::fold::fold_kind;
use crate::grant::{GrantSet, PermissionHolder};
use crate::order::sort_rules;
use crate::policy::ResolutionPolicy;
use crate::resolved::ResolvedPermissions;
use crate::rule::ParsedRule;
use crate::scope::{ActionScope, Namespace, is_addressed_to};

/// Resolves grants against a catalog under a fixed namespace and policy.
///
/// A resolver holds no mutable state; one instance can serve any number of
/// concurrent resolutions.
#[derive(Debug)]
pub struct Resolver<'c, C: ResourceCatalog + ?Sized> {
    catalog: &'c C,
    namespace: Namespace,
    policy: ResolutionPolicy,
}

impl<'c, C: ResourceCatalog + ?Sized> Resolver<'c, C> {
    /// Create a resolver with the default namespace and policy.
    #[must_use]
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            namespace: Namespace::default(),
            policy: ResolutionPolicy::default(),
        }
    }

    /// Set the permission namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Set the resolution policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured namespace.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The configured policy.
    #[must_use]
    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Parse every grant into a rule and sort the rules into application
    /// order. Grants that parse to nothing are dropped.
    #[must_use]
    pub fn rules(&self, grants: &GrantSet, scope: &ActionScope) -> Vec<ParsedRule> {
        let mut rules: Vec<ParsedRule> = grants
            .iter()
            .filter_map(|(pattern, granted)| {
                ParsedRule::parse(pattern, granted, &self.namespace, scope, self.catalog)
                    .inspect_err(|reason| trace!(pattern, %reason, "discarding permission"))
                    .ok()
            })
            .collect();
        sort_rules(&mut rules);
        rules
    }

    /// Resolve a grant snapshot for one action scope.
    #[must_use]
    pub fn resolve(&self, grants: &GrantSet, scope: &ActionScope) -> ResolvedPermissions {
        let span = debug_span!("resolve", scope = %scope, namespace = %self.namespace);
        let _guard = span.enter();

        let rules = self.rules(grants, scope);
        let resolved = ResolvedPermissions::from_records(
            self.catalog
                .kinds()
                .iter()
                .filter_map(|kind| fold_kind(kind, &rules, &self.policy)),
        );

        debug!(
            grants = grants.len(),
            rules = rules.len(),
            enabled = resolved.len(),
            "resolved permissions"
        );
        resolved
    }

    /// Gather the grants of a holder that concern this namespace and scope.
    ///
    /// A holder with the namespace's operator node gets that node granted
    /// before its own permissions are read.
    #[must_use]
    pub fn collect_grants<H>(&self, holder: &H, scope: &ActionScope) -> GrantSet
    where
        H: PermissionHolder + ?Sized,
    {
        let mut grants = GrantSet::new();

        let operator_node = self.namespace.operator_node();
        if holder.has_permission(&operator_node) {
            debug!(node = %operator_node, "holder has operator node");
            grants.insert(&operator_node, true);
        }

        for grant in holder.effective_grants() {
            let pattern = grant.pattern.trim().to_lowercase();
            if is_addressed_to(&pattern, &self.namespace, scope) {
                grants.insert(pattern, grant.granted);
            }
        }

        grants
    }

    /// Resolve a holder's permissions for one action scope.
    #[must_use]
    pub fn resolve_holder<H>(&self, holder: &H, scope: &ActionScope) -> ResolvedPermissions
    where
        H: PermissionHolder + ?Sized,
    {
        self.resolve(&self.collect_grants(holder, scope), scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ResourceKind, StaticCatalog};
    use crate::grant::Grant;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new([
            ResourceKind::new("cow").with_categories([
                Category::Animal,
                Category::Ageable,
                Category::Mob,
            ]),
            ResourceKind::new("zombie").with_categories([
                Category::Monster,
                Category::Ageable,
                Category::Mob,
            ]),
            ResourceKind::new("boat").with_category(Category::Misc),
        ])
        .unwrap()
    }

    fn scope() -> ActionScope {
        ActionScope::new("disguise").unwrap()
    }

    fn grants(pairs: &[(&str, bool)]) -> GrantSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolve_end_to_end() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog).with_namespace(Namespace::new("lib").unwrap());
        let resolved = resolver.resolve(
            &grants(&[("lib.disguise.*.* ", true), ("lib.disguise.zombie.-setbaby", true)]),
            &scope(),
        );

        let cow = resolved.record("cow").unwrap();
        let zombie = resolved.record("zombie").unwrap();
        assert!(cow.wildcard_allow());
        assert!(zombie.wildcard_allow());
        assert!(zombie.forbidden_options().contains("setbaby"));
        assert!(!cow.forbidden_options().contains("setbaby"));
        assert!(resolved.is_allowed("boat"));
    }

    #[test]
    fn test_unrelated_patterns_ignored() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog);
        let resolved = resolver.resolve(
            &grants(&[
                ("essentials.fly", true),
                ("libsdisguises.disguise", true),
                ("libsdisguises.undisguise.cow", true),
                ("libsdisguises.disguise.dragon", true),
            ]),
            &scope(),
        );
        assert!(!resolved.has_any());
    }

    #[test]
    fn test_rules_sorted() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog);
        let rules = resolver.rules(
            &grants(&[
                ("libsdisguises.disguise.cow", false),
                ("libsdisguises.disguise.*", true),
                ("libsdisguises.*.cow", true),
            ]),
            &scope(),
        );
        let patterns: Vec<&str> = rules.iter().map(ParsedRule::pattern).collect();
        assert_eq!(
            patterns,
            vec![
                "libsdisguises.*.cow",
                "libsdisguises.disguise.*",
                "libsdisguises.disguise.cow",
            ]
        );
    }

    #[test]
    fn test_scope_specific_negation_beats_wildcard_scope_grant() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog);
        let resolved = resolver.resolve(
            &grants(&[("libsdisguises.*.cow", true), ("libsdisguises.disguise.cow", false)]),
            &scope(),
        );
        assert!(!resolved.is_allowed("cow"));
    }

    #[test]
    fn test_collect_grants_filters_and_adds_operator_node() {
        struct Operator;
        impl PermissionHolder for Operator {
            fn effective_grants(&self) -> Vec<Grant> {
                vec![
                    Grant::deny("LibsDisguises.Disguise.Boat"),
                    Grant::allow("libsdisguises.undisguise.cow"),
                    Grant::allow("worldedit.wand"),
                ]
            }

            fn has_permission(&self, _node: &str) -> bool {
                true
            }
        }

        let catalog = catalog();
        let resolver = Resolver::new(&catalog);
        let collected = resolver.collect_grants(&Operator, &scope());
        assert_eq!(collected.len(), 2);
        assert_eq!(collected.get("libsdisguises.*.*.*"), Some(true));
        assert_eq!(collected.get("libsdisguises.disguise.boat"), Some(false));

        let resolved = resolver.resolve_holder(&Operator, &scope());
        assert!(resolved.is_allowed("cow"));
        assert!(resolved.is_allowed("zombie"));
        assert!(!resolved.is_allowed("boat"));
    }

    #[test]
    fn test_resolver_shared_across_threads() {
        let catalog = catalog();
        let resolver = &Resolver::new(&catalog);
        let snapshots = [
            grants(&[("libsdisguises.disguise.animal", true)]),
            grants(&[("libsdisguises.disguise.monster", true)]),
        ];

        let results: Vec<ResolvedPermissions> = std::thread::scope(|s| {
            let handles: Vec<_> = snapshots
                .iter()
                .map(|snapshot| s.spawn(move || resolver.resolve(snapshot, &scope())))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert!(results[0].is_allowed("cow") && !results[0].is_allowed("zombie"));
        assert!(results[1].is_allowed("zombie") && !results[1].is_allowed("cow"));
    }
}
