//! Application order of parsed rules.
//!
//! Rules are folded from weakest to strongest so that later rules override
//! earlier ones:
//! 1. `*`-scope rules before scope-specific rules,
//! 2. then general targets before specific ones,
//! 3. then grants before negations of the same tier.

use std::cmp::Ordering;

use crate::rule::ParsedRule;

/// Compare two rules by application order.
#[must_use]
pub fn application_order(a: &ParsedRule, b: &ParsedRule) -> Ordering {
    b.scope_is_wildcard()
        .cmp(&a.scope_is_wildcard())
        .then_with(|| b.specificity().cmp(&a.specificity()))
        .then_with(|| a.is_negated().cmp(&b.is_negated()))
}

/// Sort rules into application order.
///
/// The sort is stable: rules comparing equal keep their relative order.
pub fn sort_rules(rules: &mut [ParsedRule]) {
    rules.sort_by(application_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ResourceKind, StaticCatalog};
    use crate::scope::{ActionScope, Namespace};

    fn rules(patterns: &[(&str, bool)]) -> Vec<ParsedRule> {
        let catalog = StaticCatalog::new([
            ResourceKind::new("cow").with_categories([Category::Animal, Category::Mob]),
            ResourceKind::new("zombie").with_categories([Category::Monster, Category::Mob]),
        ])
        .unwrap();
        let namespace = Namespace::new("lib").unwrap();
        let scope = ActionScope::new("disguise").unwrap();

        patterns
            .iter()
            .map(|(pattern, granted)| {
                ParsedRule::parse(pattern, *granted, &namespace, &scope, &catalog).unwrap()
            })
            .collect()
    }

    fn sorted_patterns(patterns: &[(&str, bool)]) -> Vec<String> {
        let mut rules = rules(patterns);
        sort_rules(&mut rules);
        rules
            .iter()
            .map(|rule| rule.pattern().to_string())
            .collect()
    }

    #[test]
    fn test_wildcard_scope_first() {
        let order = sorted_patterns(&[("lib.disguise.*", true), ("lib.*.cow", true)]);
        assert_eq!(order, vec!["lib.*.cow", "lib.disguise.*"]);
    }

    #[test]
    fn test_general_before_specific() {
        let order = sorted_patterns(&[
            ("lib.disguise.cow", true),
            ("lib.disguise.animal", true),
            ("lib.disguise.*", true),
            ("lib.disguise.mob", true),
        ]);
        assert_eq!(
            order,
            vec![
                "lib.disguise.*",
                "lib.disguise.mob",
                "lib.disguise.animal",
                "lib.disguise.cow",
            ]
        );
    }

    #[test]
    fn test_grants_before_negations() {
        let order =
            sorted_patterns(&[("lib.disguise.cow", false), ("lib.disguise.cow.setbaby", true)]);
        assert_eq!(order, vec!["lib.disguise.cow.setbaby", "lib.disguise.cow"]);
    }

    #[test]
    fn test_equal_rules_keep_input_order() {
        let order =
            sorted_patterns(&[("lib.disguise.monster", true), ("lib.disguise.animal", true)]);
        assert_eq!(order, vec!["lib.disguise.monster", "lib.disguise.animal"]);

        let order =
            sorted_patterns(&[("lib.disguise.animal", true), ("lib.disguise.monster", true)]);
        assert_eq!(order, vec!["lib.disguise.animal", "lib.disguise.monster"]);
    }

    #[test]
    fn test_scope_outranks_specificity() {
        let order = sorted_patterns(&[("lib.disguise.*", false), ("lib.*.cow", true)]);
        assert_eq!(order, vec!["lib.*.cow", "lib.disguise.*"]);
    }
}
