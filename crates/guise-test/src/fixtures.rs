//! Test fixtures for common engine inputs.

use guise_perms::{ActionScope, Category, GrantSet, ResourceKind, StaticCatalog};

/// A catalog covering every category:
///
/// | kind            | categories               |
/// |-----------------|--------------------------|
/// | `cow`, `pig`, `sheep` | animal, ageable, mob |
/// | `villager`      | ageable, mob             |
/// | `zombie`        | monster, ageable, mob    |
/// | `creeper`, `skeleton` | monster, mob       |
/// | `boat`, `armor_stand` | misc               |
/// | `player`        | (none)                   |
#[must_use]
pub fn test_catalog() -> StaticCatalog {
    let animal = [Category::Animal, Category::Ageable, Category::Mob];
    let monster = [Category::Monster, Category::Mob];

    let kinds = [
        ResourceKind::new("cow").with_categories(animal),
        ResourceKind::new("pig").with_categories(animal),
        ResourceKind::new("sheep").with_categories(animal),
        ResourceKind::new("villager").with_categories([Category::Ageable, Category::Mob]),
        ResourceKind::new("zombie")
            .with_categories(monster)
            .with_category(Category::Ageable),
        ResourceKind::new("creeper").with_categories(monster),
        ResourceKind::new("skeleton").with_categories(monster),
        ResourceKind::new("boat").with_category(Category::Misc),
        ResourceKind::new("armor_stand").with_category(Category::Misc),
        ResourceKind::new("player"),
    ];

    match StaticCatalog::new(kinds) {
        Ok(catalog) => catalog,
        Err(e) => panic!("test catalog is invalid: {e}"),
    }
}

/// Build a grant snapshot from `(pattern, granted)` pairs.
#[must_use]
pub fn grants(pairs: &[(&str, bool)]) -> GrantSet {
    pairs.iter().copied().collect()
}

/// The `disguise` action scope.
#[must_use]
pub fn test_scope() -> ActionScope {
    scope("disguise")
}

/// An action scope from a known-valid name.
///
/// # Panics
///
/// Panics if `name` is not a valid scope.
#[must_use]
pub fn scope(name: &str) -> ActionScope {
    match ActionScope::new(name) {
        Ok(scope) => scope,
        Err(e) => panic!("invalid test scope '{name}': {e}"),
    }
}
