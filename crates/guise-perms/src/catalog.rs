//! Resource kinds and the catalog that enumerates them.
//!
//! The catalog is supplied by the host. Each kind carries the category
//! memberships used by category-style permission targets such as
//! `libsdisguises.disguise.animal`.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PermsError, PermsResult};

/// Structural groups a resource kind may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Kinds with a baby/adult life cycle.
    Ageable,
    /// Hostile creatures.
    Monster,
    /// Passive creatures.
    Animal,
    /// Any living creature.
    Mob,
    /// Non-living kinds (blocks, items, projectiles).
    Misc,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Ageable,
        Self::Monster,
        Self::Animal,
        Self::Mob,
        Self::Misc,
    ];

    /// Lower-case name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ageable => "ageable",
            Self::Monster => "monster",
            Self::Animal => "animal",
            Self::Mob => "mob",
            Self::Misc => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PermsError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// A kind of resource that permissions authorize, e.g. one disguise type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceKind {
    name: String,
    display_name: String,
    categories: BTreeSet<Category>,
}

impl ResourceKind {
    /// Create a kind with no categories.
    ///
    /// The name is lower-cased; the display name is derived from it
    /// (`armor_stand` reads as `Armor Stand`) until overridden.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().to_lowercase();
        let display_name = readable(&name);
        Self {
            name,
            display_name,
            categories: BTreeSet::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Add a category membership.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    /// Add several category memberships.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }

    /// Unique, lower-cased name used in permission strings.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable name, used for ordering listings.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Category memberships.
    #[must_use]
    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    /// Check membership in a category.
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

fn readable(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Enumerable set of resource kinds.
pub trait ResourceCatalog {
    /// All kinds, in catalog order.
    fn kinds(&self) -> &[ResourceKind];

    /// Look up a kind by name, ignoring case.
    fn find(&self, name: &str) -> Option<&ResourceKind> {
        let name = name.to_lowercase();
        self.kinds().iter().find(|kind| kind.name() == name)
    }
}

/// In-memory catalog with a name index.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    kinds: Vec<ResourceKind>,
    index: HashMap<String, usize>,
}

impl StaticCatalog {
    /// Build a catalog from a list of kinds.
    ///
    /// # Errors
    ///
    /// Returns [`PermsError::InvalidKindName`] for a name that cannot appear as
    /// a permission segment, or [`PermsError::DuplicateKind`] when two kinds
    /// share a name.
    pub fn new(kinds: impl IntoIterator<Item = ResourceKind>) -> PermsResult<Self> {
        let mut catalog = Self::default();
        for kind in kinds {
            validate_kind_name(kind.name())?;
            if catalog.index.contains_key(kind.name()) {
                return Err(PermsError::DuplicateKind {
                    name: kind.name().to_string(),
                });
            }
            catalog
                .index
                .insert(kind.name().to_string(), catalog.kinds.len());
            catalog.kinds.push(kind);
        }
        Ok(catalog)
    }

    /// Number of kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the catalog has no kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl ResourceCatalog for StaticCatalog {
    fn kinds(&self) -> &[ResourceKind] {
        &self.kinds
    }

    fn find(&self, name: &str) -> Option<&ResourceKind> {
        self.index
            .get(&name.to_lowercase())
            .and_then(|&position| self.kinds.get(position))
    }
}

fn validate_kind_name(name: &str) -> PermsResult<()> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.contains('.') {
        "name contains the segment separator '.'"
    } else if name == "*" {
        "name is the target wildcard"
    } else {
        return Ok(());
    };

    Err(PermsError::InvalidKindName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds() -> Vec<ResourceKind> {
        vec![
            ResourceKind::new("cow")
                .with_category(Category::Animal)
                .with_category(Category::Ageable)
                .with_category(Category::Mob),
            ResourceKind::new("Zombie").with_categories([Category::Monster, Category::Mob]),
            ResourceKind::new("armor_stand").with_category(Category::Misc),
        ]
    }

    #[test]
    fn test_kind_names_are_lower_cased() {
        let kind = ResourceKind::new("Zombie");
        assert_eq!(kind.name(), "zombie");
        assert_eq!(kind.display_name(), "Zombie");
    }

    #[test]
    fn test_display_name_derived_from_name() {
        assert_eq!(ResourceKind::new("armor_stand").display_name(), "Armor Stand");
        assert_eq!(
            ResourceKind::new("item_frame")
                .with_display_name("Frame")
                .display_name(),
            "Frame"
        );
    }

    #[test]
    fn test_category_membership() {
        let cow = &kinds()[0];
        assert!(cow.has_category(Category::Animal));
        assert!(!cow.has_category(Category::Monster));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Monster".parse::<Category>().unwrap(), Category::Monster);
        assert!(matches!(
            "monsters".parse::<Category>(),
            Err(PermsError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_static_catalog_lookup_ignores_case() {
        let catalog = StaticCatalog::new(kinds()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find("ZOMBIE").unwrap().name(), "zombie");
        assert!(catalog.find("sheep").is_none());
    }

    #[test]
    fn test_default_find_matches_indexed_find() {
        struct Listed(Vec<ResourceKind>);
        impl ResourceCatalog for Listed {
            fn kinds(&self) -> &[ResourceKind] {
                &self.0
            }
        }

        let listed = Listed(kinds());
        assert_eq!(listed.find("Armor_Stand").unwrap().name(), "armor_stand");

        let kinds = vec![ResourceKind::new("Élan"), ResourceKind::new("cow")];
        let listed = Listed(kinds.clone());
        let indexed = StaticCatalog::new(kinds).unwrap();
        for query in ["ÉLAN", "élan", "Cow"] {
            assert_eq!(
                listed.find(query).map(ResourceKind::name),
                indexed.find(query).map(ResourceKind::name),
                "{query}"
            );
        }
        assert_eq!(listed.find("ÉLAN").map(ResourceKind::name), Some("élan"));
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let result = StaticCatalog::new([ResourceKind::new("cow"), ResourceKind::new("COW")]);
        assert!(matches!(result, Err(PermsError::DuplicateKind { name }) if name == "cow"));
    }

    #[test]
    fn test_unaddressable_names_rejected() {
        for name in ["", "  ", "cow.baby", "*"] {
            let result = StaticCatalog::new([ResourceKind::new(name)]);
            assert!(
                matches!(result, Err(PermsError::InvalidKindName { .. })),
                "expected {name:?} to be rejected"
            );
        }
    }
}
