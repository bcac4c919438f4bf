//! Category targets and rule specificity.
//!
//! When the target segment of a permission string does not name a kind, it
//! may name a group of kinds instead. Each group keyword carries the
//! specificity its rules are applied at.

use serde::Serialize;

use crate::catalog::{Category, ResourceCatalog, ResourceKind};

/// How general a rule's target is, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Specificity {
    /// Names one kind.
    Explicit = 0,
    /// `ageable`.
    Trait = 1,
    /// `monster`, `animal`.
    Family = 2,
    /// `mob`, `misc`.
    Group = 3,
    /// `*`.
    Global = 4,
}

impl Specificity {
    /// Numeric rank, 0 (explicit) through 4 (global).
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Target keywords standing for a group of kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKeyword {
    /// `ageable`
    Ageable,
    /// `monster` or `monsters`
    Monster,
    /// `animal` or `animals`
    Animal,
    /// `mob`
    Mob,
    /// `misc`
    Misc,
    /// `*`, every kind
    Any,
}

impl CategoryKeyword {
    /// Recognize a lower-cased target segment.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let keyword = match token {
            "ageable" => Self::Ageable,
            "monster" | "monsters" => Self::Monster,
            "animal" | "animals" => Self::Animal,
            "mob" => Self::Mob,
            "misc" => Self::Misc,
            "*" => Self::Any,
            _ => return None,
        };
        Some(keyword)
    }

    /// Specificity of rules targeting this keyword.
    ///
    /// `monster` and `animal` deliberately share a tier.
    #[must_use]
    pub fn specificity(self) -> Specificity {
        match self {
            Self::Ageable => Specificity::Trait,
            Self::Monster | Self::Animal => Specificity::Family,
            Self::Mob | Self::Misc => Specificity::Group,
            Self::Any => Specificity::Global,
        }
    }

    /// The catalog category a kind must declare, if any.
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Ageable => Some(Category::Ageable),
            Self::Monster => Some(Category::Monster),
            Self::Animal => Some(Category::Animal),
            Self::Mob => Some(Category::Mob),
            Self::Misc => Some(Category::Misc),
            Self::Any => None,
        }
    }

    /// Whether a kind belongs to this keyword's group.
    #[must_use]
    pub fn matches(self, kind: &ResourceKind) -> bool {
        self.category()
            .is_none_or(|category| kind.has_category(category))
    }
}

/// Resolve a category target against a catalog.
///
/// Returns the specificity and the names of all member kinds, or `None` when
/// the token is not a keyword or no kind in the catalog qualifies.
#[must_use]
pub fn match_category<C>(catalog: &C, token: &str) -> Option<(Specificity, Vec<String>)>
where
    C: ResourceCatalog + ?Sized,
{
    let keyword = CategoryKeyword::parse(token)?;
    let members: Vec<String> = catalog
        .kinds()
        .iter()
        .filter(|kind| keyword.matches(kind))
        .map(|kind| kind.name().to_string())
        .collect();

    if members.is_empty() {
        None
    } else {
        Some((keyword.specificity(), members))
    }
}
