//! Conversions from `guise-config` sections into engine types.

use guise_config::{CatalogSection, KindSection, PermissionsSection};

use crate::catalog::{Category, ResourceKind, StaticCatalog};
use crate::error::{PermsError, PermsResult};
use crate::policy::ResolutionPolicy;
use crate::scope::Namespace;

impl From<&PermissionsSection> for ResolutionPolicy {
    fn from(section: &PermissionsSection) -> Self {
        section
            .forced_forbidden_options
            .iter()
            .fold(
                Self {
                    explicit_options: section.explicit_options,
                    ..Self::default()
                },
                |policy, option| policy.force_forbid(option),
            )
    }
}

impl TryFrom<&PermissionsSection> for Namespace {
    type Error = PermsError;

    fn try_from(section: &PermissionsSection) -> PermsResult<Self> {
        Self::new(&section.namespace)
    }
}

impl TryFrom<&KindSection> for ResourceKind {
    type Error = PermsError;

    fn try_from(section: &KindSection) -> PermsResult<Self> {
        let categories = section
            .categories
            .iter()
            .map(|name| name.parse::<Category>())
            .collect::<PermsResult<Vec<_>>>()?;

        let kind = Self::new(&section.name).with_categories(categories);
        Ok(match &section.display_name {
            Some(display_name) => kind.with_display_name(display_name),
            None => kind,
        })
    }
}

impl TryFrom<&CatalogSection> for StaticCatalog {
    type Error = PermsError;

    fn try_from(section: &CatalogSection) -> PermsResult<Self> {
        let kinds = section
            .kinds
            .iter()
            .map(ResourceKind::try_from)
            .collect::<PermsResult<Vec<_>>>()?;
        Self::new(kinds)
    }
}
