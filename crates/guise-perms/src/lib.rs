//! Guise Perms - hierarchical permission resolution for disguise capabilities.
//!
//! Permission strings take the form
//! `<namespace>.<scope>.<target>[.<option>...]`, each granted or negated:
//!
//! - `libsdisguises.disguise.cow` - the `cow` kind, every option
//! - `libsdisguises.disguise.animal.setbaby` - every animal, only `setbaby`
//! - `libsdisguises.*.monster.-setburning` - every monster in every scope,
//!   anything but `setburning`
//! - `libsdisguises.disguise.*` - every kind
//!
//! A [`Resolver`] turns an unordered [`GrantSet`] into [`ResolvedPermissions`]
//! for one [`ActionScope`]:
//!
//! 1. each grant is parsed into a [`ParsedRule`] against the catalog, and
//!    strings that do not parse are dropped,
//! 2. rules are sorted from weakest to strongest (`*` scope first, general
//!    targets before specific ones, grants before negations),
//! 3. rules are folded per kind, later rules overriding earlier ones per option.
//!
//! A negated category never revokes an explicit grant of a kind, but a bare
//! negation of a kind revokes it whatever its categories grant.
//!
//! # Example
//!
//! ```
//! use guise_perms::{
//!     ActionScope, Category, GrantSet, Namespace, ResourceKind, Resolver, StaticCatalog,
//! };
//!
//! let catalog = StaticCatalog::new([
//!     ResourceKind::new("cow").with_category(Category::Animal),
//!     ResourceKind::new("zombie").with_category(Category::Monster),
//! ])
//! .unwrap();
//!
//! let mut grants = GrantSet::new();
//! grants.insert("lib.disguise.*.*", true);
//! grants.insert("lib.disguise.zombie.-setbaby", true);
//!
//! let resolver = Resolver::new(&catalog).with_namespace(Namespace::new("lib").unwrap());
//! let resolved = resolver.resolve(&grants, &ActionScope::new("disguise").unwrap());
//!
//! assert!(resolved.is_allowed_with_options("cow", ["setbaby"]));
//! assert!(resolved.is_allowed("zombie"));
//! assert!(!resolved.is_allowed_with_options("zombie", ["setbaby"]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

#[cfg(feature = "config")]
mod bridge;
mod catalog;
mod category;
mod error;
mod fold;
mod grant;
mod option;
mod order;
mod policy;
mod resolved;
mod resolver;
mod rule;
mod scope;

pub use catalog::{Category, ResourceCatalog, ResourceKind, StaticCatalog};
pub use category::{CategoryKeyword, Specificity, match_category};
pub use error::{PermsError, PermsResult};
pub use grant::{Grant, GrantSet, PermissionHolder};
pub use option::{OptionName, normalize_option};
pub use order::{application_order, sort_rules};
pub use policy::ResolutionPolicy;
pub use resolved::{KindPermissions, ResolvedPermissions};
pub use resolver::Resolver;
pub use rule::{ParsedRule, Rejection};
pub use scope::{ActionScope, DEFAULT_NAMESPACE, Namespace, is_addressed_to};
