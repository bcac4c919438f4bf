//! Prelude module - commonly used types for convenient import.
//!
//! Use `use guise_perms::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use guise_perms::prelude::*;
//!
//! let catalog = StaticCatalog::new([ResourceKind::new("sheep").with_category(Category::Animal)])?;
//! let grants: GrantSet = [("libsdisguises.disguise.animal.-setsheared", true)]
//!     .into_iter()
//!     .collect();
//!
//! let resolved = Resolver::new(&catalog).resolve(&grants, &ActionScope::new("disguise")?);
//! assert!(resolved.is_allowed_with_options("sheep", ["setcolor"]));
//! assert!(!resolved.is_allowed_with_options("sheep", ["setsheared"]));
//! # Ok::<(), PermsError>(())
//! ```

// Errors
pub use crate::{PermsError, PermsResult};

// Inputs
pub use crate::{Category, Grant, GrantSet, PermissionHolder, ResourceCatalog, ResourceKind};
pub use crate::{ActionScope, Namespace, ResolutionPolicy, StaticCatalog};

// Resolution
pub use crate::{KindPermissions, OptionName, ResolvedPermissions, Resolver};
