//! Guise Test - shared test utilities for the guise crates.
//!
//! Fixtures (a representative catalog, grant snapshots, the `disguise`
//! scope), a mock [`PermissionHolder`](guise_perms::PermissionHolder) and a
//! small harness for logging and temporary config files.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! guise-test.workspace = true
//! ```
//!
//! ```rust
//! use guise_perms::Resolver;
//! use guise_test::{MockPermissionHolder, test_catalog, test_scope};
//!
//! let catalog = test_catalog();
//! let holder = MockPermissionHolder::new()
//!     .grant("libsdisguises.disguise.animal")
//!     .deny("libsdisguises.disguise.pig");
//!
//! let resolved = Resolver::new(&catalog).resolve_holder(&holder, &test_scope());
//! assert!(resolved.is_allowed("cow"));
//! assert!(!resolved.is_allowed("pig"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
