//! Prelude module - commonly used test helpers.
//!
//! Use `use guise_test::prelude::*;` to import all essential helpers.

pub use crate::{
    MockPermissionHolder, TestConfigDir, capture_logs, grants, setup_test_logging, test_catalog,
    test_scope,
};
