//! Permission engine error types.

use thiserror::Error;

/// Errors raised while building the inputs of a resolution.
///
/// Resolution itself never fails: permission strings that cannot be parsed
/// are dropped. Only the scope, namespace and catalog are validated.
#[derive(Debug, Error)]
pub enum PermsError {
    /// The action scope cannot appear as a permission segment.
    #[error("invalid action scope: {scope:?} - {reason}")]
    InvalidScope {
        /// The rejected scope.
        scope: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The permission namespace cannot appear as a permission segment.
    #[error("invalid permission namespace: {namespace:?} - {reason}")]
    InvalidNamespace {
        /// The rejected namespace.
        namespace: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A resource kind name cannot be addressed by a permission string.
    #[error("invalid resource kind name: {name:?} - {reason}")]
    InvalidKindName {
        /// The rejected kind name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two catalog entries share a name.
    #[error("duplicate resource kind in catalog: {name}")]
    DuplicateKind {
        /// The duplicated kind name.
        name: String,
    },

    /// A category name is not one of the known categories.
    #[error("unknown category: {name}")]
    UnknownCategory {
        /// The unrecognized category name.
        name: String,
    },
}

/// Result type for permission engine operations.
pub type PermsResult<T> = Result<T, PermsError>;
