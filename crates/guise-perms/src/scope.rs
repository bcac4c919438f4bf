//! The fixed leading segments of a permission string.
//!
//! `<namespace>.<scope>.<target>[.<option>...]`, where the scope is either the
//! action being resolved or `*`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PermsError, PermsResult};

/// Segment separator in permission strings.
pub(crate) const SEPARATOR: char = '.';

/// Segment matching every action scope or every target.
pub(crate) const SEGMENT_WILDCARD: &str = "*";

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "libsdisguises";

/// Lower-case a segment value and reject anything that cannot be a single
/// literal segment.
fn segment(value: &str) -> Result<String, &'static str> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        Err("value is empty")
    } else if value.contains(SEPARATOR) {
        Err("value contains the segment separator '.'")
    } else if value == SEGMENT_WILDCARD {
        Err("value is the segment wildcard")
    } else {
        Ok(value)
    }
}

/// The first segment every relevant permission string starts with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`PermsError::InvalidNamespace`] if the value is empty, contains
    /// `.`, or is `*`.
    pub fn new(namespace: impl AsRef<str>) -> PermsResult<Self> {
        let namespace = namespace.as_ref();
        segment(namespace)
            .map(Self)
            .map_err(|reason| PermsError::InvalidNamespace {
                namespace: namespace.to_string(),
                reason: reason.to_string(),
            })
    }

    /// The node granting every scope, target and option in this namespace.
    #[must_use]
    pub fn operator_node(&self) -> String {
        format!("{0}.{1}.{1}.{1}", self.0, SEGMENT_WILDCARD)
    }

    /// Get the namespace string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Namespace {
    type Error = PermsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(namespace: Namespace) -> Self {
        namespace.0
    }
}

/// The action a resolution is performed for, e.g. the `disguise` command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionScope(String);

impl ActionScope {
    /// Create an action scope.
    ///
    /// # Errors
    ///
    /// Returns [`PermsError::InvalidScope`] if the value is empty, contains
    /// `.`, or is `*`.
    pub fn new(scope: impl AsRef<str>) -> PermsResult<Self> {
        let scope = scope.as_ref();
        segment(scope)
            .map(Self)
            .map_err(|reason| PermsError::InvalidScope {
                scope: scope.to_string(),
                reason: reason.to_string(),
            })
    }

    /// Get the scope string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a scope segment applies to this scope.
    #[must_use]
    pub fn accepts(&self, segment: &str) -> bool {
        segment == SEGMENT_WILDCARD || segment == self.0
    }
}

impl fmt::Display for ActionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ActionScope {
    type Error = PermsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionScope> for String {
    fn from(scope: ActionScope) -> Self {
        scope.0
    }
}

/// Whether a lower-cased pattern is addressed to this namespace and scope.
///
/// Applies the same structural tests the rule parser starts with, without
/// consulting the catalog.
#[must_use]
pub fn is_addressed_to(pattern: &str, namespace: &Namespace, scope: &ActionScope) -> bool {
    match split_segments(pattern).as_slice() {
        [ns, action, _target, ..] => *ns == namespace.as_str() && scope.accepts(action),
        _ => false,
    }
}

/// Split a pattern into segments, dropping trailing empty segments so that
/// `a.b.c.` reads the same as `a.b.c`.
pub(crate) fn split_segments(pattern: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = pattern.split(SEPARATOR).collect();
    while segments.last().is_some_and(|last| last.is_empty()) {
        segments.pop();
    }
    segments
}
