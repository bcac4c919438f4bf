//! Parsing permission strings into rules.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::catalog::ResourceCatalog;
use crate::category::{Specificity, match_category};
use crate::option::{OptionName, normalize_option};
use crate::scope::{ActionScope, Namespace, SEGMENT_WILDCARD, split_segments};

/// Why a permission string produced no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than three segments.
    TooFewSegments,
    /// First segment is not the configured namespace.
    ForeignNamespace,
    /// Scope segment is neither the requested scope nor `*`.
    OtherScope,
    /// Target names no kind and no non-empty category.
    UnknownTarget,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::TooFewSegments => "fewer than three segments",
            Self::ForeignNamespace => "foreign namespace",
            Self::OtherScope => "scope does not apply",
            Self::UnknownTarget => "target matches no resource kind",
        };
        f.write_str(reason)
    }
}

/// One permission string, parsed against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRule {
    pattern: String,
    target_kinds: BTreeSet<String>,
    options: Vec<(OptionName, bool)>,
    specificity: Specificity,
    negated: bool,
    scope_is_wildcard: bool,
}

impl ParsedRule {
    /// Parse one permission string.
    ///
    /// The target segment is first looked up as a kind name, then as a
    /// category keyword. Option tokens keep their order; a repeated option
    /// replaces the earlier value in place. Every option token is kept, so an
    /// empty token or a lone `-` still counts as an option with an empty name.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] explaining why the string contributes no rule.
    pub fn parse<C>(
        pattern: &str,
        granted: bool,
        namespace: &Namespace,
        scope: &ActionScope,
        catalog: &C,
    ) -> Result<Self, Rejection>
    where
        C: ResourceCatalog + ?Sized,
    {
        let pattern = pattern.trim().to_lowercase();
        let segments = split_segments(&pattern);

        let [ns, action, target, option_tokens @ ..] = segments.as_slice() else {
            return Err(Rejection::TooFewSegments);
        };
        if *ns != namespace.as_str() {
            return Err(Rejection::ForeignNamespace);
        }
        if !scope.accepts(action) {
            return Err(Rejection::OtherScope);
        }

        let (specificity, target_kinds) = if let Some(kind) = catalog.find(target) {
            (Specificity::Explicit, BTreeSet::from([kind.name().to_string()]))
        } else {
            let (specificity, members) =
                match_category(catalog, target).ok_or(Rejection::UnknownTarget)?;
            (specificity, members.into_iter().collect())
        };

        let mut options: Vec<(OptionName, bool)> = Vec::new();
        for token in option_tokens {
            let (name, allow) = normalize_option(token);
            match options.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = allow,
                None => options.push((name, allow)),
            }
        }

        Ok(Self {
            scope_is_wildcard: *action == SEGMENT_WILDCARD,
            pattern: pattern.clone(),
            target_kinds,
            options,
            specificity,
            negated: !granted,
        })
    }

    /// The lower-cased permission string this rule came from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Names of the kinds this rule applies to. Never empty.
    #[must_use]
    pub fn target_kinds(&self) -> &BTreeSet<String> {
        &self.target_kinds
    }

    /// Whether this rule applies to a kind.
    #[must_use]
    pub fn targets(&self, kind_name: &str) -> bool {
        self.target_kinds.contains(kind_name)
    }

    /// Option tokens as `(name, allow)` pairs, before negation is applied.
    #[must_use]
    pub fn options(&self) -> &[(OptionName, bool)] {
        &self.options
    }

    /// Whether the rule lists any options.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Whether any listed option is an allow (no `-` prefix).
    #[must_use]
    pub fn lists_allowed_option(&self) -> bool {
        self.options.iter().any(|(_, allow)| *allow)
    }

    /// How general the rule's target is.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Whether the permission was negated by the holder.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether the scope segment was `*`.
    #[must_use]
    pub fn scope_is_wildcard(&self) -> bool {
        self.scope_is_wildcard
    }
}
