//! Folding sorted rules into one permission record per kind.

use std::collections::BTreeSet;

use crate::catalog::ResourceKind;
use crate::option::OptionName;
use crate::policy::ResolutionPolicy;
use crate::resolved::KindPermissions;
use crate::rule::ParsedRule;

/// Intermediate state of one kind while rules are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordDraft {
    enabled: bool,
    wildcard_allow: bool,
    permitted: BTreeSet<OptionName>,
    forbidden: BTreeSet<OptionName>,
}

impl RecordDraft {
    /// Apply one rule, producing the next draft.
    pub(crate) fn apply(mut self, rule: &ParsedRule, policy: &ResolutionPolicy) -> Self {
        if rule.is_negated() {
            // A bare negation revokes the kind outright.
            if !rule.has_options() {
                self.enabled = false;
                return self;
            }
            // A negation listing only denied options means nothing.
            if !rule.lists_allowed_option() {
                return self;
            }
        } else {
            self.enabled = true;

            if !rule.has_options() && !policy.explicit_options {
                self.wildcard_allow = true;
            } else if !self.permitted.contains(OptionName::WILDCARD) {
                self.wildcard_allow = false;
            }
        }

        for (name, listed_allow) in rule.options() {
            let allow = *listed_allow != rule.is_negated();

            self.permitted.remove(name);
            self.forbidden.remove(name);

            if name.is_wildcard() {
                self.permitted.clear();
                self.forbidden.clear();
                self.wildcard_allow = allow;
                self.permitted.insert(if allow {
                    OptionName::wildcard()
                } else {
                    OptionName::no_options()
                });
            } else if allow {
                self.permitted.insert(name.clone());
            } else {
                self.forbidden.insert(name.clone());
            }
        }

        self
    }

    /// Apply forced denials and emit the record, or `None` if the kind ended
    /// disabled.
    pub(crate) fn finish(
        mut self,
        kind: &ResourceKind,
        policy: &ResolutionPolicy,
    ) -> Option<KindPermissions> {
        if !self.enabled {
            return None;
        }

        for option in &policy.forced_forbidden {
            self.permitted.remove(option);
            self.forbidden.insert(option.clone());
        }

        Some(KindPermissions::new(
            kind.clone(),
            self.wildcard_allow,
            self.permitted,
            self.forbidden,
        ))
    }
}

/// Fold every rule targeting `kind`, in the given order.
pub(crate) fn fold_kind(
    kind: &ResourceKind,
    rules: &[ParsedRule],
    policy: &ResolutionPolicy,
) -> Option<KindPermissions> {
    rules
        .iter()
        .filter(|rule| rule.targets(kind.name()))
        .fold(RecordDraft::default(), |draft, rule| draft.apply(rule, policy))
        .finish(kind, policy)
}
