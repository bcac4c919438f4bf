//! Option tokens and their canonical names.
//!
//! Every segment after the target in a permission string is an option token,
//! e.g. `libsdisguises.disguise.cow.setbaby.-setburning`. A leading `-` turns
//! the token into a denial.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix marking an option token as denied.
const NEGATION_MARKER: char = '-';

/// Short forms accepted in permission strings.
const ALIASES: &[(&str, &str)] = &[("baby", "setbaby")];

/// A canonical, lower-cased option name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct OptionName(String);

impl OptionName {
    /// Option token standing for every option.
    pub const WILDCARD: &'static str = "*";

    /// Marker recorded as the only permitted option after a wildcard denial.
    pub const NO_OPTIONS: &'static str = "nooptions";

    /// Canonicalize an option token: lower-case it and fold known aliases.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Self {
        let lowered = token.as_ref().to_lowercase();
        let canonical = ALIASES
            .iter()
            .find(|(alias, _)| *alias == lowered)
            .map_or(lowered, |(_, target)| (*target).to_string());
        Self(canonical)
    }

    /// Lower-case a caller-supplied option for comparison against resolved
    /// option sets. Aliases are not folded.
    #[must_use]
    pub fn from_query(option: impl AsRef<str>) -> Self {
        Self(option.as_ref().to_lowercase())
    }

    /// The `*` option.
    #[must_use]
    pub fn wildcard() -> Self {
        Self(Self::WILDCARD.to_string())
    }

    /// The `nooptions` marker.
    #[must_use]
    pub fn no_options() -> Self {
        Self(Self::NO_OPTIONS.to_string())
    }

    /// Whether this is the `*` option.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }

    /// Get the option name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for OptionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for OptionName {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for OptionName {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<OptionName> for String {
    fn from(name: OptionName) -> Self {
        name.0
    }
}

/// Split an option token into its canonical name and whether it allows use.
///
/// One leading `-` marks a denial. Never fails; unknown tokens pass through
/// lower-cased.
#[must_use]
pub fn normalize_option(token: &str) -> (OptionName, bool) {
    match token.strip_prefix(NEGATION_MARKER) {
        Some(rest) => (OptionName::new(rest), false),
        None => (OptionName::new(token), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_token_allows() {
        let (name, allow) = normalize_option("setburning");
        assert_eq!(name.as_str(), "setburning");
        assert!(allow);
    }

    #[test]
    fn test_negated_token_denies() {
        let (name, allow) = normalize_option("-setburning");
        assert_eq!(name.as_str(), "setburning");
        assert!(!allow);
    }

    #[test]
    fn test_alias_folding() {
        assert_eq!(normalize_option("baby").0.as_str(), "setbaby");
        assert_eq!(normalize_option("-baby"), (OptionName::new("setbaby"), false));
        assert_eq!(OptionName::new("BABY").as_str(), "setbaby");
    }

    #[test]
    fn test_only_one_marker_stripped() {
        let (name, allow) = normalize_option("--setglowing");
        assert_eq!(name.as_str(), "-setglowing");
        assert!(!allow);
    }

    #[test]
    fn test_unknown_token_lower_cased() {
        assert_eq!(OptionName::new("SetCustomName").as_str(), "setcustomname");
    }

    #[test]
    fn test_query_names_skip_aliases() {
        assert_eq!(OptionName::from_query("Baby").as_str(), "baby");
    }

    #[test]
    fn test_wildcard_helpers() {
        assert!(OptionName::wildcard().is_wildcard());
        assert!(normalize_option("-*").0.is_wildcard());
        assert!(!OptionName::no_options().is_wildcard());
    }

    #[test]
    fn test_serde_canonicalizes() {
        let name: OptionName = serde_json::from_str("\"Baby\"").unwrap();
        assert_eq!(name.as_str(), "setbaby");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"setbaby\"");
    }
}
