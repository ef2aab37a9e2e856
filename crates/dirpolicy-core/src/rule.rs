//! Vendor-neutral password rules
//!
//! A password rule names a policy concept (minimum length, expiration interval,
//! ...) independently of how any particular directory stores it. Directory
//! specific crates map their own attributes onto these rules.
//!
//! Durations expressed through a rule are always in seconds. A directory's
//! "never" is reported as the value returned by [`PasswordRule::never_secs`]:
//! `0` for [`PasswordRule::ExpirationInterval`] (no expiry) and `u64::MAX` for
//! [`PasswordRule::MinimumLifetime`] (the password can never be changed).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ValueType;

/// A generic password policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    /// Whether the policy is enforced at all
    PolicyEnabled,
    /// Minimum number of characters
    MinimumLength,
    /// Maximum number of characters
    MaximumLength,
    /// Minimum number of upper case characters
    MinimumUpperCase,
    /// Maximum number of upper case characters
    MaximumUpperCase,
    /// Minimum number of lower case characters
    MinimumLowerCase,
    /// Maximum number of lower case characters
    MaximumLowerCase,
    /// Minimum number of digits
    MinimumNumeric,
    /// Maximum number of digits
    MaximumNumeric,
    /// Minimum number of special characters
    MinimumSpecial,
    /// Maximum number of special characters
    MaximumSpecial,
    /// Whether digits are permitted
    AllowNumeric,
    /// Whether special characters are permitted
    AllowSpecial,
    /// Maximum number of repeated characters
    MaximumRepeat,
    /// Minimum number of distinct characters
    MinimumUnique,
    /// Whether previously used passwords are rejected
    UniqueRequired,
    /// Whether password comparison is case sensitive
    CaseSensitive,
    /// Seconds until a password expires (0 = never)
    ExpirationInterval,
    /// Seconds a password must be kept before it can be changed again
    /// (`u64::MAX` = never changeable)
    MinimumLifetime,
    /// Active Directory style "meets complexity requirements" switch
    AdComplexity,
}

impl PasswordRule {
    /// Get all rules in declaration order.
    #[must_use]
    pub fn all() -> &'static [PasswordRule] {
        &[
            PasswordRule::PolicyEnabled,
            PasswordRule::MinimumLength,
            PasswordRule::MaximumLength,
            PasswordRule::MinimumUpperCase,
            PasswordRule::MaximumUpperCase,
            PasswordRule::MinimumLowerCase,
            PasswordRule::MaximumLowerCase,
            PasswordRule::MinimumNumeric,
            PasswordRule::MaximumNumeric,
            PasswordRule::MinimumSpecial,
            PasswordRule::MaximumSpecial,
            PasswordRule::AllowNumeric,
            PasswordRule::AllowSpecial,
            PasswordRule::MaximumRepeat,
            PasswordRule::MinimumUnique,
            PasswordRule::UniqueRequired,
            PasswordRule::CaseSensitive,
            PasswordRule::ExpirationInterval,
            PasswordRule::MinimumLifetime,
            PasswordRule::AdComplexity,
        ]
    }

    /// Stable key used in configuration and serialized policies.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            PasswordRule::PolicyEnabled => "policy_enabled",
            PasswordRule::MinimumLength => "minimum_length",
            PasswordRule::MaximumLength => "maximum_length",
            PasswordRule::MinimumUpperCase => "minimum_upper_case",
            PasswordRule::MaximumUpperCase => "maximum_upper_case",
            PasswordRule::MinimumLowerCase => "minimum_lower_case",
            PasswordRule::MaximumLowerCase => "maximum_lower_case",
            PasswordRule::MinimumNumeric => "minimum_numeric",
            PasswordRule::MaximumNumeric => "maximum_numeric",
            PasswordRule::MinimumSpecial => "minimum_special",
            PasswordRule::MaximumSpecial => "maximum_special",
            PasswordRule::AllowNumeric => "allow_numeric",
            PasswordRule::AllowSpecial => "allow_special",
            PasswordRule::MaximumRepeat => "maximum_repeat",
            PasswordRule::MinimumUnique => "minimum_unique",
            PasswordRule::UniqueRequired => "unique_required",
            PasswordRule::CaseSensitive => "case_sensitive",
            PasswordRule::ExpirationInterval => "expiration_interval",
            PasswordRule::MinimumLifetime => "minimum_lifetime",
            PasswordRule::AdComplexity => "ad_complexity",
        }
    }

    /// The kind of value this rule carries.
    #[must_use]
    pub fn rule_type(&self) -> ValueType {
        match self {
            PasswordRule::MinimumLength
            | PasswordRule::MinimumUpperCase
            | PasswordRule::MinimumLowerCase
            | PasswordRule::MinimumNumeric
            | PasswordRule::MinimumSpecial
            | PasswordRule::MinimumUnique => ValueType::Min,
            PasswordRule::MaximumLength
            | PasswordRule::MaximumUpperCase
            | PasswordRule::MaximumLowerCase
            | PasswordRule::MaximumNumeric
            | PasswordRule::MaximumSpecial
            | PasswordRule::MaximumRepeat => ValueType::Max,
            PasswordRule::PolicyEnabled
            | PasswordRule::AllowNumeric
            | PasswordRule::AllowSpecial
            | PasswordRule::UniqueRequired
            | PasswordRule::CaseSensitive
            | PasswordRule::AdComplexity => ValueType::Boolean,
            PasswordRule::ExpirationInterval | PasswordRule::MinimumLifetime => {
                ValueType::Duration
            }
        }
    }

    /// Generic seconds standing for a duration that never elapses.
    ///
    /// `None` for rules that are not durations.
    #[must_use]
    pub const fn never_secs(&self) -> Option<u64> {
        match self {
            PasswordRule::ExpirationInterval => Some(0),
            PasswordRule::MinimumLifetime => Some(u64::MAX),
            _ => None,
        }
    }

    /// Value to assume when a policy does not specify this rule.
    #[must_use]
    pub fn default_value(&self) -> &'static str {
        match self {
            PasswordRule::AllowNumeric | PasswordRule::AllowSpecial | PasswordRule::CaseSensitive => {
                "true"
            }
            PasswordRule::PolicyEnabled
            | PasswordRule::UniqueRequired
            | PasswordRule::AdComplexity => "false",
            _ => "0",
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PasswordRule {
    type Err = ParsePasswordRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        PasswordRule::all()
            .iter()
            .copied()
            .find(|rule| rule.key() == normalized)
            .ok_or_else(|| ParsePasswordRuleError(s.to_string()))
    }
}

/// Error parsing password rule from string.
#[derive(Debug, Clone)]
pub struct ParsePasswordRuleError(String);

impl fmt::Display for ParsePasswordRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown password rule '{}'", self.0)
    }
}

impl std::error::Error for ParsePasswordRuleError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_keys_are_unique() {
        let keys: HashSet<&str> = PasswordRule::all().iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), PasswordRule::all().len());
    }

    #[test]
    fn test_rule_from_str() {
        assert_eq!(
            "minimum_length".parse::<PasswordRule>().unwrap(),
            PasswordRule::MinimumLength
        );
        assert_eq!(
            "AD_COMPLEXITY".parse::<PasswordRule>().unwrap(),
            PasswordRule::AdComplexity
        );
        assert!("lockout_threshold".parse::<PasswordRule>().is_err());
    }

    #[test]
    fn test_rule_serde_matches_key() {
        for rule in PasswordRule::all() {
            let json = serde_json::to_string(rule).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.key()));
        }
    }

    #[test]
    fn test_rule_types() {
        assert_eq!(PasswordRule::MinimumLength.rule_type(), ValueType::Min);
        assert_eq!(PasswordRule::MaximumRepeat.rule_type(), ValueType::Max);
        assert_eq!(PasswordRule::AdComplexity.rule_type(), ValueType::Boolean);
        assert_eq!(
            PasswordRule::ExpirationInterval.rule_type(),
            ValueType::Duration
        );
    }

    #[test]
    fn test_never_secs_only_for_durations() {
        assert_eq!(PasswordRule::ExpirationInterval.never_secs(), Some(0));
        assert_eq!(PasswordRule::MinimumLifetime.never_secs(), Some(u64::MAX));
        for rule in PasswordRule::all() {
            if rule.rule_type() != ValueType::Duration {
                assert_eq!(rule.never_secs(), None, "{rule}");
            }
        }
    }

    #[test]
    fn test_rule_defaults_match_rule_type() {
        for rule in PasswordRule::all() {
            let default = rule.default_value();
            match rule.rule_type() {
                ValueType::Boolean => assert!(default == "true" || default == "false"),
                _ => assert!(default.parse::<i64>().is_ok(), "{rule} default {default}"),
            }
        }
    }
}
