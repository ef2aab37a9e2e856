//! Attributes of an AD fine-grained password policy (`msDS-PasswordSettings`).
//!
//! Every attribute the policy object exposes is listed once in
//! [`PasswordSettingsAttribute`], together with the LDAP attribute name, the
//! kind of value it carries, the default used when the directory returns
//! nothing, and the generic [`PasswordRule`] it corresponds to (if any).
//!
//! The table is fixed at compile time; nothing is registered at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use dirpolicy_core::rule::PasswordRule;
use dirpolicy_core::types::ValueType;

use crate::constants::{
    ATTR_LOCKOUT_DURATION, ATTR_LOCKOUT_OBSERVATION_WINDOW, ATTR_LOCKOUT_THRESHOLD,
    ATTR_MAX_PASSWORD_AGE, ATTR_MIN_PASSWORD_AGE, ATTR_MIN_PASSWORD_LENGTH,
    ATTR_PASSWORD_COMPLEXITY_ENABLED, ATTR_PASSWORD_HISTORY_LENGTH,
    ATTR_PASSWORD_REVERSIBLE_ENCRYPTION, ATTR_PASSWORD_SETTINGS_PRECEDENCE, ATTR_PSO_APPLIES_TO,
};

/// An attribute of a fine-grained password policy object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordSettingsAttribute {
    /// Which PSO wins when several apply to the same user (lower wins)
    PasswordSettingsPrecedence,
    /// Store passwords using reversible encryption
    PasswordReversibleEncryption,
    /// Number of remembered previous passwords
    PasswordHistoryLength,
    /// Passwords must meet AD complexity requirements
    PasswordComplexityEnabled,
    /// Minimum number of characters
    MinimumPasswordLength,
    /// Time before a password may be changed again
    MinimumPasswordAge,
    /// Time before a password expires
    MaximumPasswordAge,
    /// Failed logons before the account locks out
    LockoutThreshold,
    /// Window over which failed logons are counted
    LockoutObservationWindow,
    /// How long a locked out account stays locked
    LockoutDuration,
    /// Users and groups the policy applies to
    PsoAppliesTo,
}

/// Metadata attached to each [`PasswordSettingsAttribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AttributeDescriptor {
    value_type: ValueType,
    ldap_attribute: &'static str,
    default_value: &'static str,
    rule: Option<PasswordRule>,
}

impl PasswordSettingsAttribute {
    /// Every attribute, in enumeration order.
    pub const ALL: [PasswordSettingsAttribute; 11] = [
        PasswordSettingsAttribute::PasswordSettingsPrecedence,
        PasswordSettingsAttribute::PasswordReversibleEncryption,
        PasswordSettingsAttribute::PasswordHistoryLength,
        PasswordSettingsAttribute::PasswordComplexityEnabled,
        PasswordSettingsAttribute::MinimumPasswordLength,
        PasswordSettingsAttribute::MinimumPasswordAge,
        PasswordSettingsAttribute::MaximumPasswordAge,
        PasswordSettingsAttribute::LockoutThreshold,
        PasswordSettingsAttribute::LockoutObservationWindow,
        PasswordSettingsAttribute::LockoutDuration,
        PasswordSettingsAttribute::PsoAppliesTo,
    ];

    /// Get all attributes in enumeration order.
    #[must_use]
    pub fn all() -> &'static [PasswordSettingsAttribute] {
        &Self::ALL
    }

    const fn descriptor(self) -> AttributeDescriptor {
        const fn entry(
            value_type: ValueType,
            ldap_attribute: &'static str,
            default_value: &'static str,
            rule: Option<PasswordRule>,
        ) -> AttributeDescriptor {
            AttributeDescriptor {
                value_type,
                ldap_attribute,
                default_value,
                rule,
            }
        }

        match self {
            Self::PasswordSettingsPrecedence => {
                entry(ValueType::Min, ATTR_PASSWORD_SETTINGS_PRECEDENCE, "0", None)
            }
            Self::PasswordReversibleEncryption => entry(
                ValueType::Boolean,
                ATTR_PASSWORD_REVERSIBLE_ENCRYPTION,
                "FALSE",
                None,
            ),
            Self::PasswordHistoryLength => {
                entry(ValueType::Min, ATTR_PASSWORD_HISTORY_LENGTH, "0", None)
            }
            Self::PasswordComplexityEnabled => entry(
                ValueType::Boolean,
                ATTR_PASSWORD_COMPLEXITY_ENABLED,
                "FALSE",
                Some(PasswordRule::AdComplexity),
            ),
            Self::MinimumPasswordLength => entry(
                ValueType::Min,
                ATTR_MIN_PASSWORD_LENGTH,
                "0",
                Some(PasswordRule::MinimumLength),
            ),
            Self::MinimumPasswordAge => entry(
                ValueType::Duration,
                ATTR_MIN_PASSWORD_AGE,
                "0",
                Some(PasswordRule::MinimumLifetime),
            ),
            Self::MaximumPasswordAge => entry(
                ValueType::Duration,
                ATTR_MAX_PASSWORD_AGE,
                "0",
                Some(PasswordRule::ExpirationInterval),
            ),
            Self::LockoutThreshold => entry(ValueType::Other, ATTR_LOCKOUT_THRESHOLD, "0", None),
            Self::LockoutObservationWindow => entry(
                ValueType::Duration,
                ATTR_LOCKOUT_OBSERVATION_WINDOW,
                "0",
                None,
            ),
            Self::LockoutDuration => entry(ValueType::Duration, ATTR_LOCKOUT_DURATION, "0", None),
            Self::PsoAppliesTo => entry(ValueType::Other, ATTR_PSO_APPLIES_TO, "0", None),
        }
    }

    /// Stable symbolic name of the attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PasswordSettingsPrecedence => "password_settings_precedence",
            Self::PasswordReversibleEncryption => "password_reversible_encryption",
            Self::PasswordHistoryLength => "password_history_length",
            Self::PasswordComplexityEnabled => "password_complexity_enabled",
            Self::MinimumPasswordLength => "minimum_password_length",
            Self::MinimumPasswordAge => "minimum_password_age",
            Self::MaximumPasswordAge => "maximum_password_age",
            Self::LockoutThreshold => "lockout_threshold",
            Self::LockoutObservationWindow => "lockout_observation_window",
            Self::LockoutDuration => "lockout_duration",
            Self::PsoAppliesTo => "pso_applies_to",
        }
    }

    /// The kind of value to expect when working with this attribute.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        self.descriptor().value_type
    }

    /// Key of this attribute in a policy's backing attribute map.
    ///
    /// Currently the same as [`ldap_attribute`](Self::ldap_attribute), but
    /// callers must not rely on that.
    #[must_use]
    pub const fn key(self) -> &'static str {
        self.descriptor().ldap_attribute
    }

    /// LDAP attribute name used in search and modify requests.
    ///
    /// Currently the same as [`key`](Self::key), but callers must not rely
    /// on that.
    #[must_use]
    pub const fn ldap_attribute(self) -> &'static str {
        self.descriptor().ldap_attribute
    }

    /// Textual value assumed when the directory returns no value.
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        self.descriptor().default_value
    }

    /// The generic rule this attribute corresponds to, if any.
    #[must_use]
    pub const fn rule(self) -> Option<PasswordRule> {
        self.descriptor().rule
    }

    /// Find the attribute that implements a generic rule.
    ///
    /// Scans in enumeration order and returns the first match. `None` in
    /// yields `None` out, as does a rule with no AD counterpart.
    #[must_use]
    pub fn attribute_for_rule(rule: Option<PasswordRule>) -> Option<PasswordSettingsAttribute> {
        let rule = rule?;
        Self::ALL.iter().copied().find(|attr| attr.rule() == Some(rule))
    }

    /// Find an attribute by its LDAP attribute name (case-insensitive).
    #[must_use]
    pub fn from_ldap_attribute(name: &str) -> Option<PasswordSettingsAttribute> {
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.ldap_attribute().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PasswordSettingsAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PasswordSettingsAttribute {
    type Err = ParsePasswordSettingsAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.name() == normalized)
            .or_else(|| Self::from_ldap_attribute(s))
            .ok_or_else(|| ParsePasswordSettingsAttributeError(s.to_string()))
    }
}

/// Error parsing a password settings attribute from string.
#[derive(Debug, Clone)]
pub struct ParsePasswordSettingsAttributeError(String);

impl fmt::Display for ParsePasswordSettingsAttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown password settings attribute '{}'", self.0)
    }
}

impl std::error::Error for ParsePasswordSettingsAttributeError {}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// No two attributes may share a generic rule or an LDAP attribute name.
const fn attribute_table_is_unambiguous(attrs: &[PasswordSettingsAttribute]) -> bool {
    let mut i = 0;
    while i < attrs.len() {
        let mut j = i + 1;
        while j < attrs.len() {
            if str_eq(attrs[i].ldap_attribute(), attrs[j].ldap_attribute())
                || str_eq(attrs[i].name(), attrs[j].name())
            {
                return false;
            }
            if let (Some(a), Some(b)) = (attrs[i].rule(), attrs[j].rule()) {
                if a as u8 == b as u8 {
                    return false;
                }
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    attribute_table_is_unambiguous(&PasswordSettingsAttribute::ALL),
    "password settings attributes must map to distinct names and rules"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use super::PasswordSettingsAttribute as A;

    #[test]
    fn test_registry_has_eleven_distinct_entries() {
        assert_eq!(A::all().len(), 11);

        let entries: HashSet<A> = A::all().iter().copied().collect();
        assert_eq!(entries.len(), 11);

        let names: HashSet<&str> = A::all().iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_key_matches_ldap_attribute() {
        for attr in A::all() {
            assert_eq!(attr.key(), attr.ldap_attribute(), "{attr}");
        }
    }

    #[test]
    fn test_value_types() {
        let expected = [
            (A::PasswordSettingsPrecedence, ValueType::Min),
            (A::PasswordReversibleEncryption, ValueType::Boolean),
            (A::PasswordHistoryLength, ValueType::Min),
            (A::PasswordComplexityEnabled, ValueType::Boolean),
            (A::MinimumPasswordLength, ValueType::Min),
            (A::MinimumPasswordAge, ValueType::Duration),
            (A::MaximumPasswordAge, ValueType::Duration),
            (A::LockoutThreshold, ValueType::Other),
            (A::LockoutObservationWindow, ValueType::Duration),
            (A::LockoutDuration, ValueType::Duration),
            (A::PsoAppliesTo, ValueType::Other),
        ];
        for (attr, value_type) in expected {
            assert_eq!(attr.value_type(), value_type, "{attr}");
        }
    }

    #[test]
    fn test_default_values() {
        assert_eq!(A::PasswordReversibleEncryption.default_value(), "FALSE");
        assert_eq!(A::PasswordComplexityEnabled.default_value(), "FALSE");
        for attr in A::all() {
            if attr.value_type() != ValueType::Boolean {
                assert_eq!(attr.default_value(), "0", "{attr}");
            }
        }
    }

    #[test]
    fn test_ldap_attribute_names() {
        assert_eq!(
            A::PasswordSettingsPrecedence.ldap_attribute(),
            "msDS-PasswordSettingsPrecedence"
        );
        assert_eq!(
            A::PasswordReversibleEncryption.ldap_attribute(),
            "msDS-PasswordReversibleEncryptionEnabled"
        );
        assert_eq!(A::MaximumPasswordAge.ldap_attribute(), "msDS-MaximumPasswordAge");
        assert_eq!(A::PsoAppliesTo.ldap_attribute(), "msDS-PSOAppliesTo");
    }

    #[test]
    fn test_attribute_for_none_rule() {
        assert_eq!(A::attribute_for_rule(None), None);
    }

    #[test]
    fn test_attribute_for_linked_rules() {
        assert_eq!(
            A::attribute_for_rule(Some(PasswordRule::AdComplexity)),
            Some(A::PasswordComplexityEnabled)
        );
        assert_eq!(
            A::attribute_for_rule(Some(PasswordRule::MinimumLength)),
            Some(A::MinimumPasswordLength)
        );
        assert_eq!(
            A::attribute_for_rule(Some(PasswordRule::ExpirationInterval)),
            Some(A::MaximumPasswordAge)
        );
        assert_eq!(
            A::attribute_for_rule(Some(PasswordRule::MinimumLifetime)),
            Some(A::MinimumPasswordAge)
        );
    }

    #[test]
    fn test_attribute_for_unlinked_rules() {
        for rule in PasswordRule::all() {
            let linked = matches!(
                rule,
                PasswordRule::AdComplexity
                    | PasswordRule::MinimumLength
                    | PasswordRule::ExpirationInterval
                    | PasswordRule::MinimumLifetime
            );
            assert_eq!(
                A::attribute_for_rule(Some(*rule)).is_some(),
                linked,
                "{rule}"
            );
        }
    }

    #[test]
    fn test_rule_round_trip() {
        for attr in A::all() {
            if let Some(rule) = attr.rule() {
                assert_eq!(A::attribute_for_rule(Some(rule)), Some(*attr));
            }
        }
    }

    #[test]
    fn test_from_ldap_attribute() {
        assert_eq!(
            A::from_ldap_attribute("msds-lockoutduration"),
            Some(A::LockoutDuration)
        );
        assert_eq!(A::from_ldap_attribute("cn"), None);
    }

    #[test]
    fn test_from_str_accepts_name_and_ldap_attribute() {
        assert_eq!(
            "lockout_threshold".parse::<A>().unwrap(),
            A::LockoutThreshold
        );
        assert_eq!(
            "msDS-PasswordHistoryLength".parse::<A>().unwrap(),
            A::PasswordHistoryLength
        );
        assert!("pwdMaxAge".parse::<A>().is_err());
    }

    #[test]
    fn test_table_is_unambiguous() {
        assert!(attribute_table_is_unambiguous(&A::ALL));
        let duplicated = [A::LockoutDuration, A::LockoutDuration];
        assert!(!attribute_table_is_unambiguous(&duplicated));
    }
}
