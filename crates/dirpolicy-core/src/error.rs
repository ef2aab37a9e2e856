//! Password policy error types
//!
//! Error definitions for interpreting and writing directory password policy values.

use thiserror::Error;

use crate::rule::PasswordRule;
use crate::types::ValueType;

/// Error that can occur while reading or writing password policy values.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A raw directory value could not be interpreted as its declared type.
    #[error("invalid value '{value}' for attribute '{attribute}': expected {expected}")]
    InvalidValue {
        attribute: String,
        value: String,
        expected: ValueType,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A typed accessor was used on an attribute of a different value type.
    #[error("attribute '{attribute}' holds {actual} values, not {requested}")]
    TypeMismatch {
        attribute: String,
        actual: ValueType,
        requested: ValueType,
    },

    /// The generic rule has no counterpart in this directory's policy object.
    #[error("password rule '{rule}' is not supported by {vendor}")]
    UnsupportedRule {
        rule: PasswordRule,
        vendor: &'static str,
    },

    /// The attribute name is not part of the known attribute set.
    #[error("unknown password policy attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    /// A required attribute is absent from the directory object.
    #[error("required attribute '{attribute}' is missing")]
    MissingAttribute { attribute: String },

    /// The directory object is not of the expected object class.
    #[error("object '{dn}' is not a {expected}")]
    UnexpectedObjectClass { dn: String, expected: String },

    /// Policy configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl PolicyError {
    /// Get an error code for classification.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            PolicyError::InvalidValue { .. } => "INVALID_VALUE",
            PolicyError::TypeMismatch { .. } => "TYPE_MISMATCH",
            PolicyError::UnsupportedRule { .. } => "UNSUPPORTED_RULE",
            PolicyError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            PolicyError::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            PolicyError::UnexpectedObjectClass { .. } => "UNEXPECTED_OBJECT_CLASS",
            PolicyError::InvalidConfiguration { .. } => "INVALID_CONFIG",
        }
    }

    /// Whether the error means "this directory cannot express the rule".
    ///
    /// Callers iterating over every generic rule usually skip these.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, PolicyError::UnsupportedRule { .. })
    }

    // Convenience constructors

    /// Create an invalid value error.
    pub fn invalid_value(
        attribute: impl Into<String>,
        value: impl Into<String>,
        expected: ValueType,
    ) -> Self {
        PolicyError::InvalidValue {
            attribute: attribute.into(),
            value: value.into(),
            expected,
            source: None,
        }
    }

    /// Create an invalid value error with source.
    pub fn invalid_value_with_source(
        attribute: impl Into<String>,
        value: impl Into<String>,
        expected: ValueType,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PolicyError::InvalidValue {
            attribute: attribute.into(),
            value: value.into(),
            expected,
            source: Some(Box::new(source)),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        attribute: impl Into<String>,
        actual: ValueType,
        requested: ValueType,
    ) -> Self {
        PolicyError::TypeMismatch {
            attribute: attribute.into(),
            actual,
            requested,
        }
    }

    /// Create an unsupported rule error.
    pub fn unsupported_rule(rule: PasswordRule, vendor: &'static str) -> Self {
        PolicyError::UnsupportedRule { rule, vendor }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        PolicyError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result type for password policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PolicyError::invalid_value("msDS-LockoutThreshold", "abc", ValueType::Other)
                .error_code(),
            "INVALID_VALUE"
        );
        assert_eq!(
            PolicyError::unsupported_rule(PasswordRule::MaximumLength, "Active Directory")
                .error_code(),
            "UNSUPPORTED_RULE"
        );
        assert_eq!(
            PolicyError::invalid_configuration("bad").error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_error_display() {
        let err = PolicyError::invalid_value("msDS-MinimumPasswordLength", "ten", ValueType::Min);
        assert_eq!(
            err.to_string(),
            "invalid value 'ten' for attribute 'msDS-MinimumPasswordLength': expected MIN"
        );

        let err = PolicyError::type_mismatch(
            "msDS-PasswordComplexityEnabled",
            ValueType::Boolean,
            ValueType::Duration,
        );
        assert_eq!(
            err.to_string(),
            "attribute 'msDS-PasswordComplexityEnabled' holds BOOLEAN values, not DURATION"
        );

        let err = PolicyError::unsupported_rule(PasswordRule::MaximumLength, "Active Directory");
        assert_eq!(
            err.to_string(),
            "password rule 'maximum_length' is not supported by Active Directory"
        );
    }

    #[test]
    fn test_is_unsupported() {
        assert!(
            PolicyError::unsupported_rule(PasswordRule::UniqueRequired, "Active Directory")
                .is_unsupported()
        );
        assert!(!PolicyError::UnknownAttribute {
            attribute: "cn".to_string()
        }
        .is_unsupported());
    }

    #[test]
    fn test_error_with_source() {
        let source_err = "abc".parse::<i64>().unwrap_err();
        let err = PolicyError::invalid_value_with_source(
            "msDS-PasswordHistoryLength",
            "abc",
            ValueType::Min,
            source_err,
        );

        if let PolicyError::InvalidValue { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("Expected InvalidValue variant");
        }
    }
}
