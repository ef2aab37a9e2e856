//! Password policy value types
//!
//! The classification that drives parsing and formatting of raw policy values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of value expected when working with a policy attribute or rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    /// An integer representing a maximum limit of a value
    Max,
    /// An integer representing a minimum limit of a value
    Min,
    /// A boolean representing an on/off value
    Boolean,
    /// A time duration
    Duration,
    /// Some other type of value
    Other,
}

impl ValueType {
    /// Get all value types.
    #[must_use]
    pub fn all() -> &'static [ValueType] {
        &[
            ValueType::Max,
            ValueType::Min,
            ValueType::Boolean,
            ValueType::Duration,
            ValueType::Other,
        ]
    }

    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Max => "MAX",
            ValueType::Min => "MIN",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Duration => "DURATION",
            ValueType::Other => "OTHER",
        }
    }

    /// Check if values of this type are integer bounds.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, ValueType::Max | ValueType::Min)
    }

    /// Check if values of this type are stored as integers.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Max | ValueType::Min | ValueType::Duration)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = ParseValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MAX" => Ok(ValueType::Max),
            "MIN" => Ok(ValueType::Min),
            "BOOLEAN" => Ok(ValueType::Boolean),
            "DURATION" => Ok(ValueType::Duration),
            "OTHER" => Ok(ValueType::Other),
            _ => Err(ParseValueTypeError(s.to_string())),
        }
    }
}

/// Error parsing value type from string.
#[derive(Debug, Clone)]
pub struct ParseValueTypeError(String);

impl fmt::Display for ParseValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value type '{}', expected one of: MAX, MIN, BOOLEAN, DURATION, OTHER",
            self.0
        )
    }
}

impl std::error::Error for ParseValueTypeError {}
