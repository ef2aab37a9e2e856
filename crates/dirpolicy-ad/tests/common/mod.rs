//! Shared fixtures for PSO integration tests.

#![allow(dead_code)]

use dirpolicy_core::operation::{AttributeSet, AttributeValue};
use serde_json::json;

pub const DOMAIN_DN: &str = "DC=example,DC=com";

/// Convert a JSON object (as an LDAP client would hand back) into an attribute set.
pub fn attribute_set(value: serde_json::Value) -> AttributeSet {
    value
        .as_object()
        .expect("fixture must be a JSON object")
        .iter()
        .map(|(k, v)| (k.clone(), AttributeValue::from(v.clone())))
        .collect()
}

/// A fully populated PSO search result.
pub fn admins_pso() -> serde_json::Value {
    json!({
        "distinguishedName": "CN=Admins,CN=Password Settings Container,CN=System,DC=example,DC=com",
        "objectClass": ["top", "msDS-PasswordSettings"],
        "cn": "Admins",
        "msDS-PasswordSettingsPrecedence": "1",
        "msDS-PasswordReversibleEncryptionEnabled": "FALSE",
        "msDS-PasswordHistoryLength": "24",
        "msDS-PasswordComplexityEnabled": "TRUE",
        "msDS-MinimumPasswordLength": "16",
        "msDS-MinimumPasswordAge": "-864000000000",
        "msDS-MaximumPasswordAge": "-25920000000000",
        "msDS-LockoutThreshold": "3",
        "msDS-LockoutObservationWindow": "-6000000000",
        "msDS-LockoutDuration": "-9223372036854775808",
        "msDS-PSOAppliesTo": ["CN=Domain Admins,CN=Users,DC=example,DC=com"]
    })
}

/// A PSO that only carries the mandatory attributes.
pub fn minimal_pso(name: &str, precedence: i64) -> serde_json::Value {
    json!({
        "distinguishedName": format!("CN={name},CN=Password Settings Container,CN=System,{DOMAIN_DN}"),
        "objectClass": ["top", "msDS-PasswordSettings"],
        "cn": name,
        "msDS-PasswordSettingsPrecedence": precedence
    })
}
