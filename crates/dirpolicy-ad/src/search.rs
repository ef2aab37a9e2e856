//! Search helpers for locating PSOs.

use crate::constants::{ATTR_RESULTANT_PSO, OBJECT_CLASS_PASSWORD_SETTINGS};
use crate::password_settings::PasswordSettingsAttribute;

/// LDAP filter matching every password settings object.
#[must_use]
pub fn password_settings_filter() -> String {
    format!("(objectClass={OBJECT_CLASS_PASSWORD_SETTINGS})")
}

/// Attributes to request when reading a PSO, in registry order.
#[must_use]
pub fn password_settings_attributes() -> Vec<&'static str> {
    let mut attrs = vec!["cn", "distinguishedName", "objectClass"];
    attrs.extend(
        PasswordSettingsAttribute::all()
            .iter()
            .map(|attr| attr.ldap_attribute()),
    );
    attrs
}

/// Attributes to request on a user to find the PSO that applies to them.
#[must_use]
pub fn resultant_pso_attributes() -> Vec<&'static str> {
    vec![ATTR_RESULTANT_PSO]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_filter() {
        assert_eq!(
            password_settings_filter(),
            "(objectClass=msDS-PasswordSettings)"
        );
    }

    #[test]
    fn test_attributes_cover_registry() {
        let attrs = password_settings_attributes();
        assert_eq!(attrs.len(), 3 + PasswordSettingsAttribute::all().len());
        for attr in PasswordSettingsAttribute::all() {
            assert!(attrs.contains(&attr.ldap_attribute()), "{attr}");
        }

        let unique: HashSet<&str> = attrs.iter().copied().collect();
        assert_eq!(unique.len(), attrs.len());
    }

    #[test]
    fn test_attributes_keep_registry_order() {
        let attrs = password_settings_attributes();
        assert_eq!(attrs[3], "msDS-PasswordSettingsPrecedence");
        assert_eq!(attrs.last(), Some(&"msDS-PSOAppliesTo"));
    }

    #[test]
    fn test_resultant_pso_attributes() {
        assert_eq!(resultant_pso_attributes(), vec!["msDS-ResultantPSO"]);
    }
}
