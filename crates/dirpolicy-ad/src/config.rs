//! Password settings reader configuration.

use serde::{Deserialize, Serialize};

use dirpolicy_core::error::{PolicyError, PolicyResult};

use crate::constants::PASSWORD_SETTINGS_CONTAINER_RDN;

/// How raw `msDS-PasswordSettings` values are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSettingsConfig {
    /// Substitute the attribute default for values that fail to parse,
    /// instead of returning an error.
    #[serde(default)]
    pub lenient_values: bool,

    /// Treat an empty string the same as a missing attribute.
    #[serde(default = "default_true")]
    pub defaults_on_empty: bool,

    /// DN of the container holding PSOs. Derived from the domain DN when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_base: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for PasswordSettingsConfig {
    fn default() -> Self {
        Self {
            lenient_values: false,
            defaults_on_empty: default_true(),
            search_base: None,
        }
    }
}

impl PasswordSettingsConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to defaults on malformed values.
    #[must_use]
    pub fn with_lenient_values(mut self) -> Self {
        self.lenient_values = true;
        self
    }

    /// Keep empty strings as values rather than treating them as absent.
    #[must_use]
    pub fn with_empty_values_kept(mut self) -> Self {
        self.defaults_on_empty = false;
        self
    }

    /// Use an explicit PSO container DN.
    #[must_use]
    pub fn with_search_base(mut self, dn: impl Into<String>) -> Self {
        self.search_base = Some(dn.into());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> PolicyResult<()> {
        if let Some(base) = &self.search_base {
            if base.trim().is_empty() {
                return Err(PolicyError::invalid_configuration(
                    "search_base cannot be empty",
                ));
            }
            if !base.contains('=') {
                return Err(PolicyError::invalid_configuration(format!(
                    "search_base '{base}' is not a distinguished name"
                )));
            }
        }
        Ok(())
    }

    /// DN of the Password Settings Container for a domain.
    ///
    /// # Errors
    /// Returns an error if neither a search base nor a domain DN is available.
    pub fn container_dn(&self, domain_dn: &str) -> PolicyResult<String> {
        if let Some(base) = &self.search_base {
            return Ok(base.clone());
        }
        if domain_dn.trim().is_empty() {
            return Err(PolicyError::invalid_configuration(
                "domain DN is required when no search_base is configured",
            ));
        }
        Ok(format!("{PASSWORD_SETTINGS_CONTAINER_RDN},{domain_dn}"))
    }
}
