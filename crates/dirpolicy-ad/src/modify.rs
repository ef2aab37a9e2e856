//! Building LDAP modify requests for `msDS-PasswordSettings` objects.
//!
//! Values are checked against each attribute's [`ValueType`] and formatted the
//! way AD stores them before being added to an [`AttributeDelta`].

use tracing::{debug, instrument};

use dirpolicy_core::error::{PolicyError, PolicyResult};
use dirpolicy_core::operation::AttributeDelta;
use dirpolicy_core::rule::PasswordRule;
use dirpolicy_core::types::ValueType;

use crate::constants::{AD_FALSE, AD_TRUE, VENDOR};
use crate::interval::AdInterval;
use crate::password_settings::PasswordSettingsAttribute;

/// Accumulates replace/clear operations for one PSO.
#[derive(Debug, Clone, Default)]
pub struct PasswordSettingsUpdate {
    delta: AttributeDelta,
}

impl PasswordSettingsUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    fn require_type(
        attr: PasswordSettingsAttribute,
        accepted: &[ValueType],
        requested: ValueType,
    ) -> PolicyResult<()> {
        if accepted.contains(&attr.value_type()) {
            Ok(())
        } else {
            Err(PolicyError::type_mismatch(
                attr.ldap_attribute(),
                attr.value_type(),
                requested,
            ))
        }
    }

    /// Set a `MIN`, `MAX` or `OTHER` attribute to an integer.
    ///
    /// Bounds (`MIN`/`MAX`) cannot be negative.
    #[instrument(skip(self))]
    pub fn set_integer(
        &mut self,
        attr: PasswordSettingsAttribute,
        value: i64,
    ) -> PolicyResult<&mut Self> {
        Self::require_type(
            attr,
            &[ValueType::Min, ValueType::Max, ValueType::Other],
            ValueType::Min,
        )?;
        if attr.value_type().is_bound() && value < 0 {
            return Err(PolicyError::invalid_value(
                attr.ldap_attribute(),
                value.to_string(),
                attr.value_type(),
            ));
        }
        self.delta.replace(attr.ldap_attribute(), value.to_string());
        Ok(self)
    }

    /// Set a `BOOLEAN` attribute.
    #[instrument(skip(self))]
    pub fn set_boolean(
        &mut self,
        attr: PasswordSettingsAttribute,
        value: bool,
    ) -> PolicyResult<&mut Self> {
        Self::require_type(attr, &[ValueType::Boolean], ValueType::Boolean)?;
        let token = if value { AD_TRUE } else { AD_FALSE };
        self.delta.replace(attr.ldap_attribute(), token);
        Ok(self)
    }

    /// Set a `DURATION` attribute.
    #[instrument(skip(self))]
    pub fn set_interval(
        &mut self,
        attr: PasswordSettingsAttribute,
        value: AdInterval,
    ) -> PolicyResult<&mut Self> {
        Self::require_type(attr, &[ValueType::Duration], ValueType::Duration)?;
        self.delta.replace(attr.ldap_attribute(), value.to_ad_value());
        Ok(self)
    }

    /// Replace the users and groups the PSO applies to.
    ///
    /// An empty list clears the attribute.
    #[instrument(skip(self, dns))]
    pub fn set_applies_to<I, S>(&mut self, dns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attr = PasswordSettingsAttribute::PsoAppliesTo.ldap_attribute();
        let dns: Vec<String> = dns.into_iter().map(Into::into).collect();
        if dns.is_empty() {
            self.delta.clear_attribute(attr);
        } else {
            debug!(targets = dns.len(), "Setting PSO targets");
            self.delta.replace(attr, dns);
        }
        self
    }

    /// Set an attribute from directory text, validated against its type.
    #[instrument(skip(self))]
    pub fn set_raw(&mut self, ldap_attribute: &str, value: &str) -> PolicyResult<&mut Self> {
        let attr = PasswordSettingsAttribute::from_ldap_attribute(ldap_attribute).ok_or_else(|| {
            PolicyError::UnknownAttribute {
                attribute: ldap_attribute.to_string(),
            }
        })?;
        let invalid = || PolicyError::invalid_value(attr.ldap_attribute(), value, attr.value_type());
        match attr.value_type() {
            ValueType::Min | ValueType::Max => {
                let parsed = value.trim().parse::<i64>().map_err(|_| invalid())?;
                self.set_integer(attr, parsed)
            }
            ValueType::Boolean => {
                let trimmed = value.trim();
                if trimmed.eq_ignore_ascii_case(AD_TRUE) {
                    self.set_boolean(attr, true)
                } else if trimmed.eq_ignore_ascii_case(AD_FALSE) {
                    self.set_boolean(attr, false)
                } else {
                    Err(invalid())
                }
            }
            ValueType::Duration => {
                let interval = AdInterval::parse(value).map_err(|_| invalid())?;
                self.set_interval(attr, interval)
            }
            ValueType::Other => {
                self.delta.replace(attr.ldap_attribute(), value);
                Ok(self)
            }
        }
    }

    /// Set the attribute backing a generic rule from a generic rule value.
    ///
    /// Generic booleans are `true`/`false`; generic intervals are seconds,
    /// with the rule's [`never_secs`](PasswordRule::never_secs) written as
    /// AD's "never".
    #[instrument(skip(self))]
    pub fn set_rule(&mut self, rule: PasswordRule, value: &str) -> PolicyResult<&mut Self> {
        let attr = PasswordSettingsAttribute::attribute_for_rule(Some(rule))
            .ok_or_else(|| PolicyError::unsupported_rule(rule, VENDOR))?;
        let invalid = || PolicyError::invalid_value(rule.key(), value, rule.rule_type());
        match attr.value_type() {
            ValueType::Boolean => {
                let flag = value.trim().parse::<bool>().map_err(|_| invalid())?;
                self.set_boolean(attr, flag)
            }
            ValueType::Duration => {
                let secs = value.trim().parse::<u64>().map_err(|_| invalid())?;
                self.set_interval(attr, AdInterval::from_rule_secs(rule, secs))
            }
            _ => {
                let number = value.trim().parse::<i64>().map_err(|_| invalid())?;
                self.set_integer(attr, number)
            }
        }
    }

    /// Reset an attribute to its default value.
    #[instrument(skip(self))]
    pub fn reset(&mut self, attr: PasswordSettingsAttribute) -> &mut Self {
        if attr == PasswordSettingsAttribute::PsoAppliesTo {
            self.delta.clear_attribute(attr.ldap_attribute());
        } else {
            self.delta
                .replace(attr.ldap_attribute(), attr.default_value());
        }
        self
    }

    /// Check if the update has any changes.
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    /// Borrow the accumulated delta.
    pub fn delta(&self) -> &AttributeDelta {
        &self.delta
    }

    /// Finish the update.
    pub fn into_delta(self) -> AttributeDelta {
        self.delta
    }
}
