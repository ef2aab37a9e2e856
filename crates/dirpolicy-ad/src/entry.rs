//! Reading `msDS-PasswordSettings` objects.
//!
//! [`PasswordSettingsEntry`] wraps the raw attributes returned for one PSO and
//! interprets each value according to its [`ValueType`]. Missing attributes
//! take the default from [`PasswordSettingsAttribute::default_value`].

use std::borrow::Cow;

use tracing::{debug, instrument, warn};

use dirpolicy_core::error::{PolicyError, PolicyResult};
use dirpolicy_core::operation::AttributeSet;
use dirpolicy_core::policy::PasswordPolicy;
use dirpolicy_core::rule::PasswordRule;
use dirpolicy_core::types::ValueType;

use crate::config::PasswordSettingsConfig;
use crate::constants::{AD_FALSE, AD_TRUE, OBJECT_CLASS_PASSWORD_SETTINGS, VENDOR};
use crate::interval::AdInterval;
use crate::password_settings::PasswordSettingsAttribute;

/// A PSO value decoded according to its attribute's value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyValue {
    /// `MIN` and `MAX` attributes.
    Integer(i64),
    /// `BOOLEAN` attributes.
    Boolean(bool),
    /// `DURATION` attributes.
    Interval(AdInterval),
    /// `OTHER` attributes, left as directory text.
    Text(String),
}

/// A fine-grained password policy object read from the directory.
#[derive(Debug, Clone)]
pub struct PasswordSettingsEntry {
    dn: String,
    attributes: AttributeSet,
    config: PasswordSettingsConfig,
}

impl PasswordSettingsEntry {
    /// Wrap the attributes of the PSO at `dn`.
    pub fn new(dn: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            dn: dn.into(),
            attributes,
            config: PasswordSettingsConfig::default(),
        }
    }

    /// Build an entry from a search result carrying its own DN.
    ///
    /// The DN is taken from `distinguishedName` (or `dn`). When `objectClass`
    /// is returned it must include `msDS-PasswordSettings`.
    pub fn from_search_entry(attributes: AttributeSet) -> PolicyResult<Self> {
        let dn = attributes
            .get_string("distinguishedName")
            .or_else(|| attributes.get_string("dn"))
            .filter(|dn| !dn.is_empty())
            .ok_or_else(|| PolicyError::MissingAttribute {
                attribute: "distinguishedName".to_string(),
            })?
            .to_string();

        if let Some(classes) = attributes.get_strings("objectClass") {
            if !classes
                .iter()
                .any(|c| c.eq_ignore_ascii_case(OBJECT_CLASS_PASSWORD_SETTINGS))
            {
                return Err(PolicyError::UnexpectedObjectClass {
                    dn,
                    expected: OBJECT_CLASS_PASSWORD_SETTINGS.to_string(),
                });
            }
        }

        debug!(dn = %dn, attributes = attributes.len(), "Loaded password settings entry");
        Ok(Self::new(dn, attributes))
    }

    /// Replace the interpretation settings.
    #[must_use]
    pub fn with_config(mut self, config: PasswordSettingsConfig) -> Self {
        self.config = config;
        self
    }

    /// Distinguished name of the PSO.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Common name of the PSO, if returned.
    pub fn cn(&self) -> Option<&str> {
        self.attributes.get_string("cn")
    }

    /// The raw attributes backing this entry.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Whether the directory returned a usable value for `attr`.
    pub fn is_set(&self, attr: PasswordSettingsAttribute) -> bool {
        self.stored_value(attr).is_some()
    }

    fn stored_value(&self, attr: PasswordSettingsAttribute) -> Option<Cow<'_, str>> {
        let value = self.attributes.get(attr.key())?.to_text()?;
        if self.config.defaults_on_empty && value.trim().is_empty() {
            return None;
        }
        Some(value)
    }

    /// Directory text for `attr`, or its default when absent.
    pub fn raw_value(&self, attr: PasswordSettingsAttribute) -> Cow<'_, str> {
        self.stored_value(attr).unwrap_or_else(|| {
            debug!(dn = %self.dn, attribute = attr.key(), "Using default value");
            Cow::Borrowed(attr.default_value())
        })
    }

    fn interpret<T>(
        &self,
        attr: PasswordSettingsAttribute,
        parse: impl Fn(PasswordSettingsAttribute, &str) -> PolicyResult<T>,
    ) -> PolicyResult<T> {
        let raw = self.raw_value(attr);
        match parse(attr, &*raw) {
            Ok(value) => Ok(value),
            Err(err) if self.config.lenient_values => {
                warn!(
                    dn = %self.dn,
                    attribute = attr.ldap_attribute(),
                    value = %raw,
                    error = %err,
                    "Malformed password settings value, using default"
                );
                parse(attr, attr.default_value())
            }
            Err(err) => Err(err),
        }
    }

    /// Integer value of a `MIN`, `MAX` or `OTHER` attribute.
    #[instrument(skip(self), fields(dn = %self.dn))]
    pub fn integer(&self, attr: PasswordSettingsAttribute) -> PolicyResult<i64> {
        match attr.value_type() {
            ValueType::Min | ValueType::Max | ValueType::Other => {
                self.interpret(attr, parse_integer)
            }
            actual => Err(PolicyError::type_mismatch(
                attr.ldap_attribute(),
                actual,
                ValueType::Min,
            )),
        }
    }

    /// Value of a `BOOLEAN` attribute.
    #[instrument(skip(self), fields(dn = %self.dn))]
    pub fn boolean(&self, attr: PasswordSettingsAttribute) -> PolicyResult<bool> {
        if attr.value_type() != ValueType::Boolean {
            return Err(PolicyError::type_mismatch(
                attr.ldap_attribute(),
                attr.value_type(),
                ValueType::Boolean,
            ));
        }
        self.interpret(attr, parse_boolean)
    }

    /// Value of a `DURATION` attribute.
    #[instrument(skip(self), fields(dn = %self.dn))]
    pub fn interval(&self, attr: PasswordSettingsAttribute) -> PolicyResult<AdInterval> {
        if attr.value_type() != ValueType::Duration {
            return Err(PolicyError::type_mismatch(
                attr.ldap_attribute(),
                attr.value_type(),
                ValueType::Duration,
            ));
        }
        self.interpret(attr, parse_interval)
    }

    /// Value of any attribute, decoded by its value type.
    pub fn typed(&self, attr: PasswordSettingsAttribute) -> PolicyResult<PolicyValue> {
        match attr.value_type() {
            ValueType::Min | ValueType::Max => self.integer(attr).map(PolicyValue::Integer),
            ValueType::Boolean => self.boolean(attr).map(PolicyValue::Boolean),
            ValueType::Duration => self.interval(attr).map(PolicyValue::Interval),
            ValueType::Other => Ok(PolicyValue::Text(self.raw_value(attr).into_owned())),
        }
    }

    /// DNs of the users and groups this PSO applies to.
    ///
    /// The textual default of `msDS-PSOAppliesTo` is not a DN, so an absent
    /// attribute yields an empty list.
    pub fn applies_to(&self) -> Vec<&str> {
        self.attributes
            .get_strings(PasswordSettingsAttribute::PsoAppliesTo.key())
            .unwrap_or_default()
            .into_iter()
            .filter(|dn| !dn.trim().is_empty())
            .collect()
    }

    /// `msDS-PasswordSettingsPrecedence`; lower values win.
    pub fn precedence(&self) -> PolicyResult<i64> {
        self.integer(PasswordSettingsAttribute::PasswordSettingsPrecedence)
    }
}

fn parse_integer(attr: PasswordSettingsAttribute, raw: &str) -> PolicyResult<i64> {
    raw.trim().parse::<i64>().map_err(|e| {
        PolicyError::invalid_value_with_source(attr.ldap_attribute(), raw, attr.value_type(), e)
    })
}

fn parse_boolean(attr: PasswordSettingsAttribute, raw: &str) -> PolicyResult<bool> {
    let raw_trimmed = raw.trim();
    if raw_trimmed.eq_ignore_ascii_case(AD_TRUE) {
        Ok(true)
    } else if raw_trimmed.eq_ignore_ascii_case(AD_FALSE) {
        Ok(false)
    } else {
        Err(PolicyError::invalid_value(
            attr.ldap_attribute(),
            raw,
            ValueType::Boolean,
        ))
    }
}

fn parse_interval(attr: PasswordSettingsAttribute, raw: &str) -> PolicyResult<AdInterval> {
    AdInterval::parse(raw).map_err(|e| {
        PolicyError::invalid_value_with_source(attr.ldap_attribute(), raw, ValueType::Duration, e)
    })
}

impl PasswordPolicy for PasswordSettingsEntry {
    fn value(&self, key: &str) -> Option<String> {
        PasswordSettingsAttribute::all()
            .iter()
            .find(|attr| attr.key().eq_ignore_ascii_case(key))
            .map(|attr| self.raw_value(*attr).into_owned())
    }

    /// Generic rule values use the generic conventions: booleans are
    /// `true`/`false` and intervals are whole seconds, with AD's "never"
    /// reported as the rule's [`never_secs`](PasswordRule::never_secs).
    #[instrument(skip(self), fields(dn = %self.dn))]
    fn rule_value(&self, rule: PasswordRule) -> PolicyResult<String> {
        let attr = PasswordSettingsAttribute::attribute_for_rule(Some(rule))
            .ok_or_else(|| PolicyError::unsupported_rule(rule, VENDOR))?;

        let value = match self.typed(attr)? {
            PolicyValue::Integer(i) => i.to_string(),
            PolicyValue::Boolean(b) => b.to_string(),
            PolicyValue::Interval(interval) => interval.to_rule_secs(rule).to_string(),
            PolicyValue::Text(text) => text,
        };
        debug!(rule = %rule, attribute = attr.ldap_attribute(), value = %value, "Resolved rule");
        Ok(value)
    }

    fn keys(&self) -> Vec<&'static str> {
        PasswordSettingsAttribute::all()
            .iter()
            .map(|attr| attr.key())
            .collect()
    }

    fn source(&self) -> Option<&str> {
        Some(&self.dn)
    }
}

/// Pick the PSO that takes effect among several applying to the same user.
///
/// The lowest `msDS-PasswordSettingsPrecedence` wins; ties keep the earlier
/// entry. Entries whose precedence cannot be read are skipped.
#[instrument(skip(entries), fields(candidates = entries.len()))]
pub fn effective_policy(entries: &[PasswordSettingsEntry]) -> Option<&PasswordSettingsEntry> {
    let mut best: Option<(i64, &PasswordSettingsEntry)> = None;
    for entry in entries {
        let precedence = match entry.precedence() {
            Ok(p) => p,
            Err(err) => {
                warn!(dn = %entry.dn(), error = %err, "Skipping PSO with unreadable precedence");
                continue;
            }
        };
        if best.map_or(true, |(current, _)| precedence < current) {
            best = Some((precedence, entry));
        }
    }
    if let Some((precedence, entry)) = best {
        debug!(dn = %entry.dn(), precedence, "Selected effective PSO");
    }
    best.map(|(_, entry)| entry)
}
