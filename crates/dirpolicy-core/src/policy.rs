//! Vendor-neutral password policy access.

use crate::error::PolicyResult;
use crate::rule::PasswordRule;

/// A password policy read from some directory.
///
/// Implementations expose their vendor attributes by key and translate the
/// generic [`PasswordRule`] vocabulary onto them where a mapping exists.
pub trait PasswordPolicy: Send + Sync {
    /// Raw textual value for a vendor key, with the vendor default applied.
    ///
    /// Returns `None` when the key is not part of this policy's attribute set.
    fn value(&self, key: &str) -> Option<String>;

    /// Value of a generic rule, normalized to the rule's conventions.
    ///
    /// # Errors
    /// [`PolicyError::UnsupportedRule`](crate::error::PolicyError::UnsupportedRule)
    /// when the vendor has no equivalent for `rule`, or an invalid value error
    /// when the stored value cannot be interpreted.
    fn rule_value(&self, rule: PasswordRule) -> PolicyResult<String>;

    /// Every vendor key this policy understands.
    fn keys(&self) -> Vec<&'static str>;

    /// Identifier of the directory object backing this policy, if any.
    fn source(&self) -> Option<&str> {
        None
    }

    /// Rules this policy can answer, in [`PasswordRule::all`] order.
    fn supported_rules(&self) -> Vec<PasswordRule> {
        PasswordRule::all()
            .iter()
            .copied()
            .filter(|rule| !matches!(self.rule_value(*rule), Err(e) if e.is_unsupported()))
            .collect()
    }
}
