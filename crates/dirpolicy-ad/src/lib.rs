//! # Active Directory Password Settings
//!
//! Typed access to AD fine-grained password policy objects
//! (`msDS-PasswordSettings`, "PSOs").
//!
//! The core of the crate is [`PasswordSettingsAttribute`], a closed table of
//! every attribute a PSO carries: its LDAP name, the kind of value it holds,
//! the default to assume when the directory returns nothing, and the generic
//! [`PasswordRule`](dirpolicy_core::rule::PasswordRule) it corresponds to.
//!
//! Around it:
//!
//! - [`entry`] - interpreting the attributes read for one PSO
//! - [`modify`] - building typed modify requests
//! - [`interval`] - AD's negative 100ns interval encoding
//! - [`search`] - filters and attribute lists for locating PSOs
//! - [`config`] - how leniently raw values are interpreted
//!
//! No I/O is performed; callers bring their own LDAP client.
//!
//! ## Example
//!
//! ```
//! use dirpolicy_ad::PasswordSettingsAttribute;
//! use dirpolicy_core::rule::PasswordRule;
//!
//! let attr = PasswordSettingsAttribute::attribute_for_rule(Some(PasswordRule::MinimumLength));
//! assert_eq!(
//!     attr.map(|a| a.ldap_attribute()),
//!     Some("msDS-MinimumPasswordLength")
//! );
//! ```

pub mod config;
pub mod constants;
pub mod entry;
pub mod interval;
pub mod modify;
pub mod password_settings;
pub mod search;

// Re-exports
pub use config::PasswordSettingsConfig;
pub use entry::{effective_policy, PasswordSettingsEntry, PolicyValue};
pub use interval::{AdInterval, IntervalError};
pub use modify::PasswordSettingsUpdate;
pub use password_settings::{ParsePasswordSettingsAttributeError, PasswordSettingsAttribute};
pub use search::{password_settings_attributes, password_settings_filter, resultant_pso_attributes};
