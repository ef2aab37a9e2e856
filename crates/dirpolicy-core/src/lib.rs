//! # Password Policy Core
//!
//! Directory-agnostic password policy abstractions.
//!
//! Directory specific crates (such as `dirpolicy-ad`) describe their own
//! policy attributes and map them onto the shared vocabulary defined here,
//! so that callers can reason about "minimum length" or "expiration interval"
//! without knowing which directory vendor stores them.
//!
//! ## Crate Organization
//!
//! - [`rule`] - Generic password rules (`PasswordRule`)
//! - [`types`] - Value type classification (`ValueType`)
//! - [`policy`] - The `PasswordPolicy` trait
//! - [`operation`] - Raw attribute maps and modify deltas
//! - [`error`] - Error types

pub mod error;
pub mod operation;
pub mod policy;
pub mod rule;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use dirpolicy_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{PolicyError, PolicyResult};
    pub use crate::operation::{AttributeDelta, AttributeSet, AttributeValue};
    pub use crate::policy::PasswordPolicy;
    pub use crate::rule::PasswordRule;
    pub use crate::types::ValueType;
}
