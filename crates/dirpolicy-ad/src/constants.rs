//! Active Directory password settings wire names.

/// Object class of a fine-grained password policy object.
pub const OBJECT_CLASS_PASSWORD_SETTINGS: &str = "msDS-PasswordSettings";

/// Relative DN of the container holding password settings objects.
pub const PASSWORD_SETTINGS_CONTAINER_RDN: &str = "CN=Password Settings Container,CN=System";

/// Constructed user attribute naming the PSO that applies to the user.
pub const ATTR_RESULTANT_PSO: &str = "msDS-ResultantPSO";

/// Precedence among PSOs applying to the same user; lower wins.
pub const ATTR_PASSWORD_SETTINGS_PRECEDENCE: &str = "msDS-PasswordSettingsPrecedence";
/// Whether passwords are stored with reversible encryption.
pub const ATTR_PASSWORD_REVERSIBLE_ENCRYPTION: &str = "msDS-PasswordReversibleEncryptionEnabled";
/// Number of previous passwords remembered.
pub const ATTR_PASSWORD_HISTORY_LENGTH: &str = "msDS-PasswordHistoryLength";
/// Whether AD complexity requirements apply.
pub const ATTR_PASSWORD_COMPLEXITY_ENABLED: &str = "msDS-PasswordComplexityEnabled";
/// Minimum password length in characters.
pub const ATTR_MIN_PASSWORD_LENGTH: &str = "msDS-MinimumPasswordLength";
/// Interval before a password may be changed again.
pub const ATTR_MIN_PASSWORD_AGE: &str = "msDS-MinimumPasswordAge";
/// Interval before a password expires.
pub const ATTR_MAX_PASSWORD_AGE: &str = "msDS-MaximumPasswordAge";
/// Failed logons before the account is locked out.
pub const ATTR_LOCKOUT_THRESHOLD: &str = "msDS-LockoutThreshold";
/// Interval over which failed logons are counted.
pub const ATTR_LOCKOUT_OBSERVATION_WINDOW: &str = "msDS-LockoutObservationWindow";
/// How long a locked out account stays locked.
pub const ATTR_LOCKOUT_DURATION: &str = "msDS-LockoutDuration";
/// DNs of the users and groups the PSO is linked to.
pub const ATTR_PSO_APPLIES_TO: &str = "msDS-PSOAppliesTo";

/// AD's textual boolean tokens.
pub const AD_TRUE: &str = "TRUE";
/// See [`AD_TRUE`].
pub const AD_FALSE: &str = "FALSE";

/// Vendor name reported for rules this directory cannot express.
pub const VENDOR: &str = "Active Directory";
