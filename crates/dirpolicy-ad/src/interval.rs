//! AD time interval encoding.
//!
//! PSO durations (`msDS-MaximumPasswordAge`, `msDS-LockoutDuration`, ...) are
//! stored as negative counts of 100-nanosecond ticks. The most negative
//! 64-bit value is AD's "never".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

use dirpolicy_core::rule::PasswordRule;

const TICKS_PER_SECOND: u64 = 10_000_000;
const NANOS_PER_TICK: u32 = 100;

/// Error decoding an AD interval value.
#[derive(Debug, Error)]
pub enum IntervalError {
    /// The value is not a 64-bit integer.
    #[error("interval '{value}' is not a 64-bit integer")]
    NotAnInteger {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// A decoded AD interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdInterval {
    /// The interval never elapses.
    Never,
    /// A finite span of time.
    Span(Duration),
}

impl AdInterval {
    /// The zero-length interval (AD's default for every PSO duration).
    pub const ZERO: AdInterval = AdInterval::Span(Duration::ZERO);

    /// Decode an interval from its directory text.
    ///
    /// Positive values are taken as magnitudes, since some tools write
    /// intervals unsigned.
    pub fn parse(raw: &str) -> Result<Self, IntervalError> {
        let ticks: i64 = raw
            .trim()
            .parse()
            .map_err(|source| IntervalError::NotAnInteger {
                value: raw.to_string(),
                source,
            })?;
        Ok(Self::from_ticks(ticks))
    }

    /// Decode an interval from a raw tick count.
    #[must_use]
    pub fn from_ticks(ticks: i64) -> Self {
        if ticks == i64::MIN {
            return AdInterval::Never;
        }
        let magnitude = ticks.unsigned_abs();
        // magnitude % TICKS_PER_SECOND < 10^7, so the product fits in a u32
        let nanos = (magnitude % TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;
        AdInterval::Span(Duration::new(magnitude / TICKS_PER_SECOND, nanos))
    }

    /// Build an interval from a whole number of seconds.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        AdInterval::Span(Duration::from_secs(secs))
    }

    /// Encode as the negative tick count AD expects.
    ///
    /// Spans too long to represent saturate to the longest finite interval.
    #[must_use]
    pub fn to_ticks(&self) -> i64 {
        match self {
            AdInterval::Never => i64::MIN,
            AdInterval::Span(d) => {
                let ticks = u128::from(d.as_secs()) * u128::from(TICKS_PER_SECOND)
                    + u128::from(d.subsec_nanos() / NANOS_PER_TICK);
                -(i64::try_from(ticks).unwrap_or(i64::MAX))
            }
        }
    }

    /// Encode as directory text.
    #[must_use]
    pub fn to_ad_value(&self) -> String {
        self.to_ticks().to_string()
    }

    /// Whole seconds in the interval, `None` for [`AdInterval::Never`].
    #[must_use]
    pub fn as_secs(&self) -> Option<u64> {
        match self {
            AdInterval::Never => None,
            AdInterval::Span(d) => Some(d.as_secs()),
        }
    }

    /// Express the interval as generic seconds for `rule`.
    ///
    /// [`AdInterval::Never`] becomes the rule's "never" value.
    #[must_use]
    pub fn to_rule_secs(&self, rule: PasswordRule) -> u64 {
        self.as_secs()
            .unwrap_or_else(|| rule.never_secs().unwrap_or(u64::MAX))
    }

    /// Interpret generic seconds for `rule`.
    ///
    /// The rule's "never" value becomes [`AdInterval::Never`]. For
    /// `expiration_interval` this means a zero span is written as "never".
    #[must_use]
    pub fn from_rule_secs(rule: PasswordRule, secs: u64) -> Self {
        if rule.never_secs() == Some(secs) {
            AdInterval::Never
        } else {
            Self::from_secs(secs)
        }
    }

    /// Check if the interval is zero length.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, AdInterval::Span(d) if d.is_zero())
    }
}

impl Default for AdInterval {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Duration> for AdInterval {
    fn from(d: Duration) -> Self {
        AdInterval::Span(d)
    }
}

impl fmt::Display for AdInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdInterval::Never => write!(f, "never"),
            AdInterval::Span(d) => write!(f, "{}s", d.as_secs()),
        }
    }
}
