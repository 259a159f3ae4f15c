//! Shared serialization/deserialization utilities for configuration
//!
//! This module provides common serde helpers used across configuration types.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// Helper module for Duration serialization as milliseconds
///
/// Startup delays are short enough that whole seconds are too coarse, so
/// they are written to TOML as a u64 millisecond count.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Config {
///     #[serde(with = "ov_core::config::serde_utils::duration_millis")]
///     settle_delay: Duration,
/// }
/// ```
pub mod duration_millis {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize a Duration as milliseconds (u64)
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    /// Deserialize a Duration from milliseconds (u64)
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Any value a hand-edited config file might hold for an integer setting
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Interpret a placement value, falling back to `default` when it is
/// missing, zero, negative or not a whole number
///
/// Bad values are logged and replaced rather than rejected, so a broken
/// setting never keeps the renderer from starting.
pub fn dimension_or(name: &str, raw: Option<LooseInt>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };

    let parsed = match &raw {
        LooseInt::Int(i) => Some(*i),
        LooseInt::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
        LooseInt::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed.map(u32::try_from) {
        Some(Ok(0)) => default,
        Some(Ok(value)) => value,
        _ => {
            tracing::warn!("Bad config value for {}: {:?}, using {}", name, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        #[serde(with = "duration_millis")]
        delay: Duration,
    }

    #[test]
    fn test_duration_millis_serialize() {
        let config = TestConfig {
            delay: Duration::from_millis(10),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"delay":10}"#);
    }

    #[test]
    fn test_duration_millis_deserialize() {
        let json = r#"{"delay":2500}"#;
        let config: TestConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.delay, Duration::from_millis(2500));
    }

    fn loose(json: &str) -> Option<LooseInt> {
        Some(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_dimension_accepts_integers_and_numeric_strings() {
        assert_eq!(dimension_or("width", loose("2560"), 1920), 2560);
        assert_eq!(dimension_or("width", loose(r#"" 1280 ""#), 1920), 1280);
        assert_eq!(dimension_or("width", loose("800.0"), 1920), 800);
    }

    #[test]
    fn test_dimension_falls_back_on_bad_values() {
        assert_eq!(dimension_or("width", None, 1920), 1920);
        assert_eq!(dimension_or("width", loose("0"), 1920), 1920);
        assert_eq!(dimension_or("width", loose("-5"), 1920), 1920);
        assert_eq!(dimension_or("width", loose("12.5"), 1920), 1920);
        assert_eq!(dimension_or("width", loose(r#""wide""#), 1920), 1920);
        assert_eq!(dimension_or("width", loose("[1, 2]"), 1920), 1920);
        assert_eq!(dimension_or("width", loose("99999999999"), 1920), 1920);
    }
}
