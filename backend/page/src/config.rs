use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CHAR_DELAY_MS: u64 = 8;

/// Tuning of the diagram typing effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Fraction of a region that must be inside the viewport before it fires.
    #[serde(deserialize_with = "fraction")]
    pub threshold: f64,

    /// Delay between two revealed characters, in milliseconds.
    pub char_delay_ms: u64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            char_delay_ms: DEFAULT_CHAR_DELAY_MS,
        }
    }
}

impl AnimatorConfig {
    /// Clamped to `0.0..=1.0`. A non-finite value keeps the default.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };
        self
    }

    #[must_use]
    pub fn with_char_delay_ms(mut self, char_delay_ms: u64) -> Self {
        self.char_delay_ms = char_delay_ms;
        self
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }
}

fn fraction<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(deserializer)?;

    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("threshold must be between 0 and 1, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AnimatorConfig = serde_json::from_str(r#"{"char_delay_ms": 20}"#).unwrap();

        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.char_delay(), Duration::from_millis(20));
    }

    #[test]
    fn threshold_is_clamped_to_a_fraction() {
        assert_eq!(AnimatorConfig::default().with_threshold(1.5).threshold, 1.0);
        assert_eq!(AnimatorConfig::default().with_threshold(-0.2).threshold, 0.0);
    }

    #[test]
    fn non_finite_threshold_keeps_the_default() {
        for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = AnimatorConfig::default()
                .with_threshold(0.5)
                .with_threshold(threshold);

            assert_eq!(config.threshold, DEFAULT_THRESHOLD, "{threshold}");
        }
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        for raw in [r#"{"threshold": 1.5}"#, r#"{"threshold": -0.1}"#] {
            let error = serde_json::from_str::<AnimatorConfig>(raw).unwrap_err();
            assert!(error.to_string().contains("between 0 and 1"), "{raw}");
        }

        let config: AnimatorConfig = serde_json::from_str(r#"{"threshold": 1.0}"#).unwrap();
        assert_eq!(config.threshold, 1.0);
    }
}
