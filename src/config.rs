//! Default values and tuning constants for [`ScaleSpec`](crate::ScaleSpec).
//!
//! Each scale owns its own [`ScaleDefaults`], so two axes can be tuned
//! independently. The defaults serialize to JSON for report generators that
//! keep their chart styling in configuration files.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaleError};

/// Initial values and auto-ranging thresholds for a scale.
///
/// Missing fields fall back to [`ScaleDefaults::default`] when deserializing,
/// so a document only needs to name what it overrides.
///
/// # Examples
///
/// ```
/// use niceaxis::ScaleDefaults;
///
/// let defaults = ScaleDefaults::from_json(r#"{ "target_steps": 5 }"#).unwrap();
/// assert_eq!(defaults.target_steps, 5);
/// assert_eq!(defaults.zero_lever, 0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleDefaults {
    /// Initial minimum before the first auto-range.
    pub min: f64,
    /// Initial maximum before the first auto-range.
    pub max: f64,
    /// Initial major step.
    pub major_step: f64,
    /// Initial minor step.
    pub minor_step: f64,
    /// Initial label precision.
    pub decimal_places: u32,
    /// Initial label magnitude exponent.
    pub magnitude_exponent: i32,
    /// Whether new scales start logarithmic.
    pub logarithmic: bool,
    /// Whether new scales start reversed.
    pub reversed: bool,

    /// An auto minimum snaps to zero when `min / (max - min)` falls below this.
    pub zero_lever: f64,
    /// Desired number of major intervals across the range.
    pub target_steps: u32,
    /// Desired number of minor intervals per major step.
    pub target_minor_steps: u32,
    /// Ranges narrower than this are degenerate; also the floor for `log10`.
    pub range_epsilon: f64,
    /// Absolute values below this count as zero when picking the magnitude.
    pub magnitude_epsilon: f64,
    /// Magnitudes within `±plain_magnitude_limit` are shown without a multiplier.
    pub plain_magnitude_limit: i32,
}

impl Default for ScaleDefaults {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            major_step: 0.1,
            minor_step: 0.1,
            decimal_places: 0,
            magnitude_exponent: 0,
            logarithmic: false,
            reversed: false,
            zero_lever: 0.25,
            target_steps: 7,
            target_minor_steps: 5,
            range_epsilon: 1e-20,
            magnitude_epsilon: 1e-10,
            plain_magnitude_limit: 3,
        }
    }
}

impl ScaleDefaults {
    /// Parse defaults from a JSON document and validate them.
    pub fn from_json(input: &str) -> Result<Self> {
        let defaults: Self = serde_json::from_str(input)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the defaults describe a usable scale.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("min", self.min),
            ("max", self.max),
            ("major_step", self.major_step),
            ("minor_step", self.minor_step),
            ("zero_lever", self.zero_lever),
            ("range_epsilon", self.range_epsilon),
            ("magnitude_epsilon", self.magnitude_epsilon),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScaleError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min >= self.max {
            return Err(ScaleError::InvalidConfig(format!(
                "min ({}) must be below max ({})",
                self.min, self.max
            )));
        }
        if self.logarithmic && self.min <= 0.0 {
            return Err(ScaleError::InvalidConfig(
                "logarithmic defaults need a positive min".to_string(),
            ));
        }
        if self.major_step <= 0.0 || self.minor_step <= 0.0 {
            return Err(ScaleError::InvalidConfig(
                "steps must be positive".to_string(),
            ));
        }
        if self.target_steps == 0 || self.target_minor_steps == 0 {
            return Err(ScaleError::InvalidConfig(
                "step targets must be at least 1".to_string(),
            ));
        }
        if self.zero_lever < 0.0 || self.range_epsilon < 0.0 || self.magnitude_epsilon < 0.0 {
            return Err(ScaleError::InvalidConfig(
                "thresholds must not be negative".to_string(),
            ));
        }
        if self.plain_magnitude_limit < 0 {
            return Err(ScaleError::InvalidConfig(
                "plain_magnitude_limit must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let defaults = ScaleDefaults::default();
        assert!(defaults.validate().is_ok());
        assert_eq!(defaults.min, 0.0);
        assert_eq!(defaults.max, 1.0);
        assert_eq!(defaults.major_step, 0.1);
        assert_eq!(defaults.target_steps, 7);
        assert_eq!(defaults.target_minor_steps, 5);
    }

    #[test]
    fn test_json_roundtrip_keeps_overrides() {
        let defaults = ScaleDefaults {
            zero_lever: 0.1,
            reversed: true,
            ..ScaleDefaults::default()
        };
        let json = defaults.to_json().unwrap();
        let parsed = ScaleDefaults::from_json(&json).unwrap();
        assert_eq!(parsed, defaults);
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let parsed = ScaleDefaults::from_json(r#"{ "logarithmic": true, "min": 1, "max": 100 }"#)
            .unwrap();
        assert!(parsed.logarithmic);
        assert_eq!(parsed.max, 100.0);
        assert_eq!(parsed.target_steps, 7);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = ScaleDefaults::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScaleError::Json(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let inverted = ScaleDefaults {
            min: 5.0,
            max: 1.0,
            ..ScaleDefaults::default()
        };
        assert!(matches!(inverted.validate(), Err(ScaleError::InvalidConfig(_))));

        let zero_target = ScaleDefaults {
            target_steps: 0,
            ..ScaleDefaults::default()
        };
        assert!(zero_target.validate().is_err());

        let log_from_zero = ScaleDefaults {
            logarithmic: true,
            ..ScaleDefaults::default()
        };
        assert!(log_from_zero.validate().is_err());

        let nan_step = ScaleDefaults {
            major_step: f64::NAN,
            ..ScaleDefaults::default()
        };
        assert!(nan_step.validate().is_err());
    }
}
