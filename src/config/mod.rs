use crate::error::EngineError;
use crate::models::Exercise;
use serde::{Deserialize, Serialize};

/// Tuning parameters for the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_squat_thresholds")]
    pub squat: PhaseThresholds,

    #[serde(default = "default_pushup_thresholds")]
    pub pushup: PhaseThresholds,

    #[serde(default = "default_lunge_thresholds")]
    pub lunge: PhaseThresholds,

    #[serde(default)]
    pub feedback: FeedbackThresholds,

    /// Averaged knee angle below which a squat counts as descending
    #[serde(default = "default_phase_down_knee")]
    pub phase_down_knee: f64,

    /// Landmarks reported below this visibility make the frame low-confidence
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f64,

    #[serde(default)]
    pub low_confidence: LowConfidencePolicy,
}

/// Phase transition thresholds for one exercise, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseThresholds {
    /// Enter "down" when the characteristic angle drops below this
    pub down_below: f64,
    /// Return to "up" (and count a rep) when the angle rises above this
    pub up_above: f64,
}

/// Form-check thresholds, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    #[serde(default = "default_back_min")]
    pub back_min: f64,

    #[serde(default = "default_squat_depth_max")]
    pub squat_depth_max: f64,

    #[serde(default = "default_pushup_top")]
    pub pushup_top: f64,

    #[serde(default = "default_body_line_min")]
    pub body_line_min: f64,
}

/// What to do with frames whose landmarks fall below `min_visibility`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowConfidencePolicy {
    /// Ignore visibility and analyze the landmarks as reported
    #[default]
    UseAnyway,
    /// Handle the frame as if no body was detected
    TreatAsAbsent,
    /// Leave the phase state untouched for this frame
    Hold,
}

// Default value functions
fn default_squat_thresholds() -> PhaseThresholds {
    PhaseThresholds {
        down_below: 70.0,
        up_above: 160.0,
    }
}

fn default_pushup_thresholds() -> PhaseThresholds {
    PhaseThresholds {
        down_below: 70.0,
        up_above: 160.0,
    }
}

fn default_lunge_thresholds() -> PhaseThresholds {
    PhaseThresholds {
        down_below: 80.0,
        up_above: 160.0,
    }
}

fn default_phase_down_knee() -> f64 {
    120.0
}

fn default_min_visibility() -> f64 {
    0.5
}

fn default_back_min() -> f64 {
    150.0
}

fn default_squat_depth_max() -> f64 {
    90.0
}

fn default_pushup_top() -> f64 {
    160.0
}

fn default_body_line_min() -> f64 {
    155.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            squat: default_squat_thresholds(),
            pushup: default_pushup_thresholds(),
            lunge: default_lunge_thresholds(),
            feedback: FeedbackThresholds::default(),
            phase_down_knee: default_phase_down_knee(),
            min_visibility: default_min_visibility(),
            low_confidence: LowConfidencePolicy::default(),
        }
    }
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            back_min: default_back_min(),
            squat_depth_max: default_squat_depth_max(),
            pushup_top: default_pushup_top(),
            body_line_min: default_body_line_min(),
        }
    }
}

impl EngineConfig {
    /// Phase thresholds for an exercise
    pub fn thresholds(&self, exercise: Exercise) -> PhaseThresholds {
        match exercise {
            Exercise::Squat => self.squat,
            Exercise::PushUp => self.pushup,
            Exercise::Lunge => self.lunge,
        }
    }

    /// Check that every angle lies in [0, 180] and that each exercise's
    /// down threshold sits below its up threshold
    pub fn validate(&self) -> Result<(), EngineError> {
        for exercise in Exercise::ALL {
            let t = self.thresholds(exercise);
            check_degrees(&format!("{} down_below", exercise), t.down_below)?;
            check_degrees(&format!("{} up_above", exercise), t.up_above)?;
            if t.down_below >= t.up_above {
                return Err(EngineError::InvalidConfig(format!(
                    "{}: down_below ({}) must be less than up_above ({})",
                    exercise, t.down_below, t.up_above
                )));
            }
        }

        check_degrees("phase_down_knee", self.phase_down_knee)?;
        check_degrees("feedback.back_min", self.feedback.back_min)?;
        check_degrees("feedback.squat_depth_max", self.feedback.squat_depth_max)?;
        check_degrees("feedback.pushup_top", self.feedback.pushup_top)?;
        check_degrees("feedback.body_line_min", self.feedback.body_line_min)?;

        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(EngineError::InvalidConfig(format!(
                "min_visibility ({}) must be within [0, 1]",
                self.min_visibility
            )));
        }

        Ok(())
    }
}

fn check_degrees(name: &str, value: f64) -> Result<(), EngineError> {
    if (0.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{} ({}) must be within [0, 180] degrees",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.squat.down_below, 70.0);
        assert_eq!(config.lunge.down_below, 80.0);
        assert_eq!(config.pushup.up_above, 160.0);
        assert_eq!(config.feedback.body_line_min, 155.0);
        assert_eq!(config.low_confidence, LowConfidencePolicy::UseAnyway);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            low_confidence = "hold"

            [lunge]
            down_below = 85.0
            up_above = 150.0

            [feedback]
            back_min = 140.0
            "#,
        )
        .unwrap();

        assert_eq!(config.lunge.down_below, 85.0);
        assert_eq!(config.squat.down_below, 70.0);
        assert_eq!(config.feedback.back_min, 140.0);
        assert_eq!(config.feedback.pushup_top, 160.0);
        assert_eq!(config.low_confidence, LowConfidencePolicy::Hold);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = EngineConfig::default();
        config.squat = PhaseThresholds {
            down_below: 160.0,
            up_above: 70.0,
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config.feedback.back_min = 200.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.min_visibility = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: EngineConfig = toml::from_str(&serialized).unwrap();
        assert!(deserialized.validate().is_ok());
        assert_eq!(config, deserialized);
    }
}
