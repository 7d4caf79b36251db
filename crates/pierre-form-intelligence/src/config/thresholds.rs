// ABOUTME: Per-exercise threshold configuration for form analyzers
// ABOUTME: Angle bands, ratio limits and hold timings with defaults and band validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise Threshold Configuration
//!
//! Every struct is `#[serde(default)]` so a partial JSON document overrides
//! only the values it names.

use pierre_pose_core::constants::{curl, jumping_jack, lunge, plank, pushup, squat};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Thresholds for every exercise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseThresholds {
    /// Bicep curl thresholds
    pub curl: CurlThresholds,
    /// Squat thresholds
    pub squat: SquatThresholds,
    /// Pushup thresholds
    pub pushup: PushupThresholds,
    /// Lunge thresholds
    pub lunge: LungeThresholds,
    /// Plank thresholds
    pub plank: PlankThresholds,
    /// Jumping jack thresholds
    pub jumping_jack: JumpingJackThresholds,
}

impl ExerciseThresholds {
    /// Validate every exercise's thresholds
    ///
    /// # Errors
    ///
    /// Returns the first inverted band or out-of-range value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.curl.validate()?;
        self.squat.validate()?;
        self.pushup.validate()?;
        self.lunge.validate()?;
        self.plank.validate()?;
        self.jumping_jack.validate()
    }
}

/// Bicep curl thresholds (degrees unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlThresholds {
    /// Elbow angle below which a rep starts
    pub start_angle: f64,
    /// Elbow angle below which the rep is committed
    pub commit_angle: f64,
    /// Elbow angle at which the arm counts as lowered again
    pub release_angle: f64,
    /// Peak elbow angle must reach this for a full curl
    pub not_high_enough_angle: f64,
    /// Elbow drift from its rep-start position, in percent of frame
    pub elbow_drift_percent: f64,
    /// Torso sway from the rep-start baseline
    pub body_swing_degrees: f64,
    /// Torso sway treated as excessive
    pub body_swing_severe_degrees: f64,
    /// Smoothed upper-arm-to-torso angle limit
    pub upper_arm_drift_degrees: f64,
    /// Extra bend the idle arm needs before it takes over
    pub arm_switch_hysteresis_degrees: f64,
}

impl Default for CurlThresholds {
    fn default() -> Self {
        Self {
            start_angle: curl::START_ANGLE,
            commit_angle: curl::COMMIT_ANGLE,
            release_angle: curl::RELEASE_ANGLE,
            not_high_enough_angle: curl::NOT_HIGH_ENOUGH_ANGLE,
            elbow_drift_percent: curl::ELBOW_DRIFT_PERCENT,
            body_swing_degrees: curl::BODY_SWING_DEGREES,
            body_swing_severe_degrees: curl::BODY_SWING_SEVERE_DEGREES,
            upper_arm_drift_degrees: curl::UPPER_ARM_DRIFT_DEGREES,
            arm_switch_hysteresis_degrees: curl::ARM_SWITCH_HYSTERESIS_DEGREES,
        }
    }
}

impl CurlThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_angles(
            &[
                self.start_angle,
                self.commit_angle,
                self.release_angle,
                self.not_high_enough_angle,
                self.body_swing_degrees,
                self.body_swing_severe_degrees,
                self.upper_arm_drift_degrees,
                self.arm_switch_hysteresis_degrees,
            ],
            "curl angles must be finite and within 0-180 degrees",
        )?;
        ensure_positive(self.elbow_drift_percent, "curl elbow_drift_percent must be > 0")?;
        if self.commit_angle >= self.start_angle {
            return Err(ConfigError::InvalidRange(
                "curl commit_angle must be < start_angle",
            ));
        }
        if self.commit_angle >= self.release_angle {
            return Err(ConfigError::InvalidRange(
                "curl commit_angle must be < release_angle",
            ));
        }
        if self.body_swing_degrees > self.body_swing_severe_degrees {
            return Err(ConfigError::InvalidRange(
                "curl body_swing_degrees must be <= body_swing_severe_degrees",
            ));
        }
        Ok(())
    }
}

/// Squat thresholds (degrees unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatThresholds {
    /// Knee angle below which a rep starts
    pub start_angle: f64,
    /// Knee angle below which the rep is committed
    pub commit_angle: f64,
    /// Bottom knee angle below which the squat is too deep
    pub too_deep_angle: f64,
    /// Bottom knee angle above which the squat is too shallow
    pub not_deep_enough_angle: f64,
    /// Minimum forward torso lean
    pub min_back_lean_degrees: f64,
    /// Maximum forward torso lean
    pub max_back_lean_degrees: f64,
    /// Knee offset from the ankle-hip line, as a fraction of leg length
    pub knee_tracking_ratio: f64,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            start_angle: squat::START_ANGLE,
            commit_angle: squat::COMMIT_ANGLE,
            too_deep_angle: squat::TOO_DEEP_ANGLE,
            not_deep_enough_angle: squat::NOT_DEEP_ENOUGH_ANGLE,
            min_back_lean_degrees: squat::MIN_BACK_LEAN_DEGREES,
            max_back_lean_degrees: squat::MAX_BACK_LEAN_DEGREES,
            knee_tracking_ratio: squat::KNEE_TRACKING_RATIO,
        }
    }
}

impl SquatThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_angles(
            &[
                self.start_angle,
                self.commit_angle,
                self.too_deep_angle,
                self.not_deep_enough_angle,
                self.min_back_lean_degrees,
                self.max_back_lean_degrees,
            ],
            "squat angles must be finite and within 0-180 degrees",
        )?;
        ensure_positive(self.knee_tracking_ratio, "squat knee_tracking_ratio must be > 0")?;
        if self.commit_angle >= self.start_angle {
            return Err(ConfigError::InvalidRange(
                "squat commit_angle must be < start_angle",
            ));
        }
        if self.too_deep_angle >= self.not_deep_enough_angle {
            return Err(ConfigError::InvalidRange(
                "squat too_deep_angle must be < not_deep_enough_angle",
            ));
        }
        if self.min_back_lean_degrees >= self.max_back_lean_degrees {
            return Err(ConfigError::InvalidRange(
                "squat min_back_lean_degrees must be < max_back_lean_degrees",
            ));
        }
        Ok(())
    }
}

/// Pushup thresholds (degrees unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupThresholds {
    /// Elbow angle below which a rep starts
    pub start_angle: f64,
    /// Elbow angle below which the rep is committed
    pub commit_angle: f64,
    /// Bottom elbow angle above which the pushup is too shallow
    pub not_low_enough_angle: f64,
    /// Hip offset from the ankle-shoulder line, in percent of body length
    pub hip_offset_percent: f64,
    /// Allowed deviation from the ideal 45 degree elbow angle
    pub elbow_flare_degrees: f64,
    /// Neck deviation from the spine line
    pub neck_alignment_degrees: f64,
    /// Minimum body-line straightness score in [0, 1]
    pub min_straightness: f64,
}

impl Default for PushupThresholds {
    fn default() -> Self {
        Self {
            start_angle: pushup::START_ANGLE,
            commit_angle: pushup::COMMIT_ANGLE,
            not_low_enough_angle: pushup::NOT_LOW_ENOUGH_ANGLE,
            hip_offset_percent: pushup::HIP_OFFSET_PERCENT,
            elbow_flare_degrees: pushup::ELBOW_FLARE_DEGREES,
            neck_alignment_degrees: pushup::NECK_ALIGNMENT_DEGREES,
            min_straightness: pushup::MIN_STRAIGHTNESS,
        }
    }
}

impl PushupThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_angles(
            &[
                self.start_angle,
                self.commit_angle,
                self.not_low_enough_angle,
                self.elbow_flare_degrees,
                self.neck_alignment_degrees,
            ],
            "pushup angles must be finite and within 0-180 degrees",
        )?;
        ensure_positive(self.hip_offset_percent, "pushup hip_offset_percent must be > 0")?;
        ensure_unit(self.min_straightness, "pushup min_straightness must be within 0-1")?;
        if self.commit_angle >= self.start_angle {
            return Err(ConfigError::InvalidRange(
                "pushup commit_angle must be < start_angle",
            ));
        }
        Ok(())
    }
}

/// Lunge thresholds (degrees unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LungeThresholds {
    /// Front knee angle below which a rep starts
    pub start_angle: f64,
    /// Front knee angle below which the rep is committed
    pub front_commit_angle: f64,
    /// Back knee angle below which the rep is committed
    pub back_commit_angle: f64,
    /// Bottom front knee angle above which the lunge is too shallow
    pub front_knee_max_angle: f64,
    /// Bottom front knee angle below which the knee is over-bent
    pub front_knee_min_angle: f64,
    /// Bottom back knee angle above which the back knee is too high
    pub back_knee_max_angle: f64,
    /// Bottom back knee angle below which the knee nears the floor
    pub back_knee_min_angle: f64,
    /// Torso lean limit in either direction
    pub torso_lean_degrees: f64,
    /// Front knee offset from the ankle-hip line, as a fraction of leg length
    pub knee_tracking_ratio: f64,
    /// Minimum stance-width stability score in [0, 1]
    pub min_stance_stability: f64,
}

impl Default for LungeThresholds {
    fn default() -> Self {
        Self {
            start_angle: lunge::START_ANGLE,
            front_commit_angle: lunge::FRONT_COMMIT_ANGLE,
            back_commit_angle: lunge::BACK_COMMIT_ANGLE,
            front_knee_max_angle: lunge::FRONT_KNEE_MAX_ANGLE,
            front_knee_min_angle: lunge::FRONT_KNEE_MIN_ANGLE,
            back_knee_max_angle: lunge::BACK_KNEE_MAX_ANGLE,
            back_knee_min_angle: lunge::BACK_KNEE_MIN_ANGLE,
            torso_lean_degrees: lunge::TORSO_LEAN_DEGREES,
            knee_tracking_ratio: lunge::KNEE_TRACKING_RATIO,
            min_stance_stability: lunge::MIN_STANCE_STABILITY,
        }
    }
}

impl LungeThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_angles(
            &[
                self.start_angle,
                self.front_commit_angle,
                self.back_commit_angle,
                self.front_knee_max_angle,
                self.front_knee_min_angle,
                self.back_knee_max_angle,
                self.back_knee_min_angle,
                self.torso_lean_degrees,
            ],
            "lunge angles must be finite and within 0-180 degrees",
        )?;
        ensure_positive(self.knee_tracking_ratio, "lunge knee_tracking_ratio must be > 0")?;
        ensure_unit(
            self.min_stance_stability,
            "lunge min_stance_stability must be within 0-1",
        )?;
        if self.front_commit_angle >= self.start_angle {
            return Err(ConfigError::InvalidRange(
                "lunge front_commit_angle must be < start_angle",
            ));
        }
        if self.front_knee_min_angle >= self.front_knee_max_angle {
            return Err(ConfigError::InvalidRange(
                "lunge front_knee_min_angle must be < front_knee_max_angle",
            ));
        }
        if self.back_knee_min_angle >= self.back_knee_max_angle {
            return Err(ConfigError::InvalidRange(
                "lunge back_knee_min_angle must be < back_knee_max_angle",
            ));
        }
        Ok(())
    }
}

/// Plank thresholds
///
/// Alignment scores are in [0, 1]; hip offsets are fractions of the
/// ankle-shoulder length. Entry and exit values form a hysteresis band:
/// `end < break < start <= hold` for alignment and the mirror image for hips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlankThresholds {
    /// Alignment needed to begin a hold
    pub start_alignment: f64,
    /// Alignment needed to count as holding
    pub hold_alignment: f64,
    /// Alignment below which a hold starts breaking
    pub break_alignment: f64,
    /// Alignment below which a breaking hold ends
    pub end_alignment: f64,
    /// Hip offset limit to begin a hold
    pub start_hip_offset: f64,
    /// Hip offset limit to count as holding
    pub hold_hip_offset: f64,
    /// Hip offset above which a hold starts breaking
    pub break_hip_offset: f64,
    /// Hip offset above which a breaking hold ends
    pub end_hip_offset: f64,
    /// Hold length in seconds needed for a completed plank
    pub min_hold_seconds: f64,
    /// Smoothed hip offset that triggers sag or pike feedback
    pub hip_feedback_offset: f64,
    /// Head deviation from the spine line, degrees
    pub head_alignment_degrees: f64,
    /// Minimum elbow-under-shoulder score
    pub min_elbow_alignment: f64,
}

impl Default for PlankThresholds {
    fn default() -> Self {
        Self {
            start_alignment: plank::START_ALIGNMENT,
            hold_alignment: plank::HOLD_ALIGNMENT,
            break_alignment: plank::BREAK_ALIGNMENT,
            end_alignment: plank::END_ALIGNMENT,
            start_hip_offset: plank::START_HIP_OFFSET,
            hold_hip_offset: plank::HOLD_HIP_OFFSET,
            break_hip_offset: plank::BREAK_HIP_OFFSET,
            end_hip_offset: plank::END_HIP_OFFSET,
            min_hold_seconds: plank::MIN_HOLD_SECONDS,
            hip_feedback_offset: plank::HIP_FEEDBACK_OFFSET,
            head_alignment_degrees: plank::HEAD_ALIGNMENT_DEGREES,
            min_elbow_alignment: plank::MIN_ELBOW_ALIGNMENT,
        }
    }
}

impl PlankThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        for score in [
            self.start_alignment,
            self.hold_alignment,
            self.break_alignment,
            self.end_alignment,
            self.min_elbow_alignment,
        ] {
            ensure_unit(score, "plank alignment scores must be within 0-1")?;
        }
        for offset in [
            self.start_hip_offset,
            self.hold_hip_offset,
            self.break_hip_offset,
            self.end_hip_offset,
            self.hip_feedback_offset,
        ] {
            ensure_positive(offset, "plank hip offsets must be > 0")?;
        }
        ensure_positive(self.min_hold_seconds, "plank min_hold_seconds must be > 0")?;
        ensure_angles(
            &[self.head_alignment_degrees],
            "plank head_alignment_degrees must be within 0-180 degrees",
        )?;
        if !(self.end_alignment < self.break_alignment
            && self.break_alignment < self.start_alignment
            && self.start_alignment <= self.hold_alignment)
        {
            return Err(ConfigError::InvalidRange(
                "plank alignment must satisfy end < break < start <= hold",
            ));
        }
        if !(self.hold_hip_offset <= self.start_hip_offset
            && self.start_hip_offset < self.break_hip_offset
            && self.break_hip_offset < self.end_hip_offset)
        {
            return Err(ConfigError::InvalidRange(
                "plank hip offsets must satisfy hold <= start < break < end",
            ));
        }
        Ok(())
    }
}

/// Jumping jack thresholds (scores in [0, 1])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpingJackThresholds {
    /// Arm and leg score above which limbs are out
    pub up_threshold: f64,
    /// Arm and leg score below which limbs are in
    pub down_threshold: f64,
    /// Minimum arm extension at the top
    pub min_arm_extension: f64,
    /// Minimum leg spread at the top
    pub min_leg_spread: f64,
    /// Minimum left/right symmetry
    pub min_symmetry: f64,
    /// Minimum pace consistency
    pub min_pace_consistency: f64,
}

impl Default for JumpingJackThresholds {
    fn default() -> Self {
        Self {
            up_threshold: jumping_jack::UP_THRESHOLD,
            down_threshold: jumping_jack::DOWN_THRESHOLD,
            min_arm_extension: jumping_jack::MIN_ARM_EXTENSION,
            min_leg_spread: jumping_jack::MIN_LEG_SPREAD,
            min_symmetry: jumping_jack::MIN_SYMMETRY,
            min_pace_consistency: jumping_jack::MIN_PACE_CONSISTENCY,
        }
    }
}

impl JumpingJackThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        for score in [
            self.up_threshold,
            self.down_threshold,
            self.min_arm_extension,
            self.min_leg_spread,
            self.min_symmetry,
            self.min_pace_consistency,
        ] {
            ensure_unit(score, "jumping jack scores must be within 0-1")?;
        }
        if self.down_threshold >= self.up_threshold {
            return Err(ConfigError::InvalidRange(
                "jumping jack down_threshold must be < up_threshold",
            ));
        }
        Ok(())
    }
}

fn ensure_angles(values: &[f64], message: &'static str) -> Result<(), ConfigError> {
    if values
        .iter()
        .all(|value| value.is_finite() && (0.0..=180.0).contains(value))
    {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(message))
    }
}

fn ensure_positive(value: f64, message: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(message))
    }
}

pub(super) fn ensure_unit(value: f64, message: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ExerciseThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_squat_band_is_rejected() {
        let mut thresholds = ExerciseThresholds::default();
        thresholds.squat.too_deep_angle = 95.0;
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let thresholds: ExerciseThresholds =
            serde_json::from_str(r#"{"plank": {"min_hold_seconds": 10.0}}"#).unwrap();
        assert!((thresholds.plank.min_hold_seconds - 10.0).abs() < f64::EPSILON);
        assert_eq!(thresholds.squat, SquatThresholds::default());
        assert!(
            (thresholds.plank.hold_alignment - plank::HOLD_ALIGNMENT).abs() < f64::EPSILON
        );
    }

    #[test]
    fn test_nan_threshold_is_rejected() {
        let mut thresholds = ExerciseThresholds::default();
        thresholds.curl.body_swing_degrees = f64::NAN;
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }
}
