// ABOUTME: Form analysis configuration - analyzer settings, feedback delivery and thresholds
// ABOUTME: Construction-time configuration with defaults, partial JSON overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Form Analysis Configuration
//!
//! Configuration is fixed when analyzers are built. Each analyzer copies the
//! values it needs, so later changes to a `FormConfig` never affect running
//! analyzers.

/// Configuration error types
pub mod error;
/// Per-exercise thresholds
pub mod thresholds;

pub use error::ConfigError;
pub use thresholds::{
    CurlThresholds, ExerciseThresholds, JumpingJackThresholds, LungeThresholds, PlankThresholds,
    PushupThresholds, SquatThresholds,
};

use pierre_pose_core::constants::{feedback, smoothing, visibility};
use serde::{Deserialize, Serialize};

/// Complete form analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Settings shared by every analyzer
    pub settings: AnalyzerSettings,
    /// Per-exercise thresholds
    pub thresholds: ExerciseThresholds,
}

impl FormConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any setting or threshold is out of range or inverted
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;
        self.thresholds.validate()
    }
}

/// Settings shared by every analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Minimum joint confidence for a frame to be analyzed
    pub visibility_threshold: f64,
    /// Moving-average window for smoothed metrics
    pub smoothing_window: usize,
    /// Feedback delivery settings
    pub feedback: FeedbackSettings,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            visibility_threshold: visibility::DEFAULT_VISIBILITY_THRESHOLD,
            smoothing_window: smoothing::DEFAULT_WINDOW,
            feedback: FeedbackSettings::default(),
        }
    }
}

impl AnalyzerSettings {
    /// Validate shared settings
    ///
    /// # Errors
    ///
    /// Returns an error for a visibility threshold outside [0, 1] or an empty
    /// or oversized window
    pub fn validate(&self) -> Result<(), ConfigError> {
        thresholds::ensure_unit(
            self.visibility_threshold,
            "visibility_threshold must be within 0-1",
        )?;
        if !(1..=smoothing::MAX_WINDOW).contains(&self.smoothing_window) {
            return Err(ConfigError::ValueOutOfRange(
                "smoothing_window must be between 1 and 10",
            ));
        }
        self.feedback.validate()
    }
}

/// How feedback is buffered and rate-limited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    /// Sliding window of recent observations
    pub window_size: usize,
    /// Messages delivered per non-empty delivery
    pub max_items: usize,
    /// Frames that must pass between two non-empty deliveries
    pub min_frame_gap: u32,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            window_size: feedback::DEFAULT_WINDOW_SIZE,
            max_items: feedback::DEFAULT_MAX_ITEMS,
            min_frame_gap: feedback::DEFAULT_MIN_FRAME_GAP,
        }
    }
}

impl FeedbackSettings {
    /// Validate feedback settings
    ///
    /// # Errors
    ///
    /// Returns an error when the window or per-delivery item count is zero
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "feedback window_size must be > 0",
            ));
        }
        if self.max_items == 0 {
            return Err(ConfigError::ValueOutOfRange("feedback max_items must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        assert!(FormConfig::default().validate().is_ok());
    }

    #[test]
    fn test_visibility_threshold_bounds() {
        let mut config = FormConfig::default();
        config.settings.visibility_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smoothing_window_bounds() {
        let mut config = FormConfig::default();
        config.settings.smoothing_window = 0;
        assert!(config.validate().is_err());
        config.settings.smoothing_window = 11;
        assert!(config.validate().is_err());
        config.settings.smoothing_window = 10;
        assert!(config.validate().is_ok());
    }
}
