// ABOUTME: Environment-based configuration loading for form analysis settings
// ABOUTME: Applies FORM_* variable overrides on top of defaults and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment configuration
//!
//! | Variable | Field |
//! |---|---|
//! | `FORM_VISIBILITY_THRESHOLD` | `settings.visibility_threshold` |
//! | `FORM_SMOOTHING_WINDOW` | `settings.smoothing_window` |
//! | `FORM_FEEDBACK_WINDOW` | `settings.feedback.window_size` |
//! | `FORM_FEEDBACK_MAX_ITEMS` | `settings.feedback.max_items` |
//! | `FORM_FEEDBACK_MIN_FRAME_GAP` | `settings.feedback.min_frame_gap` |
//! | `FORM_THRESHOLDS` | partial `ExerciseThresholds` JSON document |
//!
//! Unset variables keep their defaults.

use std::env;
use std::str::FromStr;

use pierre_form_intelligence::config::{ConfigError, ExerciseThresholds, FormConfig};
use tracing::debug;

/// Visibility cutoff override
pub const VISIBILITY_THRESHOLD_VAR: &str = "FORM_VISIBILITY_THRESHOLD";
/// Smoothing window override
pub const SMOOTHING_WINDOW_VAR: &str = "FORM_SMOOTHING_WINDOW";
/// Feedback sliding window override
pub const FEEDBACK_WINDOW_VAR: &str = "FORM_FEEDBACK_WINDOW";
/// Messages per delivery override
pub const FEEDBACK_MAX_ITEMS_VAR: &str = "FORM_FEEDBACK_MAX_ITEMS";
/// Frames between deliveries override
pub const FEEDBACK_MIN_FRAME_GAP_VAR: &str = "FORM_FEEDBACK_MIN_FRAME_GAP";
/// Inline JSON threshold overrides
pub const THRESHOLDS_VAR: &str = "FORM_THRESHOLDS";

/// Load and validate the form configuration from the environment
///
/// # Errors
///
/// Returns an error if a variable fails to parse or the resulting
/// configuration is invalid
pub fn load_from_env() -> Result<FormConfig, ConfigError> {
    let config = apply_env_overrides(FormConfig::default())?;
    config.validate()?;
    debug!(
        visibility_threshold = config.settings.visibility_threshold,
        smoothing_window = config.settings.smoothing_window,
        "Form configuration loaded from environment"
    );
    Ok(config)
}

/// Helper function to parse and apply an environment variable override
fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(env_var_name) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
    }
    Ok(())
}

fn apply_env_overrides(mut config: FormConfig) -> Result<FormConfig, ConfigError> {
    let settings = &mut config.settings;
    apply_env_var(VISIBILITY_THRESHOLD_VAR, &mut settings.visibility_threshold)?;
    apply_env_var(SMOOTHING_WINDOW_VAR, &mut settings.smoothing_window)?;
    apply_env_var(FEEDBACK_WINDOW_VAR, &mut settings.feedback.window_size)?;
    apply_env_var(FEEDBACK_MAX_ITEMS_VAR, &mut settings.feedback.max_items)?;
    apply_env_var(FEEDBACK_MIN_FRAME_GAP_VAR, &mut settings.feedback.min_frame_gap)?;

    if let Ok(document) = env::var(THRESHOLDS_VAR) {
        config.thresholds = serde_json::from_str::<ExerciseThresholds>(&document)
            .map_err(|e| ConfigError::Parse(format!("Invalid {THRESHOLDS_VAR}: {e}")))?;
    }
    Ok(config)
}
