// ABOUTME: Configuration module for the form coach application layer
// ABOUTME: Re-exports analyzer configuration and provides environment loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for Pierre Form Coach
//!
//! Analyzer settings and thresholds are defined in `pierre-form-intelligence`;
//! this module only decides where their values come from.

/// Environment-based configuration loading
pub mod environment;

pub use environment::load_from_env;
pub use pierre_form_intelligence::config::{
    AnalyzerSettings, ConfigError, CurlThresholds, ExerciseThresholds, FeedbackSettings,
    FormConfig, JumpingJackThresholds, LungeThresholds, PlankThresholds, PushupThresholds,
    SquatThresholds,
};
