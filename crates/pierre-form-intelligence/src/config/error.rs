// ABOUTME: Configuration error types for form analysis validation
// ABOUTME: Defines error variants for inverted threshold bands, out-of-range values and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for form analysis validation.

use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold band is inverted or empty (e.g., start angle below commit angle)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Threshold override document is not valid JSON for the threshold schema
    #[error("Invalid threshold document: {0}")]
    Json(#[from] serde_json::Error),
}
