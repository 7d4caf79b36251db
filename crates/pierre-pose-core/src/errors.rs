// ABOUTME: Error taxonomy for pose-based form analysis
// ABOUTME: Stable error codes plus the recoverable analysis errors surfaced to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Form Analysis Error Types
//!
//! - `ErrorCode` - stable, serializable codes for every failure category
//! - `AnalysisError` - errors raised by analyzers and the coordinator
//!
//! Degenerate geometry has no variant: GeometryKit returns a neutral value
//! instead of failing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::LandmarkId;

/// Standard error codes used throughout form analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed caller input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric value outside its valid range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Analysis (4000-4999)
    /// Exercise name not in the catalogue
    #[serde(rename = "INVALID_EXERCISE_KIND")]
    InvalidExerciseKind = 4000,
    /// Required joints below the visibility threshold
    #[serde(rename = "INSUFFICIENT_VISIBILITY")]
    InsufficientVisibility = 4001,

    // Configuration (6000-6999)
    /// Configuration failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal (9000-9999)
    /// Failed to encode or decode data
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "A value is outside its allowed range",
            Self::InvalidExerciseKind => "The requested exercise is not supported",
            Self::InsufficientVisibility => {
                "Required body landmarks are not visible enough to analyze"
            }
            Self::ConfigInvalid => "The analysis configuration is invalid",
            Self::SerializationError => "Failed to serialize or deserialize data",
        }
    }

    /// Numeric code
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Recoverable errors raised while analyzing frames or switching exercises
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Exercise name is not in the catalogue
    #[error("Unknown exercise '{name}'")]
    InvalidExerciseKind {
        /// Name exactly as supplied by the caller
        name: String,
    },
    /// Required joints are absent or below the visibility threshold
    #[error("Insufficient landmark visibility: {missing:?}")]
    InsufficientVisibility {
        /// Joints that failed the check
        missing: Vec<LandmarkId>,
    },
}

impl AnalysisError {
    /// Create an "invalid exercise kind" error
    #[must_use]
    pub fn invalid_exercise_kind(name: impl Into<String>) -> Self {
        Self::InvalidExerciseKind { name: name.into() }
    }

    /// Create an "insufficient visibility" error
    #[must_use]
    pub const fn insufficient_visibility(missing: Vec<LandmarkId>) -> Self {
        Self::InsufficientVisibility { missing }
    }

    /// Stable error code for this error
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidExerciseKind { .. } => ErrorCode::InvalidExerciseKind,
            Self::InsufficientVisibility { .. } => ErrorCode::InsufficientVisibility,
        }
    }
}

/// Result alias for analysis operations
pub type FormResult<T> = Result<T, AnalysisError>;
