// ABOUTME: Core pose types, geometry and constants for Pierre form coaching
// ABOUTME: Foundation crate with landmark model, GeometryKit, exercise catalogue and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Pose Core
//!
//! Foundation crate shared by the form analyzers and the session coordinator.
//! Everything here is plain data or pure functions; no module holds state.
//!
//! ## Modules
//!
//! - **models**: Landmarks, points, exercise catalogue and feedback value types
//! - **geometry**: GeometryKit angle, distance and alignment helpers
//! - **errors**: `ErrorCode` and `AnalysisError`
//! - **constants**: Default thresholds grouped by exercise

/// Error taxonomy with stable error codes
pub mod errors;

/// Default thresholds and tuning constants organized by exercise
pub mod constants;

/// GeometryKit pure geometry helpers
pub mod geometry;

/// Core data models (landmarks, points, exercises, feedback)
pub mod models;

pub use errors::{AnalysisError, ErrorCode, FormResult};
pub use models::{
    ExerciseKind, FeedbackItem, FeedbackPriority, Landmark, LandmarkId, LandmarkSet, Point2,
    Point3, Side,
};
