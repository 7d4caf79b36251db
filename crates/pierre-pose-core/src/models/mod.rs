// ABOUTME: Core data models for pose-based form analysis
// ABOUTME: Landmarks, points, exercise catalogue and feedback value types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise catalogue
pub mod exercise;
/// Coaching feedback value types
pub mod feedback;
/// Joint enumeration and per-frame landmark sets
pub mod landmark;
/// Geometric point primitives
pub mod point;

pub use exercise::ExerciseKind;
pub use feedback::{FeedbackItem, FeedbackPriority};
pub use landmark::{Landmark, LandmarkId, LandmarkSet, Side};
pub use point::{Point2, Point3};
