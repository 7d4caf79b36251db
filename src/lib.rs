// ABOUTME: Main library entry point for Pierre Form Coach
// ABOUTME: Session coordination, environment configuration and logging over the form analyzers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Form Coach
//!
//! Real-time exercise form analysis from pose landmarks. Each frame of
//! landmarks from an external pose estimator is routed to the analyzer of the
//! selected exercise, which tracks the movement phase, counts reps and
//! returns prioritized coaching feedback.
//!
//! ## Architecture
//!
//! - **`pierre_pose_core`**: Landmark model, geometry helpers, exercise catalogue, errors
//! - **`pierre_form_intelligence`**: Feedback manager, smoothing, the six analyzers
//! - **coordinator**: `AnalysisCoordinator` session object and statistics
//! - **config**: Environment-based configuration loading
//! - **logging**: Structured `tracing` setup and session events
//!
//! ## Example Usage
//!
//! ```rust
//! use pierre_form_coach::coordinator::AnalysisCoordinator;
//! use pierre_form_coach::pose::LandmarkSet;
//!
//! let mut coordinator = AnalysisCoordinator::with_defaults();
//! coordinator.select_exercise("squat", false)?;
//!
//! let frame = LandmarkSet::new();
//! let result = coordinator.process_frame(&frame, 1.0 / 30.0);
//! assert_eq!(result.rep_count, 0);
//!
//! let summary = coordinator.end_session();
//! assert_eq!(summary.total_reps(), 0);
//! # Ok::<(), pierre_form_coach::pose::AnalysisError>(())
//! ```

/// Environment configuration loading
pub mod config;

/// Analysis session coordinator
pub mod coordinator;

/// Structured logging setup
pub mod logging;

/// Pose model, geometry and catalogue
pub use pierre_pose_core as pose;

/// Form analyzers and feedback
pub use pierre_form_intelligence as intelligence;

pub use coordinator::{AnalysisCoordinator, ExerciseStatistics, ExerciseSwitch, SessionStatistics};
pub use pierre_form_intelligence::{AnalysisResult, FrameStatus};
pub use pierre_pose_core::{ExerciseKind, FeedbackItem, FeedbackPriority, LandmarkSet};
