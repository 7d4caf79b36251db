// ABOUTME: Exercise form intelligence for Pierre form coaching
// ABOUTME: Feedback aggregation, smoothing, analyzer contract and the six per-exercise analyzers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Form Intelligence
//!
//! Turns a stream of landmark frames into phases, rep counts and prioritized
//! coaching feedback. Every analyzer is a synchronous state machine: one
//! `analyze` call must finish before the next begins, and nothing here
//! blocks or performs I/O.
//!
//! ## Modules
//!
//! - **config**: Analyzer settings and per-exercise thresholds with validation
//! - **smoothing**: Fixed-capacity moving averages and frame streak counters
//! - **feedback**: `FeedbackManager` windowed aggregation and rate-limited delivery
//! - **analyzer**: `ExerciseAnalyzer` trait, `AnalyzerCore` and `AnalysisResult`
//! - **exercises**: Concrete analyzers and the `build_analyzer` factory

/// Analyzer contract and shared bookkeeping
pub mod analyzer;

/// Analyzer configuration
pub mod config;

/// Per-exercise analyzers
pub mod exercises;

/// Feedback aggregation and delivery
pub mod feedback;

/// Smoothing buffers
pub mod smoothing;

pub use analyzer::{
    AnalysisResult, AnalyzerCore, ExerciseAnalyzer, FrameStatus, MetricValue, Metrics,
};
pub use config::{AnalyzerSettings, ConfigError, ExerciseThresholds, FeedbackSettings, FormConfig};
pub use exercises::build_analyzer;
pub use feedback::{FeedbackManager, IssueSummary};
