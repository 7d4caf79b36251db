// ABOUTME: ExerciseAnalyzer contract and the bookkeeping shared by every analyzer
// ABOUTME: AnalysisResult output type, visibility gating, rep counting and feedback delivery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Analyzer Contract
//!
//! Every concrete analyzer owns an [`AnalyzerCore`] for the state that does
//! not depend on the exercise: rep counter, per-rep issue flag, active time,
//! timed mode and the embedded [`FeedbackManager`]. The exercise-specific
//! phase machine and smoothing buffers stay private to each analyzer; callers
//! only ever see the generic [`AnalysisResult`].

use std::collections::BTreeMap;
use std::fmt;

use pierre_pose_core::constants::visibility::REPOSITION_MESSAGE;
use pierre_pose_core::{
    AnalysisError, ExerciseKind, FeedbackItem, FeedbackPriority, LandmarkId, LandmarkSet, Point2,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{AnalyzerSettings, FeedbackSettings};
use crate::feedback::{FeedbackManager, IssueSummary};

/// Phase label reported when no analyzer is running
pub const IDLE_PHASE: &str = "idle";

/// Message returned when frames arrive before an exercise is selected
pub const NO_EXERCISE_MESSAGE: &str = "No exercise selected";

/// How a frame was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    /// Geometry ran and the phase machine was updated
    Analyzed,
    /// Required joints were below the visibility threshold
    InsufficientVisibility,
    /// The coordinator had no active analyzer
    NoExerciseSelected,
}

/// One exercise-specific detail value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Angle, score, ratio or duration
    Number(f64),
    /// Boolean condition
    Flag(bool),
    /// Categorical value such as the tracked side
    Label(&'static str),
}

impl MetricValue {
    /// Numeric value, if this metric is a number
    #[must_use]
    pub const fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Flag(_) | Self::Label(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&'static str> for MetricValue {
    fn from(value: &'static str) -> Self {
        Self::Label(value)
    }
}

/// Exercise-specific detail metrics keyed by name
pub type Metrics = BTreeMap<&'static str, MetricValue>;

/// Outcome of analyzing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Exercise that produced this result
    pub exercise: Option<ExerciseKind>,
    /// How the frame was handled
    pub status: FrameStatus,
    /// Current phase label (snake_case)
    pub phase: &'static str,
    /// Reps completed since the last reset
    pub rep_count: u32,
    /// Whether elapsed time is the primary completion metric
    pub timed: bool,
    /// Seconds spent in an active phase since the last reset
    pub active_seconds: f64,
    /// Feedback to surface on this frame, highest priority first
    pub feedback: Vec<FeedbackItem>,
    /// Exercise-specific detail metrics
    pub metrics: Metrics,
}

impl AnalysisResult {
    /// Result for a frame processed with no exercise selected
    #[must_use]
    pub fn no_exercise_selected() -> Self {
        Self {
            exercise: None,
            status: FrameStatus::NoExerciseSelected,
            phase: IDLE_PHASE,
            rep_count: 0,
            timed: false,
            active_seconds: 0.0,
            feedback: vec![FeedbackItem::new(NO_EXERCISE_MESSAGE, FeedbackPriority::Low)],
            metrics: Metrics::new(),
        }
    }

    /// Numeric metric by name
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).and_then(|value| value.as_number())
    }

    /// Whether geometry ran on this frame
    #[must_use]
    pub fn is_analyzed(&self) -> bool {
        self.status == FrameStatus::Analyzed
    }
}

/// Capability shared by the six exercise analyzers
pub trait ExerciseAnalyzer: fmt::Debug + Send {
    /// Analyze one frame
    ///
    /// `dt_seconds` is the wall-clock time since the previous frame. Negative
    /// or non-finite values are treated as zero.
    fn analyze(&mut self, landmarks: &LandmarkSet, dt_seconds: f64) -> AnalysisResult;

    /// Return to Idle and clear counters, history and the feedback window
    ///
    /// Persistent issue counts survive; see [`Self::reset_session`].
    fn reset(&mut self);

    /// Current phase label
    fn phase_name(&self) -> &'static str;

    /// Shared bookkeeping
    fn core(&self) -> &AnalyzerCore;

    /// Shared bookkeeping, mutably
    fn core_mut(&mut self) -> &mut AnalyzerCore;

    /// Exercise analyzed
    fn kind(&self) -> ExerciseKind {
        self.core().kind()
    }

    /// Choose elapsed time (`true`) or rep count as the completion metric
    fn set_timed_mode(&mut self, timed: bool) {
        self.core_mut().set_timed(timed);
    }

    /// Whether timed mode is on
    fn is_timed(&self) -> bool {
        self.core().is_timed()
    }

    /// Reps completed since the last reset
    fn rep_count(&self) -> u32 {
        self.core().rep_count()
    }

    /// Active seconds since the last reset
    fn active_seconds(&self) -> f64 {
        self.core().active_seconds()
    }

    /// Messages recorded at least `min_occurrences` times
    fn persistent_issues(&self, min_occurrences: u32) -> Vec<String> {
        self.core().feedback().persistent_issues(min_occurrences)
    }

    /// Recurring issues with count-derived priority
    fn issue_summary(&self) -> Vec<IssueSummary> {
        self.core().feedback().session_summary()
    }

    /// Reset and also forget persistent issue counts
    fn reset_session(&mut self) {
        self.reset();
        self.core_mut().feedback_mut().clear_history();
    }
}

/// State every analyzer shares regardless of exercise
#[derive(Debug, Clone)]
pub struct AnalyzerCore {
    kind: ExerciseKind,
    visibility_threshold: f64,
    delivery: FeedbackSettings,
    feedback: FeedbackManager,
    rep_count: u32,
    rep_in_progress: bool,
    issue_in_rep: bool,
    active_seconds: f64,
    timed: bool,
}

impl AnalyzerCore {
    /// Create bookkeeping for `kind`, timed by the exercise default
    #[must_use]
    pub fn new(kind: ExerciseKind, settings: &AnalyzerSettings) -> Self {
        Self {
            kind,
            visibility_threshold: settings.visibility_threshold,
            delivery: settings.feedback.clone(),
            feedback: FeedbackManager::new(settings.feedback.window_size),
            rep_count: 0,
            rep_in_progress: false,
            issue_in_rep: false,
            active_seconds: 0.0,
            timed: kind.default_timed(),
        }
    }

    /// Exercise analyzed
    #[must_use]
    pub const fn kind(&self) -> ExerciseKind {
        self.kind
    }

    /// Minimum joint confidence for geometry
    #[must_use]
    pub const fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    /// Required joints of this exercise that fall below the threshold
    #[must_use]
    pub fn missing_landmarks(&self, landmarks: &LandmarkSet) -> Vec<LandmarkId> {
        landmarks.missing(self.kind.required_landmarks(), self.visibility_threshold)
    }

    /// Build the reposition result for a frame that cannot be analyzed
    ///
    /// The reposition item is delivered immediately and is not recorded in
    /// the feedback window. The delivery counter still advances.
    pub fn reject_frame(&mut self, missing: Vec<LandmarkId>, phase: &'static str) -> AnalysisResult {
        let error = AnalysisError::insufficient_visibility(missing);
        debug!(
            exercise = %self.kind,
            phase,
            error.code = ?error.error_code(),
            error = %error,
            "Frame skipped"
        );
        self.feedback.advance_frame();
        AnalysisResult {
            exercise: Some(self.kind),
            status: FrameStatus::InsufficientVisibility,
            phase,
            rep_count: self.rep_count,
            timed: self.timed,
            active_seconds: self.active_seconds,
            feedback: vec![FeedbackItem::new(REPOSITION_MESSAGE, FeedbackPriority::High)],
            metrics: Metrics::new(),
        }
    }

    /// Start a new rep: clear the issue flag and the feedback window
    pub fn begin_rep(&mut self) {
        self.continue_rep();
        self.feedback.reset();
    }

    /// Open the next rep of a continuous set, keeping pending feedback
    pub fn continue_rep(&mut self) {
        self.rep_in_progress = true;
        self.issue_in_rep = false;
    }

    /// Record a form issue that spoils the current rep
    pub fn flag(&mut self, message: &str, priority: FeedbackPriority) {
        self.issue_in_rep = true;
        self.feedback.record(message, priority);
    }

    /// Record a message that does not count as a form issue
    pub fn note(&mut self, message: &str, priority: FeedbackPriority) {
        self.feedback.record(message, priority);
    }

    /// Count the rep in progress, returning whether one was counted
    pub fn complete_rep(&mut self) -> bool {
        if !self.rep_in_progress {
            return false;
        }
        self.rep_in_progress = false;
        self.rep_count += 1;
        info!(
            exercise = %self.kind,
            rep.count = self.rep_count,
            rep.clean = !self.issue_in_rep,
            "Rep completed"
        );
        true
    }

    /// Drop the rep in progress without counting it
    pub fn abandon_rep(&mut self) {
        self.rep_in_progress = false;
    }

    /// Whether an issue was flagged during the current rep
    #[must_use]
    pub const fn had_issue(&self) -> bool {
        self.issue_in_rep
    }

    /// Whether a rep is in progress
    #[must_use]
    pub const fn rep_in_progress(&self) -> bool {
        self.rep_in_progress
    }

    /// Add to active time
    pub fn add_active_time(&mut self, dt_seconds: f64) {
        self.active_seconds += dt_seconds;
    }

    /// Advance the delivery counter and build this frame's result
    pub fn finish(&mut self, phase: &'static str, metrics: Metrics) -> AnalysisResult {
        self.feedback.advance_frame();
        let feedback = self
            .feedback
            .get(self.delivery.max_items, self.delivery.min_frame_gap);
        AnalysisResult {
            exercise: Some(self.kind),
            status: FrameStatus::Analyzed,
            phase,
            rep_count: self.rep_count,
            timed: self.timed,
            active_seconds: self.active_seconds,
            feedback,
            metrics,
        }
    }

    /// Clear counters and the feedback window, keeping timed mode
    pub fn reset(&mut self) {
        self.feedback.reset();
        self.rep_count = 0;
        self.rep_in_progress = false;
        self.issue_in_rep = false;
        self.active_seconds = 0.0;
    }

    /// Reps completed since the last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Active seconds since the last reset
    #[must_use]
    pub const fn active_seconds(&self) -> f64 {
        self.active_seconds
    }

    /// Whether timed mode is on
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        self.timed
    }

    /// Set timed mode
    pub fn set_timed(&mut self, timed: bool) {
        self.timed = timed;
    }

    /// Embedded feedback manager
    #[must_use]
    pub const fn feedback(&self) -> &FeedbackManager {
        &self.feedback
    }

    /// Embedded feedback manager, mutably
    pub fn feedback_mut(&mut self) -> &mut FeedbackManager {
        &mut self.feedback
    }
}

/// Treat negative and non-finite frame intervals as zero
#[must_use]
pub fn sanitize_dt(dt_seconds: f64) -> f64 {
    if dt_seconds.is_finite() && dt_seconds > 0.0 {
        dt_seconds
    } else {
        0.0
    }
}

/// Image-plane points for `ids`, or `None` if any is missing or not visible
#[must_use]
pub fn visible_points<const N: usize>(
    landmarks: &LandmarkSet,
    ids: [LandmarkId; N],
    threshold: f64,
) -> Option<[Point2; N]> {
    let mut points = [Point2::default(); N];
    for (slot, id) in points.iter_mut().zip(ids) {
        *slot = landmarks.visible_point(id, threshold)?;
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_pose_core::Landmark;

    fn core() -> AnalyzerCore {
        AnalyzerCore::new(ExerciseKind::Squat, &AnalyzerSettings::default())
    }

    #[test]
    fn test_complete_rep_requires_rep_in_progress() {
        let mut core = core();
        assert!(!core.complete_rep());
        core.begin_rep();
        assert!(core.complete_rep());
        assert!(!core.complete_rep());
        assert_eq!(core.rep_count(), 1);
    }

    #[test]
    fn test_begin_rep_clears_issue_flag() {
        let mut core = core();
        core.flag("Keep your back more upright", FeedbackPriority::High);
        assert!(core.had_issue());
        core.begin_rep();
        assert!(!core.had_issue());
        core.note("Good form! Keep it up", FeedbackPriority::Low);
        assert!(!core.had_issue());
    }

    #[test]
    fn test_reject_frame_delivers_reposition_immediately() {
        let mut core = core();
        let result = core.reject_frame(vec![LandmarkId::LeftKnee], "idle");
        assert_eq!(result.status, FrameStatus::InsufficientVisibility);
        assert_eq!(result.feedback.len(), 1);
        assert_eq!(result.feedback[0].priority, FeedbackPriority::High);
        assert!(result.metrics.is_empty());
        assert_eq!(core.feedback().window_len(), 0);
    }

    #[test]
    fn test_visible_points_requires_every_joint() {
        let landmarks = LandmarkSet::new()
            .with(LandmarkId::LeftHip, Landmark::new(0.5, 0.5, 0.0, 0.9))
            .with(LandmarkId::LeftKnee, Landmark::new(0.5, 0.7, 0.0, 0.3));
        assert!(visible_points(&landmarks, [LandmarkId::LeftHip], 0.6).is_some());
        assert!(
            visible_points(&landmarks, [LandmarkId::LeftHip, LandmarkId::LeftKnee], 0.6).is_none()
        );
    }

    #[test]
    fn test_sanitize_dt() {
        assert!((sanitize_dt(0.033) - 0.033).abs() < f64::EPSILON);
        assert!(sanitize_dt(-1.0).abs() < f64::EPSILON);
        assert!(sanitize_dt(f64::NAN).abs() < f64::EPSILON);
    }
}
