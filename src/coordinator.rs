// ABOUTME: Session coordinator that owns the analyzers and routes frames to the active one
// ABOUTME: Aggregates per-exercise reps, active time and feedback frequency into session statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Coordinator
//!
//! The coordinator is an explicit object whose lifetime the caller owns; there
//! is no process-wide analyzer. Analyzers are built lazily on first selection
//! and kept for the rest of the session, so switching back to an exercise
//! keeps its persistent issue history.
//!
//! Frames must be fed one at a time. The coordinator does no locking; a
//! caller producing frames on another thread wraps it in its own mutex.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pierre_form_intelligence::analyzer::sanitize_dt;
use pierre_form_intelligence::{
    build_analyzer, AnalysisResult, ConfigError, ExerciseAnalyzer, FormConfig, IssueSummary,
};
use pierre_pose_core::constants::feedback::{
    PERSISTENT_ISSUE_MIN_OCCURRENCES, TOP_FEEDBACK_LIMIT,
};
use pierre_pose_core::{ExerciseKind, FeedbackPriority, FormResult, LandmarkSet};
use serde::Serialize;
use uuid::Uuid;

use crate::logging::SessionLogger;

/// One exercise selection in the session log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSwitch {
    /// Exercise selected
    pub exercise: ExerciseKind,
    /// Whether it was selected in timed mode
    pub timed: bool,
    /// Wall-clock time of the switch
    pub at: DateTime<Utc>,
    /// Analyzed session time when the switch happened
    pub session_offset_seconds: f64,
}

/// How often a message was delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackCount {
    /// Message text
    pub message: String,
    /// Deliveries during the session
    pub count: u32,
}

/// A message delivered often enough to call out, with a count-derived severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignificantFeedback {
    /// Message text
    pub message: String,
    /// Deliveries during the session
    pub count: u32,
    /// Severity from the delivery count
    pub priority: FeedbackPriority,
}

/// Per-exercise totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseStatistics {
    /// Latest rep count reported by the analyzer
    pub rep_count: u32,
    /// Latest active time reported by the analyzer
    pub active_seconds: f64,
    /// Whether the exercise was last run in timed mode
    pub timed: bool,
    /// Delivered feedback, most frequent first
    pub feedback: Vec<FeedbackCount>,
    /// Messages the analyzer recorded at least three times
    pub persistent_issues: Vec<String>,
    /// Recurring issues with their severity
    pub recurring_issues: Vec<IssueSummary>,
}

/// Snapshot of the whole session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatistics {
    /// Session identifier, regenerated when the session ends
    pub session_id: Uuid,
    /// When the session began
    pub started_at: DateTime<Utc>,
    /// Sum of frame durations processed while an exercise was selected
    pub total_seconds: f64,
    /// Exercise currently selected
    pub current_exercise: Option<ExerciseKind>,
    /// Totals per exercise used this session
    pub exercises: BTreeMap<ExerciseKind, ExerciseStatistics>,
    /// The most frequent messages across all exercises
    pub top_feedback: Vec<FeedbackCount>,
    /// Messages delivered at least twice, with severity
    pub significant_feedback: Vec<SignificantFeedback>,
    /// Exercise selections in order
    pub switches: Vec<ExerciseSwitch>,
}

impl SessionStatistics {
    /// Reps summed over every exercise
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.exercises.values().map(|stats| stats.rep_count).sum()
    }
}

#[derive(Debug, Clone, Default)]
struct ExerciseAggregate {
    rep_count: u32,
    active_seconds: f64,
    timed: bool,
    histogram: BTreeMap<String, u32>,
}

/// Owns the analyzers and the session aggregate
#[derive(Debug)]
pub struct AnalysisCoordinator {
    config: FormConfig,
    analyzers: BTreeMap<ExerciseKind, Box<dyn ExerciseAnalyzer>>,
    active: Option<ExerciseKind>,
    session_id: Uuid,
    started_at: DateTime<Utc>,
    total_seconds: f64,
    aggregates: BTreeMap<ExerciseKind, ExerciseAggregate>,
    switches: Vec<ExerciseSwitch>,
}

impl AnalysisCoordinator {
    /// Create a coordinator with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: FormConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            analyzers: BTreeMap::new(),
            active: None,
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total_seconds: 0.0,
            aggregates: BTreeMap::new(),
            switches: Vec::new(),
        })
    }

    /// Create a coordinator with the default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: FormConfig::default(),
            analyzers: BTreeMap::new(),
            active: None,
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total_seconds: 0.0,
            aggregates: BTreeMap::new(),
            switches: Vec::new(),
        }
    }

    /// Configuration the analyzers are built from
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Current session identifier
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Exercise currently selected
    #[must_use]
    pub const fn active_exercise(&self) -> Option<ExerciseKind> {
        self.active
    }

    /// The active analyzer, if an exercise is selected
    #[must_use]
    pub fn active_analyzer(&self) -> Option<&dyn ExerciseAnalyzer> {
        let kind = self.active?;
        self.analyzers.get(&kind).map(Box::as_ref)
    }

    /// Exercise selections so far this session
    #[must_use]
    pub fn switches(&self) -> &[ExerciseSwitch] {
        &self.switches
    }

    /// Select an exercise by catalogue name
    ///
    /// # Errors
    ///
    /// Returns `InvalidExerciseKind` if `name` is not in the catalogue. The
    /// active analyzer and the session aggregate are left untouched.
    pub fn select_exercise(&mut self, name: &str, timed: bool) -> FormResult<ExerciseKind> {
        let kind = ExerciseKind::from_str(name).inspect_err(|_| {
            SessionLogger::log_rejected_exercise(self.session_id, name);
        })?;
        self.select(kind, timed);
        Ok(kind)
    }

    /// Select an exercise
    ///
    /// Resets the previously active analyzer, then resets and configures the
    /// newly selected one.
    pub fn select(&mut self, kind: ExerciseKind, timed: bool) {
        if let Some(previous) = self.active.and_then(|k| self.analyzers.get_mut(&k)) {
            previous.reset();
        }

        let config = &self.config;
        let analyzer = self
            .analyzers
            .entry(kind)
            .or_insert_with(|| build_analyzer(kind, config));
        analyzer.reset();
        analyzer.set_timed_mode(timed);

        self.active = Some(kind);
        self.aggregates.entry(kind).or_default().timed = timed;
        self.switches.push(ExerciseSwitch {
            exercise: kind,
            timed,
            at: Utc::now(),
            session_offset_seconds: self.total_seconds,
        });
        SessionLogger::log_exercise_switch(self.session_id, kind, timed);
    }

    /// Analyze one frame with the active analyzer
    ///
    /// Returns a "no exercise selected" result when nothing is selected.
    pub fn process_frame(&mut self, landmarks: &LandmarkSet, dt_seconds: f64) -> AnalysisResult {
        let Some(kind) = self.active else {
            return AnalysisResult::no_exercise_selected();
        };
        let Some(analyzer) = self.analyzers.get_mut(&kind) else {
            return AnalysisResult::no_exercise_selected();
        };

        let result = analyzer.analyze(landmarks, dt_seconds);
        self.total_seconds += sanitize_dt(dt_seconds);

        let aggregate = self.aggregates.entry(kind).or_default();
        if result.rep_count > aggregate.rep_count {
            SessionLogger::log_rep_completed(self.session_id, kind, result.rep_count);
        }
        aggregate.rep_count = result.rep_count;
        aggregate.active_seconds = result.active_seconds;
        aggregate.timed = result.timed;
        for item in &result.feedback {
            *aggregate.histogram.entry(item.message.clone()).or_insert(0) += 1;
        }
        result
    }

    /// Snapshot of the session so far
    #[must_use]
    pub fn session_summary(&self) -> SessionStatistics {
        let mut overall: BTreeMap<&str, u32> = BTreeMap::new();
        let mut exercises = BTreeMap::new();

        for (kind, aggregate) in &self.aggregates {
            for (message, count) in &aggregate.histogram {
                *overall.entry(message.as_str()).or_insert(0) += count;
            }
            let analyzer = self.analyzers.get(kind);
            exercises.insert(
                *kind,
                ExerciseStatistics {
                    rep_count: aggregate.rep_count,
                    active_seconds: aggregate.active_seconds,
                    timed: aggregate.timed,
                    feedback: ranked(aggregate.histogram.iter().map(|(m, c)| (m.as_str(), *c))),
                    persistent_issues: analyzer
                        .map(|a| a.persistent_issues(PERSISTENT_ISSUE_MIN_OCCURRENCES))
                        .unwrap_or_default(),
                    recurring_issues: analyzer.map(|a| a.issue_summary()).unwrap_or_default(),
                },
            );
        }

        let all = ranked(overall.into_iter());
        let significant_feedback = all
            .iter()
            .filter_map(|entry| {
                FeedbackPriority::from_occurrences(entry.count).map(|priority| SignificantFeedback {
                    message: entry.message.clone(),
                    count: entry.count,
                    priority,
                })
            })
            .collect();
        let top_feedback = all.into_iter().take(TOP_FEEDBACK_LIMIT).collect();

        SessionStatistics {
            session_id: self.session_id,
            started_at: self.started_at,
            total_seconds: self.total_seconds,
            current_exercise: self.active,
            exercises,
            top_feedback,
            significant_feedback,
            switches: self.switches.clone(),
        }
    }

    /// End the session and start a fresh one
    ///
    /// Returns the statistics of the session that ended. Clears the
    /// selection, resets every analyzer including its issue history and
    /// reinitializes the aggregate under a new session id.
    pub fn end_session(&mut self) -> SessionStatistics {
        let summary = self.session_summary();
        SessionLogger::log_session_end(
            summary.session_id,
            summary.total_seconds,
            summary.total_reps(),
        );

        for analyzer in self.analyzers.values_mut() {
            analyzer.reset_session();
        }
        self.active = None;
        self.session_id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.total_seconds = 0.0;
        self.aggregates.clear();
        self.switches.clear();
        summary
    }
}

/// Sort message counts by frequency, ties broken alphabetically
fn ranked<'a>(counts: impl Iterator<Item = (&'a str, u32)>) -> Vec<FeedbackCount> {
    let mut entries: Vec<FeedbackCount> = counts
        .map(|(message, count)| FeedbackCount {
            message: message.to_owned(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.message.cmp(&b.message)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_orders_by_count_then_message() {
        let entries = ranked([("b", 2), ("a", 2), ("c", 5)].into_iter());
        let order: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn test_frames_without_selection_are_not_timed() {
        let mut coordinator = AnalysisCoordinator::with_defaults();
        let result = coordinator.process_frame(&LandmarkSet::new(), 0.1);
        assert!(!result.is_analyzed());
        assert!(coordinator.session_summary().total_seconds.abs() < f64::EPSILON);
    }
}
