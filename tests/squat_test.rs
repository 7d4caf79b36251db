// ABOUTME: Integration tests for the squat analyzer
// ABOUTME: Rep counting through the flex cycle, depth feedback, false starts and visibility gating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{eager_settings, flex_rep, hide, phase_trace, run, squat_pose, sweep, DT};
use pierre_form_coach::intelligence::config::{AnalyzerSettings, SquatThresholds};
use pierre_form_coach::intelligence::exercises::SquatAnalyzer;
use pierre_form_coach::intelligence::{ExerciseAnalyzer, FrameStatus};
use pierre_form_coach::pose::constants::visibility::REPOSITION_MESSAGE;
use pierre_form_coach::pose::{FeedbackPriority, LandmarkId, LandmarkSet};

const NOT_DEEP_ENOUGH: &str = "Lower your hips more for a proper squat";
const TOO_DEEP: &str = "You're squatting too deep, raise slightly";
const FALSE_START: &str = "Lower yourself into a proper squat";

fn analyzer() -> SquatAnalyzer {
    SquatAnalyzer::new(SquatThresholds::default(), &AnalyzerSettings::default())
}

fn poses(angles: &[f64]) -> Vec<LandmarkSet> {
    angles.iter().map(|angle| squat_pose(*angle)).collect()
}

#[test]
fn test_full_squat_counts_one_rep() {
    let mut squat = analyzer();
    let results = run(&mut squat, poses(&flex_rep(170.0, 80.0)), DT);

    assert_eq!(
        phase_trace(&results),
        ["idle", "start", "compressing", "hold", "releasing", "idle"]
    );
    let last = results.last().unwrap();
    assert_eq!(last.rep_count, 1);
    assert!(last.is_analyzed());
    assert!(last.active_seconds > 0.0);

    // Bottom of the smoothed knee angle is remembered for the rep
    let depth = last.metric("depth_angle").unwrap();
    assert!((depth - 80.0).abs() < 1e-6, "depth {depth}");
    assert_eq!(squat.core().feedback().occurrences(NOT_DEEP_ENOUGH), 0);
    assert_eq!(squat.core().feedback().occurrences(TOO_DEEP), 0);
}

#[test]
fn test_reps_accumulate() {
    let mut squat = analyzer();
    let mut angles = flex_rep(170.0, 80.0);
    angles.extend(flex_rep(170.0, 80.0));
    angles.extend(flex_rep(170.0, 80.0));
    let results = run(&mut squat, poses(&angles), DT);
    assert_eq!(results.last().unwrap().rep_count, 3);
    assert_eq!(squat.rep_count(), 3);
}

#[test]
fn test_shallow_squat_gets_depth_feedback() {
    let mut squat = analyzer();
    run(&mut squat, poses(&flex_rep(170.0, 95.0)), DT);
    assert_eq!(squat.rep_count(), 1);
    assert_eq!(squat.core().feedback().occurrences(NOT_DEEP_ENOUGH), 1);
}

#[test]
fn test_very_deep_squat_gets_depth_feedback() {
    let mut squat = analyzer();
    run(&mut squat, poses(&flex_rep(170.0, 60.0)), DT);
    assert_eq!(squat.rep_count(), 1);
    assert_eq!(squat.core().feedback().occurrences(TOO_DEEP), 1);
}

#[test]
fn test_false_start_returns_to_idle_without_rep() {
    let mut squat = analyzer();
    let mut angles = vec![170.0; 5];
    angles.extend(sweep(165.0, 140.0, 5.0));
    angles.extend(sweep(145.0, 170.0, 5.0));
    angles.extend(vec![170.0; 5]);
    let results = run(&mut squat, poses(&angles), DT);

    assert_eq!(phase_trace(&results), ["idle", "start", "idle"]);
    assert_eq!(squat.rep_count(), 0);
    assert_eq!(squat.core().feedback().occurrences(FALSE_START), 1);
}

#[test]
fn test_small_wobble_never_leaves_idle() {
    let mut squat = analyzer();
    let results = run(&mut squat, poses(&[170.0, 165.0, 170.0, 165.0, 170.0]), DT);
    assert!(results.iter().all(|result| result.phase == "idle"));
    assert!(squat.active_seconds().abs() < f64::EPSILON);
}

#[test]
fn test_hidden_knee_asks_to_reposition() {
    let mut squat = analyzer();
    let mut angles = vec![170.0; 5];
    angles.extend(sweep(165.0, 120.0, 5.0));
    run(&mut squat, poses(&angles), DT);
    let phase_before = squat.phase_name();
    assert_ne!(phase_before, "idle");

    let frame = hide(&squat_pose(110.0), &[LandmarkId::LeftKnee]);
    let result = squat.analyze(&frame, DT);

    assert_eq!(result.status, FrameStatus::InsufficientVisibility);
    assert_eq!(result.phase, phase_before);
    assert_eq!(result.feedback.len(), 1);
    assert_eq!(result.feedback[0].message, REPOSITION_MESSAGE);
    assert_eq!(result.feedback[0].priority, FeedbackPriority::High);
    assert!(result.metrics.is_empty());
    assert_eq!(squat.phase_name(), phase_before);
}

#[test]
fn test_feedback_is_rate_limited_by_default() {
    let mut squat = analyzer();
    let results = run(&mut squat, poses(&flex_rep(170.0, 95.0)), DT);
    let delivered: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, result)| !result.feedback.is_empty())
        .map(|(index, _)| index)
        .collect();
    for pair in delivered.windows(2) {
        assert!(pair[1] - pair[0] >= 15);
    }
}

#[test]
fn test_eager_delivery_surfaces_depth_message() {
    let mut squat = SquatAnalyzer::new(SquatThresholds::default(), &eager_settings());
    let results = run(&mut squat, poses(&flex_rep(170.0, 95.0)), DT);
    assert!(results
        .iter()
        .flat_map(|result| result.feedback.iter())
        .any(|item| item.message == NOT_DEEP_ENOUGH && item.priority == FeedbackPriority::High));
}

#[test]
fn test_reset_clears_count_but_keeps_issue_history() {
    let mut squat = analyzer();
    run(&mut squat, poses(&flex_rep(170.0, 95.0)), DT);
    assert_eq!(squat.rep_count(), 1);

    squat.reset();
    assert_eq!(squat.rep_count(), 0);
    assert_eq!(squat.phase_name(), "idle");
    assert!(squat.active_seconds().abs() < f64::EPSILON);
    assert_eq!(squat.core().feedback().occurrences(NOT_DEEP_ENOUGH), 1);

    squat.reset_session();
    assert_eq!(squat.core().feedback().occurrences(NOT_DEEP_ENOUGH), 0);
}
