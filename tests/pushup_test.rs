// ABOUTME: Integration tests for the pushup analyzer
// ABOUTME: Rep counting, sag versus pike detection and the body-line streak
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{flex_rep, pushup_pose, run, DT};
use pierre_form_coach::intelligence::config::{AnalyzerSettings, PushupThresholds};
use pierre_form_coach::intelligence::exercises::PushupAnalyzer;
use pierre_form_coach::intelligence::ExerciseAnalyzer;
use pierre_form_coach::pose::LandmarkSet;

const GOOD_FORM: &str = "Excellent pushup form!";
const HIPS_SAG: &str = "Keep your hips up, avoid sagging";
const HIPS_PIKE: &str = "Lower your hips, avoid piking";
const BODY_LINE: &str = "Maintain a straight line from head to heels";
const NOT_LOW_ENOUGH: &str = "Lower your chest closer to the ground";

fn analyzer() -> PushupAnalyzer {
    PushupAnalyzer::new(PushupThresholds::default(), &AnalyzerSettings::default())
}

fn poses(angles: &[f64], hip_dy: f64) -> Vec<LandmarkSet> {
    angles
        .iter()
        .map(|angle| pushup_pose(*angle, hip_dy))
        .collect()
}

/// Straight arms, then held just inside the rep's start band
fn lowered(hip_dy: f64) -> Vec<LandmarkSet> {
    let mut angles = vec![170.0; 3];
    angles.extend(vec![150.0; 10]);
    poses(&angles, hip_dy)
}

#[test]
fn test_straight_body_rep_is_clean() {
    let mut pushup = analyzer();
    let results = run(&mut pushup, poses(&flex_rep(170.0, 90.0), 0.0), DT);

    assert_eq!(pushup.rep_count(), 1);
    assert_eq!(pushup.core().feedback().occurrences(GOOD_FORM), 1);
    assert_eq!(pushup.core().feedback().occurrences(NOT_LOW_ENOUGH), 0);
    let last = results.last().unwrap();
    assert!(last.metric("hip_offset_percent").unwrap().abs() < 1e-9);
    assert!((last.metric("straightness").unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_sagging_hips_are_flagged() {
    let mut pushup = analyzer();
    let results = run(&mut pushup, lowered(0.1), DT);

    assert!(results.last().unwrap().metric("hip_offset_percent").unwrap() > 10.0);
    assert!(pushup.core().feedback().occurrences(HIPS_SAG) > 0);
    assert_eq!(pushup.core().feedback().occurrences(HIPS_PIKE), 0);
}

#[test]
fn test_piked_hips_are_flagged() {
    let mut pushup = analyzer();
    let results = run(&mut pushup, lowered(-0.1), DT);

    assert!(results.last().unwrap().metric("hip_offset_percent").unwrap() < -10.0);
    assert!(pushup.core().feedback().occurrences(HIPS_PIKE) > 0);
    assert_eq!(pushup.core().feedback().occurrences(HIPS_SAG), 0);
}

#[test]
fn test_crooked_body_needs_a_streak() {
    let mut pushup = analyzer();
    // Hips 0.2 below a 0.5 body line leave straightness at 0.6
    let mut angles = vec![170.0; 3];
    angles.extend(vec![150.0; 4]);
    run(&mut pushup, poses(&angles, 0.2), DT);
    assert_eq!(pushup.core().feedback().occurrences(BODY_LINE), 0);

    run(&mut pushup, poses(&[150.0; 6], 0.2), DT);
    assert_eq!(pushup.core().feedback().occurrences(BODY_LINE), 1);
}

#[test]
fn test_idle_frames_do_not_coach() {
    let mut pushup = analyzer();
    run(&mut pushup, poses(&[170.0; 20], 0.1), DT);
    assert_eq!(pushup.core().feedback().occurrences(HIPS_SAG), 0);
    assert_eq!(pushup.phase_name(), "idle");
}
