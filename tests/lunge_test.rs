// ABOUTME: Integration tests for the lunge analyzer
// ABOUTME: Front leg selection, back-knee gating, lean direction, back thigh and stance metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{flex_rep, limb_end, lunge_pose, phase_trace, place, run, DT};
use pierre_form_coach::intelligence::config::{AnalyzerSettings, LungeThresholds};
use pierre_form_coach::intelligence::exercises::LungeAnalyzer;
use pierre_form_coach::intelligence::{ExerciseAnalyzer, MetricValue};
use pierre_form_coach::pose::{LandmarkId, LandmarkSet, Point2, Side};

const FRONT_TOO_HIGH: &str = "Bend your front knee more";
const LEAN_FORWARD: &str = "Don't lean too far forward";
const LEAN_BACK: &str = "Don't lean back";
const BACK_THIGH: &str = "Point your back knee toward the floor";

const BOTTOM: f64 = 90.0;

fn analyzer() -> LungeAnalyzer {
    LungeAnalyzer::new(LungeThresholds::default(), &AnalyzerSettings::default())
}

fn back_knee(front: f64) -> f64 {
    (front + 10.0).min(175.0)
}

/// Left-front rep whose bottom frames come from `bottom`
fn rep_with_bottom<F>(bottom: F) -> Vec<LandmarkSet>
where
    F: Fn() -> LandmarkSet,
{
    flex_rep(170.0, BOTTOM)
        .iter()
        .map(|front| {
            if (front - BOTTOM).abs() < f64::EPSILON {
                bottom()
            } else {
                lunge_pose(*front, back_knee(*front))
            }
        })
        .collect()
}

/// Bottom pose with the torso tilted `lean` degrees, positive toward the front foot
fn leaning_bottom(lean: f64) -> LandmarkSet {
    let mut pose = lunge_pose(BOTTOM, back_knee(BOTTOM));
    let front = pose.get(LandmarkId::LeftAnkle).unwrap().point2();
    let back = pose.get(LandmarkId::RightAnkle).unwrap().point2();
    let tilt = (lean * (front.x - back.x).signum()).to_radians();
    let shoulder = Point2::new(0.3f64.mul_add(tilt.sin(), 0.5), 0.3f64.mul_add(-tilt.cos(), 0.5));
    for side in [Side::Left, Side::Right] {
        place(&mut pose, side.shoulder(), shoulder);
    }
    pose
}

/// Lunge pose with the back knee swung 45 degrees off vertical, knee angles unchanged
fn splayed_back_thigh(front: f64) -> LandmarkSet {
    let back = back_knee(front);
    let mut pose = lunge_pose(front, back);
    let hip = Point2::new(0.5, 0.5);
    let knee = Point2::new(0.3, 0.7);
    place(&mut pose, Side::Right.knee(), knee);
    place(&mut pose, Side::Right.ankle(), limb_end(knee, hip, back, 0.2));
    pose
}

#[test]
fn test_left_front_lunge_counts() {
    let mut lunge = analyzer();
    let frames: Vec<LandmarkSet> = flex_rep(170.0, 90.0)
        .iter()
        .map(|front| lunge_pose(*front, back_knee(*front)))
        .collect();
    let results = run(&mut lunge, frames, DT);

    assert_eq!(lunge.front_side(), Side::Left);
    assert_eq!(lunge.rep_count(), 1);
    assert_eq!(
        phase_trace(&results),
        ["idle", "start", "compressing", "hold", "releasing", "idle"]
    );
    let last = results.last().unwrap();
    assert_eq!(last.metrics.get("front_leg"), Some(&MetricValue::Label("left")));
    assert!((last.metric("front_depth_angle").unwrap() - 90.0).abs() < 1e-6);
    assert!((last.metric("back_depth_angle").unwrap() - 100.0).abs() < 1e-6);
}

#[test]
fn test_more_bent_leg_becomes_front() {
    let mut lunge = analyzer();
    let frames: Vec<LandmarkSet> = flex_rep(170.0, 90.0)
        .iter()
        .map(|front| lunge_pose(back_knee(*front), *front))
        .collect();
    run(&mut lunge, frames, DT);
    assert_eq!(lunge.front_side(), Side::Right);
    assert_eq!(lunge.rep_count(), 1);
}

#[test]
fn test_straight_back_leg_blocks_commit() {
    let mut lunge = analyzer();
    let frames: Vec<LandmarkSet> = flex_rep(170.0, 90.0)
        .iter()
        .map(|front| lunge_pose(*front, 175.0))
        .collect();
    let results = run(&mut lunge, frames, DT);
    assert!(results.iter().all(|result| result.phase != "compressing"));
    assert_eq!(lunge.rep_count(), 0);
}

#[test]
fn test_shallow_front_knee_is_flagged() {
    let mut lunge = analyzer();
    let frames: Vec<LandmarkSet> = flex_rep(170.0, 105.0)
        .iter()
        .map(|front| lunge_pose(*front, back_knee(*front)))
        .collect();
    run(&mut lunge, frames, DT);
    assert_eq!(lunge.rep_count(), 1);
    assert_eq!(lunge.core().feedback().occurrences(FRONT_TOO_HIGH), 1);
}

#[test]
fn test_steady_stance_keeps_full_stability() {
    let mut lunge = analyzer();
    let results = run(
        &mut lunge,
        (0..10).map(|_| lunge_pose(150.0, 160.0)),
        DT,
    );
    let stability = results.last().unwrap().metric("stance_stability").unwrap();
    assert!((stability - 1.0).abs() < 1e-9);
}

#[test]
fn test_forward_lean_is_judged_against_facing() {
    let mut lunge = analyzer();
    run(&mut lunge, rep_with_bottom(|| leaning_bottom(30.0)), DT);
    assert_eq!(lunge.rep_count(), 1);
    assert!(lunge.core().feedback().occurrences(LEAN_FORWARD) > 0);
    assert_eq!(lunge.core().feedback().occurrences(LEAN_BACK), 0);
}

#[test]
fn test_backward_lean_is_judged_against_facing() {
    let mut lunge = analyzer();
    run(&mut lunge, rep_with_bottom(|| leaning_bottom(-30.0)), DT);
    assert_eq!(lunge.rep_count(), 1);
    assert!(lunge.core().feedback().occurrences(LEAN_BACK) > 0);
    assert_eq!(lunge.core().feedback().occurrences(LEAN_FORWARD), 0);
}

#[test]
fn test_small_lean_is_tolerated() {
    let mut lunge = analyzer();
    run(&mut lunge, rep_with_bottom(|| leaning_bottom(15.0)), DT);
    assert_eq!(lunge.core().feedback().occurrences(LEAN_FORWARD), 0);
    assert_eq!(lunge.core().feedback().occurrences(LEAN_BACK), 0);
}

#[test]
fn test_splayed_back_thigh_is_flagged() {
    let mut lunge = analyzer();
    let frames: Vec<LandmarkSet> = flex_rep(170.0, BOTTOM)
        .iter()
        .map(|front| splayed_back_thigh(*front))
        .collect();
    run(&mut lunge, frames, DT);
    assert_eq!(lunge.front_side(), Side::Left);
    assert_eq!(lunge.rep_count(), 1);
    assert!(lunge.core().feedback().occurrences(BACK_THIGH) > 0);

    let mut upright = analyzer();
    let frames: Vec<LandmarkSet> = flex_rep(170.0, BOTTOM)
        .iter()
        .map(|front| lunge_pose(*front, back_knee(*front)))
        .collect();
    run(&mut upright, frames, DT);
    assert_eq!(upright.core().feedback().occurrences(BACK_THIGH), 0);
}
