// ABOUTME: Shared test utilities for form analysis integration tests
// ABOUTME: Synthetic pose builders with exact joint angles, frame runners and delivery settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::similar_names
)]
//! Shared test utilities for `pierre_form_coach`
//!
//! Poses are built in normalized image coordinates (y grows downward). Joint
//! angles are placed exactly with [`limb_end`], so a test can ask for a knee
//! at 95 degrees and the analyzer measures 95 degrees.

use std::f64::consts::FRAC_1_SQRT_2;

use pierre_form_coach::intelligence::config::{AnalyzerSettings, FeedbackSettings};
use pierre_form_coach::intelligence::{AnalysisResult, ExerciseAnalyzer};
use pierre_form_coach::pose::{Landmark, LandmarkId, LandmarkSet, Point2, Side};

/// Frame interval used by most tests (30 fps)
pub const DT: f64 = 1.0 / 30.0;

/// Visibility below the default threshold
pub const HIDDEN: f64 = 0.1;

/// Every joint present at the image centre with full confidence
pub fn base_pose() -> LandmarkSet {
    LandmarkId::ALL.iter().fold(LandmarkSet::new(), |set, id| {
        set.with(*id, Landmark::new(0.5, 0.5, 0.0, 1.0))
    })
}

/// Place a joint at `point` with full confidence
pub fn place(pose: &mut LandmarkSet, id: LandmarkId, point: Point2) {
    pose.insert(id, Landmark::new(point.x, point.y, 0.0, 1.0));
}

/// Copy of `pose` with the given joints below the visibility threshold
pub fn hide(pose: &LandmarkSet, ids: &[LandmarkId]) -> LandmarkSet {
    let mut hidden = pose.clone();
    for id in ids {
        if let Some(landmark) = pose.get(*id) {
            hidden.insert(*id, Landmark { visibility: HIDDEN, ..*landmark });
        }
    }
    hidden
}

/// End of a limb of `length` leaving `joint` so that `angle(toward, joint, end)`
/// equals `angle_degrees`
pub fn limb_end(joint: Point2, toward: Point2, angle_degrees: f64, length: f64) -> Point2 {
    let reference = toward - joint;
    let norm = reference.length();
    let (ux, uy) = (reference.x / norm, reference.y / norm);
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Point2::new(
        joint.x + length * ux.mul_add(cos, -(uy * sin)),
        joint.y + length * ux.mul_add(sin, uy * cos),
    )
}

/// Side-on squat with both legs at `knee_angle` and a 30 degree forward torso lean
pub fn squat_pose(knee_angle: f64) -> LandmarkSet {
    let mut pose = base_pose();
    let ankle = Point2::new(0.5, 0.9);
    let knee = Point2::new(0.5, 0.7);
    let hip = limb_end(knee, ankle, knee_angle, 0.2);
    let shoulder = Point2::new(hip.x - 0.15, hip.y - 0.26);
    for side in [Side::Left, Side::Right] {
        place(&mut pose, side.ankle(), ankle);
        place(&mut pose, side.knee(), knee);
        place(&mut pose, side.hip(), hip);
        place(&mut pose, side.shoulder(), shoulder);
    }
    pose
}

/// Standing curl: the left arm at `elbow_angle`, the right arm hanging at 175
pub fn curl_pose(elbow_angle: f64) -> LandmarkSet {
    curl_arms(elbow_angle, 175.0)
}

/// Standing curl with each elbow at the given angle
pub fn curl_arms(left_elbow_angle: f64, right_elbow_angle: f64) -> LandmarkSet {
    let mut pose = base_pose();
    for (side, x, angle) in [
        (Side::Left, 0.45, left_elbow_angle),
        (Side::Right, 0.55, right_elbow_angle),
    ] {
        let shoulder = Point2::new(x, 0.3);
        let elbow = Point2::new(x, 0.45);
        place(&mut pose, side.shoulder(), shoulder);
        place(&mut pose, side.elbow(), elbow);
        place(&mut pose, side.wrist(), limb_end(elbow, shoulder, angle, 0.15));
        place(&mut pose, side.hip(), Point2::new(x, 0.6));
    }
    pose
}

/// Copy of `pose` with the left arm rotated rigidly `lean_degrees` about the
/// left hip, then the whole left side moved `shift` along x
pub fn sway_left_arm(pose: &LandmarkSet, lean_degrees: f64, shift: f64) -> LandmarkSet {
    let mut swayed = pose.clone();
    let Some(hip) = pose.get(LandmarkId::LeftHip).map(Landmark::point2) else {
        return swayed;
    };
    let (sin, cos) = lean_degrees.to_radians().sin_cos();
    let offset = Point2::new(shift, 0.0);
    for id in [
        LandmarkId::LeftShoulder,
        LandmarkId::LeftElbow,
        LandmarkId::LeftWrist,
    ] {
        if let Some(point) = pose.get(id).map(Landmark::point2) {
            let arm = point - hip;
            let rotated = Point2::new(
                arm.x.mul_add(cos, -(arm.y * sin)),
                arm.x.mul_add(sin, arm.y * cos),
            );
            place(&mut swayed, id, hip + rotated + offset);
        }
    }
    place(&mut swayed, LandmarkId::LeftHip, hip + offset);
    swayed
}

/// Side-on body line facing -x, hips displaced by `hip_dy` (positive sags)
fn body_line(hip_dy: f64) -> (LandmarkSet, Point2) {
    let mut pose = base_pose();
    let shoulder = Point2::new(0.3, 0.5);
    for side in [Side::Left, Side::Right] {
        place(&mut pose, side.shoulder(), shoulder);
        place(&mut pose, side.hip(), Point2::new(0.55, 0.5 + hip_dy));
        place(&mut pose, side.ankle(), Point2::new(0.8, 0.5));
    }
    place(&mut pose, LandmarkId::Nose, Point2::new(0.25, 0.5));
    (pose, shoulder)
}

/// Pushup with both elbows at `elbow_angle` and the upper arm 45 degrees from the torso
pub fn pushup_pose(elbow_angle: f64, hip_dy: f64) -> LandmarkSet {
    let (mut pose, shoulder) = body_line(hip_dy);
    let elbow = shoulder + Point2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2) * 0.15;
    let wrist = limb_end(elbow, shoulder, elbow_angle, 0.15);
    for side in [Side::Left, Side::Right] {
        place(&mut pose, side.elbow(), elbow);
        place(&mut pose, side.wrist(), wrist);
    }
    pose
}

/// Forearm plank with elbows under the shoulders
pub fn plank_pose(hip_dy: f64) -> LandmarkSet {
    let (mut pose, shoulder) = body_line(hip_dy);
    for side in [Side::Left, Side::Right] {
        place(&mut pose, side.elbow(), Point2::new(shoulder.x, 0.65));
        place(&mut pose, side.wrist(), Point2::new(shoulder.x - 0.15, 0.65));
    }
    pose
}

/// Side-on lunge with each knee placed at the given angle
pub fn lunge_pose(left_knee_angle: f64, right_knee_angle: f64) -> LandmarkSet {
    let mut pose = base_pose();
    let hip = Point2::new(0.5, 0.5);
    for (side, knee_x, angle) in [
        (Side::Left, 0.6, left_knee_angle),
        (Side::Right, 0.4, right_knee_angle),
    ] {
        let knee = Point2::new(knee_x, 0.7);
        place(&mut pose, side.hip(), hip);
        place(&mut pose, side.knee(), knee);
        place(&mut pose, side.ankle(), limb_end(knee, hip, angle, 0.2));
        place(&mut pose, side.shoulder(), Point2::new(0.5, 0.2));
    }
    pose
}

/// Front-facing jumping jack at progress `t` (0 = arms down and feet together,
/// 1 = arms overhead and feet twice hip width apart)
pub fn jumping_jack_pose(t: f64) -> LandmarkSet {
    let mut pose = base_pose();
    let theta = (t * 180.0).to_radians();
    for (side, outward) in [(Side::Left, -1.0), (Side::Right, 1.0)] {
        let shoulder = Point2::new(0.5 + outward * 0.05, 0.3);
        let direction = Point2::new(outward * theta.sin(), theta.cos());
        place(&mut pose, side.shoulder(), shoulder);
        place(&mut pose, side.elbow(), shoulder + direction * 0.12);
        place(&mut pose, side.wrist(), shoulder + direction * 0.24);
        place(&mut pose, side.hip(), Point2::new(0.5 + outward * 0.03, 0.55));
        place(
            &mut pose,
            side.ankle(),
            Point2::new(0.5 + outward * 0.03 * (1.0 + t), 0.9),
        );
    }
    pose
}

/// Angles from `from` to `to` inclusive, `step` degrees apart
pub fn sweep(from: f64, to: f64, step: f64) -> Vec<f64> {
    let count = ((from - to).abs() / step).round() as usize;
    let direction = if to < from { -1.0 } else { 1.0 };
    (0..=count)
        .map(|i| (i as f64).mul_add(step * direction, from))
        .collect()
}

/// One full flex rep: straight, close to `bottom`, hold, open, straight again
pub fn flex_rep(top: f64, bottom: f64) -> Vec<f64> {
    let mut angles = vec![top; 5];
    angles.extend(sweep(top - 5.0, bottom, 5.0));
    angles.extend(vec![bottom; 6]);
    angles.extend(sweep(bottom + 5.0, top, 5.0));
    angles.extend(vec![top; 6]);
    angles
}

/// Feed each pose to the analyzer and collect the results
pub fn run<I>(analyzer: &mut dyn ExerciseAnalyzer, poses: I, dt: f64) -> Vec<AnalysisResult>
where
    I: IntoIterator<Item = LandmarkSet>,
{
    poses
        .into_iter()
        .map(|pose| analyzer.analyze(&pose, dt))
        .collect()
}

/// Phase names in order with consecutive duplicates removed
pub fn phase_trace(results: &[AnalysisResult]) -> Vec<&'static str> {
    let mut trace: Vec<&'static str> = Vec::new();
    for result in results {
        if trace.last() != Some(&result.phase) {
            trace.push(result.phase);
        }
    }
    trace
}

/// Default settings with immediate, multi-item feedback delivery
pub fn eager_settings() -> AnalyzerSettings {
    AnalyzerSettings {
        feedback: FeedbackSettings {
            max_items: 3,
            min_frame_gap: 0,
            ..FeedbackSettings::default()
        },
        ..AnalyzerSettings::default()
    }
}
