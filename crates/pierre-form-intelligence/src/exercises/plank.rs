// ABOUTME: Plank analyzer - timed hold driven by body-line alignment with hysteresis
// ABOUTME: Tracks hold time, violation timers, head and elbow position and movement stability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plank analysis
//!
//! There is no flex angle. Phases follow the straightness of the
//! ankle-hip-shoulder line and the signed hip offset from it (positive when
//! the hips sag below the line). Entry needs a better body line than staying
//! in does, so a plank wobbling around one threshold does not flicker between
//! phases. Transitions read the raw per-frame values; coaching reads the
//! smoothed ones.
//!
//! A completed hold counts as a rep only if it lasted at least
//! `min_hold_seconds` of Holding time.

use pierre_pose_core::constants::plank::{
    ALIGNMENT_SENSITIVITY, GOOD_FORM_ALIGNMENT, GOOD_FORM_HEAD_DEGREES, GOOD_FORM_HIP_OFFSET,
    HEAD_SEVERE_DEGREES, HIP_VIOLATION_OFFSET, MIN_STABILITY, MISALIGNMENT_SCORE,
    STABILITY_HISTORY, STABILITY_SCALE,
};
use pierre_pose_core::constants::smoothing::EMA_RETAIN;
use pierre_pose_core::geometry;
use pierre_pose_core::{ExerciseKind, FeedbackPriority, LandmarkId, LandmarkSet, Point2};
use tracing::debug;

use crate::analyzer::{
    sanitize_dt, visible_points, AnalysisResult, AnalyzerCore, ExerciseAnalyzer, Metrics,
};
use crate::config::{AnalyzerSettings, PlankThresholds};
use crate::smoothing::{ExponentialSmoother, SmoothingWindow};

const SETTLED: &str = "Good plank position, hold steady";
const GOOD_FORM: &str = "Excellent plank form, keep it up!";
const HIPS_SAG: &str = "Lift your hips up, don't let them sag";
const HIPS_PIKE: &str = "Lower your hips, don't pike up";
const BODY_LINE: &str = "Keep your body in a straight line";
const ELBOWS: &str = "Position your elbows directly under your shoulders";
const HEAD_UP: &str = "Don't look up, keep your neck neutral";
const HEAD_DOWN: &str = "Don't look down, keep your neck neutral";
const UNSTEADY: &str = "Try to hold more steady, minimize movement";

const JOINTS: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftElbow,
    LandmarkId::RightElbow,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

/// Plank phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlankPhase {
    /// Not in plank position
    #[default]
    Idle,
    /// Getting into position
    Starting,
    /// Holding with an acceptable body line
    Holding,
    /// Body line breaking down
    Ending,
}

impl PlankPhase {
    /// snake_case label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Holding => "holding",
            Self::Ending => "ending",
        }
    }
}

/// Seconds spent Holding with each form problem
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViolationTimers {
    /// Hips below the body line
    pub sag_seconds: f64,
    /// Hips above the body line
    pub pike_seconds: f64,
    /// Body line not straight
    pub misaligned_seconds: f64,
    /// Head out of line with the spine
    pub head_seconds: f64,
    /// Everything within the good-form band
    pub good_form_seconds: f64,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    alignment: f64,
    hip_offset: f64,
    head_angle: Option<f64>,
    elbow_alignment: f64,
}

/// Forearm plank analyzer
#[derive(Debug, Clone)]
pub struct PlankAnalyzer {
    core: AnalyzerCore,
    thresholds: PlankThresholds,
    phase: PlankPhase,
    hold_seconds: f64,
    violations: ViolationTimers,
    alignments: SmoothingWindow,
    hip_offsets: SmoothingWindow,
    head_angles: SmoothingWindow,
    movements: SmoothingWindow,
    last_position: Option<(Point2, Point2)>,
    stability: ExponentialSmoother,
}

impl PlankAnalyzer {
    /// Create a plank analyzer
    #[must_use]
    pub fn new(thresholds: PlankThresholds, settings: &AnalyzerSettings) -> Self {
        Self {
            core: AnalyzerCore::new(ExerciseKind::Plank, settings),
            thresholds,
            phase: PlankPhase::Idle,
            hold_seconds: 0.0,
            violations: ViolationTimers::default(),
            alignments: SmoothingWindow::new(settings.smoothing_window),
            hip_offsets: SmoothingWindow::new(settings.smoothing_window),
            head_angles: SmoothingWindow::new(settings.smoothing_window),
            movements: SmoothingWindow::new(STABILITY_HISTORY - 1),
            last_position: None,
            stability: ExponentialSmoother::new(EMA_RETAIN, 1.0),
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> PlankPhase {
        self.phase
    }

    /// Holding time of the current or most recent hold
    #[must_use]
    pub const fn hold_seconds(&self) -> f64 {
        self.hold_seconds
    }

    /// Violation timers since the last reset
    #[must_use]
    pub const fn violations(&self) -> ViolationTimers {
        self.violations
    }

    fn transition(&mut self, alignment: f64, hip_offset: f64) {
        let t = &self.thresholds;
        let hip = hip_offset.abs();
        let holds = alignment >= t.hold_alignment && hip < t.hold_hip_offset;
        let breaks = alignment < t.break_alignment || hip > t.break_hip_offset;
        let next = match self.phase {
            PlankPhase::Idle if alignment >= t.start_alignment && hip < t.start_hip_offset => {
                PlankPhase::Starting
            }
            PlankPhase::Starting if holds => PlankPhase::Holding,
            PlankPhase::Starting if breaks => PlankPhase::Idle,
            PlankPhase::Holding if breaks => PlankPhase::Ending,
            PlankPhase::Ending if alignment < t.end_alignment || hip > t.end_hip_offset => {
                PlankPhase::Idle
            }
            PlankPhase::Ending if holds => PlankPhase::Holding,
            current => current,
        };
        if next == self.phase {
            return;
        }
        debug!(from = self.phase.as_str(), to = next.as_str(), "Plank phase");

        match (self.phase, next) {
            (PlankPhase::Idle, PlankPhase::Starting) => {
                self.core.begin_rep();
                self.hold_seconds = 0.0;
            }
            (PlankPhase::Starting, PlankPhase::Holding) => {
                self.core.note(SETTLED, FeedbackPriority::Low);
            }
            (PlankPhase::Ending, PlankPhase::Idle) => {
                if self.hold_seconds >= self.thresholds.min_hold_seconds {
                    self.core.complete_rep();
                } else {
                    self.core.abandon_rep();
                }
            }
            (PlankPhase::Starting, PlankPhase::Idle) => self.core.abandon_rep(),
            _ => {}
        }
        self.phase = next;
    }

    fn track_time(&mut self, dt: f64, frame: Frame) {
        self.core.add_active_time(dt);
        self.hold_seconds += dt;

        let head = frame.head_angle.map_or(0.0, f64::abs);
        let v = &mut self.violations;
        if frame.hip_offset > HIP_VIOLATION_OFFSET {
            v.sag_seconds += dt;
        } else if frame.hip_offset < -HIP_VIOLATION_OFFSET {
            v.pike_seconds += dt;
        }
        if frame.alignment < MISALIGNMENT_SCORE {
            v.misaligned_seconds += dt;
        }
        if head > self.thresholds.head_alignment_degrees {
            v.head_seconds += dt;
        }
        if frame.alignment >= GOOD_FORM_ALIGNMENT
            && frame.hip_offset.abs() < GOOD_FORM_HIP_OFFSET
            && head < GOOD_FORM_HEAD_DEGREES
        {
            v.good_form_seconds += dt;
        }
    }

    fn coach(&mut self, frame: Frame, stability: f64) {
        let limit = self.thresholds.hip_feedback_offset;
        let mut issues: Vec<(&str, FeedbackPriority)> = Vec::new();
        if frame.hip_offset > limit {
            issues.push((HIPS_SAG, FeedbackPriority::High));
        } else if frame.hip_offset < -limit {
            issues.push((HIPS_PIKE, FeedbackPriority::High));
        }
        if frame.alignment < self.thresholds.start_alignment {
            issues.push((BODY_LINE, FeedbackPriority::Medium));
        }
        if frame.elbow_alignment < self.thresholds.min_elbow_alignment {
            issues.push((ELBOWS, FeedbackPriority::Medium));
        }
        if let Some(head) = frame.head_angle {
            if head > HEAD_SEVERE_DEGREES {
                issues.push((HEAD_UP, FeedbackPriority::Low));
            } else if head < -HEAD_SEVERE_DEGREES {
                issues.push((HEAD_DOWN, FeedbackPriority::Low));
            }
        }
        if stability < MIN_STABILITY {
            issues.push((UNSTEADY, FeedbackPriority::Low));
        }

        // Praise only frames with nothing to correct
        if issues.is_empty() {
            if self.phase == PlankPhase::Holding {
                self.core.note(GOOD_FORM, FeedbackPriority::Low);
            }
            return;
        }
        for (message, priority) in issues {
            self.core.flag(message, priority);
        }
    }

    fn update_stability(&mut self, shoulder: Point2, hip: Point2) -> f64 {
        if let Some((last_shoulder, last_hip)) = self.last_position {
            let movement =
                geometry::distance(last_shoulder, shoulder) + geometry::distance(last_hip, hip);
            let average = self.movements.push(movement);
            let raw = 1.0 - (average * STABILITY_SCALE).min(1.0);
            self.stability.update(raw);
        }
        self.last_position = Some((shoulder, hip));
        self.stability.value()
    }
}

/// Head deviation from the spine direction in degrees, positive when raised
fn head_angle(nose: Point2, shoulder: Point2, hip: Point2) -> f64 {
    let spine = geometry::signed_horizontal_angle(hip, shoulder);
    let neck = geometry::signed_horizontal_angle(shoulder, nose);
    let mut deviation = neck - spine;
    if deviation > 180.0 {
        deviation -= 360.0;
    } else if deviation <= -180.0 {
        deviation += 360.0;
    }
    // counter-clockwise is upward only when facing +x
    if shoulder.x >= hip.x {
        deviation
    } else {
        -deviation
    }
}

/// How directly each elbow sits under its shoulder, averaged, in [0, 1]
fn elbow_alignment(shoulders: [Point2; 2], elbows: [Point2; 2]) -> f64 {
    let mut total = 0.0;
    for (shoulder, elbow) in shoulders.into_iter().zip(elbows) {
        let vertical = (elbow.y - shoulder.y).abs();
        if vertical < f64::EPSILON {
            return 0.5;
        }
        let lateral = (elbow.x - shoulder.x).abs();
        total += 1.0 - (lateral / vertical * 0.5).min(1.0);
    }
    total / 2.0
}

impl ExerciseAnalyzer for PlankAnalyzer {
    fn analyze(&mut self, landmarks: &LandmarkSet, dt_seconds: f64) -> AnalysisResult {
        let threshold = self.core.visibility_threshold();
        let Some([l_shoulder, r_shoulder, l_elbow, r_elbow, l_hip, r_hip, l_ankle, r_ankle]) =
            visible_points(landmarks, JOINTS, threshold)
        else {
            let phase = self.phase_name();
            let missing = self.core.missing_landmarks(landmarks);
            return self.core.reject_frame(missing, phase);
        };
        let dt = sanitize_dt(dt_seconds);

        let shoulder = geometry::midpoint(l_shoulder, r_shoulder);
        let hip = geometry::midpoint(l_hip, r_hip);
        let ankle = geometry::midpoint(l_ankle, r_ankle);

        let raw_alignment = geometry::line_straightness(ankle, hip, shoulder, ALIGNMENT_SENSITIVITY);
        let raw_hip_offset = geometry::signed_line_offset(hip, ankle, shoulder);
        let raw_head = landmarks
            .visible_point(LandmarkId::Nose, threshold)
            .map(|nose| head_angle(nose, shoulder, hip));

        let smoothed = Frame {
            alignment: self.alignments.push(raw_alignment),
            hip_offset: self.hip_offsets.push(raw_hip_offset),
            head_angle: raw_head.map(|angle| self.head_angles.push(angle)),
            elbow_alignment: elbow_alignment([l_shoulder, r_shoulder], [l_elbow, r_elbow]),
        };
        let stability = self.update_stability(shoulder, hip);

        self.transition(raw_alignment, raw_hip_offset);

        if self.phase == PlankPhase::Holding {
            self.track_time(dt, smoothed);
        }
        if matches!(self.phase, PlankPhase::Starting | PlankPhase::Holding) {
            self.coach(smoothed, stability);
        }

        let v = self.violations;
        let mut metrics = Metrics::new();
        metrics.insert("body_alignment", smoothed.alignment.into());
        metrics.insert("hip_offset", smoothed.hip_offset.into());
        metrics.insert("elbow_alignment", smoothed.elbow_alignment.into());
        metrics.insert("stability", stability.into());
        if let Some(head) = smoothed.head_angle {
            metrics.insert("head_angle", head.into());
        }
        metrics.insert("hold_seconds", self.hold_seconds.into());
        metrics.insert("sag_seconds", v.sag_seconds.into());
        metrics.insert("pike_seconds", v.pike_seconds.into());
        metrics.insert("misaligned_seconds", v.misaligned_seconds.into());
        metrics.insert("head_seconds", v.head_seconds.into());
        metrics.insert("good_form_seconds", v.good_form_seconds.into());
        let phase = self.phase_name();
        self.core.finish(phase, metrics)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.phase = PlankPhase::Idle;
        self.hold_seconds = 0.0;
        self.violations = ViolationTimers::default();
        self.alignments.clear();
        self.hip_offsets.clear();
        self.head_angles.clear();
        self.movements.clear();
        self.last_position = None;
        self.stability.reset();
    }

    fn phase_name(&self) -> &'static str {
        self.phase.as_str()
    }

    fn core(&self) -> &AnalyzerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnalyzerCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_angle_sign_follows_facing_direction() {
        let hip = Point2::new(0.3, 0.5);
        let shoulder = Point2::new(0.6, 0.5);
        assert!(head_angle(Point2::new(0.7, 0.45), shoulder, hip) > 0.0);
        assert!(head_angle(Point2::new(0.7, 0.55), shoulder, hip) < 0.0);

        let hip = Point2::new(0.6, 0.5);
        let shoulder = Point2::new(0.3, 0.5);
        assert!(head_angle(Point2::new(0.2, 0.45), shoulder, hip) > 0.0);
    }

    #[test]
    fn test_elbows_under_shoulders_score_one() {
        let shoulders = [Point2::new(0.3, 0.5), Point2::new(0.31, 0.5)];
        let elbows = [Point2::new(0.3, 0.65), Point2::new(0.31, 0.65)];
        assert!((elbow_alignment(shoulders, elbows) - 1.0).abs() < 1e-12);
    }
}
