// ABOUTME: Pushup analyzer - elbow flex cycle with body-line, elbow flare and neck checks
// ABOUTME: Signed hip offset from the ankle-shoulder line separates sagging from piking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_pose_core::constants::pushup::{
    ELBOW_TARGET_DEGREES, STRAIGHTNESS_FRAMES, STRAIGHTNESS_SENSITIVITY,
};
use pierre_pose_core::geometry;
use pierre_pose_core::{ExerciseKind, FeedbackPriority, LandmarkId, LandmarkSet};

use super::flex_cycle::{FlexBands, FlexCycle, FlexSignals, FlexTransition};
use crate::analyzer::{
    sanitize_dt, visible_points, AnalysisResult, AnalyzerCore, ExerciseAnalyzer, Metrics,
};
use crate::config::{AnalyzerSettings, PushupThresholds};
use crate::smoothing::{FrameStreak, SmoothingWindow};

const FALSE_START: &str = "Lower yourself into a proper pushup";
const GOOD_FORM: &str = "Excellent pushup form!";
const NOT_LOW_ENOUGH: &str = "Lower your chest closer to the ground";
const HIPS_SAG: &str = "Keep your hips up, avoid sagging";
const HIPS_PIKE: &str = "Lower your hips, avoid piking";
const ELBOWS_FLARED: &str = "Keep your elbows closer to your body";
const ELBOWS_TUCKED: &str = "Let your elbows angle out slightly from your body";
const NECK: &str = "Keep your neck neutral, look at the floor ahead of you";
const BODY_LINE: &str = "Maintain a straight line from head to heels";

const JOINTS: [LandmarkId; 10] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftElbow,
    LandmarkId::RightElbow,
    LandmarkId::LeftWrist,
    LandmarkId::RightWrist,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

#[derive(Debug, Clone, Copy)]
struct BodyLine {
    hip_offset_percent: f64,
    straightness: f64,
    neck_angle: Option<f64>,
}

/// Standard pushup analyzer
#[derive(Debug, Clone)]
pub struct PushupAnalyzer {
    core: AnalyzerCore,
    thresholds: PushupThresholds,
    cycle: FlexCycle,
    elbow_angles: SmoothingWindow,
    upper_arm_angles: SmoothingWindow,
    hip_offsets: SmoothingWindow,
    previous: Option<f64>,
    rep_min: f64,
    crooked: FrameStreak,
}

impl PushupAnalyzer {
    /// Create a pushup analyzer
    #[must_use]
    pub fn new(thresholds: PushupThresholds, settings: &AnalyzerSettings) -> Self {
        Self {
            core: AnalyzerCore::new(ExerciseKind::Pushup, settings),
            thresholds,
            cycle: FlexCycle::default(),
            elbow_angles: SmoothingWindow::new(settings.smoothing_window),
            upper_arm_angles: SmoothingWindow::new(settings.smoothing_window),
            hip_offsets: SmoothingWindow::new(settings.smoothing_window),
            previous: None,
            rep_min: geometry::STRAIGHT_ANGLE,
            crooked: FrameStreak::default(),
        }
    }

    const fn bands(&self) -> FlexBands {
        FlexBands {
            start: self.thresholds.start_angle,
            commit: self.thresholds.commit_angle,
            release: self.thresholds.start_angle,
        }
    }

    fn check_form(&mut self, line: BodyLine, upper_arm_angle: f64) {
        let limit = self.thresholds.hip_offset_percent;
        if line.hip_offset_percent > limit {
            self.core.flag(HIPS_SAG, FeedbackPriority::High);
        } else if line.hip_offset_percent < -limit {
            self.core.flag(HIPS_PIKE, FeedbackPriority::Medium);
        }

        let flare = upper_arm_angle - ELBOW_TARGET_DEGREES;
        if flare > self.thresholds.elbow_flare_degrees {
            self.core.flag(ELBOWS_FLARED, FeedbackPriority::Medium);
        } else if flare < -self.thresholds.elbow_flare_degrees {
            self.core.flag(ELBOWS_TUCKED, FeedbackPriority::Low);
        }

        if line
            .neck_angle
            .is_some_and(|angle| angle > self.thresholds.neck_alignment_degrees)
        {
            self.core.flag(NECK, FeedbackPriority::Low);
        }

        let crooked = line.straightness < self.thresholds.min_straightness;
        if self.crooked.reached(crooked, STRAIGHTNESS_FRAMES) {
            self.core.flag(BODY_LINE, FeedbackPriority::High);
            self.crooked.reset();
        }
    }
}

impl ExerciseAnalyzer for PushupAnalyzer {
    fn analyze(&mut self, landmarks: &LandmarkSet, dt_seconds: f64) -> AnalysisResult {
        let threshold = self.core.visibility_threshold();
        let Some(
            [l_shoulder, r_shoulder, l_elbow, r_elbow, l_wrist, r_wrist, l_hip, r_hip, l_ankle, r_ankle],
        ) = visible_points(landmarks, JOINTS, threshold)
        else {
            let phase = self.phase_name();
            let missing = self.core.missing_landmarks(landmarks);
            return self.core.reject_frame(missing, phase);
        };
        let dt = sanitize_dt(dt_seconds);

        let shoulder = geometry::midpoint(l_shoulder, r_shoulder);
        let hip = geometry::midpoint(l_hip, r_hip);
        let ankle = geometry::midpoint(l_ankle, r_ankle);

        let left_elbow = geometry::angle(l_shoulder, l_elbow, l_wrist);
        let right_elbow = geometry::angle(r_shoulder, r_elbow, r_wrist);
        let elbow_angle = self.elbow_angles.push((left_elbow + right_elbow) / 2.0);
        let upper_arm_angle = self.upper_arm_angles.push(
            (geometry::angle(l_elbow, l_shoulder, l_hip) + geometry::angle(r_elbow, r_shoulder, r_hip))
                / 2.0,
        );
        let line = BodyLine {
            hip_offset_percent: self
                .hip_offsets
                .push(geometry::signed_line_offset(hip, ankle, shoulder) * 100.0),
            straightness: geometry::line_straightness(
                ankle,
                hip,
                shoulder,
                STRAIGHTNESS_SENSITIVITY,
            ),
            neck_angle: landmarks
                .visible_point(LandmarkId::Nose, threshold)
                .map(|nose| geometry::angle_between(shoulder - hip, nose - shoulder)),
        };

        if self.cycle.is_active() {
            self.rep_min = self.rep_min.min(elbow_angle);
        }
        let signals = FlexSignals::from_angle(elbow_angle, self.previous, self.bands());
        self.previous = Some(elbow_angle);

        match self.cycle.step(signals) {
            Some(FlexTransition::Started) => {
                self.core.begin_rep();
                self.rep_min = elbow_angle;
                self.crooked.reset();
            }
            Some(FlexTransition::FalseStart) => {
                self.core.abandon_rep();
                self.core.note(FALSE_START, FeedbackPriority::Medium);
            }
            Some(FlexTransition::ReachedHold) => {
                if self.rep_min > self.thresholds.not_low_enough_angle {
                    self.core.flag(NOT_LOW_ENOUGH, FeedbackPriority::Medium);
                }
            }
            Some(FlexTransition::Completed) => {
                if self.core.complete_rep() && !self.core.had_issue() {
                    self.core.note(GOOD_FORM, FeedbackPriority::Low);
                }
            }
            Some(FlexTransition::Committed | FlexTransition::Releasing) | None => {}
        }

        if self.cycle.is_active() {
            self.core.add_active_time(dt);
            self.check_form(line, upper_arm_angle);
        }

        let mut metrics = Metrics::new();
        metrics.insert("elbow_angle", elbow_angle.into());
        metrics.insert("upper_arm_angle", upper_arm_angle.into());
        metrics.insert("hip_offset_percent", line.hip_offset_percent.into());
        metrics.insert("straightness", line.straightness.into());
        if let Some(neck) = line.neck_angle {
            metrics.insert("neck_angle", neck.into());
        }
        metrics.insert("depth_angle", self.rep_min.into());
        let phase = self.phase_name();
        self.core.finish(phase, metrics)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.cycle.reset();
        self.elbow_angles.clear();
        self.upper_arm_angles.clear();
        self.hip_offsets.clear();
        self.previous = None;
        self.rep_min = geometry::STRAIGHT_ANGLE;
        self.crooked.reset();
    }

    fn phase_name(&self) -> &'static str {
        self.cycle.phase().as_str()
    }

    fn core(&self) -> &AnalyzerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnalyzerCore {
        &mut self.core
    }
}
