// ABOUTME: Squat analyzer - knee flex cycle with back lean and knee tracking checks
// ABOUTME: Counts reps from the averaged knee angle and coaches depth, torso angle and knee path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_pose_core::constants::squat::KNEE_TRACKING_FRAMES;
use pierre_pose_core::geometry;
use pierre_pose_core::{ExerciseKind, FeedbackPriority, LandmarkId, LandmarkSet};

use super::flex_cycle::{FlexBands, FlexCycle, FlexSignals, FlexTransition};
use crate::analyzer::{
    sanitize_dt, visible_points, AnalysisResult, AnalyzerCore, ExerciseAnalyzer, Metrics,
};
use crate::config::{AnalyzerSettings, SquatThresholds};
use crate::smoothing::{FrameStreak, SmoothingWindow};

const FALSE_START: &str = "Lower yourself into a proper squat";
const GOOD_FORM: &str = "Good form! Keep it up";
const TOO_DEEP: &str = "You're squatting too deep, raise slightly";
const NOT_DEEP_ENOUGH: &str = "Lower your hips more for a proper squat";
const LEAN_MORE: &str = "Lean forward slightly to maintain balance";
const LEAN_LESS: &str = "Keep your back more upright";
const KNEES_BOTH: &str = "Keep your knees in line with your toes";
const KNEE_LEFT: &str = "Keep your left knee in line with your toes";
const KNEE_RIGHT: &str = "Keep your right knee in line with your toes";

const JOINTS: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftKnee,
    LandmarkId::RightKnee,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

/// Bodyweight squat analyzer
#[derive(Debug, Clone)]
pub struct SquatAnalyzer {
    core: AnalyzerCore,
    thresholds: SquatThresholds,
    cycle: FlexCycle,
    knee_angles: SmoothingWindow,
    back_angles: SmoothingWindow,
    previous: Option<f64>,
    rep_min: f64,
    tracking: FrameStreak,
}

impl SquatAnalyzer {
    /// Create a squat analyzer
    #[must_use]
    pub fn new(thresholds: SquatThresholds, settings: &AnalyzerSettings) -> Self {
        Self {
            core: AnalyzerCore::new(ExerciseKind::Squat, settings),
            thresholds,
            cycle: FlexCycle::default(),
            knee_angles: SmoothingWindow::new(settings.smoothing_window),
            back_angles: SmoothingWindow::new(settings.smoothing_window),
            previous: None,
            rep_min: geometry::STRAIGHT_ANGLE,
            tracking: FrameStreak::default(),
        }
    }

    const fn bands(&self) -> FlexBands {
        FlexBands {
            start: self.thresholds.start_angle,
            commit: self.thresholds.commit_angle,
            release: self.thresholds.start_angle,
        }
    }

    fn check_depth(&mut self) {
        if self.rep_min < self.thresholds.too_deep_angle {
            self.core.flag(TOO_DEEP, FeedbackPriority::Medium);
        } else if self.rep_min > self.thresholds.not_deep_enough_angle {
            self.core.flag(NOT_DEEP_ENOUGH, FeedbackPriority::High);
        }
    }

    fn check_form(&mut self, back_angle: f64, left_ratio: f64, right_ratio: f64) {
        if back_angle < self.thresholds.min_back_lean_degrees {
            self.core.flag(LEAN_MORE, FeedbackPriority::Medium);
        } else if back_angle > self.thresholds.max_back_lean_degrees {
            self.core.flag(LEAN_LESS, FeedbackPriority::High);
        }

        let left_off = left_ratio > self.thresholds.knee_tracking_ratio;
        let right_off = right_ratio > self.thresholds.knee_tracking_ratio;
        if self
            .tracking
            .reached(left_off || right_off, KNEE_TRACKING_FRAMES)
        {
            match (left_off, right_off) {
                (true, true) => self.core.flag(KNEES_BOTH, FeedbackPriority::High),
                (true, false) => self.core.flag(KNEE_LEFT, FeedbackPriority::Medium),
                _ => self.core.flag(KNEE_RIGHT, FeedbackPriority::Medium),
            }
            self.tracking.reset();
        }
    }
}

impl ExerciseAnalyzer for SquatAnalyzer {
    fn analyze(&mut self, landmarks: &LandmarkSet, dt_seconds: f64) -> AnalysisResult {
        let threshold = self.core.visibility_threshold();
        let Some([l_shoulder, r_shoulder, l_hip, r_hip, l_knee, r_knee, l_ankle, r_ankle]) =
            visible_points(landmarks, JOINTS, threshold)
        else {
            let phase = self.phase_name();
            let missing = self.core.missing_landmarks(landmarks);
            return self.core.reject_frame(missing, phase);
        };
        let dt = sanitize_dt(dt_seconds);

        let left_knee = geometry::angle(l_hip, l_knee, l_ankle);
        let right_knee = geometry::angle(r_hip, r_knee, r_ankle);
        let knee_angle = self.knee_angles.push((left_knee + right_knee) / 2.0);
        let back_angle = self.back_angles.push(geometry::vertical_angle(
            geometry::midpoint(l_hip, r_hip),
            geometry::midpoint(l_shoulder, r_shoulder),
        ));
        let left_ratio = geometry::tracking_ratio(l_knee, l_ankle, l_hip);
        let right_ratio = geometry::tracking_ratio(r_knee, r_ankle, r_hip);

        if self.cycle.is_active() {
            self.rep_min = self.rep_min.min(knee_angle);
        }
        let signals = FlexSignals::from_angle(knee_angle, self.previous, self.bands());
        self.previous = Some(knee_angle);

        match self.cycle.step(signals) {
            Some(FlexTransition::Started) => {
                self.core.begin_rep();
                self.rep_min = knee_angle;
                self.tracking.reset();
            }
            Some(FlexTransition::FalseStart) => {
                self.core.abandon_rep();
                self.core.note(FALSE_START, FeedbackPriority::Medium);
            }
            Some(FlexTransition::ReachedHold) => self.check_depth(),
            Some(FlexTransition::Completed) => {
                if self.core.complete_rep() && !self.core.had_issue() {
                    self.core.note(GOOD_FORM, FeedbackPriority::Low);
                }
            }
            Some(FlexTransition::Committed | FlexTransition::Releasing) | None => {}
        }

        if self.cycle.is_active() {
            self.core.add_active_time(dt);
            self.check_form(back_angle, left_ratio, right_ratio);
        }

        let mut metrics = Metrics::new();
        metrics.insert("knee_angle", knee_angle.into());
        metrics.insert("left_knee_angle", left_knee.into());
        metrics.insert("right_knee_angle", right_knee.into());
        metrics.insert("back_angle", back_angle.into());
        metrics.insert("left_knee_tracking", left_ratio.into());
        metrics.insert("right_knee_tracking", right_ratio.into());
        metrics.insert("depth_angle", self.rep_min.into());
        let phase = self.phase_name();
        self.core.finish(phase, metrics)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.cycle.reset();
        self.knee_angles.clear();
        self.back_angles.clear();
        self.previous = None;
        self.rep_min = geometry::STRAIGHT_ANGLE;
        self.tracking.reset();
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
