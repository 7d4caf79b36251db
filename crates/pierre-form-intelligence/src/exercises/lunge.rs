// ABOUTME: Lunge analyzer - front-knee flex cycle gated by the back knee
// ABOUTME: Front leg re-selection, torso lean direction, knee tracking, back thigh and stance stability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Lunge analysis
//!
//! The front leg is whichever knee is more bent while Idle and stays fixed
//! for the rest of the rep. A rep commits only when both knees have closed
//! past their commit angles and completes only once both are straight again.
//! Torso lean direction is judged against the facing direction, taken from
//! which side of the back ankle the front ankle sits on.

use pierre_pose_core::constants::lunge::{BACK_THIGH_VERTICAL_DEGREES, ISSUE_FRAMES};
use pierre_pose_core::constants::smoothing::EMA_RETAIN;
use pierre_pose_core::geometry;
use pierre_pose_core::{ExerciseKind, FeedbackPriority, LandmarkId, LandmarkSet, Point2, Side};

use super::flex_cycle::{FlexBands, FlexCycle, FlexSignals, FlexTransition};
use crate::analyzer::{
    sanitize_dt, visible_points, AnalysisResult, AnalyzerCore, ExerciseAnalyzer, Metrics,
};
use crate::config::{AnalyzerSettings, LungeThresholds};
use crate::smoothing::{ExponentialSmoother, FrameStreak, SmoothingWindow};

const FALSE_START: &str = "Complete the lunge movement by lowering your body";
const GOOD_FORM: &str = "Great lunge form!";
const FRONT_TOO_HIGH: &str = "Bend your front knee more";
const FRONT_TOO_DEEP: &str = "Don't bend your front knee too much";
const BACK_TOO_HIGH: &str = "Lower your back knee more";
const BACK_TOO_LOW: &str = "Keep your back knee slightly off the ground";
const LEAN_FORWARD: &str = "Don't lean too far forward";
const LEAN_BACK: &str = "Don't lean back";
const LEFT_KNEE_TRACKING: &str = "Keep your left knee aligned over your ankle";
const RIGHT_KNEE_TRACKING: &str = "Keep your right knee aligned over your ankle";
const BACK_THIGH: &str = "Point your back knee toward the floor";
const STANCE: &str = "Keep a stable stance width";

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

#[derive(Debug, Clone, Copy)]
struct Leg {
    hip: Point2,
    knee: Point2,
    ankle: Point2,
}

impl Leg {
    fn knee_angle(&self) -> f64 {
        geometry::angle(self.hip, self.knee, self.ankle)
    }
}

/// Forward lunge analyzer
#[derive(Debug, Clone)]
pub struct LungeAnalyzer {
    core: AnalyzerCore,
    thresholds: LungeThresholds,
    cycle: FlexCycle,
    front: Side,
    left_angles: SmoothingWindow,
    right_angles: SmoothingWindow,
    previous: Option<(f64, f64)>,
    front_min: f64,
    back_min: f64,
    start_stance: Option<f64>,
    stability: ExponentialSmoother,
    tracking: FrameStreak,
    back_thigh: FrameStreak,
    unstable: FrameStreak,
}

impl LungeAnalyzer {
    /// Create a lunge analyzer
    #[must_use]
    pub fn new(thresholds: LungeThresholds, settings: &AnalyzerSettings) -> Self {
        Self {
            core: AnalyzerCore::new(ExerciseKind::Lunge, settings),
            thresholds,
            cycle: FlexCycle::default(),
            front: Side::Left,
            left_angles: SmoothingWindow::new(settings.smoothing_window),
            right_angles: SmoothingWindow::new(settings.smoothing_window),
            previous: None,
            front_min: geometry::STRAIGHT_ANGLE,
            back_min: geometry::STRAIGHT_ANGLE,
            start_stance: None,
            stability: ExponentialSmoother::new(EMA_RETAIN, 1.0),
            tracking: FrameStreak::default(),
            back_thigh: FrameStreak::default(),
            unstable: FrameStreak::default(),
        }
    }

    /// Leg currently treated as the front leg
    #[must_use]
    pub const fn front_side(&self) -> Side {
        self.front
    }

    const fn bands(&self) -> FlexBands {
        FlexBands {
            start: self.thresholds.start_angle,
            commit: self.thresholds.front_commit_angle,
            release: self.thresholds.start_angle,
        }
    }

    fn signals(&self, front_angle: f64, back_angle: f64) -> FlexSignals {
        let previous = self.previous.map(|(left, right)| match self.front {
            Side::Left => left,
            Side::Right => right,
        });
        let mut signals = FlexSignals::from_angle(front_angle, previous, self.bands());
        signals.committed &= back_angle < self.thresholds.back_commit_angle;
        signals.returned &= back_angle >= self.thresholds.start_angle;
        signals
    }

    fn check_depth(&mut self) {
        let t = &self.thresholds;
        let front = if self.front_min > t.front_knee_max_angle {
            Some((FRONT_TOO_HIGH, FeedbackPriority::High))
        } else if self.front_min < t.front_knee_min_angle {
            Some((FRONT_TOO_DEEP, FeedbackPriority::Medium))
        } else {
            None
        };
        let back = if self.back_min > t.back_knee_max_angle {
            Some((BACK_TOO_HIGH, FeedbackPriority::Medium))
        } else if self.back_min < t.back_knee_min_angle {
            Some((BACK_TOO_LOW, FeedbackPriority::Low))
        } else {
            None
        };
        for (message, priority) in front.into_iter().chain(back) {
            self.core.flag(message, priority);
        }
    }

    fn check_form(&mut self, front: Leg, back: Leg, torso_angle: f64, stability: f64) {
        if torso_angle.abs() > self.thresholds.torso_lean_degrees {
            let facing = front.ankle.x - back.ankle.x;
            if torso_angle * facing > 0.0 {
                self.core.flag(LEAN_FORWARD, FeedbackPriority::High);
            } else {
                self.core.flag(LEAN_BACK, FeedbackPriority::High);
            }
        }

        let off_track = geometry::tracking_ratio(front.knee, front.ankle, front.hip)
            > self.thresholds.knee_tracking_ratio;
        if self.tracking.reached(off_track, ISSUE_FRAMES) {
            let message = match self.front {
                Side::Left => LEFT_KNEE_TRACKING,
                Side::Right => RIGHT_KNEE_TRACKING,
            };
            self.core.flag(message, FeedbackPriority::High);
            self.tracking.reset();
        }

        let thigh_deviation =
            geometry::STRAIGHT_ANGLE - geometry::vertical_angle(back.hip, back.knee);
        if self
            .back_thigh
            .reached(thigh_deviation > BACK_THIGH_VERTICAL_DEGREES, ISSUE_FRAMES)
        {
            self.core.flag(BACK_THIGH, FeedbackPriority::Medium);
            self.back_thigh.reset();
        }

        if self
            .unstable
            .reached(stability < self.thresholds.min_stance_stability, ISSUE_FRAMES)
        {
            self.core.flag(STANCE, FeedbackPriority::Medium);
            self.unstable.reset();
        }
    }

    fn update_stability(&mut self, stance: f64) -> f64 {
        let Some(start) = self.start_stance else {
            return self.stability.value();
        };
        let widest = start.max(stance);
        let ratio = if widest > f64::EPSILON {
            start.min(stance) / widest
        } else {
            1.0
        };
        self.stability.update(ratio)
    }
}

impl ExerciseAnalyzer for LungeAnalyzer {
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

        let left = Leg {
            hip: l_hip,
            knee: l_knee,
            ankle: l_ankle,
        };
        let right = Leg {
            hip: r_hip,
            knee: r_knee,
            ankle: r_ankle,
        };
        let left_angle = self.left_angles.push(left.knee_angle());
        let right_angle = self.right_angles.push(right.knee_angle());
        if !self.cycle.is_active() {
            self.front = if right_angle < left_angle {
                Side::Right
            } else {
                Side::Left
            };
        }
        let (front, back, front_angle, back_angle) = match self.front {
            Side::Left => (left, right, left_angle, right_angle),
            Side::Right => (right, left, right_angle, left_angle),
        };
        let torso_angle = geometry::signed_vertical_angle(
            geometry::midpoint(l_hip, r_hip),
            geometry::midpoint(l_shoulder, r_shoulder),
        );
        let stance = geometry::distance(l_ankle, r_ankle);

        if self.cycle.is_active() {
            self.front_min = self.front_min.min(front_angle);
            self.back_min = self.back_min.min(back_angle);
        }
        let signals = self.signals(front_angle, back_angle);
        self.previous = Some((left_angle, right_angle));

        match self.cycle.step(signals) {
            Some(FlexTransition::Started) => {
                self.core.begin_rep();
                self.front_min = front_angle;
                self.back_min = back_angle;
                self.start_stance = Some(stance);
                self.stability.reset();
                self.tracking.reset();
                self.back_thigh.reset();
                self.unstable.reset();
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

        let stability = self.update_stability(stance);
        if self.cycle.is_active() {
            self.core.add_active_time(dt);
            self.check_form(front, back, torso_angle, stability);
        }

        let mut metrics = Metrics::new();
        metrics.insert("front_knee_angle", front_angle.into());
        metrics.insert("back_knee_angle", back_angle.into());
        metrics.insert("torso_angle", torso_angle.into());
        metrics.insert("stance_stability", stability.into());
        metrics.insert("front_leg", self.front.as_str().into());
        metrics.insert("front_depth_angle", self.front_min.into());
        metrics.insert("back_depth_angle", self.back_min.into());
        let phase = self.phase_name();
        self.core.finish(phase, metrics)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.cycle.reset();
        self.front = Side::Left;
        self.left_angles.clear();
        self.right_angles.clear();
        self.previous = None;
        self.front_min = geometry::STRAIGHT_ANGLE;
        self.back_min = geometry::STRAIGHT_ANGLE;
        self.start_stance = None;
        self.stability.reset();
        self.tracking.reset();
        self.back_thigh.reset();
        self.unstable.reset();
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
