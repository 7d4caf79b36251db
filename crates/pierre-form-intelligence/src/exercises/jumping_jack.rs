// ABOUTME: Jumping jack analyzer - composite arm and leg scores drive an up/down cycle
// ABOUTME: Counts reps on the way down, tracks pace consistency and left/right symmetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Jumping jack analysis
//!
//! Two scores in `[0, 1]` replace the flex angle:
//!
//! - arm extension: how far the wrists are raised above the shoulders,
//!   weighted by how straight the arms are, so straight arms at the sides
//!   score 0 and straight arms overhead score 1
//! - leg spread: ankle width relative to hip width, 0 with feet together and
//!   1 at twice the hip width
//!
//! A rep is counted each time both scores fall from the up band to the down
//! band. Rep durations come from the frame clock, not wall time, so replaying
//! the same frames always yields the same pace.

use std::collections::VecDeque;

use pierre_pose_core::constants::jumping_jack::{
    ASYMMETRY_SCALE, FAST_REP_SECONDS, GOOD_FORM_MIN_REPS, ISSUE_FRAMES, PACE_CV_SCALE,
    PACE_FRAMES, PACE_HISTORY, PACE_MIN_REPS, SLOW_REP_SECONDS,
};
use pierre_pose_core::geometry;
use pierre_pose_core::{ExerciseKind, FeedbackPriority, LandmarkId, LandmarkSet, Point2};
use tracing::debug;

use crate::analyzer::{
    sanitize_dt, visible_points, AnalysisResult, AnalyzerCore, ExerciseAnalyzer, Metrics,
};
use crate::config::{AnalyzerSettings, JumpingJackThresholds};
use crate::smoothing::{FrameStreak, SmoothingWindow};

const GOOD_FORM: &str = "Good jumping jack form, keep it up!";
const ARMS: &str = "Extend your arms fully above your head";
const LEGS: &str = "Jump wider with your legs";
const SYMMETRY: &str = "Keep your movements symmetrical on both sides";
const TOO_SLOW: &str = "Try to maintain a faster, consistent pace";
const TOO_FAST: &str = "Slow down slightly for better form";
const UNEVEN_PACE: &str = "Try to maintain a consistent pace";

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

/// Jumping jack phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpingJackPhase {
    /// Waiting for the closed starting stance
    #[default]
    Idle,
    /// Closed stance seen, waiting for the first jump
    Starting,
    /// Arms overhead and legs apart
    ArmsLegsUp,
    /// Arms down and legs together after a jump
    ArmsLegsDown,
}

impl JumpingJackPhase {
    /// snake_case label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::ArmsLegsUp => "arms_legs_up",
            Self::ArmsLegsDown => "arms_legs_down",
        }
    }
}

/// Consistency of rep durations in `[0, 1]`
///
/// `1 - min(1, cv / 0.2)` where `cv` is the coefficient of variation of the
/// durations. Fewer than two durations, or a non-positive mean, read as
/// perfectly consistent.
#[must_use]
pub fn pace_consistency(durations: &[f64]) -> f64 {
    if durations.len() < 2 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = durations.len() as f64;
    let mean = durations.iter().sum::<f64>() / count;
    if mean <= 0.0 {
        return 1.0;
    }
    let variance = durations.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / count;
    let cv = variance.sqrt() / mean;
    1.0 - (cv / PACE_CV_SCALE).min(1.0)
}

fn arm_extension(shoulder: Point2, elbow: Point2, wrist: Point2) -> (f64, f64) {
    let raised = geometry::STRAIGHT_ANGLE - geometry::vertical_angle(shoulder, wrist);
    let straight = geometry::angle(shoulder, elbow, wrist);
    (raised, straight)
}

#[derive(Debug, Clone, Copy, Default)]
struct Scores {
    arms: f64,
    legs: f64,
    symmetry: f64,
}

/// Jumping jack analyzer
#[derive(Debug, Clone)]
pub struct JumpingJackAnalyzer {
    core: AnalyzerCore,
    thresholds: JumpingJackThresholds,
    phase: JumpingJackPhase,
    arm_scores: SmoothingWindow,
    leg_scores: SmoothingWindow,
    symmetry_scores: SmoothingWindow,
    clock: f64,
    last_rep_at: Option<f64>,
    durations: VecDeque<f64>,
    pace: f64,
    clean_reps: u32,
    peak: Scores,
    short_arms: FrameStreak,
    narrow_legs: FrameStreak,
    asymmetric: FrameStreak,
    uneven_pace: FrameStreak,
}

impl JumpingJackAnalyzer {
    /// Create a jumping jack analyzer
    #[must_use]
    pub fn new(thresholds: JumpingJackThresholds, settings: &AnalyzerSettings) -> Self {
        Self {
            core: AnalyzerCore::new(ExerciseKind::JumpingJack, settings),
            thresholds,
            phase: JumpingJackPhase::Idle,
            arm_scores: SmoothingWindow::new(settings.smoothing_window),
            leg_scores: SmoothingWindow::new(settings.smoothing_window),
            symmetry_scores: SmoothingWindow::new(settings.smoothing_window),
            clock: 0.0,
            last_rep_at: None,
            durations: VecDeque::with_capacity(PACE_HISTORY),
            pace: 1.0,
            clean_reps: 0,
            peak: Scores::default(),
            short_arms: FrameStreak::default(),
            narrow_legs: FrameStreak::default(),
            asymmetric: FrameStreak::default(),
            uneven_pace: FrameStreak::default(),
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> JumpingJackPhase {
        self.phase
    }

    /// Most recent rep durations, oldest first
    #[must_use]
    pub fn rep_durations(&self) -> Vec<f64> {
        self.durations.iter().copied().collect()
    }

    fn average_duration(&self) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.durations.len() as f64;
        self.durations.iter().sum::<f64>() / count
    }

    fn transition(&mut self, scores: Scores) {
        let t = &self.thresholds;
        let down = scores.arms < t.down_threshold && scores.legs < t.down_threshold;
        let up = scores.arms > t.up_threshold && scores.legs > t.up_threshold;
        let next = match self.phase {
            JumpingJackPhase::Idle if down => JumpingJackPhase::Starting,
            JumpingJackPhase::Starting | JumpingJackPhase::ArmsLegsDown if up => {
                JumpingJackPhase::ArmsLegsUp
            }
            JumpingJackPhase::ArmsLegsUp if down => JumpingJackPhase::ArmsLegsDown,
            current => current,
        };
        if next == self.phase {
            return;
        }
        debug!(from = self.phase.as_str(), to = next.as_str(), "Jumping jack phase");

        match (self.phase, next) {
            (JumpingJackPhase::Idle, _) => self.core.begin_rep(),
            (JumpingJackPhase::ArmsLegsDown, _) => self.core.continue_rep(),
            (JumpingJackPhase::ArmsLegsUp, _) => self.count_rep(),
            _ => {}
        }
        if next == JumpingJackPhase::ArmsLegsUp {
            self.peak = Scores::default();
        }
        self.phase = next;
    }

    fn count_rep(&mut self) {
        if let Some(previous) = self.last_rep_at {
            if self.durations.len() == PACE_HISTORY {
                self.durations.pop_front();
            }
            self.durations.push_back(self.clock - previous);
            self.pace = pace_consistency(self.durations.make_contiguous());
        }
        self.last_rep_at = Some(self.clock);
        let clean = !self.core.had_issue();
        if self.core.complete_rep() && clean {
            self.clean_reps += 1;
        }
    }

    fn coach(&mut self, scores: Scores) {
        let mut raised = false;
        let at_top = self.phase == JumpingJackPhase::ArmsLegsUp;
        if at_top {
            self.peak.arms = self.peak.arms.max(scores.arms);
            self.peak.legs = self.peak.legs.max(scores.legs);
        }
        // Extension is judged at the top of the jump, not on the way back down
        let arms_at_peak = at_top && scores.arms >= self.peak.arms;
        let legs_at_peak = at_top && scores.legs >= self.peak.legs;

        if self.short_arms.reached(
            arms_at_peak && scores.arms < self.thresholds.min_arm_extension,
            ISSUE_FRAMES,
        ) {
            self.core.flag(ARMS, FeedbackPriority::Medium);
            self.short_arms.reset();
            raised = true;
        }
        if self.narrow_legs.reached(
            legs_at_peak && scores.legs < self.thresholds.min_leg_spread,
            ISSUE_FRAMES,
        ) {
            self.core.flag(LEGS, FeedbackPriority::Medium);
            self.narrow_legs.reset();
            raised = true;
        }
        if self
            .asymmetric
            .reached(scores.symmetry < self.thresholds.min_symmetry, ISSUE_FRAMES)
        {
            self.core.flag(SYMMETRY, FeedbackPriority::Low);
            self.asymmetric.reset();
            raised = true;
        }

        let judged = self.durations.len() >= PACE_MIN_REPS as usize;
        if self.uneven_pace.reached(
            judged && self.pace < self.thresholds.min_pace_consistency,
            PACE_FRAMES,
        ) {
            let average = self.average_duration();
            let message = if average > SLOW_REP_SECONDS {
                TOO_SLOW
            } else if average < FAST_REP_SECONDS {
                TOO_FAST
            } else {
                UNEVEN_PACE
            };
            self.core.flag(message, FeedbackPriority::Low);
            self.uneven_pace.reset();
            raised = true;
        }

        if !raised && self.clean_reps > GOOD_FORM_MIN_REPS {
            self.core.note(GOOD_FORM, FeedbackPriority::Low);
        }
    }
}

impl ExerciseAnalyzer for JumpingJackAnalyzer {
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
        self.clock += dt;

        let (left_raised, left_straight) = arm_extension(l_shoulder, l_elbow, l_wrist);
        let (right_raised, right_straight) = arm_extension(r_shoulder, r_elbow, r_wrist);
        let verticality = ((left_raised + right_raised) / 360.0).clamp(0.0, 1.0);
        let straightness = ((left_straight + right_straight) / 360.0).clamp(0.0, 1.0);
        let raw_arms = verticality * 0.3_f64.mul_add(straightness, 0.7);

        let hip_width = geometry::distance(l_hip, r_hip);
        let raw_legs = if hip_width > f64::EPSILON {
            (geometry::distance(l_ankle, r_ankle) / hip_width - 1.0).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let wrist_gap = (l_wrist.y - r_wrist.y).abs() - (l_shoulder.y - r_shoulder.y).abs();
        let center_x = (l_shoulder.x + r_shoulder.x) / 2.0;
        let ankle_gap = ((l_ankle.x - center_x).abs() - (r_ankle.x - center_x).abs()).abs();
        let arm_symmetry = 1.0 - (wrist_gap.max(0.0) * ASYMMETRY_SCALE).min(1.0);
        let leg_symmetry = 1.0 - (ankle_gap * ASYMMETRY_SCALE).min(1.0);

        let scores = Scores {
            arms: self.arm_scores.push(raw_arms),
            legs: self.leg_scores.push(raw_legs),
            symmetry: self
                .symmetry_scores
                .push((arm_symmetry + leg_symmetry) / 2.0),
        };

        self.transition(scores);
        if self.phase != JumpingJackPhase::Idle {
            self.core.add_active_time(dt);
            self.coach(scores);
        }

        let mut metrics = Metrics::new();
        metrics.insert("arm_extension", scores.arms.into());
        metrics.insert("leg_spread", scores.legs.into());
        metrics.insert("symmetry", scores.symmetry.into());
        metrics.insert("pace_consistency", self.pace.into());
        metrics.insert("average_rep_seconds", self.average_duration().into());
        let phase = self.phase_name();
        self.core.finish(phase, metrics)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.phase = JumpingJackPhase::Idle;
        self.arm_scores.clear();
        self.leg_scores.clear();
        self.symmetry_scores.clear();
        self.clock = 0.0;
        self.last_rep_at = None;
        self.durations.clear();
        self.pace = 1.0;
        self.clean_reps = 0;
        self.peak = Scores::default();
        self.short_arms.reset();
        self.narrow_legs.reset();
        self.asymmetric.reset();
        self.uneven_pace.reset();
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
