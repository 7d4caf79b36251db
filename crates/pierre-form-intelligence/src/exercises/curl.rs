// ABOUTME: Bicep curl analyzer - elbow flex cycle on the working arm
// ABOUTME: Dynamic arm selection with hysteresis, elbow drift, body swing and upper-arm checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Bicep curl analysis
//!
//! Only one arm is tracked at a time. The more-bent arm is picked on the
//! first visible frame; afterwards the other arm takes over only while Idle
//! and only once it is bent further by more than the switch hysteresis, so a
//! resting arm drifting a few degrees never steals a rep in progress.

use pierre_pose_core::geometry;
use pierre_pose_core::{ExerciseKind, FeedbackPriority, LandmarkSet, Point2, Side};
use tracing::debug;

use super::flex_cycle::{FlexBands, FlexCycle, FlexPhase, FlexSignals, FlexTransition};
use crate::analyzer::{
    sanitize_dt, visible_points, AnalysisResult, AnalyzerCore, ExerciseAnalyzer, Metrics,
};
use crate::config::{AnalyzerSettings, CurlThresholds};
use crate::smoothing::SmoothingWindow;

const FALSE_START: &str = "Complete the curl motion";
const GOOD_FORM: &str = "Great curl form!";
const NOT_HIGH_ENOUGH: &str = "Curl the weight higher";
const ELBOW_DRIFT: &str = "Keep your elbow fixed at your side";
const SWING_SLIGHT: &str = "Avoid swinging your body slightly";
const SWING_EXCESSIVE: &str = "Avoid swinging your body excessively";
const UPPER_ARM: &str = "Keep your upper arm still";

/// Shoulder, elbow, wrist and hip of one side
#[derive(Debug, Clone, Copy)]
struct Arm {
    shoulder: Point2,
    elbow: Point2,
    wrist: Point2,
    hip: Point2,
}

impl Arm {
    fn read(landmarks: &LandmarkSet, side: Side, threshold: f64) -> Option<Self> {
        let [shoulder, elbow, wrist, hip] = visible_points(
            landmarks,
            [side.shoulder(), side.elbow(), side.wrist(), side.hip()],
            threshold,
        )?;
        Some(Self {
            shoulder,
            elbow,
            wrist,
            hip,
        })
    }

    fn flex_angle(&self) -> f64 {
        geometry::angle(self.shoulder, self.elbow, self.wrist)
    }
}

#[derive(Debug, Clone, Copy)]
struct RepBaseline {
    elbow: Point2,
    torso_angle: f64,
}

/// Standing bicep curl analyzer
#[derive(Debug, Clone)]
pub struct CurlAnalyzer {
    core: AnalyzerCore,
    thresholds: CurlThresholds,
    cycle: FlexCycle,
    side: Option<Side>,
    flex_angles: SmoothingWindow,
    upper_arm_angles: SmoothingWindow,
    previous: Option<f64>,
    rep_min: f64,
    baseline: Option<RepBaseline>,
}

impl CurlAnalyzer {
    /// Create a curl analyzer
    #[must_use]
    pub fn new(thresholds: CurlThresholds, settings: &AnalyzerSettings) -> Self {
        Self {
            core: AnalyzerCore::new(ExerciseKind::BicepCurl, settings),
            thresholds,
            cycle: FlexCycle::default(),
            side: None,
            flex_angles: SmoothingWindow::new(settings.smoothing_window),
            upper_arm_angles: SmoothingWindow::new(settings.smoothing_window),
            previous: None,
            rep_min: geometry::STRAIGHT_ANGLE,
            baseline: None,
        }
    }

    /// Arm currently tracked, if one has been seen
    #[must_use]
    pub const fn tracked_side(&self) -> Option<Side> {
        self.side
    }

    const fn bands(&self) -> FlexBands {
        FlexBands {
            start: self.thresholds.start_angle,
            commit: self.thresholds.commit_angle,
            release: self.thresholds.release_angle,
        }
    }

    /// Pick the arm to analyze this frame, or `None` if it is not visible
    fn select_arm(&mut self, left: Option<Arm>, right: Option<Arm>) -> Option<(Side, Arm)> {
        let arm_for = |side: Side| match side {
            Side::Left => left,
            Side::Right => right,
        };
        let chosen = match self.side {
            None => match (left, right) {
                (Some(l), Some(r)) if r.flex_angle() < l.flex_angle() => Side::Right,
                (Some(_), _) => Side::Left,
                (None, Some(_)) => Side::Right,
                (None, None) => return None,
            },
            Some(current) if self.cycle.phase() == FlexPhase::Idle => {
                let other = current.opposite();
                match (arm_for(current), arm_for(other)) {
                    (Some(cur), Some(alt))
                        if alt.flex_angle() + self.thresholds.arm_switch_hysteresis_degrees
                            < cur.flex_angle() =>
                    {
                        other
                    }
                    (None, Some(_)) => other,
                    _ => current,
                }
            }
            Some(current) => current,
        };

        if self.side != Some(chosen) {
            if self.side.is_some() {
                debug!(from = ?self.side, to = %chosen.as_str(), "Curl arm switched");
            }
            self.side = Some(chosen);
            self.flex_angles.clear();
            self.upper_arm_angles.clear();
            self.previous = None;
        }
        arm_for(chosen).map(|arm| (chosen, arm))
    }

    fn check_form(&mut self, arm: &Arm, torso_angle: f64, upper_arm_angle: f64) {
        let Some(baseline) = self.baseline else {
            return;
        };

        let drift_percent = geometry::distance(arm.elbow, baseline.elbow) * 100.0;
        if drift_percent > self.thresholds.elbow_drift_percent {
            self.core.flag(ELBOW_DRIFT, FeedbackPriority::Medium);
        }

        let swing = (torso_angle - baseline.torso_angle).abs();
        if swing > self.thresholds.body_swing_severe_degrees {
            self.core.flag(SWING_EXCESSIVE, FeedbackPriority::High);
        } else if swing > self.thresholds.body_swing_degrees {
            self.core.flag(SWING_SLIGHT, FeedbackPriority::Medium);
        }

        if upper_arm_angle > self.thresholds.upper_arm_drift_degrees {
            self.core.flag(UPPER_ARM, FeedbackPriority::High);
        }
    }
}

impl ExerciseAnalyzer for CurlAnalyzer {
    fn analyze(&mut self, landmarks: &LandmarkSet, dt_seconds: f64) -> AnalysisResult {
        let threshold = self.core.visibility_threshold();
        let left = Arm::read(landmarks, Side::Left, threshold);
        let right = Arm::read(landmarks, Side::Right, threshold);
        let Some((side, arm)) = self.select_arm(left, right) else {
            let phase = self.phase_name();
            let missing = self.core.missing_landmarks(landmarks);
            return self.core.reject_frame(missing, phase);
        };
        let dt = sanitize_dt(dt_seconds);

        let raw_flex = arm.flex_angle();
        let flex_angle = self.flex_angles.push(raw_flex);
        let torso_angle = geometry::signed_vertical_angle(arm.hip, arm.shoulder);
        let upper_arm_angle = self
            .upper_arm_angles
            .push(geometry::angle(arm.hip, arm.shoulder, arm.elbow));

        if self.cycle.is_active() {
            self.rep_min = self.rep_min.min(flex_angle);
        }
        let signals = FlexSignals::from_angle(flex_angle, self.previous, self.bands());
        self.previous = Some(flex_angle);

        match self.cycle.step(signals) {
            Some(FlexTransition::Started) => {
                self.core.begin_rep();
                self.rep_min = flex_angle;
                self.baseline = Some(RepBaseline {
                    elbow: arm.elbow,
                    torso_angle,
                });
            }
            Some(FlexTransition::FalseStart) => {
                self.core.abandon_rep();
                self.core.note(FALSE_START, FeedbackPriority::Medium);
            }
            Some(FlexTransition::ReachedHold) => {
                if self.rep_min > self.thresholds.not_high_enough_angle {
                    self.core.flag(NOT_HIGH_ENOUGH, FeedbackPriority::Medium);
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
            self.check_form(&arm, torso_angle, upper_arm_angle);
        } else {
            self.baseline = None;
        }

        let mut metrics = Metrics::new();
        metrics.insert("elbow_angle", flex_angle.into());
        metrics.insert("raw_elbow_angle", raw_flex.into());
        metrics.insert("upper_arm_angle", upper_arm_angle.into());
        metrics.insert("torso_angle", torso_angle.into());
        metrics.insert("arm_side", side.as_str().into());
        if let Some(baseline) = self.baseline {
            metrics.insert(
                "elbow_drift_percent",
                (geometry::distance(arm.elbow, baseline.elbow) * 100.0).into(),
            );
            metrics.insert(
                "body_swing",
                (torso_angle - baseline.torso_angle).abs().into(),
            );
        }
        let phase = self.phase_name();
        self.core.finish(phase, metrics)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.cycle.reset();
        self.side = None;
        self.flex_angles.clear();
        self.upper_arm_angles.clear();
        self.previous = None;
        self.rep_min = geometry::STRAIGHT_ANGLE;
        self.baseline = None;
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
