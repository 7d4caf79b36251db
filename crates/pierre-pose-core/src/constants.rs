// ABOUTME: Default thresholds and tuning constants for exercise form analysis
// ABOUTME: Grouped by concern so configuration defaults and analyzers share one source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Form analysis constants
//!
//! Angles are in degrees, ratios are fractions of a body-segment length unless
//! noted, and frame counts are consecutive analyzed frames.

/// Landmark visibility gating
pub mod visibility {
    /// Minimum detector confidence for a joint to take part in geometry
    pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.6;
    /// Reposition message emitted when required joints are not visible
    pub const REPOSITION_MESSAGE: &str =
        "Please reposition so your whole body is visible to the camera";
}

/// Metric smoothing buffers
pub mod smoothing {
    /// Default moving-average window
    pub const DEFAULT_WINDOW: usize = 5;
    /// Largest window accepted by configuration
    pub const MAX_WINDOW: usize = 10;
    /// Weight kept from the previous value in exponential smoothing
    pub const EMA_RETAIN: f64 = 0.8;
}

/// Feedback aggregation and delivery
pub mod feedback {
    /// Sliding window of recent observations
    pub const DEFAULT_WINDOW_SIZE: usize = 10;
    /// Recently delivered messages remembered to avoid repeats
    pub const DELIVERED_CACHE_CAPACITY: usize = 10;
    /// Frames that must pass between two non-empty deliveries
    pub const DEFAULT_MIN_FRAME_GAP: u32 = 15;
    /// Messages delivered per non-empty delivery
    pub const DEFAULT_MAX_ITEMS: usize = 1;
    /// Occurrences before a message counts as a persistent issue
    pub const PERSISTENT_ISSUE_MIN_OCCURRENCES: u32 = 3;
    /// Occurrences before a message appears in a session summary
    pub const SUMMARY_MIN_OCCURRENCES: u32 = 2;
    /// Occurrences above which a summarized issue is high priority
    pub const SUMMARY_HIGH_PRIORITY_OCCURRENCES: u32 = 5;
    /// Most frequent messages listed in a session summary
    pub const TOP_FEEDBACK_LIMIT: usize = 5;
}

/// Bicep curl defaults
pub mod curl {
    /// Elbow angle below which a rep starts
    pub const START_ANGLE: f64 = 160.0;
    /// Elbow angle below which the rep is committed
    pub const COMMIT_ANGLE: f64 = 110.0;
    /// Elbow angle at which the arm counts as lowered again
    pub const RELEASE_ANGLE: f64 = 150.0;
    /// Peak elbow angle must be at or below this for a full curl
    pub const NOT_HIGH_ENOUGH_ANGLE: f64 = 90.0;
    /// Elbow drift from its rep-start position, in percent of frame
    pub const ELBOW_DRIFT_PERCENT: f64 = 5.0;
    /// Torso sway from the rep-start baseline
    pub const BODY_SWING_DEGREES: f64 = 10.0;
    /// Torso sway treated as excessive
    pub const BODY_SWING_SEVERE_DEGREES: f64 = 20.0;
    /// Smoothed upper-arm-to-torso angle limit
    pub const UPPER_ARM_DRIFT_DEGREES: f64 = 35.0;
    /// Extra bend the idle arm needs before it takes over
    pub const ARM_SWITCH_HYSTERESIS_DEGREES: f64 = 20.0;
}

/// Squat defaults
pub mod squat {
    /// Knee angle below which a rep starts
    pub const START_ANGLE: f64 = 160.0;
    /// Knee angle below which the rep is committed
    pub const COMMIT_ANGLE: f64 = 100.0;
    /// Bottom knee angle below which the squat is too deep
    pub const TOO_DEEP_ANGLE: f64 = 68.0;
    /// Bottom knee angle above which the squat is too shallow
    pub const NOT_DEEP_ENOUGH_ANGLE: f64 = 91.0;
    /// Minimum forward torso lean while squatting
    pub const MIN_BACK_LEAN_DEGREES: f64 = 19.0;
    /// Maximum forward torso lean while squatting
    pub const MAX_BACK_LEAN_DEGREES: f64 = 50.0;
    /// Knee offset from the ankle-hip line, as a fraction of leg length
    pub const KNEE_TRACKING_RATIO: f64 = 0.15;
    /// Consecutive frames of bad tracking before feedback
    pub const KNEE_TRACKING_FRAMES: u32 = 5;
}

/// Pushup defaults
pub mod pushup {
    /// Elbow angle below which a rep starts
    pub const START_ANGLE: f64 = 160.0;
    /// Elbow angle below which the rep is committed
    pub const COMMIT_ANGLE: f64 = 110.0;
    /// Bottom elbow angle above which the pushup is too shallow
    pub const NOT_LOW_ENOUGH_ANGLE: f64 = 100.0;
    /// Hip offset from the ankle-shoulder line, in percent of body length
    pub const HIP_OFFSET_PERCENT: f64 = 10.0;
    /// Ideal upper-arm-to-torso angle
    pub const ELBOW_TARGET_DEGREES: f64 = 45.0;
    /// Allowed deviation from the ideal elbow angle
    pub const ELBOW_FLARE_DEGREES: f64 = 30.0;
    /// Neck deviation from the spine line
    pub const NECK_ALIGNMENT_DEGREES: f64 = 20.0;
    /// Minimum body-line straightness score
    pub const MIN_STRAIGHTNESS: f64 = 0.7;
    /// Consecutive frames of poor straightness before feedback
    pub const STRAIGHTNESS_FRAMES: u32 = 5;
    /// Offset multiplier for the body-line straightness score
    pub const STRAIGHTNESS_SENSITIVITY: f64 = 1.0;
}

/// Lunge defaults
pub mod lunge {
    /// Front knee angle below which a rep starts
    pub const START_ANGLE: f64 = 160.0;
    /// Front knee angle below which the rep is committed
    pub const FRONT_COMMIT_ANGLE: f64 = 110.0;
    /// Back knee angle below which the rep is committed
    pub const BACK_COMMIT_ANGLE: f64 = 130.0;
    /// Bottom front knee angle above which the lunge is too shallow
    pub const FRONT_KNEE_MAX_ANGLE: f64 = 100.0;
    /// Bottom front knee angle below which the knee is over-bent
    pub const FRONT_KNEE_MIN_ANGLE: f64 = 75.0;
    /// Bottom back knee angle above which the back knee is too high
    pub const BACK_KNEE_MAX_ANGLE: f64 = 120.0;
    /// Bottom back knee angle below which the knee nears the floor
    pub const BACK_KNEE_MIN_ANGLE: f64 = 80.0;
    /// Torso lean limit in either direction
    pub const TORSO_LEAN_DEGREES: f64 = 20.0;
    /// Front knee offset from the ankle-hip line, as a fraction of leg length
    pub const KNEE_TRACKING_RATIO: f64 = 0.15;
    /// Back thigh deviation from vertical
    pub const BACK_THIGH_VERTICAL_DEGREES: f64 = 30.0;
    /// Minimum stance-width stability score
    pub const MIN_STANCE_STABILITY: f64 = 0.7;
    /// Consecutive frames before tracking or stance feedback
    pub const ISSUE_FRAMES: u32 = 5;
}

/// Plank defaults
pub mod plank {
    /// Alignment needed to begin a hold
    pub const START_ALIGNMENT: f64 = 0.75;
    /// Hip offset limit to begin a hold
    pub const START_HIP_OFFSET: f64 = 0.2;
    /// Alignment needed to count as holding
    pub const HOLD_ALIGNMENT: f64 = 0.85;
    /// Hip offset limit to count as holding
    pub const HOLD_HIP_OFFSET: f64 = 0.15;
    /// Alignment below which a hold starts breaking
    pub const BREAK_ALIGNMENT: f64 = 0.7;
    /// Hip offset above which a hold starts breaking
    pub const BREAK_HIP_OFFSET: f64 = 0.3;
    /// Alignment below which a breaking hold ends
    pub const END_ALIGNMENT: f64 = 0.6;
    /// Hip offset above which a breaking hold ends
    pub const END_HIP_OFFSET: f64 = 0.4;
    /// Hold length needed for a completed plank
    pub const MIN_HOLD_SECONDS: f64 = 5.0;
    /// Multiplier applied to hip deviation when scoring alignment
    pub const ALIGNMENT_SENSITIVITY: f64 = 5.0;
    /// Hip offset counted as sagging or piking
    pub const HIP_VIOLATION_OFFSET: f64 = 0.15;
    /// Hip offset that triggers sag or pike feedback
    pub const HIP_FEEDBACK_OFFSET: f64 = 0.2;
    /// Alignment below which time counts as misaligned
    pub const MISALIGNMENT_SCORE: f64 = 0.8;
    /// Head deviation from the spine line
    pub const HEAD_ALIGNMENT_DEGREES: f64 = 15.0;
    /// Head deviation that triggers head-position feedback
    pub const HEAD_SEVERE_DEGREES: f64 = 20.0;
    /// Minimum elbow-under-shoulder score
    pub const MIN_ELBOW_ALIGNMENT: f64 = 0.7;
    /// Minimum movement stability score
    pub const MIN_STABILITY: f64 = 0.7;
    /// Positions kept for movement stability
    pub const STABILITY_HISTORY: usize = 10;
    /// Multiplier applied to mean movement when scoring stability
    pub const STABILITY_SCALE: f64 = 50.0;
    /// Alignment counted toward good-form time
    pub const GOOD_FORM_ALIGNMENT: f64 = 0.9;
    /// Hip offset counted toward good-form time
    pub const GOOD_FORM_HIP_OFFSET: f64 = 0.1;
    /// Head deviation counted toward good-form time
    pub const GOOD_FORM_HEAD_DEGREES: f64 = 10.0;
}

/// Jumping jack defaults
pub mod jumping_jack {
    /// Arm and leg score above which limbs are out
    pub const UP_THRESHOLD: f64 = 0.7;
    /// Arm and leg score below which limbs are in
    pub const DOWN_THRESHOLD: f64 = 0.3;
    /// Minimum arm extension at the top
    pub const MIN_ARM_EXTENSION: f64 = 0.8;
    /// Minimum leg spread at the top
    pub const MIN_LEG_SPREAD: f64 = 0.7;
    /// Minimum left/right symmetry score
    pub const MIN_SYMMETRY: f64 = 0.8;
    /// Minimum pace consistency score
    pub const MIN_PACE_CONSISTENCY: f64 = 0.8;
    /// Coefficient of variation that drives pace consistency to zero
    pub const PACE_CV_SCALE: f64 = 0.2;
    /// Rep durations kept for pace consistency
    pub const PACE_HISTORY: usize = 5;
    /// Reps before pace is judged
    pub const PACE_MIN_REPS: u32 = 3;
    /// Mean rep duration below which the pace is too fast
    pub const FAST_REP_SECONDS: f64 = 0.5;
    /// Mean rep duration above which the pace is too slow
    pub const SLOW_REP_SECONDS: f64 = 1.5;
    /// Multiplier applied to left/right wrist and ankle asymmetry
    pub const ASYMMETRY_SCALE: f64 = 5.0;
    /// Consecutive frames before extension or symmetry feedback
    pub const ISSUE_FRAMES: u32 = 3;
    /// Consecutive frames before pace feedback
    pub const PACE_FRAMES: u32 = 2;
    /// Clean reps before praising form
    pub const GOOD_FORM_MIN_REPS: u32 = 2;
}
