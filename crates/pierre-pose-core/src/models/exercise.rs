// ABOUTME: Exercise catalogue supported by form analysis
// ABOUTME: Parses exercise names and lists the joints each exercise needs to see
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::landmark::LandmarkId;
use crate::errors::AnalysisError;

/// Exercises with a dedicated analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Standing dumbbell bicep curl
    BicepCurl,
    /// Bodyweight squat
    Squat,
    /// Standard pushup
    Pushup,
    /// Forward lunge
    Lunge,
    /// Forearm plank hold
    Plank,
    /// Jumping jacks
    JumpingJack,
}

const ARM_JOINTS: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftElbow,
    LandmarkId::RightElbow,
    LandmarkId::LeftWrist,
    LandmarkId::RightWrist,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
];

const LEG_JOINTS: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftKnee,
    LandmarkId::RightKnee,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

const PUSHUP_JOINTS: [LandmarkId; 10] = [
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

const PLANK_JOINTS: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftElbow,
    LandmarkId::RightElbow,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

const FULL_BODY_JOINTS: [LandmarkId; 10] = [
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

impl ExerciseKind {
    /// Every supported exercise
    pub const ALL: [Self; 6] = [
        Self::BicepCurl,
        Self::Squat,
        Self::Pushup,
        Self::Lunge,
        Self::Plank,
        Self::JumpingJack,
    ];

    /// Canonical catalogue name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BicepCurl => "bicep_curl",
            Self::Squat => "squat",
            Self::Pushup => "pushup",
            Self::Lunge => "lunge",
            Self::Plank => "plank",
            Self::JumpingJack => "jumping_jack",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BicepCurl => "Bicep Curl",
            Self::Squat => "Squat",
            Self::Pushup => "Pushup",
            Self::Lunge => "Lunge",
            Self::Plank => "Plank",
            Self::JumpingJack => "Jumping Jack",
        }
    }

    /// Whether elapsed time rather than reps is the natural completion metric
    #[must_use]
    pub const fn default_timed(self) -> bool {
        matches!(self, Self::Plank)
    }

    /// Joints that must meet the visibility threshold before a frame is analyzed
    ///
    /// Curl lists both arms; its analyzer accepts a frame when either arm is
    /// fully visible.
    #[must_use]
    pub const fn required_landmarks(self) -> &'static [LandmarkId] {
        match self {
            Self::BicepCurl => &ARM_JOINTS,
            Self::Squat | Self::Lunge => &LEG_JOINTS,
            Self::Pushup => &PUSHUP_JOINTS,
            Self::Plank => &PLANK_JOINTS,
            Self::JumpingJack => &FULL_BODY_JOINTS,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = AnalysisError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| AnalysisError::invalid_exercise_kind(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_forgiving_about_case_and_separators() {
        assert_eq!("squat".parse::<ExerciseKind>().ok(), Some(ExerciseKind::Squat));
        assert_eq!(
            " Jumping-Jack ".parse::<ExerciseKind>().ok(),
            Some(ExerciseKind::JumpingJack)
        );
        assert_eq!(
            "BICEP_CURL".parse::<ExerciseKind>().ok(),
            Some(ExerciseKind::BicepCurl)
        );
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "burpee".parse::<ExerciseKind>().unwrap_err();
        assert_eq!(err, AnalysisError::invalid_exercise_kind("burpee"));
    }

    #[test]
    fn test_only_plank_is_timed_by_default() {
        let timed: Vec<_> = ExerciseKind::ALL
            .into_iter()
            .filter(|kind| kind.default_timed())
            .collect();
        assert_eq!(timed, vec![ExerciseKind::Plank]);
    }
}
