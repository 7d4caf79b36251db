// ABOUTME: Body landmark model produced by an external pose estimator
// ABOUTME: Fixed 33-joint enumeration, per-joint position/visibility, and per-frame landmark sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::point::{Point2, Point3};

/// Named anatomical joints, indexed the way common 33-point pose estimators emit them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkId {
    /// Tip of the nose
    Nose,
    /// Inner corner of the left eye
    LeftEyeInner,
    /// Centre of the left eye
    LeftEye,
    /// Outer corner of the left eye
    LeftEyeOuter,
    /// Inner corner of the right eye
    RightEyeInner,
    /// Centre of the right eye
    RightEye,
    /// Outer corner of the right eye
    RightEyeOuter,
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left mouth corner
    MouthLeft,
    /// Right mouth corner
    MouthRight,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left pinky knuckle
    LeftPinky,
    /// Right pinky knuckle
    RightPinky,
    /// Left index knuckle
    LeftIndex,
    /// Right index knuckle
    RightIndex,
    /// Left thumb
    LeftThumb,
    /// Right thumb
    RightThumb,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
    /// Left heel
    LeftHeel,
    /// Right heel
    RightHeel,
    /// Left foot index (toe)
    LeftFootIndex,
    /// Right foot index (toe)
    RightFootIndex,
}

impl LandmarkId {
    /// Number of joints in the enumeration
    pub const COUNT: usize = 33;

    /// Every joint in estimator index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Estimator index of this joint
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a joint by estimator index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Body side, used when an exercise tracks one limb at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Left side of the body
    Left,
    /// Right side of the body
    Right,
}

impl Side {
    /// The opposite side
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase label for logs and metrics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Shoulder joint on this side
    #[must_use]
    pub const fn shoulder(self) -> LandmarkId {
        match self {
            Self::Left => LandmarkId::LeftShoulder,
            Self::Right => LandmarkId::RightShoulder,
        }
    }

    /// Elbow joint on this side
    #[must_use]
    pub const fn elbow(self) -> LandmarkId {
        match self {
            Self::Left => LandmarkId::LeftElbow,
            Self::Right => LandmarkId::RightElbow,
        }
    }

    /// Wrist joint on this side
    #[must_use]
    pub const fn wrist(self) -> LandmarkId {
        match self {
            Self::Left => LandmarkId::LeftWrist,
            Self::Right => LandmarkId::RightWrist,
        }
    }

    /// Hip joint on this side
    #[must_use]
    pub const fn hip(self) -> LandmarkId {
        match self {
            Self::Left => LandmarkId::LeftHip,
            Self::Right => LandmarkId::RightHip,
        }
    }

    /// Knee joint on this side
    #[must_use]
    pub const fn knee(self) -> LandmarkId {
        match self {
            Self::Left => LandmarkId::LeftKnee,
            Self::Right => LandmarkId::RightKnee,
        }
    }

    /// Ankle joint on this side
    #[must_use]
    pub const fn ankle(self) -> LandmarkId {
        match self {
            Self::Left => LandmarkId::LeftAnkle,
            Self::Right => LandmarkId::RightAnkle,
        }
    }
}

/// A single detected joint: normalized image position plus detector confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized to [0, 1] of frame width
    pub x: f64,
    /// Vertical position, normalized to [0, 1] of frame height (grows downward)
    pub y: f64,
    /// Relative depth, same scale as `x`
    #[serde(default)]
    pub z: f64,
    /// Detector confidence in [0, 1]
    #[serde(default = "full_visibility")]
    pub visibility: f64,
}

const fn full_visibility() -> f64 {
    1.0
}

impl Landmark {
    /// Create a landmark
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }

    /// Image-plane position
    #[must_use]
    pub const fn point2(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Position including relative depth
    #[must_use]
    pub const fn point3(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Whether detector confidence meets `threshold`
    #[must_use]
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility >= threshold
    }
}

/// All joints detected in one frame
///
/// Joints the estimator did not report are absent. Serializes as a JSON object
/// keyed by snake_case joint name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<LandmarkId, Landmark>", into = "BTreeMap<LandmarkId, Landmark>")]
pub struct LandmarkSet {
    joints: [Option<Landmark>; LandmarkId::COUNT],
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self {
            joints: [None; LandmarkId::COUNT],
        }
    }
}

impl LandmarkSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, id: LandmarkId, landmark: Landmark) -> Self {
        self.insert(id, landmark);
        self
    }

    /// Insert or replace a joint
    pub fn insert(&mut self, id: LandmarkId, landmark: Landmark) {
        self.joints[id.index()] = Some(landmark);
    }

    /// Joint if detected
    #[must_use]
    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.joints[id.index()].as_ref()
    }

    /// Image-plane position of a joint whose confidence meets `threshold`
    #[must_use]
    pub fn visible_point(&self, id: LandmarkId, threshold: f64) -> Option<Point2> {
        self.get(id)
            .filter(|landmark| landmark.is_visible(threshold))
            .map(Landmark::point2)
    }

    /// Required joints that are absent or below `threshold`, in the order given
    #[must_use]
    pub fn missing(&self, required: &[LandmarkId], threshold: f64) -> Vec<LandmarkId> {
        required
            .iter()
            .copied()
            .filter(|id| self.visible_point(*id, threshold).is_none())
            .collect()
    }

    /// Whether every joint in `required` meets `threshold`
    #[must_use]
    pub fn all_visible(&self, required: &[LandmarkId], threshold: f64) -> bool {
        required
            .iter()
            .all(|id| self.visible_point(*id, threshold).is_some())
    }

    /// Number of detected joints
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.iter().flatten().count()
    }

    /// Whether no joint was detected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(Option::is_none)
    }

    /// Detected joints in estimator index order
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkId, &Landmark)> {
        LandmarkId::ALL
            .iter()
            .zip(self.joints.iter())
            .filter_map(|(id, joint)| joint.as_ref().map(|landmark| (*id, landmark)))
    }
}

impl From<BTreeMap<LandmarkId, Landmark>> for LandmarkSet {
    fn from(map: BTreeMap<LandmarkId, Landmark>) -> Self {
        map.into_iter()
            .fold(Self::new(), |set, (id, landmark)| set.with(id, landmark))
    }
}

impl From<LandmarkSet> for BTreeMap<LandmarkId, Landmark> {
    fn from(set: LandmarkSet) -> Self {
        set.iter().map(|(id, landmark)| (id, *landmark)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_covers_all_joints() {
        for (expected, id) in LandmarkId::ALL.iter().enumerate() {
            assert_eq!(id.index(), expected);
            assert_eq!(LandmarkId::from_index(expected), Some(*id));
        }
        assert_eq!(LandmarkId::from_index(LandmarkId::COUNT), None);
        assert_eq!(LandmarkId::LeftShoulder.index(), 11);
        assert_eq!(LandmarkId::LeftHip.index(), 23);
    }

    #[test]
    fn test_missing_reports_low_confidence_and_absent_joints() {
        let set = LandmarkSet::new()
            .with(LandmarkId::LeftHip, Landmark::new(0.5, 0.5, 0.0, 0.9))
            .with(LandmarkId::LeftKnee, Landmark::new(0.5, 0.7, 0.0, 0.3));

        let missing = set.missing(
            &[
                LandmarkId::LeftHip,
                LandmarkId::LeftKnee,
                LandmarkId::LeftAnkle,
            ],
            0.6,
        );
        assert_eq!(missing, vec![LandmarkId::LeftKnee, LandmarkId::LeftAnkle]);
        assert!(set.all_visible(&[LandmarkId::LeftHip], 0.6));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_json_uses_joint_names() {
        let json = r#"{"left_wrist": {"x": 0.25, "y": 0.5, "visibility": 0.8}}"#;
        let set: LandmarkSet = serde_json::from_str(json).unwrap();
        let wrist = set.get(LandmarkId::LeftWrist).unwrap();
        assert!((wrist.x - 0.25).abs() < f64::EPSILON);
        assert!(wrist.z.abs() < f64::EPSILON);

        let encoded = serde_json::to_value(&set).unwrap();
        assert!(encoded.get("left_wrist").is_some());
    }
}
