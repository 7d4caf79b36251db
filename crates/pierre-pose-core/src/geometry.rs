// ABOUTME: GeometryKit - pure geometric helpers over pose landmarks
// ABOUTME: Joint angles, signed axis angles, distances, alignment and line-offset scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # GeometryKit
//!
//! Stateless functions used by every analyzer. Inputs are image-plane points
//! (y grows downward). None of these functions fail: coincident points and
//! zero-length segments yield a neutral value instead of NaN.
//!
//! ## Signed angle convention
//!
//! Signed angles are measured in a y-up frame (image y flipped), in degrees:
//!
//! - [`signed_vertical_angle`] is 0 when `to` is straight above `from` and
//!   positive when `to` is displaced toward +x.
//! - [`signed_horizontal_angle`] is 0 along +x and positive when `to` is above
//!   `from`.
//!
//! The unsigned helpers return the absolute value of their signed
//! counterpart, so both always agree on magnitude.

use crate::models::{Point2, Point3};

/// Lengths below this are treated as zero
const EPSILON: f64 = 1e-9;

/// Joint angle reported for a degenerate joint (straight limb, no flex signal)
pub const STRAIGHT_ANGLE: f64 = 180.0;

fn vector_angle(v1: Point2, v2: Point2) -> Option<f64> {
    let denominator = v1.length() * v2.length();
    if denominator < EPSILON {
        return None;
    }
    let cosine = (v1.dot(v2) / denominator).clamp(-1.0, 1.0);
    Some(cosine.acos().to_degrees())
}

/// Angle at vertex `b` formed by `a` and `c`, in [0, 180]
///
/// Symmetric in `a` and `c`. Returns [`STRAIGHT_ANGLE`] when either arm of the
/// joint has zero length.
#[must_use]
pub fn angle(a: Point2, b: Point2, c: Point2) -> f64 {
    vector_angle(a - b, c - b).unwrap_or(STRAIGHT_ANGLE)
}

/// [`angle`] using relative depth as well
#[must_use]
pub fn angle_3d(a: Point3, b: Point3, c: Point3) -> f64 {
    let v1 = a - b;
    let v2 = c - b;
    let denominator = v1.length() * v2.length();
    if denominator < EPSILON {
        return STRAIGHT_ANGLE;
    }
    (v1.dot(v2) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Unsigned angle between two displacement vectors, 0 when either is zero
#[must_use]
pub fn angle_between(v1: Point2, v2: Point2) -> f64 {
    vector_angle(v1, v2).unwrap_or(0.0)
}

/// Angle of `from`→`to` relative to straight up, in (-180, 180]
#[must_use]
pub fn signed_vertical_angle(from: Point2, to: Point2) -> f64 {
    let delta = to - from;
    if delta.length() < EPSILON {
        return 0.0;
    }
    delta.x.atan2(-delta.y).to_degrees()
}

/// Unsigned angle of `from`→`to` relative to the vertical axis, in [0, 180]
#[must_use]
pub fn vertical_angle(from: Point2, to: Point2) -> f64 {
    signed_vertical_angle(from, to).abs()
}

/// Angle of `from`→`to` relative to +x, positive when rising, in (-180, 180]
#[must_use]
pub fn signed_horizontal_angle(from: Point2, to: Point2) -> f64 {
    let delta = to - from;
    if delta.length() < EPSILON {
        return 0.0;
    }
    (-delta.y).atan2(delta.x).to_degrees()
}

/// Unsigned angle of `from`→`to` relative to the horizontal axis, in [0, 180]
#[must_use]
pub fn horizontal_angle(from: Point2, to: Point2) -> f64 {
    signed_horizontal_angle(from, to).abs()
}

/// Euclidean distance
#[must_use]
pub fn distance(p: Point2, q: Point2) -> f64 {
    (q - p).length()
}

/// Euclidean distance including depth
#[must_use]
pub fn distance_3d(p: Point3, q: Point3) -> f64 {
    (q - p).length()
}

/// Point halfway between `p` and `q`
#[must_use]
pub fn midpoint(p: Point2, q: Point2) -> Point2 {
    p.midpoint(q)
}

/// How level the segment `p`–`q` is, in [0, 1]
///
/// 1.0 for a horizontal segment and for coincident points, falling toward 0
/// as the segment approaches vertical.
#[must_use]
pub fn alignment_score(p: Point2, q: Point2) -> f64 {
    let length = distance(p, q);
    if length < EPSILON {
        return 1.0;
    }
    (1.0 - (q.y - p.y).abs() / length).clamp(0.0, 1.0)
}

/// Perpendicular offset of `point` from the line `start`→`end`, over line length
///
/// Positive when the point lies lower in the image than the line (a sag) and
/// negative when higher (a pike). Offsets from a perfectly vertical line have
/// no vertical component and are reported as positive. Returns 0 for a
/// zero-length line.
#[must_use]
pub fn signed_line_offset(point: Point2, start: Point2, end: Point2) -> f64 {
    let line = end - start;
    let length_sq = line.dot(line);
    if length_sq < EPSILON * EPSILON {
        return 0.0;
    }
    let along = (point - start).dot(line) / length_sq;
    let foot = start + line * along;
    let perpendicular = point - foot;
    let ratio = perpendicular.length() / length_sq.sqrt();
    if perpendicular.y < 0.0 {
        -ratio
    } else {
        ratio
    }
}

/// Unsigned offset of `joint` from the line `base`→`top`, over line length
///
/// Used for knee-over-ankle tracking. Returns 0 for a zero-length line.
#[must_use]
pub fn tracking_ratio(joint: Point2, base: Point2, top: Point2) -> f64 {
    signed_line_offset(joint, base, top).abs()
}

/// Straightness of `start`–`mid`–`end`, in [0, 1]
///
/// `1 - min(1, |offset| * sensitivity)` where offset is the
/// [`signed_line_offset`] of `mid`. 1.0 for a degenerate line.
#[must_use]
pub fn line_straightness(start: Point2, mid: Point2, end: Point2, sensitivity: f64) -> f64 {
    let offset = signed_line_offset(mid, start, end).abs();
    1.0 - (offset * sensitivity).min(1.0)
}
