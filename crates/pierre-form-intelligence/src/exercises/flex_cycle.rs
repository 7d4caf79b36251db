// ABOUTME: Shared flex-cycle phase machine for curl, squat, pushup and lunge
// ABOUTME: Idle, Start, Compressing, Hold, Releasing driven by a smoothed joint angle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Flex cycle
//!
//! A joint closes from straight toward a target angle, bottoms out, then
//! opens again. Direction is judged against the previous frame's smoothed
//! value, never a windowed average, so the extremum is caught on the first
//! frame the angle stops closing.

/// Phase of a flex cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexPhase {
    /// Joint extended, no rep in progress
    #[default]
    Idle,
    /// Angle crossed the entry threshold
    Start,
    /// Angle crossed the commit threshold and is still closing
    Compressing,
    /// Angle stopped closing
    Hold,
    /// Angle opening back toward the release threshold
    Releasing,
}

impl FlexPhase {
    /// snake_case label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Start => "start",
            Self::Compressing => "compressing",
            Self::Hold => "hold",
            Self::Releasing => "releasing",
        }
    }
}

/// Entry, commit and release angles of a flex cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexBands {
    /// Angle below which a rep starts
    pub start: f64,
    /// Angle below which the rep is committed
    pub commit: f64,
    /// Angle at or above which the rep is finished
    pub release: f64,
}

/// Per-frame conditions derived from the smoothed primary angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlexSignals {
    /// Below the entry threshold
    pub entered: bool,
    /// Below the commit threshold
    pub committed: bool,
    /// Back at or above the entry threshold without committing
    pub abandoned: bool,
    /// Not lower than the previous frame
    pub bottomed: bool,
    /// Higher than the previous frame
    pub rising: bool,
    /// At or above the release threshold
    pub returned: bool,
}

impl FlexSignals {
    /// Signals for `current` given the previous frame's value
    ///
    /// With no previous frame there is no direction, so neither `bottomed`
    /// nor `rising` is set.
    #[must_use]
    pub fn from_angle(current: f64, previous: Option<f64>, bands: FlexBands) -> Self {
        let rising = previous.is_some_and(|prev| current > prev);
        Self {
            entered: current < bands.start,
            committed: current < bands.commit,
            abandoned: rising && current >= bands.start,
            bottomed: previous.is_some_and(|prev| current >= prev),
            rising,
            returned: current >= bands.release,
        }
    }
}

/// Phase change reported by [`FlexCycle::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexTransition {
    /// Idle to Start
    Started,
    /// Start back to Idle without committing
    FalseStart,
    /// Start to Compressing
    Committed,
    /// Compressing to Hold; the extremum was reached
    ReachedHold,
    /// Hold to Releasing
    Releasing,
    /// Releasing to Idle; a full rep
    Completed,
}

/// Flex-cycle phase machine
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexCycle {
    phase: FlexPhase,
}

impl FlexCycle {
    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> FlexPhase {
        self.phase
    }

    /// Whether the cycle is outside Idle
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != FlexPhase::Idle
    }

    /// Apply one frame's signals, making at most one transition
    pub fn step(&mut self, signals: FlexSignals) -> Option<FlexTransition> {
        let (next, transition) = match self.phase {
            FlexPhase::Idle if signals.entered => (FlexPhase::Start, FlexTransition::Started),
            FlexPhase::Start if signals.committed => {
                (FlexPhase::Compressing, FlexTransition::Committed)
            }
            FlexPhase::Start if signals.abandoned => (FlexPhase::Idle, FlexTransition::FalseStart),
            FlexPhase::Compressing if signals.bottomed => {
                (FlexPhase::Hold, FlexTransition::ReachedHold)
            }
            FlexPhase::Hold if signals.rising => (FlexPhase::Releasing, FlexTransition::Releasing),
            FlexPhase::Releasing if signals.returned => {
                (FlexPhase::Idle, FlexTransition::Completed)
            }
            _ => return None,
        };
        self.phase = next;
        Some(transition)
    }

    /// Return to Idle
    pub fn reset(&mut self) {
        self.phase = FlexPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANDS: FlexBands = FlexBands {
        start: 160.0,
        commit: 100.0,
        release: 160.0,
    };

    fn run(angles: &[f64]) -> (FlexCycle, Vec<FlexTransition>) {
        let mut cycle = FlexCycle::default();
        let mut previous = None;
        let mut transitions = Vec::new();
        for &angle in angles {
            if let Some(t) = cycle.step(FlexSignals::from_angle(angle, previous, BANDS)) {
                transitions.push(t);
            }
            previous = Some(angle);
        }
        (cycle, transitions)
    }

    #[test]
    fn test_full_cycle() {
        let (cycle, transitions) = run(&[170.0, 150.0, 95.0, 90.0, 90.0, 120.0, 165.0]);
        assert_eq!(
            transitions,
            vec![
                FlexTransition::Started,
                FlexTransition::Committed,
                FlexTransition::ReachedHold,
                FlexTransition::Releasing,
                FlexTransition::Completed,
            ]
        );
        assert_eq!(cycle.phase(), FlexPhase::Idle);
    }

    #[test]
    fn test_false_start_returns_to_idle() {
        let (_, transitions) = run(&[170.0, 150.0, 145.0, 155.0, 165.0]);
        assert_eq!(
            transitions,
            vec![FlexTransition::Started, FlexTransition::FalseStart]
        );
    }

    #[test]
    fn test_shallow_wobble_never_starts() {
        let (_, transitions) = run(&[170.0, 165.0, 170.0]);
        assert!(transitions.is_empty());
    }

    #[test]
    fn test_no_direction_without_previous_frame() {
        let signals = FlexSignals::from_angle(90.0, None, BANDS);
        assert!(signals.entered && signals.committed);
        assert!(!signals.bottomed && !signals.rising);
    }
}
