// ABOUTME: Concrete exercise analyzers and the factory that builds them from configuration
// ABOUTME: One module per exercise plus the flex-cycle phase machine they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise analyzers
//!
//! Curl, squat, pushup and lunge share the angle-driven [`flex_cycle`]
//! machine. Plank and jumping jack run their own phase machines because they
//! are driven by alignment and composite scores rather than a joint angle.

/// Angle-driven Idle/Start/Compressing/Hold/Releasing phase machine
pub mod flex_cycle;

/// Bicep curl
pub mod curl;
/// Jumping jack
pub mod jumping_jack;
/// Forward lunge
pub mod lunge;
/// Forearm plank
pub mod plank;
/// Pushup
pub mod pushup;
/// Bodyweight squat
pub mod squat;

pub use curl::CurlAnalyzer;
pub use flex_cycle::{FlexCycle, FlexPhase};
pub use jumping_jack::{pace_consistency, JumpingJackAnalyzer, JumpingJackPhase};
pub use lunge::LungeAnalyzer;
pub use plank::{PlankAnalyzer, PlankPhase, ViolationTimers};
pub use pushup::PushupAnalyzer;
pub use squat::SquatAnalyzer;

use pierre_pose_core::ExerciseKind;

use crate::analyzer::ExerciseAnalyzer;
use crate::config::FormConfig;

/// Build a fresh analyzer for `kind` using the thresholds in `config`
#[must_use]
pub fn build_analyzer(kind: ExerciseKind, config: &FormConfig) -> Box<dyn ExerciseAnalyzer> {
    let settings = &config.settings;
    let thresholds = &config.thresholds;
    match kind {
        ExerciseKind::BicepCurl => Box::new(CurlAnalyzer::new(thresholds.curl.clone(), settings)),
        ExerciseKind::Squat => Box::new(SquatAnalyzer::new(thresholds.squat.clone(), settings)),
        ExerciseKind::Pushup => Box::new(PushupAnalyzer::new(thresholds.pushup.clone(), settings)),
        ExerciseKind::Lunge => Box::new(LungeAnalyzer::new(thresholds.lunge.clone(), settings)),
        ExerciseKind::Plank => Box::new(PlankAnalyzer::new(thresholds.plank.clone(), settings)),
        ExerciseKind::JumpingJack => Box::new(JumpingJackAnalyzer::new(
            thresholds.jumping_jack.clone(),
            settings,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_builds_matching_kind() {
        let config = FormConfig::default();
        for kind in ExerciseKind::ALL {
            let analyzer = build_analyzer(kind, &config);
            assert_eq!(analyzer.kind(), kind);
            assert_eq!(analyzer.rep_count(), 0);
            assert_eq!(analyzer.is_timed(), kind.default_timed());
        }
    }
}
