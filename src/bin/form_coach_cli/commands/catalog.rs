// ABOUTME: Catalogue commands for form-coach-cli
// ABOUTME: Lists supported exercises and prints the effective threshold configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use pierre_form_coach::config::load_from_env;
use pierre_form_coach::ExerciseKind;

/// Print one line per supported exercise
pub fn list_exercises() {
    println!("{:<14} {:<14} {:<6}", "NAME", "DISPLAY", "TIMED");
    for kind in ExerciseKind::ALL {
        println!(
            "{:<14} {:<14} {:<6}",
            kind.as_str(),
            kind.display_name(),
            if kind.default_timed() { "yes" } else { "no" }
        );
    }
}

/// Print the environment-loaded configuration as pretty JSON
pub fn show_thresholds() -> Result<()> {
    let config = load_from_env().context("Invalid form configuration")?;
    let json = serde_json::to_string_pretty(&config).context("Failed to encode configuration")?;
    println!("{json}");
    Ok(())
}
