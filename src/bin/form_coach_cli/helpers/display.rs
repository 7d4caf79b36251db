// ABOUTME: Output formatting helpers for form-coach-cli
// ABOUTME: Prints the session summary as pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use pierre_form_coach::SessionStatistics;

/// Print the session summary as pretty JSON on stdout
pub fn print_summary(summary: &SessionStatistics) -> Result<()> {
    let json =
        serde_json::to_string_pretty(summary).context("Failed to encode session summary")?;
    println!("{json}");
    Ok(())
}
