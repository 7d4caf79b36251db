// ABOUTME: Replay command for form-coach-cli
// ABOUTME: Streams recorded frames through the coordinator and prints results and the summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pierre_form_coach::config::load_from_env;
use pierre_form_coach::AnalysisCoordinator;
use tracing::info;

use crate::helpers::display::print_summary;
use crate::helpers::frames::for_each_frame;

/// Replay `input` as `exercise` and print the results
pub fn run(input: &Path, exercise: &str, timed: bool, summary_only: bool) -> Result<()> {
    let config = load_from_env().context("Invalid form configuration")?;
    let mut coordinator =
        AnalysisCoordinator::new(config).context("Invalid form configuration")?;
    coordinator
        .select_exercise(exercise, timed)
        .with_context(|| format!("Cannot replay exercise '{exercise}'"))?;

    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    info!(input = %input.display(), exercise, timed, "Replaying frames");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let frames = for_each_frame(BufReader::new(file), |frame| {
        let result = coordinator.process_frame(&frame.landmarks, frame.dt_seconds);
        if !summary_only {
            serde_json::to_writer(&mut out, &result)?;
            writeln!(out)?;
        }
        Ok(())
    })
    .with_context(|| format!("Failed to replay {}", input.display()))?;
    drop(out);

    let summary = coordinator.end_session();
    info!(frames, reps = summary.total_reps(), "Replay finished");
    print_summary(&summary)
}
