// ABOUTME: Form coach CLI - replays recorded landmark frames through the form analyzers
// ABOUTME: Prints per-frame analysis results, session summaries and the exercise catalogue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Replay a squat recording, one JSON result per frame then the summary
//! form-coach-cli replay --input squat.jsonl --exercise squat
//!
//! # Only print the session summary of a timed plank
//! form-coach-cli replay --input plank.jsonl --exercise plank --timed --summary-only
//!
//! # List supported exercises
//! form-coach-cli exercises
//!
//! # Show the effective thresholds after FORM_* overrides
//! FORM_SMOOTHING_WINDOW=7 form-coach-cli thresholds
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pierre_form_coach::logging::{self, LoggingConfig};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "form-coach-cli",
    about = "Pierre Form Coach CLI",
    long_about = "Replay recorded pose landmark frames through the exercise form analyzers."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze a JSON Lines file of landmark frames
    Replay {
        /// Input file, one `{"dt_seconds": .., "landmarks": {..}}` object per line
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Exercise to analyze (e.g. squat, bicep_curl, plank)
        #[arg(long, short = 'e')]
        exercise: String,

        /// Run the exercise in timed mode
        #[arg(long)]
        timed: bool,

        /// Print only the session summary
        #[arg(long)]
        summary_only: bool,
    },

    /// List supported exercises
    Exercises,

    /// Print the effective configuration as JSON
    Thresholds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig::from_env().with_level("debug").init()?;
    } else {
        logging::init_from_env()?;
    }
    debug!("Pierre Form Coach CLI");

    match cli.command {
        Command::Replay {
            input,
            exercise,
            timed,
            summary_only,
        } => commands::replay::run(&input, &exercise, timed, summary_only),
        Command::Exercises => {
            commands::catalog::list_exercises();
            Ok(())
        }
        Command::Thresholds => commands::catalog::show_thresholds(),
    }
}
