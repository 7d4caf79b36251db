// ABOUTME: JSON Lines frame reader for form-coach-cli
// ABOUTME: Parses one recorded landmark frame per line, skipping blank lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::BufRead;

use anyhow::{Context, Result};
use pierre_form_coach::LandmarkSet;
use serde::Deserialize;

/// One recorded frame
#[derive(Debug, Deserialize)]
pub struct FrameRecord {
    /// Seconds since the previous frame
    pub dt_seconds: f64,
    /// Joints detected in this frame
    pub landmarks: LandmarkSet,
}

/// Parse one line; `None` for a blank line
pub fn parse_frame(line: &str, line_number: usize) -> Result<Option<FrameRecord>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .with_context(|| format!("Malformed frame on line {line_number}"))
}

/// Feed every frame in `reader` to `handle`, returning the number of frames
pub fn for_each_frame<R, F>(reader: R, mut handle: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(FrameRecord) -> Result<()>,
{
    let mut frames = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_number}"))?;
        if let Some(frame) = parse_frame(&line, line_number)? {
            handle(frame)?;
            frames += 1;
        }
    }
    Ok(frames)
}
