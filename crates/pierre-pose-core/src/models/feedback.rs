// ABOUTME: Coaching feedback value types shared by analyzers and session summaries
// ABOUTME: Message plus severity tier, with count-based severity classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity tier of a coaching message
///
/// Ordering follows severity, so `High` sorts above `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackPriority {
    /// Style note, surfaced only when nothing more important is pending
    Low,
    /// Form issue worth correcting soon
    Medium,
    /// Safety or effectiveness issue, surfaced first
    High,
}

impl FeedbackPriority {
    /// Severity from how often a message recurred during a session
    ///
    /// Returns `None` for messages seen fewer than twice.
    #[must_use]
    pub const fn from_occurrences(count: u32) -> Option<Self> {
        match count {
            0 | 1 => None,
            2 => Some(Self::Low),
            3 | 4 => Some(Self::Medium),
            _ => Some(Self::High),
        }
    }

    /// Uppercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for FeedbackPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coaching message with its severity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Text shown or spoken to the user
    pub message: String,
    /// Severity tier
    pub priority: FeedbackPriority,
}

impl FeedbackItem {
    /// Create a feedback item
    #[must_use]
    pub fn new(message: impl Into<String>, priority: FeedbackPriority) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }
}
