// ABOUTME: FeedbackManager - turns noisy per-frame observations into a rate-limited message stream
// ABOUTME: Sliding-window majority view, priority queue, delivered-recently cache and persistent counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Feedback Manager
//!
//! Analyzers `record` every issue they observe. The manager keeps two views:
//!
//! - a sliding window of the last `window_size` observations, from which the
//!   majority view (messages present in more than half the window) is derived
//! - a priority queue of pending messages, which `get` draws from
//!
//! The queue holds at most one entry per message, carrying the latest priority
//! and recency. An entry expires as soon as its last occurrence leaves the
//! sliding window, so a condition is redelivered only while it keeps being
//! observed.
//!
//! Delivery is frame-counted: `get` returns nothing until `min_frame_gap`
//! frames have been advanced since the last non-empty delivery.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use pierre_pose_core::constants::feedback::{
    DEFAULT_WINDOW_SIZE, DELIVERED_CACHE_CAPACITY, SUMMARY_HIGH_PRIORITY_OCCURRENCES,
    SUMMARY_MIN_OCCURRENCES,
};
use pierre_pose_core::{FeedbackItem, FeedbackPriority};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingFeedback {
    priority: FeedbackPriority,
    sequence: u64,
    message: String,
}

impl Ord for PendingFeedback {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.sequence.cmp(&other.sequence))
            .then_with(|| other.message.cmp(&self.message))
    }
}

impl PartialOrd for PendingFeedback {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A recurring issue for session summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    /// Message text
    pub message: String,
    /// Times recorded since the manager was created
    pub occurrences: u32,
    /// `High` above five occurrences, otherwise `Medium`
    pub priority: FeedbackPriority,
}

/// Prioritized, de-duplicated, rate-limited feedback delivery
#[derive(Debug, Clone)]
pub struct FeedbackManager {
    window_size: usize,
    window: VecDeque<FeedbackItem>,
    queue: BinaryHeap<PendingFeedback>,
    persistent: HashMap<String, u32>,
    delivered: VecDeque<String>,
    majority: Vec<String>,
    frames_since_delivery: u32,
    sequence: u64,
}

impl FeedbackManager {
    /// Create a manager with a sliding window of `window_size` observations
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window_size,
            window: VecDeque::with_capacity(window_size + 1),
            queue: BinaryHeap::new(),
            persistent: HashMap::new(),
            delivered: VecDeque::with_capacity(DELIVERED_CACHE_CAPACITY + 1),
            majority: Vec::new(),
            frames_since_delivery: 0,
            sequence: 0,
        }
    }

    /// Record one observation of an issue
    pub fn record(&mut self, message: impl Into<String>, priority: FeedbackPriority) {
        let message = message.into();
        self.sequence += 1;

        self.window
            .push_back(FeedbackItem::new(message.clone(), priority));
        while self.window.len() > self.window_size {
            if let Some(evicted) = self.window.pop_front() {
                self.expire_if_unobserved(&evicted.message);
            }
        }

        self.queue.retain(|pending| pending.message != message);
        self.queue.push(PendingFeedback {
            priority,
            sequence: self.sequence,
            message: message.clone(),
        });

        *self.persistent.entry(message).or_insert(0) += 1;
        self.refresh_majority();
    }

    /// Count one analyzed frame toward the delivery gap
    pub fn advance_frame(&mut self) {
        self.frames_since_delivery = self.frames_since_delivery.saturating_add(1);
    }

    /// Deliver up to `max_items` pending messages, highest priority first
    ///
    /// Returns nothing until `min_frame_gap` frames have passed since the last
    /// non-empty delivery. Messages in the delivered-recently cache are
    /// skipped. Every entry popped while searching is put back, so a message
    /// stays pending until its observations leave the window.
    pub fn get(&mut self, max_items: usize, min_frame_gap: u32) -> Vec<FeedbackItem> {
        if self.frames_since_delivery < min_frame_gap {
            return Vec::new();
        }

        let mut popped = Vec::new();
        let mut selected = Vec::new();
        while selected.len() < max_items {
            let Some(entry) = self.queue.pop() else {
                break;
            };
            if !self.delivered.contains(&entry.message) {
                selected.push(FeedbackItem::new(entry.message.clone(), entry.priority));
            }
            popped.push(entry);
        }
        self.queue.extend(popped);

        if !selected.is_empty() {
            for item in &selected {
                self.remember_delivered(&item.message);
            }
            debug!(
                feedback.count = selected.len(),
                feedback.top = %selected[0].message,
                feedback.frames_waited = self.frames_since_delivery,
                "Feedback delivered"
            );
            self.frames_since_delivery = 0;
        }
        selected
    }

    /// Clear window, queue, delivered cache and frame counter
    ///
    /// Persistent occurrence counts survive.
    pub fn reset(&mut self) {
        self.window.clear();
        self.queue.clear();
        self.delivered.clear();
        self.majority.clear();
        self.frames_since_delivery = 0;
    }

    /// Clear everything, including persistent occurrence counts
    pub fn clear_history(&mut self) {
        self.reset();
        self.persistent.clear();
    }

    /// Messages recorded at least `min_occurrences` times, most frequent first
    #[must_use]
    pub fn persistent_issues(&self, min_occurrences: u32) -> Vec<String> {
        self.ranked_counts()
            .into_iter()
            .filter(|(_, count)| *count >= min_occurrences)
            .map(|(message, _)| message.to_owned())
            .collect()
    }

    /// Recurring issues with a count-derived priority, most frequent first
    #[must_use]
    pub fn session_summary(&self) -> Vec<IssueSummary> {
        self.ranked_counts()
            .into_iter()
            .filter(|(_, count)| *count >= SUMMARY_MIN_OCCURRENCES)
            .map(|(message, occurrences)| IssueSummary {
                message: message.to_owned(),
                occurrences,
                priority: if occurrences > SUMMARY_HIGH_PRIORITY_OCCURRENCES {
                    FeedbackPriority::High
                } else {
                    FeedbackPriority::Medium
                },
            })
            .collect()
    }

    /// Times `message` has been recorded since creation or `clear_history`
    #[must_use]
    pub fn occurrences(&self, message: &str) -> u32 {
        self.persistent.get(message).copied().unwrap_or(0)
    }

    /// Messages present in more than half of the current window
    #[must_use]
    pub fn majority(&self) -> &[String] {
        &self.majority
    }

    /// Number of distinct messages waiting in the queue
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of observations in the sliding window
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Frames advanced since the last non-empty delivery
    #[must_use]
    pub const fn frames_since_delivery(&self) -> u32 {
        self.frames_since_delivery
    }

    fn expire_if_unobserved(&mut self, message: &str) {
        if !self.window.iter().any(|item| item.message == message) {
            self.queue.retain(|pending| pending.message != message);
        }
    }

    fn remember_delivered(&mut self, message: &str) {
        if self.delivered.iter().any(|cached| cached == message) {
            return;
        }
        self.delivered.push_back(message.to_owned());
        while self.delivered.len() > DELIVERED_CACHE_CAPACITY {
            self.delivered.pop_front();
        }
    }

    fn refresh_majority(&mut self) {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for item in &self.window {
            match counts.iter_mut().find(|(message, _)| *message == item.message) {
                Some((_, count)) => *count += 1,
                None => counts.push((item.message.as_str(), 1)),
            }
        }
        let total = self.window.len();
        self.majority = counts
            .into_iter()
            .filter(|(_, count)| count * 2 > total)
            .map(|(message, _)| message.to_owned())
            .collect();
    }

    fn ranked_counts(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .persistent
            .iter()
            .map(|(message, count)| (message.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl Default for FeedbackManager {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(manager: &mut FeedbackManager, frames: u32) {
        for _ in 0..frames {
            manager.advance_frame();
        }
    }

    #[test]
    fn test_majority_requires_more_than_half_the_window() {
        let mut manager = FeedbackManager::new(4);
        manager.record("a", FeedbackPriority::Low);
        manager.record("b", FeedbackPriority::Low);
        assert!(manager.majority().is_empty());
        manager.record("a", FeedbackPriority::Low);
        assert_eq!(manager.majority(), ["a".to_owned()]);
        manager.record("b", FeedbackPriority::Low);
        assert!(manager.majority().is_empty());
    }

    #[test]
    fn test_queue_keeps_one_entry_per_message() {
        let mut manager = FeedbackManager::new(10);
        for _ in 0..5 {
            manager.record("same", FeedbackPriority::Medium);
        }
        assert_eq!(manager.pending_len(), 1);
        assert_eq!(manager.window_len(), 5);
        assert_eq!(manager.occurrences("same"), 5);
    }

    #[test]
    fn test_entries_expire_when_they_leave_the_window() {
        let mut manager = FeedbackManager::new(3);
        manager.record("old", FeedbackPriority::High);
        for _ in 0..3 {
            manager.record("new", FeedbackPriority::Low);
        }
        assert_eq!(manager.pending_len(), 1);
        advance(&mut manager, 15);
        let delivered = manager.get(1, 15);
        assert_eq!(delivered[0].message, "new");
    }

    #[test]
    fn test_reset_clears_counter_but_keeps_persistent_counts() {
        let mut manager = FeedbackManager::new(10);
        manager.record("issue", FeedbackPriority::High);
        advance(&mut manager, 20);
        manager.reset();
        assert_eq!(manager.frames_since_delivery(), 0);
        assert_eq!(manager.pending_len(), 0);
        assert_eq!(manager.occurrences("issue"), 1);
        manager.clear_history();
        assert_eq!(manager.occurrences("issue"), 0);
    }
}
