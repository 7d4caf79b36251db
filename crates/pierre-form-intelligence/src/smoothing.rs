// ABOUTME: Per-frame smoothing primitives for noisy pose metrics
// ABOUTME: Fixed-capacity moving-average ring, exponential smoother and consecutive-frame streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Smoothing primitives
//!
//! All three types do constant work per frame and never allocate after
//! construction.

/// Fixed-capacity circular buffer with an O(1) simple moving average
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    samples: Box<[f64]>,
    next: usize,
    len: usize,
    sum: f64,
}

impl SmoothingWindow {
    /// Create a window holding at most `capacity` samples (minimum 1)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)].into_boxed_slice(),
            next: 0,
            len: 0,
            sum: 0.0,
        }
    }

    /// Add a sample, evicting the oldest when full, and return the new mean
    pub fn push(&mut self, value: f64) -> f64 {
        let capacity = self.samples.len();
        if self.len == capacity {
            self.sum -= self.samples[self.next];
        } else {
            self.len += 1;
        }
        self.samples[self.next] = value;
        self.sum += value;
        self.next = (self.next + 1) % capacity;

        // Re-anchor the running sum once per lap so rounding error cannot accumulate
        if self.next == 0 {
            self.sum = self.samples[..self.len].iter().sum();
        }
        self.sum / self.len as f64
    }

    /// Mean of the buffered samples, `None` when empty
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.len > 0).then(|| self.sum / self.len as f64)
    }

    /// Most recently pushed sample
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        let capacity = self.samples.len();
        Some(self.samples[(self.next + capacity - 1) % capacity])
    }

    /// Number of buffered samples
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no sample has been pushed since construction or `clear`
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of buffered samples
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        self.next = 0;
        self.len = 0;
        self.sum = 0.0;
    }
}

/// Exponential smoother: `value = retain * value + (1 - retain) * sample`
#[derive(Debug, Clone, Copy)]
pub struct ExponentialSmoother {
    retain: f64,
    initial: f64,
    value: f64,
}

impl ExponentialSmoother {
    /// Create a smoother starting at `initial`
    #[must_use]
    pub fn new(retain: f64, initial: f64) -> Self {
        Self {
            retain: retain.clamp(0.0, 1.0),
            initial,
            value: initial,
        }
    }

    /// Blend in a sample and return the smoothed value
    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = self.retain.mul_add(self.value, (1.0 - self.retain) * sample);
        self.value
    }

    /// Current smoothed value
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Return to the initial value
    pub fn reset(&mut self) {
        self.value = self.initial;
    }
}

/// Counts consecutive frames on which a condition held
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStreak {
    count: u32,
}

impl FrameStreak {
    /// Record this frame's condition and return the current streak length
    pub fn observe(&mut self, condition: bool) -> u32 {
        self.count = if condition { self.count + 1 } else { 0 };
        self.count
    }

    /// Record this frame and report whether the streak has reached `frames`
    pub fn reached(&mut self, condition: bool, frames: u32) -> bool {
        self.observe(condition) >= frames
    }

    /// Current streak length
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Break the streak
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
