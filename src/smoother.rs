//! Majority-vote smoothing of classified emotion labels.
//!
//! Single-frame predictions flicker. The smoother keeps the last few labels
//! and reports whichever occurs most often among them.

use crate::{constants::EMOTION_HISTORY_SIZE, emotion::EmotionLabel, Error, Result};
use std::collections::VecDeque;

/// Bounded FIFO of recent labels with majority voting
#[derive(Debug, Clone)]
pub struct EmotionSmoother {
    capacity: usize,
    history: VecDeque<EmotionLabel>,
}

impl Default for EmotionSmoother {
    fn default() -> Self {
        Self {
            capacity: EMOTION_HISTORY_SIZE,
            history: VecDeque::with_capacity(EMOTION_HISTORY_SIZE),
        }
    }
}

impl EmotionSmoother {
    /// Create a smoother remembering the last `capacity` labels
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config("Emotion history size must be greater than 0".to_string()));
        }
        Ok(Self {
            capacity,
            history: VecDeque::with_capacity(capacity),
        })
    }

    /// Record a freshly classified label and return the smoothed label
    pub fn observe(&mut self, label: EmotionLabel) -> EmotionLabel {
        if self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(label);

        // History is non-empty here
        Self::vote(&self.history).unwrap_or(label)
    }

    /// Current majority without recording anything
    #[must_use]
    pub fn majority(&self) -> Option<EmotionLabel> {
        Self::vote(&self.history)
    }

    /// Held labels, oldest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = EmotionLabel> + '_ {
        self.history.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget all recorded labels
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Most frequent label. Among equally frequent labels the one whose
    /// earliest occurrence is oldest wins.
    fn vote(history: &VecDeque<EmotionLabel>) -> Option<EmotionLabel> {
        let mut counts = [0usize; EmotionLabel::ALL.len()];
        for &label in history {
            counts[Self::slot(label)] += 1;
        }

        let mut best: Option<(EmotionLabel, usize)> = None;
        for &label in history {
            let count = counts[Self::slot(label)];
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }

    fn slot(label: EmotionLabel) -> usize {
        label as usize
    }
}
