//! Per-frame detection logic: interval gating, classification, smoothing.

use crate::{
    classifier::EmotionClassifier,
    emotion::EmotionLabel,
    scheduler::DetectionScheduler,
    smoother::EmotionSmoother,
    Result,
};
use log::{debug, warn};
use opencv::core::Mat;
use std::time::Instant;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Interval not elapsed, classifier not called
    Skipped,
    /// Classification succeeded; carries the new smoothed label
    Updated(EmotionLabel),
    /// Classifier was called and failed; display state untouched
    Failed,
}

/// Scheduler, classifier and smoother wired together.
///
/// Holds the label currently on display. It only changes after a successful
/// classification, so a failing classifier leaves the last good label up.
pub struct DetectionPipeline<C> {
    classifier: C,
    scheduler: DetectionScheduler,
    smoother: EmotionSmoother,
    current: Option<EmotionLabel>,
}

impl<C: EmotionClassifier> DetectionPipeline<C> {
    /// Pipeline with default interval and history size, starting at `start`
    pub fn new(classifier: C, start: Instant) -> Self {
        Self::with_parts(classifier, DetectionScheduler::new(start), EmotionSmoother::default())
    }

    pub fn with_parts(classifier: C, scheduler: DetectionScheduler, smoother: EmotionSmoother) -> Self {
        Self {
            classifier,
            scheduler,
            smoother,
            current: None,
        }
    }

    /// Restart the interval from `now` without touching history
    pub fn restart_schedule(&mut self, now: Instant) {
        self.scheduler.mark_fired(now);
    }

    /// Process one frame captured at `now`
    pub fn tick(&mut self, frame: &Mat, now: Instant) -> TickOutcome {
        if !self.scheduler.should_fire(now) {
            return TickOutcome::Skipped;
        }

        let outcome = match self.detect(frame) {
            Ok(dominant) => {
                let smoothed = self.smoother.observe(dominant);
                debug!("Detected {}, smoothed to {}", dominant, smoothed);
                self.current = Some(smoothed);
                TickOutcome::Updated(smoothed)
            }
            Err(e) => {
                warn!("Error in emotion detection: {}", e);
                TickOutcome::Failed
            }
        };

        // Fixed period whether or not the classifier succeeded
        self.scheduler.mark_fired(now);
        outcome
    }

    fn detect(&mut self, frame: &Mat) -> Result<EmotionLabel> {
        self.classifier.classify(frame)?.dominant()
    }

    /// Label on display, `None` before the first successful detection
    #[must_use]
    pub fn current(&self) -> Option<EmotionLabel> {
        self.current
    }

    #[must_use]
    pub fn scheduler(&self) -> &DetectionScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn smoother(&self) -> &EmotionSmoother {
        &self.smoother
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }
}
