//! End-to-end tests of the detection pipeline with a scripted classifier


use opencv::core::Mat;
use std::time::{Duration, Instant};
use student_emotion_detection::{
    catalog::BgrColor,
    emotion::EmotionLabel,
    overlay::OverlayPlan,
    pipeline::{DetectionPipeline, TickOutcome},
    scheduler::DetectionScheduler,
    smoother::EmotionSmoother,
    Error,
};
use test_helpers::{scores, ScriptedClassifier};

const INTERVAL: Duration = Duration::from_millis(1500);

/// Instant of the n-th firing tick (1-based) for a pipeline started at `start`
fn fire_time(start: Instant, n: u32) -> Instant {
    start + INTERVAL * n
}

#[test]
fn test_consistently_happy_student() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::repeating(&[("happy", 0.9), ("sad", 0.05), ("neutral", 0.05)], 5);
    let mut pipeline = DetectionPipeline::new(classifier, start);
    let frame = Mat::default();

    for n in 1..=5 {
        let outcome = pipeline.tick(&frame, fire_time(start, n));
        assert_eq!(outcome, TickOutcome::Updated(EmotionLabel::Happy), "tick {n}");
        assert_eq!(pipeline.current(), Some(EmotionLabel::Happy));
    }

    let plan = OverlayPlan::for_state(pipeline.current());
    let message = plan.line_starting_with("Message:").unwrap();
    assert_eq!(message.text, "Message: Student appears excited");
    assert_eq!(message.color, BgrColor::GREEN);
    assert!(plan.line_starting_with("Action:").is_some());
}

#[test]
fn test_frustrated_student_has_no_action_line() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::repeating(&[("angry", 0.8), ("sad", 0.1), ("neutral", 0.1)], 1);
    let mut pipeline = DetectionPipeline::new(classifier, start);

    let outcome = pipeline.tick(&Mat::default(), fire_time(start, 1));
    assert_eq!(outcome, TickOutcome::Updated(EmotionLabel::Angry));

    let plan = OverlayPlan::for_state(pipeline.current());
    let message = plan.line_starting_with("Message:").unwrap();
    assert_eq!(message.text, "Message: Student appears frustrated");
    assert_eq!(message.color, BgrColor::RED);
    assert!(plan.line_starting_with("Action:").is_none());
    assert!(plan.line_starting_with("Press 'q'").is_some());
}

#[test]
fn test_failure_is_sticky_and_still_marks_fired() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::new(vec![
        Ok(scores(&[("surprise", 0.7), ("happy", 0.3)])),
        Err(Error::Classification("Face could not be detected".to_string())),
    ]);
    let mut pipeline = DetectionPipeline::new(classifier, start);
    let frame = Mat::default();

    pipeline.tick(&frame, fire_time(start, 1));
    assert_eq!(pipeline.current(), Some(EmotionLabel::Surprise));

    let failed_at = fire_time(start, 2);
    assert_eq!(pipeline.tick(&frame, failed_at), TickOutcome::Failed);
    assert_eq!(pipeline.current(), Some(EmotionLabel::Surprise));
    assert_eq!(pipeline.scheduler().last_fire(), failed_at);
    assert_eq!(pipeline.smoother().len(), 1);
}

#[test]
fn test_failure_does_not_cause_immediate_retry() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::new(vec![
        Err(Error::Classification("boom".to_string())),
        Ok(scores(&[("fear", 1.0)])),
    ]);
    let mut pipeline = DetectionPipeline::new(classifier, start);
    let frame = Mat::default();

    let failed_at = fire_time(start, 1);
    assert_eq!(pipeline.tick(&frame, failed_at), TickOutcome::Failed);
    assert_eq!(pipeline.tick(&frame, failed_at + Duration::from_millis(10)), TickOutcome::Skipped);
    assert_eq!(pipeline.tick(&frame, failed_at + INTERVAL), TickOutcome::Updated(EmotionLabel::Fear));
    assert_eq!(pipeline.classifier_mut().calls, 2);
}

#[test]
fn test_unrecognized_label_counts_as_failure() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::new(vec![Ok(scores(&[("contempt", 0.9), ("happy", 0.1)]))]);
    let mut pipeline = DetectionPipeline::new(classifier, start);

    assert_eq!(pipeline.tick(&Mat::default(), fire_time(start, 1)), TickOutcome::Failed);
    assert_eq!(pipeline.current(), None);
    assert!(pipeline.smoother().is_empty());
}

#[test]
fn test_skipped_ticks_do_not_call_classifier() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::repeating(&[("happy", 1.0)], 10);
    let mut pipeline = DetectionPipeline::new(classifier, start);
    let frame = Mat::default();

    // 30 frames per second for just under one interval
    for i in 0..44u32 {
        let now = start + Duration::from_millis(33) * i;
        assert_eq!(pipeline.tick(&frame, now), TickOutcome::Skipped);
    }
    assert_eq!(pipeline.classifier_mut().calls, 0);
    assert_eq!(pipeline.current(), None);
}

#[test]
fn test_majority_resists_single_outlier() {
    let start = Instant::now();
    let classifier = ScriptedClassifier::new(vec![
        Ok(scores(&[("neutral", 0.8), ("sad", 0.2)])),
        Ok(scores(&[("neutral", 0.7), ("sad", 0.3)])),
        Ok(scores(&[("sad", 0.9), ("neutral", 0.1)])),
        Ok(scores(&[("neutral", 0.6), ("sad", 0.4)])),
    ]);
    let mut pipeline = DetectionPipeline::new(classifier, start);
    let frame = Mat::default();

    let outcomes: Vec<_> = (1..=4).map(|n| pipeline.tick(&frame, fire_time(start, n))).collect();
    assert!(outcomes.iter().all(|o| *o == TickOutcome::Updated(EmotionLabel::Neutral)));
}

#[test]
fn test_smoothed_label_follows_eviction() {
    let start = Instant::now();
    let mut script: Vec<_> = (0..3).map(|_| Ok(scores(&[("happy", 1.0)]))).collect();
    script.extend((0..4).map(|_| Ok(scores(&[("disgust", 1.0)]))));
    let mut pipeline = DetectionPipeline::with_parts(
        ScriptedClassifier::new(script),
        DetectionScheduler::new(start),
        EmotionSmoother::default(),
    );
    let frame = Mat::default();

    let labels: Vec<_> = (1..=7)
        .map(|n| match pipeline.tick(&frame, fire_time(start, n)) {
            TickOutcome::Updated(label) => label,
            other => panic!("Unexpected outcome {other:?}"),
        })
        .collect();

    use EmotionLabel::{Disgust, Happy};
    assert_eq!(labels, vec![Happy, Happy, Happy, Happy, Happy, Disgust, Disgust]);
}
