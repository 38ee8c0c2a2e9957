//! Integration tests for a complete emotion detection session


use student_emotion_detection::{
    app::EmotionApp,
    classifier::OnnxEmotionClassifier,
    config::Config,
    video::{VideoInput, VideoSource},
};
use test_helpers::{BlankFrames, FailingFrames, ScriptedClassifier};

fn headless_config() -> Config {
    let mut config = Config::default();
    config.display.headless = true;
    config
}

/// A headless session drains the source, renders every frame and releases the device
#[test]
fn test_headless_session_runs_to_end_of_stream() {
    let source = BlankFrames::new(12, 640, 480);
    let released = source.release_flag();
    let classifier = ScriptedClassifier::repeating(&[("happy", 1.0)], 10);

    let mut app = EmotionApp::with_parts(Box::new(source), Box::new(classifier), &headless_config())
        .expect("Failed to assemble session");
    let summary = app.run();

    assert_eq!(summary.frames, 12);
    assert!(released.get(), "Source must be released when the session ends");
    // Twelve blank frames are processed well within one detection interval
    assert_eq!(summary.detections + summary.failures, 0);
    assert_eq!(summary.last_emotion, None);
    assert_eq!(app.current_emotion(), None);
}

#[test]
fn test_headless_session_with_fast_interval_classifies() {
    let mut config = headless_config();
    config.detection.interval_seconds = 1e-9;

    let source = BlankFrames::new(3, 600, 400);
    let classifier = ScriptedClassifier::repeating(&[("sad", 0.6), ("neutral", 0.4)], 3);
    let mut app = EmotionApp::with_parts(Box::new(source), Box::new(classifier), &config)
        .expect("Failed to assemble session");
    let summary = app.run();

    assert_eq!(summary.frames, 3);
    assert!(summary.detections >= 1);
    assert!(summary.detections <= summary.frames);
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.last_emotion, app.current_emotion());
}

#[test]
fn test_empty_stream_still_releases_source() {
    let source = BlankFrames::new(0, 640, 480);
    let released = source.release_flag();
    let classifier = ScriptedClassifier::new(Vec::new());

    let mut app = EmotionApp::with_parts(Box::new(source), Box::new(classifier), &headless_config())
        .expect("Failed to assemble session");
    let summary = app.run();

    assert_eq!(summary.frames, 0);
    assert!(released.get());
}

/// A read error partway through ends the session like end of stream
#[test]
fn test_read_error_mid_session_ends_stream() {
    let source = FailingFrames::new(4, 640, 480);
    let released = source.release_flag();
    let classifier = ScriptedClassifier::repeating(&[("happy", 1.0)], 10);

    let mut app = EmotionApp::with_parts(Box::new(source), Box::new(classifier), &headless_config())
        .expect("Failed to assemble session");
    let summary = app.run();

    assert_eq!(summary.frames, 4);
    assert!(released.get(), "Source must be released after a read error");
}

/// Frames that cannot be resized are skipped, the session keeps going
#[test]
fn test_unusable_frames_are_skipped() {
    let source = BlankFrames::new(3, 0, 0);
    let released = source.release_flag();
    let classifier = ScriptedClassifier::new(Vec::new());

    let mut app = EmotionApp::with_parts(Box::new(source), Box::new(classifier), &headless_config())
        .expect("Failed to assemble session");
    let summary = app.run();

    assert_eq!(summary.frames, 0);
    assert!(released.get());
}

#[test]
fn test_invalid_config_is_rejected_before_running() {
    let mut config = headless_config();
    config.detection.history_size = 0;

    let result = EmotionApp::with_parts(
        Box::new(BlankFrames::new(1, 640, 480)),
        Box::new(ScriptedClassifier::new(Vec::new())),
        &config,
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_video_file_is_device_unavailable() {
    let result = VideoSource::open(VideoInput::File("/nonexistent/lecture.mp4".to_string()));
    assert!(result.is_err());
}

#[test]
#[ignore = "Requires the ONNX emotion model"]
fn test_onnx_classifier_on_blank_frame() {
    use student_emotion_detection::classifier::EmotionClassifier;

    let config = Config::default();
    let mut classifier = OnnxEmotionClassifier::new(
        &config.models.emotion_model,
        config.models.labels.clone(),
        config.models.input_size,
        None,
    )
    .expect("Failed to load emotion model");

    let frame = test_helpers::create_test_image(400, 600, opencv::core::CV_8UC3).unwrap();
    let scores = classifier.classify(&frame).expect("Classification failed");
    assert_eq!(scores.len(), config.models.labels.len());
    assert!(scores.dominant().is_ok());
}

#[test]
#[ignore = "Requires a connected camera"]
fn test_camera_session_opens() {
    let result = VideoSource::open(VideoInput::Camera(0));
    assert!(result.is_ok());
}
