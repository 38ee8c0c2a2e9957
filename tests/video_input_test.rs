//! Tests for reading frames from video files


use opencv::{
    core::{Scalar, Size, CV_8UC3},
    prelude::*,
    videoio::VideoWriter,
};
use std::path::PathBuf;
use student_emotion_detection::{
    app::EmotionApp,
    config::Config,
    video::{FrameSource, VideoInput, VideoSource},
};
use test_helpers::ScriptedClassifier;

/// Write a short MJPG clip of solid frames. Returns `None` when the local
/// `OpenCV` build has no writer for the codec.
fn write_test_video(name: &str, frames: usize, width: i32, height: i32) -> Option<PathBuf> {
    let path = std::env::temp_dir().join(format!("student_emotion_{}_{}", std::process::id(), name));
    let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G').ok()?;
    let mut writer = VideoWriter::new(path.to_str()?, fourcc, 15.0, Size::new(width, height), true).ok()?;
    if !writer.is_opened().ok()? {
        return None;
    }

    for i in 0..frames {
        let shade = (i * 20 % 255) as f64;
        let frame = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(shade)).ok()?;
        writer.write(&frame).ok()?;
    }
    writer.release().ok()?;
    Some(path)
}

#[test]
fn test_video_file_frames_then_end_of_stream() {
    let Some(path) = write_test_video("frames.avi", 8, 320, 240) else {
        eprintln!("Skipping: no MJPG writer available");
        return;
    };

    let mut source = VideoSource::open(VideoInput::File(path.display().to_string())).expect("Failed to open clip");
    let mut count = 0;
    while let Some(frame) = source.next_frame().expect("Read failed") {
        assert_eq!((frame.cols(), frame.rows()), (320, 240));
        count += 1;
    }
    assert_eq!(count, 8);
    assert!(source.next_frame().unwrap().is_none());
    source.release().unwrap();
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_headless_session_over_video_file() {
    let Some(path) = write_test_video("session.avi", 10, 640, 480) else {
        eprintln!("Skipping: no MJPG writer available");
        return;
    };

    let mut config = Config::default();
    config.display.headless = true;

    let source = VideoSource::open(VideoInput::File(path.display().to_string())).expect("Failed to open clip");
    let classifier = ScriptedClassifier::repeating(&[("neutral", 1.0)], 10);
    let mut app = EmotionApp::with_parts(Box::new(source), Box::new(classifier), &config)
        .expect("Failed to assemble session");
    let summary = app.run();

    assert_eq!(summary.frames, 10);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_unreadable_file_is_rejected() {
    let path = std::env::temp_dir().join(format!("student_emotion_{}_garbage.avi", std::process::id()));
    std::fs::write(&path, b"not a video").unwrap();

    let result = VideoSource::open(VideoInput::File(path.display().to_string()));
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}
