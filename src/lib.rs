//! Student emotion detection library.
//!
//! Watches a webcam feed, periodically classifies the student's facial
//! expression and overlays a message and a teaching recommendation on the
//! video. The building blocks:
//! - `OpenCV` for capture, resizing, drawing and display
//! - ONNX Runtime for the facial expression model
//! - A majority vote over the last few results to suppress flicker
//! - A fixed interval between classifier calls to bound their cost
//!
//! # Examples
//!
//! ## Smoothing
//!
//! ```
//! use student_emotion_detection::{emotion::EmotionLabel, smoother::EmotionSmoother};
//!
//! let mut smoother = EmotionSmoother::default();
//! smoother.observe(EmotionLabel::Happy);
//! smoother.observe(EmotionLabel::Sad);
//! assert_eq!(smoother.observe(EmotionLabel::Sad), EmotionLabel::Sad);
//! ```
//!
//! ## Scheduling
//!
//! ```
//! use std::time::{Duration, Instant};
//! use student_emotion_detection::scheduler::DetectionScheduler;
//!
//! let start = Instant::now();
//! let scheduler = DetectionScheduler::new(start);
//! assert!(!scheduler.should_fire(start + Duration::from_secs(1)));
//! assert!(scheduler.should_fire(start + Duration::from_millis(1500)));
//! ```
//!
//! ## Complete Session
//!
//! ```no_run
//! use student_emotion_detection::{app::EmotionApp, config::Config, video::VideoInput};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut app = EmotionApp::new(VideoInput::Camera(0), &config)?;
//! let summary = app.run();
//! println!("Processed {} frames", summary.frames);
//! # Ok(())
//! # }
//! ```

/// Emotion labels and classifier scores
pub mod emotion;

/// Majority-vote smoothing over recent labels
pub mod smoother;

/// Interval gate around the classifier
pub mod scheduler;

/// Messages, recommendations and colors per emotion
pub mod catalog;

/// Emotion classifier seam and ONNX implementation
pub mod classifier;

/// Haar cascade face locator
pub mod face_detection;

/// Scheduler, classifier and smoother composed per frame
pub mod pipeline;

/// Overlay layout and drawing
pub mod overlay;

/// Camera and video file sources
pub mod video;

/// Utility functions for face boxes
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
