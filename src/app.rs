//! Main application module for emotion detection.

use crate::{
    classifier::{EmotionClassifier, OnnxEmotionClassifier},
    config::Config,
    constants::QUIT_KEY,
    emotion::EmotionLabel,
    error::Result,
    face_detection::FaceLocator,
    overlay::{OverlayPlan, OverlayRenderer},
    pipeline::{DetectionPipeline, TickOutcome},
    scheduler::DetectionScheduler,
    smoother::EmotionSmoother,
    video::{resize_frame, FrameSource, VideoInput, VideoSource},
};
use log::{info, warn};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_AUTOSIZE},
};
use std::time::Instant;

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames read and rendered
    pub frames: usize,
    /// Successful classifications
    pub detections: usize,
    /// Failed classifications
    pub failures: usize,
    /// Label on display when the session ended
    pub last_emotion: Option<EmotionLabel>,
}

/// Interactive emotion detection session
pub struct EmotionApp {
    source: Box<dyn FrameSource>,
    pipeline: DetectionPipeline<Box<dyn EmotionClassifier>>,
    renderer: OverlayRenderer,
    frame_size: (i32, i32),
    window_title: String,
    headless: bool,
}

impl EmotionApp {
    /// Open the video input and load the models described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The camera or video file cannot be opened
    /// - The emotion model cannot be loaded
    /// - The display window cannot be created
    pub fn new(input: VideoInput, config: &Config) -> Result<Self> {
        info!("Initializing Student Emotion Detection");
        // Reject bad settings before touching the camera
        config.validate()?;

        let source = VideoSource::open(input)?;

        let face_locator = match &config.models.face_cascade {
            Some(path) => match FaceLocator::new(path) {
                Ok(locator) => Some(locator),
                Err(e) => {
                    warn!("Face cascade unavailable: {}", e);
                    None
                }
            },
            None => None,
        };

        let classifier = OnnxEmotionClassifier::new(
            &config.models.emotion_model,
            config.models.labels.clone(),
            config.models.input_size,
            face_locator,
        )?;

        Self::with_parts(Box::new(source), Box::new(classifier), config)
    }

    /// Assemble a session from an already opened source and classifier
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the window cannot be created
    pub fn with_parts(
        source: Box<dyn FrameSource>,
        classifier: Box<dyn EmotionClassifier>,
        config: &Config,
    ) -> Result<Self> {
        config.validate()?;

        let scheduler = DetectionScheduler::with_interval(Instant::now(), config.detection.interval_seconds)?;
        let smoother = EmotionSmoother::new(config.detection.history_size)?;
        let renderer = OverlayRenderer::new(
            config.display.font_scale,
            config.display.text_thickness,
            config.display.overlay_alpha,
        )?;

        if !config.display.headless {
            highgui::named_window(&config.display.window_title, WINDOW_AUTOSIZE)?;
        }

        Ok(Self {
            source,
            pipeline: DetectionPipeline::with_parts(classifier, scheduler, smoother),
            renderer,
            frame_size: (config.camera.frame_width, config.camera.frame_height),
            window_title: config.display.window_title.clone(),
            headless: config.display.headless,
        })
    }

    /// Run until the stream ends or the user presses the quit key.
    ///
    /// Per-frame failures are logged and the session carries on; a failed read
    /// ends the stream. The source and windows are released on every exit path.
    pub fn run(&mut self) -> SessionSummary {
        info!("Starting main application loop");
        let summary = self.run_loop();
        self.shutdown();

        info!(
            "Session ended after {} frames ({} detections, {} failures)",
            summary.frames, summary.detections, summary.failures
        );
        summary
    }

    fn run_loop(&mut self) -> SessionSummary {
        let mut summary = SessionSummary::default();
        self.pipeline.restart_schedule(Instant::now());

        loop {
            let captured = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!("End of video stream reached");
                    break;
                }
                Err(e) => {
                    warn!("Failed to read frame, ending stream: {}", e);
                    break;
                }
            };

            let mut frame = match resize_frame(&captured, self.frame_size.0, self.frame_size.1) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Failed to resize frame: {}", e);
                    continue;
                }
            };

            match self.pipeline.tick(&frame, Instant::now()) {
                TickOutcome::Updated(_) => summary.detections += 1,
                TickOutcome::Failed => summary.failures += 1,
                TickOutcome::Skipped => {}
            }

            let plan = OverlayPlan::for_state(self.pipeline.current());
            if let Err(e) = self.renderer.render(&mut frame, &plan) {
                warn!("Failed to draw overlay: {}", e);
            }
            summary.frames += 1;

            if !self.headless && self.show(&frame) {
                info!("Exit requested by user");
                break;
            }
        }

        summary.last_emotion = self.pipeline.current();
        summary
    }

    /// Display `frame` and poll the keyboard; true when the quit key was pressed
    fn show(&self, frame: &Mat) -> bool {
        if let Err(e) = highgui::imshow(&self.window_title, frame) {
            warn!("Failed to display frame: {}", e);
        }
        match highgui::wait_key(1) {
            Ok(key) => key & 0xFF == i32::from(QUIT_KEY),
            Err(e) => {
                warn!("Failed to poll keyboard: {}", e);
                false
            }
        }
    }

    fn shutdown(&mut self) {
        info!("Application shutting down");
        if let Err(e) = self.source.release() {
            warn!("Failed to release video source: {}", e);
        }
        if !self.headless {
            if let Err(e) = highgui::destroy_all_windows() {
                warn!("Failed to close windows: {}", e);
            }
        }
    }

    /// Label currently on display
    #[must_use]
    pub fn current_emotion(&self) -> Option<EmotionLabel> {
        self.pipeline.current()
    }
}
