//! Constants used throughout the application

/// Seconds between two classifier invocations
pub const DETECTION_INTERVAL_SECS: f64 = 1.5;

/// Number of recent labels kept for majority voting
pub const EMOTION_HISTORY_SIZE: usize = 5;

/// Working resolution every captured frame is resized to
pub const FRAME_WIDTH: i32 = 600;
pub const FRAME_HEIGHT: i32 = 400;

/// Default camera index
pub const DEFAULT_CAMERA_INDEX: i32 = 0;

/// Display window title
pub const WINDOW_TITLE: &str = "Student Emotion Detection";

/// Key that ends the session
pub const QUIT_KEY: u8 = b'q';

/// Text rendering parameters
pub const FONT_SCALE: f64 = 0.7;
pub const TEXT_THICKNESS: i32 = 2;
pub const OUTLINE_EXTRA_THICKNESS: i32 = 2;

/// Opacity of the box drawn behind the result text
pub const OVERLAY_ALPHA: f64 = 0.5;

/// Result box geometry (pixels, working resolution)
pub const OVERLAY_BOX_LEFT: i32 = 10;
pub const OVERLAY_BOX_RIGHT: i32 = 590;
pub const OVERLAY_BOX_TOP: i32 = 300;
pub const OVERLAY_BOX_HEIGHT: i32 = 80;

/// Left margin and baselines of the three result lines
pub const TEXT_LEFT: i32 = 20;
pub const EMOTION_LINE_Y: i32 = 330;
pub const MESSAGE_LINE_Y: i32 = 355;
pub const ACTION_LINE_Y: i32 = 380;

/// Baseline of the static instruction line
pub const INSTRUCTION_LINE_Y: i32 = 30;
pub const INSTRUCTION_TEXT: &str = "Press 'q' to quit";

/// Emotion model defaults (48x48 grayscale, seven classes)
pub const DEFAULT_EMOTION_MODEL: &str = "assets/emotion_model.onnx";
pub const DEFAULT_MODEL_INPUT_SIZE: i32 = 48;

/// Output order of the default emotion model
pub const DEFAULT_MODEL_LABELS: [&str; 7] = ["angry", "disgust", "fear", "happy", "sad", "surprise", "neutral"];

/// Face crop expansion before classification
pub const FACE_BOX_EXPANSION: f32 = 0.1;
