//! Student emotion detection: live camera feed with smoothed emotion overlay.

use anyhow::Result;
use clap::Parser;
use log::info;
use student_emotion_detection::{app::EmotionApp, config::Config, video::VideoInput};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use (overrides the configuration file)
    #[arg(long)]
    cam: Option<i32>,

    /// Video file to process instead of the camera
    #[arg(short, long)]
    video: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Process frames without opening a window
    #[arg(long)]
    headless: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Student Emotion Detection");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(cam) = args.cam {
        config.camera.index = cam;
    }
    if args.headless {
        config.display.headless = true;
    }

    let input = match args.video {
        Some(path) => VideoInput::File(path),
        None => VideoInput::Camera(config.camera.index),
    };

    let mut app = EmotionApp::new(input, &config).map_err(|e| {
        log::error!("Error: {}", e);
        e
    })?;
    app.run();

    Ok(())
}
