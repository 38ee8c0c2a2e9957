//! Frame sources: webcam or video file.

use crate::{Error, Result};
use log::{debug, info};
use opencv::{
    core::{Mat, Size},
    imgproc::{self, InterpolationFlags},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};

/// Where frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoInput {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// Anything that yields successive frames
pub trait FrameSource {
    /// Next frame, or `None` once the stream has ended
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device reports a failure
    fn next_frame(&mut self) -> Result<Option<Mat>>;

    /// Release the underlying device
    ///
    /// # Errors
    ///
    /// Returns an error if the device fails to close cleanly
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// `OpenCV` capture over a camera or a video file
pub struct VideoSource {
    capture: VideoCapture,
    input: VideoInput,
}

impl VideoSource {
    /// Open the given input
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceUnavailable`] if the camera or file cannot be opened
    pub fn open(input: VideoInput) -> Result<Self> {
        let capture = match &input {
            VideoInput::Camera(index) => {
                info!("Opening camera {}", index);
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)
                    .map_err(|e| Error::DeviceUnavailable(format!("Could not open camera {index}: {e}")))?;
                if cap.is_opened()? {
                    // Keep latency low; not every backend honours it
                    cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;
                }
                cap
            }
            VideoInput::File(path) => {
                info!("Opening video file: {}", path);
                VideoCapture::from_file(path, videoio::CAP_ANY)
                    .map_err(|e| Error::DeviceUnavailable(format!("Could not open video file {path}: {e}")))?
            }
        };

        if !capture.is_opened()? {
            return Err(Error::DeviceUnavailable(match &input {
                VideoInput::Camera(index) => format!("Could not open camera {index}"),
                VideoInput::File(path) => format!("Could not open video file {path}"),
            }));
        }

        Ok(Self { capture, input })
    }

    #[must_use]
    pub fn input(&self) -> &VideoInput {
        &self.input
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        match self.capture.read(&mut frame) {
            Ok(true) if !frame.empty() => Ok(Some(frame)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("Capture read failed, treating as end of stream: {}", e);
                Ok(None)
            }
        }
    }

    fn release(&mut self) -> Result<()> {
        info!("Releasing video source");
        self.capture.release()?;
        Ok(())
    }
}

/// Resize a frame to the working resolution
///
/// # Errors
///
/// Returns an error if the target size is not positive or resizing fails
pub fn resize_frame(frame: &Mat, width: i32, height: i32) -> Result<Mat> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidInput(format!("Invalid working size {width}x{height}")));
    }
    let mut resized = Mat::default();
    imgproc::resize(frame, &mut resized, Size::new(width, height), 0.0, 0.0, InterpolationFlags::INTER_LINEAR as i32)?;
    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::CV_8UC3;

    #[test]
    fn test_resize_to_working_size() {
        let frame = Mat::zeros(480, 640, CV_8UC3).unwrap().to_mat().unwrap();
        let resized = resize_frame(&frame, 600, 400).unwrap();
        assert_eq!(resized.cols(), 600);
        assert_eq!(resized.rows(), 400);
    }

    #[test]
    fn test_resize_rejects_invalid_size() {
        let frame = Mat::zeros(480, 640, CV_8UC3).unwrap().to_mat().unwrap();
        assert!(matches!(resize_frame(&frame, 0, 400), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_missing_video_file_is_unavailable() {
        let result = VideoSource::open(VideoInput::File("does/not/exist.mp4".to_string()));
        assert!(matches!(result, Err(Error::DeviceUnavailable(_))));
    }
}
