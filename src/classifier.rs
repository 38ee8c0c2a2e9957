//! Emotion classification of a single frame.
//!
//! [`EmotionClassifier`] is the seam the detection pipeline calls through.
//! [`OnnxEmotionClassifier`] runs a 7-class facial expression model with
//! ONNX Runtime. When a [`FaceLocator`] is attached the largest face is
//! cropped first; if no face is found the whole frame is classified.

use crate::{
    emotion::EmotionScores,
    face_detection::FaceLocator,
    Error, Result,
};
use log::debug;
use ndarray::{Array4, CowArray};
use opencv::{
    core::{Mat, Rect, Size, CV_32F},
    imgproc::{self, InterpolationFlags},
    prelude::*,
};
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Anything that turns a frame into emotion scores
pub trait EmotionClassifier {
    /// Score every emotion the model knows for `frame`
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be classified
    fn classify(&mut self, frame: &Mat) -> Result<EmotionScores>;
}

impl<C: EmotionClassifier + ?Sized> EmotionClassifier for Box<C> {
    fn classify(&mut self, frame: &Mat) -> Result<EmotionScores> {
        (**self).classify(frame)
    }
}

/// Facial expression classifier using `ONNX` Runtime
pub struct OnnxEmotionClassifier {
    session: Session,
    labels: Vec<String>,
    input_size: i32,
    channels_first: bool,
    face_locator: Option<FaceLocator>,
}

impl OnnxEmotionClassifier {
    /// Load an emotion model.
    ///
    /// `labels` names the model outputs in order; `input_size` is the side of
    /// the square grayscale input.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model file does not exist or cannot be loaded
    /// - `labels` is empty or `input_size` is not positive
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(
        model_path: P,
        labels: Vec<String>,
        input_size: i32,
        face_locator: Option<FaceLocator>,
    ) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            return Err(Error::ModelError(format!("Emotion model not found: {}", model_path.display())));
        }
        if labels.is_empty() {
            return Err(Error::InvalidInput("Emotion model needs at least one label".to_string()));
        }
        if input_size <= 0 {
            return Err(Error::InvalidInput(format!("Invalid model input size {input_size}")));
        }

        log::info!("Initializing emotion classifier with model: {}", model_path.display());
        let environment = Arc::new(
            Environment::builder()
                .with_name("emotion_classifier")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        let input_dims = &session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelError("Model has no inputs".to_string()))?
            .dimensions;

        // [batch, 1, h, w] vs. the Keras-style [batch, h, w, 1]
        let channels_first = input_dims.len() == 4 && input_dims[1] == Some(1);
        debug!("Emotion model input dims {:?}, channels_first={}", input_dims, channels_first);

        if face_locator.is_none() {
            log::warn!("No face locator configured; classifying whole frames");
        }

        Ok(Self {
            session,
            labels,
            input_size,
            channels_first,
            face_locator,
        })
    }

    /// Region of `frame` to classify
    fn region_of_interest(&mut self, frame: &Mat) -> Result<Rect> {
        let whole = Rect::new(0, 0, frame.cols(), frame.rows());
        let Some(locator) = self.face_locator.as_mut() else {
            return Ok(whole);
        };
        Ok(locator.locate(frame)?.unwrap_or_else(|| {
            debug!("No face found, classifying the whole frame");
            whole
        }))
    }

    /// Grayscale, resize and scale to [0, 1]
    #[allow(clippy::cast_sign_loss)] // input_size is validated positive
    fn preprocess(&self, face: &Mat) -> Result<Array4<f32>> {
        let mut gray = Mat::default();
        imgproc::cvt_color(face, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

        let mut resized = Mat::default();
        imgproc::resize(
            &gray,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_AREA as i32,
        )?;

        let mut float_image = Mat::default();
        resized.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let size = self.input_size as usize;
        let mut data = Vec::with_capacity(size * size);
        for row in 0..self.input_size {
            for col in 0..self.input_size {
                data.push(*float_image.at_2d::<f32>(row, col)?);
            }
        }

        // A single channel has the same memory order in both layouts
        let shape = if self.channels_first {
            (1, 1, size, size)
        } else {
            (1, size, size, 1)
        };
        Array4::from_shape_vec(shape, data)
            .map_err(|e| Error::ModelError(format!("Failed to create input array: {e}")))
    }

    /// Run the model and return its raw outputs
    fn forward(&self, input: Array4<f32>) -> Result<Vec<f32>> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let output = outputs
            .into_iter()
            .next()
            .ok_or_else(|| Error::ModelOutputError("No output from model".to_string()))?;

        let tensor = output.try_extract::<f32>()?;
        let view = tensor.view();
        let values = view
            .as_slice()
            .ok_or_else(|| Error::ModelOutputError("Failed to get output data".to_string()))?;
        Ok(values.to_vec())
    }
}

impl EmotionClassifier for OnnxEmotionClassifier {
    fn classify(&mut self, frame: &Mat) -> Result<EmotionScores> {
        if frame.empty() {
            return Err(Error::Classification("Empty frame".to_string()));
        }

        let region = self.region_of_interest(frame)?;
        let face = Mat::roi(frame, region)?.try_clone()?;
        let input = self.preprocess(&face)?;
        let raw = self.forward(input)?;

        label_scores(&self.labels, &to_percentages(&raw))
    }
}

/// Pair model outputs with their labels
///
/// # Errors
///
/// Returns an error if the number of outputs does not match the labels
pub fn label_scores(labels: &[String], values: &[f32]) -> Result<EmotionScores> {
    if labels.len() != values.len() {
        return Err(Error::ModelOutputError(format!(
            "Model produced {} scores for {} labels",
            values.len(),
            labels.len()
        )));
    }
    Ok(labels.iter().cloned().zip(values.iter().copied()).collect())
}

/// Convert raw model outputs to percentages summing to 100.
///
/// Outputs that already form a probability distribution are only scaled;
/// anything else is treated as logits and passed through softmax.
#[must_use]
pub fn to_percentages(raw: &[f32]) -> Vec<f32> {
    if raw.is_empty() {
        return Vec::new();
    }

    let sum: f32 = raw.iter().sum();
    let is_distribution = raw.iter().all(|v| (0.0..=1.0).contains(v)) && (sum - 1.0).abs() < 1e-3;
    if is_distribution {
        return raw.iter().map(|v| v * 100.0).collect();
    }

    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = raw.iter().map(|v| (v - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.iter().map(|e| e / total * 100.0).collect()
}
