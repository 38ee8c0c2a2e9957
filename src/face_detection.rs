use crate::{
    constants::FACE_BOX_EXPANSION,
    utils::{expand_to_square, largest_face},
    Error, Result,
};
use log::debug;
use opencv::{
    core::{Mat, Rect, Size, Vector},
    imgproc,
    objdetect::CascadeClassifier,
    prelude::*,
};
use std::path::Path;

/// Haar cascade face locator.
///
/// Only the largest face is of interest; the classifier works on one student
/// at a time.
pub struct FaceLocator {
    cascade: CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
    min_face_size: i32,
}

impl FaceLocator {
    /// Load a cascade from an `OpenCV` XML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cascade file does not exist
    /// - `OpenCV` cannot parse the cascade
    pub fn new<P: AsRef<Path>>(cascade_path: P) -> Result<Self> {
        let path = cascade_path.as_ref();
        if !path.exists() {
            return Err(Error::ModelError(format!("Face cascade not found: {}", path.display())));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("Non UTF-8 cascade path: {}", path.display())))?;

        let cascade = CascadeClassifier::new(path_str)?;
        if cascade.empty()? {
            return Err(Error::ModelError(format!("Face cascade is empty: {}", path.display())));
        }
        log::info!("Loaded face cascade: {}", path.display());

        Ok(Self {
            cascade,
            scale_factor: 1.1,
            min_neighbors: 5,
            min_face_size: 30,
        })
    }

    /// All face boxes in a BGR image
    ///
    /// # Errors
    ///
    /// Returns an error if color conversion or detection fails
    pub fn detect(&mut self, image: &Mat) -> Result<Vec<Rect>> {
        let mut gray = Mat::default();
        imgproc::cvt_color(image, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;
        let mut equalized = Mat::default();
        imgproc::equalize_hist(&gray, &mut equalized)?;

        let mut faces = Vector::<Rect>::new();
        self.cascade.detect_multi_scale(
            &equalized,
            &mut faces,
            self.scale_factor,
            self.min_neighbors,
            0,
            Size::new(self.min_face_size, self.min_face_size),
            Size::new(0, 0),
        )?;

        Ok(faces.to_vec())
    }

    /// Expanded square box around the largest face, if any
    ///
    /// # Errors
    ///
    /// Returns an error if detection fails
    pub fn locate(&mut self, image: &Mat) -> Result<Option<Rect>> {
        let faces = self.detect(image)?;
        debug!("Face locator found {} face(s)", faces.len());
        Ok(largest_face(&faces).map(|face| expand_to_square(face, image.cols(), image.rows(), FACE_BOX_EXPANSION)))
    }
}
