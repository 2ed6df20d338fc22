//! Face presence check.
//!
//! The capture pipeline only needs to know whether a photo shows at least one
//! face. No identity matching happens here.

pub mod scrfd;

pub use scrfd::ScrfdDetector;

use crate::errors::AppError;
use crate::ui::messages::warning;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("model file not found: {0} (download an SCRFD .onnx model and set `face_model` in the config)")]
    ModelNotFound(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("ort: {0}")]
    Ort(#[from] ort::Error),
}

impl From<DetectorError> for AppError {
    fn from(e: DetectorError) -> Self {
        AppError::Detector(e.to_string())
    }
}

/// A detected face, in pixel coordinates of the original image.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

/// Anything able to locate faces in a decoded photo.
pub trait FacePresence {
    fn detect_faces(&mut self, image: &DynamicImage) -> Result<Vec<FaceRegion>, DetectorError>;

    /// True iff at least one face is found. Detector failures count as "no face".
    fn has_face(&mut self, image: &DynamicImage) -> bool {
        match self.detect_faces(image) {
            Ok(faces) => !faces.is_empty(),
            Err(e) => {
                warning(format!("Face detection failed, rejecting photo: {}", e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl FacePresence for Broken {
        fn detect_faces(&mut self, _: &DynamicImage) -> Result<Vec<FaceRegion>, DetectorError> {
            Err(DetectorError::InferenceFailed("boom".into()))
        }
    }

    struct One;

    impl FacePresence for One {
        fn detect_faces(&mut self, _: &DynamicImage) -> Result<Vec<FaceRegion>, DetectorError> {
            Ok(vec![FaceRegion {
                x: 1.0,
                y: 1.0,
                width: 10.0,
                height: 10.0,
                confidence: 0.9,
            }])
        }
    }

    #[test]
    fn test_detector_error_fails_closed() {
        let img = DynamicImage::new_rgb8(8, 8);
        assert!(!Broken.has_face(&img));
    }

    #[test]
    fn test_single_region_counts_as_face() {
        let img = DynamicImage::new_rgb8(8, 8);
        assert!(One.has_face(&img));
    }
}
