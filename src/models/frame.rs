//! Pose frame wire format
//!
//! Frames are produced by an external pose source, one JSON object per line.
//! A frame carries either pixel coordinates, or normalized coordinates plus
//! the image size they refer to.

use crate::error::EngineError;
use crate::models::landmark::{Landmark, LandmarkSet, Point2D};
use serde::{Deserialize, Serialize};

fn default_visibility() -> f64 {
    1.0
}

/// One landmark as reported by the pose source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameLandmark {
    /// Landmark name (e.g. "left_knee")
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Detection visibility (0-1)
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

/// Dimensions of the frame the landmarks were detected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Landmarks for a single frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Frame number in sequence
    #[serde(default)]
    pub frame_number: u64,
    /// Frame timestamp in milliseconds
    #[serde(default)]
    pub timestamp_ms: u64,
    /// Present when coordinates are normalized to [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    /// `None` or empty when no body was detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<FrameLandmark>>,
}

/// Outcome of reading the landmarks of one frame
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// Complete landmark set with every landmark sufficiently visible
    Pose(LandmarkSet),
    /// Complete landmark set, but some landmark fell below the visibility floor
    LowConfidence(LandmarkSet),
    /// No body in the frame
    NotDetected,
}

impl PoseFrame {
    /// Parse one JSON line
    pub fn from_json(line: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Convert reported landmarks into a pixel-space [`LandmarkSet`].
    ///
    /// Normalized coordinates are scaled by the image size and truncated to
    /// whole pixels. Landmarks outside the vocabulary are ignored, a missing
    /// vocabulary entry is an error.
    pub fn detection(&self, min_visibility: f64) -> Result<Detection, EngineError> {
        let landmarks = match &self.landmarks {
            Some(landmarks) if !landmarks.is_empty() => landmarks,
            _ => return Ok(Detection::NotDetected),
        };

        let known: Vec<&FrameLandmark> = landmarks
            .iter()
            .filter(|lm| lm.name.parse::<Landmark>().is_ok())
            .collect();

        let set = LandmarkSet::from_named(
            known
                .iter()
                .map(|lm| (lm.name.as_str(), self.to_pixels(lm))),
        )?;

        if known.iter().any(|lm| lm.visibility < min_visibility) {
            Ok(Detection::LowConfidence(set))
        } else {
            Ok(Detection::Pose(set))
        }
    }

    fn to_pixels(&self, landmark: &FrameLandmark) -> Point2D {
        match self.image_size {
            Some(size) => Point2D::new(
                (landmark.x * size.width as f64).trunc(),
                (landmark.y * size.height as f64).trunc(),
            ),
            None => Point2D::new(landmark.x, landmark.y),
        }
    }
}
