use async_trait::async_trait;
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

use crate::error::DetectorError;
use crate::geometry::NormalizedRect;

/// A single face reported by a detector capability.
///
/// The bounding box is normalized to the unit square with a bottom-left
/// origin. `capture_quality` is the detector's 0.0-1.0 estimate of how
/// usable the face crop is, when the backend provides one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: NormalizedRect,
    pub capture_quality: Option<f32>,
}

/// Pluggable face detection backend.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Detect faces in `image`. Boxes are normalized, bottom-left origin.
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<FaceObservation>, DetectorError>;
}

/// Number of vertical segments retried when the full frame finds nothing.
const FALLBACK_SEGMENTS: u32 = 2;

/// Run detection with the segmented retry policy.
///
/// A full-frame pass that finds anything wins outright. When it comes back
/// empty, each vertical half is cropped and detected independently, which
/// doubles the relative size of faces in wide composite photos; each hit's
/// x coordinate is remapped into full-image normalized space. Faces
/// straddling the half boundary may be reported by both halves.
///
/// A pass that fails contributes nothing and the remaining passes still
/// run. The result may be empty; that is a valid outcome, not an error.
pub async fn detect_with_fallback(
    detector: &dyn FaceDetector,
    image: &DynamicImage,
) -> Vec<FaceObservation> {
    let mut found = run_pass(detector, image, "full frame").await;
    if !found.is_empty() {
        return found;
    }

    let (full_width, height) = image.dimensions();
    let segment_width = full_width / FALLBACK_SEGMENTS;
    if segment_width == 0 {
        return found;
    }
    for i in 0..FALLBACK_SEGMENTS {
        let offset_x = i * segment_width;
        // The right half absorbs the odd-width remainder.
        let width = if i == FALLBACK_SEGMENTS - 1 {
            full_width - offset_x
        } else {
            segment_width
        };
        let segment = image.crop_imm(offset_x, 0, width, height);
        let label = format!("segment {}/{}", i + 1, FALLBACK_SEGMENTS);
        for mut observation in run_pass(detector, &segment, &label).await {
            // x moves back into full-image normalized space; y is
            // unaffected by a horizontal split.
            observation.bounding_box.x = (offset_x as f32
                + observation.bounding_box.x * width as f32)
                / full_width as f32;
            found.push(observation);
        }
    }
    found
}

async fn run_pass(
    detector: &dyn FaceDetector,
    image: &DynamicImage,
    label: &str,
) -> Vec<FaceObservation> {
    match detector.detect(image).await {
        Ok(observations) => {
            log::debug!("{label}: {} face(s)", observations.len());
            observations
        }
        Err(err) => {
            log::warn!("{label}: detector failed: {err}");
            Vec::new()
        }
    }
}
