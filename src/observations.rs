use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::DynamicImage;
use serde::Deserialize;

use facetag_vision::{DetectorError, FaceDetector, FaceObservation, NormalizedRect};

/// One record of an observation sidecar file.
#[derive(Debug, Deserialize)]
struct ObservationRecord {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    quality: Option<f32>,
}

/// Detector capability backed by a JSON sidecar: an array of normalized
/// bottom-left boxes written by an external detector.
///
/// The sidecar describes the whole frame, so the segmented retry passes
/// re-read the same records; an empty sidecar stays empty on every pass
/// and a populated one is returned by the first pass alone.
#[derive(Debug, Clone)]
pub struct JsonObservations {
    path: PathBuf,
}

impl JsonObservations {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(raw: &str) -> Result<Vec<FaceObservation>, DetectorError> {
        let records: Vec<ObservationRecord> =
            serde_json::from_str(raw).map_err(|e| DetectorError::Observations(e.to_string()))?;
        Ok(records
            .into_iter()
            .map(|record| FaceObservation {
                bounding_box: NormalizedRect {
                    x: record.x,
                    y: record.y,
                    width: record.width,
                    height: record.height,
                },
                capture_quality: record.quality,
            })
            .collect())
    }
}

#[async_trait]
impl FaceDetector for JsonObservations {
    async fn detect(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<FaceObservation>, DetectorError> {
        let raw = std::fs::read_to_string(&self.path)?;
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_and_without_quality() {
        let raw = r#"[
            {"x": 0.1, "y": 0.2, "width": 0.3, "height": 0.4, "quality": 0.9},
            {"x": 0.5, "y": 0.6, "width": 0.1, "height": 0.1}
        ]"#;

        let observations = JsonObservations::parse(raw).unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].bounding_box.x, 0.1);
        assert_eq!(observations[0].capture_quality, Some(0.9));
        assert_eq!(observations[1].capture_quality, None);
    }

    #[test]
    fn malformed_json_is_an_observation_error() {
        let err = JsonObservations::parse("not json").unwrap_err();
        assert!(matches!(err, DetectorError::Observations(_)));
    }

    #[tokio::test]
    async fn missing_sidecar_is_an_io_error() {
        let detector = JsonObservations::new("/nonexistent/faces.json");
        let image = DynamicImage::new_rgb8(10, 10);

        let err = detector.detect(&image).await.unwrap_err();
        assert!(matches!(err, DetectorError::Io(_)));
    }

    #[tokio::test]
    async fn reads_a_sidecar_file() {
        let path = std::env::temp_dir().join(format!("facetag-obs-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"[{"x": 0.2, "y": 0.2, "width": 0.2, "height": 0.2}]"#).unwrap();

        let detector = JsonObservations::new(&path);
        let image = DynamicImage::new_rgb8(10, 10);
        let observations = detector.detect(&image).await.unwrap();

        std::fs::remove_file(&path).ok();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].bounding_box.width, 0.2);
    }
}
