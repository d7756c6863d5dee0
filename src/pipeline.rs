use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use tokio::sync::mpsc;

use crate::contacts::ContactDirectory;
use crate::session::{Face, TaggingSession};
use facetag_vision::{build_thumbnails, detect_with_fallback, order_faces, FaceDetector};

/// Result of a background detection run, tagged with the session
/// generation it was started for.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub generation: u64,
    pub faces: Vec<Face>,
}

/// Detect, order and materialize the faces of one photo.
///
/// Never errors: a silent photo simply produces no faces.
pub async fn run_detection_pipeline(
    detector: &dyn FaceDetector,
    image: &DynamicImage,
    inflate: f32,
) -> Vec<Face> {
    let observations = detect_with_fallback(detector, image).await;
    let ordered = order_faces(&observations, image.dimensions());
    log::info!("{} face(s) detected", ordered.len());
    build_thumbnails(image, &ordered, inflate)
        .into_iter()
        .map(Face::from)
        .collect()
}

impl TaggingSession {
    /// Run the full pipeline for a newly selected photo and return a
    /// session ready for tagging.
    pub async fn start(
        detector: &dyn FaceDetector,
        image: &DynamicImage,
        directory: ContactDirectory,
        inflate: f32,
    ) -> Self {
        let faces = run_detection_pipeline(detector, image, inflate).await;
        let mut session = Self::new(directory);
        let generation = session.generation();
        session.install(generation, faces);
        session
    }
}

/// Run the pipeline off the interactive context and hand the outcome back
/// through `tx`.
///
/// The receiving context applies the outcome with
/// [`TaggingSession::install`], which drops anything that no longer
/// matches the session generation. Background work never touches session
/// state directly.
pub fn spawn_detection(
    detector: Arc<dyn FaceDetector>,
    image: DynamicImage,
    inflate: f32,
    generation: u64,
    tx: mpsc::Sender<PipelineOutcome>,
) {
    tokio::spawn(async move {
        let faces = run_detection_pipeline(detector.as_ref(), &image, inflate).await;
        if tx.send(PipelineOutcome { generation, faces }).await.is_err() {
            log::debug!("pipeline receiver gone, discarding result");
        }
    });
}
