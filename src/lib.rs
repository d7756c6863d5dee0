pub mod config;
pub mod contacts;
pub mod observations;
pub mod pipeline;
pub mod session;

// Re-export vision types for convenience
pub use facetag_vision::{
    detect_with_fallback, order_faces, FaceDetector, FaceObservation, Thumbnail,
};

pub use contacts::{Contact, ContactDirectory};
pub use pipeline::{run_detection_pipeline, spawn_detection, PipelineOutcome};
pub use session::{Direction, Face, TaggingSession};
