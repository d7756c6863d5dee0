pub mod detect;
pub mod error;
pub mod geometry;
pub mod order;
pub mod thumbnail;

// Re-export commonly used types
pub use detect::{detect_with_fallback, FaceDetector, FaceObservation};
pub use error::DetectorError;
pub use geometry::{to_pixel_rect, NormalizedRect, PixelRect, OUTLINE_INFLATE, THUMBNAIL_INFLATE};
pub use order::order_faces;
pub use thumbnail::{build_thumbnails, crop_observation, Thumbnail};
