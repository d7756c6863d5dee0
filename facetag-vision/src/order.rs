use std::cmp::Ordering;

use crate::detect::FaceObservation;

/// Width of a row band relative to the first observed face's pixel height.
const ROW_BAND: f32 = 1.5;

/// Sort observations into natural reading order: top row first, left to
/// right within a row.
///
/// Two observations whose pixel tops differ by less than the row band are
/// treated as one row and ordered by x; otherwise the visually higher one
/// comes first. The band is derived from whichever observation is first in
/// the *input* order, so the grouping depends on input order even though
/// the output for a fixed input is deterministic. Exact ties keep their
/// input order.
pub fn order_faces(
    observations: &[FaceObservation],
    image_size: (u32, u32),
) -> Vec<FaceObservation> {
    let Some(first) = observations.first() else {
        return Vec::new();
    };
    let image_height = image_size.1 as f32;
    let row_threshold = first.bounding_box.height * image_height * ROW_BAND;

    let mut ordered = observations.to_vec();
    ordered.sort_by(|a, b| {
        let top_a = (1.0 - a.bounding_box.y) * image_height;
        let top_b = (1.0 - b.bounding_box.y) * image_height;
        if (top_a - top_b).abs() < row_threshold {
            a.bounding_box
                .x
                .partial_cmp(&b.bounding_box.x)
                .unwrap_or(Ordering::Equal)
        } else {
            top_a.partial_cmp(&top_b).unwrap_or(Ordering::Equal)
        }
    });
    ordered
}
