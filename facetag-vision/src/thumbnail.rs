use image::{DynamicImage, GenericImageView};

use crate::detect::FaceObservation;
use crate::geometry::{to_pixel_rect, PixelRect};

/// A materialized face crop.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub image: DynamicImage,
    pub capture_quality: Option<f32>,
}

/// Crop `rect` out of `image`, or `None` when the rect is empty or not
/// fully inside the image.
pub fn crop_observation(image: &DynamicImage, rect: PixelRect) -> Option<DynamicImage> {
    if rect.x < 0.0 || rect.y < 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let (image_width, image_height) = image.dimensions();
    let x = rect.x.floor() as u32;
    let y = rect.y.floor() as u32;
    let width = rect.width.round() as u32;
    let height = rect.height.round() as u32;
    if width == 0 || height == 0 {
        return None;
    }
    if x.checked_add(width)? > image_width || y.checked_add(height)? > image_height {
        return None;
    }
    Some(image.crop_imm(x, y, width, height))
}

/// Materialize thumbnails for already-ordered observations.
///
/// Output order matches input order; ordering is the sorter's job, not
/// this one's. An observation whose inflated rect cannot be cropped is
/// skipped and the rest still build.
pub fn build_thumbnails(
    image: &DynamicImage,
    observations: &[FaceObservation],
    inflate: f32,
) -> Vec<Thumbnail> {
    let image_size = image.dimensions();
    let mut thumbnails = Vec::with_capacity(observations.len());
    for (index, observation) in observations.iter().enumerate() {
        let rect = to_pixel_rect(observation.bounding_box, image_size, inflate);
        match crop_observation(image, rect) {
            Some(crop) => thumbnails.push(Thumbnail {
                image: crop,
                capture_quality: observation.capture_quality,
            }),
            None => log::debug!(
                "face {index}: crop rect {rect:?} not croppable in {}x{}, skipping",
                image_size.0,
                image_size.1
            ),
        }
    }
    thumbnails
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormalizedRect;

    fn obs(x: f32, y: f32, width: f32, height: f32, quality: Option<f32>) -> FaceObservation {
        FaceObservation {
            bounding_box: NormalizedRect { x, y, width, height },
            capture_quality: quality,
        }
    }

    #[test]
    fn crop_inside_bounds_keeps_size() {
        let image = DynamicImage::new_rgb8(200, 200);
        let rect = PixelRect { x: 50.0, y: 50.0, width: 100.0, height: 100.0 };

        let crop = crop_observation(&image, rect).unwrap();

        assert_eq!(crop.width(), 100);
        assert_eq!(crop.height(), 100);
    }

    #[test]
    fn crop_outside_bounds_is_none() {
        let image = DynamicImage::new_rgb8(100, 100);

        let negative = PixelRect { x: -10.0, y: 0.0, width: 50.0, height: 50.0 };
        assert!(crop_observation(&image, negative).is_none());

        let overflowing = PixelRect { x: 80.0, y: 80.0, width: 50.0, height: 50.0 };
        assert!(crop_observation(&image, overflowing).is_none());

        let empty = PixelRect { x: 10.0, y: 10.0, width: 0.0, height: 20.0 };
        assert!(crop_observation(&image, empty).is_none());
    }

    #[test]
    fn uncroppable_observation_is_skipped_not_fatal() {
        let image = DynamicImage::new_rgb8(200, 200);
        // The edge face inflates past the left border; the centered ones
        // survive.
        let observations = vec![
            obs(0.3, 0.3, 0.2, 0.2, Some(0.8)),
            obs(0.0, 0.3, 0.2, 0.2, Some(0.5)),
            obs(0.5, 0.5, 0.2, 0.2, Some(0.2)),
        ];

        let thumbnails = build_thumbnails(&image, &observations, 1.6);

        assert_eq!(thumbnails.len(), 2);
        assert_eq!(thumbnails[0].capture_quality, Some(0.8));
        assert_eq!(thumbnails[1].capture_quality, Some(0.2));
    }

    #[test]
    fn output_order_matches_input_order() {
        let image = DynamicImage::new_rgb8(300, 300);
        let observations = vec![
            obs(0.6, 0.2, 0.1, 0.1, Some(0.1)),
            obs(0.2, 0.6, 0.1, 0.1, Some(0.2)),
            obs(0.4, 0.4, 0.1, 0.1, Some(0.3)),
        ];

        let thumbnails = build_thumbnails(&image, &observations, 1.0);

        let qualities: Vec<_> = thumbnails
            .iter()
            .map(|t| t.capture_quality)
            .collect();
        assert_eq!(qualities, vec![Some(0.1), Some(0.2), Some(0.3)]);
    }

    #[test]
    fn thumbnail_size_reflects_inflation() {
        let image = DynamicImage::new_rgb8(400, 400);
        let observations = vec![obs(0.4, 0.4, 0.2, 0.2, None)];

        let plain = build_thumbnails(&image, &observations, 1.0);
        let inflated = build_thumbnails(&image, &observations, 1.5);

        assert_eq!(plain[0].image.width(), 80);
        assert_eq!(inflated[0].image.width(), 120);
    }
}
