use serde::{Deserialize, Serialize};

/// Detection box in the unit square, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Crop rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Inflation factor for interactive thumbnails.
pub const THUMBNAIL_INFLATE: f32 = 1.6;

/// No inflation, used when drawing detection outlines.
pub const OUTLINE_INFLATE: f32 = 1.0;

/// Convert a bottom-left normalized box into a top-left pixel rect, grown
/// around its center by `inflate`.
///
/// The result is never clamped to the image bounds; a rect that falls
/// outside the image is a crop failure for the caller, not an error here.
pub fn to_pixel_rect(rect: NormalizedRect, image_size: (u32, u32), inflate: f32) -> PixelRect {
    let (w, h) = (image_size.0 as f32, image_size.1 as f32);
    let pad_x = rect.width * w * (inflate - 1.0) / 2.0;
    let pad_y = rect.height * h * (inflate - 1.0) / 2.0;
    PixelRect {
        x: rect.x * w - pad_x,
        y: (1.0 - rect.y - rect.height) * h - pad_y,
        width: rect.width * w * inflate,
        height: rect.height * h * inflate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_without_inflation() {
        let rect = NormalizedRect {
            x: 0.25,
            y: 0.25,
            width: 0.5,
            height: 0.5,
        };
        let px = to_pixel_rect(rect, (200, 200), 1.0);
        assert_eq!(px, PixelRect { x: 50.0, y: 50.0, width: 100.0, height: 100.0 });
    }

    #[test]
    fn inflation_grows_around_center() {
        let rect = NormalizedRect {
            x: 0.25,
            y: 0.25,
            width: 0.5,
            height: 0.5,
        };
        let px = to_pixel_rect(rect, (200, 200), 1.6);
        assert_eq!(px.width, 160.0);
        assert_eq!(px.height, 160.0);
        // Center stays at (100, 100).
        assert_eq!(px.x + px.width / 2.0, 100.0);
        assert_eq!(px.y + px.height / 2.0, 100.0);
    }

    #[test]
    fn bottom_left_origin_flips_vertically() {
        // A box hugging the bottom of the image lands at the bottom of
        // top-left pixel space.
        let rect = NormalizedRect {
            x: 0.0,
            y: 0.0,
            width: 0.2,
            height: 0.2,
        };
        let px = to_pixel_rect(rect, (100, 100), 1.0);
        assert_eq!(px.y, 80.0);
    }

    #[test]
    fn result_is_not_clamped() {
        let rect = NormalizedRect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        };
        let px = to_pixel_rect(rect, (100, 100), 2.0);
        assert_eq!(px.x, -50.0);
        assert_eq!(px.y, -50.0);
        assert_eq!(px.width, 200.0);
    }
}
