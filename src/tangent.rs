//! Anchor selection and tangent estimation on the boundary mask.

use image::RgbImage;
use kurbo::{Point, Vec2};

use crate::bitmap::is_black;
use crate::edges::sobel;
use crate::error::TemplateError;

/// The boundary pixel the glyph is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: u32,
    pub y: u32,
}

impl Anchor {
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Which coordinate lacked a full 3×3 neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippedAxis {
    /// Column at the left/right border; falls back to `(0, 1)`.
    X,
    /// Row at the top/bottom border; falls back to `(1, 0)`.
    Y,
}

/// Direction along the boundary at an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangent {
    pub direction: Vec2,
    /// Set when the axis-aligned fallback was used instead of the gradient.
    pub fallback: Option<ClippedAxis>,
}

impl Tangent {
    /// Glyph rotation: angle of the tangent from the vertical axis, less `offset`.
    pub fn rotation(&self, offset: f64) -> f64 {
        let t = self.direction;
        (t.y / t.hypot()).clamp(-1.0, 1.0).acos() - offset
    }
}

/// First black pixel in row-major order.
pub fn first_black_pixel(mask: &RgbImage) -> Option<Anchor> {
    mask.enumerate_pixels()
        .find(|(_, _, p)| is_black(**p))
        .map(|(x, y, _)| Anchor { x, y })
}

/// Tangent at `anchor`: the Sobel gradient of `mask` rotated by 90°.
///
/// Samples the raw first channel, so a flat neighborhood sums to exactly
/// zero. Anchors on the image border get an axis-aligned fallback. A zero
/// gradient leaves the direction undefined.
pub fn tangent_at(mask: &RgbImage, anchor: Anchor) -> Result<Tangent, TemplateError> {
    let (w, h) = mask.dimensions();
    let Anchor { x, y } = anchor;

    if x < 1 || x + 1 >= w {
        return Ok(Tangent {
            direction: Vec2::new(0.0, 1.0),
            fallback: Some(ClippedAxis::X),
        });
    }
    if y < 1 || y + 1 >= h {
        return Ok(Tangent {
            direction: Vec2::new(1.0, 0.0),
            fallback: Some(ClippedAxis::Y),
        });
    }

    let (gx, gy) = sobel(|sx, sy| mask.get_pixel(sx, sy).0[0] as f64, x, y);
    let magnitude = gx.hypot(gy);
    if magnitude == 0.0 {
        return Err(TemplateError::UndefinedTangent { x, y });
    }

    Ok(Tangent {
        direction: Vec2::new(-gy / magnitude, gx / magnitude),
        fallback: None,
    })
}
