//! Glyph placement on the dashed layer and the final overlay onto the photograph.

use image::RgbImage;
use imageproc::map::map_colors2;
use kurbo::Point;

use crate::bitmap::{is_black, BLACK};
use crate::error::TemplateError;
use crate::geom::{glyph_transform, to_pixel};
use crate::tangent::{first_black_pixel, tangent_at, Anchor, Tangent};

/// Where and how the glyph was stamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: Anchor,
    pub tangent: Tangent,
    /// Rotation applied to the sprite, radians.
    pub angle: f64,
    /// Sprite pixels that landed inside the canvas.
    pub splatted: usize,
}

/// Why the glyph was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The boundary mask has no black pixel.
    NoBoundary,
    /// The gradient vanished at the anchor.
    UndefinedTangent(Anchor),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphPlacement {
    Placed(Placement),
    Skipped(SkipReason),
}

impl GlyphPlacement {
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            GlyphPlacement::Placed(p) => Some(p),
            GlyphPlacement::Skipped(_) => None,
        }
    }
}

/// Splat every black sprite pixel onto a copy of `layer`.
///
/// Unweighted: several sprite pixels may hit the same target and some
/// targets stay unset. Returns the new layer and the in-bounds hit count.
pub fn stamp_glyph(
    layer: &RgbImage,
    glyph: &RgbImage,
    anchor: Anchor,
    angle: f64,
    downscale: f64,
) -> (RgbImage, usize) {
    let mut out = layer.clone();
    let (w, h) = layer.dimensions();
    let transform = glyph_transform(anchor.to_point(), glyph.dimensions(), angle, downscale);
    let mut splatted = 0;

    for (sx, sy, p) in glyph.enumerate_pixels() {
        if !is_black(*p) {
            continue;
        }
        let (tx, ty) = to_pixel(transform * Point::new(sx as f64, sy as f64));
        if tx >= 0 && ty >= 0 && tx < w as i64 && ty < h as i64 {
            out.put_pixel(tx as u32, ty as u32, BLACK);
            splatted += 1;
        }
    }
    (out, splatted)
}

/// Locate the anchor on `boundary`, orient the glyph along the tangent
/// and stamp it onto `dashed`.
///
/// Degenerate geometry skips the stamp and hands back `dashed` untouched.
pub fn place_glyph(
    boundary: &RgbImage,
    dashed: &RgbImage,
    glyph: &RgbImage,
    downscale: f64,
    angle_offset: f64,
) -> (RgbImage, GlyphPlacement) {
    let Some(anchor) = first_black_pixel(boundary) else {
        return (dashed.clone(), GlyphPlacement::Skipped(SkipReason::NoBoundary));
    };
    let tangent = match tangent_at(boundary, anchor) {
        Ok(t) => t,
        Err(_) => {
            return (
                dashed.clone(),
                GlyphPlacement::Skipped(SkipReason::UndefinedTangent(anchor)),
            )
        }
    };
    let angle = tangent.rotation(angle_offset);
    let (layer, splatted) = stamp_glyph(dashed, glyph, anchor, angle, downscale);
    let placement = Placement {
        anchor,
        tangent,
        angle,
        splatted,
    };
    (layer, GlyphPlacement::Placed(placement))
}

/// Black layer pixels replace the photograph; everything else shows through.
pub fn overlay(photo: &RgbImage, layer: &RgbImage) -> Result<RgbImage, TemplateError> {
    if photo.dimensions() != layer.dimensions() {
        return Err(TemplateError::SizeMismatch {
            expected: photo.dimensions(),
            actual: layer.dimensions(),
        });
    }
    Ok(map_colors2(photo, layer, |base, top| if is_black(top) { BLACK } else { base }))
}
