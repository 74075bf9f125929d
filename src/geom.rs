//! Shared geometry utilities.

use kurbo::{Affine, Point, Vec2};

/// Map glyph-sprite pixel coordinates onto the canvas.
///
/// The sprite is centred on its own midpoint, rotated by `angle`
/// (radians, y-down, so positive turns clockwise on screen), shrunk
/// by `downscale`, and moved to `anchor`.
pub fn glyph_transform(anchor: Point, sprite_size: (u32, u32), angle: f64, downscale: f64) -> Affine {
    let centre = Vec2::new(sprite_size.0 as f64 / 2.0, sprite_size.1 as f64 / 2.0);
    Affine::translate(anchor.to_vec2())
        * Affine::scale(1.0 / downscale)
        * Affine::rotate(angle)
        * Affine::translate(-centre)
}

/// Round to the nearest pixel, halves toward +∞.
pub fn to_pixel(p: Point) -> (i64, i64) {
    ((p.x + 0.5).floor() as i64, (p.y + 0.5).floor() as i64)
}
