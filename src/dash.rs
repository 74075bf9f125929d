//! Dash/gap encoding of the boundary mask.
//!
//! The phase of a boundary pixel is `(x + y) mod (dash + gap)`, so the
//! pattern bands diagonally across the canvas rather than following arc
//! length along the outline. Horizontal and vertical runs come out as
//! regular dashes; a run along `x + y = const` keeps a single phase and
//! is either fully drawn or fully dropped.

use image::RgbImage;

use crate::bitmap::{is_black, WHITE};
use crate::error::TemplateError;

/// Keep black pixels whose phase falls inside the dash, whiten the rest.
/// Non-black pixels pass through unchanged.
pub fn dashed(mask: &RgbImage, dash_length: u32, gap_length: u32) -> Result<RgbImage, TemplateError> {
    let period = dash_length as u64 + gap_length as u64;
    if period == 0 {
        return Err(TemplateError::InvalidConfig(
            "dash and gap lengths are both zero".to_string(),
        ));
    }
    let (w, h) = mask.dimensions();
    Ok(RgbImage::from_fn(w, h, |x, y| {
        let p = *mask.get_pixel(x, y);
        if !is_black(p) {
            return p;
        }
        let phase = (x as u64 + y as u64) % period;
        if phase < dash_length as u64 {
            p
        } else {
            WHITE
        }
    }))
}
