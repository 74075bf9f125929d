//! Raster loading, alpha flattening and binarization.
//!
//! Every mask in the pipeline is an `RgbImage` holding only pure black
//! (foreground) and pure white (background).

use std::path::Path;

use image::{ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::map::map_colors;

use crate::error::TemplateError;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Exact `(0, 0, 0)` test.
#[inline]
pub fn is_black(p: Rgb<u8>) -> bool {
    p.0 == [0, 0, 0]
}

/// Exact `(255, 255, 255)` test. Near-white does not count.
#[inline]
pub fn is_white(p: Rgb<u8>) -> bool {
    p.0 == [255, 255, 255]
}

/// Load an image from disk as RGBA. RGB sources get alpha 255.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, TemplateError> {
    let img = ImageReader::open(path)
        .map_err(|e| TemplateError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| TemplateError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .into_rgba8();
    Ok(img)
}

/// Replace fully transparent pixels with white and drop alpha everywhere else.
pub fn flatten_alpha(img: &RgbaImage) -> RgbImage {
    map_colors(img, |Rgba([r, g, b, a])| {
        if a == 0 {
            WHITE
        } else {
            Rgb([r, g, b])
        }
    })
}

/// Hard threshold: exactly white stays white, everything else turns black.
pub fn binarize(img: &RgbImage) -> RgbImage {
    map_colors(img, |p| if is_white(p) { WHITE } else { BLACK })
}

/// Count black pixels in a mask.
pub fn count_black(img: &RgbImage) -> usize {
    img.pixels().filter(|p| is_black(**p)).count()
}
