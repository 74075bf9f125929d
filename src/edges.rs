//! Sobel edge extraction on BT.709 luminance.

use image::{Rgb, RgbImage};

use crate::bitmap::{BLACK, WHITE};

const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// ITU-R BT.709 luminosity, unrounded.
#[inline]
pub fn luminance(p: Rgb<u8>) -> f64 {
    let [r, g, b] = p.0;
    0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64
}

/// Sobel response `(sum_x, sum_y)` at `(x, y)`.
///
/// The caller guarantees the full 3×3 neighborhood is inside the image.
pub(crate) fn sobel(sample: impl Fn(u32, u32) -> f64, x: u32, y: u32) -> (f64, f64) {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let v = sample(x + kx - 1, y + ky - 1);
            sum_x += v * SOBEL_X[ky as usize][kx as usize];
            sum_y += v * SOBEL_Y[ky as usize][kx as usize];
        }
    }
    (sum_x, sum_y)
}

/// Gradient magnitude at every interior pixel; the 1-pixel border is 0.
pub fn gradient_magnitude(img: &RgbImage) -> Vec<f64> {
    let (w, h) = img.dimensions();
    let gray: Vec<f64> = img.pixels().map(|p| luminance(*p)).collect();
    let mut mag = vec![0.0; gray.len()];
    if w < 3 || h < 3 {
        return mag;
    }
    let at = |x: u32, y: u32| gray[(y * w + x) as usize];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let (gx, gy) = sobel(at, x, y);
            mag[(y * w + x) as usize] = (gx * gx + gy * gy).sqrt();
        }
    }
    mag
}

/// Binary boundary: magnitude `>= threshold` → black, else white.
///
/// Border pixels have no full neighborhood and are always background.
pub fn extract_edges(img: &RgbImage, threshold: f64) -> RgbImage {
    let (w, h) = img.dimensions();
    let mag = gradient_magnitude(img);
    RgbImage::from_fn(w, h, |x, y| {
        let border = x == 0 || y == 0 || x + 1 >= w || y + 1 >= h;
        if !border && mag[(y * w + x) as usize] >= threshold {
            BLACK
        } else {
            WHITE
        }
    })
}
