//! Silhouette growth by disk stamping.

use image::RgbImage;

use crate::bitmap::{is_black, is_white, BLACK, WHITE};

/// Offsets `(dx, dy)` inside a disk of the given radius, edge inclusive.
fn disk_offsets(radius: u32) -> Vec<(i64, i64)> {
    let r = radius as i64;
    let r2 = r * r;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// A black pixel with at least one in-bounds white 8-neighbor.
fn is_boundary(mask: &RgbImage, x: u32, y: u32) -> bool {
    let (w, h) = mask.dimensions();
    if !is_black(*mask.get_pixel(x, y)) {
        return false;
    }
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                continue;
            }
            if is_white(*mask.get_pixel(nx as u32, ny as u32)) {
                return true;
            }
        }
    }
    false
}

/// Grow black regions outward by `padding` pixels.
///
/// Only boundary pixels stamp a disk; the output starts all white, so the
/// deep interior of a large region comes out white. The exterior mask
/// stage folds those pockets back in.
pub fn dilate(mask: &RgbImage, padding: u32) -> RgbImage {
    let (w, h) = mask.dimensions();
    let mut out = RgbImage::from_pixel(w, h, WHITE);
    let disk = disk_offsets(padding);

    for y in 0..h {
        for x in 0..w {
            if !is_boundary(mask, x, y) {
                continue;
            }
            for &(dx, dy) in &disk {
                let tx = x as i64 + dx;
                let ty = y as i64 + dy;
                if tx >= 0 && ty >= 0 && tx < w as i64 && ty < h as i64 {
                    out.put_pixel(tx as u32, ty as u32, BLACK);
                }
            }
        }
    }
    out
}
