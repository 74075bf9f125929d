//! Exterior region detection by flood fill from the canvas corner.

use image::{Rgb, RgbImage};

use crate::bitmap::{BLACK, WHITE};

/// Dense visited grid produced by one flood fill.
#[derive(Debug, Clone)]
pub struct Reachability {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Reachability {
    /// Out-of-bounds coordinates are never reachable.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// 4-connected flood fill over pixels with exactly the seed's RGB value.
///
/// Uses an explicit stack so large regions never hit recursion limits.
/// Alpha does not exist on `RgbImage`, so it can't influence matching.
pub fn flood_fill(img: &RgbImage, seed_x: u32, seed_y: u32) -> Reachability {
    let (w, h) = img.dimensions();
    let mut cells = vec![false; (w as usize) * (h as usize)];
    if seed_x >= w || seed_y >= h {
        return Reachability {
            width: w,
            height: h,
            cells,
        };
    }

    let target: Rgb<u8> = *img.get_pixel(seed_x, seed_y);
    let mut stack: Vec<(u32, u32)> = vec![(seed_x, seed_y)];

    while let Some((x, y)) = stack.pop() {
        let idx = (y * w + x) as usize;
        if cells[idx] || *img.get_pixel(x, y) != target {
            continue;
        }
        cells[idx] = true;

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < w {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < h {
            stack.push((x, y + 1));
        }
    }

    Reachability {
        width: w,
        height: h,
        cells,
    }
}

/// Mark the background region connected to `(0, 0)`.
///
/// Reachable pixels come out black, everything else white, so holes
/// enclosed by the dilated object merge with the object itself.
/// The seed pixel is expected to be background; if it isn't, the fill
/// still runs over whatever component the corner belongs to.
pub fn exterior_mask(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }
    let reach = flood_fill(img, 0, 0);
    RgbImage::from_fn(w, h, |x, y| if reach.contains(x, y) { BLACK } else { WHITE })
}
