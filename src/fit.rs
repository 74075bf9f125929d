//! Fit the photograph to the template canvas: fixed width, uniform white margin.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::bitmap::WHITE;
use crate::config::TemplateConfig;
use crate::error::TemplateError;

/// Canvas dimensions for a source of `width × height` under `config`.
///
/// Depends only on the four numbers, never on pixel content:
/// `(T, P + round(H0 · (T - 2P) / W0) + P)`.
pub fn canvas_size(width: u32, height: u32, config: &TemplateConfig) -> (u32, u32) {
    let (inner_w, inner_h) = inner_size(width, height, config);
    (inner_w + 2 * config.margin, inner_h + 2 * config.margin)
}

fn inner_size(width: u32, height: u32, config: &TemplateConfig) -> (u32, u32) {
    let inner_w = config.inner_width();
    let scale = inner_w as f64 / width as f64;
    // A very wide, very flat source can round to zero rows.
    let inner_h = ((height as f64 * scale).round() as u32).max(1);
    (inner_w, inner_h)
}

/// Resize to the inner width (bilinear) and centre on a white canvas.
pub fn fit_to_canvas(img: &RgbImage, config: &TemplateConfig) -> Result<RgbImage, TemplateError> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(TemplateError::EmptyImage { width: w, height: h });
    }
    if config.inner_width() == 0 {
        return Err(TemplateError::InvalidConfig(format!(
            "canvas width {} leaves no room inside a {} px margin",
            config.canvas_width, config.margin
        )));
    }

    let (inner_w, inner_h) = inner_size(w, h, config);
    let resized = imageops::resize(img, inner_w, inner_h, FilterType::Triangle);

    let (canvas_w, canvas_h) = canvas_size(w, h, config);
    let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, WHITE);
    imageops::replace(&mut canvas, &resized, config.margin as i64, config.margin as i64);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn canvas_size_follows_scale_formula() {
        let config = TemplateConfig::new(10, 50.0);
        // inner 240, scale 0.5 → inner height 160.
        assert_eq!(canvas_size(480, 320, &config), (300, 220));
        // 100 × 333 at scale 2.4 → 799.2 → 799.
        assert_eq!(canvas_size(100, 333, &config), (300, 859));
    }

    #[test]
    fn margins_are_pure_white() {
        let config = TemplateConfig::new(10, 50.0);
        let img = RgbImage::from_pixel(120, 60, Rgb([40, 90, 10]));
        let fitted = fit_to_canvas(&img, &config).unwrap();
        assert_eq!(fitted.dimensions(), (300, 180));
        for (x, y, p) in fitted.enumerate_pixels() {
            let inside = x >= 30 && x < 270 && y >= 30 && y < 150;
            if inside {
                assert_eq!(*p, Rgb([40, 90, 10]), "interior pixel ({x}, {y})");
            } else {
                assert_eq!(*p, WHITE, "margin pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = RgbImage::new(0, 10);
        let err = fit_to_canvas(&img, &TemplateConfig::new(10, 50.0)).unwrap_err();
        assert!(matches!(err, TemplateError::EmptyImage { .. }));
    }
}
