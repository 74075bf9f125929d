//! Raster helpers around the pipeline: the built-in scissors glyph and
//! the side-by-side stage sheet used for debugging.
//!
//! The glyph is drawn as kurbo shapes and rasterized with tiny-skia
//! (aliased), then snapped to a strict black/white sprite.

use image::imageops;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_cross_mut;
use kurbo::{BezPath, Circle, Line, PathEl, Shape};

use crate::composite::GlyphPlacement;
use crate::error::TemplateError;
use crate::StageImages;

/// Default sprite size of the built-in scissors, before the 1/3 downscale.
pub const SCISSORS_SIZE: (u32, u32) = (96, 64);

/// Convert a kurbo `BezPath` to a `tiny_skia::Path`.
fn kurbo_to_tinyskia(bezpath: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in bezpath.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Outline of an open pair of scissors, handles on the left, blades
/// pointing right, scaled to a `width × height` box.
fn scissors_outline(width: f64, height: f64) -> (BezPath, BezPath) {
    let sx = width / 96.0;
    let sy = height / 64.0;
    let r = 10.0 * sx.min(sy);

    let mut strokes = BezPath::new();
    for cy in [18.0, 46.0] {
        let handle = Circle::new((17.0 * sx, cy * sy), r);
        strokes.extend(handle.path_elements(0.1));
    }
    // Blades cross at the pivot and open towards the right edge.
    strokes.extend(Line::new((26.0 * sx, 23.0 * sy), (92.0 * sx, 44.0 * sy)).path_elements(0.1));
    strokes.extend(Line::new((26.0 * sx, 41.0 * sy), (92.0 * sx, 20.0 * sy)).path_elements(0.1));

    let pivot = Circle::new((59.0 * sx, 32.0 * sy), 3.5 * sx.min(sy)).to_path(0.1);
    (strokes, pivot)
}

/// Rasterize the built-in scissors glyph as an opaque black-on-white sprite.
pub fn scissors_glyph(width: u32, height: u32) -> Result<RgbaImage, TemplateError> {
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(TemplateError::EmptyImage { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let mut paint = tiny_skia::Paint::default();
    paint.set_color(tiny_skia::Color::BLACK);
    paint.anti_alias = false;

    let (strokes, pivot) = scissors_outline(width as f64, height as f64);
    let stroke = tiny_skia::Stroke {
        width: (width.min(height) as f32 / 16.0).max(1.0),
        ..tiny_skia::Stroke::default()
    };
    if let Some(path) = kurbo_to_tinyskia(&strokes) {
        pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
    }
    if let Some(path) = kurbo_to_tinyskia(&pivot) {
        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    let sprite = RgbaImage::from_fn(width, height, |x, y| {
        let px = pixmap.pixels()[(y * width + x) as usize];
        if px.red() < 128 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    Ok(sprite)
}

/// All intermediate stages side by side, separated by grey bars.
/// The anchor, when one was found, is marked with a red cross on the last panel.
pub fn stage_sheet(stages: &StageImages, placement: &GlyphPlacement) -> RgbImage {
    let separator: u32 = 2;
    let mut layer = stages.layer.clone();
    if let Some(p) = placement.placement() {
        draw_cross_mut(&mut layer, Rgb([255, 0, 0]), p.anchor.x as i32, p.anchor.y as i32);
    }
    let panels: [&RgbImage; 6] = [
        &stages.silhouette,
        &stages.dilated,
        &stages.exterior,
        &stages.boundary,
        &stages.dashed,
        &layer,
    ];

    let (panel_w, panel_h) = stages.silhouette.dimensions();
    let total_w = panel_w * panels.len() as u32 + separator * (panels.len() as u32 - 1);
    let mut sheet = RgbImage::from_pixel(total_w, panel_h, Rgb([200, 200, 200]));
    for (i, panel) in panels.iter().enumerate() {
        let x = i as u32 * (panel_w + separator);
        imageops::replace(&mut sheet, *panel, x as i64, 0);
    }
    sheet
}
