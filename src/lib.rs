//! img2cut: photograph → printable cut-line template.
//!
//! Finds the silhouette of a flat object on a light background, outlines
//! it with a dashed cut line and stamps a scissors glyph tangent to the
//! outline, for paper-craft templates.
//!
//! # Example
//!
//! ```no_run
//! use img2cut::{process_files, TemplateConfig};
//! use std::path::Path;
//!
//! let config = TemplateConfig::new(10, 50.0);
//! let template = process_files(Path::new("leaf.png"), None, &config)?;
//! template.composite.save("leaf_template.png").ok();
//! # Ok::<(), img2cut::TemplateError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod bitmap;
pub mod composite;
pub mod dash;
pub mod edges;
pub mod error;
pub mod fit;
pub mod mask;
pub mod morph;
pub mod render;
pub mod tangent;

pub use composite::{GlyphPlacement, Placement, SkipReason};
pub use config::TemplateConfig;
pub use error::{Stage, TemplateError};
pub use fit::canvas_size;
pub use tangent::{Anchor, ClippedAxis, Tangent};

// Re-export kurbo so downstream users get the same version
// used by Anchor::to_point and Tangent::direction.
pub use kurbo;

use image::{RgbImage, RgbaImage};
use std::fmt;
use std::path::Path;
use std::time::Instant;

use crate::bitmap::WHITE;

/// Step-by-step progress on stderr. Lines carry the photograph's name
/// when one is known, so parallel runs stay tellable apart.
#[derive(Debug, Clone, Default)]
struct StepLog {
    tag: String,
}

impl StepLog {
    fn for_path(path: &Path) -> Self {
        let tag = path
            .file_stem()
            .map(|s| format!("{}: ", s.to_string_lossy()))
            .unwrap_or_default();
        Self { tag }
    }

    fn format(&self, step: &str, detail: fmt::Arguments<'_>) -> String {
        format!("  {}{:<12}{}", self.tag, step, detail)
    }

    fn step(&self, step: &str, detail: fmt::Arguments<'_>) {
        eprintln!("{}", self.format(step, detail));
    }
}

/// Intermediate masks, in pipeline order. All share the canvas size.
#[derive(Debug, Clone)]
pub struct StageImages {
    /// Binarized fitted photograph.
    pub silhouette: RgbImage,
    /// Silhouette grown by `padding`.
    pub dilated: RgbImage,
    /// Background region connected to the corner, in black.
    pub exterior: RgbImage,
    /// Sobel boundary of the exterior mask.
    pub boundary: RgbImage,
    /// Boundary after dash encoding.
    pub dashed: RgbImage,
    /// Dashed boundary with the glyph stamped on.
    pub layer: RgbImage,
}

/// The result of a pipeline run.
#[derive(Debug, Clone)]
pub struct CutTemplate {
    /// The photograph fitted to the canvas, before the overlay.
    pub original: RgbImage,
    /// Cut line and glyph drawn over `original`.
    pub composite: RgbImage,
    /// Where the glyph went, or why it was left out.
    pub placement: GlyphPlacement,
    pub stages: StageImages,
}

/// Full pipeline: photograph + glyph sprite → cut template.
///
/// Both inputs are flattened onto white first, so transparent glyph
/// pixels never count as ink.
pub fn process(
    photograph: &RgbaImage,
    glyph: &RgbaImage,
    config: &TemplateConfig,
) -> Result<CutTemplate, TemplateError> {
    run(photograph, glyph, config, &StepLog::default())
}

fn run(
    photograph: &RgbaImage,
    glyph: &RgbaImage,
    config: &TemplateConfig,
    log: &StepLog,
) -> Result<CutTemplate, TemplateError> {
    config.validate()?;
    let (w, h) = photograph.dimensions();
    if w == 0 || h == 0 {
        return Err(TemplateError::EmptyImage { width: w, height: h });
    }
    let (gw, gh) = glyph.dimensions();
    log.step("Load", format_args!("{}x{} px photograph, {}x{} px glyph", w, h, gw, gh));

    // ── Normalize & fit ───────────────────────────────────
    let flat = bitmap::flatten_alpha(photograph);
    let glyph = bitmap::flatten_alpha(glyph);
    let fitted = fit::fit_to_canvas(&flat, config).map_err(|e| e.in_stage(Stage::Fit))?;
    let (cw, ch) = fitted.dimensions();
    log.step(
        "Fit",
        format_args!(
            "{}x{} canvas (margin {}, scale \u{00d7}{:.3})",
            cw,
            ch,
            config.margin,
            config.inner_width() as f64 / w as f64,
        ),
    );

    run_canvas(fitted, &glyph, config, log)
}

/// Run everything after the fit on an already-fitted canvas.
///
/// The canvas corner `(0, 0)` must be background white.
pub fn process_canvas(
    canvas: RgbImage,
    glyph: &RgbImage,
    config: &TemplateConfig,
) -> Result<CutTemplate, TemplateError> {
    run_canvas(canvas, glyph, config, &StepLog::default())
}

fn run_canvas(
    canvas: RgbImage,
    glyph: &RgbImage,
    config: &TemplateConfig,
    log: &StepLog,
) -> Result<CutTemplate, TemplateError> {
    config.validate()?;
    let t_start = Instant::now();

    // ── Silhouette ────────────────────────────────────────
    let silhouette = bitmap::binarize(&canvas);
    let dilated = morph::dilate(&silhouette, config.padding);
    log.step(
        "Silhouette",
        format_args!(
            "{} px \u{2192} {} px after dilation (r={})",
            bitmap::count_black(&silhouette),
            bitmap::count_black(&dilated),
            config.padding,
        ),
    );
    if matches!(dilated.get_pixel_checked(0, 0), Some(p) if *p != WHITE) {
        log.step(
            "Warning",
            format_args!("corner seed is not background; exterior mask may be inverted"),
        );
    }
    let exterior = mask::exterior_mask(&dilated);
    log.step("Mask", format_args!("{} exterior px", bitmap::count_black(&exterior)));

    // ── Outline ───────────────────────────────────────────
    let boundary = edges::extract_edges(&exterior, config.edge_threshold);
    let dashed = dash::dashed(&boundary, config.dash_length, config.gap_length)
        .map_err(|e| e.in_stage(Stage::Dash))?;
    log.step(
        "Outline",
        format_args!(
            "{} boundary px \u{2192} {} dashed px  (threshold {}, {}/{})",
            bitmap::count_black(&boundary),
            bitmap::count_black(&dashed),
            config.edge_threshold,
            config.dash_length,
            config.gap_length,
        ),
    );

    // ── Glyph ─────────────────────────────────────────────
    let (layer, placement) = composite::place_glyph(
        &boundary,
        &dashed,
        glyph,
        config.glyph_downscale,
        config.glyph_angle_offset,
    );
    match &placement {
        GlyphPlacement::Placed(p) => {
            let fallback = if p.tangent.fallback.is_some() { " (border fallback)" } else { "" };
            log.step(
                "Glyph",
                format_args!(
                    "anchor ({}, {}) \u{00b7} tangent ({:.3}, {:.3}){} \u{00b7} {:.3} rad \u{00b7} {} px",
                    p.anchor.x,
                    p.anchor.y,
                    p.tangent.direction.x,
                    p.tangent.direction.y,
                    fallback,
                    p.angle,
                    p.splatted,
                ),
            );
        }
        GlyphPlacement::Skipped(SkipReason::NoBoundary) => {
            log.step("Warning", format_args!("no boundary found, glyph skipped"));
        }
        GlyphPlacement::Skipped(SkipReason::UndefinedTangent(a)) => {
            log.step(
                "Warning",
                format_args!("zero gradient at ({}, {}), glyph skipped", a.x, a.y),
            );
        }
    }

    // ── Overlay ───────────────────────────────────────────
    let composite = composite::overlay(&canvas, &layer).map_err(|e| e.in_stage(Stage::Composite))?;
    let (cw, ch) = composite.dimensions();
    log.step(
        "Result",
        format_args!(
            "{}x{} \u{00b7} {} cut px  ({}ms)",
            cw,
            ch,
            bitmap::count_black(&layer),
            t_start.elapsed().as_millis(),
        ),
    );

    Ok(CutTemplate {
        original: canvas,
        composite,
        placement,
        stages: StageImages {
            silhouette,
            dilated,
            exterior,
            boundary,
            dashed,
            layer,
        },
    })
}

/// Convenience: load the photograph (and optionally a glyph) from disk.
/// Without a glyph path the built-in scissors are used. Progress lines
/// are tagged with the photograph's file stem.
pub fn process_files(
    photograph: &Path,
    glyph: Option<&Path>,
    config: &TemplateConfig,
) -> Result<CutTemplate, TemplateError> {
    let photo = bitmap::load_rgba(photograph)?;
    let glyph = match glyph {
        Some(path) => bitmap::load_rgba(path)?,
        None => {
            let (w, h) = render::SCISSORS_SIZE;
            render::scissors_glyph(w, h)?
        }
    };
    run(&photo, &glyph, config, &StepLog::for_path(photograph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{is_black, is_white, BLACK, WHITE};
    use image::{Rgb, Rgba};

    fn square_canvas() -> RgbImage {
        RgbImage::from_fn(100, 100, |x, y| {
            if (30..70).contains(&x) && (30..70).contains(&y) {
                BLACK
            } else {
                WHITE
            }
        })
    }

    fn square_config() -> TemplateConfig {
        TemplateConfig {
            padding: 3,
            edge_threshold: 50.0,
            dash_length: 5,
            gap_length: 5,
            ..TemplateConfig::new(10, 50.0)
        }
    }

    fn black_bounds(img: &RgbImage) -> (u32, u32, u32, u32) {
        let mut b = (u32::MAX, u32::MAX, 0, 0);
        for (x, y, p) in img.enumerate_pixels() {
            if is_black(*p) {
                b = (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y));
            }
        }
        b
    }

    #[test]
    fn square_end_to_end() {
        let canvas = square_canvas();
        let glyph = bitmap::flatten_alpha(&render::scissors_glyph(96, 64).unwrap());
        let t = process_canvas(canvas.clone(), &glyph, &square_config()).unwrap();

        // Dilation grows 40×40 to 46×46.
        assert_eq!(black_bounds(&t.stages.dilated), (27, 27, 72, 72));

        // The exterior mask fills the dilation ring's pocket.
        assert!(is_black(*t.stages.exterior.get_pixel(0, 0)));
        assert!(is_white(*t.stages.exterior.get_pixel(50, 50)));
        assert!(is_white(*t.stages.exterior.get_pixel(28, 50)));

        // Thin outline hugging the dilated square.
        let (x0, y0, x1, y1) = black_bounds(&t.stages.boundary);
        assert_eq!((x0, y0, x1, y1), (26, 26, 73, 73));
        assert!(is_white(*t.stages.boundary.get_pixel(50, 50)));

        // Dash phases along the outline.
        for (x, y, p) in t.stages.boundary.enumerate_pixels() {
            if is_black(*p) {
                let drawn = is_black(*t.stages.dashed.get_pixel(x, y));
                assert_eq!(drawn, (x + y) % 10 < 5, "({x}, {y})");
            }
        }

        // Anchor: first outline pixel in row-major order, on the top edge.
        let placed = t.placement.placement().expect("glyph placed");
        assert_eq!(placed.anchor, Anchor { x: 29, y: 26 });
        assert_eq!(placed.tangent.fallback, None);
        let s5 = 5f64.sqrt();
        assert!((placed.tangent.direction.x - 2.0 / s5).abs() < 1e-9);
        assert!((placed.tangent.direction.y + 1.0 / s5).abs() < 1e-9);
        assert!(placed.splatted > 0);

        // Composite = photograph except where the layer is black.
        assert_eq!(t.original, canvas);
        for (x, y, p) in t.composite.enumerate_pixels() {
            if is_black(*t.stages.layer.get_pixel(x, y)) {
                assert_eq!(*p, BLACK);
            } else {
                assert_eq!(*p, *canvas.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn stage_sheet_lays_out_six_panels() {
        let glyph = bitmap::flatten_alpha(&render::scissors_glyph(96, 64).unwrap());
        let t = process_canvas(square_canvas(), &glyph, &square_config()).unwrap();
        let sheet = render::stage_sheet(&t.stages, &t.placement);
        assert_eq!(sheet.dimensions(), (6 * 100 + 10, 100));

        // Grey separator after the first panel, silhouette copied verbatim.
        assert_eq!(*sheet.get_pixel(100, 50), Rgb([200, 200, 200]));
        assert_eq!(*sheet.get_pixel(50, 50), *t.stages.silhouette.get_pixel(50, 50));

        // Anchor (29, 26) crossed in red on the last panel.
        let x0 = 5 * 102;
        assert_eq!(*sheet.get_pixel(x0 + 29, 26), Rgb([255, 0, 0]));
        assert_eq!(*sheet.get_pixel(x0 + 30, 26), Rgb([255, 0, 0]));
        assert_eq!(*sheet.get_pixel(x0 + 29, 27), Rgb([255, 0, 0]));
    }

    #[test]
    fn transparent_glyph_leaves_no_ink() {
        let photo = RgbaImage::from_fn(200, 100, |x, y| {
            if (60..140).contains(&x) && (30..70).contains(&y) {
                Rgba([200, 30, 30, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        // Black RGB under zero alpha must flatten to white.
        let glyph = RgbaImage::from_pixel(24, 16, Rgba([0, 0, 0, 0]));
        let t = process(&photo, &glyph, &TemplateConfig::new(10, 50.0)).unwrap();
        let placed = t.placement.placement().expect("glyph placed");
        assert_eq!(placed.splatted, 0);
        assert_eq!(t.stages.layer, t.stages.dashed);
    }

    #[test]
    fn step_lines_carry_the_photograph_name() {
        let log = StepLog::for_path(Path::new("shots/leaf.png"));
        assert_eq!(
            log.format("Mask", format_args!("{} exterior px", 7)),
            "  leaf: Mask        7 exterior px"
        );
        let plain = StepLog::default();
        assert_eq!(plain.format("Load", format_args!("ok")), "  Load        ok");
    }

    #[test]
    fn blank_canvas_keeps_photograph() {
        let canvas = RgbImage::from_pixel(50, 40, WHITE);
        let glyph = RgbImage::from_pixel(6, 6, BLACK);
        let t = process_canvas(canvas.clone(), &glyph, &square_config()).unwrap();
        assert_eq!(t.placement, GlyphPlacement::Skipped(SkipReason::NoBoundary));
        assert_eq!(t.composite, canvas);
    }

    #[test]
    fn transparent_photograph_is_fitted() {
        let photo = RgbaImage::from_fn(200, 100, |x, y| {
            if (60..140).contains(&x) && (30..70).contains(&y) {
                Rgba([200, 30, 30, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let glyph = render::scissors_glyph(96, 64).unwrap();
        let t = process(&photo, &glyph, &TemplateConfig::new(10, 50.0)).unwrap();
        assert_eq!(t.original.dimensions(), (300, 180));
        assert_eq!(t.composite.dimensions(), (300, 180));
        assert_eq!(*t.original.get_pixel(0, 0), WHITE);
        assert_eq!(*t.original.get_pixel(150, 90), Rgb([200, 30, 30]));
        assert!(t.placement.placement().is_some());
    }

    #[test]
    fn empty_photograph_fails_fast() {
        let glyph = RgbaImage::new(4, 4);
        let err = process(&RgbaImage::new(0, 0), &glyph, &TemplateConfig::new(10, 50.0)).unwrap_err();
        assert!(matches!(err, TemplateError::EmptyImage { .. }));
    }

    #[test]
    fn invalid_config_is_reported() {
        let config = TemplateConfig {
            dash_length: 0,
            gap_length: 0,
            ..TemplateConfig::new(10, 50.0)
        };
        let err = process_canvas(square_canvas(), &RgbImage::new(1, 1), &config).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidConfig(_)));
    }
}
