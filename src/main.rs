use clap::Parser;
use img2cut::{GlyphPlacement, TemplateConfig, TemplateError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "img2cut", about = "Photograph to printable cut-line template")]
struct Cli {
    /// Input photograph path(s) (PNG, JPEG, BMP). Several are processed in parallel.
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Glyph sprite, black on white (built-in scissors if omitted)
    #[arg(short, long)]
    glyph: Option<PathBuf>,

    /// Dilation radius in pixels
    #[arg(short, long)]
    padding: u32,

    /// Sobel magnitude threshold (higher = fewer edges)
    #[arg(short = 't', long)]
    edge_threshold: f64,

    /// Dash length in pixels
    #[arg(long, default_value = "5")]
    dash: u32,

    /// Gap length in pixels
    #[arg(long, default_value = "5")]
    gap: u32,

    /// Total canvas width in pixels
    #[arg(long, default_value = "300")]
    width: u32,

    /// White margin on every side, in pixels
    #[arg(long, default_value = "30")]
    margin: u32,

    /// Glyph rotation offset in radians
    #[arg(long, default_value = "0.3", allow_hyphen_values = true)]
    angle_offset: f64,

    /// Also write a side-by-side sheet of every intermediate stage
    #[arg(short, long)]
    debug: bool,
}

/// Output file stem for an input path.
fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "template".to_string())
}

fn save(img: &image::RgbImage, path: &Path) -> Result<(), TemplateError> {
    img.save(path)
        .map_err(|e| TemplateError::ImageSave(format!("{}: {}", path.display(), e)))
}

fn run_one(input: &Path, cli: &Cli, config: &TemplateConfig) -> Result<GlyphPlacement, TemplateError> {
    let template = img2cut::process_files(input, cli.glyph.as_deref(), config)?;
    let name = stem(input);

    save(&template.original, &cli.output.join(format!("{}_original.png", name)))?;
    let out = cli.output.join(format!("{}_template.png", name));
    save(&template.composite, &out)?;
    if cli.debug {
        let sheet = img2cut::render::stage_sheet(&template.stages, &template.placement);
        save(&sheet, &cli.output.join(format!("{}_stages.png", name)))?;
    }
    eprintln!("  {}: \u{2713} {}", name, out.display());
    Ok(template.placement)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = TemplateConfig {
        canvas_width: cli.width,
        margin: cli.margin,
        dash_length: cli.dash,
        gap_length: cli.gap,
        glyph_angle_offset: cli.angle_offset,
        ..TemplateConfig::new(cli.padding, cli.edge_threshold)
    };
    config.validate()?;
    std::fs::create_dir_all(&cli.output)?;

    eprintln!();
    eprintln!("  img2cut \u{00b7} {} photograph(s)", cli.input.len());
    eprintln!();

    // Runs share nothing, so each photograph gets its own worker.
    let results: Vec<(PathBuf, Result<GlyphPlacement, TemplateError>)> = cli
        .input
        .par_iter()
        .map(|input| (input.clone(), run_one(input, &cli, &config)))
        .collect();

    let mut failed = 0;
    for (input, result) in &results {
        match result {
            Ok(GlyphPlacement::Placed(_)) => {}
            Ok(GlyphPlacement::Skipped(reason)) => {
                eprintln!("  ! {}: glyph skipped ({:?})", input.display(), reason);
            }
            Err(e) => {
                eprintln!("  \u{2717} {}: {}", input.display(), e);
                failed += 1;
            }
        }
    }
    eprintln!();

    if failed > 0 {
        return Err(format!("{} of {} photograph(s) failed", failed, results.len()).into());
    }
    Ok(())
}
