use crate::error::TemplateError;

/// All template parameters in one struct.
///
/// `padding` and `edge_threshold` depend on the photograph and have no
/// default; [`TemplateConfig::new`] takes them and fills in the paper-craft
/// layout for the rest: a 300 px wide canvas with a 30 px white margin
/// and 5/5 px dashes.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    // -- Canvas --
    /// Total output width in pixels, margins included.
    pub canvas_width: u32,
    /// White margin added on every side of the fitted photograph.
    pub margin: u32,

    // -- Silhouette --
    /// Dilation radius in pixels. Closes gaps and holes up to this span.
    pub padding: u32,

    // -- Outline --
    /// Minimum Sobel gradient magnitude for a pixel to count as edge.
    /// Higher = fewer edges.
    pub edge_threshold: f64,
    /// Dash run length in pixels.
    pub dash_length: u32,
    /// Gap run length in pixels.
    pub gap_length: u32,

    // -- Glyph --
    /// The glyph sprite is shrunk by this factor when splatted.
    pub glyph_downscale: f64,
    /// Subtracted from the tangent angle (radians) to compensate for the
    /// orientation the glyph was drawn in.
    pub glyph_angle_offset: f64,
}

impl TemplateConfig {
    pub fn new(padding: u32, edge_threshold: f64) -> Self {
        Self {
            canvas_width: 300,
            margin: 30,
            padding,
            edge_threshold,
            dash_length: 5,
            gap_length: 5,
            glyph_downscale: 3.0,
            glyph_angle_offset: 0.3,
        }
    }

    /// Width available to the photograph once margins are taken off.
    pub fn inner_width(&self) -> u32 {
        self.canvas_width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.inner_width() == 0 {
            return Err(TemplateError::InvalidConfig(format!(
                "canvas width {} leaves no room inside a {} px margin",
                self.canvas_width, self.margin
            )));
        }
        if self.dash_length + self.gap_length == 0 {
            return Err(TemplateError::InvalidConfig(
                "dash and gap lengths are both zero".to_string(),
            ));
        }
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(TemplateError::InvalidConfig(format!(
                "edge threshold must be a non-negative number, got {}",
                self.edge_threshold
            )));
        }
        if !(self.glyph_downscale.is_finite() && self.glyph_downscale > 0.0) {
            return Err(TemplateError::InvalidConfig(format!(
                "glyph downscale must be positive, got {}",
                self.glyph_downscale
            )));
        }
        if !self.glyph_angle_offset.is_finite() {
            return Err(TemplateError::InvalidConfig(
                "glyph angle offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_layout_is_valid() {
        let config = TemplateConfig::new(10, 50.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.inner_width(), 240);
        assert_eq!((config.dash_length, config.gap_length), (5, 5));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        assert!(TemplateConfig::new(10, -1.0).validate().is_err());
        assert!(TemplateConfig::new(10, f64::NAN).validate().is_err());
    }

    #[test]
    fn margin_wider_than_canvas_is_rejected() {
        let config = TemplateConfig {
            canvas_width: 60,
            margin: 30,
            ..TemplateConfig::new(10, 50.0)
        };
        assert!(matches!(config.validate(), Err(TemplateError::InvalidConfig(_))));
    }

    #[test]
    fn zero_dash_period_is_rejected() {
        let config = TemplateConfig {
            dash_length: 0,
            gap_length: 0,
            ..TemplateConfig::new(10, 50.0)
        };
        assert!(config.validate().is_err());
    }
}
