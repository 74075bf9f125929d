use std::fmt;

use thiserror::Error;

/// Fallible pipeline step a failure originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fit,
    Dash,
    Composite,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fit => "canvas fit",
            Stage::Dash => "dash encoding",
            Stage::Composite => "composite",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building a cut template.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("failed to save image: {0}")]
    ImageSave(String),

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("tangent undefined at ({x}, {y}): zero gradient")]
    UndefinedTangent { x: u32, y: u32 },

    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<TemplateError>,
    },
}

impl TemplateError {
    /// Tag this error with the pipeline step it came from.
    pub fn in_stage(self, stage: Stage) -> Self {
        TemplateError::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn stage_wrapper_keeps_the_cause() {
        let err = TemplateError::SizeMismatch {
            expected: (3, 3),
            actual: (3, 4),
        }
        .in_stage(Stage::Composite);
        assert_eq!(
            err.to_string(),
            "composite failed: size mismatch: expected (3, 3), got (3, 4)"
        );
        assert!(matches!(
            err.source().and_then(|s| s.downcast_ref::<TemplateError>()),
            Some(TemplateError::SizeMismatch { .. })
        ));
    }
}
