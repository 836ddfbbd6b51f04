use crate::models::ColourModel;
use thiserror::Error;

/// Errors raised by the segmentation pipeline.
///
/// Every variant except `Serialization` is raised before any pixel work
/// starts, so a failed call never leaves a partial result behind.
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("{needed} labels are needed to represent the {model} model, only {provided} provided")]
    PaletteSize {
        model: ColourModel,
        needed: usize,
        provided: usize,
    },

    #[error("channel shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("buffer of {len} values does not describe a {width}x{height} channel")]
    BufferLength { width: u32, height: u32, len: usize },

    #[error("unknown colour model: {0}")]
    UnknownModel(String),

    #[error("the {model} model has no class named `{class}`")]
    UnknownClass { model: ColourModel, class: String },

    #[error("hue {value} at pixel {index} is outside [0, 360]")]
    HueOutOfRange { index: usize, value: f64 },

    #[error("cannot segment an empty image")]
    EmptyImage,

    #[error("failed to serialize segmentation summary: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
