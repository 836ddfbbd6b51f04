//! Fuzzy-set colour segmentation over the hue circle.
//!
//! Every pixel is assigned to one of a model's named colour classes by
//! evaluating piecewise-linear membership functions on its hue and keeping the
//! first class with the highest degree. Low-saturation and extreme-value pixels
//! can be overridden as black, white or grey, and the result is rendered as a
//! false-colour image with per-class proportions.
//!
//! ```rust,no_run
//! use colour_segmentation::{ColourModel, SegmentOptions, Segmentator};
//!
//! let image = image::RgbImage::new(64, 64);
//! let result = Segmentator::new(image)
//!     .segment(ColourModel::Amante, &SegmentOptions::default())
//!     .unwrap();
//! println!("red: {:.2}%", result.red_proportion() * 100.0);
//! ```

pub mod achromatic;
pub mod channel;
pub mod classifier;
pub mod correction;
pub mod error;
pub mod hsv;
pub mod membership;
pub mod models;
pub mod render;
pub mod segmentator;

pub use achromatic::{overlay, AchromaticClass, AchromaticThresholds};
pub use channel::{Channel, ClassLabelMap};
pub use classifier::{classify, classify_hue};
pub use correction::correct;
pub use error::{Result, SegmentationError};
pub use hsv::{HsvChannels, HuePrecision};
pub use membership::{Bound, FuzzyClass, MembershipFunction, MembershipShape, Segment};
pub use models::{ColourModel, ModelDescriptor};
pub use render::{colour_proportion, render, ClassPalette, ClassStatistic};
pub use segmentator::{
    segment_hsv, SegmentOptions, SegmentationResult, SegmentationSummary, Segmentator,
};

/// Membership degree of `hue` in the class `class_name` of `model`.
pub fn evaluate(model: ColourModel, class_name: &str, hue: f64) -> Result<f64> {
    model.evaluate(class_name, hue)
}
