//! Hue-only fuzzy classification with a stable arg-max.

use crate::channel::{Channel, ClassLabelMap};
use crate::error::{Result, SegmentationError};
use crate::models::ColourModel;
use rayon::prelude::*;

/// Index of the class with the highest membership degree for `hue`.
///
/// Ties, including a hue outside every class's support, resolve to the class
/// declared first in the model's table.
pub fn classify_hue(hue: f64, model: ColourModel) -> usize {
    let mut best_idx = 0usize;
    let mut best_degree = f64::NEG_INFINITY;
    for (i, class) in model.classes().iter().enumerate() {
        let degree = class.function.degree(hue);
        if degree > best_degree {
            best_degree = degree;
            best_idx = i;
        }
    }
    best_idx
}

/// Labels every pixel of `hue` with its chromatic class under `model`.
pub fn classify(hue: &Channel<f64>, model: ColourModel) -> Result<ClassLabelMap> {
    validate_hue(hue)?;

    let labels: Vec<i32> = hue
        .as_slice()
        .par_iter()
        .map(|&h| classify_hue(h, model) as i32)
        .collect();

    Channel::new(hue.width(), hue.height(), labels)
}

fn validate_hue(hue: &Channel<f64>) -> Result<()> {
    let invalid = hue
        .as_slice()
        .par_iter()
        .enumerate()
        .find_first(|(_, h)| !(0.0..=360.0).contains(*h));

    match invalid {
        Some((index, &value)) => Err(SegmentationError::HueOutOfRange { index, value }),
        None => Ok(()),
    }
}
