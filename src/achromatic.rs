//! Saturation/value overrides for black, white and grey pixels.

use crate::channel::{Channel, ClassLabelMap};
use crate::error::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const BLACK_LABEL: i32 = -1;
pub const WHITE_LABEL: i32 = -2;
pub const GREY_LABEL: i32 = -3;

/// Achromatic categories, each with a fixed label and colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchromaticClass {
    Black,
    White,
    Grey,
}

impl AchromaticClass {
    pub const ALL: [AchromaticClass; 3] = [
        AchromaticClass::Black,
        AchromaticClass::White,
        AchromaticClass::Grey,
    ];

    pub fn label(self) -> i32 {
        match self {
            AchromaticClass::Black => BLACK_LABEL,
            AchromaticClass::White => WHITE_LABEL,
            AchromaticClass::Grey => GREY_LABEL,
        }
    }

    pub fn colour(self) -> [u8; 3] {
        match self {
            AchromaticClass::Black => [0, 0, 0],
            AchromaticClass::White => [255, 255, 255],
            AchromaticClass::Grey => [128, 128, 128],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AchromaticClass::Black => "black",
            AchromaticClass::White => "white",
            AchromaticClass::Grey => "grey",
        }
    }

    pub fn from_label(label: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.label() == label)
    }
}

/// Thresholds on value and saturation deciding achromatic pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchromaticThresholds {
    /// `value <= black_value` is black.
    pub black_value: f64,
    /// `value > white_value` with low saturation is white.
    pub white_value: f64,
    /// `saturation <= max_saturation` marks white and grey candidates.
    pub max_saturation: f64,
}

impl Default for AchromaticThresholds {
    fn default() -> Self {
        Self {
            black_value: 0.19,
            white_value: 0.81,
            max_saturation: 0.14,
        }
    }
}

impl AchromaticThresholds {
    /// Achromatic class of a pixel, if any.
    ///
    /// Black, white and grey are tested in that order and a later match
    /// replaces an earlier one.
    pub fn classify(&self, saturation: f64, value: f64) -> Option<AchromaticClass> {
        let mut class = None;
        if value <= self.black_value {
            class = Some(AchromaticClass::Black);
        }
        if value > self.white_value && saturation <= self.max_saturation {
            class = Some(AchromaticClass::White);
        }
        if value > self.black_value && value <= self.white_value && saturation <= self.max_saturation
        {
            class = Some(AchromaticClass::Grey);
        }
        class
    }
}

/// Overrides hue classes with achromatic labels and returns the updated map.
///
/// Pixels that are not achromatic keep their chromatic label.
pub fn overlay(
    mut class_map: ClassLabelMap,
    saturation: &Channel<f64>,
    value: &Channel<f64>,
    thresholds: &AchromaticThresholds,
) -> Result<ClassLabelMap> {
    class_map.ensure_same_shape(saturation)?;
    class_map.ensure_same_shape(value)?;

    class_map
        .as_mut_slice()
        .par_iter_mut()
        .zip(saturation.as_slice().par_iter())
        .zip(value.as_slice().par_iter())
        .for_each(|((label, &s), &v)| {
            if let Some(class) = thresholds.classify(s, v) {
                *label = class.label();
            }
        });

    Ok(class_map)
}
