//! Hue/saturation/value decomposition of RGB buffers.

use crate::channel::Channel;
use crate::error::Result;
use image::{Rgb32FImage, RgbImage};
use palette::{encoding, FromColor, Hsv, Srgb};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How finely the hue channel is resolved before classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HuePrecision {
    /// 8-bit HSV storage: hue kept in 2-degree steps (0..=180 doubled),
    /// saturation and value in 1/255 steps.
    Byte,
    /// Continuous hue in `[0, 360)`, saturation and value in `[0, 1]`.
    Float,
}

/// The three channels a classifier and the achromatic overlay consume.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvChannels {
    pub hue: Channel<f64>,
    pub saturation: Channel<f64>,
    pub value: Channel<f64>,
}

impl HsvChannels {
    /// Bundles pre-computed channels, which must all share one shape.
    pub fn new(hue: Channel<f64>, saturation: Channel<f64>, value: Channel<f64>) -> Result<Self> {
        hue.ensure_same_shape(&saturation)?;
        hue.ensure_same_shape(&value)?;
        Ok(Self {
            hue,
            saturation,
            value,
        })
    }

    pub fn from_rgb8(image: &RgbImage, precision: HuePrecision) -> Result<Self> {
        let pixels: Vec<[f64; 3]> = image
            .as_raw()
            .par_chunks_exact(3)
            .map(|p| {
                decompose(
                    [
                        p[0] as f64 / 255.0,
                        p[1] as f64 / 255.0,
                        p[2] as f64 / 255.0,
                    ],
                    precision,
                )
            })
            .collect();
        Self::from_pixels(image.width(), image.height(), pixels)
    }

    /// Decomposes a normalised float image (channel values in `[0, 1]`).
    pub fn from_rgb32f(image: &Rgb32FImage, precision: HuePrecision) -> Result<Self> {
        let pixels: Vec<[f64; 3]> = image
            .as_raw()
            .par_chunks_exact(3)
            .map(|p| decompose([p[0] as f64, p[1] as f64, p[2] as f64], precision))
            .collect();
        Self::from_pixels(image.width(), image.height(), pixels)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.hue.dimensions()
    }

    fn from_pixels(width: u32, height: u32, pixels: Vec<[f64; 3]>) -> Result<Self> {
        let mut hue = Vec::with_capacity(pixels.len());
        let mut saturation = Vec::with_capacity(pixels.len());
        let mut value = Vec::with_capacity(pixels.len());
        for [h, s, v] in pixels {
            hue.push(h);
            saturation.push(s);
            value.push(v);
        }
        Self::new(
            Channel::new(width, height, hue)?,
            Channel::new(width, height, saturation)?,
            Channel::new(width, height, value)?,
        )
    }
}

/// Converts one normalised RGB triple into `[hue, saturation, value]`.
pub fn decompose(rgb: [f64; 3], precision: HuePrecision) -> [f64; 3] {
    let hsv: Hsv<encoding::Srgb, f64> = Hsv::from_color(Srgb::new(rgb[0], rgb[1], rgb[2]));
    let hue = hsv.hue.into_positive_degrees();
    let saturation = hsv.saturation.clamp(0.0, 1.0);
    let value = hsv.value.clamp(0.0, 1.0);

    match precision {
        HuePrecision::Float => [hue, saturation, value],
        // Hue halves into a byte and may round up to 180, i.e. 360 degrees.
        HuePrecision::Byte => [
            (hue / 2.0).round() * 2.0,
            (saturation * 255.0).round() / 255.0,
            (value * 255.0).round() / 255.0,
        ],
    }
}
