//! Whole-image segmentation: correction, decomposition, classification,
//! achromatic overlay and rendering for one colour model.

use crate::achromatic::{overlay, AchromaticThresholds};
use crate::channel::ClassLabelMap;
use crate::classifier::classify;
use crate::correction::correct;
use crate::error::{Result, SegmentationError};
use crate::hsv::HsvChannels;
use crate::models::ColourModel;
use crate::render::{class_statistics, colour_proportion, render, ClassPalette, ClassStatistic};
use image::{DynamicImage, Rgb32FImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Per-call switches of the segmentation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentOptions {
    /// Override low-saturation and extreme-value pixels with black/white/grey.
    pub remove_achromatic_colours: bool,
    /// Gray-world balance before hue extraction; only models that support it
    /// (Liu-Wang) act on this flag.
    pub apply_colour_correction: bool,
    pub achromatic: AchromaticThresholds,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            remove_achromatic_colours: true,
            apply_colour_correction: true,
            achromatic: AchromaticThresholds::default(),
        }
    }
}

impl SegmentOptions {
    /// Hue classes only: no overlay, no correction.
    pub fn chromatic_only() -> Self {
        Self {
            remove_achromatic_colours: false,
            apply_colour_correction: false,
            ..Self::default()
        }
    }
}

/// Output of one segmentation call.
#[derive(Debug, Clone)]
pub struct SegmentationResult {
    pub model: ColourModel,
    pub segmented_image: RgbImage,
    pub classes: ClassLabelMap,
    pub palette: ClassPalette,
    /// Wall-clock seconds spent in the whole call.
    pub elapsed_time: f64,
}

impl SegmentationResult {
    pub fn colour_proportion(&self, label: i32) -> f64 {
        colour_proportion(&self.classes, label)
    }

    /// Proportion of label 0, the red class in every model.
    pub fn red_proportion(&self) -> f64 {
        self.colour_proportion(0)
    }

    pub fn class_statistics(&self) -> Vec<ClassStatistic> {
        class_statistics(&self.classes, self.model, &self.palette)
    }

    pub fn summary(&self) -> SegmentationSummary {
        SegmentationSummary {
            model: self.model,
            width: self.classes.width(),
            height: self.classes.height(),
            elapsed_ms: (self.elapsed_time * 1000.0).round() as u64,
            classes: self.class_statistics(),
        }
    }
}

/// Serialisable digest of a segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationSummary {
    pub model: ColourModel,
    pub width: u32,
    pub height: u32,
    pub elapsed_ms: u64,
    pub classes: Vec<ClassStatistic>,
}

impl SegmentationSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Segments one RGB image with any of the colour models.
pub struct Segmentator {
    image: RgbImage,
}

impl Segmentator {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Segments with the model's default palette.
    pub fn segment(
        &self,
        model: ColourModel,
        options: &SegmentOptions,
    ) -> Result<SegmentationResult> {
        self.segment_with_palette(model, ClassPalette::for_model(model), options)
    }

    /// Segments with caller-chosen class colours.
    pub fn segment_with_palette(
        &self,
        model: ColourModel,
        palette: ClassPalette,
        options: &SegmentOptions,
    ) -> Result<SegmentationResult> {
        let start_time = Instant::now();
        check_palette(model, &palette)?;
        if self.image.width() == 0 || self.image.height() == 0 {
            return Err(SegmentationError::EmptyImage);
        }

        let descriptor = model.descriptor();
        log::info!(
            "Segmenting {}x{} image with the {} model ({} {:?} classes)",
            self.image.width(),
            self.image.height(),
            model,
            descriptor.classes.len(),
            descriptor.shape
        );

        let hsv = if options.apply_colour_correction && descriptor.supports_colour_correction {
            let float_image: Rgb32FImage =
                DynamicImage::ImageRgb8(self.image.clone()).into_rgb32f();
            HsvChannels::from_rgb32f(&correct(&float_image), descriptor.hue_precision)?
        } else {
            if options.apply_colour_correction {
                log::debug!("{} model has no colour correction step; skipping", model);
            }
            HsvChannels::from_rgb8(&self.image, descriptor.hue_precision)?
        };

        let mut result = run(&hsv, model, palette, options)?;
        result.elapsed_time = start_time.elapsed().as_secs_f64();

        log::info!(
            "Segmentation finished: {} model, red proportion {:.4}, {:.3}s",
            model,
            result.red_proportion(),
            result.elapsed_time
        );
        Ok(result)
    }
}

/// Segments channels that were decomposed elsewhere.
///
/// Colour correction needs RGB input and is not applied here.
pub fn segment_hsv(
    hsv: &HsvChannels,
    model: ColourModel,
    palette: ClassPalette,
    options: &SegmentOptions,
) -> Result<SegmentationResult> {
    let start_time = Instant::now();
    check_palette(model, &palette)?;
    if hsv.hue.is_empty() {
        return Err(SegmentationError::EmptyImage);
    }
    let mut result = run(hsv, model, palette, options)?;
    result.elapsed_time = start_time.elapsed().as_secs_f64();
    Ok(result)
}

fn check_palette(model: ColourModel, palette: &ClassPalette) -> Result<()> {
    let needed = model.class_count();
    let provided = palette.chromatic_len();
    if provided != needed {
        return Err(SegmentationError::PaletteSize {
            model,
            needed,
            provided,
        });
    }
    Ok(())
}

fn run(
    hsv: &HsvChannels,
    model: ColourModel,
    palette: ClassPalette,
    options: &SegmentOptions,
) -> Result<SegmentationResult> {
    let mut classes = classify(&hsv.hue, model)?;
    if options.remove_achromatic_colours {
        classes = overlay(classes, &hsv.saturation, &hsv.value, &options.achromatic)?;
    }
    let segmented_image = render(&classes, &palette);

    Ok(SegmentationResult {
        model,
        segmented_image,
        classes,
        palette,
        elapsed_time: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achromatic::{BLACK_LABEL, GREY_LABEL, WHITE_LABEL};
    use crate::channel::Channel;
    use image::Rgb;

    fn primaries_with_grey() -> RgbImage {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 1, Rgb([128, 128, 128]));
        image
    }

    #[test]
    fn test_amante_end_to_end() {
        let segmentator = Segmentator::new(primaries_with_grey());
        let result = segmentator
            .segment(ColourModel::Amante, &SegmentOptions::default())
            .unwrap();

        let model = ColourModel::Amante;
        let red = model.class_index("red").unwrap() as i32;
        let green = model.class_index("green").unwrap() as i32;
        let blue = model.class_index("blue").unwrap() as i32;
        assert_eq!(result.classes.as_slice(), &[red, green, blue, GREY_LABEL]);

        let image = &result.segmented_image;
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0).0, [255, 33, 36]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [128, 128, 128]);

        assert_eq!(result.red_proportion(), 0.25);
        assert!(result.elapsed_time >= 0.0);
    }

    #[test]
    fn test_without_achromatic_removal_grey_gets_a_hue_class() {
        let segmentator = Segmentator::new(primaries_with_grey());
        let result = segmentator
            .segment(ColourModel::Amante, &SegmentOptions::chromatic_only())
            .unwrap();
        // Grey has hue 0, which no Amante class supports; the first class wins.
        assert_eq!(result.classes.as_slice()[3], 0);
        assert!(result.classes.as_slice().iter().all(|&l| l >= 0));
    }

    #[test]
    fn test_every_model_runs() {
        let segmentator = Segmentator::new(primaries_with_grey());
        for model in ColourModel::ALL {
            let result = segmentator.segment(model, &SegmentOptions::default()).unwrap();
            assert_eq!(result.classes.dimensions(), (2, 2));
            assert_eq!(result.classes.as_slice()[0], 0, "{}", model);
            assert_eq!(result.classes.as_slice()[3], GREY_LABEL, "{}", model);
        }
    }

    #[test]
    fn test_liu_wang_correction_rebalances_cast() {
        // A bluish cast over neutral patches; after gray-world balance the
        // patches become grey.
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([100, 100, 130]));
        image.put_pixel(1, 0, Rgb([50, 50, 65]));
        let segmentator = Segmentator::new(image);

        let corrected = segmentator
            .segment(ColourModel::LiuWang, &SegmentOptions::default())
            .unwrap();
        assert_eq!(corrected.classes.as_slice(), &[GREY_LABEL, GREY_LABEL]);

        let options = SegmentOptions {
            apply_colour_correction: false,
            ..SegmentOptions::default()
        };
        let raw = segmentator.segment(ColourModel::LiuWang, &options).unwrap();
        let blue = ColourModel::LiuWang.class_index("blue").unwrap() as i32;
        assert_eq!(raw.classes.as_slice(), &[blue, blue]);
    }

    #[test]
    fn test_palette_size_mismatch_fails_first() {
        let segmentator = Segmentator::new(RgbImage::new(0, 0));
        let palette = ClassPalette::for_model(ColourModel::Shamir);
        let err = segmentator
            .segment_with_palette(ColourModel::Amante, palette, &SegmentOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SegmentationError::PaletteSize {
                needed: 9,
                provided: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_image() {
        let segmentator = Segmentator::new(RgbImage::new(0, 3));
        assert!(matches!(
            segmentator.segment(ColourModel::Shamir, &SegmentOptions::default()),
            Err(SegmentationError::EmptyImage)
        ));
    }

    #[test]
    fn test_segment_hsv_channels() {
        let hsv = HsvChannels::new(
            Channel::new(4, 1, vec![0.0, 120.0, 240.0, 0.0]).unwrap(),
            Channel::new(4, 1, vec![1.0, 1.0, 0.05, 0.0]).unwrap(),
            Channel::new(4, 1, vec![1.0, 0.1, 0.9, 0.5]).unwrap(),
        )
        .unwrap();
        let result = segment_hsv(
            &hsv,
            ColourModel::Shamir,
            ClassPalette::for_model(ColourModel::Shamir),
            &SegmentOptions::default(),
        )
        .unwrap();
        assert_eq!(
            result.classes.as_slice(),
            &[0, BLACK_LABEL, WHITE_LABEL, GREY_LABEL]
        );
    }

    #[test]
    fn test_summary_json() {
        let segmentator = Segmentator::new(primaries_with_grey());
        let result = segmentator
            .segment(ColourModel::Chamorro, &SegmentOptions::default())
            .unwrap();
        let summary = result.summary();
        assert_eq!(summary.classes.len(), 4);
        assert!(summary.classes.iter().all(|c| c.proportion == 0.25));

        let json = summary.to_json().unwrap();
        let parsed: SegmentationSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
        assert!(json.contains("\"model\":\"chamorro\""));
    }

    #[test]
    fn test_options_from_json_defaults() {
        let options: SegmentOptions =
            serde_json::from_str(r#"{"removeAchromaticColours": false}"#).unwrap();
        assert!(!options.remove_achromatic_colours);
        assert!(options.apply_colour_correction);
        assert_eq!(options.achromatic, AchromaticThresholds::default());
    }
}
