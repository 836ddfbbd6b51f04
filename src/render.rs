use crate::achromatic::AchromaticClass;
use crate::channel::ClassLabelMap;
use crate::error::{Result, SegmentationError};
use crate::models::ColourModel;
use image::RgbImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Representative colour per class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPalette {
    colours: BTreeMap<i32, [u8; 3]>,
}

impl ClassPalette {
    /// Default palette of `model`, including the achromatic colours.
    pub fn for_model(model: ColourModel) -> Self {
        Self::with_achromatic(model.default_palette())
    }

    /// Caller-supplied chromatic colours for `model`, indexed by label.
    ///
    /// The number of colours must equal the model's class count.
    pub fn custom(model: ColourModel, colours: &[[u8; 3]]) -> Result<Self> {
        let needed = model.class_count();
        if colours.len() != needed {
            return Err(SegmentationError::PaletteSize {
                model,
                needed,
                provided: colours.len(),
            });
        }
        Ok(Self::with_achromatic(colours))
    }

    /// Arbitrary label -> colour entries, no completeness checks.
    pub fn from_entries(entries: impl IntoIterator<Item = (i32, [u8; 3])>) -> Self {
        Self {
            colours: entries.into_iter().collect(),
        }
    }

    fn with_achromatic(chromatic: &[[u8; 3]]) -> Self {
        let colours = chromatic
            .iter()
            .enumerate()
            .map(|(label, rgb)| (label as i32, *rgb))
            .chain(
                AchromaticClass::ALL
                    .into_iter()
                    .map(|class| (class.label(), class.colour())),
            )
            .collect();
        Self { colours }
    }

    pub fn colour(&self, label: i32) -> Option<[u8; 3]> {
        self.colours.get(&label).copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Number of chromatic (non-negative) labels.
    pub fn chromatic_len(&self) -> usize {
        self.colours.keys().filter(|&&label| label >= 0).count()
    }
}

/// Paints each pixel with its class colour.
///
/// Labels missing from `palette` stay black (the zeroed background).
pub fn render(class_map: &ClassLabelMap, palette: &ClassPalette) -> RgbImage {
    let mut image = RgbImage::new(class_map.width(), class_map.height());
    image
        .par_chunks_exact_mut(3)
        .zip(class_map.as_slice().par_iter())
        .for_each(|(pixel, &label)| {
            if let Some(rgb) = palette.colour(label) {
                pixel.copy_from_slice(&rgb);
            }
        });
    image
}

/// Fraction of pixels carrying `label`; 0.0 for an empty map.
pub fn colour_proportion(class_map: &ClassLabelMap, label: i32) -> f64 {
    if class_map.is_empty() {
        return 0.0;
    }
    let count = class_map
        .as_slice()
        .par_iter()
        .filter(|&&l| l == label)
        .count();
    count as f64 / class_map.len() as f64
}

/// Pixel statistics of one class present in a segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStatistic {
    pub label: i32,
    pub name: String,
    pub rgb: Option<[u8; 3]>,
    pub hex: Option<String>,
    pub pixel_count: usize,
    pub proportion: f64,
}

/// Per-class pixel counts, largest first (ties by label).
pub fn class_statistics(
    class_map: &ClassLabelMap,
    model: ColourModel,
    palette: &ClassPalette,
) -> Vec<ClassStatistic> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &label in class_map.as_slice() {
        *counts.entry(label).or_insert(0) += 1;
    }

    let total = class_map.len();
    let mut stats: Vec<ClassStatistic> = counts
        .into_iter()
        .map(|(label, pixel_count)| {
            let rgb = palette.colour(label);
            ClassStatistic {
                label,
                name: label_name(model, label),
                rgb,
                hex: rgb.map(rgb_to_hex),
                pixel_count,
                proportion: pixel_count as f64 / total as f64,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.pixel_count
            .cmp(&a.pixel_count)
            .then_with(|| a.label.cmp(&b.label))
    });
    stats
}

/// Human-readable name of a chromatic or achromatic label.
pub fn label_name(model: ColourModel, label: i32) -> String {
    if let Some(class) = AchromaticClass::from_label(label) {
        return class.name().to_string();
    }
    usize::try_from(label)
        .ok()
        .and_then(|index| model.class_name(index))
        .map(str::to_string)
        .unwrap_or_else(|| format!("label {}", label))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achromatic::GREY_LABEL;
    use crate::channel::Channel;

    #[test]
    fn test_hex_conversion() {
        assert_eq!(rgb_to_hex([255, 33, 36]), "#FF2124");
        assert_eq!(rgb_to_hex([0, 0, 0]), "#000000");
    }

    #[test]
    fn test_palette_size_checked() {
        let err = ClassPalette::custom(ColourModel::Amante, &[[0, 0, 0]; 5]).unwrap_err();
        assert!(matches!(
            err,
            SegmentationError::PaletteSize {
                model: ColourModel::Amante,
                needed: 9,
                provided: 5
            }
        ));
        assert!(err.to_string().contains("9 labels"));
        let palette = ClassPalette::custom(ColourModel::LiuWang, &[[1, 2, 3]; 7]).unwrap();
        assert_eq!(palette.chromatic_len(), 7);
        assert_eq!(palette.len(), 10);
    }

    #[test]
    fn test_render_uses_palette_and_background() {
        let class_map = Channel::new(3, 1, vec![0, GREY_LABEL, 42]).unwrap();
        let image = render(&class_map, &ClassPalette::for_model(ColourModel::Shamir));
        assert_eq!(image.get_pixel(0, 0).0, [255, 33, 36]);
        assert_eq!(image.get_pixel(1, 0).0, [128, 128, 128]);
        // 42 has no colour: left at the zeroed background.
        assert_eq!(image.get_pixel(2, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_incomplete_palette_renders_background() {
        let class_map = Channel::new(2, 1, vec![0, 1]).unwrap();
        let palette = ClassPalette::from_entries([(1, [9, 9, 9])]);
        let image = render(&class_map, &palette);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [9, 9, 9]);
    }

    #[test]
    fn test_colour_proportion_quarter() {
        let class_map = Channel::new(2, 2, vec![0, 3, 3, GREY_LABEL]).unwrap();
        assert_eq!(colour_proportion(&class_map, 0), 0.25);
        assert_eq!(colour_proportion(&class_map, 3), 0.5);
        assert_eq!(colour_proportion(&class_map, 7), 0.0);
        assert_eq!(colour_proportion(&Channel::new(0, 0, vec![]).unwrap(), 0), 0.0);
    }

    #[test]
    fn test_class_statistics_sorted() {
        let class_map = Channel::new(2, 2, vec![4, 0, 4, GREY_LABEL]).unwrap();
        let palette = ClassPalette::for_model(ColourModel::Amante);
        let stats = class_statistics(&class_map, ColourModel::Amante, &palette);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].name, "green");
        assert_eq!(stats[0].pixel_count, 2);
        assert_eq!(stats[0].proportion, 0.5);
        assert_eq!(stats[0].hex.as_deref(), Some("#00FF00"));
        // Single-pixel classes ordered by label.
        assert_eq!(stats[1].name, "grey");
        assert_eq!(stats[2].name, "red");
    }

    #[test]
    fn test_label_names() {
        assert_eq!(label_name(ColourModel::Chamorro, 3), "yellow-green");
        assert_eq!(label_name(ColourModel::Chamorro, -2), "white");
        assert_eq!(label_name(ColourModel::Chamorro, 12), "label 12");
    }
}
