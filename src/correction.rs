//! Gray-world colour balance applied before hue extraction.

use image::Rgb32FImage;
use rayon::prelude::*;

/// Mean of each RGB channel over the whole image.
pub fn channel_means(image: &Rgb32FImage) -> [f64; 3] {
    let pixel_count = (image.width() as usize * image.height() as usize) as f64;
    if pixel_count == 0.0 {
        return [0.0; 3];
    }

    let sums = image
        .as_raw()
        .par_chunks_exact(3)
        .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64])
        .reduce(
            || [0.0; 3],
            |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2]],
        );

    [
        sums[0] / pixel_count,
        sums[1] / pixel_count,
        sums[2] / pixel_count,
    ]
}

/// Per-channel scale factors that pull every channel mean to the grand mean.
///
/// A channel with zero mean keeps a factor of 1.
pub fn gray_world_gains(means: [f64; 3]) -> [f64; 3] {
    let grand_mean = (means[0] + means[1] + means[2]) / 3.0;
    means.map(|mean| if mean > 0.0 { grand_mean / mean } else { 1.0 })
}

/// Rebalances `image` so its three channel means match.
///
/// Scaled values above 1.0 are clipped to 1.0; the gains are never negative
/// so nothing drops below 0.
pub fn correct(image: &Rgb32FImage) -> Rgb32FImage {
    let means = channel_means(image);
    let gains = gray_world_gains(means);
    log::debug!(
        "Gray-world correction: means ({:.4}, {:.4}, {:.4}), gains ({:.4}, {:.4}, {:.4})",
        means[0],
        means[1],
        means[2],
        gains[0],
        gains[1],
        gains[2]
    );

    let mut corrected = image.clone();
    corrected.par_chunks_exact_mut(3).for_each(|p| {
        for (value, gain) in p.iter_mut().zip(gains) {
            *value = ((*value as f64) * gain).min(1.0) as f32;
        }
    });
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample_image() -> Rgb32FImage {
        // Channel means 0.2 / 0.4 / 0.6: gains 2, 1, 2/3 keep everything <= 1.
        let mut image = Rgb32FImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([0.1, 0.2, 0.9]));
        image.put_pixel(1, 0, Rgb([0.3, 0.6, 0.3]));
        image.put_pixel(0, 1, Rgb([0.2, 0.4, 0.6]));
        image.put_pixel(1, 1, Rgb([0.2, 0.4, 0.6]));
        image
    }

    #[test]
    fn test_means_are_equalised() {
        let corrected = correct(&sample_image());
        let means = channel_means(&corrected);
        assert!((means[0] - means[1]).abs() < 1e-6);
        assert!((means[1] - means[2]).abs() < 1e-6);
        assert!((means[0] - 0.4).abs() < 1e-6);
        assert!(corrected.as_raw().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_overflow_is_clipped() {
        let mut image = Rgb32FImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0.9, 0.9, 0.9]));
        image.put_pixel(1, 0, Rgb([0.1, 0.9, 0.9]));
        let corrected = correct(&image);
        assert!(corrected.as_raw().iter().all(|&v| v <= 1.0));
        // Red mean 0.5 against a grand mean of 0.7667 pushes 0.9 past 1.0.
        assert_eq!(corrected.get_pixel(0, 0)[0], 1.0);
    }

    #[test]
    fn test_zero_channel_is_left_alone() {
        let mut image = Rgb32FImage::new(1, 2);
        image.put_pixel(0, 0, Rgb([0.0, 0.2, 0.4]));
        image.put_pixel(0, 1, Rgb([0.0, 0.4, 0.2]));
        let corrected = correct(&image);
        assert!(corrected.as_raw().iter().all(|v| v.is_finite()));
        assert_eq!(corrected.get_pixel(0, 0)[0], 0.0);
        let gains = gray_world_gains([0.0, 0.3, 0.3]);
        assert_eq!(gains[0], 1.0);
        assert!((gains[1] - 2.0 / 3.0).abs() < 1e-12);
    }
}
