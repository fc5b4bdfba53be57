use crate::{
    Effect,
    blend::{gray_to_rgb, saturate_u8, to_gray},
    blur_effect::{GaussianBlurConfig, reflect_101},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma, RgbImage};

/// Pencil sketch: grayscale colour-dodged against its blurred negative
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SketchConfig {
    #[derivative(Default(value = "21"))]
    blur_size: u32,
}

impl SketchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sketch_gray(&self, gray: &GrayImage) -> GrayImage {
        let mut inverted = gray.clone();
        for pixel in inverted.pixels_mut() {
            pixel[0] = 255 - pixel[0];
        }

        let blurred = GaussianBlurConfig::new()
            .with_kernel_size(self.blur_size)
            .blur_gray(&inverted);

        GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            let base = gray.get_pixel(x, y)[0];
            let blur = blurred.get_pixel(x, y)[0];
            Luma([color_dodge(base, blur)])
        })
    }
}

/// `base * 256 / (255 - blend)`, zero where the divisor vanishes.
#[inline]
pub fn color_dodge(base: u8, blend: u8) -> u8 {
    let divisor = 255 - blend;
    if divisor == 0 {
        return 0;
    }

    saturate_u8(base as f32 * 256.0 / divisor as f32)
}

impl Effect for SketchConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        gray_to_rgb(&self.sketch_gray(&to_gray(&image)))
    }
}

/// Canny edge detection configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EdgeDetectionConfig {
    #[derivative(Default(value = "50.0"))]
    low_threshold: f32,

    #[derivative(Default(value = "100.0"))]
    high_threshold: f32,
}

impl EdgeDetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Low threshold spans 50..150 and high threshold 100..300 over [0,1].
    pub fn from_intensity(intensity: f32) -> Self {
        Self::new()
            .with_low_threshold(50.0 + 100.0 * intensity)
            .with_high_threshold(100.0 + 200.0 * intensity)
    }

    pub fn thresholds(&self) -> (f32, f32) {
        (self.low_threshold, self.high_threshold)
    }

    /// Thresholds as handed to canny: non-negative and `low <= high`.
    /// Extrapolated intensities below -0.5 would otherwise invert them.
    pub fn canny_thresholds(&self) -> (f32, f32) {
        let low = self.low_threshold.max(0.0);
        let high = self.high_threshold.max(low);
        (low, high)
    }
}

impl Effect for EdgeDetectionConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        let (low, high) = self.canny_thresholds();
        log::debug!("canny: low_threshold={low}, high_threshold={high}");

        let gray = to_gray(&image);
        let edges = imageproc::edges::canny(&gray, low, high);
        gray_to_rgb(&edges)
    }
}

/// Emboss effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EmbossConfig {
    #[derivative(Default(value = "1.0"))]
    strength: f32,
}

impl EmbossConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Off-centre taps scale with `strength`, the centre tap stays 1.
    pub fn kernel(&self) -> [f32; 9] {
        let s = self.strength;
        [
            -2.0 * s, -1.0 * s, 0.0,
            -1.0 * s, 1.0, 1.0 * s,
            0.0, 1.0 * s, 2.0 * s,
        ]
    }
}

impl Effect for EmbossConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        let gray = to_gray(&image);
        gray_to_rgb(&correlate3x3(&gray, &self.kernel()))
    }
}

/// 3x3 correlation (kernel not flipped) with reflect-101 borders.
pub fn correlate3x3(image: &GrayImage, kernel: &[f32; 9]) -> GrayImage {
    let (width, height) = image.dimensions();

    GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0.0f32;

        for ky in -1i64..=1 {
            for kx in -1i64..=1 {
                let px = reflect_101(x as i64 + kx, width);
                let py = reflect_101(y as i64 + ky, height);

                let ki = ((ky + 1) * 3 + (kx + 1)) as usize;
                sum += image.get_pixel(px, py)[0] as f32 * kernel[ki];
            }
        }

        Luma([saturate_u8(sum)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_color_dodge() {
        assert_eq!(color_dodge(100, 255), 0);
        assert_eq!(color_dodge(0, 10), 0);
        assert_eq!(color_dodge(200, 0), 201);
        assert_eq!(color_dodge(200, 100), 255);
    }

    #[test]
    fn test_sketch_of_flat_image() {
        // gray 76 -> inverted 179 -> 76 * 256 / 76 = 256 -> saturated
        let image = RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]));
        let out = SketchConfig::new().apply(image);
        assert!(out.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_edge_thresholds_monotonic() {
        let mut previous = EdgeDetectionConfig::from_intensity(0.0).thresholds();
        assert_eq!(previous, (50.0, 100.0));
        assert_eq!(EdgeDetectionConfig::from_intensity(1.0).thresholds(), (150.0, 300.0));

        for step in 1..=20 {
            let (low, high) = EdgeDetectionConfig::from_intensity(step as f32 / 20.0).thresholds();
            assert!(low < high);
            assert!(low > previous.0 && high > previous.1);
            previous = (low, high);
        }
    }

    #[test]
    fn test_canny_thresholds_stay_ordered_when_extrapolated() {
        // -1.0 computes low -50, high -100
        assert_eq!(EdgeDetectionConfig::from_intensity(-1.0).canny_thresholds(), (0.0, 0.0));
        assert_eq!(EdgeDetectionConfig::from_intensity(-0.75).canny_thresholds(), (0.0, 0.0));
        assert_eq!(EdgeDetectionConfig::from_intensity(2.0).canny_thresholds(), (250.0, 500.0));
        assert_eq!(EdgeDetectionConfig::from_intensity(0.5).canny_thresholds(), (100.0, 200.0));

        for step in -40..=60 {
            let (low, high) = EdgeDetectionConfig::from_intensity(step as f32 / 20.0).canny_thresholds();
            assert!(low >= 0.0 && low <= high, "intensity {}", step as f32 / 20.0);
        }
    }

    #[test]
    fn test_edge_detection_negative_intensity() {
        let image = RgbImage::from_fn(8, 8, |x, _| if x < 4 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        for intensity in [-1.0, -0.75, 2.0] {
            let out = EdgeDetectionConfig::from_intensity(intensity).apply(image.clone());
            assert_eq!(out.dimensions(), (8, 8));
        }
    }

    #[test]
    fn test_edge_detection_flat_image_has_no_edges() {
        let image = RgbImage::from_pixel(8, 8, Rgb([120, 120, 120]));
        let out = EdgeDetectionConfig::from_intensity(0.5).apply(image);
        assert!(out.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_emboss_kernel_shape() {
        for strength in [0.0, 0.25, 0.5, 1.0] {
            let kernel = EmbossConfig::new().with_strength(strength).kernel();
            assert_eq!(kernel[4], 1.0);
            assert_eq!(kernel[0], -2.0 * strength);
            assert_eq!(kernel[1], -strength);
            assert_eq!(kernel[3], -strength);
            assert_eq!(kernel[5], strength);
            assert_eq!(kernel[7], strength);
            assert_eq!(kernel[8], 2.0 * strength);
            assert_eq!(kernel[2], 0.0);
            assert_eq!(kernel[6], 0.0);
        }
    }

    #[test]
    fn test_emboss_flat_image_keeps_gray() {
        // Off-centre taps cancel on a flat image, leaving the centre tap.
        let image = RgbImage::from_pixel(5, 5, Rgb([90, 90, 90]));
        let out = EmbossConfig::new().with_strength(0.7).apply(image);
        assert!(out.pixels().all(|p| *p == Rgb([90, 90, 90])));
    }

    #[test]
    fn test_correlate_identity_kernel() {
        let image = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 40 + y * 10) as u8]));
        let identity = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(correlate3x3(&image, &identity), image);
    }
}
