use crate::{
    Effect,
    blend::{gray_to_rgb, overlay_color, saturate_u8, to_gray},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, RgbImage};

/// 3x3 linear colour transform. Rows are output channels, columns are
/// input channels, both in R, G, B order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f32; 3]; 3]);

impl ColorMatrix {
    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    pub const VINTAGE: ColorMatrix = ColorMatrix([
        [0.272, 0.534, 0.131],
        [0.349, 0.686, 0.168],
        [0.393, 0.769, 0.189],
    ]);

    pub fn diagonal(r: f32, g: f32, b: f32) -> Self {
        ColorMatrix([[r, 0.0, 0.0], [0.0, g, 0.0], [0.0, 0.0, b]])
    }

    pub fn uniform(scale: f32) -> Self {
        Self::diagonal(scale, scale, scale)
    }

    pub fn transform(&self, mut image: RgbImage) -> RgbImage {
        let m = &self.0;
        for pixel in image.pixels_mut() {
            let r = pixel[0] as f32;
            let g = pixel[1] as f32;
            let b = pixel[2] as f32;

            pixel[0] = saturate_u8(m[0][0] * r + m[0][1] * g + m[0][2] * b);
            pixel[1] = saturate_u8(m[1][0] * r + m[1][1] * g + m[1][2] * b);
            pixel[2] = saturate_u8(m[2][0] * r + m[2][1] * g + m[2][2] * b);
        }

        image
    }
}

/// Sepia tone, standard coefficients
#[derive(Debug, Clone, Default)]
pub struct SepiaConfig;

impl Effect for SepiaConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        ColorMatrix::SEPIA.transform(image)
    }
}

/// Color temperature configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct TemperatureConfig {
    #[derivative(Default(value = "0.05"))]
    amount: f32,
}

impl TemperatureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warm_matrix(&self) -> ColorMatrix {
        ColorMatrix::diagonal(1.0 + self.amount, 1.0, 1.0 - self.amount)
    }

    pub fn cool_matrix(&self) -> ColorMatrix {
        ColorMatrix::diagonal(1.0 - self.amount, 1.0, 1.0 + self.amount)
    }

    pub fn apply_warm(&self, image: RgbImage) -> RgbImage {
        // Increase red, decrease blue
        self.warm_matrix().transform(image)
    }

    pub fn apply_cool(&self, image: RgbImage) -> RgbImage {
        // Increase blue, decrease red
        self.cool_matrix().transform(image)
    }
}

/// Contrast configuration: every channel is scaled by `1 + 0.5 * intensity`
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "1.0"))]
    scale: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_intensity(intensity: f32) -> Self {
        Self::new().with_scale(1.0 + 0.5 * intensity)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Effect for ContrastConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        ColorMatrix::uniform(self.scale).transform(image)
    }
}

/// Fade configuration: every channel is scaled by `1 - 0.3 * intensity`
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct FadeConfig {
    #[derivative(Default(value = "1.0"))]
    scale: f32,
}

impl FadeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_intensity(intensity: f32) -> Self {
        Self::new().with_scale(1.0 - 0.3 * intensity)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Effect for FadeConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        ColorMatrix::uniform(self.scale).transform(image)
    }
}

/// Full desaturation, replicated back to three channels
#[derive(Debug, Clone, Default)]
pub struct GrayscaleConfig;

impl Effect for GrayscaleConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        gray_to_rgb(&to_gray(&image))
    }
}

/// Vintage: reversed sepia matrix plus a dark overlay whose opacity
/// follows the intensity.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VintageConfig {
    #[derivative(Default(value = "0.0"))]
    intensity: f32,
}

impl VintageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay_color(&self) -> Rgb<u8> {
        let i = self.intensity;
        Rgb([saturate_u8(10.0 * i), saturate_u8(15.0 * i), saturate_u8(20.0 * i)])
    }

    pub fn overlay_opacity(&self) -> f32 {
        0.15 * self.intensity
    }
}

impl Effect for VintageConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        let toned = ColorMatrix::VINTAGE.transform(image);
        overlay_color(toned, self.overlay_color(), self.overlay_opacity())
    }
}

/// Invert the colors of an image
#[derive(Debug, Clone, Default)]
pub struct Invert;

impl Effect for Invert {
    fn apply(&self, mut image: RgbImage) -> RgbImage {
        for pixel in image.pixels_mut() {
            pixel[0] = 255 - pixel[0];
            pixel[1] = 255 - pixel[1];
            pixel[2] = 255 - pixel[2];
        }

        image
    }
}
