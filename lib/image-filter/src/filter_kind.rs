use crate::{
    Effect,
    blur_effect::GaussianBlurConfig,
    color_effect::{
        ContrastConfig, FadeConfig, GrayscaleConfig, Invert, SepiaConfig, TemperatureConfig,
        VintageConfig,
    },
    stylized_effect::{EdgeDetectionConfig, EmbossConfig, SketchConfig},
};
use image::RgbImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The twelve filters. Discriminants are the public filter ids used by the
/// `apply_filter<N>` C symbols and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FilterKind {
    Sepia = 1,
    Warm = 2,
    Cool = 3,
    Sketch = 4,
    HighContrast = 5,
    Fade = 6,
    BlackWhite = 7,
    Vintage = 8,
    Blur = 9,
    EdgeDetection = 10,
    Emboss = 11,
    Negative = 12,
}

impl FilterKind {
    pub fn id(self) -> u8 {
        self.into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Sepia => "Sepia",
            FilterKind::Warm => "Warm",
            FilterKind::Cool => "Cool",
            FilterKind::Sketch => "Sketch",
            FilterKind::HighContrast => "High Contrast",
            FilterKind::Fade => "Fade",
            FilterKind::BlackWhite => "Black & White",
            FilterKind::Vintage => "Vintage",
            FilterKind::Blur => "Blur",
            FilterKind::EdgeDetection => "Edge Detection",
            FilterKind::Emboss => "Emboss",
            FilterKind::Negative => "Negative",
        }
    }

    /// Whether the filtered image is blended with the original by intensity.
    /// High contrast, fade and blur use intensity as transform strength only.
    pub fn blends(&self) -> bool {
        !matches!(
            self,
            FilterKind::HighContrast | FilterKind::Fade | FilterKind::Blur
        )
    }

    /// Run the unblended transform with its intensity-derived parameters.
    pub fn transform(&self, image: RgbImage, intensity: f32) -> RgbImage {
        match self {
            FilterKind::Sepia => SepiaConfig.apply(image),
            FilterKind::Warm => TemperatureConfig::new().apply_warm(image),
            FilterKind::Cool => TemperatureConfig::new().apply_cool(image),
            FilterKind::Sketch => SketchConfig::new().apply(image),
            FilterKind::HighContrast => ContrastConfig::from_intensity(intensity).apply(image),
            FilterKind::Fade => FadeConfig::from_intensity(intensity).apply(image),
            FilterKind::BlackWhite => GrayscaleConfig.apply(image),
            FilterKind::Vintage => VintageConfig::new().with_intensity(intensity).apply(image),
            FilterKind::Blur => GaussianBlurConfig::from_intensity(intensity).apply(image),
            FilterKind::EdgeDetection => EdgeDetectionConfig::from_intensity(intensity).apply(image),
            FilterKind::Emboss => EmbossConfig::new().with_strength(intensity).apply(image),
            FilterKind::Negative => Invert.apply(image),
        }
    }

    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::Sepia,
            FilterKind::Warm,
            FilterKind::Cool,
            FilterKind::Sketch,
            FilterKind::HighContrast,
            FilterKind::Fade,
            FilterKind::BlackWhite,
            FilterKind::Vintage,
            FilterKind::Blur,
            FilterKind::EdgeDetection,
            FilterKind::Emboss,
            FilterKind::Negative,
        ]
    }
}
