//! Load, transform, blend, write.
//!
//! [`try_apply_filter`] reports every failure. [`apply_filter`] and the named
//! `apply_*` wrappers keep the legacy contract: no return value, nothing is
//! written when the source cannot be decoded, and failures are only logged.

use crate::{FilterKind, ImageFilterError, ImageFilterResult, blend::blend_weighted};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Decode `path` as an 8-bit RGB image. Alpha is dropped.
pub fn load_image(path: &Path) -> ImageFilterResult<RgbImage> {
    let decode_err = |source| ImageFilterError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;

    Ok(reader.decode().map_err(decode_err)?.to_rgb8())
}

/// Encode `image` to `path`, format chosen from the extension.
pub fn save_image(image: &RgbImage, path: &Path) -> ImageFilterResult<()> {
    image.save(path).map_err(|source| ImageFilterError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply `kind` to a decoded image, blending with the original by
/// `intensity` for the filters that blend.
pub fn filter_image(kind: FilterKind, original: &RgbImage, intensity: f32) -> RgbImage {
    let filtered = kind.transform(original.clone(), intensity);

    if kind.blends() {
        blend_weighted(original, filtered, intensity)
    } else {
        filtered
    }
}

pub fn try_apply_filter(
    kind: FilterKind,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    intensity: f32,
) -> ImageFilterResult<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    if !intensity.is_finite() {
        return Err(ImageFilterError::InvalidParameter(format!(
            "intensity must be finite, got {intensity}"
        )));
    }

    let original = load_image(input)?;
    log::debug!(
        "{}: {} ({}x{}) intensity={}",
        kind.name(),
        input.display(),
        original.width(),
        original.height(),
        intensity
    );

    let result = filter_image(kind, &original, intensity);
    save_image(&result, output)?;

    log::info!("{} filter written to {}", kind.name(), output.display());
    Ok(())
}

/// Legacy entry point: errors are logged and dropped.
pub fn apply_filter(
    kind: FilterKind,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    intensity: f32,
) {
    if let Err(e) = try_apply_filter(kind, input, output, intensity) {
        log::warn!("{} filter skipped: {e}", kind.name());
    }
}

macro_rules! named_filters {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(input: impl AsRef<Path>, output: impl AsRef<Path>, intensity: f32) {
                apply_filter(FilterKind::$kind, input, output, intensity)
            }
        )*
    };
}

named_filters! {
    /// Filter 1
    apply_sepia => Sepia;
    /// Filter 2
    apply_warm => Warm;
    /// Filter 3
    apply_cool => Cool;
    /// Filter 4
    apply_sketch => Sketch;
    /// Filter 5, no blend
    apply_high_contrast => HighContrast;
    /// Filter 6, no blend
    apply_fade => Fade;
    /// Filter 7
    apply_black_white => BlackWhite;
    /// Filter 8
    apply_vintage => Vintage;
    /// Filter 9, no blend
    apply_blur => Blur;
    /// Filter 10
    apply_edge_detection => EdgeDetection;
    /// Filter 11
    apply_emboss => Emboss;
    /// Filter 12
    apply_negative => Negative;
}
