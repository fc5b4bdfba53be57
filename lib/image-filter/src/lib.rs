pub mod blend;
pub mod blur_effect;
pub mod color_effect;
pub mod ffi;
pub mod filter_kind;
pub mod pipeline;
pub mod stylized_effect;

use image::RgbImage;
use std::path::PathBuf;

pub use filter_kind::FilterKind;
pub use pipeline::{
    apply_black_white, apply_blur, apply_cool, apply_edge_detection, apply_emboss, apply_fade,
    apply_filter, apply_high_contrast, apply_negative, apply_sepia, apply_sketch, apply_vintage,
    apply_warm, filter_image, try_apply_filter,
};

pub type ImageFilterResult<T> = Result<T, ImageFilterError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageFilterError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unknown filter id: {0}")]
    UnknownFilter(u8),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A per-pixel or per-kernel transform over a decoded RGB image.
///
/// Implementations never change the image dimensions.
pub trait Effect {
    fn apply(&self, image: RgbImage) -> RgbImage;
}
