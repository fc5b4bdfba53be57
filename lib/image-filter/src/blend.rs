use image::{GrayImage, Luma, Rgb, RgbImage};

/// Round to nearest and saturate into the 8-bit range.
#[inline]
pub fn saturate_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Blend `filtered` with `original` per channel:
/// `original * (1 - weight) + filtered * weight`.
///
/// `weight == 0` reproduces `original` and `weight == 1` reproduces
/// `filtered` exactly. Weights outside [0,1] extrapolate and saturate.
pub fn blend_weighted(original: &RgbImage, mut filtered: RgbImage, weight: f32) -> RgbImage {
    debug_assert_eq!(original.dimensions(), filtered.dimensions());

    let keep = 1.0 - weight;
    for (dst, src) in filtered.iter_mut().zip(original.iter()) {
        *dst = saturate_u8(*src as f32 * keep + *dst as f32 * weight);
    }

    filtered
}

/// Composite a uniform colour over the whole image at `opacity`.
pub fn overlay_color(mut image: RgbImage, color: Rgb<u8>, opacity: f32) -> RgbImage {
    let keep = 1.0 - opacity;
    for pixel in image.pixels_mut() {
        for i in 0..3 {
            pixel[i] = saturate_u8(pixel[i] as f32 * keep + color[i] as f32 * opacity);
        }
    }

    image
}

/// Luma in 14-bit fixed point: 0.299*R + 0.587*G + 0.114*B, rounded.
#[inline]
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    let sum = pixel[0] as u32 * R + pixel[1] as u32 * G + pixel[2] as u32 * B;
    ((sum + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

pub fn to_gray(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luma(image.get_pixel(x, y))])
    })
}

/// Replicate a single channel into R, G and B.
pub fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RgbImage {
        RgbImage::from_fn(3, 2, |x, y| Rgb([(x * 80) as u8, (y * 120) as u8, 200]))
    }

    #[test]
    fn test_blend_endpoints_are_exact() {
        let original = sample();
        let filtered = RgbImage::from_pixel(3, 2, Rgb([7, 99, 250]));

        assert_eq!(blend_weighted(&original, filtered.clone(), 0.0), original);
        assert_eq!(blend_weighted(&original, filtered.clone(), 1.0), filtered);
    }

    #[test]
    fn test_blend_midpoint() {
        let original = RgbImage::from_pixel(1, 1, Rgb([0, 100, 255]));
        let filtered = RgbImage::from_pixel(1, 1, Rgb([255, 200, 0]));

        let out = blend_weighted(&original, filtered, 0.5);
        assert_eq!(out.get_pixel(0, 0), &Rgb([128, 150, 128]));
    }

    #[test]
    fn test_blend_extrapolation_saturates() {
        let original = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        let filtered = RgbImage::from_pixel(1, 1, Rgb([200, 200, 200]));

        let out = blend_weighted(&original, filtered, 2.0);
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_luma() {
        assert_eq!(luma(&Rgb([0, 0, 0])), 0);
        assert_eq!(luma(&Rgb([255, 255, 255])), 255);
        assert_eq!(luma(&Rgb([255, 0, 0])), 76);
        assert_eq!(luma(&Rgb([0, 255, 0])), 150);
        assert_eq!(luma(&Rgb([0, 0, 255])), 29);
    }

    #[test]
    fn test_gray_roundtrip_replicates_channels() {
        let rgb = gray_to_rgb(&to_gray(&sample()));
        for pixel in rgb.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_overlay_zero_opacity_is_identity() {
        let image = sample();
        assert_eq!(overlay_color(image.clone(), Rgb([10, 15, 20]), 0.0), image);
    }
}
