use crate::Effect;
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, ImageBuffer, Pixel, RgbImage};

/// Fixed binomial kernels used for small sizes when sigma is derived
/// from the kernel size.
const SMALL_GAUSSIAN_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Kernel size for the blur filter: `5 + 20 * intensity`, truncated, then
/// forced odd. Never below 1.
pub fn blur_kernel_size(intensity: f32) -> u32 {
    let size = (5.0 + 20.0 * intensity) as i32;
    let size = if size % 2 == 0 { size + 1 } else { size };
    size.max(1) as u32
}

/// Clamp `size` to `2 * max(width, height) + 1`. Taps past that only
/// revisit reflected pixels, and extrapolated intensities can otherwise
/// request kernels of billions of taps.
pub fn capped_kernel_size(size: u32, width: u32, height: u32) -> u32 {
    let limit = width.max(height).saturating_mul(2).saturating_add(1);
    size.clamp(1, limit)
}

/// Sigma derived from the kernel size when none is given.
pub fn auto_sigma(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1-D Gaussian kernel of `size` taps.
///
/// A non-positive `sigma` is derived from `size`; odd sizes up to 7 then use
/// the binomial tables.
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let size = size.max(1);

    if sigma <= 0.0 && size % 2 == 1 && size <= 7 {
        return SMALL_GAUSSIAN_KERNELS[(size / 2) as usize].to_vec();
    }

    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(size) };
    let scale = -0.5 / (sigma * sigma);
    let center = (size as f32 - 1.0) * 0.5;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - center;
            (scale * x * x).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for weight in kernel.iter_mut() {
        *weight /= sum;
    }

    kernel
}

/// Map an out-of-range index back into `0..len` by mirroring around the
/// edge pixels without repeating them (`2 1 | 0 1 2 | 1 0`).
#[inline]
pub fn reflect_101(index: i64, len: u32) -> u32 {
    let len = len as i64;
    if len <= 1 {
        return 0;
    }

    let period = 2 * (len - 1);
    let i = index.rem_euclid(period);
    (if i >= len { period - i } else { i }) as u32
}

/// Separable convolution of `kernel` along both axes with reflect-101
/// borders. Every channel is filtered independently.
pub fn separable_blur<P>(image: &ImageBuffer<P, Vec<u8>>, kernel: &[f32]) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let channels = P::CHANNEL_COUNT as usize;
    let radius = (kernel.len() / 2) as i64;
    let src = image.as_raw();

    let mut temp = vec![0.0f32; src.len()];
    for y in 0..height {
        let row = (y * width) as usize;
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as i64 + k as i64 - radius, width) as usize;
                    sum += src[(row + sx) * channels + c] as f32 * weight;
                }
                temp[(row + x as usize) * channels + c] = sum;
            }
        }
    }

    let mut result = image.clone();
    for y in 0..height {
        for x in 0..width {
            let pixel = result.get_pixel_mut(x, y);
            let channel_values = pixel.channels_mut();
            for (c, value) in channel_values.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as i64 + k as i64 - radius, height) as usize;
                    sum += temp[(sy * width as usize + x as usize) * channels + c] * weight;
                }
                *value = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    result
}

/// Gaussian blur configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "5"))]
    kernel_size: u32,

    /// Zero derives sigma from the kernel size.
    #[derivative(Default(value = "0.0"))]
    sigma: f32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_intensity(intensity: f32) -> Self {
        Self::new().with_kernel_size(blur_kernel_size(intensity))
    }

    pub fn kernel_size(&self) -> u32 {
        self.kernel_size
    }

    /// Kernel size actually used on a `width` x `height` image.
    pub fn effective_kernel_size(&self, width: u32, height: u32) -> u32 {
        capped_kernel_size(self.kernel_size, width, height)
    }

    pub fn kernel_for(&self, width: u32, height: u32) -> Vec<f32> {
        gaussian_kernel(self.effective_kernel_size(width, height), self.sigma)
    }

    pub fn blur_gray(&self, image: &GrayImage) -> GrayImage {
        separable_blur(image, &self.kernel_for(image.width(), image.height()))
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, image: RgbImage) -> RgbImage {
        let kernel = self.kernel_for(image.width(), image.height());
        log::debug!(
            "gaussian blur: kernel_size={} (requested {}), sigma={}",
            kernel.len(),
            self.kernel_size,
            self.sigma
        );
        separable_blur(&image, &kernel)
    }
}
