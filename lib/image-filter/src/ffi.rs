//! C ABI. See `include/image_filter.h`.
//!
//! `apply_filter1` .. `apply_filter12` keep the fire-and-forget contract:
//! they return nothing and write nothing when the source cannot be decoded.
//! `apply_filter_checked` runs the same work and reports a [`FilterStatus`].

use crate::{FilterKind, ImageFilterError, ImageFilterResult, pipeline};
use num_enum::IntoPrimitive;
use std::{
    ffi::{CStr, c_char, c_int, c_uchar},
    path::Path,
};

/// Result codes returned by `apply_filter_checked`
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(i32)]
pub enum FilterStatus {
    Ok = 0,
    /// Null or non UTF-8 path, or a non-finite intensity
    InvalidArgument = 1,
    UnknownFilter = 2,
    DecodeFailed = 3,
    EncodeFailed = 4,
}

impl From<&ImageFilterError> for FilterStatus {
    fn from(err: &ImageFilterError) -> Self {
        match err {
            ImageFilterError::Decode { .. } => FilterStatus::DecodeFailed,
            ImageFilterError::Encode { .. } | ImageFilterError::Io(_) => {
                FilterStatus::EncodeFailed
            }
            ImageFilterError::InvalidParameter(_) => FilterStatus::InvalidArgument,
            ImageFilterError::UnknownFilter(_) => FilterStatus::UnknownFilter,
        }
    }
}

/// # Safety
///
/// `ptr` must be null or point to a NUL terminated string that stays valid
/// for the returned lifetime.
unsafe fn c_path<'a>(ptr: *const c_char) -> ImageFilterResult<&'a Path> {
    if ptr.is_null() {
        return Err(ImageFilterError::InvalidParameter("null path".to_string()));
    }

    // safety: upheld by the caller
    let raw = unsafe { CStr::from_ptr(ptr) };
    raw.to_str()
        .map(Path::new)
        .map_err(|e| ImageFilterError::InvalidParameter(format!("path is not UTF-8: {e}")))
}

/// # Safety
///
/// Both pointers must be null or valid NUL terminated strings.
unsafe fn c_paths<'a>(
    input_path: *const c_char,
    output_path: *const c_char,
) -> ImageFilterResult<(&'a Path, &'a Path)> {
    // safety: upheld by the caller
    unsafe { Ok((c_path(input_path)?, c_path(output_path)?)) }
}

/// # Safety
///
/// Both pointers must be null or valid NUL terminated strings.
unsafe fn run(
    filter_id: u8,
    input_path: *const c_char,
    output_path: *const c_char,
    intensity: f32,
) -> ImageFilterResult<()> {
    let kind =
        FilterKind::try_from(filter_id).map_err(|_| ImageFilterError::UnknownFilter(filter_id))?;

    // safety: upheld by the caller
    let (input, output) = unsafe { c_paths(input_path, output_path)? };
    pipeline::try_apply_filter(kind, input, output, intensity)
}

/// Apply filter `filter_id` (1..=12) and report the outcome.
///
/// # Safety
///
/// `input_path` and `output_path` must be null or valid NUL terminated
/// strings for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn apply_filter_checked(
    filter_id: c_uchar,
    input_path: *const c_char,
    output_path: *const c_char,
    intensity: f32,
) -> c_int {
    // safety: upheld by the caller
    match unsafe { run(filter_id, input_path, output_path, intensity) } {
        Ok(()) => FilterStatus::Ok.into(),
        Err(e) => {
            log::warn!("filter {filter_id} failed: {e}");
            FilterStatus::from(&e).into()
        }
    }
}

macro_rules! numbered_filters {
    ($($symbol:ident => $kind:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($kind), "` with the legacy silent-failure contract.")]
            ///
            /// # Safety
            ///
            /// `input_path` and `output_path` must be null or valid NUL
            /// terminated strings for the duration of the call.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $symbol(
                input_path: *const c_char,
                output_path: *const c_char,
                intensity: f32,
            ) {
                let kind = FilterKind::$kind;
                // safety: upheld by the caller
                match unsafe { c_paths(input_path, output_path) } {
                    Ok((input, output)) => pipeline::apply_filter(kind, input, output, intensity),
                    Err(e) => log::warn!("{} filter skipped: {e}", kind.name()),
                }
            }
        )*
    };
}

numbered_filters! {
    apply_filter1 => Sepia;
    apply_filter2 => Warm;
    apply_filter3 => Cool;
    apply_filter4 => Sketch;
    apply_filter5 => HighContrast;
    apply_filter6 => Fade;
    apply_filter7 => BlackWhite;
    apply_filter8 => Vintage;
    apply_filter9 => Blur;
    apply_filter10 => EdgeDetection;
    apply_filter11 => Emboss;
    apply_filter12 => Negative;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{ffi::CString, ptr};

    #[test]
    fn test_status_codes() {
        assert_eq!(i32::from(FilterStatus::Ok), 0);
        assert_eq!(i32::from(FilterStatus::InvalidArgument), 1);
        assert_eq!(i32::from(FilterStatus::UnknownFilter), 2);
        assert_eq!(i32::from(FilterStatus::DecodeFailed), 3);
        assert_eq!(i32::from(FilterStatus::EncodeFailed), 4);
    }

    #[test]
    fn test_checked_rejects_null_and_unknown() {
        let path = CString::new("/nonexistent/in.png").unwrap();

        let status = unsafe { apply_filter_checked(1, ptr::null(), path.as_ptr(), 0.5) };
        assert_eq!(status, 1);

        let status = unsafe { apply_filter_checked(0, path.as_ptr(), path.as_ptr(), 0.5) };
        assert_eq!(status, 2);

        let status = unsafe { apply_filter_checked(13, path.as_ptr(), path.as_ptr(), 0.5) };
        assert_eq!(status, 2);
    }

    #[test]
    fn test_checked_reports_decode_failure() {
        let input = CString::new("/nonexistent/in.png").unwrap();
        let output = CString::new("/nonexistent/out.png").unwrap();

        let status = unsafe { apply_filter_checked(12, input.as_ptr(), output.as_ptr(), 1.0) };
        assert_eq!(status, 3);
    }

    #[test]
    fn test_legacy_matches_pipeline_adapter() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let missing = dir.path().join("missing.png");
        let edges = dir.path().join("edges.png");
        let skipped = dir.path().join("skipped.png");

        let image = image::RgbImage::from_fn(8, 8, |x, _| image::Rgb([(x * 30) as u8, 0, 0]));
        image.save(&input).unwrap();

        let c = |p: &Path| CString::new(p.to_str().unwrap()).unwrap();
        unsafe {
            apply_filter10(c(&input).as_ptr(), c(&edges).as_ptr(), -1.0);
            apply_filter10(c(&missing).as_ptr(), c(&skipped).as_ptr(), 0.5);
        }

        assert_eq!(
            image::open(&edges).unwrap().to_rgb8(),
            pipeline::filter_image(FilterKind::EdgeDetection, &image, -1.0)
        );
        assert!(!skipped.exists());
    }

    #[test]
    fn test_legacy_null_is_noop() {
        unsafe {
            apply_filter1(ptr::null(), ptr::null(), 0.5);
            apply_filter12(ptr::null(), ptr::null(), 1.0);
        }
    }
}
