//! Pure validation helpers gating what may reach storage.

use image::ImageFormat;

use crate::error::CoreError;

/// Number of components in a flat bounding box.
pub const BB_LEN: usize = 4;

/// Check that a flat `[x_min, x_max, y_min, y_max]` box lies in normalized
/// coordinate space.
///
/// Only range membership is checked: every component must be within
/// `[0.0, 1.0]` inclusive. Ordering (`x_min <= x_max`) is not enforced.
/// NaN fails the range check.
pub fn are_bbs_valid(bbs: &[f32]) -> bool {
    bbs.len() == BB_LEN && bbs.iter().all(|v| (0.0..=1.0).contains(v))
}

/// Ensure the buffer decodes as a PNG image.
pub fn check_png_file(bytes: &[u8]) -> Result<(), CoreError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map(|_| ())
        .map_err(|e| CoreError::Validation(format!("page data is not a valid PNG: {e}")))
}

/// Parse the buffer as a PDF and return its page count.
pub fn check_pdf_file(bytes: &[u8]) -> Result<usize, lopdf::Error> {
    let doc = lopdf::Document::load_mem(bytes)?;
    Ok(doc.get_pages().len())
}
