//! Upload checks and downscaling for document images.

use std::io::Cursor;

use image::ImageFormat;
use image::imageops::FilterType;
use tracing::{debug, warn};

use crate::config::ImageConfig;
use crate::error::{ReportError, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub size_mb: f64,
}

/// Inspect an image without validating it against any limits.
pub fn image_info(bytes: &[u8]) -> Result<ImageInfo> {
    let format = image::guess_format(bytes).map_err(|e| invalid("<memory>", e))?;
    let img = image::load_from_memory_with_format(bytes, format).map_err(|e| invalid("<memory>", e))?;
    Ok(ImageInfo {
        format,
        width: img.width(),
        height: img.height(),
        size_mb: bytes.len() as f64 / BYTES_PER_MB,
    })
}

/// Check size, format and decodability of an uploaded image.
pub fn validate_image(name: &str, bytes: &[u8], config: &ImageConfig) -> Result<ImageInfo> {
    let size_mb = bytes.len() as f64 / BYTES_PER_MB;
    if size_mb > f64::from(config.max_size_mb) {
        return Err(ReportError::Image {
            name: name.to_string(),
            reason: format!(
                "File size ({size_mb:.2}MB) exceeds maximum allowed size ({}MB)",
                config.max_size_mb
            ),
        });
    }

    let format = image::guess_format(bytes).map_err(|e| invalid(name, e))?;
    let supported = format
        .extensions_str()
        .iter()
        .any(|ext| config.formats.iter().any(|f| f.eq_ignore_ascii_case(ext)));
    if !supported {
        return Err(ReportError::Image {
            name: name.to_string(),
            reason: format!("unsupported format {format:?}"),
        });
    }

    let img = image::load_from_memory_with_format(bytes, format).map_err(|e| invalid(name, e))?;
    debug!("Validated {}: {:?} {}x{}", name, format, img.width(), img.height());

    Ok(ImageInfo {
        format,
        width: img.width(),
        height: img.height(),
        size_mb,
    })
}

/// Downscale so neither side exceeds `max_dimension`, keeping the aspect
/// ratio and the original encoding. Returns the input unchanged when it
/// already fits or cannot be re-encoded.
pub fn resize_if_needed(bytes: &[u8], max_dimension: u32) -> Vec<u8> {
    let Ok(format) = image::guess_format(bytes) else {
        return bytes.to_vec();
    };
    let Ok(img) = image::load_from_memory_with_format(bytes, format) else {
        return bytes.to_vec();
    };
    if img.width() <= max_dimension && img.height() <= max_dimension {
        return bytes.to_vec();
    }

    let resized = img.resize(max_dimension, max_dimension, FilterType::Lanczos3);
    let mut buf = Vec::new();
    match resized.write_to(&mut Cursor::new(&mut buf), format) {
        Ok(()) => {
            debug!(
                "Resized {}x{} -> {}x{}",
                img.width(),
                img.height(),
                resized.width(),
                resized.height()
            );
            buf
        }
        Err(e) => {
            warn!("Keeping original image, re-encoding failed: {}", e);
            bytes.to_vec()
        }
    }
}

fn invalid(name: &str, e: image::ImageError) -> ReportError {
    ReportError::Image {
        name: name.to_string(),
        reason: format!("Invalid image file: {e}"),
    }
}
