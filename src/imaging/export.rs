/// Exporter: cut the crop square out of the original buffer, resize, save

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbImage;
use thiserror::Error;

use crate::config::OUTPUT_PREFIX;
use crate::state::crop::{CropRect, OutputSize};

/// Resampling filter used for the final resize (bilinear)
const RESIZE_FILTER: FilterType = FilterType::Triangle;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("crop {rect:?} does not fit inside the {width}x{height} image")]
    CropOutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// `a.png` -> `cropped_a.png`
pub fn export_file_name(source_name: &str) -> String {
    format!("{}{}", OUTPUT_PREFIX, source_name)
}

/// Slice `rect` out of `original`, resize it to `output`, and write it to
/// `output_dir`. An existing file with the same name is overwritten.
///
/// `rect` must be in the coordinate space of `original`. A rectangle that
/// overhangs the buffer (image smaller than the crop side) is rejected
/// rather than producing a partial slice.
pub fn export(
    original: &RgbImage,
    rect: CropRect,
    output: OutputSize,
    source_name: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let resized = crop_and_resize(original, rect, output)?;

    let path = output_dir.join(export_file_name(source_name));
    resized.save(&path).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    log::info!(
        "💾 Exported {} ({}px crop at {},{} -> {}x{})",
        path.display(),
        rect.side,
        rect.x,
        rect.y,
        output.width,
        output.height
    );
    Ok(path)
}

/// The in-memory part of an export
pub fn crop_and_resize(original: &RgbImage, rect: CropRect, output: OutputSize) -> Result<RgbImage> {
    let (width, height) = original.dimensions();
    let fits = u64::from(rect.x) + u64::from(rect.side) <= u64::from(width)
        && u64::from(rect.y) + u64::from(rect.side) <= u64::from(height);

    if !fits || rect.side == 0 {
        return Err(ExportError::CropOutOfBounds { rect, width, height });
    }

    let slice = imageops::crop_imm(original, rect.x, rect.y, rect.side, rect.side).to_image();
    Ok(imageops::resize(&slice, output.width, output.height, RESIZE_FILTER))
}
