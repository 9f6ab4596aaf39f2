/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the image store, the exporter and the UI layer.

use iced::widget::image::Handle;
use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};

/// A single image found in the input folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Filename only (e.g., "a.png"), relative to the input folder
    pub filename: String,
}

impl ImageEntry {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// The decoded pixels of the image at the current index, at original resolution
#[derive(Debug, Clone)]
pub struct CurrentImage {
    /// Entry this buffer was decoded from
    pub entry: ImageEntry,
    /// 8-bit RGB pixels, never mutated after decode
    pub pixels: RgbImage,
}

impl CurrentImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Renderable copy of the current image (same pixels, RGBA for the GPU)
#[derive(Debug, Clone)]
pub struct DisplayImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

impl DisplayImage {
    /// Single RGB -> RGBA conversion for on-screen presentation
    pub fn from_current(current: &CurrentImage) -> Self {
        let rgba = to_rgba(&current.pixels);
        let (width, height) = rgba.dimensions();

        Self {
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
            width,
            height,
        }
    }
}

/// Opaque RGBA copy of an RGB buffer, read straight from the borrow
fn to_rgba(pixels: &RgbImage) -> RgbaImage {
    pixels.convert()
}
