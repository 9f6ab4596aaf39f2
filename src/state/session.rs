/// Application state and the update functions driven by UI events
///
/// The iced layer only translates widget events into calls on `Session`;
/// everything that decides where the crop goes, what gets exported and
/// which image is shown lives here.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::CropperConfig;
use crate::imaging::export::{self, ExportError};
use crate::imaging::store::{self, StoreError};
use crate::state::crop::{CropRect, CropState, DisplayBounds, OutputSize, Preset, SCROLL_STEP};
use crate::state::data::{CurrentImage, DisplayImage, ImageEntry};
use crate::state::navigation::{Navigator, NextStep};

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result of a forward navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Crop written to `exported` (if an image was decoded), now viewing `index`
    Moved {
        exported: Option<PathBuf>,
        index: usize,
    },
    AtLastImage,
    NoImages,
}

pub struct Session {
    config: CropperConfig,
    entries: Vec<ImageEntry>,
    nav: Navigator,
    crop: CropState,
    /// None when the list is empty or the current file failed to decode
    current: Option<CurrentImage>,
    display: Option<DisplayImage>,
}

impl Session {
    /// Empty session; call `reload` to scan the input folder
    pub fn new(config: CropperConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            nav: Navigator::new(0),
            crop: CropState::default(),
            current: None,
            display: None,
        }
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.nav.current()
    }

    pub fn current_entry(&self) -> Option<&ImageEntry> {
        self.nav.current().and_then(|i| self.entries.get(i))
    }

    pub fn display_image(&self) -> Option<&DisplayImage> {
        self.display.as_ref()
    }

    pub fn crop_rect(&self) -> CropRect {
        self.crop.rect()
    }

    pub fn output_size(&self) -> OutputSize {
        self.crop.output_size()
    }

    pub fn preset(&self) -> Preset {
        self.crop.preset()
    }

    /// Bounds of the image on screen (native resolution)
    pub fn display_bounds(&self) -> Option<DisplayBounds> {
        self.current
            .as_ref()
            .map(|img| DisplayBounds::new(img.width(), img.height()))
    }

    /// Re-scan the input folder and show the first image
    pub fn reload(&mut self) -> Result<()> {
        self.entries = store::load_directory(&self.config.input_dir);
        self.nav = Navigator::new(self.entries.len());
        self.show_current()
    }

    /// Replace the current buffer with the image at the navigator's index
    fn show_current(&mut self) -> Result<()> {
        self.current = None;
        self.display = None;

        let Some(entry) = self.current_entry().cloned() else {
            return Ok(());
        };

        let current = store::load_current(&self.config.input_dir, &entry)?;
        let bounds = DisplayBounds::new(current.width(), current.height());
        self.display = Some(DisplayImage::from_current(&current));
        self.current = Some(current);
        self.crop.clamp_to_bounds(bounds);
        Ok(())
    }

    /// Primary button pressed at canvas coordinates `(x, y)`
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.move_crop(x, y);
    }

    /// Pointer moved with the primary button held
    pub fn pointer_drag(&mut self, x: f32, y: f32) {
        self.move_crop(x, y);
    }

    fn move_crop(&mut self, x: f32, y: f32) {
        if let Some(bounds) = self.display_bounds() {
            self.crop.set_position(to_pixel(x), to_pixel(y), bounds);
        }
    }

    /// One wheel notch: positive grows the square, anything else shrinks it
    pub fn scroll(&mut self, direction: f32) {
        let Some(bounds) = self.display_bounds() else {
            return;
        };
        let delta = if direction > 0.0 { SCROLL_STEP } else { -SCROLL_STEP };
        self.crop.resize(delta, bounds);
    }

    pub fn select_preset(&mut self, preset: Preset) {
        let bounds = self.display_bounds();
        self.crop.set_preset(preset, bounds);
    }

    /// Go back one image without exporting the one being left
    pub fn previous(&mut self) -> Result<Option<usize>> {
        let Some(index) = self.nav.previous() else {
            return Ok(None);
        };
        self.show_current()?;
        Ok(Some(index))
    }

    /// Export the current crop, then show the next image.
    ///
    /// Does nothing on the last image. A failed export leaves the session
    /// on the current image.
    pub fn next(&mut self) -> Result<Advance> {
        let index = match self.nav.begin_next() {
            NextStep::Export(index) => index,
            NextStep::AtLastImage => return Ok(Advance::AtLastImage),
            NextStep::NoImages => return Ok(Advance::NoImages),
        };

        let exported = match self.export_current() {
            Ok(path) => path,
            Err(e) => {
                self.nav.abort_export();
                return Err(e.into());
            }
        };

        let index = self.nav.finish_export().unwrap_or(index + 1);
        self.show_current()?;
        Ok(Advance::Moved { exported, index })
    }

    /// Write the crop of the current image; `None` if nothing is decoded
    fn export_current(&self) -> std::result::Result<Option<PathBuf>, ExportError> {
        let Some(current) = self.current.as_ref() else {
            log::warn!("⚠️  No decoded image to export, skipping");
            return Ok(None);
        };

        export::export(
            &current.pixels,
            self.crop.rect(),
            self.crop.output_size(),
            &current.entry.filename,
            &self.config.output_dir,
        )
        .map(Some)
    }
}

/// Canvas coordinate to pixel offset; negatives (drag past the left/top edge) become 0
fn to_pixel(v: f32) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor() as u32
    } else {
        0
    }
}
