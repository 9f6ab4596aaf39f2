/// Crop rectangle state
///
/// Holds the square crop region (top-left + side length) and the size the
/// exported crop is resized to. All coordinates are display pixels, which
/// coincide with original-image pixels because images are shown at native
/// resolution.

use std::fmt;

/// Smallest allowed crop side
pub const MIN_SIDE: u32 = 32;

/// Side change per scroll-wheel notch
pub const SCROLL_STEP: i32 = 32;

/// Size of the image currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub width: u32,
    pub height: u32,
}

impl DisplayBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn shorter_edge(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// Square crop region; `side` is both width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Dimensions every export is resized to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Grid presets offered in the size selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Square512,
    Square1024,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Square512, Preset::Square1024];

    pub fn side(self) -> u32 {
        match self {
            Preset::Square512 => 512,
            Preset::Square1024 => 1024,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side();
        write!(f, "{}x{}", side, side)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropState {
    rect: CropRect,
    output: OutputSize,
    /// Last preset picked in the selector; scrolling does not change it
    preset: Preset,
}

impl Default for CropState {
    fn default() -> Self {
        Self::new(Preset::default())
    }
}

impl CropState {
    pub fn new(preset: Preset) -> Self {
        Self {
            rect: CropRect {
                x: 0,
                y: 0,
                side: preset.side(),
            },
            output: OutputSize::square(preset.side()),
            preset,
        }
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn output_size(&self) -> OutputSize {
        self.output
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Pull the rectangle back inside new bounds after an image change.
    ///
    /// Only shrinks the offset; when the image is smaller than `side` the
    /// offset saturates at zero and the rectangle overhangs the image.
    pub fn clamp_to_bounds(&mut self, bounds: DisplayBounds) {
        self.rect.x = self.rect.x.min(bounds.width.saturating_sub(self.rect.side));
        self.rect.y = self.rect.y.min(bounds.height.saturating_sub(self.rect.side));
    }

    /// Move the top-left corner, keeping the full rectangle inside `bounds`
    pub fn set_position(&mut self, x: u32, y: u32, bounds: DisplayBounds) {
        self.rect.x = x;
        self.rect.y = y;
        self.clamp_to_bounds(bounds);
        log::debug!("crop moved to ({}, {})", self.rect.x, self.rect.y);
    }

    /// Grow or shrink the side by `delta`, within `[MIN_SIDE, shorter edge]`.
    ///
    /// The output size follows the new side.
    pub fn resize(&mut self, delta: i32, bounds: DisplayBounds) {
        let wanted = i64::from(self.rect.side) + i64::from(delta);
        let upper = i64::from(bounds.shorter_edge().max(MIN_SIDE));
        let side = wanted.min(upper).max(i64::from(MIN_SIDE)) as u32;

        self.rect.side = side;
        self.output = OutputSize::square(side);
        self.clamp_to_bounds(bounds);
        log::debug!("crop side now {}", side);
    }

    /// Apply a grid preset to both side and output size.
    ///
    /// The side is taken as-is even if it exceeds the image; only the
    /// position is re-clamped when an image is on screen.
    pub fn set_preset(&mut self, preset: Preset, bounds: Option<DisplayBounds>) {
        self.preset = preset;
        self.rect.side = preset.side();
        self.output = OutputSize::square(preset.side());
        if let Some(bounds) = bounds {
            self.clamp_to_bounds(bounds);
        }
        log::debug!("preset {} selected", preset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: u32, y: u32, side: u32) -> CropRect {
        CropRect { x, y, side }
    }

    #[test]
    fn test_default_is_512_preset() {
        let crop = CropState::default();
        assert_eq!(crop.rect(), rect(0, 0, 512));
        assert_eq!(crop.output_size(), OutputSize::square(512));
        assert_eq!(crop.preset(), Preset::Square512);
    }

    #[test]
    fn test_preset_labels() {
        assert_eq!(Preset::Square512.to_string(), "512x512");
        assert_eq!(Preset::Square1024.to_string(), "1024x1024");
    }

    #[test]
    fn test_set_position_clamps_to_far_edges() {
        let mut crop = CropState::default();
        crop.set_position(900, 750, DisplayBounds::new(1000, 800));
        assert_eq!(crop.rect(), rect(488, 288, 512));
    }

    #[test]
    fn test_set_position_inside_is_exact() {
        let mut crop = CropState::default();
        crop.set_position(17, 211, DisplayBounds::new(1000, 800));
        assert_eq!(crop.rect(), rect(17, 211, 512));
    }

    #[test]
    fn test_position_invariant_holds_over_pointer_grid() {
        let bounds = DisplayBounds::new(1000, 800);
        let mut crop = CropState::default();
        for side_steps in [-10, 0, 3, 20] {
            crop.resize(side_steps * SCROLL_STEP, bounds);
            for x in (0..1500).step_by(37) {
                for y in (0..1200).step_by(41) {
                    crop.set_position(x, y, bounds);
                    let r = crop.rect();
                    assert!(r.x + r.side <= bounds.width, "{:?}", r);
                    assert!(r.y + r.side <= bounds.height, "{:?}", r);
                }
            }
        }
    }

    #[test]
    fn test_clamp_to_smaller_image() {
        let mut crop = CropState::default();
        crop.set_position(488, 288, DisplayBounds::new(1000, 800));
        crop.clamp_to_bounds(DisplayBounds::new(640, 480));
        assert_eq!(crop.rect(), rect(128, 0, 512));
    }

    #[test]
    fn test_clamp_never_moves_offset_outward() {
        let mut crop = CropState::default();
        crop.set_position(10, 20, DisplayBounds::new(1000, 800));
        crop.clamp_to_bounds(DisplayBounds::new(4000, 4000));
        assert_eq!(crop.rect(), rect(10, 20, 512));
    }

    #[test]
    fn test_grow_stops_at_shorter_edge() {
        let bounds = DisplayBounds::new(1000, 800);
        let mut crop = CropState::default();
        for _ in 0..50 {
            crop.resize(SCROLL_STEP, bounds);
            assert!(crop.rect().side <= 800);
        }
        assert_eq!(crop.rect().side, 800);
        assert_eq!(crop.output_size(), OutputSize::square(800));
    }

    #[test]
    fn test_shrink_stops_at_min_side() {
        let bounds = DisplayBounds::new(1000, 800);
        let mut crop = CropState::default();
        for _ in 0..50 {
            crop.resize(-SCROLL_STEP, bounds);
            assert!(crop.rect().side >= MIN_SIDE);
        }
        assert_eq!(crop.rect().side, MIN_SIDE);
        assert_eq!(crop.output_size(), OutputSize::square(MIN_SIDE));
    }

    #[test]
    fn test_single_step_changes_side_by_32() {
        let bounds = DisplayBounds::new(1000, 800);
        let mut crop = CropState::default();
        crop.resize(SCROLL_STEP, bounds);
        assert_eq!(crop.rect().side, 544);
        crop.resize(-SCROLL_STEP, bounds);
        crop.resize(-SCROLL_STEP, bounds);
        assert_eq!(crop.rect().side, 480);
    }

    #[test]
    fn test_resize_keeps_rect_inside() {
        let bounds = DisplayBounds::new(1000, 800);
        let mut crop = CropState::default();
        crop.set_position(488, 288, bounds);
        crop.resize(SCROLL_STEP, bounds);
        let r = crop.rect();
        assert_eq!(r, rect(456, 256, 544));
    }

    #[test]
    fn test_tiny_image_still_respects_min_side() {
        let mut crop = CropState::default();
        crop.resize(SCROLL_STEP, DisplayBounds::new(20, 10));
        assert_eq!(crop.rect().side, MIN_SIDE);
    }

    #[test]
    fn test_scroll_does_not_change_selected_preset() {
        let mut crop = CropState::new(Preset::Square1024);
        crop.resize(-SCROLL_STEP, DisplayBounds::new(2000, 2000));
        assert_eq!(crop.preset(), Preset::Square1024);
        assert_eq!(crop.rect().side, 992);
    }

    #[test]
    fn test_preset_sets_side_and_output() {
        let mut crop = CropState::default();
        crop.set_position(800, 900, DisplayBounds::new(2000, 2000));
        crop.set_preset(Preset::Square1024, Some(DisplayBounds::new(2000, 2000)));
        assert_eq!(crop.rect(), rect(800, 900, 1024));
        assert_eq!(crop.output_size(), OutputSize::square(1024));

        crop.set_preset(Preset::Square1024, Some(DisplayBounds::new(1500, 1500)));
        assert_eq!(crop.rect(), rect(476, 476, 1024));
    }

    #[test]
    fn test_preset_larger_than_image_overhangs() {
        let mut crop = CropState::default();
        crop.set_position(100, 100, DisplayBounds::new(640, 480));
        crop.set_preset(Preset::Square1024, Some(DisplayBounds::new(640, 480)));

        // Offset saturates at zero; the rectangle cannot fit
        let r = crop.rect();
        assert_eq!(r, rect(0, 0, 1024));
        assert!(r.side > 640 && r.side > 480);
    }

    #[test]
    fn test_preset_without_image() {
        let mut crop = CropState::default();
        crop.set_preset(Preset::Square1024, None);
        assert_eq!(crop.rect(), rect(0, 0, 1024));
    }
}
