/// Grid overlay drawn on top of the image
///
/// Gridlines sit at every multiple of the crop side and are only a visual
/// aid; the crop square itself is placed with pixel precision.
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Size};

use crate::state::crop::{CropRect, DisplayBounds};
use crate::ui::viewport::Viewport;

const GRID_COLOR: Color = Color::from_rgb(1.0, 0.0, 0.0);
const HIGHLIGHT_COLOR: Color = Color::from_rgb(0.0, 0.0, 1.0);
const GRID_WIDTH: f32 = 1.0;
const HIGHLIGHT_WIDTH: f32 = 2.0;

/// Everything one overlay pass draws
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// x positions of vertical lines
    pub vertical: Vec<u32>,
    /// y positions of horizontal lines
    pub horizontal: Vec<u32>,
    /// Outline of the active crop square
    pub highlight: CropRect,
    pub bounds: DisplayBounds,
}

impl GridLayout {
    pub fn new(rect: CropRect, bounds: DisplayBounds) -> Self {
        Self {
            vertical: multiples(rect.side, bounds.width),
            horizontal: multiples(rect.side, bounds.height),
            highlight: rect,
            bounds,
        }
    }

    /// Stroke the gridlines and the highlighted square into `frame`,
    /// mapping source pixels to canvas pixels through `viewport`
    pub fn draw(&self, frame: &mut canvas::Frame, viewport: Viewport) {
        let width = self.bounds.width as f32;
        let height = self.bounds.height as f32;
        let at = |x: f32, y: f32| viewport.to_screen(Point::new(x, y));

        let mut grid = canvas::path::Builder::new();
        for &x in &self.vertical {
            grid.move_to(at(x as f32, 0.0));
            grid.line_to(at(x as f32, height));
        }
        for &y in &self.horizontal {
            grid.move_to(at(0.0, y as f32));
            grid.line_to(at(width, y as f32));
        }
        frame.stroke(
            &grid.build(),
            Stroke::default()
                .with_color(GRID_COLOR)
                .with_width(GRID_WIDTH),
        );

        let r = self.highlight;
        let top_left = at(r.x as f32, r.y as f32);
        let bottom_right = at((r.x + r.side) as f32, (r.y + r.side) as f32);
        let outline = Path::rectangle(
            top_left,
            Size::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y),
        );
        frame.stroke(
            &outline,
            Stroke::default()
                .with_color(HIGHLIGHT_COLOR)
                .with_width(HIGHLIGHT_WIDTH),
        );
    }
}

/// 0, step, 2*step, ... up to and including `limit`
fn multiples(step: u32, limit: u32) -> Vec<u32> {
    if step == 0 {
        return vec![0];
    }
    (0..=limit).step_by(step as usize).collect()
}
