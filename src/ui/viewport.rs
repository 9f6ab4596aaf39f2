/// Mapping between canvas pixels and source-image pixels
///
/// The viewer sits in a scrollable so the canvas normally has the image's
/// native size and the mapping is the identity. If the layout ever hands the
/// canvas a different size, the image widget is stretched to the same bounds
/// and clicks and gridlines go through this scale so they still agree with
/// the pixels under the cursor.
use iced::{Point, Size};

use crate::state::crop::DisplayBounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Source pixels per canvas pixel, per axis
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    /// `image` is the source size, `shown` the size the canvas was laid out at
    pub fn new(image: DisplayBounds, shown: Size) -> Self {
        Self {
            scale_x: axis_scale(image.width, shown.width),
            scale_y: axis_scale(image.height, shown.height),
        }
    }

    /// Canvas-local point to source pixel coordinates
    pub fn to_source(&self, p: Point) -> Point {
        Point::new(p.x * self.scale_x, p.y * self.scale_y)
    }

    /// Source pixel coordinates to canvas-local point
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x / self.scale_x, p.y / self.scale_y)
    }
}

fn axis_scale(source: u32, shown: f32) -> f32 {
    if shown > 0.0 && source > 0 {
        source as f32 / shown
    } else {
        1.0
    }
}
