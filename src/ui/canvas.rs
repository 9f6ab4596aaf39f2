use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::{Point, Rectangle, Renderer, Theme};

use crate::state::crop::{CropRect, DisplayBounds};
use crate::ui::grid::GridLayout;
use crate::ui::viewport::Viewport;
use crate::Message;

/// Trackpad pixels that add up to one wheel notch
const PIXELS_PER_NOTCH: f32 = 60.0;

/// Overlay canvas laid over the image.
///
/// Draws the grid and crop square, and turns mouse input into
/// `Message::PointerPressed` / `PointerDragged` / `Scrolled`. Positions in
/// those messages are source-image pixels relative to the image origin.
pub struct CropCanvas {
    pub rect: CropRect,
    /// Source size of the image under the canvas
    pub bounds: DisplayBounds,
}

impl CropCanvas {
    fn viewport(&self, bounds: Rectangle) -> Viewport {
        Viewport::new(self.bounds, bounds.size())
    }
}

impl Program<Message> for CropCanvas {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        GridLayout::new(self.rect, self.bounds).draw(&mut frame, self.viewport(bounds));
        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let viewport = self.viewport(bounds);

        match event {
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if cursor.position_in(bounds).is_none() {
                    return (canvas::event::Status::Ignored, None);
                }
                if vertical_component(delta) == 0.0 {
                    return (canvas::event::Status::Ignored, None);
                }
                // Swallow partial trackpad movement so the scrollable does not pan
                let message = state.scroll_notch(delta).map(Message::Scrolled);
                return (canvas::event::Status::Captured, message);
            }

            // Press only counts inside the canvas
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    state.is_dragging = true;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::PointerPressed(viewport.to_source(pos))),
                    );
                }
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.is_dragging {
                    state.is_dragging = false;
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Keep following the pointer outside the canvas while the button is held
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                let position = state.track(position, cursor);
                if state.is_dragging {
                    let local = relative_to(position, bounds);
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::PointerDragged(viewport.to_source(local))),
                    );
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.is_dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn vertical_component(delta: mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => y,
    }
}

/// Layout position to canvas-local coordinates (may be negative)
fn relative_to(position: Point, bounds: Rectangle) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}

/// State for drag and wheel interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    /// Scroll offset of the enclosing scrollable, learned from the cursor
    translation: (f32, f32),
    /// Trackpad pixels not yet turned into a notch
    pixel_scroll: f32,
}

impl DragState {
    /// Pointer position in the canvas' layout space.
    ///
    /// The enclosing scrollable only hands over a translated cursor while the
    /// pointer is over it; outside, the raw event position is shifted by the
    /// last known offset.
    fn track(&mut self, position: Point, cursor: Cursor) -> Point {
        match cursor.position() {
            Some(p) => {
                self.translation = (p.x - position.x, p.y - position.y);
                p
            }
            None => Point::new(position.x + self.translation.0, position.y + self.translation.1),
        }
    }

    /// One notch per wheel line, or per `PIXELS_PER_NOTCH` trackpad pixels
    fn scroll_notch(&mut self, delta: mouse::ScrollDelta) -> Option<f32> {
        match delta {
            mouse::ScrollDelta::Lines { y, .. } => {
                self.pixel_scroll = 0.0;
                (y != 0.0).then(|| y.signum())
            }
            mouse::ScrollDelta::Pixels { y, .. } => {
                if y == 0.0 {
                    return None;
                }
                if self.pixel_scroll != 0.0 && self.pixel_scroll.signum() != y.signum() {
                    self.pixel_scroll = 0.0;
                }
                self.pixel_scroll += y;
                if self.pixel_scroll.abs() < PIXELS_PER_NOTCH {
                    return None;
                }
                let direction = self.pixel_scroll.signum();
                self.pixel_scroll -= direction * PIXELS_PER_NOTCH;
                Some(direction)
            }
        }
    }
}
