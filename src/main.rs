use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, canvas, column, container, pick_list, row, scrollable, stack, text, Image,
};
use iced::{Alignment, ContentFit, Element, Length, Point, Task, Theme};

mod config;
mod imaging;
mod state;
mod ui;

use config::CropperConfig;
use state::crop::{DisplayBounds, Preset};
use state::session::{Advance, Session};
use ui::canvas::CropCanvas;

/// Main application state
struct ImageCropper {
    /// Image list, crop square and current image
    session: Session,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone, PartialEq)]
enum Message {
    /// "Load Images": re-scan the input folder
    LoadImages,
    Previous,
    /// Export the current crop and advance
    Next,
    PresetSelected(Preset),
    /// Primary button pressed on the canvas (image pixel coordinates)
    PointerPressed(Point),
    /// Pointer moved while the primary button is held (may lie outside the image)
    PointerDragged(Point),
    /// One wheel notch; sign gives the direction
    Scrolled(f32),
}

impl ImageCropper {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = CropperConfig::beside_executable();

        if let Err(e) = config.ensure_output_dir() {
            log::error!(
                "❌ Could not create output folder {}: {}",
                config.output_dir.display(),
                e
            );
        }

        log::info!(
            "🎨 Image Cropper reading {} and writing {}",
            config.input_dir.display(),
            config.output_dir.display()
        );

        let mut app = ImageCropper {
            session: Session::new(config),
            status: String::new(),
        };
        app.load_images();

        (app, Task::none())
    }

    fn load_images(&mut self) {
        self.status = match self.session.reload() {
            Ok(()) => self.position_status(),
            Err(e) => failure(e),
        };
    }

    /// "Image 2 / 5: b.jpg", or a hint when the folder is empty
    fn position_status(&self) -> String {
        match (self.session.current_index(), self.session.current_entry()) {
            (Some(index), Some(entry)) => format!(
                "Image {} / {}: {}",
                index + 1,
                self.session.entries().len(),
                entry.filename
            ),
            _ => format!(
                "No images found in {}",
                self.session.config().input_dir.display()
            ),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadImages => self.load_images(),
            Message::Previous => {
                self.status = match self.session.previous() {
                    Ok(Some(_)) => self.position_status(),
                    Ok(None) => return Task::none(),
                    Err(e) => failure(e),
                };
            }
            Message::Next => {
                self.status = match self.session.next() {
                    Ok(Advance::Moved {
                        exported: Some(path),
                        ..
                    }) => format!("{}  (saved {})", self.position_status(), path.display()),
                    Ok(Advance::Moved { exported: None, .. }) => self.position_status(),
                    Ok(Advance::AtLastImage) => {
                        format!("{}  (last image, nothing exported)", self.position_status())
                    }
                    Ok(Advance::NoImages) => self.position_status(),
                    Err(e) => failure(e),
                };
            }
            Message::PresetSelected(preset) => self.session.select_preset(preset),
            Message::PointerPressed(p) => self.session.pointer_down(p.x, p.y),
            Message::PointerDragged(p) => self.session.pointer_drag(p.x, p.y),
            Message::Scrolled(direction) => self.session.scroll(direction),
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let viewer: Element<Message> = match self.session.display_image() {
            Some(display) => {
                let width = Length::Fixed(display.width as f32);
                let height = Length::Fixed(display.height as f32);

                let overlay = CropCanvas {
                    rect: self.session.crop_rect(),
                    bounds: DisplayBounds::new(display.width, display.height),
                };

                // Unbounded in both directions, so the fixed sizes are honored
                // and the image stays at native resolution
                scrollable(stack![
                    Image::new(display.handle.clone())
                        .width(width)
                        .height(height)
                        .content_fit(ContentFit::Fill),
                    canvas(overlay).width(width).height(height),
                ])
                .direction(Direction::Both {
                    vertical: Scrollbar::default(),
                    horizontal: Scrollbar::default(),
                })
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
            }
            None => container(text("No image loaded").size(24)).padding(40).into(),
        };

        let controls = row![
            button("Load Images")
                .on_press(Message::LoadImages)
                .padding(10),
            button("Previous")
                .on_press(Message::Previous)
                .padding(10),
            button("Next")
                .on_press(Message::Next)
                .padding(10),
            pick_list(
                Preset::ALL,
                Some(self.session.preset()),
                Message::PresetSelected
            ),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let rect = self.session.crop_rect();
        let output = self.session.output_size();
        let crop_info = text(format!(
            "Crop {}px at ({}, {}) -> {}x{}",
            rect.side, rect.x, rect.y, output.width, output.height
        ))
        .size(14);

        column![viewer, controls, crop_info, text(&self.status).size(16)]
            .spacing(12)
            .padding(12)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Log an error and turn it into a status line
fn failure(error: impl std::fmt::Display) -> String {
    log::error!("❌ {}", error);
    format!("❌ {}", error)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Image Cropper", ImageCropper::update, ImageCropper::view)
        .theme(ImageCropper::theme)
        .window_size((1280.0, 1000.0))
        .centered()
        .run_with(ImageCropper::new)
}
