//! Render surface abstraction
//!
//! Widgets and pages draw through [`Canvas`]; the display backend decides how
//! circles and text reach the pixels.

use crate::geometry::Point;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Shell color palette
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
    pub const BORDER: Color = Color::rgb(0, 0, 255);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const TEXT_DIM: Color = Color::rgb(128, 128, 128);
    pub const TEXT_LIGHT: Color = Color::rgb(200, 200, 200);
    pub const ACCENT: Color = Color::rgb(255, 165, 0);
    pub const SUCCESS: Color = Color::rgb(0, 255, 0);
    pub const WARNING: Color = Color::rgb(255, 255, 0);
    pub const ERROR: Color = Color::rgb(255, 0, 0);

    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const DARK_GREY: Color = Color::rgb(64, 64, 64);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 128);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
}

/// Drawing primitives a display backend must provide
pub trait Canvas {
    /// Solid disc
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// One-pixel circle outline
    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Text centered on `at`
    fn text(&mut self, at: Point, text: &str, size: f32, color: Color);
}

/// A primitive captured by [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillCircle { center: Point, radius: f32, color: Color },
    StrokeCircle { center: Point, radius: f32, color: Color },
    Text { at: Point, text: String, size: f32, color: Color },
}

/// Canvas that records every call, for headless rendering checks
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text strings drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, color });
    }

    fn text(&mut self, at: Point, text: &str, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            size,
            color,
        });
    }
}
