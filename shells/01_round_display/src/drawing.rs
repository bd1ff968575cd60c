//! Drawing for the round display simulator
//!
//! Pages render through [`NannouCanvas`]; this module adds the window chrome
//! around the glass.

use nannou::prelude::*;
use shell_core::geometry::{self, SCREEN_RADIUS, SCREEN_WIDTH};
use shell_core::render::{Canvas, Color};

use crate::display::DisplayFrame;

/// Window chrome colors
pub mod colors {
    use nannou::prelude::*;

    /// Desk behind the device
    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 24,
        green: 26,
        blue: 32,
        standard: std::marker::PhantomData,
    };

    /// Device glass when nothing is drawn
    pub const GLASS: Srgb<u8> = Srgb {
        red: 0,
        green: 0,
        blue: 0,
        standard: std::marker::PhantomData,
    };

    /// Bezel ring
    pub const BEZEL: Srgb<u8> = Srgb {
        red: 70,
        green: 74,
        blue: 84,
        standard: std::marker::PhantomData,
    };

    /// Touch marker
    pub const TOUCH: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
}

/// Bezel thickness around the glass
const BEZEL_WIDTH: f32 = 6.0;

pub fn to_srgb(color: Color) -> Srgb<u8> {
    rgb8(color.red, color.green, color.blue)
}

/// [`Canvas`] backed by a nannou `Draw`, in device screen coordinates
pub struct NannouCanvas<'a> {
    draw: &'a Draw,
    frame: DisplayFrame,
}

impl<'a> NannouCanvas<'a> {
    pub fn new(draw: &'a Draw, frame: DisplayFrame) -> Self {
        Self { draw, frame }
    }
}

impl Canvas for NannouCanvas<'_> {
    fn fill_circle(&mut self, center: geometry::Point, radius: f32, color: Color) {
        let p = self.frame.to_window(center);
        self.draw
            .ellipse()
            .x_y(p.x, p.y)
            .radius(radius)
            .color(to_srgb(color));
    }

    fn stroke_circle(&mut self, center: geometry::Point, radius: f32, color: Color) {
        let p = self.frame.to_window(center);
        self.draw
            .ellipse()
            .x_y(p.x, p.y)
            .radius(radius)
            .no_fill()
            .stroke(to_srgb(color))
            .stroke_weight(1.0);
    }

    fn text(&mut self, at: geometry::Point, text: &str, size: f32, color: Color) {
        let p = self.frame.to_window(at);
        self.draw
            .text(text)
            .x_y(p.x, p.y)
            .color(to_srgb(color))
            .font_size(size.round().max(1.0) as u32)
            .w(SCREEN_WIDTH);
    }
}

/// Blank glass under the page
pub fn draw_glass(draw: &Draw, frame: &DisplayFrame) {
    draw.ellipse()
        .x_y(frame.cx, frame.cy)
        .radius(SCREEN_RADIUS)
        .color(colors::GLASS);
}

/// Hide whatever the page drew past the glass edge, then draw the bezel
pub fn draw_mask_and_bezel(draw: &Draw, frame: &DisplayFrame, window_rect: Rect) {
    let reach = window_rect.w().max(window_rect.h());
    draw.ellipse()
        .x_y(frame.cx, frame.cy)
        .radius(SCREEN_RADIUS + reach / 2.0)
        .no_fill()
        .stroke(colors::BACKGROUND)
        .stroke_weight(reach);

    draw.ellipse()
        .x_y(frame.cx, frame.cy)
        .radius(SCREEN_RADIUS + BEZEL_WIDTH / 2.0)
        .no_fill()
        .stroke(colors::BEZEL)
        .stroke_weight(BEZEL_WIDTH);
}

/// Small ring under the pointer while it is pressed on the glass
pub fn draw_touch_marker(draw: &Draw, frame: &DisplayFrame, at: geometry::Point) {
    let p = frame.to_window(at);
    draw.ellipse()
        .x_y(p.x, p.y)
        .radius(10.0)
        .no_fill()
        .stroke(srgba(colors::TOUCH.red, colors::TOUCH.green, colors::TOUCH.blue, 120u8))
        .stroke_weight(2.0);
}
