//! Placement of the simulated round display inside the window
//!
//! The device works in screen pixels (origin top-left, y down) while nannou
//! draws around the window center with y up. `DisplayFrame` converts both ways
//! and answers whether a window point lands on the glass.

use nannou::prelude::*;
use shell_core::geometry::{self, SCREEN_HEIGHT, SCREEN_RADIUS, SCREEN_WIDTH};

/// Where the display sits for the current window size
#[derive(Debug, Clone, Copy)]
pub struct DisplayFrame {
    /// Center of the display in nannou coordinates
    pub cx: f32,
    pub cy: f32,
}

impl DisplayFrame {
    /// Center the display in the area above a bottom panel
    pub fn calculate(window_rect: Rect, panel_height: f32) -> Self {
        Self {
            cx: window_rect.x(),
            cy: window_rect.y() + panel_height / 2.0,
        }
    }

    /// Window point to device screen point
    pub fn to_screen(&self, x: f32, y: f32) -> geometry::Point {
        geometry::Point::new(
            x - self.cx + SCREEN_WIDTH / 2.0,
            self.cy + SCREEN_HEIGHT / 2.0 - y,
        )
    }

    /// Device screen point to window point
    pub fn to_window(&self, point: geometry::Point) -> Point2 {
        pt2(
            self.cx - SCREEN_WIDTH / 2.0 + point.x,
            self.cy + SCREEN_HEIGHT / 2.0 - point.y,
        )
    }

    /// Whether a window point falls on the round display
    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= SCREEN_RADIUS * SCREEN_RADIUS
    }
}
