//! Geometry for the round display
//!
//! Screen coordinates throughout: origin top-left, y grows downward. Dial
//! angles are in degrees with 0° pointing up and increasing clockwise.

use serde::{Deserialize, Serialize};

/// Reference display width in pixels
pub const SCREEN_WIDTH: f32 = 360.0;
/// Reference display height in pixels
pub const SCREEN_HEIGHT: f32 = 360.0;
/// Radius of the visible disc
pub const SCREEN_RADIUS: f32 = 180.0;
/// Center of the visible disc
pub const SCREEN_CENTER: Point = Point { x: 180.0, y: 180.0 };

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f32 {
        distance(self, other)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Wrap an angle in degrees into [0, 360)
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Dial angle of `point` seen from `center`
pub fn dial_angle(center: Point, point: Point) -> f32 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    // atan2 in screen space is 0° = right, 90° = down; shift so 0° = up
    normalize_degrees(dy.atan2(dx).to_degrees() + 90.0)
}

/// Point at `radius` from `center` along the dial angle `angle_deg`
pub fn point_on_dial(center: Point, radius: f32, angle_deg: f32) -> Point {
    let theta = (angle_deg - 90.0).to_radians();
    Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

/// Clockwise distance in degrees going from `from` to `to`
pub fn clockwise_delta(from: f32, to: f32) -> f32 {
    normalize_degrees(to - from)
}

/// Whether a point lies on the visible disc of the reference display
pub fn is_inside_display(point: Point) -> bool {
    distance(SCREEN_CENTER, point) <= SCREEN_RADIUS
}

/// Visible rectangle a widget draws into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a circle, grown by `margin`, overlaps the viewport rectangle
    pub fn intersects_circle(&self, center: Point, radius: f32, margin: f32) -> bool {
        let reach = radius + margin;
        center.x >= -reach
            && center.x < self.width + reach
            && center.y >= -reach
            && center.y < self.height + reach
    }
}
