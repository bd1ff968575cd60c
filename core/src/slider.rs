//! Angular (dial) slider
//!
//! A value picker laid out on an annulus. The active arc covers 270° of the
//! dial starting at `start_angle` and running clockwise; the remaining 90°
//! is a dead gap. Touches in the gap snap to the maximum once they are more
//! than 45° past the end of the arc, and to the minimum otherwise.

use crate::geometry::{self, Point};
use crate::render::{colors, Canvas, Color};

/// Angular span that carries value
pub const ACTIVE_SWEEP: f32 = 270.0;
/// Default start of the active arc (dial degrees)
pub const DEFAULT_START_ANGLE: f32 = 135.0;
/// Fraction of the remaining distance covered per tick while animating
pub const DAMPING: f32 = 0.2;
/// Remaining distance below which the animation snaps to its target
pub const SNAP_EPSILON: f32 = 0.1;

/// Angular distance between arc dots when rendering
const ARC_STEP_DEG: f32 = 2.0;
const KNOB_RADIUS: f32 = 8.0;

/// What the slider controls; drives the default label, color and value format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderMode {
    Volume,
    Brightness,
    Duration,
    Hue,
    Temperature,
    #[default]
    Generic,
}

impl SliderMode {
    pub fn label(&self) -> &'static str {
        match self {
            SliderMode::Volume => "Volume",
            SliderMode::Brightness => "Brightness",
            SliderMode::Duration => "Duration",
            SliderMode::Hue => "Hue",
            SliderMode::Temperature => "Temperature",
            SliderMode::Generic => "",
        }
    }

    pub fn active_color(&self) -> Color {
        match self {
            SliderMode::Volume => colors::SUCCESS,
            SliderMode::Brightness => colors::WARNING,
            SliderMode::Duration => colors::CYAN,
            SliderMode::Hue => colors::MAGENTA,
            SliderMode::Temperature => colors::ACCENT,
            SliderMode::Generic => colors::CYAN,
        }
    }

    /// Human readable value, e.g. "42%" or "3:07"
    pub fn format_value(&self, value: f32) -> String {
        match self {
            SliderMode::Volume | SliderMode::Brightness => format!("{}%", value as i32),
            SliderMode::Duration => {
                let total = value.max(0.0) as u32;
                format!("{}:{:02}", total / 60, total % 60)
            }
            SliderMode::Hue => format!("{}°", value as i32),
            SliderMode::Temperature => format!("{:.1}°C", value),
            SliderMode::Generic => format!("{}", value as i32),
        }
    }
}

/// Callback fired with the new value on every dragging tick
pub type ValueChanged = Box<dyn FnMut(f32)>;

/// Dial slider bound to an annulus around `center`
pub struct AngularSlider {
    center: Point,
    outer_radius: f32,
    inner_radius: f32,
    start_angle: f32,

    value: f32,
    min: f32,
    max: f32,
    target: f32,
    /// Dial angle of `value`
    angle: f32,

    mode: SliderMode,
    label: String,
    active_color: Color,
    inactive_color: Color,
    text_color: Color,

    enabled: bool,
    is_dragging: bool,
    on_value_changed: Option<ValueChanged>,
}

impl std::fmt::Debug for AngularSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AngularSlider")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("target", &self.target)
            .field("angle", &self.angle)
            .field("is_dragging", &self.is_dragging)
            .finish_non_exhaustive()
    }
}

impl AngularSlider {
    /// Slider with range [0, 100] starting at 0
    pub fn new(center: Point, outer_radius: f32, inner_radius: f32) -> Self {
        let (inner_radius, outer_radius) = if inner_radius <= outer_radius {
            (inner_radius, outer_radius)
        } else {
            (outer_radius, inner_radius)
        };
        Self {
            center,
            outer_radius,
            inner_radius,
            start_angle: DEFAULT_START_ANGLE,
            value: 0.0,
            min: 0.0,
            max: 100.0,
            target: 0.0,
            angle: DEFAULT_START_ANGLE,
            mode: SliderMode::Generic,
            label: String::new(),
            active_color: colors::CYAN,
            inactive_color: colors::DARK_GREY,
            text_color: colors::TEXT,
            enabled: true,
            is_dragging: false,
            on_value_changed: None,
        }
    }

    /// Rotate the active arc so it begins at `start_angle`
    pub fn with_start_angle(mut self, start_angle: f32) -> Self {
        self.start_angle = geometry::normalize_degrees(start_angle);
        self.sync_angle();
        self
    }

    pub fn with_mode(mut self, mode: SliderMode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Dial angle (0° up, clockwise) of the current value
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Dial angle where the active arc ends
    pub fn end_angle(&self) -> f32 {
        geometry::normalize_degrees(self.start_angle + ACTIVE_SWEEP)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> SliderMode {
        self.mode
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Change the bounds, pulling the value back inside them
    pub fn set_range(&mut self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        log::debug!("slider '{}' range {}..={}", self.label, min, max);
        self.min = min;
        self.max = max;
        self.value = self.value.clamp(min, max);
        self.target = self.target.clamp(min, max);
        self.sync_angle();
    }

    /// Jump straight to `value` (clamped), no animation
    pub fn set_value(&mut self, value: f32) {
        let value = value.clamp(self.min, self.max);
        self.value = value;
        self.target = value;
        self.sync_angle();
    }

    /// Glide towards `value` (clamped) over the following ticks
    pub fn animate_to(&mut self, value: f32) {
        self.target = value.clamp(self.min, self.max);
    }

    pub fn set_mode(&mut self, mode: SliderMode) {
        self.mode = mode;
        self.active_color = mode.active_color();
        self.label = mode.label().to_string();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_colors(&mut self, active: Color, inactive: Color, text: Color) {
        self.active_color = active;
        self.inactive_color = inactive;
        self.text_color = text;
    }

    pub fn set_on_value_changed(&mut self, callback: impl FnMut(f32) + 'static) {
        self.on_value_changed = Some(Box::new(callback));
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.is_dragging = false;
        }
    }

    /// Pure annulus test, independent of the arc
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dist = geometry::distance(self.center, Point::new(x, y));
        dist >= self.inner_radius && dist <= self.outer_radius
    }

    /// Feed the raw touch for this tick
    ///
    /// Touches outside the annulus are ignored. While the touch stays on the
    /// band the value follows it and the change callback fires once.
    pub fn update(&mut self, touch: &crate::gesture::TouchSample) {
        if !self.enabled {
            return;
        }

        let point = touch.point();
        if touch.pressed && self.contains(point.x, point.y) {
            self.is_dragging = true;
            let relative = self.relative_angle_for(point);
            self.value = self.value_for_relative(relative);
            self.target = self.value;
            self.sync_angle();

            let value = self.value;
            if let Some(callback) = self.on_value_changed.as_mut() {
                callback(value);
            }
        } else if self.is_dragging && !touch.pressed {
            self.is_dragging = false;
        }

        self.step_animation();
    }

    /// Move the value one tick closer to the target
    fn step_animation(&mut self) {
        if self.value == self.target {
            return;
        }
        let diff = self.target - self.value;
        if diff.abs() < SNAP_EPSILON {
            self.value = self.target;
        } else {
            self.value += diff * DAMPING;
        }
        self.sync_angle();
    }

    /// Position on the active arc in [0, 270] for a touch point
    fn relative_angle_for(&self, point: Point) -> f32 {
        let raw = geometry::dial_angle(self.center, point);
        let relative = geometry::clockwise_delta(self.start_angle, raw);
        if relative <= ACTIVE_SWEEP {
            return relative;
        }
        let gap_middle = ACTIVE_SWEEP + (360.0 - ACTIVE_SWEEP) / 2.0;
        if relative > gap_middle {
            ACTIVE_SWEEP
        } else {
            0.0
        }
    }

    fn value_for_relative(&self, relative: f32) -> f32 {
        let fraction = (relative / ACTIVE_SWEEP).clamp(0.0, 1.0);
        (self.min + fraction * (self.max - self.min)).clamp(self.min, self.max)
    }

    fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            0.0
        } else {
            ((self.value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    fn sync_angle(&mut self) {
        let swept = self.normalized() * ACTIVE_SWEEP;
        self.angle = geometry::normalize_degrees(self.start_angle + swept);
    }

    /// Draw the arc, the value readout and, while dragging, the knob
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let thickness = self.outer_radius - self.inner_radius;
        let band_radius = self.inner_radius + thickness / 2.0;
        let dot_radius = (thickness / 2.0).max(1.0);

        self.draw_arc(canvas, band_radius, dot_radius, ACTIVE_SWEEP, self.inactive_color);
        if self.value > self.min {
            self.draw_arc(
                canvas,
                band_radius,
                dot_radius,
                self.normalized() * ACTIVE_SWEEP,
                self.active_color,
            );
        }

        canvas.text(self.center, &self.mode.format_value(self.value), 28.0, self.text_color);
        if !self.label.is_empty() {
            canvas.text(self.center.offset(0.0, 24.0), &self.label, 14.0, self.inactive_color);
        }

        if self.is_dragging {
            let knob = geometry::point_on_dial(self.center, self.outer_radius, self.angle);
            canvas.fill_circle(knob, KNOB_RADIUS, self.active_color);
            canvas.stroke_circle(knob, KNOB_RADIUS, colors::TEXT);
        }
    }

    fn draw_arc(&self, canvas: &mut dyn Canvas, radius: f32, dot: f32, sweep: f32, color: Color) {
        let segments = ((sweep / ARC_STEP_DEG) as usize).max(1);
        for i in 0..=segments {
            let angle = self.start_angle + sweep * i as f32 / segments as f32;
            canvas.fill_circle(geometry::point_on_dial(self.center, radius, angle), dot, color);
        }
    }
}
