//! Gesture classification
//!
//! Turns the per-tick stream of raw touch samples into discrete gestures.
//! One sample in, at most one event out.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};

/// One raw touch reading, supplied once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
    pub pressed: bool,
    pub at: Instant,
}

impl TouchSample {
    pub fn new(x: i32, y: i32, pressed: bool, at: Instant) -> Self {
        Self { x, y, pressed, at }
    }

    pub fn pressed(x: i32, y: i32, at: Instant) -> Self {
        Self::new(x, y, true, at)
    }

    /// Sample for a tick with no contact
    pub fn released(at: Instant) -> Self {
        Self::new(0, 0, false, at)
    }

    pub fn point(&self) -> Point {
        Point::from((self.x, self.y))
    }
}

/// Classified touch interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureEvent {
    #[default]
    None,
    Tap,
    DoubleTap,
    LongPress,
    DragStart,
    DragMove,
    DragEnd,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
}

impl GestureEvent {
    pub fn is_none(&self) -> bool {
        matches!(self, GestureEvent::None)
    }

    pub fn is_swipe(&self) -> bool {
        matches!(
            self,
            GestureEvent::SwipeUp
                | GestureEvent::SwipeDown
                | GestureEvent::SwipeLeft
                | GestureEvent::SwipeRight
        )
    }

    /// Whether the event finishes a touch that may have been a drag
    pub fn ends_drag(&self) -> bool {
        *self == GestureEvent::DragEnd || self.is_swipe()
    }
}

/// Time and distance limits for classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Longest press that still counts as a tap
    pub tap_max_ms: u64,
    /// Hold time before a stationary press becomes a long press
    pub long_press_ms: u64,
    /// Movement (per axis, px) that turns a press into a drag
    pub drag_threshold: i32,
    /// Dominant-axis displacement (px) for a swipe
    pub swipe_threshold: i32,
    /// Longest gesture that may still end as a swipe
    pub swipe_max_ms: u64,
    /// Window between two taps for a double tap
    pub double_tap_ms: u64,
    /// Distance (px) between two taps for a double tap
    pub double_tap_radius: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_max_ms: 300,
            long_press_ms: 800,
            drag_threshold: 10,
            swipe_threshold: 50,
            swipe_max_ms: 500,
            double_tap_ms: 300,
            double_tap_radius: 20.0,
        }
    }
}

/// Stateful sample-to-gesture classifier
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    current: Option<TouchSample>,
    /// Last sample seen while pressed
    last_pressed: Option<TouchSample>,
    touch_start: Option<TouchSample>,
    is_dragging: bool,
    long_press_fired: bool,
    /// Position and release time of a tap that could still become a double tap
    pending_tap: Option<(Point, Instant)>,
    last_event: GestureEvent,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            current: None,
            last_pressed: None,
            touch_start: None,
            is_dragging: false,
            long_press_fired: false,
            pending_tap: None,
            last_event: GestureEvent::None,
        }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: GestureThresholds) {
        self.thresholds = thresholds;
    }

    /// Event produced by the most recent [`update`](Self::update)
    pub fn last_event(&self) -> GestureEvent {
        self.last_event
    }

    /// Most recent sample, pressed or not
    pub fn current_touch(&self) -> Option<TouchSample> {
        self.current
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether `(x, y)` falls on the round display
    pub fn is_inside_circle(&self, x: i32, y: i32) -> bool {
        geometry::is_inside_display(Point::new(x as f32, y as f32))
    }

    /// Consume one sample and classify it
    pub fn update(&mut self, sample: TouchSample) -> GestureEvent {
        let was_pressed = self.current.map_or(false, |s| s.pressed);
        self.current = Some(sample);

        let event = match (sample.pressed, was_pressed) {
            (true, false) => {
                self.begin_touch(sample);
                GestureEvent::None
            }
            (true, true) => self.continue_touch(sample),
            (false, true) => self.end_touch(sample.at),
            (false, false) => GestureEvent::None,
        };

        if sample.pressed {
            self.last_pressed = Some(sample);
        }
        if !event.is_none() {
            log::debug!("gesture {:?} at ({}, {})", event, sample.x, sample.y);
        }
        self.last_event = event;
        event
    }

    fn begin_touch(&mut self, sample: TouchSample) {
        self.touch_start = Some(sample);
        self.is_dragging = false;
        self.long_press_fired = false;
    }

    fn continue_touch(&mut self, sample: TouchSample) -> GestureEvent {
        let Some(start) = self.touch_start else {
            self.begin_touch(sample);
            return GestureEvent::None;
        };

        let dx = (sample.x - start.x).abs();
        let dy = (sample.y - start.y).abs();
        let elapsed = sample.at.saturating_duration_since(start.at);
        let limit = self.thresholds.drag_threshold;

        if !self.is_dragging
            && !self.long_press_fired
            && elapsed > Duration::from_millis(self.thresholds.long_press_ms)
            && dx < limit
            && dy < limit
        {
            self.long_press_fired = true;
            return GestureEvent::LongPress;
        }

        if dx > limit || dy > limit {
            if self.is_dragging {
                return GestureEvent::DragMove;
            }
            self.is_dragging = true;
            return GestureEvent::DragStart;
        }

        GestureEvent::None
    }

    fn end_touch(&mut self, released_at: Instant) -> GestureEvent {
        let event = match (self.touch_start, self.last_pressed) {
            (Some(start), Some(last)) => self.classify_release(start, last, released_at),
            _ => GestureEvent::None,
        };
        self.is_dragging = false;
        self.touch_start = None;
        event
    }

    fn classify_release(
        &mut self,
        start: TouchSample,
        last: TouchSample,
        released_at: Instant,
    ) -> GestureEvent {
        let elapsed = released_at.saturating_duration_since(start.at);
        let dx = last.x - start.x;
        let dy = last.y - start.y;

        if elapsed <= Duration::from_millis(self.thresholds.swipe_max_ms) {
            if let Some(swipe) = swipe_direction(dx, dy, self.thresholds.swipe_threshold) {
                self.pending_tap = None;
                return swipe;
            }
        }

        if self.is_dragging {
            return GestureEvent::DragEnd;
        }

        if !self.long_press_fired && elapsed < Duration::from_millis(self.thresholds.tap_max_ms) {
            let here = last.point();
            let window = Duration::from_millis(self.thresholds.double_tap_ms);
            let is_double = self.pending_tap.map_or(false, |(at_point, at_time)| {
                released_at.saturating_duration_since(at_time) <= window
                    && geometry::distance(at_point, here) <= self.thresholds.double_tap_radius
            });
            if is_double {
                self.pending_tap = None;
                return GestureEvent::DoubleTap;
            }
            self.pending_tap = Some((here, released_at));
            return GestureEvent::Tap;
        }

        GestureEvent::None
    }
}

/// Swipe along the dominant axis, ties going horizontal
fn swipe_direction(dx: i32, dy: i32, threshold: i32) -> Option<GestureEvent> {
    if dx.abs() >= dy.abs() {
        if dx.abs() <= threshold {
            return None;
        }
        Some(if dx > 0 {
            GestureEvent::SwipeRight
        } else {
            GestureEvent::SwipeLeft
        })
    } else {
        if dy.abs() <= threshold {
            return None;
        }
        Some(if dy > 0 {
            GestureEvent::SwipeDown
        } else {
            GestureEvent::SwipeUp
        })
    }
}
