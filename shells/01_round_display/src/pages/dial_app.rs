//! Single-dial app screen (volume, brightness, ...)

use std::cell::Cell;
use std::rc::Rc;

use shell_core::geometry::SCREEN_CENTER;
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::{colors, Canvas};
use shell_core::slider::{AngularSlider, SliderMode};

use super::{draw_border, draw_hint, draw_title};

const OUTER_RADIUS: f32 = 150.0;
const INNER_RADIUS: f32 = 120.0;

pub struct DialAppPage {
    title: &'static str,
    slider: AngularSlider,
    level: Rc<Cell<f32>>,
    default_level: f32,
    reduced_motion: Rc<Cell<bool>>,
    was_pressed: bool,
    /// The current touch moved the dial at some point
    adjusting: bool,
}

impl DialAppPage {
    pub fn new(
        title: &'static str,
        mode: SliderMode,
        level: Rc<Cell<f32>>,
        default_level: f32,
        reduced_motion: Rc<Cell<bool>>,
    ) -> Self {
        let mut slider =
            AngularSlider::new(SCREEN_CENTER, OUTER_RADIUS, INNER_RADIUS).with_mode(mode);
        slider.set_range(0.0, 100.0);
        slider.set_value(level.get());

        let sink = Rc::clone(&level);
        slider.set_on_value_changed(move |value| sink.set(value));

        Self {
            title,
            slider,
            level,
            default_level,
            reduced_motion,
            was_pressed: false,
            adjusting: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.slider.value()
    }

    fn reset_level(&mut self) {
        if self.reduced_motion.get() {
            self.slider.set_value(self.default_level);
        } else {
            self.slider.animate_to(self.default_level);
        }
    }
}

impl Page for DialAppPage {
    fn name(&self) -> &str {
        self.title
    }

    fn on_enter(&mut self) {
        self.slider.set_value(self.level.get());
    }

    fn on_exit(&mut self) {
        self.level.set(self.slider.value());
    }

    fn update(&mut self, touch: &TouchSample) -> PageAction {
        if touch.pressed && !self.was_pressed {
            self.adjusting = false;
        }
        self.was_pressed = touch.pressed;

        self.slider.update(touch);
        if self.slider.is_dragging() {
            self.adjusting = true;
        }
        PageAction::None
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        draw_border(canvas, colors::DARK_GREY);
        draw_title(canvas, self.title);
        self.slider.render(canvas);
        draw_hint(canvas, "Double tap: reset • Swipe down: back");
    }

    fn handle_touch(&mut self, event: GestureEvent, _touch: &TouchSample) -> PageAction {
        match event {
            GestureEvent::DoubleTap => {
                self.reset_level();
                PageAction::None
            }
            GestureEvent::SwipeDown if !self.adjusting => PageAction::back(),
            _ => PageAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{gesture, press_at, release_at};
    use super::*;
    use shell_core::geometry;

    fn page(reduced_motion: bool) -> (DialAppPage, Rc<Cell<f32>>) {
        let level = Rc::new(Cell::new(30.0));
        let page = DialAppPage::new(
            "SPOTIFY",
            SliderMode::Volume,
            Rc::clone(&level),
            50.0,
            Rc::new(Cell::new(reduced_motion)),
        );
        (page, level)
    }

    fn on_band(angle: f32) -> TouchSample {
        let p = geometry::point_on_dial(SCREEN_CENTER, 135.0, angle);
        press_at(p.x.round() as i32, p.y.round() as i32)
    }

    #[test]
    fn test_starts_from_shared_level() {
        let (page, _) = page(false);
        assert_eq!(page.value(), 30.0);
    }

    #[test]
    fn test_dragging_updates_shared_level() {
        let (mut page, level) = page(false);
        page.update(&on_band(270.0));
        assert!((level.get() - 50.0).abs() < 0.5);
        page.update(&release_at(0, 0));
    }

    #[test]
    fn test_double_tap_glides_to_default() {
        let (mut page, _) = page(false);
        gesture(&mut page, GestureEvent::DoubleTap);
        page.update(&release_at(0, 0));
        assert!(page.value() > 30.0 && page.value() < 50.0);
        for _ in 0..80 {
            page.update(&release_at(0, 0));
        }
        assert_eq!(page.value(), 50.0);
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let (mut page, _) = page(true);
        gesture(&mut page, GestureEvent::DoubleTap);
        assert_eq!(page.value(), 50.0);
    }

    #[test]
    fn test_swipe_down_ignored_after_dial_drag() {
        let (mut page, _) = page(false);
        page.update(&on_band(200.0));
        page.update(&on_band(180.0));
        page.update(&release_at(180, 330));
        assert_eq!(gesture(&mut page, GestureEvent::SwipeDown), PageAction::None);

        page.update(&press_at(180, 180));
        page.update(&release_at(180, 260));
        assert_eq!(gesture(&mut page, GestureEvent::SwipeDown), PageAction::Back);
    }

    #[test]
    fn test_exit_stores_level() {
        let (mut page, level) = page(true);
        gesture(&mut page, GestureEvent::DoubleTap);
        page.on_exit();
        assert_eq!(level.get(), 50.0);
    }
}
