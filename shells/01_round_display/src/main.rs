//! Round Display
//!
//! Desktop simulator for a 360×360 round touch display. The mouse (or a touch
//! screen) stands in for the device digitizer: every frame one touch sample
//! goes through the gesture classifier, and the router hands the result to
//! the page on top of its stack. A developer panel below the glass shows the
//! navigation stack and offers shortcuts.

mod display;
mod drawing;
mod pages;
mod ui;

use std::rc::Rc;
use std::time::Instant;

use chrono_tz::Tz;
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use shell_core::geometry;
use shell_core::gesture::{GestureClassifier, GestureEvent, GestureThresholds, TouchSample};
use shell_core::router::{NavigationError, Router, DEFAULT_INITIAL_PATH};
use shell_core::session::Session;
use shell_core::spiral_grid::GridGeometry;

use crate::display::DisplayFrame;
use crate::drawing::NannouCanvas;
use crate::pages::ShellContext;

const PROFILE: &str = "round_display";
const DEFAULT_TZ: &str = "UTC";
const DEV_PANEL_HEIGHT: f32 = 160.0;
const WINDOW_WIDTH: u32 = 360;
const WINDOW_HEIGHT: u32 = 520;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ShellConfig {
    initial_route: String,
    time_zone: String,
    gestures: GestureThresholds,
    grid: GridGeometry,
    reduced_motion: bool,
    show_dev_panel: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            initial_route: DEFAULT_INITIAL_PATH.to_string(),
            time_zone: DEFAULT_TZ.to_string(),
            gestures: GestureThresholds::default(),
            grid: GridGeometry::default(),
            reduced_motion: false,
            show_dev_panel: true,
        }
    }
}

/// Application state
pub struct Model {
    router: Router,
    /// Services shared with the pages
    ctx: ShellContext,
    classifier: GestureClassifier,

    /// Last pointer position in display coordinates
    pointer: geometry::Point,
    /// A press that started on the glass is in progress
    pointer_down: bool,

    /// Most recent non-empty gesture
    last_event: GestureEvent,
    last_error: Option<String>,

    /// Dev panel state
    show_dev_panel: bool,
    tz_input: String,

    config: ShellConfig,

    /// egui integration
    egui: Egui,
}

impl Model {
    fn report(&mut self, error: NavigationError) {
        log::warn!("navigation failed: {}", error);
        self.last_error = Some(error.to_string());
    }

    fn panel_height(&self) -> f32 {
        if self.show_dev_panel {
            DEV_PANEL_HEIGHT
        } else {
            0.0
        }
    }

    fn frame(&self, window_rect: Rect) -> DisplayFrame {
        DisplayFrame::calculate(window_rect, self.panel_height())
    }

    fn navigate(&mut self, path: &str) {
        match self.router.navigate_to(path, false) {
            Ok(nav) => {
                log::info!("dev panel: {}", nav.path());
                self.last_error = None;
            }
            Err(e) => self.report(e),
        }
    }

    fn go_back(&mut self) {
        if let Err(e) = self.router.go_back() {
            self.report(e);
        }
    }

    fn reset(&mut self) {
        match self.router.reset() {
            Ok(_) => self.last_error = None,
            Err(e) => self.report(e),
        }
    }

    fn set_time_zone(&mut self, name: &str) {
        match name.parse::<Tz>() {
            Ok(tz) => {
                self.ctx.time_zone.set(tz);
                self.config.time_zone = tz.name().to_string();
                self.tz_input = self.config.time_zone.clone();
                self.last_error = None;
                save_config(self);
            }
            Err(_) => {
                log::warn!("unknown time zone {:?}", name);
                self.last_error = Some(format!("Unknown time zone: {}", name));
                self.tz_input = self.config.time_zone.clone();
            }
        }
    }

    fn touch_started(&mut self, window_rect: Rect, x: f32, y: f32) {
        let frame = self.frame(window_rect);
        if frame.hit_test(x, y) {
            self.pointer = frame.to_screen(x, y);
            self.pointer_down = true;
        }
    }

    fn touch_moved(&mut self, window_rect: Rect, x: f32, y: f32) {
        if self.pointer_down {
            self.pointer = self.frame(window_rect).to_screen(x, y);
        }
    }

    fn touch_ended(&mut self) {
        self.pointer_down = false;
    }

    /// The sample the digitizer would report this frame
    fn sample(&self, at: Instant) -> TouchSample {
        TouchSample::new(
            self.pointer.x.round() as i32,
            self.pointer.y.round() as i32,
            self.pointer_down,
            at,
        )
    }
}

fn save_config(model: &Model) {
    let config = ShellConfig {
        reduced_motion: model.ctx.reduced_motion.get(),
        show_dev_panel: model.show_dev_panel,
        ..model.config.clone()
    };
    if let Err(e) = shell_core::save_config(PROFILE, &config) {
        log::warn!("failed to save config: {}", e);
    }
}

fn model(app: &App) -> Model {
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Round Display")
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .min_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let mut config: ShellConfig = match shell_core::load_config(PROFILE) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("failed to load config, using defaults: {}", e);
            ShellConfig::default()
        }
    };

    let time_zone: Tz = config.time_zone.parse().unwrap_or_else(|_| {
        log::warn!("unknown time zone {:?}, using UTC", config.time_zone);
        chrono_tz::UTC
    });
    config.time_zone = time_zone.name().to_string();

    let session = Session::with_users(pages::demo_users());
    let ctx = ShellContext::new(session.clone(), config.grid, time_zone, config.reduced_motion);

    let mut router = Router::new(Rc::new(session)).with_initial_path(config.initial_route.clone());
    pages::register_routes(&mut router, &ctx);

    let last_error = pages::start(&mut router).err().map(|e| e.to_string());

    Model {
        router,
        ctx,
        classifier: GestureClassifier::new(config.gestures),
        pointer: geometry::SCREEN_CENTER,
        pointer_down: false,
        last_event: GestureEvent::None,
        last_error,
        show_dev_panel: config.show_dev_panel,
        tz_input: time_zone.name().to_string(),
        config,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let sample = model.sample(Instant::now());
    let event = model.classifier.update(sample);

    if let Err(e) = model.router.update(&sample) {
        model.report(e);
    }
    if !event.is_none() {
        model.last_event = event;
        if let Err(e) = model.router.handle_touch(event, &sample) {
            model.report(e);
        }
    }

    if !model.show_dev_panel {
        return;
    }

    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let mut reduced_motion = model.ctx.reduced_motion.get();
    let ui_result = ui::draw_dev_panel(
        &ctx,
        DEV_PANEL_HEIGHT,
        &model.router,
        &model.ctx.session,
        model.last_event,
        model.last_error.as_deref(),
        &mut reduced_motion,
        &mut model.tz_input,
    );

    drop(ctx);

    if let Some(path) = ui_result.navigate {
        model.navigate(&path);
    }
    if ui_result.go_back {
        model.go_back();
    }
    if let Some(id) = ui_result.login_as {
        if model.ctx.session.login(id) {
            log::info!("dev panel: logged in as user {}", id);
        }
    }
    if ui_result.logout {
        model.ctx.session.logout();
    }
    if ui_result.reset {
        model.reset();
    }
    if ui_result.reduced_motion_changed {
        model.ctx.reduced_motion.set(reduced_motion);
        save_config(model);
    }
    if let Some(name) = ui_result.set_time_zone {
        model.set_time_zone(&name);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let display = model.frame(window_rect);

    draw.background().color(drawing::colors::BACKGROUND);

    drawing::draw_glass(&draw, &display);
    let mut canvas = NannouCanvas::new(&draw, display);
    model.router.render(&mut canvas);
    if model.pointer_down {
        drawing::draw_touch_marker(&draw, &display, model.pointer);
    }
    drawing::draw_mask_and_bezel(&draw, &display, window_rect);

    draw.to_frame(app, &frame).unwrap();

    if model.show_dev_panel {
        model.egui.draw_to_frame(&frame).unwrap();
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // D - toggle the dev panel
        Key::D => {
            model.show_dev_panel = !model.show_dev_panel;
            save_config(model);
        }

        // Escape/Backspace - back
        Key::Escape | Key::Back => model.go_back(),

        // R - start over from the initial route
        Key::R => model.reset(),

        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        let pos = app.mouse.position();
        model.touch_started(app.window_rect(), pos.x, pos.y);
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.touch_ended();
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    model.touch_moved(app.window_rect(), pos.x, pos.y);
}

fn raw_window_event(app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    if model.show_dev_panel {
        model.egui.handle_raw_event(event);
    }

    if let nannou::winit::event::WindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();

        // Convert touch position to nannou coordinates
        let pos_x = touch.location.x as f32 - window_rect.w() / 2.0;
        let pos_y = window_rect.h() / 2.0 - touch.location.y as f32;

        match touch.phase {
            nannou::winit::event::TouchPhase::Started => {
                model.touch_started(window_rect, pos_x, pos_y);
            }
            nannou::winit::event::TouchPhase::Moved => {
                model.touch_moved(window_rect, pos_x, pos_y);
            }
            nannou::winit::event::TouchPhase::Ended | nannou::winit::event::TouchPhase::Cancelled => {
                model.touch_ended();
            }
        }
    }
}
