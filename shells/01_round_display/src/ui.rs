//! Developer panel for the round display simulator
//!
//! Shows the router state next to the device and offers shortcuts that a
//! real device would not have: jumping to any route, switching users, and
//! changing the lock screen time zone.

use nannou_egui::egui;
use shell_core::gesture::GestureEvent;
use shell_core::router::Router;
use shell_core::session::{Session, User};

const DIM: egui::Color32 = egui::Color32::from_rgb(140, 150, 170);
const ERROR: egui::Color32 = egui::Color32::from_rgb(255, 120, 100);

/// Result of dev panel interactions
#[derive(Default)]
pub struct DevPanelResult {
    /// Push this route
    pub navigate: Option<String>,
    pub go_back: bool,
    /// Rebuild the stack from the initial route
    pub reset: bool,
    pub login_as: Option<u32>,
    pub logout: bool,
    pub reduced_motion_changed: bool,
    /// Time zone name typed into the panel
    pub set_time_zone: Option<String>,
}

/// Draw the dev panel (bottom)
#[allow(clippy::too_many_arguments)]
pub fn draw_dev_panel(
    ctx: &egui::Context,
    panel_height: f32,
    router: &Router,
    session: &Session,
    last_event: GestureEvent,
    last_error: Option<&str>,
    reduced_motion: &mut bool,
    tz_input: &mut String,
) -> DevPanelResult {
    let mut result = DevPanelResult::default();

    egui::TopBottomPanel::bottom("dev_panel")
        .resizable(false)
        .min_height(panel_height)
        .show(ctx, |ui| {
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(router.current_route().unwrap_or("-")).strong());
                ui.label(
                    egui::RichText::new(router.stack_paths().join(" › "))
                        .size(11.0)
                        .color(DIM),
                );
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("gesture: {:?}", last_event)).size(11.0));
                if let Some(error) = last_error {
                    ui.label(egui::RichText::new(error).size(11.0).color(ERROR));
                }
            });

            ui.separator();

            ui.horizontal_wrapped(|ui| {
                for route in router.routes() {
                    let label = if route.is_protected() {
                        format!("🔒 {}", route.path())
                    } else {
                        route.path().to_string()
                    };
                    if ui.small_button(label).on_hover_text(route.name()).clicked() {
                        result.navigate = Some(route.path().to_string());
                    }
                }
            });

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(router.can_go_back(), egui::Button::new("Back (Esc)"))
                    .clicked()
                {
                    result.go_back = true;
                }
                if ui.button("Reset (R)").clicked() {
                    result.reset = true;
                }

                ui.separator();

                let current = session.current_user();
                for User { id, name } in session.users() {
                    let selected = current.as_ref().map_or(false, |u| u.id == id);
                    if ui.selectable_label(selected, name).clicked() && !selected {
                        result.login_as = Some(id);
                    }
                }
                if ui
                    .add_enabled(current.is_some(), egui::Button::new("Logout"))
                    .clicked()
                {
                    result.logout = true;
                }
            });

            ui.horizontal(|ui| {
                if ui
                    .checkbox(reduced_motion, "Reduced motion")
                    .on_hover_text("Jump dials to their new value instead of gliding")
                    .changed()
                {
                    result.reduced_motion_changed = true;
                }

                ui.separator();

                ui.label("Time zone:");
                let response = ui.add(egui::TextEdit::singleline(tz_input).desired_width(140.0));
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if submitted || ui.button("Apply").clicked() {
                    result.set_time_zone = Some(tz_input.trim().to_string());
                }
            });
        });

    result
}
