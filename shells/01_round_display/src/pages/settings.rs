//! Settings categories, plus lock and logout shortcuts

use shell_core::geometry::{Point, SCREEN_CENTER, SCREEN_HEIGHT};
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::{colors, Canvas, Color};
use shell_core::session::Session;
use shell_core::spiral_grid::{GridGeometry, GridItem, ItemStyle, SpiralGrid};

use super::{draw_border, draw_hint, draw_title, GridPan};

/// What tapping a settings tile asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Open(&'static str),
    Lock,
    Logout,
}

const CATEGORIES: [(&str, Color); 7] = [
    ("Display", colors::BORDER),
    ("Audio", colors::PURPLE),
    ("Network", colors::DARK_GREEN),
    ("Power", colors::ACCENT),
    ("Apps", colors::CYAN),
    ("User", colors::MAGENTA),
    ("About", colors::DARK_GREY),
];

pub struct SettingsPage {
    session: Session,
    grid: SpiralGrid<SettingsCommand>,
    pan: GridPan,
    submenu: Option<&'static str>,
}

impl SettingsPage {
    pub fn new(session: Session, geometry: GridGeometry) -> Self {
        let mut grid = SpiralGrid::new(SCREEN_CENTER, geometry);
        for (label, fill) in CATEGORIES {
            grid.add_item(
                GridItem::new(label)
                    .with_style(ItemStyle::filled(fill))
                    .on_tap(move || SettingsCommand::Open(label)),
            );
        }
        grid.add_item(
            GridItem::new("Lock")
                .with_style(ItemStyle::filled(colors::DARK_BLUE))
                .on_tap(|| SettingsCommand::Lock),
        );
        grid.add_item(
            GridItem::new("Logout")
                .with_style(ItemStyle::filled(colors::ERROR))
                .on_tap(|| SettingsCommand::Logout),
        );
        Self {
            session,
            grid,
            pan: GridPan::default(),
            submenu: None,
        }
    }

    pub fn submenu(&self) -> Option<&'static str> {
        self.submenu
    }

    fn run(&mut self, command: SettingsCommand) -> PageAction {
        match command {
            SettingsCommand::Open(category) => {
                log::debug!("settings submenu {}", category);
                self.submenu = Some(category);
                PageAction::None
            }
            SettingsCommand::Lock => PageAction::navigate_clear("/lock"),
            SettingsCommand::Logout => {
                self.session.logout();
                PageAction::navigate_clear("/login")
            }
        }
    }
}

impl Page for SettingsPage {
    fn name(&self) -> &str {
        "settings"
    }

    fn on_enter(&mut self) {
        self.submenu = None;
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        if let Some(category) = self.submenu {
            draw_border(canvas, colors::DARK_GREY);
            canvas.text(SCREEN_CENTER.offset(0.0, -20.0), category, 20.0, colors::TEXT);
            canvas.text(SCREEN_CENTER.offset(0.0, 20.0), "(Coming soon)", 14.0, colors::TEXT_DIM);
            draw_hint(canvas, "Tap to return");
            return;
        }

        self.grid.render(canvas);
        draw_border(canvas, colors::DARK_GREY);
        draw_title(canvas, "SETTINGS");
        if let Some(user) = self.session.current_user() {
            canvas.text(
                Point::new(SCREEN_CENTER.x, SCREEN_HEIGHT - 24.0),
                &user.name,
                12.0,
                colors::TEXT_LIGHT,
            );
        }
    }

    fn handle_touch(&mut self, event: GestureEvent, touch: &TouchSample) -> PageAction {
        if self.submenu.is_some() {
            if matches!(event, GestureEvent::Tap | GestureEvent::SwipeDown) {
                self.submenu = None;
            }
            return PageAction::None;
        }

        let command = self.pan.drive(&mut self.grid, event, touch);
        if event == GestureEvent::SwipeDown {
            return PageAction::back();
        }
        match command {
            Some(command) => self.run(command),
            None => PageAction::None,
        }
    }
}
