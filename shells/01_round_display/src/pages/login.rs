//! User picker shown before anything protected

use shell_core::geometry::SCREEN_CENTER;
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::{colors, Canvas};
use shell_core::session::Session;
use shell_core::spiral_grid::{GridGeometry, GridItem, ItemStyle, SpiralGrid};

use super::{draw_border, draw_hint, draw_title, GridPan};

pub struct LoginPage {
    session: Session,
    grid: SpiralGrid<PageAction>,
    pan: GridPan,
}

impl LoginPage {
    pub fn new(session: Session, geometry: GridGeometry) -> Self {
        Self {
            session,
            grid: SpiralGrid::new(SCREEN_CENTER, geometry),
            pan: GridPan::default(),
        }
    }

    fn load_users(&mut self) {
        self.grid.clear();
        let users = self.session.users();
        if users.is_empty() {
            log::warn!("no users registered");
            self.grid.add_item(
                GridItem::new("No users").with_style(ItemStyle::filled(colors::DARK_GREY)),
            );
            return;
        }

        for user in users {
            let session = self.session.clone();
            let id = user.id;
            self.grid.add_item(
                GridItem::new(user.name)
                    .with_style(ItemStyle::filled(colors::DARK_BLUE))
                    .on_tap(move || {
                        if session.login(id) {
                            PageAction::navigate_clear("/")
                        } else {
                            PageAction::None
                        }
                    }),
            );
        }
        log::debug!("login grid holds {} users", self.grid.len());
    }
}

impl Page for LoginPage {
    fn name(&self) -> &str {
        "login"
    }

    fn on_enter(&mut self) {
        self.load_users();
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        self.grid.render(canvas);
        draw_border(canvas, colors::BORDER);
        draw_title(canvas, "SELECT USER");
        if self.session.users().is_empty() {
            draw_hint(canvas, "No users registered");
        } else {
            draw_hint(canvas, "Tap to login");
        }
    }

    fn handle_touch(&mut self, event: GestureEvent, touch: &TouchSample) -> PageAction {
        self.pan
            .drive(&mut self.grid, event, touch)
            .unwrap_or_default()
    }
}
