//! App launcher

use shell_core::geometry::{Point, SCREEN_CENTER, SCREEN_HEIGHT};
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::{colors, Canvas, Color};
use shell_core::session::Session;
use shell_core::spiral_grid::{GridGeometry, GridItem, ItemStyle, SpiralGrid};

use super::{draw_border, draw_title, GridPan};

/// Launcher entries: label, route, tile color
const APPS: [(&str, &str, Color); 4] = [
    ("Slack", "/app/slack", colors::PURPLE),
    ("Spotify", "/app/spotify", colors::DARK_GREEN),
    ("Home", "/app/home-assistant", colors::DARK_BLUE),
    ("Settings", "/settings", colors::DARK_GREY),
];

pub struct HomePage {
    session: Session,
    grid: SpiralGrid<PageAction>,
    pan: GridPan,
}

impl HomePage {
    pub fn new(session: Session, geometry: GridGeometry) -> Self {
        let mut grid = SpiralGrid::new(SCREEN_CENTER, geometry);
        for (label, route, fill) in APPS {
            grid.add_item(
                GridItem::new(label)
                    .with_style(ItemStyle::filled(fill))
                    .on_tap(move || PageAction::navigate(route)),
            );
        }
        Self {
            session,
            grid,
            pan: GridPan::default(),
        }
    }
}

impl Page for HomePage {
    fn name(&self) -> &str {
        "home"
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        self.grid.render(canvas);
        draw_border(canvas, colors::BORDER);
        draw_title(canvas, "MAIN MENU");
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
        let action = self.pan.drive(&mut self.grid, event, touch).unwrap_or_default();
        if event == GestureEvent::SwipeDown {
            return PageAction::navigate("/notification");
        }
        action
    }
}
