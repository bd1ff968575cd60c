//! Device pages and route table
//!
//! Every page gets what it needs from [`ShellContext`] when its route
//! factory runs; nothing is reached through globals.

mod dial_app;
mod home;
mod lock;
mod login;
mod notifications;
mod settings;

use std::cell::Cell;
use std::rc::Rc;

use chrono_tz::Tz;
use shell_core::geometry::{Point, SCREEN_CENTER, SCREEN_HEIGHT, SCREEN_RADIUS};
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::render::{colors, Canvas, Color};
use shell_core::router::{NavigationError, Route, Router, DEFAULT_INITIAL_PATH};
use shell_core::session::{Session, User};
use shell_core::slider::SliderMode;
use shell_core::spiral_grid::{GridGeometry, SpiralGrid};

pub use dial_app::DialAppPage;
pub use home::HomePage;
pub use lock::LockPage;
pub use login::LoginPage;
pub use notifications::{Inbox, Notification, NotificationsPage};
pub use settings::SettingsPage;

/// Shared services handed to page factories
#[derive(Clone)]
pub struct ShellContext {
    pub session: Session,
    pub inbox: Inbox,
    pub grid: GridGeometry,
    pub time_zone: Rc<Cell<Tz>>,
    pub reduced_motion: Rc<Cell<bool>>,
    pub volume: Rc<Cell<f32>>,
    pub brightness: Rc<Cell<f32>>,
}

impl ShellContext {
    pub fn new(session: Session, grid: GridGeometry, time_zone: Tz, reduced_motion: bool) -> Self {
        Self {
            session,
            inbox: Inbox::with_samples(),
            grid,
            time_zone: Rc::new(Cell::new(time_zone)),
            reduced_motion: Rc::new(Cell::new(reduced_motion)),
            volume: Rc::new(Cell::new(50.0)),
            brightness: Rc::new(Cell::new(80.0)),
        }
    }
}

/// Users known to the simulator
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "Alice"),
        User::new(2, "Bob"),
        User::new(3, "Guest"),
    ]
}

/// Register every device route on `router`
pub fn register_routes(router: &mut Router, ctx: &ShellContext) {
    let c = ctx.clone();
    router.register_route(Route::to_page("/lock", "Lock", move || {
        LockPage::new(c.session.clone(), Rc::clone(&c.time_zone))
    }));

    let c = ctx.clone();
    router.register_route(Route::to_page("/login", "Login", move || {
        LoginPage::new(c.session.clone(), c.grid)
    }));

    let c = ctx.clone();
    router.register_route(
        Route::to_page("/", "Home", move || HomePage::new(c.session.clone(), c.grid))
            .requires_auth(),
    );

    let c = ctx.clone();
    router.register_route(
        Route::to_page("/settings", "Settings", move || {
            SettingsPage::new(c.session.clone(), c.grid)
        })
        .requires_auth(),
    );

    let c = ctx.clone();
    router.register_route(
        Route::to_page("/notification", "Notifications", move || {
            NotificationsPage::new(c.inbox.clone(), None)
        })
        .requires_auth(),
    );

    let c = ctx.clone();
    router.register_route(
        Route::to_page("/app/slack", "Slack", move || {
            NotificationsPage::new(c.inbox.clone(), Some("Slack"))
        })
        .requires_auth(),
    );

    let c = ctx.clone();
    router.register_route(
        Route::to_page("/app/spotify", "Spotify", move || {
            DialAppPage::new(
                "SPOTIFY",
                SliderMode::Volume,
                Rc::clone(&c.volume),
                50.0,
                Rc::clone(&c.reduced_motion),
            )
        })
        .requires_auth(),
    );

    let c = ctx.clone();
    router.register_route(
        Route::to_page("/app/home-assistant", "Home Assistant", move || {
            DialAppPage::new(
                "LIVING ROOM",
                SliderMode::Brightness,
                Rc::clone(&c.brightness),
                80.0,
                Rc::clone(&c.reduced_motion),
            )
        })
        .requires_auth(),
    );
}

/// Enter the configured start route, falling back to the lock screen
///
/// An error means the configured route was unusable; the router may still
/// have started from the fallback.
pub fn start(router: &mut Router) -> Result<(), NavigationError> {
    let err = match router.init() {
        Ok(_) => return Ok(()),
        Err(e) => e,
    };
    log::error!("router init at {} failed: {}", router.initial_path(), err);
    if router.initial_path() == DEFAULT_INITIAL_PATH {
        return Err(err);
    }
    router.set_initial_path(DEFAULT_INITIAL_PATH);
    if let Err(e) = router.init() {
        log::error!("router init at {} failed: {}", DEFAULT_INITIAL_PATH, e);
    }
    Err(err)
}

/// Pointer bookkeeping for pages that pan a grid
#[derive(Debug, Default)]
pub struct GridPan {
    last: Option<Point>,
}

impl GridPan {
    /// Route taps and drags to `grid`; returns whatever a tapped item produced
    pub fn drive<A>(
        &mut self,
        grid: &mut SpiralGrid<A>,
        event: GestureEvent,
        touch: &TouchSample,
    ) -> Option<A> {
        match event {
            GestureEvent::Tap => {
                let at = touch.point();
                return grid.handle_tap(at.x, at.y);
            }
            GestureEvent::DragStart => self.last = Some(touch.point()),
            GestureEvent::DragMove => {
                if let Some(last) = self.last {
                    let now = touch.point();
                    grid.handle_drag(now.x - last.x, now.y - last.y);
                    self.last = Some(now);
                }
            }
            e if e.ends_drag() => self.last = None,
            _ => {}
        }
        None
    }
}

/// Double ring around the edge of the display
pub fn draw_border(canvas: &mut dyn Canvas, color: Color) {
    canvas.stroke_circle(SCREEN_CENTER, SCREEN_RADIUS, color);
    canvas.stroke_circle(SCREEN_CENTER, SCREEN_RADIUS - 1.0, color);
}

/// Title line near the top edge
pub fn draw_title(canvas: &mut dyn Canvas, title: &str) {
    canvas.text(Point::new(SCREEN_CENTER.x, 22.0), title, 16.0, colors::TEXT);
}

/// Hint line near the bottom edge
pub fn draw_hint(canvas: &mut dyn Canvas, hint: &str) {
    canvas.text(Point::new(SCREEN_CENTER.x, SCREEN_HEIGHT - 24.0), hint, 12.0, colors::TEXT_DIM);
}

/// Cut `text` to `max` characters, ending in "..." when shortened
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Break `text` into lines of at most `width` characters
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Instant;

    use shell_core::gesture::{GestureEvent, TouchSample};
    use shell_core::page::{Page, PageAction};

    pub fn release_at(x: i32, y: i32) -> TouchSample {
        TouchSample::new(x, y, false, Instant::now())
    }

    pub fn press_at(x: i32, y: i32) -> TouchSample {
        TouchSample::pressed(x, y, Instant::now())
    }

    pub fn gesture(page: &mut dyn Page, event: GestureEvent) -> PageAction {
        page.handle_touch(event, &release_at(180, 180))
    }
}
