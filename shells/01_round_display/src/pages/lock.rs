//! Lock screen: clock, calendar and weather tabs; swipe up to unlock

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shell_core::geometry::{Point, SCREEN_CENTER};
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::{colors, Canvas};
use shell_core::session::Session;

use super::{draw_border, draw_hint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTab {
    Clock,
    Calendar,
    Weather,
}

impl LockTab {
    fn next(self) -> Self {
        match self {
            LockTab::Clock => LockTab::Calendar,
            LockTab::Calendar | LockTab::Weather => LockTab::Weather,
        }
    }

    fn previous(self) -> Self {
        match self {
            LockTab::Weather => LockTab::Calendar,
            LockTab::Calendar | LockTab::Clock => LockTab::Clock,
        }
    }
}

/// Strings shown on the clock tab for one instant
#[derive(Debug, PartialEq)]
pub struct ClockFace {
    pub time: String,
    pub seconds: String,
    pub date: String,
    pub zone: String,
}

impl ClockFace {
    pub fn at(now: DateTime<Utc>, zone: Tz) -> Self {
        let local = now.with_timezone(&zone);
        Self {
            time: local.format("%H:%M").to_string(),
            seconds: local.format("%S").to_string(),
            date: local.format("%A, %b %-d, %Y").to_string(),
            zone: local.format("%Z").to_string(),
        }
    }
}

pub struct LockPage {
    session: Session,
    time_zone: Rc<Cell<Tz>>,
    tab: LockTab,
}

impl LockPage {
    pub fn new(session: Session, time_zone: Rc<Cell<Tz>>) -> Self {
        Self {
            session,
            time_zone,
            tab: LockTab::Clock,
        }
    }

    pub fn tab(&self) -> LockTab {
        self.tab
    }

    fn render_clock(&self, canvas: &mut dyn Canvas) {
        let face = ClockFace::at(Utc::now(), self.time_zone.get());
        canvas.text(SCREEN_CENTER.offset(0.0, -20.0), &face.time, 56.0, colors::TEXT);
        canvas.text(SCREEN_CENTER.offset(0.0, 30.0), &face.seconds, 20.0, colors::TEXT_DIM);
        canvas.text(SCREEN_CENTER.offset(0.0, 60.0), &face.date, 14.0, colors::TEXT_LIGHT);
        canvas.text(SCREEN_CENTER.offset(0.0, 80.0), &face.zone, 12.0, colors::TEXT_DIM);
    }

    fn render_calendar(&self, canvas: &mut dyn Canvas) {
        canvas.text(SCREEN_CENTER.offset(0.0, -40.0), "CALENDAR", 16.0, colors::TEXT);
        canvas.text(SCREEN_CENTER, "No events today", 14.0, colors::TEXT_DIM);
    }

    fn render_weather(&self, canvas: &mut dyn Canvas) {
        canvas.text(SCREEN_CENTER.offset(0.0, -40.0), "WEATHER", 16.0, colors::TEXT);
        canvas.text(SCREEN_CENTER, "22°C", 40.0, colors::TEXT);
        canvas.text(SCREEN_CENTER.offset(0.0, 40.0), "Partly Cloudy", 14.0, colors::TEXT_LIGHT);
    }
}

impl Page for LockPage {
    fn name(&self) -> &str {
        "lock"
    }

    fn on_enter(&mut self) {
        self.tab = LockTab::Clock;
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        draw_border(canvas, colors::BORDER);
        match self.tab {
            LockTab::Clock => self.render_clock(canvas),
            LockTab::Calendar => self.render_calendar(canvas),
            LockTab::Weather => self.render_weather(canvas),
        }
        if let Some(user) = self.session.current_user() {
            canvas.text(Point::new(SCREEN_CENTER.x, 40.0), &user.name, 12.0, colors::TEXT_DIM);
        }
        draw_hint(canvas, "Swipe up to unlock");
    }

    fn handle_touch(&mut self, event: GestureEvent, _touch: &TouchSample) -> PageAction {
        match event {
            GestureEvent::SwipeUp => {
                if self.session.is_logged_in() {
                    PageAction::navigate_clear("/")
                } else {
                    PageAction::navigate_clear("/login")
                }
            }
            GestureEvent::SwipeLeft => {
                self.tab = self.tab.next();
                log::debug!("lock tab {:?}", self.tab);
                PageAction::None
            }
            GestureEvent::SwipeRight => {
                self.tab = self.tab.previous();
                log::debug!("lock tab {:?}", self.tab);
                PageAction::None
            }
            _ => PageAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::gesture;
    use super::*;
    use chrono::TimeZone;
    use shell_core::render::RecordingCanvas;
    use shell_core::session::User;

    fn page() -> (LockPage, Session) {
        let session = Session::with_users([User::new(7, "Alice")]);
        let tz: Tz = "Europe/London".parse().unwrap();
        (LockPage::new(session.clone(), Rc::new(Cell::new(tz))), session)
    }

    #[test]
    fn test_tabs_cycle_and_stop_at_ends() {
        let (mut page, _) = page();
        gesture(&mut page, GestureEvent::SwipeRight);
        assert_eq!(page.tab(), LockTab::Clock);
        gesture(&mut page, GestureEvent::SwipeLeft);
        gesture(&mut page, GestureEvent::SwipeLeft);
        gesture(&mut page, GestureEvent::SwipeLeft);
        assert_eq!(page.tab(), LockTab::Weather);
        gesture(&mut page, GestureEvent::SwipeRight);
        assert_eq!(page.tab(), LockTab::Calendar);
        page.on_enter();
        assert_eq!(page.tab(), LockTab::Clock);
    }

    #[test]
    fn test_unlock_depends_on_session() {
        let (mut page, session) = page();
        assert_eq!(
            gesture(&mut page, GestureEvent::SwipeUp),
            PageAction::navigate_clear("/login")
        );
        session.login(7);
        assert_eq!(
            gesture(&mut page, GestureEvent::SwipeUp),
            PageAction::navigate_clear("/")
        );
    }

    #[test]
    fn test_clock_face_uses_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 12, 5, 9).unwrap();
        let face = ClockFace::at(instant, chrono_tz::Asia::Tokyo);
        assert_eq!(face.time, "21:05");
        assert_eq!(face.seconds, "09");
        assert_eq!(face.date, "Monday, Jul 1, 2024");
        assert_eq!(face.zone, "JST");
    }

    #[test]
    fn test_render_shows_hint_and_weather() {
        let (mut page, _) = page();
        gesture(&mut page, GestureEvent::SwipeLeft);
        gesture(&mut page, GestureEvent::SwipeLeft);
        let mut canvas = RecordingCanvas::new();
        page.render(&mut canvas);
        assert!(canvas.contains_text("Swipe up to unlock"));
        assert!(canvas.contains_text("Partly Cloudy"));
    }
}
