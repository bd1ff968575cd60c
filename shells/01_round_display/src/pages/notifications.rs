//! Notification feed, optionally narrowed to one app

use std::cell::RefCell;
use std::rc::Rc;

use shell_core::geometry::{Point, SCREEN_CENTER, SCREEN_HEIGHT, SCREEN_WIDTH};
use shell_core::gesture::{GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::{colors, Canvas, Color};

use super::{draw_border, draw_hint, draw_title, ellipsize, wrap};

const TITLE_MAX: usize = 25;
const MESSAGE_MAX: usize = 60;
const LINE_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub app: String,
    pub title: String,
    pub message: String,
    pub received: String,
    pub color: Color,
    pub read: bool,
}

/// Shared store of notifications
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    items: Rc<RefCell<Vec<Notification>>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inbox preloaded with a few sample notifications
    pub fn with_samples() -> Self {
        let inbox = Self::new();
        inbox.push(
            "Slack",
            "New message",
            "You have a new message from John in #general",
            "2 min ago",
            colors::PURPLE,
        );
        inbox.push(
            "Spotify",
            "Now playing",
            "Bohemian Rhapsody by Queen",
            "5 min ago",
            colors::SUCCESS,
        );
        inbox.push(
            "Slack",
            "Mention",
            "@you the deploy checklist is ready for review in #releases",
            "12 min ago",
            colors::PURPLE,
        );
        inbox
    }

    pub fn push(&self, app: &str, title: &str, message: &str, received: &str, color: Color) -> u32 {
        let mut items = self.items.borrow_mut();
        let id = items.iter().map(|n| n.id + 1).max().unwrap_or(1);
        items.push(Notification {
            id,
            app: app.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            received: received.to_string(),
            color,
            read: false,
        });
        id
    }

    /// Notifications from `app`, or all of them
    pub fn list(&self, app: Option<&str>) -> Vec<Notification> {
        self.items
            .borrow()
            .iter()
            .filter(|n| app.map_or(true, |a| n.app == a))
            .cloned()
            .collect()
    }

    pub fn mark_read(&self, id: u32) {
        if let Some(n) = self.items.borrow_mut().iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
    }

    pub fn clear(&self, app: Option<&str>) {
        self.items
            .borrow_mut()
            .retain(|n| app.map_or(false, |a| n.app != a));
    }

    pub fn unread_count(&self, app: Option<&str>) -> usize {
        self.list(app).iter().filter(|n| !n.read).count()
    }
}

pub struct NotificationsPage {
    inbox: Inbox,
    app: Option<&'static str>,
    index: usize,
}

impl NotificationsPage {
    pub fn new(inbox: Inbox, app: Option<&'static str>) -> Self {
        Self {
            inbox,
            app,
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn step(&mut self, forward: bool) {
        let count = self.inbox.list(self.app).len();
        if count == 0 {
            return;
        }
        self.index = if forward {
            (self.index + 1) % count
        } else {
            (self.index + count - 1) % count
        };
    }

    fn render_current(&self, canvas: &mut dyn Canvas, notification: &Notification, count: usize) {
        let icon = Point::new(SCREEN_CENTER.x, SCREEN_CENTER.y - 60.0);
        let icon_radius = 30.0;
        canvas.fill_circle(icon, icon_radius, notification.color);
        let initial: String = notification.app.chars().take(1).collect::<String>().to_uppercase();
        canvas.text(icon, &initial, 20.0, colors::TEXT);
        canvas.text(
            icon.offset(0.0, icon_radius + 15.0),
            &notification.app,
            12.0,
            colors::TEXT_LIGHT,
        );
        canvas.text(
            icon.offset(0.0, icon_radius + 35.0),
            &ellipsize(&notification.title, TITLE_MAX),
            14.0,
            colors::TEXT,
        );

        let mut y = icon.y + icon_radius + 55.0;
        for line in wrap(&ellipsize(&notification.message, MESSAGE_MAX), LINE_WIDTH) {
            canvas.text(Point::new(SCREEN_CENTER.x, y), &line, 12.0, colors::TEXT_LIGHT);
            y += 14.0;
        }
        let received = Point::new(SCREEN_CENTER.x, y + 8.0);
        canvas.text(received, &notification.received, 11.0, colors::TEXT_DIM);
        if notification.read {
            canvas.text(Point::new(SCREEN_CENTER.x, y + 24.0), "✓ Read", 11.0, colors::SUCCESS);
        }
        if count > 1 {
            canvas.text(
                Point::new(SCREEN_CENTER.x, SCREEN_HEIGHT - 40.0),
                &format!("{} / {}", self.index + 1, count),
                11.0,
                colors::TEXT_DIM,
            );
        }
    }
}

impl Page for NotificationsPage {
    fn name(&self) -> &str {
        match self.app {
            Some(_) => "app-notifications",
            None => "notifications",
        }
    }

    fn on_enter(&mut self) {
        self.index = 0;
        log::debug!(
            "{} unread notifications",
            self.inbox.unread_count(self.app)
        );
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        draw_border(canvas, colors::CYAN);
        let title = match self.app {
            Some(app) => app.to_uppercase(),
            None => "NOTIFICATIONS".to_string(),
        };
        draw_title(canvas, &title);

        let list = self.inbox.list(self.app);
        let unread = list.iter().filter(|n| !n.read).count();
        if unread > 0 {
            let badge = Point::new(SCREEN_WIDTH - 60.0, 50.0);
            canvas.fill_circle(badge, 15.0, colors::ERROR);
            canvas.text(badge, &unread.to_string(), 12.0, colors::TEXT);
        }

        match list.get(self.index) {
            Some(current) => {
                self.render_current(canvas, current, list.len());
                draw_hint(canvas, "Swipe: Navigate • Tap: Read • Long: Clear");
            }
            None => {
                canvas.text(SCREEN_CENTER.offset(0.0, -30.0), "✓", 40.0, colors::SUCCESS);
                let below = |dy| SCREEN_CENTER.offset(0.0, dy);
                canvas.text(below(20.0), "No notifications", 14.0, colors::TEXT);
                canvas.text(below(40.0), "You're all caught up!", 12.0, colors::TEXT_DIM);
                draw_hint(canvas, "Swipe down to go back");
            }
        }
    }

    fn handle_touch(&mut self, event: GestureEvent, _touch: &TouchSample) -> PageAction {
        match event {
            GestureEvent::Tap => {
                if let Some(current) = self.inbox.list(self.app).get(self.index) {
                    self.inbox.mark_read(current.id);
                }
            }
            GestureEvent::LongPress => {
                log::info!("clearing notifications");
                self.inbox.clear(self.app);
                self.index = 0;
            }
            GestureEvent::SwipeLeft => self.step(true),
            GestureEvent::SwipeRight => self.step(false),
            GestureEvent::SwipeDown => return PageAction::back(),
            _ => {}
        }
        PageAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::gesture;
    use super::*;
    use shell_core::render::RecordingCanvas;

    #[test]
    fn test_paging_wraps() {
        let mut page = NotificationsPage::new(Inbox::with_samples(), None);
        gesture(&mut page, GestureEvent::SwipeRight);
        assert_eq!(page.index(), 2);
        gesture(&mut page, GestureEvent::SwipeLeft);
        assert_eq!(page.index(), 0);
    }

    #[test]
    fn test_tap_marks_current_read() {
        let inbox = Inbox::with_samples();
        let mut page = NotificationsPage::new(inbox.clone(), None);
        gesture(&mut page, GestureEvent::SwipeLeft);
        gesture(&mut page, GestureEvent::Tap);
        let list = inbox.list(None);
        assert!(!list[0].read);
        assert!(list[1].read);
        assert_eq!(inbox.unread_count(None), 2);
    }

    #[test]
    fn test_app_filter_and_clear() {
        let inbox = Inbox::with_samples();
        let mut slack = NotificationsPage::new(inbox.clone(), Some("Slack"));
        assert_eq!(inbox.list(Some("Slack")).len(), 2);
        gesture(&mut slack, GestureEvent::LongPress);
        assert!(inbox.list(Some("Slack")).is_empty());
        assert_eq!(inbox.list(None).len(), 1);

        let mut all = NotificationsPage::new(inbox.clone(), None);
        gesture(&mut all, GestureEvent::LongPress);
        assert!(inbox.list(None).is_empty());
    }

    #[test]
    fn test_empty_state() {
        let page = NotificationsPage::new(Inbox::new(), None);
        let mut canvas = RecordingCanvas::new();
        page.render(&mut canvas);
        assert!(canvas.contains_text("No notifications"));
    }

    #[test]
    fn test_long_text_is_shortened() {
        let inbox = Inbox::new();
        inbox.push(
            "Slack",
            "A title that is much longer than fits",
            "m",
            "now",
            colors::PURPLE,
        );
        let page = NotificationsPage::new(inbox, None);
        let mut canvas = RecordingCanvas::new();
        page.render(&mut canvas);
        assert!(canvas.contains_text("A title that is much l..."));
    }

    #[test]
    fn test_swipe_down_goes_back() {
        let mut page = NotificationsPage::new(Inbox::new(), None);
        assert_eq!(gesture(&mut page, GestureEvent::SwipeDown), PageAction::Back);
    }
}
