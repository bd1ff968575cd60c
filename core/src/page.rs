//! Page abstraction
//!
//! A page is one screen of the shell. The router owns pages on its stack and
//! forwards ticks, touches and rendering to whichever page is on top.

use crate::gesture::{GestureEvent, TouchSample};
use crate::render::Canvas;

/// Navigation request returned from page callbacks
///
/// Pages never hold the router; they describe where to go and the router
/// applies it once the callback has returned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageAction {
    #[default]
    None,
    Navigate { path: String, clear_stack: bool },
    Back,
}

impl PageAction {
    /// Push `path` on top of the current page
    pub fn navigate(path: impl Into<String>) -> Self {
        PageAction::Navigate {
            path: path.into(),
            clear_stack: false,
        }
    }

    /// Replace the whole stack with `path`
    pub fn navigate_clear(path: impl Into<String>) -> Self {
        PageAction::Navigate {
            path: path.into(),
            clear_stack: true,
        }
    }

    pub fn back() -> Self {
        PageAction::Back
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PageAction::None)
    }

    /// `self` unless it is `None`, in which case `other`
    pub fn or(self, other: PageAction) -> PageAction {
        if self.is_none() {
            other
        } else {
            self
        }
    }
}

pub trait Page {
    /// Short name shown in diagnostics
    fn name(&self) -> &str;

    /// Called when the page becomes the top of the stack
    fn on_enter(&mut self) {}

    /// Called when the page stops being the top of the stack
    fn on_exit(&mut self) {}

    /// Per-tick hook with the raw touch sample
    fn update(&mut self, _touch: &TouchSample) -> PageAction {
        PageAction::None
    }

    fn render(&self, canvas: &mut dyn Canvas);

    /// Classified gesture for this tick
    fn handle_touch(&mut self, event: GestureEvent, touch: &TouchSample) -> PageAction;
}
