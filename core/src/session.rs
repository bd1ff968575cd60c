//! Logged-in user tracking
//!
//! [`Session`] is a cheap handle; clones share the same state so pages,
//! guards and the router can each hold one.

use std::cell::RefCell;
use std::rc::Rc;

use crate::router::Authenticator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    users: Vec<User>,
    current: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Rc<RefCell<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let session = Self::new();
        for user in users {
            session.register_user(user);
        }
        session
    }

    /// Add a user; ids must be unique
    pub fn register_user(&self, user: User) -> bool {
        let mut state = self.state.borrow_mut();
        if state.users.iter().any(|u| u.id == user.id) {
            log::warn!("user id {} already registered", user.id);
            return false;
        }
        state.users.push(user);
        true
    }

    pub fn users(&self) -> Vec<User> {
        self.state.borrow().users.clone()
    }

    /// Log in as `user_id`; unknown ids are refused
    pub fn login(&self, user_id: u32) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(user) = state.users.iter().find(|u| u.id == user_id) else {
            log::warn!("login refused for unknown user {}", user_id);
            return false;
        };
        log::info!("{} logged in", user.name);
        state.current = Some(user_id);
        true
    }

    pub fn logout(&self) {
        if let Some(id) = self.state.borrow_mut().current.take() {
            log::info!("user {} logged out", id);
        }
    }

    pub fn current_user(&self) -> Option<User> {
        let state = self.state.borrow();
        state
            .current
            .and_then(|id| state.users.iter().find(|u| u.id == id).cloned())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().current.is_some()
    }
}

impl Authenticator for Session {
    fn is_authenticated(&self) -> bool {
        self.is_logged_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::with_users([User::new(1, "Ada"), User::new(2, "Linus")])
    }

    #[test]
    fn test_login_logout() {
        let session = session();
        assert!(!session.is_authenticated());
        assert!(session.login(2));
        assert_eq!(session.current_user().unwrap().name, "Linus");
        assert!(session.is_authenticated());
        session.logout();
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_unknown_user_is_refused() {
        let session = session();
        assert!(!session.login(9));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_clones_share_state() {
        let session = session();
        let other = session.clone();
        other.login(1);
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let session = session();
        assert!(!session.register_user(User::new(1, "Imposter")));
        assert_eq!(session.users().len(), 2);
    }
}
