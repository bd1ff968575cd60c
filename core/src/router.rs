//! Stack-based page router
//!
//! Routes are registered once at startup. Navigating builds the route's page,
//! pushes it and keeps the route with it, so going back always knows which
//! route is current again. Protected routes are checked against a guard or
//! the injected [`Authenticator`] and may redirect once.

use std::rc::Rc;

use crate::gesture::{GestureEvent, TouchSample};
use crate::page::{Page, PageAction};
use crate::render::Canvas;

/// Where denied navigations go unless a guard says otherwise
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Route entered by [`Router::init`] unless configured otherwise
pub const DEFAULT_INITIAL_PATH: &str = "/lock";

/// Answers whether someone is logged in
pub trait Authenticator {
    fn is_authenticated(&self) -> bool;
}

impl<F: Fn() -> bool> Authenticator for F {
    fn is_authenticated(&self) -> bool {
        self()
    }
}

/// Per-route access policy
pub trait RouteGuard {
    fn can_activate(&self, route: &Route) -> bool;

    /// Path to enter instead when access is denied
    fn redirect_path(&self) -> &str {
        DEFAULT_LOGIN_PATH
    }
}

/// Guard that admits only authenticated users
pub struct LoginGuard {
    auth: Rc<dyn Authenticator>,
    redirect: String,
}

impl LoginGuard {
    pub fn new(auth: Rc<dyn Authenticator>) -> Self {
        Self {
            auth,
            redirect: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    pub fn redirecting_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = path.into();
        self
    }
}

impl RouteGuard for LoginGuard {
    fn can_activate(&self, _route: &Route) -> bool {
        self.auth.is_authenticated()
    }

    fn redirect_path(&self) -> &str {
        &self.redirect
    }
}

/// Builds a fresh page for a route, or `None` if it cannot
pub type PageFactory = Box<dyn Fn() -> Option<Box<dyn Page>>>;

/// A registered navigation target
pub struct Route {
    path: String,
    name: String,
    factory: PageFactory,
    guard: Option<Rc<dyn RouteGuard>>,
    requires_auth: bool,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("guarded", &self.guard.is_some())
            .field("requires_auth", &self.requires_auth)
            .finish()
    }
}

impl Route {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        factory: impl Fn() -> Option<Box<dyn Page>> + 'static,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            factory: Box::new(factory),
            guard: None,
            requires_auth: false,
        }
    }

    /// Route whose factory always succeeds
    pub fn to_page<P: Page + 'static>(
        path: impl Into<String>,
        name: impl Into<String>,
        build: impl Fn() -> P + 'static,
    ) -> Self {
        Self::new(path, name, move || Some(Box::new(build()) as Box<dyn Page>))
    }

    pub fn with_guard(mut self, guard: impl RouteGuard + 'static) -> Self {
        self.guard = Some(Rc::new(guard));
        self
    }

    pub fn with_shared_guard(mut self, guard: Rc<dyn RouteGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_protected(&self) -> bool {
        self.requires_auth || self.guard.is_some()
    }

    fn build_page(&self) -> Option<Box<dyn Page>> {
        (self.factory)()
    }
}

/// Why a navigation did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No route registered under this path
    RouteNotFound(String),
    /// Access denied and no usable redirect
    AuthorizationDenied(String),
    /// The route's factory produced no page
    FactoryFailure(String),
    /// Going back from the root page
    EmptyStackUnderflow,
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationError::RouteNotFound(path) => write!(f, "Route not found: {}", path),
            NavigationError::AuthorizationDenied(path) => {
                write!(f, "Authorization denied for {}", path)
            }
            NavigationError::FactoryFailure(path) => {
                write!(f, "Could not create page for {}", path)
            }
            NavigationError::EmptyStackUnderflow => write!(f, "Already at the root page"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Outcome of a successful navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Entered { path: String },
    Redirected { requested: String, to: String },
}

impl Navigation {
    /// Path that actually ended up on top
    pub fn path(&self) -> &str {
        match self {
            Navigation::Entered { path } => path,
            Navigation::Redirected { to, .. } => to,
        }
    }
}

struct StackEntry {
    route: usize,
    page: Box<dyn Page>,
}

/// Owner of the routes and of the page stack
pub struct Router {
    routes: Vec<Route>,
    stack: Vec<StackEntry>,
    auth: Rc<dyn Authenticator>,
    initial_path: String,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("stack", &self.stack_paths())
            .field("initial_path", &self.initial_path)
            .finish()
    }
}

impl Router {
    pub fn new(auth: Rc<dyn Authenticator>) -> Self {
        Self {
            routes: Vec::new(),
            stack: Vec::new(),
            auth,
            initial_path: DEFAULT_INITIAL_PATH.to_string(),
        }
    }

    pub fn with_initial_path(mut self, path: impl Into<String>) -> Self {
        self.initial_path = path.into();
        self
    }

    pub fn initial_path(&self) -> &str {
        &self.initial_path
    }

    pub fn set_initial_path(&mut self, path: impl Into<String>) {
        self.initial_path = path.into();
    }

    /// Add a route; a second route with the same path is ignored
    pub fn register_route(&mut self, route: Route) -> bool {
        if self.route_index(&route.path).is_some() {
            log::warn!("route {} already registered, ignoring", route.path);
            return false;
        }
        log::debug!("registered route {} ({})", route.path, route.name);
        self.routes.push(route);
        true
    }

    /// Enter the initial route on an empty stack
    pub fn init(&mut self) -> Result<Navigation, NavigationError> {
        let path = self.initial_path.clone();
        log::info!("router init at {}", path);
        self.navigate_to(&path, true)
    }

    /// Drop every page and start again from the initial route
    ///
    /// The old stack stays in place if the initial route cannot be entered.
    pub fn reset(&mut self) -> Result<Navigation, NavigationError> {
        let path = self.initial_path.clone();
        log::info!("router reset to {}", path);
        let (index, nav) = self.resolve(&path)?;
        self.enter(index, true)?;
        Ok(nav)
    }

    /// Navigate to `path`, optionally discarding the whole stack first
    ///
    /// Nothing on the stack changes unless the call succeeds.
    pub fn navigate_to(
        &mut self,
        path: &str,
        clear_stack: bool,
    ) -> Result<Navigation, NavigationError> {
        let (index, nav) = self.resolve(path)?;
        match nav {
            Navigation::Entered { .. } => self.enter(index, clear_stack)?,
            Navigation::Redirected { .. } => self.enter(index, false)?,
        }
        Ok(nav)
    }

    /// Pop the current page and return to the one below it
    pub fn go_back(&mut self) -> Result<(), NavigationError> {
        if self.stack.len() <= 1 {
            return Err(NavigationError::EmptyStackUnderflow);
        }
        if let Some(mut leaving) = self.stack.pop() {
            leaving.page.on_exit();
            log::info!("back from {}", self.routes[leaving.route].path);
        }
        if let Some(top) = self.stack.last_mut() {
            top.page.on_enter();
        }
        Ok(())
    }

    /// Per-tick update of the current page
    pub fn update(&mut self, touch: &TouchSample) -> Result<(), NavigationError> {
        let action = match self.stack.last_mut() {
            Some(top) => top.page.update(touch),
            None => return Ok(()),
        };
        self.apply(action)
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        if let Some(top) = self.stack.last() {
            top.page.render(canvas);
        }
    }

    /// Forward a classified gesture to the current page
    pub fn handle_touch(
        &mut self,
        event: GestureEvent,
        touch: &TouchSample,
    ) -> Result<(), NavigationError> {
        let action = match self.stack.last_mut() {
            Some(top) => top.page.handle_touch(event, touch),
            None => return Ok(()),
        };
        self.apply(action)
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Path of the route on top of the stack
    pub fn current_route(&self) -> Option<&str> {
        self.stack
            .last()
            .map(|entry| self.routes[entry.route].path.as_str())
    }

    pub fn current_page_name(&self) -> Option<&str> {
        self.stack.last().map(|entry| entry.page.name())
    }

    /// Route paths from the root to the top
    pub fn stack_paths(&self) -> Vec<&str> {
        self.stack
            .iter()
            .map(|entry| self.routes[entry.route].path.as_str())
            .collect()
    }

    pub fn find_route(&self, path: &str) -> Option<&Route> {
        self.route_index(path).map(|index| &self.routes[index])
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    fn route_index(&self, path: &str) -> Option<usize> {
        self.routes.iter().position(|route| route.path == path)
    }

    /// Route to enter for `path` after guards, without touching the stack
    fn resolve(&self, path: &str) -> Result<(usize, Navigation), NavigationError> {
        let index = self
            .route_index(path)
            .ok_or_else(|| NavigationError::RouteNotFound(path.to_string()))?;

        let redirect = match self.denial_redirect(index) {
            None => {
                let nav = Navigation::Entered {
                    path: path.to_string(),
                };
                return Ok((index, nav));
            }
            Some(redirect) => redirect,
        };

        log::warn!("access to {} denied, redirecting to {}", path, redirect);
        if redirect == path {
            return Err(NavigationError::AuthorizationDenied(path.to_string()));
        }
        let target = self
            .route_index(&redirect)
            .ok_or_else(|| NavigationError::RouteNotFound(redirect.clone()))?;
        if self.denial_redirect(target).is_some() {
            log::warn!("redirect target {} is denied as well", redirect);
            return Err(NavigationError::AuthorizationDenied(path.to_string()));
        }
        Ok((
            target,
            Navigation::Redirected {
                requested: path.to_string(),
                to: redirect,
            },
        ))
    }

    /// `Some(redirect)` when the route may not be entered right now
    fn denial_redirect(&self, index: usize) -> Option<String> {
        let route = &self.routes[index];
        if let Some(guard) = &route.guard {
            if !guard.can_activate(route) {
                return Some(guard.redirect_path().to_string());
            }
        } else if route.requires_auth && !self.auth.is_authenticated() {
            return Some(DEFAULT_LOGIN_PATH.to_string());
        }
        None
    }

    fn enter(&mut self, index: usize, clear_stack: bool) -> Result<(), NavigationError> {
        let route = &self.routes[index];
        let page = route.build_page().ok_or_else(|| {
            log::warn!("factory for {} produced no page", route.path);
            NavigationError::FactoryFailure(route.path.clone())
        })?;

        if clear_stack {
            self.unwind();
        } else if let Some(top) = self.stack.last_mut() {
            top.page.on_exit();
        }

        log::info!("navigated to {} ({})", self.routes[index].path, page.name());
        self.stack.push(StackEntry { route: index, page });
        if let Some(top) = self.stack.last_mut() {
            top.page.on_enter();
        }
        Ok(())
    }

    /// Exit and drop every page, top first
    fn unwind(&mut self) {
        while let Some(mut entry) = self.stack.pop() {
            entry.page.on_exit();
        }
    }

    fn apply(&mut self, action: PageAction) -> Result<(), NavigationError> {
        match action {
            PageAction::None => Ok(()),
            PageAction::Navigate { path, clear_stack } => {
                self.navigate_to(&path, clear_stack).map(|_| ())
            }
            PageAction::Back => self.go_back(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;
    use std::cell::Cell;
    use std::time::Instant;

    struct Blank(&'static str);

    impl Page for Blank {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self, canvas: &mut dyn Canvas) {
            canvas.text(crate::geometry::SCREEN_CENTER, self.0, 16.0, crate::render::colors::TEXT);
        }

        fn handle_touch(&mut self, event: GestureEvent, _touch: &TouchSample) -> PageAction {
            match event {
                GestureEvent::SwipeDown => PageAction::back(),
                GestureEvent::Tap => PageAction::navigate("/settings"),
                _ => PageAction::None,
            }
        }
    }

    fn router(logged_in: bool) -> Router {
        let flag = Rc::new(Cell::new(logged_in));
        let auth = move || flag.get();
        let mut router = Router::new(Rc::new(auth));
        router.register_route(Route::to_page("/lock", "Lock", || Blank("lock")));
        router.register_route(Route::to_page("/login", "Login", || Blank("login")));
        router.register_route(Route::to_page("/", "Home", || Blank("home")).requires_auth());
        router.register_route(
            Route::to_page("/settings", "Settings", || Blank("settings")).requires_auth(),
        );
        router
    }

    fn idle() -> TouchSample {
        TouchSample::released(Instant::now())
    }

    #[test]
    fn test_init_enters_lock() {
        let mut router = router(false);
        let nav = router.init().unwrap();
        assert_eq!(nav, Navigation::Entered { path: "/lock".into() });
        assert_eq!(router.stack_depth(), 1);
        assert_eq!(router.current_route(), Some("/lock"));
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_duplicate_route_is_ignored() {
        let mut router = router(true);
        assert!(!router.register_route(Route::to_page("/lock", "Again", || Blank("again"))));
        assert_eq!(router.route_count(), 4);
        assert_eq!(router.find_route("/lock").unwrap().name(), "Lock");
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let mut router = router(false);
        router.init().unwrap();
        let nav = router.navigate_to("/", false).unwrap();
        assert_eq!(
            nav,
            Navigation::Redirected {
                requested: "/".into(),
                to: "/login".into()
            }
        );
        assert_eq!(nav.path(), "/login");
        assert_eq!(router.current_route(), Some("/login"));
        assert_eq!(router.stack_depth(), 2);
    }

    #[test]
    fn test_unknown_route_leaves_stack() {
        let mut router = router(true);
        router.init().unwrap();
        let err = router.navigate_to("/nowhere", true).unwrap_err();
        assert_eq!(err, NavigationError::RouteNotFound("/nowhere".into()));
        assert_eq!(router.stack_paths(), vec!["/lock"]);
    }

    #[test]
    fn test_back_at_root_underflows() {
        let mut router = router(true);
        router.init().unwrap();
        assert_eq!(router.go_back(), Err(NavigationError::EmptyStackUnderflow));
        assert_eq!(router.stack_depth(), 1);
    }

    #[test]
    fn test_back_restores_previous_route() {
        let mut router = router(true);
        router.init().unwrap();
        router.navigate_to("/", false).unwrap();
        router.navigate_to("/settings", false).unwrap();
        router.go_back().unwrap();
        assert_eq!(router.current_route(), Some("/"));
        assert_eq!(router.current_page_name(), Some("home"));
    }

    #[test]
    fn test_clear_stack_replaces_everything() {
        let mut router = router(true);
        router.init().unwrap();
        router.navigate_to("/", false).unwrap();
        router.navigate_to("/settings", true).unwrap();
        assert_eq!(router.stack_paths(), vec!["/settings"]);
    }

    #[test]
    fn test_page_actions_are_applied() {
        let mut router = router(true);
        router.init().unwrap();
        router.handle_touch(GestureEvent::Tap, &idle()).unwrap();
        assert_eq!(router.current_route(), Some("/settings"));
        router.handle_touch(GestureEvent::SwipeDown, &idle()).unwrap();
        assert_eq!(router.current_route(), Some("/lock"));
        assert_eq!(
            router.handle_touch(GestureEvent::SwipeDown, &idle()),
            Err(NavigationError::EmptyStackUnderflow)
        );
    }

    #[test]
    fn test_empty_router_is_inert() {
        let mut router = router(true);
        assert!(router.update(&idle()).is_ok());
        assert!(router.handle_touch(GestureEvent::Tap, &idle()).is_ok());
        let mut canvas = RecordingCanvas::new();
        router.render(&mut canvas);
        assert!(canvas.commands.is_empty());
        assert_eq!(router.current_route(), None);
    }

    #[test]
    fn test_render_draws_top_page() {
        let mut router = router(true);
        router.init().unwrap();
        router.navigate_to("/", false).unwrap();
        let mut canvas = RecordingCanvas::new();
        router.render(&mut canvas);
        assert_eq!(canvas.texts(), vec!["home"]);
    }

    #[test]
    fn test_reset_returns_to_initial() {
        let mut router = router(true).with_initial_path("/");
        router.init().unwrap();
        router.navigate_to("/settings", false).unwrap();
        router.reset().unwrap();
        assert_eq!(router.stack_paths(), vec!["/"]);
    }

    #[test]
    fn test_failed_reset_keeps_stack() {
        let open = Rc::new(Cell::new(true));
        let gate = Rc::clone(&open);
        let auth: Rc<dyn Authenticator> = Rc::new(move || gate.get());
        let mut router = Router::new(Rc::new(|| true)).with_initial_path("/");
        router.register_route(
            Route::to_page("/", "Home", || Blank("home"))
                .with_guard(LoginGuard::new(auth).redirecting_to("/gone")),
        );
        router.register_route(Route::to_page("/x", "X", || Blank("x")));
        router.init().unwrap();
        router.navigate_to("/x", false).unwrap();

        open.set(false);
        assert_eq!(
            router.reset(),
            Err(NavigationError::RouteNotFound("/gone".into()))
        );
        assert_eq!(router.stack_paths(), vec!["/", "/x"]);
        assert_eq!(router.current_page_name(), Some("x"));
    }

    #[test]
    fn test_reset_through_redirect_clears_stack() {
        let flag = Rc::new(Cell::new(true));
        let auth = Rc::clone(&flag);
        let mut router = Router::new(Rc::new(move || auth.get())).with_initial_path("/");
        router.register_route(Route::to_page("/login", "Login", || Blank("login")));
        router.register_route(Route::to_page("/", "Home", || Blank("home")).requires_auth());
        router.register_route(Route::to_page("/x", "X", || Blank("x")));
        router.init().unwrap();
        router.navigate_to("/x", false).unwrap();

        flag.set(false);
        let nav = router.reset().unwrap();
        assert_eq!(nav.path(), "/login");
        assert_eq!(router.stack_paths(), vec!["/login"]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            NavigationError::RouteNotFound("/x".into()).to_string(),
            "Route not found: /x"
        );
        assert_eq!(
            NavigationError::EmptyStackUnderflow.to_string(),
            "Already at the root page"
        );
    }
}
