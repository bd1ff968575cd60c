//! Interaction core for a round touch display
//!
//! Raw touch samples go through the [`GestureClassifier`]; the resulting
//! events drive the [`Router`], which forwards them to the page on top of its
//! stack. Pages build their screens out of [`SpiralGrid`] and
//! [`AngularSlider`] widgets and draw through a [`Canvas`].

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod page;
pub mod render;
pub mod router;
pub mod session;
pub mod slider;
pub mod spiral_grid;

pub use config::{load_config, save_config, ConfigError};
pub use geometry::{Point, Viewport};
pub use gesture::{GestureClassifier, GestureEvent, GestureThresholds, TouchSample};
pub use page::{Page, PageAction};
pub use render::{colors, Canvas, Color};
pub use router::{
    Authenticator, LoginGuard, Navigation, NavigationError, Route, RouteGuard, Router,
};
pub use session::{Session, User};
pub use slider::{AngularSlider, SliderMode};
pub use spiral_grid::{GridGeometry, GridItem, ItemStyle, SpiralGrid};
