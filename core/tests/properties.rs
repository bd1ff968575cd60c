//! Property-based tests for gesture classification, widget layout and
//! router invariants.

use std::rc::Rc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use shell_core::geometry;
use shell_core::gesture::{GestureClassifier, GestureEvent, TouchSample};
use shell_core::page::{Page, PageAction};
use shell_core::render::Canvas;
use shell_core::router::{NavigationError, Route, RouteGuard, Router};
use shell_core::slider::{AngularSlider, ACTIVE_SWEEP};
use shell_core::spiral_grid::{self, GridGeometry, GridItem, SpiralGrid};

struct Plain;

impl Page for Plain {
    fn name(&self) -> &str {
        "plain"
    }

    fn render(&self, _canvas: &mut dyn Canvas) {}

    fn handle_touch(&mut self, _event: GestureEvent, _touch: &TouchSample) -> PageAction {
        PageAction::None
    }
}

struct Deny(&'static str);

impl RouteGuard for Deny {
    fn can_activate(&self, _route: &Route) -> bool {
        false
    }

    fn redirect_path(&self) -> &str {
        self.0
    }
}

fn router() -> Router {
    let mut router = Router::new(Rc::new(|| true));
    router.register_route(Route::to_page("/lock", "Lock", || Plain));
    router.register_route(Route::to_page("/", "Home", || Plain));
    router.register_route(Route::to_page("/vault", "Vault", || Plain).with_guard(Deny("/attic")));
    router.register_route(Route::to_page("/attic", "Attic", || Plain).with_guard(Deny("/vault")));
    router.register_route(Route::to_page("/mirror", "Mirror", || Plain).with_guard(Deny("/mirror")));
    router
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A short, nearly stationary press is exactly one tap.
    #[test]
    fn short_press_is_single_tap(
        x in 0i32..360,
        y in 0i32..360,
        jitter_x in -9i32..=9,
        jitter_y in -9i32..=9,
        hold_ms in 0u64..300,
    ) {
        let origin = Instant::now();
        let mut classifier = GestureClassifier::default();
        let events = [
            classifier.update(TouchSample::pressed(x, y, origin)),
            classifier.update(TouchSample::pressed(
                x + jitter_x,
                y + jitter_y,
                origin + Duration::from_millis(hold_ms / 2),
            )),
            classifier.update(TouchSample::released(origin + Duration::from_millis(hold_ms))),
        ];
        let fired: Vec<_> = events.iter().filter(|e| !e.is_none()).collect();
        prop_assert_eq!(fired, vec![&GestureEvent::Tap]);
    }

    /// Holding still past the long-press time fires once and never taps.
    #[test]
    fn held_press_is_single_long_press(
        x in 20i32..340,
        y in 20i32..340,
        jitter in -9i32..=9,
        hold_ms in 850u64..3000,
    ) {
        let origin = Instant::now();
        let mut classifier = GestureClassifier::default();
        let mut events = vec![classifier.update(TouchSample::pressed(x, y, origin))];
        let mut t = 33;
        while t <= hold_ms {
            let offset = if (t / 33) % 2 == 0 { jitter } else { 0 };
            events.push(classifier.update(TouchSample::pressed(
                x + offset,
                y - offset,
                origin + Duration::from_millis(t),
            )));
            t += 33;
        }
        events.push(classifier.update(TouchSample::released(origin + Duration::from_millis(t))));

        let long_presses = events.iter().filter(|e| **e == GestureEvent::LongPress).count();
        prop_assert_eq!(long_presses, 1);
        prop_assert!(!events.contains(&GestureEvent::Tap));
        prop_assert!(!events.contains(&GestureEvent::DragStart));
    }

    /// `set_value` inside the range reads back and keeps the angle on the arc.
    #[test]
    fn slider_value_and_angle_agree(
        min in -100.0f32..0.0,
        span in 1.0f32..500.0,
        fraction in 0.0f32..=1.0,
    ) {
        let max = min + span;
        let value = (min + fraction * span).clamp(min, max);
        let mut slider = AngularSlider::new(geometry::SCREEN_CENTER, 120.0, 90.0);
        slider.set_range(min, max);
        slider.set_value(value);

        prop_assert!((slider.value() - value).abs() < 1e-3);
        let along = geometry::clockwise_delta(slider.start_angle(), slider.angle());
        let along = if along > 359.0 { 0.0 } else { along };
        prop_assert!(along <= ACTIVE_SWEEP + 0.01, "angle {} outside arc", slider.angle());
        let expected = (value - min) / span * ACTIVE_SWEEP;
        prop_assert!((along - expected).abs() < 0.05, "along {} expected {}", along, expected);
    }

    /// Same items, same layout.
    #[test]
    fn grid_layout_is_deterministic(count in 0usize..80, radius in 10.0f32..60.0, spacing in 0.0f32..20.0) {
        let layout = GridGeometry { item_radius: radius, spacing };
        let build = || {
            let mut grid: SpiralGrid = SpiralGrid::new(geometry::SCREEN_CENTER, layout);
            for i in 0..count {
                grid.add_item(GridItem::new(format!("{}", i)));
            }
            grid
        };
        let (a, b) = (build(), build());
        for i in 0..count {
            prop_assert_eq!(a.item(i).map(|it| it.position()), b.item(i).map(|it| it.position()));
        }
        prop_assert_eq!(a.max_scroll(), b.max_scroll());
    }

    /// Unknown paths never touch the stack.
    #[test]
    fn unknown_path_leaves_stack(path in "/[a-z]{1,12}", clear in any::<bool>()) {
        prop_assume!(!["/lock", "/vault", "/attic", "/mirror"].contains(&path.as_str()));
        let mut router = router();
        router.init().unwrap();
        router.navigate_to("/", false).unwrap();
        let before: Vec<String> = router.stack_paths().iter().map(|p| p.to_string()).collect();

        let result = router.navigate_to(&path, clear);
        prop_assert_eq!(result, Err(NavigationError::RouteNotFound(path.clone())));
        prop_assert_eq!(router.stack_paths(), before.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Guards that always deny redirect at most once and then give up.
    #[test]
    fn denying_guards_never_loop(target in prop::sample::select(vec!["/vault", "/attic", "/mirror"]), clear in any::<bool>()) {
        let mut router = router();
        router.init().unwrap();
        let result = router.navigate_to(target, clear);
        prop_assert_eq!(result, Err(NavigationError::AuthorizationDenied(target.to_string())));
        prop_assert_eq!(router.stack_paths(), vec!["/lock"]);
    }
}

#[test]
fn ring_sizes_are_six_per_ring() {
    let mut counts = vec![0usize; 21];
    for index in 0..(1 + 3 * 20 * 21) {
        let (ring, slot) = spiral_grid::ring_for_index(index);
        assert!(slot < spiral_grid::ring_size(ring));
        counts[ring] += 1;
    }
    assert_eq!(counts[0], 1);
    for (ring, count) in counts.iter().enumerate().skip(1) {
        assert_eq!(*count, 6 * ring, "ring {}", ring);
    }
}

#[test]
fn back_at_root_fails_without_mutation() {
    let mut router = router();
    router.init().unwrap();
    for _ in 0..3 {
        assert_eq!(router.go_back(), Err(NavigationError::EmptyStackUnderflow));
        assert_eq!(router.stack_paths(), vec!["/lock"]);
    }
}
