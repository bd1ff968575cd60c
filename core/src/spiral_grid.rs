//! Spiral hexagonal grid
//!
//! Items are laid out in concentric hexagonal rings around a center point:
//! ring 0 is the single center slot, ring `k` holds `6k` slots. An item's
//! position depends only on its index, so re-adding the same items always
//! reproduces the same layout.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point, Viewport};
use crate::render::{colors, Canvas, Color};

/// Extra room around an item when deciding whether it is on screen
pub const VISIBILITY_MARGIN: f32 = 10.0;
/// Rotation applied to every ring so neighbouring rings stagger
const RING_OFFSET: f32 = PI / 6.0;
/// Gap between an item's edge and its label
const LABEL_GAP: f32 = 12.0;

/// Item size and spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    pub item_radius: f32,
    pub spacing: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            item_radius: 40.0,
            spacing: 10.0,
        }
    }
}

impl GridGeometry {
    /// Distance between consecutive rings
    pub fn ring_step(&self) -> f32 {
        2.0 * self.item_radius + self.spacing
    }
}

/// Number of slots in a ring
pub fn ring_size(ring: usize) -> usize {
    if ring == 0 {
        1
    } else {
        6 * ring
    }
}

/// Slots in rings `0..=ring`
fn cumulative_through(ring: usize) -> usize {
    1 + 3 * ring * (ring + 1)
}

/// Ring and slot-within-ring for an item index
pub fn ring_for_index(index: usize) -> (usize, usize) {
    if index == 0 {
        return (0, 0);
    }
    let mut ring = 1;
    while index >= cumulative_through(ring) {
        ring += 1;
    }
    (ring, index - cumulative_through(ring - 1))
}

/// Unscrolled position of the item at `index`
pub fn position_for_index(center: Point, geometry: &GridGeometry, index: usize) -> Point {
    let (ring, slot) = ring_for_index(index);
    if ring == 0 {
        return center;
    }
    let theta = 2.0 * PI * slot as f32 / ring_size(ring) as f32 + RING_OFFSET;
    let radius = ring as f32 * geometry.ring_step();
    Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

/// Colors for one grid item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    pub fill: Color,
    pub outline: Color,
    pub text: Color,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            fill: colors::DARK_BLUE,
            outline: colors::BORDER,
            text: colors::TEXT,
        }
    }
}

impl ItemStyle {
    pub fn filled(fill: Color) -> Self {
        Self {
            fill,
            ..Self::default()
        }
    }
}

/// Tap handler attached to an item
pub type ItemCallback<A> = Box<dyn FnMut() -> A>;

/// One entry of a [`SpiralGrid`]
pub struct GridItem<A = ()> {
    pub label: String,
    pub style: ItemStyle,
    on_tap: Option<ItemCallback<A>>,

    position: Point,
    ring: usize,
    index: usize,
    visible: bool,
}

impl<A> std::fmt::Debug for GridItem<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridItem")
            .field("label", &self.label)
            .field("index", &self.index)
            .field("ring", &self.ring)
            .field("position", &self.position)
            .field("visible", &self.visible)
            .field("has_callback", &self.on_tap.is_some())
            .finish()
    }
}

impl<A> GridItem<A> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ItemStyle::default(),
            on_tap: None,
            position: Point::default(),
            ring: 0,
            index: 0,
            visible: false,
        }
    }

    pub fn with_style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_tap(mut self, callback: impl FnMut() -> A + 'static) -> Self {
        self.on_tap = Some(Box::new(callback));
        self
    }

    /// Layout position, before scrolling
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn ring(&self) -> usize {
        self.ring
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Items arranged in hexagonal rings, with panning and hit-testing
///
/// `A` is what a tapped item's callback hands back to the caller.
pub struct SpiralGrid<A = ()> {
    center: Point,
    geometry: GridGeometry,
    viewport: Viewport,
    items: Vec<GridItem<A>>,
    scroll: Point,
    max_scroll: Point,
}

impl<A> std::fmt::Debug for SpiralGrid<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpiralGrid")
            .field("center", &self.center)
            .field("geometry", &self.geometry)
            .field("items", &self.items)
            .field("scroll", &self.scroll)
            .field("max_scroll", &self.max_scroll)
            .finish()
    }
}

impl<A> SpiralGrid<A> {
    pub fn new(center: Point, geometry: GridGeometry) -> Self {
        Self {
            center,
            geometry,
            viewport: Viewport::default(),
            items: Vec::new(),
            scroll: Point::default(),
            max_scroll: Point::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self.relayout();
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&GridItem<A>> {
        self.items.get(index)
    }

    pub fn items(&self) -> impl Iterator<Item = &GridItem<A>> {
        self.items.iter()
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|item| item.visible).count()
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Largest scroll magnitude per axis
    pub fn max_scroll(&self) -> Point {
        self.max_scroll
    }

    /// Append an item and return its index
    pub fn add_item(&mut self, item: GridItem<A>) -> usize {
        self.items.push(item);
        self.relayout();
        self.items.len() - 1
    }

    /// Remove the item at `index`; later items shift inward
    pub fn remove_item(&mut self, index: usize) -> Option<GridItem<A>> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.relayout();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.scroll = Point::default();
        self.relayout();
    }

    /// Pan by a drag delta, clamped to the scroll bounds
    pub fn handle_drag(&mut self, dx: f32, dy: f32) {
        self.set_scroll_offset(self.scroll.x + dx, self.scroll.y + dy);
    }

    pub fn set_scroll_offset(&mut self, x: f32, y: f32) {
        self.scroll = Point::new(
            x.clamp(-self.max_scroll.x, self.max_scroll.x),
            y.clamp(-self.max_scroll.y, self.max_scroll.y),
        );
        self.refresh_visibility();
    }

    /// On-screen position of an item, scroll applied
    pub fn screen_position(&self, index: usize) -> Option<Point> {
        self.items
            .get(index)
            .map(|item| item.position.offset(self.scroll.x, self.scroll.y))
    }

    /// Index of the first visible item whose circle contains `(x, y)`
    pub fn item_at_position(&self, x: f32, y: f32) -> Option<usize> {
        let touch = Point::new(x, y);
        let radius = self.geometry.item_radius;
        self.items
            .iter()
            .filter(|item| item.visible)
            .find(|item| {
                let on_screen = item.position.offset(self.scroll.x, self.scroll.y);
                geometry::distance(on_screen, touch) <= radius
            })
            .map(|item| item.index)
    }

    /// Fire the tapped item's callback and return what it produced
    pub fn handle_tap(&mut self, x: f32, y: f32) -> Option<A> {
        let index = self.item_at_position(x, y)?;
        let item = &mut self.items[index];
        log::debug!("grid tap on '{}' (#{})", item.label, index);
        item.on_tap.as_mut().map(|callback| callback())
    }

    fn relayout(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.index = index;
            item.ring = ring_for_index(index).0;
            item.position = position_for_index(self.center, &self.geometry, index);
        }
        self.recompute_scroll_bounds();
        // bounds may have shrunk under the current offset
        self.set_scroll_offset(self.scroll.x, self.scroll.y);
        log::debug!(
            "grid relayout: {} items, max scroll ({:.0}, {:.0})",
            self.items.len(),
            self.max_scroll.x,
            self.max_scroll.y
        );
    }

    fn recompute_scroll_bounds(&mut self) {
        let Some(first) = self.items.first() else {
            self.max_scroll = Point::default();
            return;
        };

        let (mut min_x, mut max_x) = (first.position.x, first.position.x);
        let (mut min_y, mut max_y) = (first.position.y, first.position.y);
        for item in &self.items[1..] {
            min_x = min_x.min(item.position.x);
            max_x = max_x.max(item.position.x);
            min_y = min_y.min(item.position.y);
            max_y = max_y.max(item.position.y);
        }

        let pad = 2.0 * self.geometry.item_radius;
        let extent_x = max_x - min_x + pad;
        let extent_y = max_y - min_y + pad;
        self.max_scroll = Point::new(
            ((extent_x - self.viewport.width) / 2.0).max(0.0),
            ((extent_y - self.viewport.height) / 2.0).max(0.0),
        );
    }

    fn refresh_visibility(&mut self) {
        let scroll = self.scroll;
        let radius = self.geometry.item_radius;
        let viewport = self.viewport;
        for item in &mut self.items {
            let on_screen = item.position.offset(scroll.x, scroll.y);
            item.visible = viewport.intersects_circle(on_screen, radius, VISIBILITY_MARGIN);
        }
    }

    /// Draw every visible item with its label underneath
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let radius = self.geometry.item_radius;
        for item in self.items.iter().filter(|item| item.visible) {
            let at = item.position.offset(self.scroll.x, self.scroll.y);
            canvas.fill_circle(at, radius, item.style.fill);
            canvas.stroke_circle(at, radius, item.style.outline);
            canvas.text(at.offset(0.0, radius + LABEL_GAP), &item.label, 14.0, item.style.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SCREEN_CENTER;
    use crate::render::RecordingCanvas;

    const EPS: f32 = 1e-3;

    fn grid_with(count: usize) -> SpiralGrid<usize> {
        let mut grid = SpiralGrid::new(SCREEN_CENTER, GridGeometry::default());
        for i in 0..count {
            grid.add_item(GridItem::new(format!("item {}", i)).on_tap(move || i));
        }
        grid
    }

    #[test]
    fn test_ring_for_index() {
        assert_eq!(ring_for_index(0), (0, 0));
        assert_eq!(ring_for_index(1), (1, 0));
        assert_eq!(ring_for_index(6), (1, 5));
        assert_eq!(ring_for_index(7), (2, 0));
        assert_eq!(ring_for_index(18), (2, 11));
        assert_eq!(ring_for_index(19), (3, 0));
        assert_eq!(ring_for_index(91), (6, 0));
    }

    #[test]
    fn test_seven_items_fill_first_ring() {
        let grid = grid_with(7);
        let center = grid.item(0).unwrap().position();
        assert!(geometry::distance(center, SCREEN_CENTER) < EPS);

        let mut angles = Vec::new();
        for i in 1..7 {
            let item = grid.item(i).unwrap();
            assert_eq!(item.ring(), 1);
            assert!((geometry::distance(item.position(), SCREEN_CENTER) - 90.0).abs() < EPS);
            angles.push(geometry::dial_angle(SCREEN_CENTER, item.position()));
        }
        for pair in angles.windows(2) {
            let step = geometry::clockwise_delta(pair[0], pair[1]);
            assert!((step - 60.0).abs() < 0.01, "step {}", step);
        }
    }

    #[test]
    fn test_empty_grid() {
        let mut grid: SpiralGrid = SpiralGrid::new(SCREEN_CENTER, GridGeometry::default());
        assert!(grid.is_empty());
        assert_eq!(grid.max_scroll(), Point::default());
        assert!(grid.item_at_position(180.0, 180.0).is_none());
        assert!(grid.handle_tap(180.0, 180.0).is_none());
    }

    #[test]
    fn test_small_grid_does_not_scroll() {
        let mut grid = grid_with(7);
        assert_eq!(grid.max_scroll(), Point::default());
        grid.handle_drag(50.0, -50.0);
        assert_eq!(grid.scroll_offset(), Point::default());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut grid = grid_with(19);
        let max = grid.max_scroll();
        assert!((max.x - 40.0).abs() < 0.01);
        assert!((max.y - 40.0).abs() < 0.01);

        grid.handle_drag(1000.0, -1000.0);
        assert!((grid.scroll_offset().x - 40.0).abs() < 0.01);
        assert!((grid.scroll_offset().y + 40.0).abs() < 0.01);

        grid.set_scroll_offset(-5.0, 3.0);
        assert_eq!(grid.scroll_offset(), Point::new(-5.0, 3.0));
    }

    #[test]
    fn test_tap_hits_item_and_returns_callback_result() {
        let mut grid = grid_with(7);
        assert_eq!(grid.item_at_position(185.0, 175.0), Some(0));
        // item 2 sits straight below the center
        assert_eq!(grid.handle_tap(180.0, 268.0), Some(2));
        assert_eq!(grid.item_at_position(5.0, 5.0), None);
    }

    #[test]
    fn test_offscreen_items_are_culled_until_scrolled_in() {
        let mut grid = grid_with(37);
        // ring 3, straight down: (180, 450)
        let far = grid.item(22).unwrap();
        assert_eq!(far.ring(), 3);
        assert!(!far.is_visible());
        assert!(grid.item_at_position(180.0, 450.0).is_none());

        grid.handle_drag(0.0, -100.0);
        assert!(grid.item(22).unwrap().is_visible());
        assert_eq!(grid.item_at_position(180.0, 350.0), Some(22));
    }

    #[test]
    fn test_remove_shifts_indices_and_relayouts() {
        let mut grid = grid_with(8);
        let before = grid.item(1).unwrap().position();
        let removed = grid.remove_item(0).unwrap();
        assert_eq!(removed.label, "item 0");
        assert_eq!(grid.len(), 7);
        assert_eq!(grid.item(0).unwrap().label, "item 1");
        assert!(geometry::distance(grid.item(0).unwrap().position(), SCREEN_CENTER) < EPS);
        assert_eq!(grid.item(1).unwrap().position(), before);
        assert!(grid.remove_item(40).is_none());
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut grid = grid_with(19);
        grid.handle_drag(20.0, 20.0);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.scroll_offset(), Point::default());
        assert_eq!(grid.max_scroll(), Point::default());
    }

    #[test]
    fn test_item_without_callback() {
        let mut grid: SpiralGrid<u8> = SpiralGrid::new(SCREEN_CENTER, GridGeometry::default());
        grid.add_item(GridItem::new("plain"));
        assert_eq!(grid.item_at_position(180.0, 180.0), Some(0));
        assert_eq!(grid.handle_tap(180.0, 180.0), None);
    }

    #[test]
    fn test_render_only_visible_items() {
        let grid = grid_with(37);
        let mut canvas = RecordingCanvas::new();
        grid.render(&mut canvas);
        assert_eq!(canvas.texts().len(), grid.visible_count());
        assert!(grid.visible_count() < 37);
        assert!(canvas.contains_text("item 0"));
        assert!(!canvas.contains_text("item 22"));
    }
}
