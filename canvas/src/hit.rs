#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::zorder::{OrderedItem, ZOrder};

/// Axis-aligned rectangle in world (absolute mandala) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Topmost item under `world_pt`.
///
/// `rect_of` returns the current on-screen bounds of an item, or `None` when
/// the item is not drawn (for example a child of a collapsed post-it).
#[must_use]
pub fn hit_test<F>(world_pt: Point, order: &ZOrder, rect_of: F) -> Option<OrderedItem>
where
    F: Fn(OrderedItem) -> Option<Rect>,
{
    order
        .items()
        .iter()
        .rev()
        .copied()
        .find(|item| rect_of(*item).is_some_and(|r| r.contains(world_pt)))
}
