//! Paint and interaction order over post-its and images.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of entity an ordered handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Postit,
    Image,
}

/// Lightweight reference to a post-it or image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderedItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub id: Uuid,
}

impl OrderedItem {
    #[must_use]
    pub fn postit(id: Uuid) -> Self {
        Self { kind: ItemKind::Postit, id }
    }

    #[must_use]
    pub fn image(id: Uuid) -> Self {
        Self { kind: ItemKind::Image, id }
    }
}

/// Bottom-to-top stacking order. The last item is drawn on top.
#[derive(Debug, Clone, Default)]
pub struct ZOrder {
    items: Vec<OrderedItem>,
}

impl ZOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `item` to the top, adding it if absent.
    pub fn bring_to_front(&mut self, item: OrderedItem) {
        self.items.retain(|existing| *existing != item);
        self.items.push(item);
    }

    /// Reconcile with the current entity set.
    ///
    /// Survivors keep their relative order, stale handles are dropped, and
    /// new post-its then new images are appended in the given order.
    pub fn sync<P, I>(&mut self, postits: P, images: I)
    where
        P: IntoIterator<Item = Uuid>,
        I: IntoIterator<Item = Uuid>,
    {
        let current: Vec<OrderedItem> = postits
            .into_iter()
            .map(OrderedItem::postit)
            .chain(images.into_iter().map(OrderedItem::image))
            .collect();
        let valid: HashSet<OrderedItem> = current.iter().copied().collect();

        let mut seen = HashSet::with_capacity(current.len());
        self.items.retain(|item| valid.contains(item) && seen.insert(*item));

        for item in current {
            if seen.insert(item) {
                self.items.push(item);
            }
        }
    }

    /// Items from bottom to top.
    #[must_use]
    pub fn items(&self) -> &[OrderedItem] {
        &self.items
    }

    /// Position of `item` in the stack (0 = bottom).
    #[must_use]
    pub fn rank_of(&self, item: OrderedItem) -> Option<usize> {
        self.items.iter().position(|existing| *existing == item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
