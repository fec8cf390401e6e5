//! Pointer gestures on the mandala.
//!
//! The host forwards raw browser events as `Button`, `Modifiers`, `Key` and
//! `WheelDelta`. Between pointer-down and pointer-up the engine remembers the
//! gesture in an `InputState`, which carries whatever the drag needs to place
//! the item and to undo it on `Escape`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::zorder::OrderedItem;

/// Modifier keys reported with a pointer or key event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on macOS.
    pub meta: bool,
}

/// Which pointer button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Selects and drags items, or pans when pressed on empty space.
    Primary,
    /// Always pans.
    Middle,
    /// Ignored by the engine.
    Secondary,
}

/// `KeyboardEvent.key`, e.g. `"Escape"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Scroll amounts in CSS pixels. Positive `dy` scrolls down and zooms out.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Interaction state the renderer reads.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected: Option<OrderedItem>,
}

/// Gesture in progress.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    #[default]
    Idle,
    /// Dragging the camera across the canvas.
    Panning { last_screen: Point },
    /// Pressed on a root post-it or an image.
    DraggingItem {
        item: OrderedItem,
        /// World-space offset from the item's top-left corner to the pointer.
        grab_offset: Point,
        /// Where the press happened, in screen pixels.
        press_screen: Point,
        /// Logical coordinates before the drag; `Escape` restores them.
        orig: Point,
        /// Set once the pointer leaves the drag threshold.
        moved: bool,
    },
}
