use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::bounds::{clamp_logical, clamp_to_mandala};
use crate::camera::{Camera, Point};
use crate::consts::{DRAG_THRESHOLD_PX, WHEEL_ZOOM_STEP};
use crate::doc::{DocError, DocStore, ImageId, Mandala, MandalaConfig, MandalaImage, MandalaSnapshot, Postit, PostitId};
use crate::expansion::{ExitTimer, Expansion, TimerToken};
use crate::filter::{FilterCategory, Filters};
use crate::hit::{self, Rect};
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::radial;
use crate::render;
use crate::settings::LayoutSettings;
use crate::zorder::{ItemKind, OrderedItem, ZOrder};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A post-it drag finished; persist the new position and labels.
    PostitMoved { id: PostitId, coordinates: Point, dimension: String, section: String },
    /// An image drag finished; persist the new position.
    ImageMoved { id: ImageId, coordinates: Point },
    /// The selected item changed.
    SelectionChanged(Option<OrderedItem>),
    /// Call [`EngineCore::expire_exit`] with `token` after `delay_ms`.
    ScheduleExit { token: TimerToken, delay_ms: f64 },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: everything that does not touch the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub mandala: Option<Mandala>,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub zorder: ZOrder,
    pub expansion: Expansion,
    pub filters: Filters,
    pub settings: LayoutSettings,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_settings(LayoutSettings::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: LayoutSettings) -> Self {
        Self {
            doc: DocStore::new(),
            mandala: None,
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            zorder: ZOrder::new(),
            expansion: Expansion::new(settings.exit_animation_ms),
            filters: Filters::new(),
            settings,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Hydrate the engine from a mandala snapshot.
    ///
    /// Expansion, selection, and any gesture in progress are reset. Post-its
    /// whose dimension or section the mandala does not configure are
    /// relabelled from their coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Cycle`] if the snapshot's post-its form a cycle.
    pub fn load_snapshot(&mut self, snapshot: MandalaSnapshot) -> Result<Vec<Action>, DocError> {
        let mut postits = snapshot.postits;
        let config = &snapshot.mandala.configuration;
        let relabelled = postits
            .iter_mut()
            .map(|postit| conform_labels(config, postit))
            .filter(|&changed| changed)
            .count();
        if relabelled > 0 {
            tracing::warn!(mandala = %snapshot.mandala.id, relabelled, "post-its carried unknown labels");
        }
        self.doc.load_snapshot(postits, snapshot.images, snapshot.characters)?;
        tracing::info!(
            mandala = %snapshot.mandala.id,
            postits = self.doc.postit_ids().count(),
            images = self.doc.image_ids().count(),
            "loaded mandala snapshot"
        );
        self.mandala = Some(snapshot.mandala);
        self.expansion = Expansion::new(self.settings.exit_animation_ms);
        self.zorder = ZOrder::new();
        self.ui = UiState::default();
        self.input = InputState::Idle;
        self.zorder.sync(self.doc.postit_ids(), self.doc.image_ids());
        Ok(vec![Action::RenderNeeded])
    }

    /// Apply a remote or local post-it create/update.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnknownDimension`] or [`DocError::UnknownScale`] if a
    /// mandala is loaded and does not configure the post-it's labels, and
    /// [`DocError::Cycle`] if the post-it's parent link forms a cycle.
    pub fn apply_postit(&mut self, postit: Postit, now_ms: f64) -> Result<Vec<Action>, DocError> {
        if let Some(mandala) = &self.mandala {
            mandala.configuration.validate_postit(&postit)?;
        }
        self.doc.insert_postit(postit)?;
        Ok(self.refresh(now_ms))
    }

    /// Apply a post-it deletion.
    pub fn apply_postit_delete(&mut self, id: &PostitId, now_ms: f64) -> Vec<Action> {
        self.doc.remove_postit(id);
        self.forget(OrderedItem::postit(*id));
        self.refresh(now_ms)
    }

    /// Apply a remote or local image create/update.
    pub fn apply_image(&mut self, image: MandalaImage, now_ms: f64) -> Vec<Action> {
        self.doc.insert_image(image);
        self.refresh(now_ms)
    }

    /// Apply an image deletion.
    pub fn apply_image_delete(&mut self, id: &ImageId, now_ms: f64) -> Vec<Action> {
        self.doc.remove_image(id);
        self.forget(OrderedItem::image(*id));
        self.refresh(now_ms)
    }

    // --- Expansion ---

    /// Expand or collapse a post-it's orbit.
    pub fn toggle_expansion(&mut self, id: PostitId, now_ms: f64) -> Vec<Action> {
        let Some(radius) = self.radius() else {
            return Vec::new();
        };
        if self.doc.postit(&id).is_none() {
            return Vec::new();
        }
        let transform = self.settings.postit_transform(radius);
        let params = self.settings.orbit_params();
        let doc = &self.doc;
        let timers = self
            .expansion
            .toggle(id, now_ms, doc, &params, |p| doc.is_root(p).then(|| transform.center_of(p.coordinates)));
        self.with_timers(timers)
    }

    /// Host callback for a previously scheduled exit.
    pub fn expire_exit(&mut self, token: TimerToken) -> Vec<Action> {
        match self.expansion.expire(token) {
            Some(_) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Filters ---

    /// Select or deselect a filter value. Post-its that stop matching are dimmed.
    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) -> Vec<Action> {
        let selected = self.filters.toggle(category, value);
        tracing::debug!(?category, value, selected, "filter toggled");
        vec![Action::RenderNeeded]
    }

    pub fn clear_filters(&mut self) -> Vec<Action> {
        if self.filters.is_empty() {
            return Vec::new();
        }
        self.filters.clear_all();
        vec![Action::RenderNeeded]
    }

    /// Whether `id` is drawn faded because the active filters exclude it.
    #[must_use]
    pub fn is_dimmed(&self, id: &PostitId) -> bool {
        self.doc.postit(id).is_some_and(|p| !self.filters.matches_postit(p))
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Pan so the mandala sits in the middle of the viewport.
    pub fn center_view(&mut self) -> Vec<Action> {
        let Some(radius) = self.radius() else {
            return Vec::new();
        };
        self.camera
            .center_scene(radius * 2.0, self.viewport_width, self.viewport_height);
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button == Button::Middle {
            self.input = InputState::Panning { last_screen: screen_pt };
            return vec![Action::SetCursor("grabbing".into())];
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let world = self.camera.screen_to_world(screen_pt);
        let Some(item) = hit::hit_test(world, &self.zorder, |i| self.item_rect(i)) else {
            self.input = InputState::Panning { last_screen: screen_pt };
            let mut actions = Vec::new();
            if self.ui.selected.take().is_some() {
                actions.push(Action::SelectionChanged(None));
            }
            actions.push(Action::SetCursor("grabbing".into()));
            actions.push(Action::RenderNeeded);
            return actions;
        };

        self.zorder.bring_to_front(item);
        self.ui.selected = Some(item);

        if let (Some(rect), Some(orig)) = (self.draggable_rect(item), self.logical_of(item)) {
            self.input = InputState::DraggingItem {
                item,
                grab_offset: Point::new(world.x - rect.x, world.y - rect.y),
                press_screen: screen_pt,
                orig,
                moved: false,
            };
        }

        vec![Action::SelectionChanged(Some(item)), Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                self.camera.pan_x += screen_pt.x - last_screen.x;
                self.camera.pan_y += screen_pt.y - last_screen.y;
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingItem { item, grab_offset, press_screen, orig, moved } => {
                if !moved && screen_pt.distance_to(press_screen) < DRAG_THRESHOLD_PX {
                    return Vec::new();
                }
                self.input = InputState::DraggingItem { item, grab_offset, press_screen, orig, moved: true };

                let world = self.camera.screen_to_world(screen_pt);
                let top_left = Point::new(world.x - grab_offset.x, world.y - grab_offset.y);
                let Some(logical) = self.constrain(item, top_left) else {
                    return Vec::new();
                };
                self.place(item, logical);

                let mut actions = self.refresh(now_ms);
                actions.push(Action::SetCursor("grabbing".into()));
                actions
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::SetCursor("default".into())],
            InputState::DraggingItem { moved: false, .. } => vec![Action::SetCursor("default".into())],
            InputState::DraggingItem { item, .. } => {
                let mut actions = Vec::new();
                if let Some(action) = self.commit_move(item) {
                    actions.push(action);
                }
                actions.push(Action::SetCursor("default".into()));
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy < 0.0 { WHEEL_ZOOM_STEP } else { 1.0 / WHEEL_ZOOM_STEP };
        self.camera.zoom_at(screen_pt, factor);
        vec![Action::RenderNeeded]
    }

    /// `Escape` cancels a drag in progress and restores the item.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        if key.0 != "Escape" {
            return Vec::new();
        }
        let InputState::DraggingItem { item, orig, .. } = self.input.clone() else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        self.place(item, orig);
        let mut actions = self.refresh(now_ms);
        actions.push(Action::SetCursor("default".into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<OrderedItem> {
        self.ui.selected
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Pixel radius of the loaded mandala.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        self.mandala.as_ref().map(|m| m.radius)
    }

    /// Current bounds of an item in world space, or `None` if it isn't drawn.
    ///
    /// Root post-its and images sit at their logical coordinates; children
    /// are drawn only while their parent is expanded.
    #[must_use]
    pub fn item_rect(&self, item: OrderedItem) -> Option<Rect> {
        let radius = self.radius()?;
        let s = &self.settings;
        match item.kind {
            ItemKind::Postit => {
                let postit = self.doc.postit(&item.id)?;
                if self.doc.is_root(postit) {
                    let tl = s.postit_transform(radius).to_absolute(postit.coordinates);
                    Some(Rect::new(tl.x, tl.y, s.postit_w, s.postit_h))
                } else {
                    let size = s.orbit_params().child_size();
                    let tl = self.expansion.visible_position(&item.id)?;
                    Some(Rect::new(tl.x, tl.y, size, size))
                }
            }
            ItemKind::Image => {
                let image = self.doc.image(&item.id)?;
                let tl = s.image_transform(radius).to_absolute(image.coordinates);
                Some(Rect::new(tl.x, tl.y, s.image_w, s.image_h))
            }
        }
    }

    // --- Internals ---

    /// Bounds of an item that may be dragged (root post-its and images).
    fn draggable_rect(&self, item: OrderedItem) -> Option<Rect> {
        if item.kind == ItemKind::Postit && !self.doc.postit(&item.id).is_some_and(|p| self.doc.is_root(p)) {
            return None;
        }
        self.item_rect(item)
    }

    fn logical_of(&self, item: OrderedItem) -> Option<Point> {
        match item.kind {
            ItemKind::Postit => self.doc.postit(&item.id).map(|p| p.coordinates),
            ItemKind::Image => self.doc.image(&item.id).map(|i| i.coordinates),
        }
    }

    /// Clamp a proposed top-left corner to the mandala and return logical coordinates.
    fn constrain(&self, item: OrderedItem, top_left: Point) -> Option<Point> {
        let radius = self.radius()?;
        let s = &self.settings;
        let (w, h, transform) = match item.kind {
            ItemKind::Postit => (s.postit_w, s.postit_h, s.postit_transform(radius)),
            ItemKind::Image => (s.image_w, s.image_h, s.image_transform(radius)),
        };
        let center = top_left.offset(w / 2.0, h / 2.0);
        let clamped = clamp_to_mandala(center, radius, w, h, 1.0).offset(-w / 2.0, -h / 2.0);
        Some(clamp_logical(transform.to_relative(clamped)))
    }

    fn place(&mut self, item: OrderedItem, logical: Point) {
        match item.kind {
            ItemKind::Postit => self.doc.move_postit(&item.id, logical),
            ItemKind::Image => self.doc.move_image(&item.id, logical),
        };
    }

    /// Re-classify a dragged item and build the persistence action.
    fn commit_move(&mut self, item: OrderedItem) -> Option<Action> {
        match item.kind {
            ItemKind::Postit => {
                let coordinates = self.doc.postit(&item.id)?.coordinates;
                let config = &self.mandala.as_ref()?.configuration;
                let placement = radial::classify(coordinates, config);
                self.doc
                    .relabel_postit(&item.id, &placement.dimension, &placement.section);
                tracing::debug!(
                    id = %item.id,
                    dimension = %placement.dimension,
                    section = %placement.section,
                    "post-it drag committed"
                );
                Some(Action::PostitMoved {
                    id: item.id,
                    coordinates,
                    dimension: placement.dimension,
                    section: placement.section,
                })
            }
            ItemKind::Image => {
                let coordinates = self.doc.image(&item.id)?.coordinates;
                Some(Action::ImageMoved { id: item.id, coordinates })
            }
        }
    }

    fn forget(&mut self, item: OrderedItem) {
        if self.ui.selected == Some(item) {
            self.ui.selected = None;
        }
        let dragging = matches!(self.input, InputState::DraggingItem { item: active, .. } if active == item);
        if dragging {
            self.input = InputState::Idle;
        }
    }

    /// Reconcile z-order and orbit positions with the document.
    fn refresh(&mut self, now_ms: f64) -> Vec<Action> {
        self.zorder.sync(self.doc.postit_ids(), self.doc.image_ids());
        let Some(radius) = self.radius() else {
            return vec![Action::RenderNeeded];
        };
        let transform = self.settings.postit_transform(radius);
        let params = self.settings.orbit_params();
        let doc = &self.doc;
        let timers = self
            .expansion
            .recompute(now_ms, doc, &params, |p| doc.is_root(p).then(|| transform.center_of(p.coordinates)));
        self.with_timers(timers)
    }

    fn with_timers(&self, timers: Vec<ExitTimer>) -> Vec<Action> {
        let delay_ms = self.settings.exit_animation_ms;
        let mut actions: Vec<Action> = timers
            .into_iter()
            .map(|t| Action::ScheduleExit { token: t.token, delay_ms })
            .collect();
        actions.push(Action::RenderNeeded);
        actions
    }
}

/// Replace labels `config` does not know with the sector and ring under the
/// post-it. Returns `true` if the post-it was relabelled.
fn conform_labels(config: &MandalaConfig, postit: &mut Postit) -> bool {
    if config.validate_postit(postit).is_ok() {
        return false;
    }
    let placement = radial::classify(postit.coordinates, config);
    postit.dimension = placement.dimension;
    postit.section = placement.section;
    true
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, settings: LayoutSettings) -> Self {
        Self { canvas, core: EngineCore::with_settings(settings) }
    }

    // --- Delegated data inputs ---

    /// # Errors
    ///
    /// See [`EngineCore::load_snapshot`].
    pub fn load_snapshot(&mut self, snapshot: MandalaSnapshot) -> Result<Vec<Action>, DocError> {
        self.core.load_snapshot(snapshot)
    }

    /// # Errors
    ///
    /// See [`EngineCore::apply_postit`].
    pub fn apply_postit(&mut self, postit: Postit, now_ms: f64) -> Result<Vec<Action>, DocError> {
        self.core.apply_postit(postit, now_ms)
    }

    pub fn apply_postit_delete(&mut self, id: &PostitId, now_ms: f64) -> Vec<Action> {
        self.core.apply_postit_delete(id, now_ms)
    }

    pub fn apply_image(&mut self, image: MandalaImage, now_ms: f64) -> Vec<Action> {
        self.core.apply_image(image, now_ms)
    }

    pub fn apply_image_delete(&mut self, id: &ImageId, now_ms: f64) -> Vec<Action> {
        self.core.apply_image_delete(id, now_ms)
    }

    pub fn toggle_expansion(&mut self, id: PostitId, now_ms: f64) -> Vec<Action> {
        self.core.toggle_expansion(id, now_ms)
    }

    pub fn expire_exit(&mut self, token: TimerToken) -> Vec<Action> {
        self.core.expire_exit(token)
    }

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) -> Vec<Action> {
        self.core.toggle_filter(category, value)
    }

    pub fn clear_filters(&mut self) -> Vec<Action> {
        self.core.clear_filters()
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas
            .set_width((width_css * self.core.dpr).round().max(0.0) as u32);
        self.canvas
            .set_height((height_css * self.core.dpr).round().max(0.0) as u32);
    }

    pub fn center_view(&mut self) -> Vec<Action> {
        self.core.center_view()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers, now_ms)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        self.core.on_key_down(key, modifiers, now_ms)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self, now_ms: f64) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("context is not CanvasRenderingContext2d"))?;
        render::draw(&ctx, &self.core, now_ms)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<OrderedItem> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}
