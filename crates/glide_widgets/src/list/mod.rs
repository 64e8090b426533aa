//! List view
//!
//! A [`ScrollView`] specialised to a single ordered collection. The
//! application supplies a render function that builds one node per item;
//! the list measures and places those nodes, keeps the scroll content size
//! in step, and turns clean taps into item clicks.
//!
//! Every structural change (items, render function, spacing, fallback
//! height, orientation, alignment, viewport size) rebuilds and re-lays out
//! all items.
//!
//! `ListView` dereferences to its [`ScrollView`], so scroll operations such
//! as `scroll_to`, `tick` and `scroll_position` are available directly.

pub mod layout;
pub mod tap;

use std::ops::{Deref, DerefMut};

use glide_core::events::event_types;
use glide_core::{Cursor, Event, EventData, NodeId, Point, SceneGraph, Size};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{Result, WidgetError};
use crate::options::{ItemAlign, ListViewOptions, ScrollDirection};
use crate::scroll::ScrollView;
use layout::{ItemPlacement, LayoutParams};
use tap::{PointerKind, TapTracker};

/// Builds the node for one item
pub type RenderItem<T> = Box<dyn Fn(&T, usize, &mut dyn SceneGraph) -> NodeId>;

/// Receives an item and its index
pub type ItemCallback<T> = Box<dyn FnMut(&T, usize)>;

/// A rendered item's node and the slot it was placed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedItem {
    pub node: NodeId,
    pub slot: ItemPlacement,
}

pub struct ListView<T> {
    scroll: ScrollView,
    options: ListViewOptions,
    items: Vec<T>,
    render_item: Option<RenderItem<T>>,
    on_item_click: Option<ItemCallback<T>>,
    on_item_hover: Option<ItemCallback<T>>,

    items_container: NodeId,
    rendered: FxHashMap<usize, RenderedItem>,
    taps: TapTracker,
    hovered: Option<usize>,
}

impl<T> std::fmt::Debug for ListView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("scroll", &self.scroll)
            .field("items", &self.items.len())
            .field("horizontal", &self.options.horizontal)
            .field("item_align", &self.options.item_align)
            .finish()
    }
}

impl<T> Deref for ListView<T> {
    type Target = ScrollView;

    fn deref(&self) -> &ScrollView {
        &self.scroll
    }
}

impl<T> DerefMut for ListView<T> {
    fn deref_mut(&mut self) -> &mut ScrollView {
        &mut self.scroll
    }
}

impl<T> ListView<T> {
    /// Create an empty list with no render function
    pub fn new(scene: &mut dyn SceneGraph, options: ListViewOptions) -> Self {
        let mut options = options.sanitized();
        options.scroll.direction = Some(options.scroll_direction());

        let scroll = ScrollView::new(scene, options.scroll.clone());
        let items_container = scene.create_group();
        scene.add_child(scroll.content_container(), items_container);

        let mut list = Self {
            scroll,
            taps: TapTracker::new(options.tap_threshold),
            options,
            items: Vec::new(),
            render_item: None,
            on_item_click: None,
            on_item_hover: None,
            items_container,
            rendered: FxHashMap::default(),
            hovered: None,
        };
        list.render_list(scene);
        list
    }

    /// Create a list with items and a render function, laid out immediately
    pub fn with_items<F>(
        scene: &mut dyn SceneGraph,
        options: ListViewOptions,
        items: Vec<T>,
        render_item: F,
    ) -> Self
    where
        F: Fn(&T, usize, &mut dyn SceneGraph) -> NodeId + 'static,
    {
        let mut list = Self::new(scene, options);
        list.items = items;
        list.render_item = Some(Box::new(render_item));
        list.render_list(scene);
        list
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn set_items(&mut self, scene: &mut dyn SceneGraph, items: Vec<T>) {
        self.items = items;
        self.render_list(scene);
    }

    pub fn add_item(&mut self, scene: &mut dyn SceneGraph, item: T) {
        self.items.push(item);
        self.render_list(scene);
    }

    pub fn remove_item(&mut self, scene: &mut dyn SceneGraph, index: usize) -> Result<T> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.render_list(scene);
        Ok(removed)
    }

    /// Replace an item, returning the previous one
    pub fn update_item(&mut self, scene: &mut dyn SceneGraph, index: usize, item: T) -> Result<T> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.items[index], item);
        self.render_list(scene);
        Ok(previous)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn list_options(&self) -> &ListViewOptions {
        &self.options
    }

    pub fn set_render_item<F>(&mut self, scene: &mut dyn SceneGraph, render_item: F)
    where
        F: Fn(&T, usize, &mut dyn SceneGraph) -> NodeId + 'static,
    {
        self.render_item = Some(Box::new(render_item));
        self.render_list(scene);
    }

    pub fn set_item_height(&mut self, scene: &mut dyn SceneGraph, height: f32) {
        self.options.item_height = height;
        self.options = self.options.clone().sanitized();
        self.render_list(scene);
    }

    pub fn set_item_spacing(&mut self, scene: &mut dyn SceneGraph, spacing: f32) {
        self.options.item_spacing = spacing;
        self.options = self.options.clone().sanitized();
        self.render_list(scene);
    }

    pub fn set_horizontal(&mut self, scene: &mut dyn SceneGraph, horizontal: bool) {
        self.options.horizontal = horizontal;
        let direction = if horizontal {
            ScrollDirection::Horizontal
        } else {
            ScrollDirection::Vertical
        };
        self.options.scroll.direction = Some(direction);
        self.scroll.set_direction(scene, direction);
        self.render_list(scene);
    }

    pub fn is_horizontal(&self) -> bool {
        self.options.horizontal
    }

    pub fn set_item_align(&mut self, scene: &mut dyn SceneGraph, align: ItemAlign) {
        self.options.item_align = align;
        self.render_list(scene);
    }

    pub fn item_align(&self) -> ItemAlign {
        self.options.item_align
    }

    /// Register the click callback
    ///
    /// Clicks fire on a clean tap: press and release on the same item with
    /// little travel in between.
    pub fn on_item_click<F>(&mut self, callback: F)
    where
        F: FnMut(&T, usize) + 'static,
    {
        self.on_item_click = Some(Box::new(callback));
    }

    /// Register the hover callback, fired once each time the mouse enters an
    /// item
    pub fn on_item_hover<F>(&mut self, callback: F)
    where
        F: FnMut(&T, usize) + 'static,
    {
        self.on_item_hover = Some(Box::new(callback));
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Re-run layout over the current items
    pub fn do_layout(&mut self, scene: &mut dyn SceneGraph) {
        self.render_list(scene);
    }

    /// Resize the viewport and re-lay out
    pub fn resize(&mut self, scene: &mut dyn SceneGraph, size: Size) {
        self.scroll.resize(scene, size);
        self.render_list(scene);
    }

    pub fn items_container(&self) -> NodeId {
        self.items_container
    }

    pub fn item_node(&self, index: usize) -> Option<NodeId> {
        self.rendered.get(&index).map(|item| item.node)
    }

    /// Slot an item was placed in, relative to the items container
    pub fn item_slot(&self, index: usize) -> Option<ItemPlacement> {
        self.rendered.get(&index).map(|item| item.slot)
    }

    /// Rendered items in index order
    pub fn placements(&self) -> Vec<(usize, RenderedItem)> {
        let mut placements: Vec<_> = self
            .rendered
            .iter()
            .map(|(&index, &item)| (index, item))
            .collect();
        placements.sort_by_key(|(index, _)| *index);
        placements
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            horizontal: self.options.horizontal,
            spacing: self.options.item_spacing,
            align: self.options.item_align,
            fallback_extent: self.options.item_height,
            viewport: self.scroll.viewport_size(),
        }
    }

    fn clear_rendered(&mut self, scene: &mut dyn SceneGraph) {
        scene.destroy_children(self.items_container);
        self.rendered.clear();
        self.taps.clear();
        if self.hovered.take().is_some() && self.on_item_click.is_some() {
            scene.set_cursor(Cursor::Default);
        }
    }

    fn render_list(&mut self, scene: &mut dyn SceneGraph) {
        self.clear_rendered(scene);
        let params = self.layout_params();

        let nodes: Vec<NodeId> = match self.render_item.as_ref() {
            Some(render) => self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| render(item, index, scene))
                .collect(),
            None => Vec::new(),
        };
        let sizes: Vec<Size> = nodes.iter().map(|&node| scene.size(node)).collect();
        let layout = layout::compute(&sizes, &params);

        for (index, (&node, slot)) in nodes.iter().zip(&layout.placements).enumerate() {
            if params.align == ItemAlign::Stretch {
                scene.set_size(node, slot.size);
            }
            // Nodes drawn around an offset origin keep their visual box in
            // the slot
            let offset = scene.offset(node);
            let position = if offset.x > 0.0 || offset.y > 0.0 {
                slot.origin + offset
            } else {
                slot.origin
            };
            scene.set_position(node, position);
            scene.add_child(self.items_container, node);
            self.rendered.insert(index, RenderedItem { node, slot: *slot });
        }

        let content = layout.content_size(&params);
        self.scroll
            .set_content_size(scene, content.width, content.height);

        if self.options.auto_height && !self.options.horizontal && !nodes.is_empty() {
            let viewport = self.scroll.viewport_size();
            let height = layout.primary_extent.min(self.options.auto_height_cap);
            if height != viewport.height {
                self.scroll.resize(scene, Size::new(viewport.width, height));
            }
        }

        scene.request_redraw();
        debug!(
            "list laid out {} items, content {:?}",
            nodes.len(),
            content
        );
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Scroll so an item's leading edge sits at the viewport's leading edge
    ///
    /// The target is clamped like any other scroll. Animated scrolling
    /// advances in [`ScrollView::tick`].
    pub fn scroll_to_item(
        &mut self,
        scene: &mut dyn SceneGraph,
        index: usize,
        animated: bool,
    ) -> Result<()> {
        self.check_index(index)?;
        let Some(item) = self.rendered.get(&index) else {
            return Ok(());
        };
        let item_origin = scene.absolute_origin(item.node);
        let content_origin = scene.absolute_origin(self.scroll.content_container());
        let relative = item_origin - content_origin;

        let current = self.scroll.scroll_position();
        let (x, y) = if self.options.horizontal {
            (relative.x, current.y)
        } else {
            (current.x, relative.y)
        };

        if animated {
            self.scroll.animate_scroll_to(
                x,
                y,
                self.options.scroll_to_item_duration_ms,
                self.options.scroll_to_item_steps,
            );
        } else {
            self.scroll.scroll_to(scene, x, y);
        }
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route an input event through item interaction and then scrolling
    pub fn handle_event(&mut self, scene: &mut dyn SceneGraph, event: &mut Event) -> bool {
        if self.scroll.is_destroyed() || !self.scroll.options().listening {
            return false;
        }
        let kind = if event.is_touch() {
            PointerKind::Touch
        } else {
            PointerKind::Mouse
        };

        match event.event_type {
            event_types::POINTER_DOWN | event_types::TOUCH_START => {
                if self.on_item_click.is_some() {
                    if let Some(point) = event.position() {
                        if let Some(index) = self.item_at(scene, point) {
                            self.taps.press(kind, index, point);
                        }
                    }
                }
            }
            event_types::POINTER_UP | event_types::TOUCH_END => {
                if let Some(point) = release_point(event) {
                    self.release_tap(scene, kind, point, event);
                }
            }
            event_types::TOUCH_CANCEL => self.taps.cancel(PointerKind::Touch),
            event_types::POINTER_MOVE | event_types::POINTER_ENTER => {
                if let Some(point) = event.position() {
                    let index = self.item_at(scene, point);
                    self.set_hovered(scene, index);
                }
            }
            event_types::POINTER_LEAVE => {
                self.taps.cancel(PointerKind::Mouse);
                self.set_hovered(scene, None);
            }
            event_types::RESIZE => {
                if let EventData::Resize { width, height } = event.data {
                    self.resize(scene, Size::new(width, height));
                    return true;
                }
            }
            _ => {}
        }

        self.scroll.handle_event(scene, event)
    }

    /// Topmost rendered item under a point, only inside the viewport
    fn item_at(&self, scene: &dyn SceneGraph, point: Point) -> Option<usize> {
        if !scene.absolute_rect(self.scroll.root()).contains(point) {
            return None;
        }
        (0..self.items.len()).rev().find(|index| {
            self.rendered
                .get(index)
                .is_some_and(|item| scene.client_rect(item.node).contains(point))
        })
    }

    fn release_tap(
        &mut self,
        scene: &mut dyn SceneGraph,
        kind: PointerKind,
        point: Point,
        event: &mut Event,
    ) {
        let Some(index) = self.taps.release(kind, point) else {
            return;
        };
        let Some(item) = self.rendered.get(&index) else {
            return;
        };
        let bounds = scene.client_rect(item.node).outset(self.options.tap_buffer);
        if !bounds.contains(point) {
            return;
        }
        let (Some(callback), Some(value)) = (self.on_item_click.as_mut(), self.items.get(index))
        else {
            return;
        };
        event.prevent_default();
        trace!("item {} tapped", index);
        callback(value, index);
    }

    fn set_hovered(&mut self, scene: &mut dyn SceneGraph, index: Option<usize>) {
        if self.hovered == index {
            return;
        }
        let clickable = self.on_item_click.is_some();
        if self.hovered.is_some() && clickable {
            scene.set_cursor(Cursor::Default);
        }
        self.hovered = index;

        let Some(index) = index else {
            return;
        };
        if clickable {
            scene.set_cursor(Cursor::Pointer);
        }
        if let (Some(callback), Some(value)) = (self.on_item_hover.as_mut(), self.items.get(index)) {
            callback(value, index);
        }
    }

    /// Remove the list and all its items from the scene
    pub fn destroy(&mut self, scene: &mut dyn SceneGraph) {
        self.rendered.clear();
        self.taps.clear();
        self.hovered = None;
        self.scroll.destroy(scene);
    }
}

/// Where a release happened: the lifted contact for touch, else the pointer
fn release_point(event: &Event) -> Option<Point> {
    match &event.data {
        EventData::Touch { changed, .. } => changed.first().map(|touch| touch.position()),
        _ => event.position(),
    }
}
