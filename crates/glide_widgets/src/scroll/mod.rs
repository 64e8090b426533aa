//! Momentum scroll view
//!
//! A clipped viewport over a content container. Input moves the content;
//! the view owns the physics (drag tracking, flick momentum, elastic
//! overscroll) and two auto-fading scrollbar thumbs.
//!
//! The view keeps no scene reference between calls. Every operation that
//! touches nodes takes `&mut dyn SceneGraph`, and time only advances when the
//! host calls [`ScrollView::tick`] from its frame loop:
//!
//! ```rust
//! use glide_core::{Event, RetainedScene};
//! use glide_widgets::scroll::ScrollView;
//! use glide_widgets::options::ScrollViewOptions;
//!
//! let mut scene = RetainedScene::new();
//! let mut view = ScrollView::new(
//!     &mut scene,
//!     ScrollViewOptions::new(300.0, 250.0).content_size(300.0, 910.0),
//! );
//!
//! view.scroll_by(&mut scene, 0.0, 1000.0);
//! assert_eq!(view.scroll_position().y, 660.0);
//!
//! let mut event = Event::pointer_down(10.0, 10.0, 0.0);
//! view.handle_event(&mut scene, &mut event);
//! while view.tick(&mut scene, 16.0) {}
//! ```

pub mod gesture;
pub mod physics;
pub mod scrollbar;

use glide_animation::Stepper;
use glide_core::events::event_types;
use glide_core::{
    Event, EventData, NodeId, Point, RectStyle, SceneGraph, Size, StateMachine, Vec2,
};
use tracing::{debug, trace};

use crate::options::{sanitize_extent, ScrollDirection, ScrollViewOptions};
use gesture::{estimate_velocity, gesture_events, GestureSession, GestureState};
use physics::{max_scroll, resolve_axis, ScrollState, FRAMES_PER_SECOND, MOMENTUM_STOP_VELOCITY};
use scrollbar::{compute_thumbs, ScrollbarThumb, Scrollbars};

/// Callback invoked with the requested coordinates on every scroll
pub type ScrollCallback = Box<dyn FnMut(f32, f32)>;

/// Bookkeeping for a running momentum run
#[derive(Debug, Clone, Copy, Default)]
struct MomentumRun {
    frames: u32,
}

pub struct ScrollView {
    options: ScrollViewOptions,
    direction: ScrollDirection,

    root: NodeId,
    background: Option<NodeId>,
    content: NodeId,
    scrollbars: Scrollbars,

    viewport: Size,
    content_size: Size,
    state: ScrollState,

    fsm: StateMachine<GestureState>,
    session: Option<GestureSession>,
    momentum: Option<MomentumRun>,
    animation: Option<Stepper>,

    on_scroll: Option<ScrollCallback>,
    destroyed: bool,
}

impl std::fmt::Debug for ScrollView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollView")
            .field("root", &self.root)
            .field("viewport", &self.viewport)
            .field("content_size", &self.content_size)
            .field("state", &self.state)
            .field("gesture", &self.fsm.current())
            .finish()
    }
}

impl ScrollView {
    /// Build the viewport, content container and scrollbar nodes
    pub fn new(scene: &mut dyn SceneGraph, options: ScrollViewOptions) -> Self {
        let options = options.sanitized();
        let direction = options.direction.unwrap_or_default();
        let viewport = Size::new(options.width, options.height);

        let root = scene.create_group();
        scene.set_position(root, Point::new(options.x, options.y));
        scene.set_size(root, viewport);
        scene.set_clip(root, Some(viewport.to_rect()));

        let background = options.background.map(|fill| {
            let node = scene.create_rect(RectStyle {
                fill,
                ..RectStyle::default()
            });
            scene.set_size(node, viewport);
            scene.add_child(root, node);
            node
        });

        let content = scene.create_group();
        scene.add_child(root, content);

        let scrollbars = Scrollbars::new(scene, root, &options.scrollbar);

        let content_size = Size::new(
            options.content_width.unwrap_or(viewport.width).ceil(),
            options.content_height.unwrap_or(viewport.height).ceil(),
        );
        scene.set_size(content, content_size);

        let mut view = Self {
            options,
            direction,
            root,
            background,
            content,
            scrollbars,
            viewport,
            content_size,
            state: ScrollState::default(),
            fsm: StateMachine::new(GestureState::Idle),
            session: None,
            momentum: None,
            animation: None,
            on_scroll: None,
            destroyed: false,
        };
        view.update_max_scroll(scene);
        view.layout_scrollbars(scene);
        debug!(
            "scroll view created: viewport {:?}, content {:?}, direction {:?}",
            view.viewport, view.content_size, view.direction
        );
        view
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Outermost node; attach it to the host scene
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node that application content is added to
    pub fn content_container(&self) -> NodeId {
        self.content
    }

    pub fn options(&self) -> &ScrollViewOptions {
        &self.options
    }

    pub fn scroll_position(&self) -> Point {
        Point::new(self.state.scroll_x, self.state.scroll_y)
    }

    pub fn max_scroll(&self) -> Vec2 {
        Vec2::new(self.state.max_scroll_x, self.state.max_scroll_y)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.state.velocity_x, self.state.velocity_y)
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.state
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn state(&self) -> GestureState {
        self.fsm.current()
    }

    /// Recorded gesture transitions, oldest first
    pub fn gesture_history(&self) -> &[(GestureState, u32, GestureState)] {
        self.fsm.history()
    }

    /// Vertical and horizontal thumbs derived from the current state
    pub fn scrollbar_thumbs(&self) -> [ScrollbarThumb; 2] {
        compute_thumbs(
            &self.state,
            self.content_size,
            self.viewport,
            self.direction,
            &self.options.scrollbar,
            self.scrollbars.opacity(),
        )
    }

    /// Whether momentum, an animated scroll or a scrollbar fade is running
    pub fn is_animating(&self) -> bool {
        self.momentum.is_some() || self.animation.is_some() || self.scrollbars.is_fading()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Add a node to the content container and refit the content size
    pub fn add_child(&mut self, scene: &mut dyn SceneGraph, child: NodeId) {
        scene.add_child(self.content, child);
        self.update_content_size(scene);
    }

    pub fn set_content_size(&mut self, scene: &mut dyn SceneGraph, width: f32, height: f32) {
        let width = sanitize_extent(width, "content width").ceil();
        let height = sanitize_extent(height, "content height").ceil();
        self.content_size = Size::new(width, height);
        scene.set_size(self.content, self.content_size);

        self.update_max_scroll(scene);
        self.layout_scrollbars(scene);

        // Content that fits snaps back to the origin on that axis
        if width <= self.viewport.width && self.state.scroll_x != 0.0 {
            self.state.scroll_x = 0.0;
            self.apply_content_position(scene);
        }
        if height <= self.viewport.height && self.state.scroll_y != 0.0 {
            self.state.scroll_y = 0.0;
            self.apply_content_position(scene);
        }
        trace!("content size set to {:?}", self.content_size);
    }

    /// Refit the content size to the bounding box of the content's children
    ///
    /// Does nothing while the container is empty.
    pub fn update_content_size(&mut self, scene: &mut dyn SceneGraph) {
        let children = scene.children(self.content);
        if children.is_empty() {
            return;
        }
        let mut max_x: f32 = 0.0;
        let mut max_y: f32 = 0.0;
        for child in children {
            let rect = scene.client_rect_relative_to(child, self.content);
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
        }
        self.set_content_size(scene, max_x, max_y);
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Move to a position, applying the clamp or elastic law per axis
    ///
    /// The scroll callback receives the requested coordinates, not the
    /// resolved ones.
    pub fn scroll_to(&mut self, scene: &mut dyn SceneGraph, x: f32, y: f32) {
        let bounce = self
            .options
            .bounce_enabled
            .then_some(self.options.bounce_strength);
        let requested_x = if x.is_finite() { x } else { self.state.scroll_x };
        let requested_y = if y.is_finite() { y } else { self.state.scroll_y };

        self.state.scroll_x = resolve_axis(requested_x, self.state.max_scroll_x, bounce);
        self.state.scroll_y = resolve_axis(requested_y, self.state.max_scroll_y, bounce);
        self.apply_content_position(scene);
        trace!(
            "scrolled to ({:.1}, {:.1})",
            self.state.scroll_x,
            self.state.scroll_y
        );

        self.layout_scrollbars(scene);
        self.scrollbars.show(scene, &self.options.scrollbar);

        if let Some(callback) = self.on_scroll.as_mut() {
            callback(requested_x, requested_y);
        }
    }

    pub fn scroll_by(&mut self, scene: &mut dyn SceneGraph, dx: f32, dy: f32) {
        self.scroll_to(scene, self.state.scroll_x + dx, self.state.scroll_y + dy);
    }

    /// Scroll to a position in `steps` equal jumps over `duration_ms`
    ///
    /// Replaces any running animated scroll and cancels momentum. Progress
    /// happens in [`tick`](Self::tick).
    pub fn animate_scroll_to(&mut self, x: f32, y: f32, duration_ms: f32, steps: u32) {
        self.cancel_momentum(gesture_events::STOP);
        let from = (self.state.scroll_x, self.state.scroll_y);
        debug!("animated scroll from {:?} to ({}, {})", from, x, y);
        self.animation = Some(Stepper::new(from, (x, y), duration_ms, steps));
    }

    pub fn set_direction(&mut self, scene: &mut dyn SceneGraph, direction: ScrollDirection) {
        self.direction = direction;
        self.layout_scrollbars(scene);
        self.scrollbars.show(scene, &self.options.scrollbar);
    }

    pub fn on_scroll<F>(&mut self, callback: F)
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.on_scroll = Some(Box::new(callback));
    }

    /// Cancel momentum and any animated scroll
    pub fn stop(&mut self) {
        self.cancel_momentum(gesture_events::STOP);
        self.animation = None;
    }

    /// Resize the viewport
    ///
    /// Recomputes bounds and thumb geometry. Thumbs are not shown unless the
    /// position has to be pulled back inside the new bounds.
    pub fn resize(&mut self, scene: &mut dyn SceneGraph, size: Size) {
        let size = Size::new(
            sanitize_extent(size.width, "viewport width"),
            sanitize_extent(size.height, "viewport height"),
        );
        self.viewport = size;
        scene.set_size(self.root, size);
        scene.set_clip(self.root, Some(size.to_rect()));
        if let Some(background) = self.background {
            scene.set_size(background, size);
        }
        self.update_max_scroll(scene);
        self.layout_scrollbars(scene);
        scene.request_redraw();
        debug!("viewport resized to {:?}", size);
    }

    /// Cancel all timers and remove the view's nodes from the scene
    pub fn destroy(&mut self, scene: &mut dyn SceneGraph) {
        if self.destroyed {
            return;
        }
        self.stop();
        self.scrollbars.cancel();
        self.session = None;
        self.on_scroll = None;
        scene.destroy(self.root);
        self.destroyed = true;
        debug!("scroll view destroyed");
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route an input event; returns true if the view consumed it
    pub fn handle_event(&mut self, scene: &mut dyn SceneGraph, event: &mut Event) -> bool {
        if self.destroyed || !self.options.listening {
            return false;
        }
        match event.event_type {
            event_types::POINTER_DOWN | event_types::TOUCH_START => self.begin_drag(scene, event),
            event_types::POINTER_MOVE | event_types::TOUCH_MOVE => self.drag(scene, event),
            event_types::POINTER_UP | event_types::TOUCH_END => self.end_drag(event),
            event_types::POINTER_LEAVE | event_types::TOUCH_CANCEL => self.cancel_drag(),
            event_types::WHEEL => self.wheel(scene, event),
            event_types::RESIZE => match event.data {
                EventData::Resize { width, height } => {
                    self.resize(scene, Size::new(width, height));
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn begin_drag(&mut self, scene: &mut dyn SceneGraph, event: &Event) -> bool {
        let Some(point) = event.position() else {
            return false;
        };
        if !scene.absolute_rect(self.root).contains(point) {
            return false;
        }

        // A grab during momentum goes straight to dragging
        self.momentum = None;
        self.animation = None;
        self.state.stop();

        let touches = match &event.data {
            EventData::Touch { touches, .. } => touches.as_slice(),
            _ => &[],
        };
        self.session = Some(GestureSession::begin(point, event.timestamp, touches));
        self.fsm.send(gesture_events::GRAB);
        trace!("drag started at {:?}", point);
        true
    }

    fn drag(&mut self, scene: &mut dyn SceneGraph, event: &mut Event) -> bool {
        let Some(current) = event.position() else {
            return false;
        };
        let speed = self.options.scroll_speed;
        let gain = self.options.velocity_gain;
        let direction = self.direction;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        event.prevent_default();

        if let EventData::Touch { touches, .. } = &event.data {
            let pair = session.pair_delta(touches);
            session.replace_touches(touches);
            if let Some(delta) = pair {
                session.anchor(current, event.timestamp);
                let (dx, dy) = direction.gate(delta.x * speed, delta.y * speed);
                self.scroll_by(scene, dx, dy);
                return true;
            }
        }

        let delta = session.last - current;
        let velocity = estimate_velocity(delta, event.timestamp - session.last_time, speed, gain);
        session.anchor(current, event.timestamp);

        let (dx, dy) = direction.gate(delta.x, delta.y);
        self.scroll_by(scene, dx, dy);
        if let Some(velocity) = velocity {
            let (vx, vy) = direction.gate(velocity.x, velocity.y);
            self.state.velocity_x = vx;
            self.state.velocity_y = vy;
        }
        true
    }

    fn end_drag(&mut self, event: &Event) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if let EventData::Touch { touches, changed } = &event.data {
            session.lift(changed);
            if let Some(first) = touches.first() {
                session.replace_touches(touches);
                session.anchor(first.position(), event.timestamp);
                return true;
            }
        }
        self.release();
        true
    }

    fn cancel_drag(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.release();
        true
    }

    fn release(&mut self) {
        self.session = None;
        let fling = self.options.inertia_enabled && self.state.is_fling();
        let settle = self.options.bounce_enabled && self.state.is_overscrolled();

        if fling || settle {
            if !fling {
                self.state.stop();
            }
            self.fsm.send(gesture_events::FLING);
            self.momentum = Some(MomentumRun::default());
            debug!(
                "momentum started: velocity ({:.1}, {:.1})",
                self.state.velocity_x, self.state.velocity_y
            );
        } else {
            self.state.stop();
            self.fsm.send(gesture_events::RELEASE);
        }
    }

    fn wheel(&mut self, scene: &mut dyn SceneGraph, event: &mut Event) -> bool {
        let EventData::Wheel {
            delta_x, delta_y, ..
        } = event.data
        else {
            return false;
        };
        event.prevent_default();
        let speed = self.options.scroll_speed;
        let (dx, dy) = self.direction.gate(delta_x * speed, delta_y * speed);
        self.scroll_by(scene, dx, dy);
        true
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance momentum, animated scrolling and the scrollbar fade
    ///
    /// Returns true while anything is still running.
    pub fn tick(&mut self, scene: &mut dyn SceneGraph, dt_ms: f32) -> bool {
        if self.destroyed {
            return false;
        }
        if self.momentum.is_some() {
            self.step_momentum(scene);
        }

        if let Some(animation) = self.animation.as_mut() {
            let value = animation.tick(dt_ms);
            let finished = animation.is_finished();
            if finished {
                self.animation = None;
            }
            if let Some((x, y)) = value {
                self.scroll_to(scene, x, y);
            }
        }

        self.scrollbars.tick(scene, dt_ms, &self.options.scrollbar);
        self.is_animating()
    }

    fn step_momentum(&mut self, scene: &mut dyn SceneGraph) {
        let decay = self.options.inertia_decay;
        self.state.velocity_x *= decay;
        self.state.velocity_y *= decay;
        let dx = self.state.velocity_x / FRAMES_PER_SECOND;
        let dy = self.state.velocity_y / FRAMES_PER_SECOND;
        self.scroll_by(scene, dx, dy);
        if let Some(run) = self.momentum.as_mut() {
            run.frames += 1;
        }

        if !self.state.is_slow() {
            return;
        }
        if !self.state.is_overscrolled() {
            self.cancel_momentum(gesture_events::SETTLED);
            return;
        }
        let (ox, oy) = self.state.overscroll();
        if ox.abs() < MOMENTUM_STOP_VELOCITY && oy.abs() < MOMENTUM_STOP_VELOCITY {
            let (x, y) = self.state.clamped();
            self.scroll_to(scene, x, y);
            self.cancel_momentum(gesture_events::SETTLED);
        }
    }

    fn cancel_momentum(&mut self, reason: u32) {
        let Some(run) = self.momentum.take() else {
            return;
        };
        self.state.stop();
        self.fsm.send(reason);
        debug!("momentum ended after {} frames", run.frames);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn update_max_scroll(&mut self, scene: &mut dyn SceneGraph) {
        self.state.max_scroll_x = max_scroll(self.content_size.width, self.viewport.width);
        self.state.max_scroll_y = max_scroll(self.content_size.height, self.viewport.height);

        if self.state.scroll_x > self.state.max_scroll_x {
            self.scroll_to(scene, self.state.max_scroll_x, self.state.scroll_y);
        }
        if self.state.scroll_y > self.state.max_scroll_y {
            self.scroll_to(scene, self.state.scroll_x, self.state.max_scroll_y);
        }
    }

    fn apply_content_position(&self, scene: &mut dyn SceneGraph) {
        scene.set_position(
            self.content,
            Point::new(-self.state.scroll_x.round(), -self.state.scroll_y.round()),
        );
        scene.request_redraw();
    }

    fn layout_scrollbars(&self, scene: &mut dyn SceneGraph) {
        let thumbs = self.scrollbar_thumbs();
        self.scrollbars
            .layout(scene, &thumbs, self.viewport, &self.options.scrollbar);
    }
}
