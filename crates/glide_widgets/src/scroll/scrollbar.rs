//! Scrollbar thumbs
//!
//! Thumb geometry is a pure function of the scroll state; [`Scrollbars`]
//! owns the two thumb nodes and their show/fade cycle.

use glide_animation::{Easing, Timer, Tween};
use glide_core::{NodeId, Point, RectStyle, SceneGraph, Size};
use tracing::debug;

use crate::options::{ScrollDirection, ScrollbarOptions};
use crate::scroll::physics::ScrollState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollbarAxis {
    Vertical,
    Horizontal,
}

/// Derived thumb geometry for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarThumb {
    pub axis: ScrollbarAxis,
    pub visible: bool,
    /// Extent along the scroll axis
    pub length: f32,
    /// Distance from the start of the track along the scroll axis
    pub offset: f32,
    pub thickness: f32,
    pub opacity: f32,
}

/// Thumb `(length, offset)` along one axis, `None` when nothing scrolls
pub fn thumb_geometry(
    viewport: f32,
    content: f32,
    scroll: f32,
    max_scroll: f32,
    options: &ScrollbarOptions,
) -> Option<(f32, f32)> {
    if content <= viewport || content <= 0.0 {
        return None;
    }
    let padding = options.padding;
    let ratio = (viewport / content).min(1.0);
    let length = (viewport * ratio - 2.0 * padding).max(options.min_thumb_length);
    let progress = if max_scroll == 0.0 {
        0.0
    } else {
        scroll / max_scroll
    };
    let offset = padding + (viewport - length - 2.0 * padding) * progress;
    Some((length, offset))
}

/// Compute both thumbs for the current state
pub fn compute_thumbs(
    state: &ScrollState,
    content: Size,
    viewport: Size,
    direction: ScrollDirection,
    options: &ScrollbarOptions,
    opacity: f32,
) -> [ScrollbarThumb; 2] {
    let vertical = (options.enabled && direction.allows_y())
        .then(|| {
            thumb_geometry(
                viewport.height,
                content.height,
                state.scroll_y,
                state.max_scroll_y,
                options,
            )
        })
        .flatten();
    let horizontal = (options.enabled && direction.allows_x())
        .then(|| {
            thumb_geometry(
                viewport.width,
                content.width,
                state.scroll_x,
                state.max_scroll_x,
                options,
            )
        })
        .flatten();

    let thumb = |axis, geometry: Option<(f32, f32)>, thickness| {
        let (length, offset) = geometry.unwrap_or((0.0, 0.0));
        ScrollbarThumb {
            axis,
            visible: geometry.is_some(),
            length,
            offset,
            thickness,
            opacity,
        }
    };
    [
        thumb(ScrollbarAxis::Vertical, vertical, options.width),
        thumb(ScrollbarAxis::Horizontal, horizontal, options.height),
    ]
}

/// Show-then-fade opacity cycle
///
/// At most one fade timer and one fade tween exist; showing again cancels
/// both.
#[derive(Debug, Clone, Default)]
pub(crate) struct FadeCycle {
    opacity: f32,
    timer: Option<Timer>,
    tween: Option<Tween>,
}

impl FadeCycle {
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn show(&mut self, opacity: f32, delay_ms: f32) {
        self.opacity = opacity;
        self.tween = None;
        self.timer = Some(Timer::after(delay_ms));
    }

    /// Advance the cycle; returns true if the opacity changed
    pub fn tick(&mut self, dt_ms: f32, fade_ms: f32) -> bool {
        if let Some(timer) = self.timer.as_mut() {
            if timer.tick(dt_ms) {
                self.timer = None;
                self.tween = Some(Tween::new(self.opacity, 0.0, fade_ms, Easing::EaseOut));
                debug!("scrollbar fade out started");
            }
            return false;
        }
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        self.opacity = tween.tick(dt_ms);
        if tween.is_finished() {
            self.tween = None;
        }
        true
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some() || self.tween.is_some()
    }

    pub fn cancel(&mut self) {
        self.timer = None;
        self.tween = None;
    }
}

/// The two thumb nodes inside a scroll view
#[derive(Debug)]
pub(crate) struct Scrollbars {
    vertical: NodeId,
    horizontal: NodeId,
    fade: FadeCycle,
}

impl Scrollbars {
    pub fn new(scene: &mut dyn SceneGraph, parent: NodeId, options: &ScrollbarOptions) -> Self {
        let style = RectStyle {
            fill: options.color,
            stroke: options.border_color,
            stroke_width: options.border_width,
            corner_radius: options.corner_radius,
            opacity: 0.0,
            visible: false,
        };
        let container = scene.create_group();
        let vertical = scene.create_rect(style);
        let horizontal = scene.create_rect(style);
        scene.add_child(container, vertical);
        scene.add_child(container, horizontal);
        scene.add_child(parent, container);
        for node in [vertical, horizontal] {
            scene.set_opacity(node, 0.0);
            scene.set_visible(node, false);
        }
        Self {
            vertical,
            horizontal,
            fade: FadeCycle::default(),
        }
    }

    pub fn opacity(&self) -> f32 {
        self.fade.opacity()
    }

    /// Apply derived thumb geometry to the nodes
    pub fn layout(
        &self,
        scene: &mut dyn SceneGraph,
        thumbs: &[ScrollbarThumb; 2],
        viewport: Size,
        options: &ScrollbarOptions,
    ) {
        let [vertical, horizontal] = thumbs;

        scene.set_visible(self.vertical, vertical.visible);
        if vertical.visible {
            let x = viewport.width - vertical.thickness - options.padding;
            scene.set_position(self.vertical, Point::new(x, vertical.offset));
            scene.set_size(self.vertical, Size::new(vertical.thickness, vertical.length));
        }

        scene.set_visible(self.horizontal, horizontal.visible);
        if horizontal.visible {
            let y = viewport.height - horizontal.thickness - options.padding;
            scene.set_position(self.horizontal, Point::new(horizontal.offset, y));
            scene.set_size(
                self.horizontal,
                Size::new(horizontal.length, horizontal.thickness),
            );
        }
    }

    /// Restart the show/fade cycle at full visible opacity
    pub fn show(&mut self, scene: &mut dyn SceneGraph, options: &ScrollbarOptions) {
        if !options.enabled {
            return;
        }
        self.fade.show(options.opacity, options.fade_delay_ms);
        self.apply_opacity(scene);
    }

    pub fn tick(&mut self, scene: &mut dyn SceneGraph, dt_ms: f32, options: &ScrollbarOptions) -> bool {
        if self.fade.tick(dt_ms, options.fade_duration_ms) {
            self.apply_opacity(scene);
        }
        self.fade.is_active()
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_active()
    }

    pub fn cancel(&mut self) {
        self.fade.cancel();
    }

    fn apply_opacity(&self, scene: &mut dyn SceneGraph) {
        let opacity = self.fade.opacity();
        scene.set_opacity(self.vertical, opacity);
        scene.set_opacity(self.horizontal, opacity);
        scene.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::RetainedScene;

    #[test]
    fn test_thumb_geometry_proportional() {
        let options = ScrollbarOptions::default();
        // viewport 250 over content 910: 250 * 250/910 - 4 = 64.68
        let (length, offset) = thumb_geometry(250.0, 910.0, 0.0, 660.0, &options).unwrap();
        assert!((length - 64.68).abs() < 0.01);
        assert_eq!(offset, 2.0);

        let (_, end) = thumb_geometry(250.0, 910.0, 660.0, 660.0, &options).unwrap();
        assert!((end - (2.0 + 250.0 - length - 4.0)).abs() < 0.001);
    }

    #[test]
    fn test_thumb_minimum_length() {
        let options = ScrollbarOptions::default();
        let (length, _) = thumb_geometry(100.0, 100_000.0, 0.0, 99_900.0, &options).unwrap();
        assert_eq!(length, 20.0);
    }

    #[test]
    fn test_thumb_hidden_when_content_fits() {
        let options = ScrollbarOptions::default();
        assert_eq!(thumb_geometry(250.0, 250.0, 0.0, 0.0, &options), None);
        assert_eq!(thumb_geometry(250.0, 100.0, 0.0, 0.0, &options), None);
    }

    #[test]
    fn test_direction_hides_disabled_axis() {
        let state = ScrollState {
            max_scroll_x: 100.0,
            max_scroll_y: 660.0,
            ..ScrollState::default()
        };
        let thumbs = compute_thumbs(
            &state,
            Size::new(400.0, 910.0),
            Size::new(300.0, 250.0),
            ScrollDirection::Vertical,
            &ScrollbarOptions::default(),
            0.6,
        );
        assert!(thumbs[0].visible);
        assert!(!thumbs[1].visible);
    }

    #[test]
    fn test_fade_cycle() {
        let mut fade = FadeCycle::default();
        fade.show(0.6, 1000.0);
        assert_eq!(fade.opacity(), 0.6);

        assert!(!fade.tick(999.0, 300.0));
        assert_eq!(fade.opacity(), 0.6);
        // Timer fires, fade starts next frame
        assert!(!fade.tick(1.0, 300.0));
        assert!(fade.is_active());

        assert!(fade.tick(150.0, 300.0));
        assert!(fade.opacity() < 0.6 && fade.opacity() > 0.0);
        assert!(fade.tick(150.0, 300.0));
        assert_eq!(fade.opacity(), 0.0);
        assert!(!fade.is_active());
    }

    #[test]
    fn test_show_resets_pending_fade() {
        let mut fade = FadeCycle::default();
        fade.show(0.6, 1000.0);
        fade.tick(900.0, 300.0);
        fade.show(0.6, 1000.0);
        fade.tick(900.0, 300.0);
        assert_eq!(fade.opacity(), 0.6);
        assert!(fade.is_active());
    }

    #[test]
    fn test_thumb_nodes_start_hidden() {
        let mut scene = RetainedScene::new();
        let root = scene.create_group();
        let bars = Scrollbars::new(&mut scene, root, &ScrollbarOptions::default());
        let container = scene.children(root)[0];
        assert_eq!(scene.children(container), vec![bars.vertical, bars.horizontal]);
        for node in scene.children(container) {
            assert_eq!(scene.opacity(node), 0.0);
            assert!(!scene.is_visible(node));
        }
    }
}
