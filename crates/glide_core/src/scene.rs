//! Scene graph boundary
//!
//! Widgets never own pixels. They hold [`NodeId`] handles into a scene graph
//! provided by the host rendering engine and talk to it only through the
//! [`SceneGraph`] trait: groups, rectangles, transforms, clipping, opacity and
//! draw scheduling. Everything else (text, images, custom shapes) is opaque
//! child content created by the application.
//!
//! [`RetainedScene`](crate::retained::RetainedScene) is an in-memory
//! implementation for headless hosting and tests.

use slotmap::new_key_type;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};

new_key_type! {
    /// Handle to a node owned by the scene graph
    pub struct NodeId;
}

/// Kind of primitive a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Container that positions and clips its children
    Group,
    /// Filled/stroked rectangle
    Rect,
}

/// Visual style of a rectangle node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub corner_radius: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 0.0,
            corner_radius: 0.0,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Mouse cursor shown by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Operations the widgets consume from the rendering engine
///
/// Calls with a stale [`NodeId`] are silently ignored by implementations;
/// getters return neutral values.
pub trait SceneGraph {
    fn create_group(&mut self) -> NodeId;
    fn create_rect(&mut self, style: RectStyle) -> NodeId;

    fn add_child(&mut self, parent: NodeId, child: NodeId);
    /// Destroy a node and its whole subtree
    fn destroy(&mut self, node: NodeId);
    fn destroy_children(&mut self, node: NodeId);
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn position(&self, node: NodeId) -> Point;
    fn set_position(&mut self, node: NodeId, position: Point);
    fn size(&self, node: NodeId) -> Size;
    fn set_size(&mut self, node: NodeId, size: Size);
    /// Self-anchoring offset subtracted from the position when drawing
    fn offset(&self, node: NodeId) -> Point;
    fn set_offset(&mut self, node: NodeId, offset: Point);

    fn set_clip(&mut self, node: NodeId, clip: Option<Rect>);
    fn set_visible(&mut self, node: NodeId, visible: bool);
    fn is_visible(&self, node: NodeId) -> bool;
    fn set_opacity(&mut self, node: NodeId, opacity: f32);
    fn opacity(&self, node: NodeId) -> f32;

    fn set_cursor(&mut self, cursor: Cursor);
    /// Schedule a repaint on the next display refresh
    fn request_redraw(&mut self);

    /// Absolute origin of a node's local coordinate space
    fn absolute_origin(&self, node: NodeId) -> Point {
        let mut origin = self.position(node);
        let offset = self.offset(node);
        origin.x -= offset.x;
        origin.y -= offset.y;
        let mut current = self.parent(node);
        while let Some(parent) = current {
            let position = self.position(parent);
            let offset = self.offset(parent);
            origin.x += position.x - offset.x;
            origin.y += position.y - offset.y;
            current = self.parent(parent);
        }
        origin
    }

    /// Node's own box in absolute coordinates
    fn absolute_rect(&self, node: NodeId) -> Rect {
        Rect::from_origin_size(self.absolute_origin(node), self.size(node))
    }

    /// Absolute bounding box of a node and everything below it
    fn client_rect(&self, node: NodeId) -> Rect {
        let size = self.size(node);
        let mut bounds: Option<Rect> = if size.width > 0.0 || size.height > 0.0 {
            Some(self.absolute_rect(node))
        } else {
            None
        };
        for child in self.children(node) {
            let child_bounds = self.client_rect(child);
            bounds = Some(match bounds {
                Some(b) => b.union(&child_bounds),
                None => child_bounds,
            });
        }
        bounds.unwrap_or_else(|| Rect::from_origin_size(self.absolute_origin(node), Size::ZERO))
    }

    /// Bounding box of `node` expressed in `ancestor`'s local coordinates
    fn client_rect_relative_to(&self, node: NodeId, ancestor: NodeId) -> Rect {
        let origin = self.absolute_origin(ancestor);
        self.client_rect(node).offset(-origin.x, -origin.y)
    }
}
