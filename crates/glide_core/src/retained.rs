//! In-memory scene graph
//!
//! Keeps nodes in a slotmap and answers every [`SceneGraph`] query without a
//! renderer attached. Used for headless hosting and throughout the tests.

use slotmap::SlotMap;

use crate::geometry::{Point, Rect, Size};
use crate::scene::{Cursor, NodeId, NodeKind, RectStyle, SceneGraph};

/// A node stored in a [`RetainedScene`]
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub position: Point,
    pub size: Size,
    pub offset: Point,
    pub clip: Option<Rect>,
    pub visible: bool,
    pub opacity: f32,
    /// Present for rectangle nodes
    pub style: Option<RectStyle>,
}

impl SceneNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            position: Point::ZERO,
            size: Size::ZERO,
            offset: Point::ZERO,
            clip: None,
            visible: true,
            opacity: 1.0,
            style: None,
        }
    }
}

/// Slotmap-backed scene graph
#[derive(Debug, Default)]
pub struct RetainedScene {
    nodes: SlotMap<NodeId, SceneNode>,
    cursor: Cursor,
    redraw_requests: u64,
}

impl RetainedScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sized group, the usual shape of an opaque content node
    pub fn create_sized_group(&mut self, size: Size) -> NodeId {
        let id = self.create_group();
        self.set_size(id, size);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }

    pub fn clip(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).and_then(|n| n.clip)
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get(id).and_then(|n| n.parent);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

impl SceneGraph for RetainedScene {
    fn create_group(&mut self) -> NodeId {
        self.nodes.insert(SceneNode::new(NodeKind::Group))
    }

    fn create_rect(&mut self, style: RectStyle) -> NodeId {
        let mut node = SceneNode::new(NodeKind::Rect);
        node.visible = style.visible;
        node.opacity = style.opacity;
        node.style = Some(style);
        self.nodes.insert(node)
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child)
        {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    fn destroy(&mut self, node: NodeId) {
        self.detach(node);
        self.remove_subtree(node);
    }

    fn destroy_children(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    fn position(&self, node: NodeId) -> Point {
        self.nodes.get(node).map(|n| n.position).unwrap_or_default()
    }

    fn set_position(&mut self, node: NodeId, position: Point) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.position = position;
        }
    }

    fn size(&self, node: NodeId) -> Size {
        self.nodes.get(node).map(|n| n.size).unwrap_or_default()
    }

    fn set_size(&mut self, node: NodeId, size: Size) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.size = size;
        }
    }

    fn offset(&self, node: NodeId) -> Point {
        self.nodes.get(node).map(|n| n.offset).unwrap_or_default()
    }

    fn set_offset(&mut self, node: NodeId, offset: Point) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.offset = offset;
        }
    }

    fn set_clip(&mut self, node: NodeId, clip: Option<Rect>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.clip = clip;
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.visible = visible;
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.nodes.get(node).map(|n| n.visible).unwrap_or(false)
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.opacity = opacity;
        }
    }

    fn opacity(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map(|n| n.opacity).unwrap_or(0.0)
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_removes_subtree() {
        let mut scene = RetainedScene::new();
        let root = scene.create_group();
        let child = scene.create_group();
        let grandchild = scene.create_rect(RectStyle::default());
        scene.add_child(root, child);
        scene.add_child(child, grandchild);
        assert_eq!(scene.len(), 3);

        scene.destroy(child);
        assert_eq!(scene.len(), 1);
        assert!(scene.children(root).is_empty());
        assert!(!scene.contains(grandchild));
    }

    #[test]
    fn test_destroy_children_keeps_parent() {
        let mut scene = RetainedScene::new();
        let root = scene.create_group();
        for _ in 0..3 {
            let child = scene.create_group();
            scene.add_child(root, child);
        }
        scene.destroy_children(root);
        assert!(scene.contains(root));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_absolute_origin_accumulates_offsets() {
        let mut scene = RetainedScene::new();
        let root = scene.create_group();
        scene.set_position(root, Point::new(100.0, 50.0));
        let content = scene.create_group();
        scene.add_child(root, content);
        scene.set_position(content, Point::new(0.0, -30.0));
        let anchored = scene.create_sized_group(Size::new(40.0, 20.0));
        scene.add_child(content, anchored);
        scene.set_position(anchored, Point::new(30.0, 15.0));
        scene.set_offset(anchored, Point::new(20.0, 10.0));

        assert_eq!(scene.absolute_origin(anchored), Point::new(110.0, 25.0));
        assert_eq!(
            scene.client_rect_relative_to(anchored, content),
            Rect::new(10.0, 5.0, 40.0, 20.0)
        );
    }

    #[test]
    fn test_client_rect_of_unsized_group_covers_children() {
        let mut scene = RetainedScene::new();
        let group = scene.create_group();
        let a = scene.create_sized_group(Size::new(10.0, 10.0));
        let b = scene.create_sized_group(Size::new(10.0, 10.0));
        scene.set_position(b, Point::new(50.0, 20.0));
        scene.add_child(group, a);
        scene.add_child(group, b);

        assert_eq!(scene.client_rect(group), Rect::new(0.0, 0.0, 60.0, 30.0));
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let mut scene = RetainedScene::new();
        let node = scene.create_group();
        scene.destroy(node);
        scene.set_position(node, Point::new(1.0, 1.0));
        assert_eq!(scene.position(node), Point::ZERO);
        assert!(!scene.is_visible(node));
    }
}
