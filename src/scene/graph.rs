use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};
use crate::foundation::error::{SceneError, SceneResult};

/// Typed handle into a [`SceneGraph`] arena. Handles never dangle: nodes are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mutable transform fields of a positioned visual element.
///
/// `width`/`height` are device-space sizes. For sprites they are the drawn size before
/// `scale`; for containers they record the size the builder gave the group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Renderable {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale: Vec2,
    pub rotation: f64,
    pub alpha: f64,
    /// Pivot as a fraction of the sprite size; `(1, 0)` with `scale.x = -1` mirrors in place.
    pub anchor: Vec2,
}

impl Default for Renderable {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            alpha: 1.0,
            anchor: Vec2::ZERO,
        }
    }
}

impl Renderable {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Node space → parent space: `T(x, y) * R(rotation) * S(scale)`.
    pub fn local_transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Container,
    Sprite { texture: String },
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    renderable: Renderable,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A sprite resolved to world space, in painter's order.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteDraw<'a> {
    pub node: NodeId,
    pub texture: &'a str,
    /// Maps the sprite rectangle `(0, 0)..(size.width, size.height)` to device space.
    pub transform: Affine,
    pub size: Size,
    pub alpha: f64,
}

/// Arena-backed container tree rooted at a single stage.
///
/// Nodes are only created attached to an existing container, so every node except the
/// stage has exactly one parent for its whole lifetime.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Container,
                renderable: Renderable::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn stage(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The stage always exists.
        false
    }

    pub fn add_container(&mut self, parent: NodeId) -> SceneResult<NodeId> {
        self.attach(parent, NodeKind::Container)
    }

    pub fn add_sprite(&mut self, parent: NodeId, texture: impl Into<String>) -> SceneResult<NodeId> {
        self.attach(
            parent,
            NodeKind::Sprite {
                texture: texture.into(),
            },
        )
    }

    fn attach(&mut self, parent: NodeId, kind: NodeKind) -> SceneResult<NodeId> {
        match self.node(parent)?.kind {
            NodeKind::Container => {}
            NodeKind::Sprite { .. } => {
                return Err(SceneError::validation(format!(
                    "node {parent:?} is a sprite and cannot hold children"
                )));
            }
        }
        let id = NodeId(
            self.nodes
                .len()
                .try_into()
                .map_err(|_| SceneError::validation("scene graph node id overflow"))?,
        );
        self.nodes.push(Node {
            kind,
            renderable: Renderable::default(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| SceneError::lookup(format!("node #{}", id.0)))
    }

    pub fn get(&self, id: NodeId) -> SceneResult<&Renderable> {
        Ok(&self.node(id)?.renderable)
    }

    pub fn get_mut(&mut self, id: NodeId) -> SceneResult<&mut Renderable> {
        self.nodes
            .get_mut(id.index())
            .map(|n| &mut n.renderable)
            .ok_or_else(|| SceneError::lookup(format!("node #{}", id.0)))
    }

    pub fn kind(&self, id: NodeId) -> SceneResult<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> SceneResult<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Bounds of a node's content in its own coordinate space (before its transform).
    pub fn local_bounds(&self, id: NodeId) -> SceneResult<Option<Rect>> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Sprite { .. } => {
                let r = &node.renderable;
                let x0 = -r.anchor.x * r.width;
                let y0 = -r.anchor.y * r.height;
                Ok(Some(Rect::new(x0, y0, x0 + r.width, y0 + r.height).abs()))
            }
            NodeKind::Container => {
                let mut acc: Option<Rect> = None;
                for &child in &node.children {
                    let Some(b) = self.bounds_in_parent(child)? else {
                        continue;
                    };
                    acc = Some(match acc {
                        Some(a) => a.union(b),
                        None => b,
                    });
                }
                Ok(acc)
            }
        }
    }

    /// Bounds of a node in its parent's coordinate space.
    pub fn bounds_in_parent(&self, id: NodeId) -> SceneResult<Option<Rect>> {
        let local = self.local_bounds(id)?;
        let t = self.get(id)?.local_transform();
        Ok(local.map(|r| t.transform_rect_bbox(r)))
    }

    /// Size as seen from the parent: content bounds multiplied by `|scale|`.
    pub fn measured_size(&self, id: NodeId) -> SceneResult<Size> {
        let r = self.get(id)?;
        let local = self.local_bounds(id)?.unwrap_or(Rect::ZERO);
        Ok(Size::new(
            local.width() * r.scale.x.abs(),
            local.height() * r.scale.y.abs(),
        ))
    }

    /// Scale a node horizontally so its measured width equals `target`.
    ///
    /// Sprites get `width = target`; containers get `scale.x` adjusted against their
    /// content bounds, keeping the sign of the current scale.
    pub fn fit_width(&mut self, id: NodeId, target: f64) -> SceneResult<()> {
        let is_container = matches!(self.kind(id)?, NodeKind::Container);
        if !is_container {
            self.get_mut(id)?.width = target;
            return Ok(());
        }
        let content = self.local_bounds(id)?.map(|r| r.width()).unwrap_or(0.0);
        let r = self.get_mut(id)?;
        if content > 0.0 {
            let sign = if r.scale.x < 0.0 { -1.0 } else { 1.0 };
            r.scale.x = sign * target / content;
        }
        r.width = target;
        Ok(())
    }

    /// Flatten the tree to world-space sprite draws in painter's order (depth-first, child order).
    pub fn sprite_draws(&self) -> SceneResult<Vec<SpriteDraw<'_>>> {
        let mut out = Vec::new();
        let mut stack = vec![(self.stage(), Affine::IDENTITY, 1.0)];
        while let Some((id, parent_world, parent_alpha)) = stack.pop() {
            let node = self.node(id)?;
            let r = &node.renderable;
            let alpha = parent_alpha * r.alpha;
            if alpha <= 0.0 {
                continue;
            }
            let world = parent_world * r.local_transform();
            match &node.kind {
                NodeKind::Sprite { texture } => {
                    let pivot = Affine::translate(Vec2::new(
                        -r.anchor.x * r.width,
                        -r.anchor.y * r.height,
                    ));
                    out.push(SpriteDraw {
                        node: id,
                        texture: texture.as_str(),
                        transform: world * pivot,
                        size: Size::new(r.width, r.height),
                        alpha,
                    });
                }
                NodeKind::Container => {
                    for &child in node.children.iter().rev() {
                        stack.push((child, world, alpha));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Visit every node depth-first in child order.
    pub fn visit(&self, mut f: impl FnMut(NodeId, &NodeKind, &Renderable)) {
        let mut stack = vec![self.stage()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            f(id, &node.kind, &node.renderable);
            stack.extend(node.children.iter().rev().copied());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
