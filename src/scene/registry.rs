use std::collections::HashMap;
use std::fmt;

use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::graph::NodeId;

/// Identifier a builder assigns to a renderable it wants to find again later.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum RenderableKey {
    /// Registered cloud (back groups first, then front sprites), in build order.
    Cloud(usize),
    /// Leaf sprite in manifest order.
    Leaf(usize),
    /// Caller-chosen name (`"back"`, `"land"`, ...).
    Named(String),
}

impl fmt::Display for RenderableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloud(i) => write!(f, "cloud{i}"),
            Self::Leaf(i) => write!(f, "leaf{i}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for RenderableKey {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for RenderableKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Non-owning lookup table from keys to scene graph handles.
///
/// Registering an existing key replaces the previous handle (last write wins).
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: HashMap<RenderableKey, NodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle previously stored under `key`, if any.
    pub fn register(&mut self, key: impl Into<RenderableKey>, node: NodeId) -> Option<NodeId> {
        let key = key.into();
        let prev = self.entries.insert(key.clone(), node);
        if let Some(prev) = prev
            && prev != node
        {
            tracing::debug!(%key, ?prev, ?node, "registry entry overwritten");
        }
        prev
    }

    pub fn get(&self, key: &RenderableKey) -> SceneResult<NodeId> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| SceneError::lookup(key.to_string()))
    }

    pub fn get_named(&self, name: &str) -> SceneResult<NodeId> {
        self.get(&RenderableKey::from(name))
    }

    pub fn contains(&self, key: &RenderableKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
