//! One-time builders that populate the scene graph, the registry and per-layer motion state.

pub(crate) mod background;
pub(crate) mod clouds;
pub(crate) mod ground;
pub(crate) mod leaves;

use crate::{
    assets::store::AssetStore,
    config::model::{ImageFit, ImageSpec},
    foundation::error::SceneResult,
    scene::graph::{NodeId, SceneGraph},
    scene::registry::Registry,
    scene::viewport::Viewport,
};

/// Mutable build-phase view over the scene being assembled.
pub struct BuildCtx<'a> {
    pub graph: &'a mut SceneGraph,
    pub registry: &'a mut Registry,
    pub viewport: &'a Viewport,
    pub assets: &'a AssetStore,
}

impl BuildCtx<'_> {
    /// Add a sprite for `spec` under `parent`, sized per its fit rule, and register it by key.
    ///
    /// Fails with `AssetMissing` before touching the graph when the texture is not loaded.
    pub(crate) fn place_image(&mut self, spec: &ImageSpec, parent: NodeId) -> SceneResult<NodeId> {
        self.assets.get(&spec.texture)?;

        let (width, height) = match spec.fit {
            ImageFit::Width => {
                let width = self.viewport.width();
                let ratio = spec.width / width;
                (width, (spec.height / ratio).trunc())
            }
            ImageFit::Scaled => (
                self.viewport.to_device(spec.width),
                self.viewport.to_device(spec.height),
            ),
        };

        let id = self.graph.add_sprite(parent, spec.texture.as_str())?;
        let r = self.graph.get_mut(id)?;
        r.width = width;
        r.height = height;
        self.registry.register(spec.key.as_str(), id);
        Ok(id)
    }

    /// Container on `parent` sized to the full viewport.
    pub(crate) fn full_bleed_container(&mut self, parent: NodeId) -> SceneResult<NodeId> {
        let id = self.graph.add_container(parent)?;
        let r = self.graph.get_mut(id)?;
        r.width = self.viewport.width();
        r.height = self.viewport.height();
        Ok(id)
    }
}
