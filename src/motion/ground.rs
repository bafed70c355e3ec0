use crate::{
    foundation::error::SceneResult,
    scene::graph::SceneGraph,
    scene::registry::{Registry, RenderableKey},
};

#[derive(Clone, Debug, PartialEq)]
pub struct GroundLayerMotion {
    pub key: RenderableKey,
    /// Resting y in device space.
    pub base_y: f64,
    /// Upward movement per frame until `base_y` is reached.
    pub step_per_frame: f64,
}

/// Staggered one-shot settle of the ground layers.
#[derive(Clone, Debug, Default)]
pub struct GroundParallax {
    layers: Vec<GroundLayerMotion>,
    settled: bool,
}

impl GroundParallax {
    pub fn new(layers: Vec<GroundLayerMotion>) -> Self {
        Self {
            layers,
            settled: false,
        }
    }

    pub fn layers(&self) -> &[GroundLayerMotion] {
        &self.layers
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Ease every layer one step toward its resting y.
    ///
    /// Returns `true` on exactly one call: the frame on which every layer has come to
    /// rest. Later calls are no-ops.
    pub fn step(&mut self, graph: &mut SceneGraph, registry: &Registry) -> SceneResult<bool> {
        if self.settled {
            return Ok(false);
        }

        let mut all_rested = true;
        for layer in &self.layers {
            let r = graph.get_mut(registry.get(&layer.key)?)?;
            if r.y > layer.base_y {
                r.y = (r.y - layer.step_per_frame).max(layer.base_y);
            } else {
                r.y = layer.base_y;
            }
            all_rested &= r.y <= layer.base_y;
        }

        if all_rested {
            self.settled = true;
            tracing::info!(layers = self.layers.len(), "ground layers settled");
        }
        Ok(all_rested)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/ground.rs"]
mod tests;
