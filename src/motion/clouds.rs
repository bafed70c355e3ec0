use crate::{
    foundation::error::SceneResult,
    scene::graph::{Renderable, SceneGraph},
    scene::registry::{Registry, RenderableKey},
};

#[derive(Clone, Debug, PartialEq)]
pub struct CloudMotion {
    pub key: RenderableKey,
    /// Device pixels per frame, `>= 0`.
    pub speed: f64,
    /// Back parallax group (pans slower than front clouds).
    pub is_back: bool,
}

/// Continuous right-to-left drift with a teleport back to the right edge.
#[derive(Clone, Debug, Default)]
pub struct CloudDrift {
    clouds: Vec<CloudMotion>,
}

impl CloudDrift {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cloud: CloudMotion) {
        self.clouds.push(cloud);
    }

    pub fn clouds(&self) -> &[CloudMotion] {
        &self.clouds
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    pub fn step(
        &self,
        graph: &mut SceneGraph,
        registry: &Registry,
        viewport_width: f64,
    ) -> SceneResult<()> {
        for cloud in &self.clouds {
            let id = registry.get(&cloud.key)?;
            drift_cloud(graph.get_mut(id)?, cloud.speed, viewport_width);
        }
        Ok(())
    }
}

/// One frame of drift. Returns `true` when the cloud wrapped instead of moving.
///
/// A cloud that is fully past the left edge jumps to the right edge (one extra width
/// further for mirrored, negative-width clouds); otherwise it moves left by `speed`.
pub fn drift_cloud(r: &mut Renderable, speed: f64, viewport_width: f64) -> bool {
    if r.x + r.width.abs() <= 0.0 {
        r.x = if r.width < 0.0 {
            viewport_width + r.width.abs()
        } else {
            viewport_width
        };
        return true;
    }
    r.x -= speed;
    false
}

#[cfg(test)]
#[path = "../../tests/unit/motion/clouds.rs"]
mod tests;
