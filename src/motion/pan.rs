use crate::{
    config::model::PanConfig,
    foundation::error::SceneResult,
    motion::clouds::CloudDrift,
    scene::graph::SceneGraph,
    scene::registry::{Registry, RenderableKey},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanPhase {
    /// No frame stepped yet; the limit is unknown.
    Idle,
    /// Background still rising toward `limit`.
    Panning { limit: f64 },
    /// Background parked at `limit`; every later step is a no-op.
    Finished { limit: f64 },
}

/// One-shot upward pan of the background, carrying the clouds with it.
#[derive(Clone, Debug)]
pub struct CameraPan {
    background: RenderableKey,
    speeds: PanConfig,
    phase: PanPhase,
}

impl CameraPan {
    pub fn new(background: impl Into<RenderableKey>, speeds: PanConfig) -> Self {
        Self {
            background: background.into(),
            speeds,
            phase: PanPhase::Idle,
        }
    }

    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    /// Lowest y the background may reach, once measured.
    pub fn limit(&self) -> Option<f64> {
        match self.phase {
            PanPhase::Idle => None,
            PanPhase::Panning { limit } | PanPhase::Finished { limit } => Some(limit),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, PanPhase::Finished { .. })
    }

    /// Advance one frame.
    ///
    /// The limit is measured on the first call as `viewport_height - background height`
    /// and never recomputed. While panning, back clouds rise by `cloud_speed_back` and
    /// front clouds by `cloud_speed_front`, including on the frame that lands on the limit.
    pub fn step(
        &mut self,
        graph: &mut SceneGraph,
        registry: &Registry,
        clouds: &CloudDrift,
        viewport_height: f64,
    ) -> SceneResult<()> {
        let back = registry.get(&self.background)?;
        let limit = match self.phase {
            PanPhase::Finished { .. } => return Ok(()),
            PanPhase::Panning { limit } => limit,
            PanPhase::Idle => {
                let limit = -graph.measured_size(back)?.height + viewport_height;
                tracing::debug!(limit, "pan limit measured");
                limit
            }
        };

        let r = graph.get_mut(back)?;
        if r.y <= limit {
            tracing::info!(limit, "pan finished without moving");
            self.phase = PanPhase::Finished { limit };
            return Ok(());
        }

        if r.y - self.speeds.back_speed > limit {
            r.y -= self.speeds.back_speed;
            self.phase = PanPhase::Panning { limit };
        } else {
            r.y = limit;
            self.phase = PanPhase::Finished { limit };
            tracing::info!(limit, "pan finished");
        }

        for cloud in clouds.clouds() {
            let c = graph.get_mut(registry.get(&cloud.key)?)?;
            c.y -= if cloud.is_back {
                self.speeds.cloud_speed_back
            } else {
                self.speeds.cloud_speed_front
            };
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/pan.rs"]
mod tests;
