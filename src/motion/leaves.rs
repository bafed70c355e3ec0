use std::f64::consts::{PI, TAU};

use crate::{
    config::model::WindSpec,
    foundation::error::SceneResult,
    scene::graph::{Renderable, SceneGraph},
    scene::registry::{Registry, RenderableKey},
};

/// Oscillator state of a single leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafMotion {
    pub key: RenderableKey,
    pub radius: f64,
    pub base_x: f64,
    pub base_y: f64,
    pub shift_x: f64,
    pub shift_y: f64,
    pub angle: f64,
    pub angular_step: f64,
    pub phase_counter: u32,
    /// Frames per orbit; `angle` and `phase_counter` restart once the counter reaches it.
    pub speed_bound: u32,
    pub rotation_step: f64,
    /// Upper flutter bound; the lower bound is `-1`.
    pub base_scale_y: f64,
    pub shrinking_down: bool,
}

impl LeafMotion {
    /// Fresh oscillator at phase zero, one full orbit every `speed_bound` frames.
    pub fn new(
        key: RenderableKey,
        base: (f64, f64),
        radius: f64,
        speed_bound: u32,
        rotation_step: f64,
        base_scale_y: f64,
    ) -> Self {
        Self {
            key,
            radius,
            base_x: base.0,
            base_y: base.1,
            shift_x: 0.0,
            shift_y: 0.0,
            angle: 0.0,
            angular_step: PI / (f64::from(speed_bound) / 2.0),
            phase_counter: 0,
            speed_bound,
            rotation_step,
            base_scale_y,
            shrinking_down: false,
        }
    }

    /// One frame: orbit position, rotation, flutter, then wind.
    pub fn advance(&mut self, r: &mut Renderable, wind: &WindSpec, viewport_width: f64) {
        if self.phase_counter >= self.speed_bound {
            self.angle = 0.0;
            self.phase_counter = 0;
        }

        r.x = self.radius * self.angle.cos() + self.base_x + self.shift_x;
        r.y = self.radius * self.angle.sin() + self.base_y + self.shift_y;

        if r.rotation < TAU {
            r.rotation += self.rotation_step;
        } else {
            r.rotation = 0.0;
        }

        if !self.shrinking_down {
            r.scale.y -= wind.flutter_step;
            if r.scale.y < -1.0 {
                self.shrinking_down = true;
            }
        } else {
            r.scale.y += wind.flutter_step;
            if r.scale.y > self.base_scale_y {
                self.shrinking_down = false;
            }
        }

        self.angle += self.angular_step;
        self.phase_counter += 1;

        self.shift_x -= wind.drift_x;
        self.shift_y += wind.fall_y;

        if r.x + r.width < 0.0 {
            self.shift_x = viewport_width + r.width;
            self.shift_y = 0.0;
        }
    }
}

/// Elliptical drift, flutter and wind for every leaf.
#[derive(Clone, Debug)]
pub struct LeafOrbit {
    leaves: Vec<LeafMotion>,
    wind: WindSpec,
}

impl LeafOrbit {
    pub fn new(leaves: Vec<LeafMotion>, wind: WindSpec) -> Self {
        Self { leaves, wind }
    }

    pub fn leaves(&self) -> &[LeafMotion] {
        &self.leaves
    }

    pub fn step(
        &mut self,
        graph: &mut SceneGraph,
        registry: &Registry,
        viewport_width: f64,
    ) -> SceneResult<()> {
        for leaf in &mut self.leaves {
            let r = graph.get_mut(registry.get(&leaf.key)?)?;
            leaf.advance(r, &self.wind, viewport_width);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/leaves.rs"]
mod tests;
