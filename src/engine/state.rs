use crate::{
    assets::store::AssetStore,
    config::model::SceneConfig,
    foundation::core::{Canvas, FrameIndex},
    foundation::error::SceneResult,
    layers::{
        BuildCtx, background::BACKGROUND_KEY, background::build_background, clouds::build_clouds,
        ground::build_ground, leaves::build_leaves,
    },
    motion::{clouds::CloudDrift, ground::GroundParallax, leaves::LeafOrbit, pan::CameraPan},
    render::RenderSettings,
    scene::graph::SceneGraph,
    scene::registry::Registry,
    scene::viewport::Viewport,
};

/// Everything the frame loop mutates, owned in one place.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub graph: SceneGraph,
    pub registry: Registry,
    pub viewport: Viewport,
    pub clouds: CloudDrift,
    pub pan: CameraPan,
    pub ground: GroundParallax,
    pub leaves: LeafOrbit,
    /// Frames advanced so far.
    pub frame: FrameIndex,
    pub clear_rgba: [u8; 4],
}

impl SceneState {
    /// Measure the viewport for `display_size` and run every layer builder in stage order.
    ///
    /// Fails with `AssetMissing` if a builder needs a texture `assets` does not hold.
    #[tracing::instrument(level = "info", skip(config, assets))]
    pub fn build(
        config: &SceneConfig,
        display_size: Canvas,
        assets: &AssetStore,
    ) -> SceneResult<Self> {
        config.validate()?;
        let viewport = Viewport::measure(config.design.size(), display_size, config.design.padding)?;

        let mut graph = SceneGraph::new();
        let mut registry = Registry::new();
        let mut ctx = BuildCtx {
            graph: &mut graph,
            registry: &mut registry,
            viewport: &viewport,
            assets,
        };

        build_background(&mut ctx, &config.background)?;
        let clouds = build_clouds(&mut ctx, &config.clouds)?;
        let ground = build_ground(&mut ctx, &config.ground)?;
        let leaves = build_leaves(&mut ctx, &config.leaves)?;

        tracing::info!(
            nodes = graph.len(),
            registered = registry.len(),
            canvas = ?viewport.canvas(),
            "scene built"
        );

        Ok(Self {
            graph,
            registry,
            viewport,
            clouds,
            pan: CameraPan::new(BACKGROUND_KEY, config.pan),
            ground,
            leaves,
            frame: FrameIndex(0),
            clear_rgba: config.clear_rgba,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.viewport.canvas()
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            canvas: self.canvas(),
            clear_rgba: self.clear_rgba,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/state.rs"]
mod tests;
