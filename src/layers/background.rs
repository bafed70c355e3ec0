use crate::{
    config::model::ImageSpec,
    foundation::error::SceneResult,
    layers::BuildCtx,
    scene::graph::NodeId,
};

/// Registry name of the container the camera pan moves.
pub const BACKGROUND_KEY: &str = "back";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundLayer {
    pub container: NodeId,
    pub image: NodeId,
}

/// Full-bleed container holding the sky image fit to the viewport width.
#[tracing::instrument(level = "debug", skip_all, fields(texture = %spec.texture))]
pub fn build_background(ctx: &mut BuildCtx<'_>, spec: &ImageSpec) -> SceneResult<BackgroundLayer> {
    ctx.assets.require([spec.texture.as_str()])?;
    let stage = ctx.graph.stage();
    let container = ctx.full_bleed_container(stage)?;
    ctx.registry.register(BACKGROUND_KEY, container);
    let image = ctx.place_image(spec, container)?;
    Ok(BackgroundLayer { container, image })
}

#[cfg(test)]
#[path = "../../tests/unit/layers/background.rs"]
mod tests;
