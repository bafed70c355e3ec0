use crate::{
    config::model::GroundConfig,
    foundation::error::SceneResult,
    layers::BuildCtx,
    motion::ground::{GroundLayerMotion, GroundParallax},
    scene::registry::RenderableKey,
};

/// Registry name of the container holding every ground layer.
pub const LANDSCAPE_KEY: &str = "landscape";

/// Ground layers placed at rest, then pushed down by their staggered start offsets.
///
/// Layer `i` starts `initial_offset + i * offset_stagger` virtual units below its
/// resting y and covers that distance in `settle_frames` equal steps.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_ground(ctx: &mut BuildCtx<'_>, cfg: &GroundConfig) -> SceneResult<GroundParallax> {
    ctx.assets
        .require(cfg.layers.iter().map(|layer| layer.image.texture.as_str()))?;

    let stage = ctx.graph.stage();
    let landscape = ctx.full_bleed_container(stage)?;
    ctx.registry.register(LANDSCAPE_KEY, landscape);

    let mut placed = Vec::with_capacity(cfg.layers.len());
    for layer in &cfg.layers {
        let id = ctx.place_image(&layer.image, landscape)?;
        ctx.graph.get_mut(id)?.y = ctx.viewport.to_device(layer.rest_y);
        placed.push((RenderableKey::from(layer.image.key.as_str()), id));
    }

    let frames = f64::from(cfg.settle_frames);
    let mut motions = Vec::with_capacity(placed.len());
    for (idx, (key, id)) in placed.into_iter().enumerate() {
        let offset = ctx
            .viewport
            .to_device(cfg.initial_offset + cfg.offset_stagger * idx as f64);
        let r = ctx.graph.get_mut(id)?;
        let base_y = r.y;
        r.y += offset;
        motions.push(GroundLayerMotion {
            key,
            base_y,
            step_per_frame: offset / frames,
        });
    }

    Ok(GroundParallax::new(motions))
}

#[cfg(test)]
#[path = "../../tests/unit/layers/ground.rs"]
mod tests;
