use crate::{
    config::model::LeavesConfig,
    foundation::error::SceneResult,
    layers::BuildCtx,
    motion::leaves::{LeafMotion, LeafOrbit},
    scene::registry::RenderableKey,
};

/// Registry name of the container every leaf sprite hangs from.
pub const LEAVES_KEY: &str = "leaves";

/// Upper flutter bound shared by every leaf: the sprite's untouched vertical scale.
const BASE_SCALE_Y: f64 = 1.0;

/// One sprite per manifest entry, registered as `Leaf(0..)` in manifest order.
///
/// Base positions go through the viewport scale; orbit radii are device pixels as given.
#[tracing::instrument(level = "debug", skip_all, fields(leaves = cfg.manifest.len()))]
pub fn build_leaves(ctx: &mut BuildCtx<'_>, cfg: &LeavesConfig) -> SceneResult<LeafOrbit> {
    ctx.assets
        .require(cfg.manifest.iter().map(|spec| spec.texture.as_str()))?;

    let stage = ctx.graph.stage();
    let container = ctx.graph.add_container(stage)?;
    ctx.registry.register(LEAVES_KEY, container);

    let vp = ctx.viewport;
    let mut motions = Vec::with_capacity(cfg.manifest.len());
    for (idx, spec) in cfg.manifest.iter().enumerate() {
        let natural = ctx.assets.get(&spec.texture)?.size();
        let base = (vp.to_device(spec.x), vp.to_device(spec.y));

        let id = ctx.graph.add_sprite(container, spec.texture.as_str())?;
        let r = ctx.graph.get_mut(id)?;
        r.x = base.0;
        r.y = base.1;
        r.width = vp.to_device(natural.width);
        r.height = vp.to_device(natural.height);
        r.scale.y = spec.scale_y;

        let key = RenderableKey::Leaf(idx);
        ctx.registry.register(key.clone(), id);
        motions.push(LeafMotion::new(
            key,
            base,
            spec.radius,
            spec.speed_bound,
            spec.rotation_step,
            BASE_SCALE_Y,
        ));
    }

    Ok(LeafOrbit::new(motions, cfg.wind))
}

#[cfg(test)]
#[path = "../../tests/unit/layers/leaves.rs"]
mod tests;
