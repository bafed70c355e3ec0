use crate::{
    config::model::{CloudSpec, CloudsConfig},
    foundation::error::SceneResult,
    layers::BuildCtx,
    motion::clouds::{CloudDrift, CloudMotion},
    scene::graph::NodeId,
    scene::registry::RenderableKey,
};

/// Two offscreen-repeating back groups, then the doubled front cloud set.
///
/// Clouds are registered as `Cloud(0..)` in build order: back groups first.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_clouds(ctx: &mut BuildCtx<'_>, cfg: &CloudsConfig) -> SceneResult<CloudDrift> {
    ctx.assets.require(
        cfg.back
            .iter()
            .chain(&cfg.front)
            .map(|spec| spec.texture.as_str()),
    )?;

    let mut drift = CloudDrift::new();
    let groups = &cfg.back_groups;
    let stage = ctx.graph.stage();

    for group_idx in 0..2 {
        let group = ctx.graph.add_container(stage)?;
        let mirrored = groups.mirror_second && group_idx == 1;
        for spec in &cfg.back {
            add_cloud_sprite(ctx, group, spec, 0.0, mirrored)?;
        }
        if group_idx == 1 {
            ctx.graph.get_mut(group)?.x = ctx.viewport.width() * groups.second_offset;
        }
        ctx.graph
            .fit_width(group, ctx.viewport.width() * groups.fit_width)?;

        let key = RenderableKey::Cloud(drift.len());
        ctx.registry.register(key.clone(), group);
        drift.push(CloudMotion {
            key,
            speed: groups.speed,
            is_back: true,
        });
    }

    for spec in &cfg.front {
        let width = ctx.viewport.to_device(spec.width);
        for offset in [0.0, width] {
            let sprite = add_cloud_sprite(ctx, stage, spec, offset, false)?;
            let key = RenderableKey::Cloud(drift.len());
            ctx.registry.register(key.clone(), sprite);
            drift.push(CloudMotion {
                key,
                speed: spec.speed,
                is_back: false,
            });
        }
    }

    tracing::debug!(clouds = drift.len(), "clouds built");
    Ok(drift)
}

fn add_cloud_sprite(
    ctx: &mut BuildCtx<'_>,
    parent: NodeId,
    spec: &CloudSpec,
    x_offset: f64,
    mirrored: bool,
) -> SceneResult<NodeId> {
    let vp = ctx.viewport;
    let id = ctx.graph.add_sprite(parent, spec.texture.as_str())?;
    let r = ctx.graph.get_mut(id)?;
    r.x = vp.to_device(spec.x) + x_offset;
    r.y = vp.to_device(spec.y);
    r.width = vp.to_device(spec.width);
    r.height = vp.to_device(spec.height);
    if let Some(alpha) = spec.alpha {
        r.alpha = alpha;
    }
    if mirrored {
        r.scale.x = -1.0;
        r.anchor.x = 1.0;
    }
    Ok(id)
}

#[cfg(test)]
#[path = "../../tests/unit/layers/clouds.rs"]
mod tests;
