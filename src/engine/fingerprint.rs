use crate::{
    foundation::math::Fnv1a64,
    scene::graph::{NodeKind, SceneGraph},
};

/// Hash of every node's kind and transform fields, in tree order.
///
/// Two graphs built and advanced the same way hash equal; any drift in position,
/// scale, rotation or alpha changes the value.
pub fn scene_fingerprint(graph: &SceneGraph) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(graph.len() as u64);
    graph.visit(|id, kind, r| {
        h.write_u64(id.index() as u64);
        match kind {
            NodeKind::Container => h.write_bytes(&[0]),
            NodeKind::Sprite { texture } => {
                h.write_bytes(&[1]);
                h.write_bytes(texture.as_bytes());
            }
        }
        for v in [
            r.x,
            r.y,
            r.width,
            r.height,
            r.scale.x,
            r.scale.y,
            r.rotation,
            r.alpha,
            r.anchor.x,
            r.anchor.y,
        ] {
            h.write_f64(v);
        }
    });
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/fingerprint.rs"]
mod tests;
