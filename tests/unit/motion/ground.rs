use super::*;
use crate::scene::graph::NodeId;

fn scene(starts: &[(f64, f64, f64)]) -> (SceneGraph, Registry, GroundParallax, Vec<NodeId>) {
    let mut graph = SceneGraph::new();
    let mut registry = Registry::new();
    let stage = graph.stage();
    let mut layers = Vec::new();
    let mut ids = Vec::new();
    for (i, &(y, base_y, step)) in starts.iter().enumerate() {
        let id = graph.add_sprite(stage, "g").unwrap();
        graph.get_mut(id).unwrap().y = y;
        let key = RenderableKey::Named(format!("layer{i}"));
        registry.register(key.clone(), id);
        layers.push(GroundLayerMotion {
            key,
            base_y,
            step_per_frame: step,
        });
        ids.push(id);
    }
    (graph, registry, GroundParallax::new(layers), ids)
}

#[test]
fn layers_descend_monotonically_and_never_overshoot() {
    let (mut graph, registry, mut ground, ids) =
        scene(&[(100.0, 10.0, 7.0), (50.0, 40.0, 3.0), (300.0, 0.0, 1.0)]);

    let mut prev: Vec<f64> = ids.iter().map(|&id| graph.get(id).unwrap().y).collect();
    for _ in 0..400 {
        ground.step(&mut graph, &registry).unwrap();
        for (i, &id) in ids.iter().enumerate() {
            let y = graph.get(id).unwrap().y;
            let base = ground.layers()[i].base_y;
            assert!(y <= prev[i]);
            assert!(y >= base);
            if prev[i] == base {
                assert_eq!(y, base);
            }
            prev[i] = y;
        }
    }
    assert!(ground.is_settled());
}

#[test]
fn settle_fires_exactly_once_when_last_layer_rests() {
    let (mut graph, registry, mut ground, _) = scene(&[(12.0, 10.0, 1.0), (14.0, 10.0, 1.0)]);

    let fired: Vec<bool> = (0..10)
        .map(|_| ground.step(&mut graph, &registry).unwrap())
        .collect();
    assert_eq!(fired.iter().filter(|&&f| f).count(), 1);
    // Second layer needs four steps; the first rests after two.
    assert_eq!(fired.iter().position(|&f| f), Some(3));
}

#[test]
fn settled_ground_no_longer_touches_layers() {
    let (mut graph, registry, mut ground, ids) = scene(&[(11.0, 10.0, 1.0)]);
    assert!(ground.step(&mut graph, &registry).unwrap());
    graph.get_mut(ids[0]).unwrap().y = 999.0;
    assert!(!ground.step(&mut graph, &registry).unwrap());
    assert_eq!(graph.get(ids[0]).unwrap().y, 999.0);
}

#[test]
fn missing_layer_is_lookup_error() {
    let mut graph = SceneGraph::new();
    let registry = Registry::new();
    let mut ground = GroundParallax::new(vec![GroundLayerMotion {
        key: "land".into(),
        base_y: 0.0,
        step_per_frame: 1.0,
    }]);
    assert!(ground.step(&mut graph, &registry).unwrap_err().is_lookup());
}
