use super::*;
use crate::{motion::clouds::CloudMotion, scene::graph::NodeId};

const SPEEDS: PanConfig = PanConfig {
    back_speed: 0.9,
    cloud_speed_front: 1.0,
    cloud_speed_back: 0.8,
};

struct Fixture {
    graph: SceneGraph,
    registry: Registry,
    clouds: CloudDrift,
    back: NodeId,
    back_cloud: NodeId,
    front_cloud: NodeId,
}

fn fixture() -> Fixture {
    let mut graph = SceneGraph::new();
    let mut registry = Registry::new();
    let stage = graph.stage();

    let back = graph.add_container(stage).unwrap();
    let sky = graph.add_sprite(back, "sky").unwrap();
    {
        let r = graph.get_mut(sky).unwrap();
        r.width = 495.0;
        r.height = 680.0;
    }
    registry.register("back", back);

    let mut clouds = CloudDrift::new();
    let back_cloud = graph.add_sprite(stage, "c").unwrap();
    let front_cloud = graph.add_sprite(stage, "c").unwrap();
    for (i, (id, is_back)) in [(back_cloud, true), (front_cloud, false)].into_iter().enumerate() {
        graph.get_mut(id).unwrap().y = 100.0;
        registry.register(RenderableKey::Cloud(i), id);
        clouds.push(CloudMotion {
            key: RenderableKey::Cloud(i),
            speed: 0.0,
            is_back,
        });
    }

    Fixture {
        graph,
        registry,
        clouds,
        back,
        back_cloud,
        front_cloud,
    }
}

#[test]
fn limit_is_measured_once_from_background_height() {
    let mut f = fixture();
    let mut pan = CameraPan::new("back", SPEEDS);
    assert_eq!(pan.phase(), PanPhase::Idle);
    assert_eq!(pan.limit(), None);

    pan.step(&mut f.graph, &f.registry, &f.clouds, 495.0).unwrap();
    assert_eq!(pan.limit(), Some(-185.0));

    // Growing the background later does not move the limit.
    let sky = f.graph.children(f.back).unwrap()[0];
    f.graph.get_mut(sky).unwrap().height = 2000.0;
    pan.step(&mut f.graph, &f.registry, &f.clouds, 495.0).unwrap();
    assert_eq!(pan.limit(), Some(-185.0));
}

#[test]
fn pans_to_limit_then_is_idempotent() {
    let mut f = fixture();
    let mut pan = CameraPan::new("back", SPEEDS);

    let mut frames = 0;
    while !pan.is_finished() {
        pan.step(&mut f.graph, &f.registry, &f.clouds, 495.0).unwrap();
        frames += 1;
        assert!(frames < 1000);
        assert!(f.graph.get(f.back).unwrap().y >= -185.0);
    }
    // ceil(185 / 0.9)
    assert_eq!(frames, 206);
    assert_eq!(f.graph.get(f.back).unwrap().y, -185.0);
    assert_eq!(pan.phase(), PanPhase::Finished { limit: -185.0 });

    // Clouds moved on every panning frame, the finishing one included.
    let back_y = f.graph.get(f.back_cloud).unwrap().y;
    let front_y = f.graph.get(f.front_cloud).unwrap().y;
    assert!((back_y - (100.0 - 0.8 * 206.0)).abs() < 1e-9);
    assert!((front_y - (100.0 - 206.0)).abs() < 1e-9);

    let before = (f.graph.get(f.back).unwrap().y, back_y, front_y);
    for _ in 0..10 {
        pan.step(&mut f.graph, &f.registry, &f.clouds, 495.0).unwrap();
    }
    let after = (
        f.graph.get(f.back).unwrap().y,
        f.graph.get(f.back_cloud).unwrap().y,
        f.graph.get(f.front_cloud).unwrap().y,
    );
    assert_eq!(before, after);
}

#[test]
fn background_already_at_limit_finishes_without_moving() {
    let mut f = fixture();
    f.graph.get_mut(f.back).unwrap().y = -300.0;
    let mut pan = CameraPan::new("back", SPEEDS);
    pan.step(&mut f.graph, &f.registry, &f.clouds, 495.0).unwrap();

    assert!(pan.is_finished());
    assert_eq!(f.graph.get(f.back).unwrap().y, -300.0);
    assert_eq!(f.graph.get(f.front_cloud).unwrap().y, 100.0);
}

#[test]
fn missing_background_is_a_lookup_error() {
    let mut f = fixture();
    let mut pan = CameraPan::new("nope", SPEEDS);
    let err = pan
        .step(&mut f.graph, &f.registry, &f.clouds, 495.0)
        .unwrap_err();
    assert!(err.is_lookup());
    assert_eq!(pan.phase(), PanPhase::Idle);
}
