use super::*;
use crate::{
    foundation::error::SceneError,
    layers::test_support::stock_assets,
    scene::registry::RenderableKey,
};

fn display() -> Canvas {
    Canvas {
        width: 500,
        height: 500,
    }
}

#[test]
fn default_scene_builds_every_layer() {
    let state = SceneState::build(&SceneConfig::default(), display(), &stock_assets()).unwrap();

    assert_eq!(state.canvas(), Canvas { width: 495, height: 495 });
    assert_eq!(state.clouds.len(), 14);
    assert_eq!(state.ground.layers().len(), 5);
    assert_eq!(state.leaves.leaves().len(), 19);
    assert_eq!(state.graph.len(), 55);
    assert_eq!(state.registry.len(), 42);
    assert_eq!(state.frame, FrameIndex(0));

    for name in ["back", "back1", "landscape", "land", "land2", "leaves"] {
        assert!(state.registry.get_named(name).is_ok(), "{name} not registered");
    }
    assert!(state.registry.contains(&RenderableKey::Cloud(13)));
    assert!(state.registry.contains(&RenderableKey::Leaf(18)));
    assert!(!state.pan.is_finished());
}

#[test]
fn stage_order_is_back_clouds_ground_leaves() {
    let state = SceneState::build(&SceneConfig::default(), display(), &stock_assets()).unwrap();
    let top = state.graph.children(state.graph.stage()).unwrap();
    assert_eq!(top[0], state.registry.get_named("back").unwrap());
    assert_eq!(top[top.len() - 2], state.registry.get_named("landscape").unwrap());
    assert_eq!(top[top.len() - 1], state.registry.get_named("leaves").unwrap());
}

#[test]
fn render_settings_carry_canvas_and_clear_colour() {
    let state = SceneState::build(&SceneConfig::default(), display(), &stock_assets()).unwrap();
    let settings = state.render_settings();
    assert_eq!(settings.canvas, state.canvas());
    assert_eq!(settings.clear_rgba, [0xff, 0x16, 0x39, 0xff]);
}

#[test]
fn missing_texture_fails_the_build() {
    let err = SceneState::build(&SceneConfig::default(), display(), &AssetStore::new(".")).unwrap_err();
    assert!(matches!(err, SceneError::AssetMissing(ref n) if n == "assets/back.jpg"));
}

#[test]
fn invalid_config_is_rejected_before_building() {
    let mut cfg = SceneConfig::default();
    cfg.ground.settle_frames = 0;
    let err = SceneState::build(&cfg, display(), &stock_assets()).unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
}

#[test]
fn build_records_its_span_under_a_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    let state = tracing::subscriber::with_default(subscriber, || {
        SceneState::build(&SceneConfig::default(), display(), &stock_assets())
    })
    .unwrap();
    assert_eq!(state.graph.len(), 55);
}
