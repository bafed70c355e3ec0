use super::*;
use crate::{
    assets::store::AssetStore,
    config::model::SceneConfig,
    foundation::core::Size,
    foundation::error::SceneError,
    layers::test_support::{empty_scene, stock_assets, viewport_500},
};

#[test]
fn background_fills_width_and_keeps_aspect() {
    let (mut graph, mut registry) = empty_scene();
    let viewport = viewport_500();
    let assets = stock_assets();
    let mut ctx = BuildCtx {
        graph: &mut graph,
        registry: &mut registry,
        viewport: &viewport,
        assets: &assets,
    };
    let cfg = SceneConfig::default();
    let layer = build_background(&mut ctx, &cfg.background).unwrap();

    let img = graph.get(layer.image).unwrap();
    assert_eq!(img.width, 495.0);
    // 1375 / (1000 / 495) = 680.625
    assert_eq!(img.height, 680.0);

    let c = graph.get(layer.container).unwrap();
    assert_eq!((c.width, c.height), (495.0, 495.0));
    assert_eq!(
        graph.measured_size(layer.container).unwrap(),
        Size::new(495.0, 680.0)
    );

    assert_eq!(registry.get_named(BACKGROUND_KEY).unwrap(), layer.container);
    assert_eq!(registry.get_named("back1").unwrap(), layer.image);
}

#[test]
fn missing_texture_aborts_before_building() {
    let (mut graph, mut registry) = empty_scene();
    let viewport = viewport_500();
    let assets = AssetStore::new(".");
    let mut ctx = BuildCtx {
        graph: &mut graph,
        registry: &mut registry,
        viewport: &viewport,
        assets: &assets,
    };
    let err = build_background(&mut ctx, &SceneConfig::default().background).unwrap_err();
    assert!(matches!(err, SceneError::AssetMissing(ref n) if n == "assets/back.jpg"));
    assert_eq!(graph.len(), 1);
    assert!(registry.is_empty());
}
