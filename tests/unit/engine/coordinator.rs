use super::*;
use crate::{
    encode::sink::NullSink,
    engine::{overlay::RecordingOverlay, scheduler::FrameBudget},
    foundation::error::SceneError,
    layers::test_support::stock_assets,
    motion::pan::PanPhase,
    scene::graph::SceneGraph,
};

fn engine() -> (Engine, RecordingOverlay) {
    let overlay = RecordingOverlay::new();
    let engine = Engine::build(
        &SceneConfig::default(),
        Canvas {
            width: 500,
            height: 500,
        },
        stock_assets(),
    )
    .unwrap()
    .with_overlay(Box::new(overlay.clone()));
    (engine, overlay)
}

struct FailingBackend;

impl RenderBackend for FailingBackend {
    fn render(&mut self, _graph: &SceneGraph, _assets: &AssetStore) -> SceneResult<FrameRGBA> {
        Err(SceneError::render("boom"))
    }
}

struct BlankBackend {
    calls: u64,
}

impl RenderBackend for BlankBackend {
    fn render(&mut self, _graph: &SceneGraph, _assets: &AssetStore) -> SceneResult<FrameRGBA> {
        self.calls += 1;
        Ok(FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0; 4],
            premultiplied: true,
        })
    }
}

#[test]
fn pan_finishes_after_limit_and_stays_put() {
    let (mut engine, _) = engine();
    for _ in 0..206 {
        engine.advance().unwrap();
    }
    let state = engine.state();
    assert_eq!(state.pan.phase(), PanPhase::Finished { limit: -185.0 });
    let back = state.registry.get_named("back").unwrap();
    assert_eq!(state.graph.get(back).unwrap().y, -185.0);

    engine.advance().unwrap();
    assert_eq!(engine.state().graph.get(back).unwrap().y, -185.0);
}

#[test]
fn overlay_is_revealed_once_when_ground_settles() {
    let (mut engine, overlay) = engine();
    for _ in 0..400 {
        engine.advance().unwrap();
    }
    assert!(!engine.state().ground.is_settled());
    assert!(overlay.revealed().is_empty());

    for _ in 0..30 {
        engine.advance().unwrap();
    }
    assert!(engine.state().ground.is_settled());
    assert!(engine.overlay_revealed());

    for _ in 0..100 {
        engine.advance().unwrap();
    }
    let revealed = overlay.revealed();
    assert_eq!(revealed.len(), 1);
    assert_eq!(revealed[0].title, "Simple parallax demo");
    assert_eq!(revealed[0].lines.len(), 2);

    let state = engine.state();
    for layer in state.ground.layers() {
        let id = state.registry.get(&layer.key).unwrap();
        assert_eq!(state.graph.get(id).unwrap().y, layer.base_y);
    }
}

#[test]
fn run_ticks_until_budget_is_spent() {
    let (mut engine, _) = engine();
    let mut backend = BlankBackend { calls: 0 };
    let mut sink = NullSink::default();
    let stats = engine
        .run(&mut FrameBudget::new(5), &mut backend, &mut sink)
        .unwrap();

    assert_eq!(stats, RunStats { frames: 5, stopped: false });
    assert_eq!(sink.frames, 5);
    assert_eq!(backend.calls, 5);
    assert_eq!(engine.frame(), FrameIndex(5));
}

#[test]
fn stopped_handle_ends_the_run_before_the_next_frame() {
    let (mut engine, _) = engine();
    engine.handle().stop();
    let mut sink = NullSink::default();
    let stats = engine
        .run(&mut FrameBudget::new(5), &mut BlankBackend { calls: 0 }, &mut sink)
        .unwrap();
    assert_eq!(stats, RunStats { frames: 0, stopped: true });
    assert_eq!(engine.frame(), FrameIndex(0));
}

#[test]
fn render_error_stops_the_loop() {
    let (mut engine, _) = engine();
    let mut sink = NullSink::default();
    let err = engine
        .run(&mut FrameBudget::new(5), &mut FailingBackend, &mut sink)
        .unwrap_err();
    assert!(matches!(err, SceneError::Render(_)));
    assert!(!engine.handle().is_running());
    assert_eq!(sink.frames, 0);
    assert_eq!(engine.frame(), FrameIndex(1));
}

struct FailingSink {
    pushed: u64,
}

impl FrameSink for FailingSink {
    fn push_frame(&mut self, _index: FrameIndex, _frame: &FrameRGBA) -> SceneResult<()> {
        self.pushed += 1;
        Err(SceneError::encode("disk full"))
    }
}

#[test]
fn sink_error_stops_the_loop() {
    let (mut engine, _) = engine();
    let handle = engine.handle();
    let mut backend = create_backend(BackendKind::Cpu, &engine.state().render_settings()).unwrap();
    let mut sink = FailingSink { pushed: 0 };
    let err = engine
        .run(&mut FrameBudget::new(5), backend.as_mut(), &mut sink)
        .unwrap_err();
    assert!(matches!(err, SceneError::Encode(_)));
    assert!(!handle.is_running());
    assert_eq!(sink.pushed, 1);
    assert_eq!(engine.frame(), FrameIndex(1));
}

#[test]
fn start_builds_and_runs_on_the_cpu_backend() {
    let mut sink = NullSink::default();
    let stats = start(
        &SceneConfig::default(),
        Canvas {
            width: 100,
            height: 100,
        },
        stock_assets(),
        &mut FrameBudget::new(2),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats.frames, 2);
    assert_eq!(sink.frames, 2);
}

#[test]
fn start_surfaces_missing_textures() {
    let err = start(
        &SceneConfig::default(),
        Canvas {
            width: 100,
            height: 100,
        },
        AssetStore::new("."),
        &mut FrameBudget::new(2),
        &mut NullSink::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, SceneError::AssetMissing(_)));
}
