use crate::{
    assets::store::AssetStore,
    config::model::SceneConfig,
    encode::sink::FrameSink,
    engine::overlay::{InfoOverlay, LogOverlay, OverlayInfo},
    engine::scheduler::{FrameScheduler, RunHandle},
    engine::state::SceneState,
    foundation::core::{Canvas, FrameIndex},
    foundation::error::SceneResult,
    render::{BackendKind, FrameRGBA, RenderBackend, create_backend},
};

/// Totals reported when a run ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    /// The run ended because the handle was stopped rather than the scheduler running out.
    pub stopped: bool,
}

/// Owns the scene and drives the motion subsystems once per frame.
pub struct Engine {
    state: SceneState,
    assets: AssetStore,
    overlay: Box<dyn InfoOverlay>,
    overlay_info: OverlayInfo,
    overlay_revealed: bool,
    handle: RunHandle,
}

impl Engine {
    /// Build phase: measure, assemble every layer, and take ownership of the loaded textures.
    pub fn build(config: &SceneConfig, display: Canvas, assets: AssetStore) -> SceneResult<Self> {
        let state = SceneState::build(config, display, &assets)?;
        Ok(Self {
            state,
            assets,
            overlay: Box::new(LogOverlay),
            overlay_info: OverlayInfo::from(&config.overlay),
            overlay_revealed: false,
            handle: RunHandle::new(),
        })
    }

    pub fn with_overlay(mut self, overlay: Box<dyn InfoOverlay>) -> Self {
        self.overlay = overlay;
        self
    }

    /// Clone of the running flag; `stop()` on it ends [`Engine::run`] after the current frame.
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn canvas(&self) -> Canvas {
        self.state.canvas()
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> FrameIndex {
        self.state.frame
    }

    pub fn overlay_revealed(&self) -> bool {
        self.overlay_revealed
    }

    /// One frame of motion, in fixed order: clouds, pan, ground, leaves.
    ///
    /// Reveals the overlay on the frame the ground settles.
    pub fn advance(&mut self) -> SceneResult<()> {
        let s = &mut self.state;
        let (vw, vh) = (s.viewport.width(), s.viewport.height());

        s.clouds.step(&mut s.graph, &s.registry, vw)?;
        s.pan.step(&mut s.graph, &s.registry, &s.clouds, vh)?;
        let settled = s.ground.step(&mut s.graph, &s.registry)?;
        s.leaves.step(&mut s.graph, &s.registry, vw)?;
        s.frame = s.frame.next();

        if settled && !self.overlay_revealed {
            self.overlay_revealed = true;
            self.overlay.reveal(&self.overlay_info);
        }
        Ok(())
    }

    /// Advance one frame and render the result.
    pub fn tick(&mut self, backend: &mut dyn RenderBackend) -> SceneResult<FrameRGBA> {
        self.advance()?;
        backend.render(&self.state.graph, &self.assets)
    }

    /// Tick until the scheduler declines or the handle is stopped, pushing every frame to `sink`.
    ///
    /// The first error stops the loop and is returned; the sink is only finished on a clean end.
    pub fn run(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> SceneResult<RunStats> {
        let mut stats = RunStats::default();
        loop {
            if !self.handle.is_running() {
                stats.stopped = true;
                break;
            }
            if !scheduler.next_frame() {
                break;
            }
            let index = self.frame();
            let pushed = self
                .tick(backend)
                .and_then(|frame| sink.push_frame(index, &frame));
            if let Err(err) = pushed {
                self.handle.stop();
                tracing::error!(frame = index.0, error = %err, "frame loop stopped");
                return Err(err);
            }
            stats.frames += 1;
        }
        sink.finish()?;
        tracing::info!(frames = stats.frames, stopped = stats.stopped, "run finished");
        Ok(stats)
    }
}

/// Build the scene for `display`, then run it on the CPU backend until `scheduler` stops.
pub fn start(
    config: &SceneConfig,
    display: Canvas,
    assets: AssetStore,
    scheduler: &mut dyn FrameScheduler,
    sink: &mut dyn FrameSink,
) -> SceneResult<RunStats> {
    let mut engine = Engine::build(config, display, assets)?;
    let mut backend = create_backend(BackendKind::Cpu, &engine.state().render_settings())?;
    engine.run(scheduler, backend.as_mut(), sink)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/coordinator.rs"]
mod tests;
