//! Rasterizing the scene graph into RGBA8 frames.

pub(crate) mod cpu;

use crate::{
    assets::store::AssetStore,
    foundation::core::Canvas,
    foundation::error::{SceneError, SceneResult},
    scene::graph::SceneGraph,
};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub trait RenderBackend {
    /// Draw every visible sprite of `graph` over the clear colour.
    fn render(&mut self, graph: &SceneGraph, assets: &AssetStore) -> SceneResult<FrameRGBA>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Cpu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    pub canvas: Canvas,
    /// Straight-alpha RGBA8 the frame is cleared to.
    pub clear_rgba: [u8; 4],
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SceneResult<Box<dyn RenderBackend>> {
    if settings.canvas.width > u32::from(u16::MAX) || settings.canvas.height > u32::from(u16::MAX) {
        return Err(SceneError::validation(format!(
            "canvas {}x{} exceeds the renderer limit",
            settings.canvas.width, settings.canvas.height
        )));
    }
    match kind {
        BackendKind::Cpu => Ok(Box::new(cpu::CpuBackend::new(*settings))),
    }
}
