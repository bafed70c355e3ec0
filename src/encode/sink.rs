use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{SceneError, SceneResult},
    render::FrameRGBA,
};

/// Consumer of the frames a run produces, in order.
pub trait FrameSink {
    fn push_frame(&mut self, index: FrameIndex, frame: &FrameRGBA) -> SceneResult<()>;

    /// Flush and close. Called once, after the last frame.
    fn finish(&mut self) -> SceneResult<()> {
        Ok(())
    }
}

/// Discards frames; counts them.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink {
    pub frames: u64,
}

impl FrameSink for NullSink {
    fn push_frame(&mut self, _index: FrameIndex, _frame: &FrameRGBA) -> SceneResult<()> {
        self.frames += 1;
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Clone, Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> SceneResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn frame_path(&self, index: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", index.0))
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn push_frame(&mut self, index: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        let path = self.frame_path(index);
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> SceneResult<()> {
        tracing::info!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Save one frame as PNG, un-premultiplying if needed.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> SceneResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    let data = if frame.premultiplied {
        unpremultiply_rgba8(&frame.data)
    } else {
        frame.data.clone()
    };
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| SceneError::encode("frame byte length does not match its size"))?;
    img.save(path)
        .with_context(|| format!("failed to write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
