use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    encode::sink::FrameSink,
    foundation::core::FrameIndex,
    foundation::error::{SceneError, SceneResult},
    foundation::math::mul_div255,
    render::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn mp4(out_path: impl Into<PathBuf>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(SceneError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(SceneError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn ensure_parent_dir(path: &Path) -> SceneResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Pipes raw RGBA frames into the system `ffmpeg` for H.264 MP4 output.
pub struct FfmpegSink {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    /// Spawn the encoder. Alpha is flattened over `bg_rgba` before encoding.
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> SceneResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SceneError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SceneError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SceneError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SceneError::encode("failed to open ffmpeg stdin"))?;

        tracing::info!(out = %cfg.out_path.display(), fps = cfg.fps, "ffmpeg started");
        Ok(Self {
            scratch: vec![0u8; cfg.width as usize * cfg.height as usize * 4],
            cfg,
            bg_rgba,
            child: Some(child),
            stdin: Some(stdin),
        })
    }
}

impl FrameSink for FfmpegSink {
    fn push_frame(&mut self, _index: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(SceneError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SceneError::encode("ffmpeg encoder is already finalized"));
        };
        use std::io::Write as _;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| SceneError::encode(format!("failed to write frame to ffmpeg stdin: {e}")))?;
        Ok(())
    }

    fn finish(&mut self) -> SceneResult<()> {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Ok(());
        };

        let output = child
            .wait_with_output()
            .map_err(|e| SceneError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SceneError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(out = %self.cfg.out_path.display(), "mp4 written");
        Ok(())
    }
}

impl FfmpegSink {
    /// Close stdin and wait on the child without checking its exit status.
    fn reap(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            match child.wait() {
                Ok(status) => tracing::warn!(%status, "ffmpeg stopped before finish"),
                Err(e) => tracing::warn!(error = %e, "failed to wait for ffmpeg"),
            }
        }
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        self.reap();
    }
}

/// Composite RGBA8 over an opaque background colour.
pub fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> SceneResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SceneError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let [bg_r, bg_g, bg_b, _] = bg_rgba.map(u16::from);
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        let over = |c: u8, bg: u16| -> u8 {
            let fg = if src_is_premul {
                u16::from(c)
            } else {
                mul_div255(u16::from(c), a)
            };
            (fg + mul_div255(bg, inv)).min(255) as u8
        };
        d[0] = over(s[0], bg_r);
        d[1] = over(s[1], bg_g);
        d[2] = over(s[2], bg_b);
        d[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
