//! Parallax is an animated layered-scene engine: a sky that pans down, drifting clouds,
//! ground layers that ease into place, and leaves that orbit and blow across the view.
//!
//! The lifecycle has two phases:
//!
//! - Build: preload textures into an [`AssetStore`], then [`Engine::build`] measures the
//!   [`Viewport`] and assembles every layer from a [`SceneConfig`].
//! - Run: [`Engine::run`] ticks the motion subsystems once per frame, renders through a
//!   [`RenderBackend`] and hands each frame to a [`FrameSink`].
//!
//! [`Engine::tick`] is public so callers can replay frames deterministically.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;

pub(crate) mod encode;
pub(crate) mod engine;
pub(crate) mod layers;
pub(crate) mod motion;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{Affine, Canvas, FrameIndex, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{SceneError, SceneResult};

pub use crate::assets::decode::{decode_texture, decode_texture_file};
pub use crate::assets::store::{AssetStore, LoadProgress, Texture, normalize_rel_path};
pub use crate::config::model::{
    BackGroupSpec, CloudSpec, CloudsConfig, DesignSpec, GroundConfig, GroundLayerSpec, ImageFit,
    ImageSpec, LeafSpec, LeavesConfig, OverlayConfig, PanConfig, SceneConfig, WindSpec,
};
pub use crate::encode::ffmpeg::{EncodeConfig, FfmpegSink, flatten_to_opaque_rgba8, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, NullSink, PngSequenceSink, write_png};
pub use crate::engine::coordinator::{Engine, RunStats, start};
pub use crate::engine::fingerprint::scene_fingerprint;
pub use crate::engine::overlay::{InfoOverlay, LogOverlay, OverlayInfo, RecordingOverlay};
pub use crate::engine::scheduler::{FixedRateScheduler, FrameBudget, FrameScheduler, RunHandle};
pub use crate::engine::state::SceneState;
pub use crate::layers::BuildCtx;
pub use crate::layers::background::{BACKGROUND_KEY, BackgroundLayer, build_background};
pub use crate::layers::clouds::build_clouds;
pub use crate::layers::ground::{LANDSCAPE_KEY, build_ground};
pub use crate::layers::leaves::{LEAVES_KEY, build_leaves};
pub use crate::motion::clouds::{CloudDrift, CloudMotion, drift_cloud};
pub use crate::motion::ground::{GroundLayerMotion, GroundParallax};
pub use crate::motion::leaves::{LeafMotion, LeafOrbit};
pub use crate::motion::pan::{CameraPan, PanPhase};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use crate::scene::graph::{NodeId, NodeKind, Renderable, SceneGraph, SpriteDraw};
pub use crate::scene::registry::{Registry, RenderableKey};
pub use crate::scene::viewport::{DEFAULT_PADDING, DESIGN_SIZE, Viewport, compute_scale};
