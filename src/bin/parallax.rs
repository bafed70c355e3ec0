use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parallax", version, about = "Render the animated parallax scene")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Run the frame loop in real time without writing output.
    Play(PlayArgs),
    /// Print the default scene configuration as JSON.
    DumpConfig,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Directory texture names are resolved against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Scene configuration JSON; the built-in scene when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display width the scene is fit into.
    #[arg(long, default_value_t = 1010)]
    width: u32,

    /// Display height the scene is fit into.
    #[arg(long, default_value_t = 1010)]
    height: u32,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frames to advance before rendering (0 is the freshly built scene).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to render.
    #[arg(long)]
    count: u64,

    /// Output directory for `frame_NNNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Clip length in seconds.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many frames; runs until interrupted when omitted.
    #[arg(long)]
    frames: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Play(args) => cmd_play(args),
        Command::DumpConfig => cmd_dump_config(),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<parallax::SceneConfig> {
    match path {
        Some(p) => parallax::SceneConfig::from_json_path(p)
            .with_context(|| format!("load scene config '{}'", p.display())),
        None => Ok(parallax::SceneConfig::default()),
    }
}

fn build_engine(
    args: &SceneArgs,
) -> anyhow::Result<(parallax::Engine, Box<dyn parallax::RenderBackend>)> {
    let config = read_config(args.config.as_deref())?;
    let display = parallax::Canvas::new(args.width, args.height)?;

    let assets = parallax::AssetStore::preload(&args.assets, config.asset_names())
        .with_context(|| format!("preload textures from '{}'", args.assets.display()))?;
    let engine = parallax::Engine::build(&config, display, assets)?;

    let kind = match args.backend {
        BackendChoice::Cpu => parallax::BackendKind::Cpu,
    };
    let backend = parallax::create_backend(kind, &engine.state().render_settings())?;
    Ok((engine, backend))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut engine, mut backend) = build_engine(&args.scene)?;
    for _ in 0..args.frame {
        engine.advance()?;
    }
    let frame = backend.render(&engine.state().graph, engine.assets())?;
    parallax::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (mut engine, mut backend) = build_engine(&args.scene)?;
    let mut sink = parallax::PngSequenceSink::new(&args.out_dir)?;
    let stats = engine.run(
        &mut parallax::FrameBudget::new(args.count),
        backend.as_mut(),
        &mut sink,
    )?;
    eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        anyhow::bail!("--seconds must be a positive number");
    }
    let (mut engine, mut backend) = build_engine(&args.scene)?;
    let canvas = engine.canvas();
    let frames = (args.seconds * f64::from(args.fps)).ceil() as u64;

    let cfg = parallax::EncodeConfig::mp4(&args.out, canvas.width, canvas.height, args.fps);
    let clear = engine.state().clear_rgba;
    let mut sink = parallax::FfmpegSink::new(cfg, clear)?;
    engine.run(
        &mut parallax::FrameBudget::new(frames),
        backend.as_mut(),
        &mut sink,
    )?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (mut engine, mut backend) = build_engine(&args.scene)?;
    let mut scheduler = parallax::FixedRateScheduler::new(args.fps, args.frames)?;
    let mut sink = parallax::NullSink::default();
    let started = std::time::Instant::now();
    let stats = engine.run(&mut scheduler, backend.as_mut(), &mut sink)?;
    let elapsed = started.elapsed().as_secs_f64();
    eprintln!(
        "played {} frames in {:.2}s ({:.1} fps)",
        stats.frames,
        elapsed,
        stats.frames as f64 / elapsed.max(f64::EPSILON)
    );
    Ok(())
}

fn cmd_dump_config() -> anyhow::Result<()> {
    println!("{}", parallax::SceneConfig::default().to_json_pretty()?);
    Ok(())
}
