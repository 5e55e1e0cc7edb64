use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "decodefx", version, about = "Decoding-style text reveal with GIF/MP4 export")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Settings JSON. Missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display font file (TTF/OTF).
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Audio cue file.
    #[arg(long, global = true)]
    sound: Option<PathBuf>,

    /// Disable the audio cue.
    #[arg(long, global = true)]
    mute: bool,

    /// Fixed random seed.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type text and watch it decode (default).
    Interactive(InteractiveArgs),
    /// Record one full run of a text and export it.
    Render(RenderArgs),
    /// Render the state after a number of ticks as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug, Default)]
struct InteractiveArgs {
    /// Log file (the terminal is taken by the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Text to animate.
    #[arg(long)]
    text: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = KindChoice::Gif)]
    kind: KindChoice,

    /// Output path. Defaults to the configured path for the format, or `frames/` for `png`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Playback rate of the exported file.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Text to animate.
    #[arg(long)]
    text: String,

    /// Ticks to advance before rendering.
    #[arg(long)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print which font was resolved and the SHA-256 of its bytes.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    /// Looping GIF.
    Gif,
    /// H.264 MP4 through ffmpeg.
    Mp4,
    /// Numbered PNG files in a directory.
    Png,
}

impl From<KindChoice> for decodefx::ExportKind {
    fn from(k: KindChoice) -> Self {
        match k {
            KindChoice::Gif | KindChoice::Png => Self::ImageSequence,
            KindChoice::Mp4 => Self::Video,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.common)?;
    match cli.cmd {
        None => cmd_interactive(&cli.common, settings, InteractiveArgs::default()),
        Some(Command::Interactive(args)) => cmd_interactive(&cli.common, settings, args),
        Some(Command::Render(args)) => cmd_render(&cli.common, settings, args),
        Some(Command::Frame(args)) => cmd_frame(&cli.common, settings, args),
    }
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file '{}'", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init();
    Ok(())
}

fn load_settings(common: &CommonArgs) -> anyhow::Result<decodefx::Settings> {
    let mut settings = match &common.config {
        Some(path) => decodefx::Settings::from_path(path)?,
        None => decodefx::Settings::default(),
    };
    if let Some(font) = &common.font {
        settings.style.font_path = Some(font.clone());
    }
    if let Some(sound) = &common.sound {
        settings.audio.cue_path = Some(sound.clone());
    }
    if common.mute {
        settings.audio.cue_path = None;
    }
    Ok(settings)
}

fn cmd_interactive(
    common: &CommonArgs,
    settings: decodefx::Settings,
    args: InteractiveArgs,
) -> anyhow::Result<()> {
    let log_path = args
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("decodefx.log"));
    init_file_logging(&log_path)?;

    let face = decodefx::load_font(settings.style.font_path.as_deref());
    let renderer = decodefx::FrameRenderer::new(&settings, face)?;
    let cue = decodefx::load_cue(&settings.audio);
    let mut shell = decodefx::Shell::new(settings, renderer, cue)?;
    if let Some(seed) = common.seed {
        shell = shell.with_seed(seed);
    }

    decodefx::run_terminal(&mut shell)?;
    Ok(())
}

fn cmd_render(
    common: &CommonArgs,
    mut settings: decodefx::Settings,
    args: RenderArgs,
) -> anyhow::Result<()> {
    init_stderr_logging();

    let kind = decodefx::ExportKind::from(args.kind);
    if let Some(fps) = args.fps {
        settings.export.fps = fps;
    }
    match (args.kind, args.out.clone()) {
        (KindChoice::Gif, Some(out)) => settings.export.gif_path = out,
        (KindChoice::Mp4, Some(out)) => settings.export.video_path = out,
        _ => {}
    }
    settings.validate()?;

    let face = decodefx::load_font(settings.style.font_path.as_deref());
    let recording = decodefx::record_run(&args.text, &settings, face, common.seed, kind)?;

    if let KindChoice::Png = args.kind {
        let dir = args.out.unwrap_or_else(|| PathBuf::from("frames"));
        let fps = decodefx::Fps::whole(settings.export.fps)?;
        let files = decodefx::encode_png_frames(&recording.frames, &dir, fps)?;
        eprintln!("wrote {files} frames to {}", dir.display());
        return Ok(());
    }

    let path = decodefx::export(&recording, &settings.export)?;
    eprintln!("wrote {} ({} frames)", path.display(), recording.frames.len());
    Ok(())
}

fn cmd_frame(
    common: &CommonArgs,
    settings: decodefx::Settings,
    args: FrameArgs,
) -> anyhow::Result<()> {
    init_stderr_logging();

    let face = decodefx::load_font(settings.style.font_path.as_deref());
    if args.dump_font {
        dump_font_diagnostics(&face);
    }

    let frame = decodefx::render_frame_at(&args.text, &settings, face, common.seed, args.tick)?;

    decodefx::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn dump_font_diagnostics(face: &decodefx::FontFace) {
    eprintln!("font diagnostics:");
    eprintln!("  source: {}", face.describe());
    if let decodefx::FontFace::Outline(f) = face {
        eprintln!("  index:  {}", f.index);
        eprintln!("  sha256: {}", sha256_hex(&f.bytes));
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
