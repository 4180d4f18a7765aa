use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "svgframes", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Freeze an animated SVG into a directory of frame files plus `manifest.json`.
    Frames(FramesArgs),
    /// Print directive counts, durations and the planned sample count as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// JSON run config (camelCase keys). Replaces every flag below except `--out`.
    #[arg(long, conflicts_with = "in_path")]
    config: Option<PathBuf>,

    /// Input SVG file.
    #[arg(long = "in", required_unless_present = "config")]
    in_path: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Samples per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Explicit duration in seconds (analyzed from the document when omitted).
    #[arg(long)]
    duration: Option<f64>,

    /// How the duration is analyzed.
    #[arg(long, value_enum, default_value_t = PolicyChoice::DurAttribute)]
    duration_policy: PolicyChoice,

    /// Frame payload format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Svg)]
    format: FormatChoice,

    /// Raster scale for PNG frames.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Cap on produced frames.
    #[arg(long, default_value_t = svgframes::DEFAULT_MAX_FRAMES)]
    max_frames: usize,

    /// Keep going past failing directives and report them in the manifest.
    #[arg(long)]
    isolate: bool,

    /// Encode frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Thread pool size for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Rate used for the planned sample count.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    DurAttribute,
    ActiveEnd,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn config_from_args(args: &FramesArgs) -> anyhow::Result<svgframes::FramesConfig> {
    if let Some(path) = &args.config {
        return Ok(svgframes::FramesConfig::from_path(path)?);
    }
    let in_path = args
        .in_path
        .as_ref()
        .context("either --in or --config is required")?;

    let mut config =
        svgframes::FramesConfig::new(in_path.to_string_lossy().into_owned(), args.fps);
    config.duration = args.duration;
    config.duration_policy = match args.duration_policy {
        PolicyChoice::DurAttribute => svgframes::DurationPolicy::DurAttribute,
        PolicyChoice::ActiveEnd => svgframes::DurationPolicy::ActiveEnd,
    };
    config.format = match args.format {
        FormatChoice::Svg => svgframes::FrameFormat::Svg,
        FormatChoice::Png => svgframes::FrameFormat::Png,
    };
    config.raster_scale = args.scale;
    config.max_frames = args.max_frames;
    if args.isolate {
        config.failure_policy = svgframes::FailurePolicy::Isolate;
    }
    config.parallel_encode = args.parallel;
    config.threads = args.threads;
    Ok(config)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let config = config_from_args(&args)?;
    let generation = svgframes::generate_frames(&config)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut entries = Vec::with_capacity(generation.sequence.len());
    for frame in generation.sequence.iter() {
        let file = format!(
            "frame_{:05}.{}",
            frame.index(),
            frame.format().extension()
        );
        write_file(&args.out.join(&file), &frame.payload()?)?;
        entries.push(serde_json::json!({
            "index": frame.index(),
            "time": frame.time(),
            "file": file,
        }));
    }

    let errors: Vec<serde_json::Value> = generation
        .errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "index": e.index,
                "time": e.time,
                "error": e.error.to_string(),
            })
        })
        .collect();

    let manifest = serde_json::json!({
        "frameRate": generation.sequence.frame_rate().as_f64(),
        "duration": generation.duration,
        "cancelled": generation.cancelled,
        "frames": entries,
        "errors": errors,
    });
    let manifest_path = args.out.join("manifest.json");
    write_file(
        &manifest_path,
        serde_json::to_string_pretty(&manifest)
            .context("serialize manifest")?
            .as_bytes(),
    )?;

    eprintln!(
        "wrote {} frames to {}",
        generation.sequence.len(),
        args.out.display()
    );
    if !generation.errors.is_empty() {
        eprintln!(
            "{} directive errors recorded in {}",
            generation.errors.len(),
            manifest_path.display()
        );
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = svgframes::AnimatedDocument::from_path(&args.in_path)?;
    let sampler =
        svgframes::FrameSampler::new(svgframes::SampleOptions::with_frame_rate(args.fps))?;

    let mut counts = serde_json::Map::new();
    for kind in svgframes::DirectiveKind::ALL {
        counts.insert(
            kind.tag().to_string(),
            doc.directives().count(kind).into(),
        );
    }

    let dur_attribute =
        svgframes::DurationAnalyzer::analyze(&doc, svgframes::DurationPolicy::DurAttribute);
    let active_end =
        svgframes::DurationAnalyzer::analyze(&doc, svgframes::DurationPolicy::ActiveEnd);
    let planned = sampler.sample_times(sampler.duration_of(&doc)).len();

    let summary = serde_json::json!({
        "directives": counts,
        "durAttribute": dur_attribute,
        "activeEnd": active_end,
        "frameRate": args.fps,
        "plannedSamples": planned,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize summary")?
    );
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
