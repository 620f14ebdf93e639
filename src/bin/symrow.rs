use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "symrow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a batch of task samples (stills + optional ground-truth videos).
    Generate(GenerateArgs),
    /// Render a single initial-state still as a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output directory for PNGs and metadata records.
    #[arg(long)]
    out: PathBuf,

    /// Number of samples to generate.
    #[arg(long, default_value_t = 10)]
    samples: u64,

    /// RNG seed; overrides any seed in the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Generation config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable ground-truth video generation for this run.
    #[arg(long)]
    no_video: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(serde::Serialize)]
struct SampleRecord<'a> {
    task_id: &'a str,
    domain: &'a str,
    prompt: &'a str,
    first_image: String,
    final_image: String,
    ground_truth_video: Option<&'a Path>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<symrow::GenConfig> {
    let Some(path) = path else {
        return Ok(symrow::GenConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: symrow::GenConfig =
        serde_json::from_reader(BufReader::new(f)).context("parse config JSON")?;
    Ok(cfg)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = read_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_video {
        config.generate_videos = false;
    }
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut pipeline = symrow::TaskPipeline::new(config)?;
    for i in 0..args.samples {
        let task_id = format!("task_{i:06}");
        let pair = pipeline.generate_task_pair(&mut rng, &task_id)?;
        write_sample(&args.out, &pair)?;
    }

    eprintln!("wrote {} samples to {}", args.samples, args.out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let config = symrow::GenConfig {
        generate_videos: false,
        ..symrow::GenConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let task = symrow::task::generate(&mut rng);
    let mut renderer = symrow::StateRenderer::new(config)?;
    let frame = renderer.render(&task.initial_sequence, &task)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_sample(out_dir: &Path, pair: &symrow::TaskPair) -> anyhow::Result<()> {
    let first_name = format!("{}_first.png", pair.task_id);
    let final_name = format!("{}_final.png", pair.task_id);
    save_png(&out_dir.join(&first_name), &pair.first_image)?;
    save_png(&out_dir.join(&final_name), &pair.final_image)?;

    let record = SampleRecord {
        task_id: &pair.task_id,
        domain: &pair.domain,
        prompt: &pair.prompt,
        first_image: first_name,
        final_image: final_name,
        ground_truth_video: pair.ground_truth_video.as_deref(),
    };
    let meta_path = out_dir.join(format!("{}.json", pair.task_id));
    let f = File::create(&meta_path)
        .with_context(|| format!("create metadata '{}'", meta_path.display()))?;
    serde_json::to_writer_pretty(f, &record).context("write metadata JSON")?;
    Ok(())
}

fn save_png(path: &Path, frame: &symrow::FrameRgba) -> anyhow::Result<()> {
    let opaque = symrow::surface::flatten_to_opaque(frame, [255, 255, 255])?;
    image::save_buffer_with_format(
        path,
        &opaque,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
