use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use hero_motion::{FixedViewport, MotionConfig, Role, SceneController, SceneTargets, Size};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hero-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount a headless hero scene and write JSON-lines snapshots.
    Simulate(SimulateArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scene configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds of scene time to simulate.
    #[arg(long, default_value_t = 5.0)]
    secs: f64,

    /// Snapshot interval in seconds.
    #[arg(long, default_value_t = 0.5)]
    every: f64,

    /// Jitter seed; overrides the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of fish slots; overrides the config.
    #[arg(long)]
    fish: Option<usize>,

    /// Fish lanes to leave unmounted, e.g. `1,4`.
    #[arg(long, value_delimiter = ',')]
    missing_fish: Vec<usize>,

    /// Output path for snapshots (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Config => cmd_config(),
    }
}

fn element_size(role: Role) -> Size {
    match role {
        Role::Heading => Size::new(900.0, 160.0),
        Role::Subtext => Size::new(720.0, 64.0),
        Role::Cta => Size::new(240.0, 56.0),
        Role::IslandLeft | Role::IslandRight => Size::new(520.0, 240.0),
        Role::Boat => Size::new(260.0, 120.0),
        Role::Fish(_) => Size::new(48.0, 24.0),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.secs.is_finite() && args.secs >= 0.0,
        "--secs must be >= 0"
    );
    anyhow::ensure!(
        args.every.is_finite() && args.every > 0.0,
        "--every must be > 0"
    );

    let mut config = match &args.config {
        Some(path) => MotionConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => MotionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(fish) = args.fish {
        config.fish_count = fish;
    }

    let viewport = FixedViewport(config.viewport_width);
    let fish_count = config.fish_count;
    let mut scene = SceneController::new(config, viewport)?;

    let roles = [
        Role::Heading,
        Role::Subtext,
        Role::Cta,
        Role::IslandLeft,
        Role::IslandRight,
        Role::Boat,
    ]
    .into_iter()
    .chain((0..fish_count).map(Role::Fish))
    .filter(|r| !matches!(r, Role::Fish(lane) if args.missing_fish.contains(lane)));

    let mut targets = SceneTargets::new();
    for role in roles {
        let id = scene.registry_mut().spawn(role, element_size(role));
        targets.insert(role, id);
    }
    let report = scene.on_mount(&targets);
    eprintln!("mounted: {}", serde_json::to_string(&report)?);

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut lines = 0usize;
    let mut elapsed = 0.0;
    loop {
        serde_json::to_writer(&mut out, &scene.snapshot()).context("write snapshot")?;
        writeln!(out).context("write snapshot")?;
        lines += 1;
        if elapsed + 1e-9 >= args.secs {
            break;
        }
        let step = args.every.min(args.secs - elapsed);
        scene.advance(step);
        elapsed += step;
    }
    out.flush().context("flush snapshots")?;

    let canceled = scene.on_unmount();
    let released = scene.registry_mut().clear();
    eprintln!(
        "wrote {lines} snapshots, canceled {canceled} tasks at unmount, released {released} targets"
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&MotionConfig::default())?;
    println!("{json}");
    Ok(())
}
