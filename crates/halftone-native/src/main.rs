use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum};
use halftone_core::{default_patterns, tuned_patterns, App, Pattern, ViewMode, Viewport};

mod config;
mod export;
mod gpu;
mod window;

use config::Config;

// Exports are reproducible unless a seed is given.
const DEFAULT_EXPORT_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(name = "halftone", version, about = "Generative halftone wave display")]
struct Cli {
    /// Seed for the dot grid and focal points.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file with `field` parameters and/or a `patterns` list.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// View to start in.
    #[arg(long, value_enum, default_value_t = ModeArg::Field, global = true)]
    mode: ModeArg,

    /// Built-in pattern list, used unless the config supplies its own.
    #[arg(long, value_enum, default_value_t = PatternSet::Slideshow, global = true)]
    patterns: PatternSet,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Open an interactive window (default).
    Window(WindowArgs),
    /// Render one frame as an SVG file.
    Snapshot(SnapshotArgs),
    /// Render a numbered SVG frame sequence.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct WindowArgs {
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 720)]
    height: u32,
}

impl Default for WindowArgs {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Output SVG path.
    #[arg(long, default_value = "halftone.svg")]
    out: PathBuf,
    #[arg(long, default_value_t = 1920.0)]
    width: f32,
    #[arg(long, default_value_t = 1080.0)]
    height: f32,
    /// Scene time to capture, in seconds.
    #[arg(long, default_value_t = 10.0)]
    at: f64,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Directory for `frame_00000.svg`, `frame_00001.svg`, ...
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Length of the sequence, in seconds.
    #[arg(long, default_value_t = 20.0)]
    duration: f64,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Field,
    Marks,
}

impl From<ModeArg> for ViewMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Field => ViewMode::Field,
            ModeArg::Marks => ViewMode::Marks,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternSet {
    /// Canvas patterns plus the spiral, bounce and random movers.
    Slideshow,
    /// The editable set with rotate/x/y channels.
    Tuned,
}

impl PatternSet {
    fn builtin(self) -> fn() -> Vec<Pattern> {
        match self {
            PatternSet::Slideshow => default_patterns,
            PatternSet::Tuned => tuned_patterns,
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DEFAULT_EXPORT_SEED)
}

fn build_app(
    config: &Config,
    viewport: Viewport,
    seed: u64,
    cli: &Cli,
) -> anyhow::Result<App> {
    log::info!(
        "[app] seed={seed} mode={:?} patterns={:?}",
        cli.mode,
        cli.patterns
    );
    let patterns = config.patterns_or(cli.patterns.builtin());
    let app = App::new(viewport, config.field.clone(), patterns, seed)?;
    Ok(app.with_mode(cli.mode.into()))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let default_cmd = Cmd::Window(WindowArgs::default());
    match cli.cmd.as_ref().unwrap_or(&default_cmd) {
        Cmd::Window(args) => {
            let seed = cli.seed.unwrap_or_else(time_seed);
            window::run(
                |viewport| build_app(&config, viewport, seed, &cli),
                args.width,
                args.height,
            )
        }
        Cmd::Snapshot(args) => {
            let seed = cli.seed.unwrap_or(DEFAULT_EXPORT_SEED);
            let viewport = Viewport::new(args.width, args.height);
            let mut app = build_app(&config, viewport, seed, &cli)?;
            export::snapshot(&mut app, args.at, &args.out)
        }
        Cmd::Frames(args) => {
            let seed = cli.seed.unwrap_or(DEFAULT_EXPORT_SEED);
            let viewport = Viewport::new(args.width, args.height);
            let mut app = build_app(&config, viewport, seed, &cli)?;
            export::frames(&mut app, args.fps, args.duration, &args.out_dir).map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_window_in_field_mode() {
        let cli = Cli::try_parse_from(["halftone"]).unwrap();
        assert!(cli.cmd.is_none());
        assert!(matches!(cli.mode, ModeArg::Field));
        assert!(cli.seed.is_none());
    }

    #[test]
    fn snapshot_defaults_match_capture_settings() {
        let cli = Cli::try_parse_from(["halftone", "--seed", "7", "snapshot"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        let Some(Cmd::Snapshot(args)) = cli.cmd else {
            panic!("expected snapshot");
        };
        assert_eq!((args.width, args.height, args.at), (1920.0, 1080.0, 10.0));
    }

    #[test]
    fn frames_accepts_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["halftone", "frames", "--fps", "24", "--mode", "marks"]).unwrap();
        assert!(matches!(cli.mode, ModeArg::Marks));
        let Some(Cmd::Frames(args)) = cli.cmd else {
            panic!("expected frames");
        };
        assert_eq!(args.fps, 24);
        assert_eq!(args.duration, 20.0);
        assert_eq!((args.width, args.height), (1280.0, 720.0));
    }

    #[test]
    fn pattern_set_selects_builtin_list() {
        let cli = Cli::try_parse_from(["halftone"]).unwrap();
        assert_eq!(cli.patterns.builtin()(), default_patterns());
        let cli = Cli::try_parse_from(["halftone", "snapshot", "--patterns", "tuned"]).unwrap();
        assert_eq!(cli.patterns.builtin()(), tuned_patterns());
        let app = build_app(&Config::default(), Viewport::new(64.0, 64.0), 1, &cli).unwrap();
        assert_eq!(app.marks().cycle().patterns().len(), tuned_patterns().len());
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["halftone", "--mode", "video"]).is_err());
    }
}
