use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use prism_core::{format_alias, is_alias, resolve_detailed};
use prism_pipeline::{timestamp_now, Pipeline, RunReport};
use prism_scale::{generate, ColorAnchor, ColorFormat};
use prism_schema::{FamilyConfig, PipelineConfig, StepsSpec, DEFAULT_CONFIG_FILE};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "prism", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, value_enum, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, global = true, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate scales, resolve aliases and write every output
    Build(RunArgs),
    /// Fail if any output on disk is out of date
    Check(RunArgs),
    /// Print the literal value a token or alias resolves to
    Resolve {
        /// Token path (`color.brand.500`) or alias (`{color.brand.500}`)
        #[arg(value_name = "REFERENCE")]
        reference: String,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Print the tonal scale generated from a color
    Scale(ScaleArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Pipeline config file (defaults to ./prism.json when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Token source directory
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScaleArgs {
    /// Anchor color (`#066a8d`, `rgb(…)` or `oklch(…)`)
    #[arg(value_name = "COLOR")]
    color: String,

    /// Family preset supplying the defaults
    #[arg(long, default_value = "brand")]
    preset: String,

    /// Step table preset, overriding the family preset's
    #[arg(long)]
    steps: Option<String>,

    #[arg(long)]
    anchor_step: Option<String>,

    /// Chroma reduction at the lightness extremes (0..=1)
    #[arg(long)]
    chroma: Option<f64>,

    /// Hue drift in degrees at the lightness extremes
    #[arg(long)]
    hue: Option<f64>,

    /// Force every step to zero chroma
    #[arg(long)]
    neutral: bool,

    /// Print hex instead of oklch()
    #[arg(long)]
    hex: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    match dispatch(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one subcommand. `Ok(false)` means it ran but found problems.
fn dispatch(command: Command) -> Result<bool> {
    match command {
        Command::Build(args) => build(&args),
        Command::Check(args) => check(&args),
        Command::Resolve { reference, run } => resolve(&reference, &run),
        Command::Scale(args) => scale(&args),
    }
}

fn load_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            PipelineConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("loading config {}", DEFAULT_CONFIG_FILE))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(out_dir) = &args.out_dir {
        config.out_dir = out_dir.clone();
    }
    Ok(config)
}

fn summarize(report: &RunReport) {
    eprint!("{}", report);
}

fn build(args: &RunArgs) -> Result<bool> {
    let config = load_config(args)?;
    info!(source = %config.source.display(), out_dir = %config.out_dir.display(), "building tokens");

    let output = Pipeline::new(config)
        .run(&timestamp_now())
        .context("token build failed")?;
    summarize(&output.report);
    Ok(output.report.is_success())
}

fn check(args: &RunArgs) -> Result<bool> {
    let config = load_config(args)?;
    let outcome = Pipeline::new(config)
        .check(&timestamp_now())
        .context("token check failed")?;
    summarize(&outcome.report);

    for path in &outcome.stale {
        eprintln!("stale: {}", path.display());
    }
    for path in &outcome.missing {
        eprintln!("missing: {}", path.display());
    }
    if outcome.is_clean() {
        info!("all outputs are up to date");
    }
    Ok(outcome.is_success())
}

fn resolve(reference: &str, args: &RunArgs) -> Result<bool> {
    let config = load_config(args)?;
    let (map, _) = Pipeline::new(config)
        .token_map()
        .context("loading tokens failed")?;

    let alias = if is_alias(reference) {
        reference.to_string()
    } else {
        format_alias(reference)
    };
    match resolve_detailed(&alias, &map) {
        Ok(value) => {
            println!("{}", value);
            Ok(true)
        }
        Err(e) => {
            error!(reference = %reference, "{}", e);
            Ok(false)
        }
    }
}

fn scale(args: &ScaleArgs) -> Result<bool> {
    let family = FamilyConfig {
        preset: Some(args.preset.clone()),
        steps: args.steps.clone().map(StepsSpec::Named),
        anchor_step: args.anchor_step.clone(),
        chroma_reduction: args.chroma,
        hue_shift: args.hue,
        neutral: args.neutral.then_some(true),
        ..FamilyConfig::new(args.preset.clone(), args.color.clone())
    };
    let resolved = family.resolve(&BTreeMap::new())?;

    let anchor = ColorAnchor::parse(&resolved.anchor)?;
    let scale = generate(&anchor, &resolved.anchor_step, &resolved.steps, resolved.params)?;

    let format = if args.hex {
        ColorFormat::Hex
    } else {
        ColorFormat::Oklch
    };
    for step in &scale.steps {
        let marker = if step.is_anchor { "  (anchor)" } else { "" };
        println!(
            "{:>5}  {}{}",
            step.name,
            scale.render_step(step, format),
            marker
        );
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_flags_default_and_map_to_filters() {
        let cli = Cli::try_parse_from(["prism", "scale", "#066a8d"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::INFO);

        let cli =
            Cli::try_parse_from(["prism", "build", "--log-level", "trace", "--log-format", "json"])
                .unwrap();
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::TRACE);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn scale_accepts_a_table_with_another_anchor() {
        let cli = Cli::try_parse_from(["prism", "scale", "#066a8d", "--steps", "full-500", "--hex"])
            .unwrap();
        let Command::Scale(args) = cli.command else {
            panic!("expected scale");
        };
        assert!(scale(&args).unwrap());
    }
}
