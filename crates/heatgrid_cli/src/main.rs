//! `heatgrid` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration (file, env, flags) into a feed and render settings.
//! - Run one heatmap build and print it as text or JSON.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use heatgrid_core::{
    core_version, default_log_level, grid_start, init_logging, render_text, ContributionLevel,
    DisplayLocale, FallbackPolicy, GridSource, HeatgridConfig, HeatmapService, TextOptions,
};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "heatgrid", version, about = "Render a GitHub-style contribution heatmap")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch events and render the 53-week grid.
    Render(RenderArgs),
    /// Print the color bucket for a daily count.
    Level { count: u32 },
    /// Print the core library version.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Config file; defaults to ./heatgrid.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// GitHub user whose public events are fetched.
    #[arg(long)]
    user: Option<String>,
    /// Read events from a JSON file instead of the API.
    #[arg(long)]
    events_file: Option<PathBuf>,
    /// Anchor date (UTC today when omitted).
    #[arg(long)]
    today: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// zh-CN, en-US or iso.
    #[arg(long)]
    locale: Option<DisplayLocale>,
    /// synthetic or empty.
    #[arg(long)]
    fallback: Option<FallbackPolicy>,
    /// Use ANSI colors in text output.
    #[arg(long)]
    color: bool,
    /// Omit the summary and legend lines.
    #[arg(long)]
    no_legend: bool,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(args),
        Command::Level { count } => {
            println!("{}", ContributionLevel::from_count(count));
            Ok(())
        }
        Command::Version => {
            println!("heatgrid_core version={}", core_version());
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let mut config = HeatgridConfig::load(args.config.as_deref())?;
    apply_flags(&mut config, &args);
    start_logging(&config);

    let feed = config.feed()?;
    let service = HeatmapService::new(feed, config.render.locale, config.render.fallback);
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    if grid_start(today).is_none() {
        bail!("--today {today} is too close to the calendar limits to anchor a 53-week grid");
    }
    info!(
        "event=cli_render module=cli status=start today={} format={:?} locale={}",
        today, args.format, config.render.locale
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime.block_on(service.build(today));

    match &outcome.source {
        GridSource::Feed { .. } => {}
        GridSource::Synthetic { reason } => {
            eprintln!("warning: event feed unavailable, showing placeholder data ({reason})");
        }
        GridSource::Empty { reason } => {
            eprintln!("warning: event feed unavailable, showing an empty grid ({reason})");
        }
    }

    match args.format {
        OutputFormat::Text => {
            let options = TextOptions {
                color: args.color,
                legend: !args.no_legend,
            };
            print!("{}", render_text(&outcome.grid, options));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("failed to serialize heatmap")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn apply_flags(config: &mut HeatgridConfig, args: &RenderArgs) {
    if let Some(user) = &args.user {
        config.feed.user = Some(user.clone());
        config.feed.events_file = None;
    }
    if let Some(path) = &args.events_file {
        config.feed.events_file = Some(path.clone());
    }
    if let Some(locale) = args.locale {
        config.render.locale = locale;
    }
    if let Some(fallback) = args.fallback {
        config.render.fallback = fallback;
    }
    if let Some(dir) = &args.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    if let Some(level) = &args.log_level {
        config.logging.level = Some(level.clone());
    }
}

fn start_logging(config: &HeatgridConfig) {
    let Some(dir) = config.logging.dir.as_deref() else {
        return;
    };
    let level = config
        .logging
        .level
        .as_deref()
        .unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}
