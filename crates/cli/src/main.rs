//! commit-bench CLI - Browse per-commit benchmark history

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

mod error;
mod html;
mod terminal;

use commit_bench_core::dashboard::{DEFAULT_BROWSE_BASE, DEFAULT_METRIC};
use commit_bench_core::{
    BenchmarkHistory, Dashboard, DashboardConfig, Effect, Navigator, SeriesStore, UiEvent,
};
use html::{PageWriter, SvgChart};
use terminal::{Command, PrintNavigator, TerminalUi, HELP};

/// commit-bench: browse benchmark results recorded per commit
#[derive(Parser, Debug)]
#[command(name = "commit-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the benchmarks found in the history
    Benchmarks(BenchmarksArgs),

    /// Show the most recent commits
    History(HistoryArgs),

    /// Start an interactive dashboard session
    View(ViewArgs),
}

#[derive(Parser, Debug)]
struct BenchmarksArgs {
    /// Path to the benchmark history JSON file
    #[arg(long, env = "COMMIT_BENCH_DATA", default_value = "benchmark_data.json")]
    data_file: PathBuf,

    /// Print as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Parser, Debug)]
struct HistoryArgs {
    /// Path to the benchmark history JSON file
    #[arg(long, env = "COMMIT_BENCH_DATA", default_value = "benchmark_data.json")]
    data_file: PathBuf,

    /// Number of recent commits to show
    #[arg(short, long, default_value = "10")]
    limit: usize,
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Path to the benchmark history JSON file
    #[arg(long, env = "COMMIT_BENCH_DATA", default_value = "benchmark_data.json")]
    data_file: PathBuf,

    /// Directory the dashboard page is written to
    #[arg(short, long, default_value = "dev/bench")]
    output_dir: PathBuf,

    /// Dashboard title
    #[arg(long, default_value = "Benchmark Results")]
    title: String,

    /// Sample field to plot
    #[arg(long, default_value = DEFAULT_METRIC)]
    metric: String,

    /// Repository web view that commit hashes are appended to
    #[arg(long, env = "COMMIT_BENCH_BROWSE_BASE", default_value = DEFAULT_BROWSE_BASE)]
    browse_base: String,

    /// Benchmark to select at start (repeatable; default: all)
    #[arg(long = "select", value_name = "NAME")]
    select: Vec<String>,

    /// Initial commit window, e.g. "100..200"
    #[arg(long, value_parser = parse_window)]
    window: Option<(usize, usize)>,

    /// Fixed benchmark color, e.g. "Tivi=#ff7b72" (repeatable)
    #[arg(long = "color", value_name = "NAME=COLOR", value_parser = parse_color)]
    colors: Vec<(String, String)>,
}

impl ViewArgs {
    fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            title: self.title.clone(),
            metric: self.metric.clone(),
            browse_base: self.browse_base.clone(),
            initial_selection: (!self.select.is_empty()).then(|| self.select.clone()),
            initial_window: self.window,
            colors: self.colors.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }
}

fn parse_window(s: &str) -> std::result::Result<(usize, usize), String> {
    let (left, right) = s
        .split_once("..")
        .ok_or_else(|| format!("Invalid window '{}', expected LEFT..RIGHT", s))?;
    let left = left
        .trim()
        .parse()
        .map_err(|_| format!("Invalid window start: {}", left))?;
    let right = right
        .trim()
        .parse()
        .map_err(|_| format!("Invalid window end: {}", right))?;
    Ok((left, right))
}

fn parse_color(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, color)) if !name.is_empty() && !color.is_empty() => {
            Ok((name.to_string(), color.to_string()))
        }
        _ => Err(format!("Invalid color '{}', expected NAME=COLOR", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Benchmarks(args) => benchmarks_command(args),
        Commands::History(args) => history_command(args),
        Commands::View(args) => view_command(args),
    }
}

fn load_store(path: &Path) -> Result<SeriesStore> {
    let history = BenchmarkHistory::load_from_file(path)
        .with_context(|| format!("Failed to load benchmark history from {:?}", path))?;
    let store = SeriesStore::from_history(history)
        .with_context(|| format!("No usable commits in {:?}", path))?;
    Ok(store)
}

/// List benchmarks
fn benchmarks_command(args: BenchmarksArgs) -> Result<()> {
    let store = load_store(&args.data_file)?;

    if args.json {
        let counts: BTreeMap<&str, usize> = store
            .benchmark_names()
            .iter()
            .map(|name| (name.as_str(), store.result_count(name)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!(
        "{} benchmarks over {} commits\n",
        store.benchmark_names().len(),
        store.commit_count()
    );
    for name in store.benchmark_names() {
        println!("  {:<48} {:>6} commits", name, store.result_count(name));
    }

    Ok(())
}

/// Show recent commits, newest first
fn history_command(args: HistoryArgs) -> Result<()> {
    let store = load_store(&args.data_file)?;

    for commit in store.commits().iter().rev().take(args.limit) {
        println!(
            "{:>5}  {}  {}  {:<20}  {} ({} benchmarks)",
            commit.index,
            commit.short_hash(),
            commit.submitted.format("%Y-%m-%d %H:%M"),
            commit.author,
            commit.title,
            store.benchmarks_at(commit.index)
        );
    }

    Ok(())
}

/// Interactive session: one command per stdin line, page rewritten after
/// every redraw.
fn view_command(args: ViewArgs) -> Result<()> {
    let store = load_store(&args.data_file)?;
    let config = args.dashboard_config();

    let chart = SvgChart::new().context("Failed to prepare chart template")?;
    let writer = PageWriter::new(&args.output_dir).context("Failed to prepare output directory")?;
    let mut dashboard = Dashboard::initialize(store, config, chart, TerminalUi::new(), PrintNavigator)
        .context("Failed to initialize dashboard")?;

    let path = writer.write(&dashboard)?;
    info!("Dashboard written to {:?}", path);
    println!("{}", HELP);

    let stdin = std::io::stdin();
    run_session(&mut dashboard, &writer, stdin.lock())
}

/// Feed commands from `input` to the dashboard until `quit` or end of input.
fn run_session<N, R>(
    dashboard: &mut Dashboard<SvgChart, TerminalUi, N>,
    writer: &PageWriter,
    input: R,
) -> Result<()>
where
    N: Navigator,
    R: BufRead,
{
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                println!("{}", HELP);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Status => print_status(dashboard),
            Command::Event(UiEvent::ToggleBenchmark { ref name, .. })
                if !dashboard.ui().has_selector(name) =>
            {
                warn!("No checkbox for benchmark '{}'", name);
            }
            Command::Event(event) => {
                debug!(?event, "Dispatching");
                match dashboard.handle(event)? {
                    Effect::Redrawn => {
                        writer.write(dashboard)?;
                        println!("window {}", dashboard.window());
                    }
                    Effect::Opened(_) => {}
                    Effect::Ignored => println!("no point there"),
                }
            }
        }
    }

    Ok(())
}

fn print_status<N: Navigator>(dashboard: &Dashboard<SvgChart, TerminalUi, N>) {
    println!(
        "window {} after {} redraws",
        dashboard.window(),
        dashboard.chart().redraw_count()
    );
    let navigation = dashboard.navigation();
    for button in dashboard.ui().buttons() {
        let state = if navigation.is_enabled(button.action) {
            "enabled"
        } else {
            "disabled"
        };
        println!("  {:<16} {}", button.action.element_id(), state);
    }
    dashboard.selection().for_each(|name, selected| {
        let mark = if selected { 'x' } else { ' ' };
        let color = dashboard.colors().get(name).unwrap_or("-");
        println!("  [{}] {} {}", mark, name, color);
    });
}
