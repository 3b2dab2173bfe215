//! tmon - headless frame renderer.
//!
//! Reads one platform snapshot (JSON), renders a frame to stdout and keeps
//! the state blob in a file so consecutive runs produce real rates.
//!
//! Run: `tmon --snapshot sample.json --state /tmp/tmon.state`

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};

use tmon::engine::SortKey;
use tmon::layout::BorderStyle;
use tmon::{render, Config, FrameInput, PlatformSnapshot};

/// tmon: terminal resource monitor frame renderer
#[derive(Parser, Debug)]
#[command(name = "tmon")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render one resource monitor frame from a platform snapshot", long_about = None)]
struct Cli {
    /// Snapshot JSON file, `-` for stdin
    #[arg(short, long, default_value = "-")]
    snapshot: String,

    /// State file carried between runs
    #[arg(long)]
    state: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width in columns
    #[arg(long, default_value = "80")]
    width: usize,

    /// Viewport height in rows
    #[arg(long, default_value = "24")]
    height: usize,

    /// Theme name
    #[arg(long)]
    theme: Option<String>,

    /// Border style (single, double, rounded, heavy)
    #[arg(long)]
    border: Option<BorderStyle>,

    /// Process sort column (cpu, mem, pid, name)
    #[arg(long)]
    sort: Option<SortKey>,

    /// Reverse the sort order
    #[arg(short, long)]
    reverse: bool,

    /// Process filter
    #[arg(short, long)]
    filter: Option<String>,

    /// Primary network interface, or `auto`
    #[arg(long)]
    interface: Option<String>,

    /// Process list scroll offset
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    scroll: i64,

    /// Selected row within the visible process list
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    select: i64,

    /// Show the help overlay
    #[arg(long)]
    help_overlay: bool,

    /// Show the selected process's details
    #[arg(long)]
    details: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();

    let config = load_config(cli.config.as_deref())?;
    let snapshot = read_snapshot(&cli.snapshot)?;
    let previous_state = match &cli.state {
        Some(path) if path.exists() => {
            std::fs::read_to_string(path).with_context(|| format!("reading state {}", path.display()))?
        }
        _ => String::new(),
    };

    let mut input = FrameInput { viewport_width: cli.width, viewport_height: cli.height, ..Default::default() };
    config.apply(&mut input);
    apply_flags(&cli, &mut input);
    input.previous_state = previous_state;
    input.snapshot = snapshot;

    let output = render(&input);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.frame_text).context("writing frame")?;

    if let Some(path) = &cli.state {
        std::fs::write(path, &output.state_blob).with_context(|| format!("writing state {}", path.display()))?;
        debug!(path = %path.display(), bytes = output.state_blob.len(), "state saved");
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path).with_context(|| format!("loading config {}", path.display()));
    }
    match Config::default_path() {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "using config");
            Config::load(&path).with_context(|| format!("loading config {}", path.display()))
        }
        _ => Ok(Config::default()),
    }
}

fn read_snapshot(source: &str) -> Result<PlatformSnapshot> {
    let json = if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading snapshot {source}"))?
    };
    Ok(PlatformSnapshot::from_json(&json)?)
}

fn apply_flags(cli: &Cli, input: &mut FrameInput) {
    if let Some(theme) = &cli.theme {
        input.theme.clone_from(theme);
    }
    if let Some(border) = cli.border {
        input.border_style = border;
    }
    if let Some(sort) = cli.sort {
        input.sort_key = sort;
    }
    if cli.reverse {
        input.sort_reversed = !input.sort_reversed;
    }
    if let Some(filter) = &cli.filter {
        input.process_filter.clone_from(filter);
    }
    if let Some(interface) = &cli.interface {
        input.preferred_net_interface.clone_from(interface);
    }
    input.process_scroll_offset = cli.scroll;
    input.process_selection_index = cli.select;
    input.show_help = cli.help_overlay;
    input.show_process_details = cli.details;
}
