use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use faultwatch::settings::StoreKind;
use faultwatch::source::open_store;
use faultwatch::ui::{self, Theme};
use faultwatch::{events, App, ChartKind, InferenceClient, Selection, Settings};
use faultwatch_types::WindowMinutes;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartArg {
    Temperature,
    Vibration,
    FaultTrend,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Temperature => ChartKind::Temperature,
            ChartArg::Vibration => ChartKind::Vibration,
            ChartArg::FaultTrend => ChartKind::FaultTrend,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "faultwatch")]
#[command(about = "Terminal dashboard for industrial equipment telemetry and fault risk")]
struct Args {
    /// Settings file with store credentials and endpoints (TOML)
    #[arg(short, long)]
    secrets: Option<PathBuf>,

    /// Read telemetry from a JSON export instead of the configured store
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Time window in minutes (5-240)
    #[arg(short, long)]
    window: Option<u32>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Device to select on startup
    #[arg(short, long)]
    device: Option<String>,

    /// Chart shown on startup
    #[arg(short, long, value_enum)]
    chart: Option<ChartArg>,

    /// Write the selected device's window as CSV into this directory and exit
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Append logs to this file (RUST_LOG controls the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.export_csv.is_none())?;

    let settings = load_settings(&args)?;

    // One worker is enough: the UI thread blocks on each request in turn.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let store = open_store(&settings, runtime.handle().clone())?;
    let inference = InferenceClient::from_settings(&settings.inference, runtime.handle().clone())
        .context("Failed to create inference client")?;

    let selection = Selection::new(settings.dashboard.window_minutes, args.device.clone());
    let mut app = App::new(store, selection, settings.store.page_limit).with_inference(inference);
    if let Some(chart) = args.chart {
        app.set_chart(chart.into());
    }

    // Handle export mode (non-interactive)
    if let Some(dir) = args.export_csv {
        return export_once(app.with_export_dir(dir), args.device.as_deref());
    }

    info!(store = app.source_description(), "starting dashboard");
    run_tui(app.with_theme(Theme::auto_detect()), settings.dashboard.refresh_interval())
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faultwatch=info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The dashboard owns the terminal
        None if interactive => {}
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
    Ok(())
}

/// Load the settings file, apply command-line overrides and validate.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.secrets.as_deref())?;

    if let Some(path) = &args.file {
        settings.store.kind = StoreKind::File;
        settings.store.path = Some(path.clone());
    }
    if let Some(minutes) = args.window {
        settings.dashboard.window_minutes = WindowMinutes::new(minutes)?;
    }
    if let Some(secs) = args.refresh {
        settings.dashboard.refresh_secs = secs;
    }

    settings.validate()?;
    Ok(settings)
}

/// Run one refresh cycle and write the selected device's CSV.
fn export_once(mut app: App, requested: Option<&str>) -> Result<()> {
    app.refresh();
    if let Some(error) = &app.load_error {
        bail!("Failed to read telemetry from {}: {}", app.source_description(), error);
    }
    if let Some(device) = requested {
        if app.selection.device.as_deref() != Some(device) {
            bail!("No telemetry for device '{}' in the last {}", device, app.selection.window);
        }
    }

    let path = app.export_csv()?;
    println!("Exported telemetry to: {}", path.display());
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    app.refresh();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 80;
    const MIN_HEIGHT: u16 = 24;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(app.theme.warning));
                let top = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, top, area.width, 5.min(area.height));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Chart tabs
                Constraint::Min(18),   // Dashboard
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::render_body(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
