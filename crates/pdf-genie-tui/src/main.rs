use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

mod action;
mod app;
mod backend;
mod config_file;
mod export;
mod input;
mod notification;
mod theme;
mod tui_event;
mod view;

use app::App;
use pdf_genie_core::{ApiClient, Config, DocumentByteCache};

/// PDF Genie — ask questions against an indexed PDF corpus, or extract
/// structured fields across it, from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides PDF_GENIE_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Number of documents kept in the PDF byte cache
    #[arg(long)]
    pdf_cache: Option<usize>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Stdout belongs to the terminal UI; logs go to a rolling file.
    let log_dir = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|d| d.join("pdf-genie"))?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "pdf-genie.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let file_cfg = config_file::load_config();
    let _log_guard = init_tracing();

    // Resolve config: CLI flags > env vars > config file > defaults
    let defaults = Config::default();
    let base_url = args
        .api_url
        .or_else(|| std::env::var("PDF_GENIE_API_URL").ok())
        .or_else(|| file_cfg.backend.as_ref().and_then(|b| b.base_url.clone()))
        .unwrap_or(defaults.base_url);
    let request_timeout_secs = args
        .timeout
        .or_else(|| {
            std::env::var("PDF_GENIE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or_else(|| {
            file_cfg
                .backend
                .as_ref()
                .and_then(|b| b.request_timeout_secs)
        })
        .unwrap_or(defaults.request_timeout_secs);
    let pdf_cache_capacity = args
        .pdf_cache
        .or_else(|| file_cfg.backend.as_ref().and_then(|b| b.pdf_cache_capacity))
        .unwrap_or(defaults.pdf_cache_capacity);
    let theme_name = args
        .theme
        .or_else(|| file_cfg.display.as_ref().and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "hacker".to_string());

    let config = Config {
        base_url,
        request_timeout_secs,
        pdf_cache_capacity,
    };
    tracing::info!(base_url = %config.base_url, "starting pdf-genie");

    let client = ApiClient::new(&config);
    let cache = Arc::new(DocumentByteCache::new(
        Arc::new(client.clone()),
        config.pdf_cache_capacity,
    ));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(theme::Theme::from_name(&theme_name));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run_backend(
        client,
        cache,
        cmd_rx,
        event_tx,
        cancel.clone(),
    ));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
