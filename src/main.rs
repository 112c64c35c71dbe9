//! Job Portal TUI - account onboarding for the job portal
//!
//! A Ratatui-based TUI for logging in and registering against the
//! job portal's authentication service.

mod app;
mod auth;
mod config;
mod notify;
mod session;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::PortalConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "job-portal-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to ratatui, so logs go to a file
    let log_guard = init_logging();

    let config = PortalConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default configuration: {e}");
        PortalConfig::default()
    });
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        // exit skips destructors, flush the log writer first
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to `<data_dir>/logs/job-portal-tui.log`. Without a usable data
/// directory logging is disabled.
fn init_logging() -> Option<WorkerGuard> {
    let log_dir = PortalConfig::log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Logging disabled: cannot create {}: {e}", log_dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_portal_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while a request is in flight keeps the spinner moving
        let poll_duration = if app.is_busy() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key)?;
                }
            }
        }

        app.poll_submissions();
        app.state.notifier.prune();
        app.state.advance_tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}
