//! user-directory binary entry point.
//!
//! Parses arguments, sets up logging and the tokio runtime, initializes the
//! terminal in raw mode, runs the TUI event loop, and restores the terminal on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use user_directory::app::{self, AppState};
use user_directory::cli::Args;
use user_directory::error::{Context, Result};
use user_directory::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level, args.log_file.as_deref())?;

    let runtime = tokio::runtime::Runtime::new().with_ctx(|| "start tokio runtime".to_string())?;
    let remote = args.open_remote()?;
    let mut state = AppState::new(remote, runtime.handle().clone(), args.ui_settings());

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    drop(state);
    runtime.shutdown_timeout(Duration::from_millis(500));

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
