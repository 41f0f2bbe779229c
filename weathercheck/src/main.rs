//! WeatherCheck - today's hourly forecast in the terminal
//!
//! ```sh
//! # locate by IP address, press `l` to start
//! weathercheck
//!
//! # fixed position, fetch immediately
//! weathercheck --lat 51.5 --lon -0.12 --auto-locate
//! ```

use std::cell::RefCell;
use std::io;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use weathercheck::cli::Args;
use weathercheck::{logging, Runtime, WeatherUi};
use weathercheck_core::{reducer, Action, AppState, Config, EffectHandler, LoggingMiddleware, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("loading config")?;
    config.apply(args.overrides());
    config.validate().context("invalid configuration")?;

    if let Some(path) = config.log_path() {
        logging::init(&path)?;
    }
    tracing::info!(locate = ?config.locate, "starting weathercheck");

    let handler = EffectHandler::from_config(&config).context("building providers")?;
    let store = Store::with_middleware(AppState::default(), reducer, LoggingMiddleware::new());
    let mut runtime = Runtime::new(store, handler);
    if args.auto_locate {
        runtime.enqueue(Action::LocateRequest);
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let size = terminal.size()?;
    runtime.enqueue(Action::UiTerminalResize(size.width, size.height));

    let ui = RefCell::new(WeatherUi::new());
    let result = runtime
        .run(
            &mut terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
        )
        .await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal error");
    }
    tracing::info!("exiting");
    Ok(result?)
}
