use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use petnamer_core::{Config, Coordinator, CoordinatorSettings, ReqwestHttpClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;

mod app;
mod cli;
mod clipboard;
mod theme;
mod ui;

use app::runtime::run_app;
use app::session_log::SessionLog;
use app::state::App;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config_path()?;
    let mut config = Config::load_from(&config_path).await?;
    cli.apply_overrides(&mut config)?;

    if cli.write_config {
        config.save_to(&config_path).await?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    // Logging is best-effort; the UI runs without it.
    let log_path = SessionLog::init(cli.debug).ok().map(|log| log.display_path());
    tracing::info!(
        server = %config.server.base_url(),
        config = %config_path.display(),
        "starting petnamer"
    );

    let coordinator = Coordinator::new(
        ReqwestHttpClient::new(),
        CoordinatorSettings::from_config(&config),
        clipboard::build(&config.clipboard),
    );
    let mut app = App::new(config, coordinator, log_path);
    app.initial_pet = cli.pet;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Mouse support enables clickable pet types, buttons, tags and toasts.
    let mouse_capture_enabled = execute!(stdout, EnableMouseCapture).is_ok();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    if mouse_capture_enabled {
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "exited with error");
        println!("{:?}", err);
    }

    Ok(())
}
