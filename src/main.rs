mod app;
mod cli;
mod config;
mod error;
mod event;
mod gate;
mod logging;
mod mapper;
mod model;
mod providers;
mod ui;

use std::io;
use std::panic;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_to_file(&logging::log_path()) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(command) = args.first() {
        let rest = &args[1..];
        return match command.as_str() {
            "add" => cli::handle_add(rest).await,
            "list" => cli::handle_list(rest).await,
            "boards" => cli::handle_boards().await,
            "lists" => cli::handle_lists(rest).await,
            "auth" => cli::handle_auth().await,
            "help" | "-h" | "--help" => {
                cli::print_help();
                Ok(())
            }
            other => {
                cli::print_help();
                anyhow::bail!("Unknown command: {other}")
            }
        };
    }

    let config = config::load_config()?;
    let service = providers::create_service(&config)?;

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(service);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Restore the terminal before the default hook prints
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tokio::spawn(async move {
        event::run_event_loop(action_tx).await;
    });

    terminal.draw(|f| ui::render(f, &app))?;
    app.startup().await;

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        match action_rx.recv().await {
            Some(action) => {
                app.update(action).await;
                if app.should_quit {
                    break;
                }
            }
            None => break,
        }
    }

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    tracing::info!("dashboard closed");
    Ok(())
}
