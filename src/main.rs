use clap::{Arg, Command};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

mod api;
mod app;
mod task;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("tugas")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal task list backed by a remote REST endpoint")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .default_value(api::DEFAULT_API_URL)
                .help("Base URL of the task endpoint"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .default_value("tugas.log")
                .help("Where to write the diagnostic log"),
        )
        .get_matches();

    let api_url = matches.get_one::<String>("api-url").unwrap();
    let log_file = matches.get_one::<String>("log-file").unwrap();

    init_tracing(log_file)?;

    let client = api::ApiClient::new(api_url.clone());
    let mut app = app::App::new();

    // Initial read; a failure leaves the (empty) list as-is.
    ui::reload(&mut app, &client);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app, &client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{err:?}");
    }
    Ok(())
}

// The alternate screen owns stdout/stderr, so diagnostics go to a file.
// TUGAS_LOG takes an EnvFilter directive; default is warn-and-up.
fn init_tracing(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TUGAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
