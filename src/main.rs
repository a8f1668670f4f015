use anyhow::{Context, Result};
use capitol::app::{App, AppEvent};
use capitol::args::CommandLineArgs;
use capitol::fetch::Dispatcher;
use capitol::http::ApiClient;
use capitol::profile::{
    ApiConfig, Profile, API_KEY_ENV, DEFAULT_PROFILE_PATH, DEFAULT_PROFILE_SECTION,
};
use capitol::ui;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "capitol.log";
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::get();
    init_logging(cmd_args.verbose())?;

    let profile = Profile::load(DEFAULT_PROFILE_PATH, cmd_args.profile())?;
    let section = cmd_args.profile();
    if profile.is_none() && section != DEFAULT_PROFILE_SECTION {
        anyhow::bail!("profile not found: {section}");
    }
    let config = ApiConfig::resolve(profile.as_ref(), std::env::var(API_KEY_ENV).ok())?;
    let client = Arc::new(ApiClient::new(&config)?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());
    let mut app = App::new(config, Dispatcher::new(client, tx));

    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    app.bootstrap();
    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, app))?;
        match events.recv().await {
            Some(event) => app.handle_event(event),
            None => break,
        }
    }
    Ok(())
}

/// Terminal input runs on its own blocking thread; quiet periods produce
/// ticks so the busy indicator stays live while a fetch is outstanding.
fn spawn_input_reader(tx: mpsc::UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        let event = match event::poll(INPUT_POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                // Resizes and the rest just trigger a redraw.
                Ok(_) => AppEvent::Tick,
                Err(_) => break,
            },
            Ok(false) => AppEvent::Tick,
            Err(_) => break,
        };
        if tx.send(event).is_err() {
            break;
        }
    });
}

/// The alternate screen owns the terminal, so logs go to a file. RUST_LOG
/// overrides the level picked by --verbose.
fn init_logging(verbose: bool) -> Result<()> {
    let file = std::fs::File::create(LOG_FILE)
        .with_context(|| format!("failed to create {LOG_FILE}"))?;
    let default_level = if verbose { "capitol=debug" } else { "capitol=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
