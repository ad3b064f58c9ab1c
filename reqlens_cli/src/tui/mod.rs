//! Terminal User Interface for browsing captured requests

mod app;
mod ui;

pub use app::{App, AppEvent, Command, DetailState, Focus, FILTER_DEBOUNCE};
pub use ui::draw;

use crate::api::ApiClient;
use crate::clipboard;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI against a capture backend
pub async fn run(client: ApiClient, limit: usize) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_event_loop(&mut terminal, &mut app, client, limit).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: ApiClient,
    limit: usize,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(100);

    // Initial list load
    dispatch(vec![Command::FetchList], app, &client, &tx, limit);

    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));

    loop {
        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            // Keyboard events and the debounce pulse (non-blocking poll)
            _ = tick_interval.tick() => {
                while event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        let commands = app.handle_event(AppEvent::Key(key));
                        dispatch(commands, app, &client, &tx, limit);
                        if app.should_quit {
                            return Ok(());
                        }
                    }
                }
                app.handle_event(AppEvent::Tick);
            }

            // Fetch completions
            Some(event) = rx.recv() => {
                let commands = app.handle_event(event);
                dispatch(commands, app, &client, &tx, limit);
            }
        }
    }
}

/// Carry out the side effects an event handler asked for
fn dispatch(
    commands: Vec<Command>,
    app: &mut App,
    client: &ApiClient,
    tx: &mpsc::Sender<AppEvent>,
    limit: usize,
) {
    for command in commands {
        match command {
            Command::FetchList => {
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client.fetch_requests(limit).await;
                    let _ = tx.send(AppEvent::ListLoaded(result)).await;
                });
            }
            Command::FetchDetail(id) => {
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client.fetch_request(&id).await;
                    let _ = tx.send(AppEvent::DetailLoaded { id, result }).await;
                });
            }
            Command::Copy { label, text } => match clipboard::copy_text(&text) {
                Ok(()) => app.status = format!("Copied {}", label),
                Err(err) => app.status = format!("Copy failed: {}", err),
            },
        }
    }
}
