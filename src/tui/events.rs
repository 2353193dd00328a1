use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::front::UiRequest;
use super::app::App;
use super::rendering::ui;

/// Run the interactive surface until the workflow signals completion or the
/// operator quits. Shares the single-threaded runtime with the workflow
/// task, so the loop sleeps between frames instead of blocking on input.
pub async fn run(rx: mpsc::UnboundedReceiver<UiRequest>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut rx: mpsc::UnboundedReceiver<UiRequest>,
) -> anyhow::Result<()> {
    loop {
        while let Ok(request) = rx.try_recv() {
            app.apply(request);
        }
        if app.should_exit {
            return Ok(());
        }

        terminal.draw(|f| ui(f, app))?;

        // Non-blocking input check; the sleep yields the thread to the
        // workflow task between frames.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        if app.should_exit {
            return Ok(());
        }

        tokio::time::sleep(Duration::from_millis(30)).await;
    }
}
