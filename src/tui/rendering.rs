use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::front::LogLevel;
use super::app::App;
use super::models::{BrowserState, PromptState, Screen};

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Percentage(40)])
        .split(f.area());

    match &app.screen {
        Screen::Welcome => render_welcome(f, chunks[0]),
        Screen::Prompt(prompt) => render_prompt(f, chunks[0], prompt),
        Screen::Browser(browser) => render_browser(f, chunks[0], browser),
    }

    render_log_pane(f, chunks[1], app);
}

fn render_welcome(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "OpenList Organizer",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Follow the prompts below; progress shows in the log pane."),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to quit",
            Style::default().fg(Color::Gray),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(welcome, area);
}

fn render_prompt(f: &mut Frame, area: Rect, prompt: &PromptState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let label = Paragraph::new(prompt.label.as_str())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Input required")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(label, chunks[0]);

    let (text, style) = if prompt.value.is_empty() {
        (
            prompt.placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (prompt.value.as_str(), Style::default().fg(Color::White))
    };
    let input = Paragraph::new(format!("{text}▏")).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(input, chunks[1]);

    let hint = Paragraph::new("Type a value and press Enter to confirm")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[2]);
}

fn render_browser(f: &mut Frame, area: Rect, browser: &BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let items: Vec<ListItem> = if browser.view.entries.is_empty() {
        vec![ListItem::new(Span::styled(
            "(empty directory)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        browser
            .view
            .entries
            .iter()
            .map(|entry| {
                let icon = if entry.is_dir { "📁" } else { "📄" };
                ListItem::new(format!("{icon} {}", entry.name))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select a directory")
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut state = ListState::default();
    if !browser.view.entries.is_empty() {
        state.select(Some(browser.view.selected));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    let path = Paragraph::new(format!("Current path: {}", browser.view.path))
        .style(Style::default().fg(Color::White));
    f.render_widget(path, chunks[1]);

    let hint = Paragraph::new("↑ ↓ move   → enter folder   ← go back   Enter select this directory")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(hint, chunks[2]);
}

fn render_log_pane(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.logs.len().saturating_sub(visible);

    let items: Vec<ListItem> = app.logs[start..]
        .iter()
        .map(|log| {
            let color = match log.level {
                LogLevel::Debug => Color::Cyan,
                LogLevel::Info => Color::Green,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Error => Color::Red,
            };
            ListItem::new(Span::styled(log.line.clone(), Style::default().fg(color)))
        })
        .collect();

    let pane = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Log")
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(pane, area);
}
