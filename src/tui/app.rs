use crossterm::event::{KeyCode, KeyEvent};

use crate::front::{NavEvent, UiRequest};
use super::models::{BrowserState, LogLine, PromptState, Screen};

/// Keep the pane scrollback bounded.
const LOG_CAP: usize = 500;

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub logs: Vec<LogLine>,
    pub should_exit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            logs: Vec::new(),
            should_exit: false,
        }
    }

    /// Apply one request from the workflow core.
    pub fn apply(&mut self, request: UiRequest) {
        match request {
            UiRequest::Prompt {
                label,
                default,
                placeholder,
                reply,
            } => {
                self.screen = Screen::Prompt(PromptState {
                    label,
                    value: default,
                    placeholder,
                    reply: Some(reply),
                });
            }
            UiRequest::Browse { view, reply } => {
                self.screen = Screen::Browser(BrowserState {
                    view,
                    reply: Some(reply),
                });
            }
            UiRequest::Log { level, line } => {
                self.logs.push(LogLine { level, line });
                if self.logs.len() > LOG_CAP {
                    let excess = self.logs.len() - LOG_CAP;
                    self.logs.drain(..excess);
                }
            }
            UiRequest::Exit => self.should_exit = true,
        }
    }

    /// Handle one key press from the operator.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            // Closing the surface aborts whatever the core is waiting on.
            self.should_exit = true;
            return;
        }

        match &mut self.screen {
            Screen::Welcome => {
                if key.code == KeyCode::Char('q') {
                    self.should_exit = true;
                }
            }
            Screen::Prompt(prompt) => match key.code {
                KeyCode::Enter => {
                    let value = prompt.value.clone();
                    if let Some(reply) = prompt.reply.take() {
                        let _ = reply.send(value);
                    }
                    self.screen = Screen::Welcome;
                }
                KeyCode::Backspace => {
                    prompt.value.pop();
                }
                KeyCode::Char(c) => prompt.value.push(c),
                _ => {}
            },
            Screen::Browser(browser) => {
                let event = match key.code {
                    KeyCode::Up => Some(NavEvent::Up),
                    KeyCode::Down => Some(NavEvent::Down),
                    KeyCode::Right => Some(NavEvent::Enter),
                    KeyCode::Left => Some(NavEvent::Back),
                    KeyCode::Enter => Some(NavEvent::Confirm),
                    _ => None,
                };
                if let Some(event) = event {
                    if let Some(reply) = browser.reply.take() {
                        let _ = reply.send(event);
                    }
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
