use tokio::sync::oneshot;

use crate::front::{BrowserView, LogLevel, NavEvent};

/// One rendered line in the log pane.
#[derive(Debug)]
pub struct LogLine {
    pub level: LogLevel,
    pub line: String,
}

/// A pending text prompt. `reply` is taken when the operator submits.
#[derive(Debug)]
pub struct PromptState {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub reply: Option<oneshot::Sender<String>>,
}

/// A directory view awaiting one navigation event. After the event is sent
/// the stale view keeps rendering until the navigator requests the next one.
#[derive(Debug)]
pub struct BrowserState {
    pub view: BrowserView,
    pub reply: Option<oneshot::Sender<NavEvent>>,
}

/// What currently occupies the dynamic top area.
#[derive(Debug)]
pub enum Screen {
    Welcome,
    Prompt(PromptState),
    Browser(BrowserState),
}
