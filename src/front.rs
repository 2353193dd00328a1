//! Boundary between the workflow core and the interactive front end.
//!
//! The core never touches the terminal. It hands the front end a request
//! descriptor and suspends on a oneshot completion channel; the front end
//! fills the channel when the operator acts. Dropping the UI side of a
//! channel resolves the pending suspension as an error, which is how
//! cancellation propagates when the interactive surface closes.

use anyhow::{Result, anyhow};
use tokio::sync::{mpsc, oneshot};

use crate::remote::DirectoryEntry;

/// One row-level navigation action delivered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Up,
    Down,
    /// Enter the directory under the cursor.
    Enter,
    /// Go up one path segment.
    Back,
    /// Confirm the current directory as the selection.
    Confirm,
}

/// Snapshot of the navigation cursor handed to the front end for rendering.
#[derive(Debug, Clone)]
pub struct BrowserView {
    pub path: String,
    pub entries: Vec<DirectoryEntry>,
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Requests flowing from the workflow core to the terminal front end.
#[derive(Debug)]
pub enum UiRequest {
    Prompt {
        label: String,
        default: String,
        placeholder: String,
        reply: oneshot::Sender<String>,
    },
    Browse {
        view: BrowserView,
        reply: oneshot::Sender<NavEvent>,
    },
    Log {
        level: LogLevel,
        line: String,
    },
    Exit,
}

/// Interactive surface consumed by the core.
#[allow(async_fn_in_trait)]
pub trait FrontEnd {
    /// Show a text prompt and suspend until the operator submits a value.
    async fn prompt_text(&self, label: &str, default: &str, placeholder: &str) -> Result<String>;

    /// Present a directory view and suspend until one navigation event.
    async fn next_nav_event(&self, view: BrowserView) -> Result<NavEvent>;

    /// Signal workflow completion; the front end terminates the session.
    fn exit(&self);
}

/// Channel-backed handle implementing [`FrontEnd`] for the ratatui loop.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiRequest>,
}

impl UiHandle {
    pub fn new(tx: mpsc::UnboundedSender<UiRequest>) -> Self {
        Self { tx }
    }
}

impl FrontEnd for UiHandle {
    async fn prompt_text(&self, label: &str, default: &str, placeholder: &str) -> Result<String> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(UiRequest::Prompt {
                label: label.to_string(),
                default: default.to_string(),
                placeholder: placeholder.to_string(),
                reply,
            })
            .map_err(|_| anyhow!("interactive surface closed"))?;
        rx.await.map_err(|_| anyhow!("prompt cancelled"))
    }

    async fn next_nav_event(&self, view: BrowserView) -> Result<NavEvent> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(UiRequest::Browse { view, reply })
            .map_err(|_| anyhow!("interactive surface closed"))?;
        rx.await.map_err(|_| anyhow!("navigation cancelled"))
    }

    fn exit(&self) {
        let _ = self.tx.send(UiRequest::Exit);
    }
}
