//! Bridges `tracing` events into the TUI log pane.
//!
//! The interactive surface is the only place the operator can read
//! diagnostics, so a custom subscriber layer formats every event as
//! `[LEVEL][HH:MM:SS] message` and ships it over the UI channel. Once the
//! channel closes the process is already shutting down and events are
//! dropped on the floor.

use std::fmt::Write as _;

use time::OffsetDateTime;
use time::macros::format_description;
use tokio::sync::mpsc;
use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::front::{LogLevel, UiRequest};

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

/// Install the global subscriber. INFO and up reach the log pane.
pub fn init(tx: mpsc::UnboundedSender<UiRequest>) {
    tracing_subscriber::registry()
        .with(UiLogLayer { tx }.with_filter(LevelFilter::INFO))
        .init();
}

struct UiLogLayer {
    tx: mpsc::UnboundedSender<UiRequest>,
}

impl<S: tracing::Subscriber> Layer<S> for UiLogLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = *event.metadata().level();
        let clock = OffsetDateTime::now_utc()
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default();
        let line = format!("[{level}][{clock}] {}", visitor.message);
        let _ = self.tx.send(UiRequest::Log {
            level: level.into(),
            line,
        });
    }
}

/// Collects the `message` field of an event; other fields are appended as
/// `key=value` pairs.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            if !self.message.is_empty() {
                self.message.push(' ');
            }
            let _ = write!(self.message, "{}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            if !self.message.is_empty() {
                self.message.push(' ');
            }
            let _ = write!(self.message, "{}={value}", field.name());
        }
    }
}
