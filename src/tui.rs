//! Terminal front end: a dynamic top area (welcome screen, prompt dialog or
//! directory browser) above a persistent log pane.

pub mod app;
pub mod events;
pub mod models;
pub mod rendering;

pub use events::run;
