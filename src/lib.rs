//! Interactive workflow tool for organizing episodic media on an
//! OpenList/Alist server: authenticate, browse to a source directory,
//! rename the episodes it contains, and copy them into a
//! `Show/Season NN` structure in the media library.

pub mod config;
pub mod front;
pub mod logging;
pub mod navigator;
pub mod planner;
pub mod recovery;
pub mod remote;
pub mod translit;
pub mod tui;
pub mod workflow;
