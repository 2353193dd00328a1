//! Interactive navigation of the remote directory tree.
//!
//! The navigator owns the cursor for one browsing session: current path,
//! the listing fetched for it, and the highlighted row. The front end only
//! renders snapshots and reports key events; every transition that changes
//! the path re-fetches the listing, while cursor movement never does.

use anyhow::Result;
use tracing::info;

use crate::front::{BrowserView, FrontEnd, NavEvent};
use crate::remote::{BROWSE_PAGE, DirectoryListing, RemoteApi};

#[derive(Debug)]
struct NavigationCursor {
    path: String,
    listing: DirectoryListing,
    selected: usize,
}

impl NavigationCursor {
    fn view(&self) -> BrowserView {
        BrowserView {
            path: self.path.clone(),
            entries: self.listing.entries.clone(),
            selected: self.selected,
        }
    }
}

/// Append one segment to a remote path.
fn push_segment(path: &str, name: &str) -> String {
    if path == "/" {
        format!("/{name}")
    } else {
        format!("{}/{name}", path.trim_end_matches('/'))
    }
}

/// Drop the last segment, never underflowing past the root.
fn pop_segment(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}

/// Walk the tree from `start` until the operator confirms a directory.
///
/// The caller supplies the initial listing (it already fetched one to prove
/// the path is listable). Fetch failures while descending or ascending
/// propagate upward; the orchestrator's retry loop re-prompts for a fresh
/// starting path.
pub async fn browse<A: RemoteApi, F: FrontEnd>(
    api: &A,
    front: &F,
    start: DirectoryListing,
) -> Result<String> {
    let mut cursor = NavigationCursor {
        path: start.path.clone(),
        listing: start,
        selected: 0,
    };

    loop {
        match front.next_nav_event(cursor.view()).await? {
            NavEvent::Up => {
                cursor.selected = cursor.selected.saturating_sub(1);
            }
            NavEvent::Down => {
                if !cursor.listing.entries.is_empty() {
                    cursor.selected = (cursor.selected + 1).min(cursor.listing.entries.len() - 1);
                }
            }
            NavEvent::Enter => {
                // No-op on a file row or on the empty-directory placeholder.
                let Some(entry) = cursor.listing.entries.get(cursor.selected) else {
                    continue;
                };
                if !entry.is_dir {
                    continue;
                }
                let next = push_segment(&cursor.path, &entry.name);
                cursor.listing = api.list_directory(&next, 1, BROWSE_PAGE, true).await?;
                info!("entered {next}");
                cursor.path = next;
                cursor.selected = 0;
            }
            NavEvent::Back => {
                let parent = pop_segment(&cursor.path);
                if parent == cursor.path {
                    continue;
                }
                cursor.listing = api.list_directory(&parent, 1, BROWSE_PAGE, true).await?;
                info!("went back to {parent}");
                cursor.path = parent;
                cursor.selected = 0;
            }
            NavEvent::Confirm => {
                info!("selected directory {}", cursor.path);
                return Ok(cursor.path);
            }
        }
    }
}
