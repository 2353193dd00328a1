//! Top-level workflow: bootstrap, auth, pick source, rename, pick
//! destination, create the season structure, copy.
//!
//! Every step runs strictly after the previous one resolves; failures from
//! read-type calls loop back into operator prompts, failures from
//! write-type calls are logged and the run proceeds best-effort.

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::ConfigStore;
use crate::front::FrontEnd;
use crate::navigator;
use crate::planner;
use crate::recovery;
use crate::remote::{BROWSE_PAGE, DirectoryListing, FULL_LISTING, RemoteApi};
use crate::translit;

/// Which configured directory a browsing session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKind {
    Base,
    Dst,
}

impl PathKind {
    fn key(self) -> &'static str {
        match self {
            PathKind::Base => "base_dir",
            PathKind::Dst => "dst_dir",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            PathKind::Base => "source",
            PathKind::Dst => "media library",
        }
    }
}

/// Explicit context threaded through the whole run; owns the settings, the
/// remote session and the front-end handle. No hidden shared state.
#[derive(Debug)]
pub struct Workflow<A, F> {
    pub config: ConfigStore,
    pub api: A,
    pub front: F,
}

impl<A: RemoteApi, F: FrontEnd> Workflow<A, F> {
    pub fn new(config: ConfigStore, api: A, front: F) -> Self {
        Self { config, api, front }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("configuration loaded from {}", self.config.path().display());
        recovery::ensure_ready(&mut self.config, &mut self.api, &self.front).await?;

        let source_path = self.pick_directory(PathKind::Base).await?;
        info!("source directory confirmed: {source_path}");

        let leaf = source_path.rsplit('/').next().unwrap_or("");
        let label = translit::leading_label(leaf);

        let renamed = self.rename_episodes(&source_path, &label.safe).await?;

        let dst_root = self.pick_directory(PathKind::Dst).await?;
        info!("media library directory confirmed: {dst_root}");

        let season_dir = self
            .create_season_structure(&dst_root, &label.display, renamed)
            .await?;

        self.copy_episodes(&source_path, &season_dir).await;

        info!("all done");
        self.front.exit();
        Ok(())
    }

    /// Steps 3/7: prove the configured directory is listable, then let the
    /// operator browse from it. Any listing failure re-prompts for a
    /// corrected path and tries again; only operator cancellation escapes.
    async fn pick_directory(&mut self, kind: PathKind) -> Result<String> {
        loop {
            let start = self.config.get(kind.key()).to_string();
            match self.api.list_directory(&start, 1, BROWSE_PAGE, true).await {
                Ok(listing) => {
                    match navigator::browse(&self.api, &self.front, listing).await {
                        Ok(path) => return Ok(path),
                        Err(err) => error!("browsing failed: {err:#}"),
                    }
                }
                Err(err) => error!("cannot list the {} directory: {err}", kind.describe()),
            }
            let corrected = self
                .front
                .prompt_text(
                    &format!("New {} directory path", kind.describe()),
                    &start,
                    "/",
                )
                .await?;
            self.config.set(kind.key(), corrected.trim())?;
        }
    }

    /// Step 6: plan and submit the rename batch. Returns the number of
    /// files in the submitted plan (zero when nothing was renamed).
    async fn rename_episodes(&mut self, path: &str, default_prefix: &str) -> Result<usize> {
        let prefix = self
            .front
            .prompt_text("Series name", default_prefix, "TV show")
            .await?;
        let listing = self.fetch_full_listing(path).await;

        info!("planning renames for {} entries", listing.entries.len());
        // The rename pass always labels season 1; the real season number is
        // only asked for when the library structure is created.
        let items = match planner::plan(&listing.entries, prefix.trim(), 1) {
            Ok(items) => items,
            Err(err) => {
                error!("rename plan rejected: {err}");
                return Ok(0);
            }
        };
        if items.is_empty() {
            warn!("no renameable video files in {path}");
            return Ok(0);
        }
        for item in &items {
            info!("rename: {} -> {}", item.src_name, item.new_name);
        }
        if !self.api.rename_batch(path, &items).await {
            warn!("rename batch was not applied, continuing with original names");
        }
        Ok(items.len())
    }

    /// Step 8: prompt for the show title and season, then create
    /// `dst_root/title/Season NN`.
    async fn create_season_structure(
        &mut self,
        dst_root: &str,
        display_name: &str,
        episode_count: usize,
    ) -> Result<String> {
        let default_title = if display_name.is_empty() {
            String::new()
        } else {
            format!("{display_name} ({episode_count} episodes)")
        };
        let title = self
            .front
            .prompt_text("Show title", &default_title, "TV show")
            .await?;
        let season = self
            .front
            .prompt_text("Season number", "01", "01")
            .await?;

        let season_dir = format!(
            "{}/{}/Season {:0>2}",
            dst_root.trim_end_matches('/'),
            title.trim(),
            season.trim()
        );
        info!("creating folder structure {season_dir}");
        if !self.api.mkdir(&season_dir).await {
            warn!("directory creation failed, copy may land in a missing path");
        }
        Ok(season_dir)
    }

    /// Step 9: re-read the source directory and copy everything it lists
    /// (post-rename names) into the season directory.
    async fn copy_episodes(&mut self, source: &str, season_dir: &str) {
        let listing = self.fetch_full_listing(source).await;
        if listing.entries.is_empty() {
            warn!("source directory is empty, nothing to copy");
            return;
        }
        let names: Vec<String> = listing.entries.iter().map(|e| e.name.clone()).collect();
        info!("copying {} items to {season_dir}", names.len());
        if !self.api.copy_files(source, season_dir, &names).await {
            warn!("copy task was not created");
        }
    }

    /// Fetch the complete file list for a confirmed path. The path was
    /// operator-confirmed moments ago, so a failure here is transient; it is
    /// logged and treated as an empty directory (best-effort semantics).
    async fn fetch_full_listing(&mut self, path: &str) -> DirectoryListing {
        match self.api.list_directory(path, 1, FULL_LISTING, true).await {
            Ok(listing) => listing,
            Err(err) => {
                error!("full listing of {path} failed: {err}");
                DirectoryListing {
                    path: path.to_string(),
                    entries: Vec::new(),
                }
            }
        }
    }
}
