//! Deterministic rename planning for episodic video files.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::remote::{DirectoryEntry, RenamePlanItem};

/// Extensions treated as episode material. Everything else is left alone.
const VIDEO_EXTS: [&str; 5] = ["mp4", "mkv", "avi", "mov", "flv"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Two source files map to the same target name. Submitting such a batch
    /// would let the remote side resolve the conflict arbitrarily, so the
    /// whole plan is rejected instead.
    #[error("duplicate rename target {target:?} (from {first:?} and {second:?})")]
    DuplicateTarget {
        target: String,
        first: String,
        second: String,
    },
}

fn episode_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Last maximal digit run, allowing non-digit trailing characters:
    // "Episode 07 final" -> "07".
    RE.get_or_init(|| Regex::new(r"(\d+)\D*$").expect("episode number pattern"))
}

/// Width of the zero-padded episode field for a batch of `entry_count`
/// entries: enough digits to pad the batch size, not the largest episode
/// number found. This is a batch-level policy.
pub fn episode_digits(entry_count: usize) -> usize {
    let mut digits = 1;
    let mut n = entry_count;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

fn split_extension(name: &str) -> (&str, Option<String>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext.to_ascii_lowercase())),
        _ => (name, None),
    }
}

/// Compute the new name for one entry, or `None` when the entry is not a
/// recognized video file or carries no trailing episode number.
fn rename_one(name: &str, prefix: &str, season: u32, digits: usize) -> Option<String> {
    let (stem, ext) = split_extension(name);
    let ext = ext.filter(|e| VIDEO_EXTS.contains(&e.as_str()))?;
    let episode: u64 = episode_pattern()
        .captures(stem)?
        .get(1)?
        .as_str()
        .parse()
        .ok()?;
    Some(format!(
        "{prefix} S{season:02}E{episode:0width$}.{ext}",
        width = digits
    ))
}

/// Turn a directory listing into a rename plan. Pure and deterministic:
/// non-video entries and files without a trailing digit run are skipped,
/// entries whose computed name equals the original are skipped, and a
/// colliding pair of targets fails the whole batch.
pub fn plan(
    entries: &[DirectoryEntry],
    name_prefix: &str,
    season: u32,
) -> Result<Vec<RenamePlanItem>, PlanError> {
    let digits = episode_digits(entries.len());
    let mut items = Vec::new();
    let mut taken: HashMap<String, String> = HashMap::new();

    for entry in entries {
        if entry.is_dir {
            continue;
        }
        let Some(new_name) = rename_one(&entry.name, name_prefix, season, digits) else {
            continue;
        };
        if new_name == entry.name {
            continue;
        }
        if let Some(first) = taken.insert(new_name.clone(), entry.name.clone()) {
            return Err(PlanError::DuplicateTarget {
                target: new_name,
                first,
                second: entry.name.clone(),
            });
        }
        items.push(RenamePlanItem {
            src_name: entry.name.clone(),
            new_name,
        });
    }

    Ok(items)
}
