//! Text mini-game helpers: emoji strings, mad-lib stories, and ballot tallies.
//!
//! These share no state with the coin economy. Emoji lists and story
//! templates are plain UTF-8 files with one entry per line; bytes that are not
//! valid UTF-8 are dropped rather than rejected.

pub mod ballot;
pub mod emoji;
pub mod madlibs;

use anyhow::{anyhow, Result};
use std::path::Path;

pub use ballot::{tally, winner_list};
pub use emoji::{emoji_string, load_emoji_list};
pub use madlibs::{fill_story, load_stories, random_story, story_keys};

/// Read a line-oriented asset file, dropping line terminators.
///
/// Bytes that are not valid UTF-8 are dropped rather than replaced.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow!("Failed to read asset file {}: {}", path.display(), e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text
        .lines()
        .map(|line| line.replace(char::REPLACEMENT_CHARACTER, ""))
        .collect())
}
