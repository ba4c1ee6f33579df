//! Random emoji strings for the emoji guessing and story games.

use anyhow::{anyhow, Result};
use rand::seq::index;
use rand::Rng;
use std::path::Path;

/// Fewest and most emoji in one string.
pub const EMOJI_MIN: usize = 3;
pub const EMOJI_MAX: usize = 5;

/// Load one emoji per line, skipping blank lines.
pub fn load_emoji_list(path: &Path) -> Result<Vec<String>> {
    let list: Vec<String> = super::read_lines(path)?
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    log::debug!("emoji: loaded {} entries from {}", list.len(), path.display());
    Ok(list)
}

/// Between three and five distinct entries from `list`, space separated.
pub fn emoji_string<R: Rng>(list: &[String], rng: &mut R) -> Result<String> {
    if list.len() < EMOJI_MIN {
        return Err(anyhow!(
            "emoji list needs at least {} entries, found {}",
            EMOJI_MIN,
            list.len()
        ));
    }
    let count = rng.gen_range(EMOJI_MIN..=EMOJI_MAX).min(list.len());
    let picked: Vec<&str> = index::sample(rng, list.len(), count)
        .into_iter()
        .map(|i| list[i].as_str())
        .collect();
    Ok(picked.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::io::Write;

    fn sample_list() -> Vec<String> {
        ["😀", "🎲", "🐍", "🦀", "🌵", "🍕", "🚀"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn strings_have_three_to_five_distinct_entries() {
        let list = sample_list();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let s = emoji_string(&list, &mut rng).unwrap();
            let parts: Vec<&str> = s.split(' ').collect();
            assert!((EMOJI_MIN..=EMOJI_MAX).contains(&parts.len()));
            let unique: HashSet<&str> = parts.iter().copied().collect();
            assert_eq!(unique.len(), parts.len());
            assert!(parts.iter().all(|p| list.iter().any(|e| e == p)));
        }
    }

    #[test]
    fn short_list_is_rejected() {
        let list = vec!["😀".to_string(), "🎲".to_string()];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(emoji_string(&list, &mut rng).is_err());
    }

    #[test]
    fn loader_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "😀\n\n🎲\r\n  🦀  ").unwrap();
        let list = load_emoji_list(file.path()).unwrap();
        assert_eq!(list, vec!["😀", "🎲", "🦀"]);
    }

    #[test]
    fn loader_drops_invalid_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\n\xf0\x9f\x98\x80\xfe\n\xf0\x9f\x8e\xb2\n").unwrap();
        let list = load_emoji_list(file.path()).unwrap();
        assert_eq!(list, vec!["😀", "🎲"]);
        assert!(list.iter().all(|e| !e.contains(char::REPLACEMENT_CHARACTER)));
    }
}
