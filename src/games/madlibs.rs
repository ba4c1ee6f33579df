//! Mad-lib story templates.
//!
//! A template is one line of text with `{key}` placeholders. Keys containing
//! `#` (e.g. `{name#1}`) are reused markers: every occurrence takes the same
//! answer, so the player is asked for them once. A literal `\n` in the file
//! stands for a line break in the story.

use anyhow::{anyhow, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::path::Path;

/// Load one template per line, expanding literal `\n` sequences.
pub fn load_stories(path: &Path) -> Result<Vec<String>> {
    let stories: Vec<String> = super::read_lines(path)?
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.replace("\\n", "\n"))
        .collect();
    log::debug!("madlibs: loaded {} stories from {}", stories.len(), path.display());
    Ok(stories)
}

pub fn random_story<'a, R: Rng>(stories: &'a [String], rng: &mut R) -> Option<&'a str> {
    stories.choose(rng).map(|s| s.as_str())
}

/// Placeholder keys in the order a player should be asked for them.
///
/// Plain keys appear once per occurrence, in template order. Reused `#` keys
/// are pulled out of that sequence and appended once each, in the order they
/// first appear. An unclosed `{` ends the scan.
pub fn story_keys(template: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut reused: Vec<String> = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let key = &after[..close];
        if key.contains('#') {
            if !reused.iter().any(|k| k == key) {
                reused.push(key.to_string());
            }
        } else {
            keys.push(key.to_string());
        }
        rest = &after[close + 1..];
    }
    keys.extend(reused);
    keys
}

/// Substitute answers into a template.
///
/// `answers` for plain keys are consumed in order, so a key that appears
/// twice takes two answers. `#` keys take their single answer everywhere.
pub fn fill_story(template: &str, answers: &[String]) -> Result<String> {
    let keys = story_keys(template);
    if answers.len() != keys.len() {
        return Err(anyhow!(
            "story needs {} answers, got {}",
            keys.len(),
            answers.len()
        ));
    }
    let reused: HashMap<&str, &str> = keys
        .iter()
        .zip(answers)
        .filter(|(k, _)| k.contains('#'))
        .map(|(k, a)| (k.as_str(), a.as_str()))
        .collect();
    let mut plain = keys
        .iter()
        .zip(answers)
        .filter(|(k, _)| !k.contains('#'))
        .map(|(_, a)| a.as_str());

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = &after[..close];
        let answer = if key.contains('#') {
            reused.get(key).copied()
        } else {
            plain.next()
        };
        out.push_str(answer.unwrap_or_default());
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn answers(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keys_keep_order_and_dedupe_markers() {
        let t = "{name#1} went to the {place}. {name#1} saw a {adjective} {noun} and {name#2}.";
        assert_eq!(
            story_keys(t),
            vec!["place", "adjective", "noun", "name#1", "name#2"]
        );
    }

    #[test]
    fn plain_duplicates_are_kept() {
        assert_eq!(story_keys("{noun} and {noun}"), vec!["noun", "noun"]);
        assert!(story_keys("no placeholders").is_empty());
        assert_eq!(story_keys("{ok} then {broken"), vec!["ok"]);
    }

    #[test]
    fn fill_uses_marker_answer_everywhere() {
        let t = "{hero#1} ate a {food}. Then {hero#1} ate a {food}.";
        let filled = fill_story(t, &answers(&["taco", "pie", "Zed"])).unwrap();
        assert_eq!(filled, "Zed ate a taco. Then Zed ate a pie.");
    }

    #[test]
    fn fill_rejects_wrong_answer_count() {
        assert!(fill_story("{a} {b}", &answers(&["x"])).is_err());
    }

    #[test]
    fn loader_expands_escaped_newlines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Dear {{name}},\\nHello.").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "The {{noun}} sat.").unwrap();
        let stories = load_stories(file.path()).unwrap();
        assert_eq!(stories, vec!["Dear {name},\nHello.", "The {noun} sat."]);
        let mut rng = StdRng::seed_from_u64(3);
        let picked = random_story(&stories, &mut rng).unwrap();
        assert!(stories.iter().any(|s| s == picked));
        assert!(random_story(&[], &mut rng).is_none());
    }
}
