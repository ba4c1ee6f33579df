//! Ballot counting for voting-style rounds.

use std::collections::BTreeMap;

/// Most common ballot and its vote count. Ties go to the ballot that sorts
/// first. `None` when nobody voted.
pub fn tally<S: AsRef<str>>(ballots: &[S]) -> Option<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for ballot in ballots {
        *counts.entry(ballot.as_ref()).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (ballot, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((ballot, count));
        }
    }
    best.map(|(ballot, count)| (ballot.to_string(), count))
}

/// Join winners for announcement: `a`, `a & b`, `a, b & c`.
pub fn winner_list<S: AsRef<str>>(winners: &[S]) -> String {
    match winners {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(|w| w.as_ref()).collect();
            format!("{} & {}", head.join(", "), last.as_ref())
        }
    }
}
