use chrono::{DateTime, Utc};
use gamecoin::economy::{
    self, Coin, DailyOutcome, Roller, SledUserStore, SledUserStoreBuilder, UserStore,
};
use std::ops::RangeInclusive;
use tempfile::TempDir;

struct FixedDraw(u32);

impl Roller for FixedDraw {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        assert_eq!(range, 1..=100, "daily draw must cover 1..=100");
        self.0
    }
}

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn store(dir: &TempDir) -> SledUserStore {
    SledUserStoreBuilder::new(dir.path()).open().expect("store")
}

#[test]
fn first_claim_without_lucky_number() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let now = at("2025-01-15T10:00:00Z");

    let outcome = economy::claim_daily(&store, "42", 0, now, &mut FixedDraw(37)).unwrap();
    let text = outcome.to_string();
    assert_eq!(text, "You have been awarded your daily **\u{20A2}10.00**!");
    assert!(!text.contains("JACKPOT"));
    assert!(!text.contains("37"));

    let record = store.get("42").unwrap();
    assert_eq!(record.coin, Coin::from_whole(10));
    assert_eq!(record.daily, Some(now));
}

#[test]
fn one_mutation_per_utc_day() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let morning = at("2025-01-15T00:00:01Z");
    let evening = at("2025-01-15T23:59:00Z");
    let tomorrow = at("2025-01-16T00:00:00Z");

    economy::claim_daily(&store, "42", 7, morning, &mut FixedDraw(7)).unwrap();
    let after_first = store.get("42").unwrap();
    assert_eq!(after_first.coin, Coin::from_whole(500));

    let outcome = economy::claim_daily(&store, "42", 7, evening, &mut FixedDraw(7)).unwrap();
    assert_eq!(outcome, DailyOutcome::Cooldown { hours: 0, minutes: 1 });
    let after_second = store.get("42").unwrap();
    assert_eq!(after_second.coin, after_first.coin);
    assert_eq!(after_second.daily, after_first.daily);

    let outcome = economy::claim_daily(&store, "42", 7, tomorrow, &mut FixedDraw(8)).unwrap();
    match outcome {
        DailyOutcome::Claimed {
            award,
            jackpot,
            winning_number,
            balance,
        } => {
            assert_eq!(award, Coin::from_whole(10));
            assert!(!jackpot);
            assert_eq!(winning_number, Some(8));
            assert_eq!(balance, Coin::from_whole(510));
        }
        other => panic!("expected a claim, got {:?}", other),
    }
}

#[test]
fn jackpot_only_when_draw_matches() {
    for (lucky, draw, expected) in [(55, 55, 500), (55, 56, 10), (1, 100, 10), (100, 100, 500)] {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let now = at("2025-02-01T12:00:00Z");
        economy::claim_daily(&store, "u", lucky, now, &mut FixedDraw(draw)).unwrap();
        assert_eq!(
            economy::balance(&store, "u").unwrap(),
            Coin::from_whole(expected),
            "lucky {} draw {}",
            lucky,
            draw
        );
    }
}

#[test]
fn claims_are_per_user() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let now = at("2025-03-03T03:03:03Z");
    economy::claim_daily(&store, "a", 0, now, &mut FixedDraw(1)).unwrap();
    let outcome = economy::claim_daily(&store, "b", 0, now, &mut FixedDraw(1)).unwrap();
    assert!(matches!(outcome, DailyOutcome::Claimed { .. }));
    let mut ids = store.list_user_ids().unwrap();
    ids.sort();
    assert_eq!(ids, vec!["a", "b"]);
}
