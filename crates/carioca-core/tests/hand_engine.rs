use carioca_core::model::card::{Card, CardId};
use carioca_core::model::hand::Hand;
use carioca_core::model::rank::{Rank, RankError};
use carioca_core::model::suit::Suit;
use carioca_core::runs::{find_all_runs, find_three_disjoint_runs, group_by_runs};
use carioca_core::{COLLECTION, HandKey, PlayRecord, PlayStore, StoreError, Verdict, check_hand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

const SEED: u64 = 20250301;

fn build(rng: &mut StdRng, faces: &[(u8, Suit)]) -> Vec<Card> {
    faces
        .iter()
        .map(|&(r, s)| Card::with_rng(rng, Rank::from_value(r).expect("rank"), s))
        .collect()
}

fn random_hand(rng: &mut StdRng, size: usize) -> Vec<Card> {
    (0..size)
        .map(|_| {
            let rank = Rank::ORDERED[rng.gen_range(0..Rank::ORDERED.len())];
            let suit = Suit::ALL[rng.gen_range(0..Suit::ALL.len())];
            Card::with_rng(rng, rank, suit)
        })
        .collect()
}

/// Runs as id sets, comparable across permutations of the same cards.
fn run_id_sets(cards: &[Card]) -> BTreeSet<Vec<String>> {
    find_all_runs(cards)
        .iter()
        .map(|run| {
            let mut ids: Vec<String> = run.ids().iter().map(CardId::to_string).collect();
            ids.sort();
            ids
        })
        .collect()
}

fn scenario_faces() -> Vec<(u8, Suit)> {
    vec![
        (3, Suit::Spade),
        (4, Suit::Spade),
        (5, Suit::Spade),
        (7, Suit::Heart),
        (8, Suit::Heart),
        (9, Suit::Heart),
        (10, Suit::Club),
        (11, Suit::Club),
        (12, Suit::Club),
    ]
}

#[derive(Default)]
struct MapStore {
    collections: Mutex<HashMap<String, Vec<PlayRecord>>>,
}

#[async_trait::async_trait]
impl PlayStore for MapStore {
    async fn append(&self, collection: &str, record: PlayRecord) -> Result<(), StoreError> {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn exists_by_key(&self, collection: &str, key: &HandKey) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .is_some_and(|records| records.iter().any(|r| &r.key == key)))
    }
}

#[test]
fn random_hands_only_yield_well_formed_runs() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..200 {
        let size = rng.gen_range(0..20);
        let cards = random_hand(&mut rng, size);
        for run in find_all_runs(&cards) {
            let [a, b, c] = *run.cards();
            assert_eq!(a.suit, b.suit);
            assert_eq!(b.suit, c.suit);
            assert_eq!(a.rank.value() + 1, b.rank.value());
            assert_eq!(b.rank.value() + 1, c.rank.value());
        }
    }
}

#[test]
fn run_enumeration_ignores_input_order() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..100 {
        let size = rng.gen_range(3..24);
        let cards = random_hand(&mut rng, size);
        let expected = run_id_sets(&cards);
        let mut shuffled = cards.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(run_id_sets(&shuffled), expected);
    }
}

#[test]
fn planted_runs_are_always_found() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for _ in 0..100 {
        let mut cards = Vec::new();
        for _ in 0..3 {
            let suit = Suit::ALL[rng.gen_range(0..Suit::ALL.len())];
            let low = rng.gen_range(1..=11u8);
            cards.extend(build(&mut rng, &[(low, suit), (low + 1, suit), (low + 2, suit)]));
        }
        let extra = rng.gen_range(0..6);
        cards.extend(random_hand(&mut rng, extra));
        cards.shuffle(&mut rng);

        let triple = find_three_disjoint_runs(&cards).expect("planted runs must be found");
        for (i, run) in triple.iter().enumerate() {
            for other in &triple[i + 1..] {
                assert!(!run.shares_card_with(other));
            }
        }
    }
}

#[test]
fn grouping_preserves_the_card_multiset() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let mut grouped_hands = 0;
    for _ in 0..300 {
        let size = rng.gen_range(9..26);
        let cards = random_hand(&mut rng, size);
        let Some(grouped) = group_by_runs(&cards) else {
            continue;
        };
        grouped_hands += 1;

        assert_eq!(grouped.len(), cards.len());
        let before: BTreeSet<String> = cards.iter().map(|c| c.id.to_string()).collect();
        let after: BTreeSet<String> = grouped.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(before, after);

        let triple = find_three_disjoint_runs(&cards).expect("triple behind grouping");
        for (slot, run) in grouped[..9].chunks(3).zip(triple.iter()) {
            assert_eq!(slot, run.cards());
            assert!(slot[0].rank < slot[1].rank && slot[1].rank < slot[2].rank);
        }

        let rest: Vec<&Card> = cards
            .iter()
            .filter(|c| !triple.iter().any(|run| run.contains(c.id)))
            .collect();
        let tail: Vec<&Card> = grouped[9..].iter().collect();
        assert_eq!(tail, rest);
    }
    assert!(grouped_hands > 0, "seeded hands should produce some games");
}

#[test]
fn key_is_stable_under_reordering_and_new_ids() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let faces = scenario_faces();
    let first = build(&mut rng, &faces);
    let mut second = build(&mut rng, &faces);
    second.shuffle(&mut rng);
    assert_ne!(first[0].id, second[0].id);
    assert_eq!(HandKey::of(&first), HandKey::of(&second));
}

#[test]
fn scenario_three_suited_runs_group_by_suit() {
    let mut rng = StdRng::seed_from_u64(SEED + 5);
    let cards = build(&mut rng, &scenario_faces());
    let triple = find_three_disjoint_runs(&cards).expect("three runs");
    let suits: Vec<Suit> = triple.iter().map(|run| run.suit()).collect();
    assert_eq!(suits, vec![Suit::Club, Suit::Heart, Suit::Spade]);
}

#[test]
fn scenario_invalid_token_leaves_hand_unchanged() {
    let hand = Hand::new().add_card("3", Suit::Spade).expect("valid");
    let before = hand.clone();
    assert_eq!(
        hand.add_card("Z", Suit::Spade),
        Err(RankError::Invalid("Z".to_string()))
    );
    assert_eq!(hand, before);
}

#[tokio::test]
async fn scenario_validate_records_once() {
    let mut rng = StdRng::seed_from_u64(SEED + 6);
    let hand = Hand::with_cards(build(&mut rng, &scenario_faces()));
    let store = MapStore::default();

    let first = check_hand(&hand, &store, COLLECTION).await.expect("store up");
    let expected = "10-club|11-club|12-club|3-spade|4-spade|5-spade|7-heart|8-heart|9-heart";
    assert_eq!(first, Verdict::Valid(HandKey::of(hand.cards())));
    assert_eq!(HandKey::of(hand.cards()).as_str(), expected);

    let second = check_hand(&hand, &store, COLLECTION).await.expect("store up");
    assert_eq!(second, Verdict::AlreadyRecorded);
    let stored = store.collections.lock().unwrap();
    assert_eq!(stored[COLLECTION].len(), 1);
}

#[tokio::test]
async fn scenario_three_card_hand_is_no_game() {
    let mut rng = StdRng::seed_from_u64(SEED + 7);
    let hand = Hand::with_cards(build(
        &mut rng,
        &[(1, Suit::Spade), (2, Suit::Spade), (3, Suit::Spade)],
    ));
    let store = MapStore::default();
    let verdict = check_hand(&hand, &store, COLLECTION).await.expect("store up");
    assert_eq!(verdict, Verdict::NoGame);
    assert!(store.collections.lock().unwrap().is_empty());
}
