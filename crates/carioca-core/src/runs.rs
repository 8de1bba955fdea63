//! Run detection and the disjoint-triple search behind grouping and validation.
//!
//! A run is three cards of one suit with consecutive ranks. [`find_all_runs`]
//! lists them per suit, lowest rank first; when a hand holds the same face more
//! than once, every copy yields its own run so that duplicates never hide one.
//! The disjoint search works on faces and copy counts instead of that list.

use crate::model::card::{Card, CardId};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::collections::{BTreeMap, HashSet};

pub const RUN_LEN: usize = 3;
pub const RUNS_PER_GAME: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    cards: [Card; RUN_LEN],
}

impl Run {
    /// Accepts the three cards in any order.
    pub fn new(a: Card, b: Card, c: Card) -> Option<Self> {
        let mut cards = [a, b, c];
        cards.sort_by_key(|card| card.rank);
        let [low, mid, high] = cards;
        let same_suit = low.suit == mid.suit && mid.suit == high.suit;
        let consecutive = low.rank.succ() == Some(mid.rank) && mid.rank.succ() == Some(high.rank);
        (same_suit && consecutive).then_some(Self { cards })
    }

    /// Cards ascending by rank.
    pub fn cards(&self) -> &[Card; RUN_LEN] {
        &self.cards
    }

    pub fn suit(&self) -> Suit {
        self.cards[0].suit
    }

    pub fn low(&self) -> Rank {
        self.cards[0].rank
    }

    pub fn high(&self) -> Rank {
        self.cards[RUN_LEN - 1].rank
    }

    pub fn ids(&self) -> [CardId; RUN_LEN] {
        self.cards.map(|c| c.id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn shares_card_with(&self, other: &Run) -> bool {
        self.cards.iter().any(|c| other.contains(c.id))
    }
}

/// Every run in `cards`, overlapping ones included.
pub fn find_all_runs(cards: &[Card]) -> Vec<Run> {
    let mut runs = Vec::new();
    for suit in Suit::ALL {
        let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
        for card in cards.iter().filter(|c| c.suit == suit) {
            by_rank.entry(card.rank).or_default().push(*card);
        }

        for (&low, lows) in &by_rank {
            let Some(mid_rank) = low.succ() else { continue };
            let Some(high_rank) = mid_rank.succ() else {
                continue;
            };
            let (Some(mids), Some(highs)) = (by_rank.get(&mid_rank), by_rank.get(&high_rank))
            else {
                continue;
            };
            for &a in lows {
                for &b in mids {
                    for &c in highs {
                        runs.extend(Run::new(a, b, c));
                    }
                }
            }
        }
    }
    runs
}

type Face = (Suit, Rank);
type Shape = [Face; RUN_LEN];

/// First three pairwise-disjoint runs. The search walks run shapes (suit, low
/// rank) in suit-then-rank order, lets a shape repeat while the hand holds enough
/// copies of its faces, and binds copies in hand order once a triple fits. The
/// work depends on the number of distinct faces, not on how often each repeats.
pub fn find_three_disjoint_runs(cards: &[Card]) -> Option<[Run; RUNS_PER_GAME]> {
    if cards.len() < RUN_LEN * RUNS_PER_GAME {
        return None;
    }
    let copies = copies_by_face(cards);
    let shapes = run_shapes(&copies);
    let mut used: BTreeMap<Face, usize> = BTreeMap::new();
    let mut chosen: Vec<usize> = Vec::with_capacity(RUNS_PER_GAME);
    if !extend_selection(&shapes, &copies, 0, &mut used, &mut chosen) {
        return None;
    }
    bind(&shapes, &chosen, &copies)
}

fn copies_by_face(cards: &[Card]) -> BTreeMap<Face, Vec<Card>> {
    let mut copies: BTreeMap<Face, Vec<Card>> = BTreeMap::new();
    for card in cards {
        copies.entry((card.suit, card.rank)).or_default().push(*card);
    }
    copies
}

fn run_shapes(copies: &BTreeMap<Face, Vec<Card>>) -> Vec<Shape> {
    copies
        .keys()
        .filter_map(|&(suit, low)| {
            let mid = low.succ()?;
            let high = mid.succ()?;
            let shape = [(suit, low), (suit, mid), (suit, high)];
            shape.iter().all(|face| copies.contains_key(face)).then_some(shape)
        })
        .collect()
}

fn extend_selection(
    shapes: &[Shape],
    copies: &BTreeMap<Face, Vec<Card>>,
    start: usize,
    used: &mut BTreeMap<Face, usize>,
    chosen: &mut Vec<usize>,
) -> bool {
    if chosen.len() == RUNS_PER_GAME {
        return true;
    }
    for index in start..shapes.len() {
        let shape = &shapes[index];
        let fits = shape.iter().all(|face| {
            let taken = used.get(face).copied().unwrap_or(0);
            taken < copies.get(face).map_or(0, Vec::len)
        });
        if !fits {
            continue;
        }
        for face in shape {
            *used.entry(*face).or_default() += 1;
        }
        chosen.push(index);
        // Same index again: a shape may repeat when its faces have spare copies.
        if extend_selection(shapes, copies, index, used, chosen) {
            return true;
        }
        chosen.pop();
        for face in shape {
            if let Some(taken) = used.get_mut(face) {
                *taken -= 1;
            }
        }
    }
    false
}

fn bind(
    shapes: &[Shape],
    chosen: &[usize],
    copies: &BTreeMap<Face, Vec<Card>>,
) -> Option<[Run; RUNS_PER_GAME]> {
    let mut next: BTreeMap<Face, usize> = BTreeMap::new();
    let mut runs: Vec<Run> = Vec::with_capacity(RUNS_PER_GAME);
    for &index in chosen {
        let [low, mid, high] = shapes[index].map(|face| {
            let slot = next.entry(face).or_default();
            let card = copies.get(&face).and_then(|cards| cards.get(*slot)).copied();
            *slot += 1;
            card
        });
        runs.push(Run::new(low?, mid?, high?)?);
    }
    runs.try_into().ok()
}

/// Selected runs first, each ascending by rank, then the leftover cards in their
/// original relative order.
pub fn group_by_runs(cards: &[Card]) -> Option<Vec<Card>> {
    let triple = find_three_disjoint_runs(cards)?;
    let grouped: HashSet<CardId> = triple.iter().flat_map(|run| run.ids()).collect();

    let mut ordered: Vec<Card> = Vec::with_capacity(cards.len());
    for run in &triple {
        ordered.extend_from_slice(run.cards());
    }
    ordered.extend(cards.iter().filter(|c| !grouped.contains(&c.id)).copied());
    Some(ordered)
}
