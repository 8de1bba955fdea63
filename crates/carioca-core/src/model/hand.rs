use crate::model::card::{Card, CardId};
use crate::model::rank::{Rank, RankError};
use crate::model::suit::Suit;
use crate::runs;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cards in display order. Every intent borrows the hand and returns a new one,
/// so a rejected intent leaves the caller's value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Keeps the given order. Cards repeating an earlier id are dropped.
    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            if !hand.contains(card.id) {
                hand.cards.push(card);
            }
        }
        hand
    }

    pub fn add_card(&self, token: &str, suit: Suit) -> Result<Hand, RankError> {
        self.add_card_with_rng(&mut rand::thread_rng(), token, suit)
    }

    pub fn add_card_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        token: &str,
        suit: Suit,
    ) -> Result<Hand, RankError> {
        let rank: Rank = token.parse()?;
        let mut card = Card::with_rng(rng, rank, suit);
        while self.contains(card.id) {
            card = Card::with_rng(rng, rank, suit);
        }
        Ok(self.with_card(card))
    }

    /// Appends `card`; a card whose id is already present leaves the hand as is.
    pub fn with_card(&self, card: Card) -> Hand {
        let mut next = self.clone();
        if !next.contains(card.id) {
            next.cards.push(card);
        }
        next
    }

    pub fn remove_card(&self, id: CardId) -> Hand {
        Self {
            cards: self.cards.iter().copied().filter(|c| c.id != id).collect(),
        }
    }

    pub fn sort_by_rank(&self) -> Hand {
        let mut cards = self.cards.clone();
        cards.sort_by_key(|c| c.rank);
        Self { cards }
    }

    pub fn sort_by_suit(&self) -> Hand {
        let mut cards = self.cards.clone();
        cards.sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
        Self { cards }
    }

    /// Pulls the first three disjoint runs to the front. `None` when the hand
    /// holds no such triple.
    pub fn group_by_runs(&self) -> Option<Hand> {
        runs::group_by_runs(&self.cards).map(|cards| Self { cards })
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::with_cards(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}
