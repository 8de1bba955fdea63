use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hex digits shown for a card id.
pub const SHORT_ID_LEN: usize = 8;

/// Opaque card identity. Only equality is meaningful; ids never take part in
/// ordering or in the dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn random() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.r#gen();
        CardId(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Leading hex digits, enough to address a card in a small hand.
    pub fn short(&self) -> String {
        let mut simple = self.0.simple().to_string();
        simple.truncate(SHORT_ID_LEN);
        simple
    }

    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.trim().to_ascii_lowercase();
        !prefix.is_empty() && self.0.simple().to_string().starts_with(&prefix)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self::with_id(CardId::random(), rank, suit)
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R, rank: Rank, suit: Suit) -> Self {
        Self::with_id(CardId::with_rng(rng), rank, suit)
    }

    pub const fn with_id(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self { id, rank, suit }
    }

    /// Dedup token, `"<rank>-<suit>"` with the rank as a plain number.
    pub fn key_token(&self) -> String {
        format!("{}-{}", self.rank.value(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}
