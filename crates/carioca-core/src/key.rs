use crate::model::card::Card;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const KEY_SEPARATOR: &str = "|";

/// Dedup key for a hand: the sorted `"<rank>-<suit>"` tokens of every card.
/// Card ids and insertion order play no part, so equal face multisets share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandKey(String);

impl HandKey {
    pub fn of(cards: &[Card]) -> Self {
        let mut tokens: Vec<String> = cards.iter().map(Card::key_token).collect();
        tokens.sort();
        HandKey(tokens.join(KEY_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HandKey> for String {
    fn from(key: HandKey) -> Self {
        key.0
    }
}
