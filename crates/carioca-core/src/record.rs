use crate::key::HandKey;
use crate::model::card::Card;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Document appended to the play collection for every accepted hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayRecord {
    pub cards: Vec<Card>,
    pub key: HandKey,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl PlayRecord {
    pub fn new(cards: Vec<Card>, timestamp: OffsetDateTime) -> Self {
        let key = HandKey::of(&cards);
        Self {
            cards,
            key,
            timestamp,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
