use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

/// Rejected rank token, carrying the token as typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("rank token is empty")]
    Empty,
    #[error("invalid rank '{0}' (expected 1-13, A, J, Q or K)")]
    Invalid(String),
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Next rank up. King has no successor: runs never wrap to the Ace.
    pub const fn succ(self) -> Option<Self> {
        Self::from_value(self.value() + 1)
    }
}

impl FromStr for Rank {
    type Err = RankError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RankError::Empty);
        }
        let parsed = match trimmed.to_ascii_uppercase().as_str() {
            "A" => Some(Rank::Ace),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            digits => digits.parse::<u8>().ok().and_then(Rank::from_value),
        };
        parsed.ok_or_else(|| RankError::Invalid(trimmed.to_string()))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ace => f.write_str("A"),
            Rank::Jack => f.write_str("J"),
            Rank::Queen => f.write_str("Q"),
            Rank::King => f.write_str("K"),
            other => write!(f, "{}", other.value()),
        }
    }
}

// Stored documents carry the numeric rank, matching the key tokens.
impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Rank::from_value(value)
            .ok_or_else(|| serde::de::Error::custom(format!("rank {value} out of range 1..=13")))
    }
}
