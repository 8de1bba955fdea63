use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declaration order follows the canonical names alphabetically, so the derived
/// `Ord` is the ordering used when sorting a hand by suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown suit '{0}' (expected diamond, heart, club or spade)")]
pub struct SuitError(pub String);

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    /// Canonical name used in dedup keys and stored documents.
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Club => "club",
            Suit::Diamond => "diamond",
            Suit::Heart => "heart",
            Suit::Spade => "spade",
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

impl FromStr for Suit {
    type Err = SuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "club" | "clubs" | "c" | "trebol" | "trébol" => Ok(Suit::Club),
            "diamond" | "diamonds" | "d" | "diamante" => Ok(Suit::Diamond),
            "heart" | "hearts" | "h" | "corazon" | "corazón" => Ok(Suit::Heart),
            "spade" | "spades" | "s" | "pica" => Ok(Suit::Spade),
            _ => Err(SuitError(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn ordering_follows_canonical_names() {
        let mut names: Vec<&str> = Suit::ALL.iter().map(|s| s.name()).collect();
        names.sort();
        let ordered: Vec<&str> = Suit::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ordered);
        assert!(Suit::Club < Suit::Spade);
    }

    #[test]
    fn parses_english_and_spanish_names() {
        assert_eq!("Spade".parse::<Suit>(), Ok(Suit::Spade));
        assert_eq!("hearts".parse::<Suit>(), Ok(Suit::Heart));
        assert_eq!("pica".parse::<Suit>(), Ok(Suit::Spade));
        assert_eq!("Corazón".parse::<Suit>(), Ok(Suit::Heart));
        assert_eq!("trebol".parse::<Suit>(), Ok(Suit::Club));
        assert_eq!("diamante".parse::<Suit>(), Ok(Suit::Diamond));
        assert_eq!("d".parse::<Suit>(), Ok(Suit::Diamond));
        assert!("star".parse::<Suit>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&Suit::Heart).unwrap(), "\"heart\"");
        assert_eq!(
            serde_json::from_str::<Suit>("\"club\"").unwrap(),
            Suit::Club
        );
    }
}
