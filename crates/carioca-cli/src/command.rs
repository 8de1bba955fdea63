use carioca_core::{SHORT_ID_LEN, Suit, SuitError};
use core::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  add <rank> <suit>     add a card (rank A, 2..10, J, Q, K; suit club, diamond, heart, spade)
  remove <n|id>         remove the card at position n, or whose id starts with the prefix
                        (a shown 8-digit id, or any prefix written as #id)
  sort rank|suit        reorder the hand
  group                 move three separate runs to the front
  validate              check for three separate runs and record the hand
  show                  print the hand again
  clear                 drop every card
  help                  this text
  quit                  leave";

/// How a card is addressed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRef {
    Position(usize),
    IdPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { rank: String, suit: Suit },
    Remove(CardRef),
    SortByRank,
    SortBySuit,
    Group,
    Validate,
    Show,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("unexpected argument '{0}'")]
    Unexpected(String),
    #[error(transparent)]
    Suit(#[from] SuitError),
    #[error("sort by 'rank' or 'suit', not '{0}'")]
    SortKey(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" | "a" => {
                let rank = words.next().ok_or(CommandError::MissingArgument("rank"))?;
                let suit = words.next().ok_or(CommandError::MissingArgument("suit"))?;
                Command::Add {
                    rank: rank.to_string(),
                    suit: suit.parse()?,
                }
            }
            "remove" | "rm" => {
                let target = words.next().ok_or(CommandError::MissingArgument("card"))?;
                Command::Remove(card_ref(target))
            }
            "sort" => {
                let key = words.next().ok_or(CommandError::MissingArgument("rank|suit"))?;
                match key.to_ascii_lowercase().as_str() {
                    "rank" | "number" | "numero" => Command::SortByRank,
                    "suit" | "pinta" => Command::SortBySuit,
                    other => return Err(CommandError::SortKey(other.to_string())),
                }
            }
            "group" | "runs" => Command::Group,
            "validate" | "check" => Command::Validate,
            "show" | "ls" => Command::Show,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Unexpected(extra.to_string())),
            None => Ok(command),
        }
    }
}

/// `#` forces an id prefix. Short numbers are positions; anything as long as a
/// shown id is read as one, digits or not.
fn card_ref(target: &str) -> CardRef {
    if let Some(prefix) = target.strip_prefix('#') {
        return CardRef::IdPrefix(prefix.to_string());
    }
    match target.parse::<usize>() {
        Ok(position) if target.len() < SHORT_ID_LEN => CardRef::Position(position),
        _ => CardRef::IdPrefix(target.to_string()),
    }
}
