//! Interactive session state: the hand being edited and the last message shown.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use carioca_core::{Card, CardId, Hand, Outcome, PlayStore, Suit, check_hand};
use tracing::debug;

use crate::command::CardRef;
use crate::config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Empty the hand after it is recorded.
    pub clear_on_valid: bool,
    /// How long grouping messages stay visible.
    pub message_ttl: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        SessionConfig::default().into()
    }
}

impl From<SessionConfig> for SessionPolicy {
    fn from(config: SessionConfig) -> Self {
        Self {
            clear_on_valid: config.clear_on_valid,
            message_ttl: config.message_ttl(),
        }
    }
}

#[derive(Debug, Clone)]
struct Shown {
    outcome: Outcome,
    expires_at: Option<Instant>,
}

pub struct Session<S> {
    hand: Hand,
    shown: Option<Shown>,
    policy: SessionPolicy,
    store: S,
    collection: String,
}

impl<S: PlayStore> Session<S> {
    pub fn new(store: S, collection: impl Into<String>, policy: SessionPolicy) -> Self {
        Self {
            hand: Hand::new(),
            shown: None,
            policy,
            store,
            collection: collection.into(),
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn add_card(&mut self, token: &str, suit: Suit) {
        match self.hand.add_card(token, suit) {
            Ok(hand) => {
                self.hand = hand;
                self.shown = None;
            }
            Err(err) => self.show(Outcome::Invalid(err.to_string()), false),
        }
    }

    pub fn remove_card(&mut self, id: CardId) {
        self.hand = self.hand.remove_card(id);
    }

    pub fn resolve(&self, card: &CardRef) -> Option<CardId> {
        match card {
            CardRef::Position(position) => position
                .checked_sub(1)
                .and_then(|index| self.hand.cards().get(index))
                .map(|c| c.id),
            CardRef::IdPrefix(prefix) => {
                let mut matches = self.hand.iter().filter(|c| c.id.matches_prefix(prefix));
                match (matches.next(), matches.next()) {
                    (Some(card), None) => Some(card.id),
                    _ => None,
                }
            }
        }
    }

    pub fn sort_by_rank(&mut self) {
        self.hand = self.hand.sort_by_rank();
    }

    pub fn sort_by_suit(&mut self) {
        self.hand = self.hand.sort_by_suit();
    }

    pub fn group_by_runs(&mut self) {
        match self.hand.group_by_runs() {
            Some(grouped) => {
                self.hand = grouped;
                self.show(Outcome::Grouped, true);
            }
            None => self.show(Outcome::NoGame, true),
        }
    }

    pub async fn validate(&mut self) -> Outcome {
        let outcome = Outcome::from(check_hand(&self.hand, &self.store, &self.collection).await);
        if matches!(outcome, Outcome::Valid(_)) && self.policy.clear_on_valid {
            debug!("clearing recorded hand");
            self.hand = Hand::new();
        }
        self.show(outcome.clone(), false);
        outcome
    }

    pub fn clear(&mut self) {
        self.hand = Hand::new();
        self.shown = None;
    }

    /// Last outcome, unless it was a transient one whose time ran out.
    pub fn outcome(&self, now: Instant) -> Option<&Outcome> {
        self.shown
            .as_ref()
            .filter(|shown| shown.expires_at.is_none_or(|deadline| now < deadline))
            .map(|shown| &shown.outcome)
    }

    pub fn message(&self, now: Instant) -> Option<String> {
        self.outcome(now).map(Outcome::message)
    }

    /// One line per card: position, face, short id.
    pub fn render(&self) -> String {
        if self.hand.is_empty() {
            return "(empty hand)".to_string();
        }
        let mut out = String::new();
        for (index, card) in self.hand.iter().enumerate() {
            let _ = writeln!(out, "{:>2}. {}", index + 1, describe(card));
        }
        out.pop();
        out
    }

    fn show(&mut self, outcome: Outcome, transient: bool) {
        let expires_at = transient.then(|| Instant::now() + self.policy.message_ttl);
        self.shown = Some(Shown {
            outcome,
            expires_at,
        });
    }
}

fn describe(card: &Card) -> String {
    format!(
        "{:>2} {:<7} [{}]",
        card.rank.to_string(),
        card.suit.name(),
        card.id.short()
    )
}
