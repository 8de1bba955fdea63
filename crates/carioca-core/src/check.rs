//! Completion check: decides whether a hand forms a game and records it once.

use crate::key::HandKey;
use crate::model::hand::Hand;
use crate::record::PlayRecord;
use crate::runs::find_three_disjoint_runs;
use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Collection accepted hands are appended to.
pub const COLLECTION: &str = "jugadascarioca";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed stored record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Document store holding recorded plays. `exists_by_key` may scan every record;
/// no index is assumed.
#[async_trait]
pub trait PlayStore: Send + Sync {
    async fn append(&self, collection: &str, record: PlayRecord) -> Result<(), StoreError>;
    async fn exists_by_key(&self, collection: &str, key: &HandKey) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: PlayStore + ?Sized> PlayStore for std::sync::Arc<S> {
    async fn append(&self, collection: &str, record: PlayRecord) -> Result<(), StoreError> {
        self.as_ref().append(collection, record).await
    }

    async fn exists_by_key(&self, collection: &str, key: &HandKey) -> Result<bool, StoreError> {
        self.as_ref().exists_by_key(collection, key).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    NoGame,
    AlreadyRecorded,
    Valid(HandKey),
}

pub async fn check_hand<S>(hand: &Hand, store: &S, collection: &str) -> Result<Verdict, StoreError>
where
    S: PlayStore + ?Sized,
{
    check_hand_at(hand, store, collection, OffsetDateTime::now_utc()).await
}

/// Looks for three disjoint runs, then records the full hand unless its key is
/// already stored. The existence check and the append are separate calls, so two
/// callers racing on the same key can both append.
pub async fn check_hand_at<S>(
    hand: &Hand,
    store: &S,
    collection: &str,
    timestamp: OffsetDateTime,
) -> Result<Verdict, StoreError>
where
    S: PlayStore + ?Sized,
{
    let Some(triple) = find_three_disjoint_runs(hand.cards()) else {
        debug!(cards = hand.len(), "no three disjoint runs");
        return Ok(Verdict::NoGame);
    };
    debug!(
        cards = hand.len(),
        runs = ?triple.map(|run| (run.suit().name(), run.low().value())),
        "found three disjoint runs"
    );

    let key = HandKey::of(hand.cards());
    let exists = store
        .exists_by_key(collection, &key)
        .await
        .inspect_err(|err| warn!(%key, error = %err, "existence query failed"))?;
    if exists {
        info!(%key, "hand already recorded");
        return Ok(Verdict::AlreadyRecorded);
    }

    let record = PlayRecord {
        cards: hand.cards().to_vec(),
        key: key.clone(),
        timestamp,
    };
    store
        .append(collection, record)
        .await
        .inspect_err(|err| warn!(%key, error = %err, "append failed"))?;
    info!(%key, collection, "hand recorded");
    Ok(Verdict::Valid(key))
}

/// What the presentation layer shows after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Invalid(String),
    Grouped,
    NoGame,
    AlreadyRecorded,
    Valid(HandKey),
    StorageFailure(String),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Invalid(reason) => reason.clone(),
            Outcome::Grouped => "grouped 3 runs".to_string(),
            Outcome::NoGame => "no game: the hand does not hold 3 separate runs".to_string(),
            Outcome::AlreadyRecorded => "this hand was already recorded".to_string(),
            Outcome::Valid(_) => "3 runs found, hand recorded".to_string(),
            Outcome::StorageFailure(reason) => format!("could not reach the store: {reason}"),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Invalid(_) | Outcome::StorageFailure(_))
    }
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::NoGame => Outcome::NoGame,
            Verdict::AlreadyRecorded => Outcome::AlreadyRecorded,
            Verdict::Valid(key) => Outcome::Valid(key),
        }
    }
}

impl From<Result<Verdict, StoreError>> for Outcome {
    fn from(result: Result<Verdict, StoreError>) -> Self {
        match result {
            Ok(verdict) => verdict.into(),
            Err(err) => Outcome::StorageFailure(err.to_string()),
        }
    }
}
