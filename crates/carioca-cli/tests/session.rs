use std::sync::Arc;
use std::time::{Duration, Instant};

use carioca_cli::run_session;
use carioca_cli::session::{Session, SessionPolicy};
use carioca_core::{COLLECTION, HandKey, Outcome, PlayStore, Suit};
use carioca_store::MemoryStore;

const SCENARIO: [(&str, Suit); 9] = [
    ("3", Suit::Spade),
    ("4", Suit::Spade),
    ("5", Suit::Spade),
    ("7", Suit::Heart),
    ("8", Suit::Heart),
    ("9", Suit::Heart),
    ("10", Suit::Club),
    ("J", Suit::Club),
    ("Q", Suit::Club),
];

fn policy(clear_on_valid: bool) -> SessionPolicy {
    SessionPolicy {
        clear_on_valid,
        message_ttl: Duration::from_millis(2_000),
    }
}

fn fill<S: PlayStore>(session: &mut Session<S>) {
    for (rank, suit) in SCENARIO {
        session.add_card(rank, suit);
    }
}

#[tokio::test]
async fn validate_twice_records_once_when_hand_is_kept() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(store.clone(), COLLECTION, policy(false));
    fill(&mut session);
    let key = HandKey::of(session.hand().cards());

    assert_eq!(session.validate().await, Outcome::Valid(key));
    assert_eq!(session.hand().len(), 9);
    assert_eq!(session.validate().await, Outcome::AlreadyRecorded);
    assert_eq!(store.len(COLLECTION), 1);
}

#[tokio::test]
async fn recorded_hand_is_cleared_by_default_policy() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(store.clone(), COLLECTION, policy(true));
    fill(&mut session);

    assert!(matches!(session.validate().await, Outcome::Valid(_)));
    assert!(session.hand().is_empty());
    // Validation messages stay until the next intent replaces them.
    let much_later = Instant::now() + Duration::from_secs(60);
    assert!(session.message(much_later).is_some());
}

#[tokio::test]
async fn storage_outage_keeps_the_hand_and_reports_failure() {
    let store = Arc::new(MemoryStore::new());
    store.set_available(false);
    let mut session = Session::new(store.clone(), COLLECTION, policy(true));
    fill(&mut session);

    let outcome = session.validate().await;
    assert!(matches!(outcome, Outcome::StorageFailure(_)));
    assert_ne!(outcome, Outcome::NoGame);
    assert_eq!(session.hand().len(), 9);

    store.set_available(true);
    assert!(matches!(session.validate().await, Outcome::Valid(_)));
}

#[tokio::test]
async fn group_then_validate_uses_the_same_key() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(store.clone(), COLLECTION, policy(false));
    session.add_card("K", Suit::Diamond);
    fill(&mut session);
    let key = HandKey::of(session.hand().cards());

    session.group_by_runs();
    assert_eq!(session.outcome(Instant::now()), Some(&Outcome::Grouped));
    assert_eq!(session.hand().cards()[9].rank.to_string(), "K");
    assert_eq!(session.validate().await, Outcome::Valid(key));
}

#[tokio::test]
async fn scripted_session_prints_view_and_messages() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(store.clone(), COLLECTION, policy(false));
    let script = "\
add Z spade
add 3 spade
add 4 spade
add 5 spade
add 7 heart
add 8 heart
add 9 heart
add 10 club
add J club
add Q club
frobnicate
validate
validate
quit
add 1 heart
";
    let mut output = Vec::new();
    run_session(&mut session, script.as_bytes(), &mut output)
        .await
        .expect("session runs");
    let text = String::from_utf8(output).expect("utf8 output");

    assert!(text.contains(">> invalid rank 'Z'"));
    assert!(text.contains("error: unknown command 'frobnicate'"));
    assert!(text.contains(">> 3 runs found, hand recorded"));
    assert!(text.contains(">> this hand was already recorded"));
    assert_eq!(session.hand().len(), 9, "input after quit is ignored");
    assert_eq!(store.len(COLLECTION), 1);
}

#[tokio::test]
async fn shown_short_id_removes_its_card() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(store, COLLECTION, policy(false));
    session.add_card("2", Suit::Club);
    session.add_card("3", Suit::Club);
    let doomed = session.hand().cards()[1];
    let kept = session.hand().cards()[0];

    let script = format!("remove {}\nremove #zz\n", doomed.id.short());
    let mut output = Vec::new();
    run_session(&mut session, script.as_bytes(), &mut output)
        .await
        .expect("session runs");
    let text = String::from_utf8(output).expect("utf8 output");

    assert_eq!(session.hand().cards(), &[kept]);
    assert!(text.contains("error: no single card matches IdPrefix(\"zz\")"));
}
