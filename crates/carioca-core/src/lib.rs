#![deny(warnings)]
pub mod check;
pub mod key;
pub mod model;
pub mod record;
pub mod runs;

pub use check::{COLLECTION, Outcome, PlayStore, StoreError, Verdict, check_hand, check_hand_at};
pub use key::{HandKey, KEY_SEPARATOR};
pub use model::card::{Card, CardId, SHORT_ID_LEN};
pub use model::hand::Hand;
pub use model::rank::{Rank, RankError};
pub use model::suit::{Suit, SuitError};
pub use record::PlayRecord;
pub use runs::{Run, find_all_runs, find_three_disjoint_runs, group_by_runs};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "carioca"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
