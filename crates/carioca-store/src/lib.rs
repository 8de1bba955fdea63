//! Persistence backends for recorded plays.
//!
//! - `memory`: process-local collections, handy for tests and throwaway sessions.
//! - `jsonl`: one append-only JSON-lines file per collection.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
