//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the backend-agnostic user persistence contract.
//! - Isolate SQL and key-value encoding details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewUser::validate()` before touching
//!   a store.
//! - Read paths reject invalid persisted state instead of masking it; a
//!   scan aborts on the first undecodable entry.

pub mod kv_user_repo;
pub mod sqlite_user_repo;
pub mod user_repo;
