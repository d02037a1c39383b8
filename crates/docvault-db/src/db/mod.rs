//! Database repositories for the metadata layer
//!
//! Each repository wraps the shared pool and owns the queries for one table.
//! Lookups by ID are deliberately not owner-scoped; the service layer fetches
//! first and then checks ownership so that cross-owner access can be reported
//! as denied instead of missing.

pub mod documents;
pub mod folders;
pub mod stats;

pub use documents::DocumentRepository;
pub use folders::FolderRepository;
pub use stats::{KindStats, StatsRepository};
