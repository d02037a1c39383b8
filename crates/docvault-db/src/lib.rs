//! SQLite persistence for document and folder metadata.
//!
//! Exposes one repository per table plus pool setup with embedded
//! migrations. All rows are scoped by a polymorphic owner pair
//! (kind, numeric id); disk contents are handled elsewhere.

pub mod db;
pub mod setup;

pub use db::{DocumentRepository, FolderRepository, KindStats, StatsRepository};
pub use setup::{setup_database, MIGRATOR};
