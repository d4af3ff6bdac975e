//! Database Infrastructure
//!
//! PostgreSQL implementation of the ledger's persistence port using SQLx.
//! Only source-of-truth state is stored: trips, participants, and the
//! append-only expense records. Balances and settlement plans are always
//! recomputed by the engine and never written here.
//!
//! Table layout lives in `migrations/0001_create_ledger_tables.sql` and is
//! applied externally.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, ping, DatabaseConfig, DatabasePool};
pub use repositories::PgLedgerArchive;
