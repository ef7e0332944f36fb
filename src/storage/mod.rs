//!
//! eventcat storage module
//! -----------------------
//! Pooled SQLite handle shared by every catalog. The store is a cheap, cloneable
//! handle around an `r2d2` pool; each catalog call checks out one connection,
//! performs one round trip and returns it. Concurrency between calls is governed
//! by the pool and SQLite's own locking; nothing here holds locks across calls.
//!
//! In-memory databases are private to the connection that opened them, so a
//! memory-backed store is pinned to a single pooled connection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use crate::error::CatalogResult;

mod init;

pub use init::InitGuard;

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Memory,
    File(PathBuf),
}

impl Location {
    /// `:memory:` (or an empty string) selects an in-memory database; anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || s == ":memory:" { Location::Memory } else { Location::File(PathBuf::from(s)) }
    }
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub location: Location,
    pub max_pool_size: u32,
    pub connection_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { location: Location::Memory, max_pool_size: 8, connection_timeout: Duration::from_secs(5) }
    }
}

impl StoreOptions {
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self { location: Location::File(path.as_ref().to_path_buf()), ..Self::default() }
    }
}

pub type Connection = PooledConnection<SqliteConnectionManager>;

/// Shared query handle. Clones share the same pool.
#[derive(Clone)]
pub struct Store {
    pool: Pool<SqliteConnectionManager>,
}

impl Store {
    pub fn open(options: &StoreOptions) -> CatalogResult<Self> {
        let (manager, max_size) = match &options.location {
            Location::Memory => (SqliteConnectionManager::memory(), 1),
            Location::File(path) => (SqliteConnectionManager::file(path), options.max_pool_size.max(1)),
        };
        debug!(location = ?options.location, max_size, "opening sqlite pool");
        let mut builder = Pool::builder()
            .max_size(max_size)
            .connection_timeout(options.connection_timeout);
        if options.location == Location::Memory {
            // Recycling the only connection would drop the database with it.
            builder = builder.idle_timeout(None).max_lifetime(None);
        }
        let pool = builder.build(manager)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> CatalogResult<Self> { Self::open(&StoreOptions::default()) }

    /// Check out a connection from the pool.
    pub fn conn(&self) -> CatalogResult<Connection> { Ok(self.pool.get()?) }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod storage_tests;
