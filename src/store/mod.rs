//! Persistence gateway: typed entity collections behind a request-scoped unit of work.
//!
//! A [`Gateway`] hands out [`Session`]s. Reads and writes go through the session;
//! writes become visible to other sessions only after [`Session::commit`]. A session
//! dropped without committing discards its pending changes.

mod memory;
mod postgres;

pub use memory::MemoryGateway;
pub use postgres::{ensure_database_exists, PgGateway};

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres};

pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Column { name, sql_type }
    }

    /// Text primary key column.
    pub const fn key(name: &'static str) -> Self {
        Column {
            name,
            sql_type: "TEXT PRIMARY KEY",
        }
    }
}

/// Table layout. The first column is the primary key.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    pub fn key(&self) -> &'static str {
        self.columns.first().map(|c| c.name).unwrap_or("id")
    }
}

/// A persisted entity with a string identifier.
pub trait Entity:
    Clone + Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    /// Human-readable name used in not-found messages.
    const LABEL: &'static str;
    const TABLE: Table;

    fn id(&self) -> &str;

    /// Bind every column value, in `TABLE.columns` order.
    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}

/// Request-scoped unit of work.
#[async_trait]
pub trait Session: Send {
    /// Every stored entity of a kind. No ordering is guaranteed.
    async fn all<E: Entity>(&mut self) -> Result<Vec<E>, StoreError>;

    async fn find<E: Entity>(&mut self, id: &str) -> Result<Option<E>, StoreError>;

    async fn insert<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError>;

    /// Replace the stored entity with the same id. `StoreError::Missing` if there is none.
    async fn replace<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError>;

    /// `StoreError::Missing` if there is nothing to remove.
    async fn remove<E: Entity>(&mut self, id: &str) -> Result<(), StoreError>;

    /// Publish pending changes. The session stays usable afterwards.
    async fn commit(&mut self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait Gateway: Clone + Send + Sync + 'static {
    type Session: Session;

    async fn begin(&self) -> Result<Self::Session, StoreError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
