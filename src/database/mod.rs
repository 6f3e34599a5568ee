//! The tables backing tags and their associations.

use sea_query::Iden;
use sqlx::{Pool, Sqlite, Transaction};

pub mod connect;

pub const TAGGABLE_DB_FILE: &str = "taggable.sqlite";

/// the tags table
#[derive(Iden)]
pub enum Tags {
    Table,
    Id,
    Name,
    Slug,
    CreatedAt,
    UpdatedAt,
}

/// the join table between tags and anything taggable
#[derive(Iden)]
pub enum TaggableAssociations {
    Table,
    Id,
    TagId,
    TaggableType,
    TaggableId,
    CreatedAt,
    UpdatedAt,
}

/// A migrated connection pool to the tagging database.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Wraps a pool that already has the tagging tables.
    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Starts a transaction holding the write lock from its first statement.
    ///
    /// Under WAL, a deferred transaction that reads and then writes can't
    /// upgrade its lock while another writer is active. Anything that looks
    /// rows up before changing them has to start here instead of
    /// [`Pool::begin`].
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .inspect_err(|e| tracing::warn!("Couldn't start a write transaction. err: {e}"))
    }
}
