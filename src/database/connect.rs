//! Helps to connect to the database.

use core::time::Duration;

use camino::Utf8Path;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::DatabaseError;

use super::{Database, TAGGABLE_DB_FILE};

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

impl Database {
    /// Opens (or creates) the tagging database inside `folder`, then runs
    /// migrations on it.
    ///
    /// Migrations are tracked, so connecting to an existing database is fine.
    #[tracing::instrument]
    pub async fn connect(folder: &Utf8Path) -> Result<Self, DatabaseError> {
        tokio::fs::create_dir_all(folder)
            .await
            .map_err(|err| DatabaseError::FolderCreation {
                path: folder.to_string(),
                err,
            })?;

        let options = SqliteConnectOptions::new()
            .filename(folder.join(TAGGABLE_DB_FILE))
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .inspect_err(|e| tracing::error!("Failed to connect to the tagging database. err: {e}"))
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        let db = Self::from_pool(pool);
        db.migrate().await?;

        tracing::debug!("Connected to tagging database in `{folder}`.");
        Ok(db)
    }

    /// Brings the schema up to date.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Database connection succeeded, but migrating the database failed! err: {e}"
                )
            })?;

        Ok(())
    }
}
