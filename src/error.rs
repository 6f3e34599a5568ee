use core::error::Error;
use pisserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("No tag matching `{name}` was found in the list of tags.")]
    TagNotFound { name: String },

    #[error("The tag input `{input}` is invalid: {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Another tag already uses the slug `{slug}`.")]
    DuplicateSlug { slug: String },

    #[error("The database has encountered an error. See: `{_0}`")]
    DatabaseError(#[from] DatabaseError),

    #[error("The tagging config couldn't be used. See: `{_0}`")]
    ConfigError(#[from] ConfigError),
}

impl From<sqlx::Error> for TagError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(DatabaseError::QueryFailed(value))
    }
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to the database. See: {_0}")]
    ConnectionError(String),

    #[error("Couldn't create the database folder at `{path}`. See: {err}")]
    FolderCreation { path: String, err: std::io::Error },

    #[error("Failed to complete database query. See: {_0}")]
    QueryFailed(#[from] sqlx::Error),

    #[error("Database connection succeeded, but migrating it failed. See: {_0}")]
    MigrationFailed(#[from] sqlx::migrate::MigrateError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] tokio::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),

    /// there must be at least one character to split tag lists on
    #[error("The config didn't list any tag delimiters.")]
    NoDelimiters,
}
