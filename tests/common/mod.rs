//! The parent of the other tests.
//!
//! Mostly to import the setup stuff below.

use std::str::FromStr as _;

use camino::Utf8PathBuf;
use taggable::{config::Config, database::Database, models::taggable::Taggable, store::TagStore};
use temp_dir::TempDir;
use tracing_subscriber::{filter, layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer};
use uuid::Uuid;

/// A fresh store, plus the folder its database lives in.
///
/// Keep this around for the whole test! Dropping it deletes the database.
#[allow(dead_code, reason = "it's used in the other tests")]
pub struct Setup {
    pub store: TagStore,
    pub dir: TempDir,
}

/// call this at the top of any new test func! :)
#[allow(dead_code, reason = "it's used in the other tests")]
pub async fn setup() -> Setup {
    setup_with(Config::default()).await
}

/// Like [`setup`], but with a custom config.
#[allow(dead_code, reason = "it's used in the other tests")]
pub async fn setup_with(config: Config) -> Setup {
    // start logging. other tests in this binary may have done it already
    _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_filter(filter::EnvFilter::from_str("DEBUG,sqlx=INFO").unwrap()),
        )
        .try_init();

    let dir = TempDir::new().expect("create db temp dir");
    let folder = Utf8PathBuf::try_from(dir.child("_taggable_db")).unwrap();

    let db = Database::connect(&folder).await.expect("connect to db");

    Setup {
        store: TagStore::new(db, config),
        dir,
    }
}

/// Something that can be tagged with anything.
#[derive(Clone, Debug)]
#[allow(dead_code, reason = "it's used in the other tests")]
pub struct Post {
    pub id: Uuid,
}

impl Post {
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn new(n: u128) -> Self {
        Self {
            id: Uuid::from_u128(n),
        }
    }
}

impl Taggable for Post {
    fn taggable_type() -> &'static str {
        "post"
    }

    fn taggable_id(&self) -> Uuid {
        self.id
    }
}

/// Something that can only use tags that already exist.
#[derive(Clone, Debug)]
#[allow(dead_code, reason = "it's used in the other tests")]
pub struct Video {
    pub id: Uuid,
}

impl Video {
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn new(n: u128) -> Self {
        Self {
            id: Uuid::from_u128(n),
        }
    }
}

impl Taggable for Video {
    const ONLY_USE_EXISTING_TAGS: bool = true;

    fn taggable_type() -> &'static str {
        "video"
    }

    fn taggable_id(&self) -> Uuid {
        self.id
    }
}
