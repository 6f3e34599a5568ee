//! The front door: one handle for the tag registry, managers, and searches.

use crate::{
    config::Config,
    database::Database,
    error::TagError,
    manager::TagManager,
    models::{taggable::Taggable, tags::Tag},
    parse::TagInput,
};

/// Tags stored in a database, read and written according to a [`Config`].
#[derive(Clone, Debug)]
pub struct TagStore {
    db: Database,
    config: Config,
}

impl TagStore {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn delimiters(&self) -> &str {
        &self.config.delimiters
    }

    /// Manages the tags on the given record.
    pub fn tags_for<'a, T: Taggable>(&'a self, entity: &'a T) -> TagManager<'a, T> {
        TagManager::new(self, entity)
    }

    /// Finds the tag with the same slug as `name`, if any.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, TagError> {
        let mut conn = self.db.pool().acquire().await?;
        Tag::find_by_name(&mut conn, name).await
    }

    /// Finds the tag with the same slug as `name`, creating it if needed.
    pub async fn find_or_create(&self, name: &str) -> Result<Tag, TagError> {
        let mut conn = self.db.pool().acquire().await?;
        Tag::find_or_create(&mut conn, name).await
    }

    /// Renames a tag, updating its slug to match.
    pub async fn rename(&self, tag: &mut Tag, name: &str) -> Result<(), TagError> {
        let mut conn = self.db.pool().acquire().await?;
        tag.rename(&mut conn, name).await
    }

    /// Every tag in the store, ordered by slug.
    pub async fn all_tags(&self) -> Result<Vec<Tag>, TagError> {
        let mut conn = self.db.pool().acquire().await?;
        Tag::all(&mut conn).await
    }

    /// Resolves a batch of names to tags without attaching them anywhere.
    ///
    /// Handy for seeding the tags that strict record types are allowed to use.
    pub async fn find_or_create_all(&self, tags: impl Into<TagInput>) -> Result<Vec<Tag>, TagError> {
        let names = crate::parse::parse(tags.into(), self.delimiters());

        let mut tx = self.db.begin_write().await?;
        let mut out = Vec::with_capacity(names.len());
        for name in &names {
            out.push(Tag::find_or_create(&mut tx, name).await?);
        }
        tx.commit().await?;

        Ok(out)
    }
}
