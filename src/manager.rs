//! Tagging and untagging a single record.

use sqlx::SqliteConnection;

use crate::{
    error::TagError,
    models::{
        association::Association,
        taggable::{Taggable, TaggableKey},
        tags::Tag,
    },
    parse::{self, TagInput},
    slug::slugify,
    store::TagStore,
};

/// Manages the tags on one record.
///
/// Get one from [`TagStore::tags_for`]. Every change runs in its own
/// transaction, so a failed call leaves the record's tags as they were.
#[derive(Debug)]
pub struct TagManager<'a, T: Taggable> {
    store: &'a TagStore,
    entity: &'a T,
}

impl<'a, T: Taggable> TagManager<'a, T> {
    pub(crate) fn new(store: &'a TagStore, entity: &'a T) -> Self {
        Self { store, entity }
    }

    fn key(&self) -> TaggableKey {
        self.entity.taggable_key()
    }

    /// Attaches the given tags to the record.
    ///
    /// Unknown tags are created, unless `T::ONLY_USE_EXISTING_TAGS` is set, in
    /// which case they cause [`TagError::TagNotFound`]. Either way, every name
    /// is resolved before anything is attached.
    ///
    /// Tags that are already attached are left alone.
    pub async fn tag(&self, tags: impl Into<TagInput>) -> Result<Vec<Tag>, TagError> {
        let names = self.validated_names(tags.into())?;

        let mut tx = self.store.database().begin_write().await?;
        let tags = self.attach_names(&mut tx, &names).await?;
        tx.commit().await?;

        Ok(tags)
    }

    /// Detaches the given tags from the record.
    ///
    /// Tags that don't exist (or aren't attached) are skipped. Returns the
    /// number of tags removed.
    pub async fn untag(&self, tags: impl Into<TagInput>) -> Result<u64, TagError> {
        let names = parse::parse(tags.into(), self.store.delimiters());
        let key = self.key();

        let mut tx = self.store.database().begin_write().await?;
        let mut removed = 0;
        for name in &names {
            match Tag::find_by_name(&mut tx, name).await? {
                Some(tag) => removed += Association::detach(&mut tx, tag.id, &key).await?,
                None => tracing::debug!("No tag named `{name}` to remove. Skipping."),
            }
        }
        tx.commit().await?;

        Ok(removed)
    }

    /// Replaces all of the record's tags with the given ones.
    ///
    /// Other connections only ever see the old tags or the new ones.
    pub async fn retag(&self, tags: impl Into<TagInput>) -> Result<Vec<Tag>, TagError> {
        let names = self.validated_names(tags.into())?;

        let mut tx = self.store.database().begin_write().await?;
        Association::detach_all(&mut tx, &self.key()).await?;
        let tags = self.attach_names(&mut tx, &names).await?;
        tx.commit().await?;

        Ok(tags)
    }

    /// Removes every tag from the record. Returns the number removed.
    pub async fn detag(&self) -> Result<u64, TagError> {
        let mut conn = self.store.database().pool().acquire().await?;
        Association::detach_all(&mut conn, &self.key()).await
    }

    /// The record's tags, in the order they were attached.
    pub async fn tags(&self) -> Result<Vec<Tag>, TagError> {
        let mut conn = self.store.database().pool().acquire().await?;
        Association::tags_of(&mut conn, &self.key()).await
    }

    /// The record's tag names.
    pub async fn tag_array(&self) -> Result<Vec<String>, TagError> {
        Ok(self.tags().await?.into_iter().map(|t| t.name).collect())
    }

    /// The record's tag slugs.
    pub async fn tag_array_normalized(&self) -> Result<Vec<String>, TagError> {
        Ok(self.tags().await?.into_iter().map(|t| t.slug).collect())
    }

    /// The record's tag names as one delimited string.
    pub async fn tag_list(&self) -> Result<String, TagError> {
        let names = self.tag_array().await?;
        Ok(parse::join(&names, self.store.config().glue()))
    }

    /// The record's tag slugs as one delimited string.
    pub async fn tag_list_normalized(&self) -> Result<String, TagError> {
        let slugs = self.tag_array_normalized().await?;
        Ok(parse::join(&slugs, self.store.config().glue()))
    }

    /// Parses tag input, refusing names that could never become a tag.
    fn validated_names(&self, input: TagInput) -> Result<Vec<String>, TagError> {
        let names = parse::parse(input, self.store.delimiters());

        if let Some(bad) = names.iter().find(|name| slugify(name).is_empty()) {
            tracing::warn!("Got a tag name without any letters or digits: `{bad}`");
            return Err(TagError::InvalidInput {
                input: bad.clone(),
                reason: String::from("tag names need at least one letter or digit"),
            });
        }

        Ok(names)
    }

    /// Resolves every name to a tag, then attaches them all.
    async fn attach_names(
        &self,
        conn: &mut SqliteConnection,
        names: &[String],
    ) -> Result<Vec<Tag>, TagError> {
        let key = self.key();

        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            let tag = if T::ONLY_USE_EXISTING_TAGS {
                Tag::find_by_name(conn, name)
                    .await?
                    .ok_or_else(|| TagError::TagNotFound { name: name.clone() })
                    .inspect_err(|_| {
                        tracing::warn!(
                            "Tag `{name}` doesn't exist, and `{}` only uses existing tags.",
                            key.taggable_type
                        )
                    })?
            } else {
                Tag::find_or_create(conn, name).await?
            };

            // `a, A` names one tag
            if !tags.iter().any(|t: &Tag| t.id == tag.id) {
                tags.push(tag);
            }
        }

        for tag in &tags {
            Association::attach(conn, tag.id, &key).await?;
        }

        Ok(tags)
    }
}
