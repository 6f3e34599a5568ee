//! Anything that can wear tags.

use uuid::Uuid;

/// A record type that can be tagged.
///
/// Tags are attached through a polymorphic reference: the type's
/// discriminator plus the record's own id. Nothing else about the record is
/// needed.
///
/// ```rust,ignore
/// struct Album {
///     id: Uuid,
///     title: String,
/// }
///
/// impl Taggable for Album {
///     fn taggable_type() -> &'static str {
///         "album"
///     }
///
///     fn taggable_id(&self) -> Uuid {
///         self.id
///     }
/// }
/// ```
pub trait Taggable {
    /// When `true`, records of this type may only be tagged with tags that
    /// already exist.
    const ONLY_USE_EXISTING_TAGS: bool = false;

    /// A stable name for this record type.
    ///
    /// It's stored in every association, so changing it orphans existing tags.
    fn taggable_type() -> &'static str;

    /// The id of this specific record.
    fn taggable_id(&self) -> Uuid;

    /// The full polymorphic reference to this record.
    fn taggable_key(&self) -> TaggableKey {
        TaggableKey {
            taggable_type: Self::taggable_type(),
            taggable_id: self.taggable_id(),
        }
    }
}

/// Points at one tagged record, whatever its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaggableKey {
    pub taggable_type: &'static str,
    pub taggable_id: Uuid,
}
