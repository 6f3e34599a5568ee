//! Search utilities for finding records by their tags.

use sea_query::{ColumnRef, IntoColumnRef as _, SimpleExpr};

use crate::{database::TaggableAssociations, models::taggable::Taggable, slug::slugify};

pub mod query;

/// How a record's tags have to line up with the requested ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matching {
    /// The record has every requested tag. Extra tags are fine.
    ///
    /// Asking for a name that can't be a tag matches nothing, since no record
    /// can have it.
    All,
    /// The record has at least one requested tag.
    ///
    /// When nothing is requested, any tag at all will do. Names that can't be
    /// tags (like `"!!"`) still count as a request, and match nothing.
    Any,
}

/// A search for records of one type, based on their tags.
///
/// Turn it into a `WHERE` clause for your own table with [`ToQuery`], or run
/// it directly with [`crate::store::TagStore::find_ids`].
#[derive(Clone, Debug)]
pub struct TagScope {
    taggable_type: &'static str,
    matching: Matching,
    slugs: Vec<String>,
    /// Whether any names were asked for, even ones that slugged to nothing.
    requested: bool,
    /// Whether some name slugged to nothing. No record has such a tag.
    unsluggable: bool,
    owner_id: ColumnRef,
}

impl TagScope {
    /// Records of type `T` that have all of these tags.
    pub fn with_all_tags<T: Taggable>(names: &[String]) -> Self {
        Self::new::<T>(Matching::All, names)
    }

    /// Records of type `T` that have any of these tags.
    pub fn with_any_tags<T: Taggable>(names: &[String]) -> Self {
        Self::new::<T>(Matching::Any, names)
    }

    fn new<T: Taggable>(matching: Matching, names: &[String]) -> Self {
        // names that can't be tags can't match anything, but they still count
        // as asking for something
        let mut slugs = names.iter().map(|name| slugify(name)).collect::<Vec<_>>();
        let before = slugs.len();
        slugs.retain(|slug| !slug.is_empty());
        let unsluggable = slugs.len() < before;
        slugs.sort();
        slugs.dedup();

        Self {
            taggable_type: T::taggable_type(),
            matching,
            slugs,
            requested: !names.is_empty(),
            unsluggable,
            owner_id: (TaggableAssociations::Table, TaggableAssociations::TaggableId)
                .into_column_ref(),
        }
    }

    /// Compares against this column when turned into a query.
    ///
    /// It should hold the records' [`Taggable::taggable_id`]. By default, it's
    /// the association table's own `taggable_id`.
    pub fn on(mut self, owner_id: impl sea_query::IntoColumnRef) -> Self {
        self.owner_id = owner_id.into_column_ref();
        self
    }

    pub fn taggable_type(&self) -> &'static str {
        self.taggable_type
    }

    pub fn matching(&self) -> Matching {
        self.matching
    }

    /// The distinct, sorted slugs being searched for.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }
}

/// A search must become a query to be used.
pub trait ToQuery {
    /// Converts the search into a condition for use in querying the database.
    fn to_query(self) -> SimpleExpr;
}
