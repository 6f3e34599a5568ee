use sea_query::*;
use sea_query_binder::SqlxBinder as _;
use uuid::Uuid;

use crate::{
    database::{TaggableAssociations, Tags},
    error::TagError,
    models::taggable::Taggable,
    parse::{self, TagInput},
    store::TagStore,
};

use super::{Matching, TagScope, ToQuery};

impl TagScope {
    /// The ids of records of this type that satisfy the search.
    fn owners(&self) -> SelectStatement {
        let mut select = Query::select();
        select
            .column((TaggableAssociations::Table, TaggableAssociations::TaggableId))
            .from(TaggableAssociations::Table)
            .and_where(
                Expr::col((TaggableAssociations::Table, TaggableAssociations::TaggableType))
                    .eq(self.taggable_type),
            );

        if !self.slugs.is_empty() {
            select
                .inner_join(
                    Tags::Table,
                    Expr::col((Tags::Table, Tags::Id))
                        .equals((TaggableAssociations::Table, TaggableAssociations::TagId)),
                )
                .and_where(Expr::col((Tags::Table, Tags::Slug)).is_in(self.slugs.clone()));
        }

        match self.matching {
            // every requested slug has to show up for the record
            Matching::All => {
                select
                    .group_by_col((TaggableAssociations::Table, TaggableAssociations::TaggableId))
                    .and_having(
                        Expr::expr(Func::count_distinct(Expr::col((Tags::Table, Tags::Slug))))
                            .eq(self.slugs.len() as i64),
                    );
            }
            Matching::Any => {
                select.distinct();
            }
        }

        select
    }
}

impl ToQuery for TagScope {
    #[tracing::instrument]
    fn to_query(self) -> SimpleExpr {
        let impossible = match self.matching {
            Matching::All => self.unsluggable,
            Matching::Any => self.requested && self.slugs.is_empty(),
        };
        if impossible {
            tracing::debug!("Asked for names that can't be tags. Nothing matches.");
            return Expr::cust("FALSE");
        }

        if self.matching == Matching::All && self.slugs.is_empty() {
            tracing::debug!("Asked for all of zero tags. Everything matches.");
            return Expr::cust("TRUE");
        }

        tracing::debug!(
            "Looking for `{}` records with {:?} of {} tag(s).",
            self.taggable_type,
            self.matching,
            self.slugs.len()
        );
        Expr::col(self.owner_id.clone()).in_subquery(self.owners())
    }
}

impl TagStore {
    /// A search for `T`s that have all of the given tags.
    pub fn with_all_tags<T: Taggable>(&self, tags: impl Into<TagInput>) -> TagScope {
        TagScope::with_all_tags::<T>(&parse::parse(tags.into(), self.delimiters()))
    }

    /// A search for `T`s that have any of the given tags.
    ///
    /// With no tags given, this finds `T`s that have any tag at all.
    pub fn with_any_tags<T: Taggable>(&self, tags: impl Into<TagInput>) -> TagScope {
        TagScope::with_any_tags::<T>(&parse::parse(tags.into(), self.delimiters()))
    }

    /// Runs a search against the association table, returning the ids of every
    /// matching record.
    ///
    /// Only records that have (or had) at least one tag are known here, so an
    /// empty [`Matching::All`] search returns every tagged record.
    pub async fn find_ids(&self, scope: &TagScope) -> Result<Vec<Uuid>, TagError> {
        let condition = scope
            .clone()
            .on((TaggableAssociations::Table, TaggableAssociations::TaggableId))
            .to_query();

        let (select, values) = Query::select()
            .distinct()
            .column((TaggableAssociations::Table, TaggableAssociations::TaggableId))
            .from(TaggableAssociations::Table)
            .and_where(
                Expr::col((TaggableAssociations::Table, TaggableAssociations::TaggableType))
                    .eq(scope.taggable_type()),
            )
            .and_where(condition)
            .order_by(
                (TaggableAssociations::Table, TaggableAssociations::TaggableId),
                Order::Asc,
            )
            .build_sqlx(SqliteQueryBuilder);

        let mut conn = self.database().pool().acquire().await?;
        let ids = sqlx::query_scalar_with::<_, Uuid, _>(&select, values)
            .fetch_all(&mut *conn)
            .await
            .inspect_err(|e| tracing::warn!("Tag search failed. err: {e}"))?;

        tracing::debug!("Tag search found {} record(s).", ids.len());
        Ok(ids)
    }

    /// Every slug used on any `T`, sorted and without duplicates.
    pub async fn all_tags_for_type<T: Taggable>(&self) -> Result<Vec<String>, TagError> {
        let (select, values) = Query::select()
            .distinct()
            .column((Tags::Table, Tags::Slug))
            .from(TaggableAssociations::Table)
            .inner_join(
                Tags::Table,
                Expr::col((Tags::Table, Tags::Id))
                    .equals((TaggableAssociations::Table, TaggableAssociations::TagId)),
            )
            .and_where(
                Expr::col((TaggableAssociations::Table, TaggableAssociations::TaggableType))
                    .eq(T::taggable_type()),
            )
            .order_by((Tags::Table, Tags::Slug), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let mut conn = self.database().pool().acquire().await?;
        Ok(sqlx::query_scalar_with::<_, String, _>(&select, values)
            .fetch_all(&mut *conn)
            .await?)
    }

    /// Like [`TagStore::all_tags_for_type`], but joined into one string.
    pub async fn tags_list_for_type<T: Taggable>(&self) -> Result<String, TagError> {
        let slugs = self.all_tags_for_type::<T>().await?;
        Ok(parse::join(&slugs, self.config().glue()))
    }
}
