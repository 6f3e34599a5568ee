//! Links between tags and tagged records.

use chrono::{DateTime, Utc};
use sea_query::{Expr, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder as _;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::{
    database::{TaggableAssociations, Tags},
    error::TagError,
};

use super::{
    taggable::TaggableKey,
    tags::{all_columns, Tag, TagIdent},
};

/// One tag on one record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Association {
    pub id: i64,
    pub tag_id: TagIdent,
    pub taggable_type: String,
    pub taggable_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Association {
    /// Links the tag to the record, unless it's already linked.
    ///
    /// Returns whether a new link was made.
    #[tracing::instrument(skip(conn))]
    pub async fn attach(
        conn: &mut SqliteConnection,
        tag_id: TagIdent,
        key: &TaggableKey,
    ) -> Result<bool, TagError> {
        let now = Utc::now();
        let (insert, values) = Query::insert()
            .into_table(TaggableAssociations::Table)
            .columns([
                TaggableAssociations::TagId,
                TaggableAssociations::TaggableType,
                TaggableAssociations::TaggableId,
                TaggableAssociations::CreatedAt,
                TaggableAssociations::UpdatedAt,
            ])
            .values_panic([
                tag_id.into(),
                key.taggable_type.into(),
                key.taggable_id.into(),
                now.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::columns([
                    TaggableAssociations::TagId,
                    TaggableAssociations::TaggableType,
                    TaggableAssociations::TaggableId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .build_sqlx(SqliteQueryBuilder);

        let attached = sqlx::query_with(&insert, values)
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to attach tag. err: {e}"))?
            .rows_affected()
            > 0;

        if !attached {
            tracing::debug!("Tag was already attached. Skipping.");
        }

        Ok(attached)
    }

    /// Unlinks the tag from the record. Returns the number of links removed.
    #[tracing::instrument(skip(conn))]
    pub async fn detach(
        conn: &mut SqliteConnection,
        tag_id: TagIdent,
        key: &TaggableKey,
    ) -> Result<u64, TagError> {
        let (delete, values) = Query::delete()
            .from_table(TaggableAssociations::Table)
            .and_where(Expr::col(TaggableAssociations::TagId).eq(tag_id))
            .and_where(Expr::col(TaggableAssociations::TaggableType).eq(key.taggable_type))
            .and_where(Expr::col(TaggableAssociations::TaggableId).eq(key.taggable_id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_with(&delete, values)
            .execute(&mut *conn)
            .await?
            .rows_affected())
    }

    /// Unlinks every tag from the record.
    #[tracing::instrument(skip(conn))]
    pub async fn detach_all(conn: &mut SqliteConnection, key: &TaggableKey) -> Result<u64, TagError> {
        let (delete, values) = Query::delete()
            .from_table(TaggableAssociations::Table)
            .and_where(Expr::col(TaggableAssociations::TaggableType).eq(key.taggable_type))
            .and_where(Expr::col(TaggableAssociations::TaggableId).eq(key.taggable_id))
            .build_sqlx(SqliteQueryBuilder);

        let removed = sqlx::query_with(&delete, values)
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to clear tags. err: {e}"))?
            .rows_affected();

        tracing::debug!("Removed {removed} tag(s).");
        Ok(removed)
    }

    /// The tags on a record, in the order they were attached.
    pub async fn tags_of(conn: &mut SqliteConnection, key: &TaggableKey) -> Result<Vec<Tag>, TagError> {
        let (select, values) = Query::select()
            .columns(all_columns())
            .from(TaggableAssociations::Table)
            .inner_join(
                Tags::Table,
                Expr::col((Tags::Table, Tags::Id))
                    .equals((TaggableAssociations::Table, TaggableAssociations::TagId)),
            )
            .and_where(
                Expr::col((TaggableAssociations::Table, TaggableAssociations::TaggableType))
                    .eq(key.taggable_type),
            )
            .and_where(
                Expr::col((TaggableAssociations::Table, TaggableAssociations::TaggableId))
                    .eq(key.taggable_id),
            )
            .order_by(
                (TaggableAssociations::Table, TaggableAssociations::Id),
                Order::Asc,
            )
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Tag, _>(&select, values)
            .fetch_all(&mut *conn)
            .await?)
    }

    /// Every link a record has.
    pub async fn of(conn: &mut SqliteConnection, key: &TaggableKey) -> Result<Vec<Association>, TagError> {
        let (select, values) = Query::select()
            .columns([
                TaggableAssociations::Id,
                TaggableAssociations::TagId,
                TaggableAssociations::TaggableType,
                TaggableAssociations::TaggableId,
                TaggableAssociations::CreatedAt,
                TaggableAssociations::UpdatedAt,
            ])
            .from(TaggableAssociations::Table)
            .and_where(Expr::col(TaggableAssociations::TaggableType).eq(key.taggable_type))
            .and_where(Expr::col(TaggableAssociations::TaggableId).eq(key.taggable_id))
            .order_by(TaggableAssociations::Id, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Association, _>(&select, values)
            .fetch_all(&mut *conn)
            .await?)
    }
}
