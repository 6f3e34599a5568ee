//! Represents tags in all their glory.

use core::fmt;

use chrono::{DateTime, Utc};
use sea_query::{Expr, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder as _;
use sqlx::SqliteConnection;

use crate::{database::Tags, error::TagError, slug::slugify};

pub type TagIdent = i64;

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::FromRow,
)]
pub struct Tag {
    /// Assigned by the database when the tag is first stored.
    pub id: TagIdent,
    /// What users see. Always trimmed.
    pub name: String,
    /// The tag's identity. Two names with the same slug are the same tag.
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Tag {
    /// Finds the tag whose slug matches this name's slug.
    #[tracing::instrument(skip(conn))]
    pub async fn find_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<Tag>, TagError> {
        let slug = slugify(name);
        if slug.is_empty() {
            tracing::debug!("Name has an empty slug, so no tag can match it.");
            return Ok(None);
        }

        Self::find_by_slug(conn, &slug).await
    }

    /// Finds the tag with exactly this slug.
    pub(crate) async fn find_by_slug(
        conn: &mut SqliteConnection,
        slug: &str,
    ) -> Result<Option<Tag>, TagError> {
        let (select, values) = Query::select()
            .columns(all_columns())
            .from(Tags::Table)
            .and_where(Expr::col(Tags::Slug).eq(slug))
            .build_sqlx(SqliteQueryBuilder);

        let tag = sqlx::query_as_with::<_, Tag, _>(&select, values)
            .fetch_optional(&mut *conn)
            .await
            .inspect_err(|e| tracing::warn!("Failed to look up tag by slug `{slug}`. err: {e}"))?;

        Ok(tag)
    }

    /// Grabs the tag with a matching slug, storing a new one if there isn't
    /// any.
    ///
    /// The insert is a no-op when the slug is already taken, so callers racing
    /// on the same name all end up with the same row.
    #[tracing::instrument(skip(conn))]
    pub async fn find_or_create(conn: &mut SqliteConnection, name: &str) -> Result<Tag, TagError> {
        let name = name.trim();
        let slug = checked_slug(name)?;

        let now = Utc::now();
        let (insert, values) = Query::insert()
            .into_table(Tags::Table)
            .columns([Tags::Name, Tags::Slug, Tags::CreatedAt, Tags::UpdatedAt])
            .values_panic([name.into(), slug.clone().into(), now.into(), now.into()])
            .on_conflict(OnConflict::column(Tags::Slug).do_nothing().to_owned())
            .build_sqlx(SqliteQueryBuilder);

        let inserted = sqlx::query_with(&insert, values)
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to insert tag `{name}`. err: {e}"))?
            .rows_affected();

        if inserted > 0 {
            tracing::debug!("Created new tag with slug `{slug}`.");
        }

        // the row must exist now, whoever wrote it
        Self::find_by_slug(conn, &slug)
            .await?
            .ok_or_else(|| TagError::TagNotFound {
                name: name.to_string(),
            })
    }

    /// Gives this tag a new display name, re-deriving its slug.
    ///
    /// Fails if a different tag already owns the new slug.
    #[tracing::instrument(skip(conn))]
    pub async fn rename(&mut self, conn: &mut SqliteConnection, name: &str) -> Result<(), TagError> {
        let name = name.trim();
        let slug = checked_slug(name)?;

        if slug != self.slug {
            if let Some(other) = Self::find_by_slug(conn, &slug).await? {
                if other.id != self.id {
                    tracing::warn!("Can't rename tag `{}`: slug `{slug}` is taken.", self.name);
                    return Err(TagError::DuplicateSlug { slug });
                }
            }
        }

        let now = Utc::now();
        let (update, values) = Query::update()
            .table(Tags::Table)
            .values([
                (Tags::Name, name.into()),
                (Tags::Slug, slug.clone().into()),
                (Tags::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Tags::Id).eq(self.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&update, values)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                // someone else claimed the slug between our check and the write
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    TagError::DuplicateSlug { slug: slug.clone() }
                }
                other => other.into(),
            })?;

        self.name = name.to_string();
        self.slug = slug;
        self.updated_at = now;
        Ok(())
    }

    /// Every stored tag, ordered by slug.
    pub async fn all(conn: &mut SqliteConnection) -> Result<Vec<Tag>, TagError> {
        let (select, values) = Query::select()
            .columns(all_columns())
            .from(Tags::Table)
            .order_by(Tags::Slug, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Tag, _>(&select, values)
            .fetch_all(&mut *conn)
            .await?)
    }
}

/// Every column of the tags table, qualified so joins stay unambiguous.
pub(crate) fn all_columns() -> [(Tags, Tags); 5] {
    [
        (Tags::Table, Tags::Id),
        (Tags::Table, Tags::Name),
        (Tags::Table, Tags::Slug),
        (Tags::Table, Tags::CreatedAt),
        (Tags::Table, Tags::UpdatedAt),
    ]
}

/// Slugs a name that's about to be stored. Empty slugs can't be stored.
fn checked_slug(name: &str) -> Result<String, TagError> {
    let slug = slugify(name);

    if slug.is_empty() {
        tracing::warn!("Refusing to store tag `{name}` with an empty slug.");
        return Err(TagError::InvalidInput {
            input: name.to_string(),
            reason: String::from("tag names need at least one letter or digit"),
        });
    }

    Ok(slug)
}
