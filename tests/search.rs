//! Tests searching records by their tags.

mod common;

#[cfg(test)]
mod tests {
    use sea_query::{Asterisk, Cond, Iden, SqliteQueryBuilder};
    use sea_query_binder::SqlxBinder as _;
    use uuid::Uuid;

    use taggable::{search::ToQuery as _, store::TagStore};

    use crate::common::{setup, Post, Video};

    /// the host app's own table of posts
    #[derive(Iden)]
    enum Posts {
        Table,
        Id,
        Title,
    }

    #[derive(Debug, sqlx::FromRow)]
    struct PostRow {
        id: Uuid,
        title: String,
    }

    /// Tags a handful of posts:
    ///
    /// 1: {a, b, c}
    /// 2: {a}
    /// 3: {b, c}
    /// 4: (none)
    async fn tag_posts(store: &TagStore) {
        store.tags_for(&Post::new(1)).tag("a,b,c").await.unwrap();
        store.tags_for(&Post::new(2)).tag("A").await.unwrap();
        store.tags_for(&Post::new(3)).tag(["B", "c"]).await.unwrap();

        // tagged then cleared, so it's known but has nothing
        store.tags_for(&Post::new(4)).tag("z").await.unwrap();
        store.tags_for(&Post::new(4)).detag().await.unwrap();
    }

    #[tokio::test]
    async fn with_all_tags() {
        let s = setup().await;
        tag_posts(&s.store).await;

        let ids = s.store.find_ids(&s.store.with_all_tags::<Post>("a, b")).await.unwrap();
        assert_eq!(ids, [Uuid::from_u128(1)], "{{a,b,c}} yes, {{a}} no");

        // duplicates and casing don't change the answer
        let ids = s
            .store
            .find_ids(&s.store.with_all_tags::<Post>(["A", "a", "b"]))
            .await
            .unwrap();
        assert_eq!(ids, [Uuid::from_u128(1)]);

        let ids = s.store.find_ids(&s.store.with_all_tags::<Post>("c")).await.unwrap();
        assert_eq!(ids, [Uuid::from_u128(1), Uuid::from_u128(3)]);

        // nobody has a tag that doesn't exist
        let ids = s
            .store
            .find_ids(&s.store.with_all_tags::<Post>("a,nope"))
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn with_any_tags() {
        let s = setup().await;
        tag_posts(&s.store).await;

        let ids = s.store.find_ids(&s.store.with_any_tags::<Post>("a")).await.unwrap();
        assert_eq!(ids, [Uuid::from_u128(1), Uuid::from_u128(2)]);

        let ids = s
            .store
            .find_ids(&s.store.with_any_tags::<Post>("a, c, nope"))
            .await
            .unwrap();
        assert_eq!(
            ids,
            [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );

        let ids = s.store.find_ids(&s.store.with_any_tags::<Post>("nope")).await.unwrap();
        assert!(ids.is_empty());
    }

    /// Any of nothing means "has at least one tag".
    #[tokio::test]
    async fn with_any_of_no_tags() {
        let s = setup().await;
        tag_posts(&s.store).await;

        let ids = s
            .store
            .find_ids(&s.store.with_any_tags::<Post>(Vec::<String>::new()))
            .await
            .unwrap();
        assert_eq!(
            ids,
            [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)],
            "post 4 has no tags"
        );
    }

    /// Names like `!!` can't be tags, so asking for them finds nobody.
    #[tokio::test]
    async fn unsluggable_names_find_nothing() {
        let s = setup().await;
        tag_posts(&s.store).await;

        let ids = s.store.find_ids(&s.store.with_any_tags::<Post>("!!")).await.unwrap();
        assert!(ids.is_empty(), "got: {ids:?}");

        let ids = s
            .store
            .find_ids(&s.store.with_all_tags::<Post>(["??"]))
            .await
            .unwrap();
        assert!(ids.is_empty(), "got: {ids:?}");

        // nobody has `??`, so nobody has both
        let ids = s
            .store
            .find_ids(&s.store.with_all_tags::<Post>(["a", "??"]))
            .await
            .unwrap();
        assert!(ids.is_empty(), "got: {ids:?}");

        // but any of them is just `a`
        let ids = s
            .store
            .find_ids(&s.store.with_any_tags::<Post>(["a", "??"]))
            .await
            .unwrap();
        assert_eq!(ids, [Uuid::from_u128(1), Uuid::from_u128(2)]);
    }

    #[tokio::test]
    async fn searches_stay_within_a_type() {
        let s = setup().await;
        tag_posts(&s.store).await;

        s.store.find_or_create("video-only").await.unwrap();
        s.store.tags_for(&Video::new(1)).tag("a, video-only").await.unwrap();

        let ids = s.store.find_ids(&s.store.with_all_tags::<Video>("a")).await.unwrap();
        assert_eq!(ids, [Uuid::from_u128(1)]);

        let ids = s
            .store
            .find_ids(&s.store.with_any_tags::<Post>("video-only"))
            .await
            .unwrap();
        assert!(ids.is_empty(), "no post uses the video tag");
    }

    #[tokio::test]
    async fn all_tags_for_type() {
        let s = setup().await;
        tag_posts(&s.store).await;
        s.store.find_or_create("Video Only").await.unwrap();
        s.store.tags_for(&Video::new(1)).tag("Video Only").await.unwrap();

        // sorted, distinct, and `z` is gone since nobody uses it anymore
        assert_eq!(
            s.store.all_tags_for_type::<Post>().await.unwrap(),
            ["a", "b", "c"]
        );
        assert_eq!(
            s.store.all_tags_for_type::<Video>().await.unwrap(),
            ["video-only"]
        );
        assert_eq!(s.store.tags_list_for_type::<Post>().await.unwrap(), "a,b,c");
    }

    /// Scopes work as a `WHERE` clause on the host's own tables.
    #[tokio::test]
    async fn scope_filters_host_table() {
        let s = setup().await;
        tag_posts(&s.store).await;

        let mut conn = s.store.database().pool().acquire().await.unwrap();

        sqlx::query("CREATE TABLE posts (id BLOB PRIMARY KEY NOT NULL, title TEXT NOT NULL)")
            .execute(&mut *conn)
            .await
            .unwrap();

        for (n, title) in [(1, "first"), (2, "second"), (3, "third"), (4, "fourth")] {
            sqlx::query("INSERT INTO posts (id, title) VALUES ($1, $2)")
                .bind(Uuid::from_u128(n))
                .bind(title)
                .execute(&mut *conn)
                .await
                .unwrap();
        }

        let scope = s.store.with_all_tags::<Post>("b, c").on((Posts::Table, Posts::Id));

        let (select, values) = sea_query::Query::select()
            .column(Asterisk)
            .from(Posts::Table)
            .cond_where(Cond::all().add(scope.to_query()))
            .order_by(Posts::Title, sea_query::Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let res = sqlx::query_as_with::<_, PostRow, _>(&select, values)
            .fetch_all(&mut *conn)
            .await
            .unwrap();

        let titles = res.iter().map(|p| p.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, ["first", "third"]);
        assert_eq!(res.first().unwrap().id, Uuid::from_u128(1));

        // with no tags asked for, everything matches. even untagged posts
        let scope = s
            .store
            .with_all_tags::<Post>(Vec::<String>::new())
            .on((Posts::Table, Posts::Id));
        let (select, values) = sea_query::Query::select()
            .column(Asterisk)
            .from(Posts::Table)
            .cond_where(Cond::all().add(scope.to_query()))
            .build_sqlx(SqliteQueryBuilder);

        let res = sqlx::query_as_with::<_, PostRow, _>(&select, values)
            .fetch_all(&mut *conn)
            .await
            .unwrap();
        assert_eq!(res.len(), 4);
    }
}
