use listing_core::{validate_order_by, PageParams, SortSpec};
use listing_db::{
    ComposeError, QueryComposer, RawSql, RawSqlComposer, SelectComposer, SortColumnMap,
    StatementComposer,
};
use sea_orm::sea_query::{Alias, PostgresQueryBuilder, Query};
use sea_orm::{DbBackend, EntityTrait, QueryTrait};

mod notes {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "notes")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        pub score: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

const NOTE: SortSpec = SortSpec::new("note", &["title", "score"]);

fn tokens(raw: &[&str]) -> Vec<listing_core::SortToken> {
    let raw: Vec<String> = raw.iter().map(|t| t.to_string()).collect();
    validate_order_by(&raw, &NOTE).unwrap()
}

fn note_columns() -> SortColumnMap<notes::Entity> {
    SortColumnMap::new()
        .insert("title", notes::Column::Title)
        .insert("score", notes::Column::Score)
}

#[test]
fn raw_strategy_emits_the_full_suffix() {
    let page = PageParams::new(Some(10), Some(0)).unwrap();
    let composed = RawSqlComposer
        .compose(
            RawSql::new("SELECT * FROM notes"),
            &tokens(&["+title", "-score"]),
            &page,
        )
        .unwrap();
    assert_eq!(
        composed.sql(),
        "SELECT * FROM notes \
         ORDER BY title ASC NULLS LAST, score DESC NULLS LAST \
         LIMIT 10 OFFSET 0"
    );
}

#[test]
fn statement_strategy_orders_with_nulls_last() {
    let mut base = Query::select();
    base.column(Alias::new("id")).from(Alias::new("notes"));

    let page = PageParams::new(Some(10), Some(0)).unwrap();
    let composed = StatementComposer
        .compose(base, &tokens(&["+title", "-score"]), &page)
        .unwrap();

    let sql = composed.to_string(PostgresQueryBuilder);
    assert!(
        sql.contains(r#"ORDER BY "title" ASC NULLS LAST, "score" DESC NULLS LAST"#),
        "unexpected SQL: {sql}"
    );
    assert!(sql.ends_with("LIMIT 10 OFFSET 0"), "unexpected SQL: {sql}");
}

#[test]
fn statement_strategy_paginates_without_ordering() {
    let mut base = Query::select();
    base.column(Alias::new("id")).from(Alias::new("notes"));

    let page = PageParams::new(Some(5), Some(20)).unwrap();
    let sql = StatementComposer
        .compose(base, &[], &page)
        .unwrap()
        .to_string(PostgresQueryBuilder);
    assert!(!sql.contains("ORDER BY"), "unexpected SQL: {sql}");
    assert!(sql.ends_with("LIMIT 5 OFFSET 20"), "unexpected SQL: {sql}");
}

#[test]
fn select_strategy_resolves_typed_columns() {
    let columns = note_columns();
    let page = PageParams::new(Some(10), Some(0)).unwrap();
    let composed = SelectComposer::new(&columns)
        .compose(notes::Entity::find(), &tokens(&["-score"]), &page)
        .unwrap();

    let sql = composed.into_query().to_string(PostgresQueryBuilder);
    assert!(
        sql.contains(r#"ORDER BY "notes"."score" DESC NULLS LAST"#),
        "unexpected SQL: {sql}"
    );
    assert!(sql.ends_with("LIMIT 10 OFFSET 0"), "unexpected SQL: {sql}");
}

#[test]
fn select_strategy_fails_fast_on_unmapped_field() {
    // Whitelist and column map disagree: "score" validated but never mapped.
    let columns = SortColumnMap::<notes::Entity>::new().insert("title", notes::Column::Title);
    let page = PageParams::default();
    let err = SelectComposer::new(&columns)
        .compose(notes::Entity::find(), &tokens(&["-score"]), &page)
        .unwrap_err();
    assert_eq!(err, ComposeError::UnmappedField("score".into()));
}

#[test]
fn hostile_tokens_never_reach_a_composer() {
    let hostile = [
        "+title; DROP TABLE notes",
        "-title--",
        "+title,score",
        "  +title",
        "+score OR 1=1",
        "\"+title\"",
    ];
    for raw in hostile {
        let res = validate_order_by(&[raw.to_string()], &NOTE);
        assert!(res.is_err(), "token {raw:?} must be rejected before composition");
    }
}

mod sqlite_roundtrip {
    use super::*;
    use listing_db::paginate_select;
    use sea_orm::{
        ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema,
        Set,
    };

    async fn seeded_db() -> DatabaseConnection {
        // One pooled connection, or every pool member gets its own ":memory:".
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        let schema = Schema::new(DbBackend::Sqlite);
        let create = schema.create_table_from_entity(notes::Entity);
        db.execute(db.get_database_backend().build(&create))
            .await
            .unwrap();

        for (title, score) in [
            ("alpha", Some(3)),
            ("bravo", None),
            ("charlie", Some(1)),
            ("delta", Some(2)),
            ("echo", None),
        ] {
            notes::ActiveModel {
                title: Set(title.to_string()),
                score: Set(score),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn nulls_sort_last_in_both_directions() {
        let db = seeded_db().await;
        let columns = note_columns();
        let page = PageParams::new(Some(50), Some(0)).unwrap();

        for raw in [&["+score"][..], &["-score"][..]] {
            let page_result = paginate_select(
                notes::Entity::find(),
                &db,
                &tokens(raw),
                &page,
                &columns,
                |m| m,
            )
            .await
            .unwrap();

            let scores: Vec<Option<i32>> =
                page_result.items.iter().map(|m| m.score).collect();
            assert_eq!(
                &scores[3..],
                &[None, None],
                "nulls must trail for {raw:?}, got {scores:?}"
            );
        }
    }

    #[tokio::test]
    async fn page_is_bounded_and_count_is_independent() {
        let db = seeded_db().await;
        let columns = note_columns();
        let page = PageParams::new(Some(2), Some(0)).unwrap();

        let result = paginate_select(
            notes::Entity::find(),
            &db,
            &tokens(&["+title"]),
            &page,
            &columns,
            |m| m.title,
        )
        .await
        .unwrap();

        assert_eq!(result.items, vec!["alpha".to_string(), "bravo".to_string()]);
        assert_eq!(result.items_count, 2);
        assert_eq!(result.total_count, 5);
        assert!(result.has_more());
    }

    #[tokio::test]
    async fn offset_walks_the_result_set() {
        let db = seeded_db().await;
        let columns = note_columns();
        let page = PageParams::new(Some(2), Some(4)).unwrap();

        let result = paginate_select(
            notes::Entity::find(),
            &db,
            &tokens(&["+title"]),
            &page,
            &columns,
            |m| m.title,
        )
        .await
        .unwrap();

        assert_eq!(result.items, vec!["echo".to_string()]);
        assert_eq!(result.items_count, 1);
        assert!(!result.has_more());
    }

    #[tokio::test]
    async fn raw_statement_runs_against_the_same_schema() {
        let db = seeded_db().await;
        let page = PageParams::new(Some(3), Some(0)).unwrap();

        let stmt = RawSql::new("SELECT id, title FROM notes WHERE score >= $1")
            .bind(1i32)
            .order_by(&tokens(&["-score"]))
            .paginate(&page)
            .into_statement(db.get_database_backend());

        let rows = db.query_all(stmt).await.unwrap();
        let titles: Vec<String> = rows
            .iter()
            .map(|r| r.try_get::<String>("", "title").unwrap())
            .collect();
        assert_eq!(titles, vec!["alpha", "delta", "charlie"]);
    }
}
