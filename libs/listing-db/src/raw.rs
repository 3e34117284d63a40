use sea_orm::{DbBackend, Statement, Value};

use listing_core::{PageParams, SortToken};

/// SQL text plus bound values — the query representation of the raw-SQL
/// repositories.
///
/// Ordering identifiers are appended as literal text, which is safe only
/// because every [`SortToken`] field has already passed the whitelist; this
/// type must never see a field name taken from unvalidated input. Limit and
/// offset are range-checked integers and are rendered literally, the same
/// way the statement text renders them everywhere else.
#[derive(Debug, Clone)]
pub struct RawSql {
    sql: String,
    values: Vec<Value>,
}

impl RawSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            values: Vec::new(),
        }
    }

    /// Attach the next positional bind value (`$1`, `$2`, ...).
    pub fn bind<V: Into<Value>>(mut self, value: V) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Append `ORDER BY <field> <DIR> NULLS LAST, ...` for each token, in
    /// token order. No tokens, no clause.
    pub fn order_by(mut self, tokens: &[SortToken]) -> Self {
        for (i, token) in tokens.iter().enumerate() {
            self.sql
                .push_str(if i == 0 { " ORDER BY " } else { ", " });
            self.sql.push_str(&token.field);
            self.sql.push(' ');
            self.sql.push_str(token.dir.as_sql());
            self.sql.push_str(" NULLS LAST");
        }
        self
    }

    /// Append `LIMIT n OFFSET m`. Applied unconditionally, always last.
    pub fn paginate(mut self, page: &PageParams) -> Self {
        self.sql
            .push_str(&format!(" LIMIT {} OFFSET {}", page.limit(), page.offset()));
        self
    }

    pub fn into_statement(self, backend: DbBackend) -> Statement {
        Statement::from_sql_and_values(backend, self.sql, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::{validate_order_by, PageParams, SortSpec};

    const USER: SortSpec = SortSpec::new("user", &["name", "created_at", "last_updated_at"]);

    #[test]
    fn appends_order_and_pagination_clauses() {
        let tokens = validate_order_by(
            &["+name".to_string(), "-created_at".to_string()],
            &USER,
        )
        .unwrap();
        let page = PageParams::new(Some(10), Some(0)).unwrap();
        let q = RawSql::new("SELECT * FROM users")
            .order_by(&tokens)
            .paginate(&page);
        assert_eq!(
            q.sql(),
            "SELECT * FROM users \
             ORDER BY name ASC NULLS LAST, created_at DESC NULLS LAST \
             LIMIT 10 OFFSET 0"
        );
    }

    #[test]
    fn pagination_is_applied_even_without_ordering() {
        let page = PageParams::new(Some(5), Some(20)).unwrap();
        let q = RawSql::new("SELECT * FROM users").order_by(&[]).paginate(&page);
        assert_eq!(q.sql(), "SELECT * FROM users LIMIT 5 OFFSET 20");
    }

    #[test]
    fn bind_values_survive_composition() {
        let page = PageParams::default();
        let q = RawSql::new("SELECT * FROM documents WHERE user_id = $1")
            .bind("abc")
            .paginate(&page);
        let stmt = q.into_statement(DbBackend::Postgres);
        assert!(stmt.sql.ends_with("LIMIT 10 OFFSET 0"));
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(1));
    }
}
