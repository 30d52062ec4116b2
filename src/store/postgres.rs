// src/store/postgres.rs

use super::{
    Document, DocumentStore, Query, SortDirection, StoreError, StoreResult, StoredDocument,
};
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Document>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: row.id,
            data: row.data.0,
        }
    }
}

/// Matches the plain decimal strings `rust_decimal` serializes money as.
const NUMERIC_PATTERN: &str = r"^-?[0-9]+(\.[0-9]+)?$";

/// Sort on the field bound as `$3`. Decimal strings sort by value, anything
/// else falls back to JSONB ordering.
fn order_clause(direction: SortDirection) -> String {
    let dir = direction.as_sql();
    format!(
        " ORDER BY CASE WHEN data ->> $3 ~ '{NUMERIC_PATTERN}' \
         THEN (data ->> $3)::numeric END {dir}, data -> $3 {dir}, created_at ASC"
    )
}

/// Documents stored as JSONB rows in a single `documents` table, keyed by
/// `(collection, id)`.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and apply the embedded migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database connected and migrations applied ✓");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        // Equality filters map onto JSONB containment, so an empty filter
        // object matches every row.
        let mut sql =
            String::from("SELECT id, data FROM documents WHERE collection = $1 AND data @> $2");
        match &query.order_by {
            Some(order) => sql.push_str(&order_clause(order.direction)),
            None => sql.push_str(" ORDER BY created_at ASC"),
        }

        let mut q = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(Json(&query.filters));
        if let Some(order) = &query.order_by {
            q = q.bind(&order.field);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredDocument::from))
    }

    async fn create(&self, collection: &str, data: Document) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"INSERT INTO documents (collection, id, data, created_at, updated_at)
               VALUES ($1, $2, $3, NOW(), NOW())"#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(&data))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> StoreResult<()> {
        let result = sqlx::query(
            r#"UPDATE documents SET data = data || $3, updated_at = NOW()
               WHERE collection = $1 AND id = $2"#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&patch))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_clause_casts_decimal_strings() {
        let clause = order_clause(SortDirection::Desc);
        assert!(clause.contains("(data ->> $3)::numeric END DESC"));
        assert!(clause.contains("data -> $3 DESC"));
        assert!(clause.ends_with("created_at ASC"));
    }
}
