// src/store/mod.rs

//! Document-store access.
//!
//! Everything the service persists goes through [`DocumentStore`]: schemaless
//! JSON documents grouped into named collections and addressed by id. The
//! typed [`Repository`] sits on top and converts documents to and from the
//! records in `crate::models`.

pub mod memory;
pub mod postgres;
pub mod repository;
pub mod timestamp;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use repository::{Entity, Repository};

/// Raw document body, keyed by top-level field name.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Document {0} is not a JSON object")]
    NotAnObject(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// Equality filters plus an optional ordering on a top-level field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Document,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(field.to_string(), value.into());
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn matches(&self, data: &Document) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| data.get(field) == Some(expected))
    }
}

/// Read/write primitives offered by the backing document database.
///
/// `update` is a shallow merge: top-level fields present in the patch replace
/// the stored ones, everything else is left untouched. There is no versioning,
/// so concurrent writers resolve as last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>>;

    async fn create(&self, collection: &str, data: Document) -> StoreResult<String>;

    async fn update(&self, collection: &str, id: &str, patch: Document) -> StoreResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;

    fn backend(&self) -> &'static str;
}

/// Ordering used when sorting documents in memory. Mirrors how JSONB
/// compares mixed values: null < bool < number < string, with missing fields
/// sorted first. Money is stored as decimal strings, so two strings that both
/// parse as `Decimal` compare numerically.
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or_default();
                let y = y.as_f64().unwrap_or_default();
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => {
                match (Decimal::from_str(x), Decimal::from_str(y)) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                }
            }
            _ => rank(a).cmp(&rank(b)),
        },
    }
}
