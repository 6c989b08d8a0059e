//! SQLite store
//!
//! Local database holding the `THESAURI` table; the schema is created on
//! connect.

use super::{StoreError, ThesaurusStore};
use async_trait::async_trait;
use chait_common::db::init_database;
use chait_common::ThesaurusRecord;
use sqlx::SqlitePool;

pub struct SqliteStore {
    url: String,
    pool: Option<SqlitePool>,
}

impl SqliteStore {
    /// Store for `url` (e.g. `sqlite://thesauri.db`); call `connect` before use
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: None,
        }
    }

    pub fn pool(&self) -> Option<&SqlitePool> {
        self.pool.as_ref()
    }

    fn connected_pool(&self) -> Result<&SqlitePool, StoreError> {
        self.pool.as_ref().ok_or_else(StoreError::not_connected)
    }

    /// Load a stored record by puri
    pub async fn load(&self, puri: &str) -> Result<Option<ThesaurusRecord>, StoreError> {
        let record = sqlx::query_as::<_, ThesaurusRecord>(
            r#"
            SELECT puri, provenance, identifier,
                   "label_NL", "label_FR", "label_EN",
                   "scope_NL", "scope_FR", "scope_EN",
                   modified_at, "AAT", "Wikidata"
            FROM "THESAURI"
            WHERE puri = ?
            "#,
        )
        .bind(puri)
        .fetch_optional(self.connected_pool()?)
        .await?;

        Ok(record)
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "THESAURI""#)
            .fetch_one(self.connected_pool()?)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl ThesaurusStore for SqliteStore {
    fn is_connected(&self) -> bool {
        self.pool.as_ref().is_some_and(|pool| !pool.is_closed())
    }

    async fn connect(&mut self) -> Result<(), StoreError> {
        let pool = init_database(&self.url).await?;
        tracing::info!(url = %self.url, "Connected to SQLite store");
        self.pool = Some(pool);
        Ok(())
    }

    async fn find_existing(&self, puri: &str) -> Result<Option<String>, StoreError> {
        let existing: Option<String> =
            sqlx::query_scalar(r#"SELECT puri FROM "THESAURI" WHERE puri = ? LIMIT 1"#)
                .bind(puri)
                .fetch_optional(self.connected_pool()?)
                .await?;
        Ok(existing)
    }

    async fn upsert(&self, record: &ThesaurusRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO "THESAURI" (
                puri, provenance, identifier,
                "label_NL", "label_FR", "label_EN",
                "scope_NL", "scope_FR", "scope_EN",
                modified_at, "AAT", "Wikidata"
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(puri) DO UPDATE SET
                provenance = excluded.provenance,
                identifier = excluded.identifier,
                "label_NL" = excluded."label_NL",
                "label_FR" = excluded."label_FR",
                "label_EN" = excluded."label_EN",
                "scope_NL" = excluded."scope_NL",
                "scope_FR" = excluded."scope_FR",
                "scope_EN" = excluded."scope_EN",
                modified_at = excluded.modified_at,
                "AAT" = excluded."AAT",
                "Wikidata" = excluded."Wikidata"
            "#,
        )
        .bind(&record.puri)
        .bind(&record.provenance)
        .bind(&record.identifier)
        .bind(&record.label_nl)
        .bind(&record.label_fr)
        .bind(&record.label_en)
        .bind(&record.scope_nl)
        .bind(&record.scope_fr)
        .bind(&record.scope_en)
        .bind(&record.modified_at)
        .bind(&record.aat)
        .bind(&record.wikidata)
        .execute(self.connected_pool()?)
        .await?;

        Ok(())
    }
}
