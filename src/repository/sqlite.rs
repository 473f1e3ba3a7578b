//! SQLite entity store
//!
//! Embedded relational storage for currency rows on an sqlx pool.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use super::CurrencyRepository;
use crate::currency::{Currency, CurrencyDraft, SortKey};
use crate::error::{Result, ServiceError};

const SELECT_COLUMNS: &str = "id, title, iso_code, created_at, updated_at";

/// Connection pool tuning for the entity store.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// sqlx connection URL, e.g. `sqlite://currencies.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    /// None keeps connections for the life of the pool
    pub max_lifetime: Option<Duration>,
    /// None never closes idle connections
    pub idle_timeout: Option<Duration>,
}

impl DatabaseSettings {
    /// Single-connection in-memory database. Every pooled connection to
    /// `:memory:` is its own database, so the pool must never recycle it.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            max_lifetime: None,
            idle_timeout: None,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// `CurrencyRepository` backed by SQLite.
#[derive(Debug, Clone)]
pub struct SqliteCurrencyRepository {
    pool: SqlitePool,
}

impl SqliteCurrencyRepository {
    /// Opens the pool and makes sure the schema exists.
    pub async fn connect(settings: &DatabaseSettings) -> std::result::Result<Self, sqlx::Error> {
        info!("Opening SQLite database at: {}", settings.url);

        let mut options = SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(true);
        if !settings.is_in_memory() {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .max_lifetime(settings.max_lifetime)
            .idle_timeout(settings.idle_timeout)
            .connect_with(options)
            .await?;

        let repository = Self::from_pool(pool);
        repository.migrate().await?;
        info!("Database initialization complete");
        Ok(repository)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS currencies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                iso_code TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("Currency {} does not exist", id))
}

#[async_trait]
impl CurrencyRepository for SqliteCurrencyRepository {
    #[instrument(skip(self, draft), err)]
    async fn create(&self, draft: CurrencyDraft) -> Result<Currency> {
        let now = Utc::now();
        let currency = sqlx::query_as::<_, Currency>(&format!(
            "INSERT INTO currencies (title, iso_code, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?3) RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(&draft.title)
        .bind(&draft.iso_code)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = currency.id, "currency row inserted");
        Ok(currency)
    }

    #[instrument(skip(self, draft), err)]
    async fn update(&self, id: i64, draft: CurrencyDraft) -> Result<Currency> {
        sqlx::query_as::<_, Currency>(&format!(
            "UPDATE currencies SET title = ?1, iso_code = ?2, updated_at = ?3 \
             WHERE id = ?4 RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(&draft.title)
        .bind(&draft.iso_code)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Currency> {
        sqlx::query_as::<_, Currency>(&format!(
            "SELECT {} FROM currencies WHERE id = ?1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM currencies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self), fields(sort = %sort), err)]
    async fn get_all(&self, offset: i64, limit: i64, sort: SortKey) -> Result<Vec<Currency>> {
        // ORDER BY cannot be bound; SortKey only renders whitelisted columns.
        let sql = format!(
            "SELECT {} FROM currencies ORDER BY {}, id ASC LIMIT ?1 OFFSET ?2",
            SELECT_COLUMNS, sort
        );
        let currencies = sqlx::query_as::<_, Currency>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(currencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{SortDirection, SortField};

    async fn repository() -> SqliteCurrencyRepository {
        SqliteCurrencyRepository::connect(&DatabaseSettings::in_memory())
            .await
            .unwrap()
    }

    fn draft(title: &str, iso_code: &str) -> CurrencyDraft {
        CurrencyDraft {
            title: title.to_string(),
            iso_code: iso_code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = repository().await;
        let first = repo.create(draft("Euro", "EUR")).await.unwrap();
        let second = repo.create(draft("Dollar", "USD")).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip_and_missing() {
        let repo = repository().await;
        let created = repo.create(draft("Pound", "GBP")).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.title, "Pound");
        assert_eq!(fetched.iso_code, "GBP");

        let missing = repo.get_by_id(created.id + 100).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let repo = repository().await;
        let created = repo.create(draft("Frank", "CHF")).await.unwrap();

        let updated = repo
            .update(created.id, draft("Swiss Franc", "CHF"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Swiss Franc");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let missing = repo.update(999, draft("Ghost", "XXX")).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = repository().await;
        let created = repo.create(draft("Rupee", "INR")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            repo.delete(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_all_pages_and_sorts() {
        let repo = repository().await;
        for (title, code) in [("Yen", "JPY"), ("Euro", "EUR"), ("Dollar", "USD"), ("Won", "KRW")] {
            repo.create(draft(title, code)).await.unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 4);

        let by_title = SortKey {
            field: SortField::Title,
            direction: SortDirection::Asc,
        };
        let page = repo.get_all(0, 2, by_title).await.unwrap();
        let titles: Vec<_> = page.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Dollar", "Euro"]);

        let by_code_desc = SortKey {
            field: SortField::IsoCode,
            direction: SortDirection::Desc,
        };
        let page = repo.get_all(2, 2, by_code_desc).await.unwrap();
        let codes: Vec<_> = page.iter().map(|c| c.iso_code.as_str()).collect();
        assert_eq!(codes, vec!["JPY", "EUR"]);

        let past_end = repo.get_all(10, 2, SortKey::default()).await.unwrap();
        assert!(past_end.is_empty());
    }
}
