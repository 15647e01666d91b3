//! PostgreSQL implementation of the store ports.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{AlertStore, MonitoredStore, ResultStore, StoreFuture};
use crate::config::MonitorConfig;
use crate::domain::{AlertEvent, CheckResult};
use crate::error::MonitorError;

/// PostgreSQL-backed stores using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store with an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects using the pool settings from `config` and bootstraps the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Persistence`] if the pool cannot be built
    /// or the schema statements fail.
    pub async fn connect(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await
            .map_err(|e| MonitorError::Persistence(e.to_string()))?;

        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Creates the tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Persistence`] on database failure.
    pub async fn init_schema(&self) -> Result<(), MonitorError> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS checks (
                email TEXT PRIMARY KEY,
                checked_at TIMESTAMPTZ NOT NULL,
                breach_count INT NOT NULL,
                risk_score INT NOT NULL,
                risk_category TEXT NOT NULL,
                payload JSONB NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS alerts (
                id UUID PRIMARY KEY,
                email TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                new_breach_count INT NOT NULL,
                payload JSONB NOT NULL
            )",
            "CREATE INDEX IF NOT EXISTS alerts_email_created_idx
                ON alerts (email, created_at)",
            "CREATE TABLE IF NOT EXISTS monitored_emails (
                email TEXT PRIMARY KEY,
                added_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        ];
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| MonitorError::Persistence(e.to_string()))?;
        }
        Ok(())
    }
}

impl ResultStore for PostgresStore {
    fn latest<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<CheckResult>> {
        Box::pin(async move {
            let row = sqlx::query_scalar::<_, serde_json::Value>(
                "SELECT payload FROM checks WHERE email = $1",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            row.map(|payload| {
                serde_json::from_value(payload)
                    .map_err(|e| MonitorError::Persistence(format!("stored check invalid: {e}")))
            })
            .transpose()
        })
    }

    fn save<'a>(&'a self, result: &'a CheckResult) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let payload = serde_json::to_value(result)
                .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            sqlx::query(
                "INSERT INTO checks (email, checked_at, breach_count, risk_score, risk_category, payload)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT (email) DO UPDATE SET
                    checked_at = EXCLUDED.checked_at,
                    breach_count = EXCLUDED.breach_count,
                    risk_score = EXCLUDED.risk_score,
                    risk_category = EXCLUDED.risk_category,
                    payload = EXCLUDED.payload",
            )
            .bind(&result.email)
            .bind(result.checked_at)
            .bind(i32::try_from(result.breach_count).unwrap_or(i32::MAX))
            .bind(i32::from(result.risk_score))
            .bind(result.risk_category.as_str())
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            Ok(())
        })
    }
}

impl AlertStore for PostgresStore {
    fn append<'a>(&'a self, alert: &'a AlertEvent) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let payload =
                serde_json::to_value(alert).map_err(|e| MonitorError::Persistence(e.to_string()))?;

            sqlx::query(
                "INSERT INTO alerts (id, email, created_at, new_breach_count, payload)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(alert.id.as_uuid())
            .bind(&alert.email)
            .bind(alert.created_at)
            .bind(i32::try_from(alert.new_breach_names.len()).unwrap_or(i32::MAX))
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            Ok(())
        })
    }

    fn list_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Vec<AlertEvent>> {
        Box::pin(async move {
            let rows = sqlx::query_scalar::<_, serde_json::Value>(
                "SELECT payload FROM alerts WHERE email = $1 ORDER BY created_at ASC",
            )
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            rows.into_iter()
                .map(|payload| {
                    serde_json::from_value(payload).map_err(|e| {
                        MonitorError::Persistence(format!("stored alert invalid: {e}"))
                    })
                })
                .collect()
        })
    }

    fn delete_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, u64> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM alerts WHERE email = $1")
                .bind(email)
                .execute(&self.pool)
                .await
                .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            Ok(result.rows_affected())
        })
    }
}

impl MonitoredStore for PostgresStore {
    fn add<'a>(&'a self, email: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO monitored_emails (email) VALUES ($1)
                 ON CONFLICT (email) DO NOTHING",
            )
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            Ok(())
        })
    }

    fn remove<'a>(&'a self, email: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM monitored_emails WHERE email = $1")
                .bind(email)
                .execute(&self.pool)
                .await
                .map_err(|e| MonitorError::Persistence(e.to_string()))?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<String>> {
        Box::pin(async move {
            sqlx::query_scalar::<_, String>("SELECT email FROM monitored_emails ORDER BY email")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| MonitorError::Persistence(e.to_string()))
        })
    }
}
