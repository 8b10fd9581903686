//! SQLite-backed quote store.
//!
//! # Responsibilities
//! - Open the shared connection pool and provision the quote table
//! - Append one row per quote under the caller's deadline
//!
//! # Design Decisions
//! - Append-only: rows are never updated or deleted here
//! - The pool is the only synchronisation; SQLite serialises writers
//! - Table name comes from validated config and is the only interpolated SQL

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::config::StorageConfig;
use crate::quoting::types::Quote;
use crate::resilience::{Deadline, DeadlineExceeded};

/// A quote could not be written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("persistence timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl PersistenceError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Store(_) => "store",
        }
    }
}

/// Shared handle to the quote table.
#[derive(Clone)]
pub struct QuoteStore {
    pool: SqlitePool,
    table: Arc<str>,
    insert_sql: Arc<str>,
}

impl QuoteStore {
    /// Connect to the database and make sure the quote table exists.
    pub async fn connect(config: &StorageConfig) -> Result<Self, PersistenceError> {
        tracing::info!(
            database_url = %config.database_url,
            table = %config.table,
            "Connecting to quote store"
        );

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let insert_sql = format!(
            "INSERT INTO {} (code, codein, name, high, low, var_bid, pct_change, bid, ask, \
             timestamp, create_date, inserted_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            config.table
        );

        let store = Self {
            pool,
            table: Arc::from(config.table.as_str()),
            insert_sql: Arc::from(insert_sql),
        };
        store.initialize_schema().await?;

        tracing::info!(table = %store.table, "Quote store ready");
        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL,
                codein TEXT NOT NULL,
                name TEXT NOT NULL,
                high TEXT NOT NULL,
                low TEXT NOT NULL,
                var_bid TEXT NOT NULL,
                pct_change TEXT NOT NULL,
                bid TEXT NOT NULL,
                ask TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                create_date TEXT NOT NULL,
                inserted_at TEXT NOT NULL
            )
            "#,
            self.table
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append one quote before `deadline`, returning the new row id.
    pub async fn append(&self, quote: &Quote, deadline: Deadline) -> Result<i64, PersistenceError> {
        let inserted_at = Utc::now().to_rfc3339();
        let query = sqlx::query(&self.insert_sql)
            .bind(quote.code())
            .bind(quote.code_in())
            .bind(quote.name())
            .bind(quote.high())
            .bind(quote.low())
            .bind(quote.var_bid())
            .bind(quote.pct_change())
            .bind(quote.bid())
            .bind(quote.ask())
            .bind(quote.timestamp())
            .bind(quote.create_date())
            .bind(inserted_at)
            .execute(&self.pool);

        let result = deadline.run(query).await??;
        Ok(result.last_insert_rowid())
    }

    /// Number of stored quotes.
    pub async fn count(&self) -> Result<i64, PersistenceError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Close every pooled connection. Later appends fail with `Store`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
