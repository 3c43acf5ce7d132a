//! SQLite-backed token store.
//!
//! Keeps the token pair in a single-row table so a login survives restarts.

use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::TokenStore;
use crate::errors::ClientError;
use crate::models::TokenPair;

#[derive(Clone)]
pub struct SqliteTokenStore {
    pool: SqlitePool,
}

impl SqliteTokenStore {
    /// Open (creating if needed) the session database and its table.
    pub async fn open(db_path: &Path) -> Result<Self, ClientError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_tokens (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                access_token TEXT NOT NULL,
                refresh_token TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

impl TokenStore for SqliteTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>, ClientError> {
        let row = sqlx::query("SELECT access_token, refresh_token FROM session_tokens WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| TokenPair {
            access: row.get("access_token"),
            refresh: row.get("refresh_token"),
        }))
    }

    async fn save(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        sqlx::query(
            r#"
            INSERT INTO session_tokens (id, access_token, refresh_token, updated_at)
            VALUES (1, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&tokens.access)
        .bind(&tokens.refresh)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        sqlx::query("DELETE FROM session_tokens")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
