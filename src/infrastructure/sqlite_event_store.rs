use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};

use crate::domain::{
    account::Address,
    event::{ChainEvent, StoredEvent},
    store::EventStore,
};

#[derive(Clone)]
pub struct SqliteEventStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteEventStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // a single connection keeps appends in log order and makes
        // sqlite::memory: URLs behave as one database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                contract TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                payload TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn append(&self, contract: Address, event: &ChainEvent) -> Result<()> {
        sqlx::query("INSERT INTO events (contract, recorded_at, payload) VALUES (?1, ?2, ?3)")
            .bind(contract.to_string())
            .bind(Utc::now().to_rfc3339())
            .bind(serde_json::to_string(event)?)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn events(&self, offset: u64, limit: u64) -> Result<Vec<StoredEvent>> {
        let rows = sqlx::query(
            "SELECT seq, contract, recorded_at, payload FROM events ORDER BY seq LIMIT ?1 OFFSET ?2",
        )
        .bind(limit.min(i64::MAX as u64) as i64)
        .bind(offset.min(i64::MAX as u64) as i64)
        .fetch_all(&*self.pool)
        .await?;
        rows.into_iter().map(row_to_event).collect()
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM events")
            .fetch_one(&*self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }
}

fn row_to_event(row: SqliteRow) -> Result<StoredEvent> {
    let seq: i64 = row.get("seq");
    let contract: String = row.get("contract");
    let recorded_at: String = row.get("recorded_at");
    let payload: String = row.get("payload");

    Ok(StoredEvent {
        seq: seq as u64,
        contract: contract.parse()?,
        recorded_at: DateTime::parse_from_rfc3339(&recorded_at)?.with_timezone(&Utc),
        event: serde_json::from_str(&payload)?,
    })
}
