//! Postgres implementation of the audit store.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::error::{AuditError, Result};
use crate::store::{AuditStore, AuditTx};

/// Audit store over a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgAuditStore {
    pool: PgPool,
}

impl PgAuditStore {
    /// Connect to Postgres with the given DSN.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(dsn).await?;

        info!("connected to audit store");

        Ok(Self { pool })
    }

    /// Run database migrations. Call once after connecting.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("audit store migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn begin(&self) -> Result<Box<dyn AuditTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgAuditTx { tx }))
    }
}

/// One open Postgres transaction.
pub struct PgAuditTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AuditTx for PgAuditTx {
    async fn room_exists(&mut self, room_id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM chat WHERE room_id = $1)
            "#,
        )
        .bind(room_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(exists)
    }

    async fn insert_room(&mut self, room_id: &str, data: &Value) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat (room_id, data)
            VALUES ($1, $2)
            "#,
        )
        .bind(room_id)
        .bind(data)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn set_status(&mut self, room_id: &str, status: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE chat
            SET status = $1
            WHERE room_id = $2
            "#,
        )
        .bind(status)
        .bind(room_id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuditError::RoomNotFound(room_id.to_string()));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
