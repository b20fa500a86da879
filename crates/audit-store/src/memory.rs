//! In-memory audit store for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AuditError, Result};
use crate::store::{AuditStore, AuditTx};

/// A committed audit row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRow {
    pub data: Value,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
enum StagedWrite {
    Insert { room_id: String, data: Value },
    SetStatus { room_id: String, status: String },
}

/// Audit store backed by a shared map. Transactions stage writes and apply
/// them on commit, so a rolled-back transaction leaves no trace, matching
/// the Postgres implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditStore {
    rows: Arc<Mutex<HashMap<String, ChatRow>>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed row for a room, if any.
    pub fn row(&self, room_id: &str) -> Option<ChatRow> {
        self.rows.lock().unwrap().get(room_id).cloned()
    }

    /// Number of committed rows.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn begin(&self) -> Result<Box<dyn AuditTx>> {
        Ok(Box::new(MemoryAuditTx {
            rows: Arc::clone(&self.rows),
            staged: Vec::new(),
        }))
    }
}

struct MemoryAuditTx {
    rows: Arc<Mutex<HashMap<String, ChatRow>>>,
    staged: Vec<StagedWrite>,
}

impl MemoryAuditTx {
    fn staged_insert(&self, room_id: &str) -> bool {
        self.staged
            .iter()
            .any(|w| matches!(w, StagedWrite::Insert { room_id: r, .. } if r == room_id))
    }
}

#[async_trait]
impl AuditTx for MemoryAuditTx {
    async fn room_exists(&mut self, room_id: &str) -> Result<bool> {
        let committed = self.rows.lock().unwrap().contains_key(room_id);
        Ok(committed || self.staged_insert(room_id))
    }

    async fn insert_room(&mut self, room_id: &str, data: &Value) -> Result<()> {
        self.staged.push(StagedWrite::Insert {
            room_id: room_id.to_string(),
            data: data.clone(),
        });
        Ok(())
    }

    async fn set_status(&mut self, room_id: &str, status: &str) -> Result<()> {
        let committed = self.rows.lock().unwrap().contains_key(room_id);
        if !committed && !self.staged_insert(room_id) {
            return Err(AuditError::RoomNotFound(room_id.to_string()));
        }

        self.staged.push(StagedWrite::SetStatus {
            room_id: room_id.to_string(),
            status: status.to_string(),
        });
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        for write in self.staged {
            match write {
                StagedWrite::Insert { room_id, data } => {
                    rows.insert(room_id, ChatRow { data, status: None });
                }
                StagedWrite::SetStatus { room_id, status } => {
                    if let Some(row) = rows.get_mut(&room_id) {
                        row.status = Some(status);
                    }
                }
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
