//! Chat message storage with a per-user chronological index.
//!
//! Index keys have the shape `{user_id}:{created_at:020}:{seq:020}`. The
//! sequence comes from a counter bumped in the same write transaction, so
//! messages created within the same millisecond keep their insertion order.

use anyhow::{Result, anyhow};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

use crate::range_utils::{prefix_range, sortable_millis, sortable_u64};

const MESSAGES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("messages");
const USER_INDEX_TABLE: TableDefinition<&str, &str> = TableDefinition::new("messages:user_index");
const SEQ_TABLE: TableDefinition<&str, u64> = TableDefinition::new("messages:seq");

const SEQ_KEY: &str = "next";

#[derive(Debug, Clone)]
pub struct MessageStorage {
    db: Arc<Database>,
}

impl MessageStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(MESSAGES_TABLE)?;
        write_txn.open_table(USER_INDEX_TABLE)?;
        write_txn.open_table(SEQ_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Append a message for a user. Returns the assigned sequence number.
    pub fn append(&self, id: &str, user_id: &str, created_at_ms: i64, data: &[u8]) -> Result<u64> {
        let write_txn = self.db.begin_write()?;

        let seq = {
            let mut seq_table = write_txn.open_table(SEQ_TABLE)?;
            let seq = seq_table.get(SEQ_KEY)?.map(|v| v.value()).unwrap_or(0);
            seq_table.insert(SEQ_KEY, seq + 1)?;
            seq
        };

        {
            let mut messages = write_txn.open_table(MESSAGES_TABLE)?;
            if messages.get(id)?.is_some() {
                return Err(anyhow!("Message {} already exists", id));
            }
            messages.insert(id, data)?;
        }

        {
            let mut index = write_txn.open_table(USER_INDEX_TABLE)?;
            let key = Self::index_key(user_id, created_at_ms, seq);
            index.insert(key.as_str(), id)?;
        }

        write_txn.commit()?;
        Ok(seq)
    }

    /// All messages of a user, oldest first.
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let prefix = Self::user_prefix(user_id);
        let (start, end) = prefix_range(&prefix);
        self.scan(&start, &end)
    }

    /// Messages of a user created at or after `since_ms`, oldest first.
    pub fn list_by_user_since(&self, user_id: &str, since_ms: i64) -> Result<Vec<(String, Vec<u8>)>> {
        let prefix = Self::user_prefix(user_id);
        let (_, end) = prefix_range(&prefix);
        let start = format!("{}{}:", prefix, sortable_millis(since_ms));
        self.scan(&start, &end)
    }

    /// Number of messages stored for a user.
    pub fn count_by_user(&self, user_id: &str) -> Result<usize> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(USER_INDEX_TABLE)?;
        let (start, end) = prefix_range(&Self::user_prefix(user_id));

        let mut count = 0;
        for row in index.range(start.as_str()..end.as_str())? {
            row?;
            count += 1;
        }
        Ok(count)
    }

    fn scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(USER_INDEX_TABLE)?;
        let messages = read_txn.open_table(MESSAGES_TABLE)?;

        let mut items = Vec::new();
        for row in index.range(start..end)? {
            let (_key, id) = row?;
            if let Some(value) = messages.get(id.value())? {
                items.push((id.value().to_string(), value.value().to_vec()));
            }
        }
        Ok(items)
    }

    fn user_prefix(user_id: &str) -> String {
        format!("{}:", user_id)
    }

    fn index_key(user_id: &str, created_at_ms: i64, seq: u64) -> String {
        format!(
            "{}:{}:{}",
            user_id,
            sortable_millis(created_at_ms),
            sortable_u64(seq)
        )
    }
}
