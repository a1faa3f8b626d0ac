//! Typed message storage.

use crate::models::Message;
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MessageStorage {
    inner: soulmate_storage::MessageStorage,
}

impl MessageStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::MessageStorage::new(db)?,
        })
    }

    pub fn append(&self, message: &Message) -> Result<()> {
        let json = serde_json::to_vec(message)?;
        self.inner
            .append(&message.id, &message.user_id, message.created_at, &json)?;
        Ok(())
    }

    /// All of a user's messages, ascending by creation time then insertion.
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<Message>> {
        decode_all(self.inner.list_by_user(user_id)?)
    }

    /// A user's messages created at or after `since_ms`, ascending.
    pub fn list_by_user_since(&self, user_id: &str, since_ms: i64) -> Result<Vec<Message>> {
        decode_all(self.inner.list_by_user_since(user_id, since_ms)?)
    }

    pub fn count_by_user(&self, user_id: &str) -> Result<usize> {
        self.inner.count_by_user(user_id)
    }
}

fn decode_all(raw: Vec<(String, Vec<u8>)>) -> Result<Vec<Message>> {
    let mut messages = Vec::with_capacity(raw.len());
    for (_, bytes) in raw {
        messages.push(serde_json::from_slice(&bytes)?);
    }
    Ok(messages)
}
