//! Typed sign-in session storage.

use crate::models::AuthSession;
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AuthSessionStorage {
    inner: soulmate_storage::AuthSessionStorage,
}

impl AuthSessionStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::AuthSessionStorage::new(db)?,
        })
    }

    /// Insert or overwrite a session.
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        let json = serde_json::to_vec(session)?;
        self.inner.put_raw(&session.id, &json)
    }

    pub fn get(&self, id: &str) -> Result<Option<AuthSession>> {
        match self.inner.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.inner.delete(id)
    }
}
