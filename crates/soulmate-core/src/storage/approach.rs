//! Typed approach storage.

use crate::models::Approach;
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ApproachStorage {
    inner: soulmate_storage::ApproachStorage,
}

impl ApproachStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::ApproachStorage::new(db)?,
        })
    }

    /// Create a new approach (fails if already exists).
    pub fn create(&self, approach: &Approach) -> Result<()> {
        if self.inner.exists(&approach.id)? {
            return Err(anyhow::anyhow!("Approach {} already exists", approach.id));
        }
        let json = serde_json::to_vec(approach)?;
        self.inner.put_raw(&approach.id, &json)
    }

    pub fn get(&self, id: &str) -> Result<Option<Approach>> {
        match self.inner.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All approaches, oldest first.
    pub fn list(&self) -> Result<Vec<Approach>> {
        let mut approaches = Vec::new();
        for (_, bytes) in self.inner.list_raw()? {
            approaches.push(serde_json::from_slice::<Approach>(&bytes)?);
        }
        approaches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(approaches)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.inner.delete(id)
    }
}
