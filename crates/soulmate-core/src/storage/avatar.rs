//! Typed avatar storage.

use crate::models::Profile;
use anyhow::Result;
use redb::Database;
use soulmate_storage::AvatarBlob;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AvatarStorage {
    inner: soulmate_storage::AvatarStorage,
}

impl AvatarStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::AvatarStorage::new(db)?,
        })
    }

    pub fn get(&self, user_id: &str) -> Result<Option<AvatarBlob>> {
        self.inner.get(user_id)
    }

    /// Replace the avatar and update the owner's profile in one write
    /// transaction, starting from a blank profile when none exists yet.
    pub fn put_with_profile<F>(&self, user_id: &str, blob: &AvatarBlob, f: F) -> Result<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let bytes = self.inner.put_with_profile(user_id, blob, |current| {
            let mut profile = match current {
                Some(bytes) => serde_json::from_slice(bytes)?,
                None => Profile::blank(user_id),
            };
            f(&mut profile);
            Ok(serde_json::to_vec(&profile)?)
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
