//! Typed profile storage.

use crate::models::Profile;
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProfileStorage {
    inner: soulmate_storage::ProfileStorage,
}

impl ProfileStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::ProfileStorage::new(db)?,
        })
    }

    pub fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        match self.inner.get_raw(user_id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Update a profile inside one write transaction, starting from a blank
    /// profile when none exists yet.
    pub fn update<F>(&self, user_id: &str, f: F) -> Result<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let bytes = self.inner.modify(user_id, |current| {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_update_creates_blank_profile() {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("p.db")).unwrap());
        let storage = ProfileStorage::new(db).unwrap();

        let profile = storage.update("u-1", |p| p.prompt_count += 1).unwrap();
        assert_eq!(profile.prompt_count, 1);
        assert_eq!(profile.username, "");

        let profile = storage.update("u-1", |p| p.prompt_count += 1).unwrap();
        assert_eq!(profile.prompt_count, 2);
        assert_eq!(storage.get("u-1").unwrap().unwrap().prompt_count, 2);
    }
}
