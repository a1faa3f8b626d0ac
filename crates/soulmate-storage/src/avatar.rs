//! Avatar image storage keyed by user id.

use crate::{ProfileStorage, SimpleStorage};
use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

const AVATARS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("avatars");
const CONTENT_TYPE_TABLE: TableDefinition<&str, &str> =
    TableDefinition::new("avatars:content_type");

/// Stored avatar image with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarBlob {
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AvatarStorage {
    db: Arc<Database>,
}

impl AvatarStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(AVATARS_TABLE)?;
        write_txn.open_table(CONTENT_TYPE_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Store (or replace) the avatar of a user and rewrite the owner's
    /// profile in the same write transaction.
    ///
    /// The closure receives the current profile bytes (if any) and returns
    /// the bytes to store. Returning an error aborts both writes.
    pub fn put_with_profile<F>(&self, user_id: &str, blob: &AvatarBlob, f: F) -> Result<Vec<u8>>
    where
        F: FnOnce(Option<&[u8]>) -> Result<Vec<u8>>,
    {
        let write_txn = self.db.begin_write()?;
        {
            let mut avatars = write_txn.open_table(AVATARS_TABLE)?;
            avatars.insert(user_id, blob.data.as_slice())?;
        }
        {
            let mut content_types = write_txn.open_table(CONTENT_TYPE_TABLE)?;
            content_types.insert(user_id, blob.content_type.as_str())?;
        }
        let profile = {
            let mut profiles = write_txn.open_table(<ProfileStorage as SimpleStorage>::TABLE)?;
            let current = profiles.get(user_id)?.map(|value| value.value().to_vec());
            let updated = f(current.as_deref())?;
            profiles.insert(user_id, updated.as_slice())?;
            updated
        };
        write_txn.commit()?;
        Ok(profile)
    }

    pub fn get(&self, user_id: &str) -> Result<Option<AvatarBlob>> {
        let read_txn = self.db.begin_read()?;
        let avatars = read_txn.open_table(AVATARS_TABLE)?;
        let content_types = read_txn.open_table(CONTENT_TYPE_TABLE)?;

        let Some(data) = avatars.get(user_id)?.map(|value| value.value().to_vec()) else {
            return Ok(None);
        };
        let content_type = content_types
            .get(user_id)?
            .map(|value| value.value().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(Some(AvatarBlob { content_type, data }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup() -> (AvatarStorage, ProfileStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("avatars.db")).unwrap());
        (
            AvatarStorage::new(db.clone()).unwrap(),
            ProfileStorage::new(db).unwrap(),
            temp_dir,
        )
    }

    #[test]
    fn test_put_replaces_and_writes_profile() {
        let (storage, profiles, _temp_dir) = setup();

        let png = AvatarBlob {
            content_type: "image/png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
        };
        storage
            .put_with_profile("u-1", &png, |current| {
                assert!(current.is_none());
                Ok(b"v1".to_vec())
            })
            .unwrap();
        assert_eq!(storage.get("u-1").unwrap().unwrap(), png);

        let jpeg = AvatarBlob {
            content_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8],
        };
        let stored = storage
            .put_with_profile("u-1", &jpeg, |current| {
                assert_eq!(current, Some(&b"v1"[..]));
                Ok(b"v2".to_vec())
            })
            .unwrap();
        assert_eq!(stored, b"v2");
        assert_eq!(storage.get("u-1").unwrap().unwrap().content_type, "image/jpeg");
        assert_eq!(profiles.get_raw("u-1").unwrap().unwrap(), b"v2");
    }

    #[test]
    fn test_profile_error_discards_avatar() {
        let (storage, profiles, _temp_dir) = setup();
        let png = AvatarBlob {
            content_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };

        let result = storage.put_with_profile("u-1", &png, |_| Err(anyhow::anyhow!("boom")));
        assert!(result.is_err());
        assert!(storage.get("u-1").unwrap().is_none());
        assert!(profiles.get_raw("u-1").unwrap().is_none());
    }
}
