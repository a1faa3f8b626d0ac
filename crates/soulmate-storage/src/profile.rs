//! Profile storage - user profiles keyed by user id.

use crate::{SimpleStorage, define_simple_storage};
use anyhow::Result;

define_simple_storage! {
    /// Profile storage with byte-level API.
    pub struct ProfileStorage { table: "profiles" }
}

impl ProfileStorage {
    /// Atomically rewrite a profile from its current bytes.
    pub fn modify<F>(&self, user_id: &str, f: F) -> Result<Vec<u8>>
    where
        F: FnOnce(Option<&[u8]>) -> Result<Vec<u8>>,
    {
        <Self as SimpleStorage>::modify_raw(self, user_id, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::Database;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn setup() -> (ProfileStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("profiles.db")).unwrap());
        (ProfileStorage::new(db).unwrap(), temp_dir)
    }

    #[test]
    fn test_modify_creates_and_updates() {
        let (storage, _temp_dir) = setup();

        let counter = |current: Option<&[u8]>| -> Result<Vec<u8>> {
            let value = current
                .map(|bytes| std::str::from_utf8(bytes).unwrap().parse::<u64>().unwrap())
                .unwrap_or(0);
            Ok((value + 1).to_string().into_bytes())
        };

        storage.modify("u-1", counter).unwrap();
        let stored = storage.modify("u-1", counter).unwrap();
        assert_eq!(stored, b"2");
        assert_eq!(storage.get_raw("u-1").unwrap().unwrap(), b"2");
    }

    #[test]
    fn test_modify_error_leaves_value_untouched() {
        let (storage, _temp_dir) = setup();
        storage.put_raw("u-1", b"keep").unwrap();

        let result = storage.modify("u-1", |_| Err(anyhow::anyhow!("boom")));
        assert!(result.is_err());
        assert_eq!(storage.get_raw("u-1").unwrap().unwrap(), b"keep");
    }
}
